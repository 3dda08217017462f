//! Output formatting utilities

use serde::Serialize;
use sluice_pipes::{Path, PathItem};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Format output as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Render a path as `a -> b -> c`
pub fn format_path(path: &Path) -> String {
    path.iter()
        .map(PathItem::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
