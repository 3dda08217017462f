//! CLI command implementations

pub mod completions;
pub mod config;
pub mod inspect;
pub mod query;

use std::path::{Path, PathBuf};

use anyhow::Context;
use sluice_core::PropertyGraph;

use crate::config::Config;

/// The graph document from `--graph`, else the configured one
pub fn graph_path(flag: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.graph.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No graph document given. Pass --graph or run `sluice config set graph FILE`.")
        })
}

pub fn load_graph(path: &Path) -> anyhow::Result<PropertyGraph> {
    tracing::debug!("Loading graph from {}", path.display());
    let graph = PropertyGraph::load(path)
        .with_context(|| format!("Failed to load graph document {}", path.display()))?;
    tracing::info!(
        "Loaded {} vertices and {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}
