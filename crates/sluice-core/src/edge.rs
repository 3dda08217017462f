//! Edge types and traversal direction

use crate::error::Error;
use crate::value::{Properties, Value};
use crate::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Ulid);

impl EdgeId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction for graph traversal
///
/// `Outgoing` selects the first side of a relation (a vertex's out-edges, an
/// edge's out-vertex), `Incoming` the second side, and `Both` the first side
/// followed by the second. Edge-to-vertex traversal is the exception: there
/// `Both` yields the in-vertex before the out-vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "out")]
    Outgoing,
    #[serde(alias = "in")]
    Incoming,
    #[default]
    Both,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(Self::Outgoing),
            "incoming" | "in" => Ok(Self::Incoming),
            "both" => Ok(Self::Both),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outgoing => write!(f, "outgoing"),
            Self::Incoming => write!(f, "incoming"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// A directed, labeled edge between two vertices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,

    /// Type of relationship (e.g., "knows", "created")
    pub label: String,

    /// Tail vertex (the edge leaves this vertex)
    pub out_id: VertexId,

    /// Head vertex (the edge enters this vertex)
    pub in_id: VertexId,

    /// Key/value properties
    #[serde(default)]
    pub properties: Properties,

    #[serde(skip)]
    pub(crate) out_pos: usize,

    #[serde(skip)]
    pub(crate) in_pos: usize,
}

/// Data for creating a new edge, endpoints referenced by vertex name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(default)]
    pub properties: Properties,
}

impl NewEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
