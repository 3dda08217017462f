//! Vertex (node) types

use crate::value::{Properties, Value};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a vertex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId(pub Ulid);

impl VertexId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for VertexId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) fn default_vertex_label() -> String {
    "vertex".to_string()
}

/// A vertex in a property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier
    pub id: VertexId,

    /// Vertex name (unique within a graph)
    pub name: String,

    /// Vertex label/category
    pub label: String,

    /// Key/value properties
    #[serde(default)]
    pub properties: Properties,

    /// Outgoing edges, as arena positions, in insertion order
    #[serde(skip)]
    pub(crate) out_edges: Vec<usize>,

    /// Incoming edges, as arena positions, in insertion order
    #[serde(skip)]
    pub(crate) in_edges: Vec<usize>,
}

impl Vertex {
    /// Create a new vertex with no edges
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: VertexId::new(),
            name: name.into(),
            label: label.into(),
            properties: Properties::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    pub fn out_degree(&self) -> usize {
        self.out_edges.len()
    }

    pub fn in_degree(&self) -> usize {
        self.in_edges.len()
    }
}

/// Data for creating a new vertex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVertex {
    pub name: String,
    #[serde(default = "default_vertex_label")]
    pub label: String,
    #[serde(default)]
    pub properties: Properties,
}

impl NewVertex {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let vertex = Vertex::new("marko", "person");

        assert_eq!(vertex.name, "marko");
        assert_eq!(vertex.label, "person");
        assert!(vertex.properties.is_empty());
        assert_eq!(vertex.out_degree(), 0);
        assert_eq!(vertex.in_degree(), 0);
    }

    #[test]
    fn test_new_vertex_defaults() {
        let vertex: NewVertex = serde_json::from_str(r#"{"name": "lop"}"#).unwrap();
        assert_eq!(vertex.label, "vertex");
        assert!(vertex.properties.is_empty());

        let vertex = NewVertex::new("josh", "person").with_property("age", 32);
        assert_eq!(vertex.properties["age"], Value::Int(32));
    }
}
