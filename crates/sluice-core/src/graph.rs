//! In-memory property graph

use crate::edge::{Edge, EdgeId, NewEdge};
use crate::element::{EdgeIter, EdgeRef, VertexIter, VertexRef};
use crate::error::{Error, Result};
use crate::limits::{
    validate_document_size, validate_label, validate_property_key, validate_vertex_name,
};
use crate::value::Properties;
use crate::vertex::{NewVertex, Vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

/// Serialized form of a graph: vertices by name, edges referencing them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<NewVertex>,
    #[serde(default)]
    pub edges: Vec<NewEdge>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vertices(mut self, vertices: Vec<NewVertex>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn with_edges(mut self, edges: Vec<NewEdge>) -> Self {
        self.edges = edges;
        self
    }
}

/// Append-only arena of vertices and edges
///
/// Every vertex keeps its out-edges and in-edges in insertion order, which is
/// the order traversals emit them in.
#[derive(Debug, Clone, Default)]
pub struct PropertyGraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<VertexId, usize>,
    edge_by_id: HashMap<EdgeId, usize>,
}

impl PropertyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex; names must be unique
    pub fn add_vertex(&mut self, new: NewVertex) -> Result<VertexId> {
        validate_vertex_name(&new.name)?;
        validate_label(&new.label)?;
        validate_keys(&new.properties)?;
        if self.by_name.contains_key(&new.name) {
            return Err(Error::DuplicateVertex(new.name));
        }

        let mut vertex = Vertex::new(new.name, new.label);
        vertex.properties = new.properties;
        let id = vertex.id.clone();
        let pos = self.vertices.len();

        tracing::trace!("Adding vertex {} ({}) at {}", vertex.name, id, pos);
        self.by_name.insert(vertex.name.clone(), pos);
        self.by_id.insert(id.clone(), pos);
        self.vertices.push(vertex);
        Ok(id)
    }

    /// Add an edge between two existing vertices, referenced by name
    pub fn add_edge(&mut self, new: NewEdge) -> Result<EdgeId> {
        validate_label(&new.label)?;
        validate_keys(&new.properties)?;
        let out_pos = *self
            .by_name
            .get(&new.from)
            .ok_or_else(|| Error::VertexNotFound(new.from.clone()))?;
        let in_pos = *self
            .by_name
            .get(&new.to)
            .ok_or_else(|| Error::VertexNotFound(new.to.clone()))?;

        let id = EdgeId::new();
        let pos = self.edges.len();
        let edge = Edge {
            id: id.clone(),
            label: new.label,
            out_id: self.vertices[out_pos].id.clone(),
            in_id: self.vertices[in_pos].id.clone(),
            properties: new.properties,
            out_pos,
            in_pos,
        };

        tracing::trace!("Adding edge {} -[{}]-> {}", new.from, edge.label, new.to);
        self.vertices[out_pos].out_edges.push(pos);
        self.vertices[in_pos].in_edges.push(pos);
        self.edge_by_id.insert(id.clone(), pos);
        self.edges.push(edge);
        Ok(id)
    }

    pub fn vertex(&self, id: &VertexId) -> Option<VertexRef<'_>> {
        self.by_id.get(id).map(|&pos| VertexRef::new(self, pos))
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<VertexRef<'_>> {
        self.by_name.get(name).map(|&pos| VertexRef::new(self, pos))
    }

    pub fn edge(&self, id: &EdgeId) -> Option<EdgeRef<'_>> {
        self.edge_by_id.get(id).map(|&pos| EdgeRef::new(self, pos))
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> VertexIter<'_> {
        VertexIter::all(self)
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> EdgeIter<'_> {
        EdgeIter::all(self)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Build a graph from its serialized form
    pub fn from_document(doc: GraphDocument) -> Result<Self> {
        validate_document_size(doc.vertices.len() + doc.edges.len())?;

        let mut graph = Self::new();
        for vertex in doc.vertices {
            graph.add_vertex(vertex)?;
        }
        for edge in doc.edges {
            graph.add_edge(edge)?;
        }

        tracing::debug!(
            "Built graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Serialized form of this graph
    pub fn to_document(&self) -> GraphDocument {
        let vertices = self
            .vertices
            .iter()
            .map(|v| NewVertex {
                name: v.name.clone(),
                label: v.label.clone(),
                properties: v.properties.clone(),
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|e| NewEdge {
                from: self.vertices[e.out_pos].name.clone(),
                to: self.vertices[e.in_pos].name.clone(),
                label: e.label.clone(),
                properties: e.properties.clone(),
            })
            .collect();
        GraphDocument { vertices, edges }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    /// Load a JSON graph document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading graph from {:?}", path);
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn write_json(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_document())?;
        Ok(())
    }

    /// Save this graph as a JSON document
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_json(std::io::BufWriter::new(file))
    }
}

fn validate_keys(properties: &Properties) -> Result<()> {
    for key in properties.keys() {
        validate_property_key(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::value::Value;

    fn create_test_graph() -> PropertyGraph {
        // marko --knows--> vadas
        // marko --knows--> josh --created--> lop
        // marko --created--> lop
        let doc = GraphDocument::new()
            .with_vertices(vec![
                NewVertex::new("marko", "person").with_property("age", 29),
                NewVertex::new("vadas", "person").with_property("age", 27),
                NewVertex::new("josh", "person").with_property("age", 32),
                NewVertex::new("lop", "software").with_property("lang", "java"),
            ])
            .with_edges(vec![
                NewEdge::new("marko", "vadas", "knows").with_property("weight", 0.5),
                NewEdge::new("marko", "josh", "knows").with_property("weight", 1.0),
                NewEdge::new("marko", "lop", "created").with_property("weight", 0.4),
                NewEdge::new("josh", "lop", "created").with_property("weight", 0.4),
            ]);
        PropertyGraph::from_document(doc).unwrap()
    }

    #[test]
    fn test_graph_builder() {
        let graph = create_test_graph();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let marko = graph.vertex_by_name("marko").unwrap();
        assert_eq!(marko.label(), "person");
        assert_eq!(marko.property("age"), Some(&Value::Int(29)));
        assert_eq!(graph.vertex(marko.id()), Some(marko));
    }

    #[test]
    fn test_adjacency_order() {
        let graph = create_test_graph();
        let marko = graph.vertex_by_name("marko").unwrap();

        let targets: Vec<_> = marko.out_edges().map(|e| e.in_vertex().name()).collect();
        assert_eq!(targets, vec!["vadas", "josh", "lop"]);

        let lop = graph.vertex_by_name("lop").unwrap();
        let sources: Vec<_> = lop.in_edges().map(|e| e.out_vertex().name()).collect();
        assert_eq!(sources, vec!["marko", "josh"]);
        assert_eq!(lop.out_edges().count(), 0);
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut graph = PropertyGraph::new();
        graph.add_vertex(NewVertex::new("a", "node")).unwrap();

        let result = graph.add_vertex(NewVertex::new("a", "node"));
        assert!(matches!(result, Err(Error::DuplicateVertex(name)) if name == "a"));
    }

    #[test]
    fn test_edge_to_unknown_vertex_rejected() {
        let mut graph = PropertyGraph::new();
        graph.add_vertex(NewVertex::new("a", "node")).unwrap();

        let result = graph.add_edge(NewEdge::new("a", "ghost", "points_to"));
        assert!(matches!(result, Err(Error::VertexNotFound(name)) if name == "ghost"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_invalid_label_rejected() {
        let mut graph = PropertyGraph::new();
        let result = graph.add_vertex(NewVertex::new("a", ""));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_document_round_trip() {
        let graph = create_test_graph();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        graph.save(&path).unwrap();
        let loaded = PropertyGraph::load(&path).unwrap();

        assert_eq!(loaded.vertex_count(), 4);
        assert_eq!(loaded.edge_count(), 4);
        let josh = loaded.vertex_by_name("josh").unwrap();
        let created: Vec<_> = josh.out_edges().map(|e| e.in_vertex().name()).collect();
        assert_eq!(created, vec!["lop"]);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "vertices": [{"name": "a"}, {"name": "b", "label": "thing"}],
            "edges": [{"from": "a", "to": "b", "label": "links"}]
        }"#;
        let graph = PropertyGraph::from_json_str(json).unwrap();

        let a = graph.vertex_by_name("a").unwrap();
        assert_eq!(a.label(), "vertex");
        let edge = a.out_edges().next().unwrap();
        assert_eq!(edge.label(), "links");
        assert_eq!(edge.in_vertex().name(), "b");
        assert_eq!(graph.edge(edge.id()), Some(edge));
    }
}
