//! Borrowed element handles and the relations between them

use crate::edge::{Edge, EdgeId};
use crate::graph::PropertyGraph;
use crate::value::{Properties, Value};
use crate::vertex::{Vertex, VertexId};
use std::iter::FusedIterator;

/// Anything carrying a label and key/value properties
pub trait Element {
    fn label(&self) -> &str;

    fn properties(&self) -> &Properties;

    fn property(&self, key: &str) -> Option<&Value> {
        self.properties().get(key)
    }
}

impl Element for Vertex {
    fn label(&self) -> &str {
        &self.label
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl Element for Edge {
    fn label(&self) -> &str {
        &self.label
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// A vertex borrowed from its graph
#[derive(Clone, Copy)]
pub struct VertexRef<'g> {
    graph: &'g PropertyGraph,
    pos: usize,
}

impl<'g> VertexRef<'g> {
    pub(crate) fn new(graph: &'g PropertyGraph, pos: usize) -> Self {
        Self { graph, pos }
    }

    pub fn vertex(&self) -> &'g Vertex {
        &self.graph.vertices[self.pos]
    }

    pub fn id(&self) -> &'g VertexId {
        &self.vertex().id
    }

    pub fn name(&self) -> &'g str {
        &self.vertex().name
    }

    /// Edges leaving this vertex, in insertion order
    pub fn out_edges(&self) -> EdgeIter<'g> {
        EdgeIter::listed(self.graph, &self.vertex().out_edges)
    }

    /// Edges entering this vertex, in insertion order
    pub fn in_edges(&self) -> EdgeIter<'g> {
        EdgeIter::listed(self.graph, &self.vertex().in_edges)
    }
}

impl PartialEq for VertexRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.pos == other.pos
    }
}

impl Eq for VertexRef<'_> {}

impl std::fmt::Debug for VertexRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v[{}]", self.name())
    }
}

impl Element for VertexRef<'_> {
    fn label(&self) -> &str {
        &self.vertex().label
    }

    fn properties(&self) -> &Properties {
        &self.vertex().properties
    }
}

/// An edge borrowed from its graph
#[derive(Clone, Copy)]
pub struct EdgeRef<'g> {
    graph: &'g PropertyGraph,
    pos: usize,
}

impl<'g> EdgeRef<'g> {
    pub(crate) fn new(graph: &'g PropertyGraph, pos: usize) -> Self {
        Self { graph, pos }
    }

    pub fn edge(&self) -> &'g Edge {
        &self.graph.edges[self.pos]
    }

    pub fn id(&self) -> &'g EdgeId {
        &self.edge().id
    }

    /// The tail vertex
    pub fn out_vertex(&self) -> VertexRef<'g> {
        VertexRef::new(self.graph, self.edge().out_pos)
    }

    /// The head vertex
    pub fn in_vertex(&self) -> VertexRef<'g> {
        VertexRef::new(self.graph, self.edge().in_pos)
    }
}

impl PartialEq for EdgeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.pos == other.pos
    }
}

impl Eq for EdgeRef<'_> {}

impl std::fmt::Debug for EdgeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "e[{}-{}->{}]",
            self.out_vertex().name(),
            self.edge().label,
            self.in_vertex().name()
        )
    }
}

impl Element for EdgeRef<'_> {
    fn label(&self) -> &str {
        &self.edge().label
    }

    fn properties(&self) -> &Properties {
        &self.edge().properties
    }
}

/// Either kind of borrowed element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef<'g> {
    Vertex(VertexRef<'g>),
    Edge(EdgeRef<'g>),
}

impl<'g> ElementRef<'g> {
    pub fn as_vertex(&self) -> Option<VertexRef<'g>> {
        match self {
            Self::Vertex(v) => Some(*v),
            Self::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeRef<'g>> {
        match self {
            Self::Vertex(_) => None,
            Self::Edge(e) => Some(*e),
        }
    }
}

impl Element for ElementRef<'_> {
    fn label(&self) -> &str {
        match self {
            Self::Vertex(v) => v.label(),
            Self::Edge(e) => e.label(),
        }
    }

    fn properties(&self) -> &Properties {
        match self {
            Self::Vertex(v) => v.properties(),
            Self::Edge(e) => e.properties(),
        }
    }
}

impl<'g> From<VertexRef<'g>> for ElementRef<'g> {
    fn from(v: VertexRef<'g>) -> Self {
        Self::Vertex(v)
    }
}

impl<'g> From<EdgeRef<'g>> for ElementRef<'g> {
    fn from(e: EdgeRef<'g>) -> Self {
        Self::Edge(e)
    }
}

/// Arena positions walked by the element iterators
#[derive(Clone)]
enum Positions<'g> {
    All(std::ops::Range<usize>),
    Listed(std::slice::Iter<'g, usize>),
}

impl Iterator for Positions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Self::All(range) => range.next(),
            Self::Listed(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::All(range) => range.size_hint(),
            Self::Listed(iter) => iter.size_hint(),
        }
    }
}

/// Iterator over vertices of a graph
#[derive(Clone)]
pub struct VertexIter<'g> {
    graph: &'g PropertyGraph,
    positions: Positions<'g>,
}

impl<'g> VertexIter<'g> {
    pub(crate) fn all(graph: &'g PropertyGraph) -> Self {
        Self {
            graph,
            positions: Positions::All(0..graph.vertices.len()),
        }
    }
}

impl<'g> Iterator for VertexIter<'g> {
    type Item = VertexRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|pos| VertexRef::new(self.graph, pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl FusedIterator for VertexIter<'_> {}

/// Iterator over edges of a graph or of one vertex
#[derive(Clone)]
pub struct EdgeIter<'g> {
    graph: &'g PropertyGraph,
    positions: Positions<'g>,
}

impl<'g> EdgeIter<'g> {
    pub(crate) fn all(graph: &'g PropertyGraph) -> Self {
        Self {
            graph,
            positions: Positions::All(0..graph.edges.len()),
        }
    }

    fn listed(graph: &'g PropertyGraph, positions: &'g [usize]) -> Self {
        Self {
            graph,
            positions: Positions::Listed(positions.iter()),
        }
    }
}

impl<'g> Iterator for EdgeIter<'g> {
    type Item = EdgeRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|pos| EdgeRef::new(self.graph, pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl FusedIterator for EdgeIter<'_> {}
