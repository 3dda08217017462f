//! Graph to element traversal

use crate::fanout::FanOut;
use crate::multi::MultiIterator;
use crate::pipe::{extend_path, Path, PathItem, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::{EdgeIter, EdgeRef, ElementRef, PropertyGraph, VertexIter, VertexRef};

/// Element types a graph can enumerate
pub trait GraphElement<'g>: Clone + Into<PathItem> + 'g {
    type Iter: Iterator<Item = Self>;

    fn all(graph: &'g PropertyGraph) -> Self::Iter;
}

impl<'g> GraphElement<'g> for VertexRef<'g> {
    type Iter = VertexIter<'g>;

    fn all(graph: &'g PropertyGraph) -> Self::Iter {
        graph.vertices()
    }
}

impl<'g> GraphElement<'g> for EdgeRef<'g> {
    type Iter = EdgeIter<'g>;

    fn all(graph: &'g PropertyGraph) -> Self::Iter {
        graph.edges()
    }
}

/// Vertices or edges of a graph, unified as [`ElementRef`]
pub enum ElementIter<'g> {
    Vertices(VertexIter<'g>),
    Edges(EdgeIter<'g>),
}

impl<'g> Iterator for ElementIter<'g> {
    type Item = ElementRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Vertices(iter) => iter.next().map(ElementRef::Vertex),
            Self::Edges(iter) => iter.next().map(ElementRef::Edge),
        }
    }
}

impl<'g> GraphElement<'g> for ElementRef<'g> {
    type Iter = MultiIterator<ElementIter<'g>>;

    /// Every vertex, then every edge
    fn all(graph: &'g PropertyGraph) -> Self::Iter {
        MultiIterator::new(vec![
            ElementIter::Vertices(graph.vertices()),
            ElementIter::Edges(graph.edges()),
        ])
    }
}

/// Emits the elements of each upstream graph
///
/// The element type picks the relation: `VertexRef` for vertices, `EdgeRef`
/// for edges, `ElementRef` for vertices followed by edges.
pub struct GraphElementPipe<'g, E: GraphElement<'g>> {
    source: Source<'g, &'g PropertyGraph>,
    fan_out: FanOut<E::Iter>,
    current: Option<E>,
}

impl<'g, E: GraphElement<'g>> GraphElementPipe<'g, E> {
    pub fn new(source: Source<'g, &'g PropertyGraph>) -> Self {
        Self {
            source,
            fan_out: FanOut::new(),
            current: None,
        }
    }
}

impl<'g, E: GraphElement<'g>> Pipe for GraphElementPipe<'g, E> {
    type Item = E;

    fn advance(&mut self) -> bool {
        let source = &mut self.source;
        self.current = self.fan_out.next_from(|| source.pull(), |graph| E::all(*graph));
        self.current.is_some()
    }

    fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        self.fan_out.reset();
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        extend_path(self.source.path(), self.current.as_ref())
    }
}

impl<'g, E: GraphElement<'g>> BindSource<'g, &'g PropertyGraph> for GraphElementPipe<'g, E> {
    fn set_source(&mut self, source: Source<'g, &'g PropertyGraph>) {
        self.source = source;
        self.fan_out.reset();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::modern;
    use crate::pipe::PipeExt;
    use sluice_core::{Element, GraphDocument, NewVertex};

    #[test]
    fn test_all_vertices() {
        let graph = modern();
        let pipe: GraphElementPipe<'_, VertexRef<'_>> = GraphElementPipe::new(Source::value(&graph));

        let names: Vec<_> = pipe.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["marko", "vadas", "lop", "josh", "ripple", "peter"]);
    }

    #[test]
    fn test_all_edges_path() {
        let graph = modern();
        let mut pipe: GraphElementPipe<'_, EdgeRef<'_>> = GraphElementPipe::new(Source::value(&graph));

        assert!(pipe.advance());
        let first = *pipe.current().unwrap();
        assert_eq!(pipe.path(), vec![PathItem::Graph, PathItem::from(first)]);
        assert_eq!(pipe.iter().count(), 5);
    }

    #[test]
    fn test_vertices_then_edges() {
        let graph = modern();
        let pipe: GraphElementPipe<'_, ElementRef<'_>> = GraphElementPipe::new(Source::value(&graph));

        let elements: Vec<_> = pipe.iter().collect();
        assert_eq!(elements.len(), 12);
        assert!(elements[..6].iter().all(|e| e.as_vertex().is_some()));
        assert!(elements[6..].iter().all(|e| e.as_edge().is_some()));
        assert_eq!(elements[6].label(), "knows");
    }

    #[test]
    fn test_empty_graph_skipped() {
        let graph = modern();
        let empty = PropertyGraph::new();
        let single = PropertyGraph::from_document(
            GraphDocument::new().with_vertices(vec![NewVertex::new("solo", "node")]),
        )
        .unwrap();

        let pipe: GraphElementPipe<'_, VertexRef<'_>> =
            GraphElementPipe::new(Source::sequence(vec![&empty, &single, &empty, &graph]));
        assert_eq!(pipe.iter().count(), 7);
    }
}
