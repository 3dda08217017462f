//! Vertex to incident edge, and vertex to adjacent vertex, traversal

use crate::fanout::{FanOut, Related};
use crate::pipe::{extend_path, Path, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::{Direction, EdgeIter, EdgeRef, Element, VertexRef};
use std::iter::Map;
use std::rc::Rc;

/// Edges of one vertex restricted to a set of labels (empty = any label)
#[derive(Clone)]
pub struct LabeledEdges<'g> {
    edges: EdgeIter<'g>,
    labels: Rc<[String]>,
}

impl<'g> LabeledEdges<'g> {
    pub fn new(edges: EdgeIter<'g>, labels: Rc<[String]>) -> Self {
        Self { edges, labels }
    }
}

impl<'g> Iterator for LabeledEdges<'g> {
    type Item = EdgeRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let labels = &self.labels;
        self.edges
            .find(|edge| labels.is_empty() || labels.iter().any(|l| l == edge.label()))
    }
}

fn collect_labels<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Rc<[String]> {
    labels.into_iter().map(Into::into).collect::<Vec<_>>().into()
}

fn open_edges<'g>(
    vertex: &VertexRef<'g>,
    direction: Direction,
    labels: &Rc<[String]>,
) -> Related<LabeledEdges<'g>> {
    Related::select(
        direction,
        || LabeledEdges::new(vertex.out_edges(), Rc::clone(labels)),
        || LabeledEdges::new(vertex.in_edges(), Rc::clone(labels)),
    )
}

/// Emits the out-edges, in-edges, or out-edges then in-edges of each vertex
pub struct VertexEdgePipe<'g> {
    source: Source<'g, VertexRef<'g>>,
    direction: Direction,
    labels: Rc<[String]>,
    fan_out: FanOut<Related<LabeledEdges<'g>>>,
    current: Option<EdgeRef<'g>>,
}

impl<'g> VertexEdgePipe<'g> {
    pub fn new(source: Source<'g, VertexRef<'g>>, direction: Direction) -> Self {
        Self {
            source,
            direction,
            labels: Rc::from(Vec::new()),
            fan_out: FanOut::new(),
            current: None,
        }
    }

    /// Only follow edges carrying one of these labels
    pub fn with_labels<L: Into<String>>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        self.labels = collect_labels(labels);
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<'g> Pipe for VertexEdgePipe<'g> {
    type Item = EdgeRef<'g>;

    fn advance(&mut self) -> bool {
        let direction = self.direction;
        let labels = &self.labels;
        let source = &mut self.source;
        self.current = self
            .fan_out
            .next_from(|| source.pull(), |v| open_edges(v, direction, labels));
        self.current.is_some()
    }

    fn current(&self) -> Option<&EdgeRef<'g>> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        tracing::trace!("Resetting {} vertex-edge pipe", self.direction);
        self.fan_out.reset();
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        extend_path(self.source.path(), self.current.as_ref())
    }
}

impl<'g> BindSource<'g, VertexRef<'g>> for VertexEdgePipe<'g> {
    fn set_source(&mut self, source: Source<'g, VertexRef<'g>>) {
        self.source = source;
        self.fan_out.reset();
        self.current = None;
    }
}

type Adjacent<'g> = Map<LabeledEdges<'g>, fn(EdgeRef<'g>) -> VertexRef<'g>>;

fn open_adjacent<'g>(
    vertex: &VertexRef<'g>,
    direction: Direction,
    labels: &Rc<[String]>,
) -> Related<Adjacent<'g>> {
    Related::select(
        direction,
        || {
            let head: fn(EdgeRef<'g>) -> VertexRef<'g> = |e| e.in_vertex();
            LabeledEdges::new(vertex.out_edges(), Rc::clone(labels)).map(head)
        },
        || {
            let tail: fn(EdgeRef<'g>) -> VertexRef<'g> = |e| e.out_vertex();
            LabeledEdges::new(vertex.in_edges(), Rc::clone(labels)).map(tail)
        },
    )
}

/// Emits the vertices adjacent to each vertex along out-, in- or both edges
pub struct VertexVertexPipe<'g> {
    source: Source<'g, VertexRef<'g>>,
    direction: Direction,
    labels: Rc<[String]>,
    fan_out: FanOut<Related<Adjacent<'g>>>,
    current: Option<VertexRef<'g>>,
}

impl<'g> VertexVertexPipe<'g> {
    pub fn new(source: Source<'g, VertexRef<'g>>, direction: Direction) -> Self {
        Self {
            source,
            direction,
            labels: Rc::from(Vec::new()),
            fan_out: FanOut::new(),
            current: None,
        }
    }

    pub fn with_labels<L: Into<String>>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        self.labels = collect_labels(labels);
        self
    }
}

impl<'g> Pipe for VertexVertexPipe<'g> {
    type Item = VertexRef<'g>;

    fn advance(&mut self) -> bool {
        let direction = self.direction;
        let labels = &self.labels;
        let source = &mut self.source;
        self.current = self
            .fan_out
            .next_from(|| source.pull(), |v| open_adjacent(v, direction, labels));
        self.current.is_some()
    }

    fn current(&self) -> Option<&VertexRef<'g>> {
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

impl<'g> BindSource<'g, VertexRef<'g>> for VertexVertexPipe<'g> {
    fn set_source(&mut self, source: Source<'g, VertexRef<'g>>) {
        self.source = source;
        self.fan_out.reset();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::modern;
    use crate::pipe::{PathItem, PipeExt};

    fn names(edges: Vec<EdgeRef<'_>>) -> Vec<String> {
        edges
            .into_iter()
            .map(|e| format!("{}->{}", e.out_vertex().name(), e.in_vertex().name()))
            .collect()
    }

    #[test]
    fn test_out_edges() {
        let graph = modern();
        let marko = graph.vertex_by_name("marko").unwrap();

        let pipe = VertexEdgePipe::new(Source::value(marko), Direction::Outgoing);
        let edges: Vec<_> = pipe.iter().collect();
        assert_eq!(names(edges), vec!["marko->vadas", "marko->josh", "marko->lop"]);
    }

    #[test]
    fn test_both_is_out_then_in() {
        let graph = modern();
        let josh = graph.vertex_by_name("josh").unwrap();

        let out: Vec<_> = VertexEdgePipe::new(Source::value(josh), Direction::Outgoing)
            .iter()
            .collect();
        let inc: Vec<_> = VertexEdgePipe::new(Source::value(josh), Direction::Incoming)
            .iter()
            .collect();
        let both: Vec<_> = VertexEdgePipe::new(Source::value(josh), Direction::Both)
            .iter()
            .collect();

        let expected: Vec<_> = out.into_iter().chain(inc).collect();
        assert_eq!(both, expected);
        assert_eq!(names(both), vec!["josh->ripple", "josh->lop", "marko->josh"]);
    }

    #[test]
    fn test_label_restriction_and_empty_skip() {
        let graph = modern();
        let vertices: Vec<_> = graph.vertices().collect();

        let pipe = VertexEdgePipe::new(Source::sequence(vertices), Direction::Outgoing)
            .with_labels(["created"]);
        let edges: Vec<_> = pipe.iter().collect();
        assert_eq!(
            names(edges),
            vec!["marko->lop", "josh->ripple", "josh->lop", "peter->lop"]
        );
    }

    #[test]
    fn test_reset_and_rebind() {
        let graph = modern();
        let marko = graph.vertex_by_name("marko").unwrap();
        let peter = graph.vertex_by_name("peter").unwrap();

        let mut pipe = VertexEdgePipe::new(Source::value(marko), Direction::Outgoing);
        assert!(pipe.advance());
        assert_eq!(pipe.current().unwrap().in_vertex().name(), "vadas");
        assert_eq!(
            pipe.path(),
            vec![PathItem::from(marko), PathItem::from(*pipe.current().unwrap())]
        );

        pipe.reset();
        let replay: Vec<_> = std::iter::from_fn(|| pipe.next_item()).collect();
        assert_eq!(replay.len(), 3);

        // rebinding mid-drain drops marko's remaining edges
        pipe.reset();
        assert!(pipe.advance());
        pipe.set_source_value(peter);
        let edges: Vec<_> = pipe.iter().collect();
        assert_eq!(names(edges), vec!["peter->lop"]);
    }

    #[test]
    fn test_adjacent_vertices() {
        let graph = modern();
        let lop = graph.vertex_by_name("lop").unwrap();

        let pipe = VertexVertexPipe::new(Source::value(lop), Direction::Incoming);
        let creators: Vec<_> = pipe.iter().map(|v| v.name()).collect();
        assert_eq!(creators, vec!["marko", "josh", "peter"]);

        let marko = graph.vertex_by_name("marko").unwrap();
        let pipe = VertexVertexPipe::new(Source::value(marko), Direction::Outgoing)
            .with_labels(["knows"]);
        let friends: Vec<_> = pipe.iter().map(|v| v.name()).collect();
        assert_eq!(friends, vec!["vadas", "josh"]);
    }
}
