//! Fluent construction of pipe chains

use crate::edge_vertex::EdgeVertexPipe;
use crate::end::EndPipe;
use crate::filter::{LabelFilterPipe, PropertyFilterPipe};
use crate::graph_element::GraphElementPipe;
use crate::pipe::{Path, PathItem, Pipe};
use crate::property::{PropertiesPipe, PropertyPipe};
use crate::source::Source;
use crate::stats::{Numeric, RunningStats, StdDevPipe};
use crate::vertex_edge::{VertexEdgePipe, VertexVertexPipe};
use crate::zip::ZipPipe;
use sluice_core::{
    Comparison, Direction, EdgeRef, Element, ElementRef, FromValue, PropertyGraph, Value, VertexRef,
};
use std::sync::Arc;

/// A pipe chain under construction
///
/// Every step wraps the chain built so far and returns a new traversal whose
/// item type is the step's output, so only steps that fit the current
/// element type are offered.
///
/// # Example
///
/// ```
/// use sluice_core::{GraphDocument, NewEdge, NewVertex, PropertyGraph};
/// use sluice_pipes::Traversal;
///
/// let graph = PropertyGraph::from_document(
///     GraphDocument::new()
///         .with_vertices(vec![NewVertex::new("a", "person"), NewVertex::new("b", "person")])
///         .with_edges(vec![NewEdge::new("a", "b", "knows")]),
/// )?;
///
/// let names: Vec<_> = Traversal::over(&graph)
///     .vertices()
///     .out(&["knows"])
///     .map(|v| v.name())
///     .collect();
/// assert_eq!(names, vec!["b"]);
/// # Ok::<(), sluice_core::Error>(())
/// ```
pub struct Traversal<'a, E> {
    pipe: Box<dyn Pipe<Item = E> + 'a>,
}

impl<'a, E: Clone + Into<PathItem> + 'a> Traversal<'a, E> {
    pub fn from_pipe(pipe: impl Pipe<Item = E> + 'a) -> Self {
        Self {
            pipe: Box::new(pipe),
        }
    }

    pub fn from_value(value: E) -> Self {
        Self::from_pipe(EndPipe::from_value(value))
    }

    pub fn from_sequence(items: impl IntoIterator<Item = E>) -> Self {
        Self::from_pipe(EndPipe::from_sequence(items))
    }

    /// Start from a one-shot iterator, which `reset` cannot rewind
    pub fn from_iterator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: 'a,
    {
        Self::from_pipe(EndPipe::from_iterator(iter))
    }

    pub fn into_pipe(self) -> Box<dyn Pipe<Item = E> + 'a> {
        self.pipe
    }

    pub fn into_source(self) -> Source<'a, E> {
        Source::boxed(self.pipe)
    }

    /// Wrap the chain in one more pipe
    pub fn step<P>(self, build: impl FnOnce(Source<'a, E>) -> P) -> Traversal<'a, P::Item>
    where
        P: Pipe + 'a,
        P::Item: 'a,
    {
        Traversal::from_pipe(build(self.into_source()))
    }

    /// Drain the remaining elements
    pub fn to_vec(mut self) -> Vec<E> {
        std::iter::from_fn(|| self.pipe.next_item()).collect()
    }

    /// Keep elements whose label satisfies `comparison`
    pub fn has_label(self, label: impl Into<String>, comparison: Comparison) -> Self
    where
        E: Element,
    {
        let label = label.into();
        self.step(|source| LabelFilterPipe::new(source, label, comparison))
    }

    /// Keep elements whose property `key`, read as `T`, satisfies `comparison`
    pub fn has<T>(self, key: impl Into<String>, comparison: Comparison, expected: T) -> Self
    where
        E: Element,
        T: FromValue + PartialOrd + 'a,
    {
        let key = key.into();
        self.step(|source| PropertyFilterPipe::new(source, key, comparison, expected))
    }

    /// One value per key and element; every property when `keys` is empty
    pub fn values(self, keys: &[&str]) -> Traversal<'a, Value>
    where
        E: Element,
    {
        self.step(|source| PropertyPipe::new(source, keys.iter().copied()))
    }

    /// One property map per element, restricted to `keys` unless empty
    pub fn properties(self, keys: &[&str]) -> Traversal<'a, Value>
    where
        E: Element,
    {
        self.step(|source| PropertiesPipe::new(source).with_keys(keys.iter().copied()))
    }

    /// Pass elements through, accumulating the numeric ones
    pub fn std_dev(self) -> (Self, Arc<RunningStats>)
    where
        E: Numeric,
    {
        let pipe = StdDevPipe::new(self.into_source());
        let stats = pipe.stats();
        (Self::from_pipe(pipe), stats)
    }

    /// Pair elements with those of another traversal
    pub fn zip<B>(self, other: Traversal<'a, B>) -> Traversal<'a, (E, B)>
    where
        B: Clone + Into<PathItem> + 'a,
    {
        Traversal::from_pipe(ZipPipe::new(self.into_source(), other.into_source()))
    }
}

impl<'g> Traversal<'g, &'g PropertyGraph> {
    pub fn over(graph: &'g PropertyGraph) -> Self {
        Self::from_value(graph)
    }

    pub fn vertices(self) -> Traversal<'g, VertexRef<'g>> {
        self.step(GraphElementPipe::<'g, VertexRef<'g>>::new)
    }

    pub fn edges(self) -> Traversal<'g, EdgeRef<'g>> {
        self.step(GraphElementPipe::<'g, EdgeRef<'g>>::new)
    }

    /// Every vertex, then every edge
    pub fn elements(self) -> Traversal<'g, ElementRef<'g>> {
        self.step(GraphElementPipe::<'g, ElementRef<'g>>::new)
    }
}

impl<'g> Traversal<'g, VertexRef<'g>> {
    fn incident(self, direction: Direction, labels: &[&str]) -> Traversal<'g, EdgeRef<'g>> {
        self.step(|source| VertexEdgePipe::new(source, direction).with_labels(labels.iter().copied()))
    }

    fn adjacent(self, direction: Direction, labels: &[&str]) -> Self {
        self.step(|source| VertexVertexPipe::new(source, direction).with_labels(labels.iter().copied()))
    }

    pub fn out_e(self, labels: &[&str]) -> Traversal<'g, EdgeRef<'g>> {
        self.incident(Direction::Outgoing, labels)
    }

    pub fn in_e(self, labels: &[&str]) -> Traversal<'g, EdgeRef<'g>> {
        self.incident(Direction::Incoming, labels)
    }

    pub fn both_e(self, labels: &[&str]) -> Traversal<'g, EdgeRef<'g>> {
        self.incident(Direction::Both, labels)
    }

    pub fn out(self, labels: &[&str]) -> Self {
        self.adjacent(Direction::Outgoing, labels)
    }

    pub fn in_(self, labels: &[&str]) -> Self {
        self.adjacent(Direction::Incoming, labels)
    }

    pub fn both(self, labels: &[&str]) -> Self {
        self.adjacent(Direction::Both, labels)
    }
}

impl<'g> Traversal<'g, EdgeRef<'g>> {
    fn endpoints(self, direction: Direction) -> Traversal<'g, VertexRef<'g>> {
        self.step(|source| EdgeVertexPipe::new(source, direction))
    }

    pub fn out_v(self) -> Traversal<'g, VertexRef<'g>> {
        self.endpoints(Direction::Outgoing)
    }

    pub fn in_v(self) -> Traversal<'g, VertexRef<'g>> {
        self.endpoints(Direction::Incoming)
    }

    /// In-vertex then out-vertex of each edge
    pub fn both_v(self) -> Traversal<'g, VertexRef<'g>> {
        self.endpoints(Direction::Both)
    }
}

impl<'a, E: Clone + Into<PathItem>> Pipe for Traversal<'a, E> {
    type Item = E;

    fn advance(&mut self) -> bool {
        self.pipe.advance()
    }

    fn current(&self) -> Option<&E> {
        self.pipe.current()
    }

    fn reset(&mut self) {
        self.pipe.reset();
    }

    fn path(&self) -> Path {
        self.pipe.path()
    }
}

impl<'a, E: Clone + Into<PathItem>> Iterator for Traversal<'a, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.pipe.next_item()
    }
}

/// Collects into a replayable sequence source
impl<'a, E: Clone + Into<PathItem> + 'a> FromIterator<E> for Traversal<'a, E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_sequence(iter)
    }
}

impl<E> std::fmt::Debug for Traversal<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal").finish_non_exhaustive()
    }
}
