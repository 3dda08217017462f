//! The pull-based pipe protocol

use serde::Serialize;
use sluice_core::{EdgeId, EdgeRef, ElementRef, PropertyGraph, Value, VertexId, VertexRef};

/// Objects traversed to reach the current element, oldest first
pub type Path = Vec<PathItem>;

/// One step of a [`Path`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathItem {
    Graph,
    Vertex { id: VertexId, name: String },
    Edge { id: EdgeId, label: String },
    Value(Value),
    Tuple(Vec<PathItem>),
}

impl std::fmt::Display for PathItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph => write!(f, "graph"),
            Self::Vertex { name, .. } => write!(f, "v[{}]", name),
            Self::Edge { label, .. } => write!(f, "e[{}]", label),
            Self::Value(value) => write!(f, "{}", value),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<&PropertyGraph> for PathItem {
    fn from(_: &PropertyGraph) -> Self {
        Self::Graph
    }
}

impl From<VertexRef<'_>> for PathItem {
    fn from(v: VertexRef<'_>) -> Self {
        Self::Vertex {
            id: v.id().clone(),
            name: v.name().to_string(),
        }
    }
}

impl From<EdgeRef<'_>> for PathItem {
    fn from(e: EdgeRef<'_>) -> Self {
        Self::Edge {
            id: e.id().clone(),
            label: e.edge().label.clone(),
        }
    }
}

impl From<ElementRef<'_>> for PathItem {
    fn from(element: ElementRef<'_>) -> Self {
        match element {
            ElementRef::Vertex(v) => v.into(),
            ElementRef::Edge(e) => e.into(),
        }
    }
}

impl From<Value> for PathItem {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<f64> for PathItem {
    fn from(x: f64) -> Self {
        Self::Value(Value::Float(x))
    }
}

impl From<i64> for PathItem {
    fn from(i: i64) -> Self {
        Self::Value(Value::Int(i))
    }
}

impl From<bool> for PathItem {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl From<String> for PathItem {
    fn from(s: String) -> Self {
        Self::Value(Value::String(s))
    }
}

impl From<&'static str> for PathItem {
    fn from(s: &'static str) -> Self {
        Self::Value(Value::from(s))
    }
}

impl<A: Into<PathItem>, B: Into<PathItem>> From<(A, B)> for PathItem {
    fn from((a, b): (A, B)) -> Self {
        Self::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<PathItem>, B: Into<PathItem>, C: Into<PathItem>> From<(A, B, C)> for PathItem {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

/// A lazy, restartable producer of elements
///
/// `advance` either makes exactly one new element available through
/// `current` and returns `true`, or reports exhaustion with `false`, after
/// which `current` is `None`. Pulling never blocks; dropping a pipe drops
/// its upstream.
pub trait Pipe {
    type Item: Clone + Into<PathItem>;

    /// Try to produce the next element
    fn advance(&mut self) -> bool;

    /// The element produced by the last successful `advance`
    fn current(&self) -> Option<&Self::Item>;

    /// Rewind this pipe and every upstream source
    ///
    /// One-shot iterator sources cannot be rewound; see [`crate::EndPipe`].
    fn reset(&mut self);

    /// Objects traversed across the whole chain to reach `current`
    fn path(&self) -> Path;

    /// Advance and clone the new element
    fn next_item(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current().cloned()
        } else {
            None
        }
    }
}

impl<P: Pipe + ?Sized> Pipe for Box<P> {
    type Item = P::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn path(&self) -> Path {
        (**self).path()
    }
}

/// Append the current element to an upstream path
pub(crate) fn extend_path<E: Clone + Into<PathItem>>(mut path: Path, current: Option<&E>) -> Path {
    if let Some(item) = current {
        path.push(item.clone().into());
    }
    path
}

/// Std iterator over a pipe's elements
pub struct PipeIter<P> {
    pipe: P,
}

impl<P: Pipe> PipeIter<P> {
    pub fn into_inner(self) -> P {
        self.pipe
    }
}

impl<P: Pipe> Iterator for PipeIter<P> {
    type Item = P::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pipe.next_item()
    }
}

/// Std iterator over a pipe's elements paired with their paths
pub struct PathIter<P> {
    pipe: P,
}

impl<P: Pipe> Iterator for PathIter<P> {
    type Item = (P::Item, Path);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pipe.next_item()?;
        Some((item, self.pipe.path()))
    }
}

/// Conveniences available on every pipe
pub trait PipeExt: Pipe + Sized {
    fn iter(self) -> PipeIter<Self> {
        PipeIter { pipe: self }
    }

    fn with_paths(self) -> PathIter<Self> {
        PathIter { pipe: self }
    }

    fn boxed<'a>(self) -> Box<dyn Pipe<Item = Self::Item> + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<P: Pipe> PipeExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::end::EndPipe;
    use crate::fixture::modern;

    #[test]
    fn test_path_item_display() {
        let graph = modern();
        let marko = graph.vertex_by_name("marko").unwrap();
        let knows = marko.out_edges().next().unwrap();

        assert_eq!(PathItem::from(&graph).to_string(), "graph");
        assert_eq!(PathItem::from(marko).to_string(), "v[marko]");
        assert_eq!(PathItem::from(knows).to_string(), "e[knows]");
        assert_eq!(PathItem::from(("a", 1i64)).to_string(), "(a, 1)");
    }

    #[test]
    fn test_path_item_json() {
        let graph = modern();
        let lop = graph.vertex_by_name("lop").unwrap();

        let json = serde_json::to_value(PathItem::from(lop)).unwrap();
        assert_eq!(json["vertex"]["name"], "lop");
        assert_eq!(json["vertex"]["id"], lop.id().to_string());

        let json = serde_json::to_value(PathItem::from(Value::Int(3))).unwrap();
        assert_eq!(json, serde_json::json!({ "value": 3 }));
    }

    #[test]
    fn test_with_paths() {
        let pairs: Vec<_> = EndPipe::from_sequence(vec![1i64, 2]).with_paths().collect();
        assert_eq!(
            pairs,
            vec![
                (1, vec![PathItem::from(1i64)]),
                (2, vec![PathItem::from(2i64)]),
            ]
        );
    }

    #[test]
    fn test_boxed_pipe_forwards() {
        let mut pipe = EndPipe::from_value("x").boxed();
        assert_eq!(pipe.next_item(), Some("x"));
        assert_eq!(pipe.next_item(), None);
        pipe.reset();
        assert_eq!(pipe.iter().collect::<Vec<_>>(), vec!["x"]);
    }
}
