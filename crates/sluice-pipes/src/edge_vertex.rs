//! Edge to endpoint vertex traversal

use crate::pipe::{extend_path, Path, Pipe};
use crate::source::{BindSource, Source};
use sluice_core::{Direction, EdgeRef, VertexRef};

/// Emits the out-vertex, the in-vertex, or both endpoints of each edge
///
/// An edge has exactly one vertex per side, so `Both` needs no merge
/// iterator: the in-vertex is emitted right away and the out-vertex is kept
/// and emitted by the following `advance`, before the next edge is pulled.
pub struct EdgeVertexPipe<'g> {
    source: Source<'g, EdgeRef<'g>>,
    direction: Direction,
    pending: Option<VertexRef<'g>>,
    current: Option<VertexRef<'g>>,
}

impl<'g> EdgeVertexPipe<'g> {
    pub fn new(source: Source<'g, EdgeRef<'g>>, direction: Direction) -> Self {
        Self {
            source,
            direction,
            pending: None,
            current: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<'g> Pipe for EdgeVertexPipe<'g> {
    type Item = VertexRef<'g>;

    fn advance(&mut self) -> bool {
        self.current = match self.direction {
            Direction::Outgoing => self.source.pull().map(|e| e.out_vertex()),
            Direction::Incoming => self.source.pull().map(|e| e.in_vertex()),
            Direction::Both => match self.pending.take() {
                Some(vertex) => Some(vertex),
                None => self.source.pull().map(|e| {
                    self.pending = Some(e.out_vertex());
                    e.in_vertex()
                }),
            },
        };
        self.current.is_some()
    }

    fn current(&self) -> Option<&VertexRef<'g>> {
        self.current.as_ref()
    }

    fn reset(&mut self) {
        tracing::trace!("Resetting {} edge-vertex pipe", self.direction);
        self.pending = None;
        self.current = None;
        self.source.reset();
    }

    fn path(&self) -> Path {
        extend_path(self.source.path(), self.current.as_ref())
    }
}

impl<'g> BindSource<'g, EdgeRef<'g>> for EdgeVertexPipe<'g> {
    fn set_source(&mut self, source: Source<'g, EdgeRef<'g>>) {
        self.source = source;
        self.pending = None;
        self.current = None;
    }
}
