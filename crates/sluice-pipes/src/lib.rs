//! Sluice Pipes - Lazy, restartable graph traversal
//!
//! A traversal is a chain of pipes. Each pipe wraps its upstream source and
//! produces elements only when pulled, so nothing is computed until the end
//! of the chain is advanced. Every pipe can be reset to replay its output and
//! can report the path of objects that led to its current element.
//!
//! Chains are built either directly from the pipe types, fluently with
//! [`Traversal`], or from text steps with [`Query`].

pub mod edge_vertex;
pub mod end;
pub mod error;
pub mod fanout;
pub mod filter;
pub mod graph_element;
pub mod multi;
pub mod pipe;
pub mod property;
pub mod source;
pub mod stats;
pub mod step;
pub mod traversal;
pub mod vertex_edge;
pub mod zip;

pub use edge_vertex::EdgeVertexPipe;
pub use end::EndPipe;
pub use error::{PipeError, PipeResult};
pub use fanout::{FanOut, FanOutState, Related};
pub use filter::{LabelFilterPipe, PropertyFilterPipe};
pub use graph_element::{ElementIter, GraphElement, GraphElementPipe};
pub use multi::MultiIterator;
pub use pipe::{Path, PathItem, PathIter, Pipe, PipeExt, PipeIter};
pub use property::{PropertiesPipe, PropertyPipe};
pub use source::{BindSource, Source};
pub use stats::{Numeric, RunningStats, StdDevPipe};
pub use step::{Query, Stage, Step};
pub use traversal::Traversal;
pub use vertex_edge::{LabeledEdges, VertexEdgePipe, VertexVertexPipe};
pub use zip::{Zip3Pipe, ZipPipe};
