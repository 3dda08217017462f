//! Sluice Core - Property graph model
//!
//! This crate provides the graph types the Sluice pipe engine traverses:
//! vertices and edges with labels and key/value properties, borrowed element
//! handles, and the traversal direction.

pub mod compare;
pub mod edge;
pub mod element;
pub mod error;
pub mod graph;
pub mod limits;
pub mod value;
pub mod vertex;

pub use compare::Comparison;
pub use edge::{Direction, Edge, EdgeId, NewEdge};
pub use element::{EdgeIter, EdgeRef, Element, ElementRef, VertexIter, VertexRef};
pub use error::{Error, Result};
pub use graph::{GraphDocument, PropertyGraph};
pub use limits::ValidationError;
pub use value::{FromValue, Properties, Value};
pub use vertex::{NewVertex, Vertex, VertexId};
