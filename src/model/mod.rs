//! The UI element model: blocks with their pins and markers, connections
//! between pins, and the [`Flow`] aggregate that owns them.
//!
//! Geometry lives here. Pins and markers are positioned relative to their
//! block, blocks and connections are absolute. [`ElementRef`] gives a single
//! view over all four element kinds for bounding-rect and hit-test queries.

pub mod block;
pub mod connection;
pub mod element;
pub mod flow;
pub mod io;
pub mod marker;

pub use block::Block;
pub use connection::{Connection, DrawingConnection};
pub use element::{ElementId, ElementKind, ElementRef};
pub use flow::Flow;
pub use io::{BlockSide, Direction, InputOutput, PinRef, SignalType};
pub use marker::{Marker, Shape};
