//! Conversion between the persisted flow document and the live [`Flow`].
//!
//! On load, each functionality block is instantiated from its catalog
//! template, merged with its geometry record and laid out, then connections
//! are resolved against the pins just built. On save the flow is split back
//! into the geometry-free functionality half and the geometry-only elements
//! half.
//!
//! A save followed by a load reproduces every geometry and connectivity
//! field, so `save(load(save(load(json))))` equals `save(load(json))`.
//!
//! [`Flow`]: crate::model::Flow

pub mod loader;
pub mod types;
pub mod writer;

pub use loader::{FlowLoader, load_flow_from_json};
pub use types::*;
pub use writer::{flow_to_document, flow_to_json, functionality_to_json};
