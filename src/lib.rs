//! # Flowcanvas - Function-Block Flow Designer Core
//!
//! **Flowcanvas** is the headless core of a visual editor for function-block
//! flow diagrams. Users place typed blocks (logic gates, timers, PID
//! controllers...) on a canvas, wire output pins to input pins, and save the
//! result as a JSON flow document. Rendering is left to the host; this crate
//! owns the element model, geometry, hit-testing, z-ordering, the interaction
//! state machine and persistence.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Catalog**: `Catalog::builder()` starts from the built-in
//!     function types and accepts custom [`FunctionConfiguration`]s.
//! 2.  **Create a Designer**: `FlowDesigner::new(catalog, config)` owns an
//!     empty flow and its own event bus.
//! 3.  **Drive It**: feed pointer and keyboard input through `dispatch`, or
//!     call commands such as `add_block` and `connect` directly.
//! 4.  **Persist**: `to_json` and `load_json` convert between the live flow
//!     and the functionality/elements document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowcanvas::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut designer = FlowDesigner::new(Catalog::default(), DesignerConfig::default());
//!     designer.events_mut().subscribe(|event| println!("{:?}", event));
//!
//!     let and = designer.add_block("And", Offset::new(40.0, 40.0))?;
//!     let invert = designer.add_block("Invert", Offset::new(300.0, 40.0))?;
//!     designer.connect(PinRef::new(&and, 3), PinRef::new(&invert, 1))?;
//!
//!     let json = designer.to_json()?;
//!     designer.load_json(&json)?;
//!     assert_eq!(designer.flow().connections.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! [`FunctionConfiguration`]: crate::catalog::FunctionConfiguration

pub mod catalog;
pub mod config;
pub mod designer;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod persistence;
pub mod prelude;
pub mod zorder;
