//! Prelude module for convenient imports
//!
//! Re-exports the types most hosts need to drive a designer and read its flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowcanvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flow.json")?;
//!
//! let mut designer = FlowDesigner::new(Catalog::default(), DesignerConfig::default());
//! designer.load_json(&json)?;
//!
//! designer.dispatch(InputEvent::PointerMove { position: Offset::new(10.0, 20.0) });
//! println!("{} blocks", designer.flow().blocks.len());
//! # Ok(())
//! # }
//! ```

// Designer and its inputs/outputs
pub use crate::designer::{FlowDesigner, InteractionState};
pub use crate::events::{EventBus, FlowEvent, InputEvent, Key};

// Catalog and configuration
pub use crate::catalog::{Catalog, FunctionConfiguration, PinDefinition};
pub use crate::config::DesignerConfig;

// Element model
pub use crate::geometry::{Line, Offset, Rect, Size};
pub use crate::model::{
    Block, BlockSide, Connection, Direction, ElementId, ElementRef, Flow, InputOutput, PinRef,
    Shape, SignalType,
};
pub use crate::zorder::ZOrderAction;

// Persistence
pub use crate::persistence::{FlowDocument, FlowLoader, flow_to_json, load_flow_from_json};

// Error types
pub use crate::error::{CatalogError, DesignerError, FlowLoadError, FlowSaveError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
