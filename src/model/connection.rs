use super::block::Block;
use super::io::PinRef;
use crate::geometry::{Line, Offset};
use uuid::Uuid;

/// A completed wire between two pins.
///
/// No geometry is stored; the path is always derived from the current
/// locations of the two referenced pins.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub start_block_id: String,
    pub start_pin: u32,
    pub end_block_id: String,
    pub end_pin: u32,
    pub selected: bool,
}

impl Connection {
    pub fn new(start: PinRef, end: PinRef) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: None,
            description: None,
            start_block_id: start.block_id,
            start_pin: start.pin,
            end_block_id: end.block_id,
            end_pin: end.pin,
            selected: false,
        }
    }

    pub fn start(&self) -> PinRef {
        PinRef::new(self.start_block_id.clone(), self.start_pin)
    }

    pub fn end(&self) -> PinRef {
        PinRef::new(self.end_block_id.clone(), self.end_pin)
    }

    pub fn touches_block(&self, block_id: &str) -> bool {
        self.start_block_id == block_id || self.end_block_id == block_id
    }

    pub fn uses_pin(&self, pin: &PinRef) -> bool {
        (self.start_block_id == pin.block_id && self.start_pin == pin.pin)
            || (self.end_block_id == pin.block_id && self.end_pin == pin.pin)
    }

    /// Start and end anchors, or `None` if either pin no longer exists.
    pub fn path(&self, blocks: &[Block]) -> Option<Line> {
        let start = anchor(blocks, &self.start_block_id, self.start_pin)?;
        let end = anchor(blocks, &self.end_block_id, self.end_pin)?;
        Some(Line::new(start, end))
    }
}

/// The rubber-band connection shown while the user drags from a pin.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConnection {
    pub start: PinRef,
    /// Tracks the pointer.
    pub end_location: Offset,
    /// The pin currently under the pointer, if any.
    pub end: Option<PinRef>,
    /// Whether `end` is a pin the start pin may be wired to.
    pub valid_end_point: bool,
}

impl DrawingConnection {
    pub fn new(start: PinRef, end_location: Offset) -> Self {
        Self {
            start,
            end_location,
            end: None,
            valid_end_point: false,
        }
    }

    pub fn path(&self, blocks: &[Block]) -> Option<Line> {
        let start = anchor(blocks, &self.start.block_id, self.start.pin)?;
        Some(Line::new(start, self.end_location))
    }
}

fn anchor(blocks: &[Block], block_id: &str, pin: u32) -> Option<Offset> {
    let block = blocks.iter().find(|b| b.id == block_id)?;
    let io = block.pin(pin)?;
    Some(block.pin_anchor(io))
}
