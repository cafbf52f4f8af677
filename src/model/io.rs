use crate::geometry::{Offset, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of signal carried by a pin. Only pins of the same type can be wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    Analogue,
    Digital,
    /// Pulse width modulated.
    #[serde(rename = "PWM")]
    Pwm,
}

/// Pin direction relative to the block that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

/// The block edge a pin is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl BlockSide {
    pub const ALL: [BlockSide; 4] = [
        BlockSide::Left,
        BlockSide::Right,
        BlockSide::Top,
        BlockSide::Bottom,
    ];

    /// Inputs are drawn on the left edge, outputs on the right.
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Input => BlockSide::Left,
            Direction::Output => BlockSide::Right,
        }
    }

    /// Top and bottom pins stack horizontally, left and right pins vertically.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, BlockSide::Top | BlockSide::Bottom)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Analogue => write!(f, "Analogue"),
            SignalType::Digital => write!(f, "Digital"),
            SignalType::Pwm => write!(f, "PWM"),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "Input"),
            Direction::Output => write!(f, "Output"),
        }
    }
}

/// A typed, directional connection point owned by a block.
#[derive(Debug, Clone, PartialEq)]
pub struct InputOutput {
    /// Persistent id (a GUID); connections in a saved flow reference this.
    pub id: String,
    /// Pin number, unique within the owning block.
    pub pin: u32,
    pub label: Option<String>,
    pub description: Option<String>,
    pub signal_type: SignalType,
    pub direction: Direction,
    pub side: BlockSide,
    /// Relative to the owning block's top-left corner.
    pub location: Offset,
    pub size: Size,
}

/// Identifies one pin of one block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    pub block_id: String,
    pub pin: u32,
}

impl PinRef {
    pub fn new(block_id: impl Into<String>, pin: u32) -> Self {
        Self {
            block_id: block_id.into(),
            pin,
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_id, self.pin)
    }
}
