use crate::geometry::Offset;
use crate::model::DrawingConnection;

/// What the pointer is currently doing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingBlock(BlockDrag),
    DrawingConnection(DrawingConnection),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// State captured when a block drag starts.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDrag {
    pub block_id: String,
    /// Pointer position minus block location at pointer-down.
    pub offset: Offset,
    pub original_position: Offset,
    /// The block is being dragged in from a palette and is not yet part of
    /// the flow.
    pub as_new: bool,
    /// Latches once a palette block first reaches a valid location. From
    /// then on the block is clamped like any other.
    pub location_has_been_valid: bool,
    /// Whether the current location is a valid drop location. Only a style
    /// hint for blocks already in the flow.
    pub location_valid: bool,
}
