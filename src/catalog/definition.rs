use crate::model::{Direction, SignalType};
use serde::{Deserialize, Serialize};

/// The template for a function block type: its display text and pin layout.
///
/// Pins carry no geometry here. Their locations are computed by the pin
/// layout once a block has a size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionConfiguration {
    /// Unique across the catalog, e.g. `"And"`.
    pub function_type: String,
    pub label: String,
    pub description: String,
    pub io: Vec<PinDefinition>,
}

/// One input or output of a function type. Pin numbers are assigned from
/// declaration order, starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDefinition {
    pub label: String,
    pub description: String,
    pub signal_type: SignalType,
    pub direction: Direction,
}

impl FunctionConfiguration {
    pub fn inputs(&self) -> impl Iterator<Item = &PinDefinition> {
        self.io.iter().filter(|p| p.direction == Direction::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PinDefinition> {
        self.io.iter().filter(|p| p.direction == Direction::Output)
    }
}
