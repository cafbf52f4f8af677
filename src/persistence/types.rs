use crate::geometry::{Offset, Size};
use crate::model::{Direction, SignalType};
use serde::{Deserialize, Serialize};

/// A flow document as stored at rest and sent over the wire.
///
/// The two halves are independent: `functionality` is geometry-free and can
/// be handed to a controller on its own, `elements` carries only geometry
/// keyed by block id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    pub functionality: FunctionalityDocument,
    #[serde(default)]
    pub elements: ElementsDocument,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionalityDocument {
    #[serde(default)]
    pub blocks: Vec<FunctionBlockRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionBlockRecord {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub function_type: String,
    #[serde(default)]
    pub io: Vec<InputOutputRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOutputRecord {
    pub id: String,
    /// Pin number within the block. Older documents omit it, in which case
    /// the record's position in `io` (1-based) is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub signal_type: SignalType,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start_input_output_id: String,
    pub end_input_output_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementsDocument {
    #[serde(default)]
    pub blocks: Vec<BlockElementRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionElementRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockElementRecord {
    /// Id of the functionality block this geometry belongs to.
    pub function_id: String,
    pub location: Offset,
    pub size: Size,
    /// Empty means the default icon for the function type.
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub z_order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionElementRecord {
    pub connection_id: String,
}
