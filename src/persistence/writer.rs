use super::types::{
    BlockElementRecord, ConnectionRecord, ElementsDocument, FlowDocument, FunctionBlockRecord,
    FunctionalityDocument, InputOutputRecord,
};
use crate::error::FlowSaveError;
use crate::model::{Block, Connection, Flow};
use tracing::debug;

/// Splits a live flow back into its functionality and elements halves.
pub fn flow_to_document(flow: &Flow) -> Result<FlowDocument, FlowSaveError> {
    let connections = flow
        .connections
        .iter()
        .map(|c| connection_record(flow, c))
        .collect::<Result<Vec<_>, _>>()?;

    let document = FlowDocument {
        functionality: FunctionalityDocument {
            blocks: flow.blocks.iter().map(function_block_record).collect(),
            connections,
        },
        elements: ElementsDocument {
            blocks: flow.blocks.iter().map(block_element_record).collect(),
            connections: Vec::new(),
        },
    };

    debug!(
        blocks = document.functionality.blocks.len(),
        connections = document.functionality.connections.len(),
        "flow saved"
    );
    Ok(document)
}

pub fn flow_to_json(flow: &Flow) -> Result<String, FlowSaveError> {
    let document = flow_to_document(flow)?;
    serde_json::to_string_pretty(&document)
        .map_err(|e| FlowSaveError::SerializeError(e.to_string()))
}

/// Only the controller-portable half of the flow.
pub fn functionality_to_json(flow: &Flow) -> Result<String, FlowSaveError> {
    let document = flow_to_document(flow)?;
    serde_json::to_string_pretty(&document.functionality)
        .map_err(|e| FlowSaveError::SerializeError(e.to_string()))
}

fn function_block_record(block: &Block) -> FunctionBlockRecord {
    FunctionBlockRecord {
        id: block.id.clone(),
        label: block.label.clone(),
        description: block.description.clone(),
        function_type: block.function_type.clone(),
        io: block
            .io
            .iter()
            .map(|io| InputOutputRecord {
                id: io.id.clone(),
                pin: Some(io.pin),
                label: io.label.clone(),
                description: io.description.clone(),
                signal_type: io.signal_type,
                direction: io.direction,
            })
            .collect(),
    }
}

fn block_element_record(block: &Block) -> BlockElementRecord {
    BlockElementRecord {
        function_id: block.id.clone(),
        location: block.location,
        size: block.size,
        icon: block.icon.clone(),
        z_order: block.z_order,
    }
}

fn connection_record(flow: &Flow, connection: &Connection) -> Result<ConnectionRecord, FlowSaveError> {
    let input_output_id = |block_id: &str, pin: u32| {
        flow.block(block_id)
            .and_then(|b| b.pin(pin))
            .map(|io| io.id.clone())
            .ok_or_else(|| FlowSaveError::UnresolvedPin {
                connection_id: connection.id.clone(),
                block_id: block_id.to_string(),
                pin,
            })
    };

    Ok(ConnectionRecord {
        id: connection.id.clone(),
        label: connection.label.clone(),
        description: connection.description.clone(),
        start_input_output_id: input_output_id(&connection.start_block_id, connection.start_pin)?,
        end_input_output_id: input_output_id(&connection.end_block_id, connection.end_pin)?,
    })
}
