use super::types::{BlockElementRecord, ConnectionRecord, FlowDocument, FunctionBlockRecord};
use crate::catalog::Catalog;
use crate::config::DesignerConfig;
use crate::error::FlowLoadError;
use crate::geometry::Offset;
use crate::layout::layout_input_outputs;
use crate::model::{Block, Connection, Flow, PinRef};
use crate::zorder;
use ahash::AHashMap;
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, warn};

/// Joins the functionality and elements halves of a flow document into a
/// live [`Flow`].
///
/// Blocks without a geometry record are placed at a random location inside
/// the configured placement bounds. Supply a seeded RNG through
/// [`FlowLoader::with_rng`] for reproducible placement.
pub struct FlowLoader<'a, R: Rng = ThreadRng> {
    catalog: &'a Catalog,
    config: &'a DesignerConfig,
    rng: R,
}

impl<'a> FlowLoader<'a, ThreadRng> {
    pub fn new(catalog: &'a Catalog, config: &'a DesignerConfig) -> Self {
        Self {
            catalog,
            config,
            rng: rand::rng(),
        }
    }
}

impl<'a, R: Rng> FlowLoader<'a, R> {
    pub fn with_rng<R2: Rng>(self, rng: R2) -> FlowLoader<'a, R2> {
        FlowLoader {
            catalog: self.catalog,
            config: self.config,
            rng,
        }
    }

    pub fn load_json(&mut self, json: &str) -> Result<Flow, FlowLoadError> {
        let document: FlowDocument = serde_json::from_str(json)
            .map_err(|e| FlowLoadError::JsonParseError(e.to_string()))?;
        self.load_document(&document)
    }

    pub fn load_document(&mut self, document: &FlowDocument) -> Result<Flow, FlowLoadError> {
        // The first geometry record for a block wins
        let mut geometry: AHashMap<&str, &BlockElementRecord> = AHashMap::new();
        for record in &document.elements.blocks {
            if geometry.contains_key(record.function_id.as_str()) {
                warn!(block_id = %record.function_id, "duplicate geometry record ignored");
                continue;
            }
            geometry.insert(record.function_id.as_str(), record);
        }

        let mut flow = Flow::new();

        // Blocks first, connections reference their pins
        for record in &document.functionality.blocks {
            let block = self.load_block(record, geometry.get(record.id.as_str()).copied())?;
            flow.blocks.push(block);
        }

        let pins: AHashMap<String, PinRef> = flow
            .blocks
            .iter()
            .flat_map(|b| {
                b.io.iter()
                    .map(move |io| (io.id.clone(), PinRef::new(b.id.clone(), io.pin)))
            })
            .collect();

        for record in &document.functionality.connections {
            let connection = load_connection(&pins, record)?;
            if let Some(reason) = flow.connect_rejection(&connection.start(), &connection.end()) {
                return Err(FlowLoadError::InvalidConnection {
                    connection_id: connection.id,
                    reason,
                });
            }
            flow.connections.push(connection);
        }

        flow.validate_ids().map_err(FlowLoadError::DuplicateId)?;
        zorder::sort(&mut flow.blocks);

        debug!(
            blocks = flow.blocks.len(),
            connections = flow.connections.len(),
            "flow loaded"
        );
        Ok(flow)
    }

    fn load_block(
        &mut self,
        record: &FunctionBlockRecord,
        geometry: Option<&BlockElementRecord>,
    ) -> Result<Block, FlowLoadError> {
        let configuration = self.catalog.get(&record.function_type).map_err(|_| {
            FlowLoadError::InvalidFunctionType {
                block_id: record.id.clone(),
                type_name: record.function_type.clone(),
            }
        })?;

        let geometry = match geometry {
            Some(geometry) => geometry.clone(),
            None => self.synthesize_geometry(record),
        };

        let mut block = Block::from_configuration(configuration, geometry.location, self.config);
        block.id = record.id.clone();
        block.label = record.label.clone();
        block.description = record.description.clone();
        block.size = geometry.size;
        block.z_order = geometry.z_order;
        if !geometry.icon.is_empty() {
            block.icon = geometry.icon;
        }

        // Saved ids must survive so connections keep resolving
        for (index, saved) in record.io.iter().enumerate() {
            let pin = saved.pin.unwrap_or(index as u32 + 1);
            let Some(io) = block.io.iter_mut().find(|io| io.pin == pin) else {
                warn!(block_id = %record.id, pin, "saved input/output has no matching pin in the catalog");
                continue;
            };

            if io.signal_type != saved.signal_type || io.direction != saved.direction {
                warn!(
                    block_id = %record.id,
                    pin,
                    "saved input/output disagrees with the catalog, keeping the catalog definition"
                );
            }

            io.id = saved.id.clone();
            if saved.label.is_some() {
                io.label = saved.label.clone();
            }
            if saved.description.is_some() {
                io.description = saved.description.clone();
            }
        }

        layout_input_outputs(&mut block, self.config);
        Ok(block)
    }

    fn synthesize_geometry(&mut self, record: &FunctionBlockRecord) -> BlockElementRecord {
        let bounds = self.config.placement_bounds;
        let location = Offset::new(
            (self.rng.random::<f64>() * bounds.width).floor(),
            (self.rng.random::<f64>() * bounds.height).floor(),
        );
        debug!(block_id = %record.id, %location, "no geometry saved for block, placing randomly");

        BlockElementRecord {
            function_id: record.id.clone(),
            location,
            size: self.config.block_size,
            icon: String::new(),
            z_order: 0,
        }
    }
}

fn load_connection(
    pins: &AHashMap<String, PinRef>,
    record: &ConnectionRecord,
) -> Result<Connection, FlowLoadError> {
    let resolve = |input_output_id: &str| {
        pins.get(input_output_id)
            .cloned()
            .ok_or_else(|| FlowLoadError::DanglingConnection {
                connection_id: record.id.clone(),
                input_output_id: input_output_id.to_string(),
            })
    };

    let start = resolve(&record.start_input_output_id)?;
    let end = resolve(&record.end_input_output_id)?;

    let mut connection = Connection::new(start, end);
    connection.id = record.id.clone();
    connection.label = record.label.clone();
    connection.description = record.description.clone();
    Ok(connection)
}

/// Loads a flow document with thread-local randomness for missing geometry.
pub fn load_flow_from_json(
    json: &str,
    catalog: &Catalog,
    config: &DesignerConfig,
) -> Result<Flow, FlowLoadError> {
    FlowLoader::new(catalog, config).load_json(json)
}
