use super::block::Block;
use super::connection::Connection;
use super::element::{ElementId, ElementRef};
use super::io::{InputOutput, PinRef};
use crate::geometry::Offset;
use itertools::Itertools;
use std::cmp::Reverse;

/// The live, geometry-bearing flow graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flow {
    pub blocks: Vec<Block>,
    pub connections: Vec<Connection>,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn connection_mut(&mut self, id: &str) -> Option<&mut Connection> {
        self.connections.iter_mut().find(|c| c.id == id)
    }

    pub fn pin(&self, pin: &PinRef) -> Option<&InputOutput> {
        self.block(&pin.block_id)?.pin(pin.pin)
    }

    /// Resolves a persistent input/output id to the pin that owns it.
    pub fn find_pin_by_id(&self, input_output_id: &str) -> Option<PinRef> {
        self.blocks.iter().find_map(|block| {
            block
                .pin_by_id(input_output_id)
                .map(|io| PinRef::new(block.id.clone(), io.pin))
        })
    }

    pub fn element(&self, id: &ElementId) -> Option<ElementRef<'_>> {
        match id {
            ElementId::Block(block_id) => self.block(block_id).map(ElementRef::Block),
            ElementId::Pin { block_id, pin } => {
                let block = self.block(block_id)?;
                let io = block.pin(*pin)?;
                Some(ElementRef::Pin { block, io })
            }
            ElementId::Connection(connection_id) => {
                self.connection_element(self.connection(connection_id)?)
            }
            ElementId::Marker { block_id, index } => {
                let block = self.block(block_id)?;
                let marker = block.markers.get(*index)?;
                Some(ElementRef::Marker {
                    block,
                    index: *index,
                    marker,
                })
            }
        }
    }

    pub fn connection_element<'a>(&'a self, connection: &'a Connection) -> Option<ElementRef<'a>> {
        let path = connection.path(&self.blocks)?;
        Some(ElementRef::Connection { connection, path })
    }

    /// True if any completed connection starts or ends at `pin`.
    pub fn is_connector_connected(&self, pin: &PinRef) -> bool {
        self.connections.iter().any(|c| c.uses_pin(pin))
    }

    /// Why `from` and `to` cannot be wired together, or `None` if they can.
    ///
    /// The pins must have opposite directions and the same signal type, and
    /// neither may already be part of a completed connection.
    pub fn connect_rejection(&self, from: &PinRef, to: &PinRef) -> Option<String> {
        let Some(from_io) = self.pin(from) else {
            return Some(format!("pin {} does not exist", from));
        };
        let Some(to_io) = self.pin(to) else {
            return Some(format!("pin {} does not exist", to));
        };

        if from_io.direction == to_io.direction {
            return Some(format!("both pins are {}s", from_io.direction));
        }
        if from_io.signal_type != to_io.signal_type {
            return Some(format!(
                "signal types differ ({} vs {})",
                from_io.signal_type, to_io.signal_type
            ));
        }
        if self.is_connector_connected(from) {
            return Some(format!("pin {} is already connected", from));
        }
        if self.is_connector_connected(to) {
            return Some(format!("pin {} is already connected", to));
        }
        None
    }

    pub fn can_connect(&self, from: &PinRef, to: &PinRef) -> bool {
        self.connect_rejection(from, to).is_none()
    }

    /// Removes a block and every connection that references it.
    pub fn remove_block(&mut self, id: &str) -> Option<(Block, Vec<Connection>)> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        let block = self.blocks.remove(index);

        let (removed, kept): (Vec<_>, Vec<_>) = self
            .connections
            .drain(..)
            .partition(|c| c.touches_block(id));
        self.connections = kept;

        Some((block, removed))
    }

    pub fn remove_connection(&mut self, id: &str) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Returns the first id shared by more than one block, pin or connection.
    pub fn validate_ids(&self) -> Result<(), String> {
        let block_ids = self.blocks.iter().map(|b| b.id.as_str());
        let pin_ids = self
            .blocks
            .iter()
            .flat_map(|b| b.io.iter().map(|io| io.id.as_str()));
        let connection_ids = self.connections.iter().map(|c| c.id.as_str());

        match block_ids
            .chain(pin_ids)
            .chain(connection_ids)
            .duplicates()
            .next()
        {
            Some(duplicate) => Err(duplicate.to_string()),
            None => Ok(()),
        }
    }

    /// Blocks ordered top-most first. Among equal `z`, the later block in the
    /// collection is drawn last and therefore counts as on top.
    pub fn blocks_top_down(&self) -> Vec<&Block> {
        self.blocks
            .iter()
            .rev()
            .sorted_by_key(|b| Reverse(b.z()))
            .collect()
    }

    /// Every pin whose rect contains `point`, top-most block first and in
    /// declaration order within a block.
    pub fn hit_pins(&self, point: Offset) -> Vec<ElementRef<'_>> {
        self.blocks_top_down()
            .into_iter()
            .flat_map(|block| block.io.iter().map(move |io| ElementRef::Pin { block, io }))
            .filter(|pin| pin.contains_offset(point))
            .collect()
    }

    /// The element under `point`, resolved with priority pins, then blocks,
    /// then connections.
    pub fn hit_test(&self, point: Offset, connection_tolerance: f64) -> Option<ElementRef<'_>> {
        if let Some(pin) = self.hit_pins(point).into_iter().next() {
            return Some(pin);
        }

        let block = self
            .blocks_top_down()
            .into_iter()
            .map(ElementRef::Block)
            .find(|b| b.contains_offset(point));
        if block.is_some() {
            return block;
        }

        self.connections
            .iter()
            .rev()
            .filter_map(|c| self.connection_element(c))
            .find(|element| match element {
                ElementRef::Connection { path, .. } => {
                    path.distance_to(point) <= connection_tolerance
                }
                _ => false,
            })
    }

    /// Deselects every block and connection.
    pub fn clear_selection(&mut self) {
        self.blocks.iter_mut().for_each(|b| b.selected = false);
        self.connections.iter_mut().for_each(|c| c.selected = false);
    }
}
