//! The flow designer: the interaction state machine that turns pointer and
//! keyboard input into mutations of a [`Flow`].
//!
//! A designer is explicitly constructed and owned by its host. Input arrives
//! through [`FlowDesigner::dispatch`] (or [`FlowDesigner::pointer_down`] when
//! the host wants the designer to hit-test), and every mutation is published
//! as a [`FlowEvent`] on the designer's own bus. The same mutations are
//! available as direct commands (`add_block`, `connect`, `delete_block`, ...)
//! that return a `Result` and need no rendering harness.
//!
//! States are `Idle`, `DraggingBlock` and `DrawingConnection`. Each handler
//! runs to completion before the next event is processed.

mod state;

pub use state::{BlockDrag, InteractionState};

use crate::catalog::Catalog;
use crate::config::DesignerConfig;
use crate::error::{DesignerError, FlowLoadError, FlowSaveError};
use crate::events::{EventBus, FlowEvent, InputEvent, Key};
use crate::geometry::{Line, Offset, grid_lines};
use crate::model::{
    Block, Connection, DrawingConnection, ElementId, ElementRef, Flow, PinRef, Shape,
};
use crate::persistence::{FlowLoader, flow_to_json};
use crate::zorder::{self, ZOrderAction};
use rand::Rng;
use std::mem;
use tracing::{debug, info};

pub struct FlowDesigner {
    config: DesignerConfig,
    catalog: Catalog,
    flow: Flow,
    state: InteractionState,
    selected_block: Option<String>,
    selected_connection: Option<String>,
    /// A palette block being dragged in, not yet part of `flow`.
    pending_block: Option<Block>,
    events: EventBus<FlowEvent>,
}

impl FlowDesigner {
    pub fn new(catalog: Catalog, config: DesignerConfig) -> Self {
        Self {
            config,
            catalog,
            flow: Flow::new(),
            state: InteractionState::Idle,
            selected_block: None,
            selected_connection: None,
            pending_block: None,
            events: EventBus::new(),
        }
    }

    pub fn with_flow(mut self, flow: Flow) -> Self {
        self.replace_flow(flow);
        self
    }

    // --- Accessors ---

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn events_mut(&mut self) -> &mut EventBus<FlowEvent> {
        &mut self.events
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected_block
            .as_deref()
            .and_then(|id| self.flow.block(id))
    }

    pub fn selected_connection(&self) -> Option<&Connection> {
        self.selected_connection
            .as_deref()
            .and_then(|id| self.flow.connection(id))
    }

    pub fn pending_block(&self) -> Option<&Block> {
        self.pending_block.as_ref()
    }

    pub fn drawing_connection(&self) -> Option<&DrawingConnection> {
        match &self.state {
            InteractionState::DrawingConnection(drawing) => Some(drawing),
            _ => None,
        }
    }

    pub fn block_drag(&self) -> Option<&BlockDrag> {
        match &self.state {
            InteractionState::DraggingBlock(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn grid_lines(&self) -> Vec<Line> {
        grid_lines(self.config.view_size, self.config.grid_size)
    }

    pub fn hit_test(&self, position: Offset) -> Option<ElementId> {
        self.flow
            .hit_test(position, self.config.connection_hit_tolerance)
            .map(|element| element.id())
    }

    pub fn can_connect(&self, from: &PinRef, to: &PinRef) -> bool {
        self.flow.can_connect(from, to)
    }

    pub fn is_connector_connected(&self, pin: &PinRef) -> bool {
        self.flow.is_connector_connected(pin)
    }

    // --- Persistence ---

    pub fn load_json(&mut self, json: &str) -> Result<(), FlowLoadError> {
        let flow = FlowLoader::new(&self.catalog, &self.config).load_json(json)?;
        self.replace_flow(flow);
        Ok(())
    }

    /// Like [`load_json`](Self::load_json), placing blocks that have no saved
    /// geometry with `rng`.
    pub fn load_json_with_rng<R: Rng>(&mut self, json: &str, rng: R) -> Result<(), FlowLoadError> {
        let flow = FlowLoader::new(&self.catalog, &self.config)
            .with_rng(rng)
            .load_json(json)?;
        self.replace_flow(flow);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, FlowSaveError> {
        flow_to_json(&self.flow)
    }

    /// Swaps in a new flow, dropping any selection or gesture in progress.
    pub fn replace_flow(&mut self, mut flow: Flow) {
        flow.clear_selection();
        zorder::sort(&mut flow.blocks);
        self.flow = flow;
        self.state = InteractionState::Idle;
        self.selected_block = None;
        self.selected_connection = None;
        self.pending_block = None;

        self.emit(FlowEvent::FlowLoaded {
            blocks: self.flow.blocks.len(),
            connections: self.flow.connections.len(),
        });
    }

    // --- Input ---

    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::BlockPointerDown { block_id, position } => {
                self.block_pointer_down(&block_id, position)
            }
            InputEvent::PinPointerDown { pin, position } => self.pin_pointer_down(pin, position),
            InputEvent::ConnectionPointerDown { connection_id, .. } => {
                self.connection_pointer_down(&connection_id)
            }
            InputEvent::CanvasPointerDown { .. } => self.canvas_pointer_down(),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position } => self.pointer_up(position),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::KeyUp(key) => self.key_up(key),
        }
    }

    /// Hit-tests `position` and dispatches the matching pointer-down event.
    /// Pins win over blocks, blocks over connections.
    pub fn pointer_down(&mut self, position: Offset) {
        let event = match self.hit_test(position) {
            Some(ElementId::Pin { block_id, pin }) => InputEvent::PinPointerDown {
                pin: PinRef::new(block_id, pin),
                position,
            },
            Some(ElementId::Block(block_id)) => InputEvent::BlockPointerDown { block_id, position },
            Some(ElementId::Connection(connection_id)) => InputEvent::ConnectionPointerDown {
                connection_id,
                position,
            },
            Some(ElementId::Marker { .. }) | None => InputEvent::CanvasPointerDown { position },
        };
        self.dispatch(event);
    }

    fn block_pointer_down(&mut self, block_id: &str, position: Offset) {
        self.abandon_gesture();
        self.clear_selected_items();

        let Some(block) = self.flow.block_mut(block_id) else {
            debug!(block_id, "pointer down on unknown block ignored");
            return;
        };
        block.selected = true;
        block.z_boost = 0;
        let location = block.location;

        self.selected_block = Some(block_id.to_string());
        self.state = InteractionState::DraggingBlock(BlockDrag {
            block_id: block_id.to_string(),
            offset: position - location,
            original_position: location,
            as_new: false,
            location_has_been_valid: true,
            location_valid: true,
        });
        self.emit_selection_changed();
    }

    fn pin_pointer_down(&mut self, pin: PinRef, position: Offset) {
        self.abandon_gesture();
        self.clear_selected_items();

        if self.flow.pin(&pin).is_none() {
            debug!(%pin, "pointer down on unknown pin ignored");
            return;
        }

        self.state = InteractionState::DrawingConnection(DrawingConnection::new(pin, position));
        self.emit(FlowEvent::DrawingConnectionChanged);
    }

    fn connection_pointer_down(&mut self, connection_id: &str) {
        self.clear_selected_items();
        if let Err(e) = self.select_connection(connection_id) {
            debug!(error = %e, "pointer down on unknown connection ignored");
        }
    }

    fn canvas_pointer_down(&mut self) {
        self.clear_selected_items();
        self.emit_selection_changed();
    }

    fn pointer_move(&mut self, position: Offset) {
        match self.state {
            InteractionState::DraggingBlock(_) => self.drag_block_move(position),
            InteractionState::DrawingConnection(_) => self.drag_connection_move(position),
            InteractionState::Idle => {}
        }
    }

    fn drag_block_move(&mut self, position: Offset) {
        let min_y = self.config.marker_size;
        let InteractionState::DraggingBlock(drag) = &mut self.state else {
            return;
        };

        let mut location = position - drag.offset;
        let valid = |l: Offset| l.x >= 0.0 && l.y >= min_y;

        if drag.as_new && !drag.location_has_been_valid {
            // Unconstrained until the palette block first reaches a valid spot
            drag.location_has_been_valid = valid(location);
        } else {
            location.y = location.y.max(min_y);
        }
        drag.location_valid = valid(location);

        let block_id = drag.block_id.clone();
        let block = if drag.as_new {
            self.pending_block.as_mut()
        } else {
            self.flow.block_mut(&block_id)
        };
        let Some(block) = block else {
            return;
        };
        block.location = location;
        block.z_boost = self.config.drag_z_boost;

        self.emit(FlowEvent::BlockMoved { block_id, location });
    }

    fn drag_connection_move(&mut self, position: Offset) {
        let InteractionState::DrawingConnection(drawing) = &self.state else {
            return;
        };
        let start = drawing.start.clone();

        let candidate = self
            .flow
            .hit_pins(position)
            .into_iter()
            .filter_map(|element| match element {
                ElementRef::Pin { block, io } => Some(PinRef::new(block.id.clone(), io.pin)),
                _ => None,
            })
            .find(|pin| *pin != start);
        let valid = candidate
            .as_ref()
            .is_some_and(|pin| self.flow.can_connect(pin, &start));

        if let InteractionState::DrawingConnection(drawing) = &mut self.state {
            drawing.end = candidate;
            drawing.valid_end_point = valid;
            drawing.end_location = position;
        }
        self.emit(FlowEvent::DrawingConnectionChanged);
    }

    fn pointer_up(&mut self, position: Offset) {
        // The release point may differ from the last move
        self.pointer_move(position);

        match mem::take(&mut self.state) {
            InteractionState::DraggingBlock(drag) => self.finish_block_drag(drag),
            InteractionState::DrawingConnection(drawing) => self.finish_connection(drawing),
            InteractionState::Idle => {}
        }
    }

    fn finish_block_drag(&mut self, drag: BlockDrag) {
        if !drag.as_new {
            if let Some(block) = self.flow.block_mut(&drag.block_id) {
                block.z_boost = 0;
                self.emit(FlowEvent::ElementChanged(ElementId::Block(drag.block_id)));
            }
            return;
        }

        let Some(mut block) = self.pending_block.take() else {
            return;
        };
        if !drag.location_valid {
            debug!(block_id = %block.id, location = %block.location, "new block dropped at an invalid location, discarded");
            return;
        }

        block.z_boost = 0;
        block.selected = true;
        let block_id = block.id.clone();
        self.commit_block(block);
        self.selected_block = Some(block_id);
        self.emit_selection_changed();
    }

    fn finish_connection(&mut self, drawing: DrawingConnection) {
        match drawing.end {
            Some(end) if drawing.valid_end_point => {
                if let Err(e) = self.connect(drawing.start, end) {
                    debug!(error = %e, "connect gesture rejected");
                }
            }
            _ => debug!(start = %drawing.start, "connect gesture dropped without a valid end pin"),
        }
        self.emit(FlowEvent::DrawingConnectionChanged);
    }

    /// Abandons any drag or connection draw in progress.
    fn pointer_leave(&mut self) {
        self.abandon_gesture();
    }

    /// Drops any gesture in progress, leaving a dragged block where it is
    /// with its drag boost cleared.
    fn abandon_gesture(&mut self) {
        match mem::take(&mut self.state) {
            InteractionState::DraggingBlock(drag) => {
                if drag.as_new {
                    self.pending_block = None;
                } else if let Some(block) = self.flow.block_mut(&drag.block_id) {
                    block.z_boost = 0;
                }
            }
            InteractionState::DrawingConnection(_) => {
                self.emit(FlowEvent::DrawingConnectionChanged)
            }
            InteractionState::Idle => {}
        }
    }

    fn key_up(&mut self, key: Key) {
        match key {
            Key::Delete => {
                self.delete_selected();
            }
            Key::Escape => self.cancel_interaction(),
            Key::Other(_) => {}
        }
    }

    /// Abandons the current gesture, returning a dragged block to where it
    /// started.
    pub fn cancel_interaction(&mut self) {
        match mem::take(&mut self.state) {
            InteractionState::DraggingBlock(drag) => {
                if drag.as_new {
                    self.pending_block = None;
                    return;
                }
                if let Some(block) = self.flow.block_mut(&drag.block_id) {
                    block.location = drag.original_position;
                    block.z_boost = 0;
                    self.emit(FlowEvent::BlockMoved {
                        block_id: drag.block_id,
                        location: drag.original_position,
                    });
                }
            }
            InteractionState::DrawingConnection(_) => {
                self.emit(FlowEvent::DrawingConnectionChanged)
            }
            InteractionState::Idle => {}
        }
    }

    // --- Commands ---

    /// Instantiates `function_type` at `location` on top of every other block.
    pub fn add_block(&mut self, function_type: &str, location: Offset) -> Result<String, DesignerError> {
        let configuration = self.catalog.get(function_type)?;
        let block = Block::from_configuration(configuration, location, &self.config);
        let block_id = block.id.clone();
        self.commit_block(block);
        Ok(block_id)
    }

    /// Starts dragging a new block in from a palette, centred on `position`.
    ///
    /// The block joins the flow on pointer-up at a valid location and is
    /// discarded otherwise.
    pub fn begin_new_block_drag(
        &mut self,
        function_type: &str,
        position: Offset,
    ) -> Result<String, DesignerError> {
        let configuration = self.catalog.get(function_type)?;
        let offset = Offset::new(
            self.config.block_size.width / 2.0,
            self.config.block_size.height / 2.0,
        );
        let location = position - offset;
        let mut block = Block::from_configuration(configuration, location, &self.config);
        block.selected = true;
        let block_id = block.id.clone();

        self.abandon_gesture();
        self.clear_selected_items();
        let valid = location.x >= 0.0 && location.y >= self.config.marker_size;
        self.pending_block = Some(block);
        self.state = InteractionState::DraggingBlock(BlockDrag {
            block_id: block_id.clone(),
            offset,
            original_position: location,
            as_new: true,
            location_has_been_valid: valid,
            location_valid: valid,
        });
        Ok(block_id)
    }

    fn commit_block(&mut self, block: Block) {
        let block_id = block.id.clone();
        info!(%block_id, function_type = %block.function_type, "block added");
        self.flow.blocks.push(block);
        zorder::move_to_front(&mut self.flow.blocks, &block_id);
        self.emit(FlowEvent::BlockAdded(block_id));
    }

    pub fn move_block(&mut self, block_id: &str, location: Offset) -> Result<(), DesignerError> {
        let block = self
            .flow
            .block_mut(block_id)
            .ok_or_else(|| DesignerError::BlockNotFound(block_id.to_string()))?;
        block.location = location;
        self.emit(FlowEvent::BlockMoved {
            block_id: block_id.to_string(),
            location,
        });
        Ok(())
    }

    /// Selects one block, deselecting every other block and any connection.
    pub fn select_block(&mut self, block_id: &str) -> Result<(), DesignerError> {
        if self.flow.block(block_id).is_none() {
            return Err(DesignerError::BlockNotFound(block_id.to_string()));
        }
        self.clear_selection_flags();
        if let Some(block) = self.flow.block_mut(block_id) {
            block.selected = true;
        }
        self.selected_block = Some(block_id.to_string());
        self.emit_selection_changed();
        Ok(())
    }

    pub fn select_connection(&mut self, connection_id: &str) -> Result<(), DesignerError> {
        if self.flow.connection(connection_id).is_none() {
            return Err(DesignerError::ConnectionNotFound(connection_id.to_string()));
        }
        self.clear_selection_flags();
        if let Some(connection) = self.flow.connection_mut(connection_id) {
            connection.selected = true;
        }
        self.selected_connection = Some(connection_id.to_string());
        self.emit_selection_changed();
        Ok(())
    }

    fn clear_selection_flags(&mut self) {
        self.flow.clear_selection();
        self.selected_block = None;
        self.selected_connection = None;
    }

    /// Clears every selection and any connection being drawn.
    pub fn clear_selected_items(&mut self) {
        self.clear_selection_flags();
        if let InteractionState::DrawingConnection(_) = self.state {
            self.state = InteractionState::Idle;
            self.emit(FlowEvent::DrawingConnectionChanged);
        }
    }

    /// Wires `start` to `end` if the pins are compatible and both free.
    pub fn connect(&mut self, start: PinRef, end: PinRef) -> Result<String, DesignerError> {
        for pin in [&start, &end] {
            if self.flow.pin(pin).is_none() {
                return Err(DesignerError::PinNotFound {
                    block_id: pin.block_id.clone(),
                    pin: pin.pin,
                });
            }
        }
        if let Some(reason) = self.flow.connect_rejection(&start, &end) {
            return Err(DesignerError::IncompatiblePins {
                start: start.to_string(),
                end: end.to_string(),
                reason,
            });
        }

        let connection = Connection::new(start, end);
        let connection_id = connection.id.clone();
        info!(%connection_id, start = %connection.start(), end = %connection.end(), "connection added");
        self.flow.connections.push(connection);
        self.emit(FlowEvent::ConnectionAdded(connection_id.clone()));
        Ok(connection_id)
    }

    /// Removes a block and every connection attached to it.
    pub fn delete_block(&mut self, block_id: &str) -> Result<(Block, Vec<Connection>), DesignerError> {
        let (block, connections) = self
            .flow
            .remove_block(block_id)
            .ok_or_else(|| DesignerError::BlockNotFound(block_id.to_string()))?;

        if self.block_drag().is_some_and(|drag| drag.block_id == block_id) {
            self.state = InteractionState::Idle;
        }
        if self.selected_block.as_deref() == Some(block_id) {
            self.selected_block = None;
        }
        for connection in &connections {
            if self.selected_connection.as_deref() == Some(connection.id.as_str()) {
                self.selected_connection = None;
            }
            self.emit(FlowEvent::ConnectionRemoved(connection.id.clone()));
        }

        info!(%block_id, connections = connections.len(), "block deleted");
        self.emit(FlowEvent::BlockRemoved(block_id.to_string()));
        Ok((block, connections))
    }

    pub fn delete_connection(&mut self, connection_id: &str) -> Result<Connection, DesignerError> {
        let connection = self
            .flow
            .remove_connection(connection_id)
            .ok_or_else(|| DesignerError::ConnectionNotFound(connection_id.to_string()))?;

        if self.selected_connection.as_deref() == Some(connection_id) {
            self.selected_connection = None;
        }
        info!(%connection_id, "connection deleted");
        self.emit(FlowEvent::ConnectionRemoved(connection_id.to_string()));
        Ok(connection)
    }

    /// Deletes the selected block, or failing that the selected connection,
    /// then clears the selection. Returns `false` if nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        let deleted = if let Some(block_id) = self.selected_block.clone() {
            self.delete_block(&block_id).is_ok()
        } else if let Some(connection_id) = self.selected_connection.clone() {
            self.delete_connection(&connection_id).is_ok()
        } else {
            false
        };

        self.clear_selected_items();
        self.emit_selection_changed();
        deleted
    }

    /// Applies a z-order move to the selected block. Returns `false` if no
    /// block is selected.
    pub fn move_block_z_order(&mut self, action: ZOrderAction) -> bool {
        let Some(block_id) = self.selected_block.clone() else {
            return false;
        };
        if !zorder::apply(&mut self.flow.blocks, &block_id, action) {
            return false;
        }
        self.emit(FlowEvent::ZOrderChanged { block_id, action });
        true
    }

    pub fn add_marker(&mut self, block_id: &str, shape: Shape) -> Result<(), DesignerError> {
        let block = self
            .flow
            .block_mut(block_id)
            .ok_or_else(|| DesignerError::BlockNotFound(block_id.to_string()))?;
        block.add_marker(shape, &self.config);
        let index = block.markers.len() - 1;
        self.emit(FlowEvent::ElementChanged(ElementId::Marker {
            block_id: block_id.to_string(),
            index,
        }));
        Ok(())
    }

    // --- Events ---

    fn emit(&mut self, event: FlowEvent) {
        self.events.publish(&event);
    }

    fn emit_selection_changed(&mut self) {
        let event = FlowEvent::SelectionChanged {
            block: self.selected_block.clone(),
            connection: self.selected_connection.clone(),
        };
        self.emit(event);
    }
}
