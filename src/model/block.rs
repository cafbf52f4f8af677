use super::io::{BlockSide, InputOutput};
use super::marker::{Marker, Shape};
use crate::catalog::FunctionConfiguration;
use crate::config::DesignerConfig;
use crate::geometry::{Offset, Rect, Size};
use crate::layout::layout_input_outputs;
use uuid::Uuid;

/// An instance of a function block placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    /// Key into the catalog.
    pub function_type: String,
    pub icon: String,
    /// Absolute, editor-space.
    pub location: Offset,
    pub size: Size,
    pub z_order: i64,
    /// Transient; only non-zero while the block is being dragged.
    pub z_boost: i64,
    pub selected: bool,
    pub io: Vec<InputOutput>,
    pub markers: Vec<Marker>,
}

impl Block {
    /// Instantiates a catalog template with a fresh id and fresh pin ids, then
    /// lays out its pins.
    pub fn from_configuration(
        configuration: &FunctionConfiguration,
        location: Offset,
        config: &DesignerConfig,
    ) -> Self {
        let io = configuration
            .io
            .iter()
            .enumerate()
            .map(|(index, definition)| InputOutput {
                id: Uuid::new_v4().to_string(),
                pin: index as u32 + 1,
                label: Some(definition.label.clone()),
                description: Some(definition.description.clone()),
                signal_type: definition.signal_type,
                direction: definition.direction,
                side: BlockSide::for_direction(definition.direction),
                location: Offset::ZERO,
                size: config.pin_dimensions(),
            })
            .collect();

        let mut block = Self {
            id: Uuid::new_v4().to_string(),
            label: None,
            description: None,
            function_type: configuration.function_type.clone(),
            icon: configuration.function_type.to_lowercase(),
            location,
            size: config.block_size,
            z_order: 0,
            z_boost: 0,
            selected: false,
            io,
            markers: Vec::new(),
        };
        layout_input_outputs(&mut block, config);
        block
    }

    /// Stacking index used for rendering and hit-test order.
    pub fn z(&self) -> i64 {
        self.z_order + self.z_boost
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_location_size(self.location, self.size)
    }

    pub fn pin(&self, pin: u32) -> Option<&InputOutput> {
        self.io.iter().find(|io| io.pin == pin)
    }

    pub fn pin_by_id(&self, id: &str) -> Option<&InputOutput> {
        self.io.iter().find(|io| io.id == id)
    }

    /// Absolute rect of one of this block's pins.
    pub fn pin_rect(&self, io: &InputOutput) -> Rect {
        Rect::from_location_size(self.location + io.location, io.size)
    }

    /// The point a connection attaches to: the pin's left edge, vertically centred.
    pub fn pin_anchor(&self, io: &InputOutput) -> Offset {
        Offset::new(
            self.location.x + io.location.x,
            self.location.y + io.location.y + io.size.height / 2.0,
        )
    }

    /// Appends a marker to the right of any existing ones.
    pub fn add_marker(&mut self, shape: Shape, config: &DesignerConfig) -> &mut Marker {
        let index = self.markers.len() as f64;
        let location = Offset::new(
            config.marker_offset.x + index * (config.marker_size + config.marker_offset.x),
            config.marker_offset.y,
        );
        self.markers
            .push(Marker::new(shape, location, config.marker_size));
        let last = self.markers.len() - 1;
        &mut self.markers[last]
    }
}
