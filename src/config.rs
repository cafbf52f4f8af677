use crate::error::ConfigError;
use crate::geometry::{Offset, Size};
use serde::{Deserialize, Serialize};
use std::fs;

/// Pin width and height in view units.
pub const PIN_SIZE: f64 = 10.0;
/// How far a pin is tucked into its block edge.
pub const PIN_INSET: f64 = 2.0;
/// Distance from a block's top/left corner to its first pin.
pub const PIN_START_OFFSET: f64 = 5.0;
pub const MARKER_SIZE: f64 = 15.0;
pub const MARKER_OFFSET_X: f64 = 5.0;
pub const MARKER_OFFSET_Y: f64 = -8.0;
pub const BLOCK_WIDTH: f64 = 150.0;
pub const BLOCK_HEIGHT: f64 = 40.0;

/// Tunable geometry and interaction settings for a designer.
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerConfig {
    pub pin_size: f64,
    pub pin_inset: f64,
    pub pin_start_offset: f64,
    pub marker_size: f64,
    pub marker_offset: Offset,
    pub block_size: Size,
    /// Blocks loaded without saved geometry are placed uniformly in
    /// `[0, width) x [0, height)`.
    pub placement_bounds: Size,
    pub grid_size: f64,
    pub view_size: Size,
    /// Max distance from a connection's path that still counts as a hit.
    pub connection_hit_tolerance: f64,
    /// Added to a block's z while it is being dragged.
    pub drag_z_boost: i64,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            pin_size: PIN_SIZE,
            pin_inset: PIN_INSET,
            pin_start_offset: PIN_START_OFFSET,
            marker_size: MARKER_SIZE,
            marker_offset: Offset::new(MARKER_OFFSET_X, MARKER_OFFSET_Y),
            block_size: Size::new(BLOCK_WIDTH, BLOCK_HEIGHT),
            placement_bounds: Size::new(400.0, 300.0),
            grid_size: 20.0,
            view_size: Size::new(1000.0, 800.0),
            connection_hit_tolerance: 4.0,
            drag_z_boost: 1000,
        }
    }
}

impl DesignerConfig {
    pub fn builder() -> DesignerConfigBuilder {
        DesignerConfigBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&content)
    }

    pub fn pin_dimensions(&self) -> Size {
        Size::square(self.pin_size)
    }
}

#[derive(Debug, Default)]
pub struct DesignerConfigBuilder {
    config: DesignerConfig,
}

impl DesignerConfigBuilder {
    pub fn pin_size(mut self, pin_size: f64) -> Self {
        self.config.pin_size = pin_size;
        self
    }
    pub fn pin_inset(mut self, pin_inset: f64) -> Self {
        self.config.pin_inset = pin_inset;
        self
    }
    pub fn marker_size(mut self, marker_size: f64) -> Self {
        self.config.marker_size = marker_size;
        self
    }
    pub fn block_size(mut self, block_size: Size) -> Self {
        self.config.block_size = block_size;
        self
    }
    pub fn placement_bounds(mut self, bounds: Size) -> Self {
        self.config.placement_bounds = bounds;
        self
    }
    pub fn grid_size(mut self, grid_size: f64) -> Self {
        self.config.grid_size = grid_size;
        self
    }
    pub fn view_size(mut self, view_size: Size) -> Self {
        self.config.view_size = view_size;
        self
    }
    pub fn connection_hit_tolerance(mut self, tolerance: f64) -> Self {
        self.config.connection_hit_tolerance = tolerance;
        self
    }
    pub fn drag_z_boost(mut self, boost: i64) -> Self {
        self.config.drag_z_boost = boost;
        self
    }
    pub fn build(self) -> DesignerConfig {
        self.config
    }
}
