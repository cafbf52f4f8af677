use crate::geometry::{Offset, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Circle,
    Triangle,
}

/// A small decorative shape pinned to a block's top edge.
///
/// Markers are never persisted and never hit-tested.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub shape: Shape,
    /// Relative to the owning block.
    pub location: Offset,
    pub size: Size,
    pub stroke_color: String,
    pub fill_color: String,
}

impl Marker {
    pub fn new(shape: Shape, location: Offset, side: f64) -> Self {
        Self {
            shape,
            location,
            size: Size::square(side),
            stroke_color: "black".to_string(),
            fill_color: "white".to_string(),
        }
    }

    pub fn with_colors(mut self, stroke: &str, fill: &str) -> Self {
        self.stroke_color = stroke.to_string();
        self.fill_color = fill.to_string();
        self
    }
}
