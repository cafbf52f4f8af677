use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A position in view-space units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of an element. Negative inputs are clamped to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

// Deserialized sizes are clamped the same way as `Size::new`.
impl<'de> Deserialize<'de> for Size {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawSize {
            width: f64,
            height: f64,
        }

        let raw = RawSize::deserialize(deserializer)?;
        Ok(Size::new(raw.width, raw.height))
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// An absolute, axis-aligned rectangle expressed by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn from_location_size(location: Offset, size: Size) -> Self {
        Self {
            left: location.x,
            top: location.y,
            right: location.x + size.width,
            bottom: location.y + size.height,
        }
    }

    pub fn top_left(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.right - self.left, self.bottom - self.top)
    }

    /// Point-in-rect test. The boundary itself counts as inside.
    pub fn contains(&self, point: Offset) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// True when `other` lies entirely within this rect (shared edges allowed).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }
}

/// A straight segment between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub start: Offset,
    pub end: Offset,
}

impl Line {
    pub fn new(start: Offset, end: Offset) -> Self {
        Self { start, end }
    }

    /// Shortest distance from `point` to any point on the segment.
    pub fn distance_to(&self, point: Offset) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let length_sq = dx * dx + dy * dy;

        // Degenerate segment, measure to the single point
        if length_sq == 0.0 {
            return ((point.x - self.start.x).powi(2) + (point.y - self.start.y).powi(2)).sqrt();
        }

        let t = (((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / length_sq)
            .clamp(0.0, 1.0);
        let nearest = Offset::new(self.start.x + t * dx, self.start.y + t * dy);
        ((point.x - nearest.x).powi(2) + (point.y - nearest.y).powi(2)).sqrt()
    }
}

/// Background grid lines covering `view`, horizontal lines first.
///
/// Returns no lines when the grid pitch is not positive or when either view
/// dimension is smaller than a single grid cell.
pub fn grid_lines(view: Size, grid_size: f64) -> Vec<Line> {
    if grid_size <= 0.0 || view.width < grid_size || view.height < grid_size {
        return Vec::new();
    }

    let mut lines = Vec::new();

    let mut y = 0.0;
    while y < view.height {
        lines.push(Line::new(Offset::new(0.0, y), Offset::new(view.width, y)));
        y += grid_size;
    }

    let mut x = 0.0;
    while x < view.width {
        lines.push(Line::new(Offset::new(x, 0.0), Offset::new(x, view.height)));
        x += grid_size;
    }

    lines
}
