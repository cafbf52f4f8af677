use super::block::Block;
use super::connection::Connection;
use super::io::InputOutput;
use super::marker::Marker;
use crate::geometry::{Line, Offset, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Block,
    Pin,
    Connection,
    Marker,
}

/// An owned handle naming one element of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementId {
    Block(String),
    Pin { block_id: String, pin: u32 },
    Connection(String),
    Marker { block_id: String, index: usize },
}

impl ElementId {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementId::Block(_) => ElementKind::Block,
            ElementId::Pin { .. } => ElementKind::Pin,
            ElementId::Connection(_) => ElementKind::Connection,
            ElementId::Marker { .. } => ElementKind::Marker,
        }
    }
}

/// A borrowed view of any element in a flow.
///
/// Pins and markers carry their owning block, which is their parent for
/// bounding-rect purposes. Connections carry their resolved path.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Block(&'a Block),
    Pin {
        block: &'a Block,
        io: &'a InputOutput,
    },
    Connection {
        connection: &'a Connection,
        path: Line,
    },
    Marker {
        block: &'a Block,
        index: usize,
        marker: &'a Marker,
    },
}

impl<'a> ElementRef<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Block(_) => ElementKind::Block,
            ElementRef::Pin { .. } => ElementKind::Pin,
            ElementRef::Connection { .. } => ElementKind::Connection,
            ElementRef::Marker { .. } => ElementKind::Marker,
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            ElementRef::Block(block) => ElementId::Block(block.id.clone()),
            ElementRef::Pin { block, io } => ElementId::Pin {
                block_id: block.id.clone(),
                pin: io.pin,
            },
            ElementRef::Connection { connection, .. } => {
                ElementId::Connection(connection.id.clone())
            }
            ElementRef::Marker { block, index, .. } => ElementId::Marker {
                block_id: block.id.clone(),
                index: *index,
            },
        }
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        match *self {
            ElementRef::Pin { block, .. } | ElementRef::Marker { block, .. } => {
                Some(ElementRef::Block(block))
            }
            ElementRef::Block(_) | ElementRef::Connection { .. } => None,
        }
    }

    /// Location relative to the parent, or absolute for root elements.
    pub fn location(&self) -> Offset {
        match self {
            ElementRef::Block(block) => block.location,
            ElementRef::Pin { io, .. } => io.location,
            ElementRef::Connection { path, .. } => {
                Offset::new(path.start.x.min(path.end.x), path.start.y.min(path.end.y))
            }
            ElementRef::Marker { marker, .. } => marker.location,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            ElementRef::Block(block) => block.size,
            ElementRef::Pin { io, .. } => io.size,
            ElementRef::Connection { path, .. } => Size::new(
                (path.end.x - path.start.x).abs(),
                (path.end.y - path.start.y).abs(),
            ),
            ElementRef::Marker { marker, .. } => marker.size,
        }
    }

    /// Absolute rect: the parent's absolute top-left plus this element's
    /// relative location. Recomputed on every call.
    pub fn bounding_rect(&self) -> Rect {
        let origin = self
            .parent()
            .map(|parent| parent.bounding_rect().top_left())
            .unwrap_or(Offset::ZERO);
        Rect::from_location_size(origin + self.location(), self.size())
    }

    /// Inclusive of the boundary.
    pub fn contains_offset(&self, point: Offset) -> bool {
        self.bounding_rect().contains(point)
    }

    /// The element under `point`. Blocks test their pins first, in
    /// declaration order, so a pin wins over the block body beneath it.
    pub fn hit_element(&self, point: Offset) -> Option<ElementRef<'a>> {
        if let ElementRef::Block(block) = *self {
            let hit_pin = block
                .io
                .iter()
                .map(|io| ElementRef::Pin { block, io })
                .find(|pin| pin.contains_offset(point));
            if hit_pin.is_some() {
                return hit_pin;
            }
        }

        if self.contains_offset(point) {
            Some(*self)
        } else {
            None
        }
    }
}
