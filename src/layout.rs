use crate::config::DesignerConfig;
use crate::geometry::Offset;
use crate::model::{Block, BlockSide};

/// The location of the first pin on each side of a block of the given width
/// and height.
fn side_origin(side: BlockSide, width: f64, height: f64, config: &DesignerConfig) -> Offset {
    let start = config.pin_start_offset;
    match side {
        BlockSide::Left => Offset::new(-(config.pin_size - config.pin_inset), start),
        BlockSide::Top => Offset::new(start, -config.pin_inset),
        BlockSide::Right => Offset::new(width - config.pin_inset, start),
        BlockSide::Bottom => Offset::new(start, height - config.pin_inset),
    }
}

/// Distance between consecutive pins on one side: one pin plus half a pin.
pub fn pin_pitch(config: &DesignerConfig) -> f64 {
    config.pin_size + (config.pin_size / 2.0).floor()
}

/// Positions every pin of `block` relative to the block.
///
/// Pins are grouped by side and keep their declaration order within a side.
/// Left and right pins stack downwards, top and bottom pins stack rightwards.
/// The result depends only on the block size, each pin's side and pin order.
pub fn layout_input_outputs(block: &mut Block, config: &DesignerConfig) {
    let width = block.size.width;
    let height = block.size.height;
    let pitch = pin_pitch(config);

    for side in BlockSide::ALL {
        let origin = side_origin(side, width, height, config);
        let mut shift = 0.0;

        for io in block.io.iter_mut().filter(|io| io.side == side) {
            io.location = if side.is_horizontal() {
                Offset::new(origin.x + shift, origin.y)
            } else {
                Offset::new(origin.x, origin.y + shift)
            };
            shift += pitch;
        }
    }
}
