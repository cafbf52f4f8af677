//! Z-order bookkeeping over a block collection.
//!
//! `z_order` is kept dense and 1-based: after [`sort`] the blocks hold exactly
//! the values `1..=N`, in collection order.

use crate::model::Block;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZOrderAction {
    MoveToFront,
    MoveForward,
    MoveBackward,
    MoveToBack,
}

impl FromStr for ZOrderAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moveToFront" => Ok(ZOrderAction::MoveToFront),
            "moveForward" => Ok(ZOrderAction::MoveForward),
            "moveBackward" => Ok(ZOrderAction::MoveBackward),
            "moveToBack" => Ok(ZOrderAction::MoveToBack),
            other => Err(format!("Unknown z-order action '{}'", other)),
        }
    }
}

impl fmt::Display for ZOrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZOrderAction::MoveToFront => "moveToFront",
            ZOrderAction::MoveForward => "moveForward",
            ZOrderAction::MoveBackward => "moveBackward",
            ZOrderAction::MoveToBack => "moveToBack",
        };
        write!(f, "{}", name)
    }
}

/// Stably sorts by `z` ascending, then re-sequences `z_order` to `1..=N`,
/// discarding gaps and duplicates.
pub fn sort(blocks: &mut [Block]) {
    blocks.sort_by_key(|b| b.z());
    for (index, block) in blocks.iter_mut().enumerate() {
        block.z_order = index as i64 + 1;
    }
}

/// Highest `z` in the collection, never below 0.
fn max_z(blocks: &[Block]) -> i64 {
    blocks.iter().map(Block::z).fold(0, i64::max)
}

/// Lowest `z` in the collection, never above 0.
fn min_z(blocks: &[Block]) -> i64 {
    blocks.iter().map(Block::z).fold(0, i64::min)
}

fn position(blocks: &[Block], id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id == id)
}

/// Applies `action` to the block with `id`. Returns `false` if the block is
/// not in the collection.
pub fn apply(blocks: &mut [Block], id: &str, action: ZOrderAction) -> bool {
    match action {
        ZOrderAction::MoveToFront => move_to_front(blocks, id),
        ZOrderAction::MoveForward => move_forward(blocks, id),
        ZOrderAction::MoveBackward => move_backward(blocks, id),
        ZOrderAction::MoveToBack => move_to_back(blocks, id),
    }
}

pub fn move_to_front(blocks: &mut [Block], id: &str) -> bool {
    let Some(index) = position(blocks, id) else {
        return false;
    };
    blocks[index].z_order = max_z(blocks) + 1;
    sort(blocks);
    true
}

pub fn move_to_back(blocks: &mut [Block], id: &str) -> bool {
    let Some(index) = position(blocks, id) else {
        return false;
    };
    blocks[index].z_order = min_z(blocks) - 1;
    sort(blocks);
    true
}

pub fn move_forward(blocks: &mut [Block], id: &str) -> bool {
    swap_with_neighbour(blocks, id, 1)
}

pub fn move_backward(blocks: &mut [Block], id: &str) -> bool {
    swap_with_neighbour(blocks, id, -1)
}

/// Swaps z with the block exactly `step` above (or below). No-op if there is
/// no such block.
fn swap_with_neighbour(blocks: &mut [Block], id: &str, step: i64) -> bool {
    // Sequential z guarantees a unique neighbour
    sort(blocks);

    let Some(index) = position(blocks, id) else {
        return false;
    };
    let target = blocks[index].z() + step;
    if let Some(neighbour) = blocks.iter().position(|b| b.z() == target) {
        blocks[neighbour].z_order -= step;
        blocks[index].z_order += step;
    }
    true
}
