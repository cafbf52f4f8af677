//! Tests for z-order bookkeeping.
use flowcanvas::prelude::*;
use flowcanvas::zorder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn blocks_with_z(z_orders: &[i64]) -> Vec<Block> {
    let catalog = Catalog::default();
    let config = DesignerConfig::default();
    z_orders
        .iter()
        .enumerate()
        .map(|(index, &z)| {
            let mut block = Block::from_configuration(
                catalog.get("Or").unwrap(),
                Offset::new(index as f64 * 10.0, 20.0),
                &config,
            );
            block.id = format!("b{}", index);
            block.z_order = z;
            block
        })
        .collect()
}

fn z_of(blocks: &[Block], id: &str) -> i64 {
    blocks.iter().find(|b| b.id == id).unwrap().z_order
}

fn assert_dense(blocks: &[Block]) {
    let mut z: Vec<i64> = blocks.iter().map(|b| b.z_order).collect();
    z.sort();
    let expected: Vec<i64> = (1..=blocks.len() as i64).collect();
    assert_eq!(z, expected);
}

#[test]
fn test_sort_resequences_gaps_and_duplicates() {
    let mut blocks = blocks_with_z(&[7, 3, 3, -2]);
    zorder::sort(&mut blocks);

    let order: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    // Stable: b1 stays ahead of b2
    assert_eq!(order, vec!["b3", "b1", "b2", "b0"]);
    assert_dense(&blocks);
}

#[test]
fn test_move_forward_swaps_with_neighbour() {
    let mut blocks = blocks_with_z(&[1, 2, 3]);
    assert!(zorder::move_forward(&mut blocks, "b0"));
    assert_eq!(z_of(&blocks, "b0"), 2);
    assert_eq!(z_of(&blocks, "b1"), 1);
    assert_eq!(z_of(&blocks, "b2"), 3);
}

#[test]
fn test_move_forward_on_top_block_is_noop() {
    let mut blocks = blocks_with_z(&[1, 2, 3]);
    assert!(zorder::move_forward(&mut blocks, "b2"));
    assert_eq!(z_of(&blocks, "b2"), 3);
    assert_dense(&blocks);
}

#[test]
fn test_move_backward_swaps_with_neighbour() {
    let mut blocks = blocks_with_z(&[1, 2, 3]);
    assert!(zorder::move_backward(&mut blocks, "b2"));
    assert_eq!(z_of(&blocks, "b2"), 2);
    assert_eq!(z_of(&blocks, "b1"), 3);
}

#[test]
fn test_move_to_front_and_back() {
    let mut blocks = blocks_with_z(&[1, 2, 3, 4]);
    zorder::move_to_front(&mut blocks, "b1");
    assert_eq!(z_of(&blocks, "b1"), 4);
    assert_dense(&blocks);

    zorder::move_to_back(&mut blocks, "b3");
    assert_eq!(z_of(&blocks, "b3"), 1);
    assert_dense(&blocks);
}

#[test]
fn test_single_block_moves_to_one() {
    let mut blocks = blocks_with_z(&[0]);
    zorder::move_to_front(&mut blocks, "b0");
    assert_eq!(z_of(&blocks, "b0"), 1);

    zorder::move_to_back(&mut blocks, "b0");
    assert_eq!(z_of(&blocks, "b0"), 1);
}

#[test]
fn test_unknown_block_is_reported() {
    let mut blocks = blocks_with_z(&[1, 2]);
    assert!(!zorder::apply(&mut blocks, "missing", ZOrderAction::MoveToFront));
}

#[test]
fn test_density_holds_after_random_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut blocks = blocks_with_z(&[5, 5, 1, 9, 0, 2]);
    let actions = [
        ZOrderAction::MoveToFront,
        ZOrderAction::MoveForward,
        ZOrderAction::MoveBackward,
        ZOrderAction::MoveToBack,
    ];

    for _ in 0..200 {
        let id = format!("b{}", rng.random_range(0..6));
        let action = actions[rng.random_range(0..actions.len())];
        assert!(zorder::apply(&mut blocks, &id, action));
        zorder::sort(&mut blocks);
        assert_dense(&blocks);
    }
}

#[test]
fn test_action_names_parse() {
    assert_eq!("moveToFront".parse::<ZOrderAction>(), Ok(ZOrderAction::MoveToFront));
    assert_eq!("moveBackward".parse::<ZOrderAction>(), Ok(ZOrderAction::MoveBackward));
    assert!("sideways".parse::<ZOrderAction>().is_err());
    assert_eq!(ZOrderAction::MoveToBack.to_string(), "moveToBack");
}
