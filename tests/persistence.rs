//! Tests for loading and saving flow documents.
mod common;
use common::*;
use flowcanvas::persistence::{flow_to_document, functionality_to_json};
use flowcanvas::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn round_trip(json: &str) -> String {
    flow_to_json(&load_seeded(json)).unwrap()
}

#[test]
fn test_load_two_and_gates() {
    let flow = load_seeded(&two_and_gates_json());
    assert_eq!(flow.blocks.len(), 2);
    assert!(flow.connections.is_empty());

    let a = flow.block("block-a").unwrap();
    assert_eq!(a.label.as_deref(), Some("Gate A"));
    assert_eq!(a.location, Offset::new(40.0, 40.0));
    assert_eq!(a.z_order, 1);
    assert_eq!(a.io[2].id, "a-3");
    assert_eq!(a.io[2].location, Offset::new(148.0, 5.0));
}

#[test]
fn test_load_resolves_connections_by_pin_id() {
    let flow = load_seeded(&resolved_chain_json());
    let ab = flow.connection("conn-ab").unwrap();
    assert_eq!(ab.start(), PinRef::new("block-a", 3));
    assert_eq!(ab.end(), PinRef::new("block-b", 1));
    assert_eq!(flow.find_pin_by_id("a-3"), Some(PinRef::new("block-a", 3)));

    let bc = flow.connection("conn-bc").unwrap();
    assert_eq!(bc.end(), PinRef::new("block-c", 1));
    assert!(flow.is_connector_connected(&PinRef::new("block-c", 1)));
    assert!(!flow.is_connector_connected(&PinRef::new("block-c", 2)));
}

#[test]
fn test_load_canonicalizes_function_type() {
    let flow = load_seeded(&resolved_chain_json());
    assert_eq!(flow.block("block-b").unwrap().function_type, "And");
}

#[test]
fn test_missing_geometry_is_placed_within_bounds() {
    let flow = load_seeded(&resolved_chain_json());
    let c = flow.block("block-c").unwrap();
    let config = DesignerConfig::default();

    assert!(c.location.x >= 0.0 && c.location.x < config.placement_bounds.width);
    assert!(c.location.y >= 0.0 && c.location.y < config.placement_bounds.height);
    assert_eq!(c.location.x, c.location.x.floor());
    assert_eq!(c.size, config.block_size);
    assert_eq!(c.icon, "invert");
}

#[test]
fn test_missing_geometry_placement_is_reproducible_with_seed() {
    let catalog = Catalog::default();
    let config = DesignerConfig::default();
    let load = |seed| {
        FlowLoader::new(&catalog, &config)
            .with_rng(StdRng::seed_from_u64(seed))
            .load_json(&resolved_chain_json())
            .unwrap()
    };

    let first = load(9);
    let second = load(9);
    assert_eq!(
        first.block("block-c").unwrap().location,
        second.block("block-c").unwrap().location
    );
}

#[test]
fn test_load_sorts_z_order() {
    let json = two_and_gates_json()
        .replace(r#""zOrder": 1"#, r#""zOrder": 40"#)
        .replace(r#""zOrder": 2"#, r#""zOrder": 7"#);
    let flow = load_seeded(&json);

    assert_eq!(flow.blocks[0].id, "block-b");
    assert_eq!(flow.blocks[0].z_order, 1);
    assert_eq!(flow.blocks[1].id, "block-a");
    assert_eq!(flow.blocks[1].z_order, 2);
}

#[test]
fn test_round_trip_is_idempotent() {
    for json in [two_and_gates_json(), resolved_chain_json()] {
        let once = round_trip(&json);
        let twice = round_trip(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_round_trip_preserves_geometry_and_connectivity() {
    let original = load_seeded(&resolved_chain_json());
    let reloaded = load_seeded(&flow_to_json(&original).unwrap());

    for block in &original.blocks {
        let other = reloaded.block(&block.id).unwrap();
        assert_eq!(block.location, other.location);
        assert_eq!(block.size, other.size);
        assert_eq!(block.z_order, other.z_order);
        assert_eq!(block.io, other.io);
    }
    assert_eq!(original.connections, reloaded.connections);
}

#[test]
fn test_saved_document_shape() {
    let mut flow = load_seeded(&two_and_gates_json());
    flow.connections
        .push(Connection::new(PinRef::new("block-a", 3), PinRef::new("block-b", 1)));

    let document = flow_to_document(&flow).unwrap();
    assert_eq!(document.functionality.blocks.len(), 2);
    assert_eq!(document.functionality.blocks[0].function_type, "And");
    assert_eq!(document.functionality.connections[0].start_input_output_id, "a-3");
    assert_eq!(document.functionality.connections[0].end_input_output_id, "b-1");
    assert_eq!(document.elements.blocks[0].function_id, "block-a");
    assert!(document.elements.connections.is_empty());

    let value: serde_json::Value = serde_json::from_str(&flow_to_json(&flow).unwrap()).unwrap();
    let block = &value["functionality"]["blocks"][0];
    assert_eq!(block["type"], "And");
    assert_eq!(block["io"][0]["signalType"], "Digital");
    assert_eq!(value["elements"]["blocks"][1]["zOrder"], 2);
    assert!(value["functionality"]["connections"][0]["startInputOutputId"].is_string());
}

#[test]
fn test_functionality_export_has_no_geometry() {
    let flow = load_seeded(&two_and_gates_json());
    let json = functionality_to_json(&flow).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value.get("elements").is_none());
    assert!(value.get("blocks").is_some());
    assert!(!json.contains("location"));
}

#[test]
fn test_dangling_connection_is_fatal() {
    let catalog = Catalog::default();
    let config = DesignerConfig::default();
    let result = load_flow_from_json(&chain_json(), &catalog, &config);

    match result {
        Err(FlowLoadError::DanglingConnection {
            connection_id,
            input_output_id,
        }) => {
            assert_eq!(connection_id, "conn-bc");
            assert_eq!(input_output_id, "block-c-in");
        }
        other => panic!("Expected DanglingConnection, got {:?}", other),
    }
}

#[test]
fn test_unknown_function_type_is_fatal() {
    let json = two_and_gates_json().replacen(r#""type": "And""#, r#""type": "Teleporter""#, 1);
    let catalog = Catalog::default();
    let config = DesignerConfig::default();

    match load_flow_from_json(&json, &catalog, &config) {
        Err(FlowLoadError::InvalidFunctionType { block_id, type_name }) => {
            assert_eq!(block_id, "block-a");
            assert_eq!(type_name, "Teleporter");
        }
        other => panic!("Expected InvalidFunctionType, got {:?}", other),
    }
}

#[test]
fn test_duplicate_ids_are_fatal() {
    let json = two_and_gates_json().replace(r#""id": "b-1""#, r#""id": "a-1""#);
    let catalog = Catalog::default();
    let config = DesignerConfig::default();

    assert!(matches!(
        load_flow_from_json(&json, &catalog, &config),
        Err(FlowLoadError::DuplicateId(id)) if id == "a-1"
    ));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let catalog = Catalog::default();
    let config = DesignerConfig::default();
    assert!(matches!(
        load_flow_from_json("{ \"functionality\": ", &catalog, &config),
        Err(FlowLoadError::JsonParseError(_))
    ));
}

#[test]
fn test_unknown_saved_pin_is_skipped() {
    let json = two_and_gates_json().replace(
        r#"{ "id": "a-3", "pin": 3"#,
        r#"{ "id": "a-9", "pin": 9"#,
    );
    let flow = load_seeded(&json);
    let a = flow.block("block-a").unwrap();

    // The catalog still defines pin 3; it just gets a fresh id
    assert_eq!(a.io.len(), 3);
    assert!(a.pin_by_id("a-9").is_none());
    assert_ne!(a.pin(3).unwrap().id, "a-3");
}

#[test]
fn test_missing_elements_half_places_every_block() {
    let json = r#"{
        "functionality": {
            "blocks": [
                { "id": "x", "type": "Xor", "io": [] },
                { "id": "y", "type": "Split", "io": [] }
            ],
            "connections": []
        }
    }"#;
    let flow = load_seeded(json);
    assert_eq!(flow.blocks.len(), 2);
    let mut z: Vec<i64> = flow.blocks.iter().map(|b| b.z_order).collect();
    z.sort();
    assert_eq!(z, vec![1, 2]);
}

fn with_connections(json: &str, connections: &str) -> String {
    json.replacen(r#""connections": []"#, connections, 1)
}

#[test]
fn test_negative_saved_size_is_clamped() {
    let json = two_and_gates_json().replacen(r#""width": 150.0"#, r#""width": -150.0"#, 1);
    let flow = load_seeded(&json);
    let a = flow.block("block-a").unwrap();

    assert_eq!(a.size, Size::new(0.0, 40.0));
    assert!(a.bounding_rect().right >= a.bounding_rect().left);
}

#[test]
fn test_first_geometry_record_wins() {
    let json = two_and_gates_json().replacen(
        r#""zOrder": 1 },"#,
        r#""zOrder": 1 },
                { "functionId": "block-a", "location": { "x": 500.0, "y": 500.0 }, "size": { "width": 150.0, "height": 40.0 }, "zOrder": 3 },"#,
        1,
    );
    let flow = load_seeded(&json);
    let a = flow.block("block-a").unwrap();

    assert_eq!(flow.blocks.len(), 2);
    assert_eq!(a.location, Offset::new(40.0, 40.0));
    assert_eq!(a.z_order, 1);
}

#[test]
fn test_connection_between_two_inputs_is_fatal() {
    let json = with_connections(
        &two_and_gates_json(),
        r#""connections": [
            { "id": "conn-in", "startInputOutputId": "a-1", "endInputOutputId": "b-1" }
        ]"#,
    );
    let catalog = Catalog::default();
    let config = DesignerConfig::default();

    match load_flow_from_json(&json, &catalog, &config) {
        Err(FlowLoadError::InvalidConnection { connection_id, reason }) => {
            assert_eq!(connection_id, "conn-in");
            assert!(reason.contains("Input"), "unexpected reason: {}", reason);
        }
        other => panic!("Expected InvalidConnection, got {:?}", other),
    }
}

#[test]
fn test_second_connection_on_a_pin_is_fatal() {
    let json = with_connections(
        &two_and_gates_json(),
        r#""connections": [
            { "id": "conn-1", "startInputOutputId": "a-3", "endInputOutputId": "b-1" },
            { "id": "conn-2", "startInputOutputId": "a-3", "endInputOutputId": "b-2" }
        ]"#,
    );
    let catalog = Catalog::default();
    let config = DesignerConfig::default();

    assert!(matches!(
        load_flow_from_json(&json, &catalog, &config),
        Err(FlowLoadError::InvalidConnection { connection_id, .. }) if connection_id == "conn-2"
    ));
}
