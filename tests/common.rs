//! Common test utilities for building flow documents and designers.
use flowcanvas::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Two AND gates side by side with full geometry and no connections.
///
/// Block A sits at (40, 40), block B at (300, 40), both 150x40.
#[allow(dead_code)]
pub fn two_and_gates_json() -> String {
    r#"{
        "functionality": {
            "blocks": [
                {
                    "id": "block-a",
                    "label": "Gate A",
                    "description": null,
                    "type": "And",
                    "io": [
                        { "id": "a-1", "pin": 1, "label": "Input 1", "description": null, "signalType": "Digital", "direction": "Input" },
                        { "id": "a-2", "pin": 2, "label": "Input 2", "description": null, "signalType": "Digital", "direction": "Input" },
                        { "id": "a-3", "pin": 3, "label": "Output", "description": null, "signalType": "Digital", "direction": "Output" }
                    ]
                },
                {
                    "id": "block-b",
                    "label": "Gate B",
                    "description": null,
                    "type": "And",
                    "io": [
                        { "id": "b-1", "pin": 1, "label": "Input 1", "description": null, "signalType": "Digital", "direction": "Input" },
                        { "id": "b-2", "pin": 2, "label": "Input 2", "description": null, "signalType": "Digital", "direction": "Input" },
                        { "id": "b-3", "pin": 3, "label": "Output", "description": null, "signalType": "Digital", "direction": "Output" }
                    ]
                }
            ],
            "connections": []
        },
        "elements": {
            "blocks": [
                { "functionId": "block-a", "location": { "x": 40.0, "y": 40.0 }, "size": { "width": 150.0, "height": 40.0 }, "icon": "and", "zOrder": 1 },
                { "functionId": "block-b", "location": { "x": 300.0, "y": 40.0 }, "size": { "width": 150.0, "height": 40.0 }, "icon": "and", "zOrder": 2 }
            ],
            "connections": []
        }
    }"#
    .to_string()
}

/// Three blocks wired A.3 -> B.1 and B.3 -> C.1, with z-order 1, 2, 3.
///
/// Block C (an Invert) has no geometry record and is placed by the loader.
#[allow(dead_code)]
pub fn chain_json() -> String {
    r#"{
        "functionality": {
            "blocks": [
                {
                    "id": "block-a",
                    "type": "And",
                    "io": [
                        { "id": "a-1", "signalType": "Digital", "direction": "Input" },
                        { "id": "a-2", "signalType": "Digital", "direction": "Input" },
                        { "id": "a-3", "signalType": "Digital", "direction": "Output" }
                    ]
                },
                {
                    "id": "block-b",
                    "type": "and",
                    "io": [
                        { "id": "b-1", "signalType": "Digital", "direction": "Input" },
                        { "id": "b-2", "signalType": "Digital", "direction": "Input" },
                        { "id": "b-3", "signalType": "Digital", "direction": "Output" }
                    ]
                },
                {
                    "id": "block-c",
                    "type": "Invert",
                    "io": []
                }
            ],
            "connections": [
                { "id": "conn-ab", "startInputOutputId": "a-3", "endInputOutputId": "b-1" },
                { "id": "conn-bc", "startInputOutputId": "b-3", "endInputOutputId": "block-c-in" }
            ]
        },
        "elements": {
            "blocks": [
                { "functionId": "block-a", "location": { "x": 20.0, "y": 40.0 }, "size": { "width": 150.0, "height": 40.0 }, "zOrder": 1 },
                { "functionId": "block-b", "location": { "x": 260.0, "y": 40.0 }, "size": { "width": 150.0, "height": 40.0 }, "zOrder": 2 }
            ]
        }
    }"#
    .to_string()
}

/// `chain_json` with the Invert block's input id fixed so every connection
/// resolves.
#[allow(dead_code)]
pub fn resolved_chain_json() -> String {
    chain_json().replace(
        r#""io": []"#,
        r#""io": [
            { "id": "block-c-in", "signalType": "Digital", "direction": "Input" },
            { "id": "block-c-out", "signalType": "Digital", "direction": "Output" }
        ]"#,
    )
}

#[allow(dead_code)]
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Loads `json` with a fixed seed for any randomly placed blocks.
#[allow(dead_code)]
pub fn load_seeded(json: &str) -> Flow {
    let catalog = Catalog::default();
    let config = DesignerConfig::default();
    FlowLoader::new(&catalog, &config)
        .with_rng(seeded_rng())
        .load_json(json)
        .expect("fixture flow should load")
}

/// A designer with default catalog and config, loaded from `json`.
#[allow(dead_code)]
pub fn designer_with(json: &str) -> FlowDesigner {
    let mut designer = FlowDesigner::new(Catalog::default(), DesignerConfig::default());
    designer
        .load_json_with_rng(json, seeded_rng())
        .expect("fixture flow should load");
    designer
}

/// Centre of pin `pin` on `block_id`, in editor space.
#[allow(dead_code)]
pub fn pin_centre(flow: &Flow, block_id: &str, pin: u32) -> Offset {
    let block = flow.block(block_id).expect("block should exist");
    let io = block.pin(pin).expect("pin should exist");
    let rect = block.pin_rect(io);
    Offset::new(
        (rect.left + rect.right) / 2.0,
        (rect.top + rect.bottom) / 2.0,
    )
}
