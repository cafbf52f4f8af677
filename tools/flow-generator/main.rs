use clap::Parser;
use flowcanvas::catalog::DEFAULT_FUNCTION_TYPES;
use flowcanvas::persistence::flow_to_document;
use flowcanvas::prelude::*;
use rand::seq::IndexedRandom;
use rand::{Rng, rngs::ThreadRng};
use std::fs;
use std::result::Result;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate random flow documents for the flowcanvas designer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of blocks to place
    #[arg(short, long, default_value_t = 12)]
    blocks: usize,

    /// Number of connections to attempt; incompatible picks are skipped
    #[arg(short, long, default_value_t = 16)]
    connections: usize,

    /// Leave out the elements half so the loader has to place every block
    #[arg(long)]
    no_geometry: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!(
        "Generating new flow ({} blocks, up to {} connections)...",
        cli.blocks, cli.connections
    );

    let mut designer = FlowDesigner::new(Catalog::default(), DesignerConfig::default());
    let block_ids = generate_blocks(&mut designer, &mut rng, cli.blocks)?;
    let wired = generate_connections(&mut designer, &mut rng, &block_ids, cli.connections);
    println!("-> Placed {} block(s), wired {} connection(s).", block_ids.len(), wired);

    let mut document = flow_to_document(designer.flow())?;
    if cli.no_geometry {
        document.elements = Default::default();
        println!("-> Stripped geometry.");
    }

    let json_output = serde_json::to_string_pretty(&document)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved flow to '{}'", cli.output);

    Ok(())
}

/// Places blocks of random types on a loose grid inside the placement bounds.
fn generate_blocks(
    designer: &mut FlowDesigner,
    rng: &mut ThreadRng,
    count: usize,
) -> Result<Vec<String>, DesignerError> {
    let bounds = designer.config().placement_bounds;
    let min_y = designer.config().marker_size;

    (0..count)
        .map(|_| {
            let function_type = DEFAULT_FUNCTION_TYPES.choose(rng).copied().unwrap_or("And");
            let location = Offset::new(
                rng.random_range(0.0..bounds.width).floor(),
                rng.random_range(min_y..bounds.height.max(min_y + 1.0)).floor(),
            );
            designer.add_block(function_type, location)
        })
        .collect()
}

/// Picks random output/input pairs and keeps the ones the designer accepts.
fn generate_connections(
    designer: &mut FlowDesigner,
    rng: &mut ThreadRng,
    block_ids: &[String],
    attempts: usize,
) -> usize {
    let mut wired = 0;
    for _ in 0..attempts {
        let (Some(from), Some(to)) = (block_ids.choose(rng), block_ids.choose(rng)) else {
            break;
        };
        let Some(start) = random_pin(designer.flow(), rng, from, Direction::Output) else {
            continue;
        };
        let Some(end) = random_pin(designer.flow(), rng, to, Direction::Input) else {
            continue;
        };
        if designer.connect(start, end).is_ok() {
            wired += 1;
        }
    }
    wired
}

fn random_pin(flow: &Flow, rng: &mut ThreadRng, block_id: &str, direction: Direction) -> Option<PinRef> {
    let block = flow.block(block_id)?;
    let candidates = block
        .io
        .iter()
        .filter(|io| io.direction == direction)
        .collect::<Vec<_>>();
    candidates
        .choose(rng)
        .map(|io| PinRef::new(block_id, io.pin))
}
