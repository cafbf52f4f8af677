use clap::{Parser, Subcommand};
use flowcanvas::persistence::functionality_to_json;
use flowcanvas::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and normalize function-block flow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional designer configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log loader diagnostics (same as RUST_LOG=flowcanvas=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a flow document and report whether it is well formed
    Validate {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// Load a flow and write it back, filling in missing geometry and ids
    Normalize {
        /// Path to the flow JSON file
        flow_path: String,
        /// Where to write the result (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print only the functionality half of a flow
    Functionality {
        /// Path to the flow JSON file
        flow_path: String,
    },
    /// List the registered function types and their pins
    Catalog,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => DesignerConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => DesignerConfig::default(),
    };
    let catalog = Catalog::default();

    match cli.command {
        Command::Validate { flow_path } => run_validate(&flow_path, &catalog, &config),
        Command::Normalize { flow_path, output } => {
            run_normalize(&flow_path, output.as_deref(), &catalog, &config)
        }
        Command::Functionality { flow_path } => {
            let flow = load_flow(&flow_path, &catalog, &config);
            let json = functionality_to_json(&flow)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write flow: {}", e)));
            println!("{}", json);
        }
        Command::Catalog => print_catalog(&catalog),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("flowcanvas=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_flow(flow_path: &str, catalog: &Catalog, config: &DesignerConfig) -> Flow {
    let json = fs::read_to_string(flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", flow_path, e))
    });
    load_flow_from_json(&json, catalog, config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)))
}

fn run_validate(flow_path: &str, catalog: &Catalog, config: &DesignerConfig) {
    let start = Instant::now();
    let flow = load_flow(flow_path, catalog, config);
    let duration = start.elapsed();

    let pins = flow
        .blocks
        .iter()
        .flat_map(|b| b.io.iter().map(move |io| PinRef::new(&b.id, io.pin)))
        .collect::<Vec<_>>();
    let free = pins
        .iter()
        .filter(|pin| !flow.is_connector_connected(pin))
        .count();

    println!("Flow '{}' is valid.", flow_path);
    println!("\n--- Flow Summary ---");
    println!("Blocks:          {}", flow.blocks.len());
    println!("Connections:     {}", flow.connections.len());
    println!("Pins:            {}", pins.len());
    println!("Unconnected:     {}", free);
    println!("Load time:       {:?}", duration);
}

fn run_normalize(
    flow_path: &str,
    output: Option<&str>,
    catalog: &Catalog,
    config: &DesignerConfig,
) {
    let flow = load_flow(flow_path, catalog, config);
    let json = flow_to_json(&flow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write flow: {}", e)));

    match output {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            println!("Normalized flow written to '{}'", path);
        }
        None => println!("{}", json),
    }
}

fn print_catalog(catalog: &Catalog) {
    for configuration in catalog.configurations() {
        println!("{}", configuration.function_type);
        for (index, pin) in configuration.io.iter().enumerate() {
            println!(
                "  {:>2} {:<8} {:<9} {}",
                index + 1,
                pin.direction.to_string(),
                pin.signal_type.to_string(),
                pin.label
            );
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
