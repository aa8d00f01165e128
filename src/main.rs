//! Netlist - circuit netlist checker
//!
//! Loads a tagged-block netlist, reports the first syntax or integrity error,
//! and prints a summary of the resulting circuit graph.
//!
//! # Usage
//!
//! ```bash
//! netlist circuits/example_circuit.txt --adjacency
//! RUST_LOG=debug netlist circuit.txt --emit > canonical.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use netlist_core::{circuit::Circuit, dsl, error::Result, BuildConfig, NamePolicy};

/// Circuit netlist checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Treat node and element names as one namespace
    #[arg(long)]
    shared_namespace: bool,

    /// Print each node's touching elements
    #[arg(short, long)]
    adjacency: bool,

    /// Print the circuit in canonical netlist form instead of a summary
    #[arg(short, long)]
    emit: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let namespace = if args.shared_namespace {
        NamePolicy::Shared
    } else {
        NamePolicy::Separate
    };
    let config = BuildConfig::new().with_namespace(namespace);

    // Load the netlist
    let circuit = netlist_core::load_file(&args.netlist_file, &config)?;
    info!("loaded {}", args.netlist_file.display());

    if args.emit {
        print!("{}", dsl::write_circuit(&circuit));
    } else {
        print_summary(&circuit);
    }

    if args.adjacency {
        for (node, elements) in circuit.adjacency_index() {
            println!("{}: {}", node, elements.join(", "));
        }
    }

    Ok(())
}

fn print_summary(circuit: &Circuit) {
    println!("{} nodes, {} elements", circuit.num_nodes(), circuit.num_elements());
    for kind in dsl::ElementKind::ALL {
        let count = circuit.elements_of_kind(kind).count();
        if count > 0 {
            println!("  {:<15} {}", kind.tag(), count);
        }
    }
    if let Some((lo, hi)) = circuit.bounding_box() {
        println!("extent: ({}) .. ({})", lo, hi);
    }
    let isolated: Vec<_> = circuit.isolated_nodes().map(|n| n.name.as_str()).collect();
    if !isolated.is_empty() {
        println!("isolated nodes: {}", isolated.join(", "));
    }
}
