use clap::{Parser, ValueEnum};
use flowgraph::prelude::*;
use std::fs;

/// The transformation to apply to the flow snapshot.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    /// Drop edges whose handles no longer match the node definitions.
    Sanitize,
    /// Report validation errors for every node in the flow.
    Validate,
    /// Recursively expand every group node into its subflow.
    Flatten,
    /// Reset every password field's value for safe sharing.
    Redact,
}

/// Inspect and transform flow snapshots from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The transformation to apply
    #[arg(value_enum)]
    command: Command,

    /// Path to the flow JSON file
    flow_path: String,

    /// Optional output path; defaults to stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Migrate legacy handle encodings before processing
    #[arg(long)]
    migrate: bool,
}

fn main() {
    let cli = Cli::parse();

    let flow_json = fs::read_to_string(&cli.flow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read flow file '{}': {}",
            &cli.flow_path, e
        ))
    });
    let mut flow = Flow::from_json(&flow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse flow JSON: {}", e)));

    if cli.migrate && has_legacy_handles(&flow.data.edges) {
        println!("Legacy handles detected; migrating to the canonical encoding...");
        flow.data.edges = update_edge_handles(&flow.data);
    }

    match cli.command {
        Command::Sanitize => {
            let before = flow.data.edges.len();
            flow.data.edges = clean_edges(&flow.data);
            println!(
                "Sanitized flow: {} of {} edges kept",
                flow.data.edges.len(),
                before
            );
            write_flow(&flow, cli.output.as_deref());
        }
        Command::Validate => {
            let errors = validate_graph(&flow.data);
            let report = if errors.is_empty() {
                format!(
                    "Flow is valid: {} nodes, all required fields satisfied\n",
                    flow.data.nodes.len()
                )
            } else {
                let mut report = format!("Found {} problem(s):\n", errors.len());
                for error in &errors {
                    report.push_str(&format!("  - {}\n", error));
                }
                report
            };
            match cli.output.as_deref() {
                Some(path) => {
                    fs::write(path, &report).unwrap_or_else(|e| {
                        exit_with_error(&format!("Failed to write '{}': {}", path, e))
                    });
                    println!("Wrote {}", path);
                }
                None => print!("{}", report),
            }
            if !errors.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Flatten => {
            flow.data = flatten_graph(flow.data);
            println!("Flattened flow: {} nodes, {} edges", flow.data.nodes.len(), flow.data.edges.len());
            write_flow(&flow, cli.output.as_deref());
        }
        Command::Redact => {
            let redacted = redact_secrets(&flow);
            write_flow(&redacted, cli.output.as_deref());
        }
    }
}

fn write_flow(flow: &Flow, output: Option<&str>) {
    let json = flow
        .to_json()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize flow: {}", e)));
    match output {
        Some(path) => {
            fs::write(path, json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
            println!("Wrote {}", path);
        }
        None => println!("{}", json),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
