use chaosflow::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;

/// Converts chaos workflows between canvas graphs and workflow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print debug logs (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a canvas graph (`{nodes, edges, store}` JSON) to workflow YAML
    Export {
        /// Path to the graph JSON file
        graph_path: String,
        /// metadata.name of the generated document
        #[arg(long)]
        name: Option<String>,
        /// metadata.namespace of the generated document
        #[arg(long)]
        namespace: Option<String>,
        /// Write the YAML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Import workflow YAML into a canvas graph JSON
    Import {
        /// Path to the workflow YAML file
        workflow_path: String,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Use `node-1`, `node-2`, ... instead of random node ids
        #[arg(long)]
        sequential_ids: bool,
    },
    /// Check a workflow YAML file for structural problems
    Validate {
        /// Path to the workflow YAML file
        workflow_path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Export {
            graph_path,
            name,
            namespace,
            output,
        } => run_export(&graph_path, name, namespace, output),
        Command::Import {
            workflow_path,
            output,
            sequential_ids,
        } => run_import(&workflow_path, output, sequential_ids),
        Command::Validate { workflow_path } => run_validate(&workflow_path),
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn run_export(graph_path: &str, name: Option<String>, namespace: Option<String>, output: Option<String>) {
    let start = Instant::now();
    let graph_json = read_file(graph_path);
    let flow: Flow = serde_json::from_str(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    let mut builder = Exporter::builder(&flow.nodes, &flow.edges, &flow.store);
    if let Some(name) = name {
        builder = builder.with_name(name);
    }
    if let Some(namespace) = namespace {
        builder = builder.with_namespace(namespace);
    }
    let yaml = builder
        .build()
        .export_yaml()
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));

    write_output(output.as_deref(), &yaml);
    log::info!("Export finished in {:?}", start.elapsed());
}

fn run_import(workflow_path: &str, output: Option<String>, sequential_ids: bool) {
    let start = Instant::now();
    let yaml = read_file(workflow_path);
    let id_strategy = if sequential_ids {
        IdStrategy::Sequential
    } else {
        IdStrategy::Uuid
    };

    let flow = Importer::builder()
        .with_id_strategy(id_strategy)
        .build()
        .import(&yaml)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    let json = serde_json::to_string_pretty(&flow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));

    write_output(output.as_deref(), &json);
    log::info!("Import finished in {:?}", start.elapsed());
}

fn run_validate(workflow_path: &str) {
    let yaml = read_file(workflow_path);
    let document = WorkflowDocument::from_yaml(&yaml)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read workflow: {}", e)));

    match document.validate() {
        Ok(()) => println!("{}: OK", workflow_path),
        Err(problems) => {
            for problem in &problems {
                eprintln!("{}", problem);
            }
            exit_with_error(&format!("{} problem(s) found in '{}'", problems.len(), workflow_path));
        }
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn write_output(path: Option<&str>, content: &str) {
    match path {
        Some(path) => fs::write(path, content)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e))),
        None => print!("{}", content),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
