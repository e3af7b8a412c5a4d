//! ndev-samples - inspect the bundled sample data from the command line.
//!
//! `list` prints the sample registry; `show` loads one sample and dumps its
//! layer shapes and display metadata, which is the quickest way to check
//! what a host viewer is about to receive.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ndev_sampledata::{config, samples};

/// Inspect the bundled viewer sample data.
#[derive(Parser, Debug)]
#[command(name = "ndev-samples")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true, env = "NDEV_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every registered sample.
    List,

    /// Load one sample and print its layers.
    Show {
        /// Sample key, as printed by `list`.
        key: String,

        /// Emit machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List => run_list(),
        Command::Show { key, json } => run_show(&key, json),
    }
}

// =============================================================================
// List Command
// =============================================================================

fn run_list() -> ExitCode {
    info!("Sample directory: {}", config::samples_dir().display());

    for spec in samples::all() {
        println!("{:<26} {}", spec.key, spec.display_name);
    }
    ExitCode::SUCCESS
}

// =============================================================================
// Show Command
// =============================================================================

fn run_show(key: &str, json: bool) -> ExitCode {
    let Some(spec) = samples::find(key) else {
        error!("Unknown sample: {}", key);
        error!("Run `ndev-samples list` for the available keys");
        return ExitCode::FAILURE;
    };

    info!("Loading sample '{}' ({})", spec.key, spec.display_name);

    let layers = match (spec.loader)() {
        Ok(layers) => layers,
        Err(e) => {
            error!("Failed to load sample '{}': {}", spec.key, e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        let entries: Vec<serde_json::Value> = layers
            .iter()
            .map(|layer| {
                serde_json::json!({
                    "kind": layer.kind.map(|k| k.as_str()),
                    "dtype": layer.data.dtype(),
                    "shape": layer.data.shape(),
                    "metadata": layer.metadata,
                })
            })
            .collect();

        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("Failed to serialize layers: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for (i, layer) in layers.iter().enumerate() {
        let kind = layer.kind.map(|k| k.as_str()).unwrap_or("-");
        println!(
            "[{}] {:<12} {:<8} {:?}  {}",
            i,
            kind,
            layer.data.dtype(),
            layer.data.shape(),
            layer.metadata.name,
        );
        match serde_json::to_string(&layer.metadata) {
            Ok(text) => println!("    {text}"),
            Err(e) => {
                error!("Failed to serialize metadata: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "ndev_sampledata=debug,ndev_samples=debug"
    } else {
        "ndev_sampledata=info,ndev_samples=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
