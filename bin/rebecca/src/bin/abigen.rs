//! Generate the Rust module embedding a compiled contract's ABI.
//!
//! Run from the workspace root after compiling the contracts:
//! ```bash
//! cargo run --bin abigen
//! ```

use abigen::{GenerateOptions, DEFAULT_ARTIFACT_PATH, DEFAULT_MODULE_NAME, DEFAULT_OUTPUT_PATH};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "abigen")]
#[command(about = "Embed a compiled contract's ABI into a Rust module")]
struct Cli {
    /// Compiled contract artifact (Hardhat JSON)
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    /// Module file to write, overwritten if present
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Module name recorded in the generated header
    #[arg(short, long, default_value = DEFAULT_MODULE_NAME)]
    module: String,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = GenerateOptions {
        artifact: cli.artifact,
        output: cli.output,
        module_name: cli.module,
    };

    let generated = abigen::generate(&options)?;

    info!(
        contract = %generated.contract_name,
        elements = generated.elements,
        output = %generated.output.display(),
        "Done"
    );

    Ok(())
}
