//! Query and transact with a deployed RebeccaCoin contract.
//!
//! Mutating commands are simulated with `eth_call` by default; pass `--send`
//! to sign and submit them with the private key.

use alloy_provider::Provider;
use clap::Parser;
use config::{Config, NetworkConfig};
use eyre::eyre;
use rebecca::{connect_token, execute, Command};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "token")]
#[command(about = "Query and transact with a deployed RebeccaCoin contract")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Submit mutating commands as signed transactions instead of simulating them
    #[arg(long)]
    send: bool,

    #[command(subcommand)]
    command: Command,
}

async fn run<P: Provider>(
    provider: P,
    network: &NetworkConfig,
    config: &Config,
    cli: &Cli,
) -> eyre::Result<()> {
    client::ensure_chain_id(&provider, network.chain_id).await?;

    let token = connect_token(provider, config)?;
    let output = execute(&token, &cli.command, cli.send).await?;

    println!("{output}");

    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;
    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {:?}", network.network_type);
    info!("  RPC URL: {}", network.rpc_url);
    info!("  Contract: {}", config.contract_address);

    let submit = cli.send && cli.command.is_mutating();
    if submit {
        let private_key = cli
            .private_key
            .as_deref()
            .ok_or_else(|| eyre!("--send requires --private-key or PRIVATE_KEY"))?;
        let signer = client::parse_signer(private_key)?;

        // Transactions come from the signer, so simulate from it as well.
        let config = Config {
            caller: Some(signer.address()),
            ..config
        };
        info!("  Sender: {}", signer.address());

        let provider = client::create_signer_provider(&network.rpc_url, signer)?;
        run(provider, &network, &config, &cli).await
    } else {
        let provider = client::create_provider(&network.rpc_url).await?;
        run(provider, &network, &config, &cli).await
    }
}
