use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

mod config;
mod env_vars;
mod sub_commands;

/// Prepare unsigned Tezos operations
#[derive(Parser)]
#[command(name = "tezos-connect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare a transaction from a JSON request
    Prepare(sub_commands::prepare::PrepareSubCommand),
    /// Show the protocol parameters used for a network
    NetworkParams(sub_commands::network_params::NetworkParamsSubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();
    let default_filter = args.log_level;

    let hyper_filter = "hyper=warn";
    let reqwest_filter = "reqwest=warn";

    let env_filter = EnvFilter::new(format!(
        "{},{},{}",
        default_filter, hyper_filter, reqwest_filter
    ));

    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = config::Settings::new(args.config.clone()).from_env();
    let connector_config = settings.connector;

    Url::parse(&connector_config.rpc_url)
        .with_context(|| format!("Invalid RPC url `{}`", connector_config.rpc_url))?;
    Url::parse(&connector_config.signatory_url).with_context(|| {
        format!(
            "Invalid signatory url `{}`",
            connector_config.signatory_url
        )
    })?;

    tracing::debug!(
        "Network {}, node {}, signatory {}",
        connector_config.network_name,
        connector_config.rpc_url,
        connector_config.signatory_url
    );

    match &args.command {
        Commands::Prepare(sub_command_args) => {
            sub_commands::prepare::prepare(&connector_config, sub_command_args).await
        }
        Commands::NetworkParams(sub_command_args) => {
            sub_commands::network_params::network_params(sub_command_args)
        }
    }
}
