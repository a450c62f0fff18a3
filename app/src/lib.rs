//! Balancer command-line application library

pub mod commands;
pub mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snapshot::{load_config, Snapshot, WalletSnapshot};

#[derive(Debug, Parser)]
#[command(name = "balancer", version, about = "Balance multi-asset UTxO transactions")]
pub struct Cli {
    /// JSON config file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add collateral, return token change and cover the fee
    Balance {
        /// Snapshot with utxos, txBody, changeAddress and fee
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Pick the wallet's collateral UTxO
    Collateral {
        /// Snapshot with the wallet's utxos
        #[arg(long)]
        snapshot: PathBuf,
    },
}

/// Engine decisions at debug, everything else at info, `RUST_LOG` on top
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("cardano_tx=debug".parse()?)
        .add_directive("info".parse()?))
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter()?)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!("Running on {}", config.network);

    match cli.command {
        Command::Balance { snapshot } => {
            let snapshot = Snapshot::load(&snapshot)?;
            let response = commands::balance_snapshot(&config, &snapshot)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Collateral { snapshot } => {
            let wallet = WalletSnapshot::load(&snapshot)?;
            let response = commands::select_wallet_collateral(&config, &wallet);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if response.collateral.is_some() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
