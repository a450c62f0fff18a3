//! Snapshot and config files read by the CLI

use std::fs;
use std::path::Path;

use anyhow::Context;
use cardano_tx::{TxBody, UtxoSet};
use ledger_core::{Address, AppConfig, Lovelace};
use serde::{Deserialize, Serialize};

/// Everything one balancing attempt needs, frozen at fetch time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub utxos: UtxoSet,
    pub tx_body: TxBody,
    pub change_address: Address,
    /// Fee computed by the external fee tool
    #[serde(default)]
    pub fee: Lovelace,
}

/// Wallet UTxOs only, for collateral selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub utxos: UtxoSet,
}

impl Snapshot {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid balancing snapshot")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::from_json(&read(path)?)
    }
}

impl WalletSnapshot {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid wallet snapshot")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Self::from_json(&read(path)?)
    }
}

/// Load the app config, falling back to defaults when no file is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            let config = AppConfig::from_json(&read(path)?)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(AppConfig::default()),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
