//! Configuration types for the balancing engine

use serde::{Deserialize, Serialize};

use crate::constants::MIN_COLLATERAL_LOVELACE;
use crate::errors::{Error, Result};
use crate::{Lovelace, Network};

/// Order in which spare UTxOs are offered when more inputs are needed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// UTxO-set order, first fit
    #[default]
    NaiveGreedy,
    /// Largest lovelace amount first
    LargestFirst,
}

/// What to do when several outputs pay to the change credential
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOutputPolicy {
    /// Merge change into the first matching output, leave the rest untouched
    #[default]
    MergeFirst,
    /// Refuse to balance
    Reject,
}

/// Balancing engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancerConfig {
    /// Minimum lovelace for a wallet collateral UTxO
    #[serde(default = "default_min_collateral")]
    pub min_collateral_lovelace: Lovelace,

    #[serde(default)]
    pub selection: SelectionStrategy,

    #[serde(default)]
    pub change_policy: ChangeOutputPolicy,
}

fn default_min_collateral() -> Lovelace {
    MIN_COLLATERAL_LOVELACE
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            min_collateral_lovelace: default_min_collateral(),
            selection: SelectionStrategy::default(),
            change_policy: ChangeOutputPolicy::default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Network (mainnet or testnet)
    pub network: Network,

    /// Balancer settings
    #[serde(default)]
    pub balancer: BalancerConfig,
}

impl AppConfig {
    /// Parse configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            balancer: BalancerConfig::default(),
        }
    }
}
