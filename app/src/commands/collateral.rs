use cardano_tx::{Balancer, TransactionUnspentOutput};
use ledger_core::{AppConfig, Lovelace};
use serde::Serialize;

use crate::snapshot::WalletSnapshot;

/// Response for wallet collateral selection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralResponse {
    pub collateral: Option<TransactionUnspentOutput>,
    pub min_lovelace: Lovelace,
    pub candidates: usize,
}

/// Pick the wallet's collateral UTxO
pub fn select_wallet_collateral(config: &AppConfig, wallet: &WalletSnapshot) -> CollateralResponse {
    let balancer = Balancer::new(config.balancer.clone());
    let collateral = balancer.select_collateral(&wallet.utxos);

    match &collateral {
        Some(utxo) => tracing::info!("Selected collateral {}", utxo.input),
        None => tracing::warn!(
            "No ada-only UTxO of at least {} lovelace in wallet",
            balancer.config().min_collateral_lovelace
        ),
    }

    CollateralResponse {
        collateral,
        min_lovelace: balancer.config().min_collateral_lovelace,
        candidates: wallet.utxos.len(),
    }
}
