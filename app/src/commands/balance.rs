use cardano_tx::{Balancer, TransactionInput, TxBody};
use ledger_core::AppConfig;
use serde::Serialize;

use crate::snapshot::Snapshot;

/// Response for a full balancing pass
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub tx_body: TxBody,
    pub input_count: usize,
    pub added_inputs: Vec<TransactionInput>,
    pub output_count: usize,
}

/// Balance the snapshot's body against its UTxOs
pub fn balance_snapshot(config: &AppConfig, snapshot: &Snapshot) -> anyhow::Result<BalanceResponse> {
    if snapshot.change_address.network != config.network {
        anyhow::bail!(
            "Change address is on {} but the balancer is configured for {}",
            snapshot.change_address.network,
            config.network
        );
    }

    let balancer = Balancer::new(config.balancer.clone());
    let balanced = balancer.balance(
        &snapshot.change_address,
        &snapshot.utxos,
        snapshot.fee,
        &snapshot.tx_body,
    )?;

    let added_inputs: Vec<TransactionInput> = balanced
        .inputs
        .iter()
        .filter(|input| !snapshot.tx_body.inputs.contains(input))
        .cloned()
        .collect();

    tracing::info!(
        "Balanced transaction: {} inputs ({} added), {} outputs",
        balanced.inputs.len(),
        added_inputs.len(),
        balanced.outputs.len()
    );

    Ok(BalanceResponse {
        input_count: balanced.inputs.len(),
        output_count: balanced.outputs.len(),
        added_inputs,
        tx_body: balanced,
    })
}
