//! Full balancing pass
//!
//! Order: collateral, native-asset change, fee-covering inputs. If new inputs
//! were pulled in, their tokens are routed to change with a second change
//! pass, so the finished body conserves native assets.

use ledger_core::{Address, BalancerConfig, Lovelace};

use crate::balance::balance_tx_ins_with;
use crate::change::balance_non_ada_outs_with;
use crate::coin_selection::{selector_for, InputSelector};
use crate::collateral::{add_tx_collaterals, select_collateral_with_min};
use crate::error::BalanceError;
use crate::tx::{TransactionUnspentOutput, TxBody, UtxoSet};

/// Balancing engine configured once and reused across attempts.
///
/// Holds no per-attempt state; every call works on the snapshot it is given.
pub struct Balancer {
    config: BalancerConfig,
    selector: Box<dyn InputSelector>,
}

impl Balancer {
    pub fn new(config: BalancerConfig) -> Self {
        let selector = selector_for(config.selection);
        Self { config, selector }
    }

    /// Use a custom candidate ordering instead of the configured one
    pub fn with_selector(mut self, selector: Box<dyn InputSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Wallet collateral using the configured threshold
    pub fn select_collateral(&self, utxos: &UtxoSet) -> Option<TransactionUnspentOutput> {
        select_collateral_with_min(utxos, self.config.min_collateral_lovelace)
    }

    /// Run every balancing step against one snapshot.
    pub fn balance(
        &self,
        change_address: &Address,
        utxos: &UtxoSet,
        fee: Lovelace,
        tx_body: &TxBody,
    ) -> Result<TxBody, BalanceError> {
        let policy = self.config.change_policy;

        let with_collateral = add_tx_collaterals(utxos, tx_body)?;
        let with_change =
            balance_non_ada_outs_with(policy, change_address, utxos, &with_collateral)?;
        let funded = balance_tx_ins_with(self.selector.as_ref(), utxos, fee, &with_change)?;

        let added = funded.inputs.len() - with_change.inputs.len();
        if added == 0 {
            return Ok(TxBody { fee, ..funded });
        }

        tracing::debug!("Re-running change balancing after adding {} inputs", added);
        let balanced = balance_non_ada_outs_with(policy, change_address, utxos, &funded)?;
        Ok(TxBody { fee, ..balanced })
    }
}

impl Default for Balancer {
    fn default() -> Self {
        Self::new(BalancerConfig::default())
    }
}
