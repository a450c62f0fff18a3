//! Collateral selection
//!
//! Two entry points with different rules:
//! - [`select_collateral`] reserves wallet collateral: the smallest ada-only
//!   UTxO at or above a threshold, leaving large UTxOs free for spending.
//! - [`add_tx_collaterals`] attaches the first ada-only UTxO of any size to a
//!   transaction body.

use ledger_core::constants::MIN_COLLATERAL_LOVELACE;
use ledger_core::Lovelace;
use num_bigint::BigInt;

use crate::error::BalanceError;
use crate::tx::{spendable_input, TransactionUnspentOutput, TxBody, UtxoSet};

/// Pick the wallet collateral UTxO using the default 5 ADA threshold.
///
/// `None` means no usable collateral; callers that require collateral should
/// turn that into a hard error.
pub fn select_collateral(utxos: &UtxoSet) -> Option<TransactionUnspentOutput> {
    select_collateral_with_min(utxos, MIN_COLLATERAL_LOVELACE)
}

/// Pick the smallest ada-only UTxO holding at least `min_lovelace`.
///
/// Ties go to the entry visited last, i.e. the greatest input reference.
pub fn select_collateral_with_min(
    utxos: &UtxoSet,
    min_lovelace: Lovelace,
) -> Option<TransactionUnspentOutput> {
    let min = BigInt::from(min_lovelace);

    // min_by keeps the first of equal elements, so walk backwards
    let selected = utxos
        .iter()
        .rev()
        .filter(|(_, output)| output.amount.is_ada_only() && *output.amount.lovelace() >= min)
        .min_by(|(_, a), (_, b)| a.amount.lovelace().cmp(b.amount.lovelace()))
        .map(|(input, output)| TransactionUnspentOutput::new(input.clone(), output.clone()));

    match &selected {
        Some(utxo) => tracing::debug!(
            "Selected collateral {} ({} lovelace)",
            utxo.input,
            utxo.output.amount.lovelace()
        ),
        None => tracing::debug!(
            "No ada-only UTxO with at least {} lovelace among {} entries",
            min_lovelace,
            utxos.len()
        ),
    }

    selected
}

/// Set the body's collateral to the first ada-only UTxO in the snapshot.
pub fn add_tx_collaterals(utxos: &UtxoSet, tx_body: &TxBody) -> Result<TxBody, BalanceError> {
    let candidate = utxos
        .iter()
        .filter(|(_, output)| output.amount.is_ada_only())
        .map(|(input, output)| spendable_input(input, output))
        .next()
        .ok_or(BalanceError::NoCollateralAvailable)??;

    tracing::debug!("Using {} as transaction collateral", candidate);

    Ok(TxBody {
        collateral: Some(vec![candidate]),
        ..tx_body.clone()
    })
}
