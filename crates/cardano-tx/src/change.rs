//! Native-asset change balancing
//!
//! Fee tools usually balance lovelace only. Tokens that flow in through the
//! inputs but are not paid out (or minted) would be lost, so the difference is
//! routed back to the change address.

use ledger_core::{Address, ChangeOutputPolicy};

use crate::error::BalanceError;
use crate::tx::{TransactionOutput, TxBody, UtxoSet};

/// Return unspent native assets to `change_address`, merging into the first
/// output already paying to its payment credential.
pub fn balance_non_ada_outs(
    change_address: &Address,
    utxos: &UtxoSet,
    tx_body: &TxBody,
) -> Result<TxBody, BalanceError> {
    balance_non_ada_outs_with(
        ChangeOutputPolicy::MergeFirst,
        change_address,
        utxos,
        tx_body,
    )
}

/// Same as [`balance_non_ada_outs`], with an explicit rule for bodies that
/// already hold several outputs to the change credential.
pub fn balance_non_ada_outs_with(
    policy: ChangeOutputPolicy,
    change_address: &Address,
    utxos: &UtxoSet,
    tx_body: &TxBody,
) -> Result<TxBody, BalanceError> {
    let input_value = tx_body.input_value(utxos).filter_non_ada();
    let spent_value = tx_body.non_minted_output_value().filter_non_ada();
    let non_ada_change = &input_value - &spent_value;

    if !non_ada_change.is_non_neg() {
        return Err(BalanceError::InsufficientInputValue {
            needed: spent_value,
            got: input_value,
        });
    }

    if non_ada_change.is_zero() {
        return Ok(tx_body.clone());
    }

    let change_credential = change_address.payment_credential();
    let matching: Vec<usize> = tx_body
        .outputs
        .iter()
        .enumerate()
        .filter(|(_, output)| output.address.payment_credential() == change_credential)
        .map(|(i, _)| i)
        .collect();

    let mut outputs = tx_body.outputs.clone();
    match matching.as_slice() {
        [] => {
            tracing::debug!(
                "Adding change output to {} carrying {}",
                change_address,
                non_ada_change
            );
            outputs.insert(
                0,
                TransactionOutput::new(change_address.clone(), non_ada_change),
            );
        }
        [first, rest @ ..] => {
            if !rest.is_empty() {
                if policy == ChangeOutputPolicy::Reject {
                    return Err(BalanceError::AmbiguousChangeOutputs {
                        credential: change_credential.clone(),
                        count: matching.len(),
                    });
                }
                tracing::warn!(
                    "{} outputs pay to change credential {}, merging into output {} only",
                    matching.len(),
                    change_credential,
                    first
                );
            }
            tracing::debug!("Merging {} into output {}", non_ada_change, first);
            let existing = &tx_body.outputs[*first];
            outputs[*first] = existing.with_amount(&existing.amount + &non_ada_change);
        }
    }

    Ok(TxBody {
        outputs,
        ..tx_body.clone()
    })
}
