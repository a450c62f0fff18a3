//! Fee-covering input collection
//!
//! Adds snapshot UTxOs to a body until its inputs dominate the fee plus the
//! value it pays out.

use std::collections::BTreeSet;

use ledger_core::{Lovelace, Value};

use crate::coin_selection::{InputSelector, NaiveGreedy};
use crate::error::BalanceError;
use crate::tx::{inputs_value, spendable_input, TransactionInput, TxBody, UtxoSet};

/// Value the inputs have to cover: the fee plus everything paid out that is
/// not minted in this transaction.
pub fn required_value(fee: Lovelace, tx_body: &TxBody) -> Value {
    Value::from_lovelace(fee) + tx_body.non_minted_output_value()
}

/// Collect inputs in UTxO-set order until the fee and outputs are covered.
pub fn balance_tx_ins(
    utxos: &UtxoSet,
    fee: Lovelace,
    tx_body: &TxBody,
) -> Result<TxBody, BalanceError> {
    balance_tx_ins_with(&NaiveGreedy, utxos, fee, tx_body)
}

/// Collect inputs in the order `selector` chooses.
///
/// Newly added inputs come first, followed by the body's original inputs.
/// Original inputs are never dropped.
pub fn balance_tx_ins_with(
    selector: &dyn InputSelector,
    utxos: &UtxoSet,
    fee: Lovelace,
    tx_body: &TxBody,
) -> Result<TxBody, BalanceError> {
    let required = required_value(fee, tx_body);
    let inputs = collect_tx_ins(selector, &tx_body.inputs, utxos, &required)?;

    Ok(TxBody {
        inputs,
        ..tx_body.clone()
    })
}

fn is_sufficient(total: &Value, required: &Value) -> bool {
    !total.is_zero() && total >= required
}

fn collect_tx_ins(
    selector: &dyn InputSelector,
    original: &[TransactionInput],
    utxos: &UtxoSet,
    required: &Value,
) -> Result<Vec<TransactionInput>, BalanceError> {
    let mut present: BTreeSet<&TransactionInput> = original.iter().collect();
    let mut total = inputs_value(original, utxos);
    let mut added = Vec::new();

    for (input, output) in selector.candidates(utxos) {
        if is_sufficient(&total, required) {
            break;
        }
        if present.contains(input) {
            continue;
        }
        added.push(spendable_input(input, output)?);
        present.insert(input);
        total += &output.amount;
    }

    if !is_sufficient(&total, required) {
        tracing::debug!(
            "Snapshot of {} UTxOs exhausted ({} strategy): need {}, have {}",
            utxos.len(),
            selector.name(),
            required,
            total
        );
        return Err(BalanceError::InsufficientInputValue {
            needed: required.clone(),
            got: total,
        });
    }

    if !added.is_empty() {
        tracing::debug!(
            "Added {} inputs ({} strategy) to cover {}",
            added.len(),
            selector.name(),
            required
        );
    }

    added.extend(original.iter().cloned());
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin_selection::LargestFirst;
    use crate::tx::test_support::*;
    use proptest::prelude::*;

    #[test]
    fn test_existing_inputs_sufficient() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 10_000_000, &[]))]);
        let body = TxBody::new(vec![input(1, 0)], vec![output(2, 3_000_000, &[])]);

        assert_eq!(required_value(200_000, &body), value(3_200_000, &[]));
        let result = balance_tx_ins(&utxos, 200_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(1, 0)]);
        assert_eq!(result, body);
    }

    #[test]
    fn test_adds_inputs_in_order() {
        let utxos = utxo_set(vec![
            (input(1, 0), output(1, 1_000_000, &[])),
            (input(2, 0), output(1, 2_000_000, &[])),
            (input(3, 0), output(1, 4_000_000, &[])),
            (input(4, 0), output(1, 8_000_000, &[])),
        ]);
        let body = TxBody::new(vec![input(1, 0)], vec![output(2, 6_000_000, &[])]);

        let result = balance_tx_ins(&utxos, 200_000, &body).unwrap();
        // 1 + 2 + 4 = 7 ADA covers 6.2 ADA; the 8 ADA UTxO is never reached
        assert_eq!(result.inputs, vec![input(2, 0), input(3, 0), input(1, 0)]);
    }

    #[test]
    fn test_largest_first_strategy() {
        let utxos = utxo_set(vec![
            (input(1, 0), output(1, 1_000_000, &[])),
            (input(2, 0), output(1, 2_000_000, &[])),
            (input(3, 0), output(1, 8_000_000, &[])),
        ]);
        let body = TxBody::new(vec![], vec![output(2, 6_000_000, &[])]);

        let result = balance_tx_ins_with(&LargestFirst, &utxos, 200_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(3, 0)]);
    }

    #[test]
    fn test_tokens_must_be_covered() {
        let utxos = utxo_set(vec![
            (input(1, 0), output(1, 20_000_000, &[])),
            (input(2, 0), output(1, 1_500_000, &[("tokenX", 10)])),
        ]);
        let body = TxBody::new(vec![], vec![output(2, 2_000_000, &[("tokenX", 5)])]);

        let result = balance_tx_ins(&utxos, 170_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(1, 0), input(2, 0)]);
    }

    #[test]
    fn test_minted_tokens_reduce_requirement() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 5_000_000, &[]))]);
        let mut body = TxBody::new(vec![], vec![output(2, 2_000_000, &[("tokenX", 5)])]);
        body.mint = Some(value(0, &[("tokenX", 5)]));

        let result = balance_tx_ins(&utxos, 200_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(1, 0)]);
    }

    #[test]
    fn test_exhausted_snapshot_reports_both_sides() {
        let utxos = utxo_set(vec![
            (input(1, 0), output(1, 1_000_000, &[])),
            (input(2, 0), output(1, 1_000_000, &[])),
        ]);
        let body = TxBody::new(vec![], vec![output(2, 5_000_000, &[("tokenX", 1)])]);

        let err = balance_tx_ins(&utxos, 200_000, &body).unwrap_err();
        assert_eq!(
            err,
            BalanceError::InsufficientInputValue {
                needed: value(5_200_000, &[("tokenX", 1)]),
                got: value(2_000_000, &[]),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("lovelace: 5200000"));
        assert!(msg.contains("have [lovelace: 2000000]"));
    }

    #[test]
    fn test_empty_inputs_never_sufficient() {
        // Nothing to pay, but an input is still required
        let utxos = utxo_set(vec![(input(1, 0), output(1, 1_000_000, &[]))]);
        let result = balance_tx_ins(&utxos, 0, &TxBody::default()).unwrap();
        assert_eq!(result.inputs, vec![input(1, 0)]);

        let err = balance_tx_ins(&UtxoSet::new(), 0, &TxBody::default()).unwrap_err();
        assert_eq!(err.error_code(), "insufficient_input_value");
    }

    #[test]
    fn test_unresolved_original_kept() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 5_000_000, &[]))]);
        let body = TxBody::new(vec![input(7, 0)], vec![output(2, 1_000_000, &[])]);

        let result = balance_tx_ins(&utxos, 200_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(1, 0), input(7, 0)]);
    }

    #[test]
    fn test_original_inputs_not_duplicated() {
        let utxos = utxo_set(vec![
            (input(1, 0), output(1, 1_000_000, &[])),
            (input(2, 0), output(1, 3_000_000, &[])),
        ]);
        let body = TxBody::new(vec![input(1, 0)], vec![output(2, 3_500_000, &[])]);

        let result = balance_tx_ins(&utxos, 200_000, &body).unwrap();
        assert_eq!(result.inputs, vec![input(2, 0), input(1, 0)]);
    }

    #[test]
    fn test_malformed_candidate_fails() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 2_000_000, &[("tokenX", -1)]))]);
        let body = TxBody::new(vec![], vec![output(2, 1_000_000, &[])]);

        let err = balance_tx_ins(&utxos, 200_000, &body).unwrap_err();
        assert_eq!(err.error_code(), "unconvertible_output");
    }

    proptest! {
        #[test]
        fn prop_inputs_monotonic(
            amounts in proptest::collection::vec(100_000i64..5_000_000, 1..10),
            original_count in 0usize..4,
            payout in 0i64..20_000_000,
        ) {
            let utxos = utxo_set(
                amounts
                    .iter()
                    .enumerate()
                    .map(|(i, amt)| (input(i as u8, 0), output(1, *amt, &[])))
                    .collect(),
            );
            // Originals may include references the snapshot does not know
            let original: Vec<TransactionInput> =
                (0..original_count).map(|i| input(200 + i as u8, 0)).collect();
            let body = TxBody::new(original.clone(), vec![output(2, payout, &[])]);

            match balance_tx_ins(&utxos, 200_000, &body) {
                Ok(result) => {
                    prop_assert!(result.inputs.ends_with(&original));
                    prop_assert!(result.input_value(&utxos) >= required_value(200_000, &body));
                }
                Err(BalanceError::InsufficientInputValue { needed, got }) => {
                    let total: i64 = amounts.iter().sum();
                    prop_assert_eq!(got, value(total, &[]));
                    prop_assert_eq!(needed, value(payout + 200_000, &[]));
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }
    }
}
