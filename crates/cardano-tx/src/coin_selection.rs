//! UTxO candidate ordering
//!
//! The input collector walks candidates in the order an [`InputSelector`]
//! hands them out and stops at the first sufficient prefix. Strategies only
//! decide the order, so swapping one never affects the balancing invariants.

use ledger_core::SelectionStrategy;

use crate::tx::{TransactionInput, TransactionOutput, UtxoSet};

/// A snapshot entry offered to the input collector
pub type Candidate<'a> = (&'a TransactionInput, &'a TransactionOutput);

/// Orders spare UTxOs for input collection
pub trait InputSelector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Every snapshot entry, in the order it should be tried
    fn candidates<'a>(&self, utxos: &'a UtxoSet) -> Vec<Candidate<'a>>;
}

// =============================================================================
// Strategies
// =============================================================================

/// Walk the snapshot in input-reference order. No attempt to prefer larger
/// or smaller UTxOs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveGreedy;

impl InputSelector for NaiveGreedy {
    fn name(&self) -> &'static str {
        "naive_greedy"
    }

    fn candidates<'a>(&self, utxos: &'a UtxoSet) -> Vec<Candidate<'a>> {
        utxos.iter().collect()
    }
}

/// Largest lovelace amount first, to keep the input count low.
///
/// Ties keep input-reference order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirst;

impl InputSelector for LargestFirst {
    fn name(&self) -> &'static str {
        "largest_first"
    }

    fn candidates<'a>(&self, utxos: &'a UtxoSet) -> Vec<Candidate<'a>> {
        let mut candidates: Vec<Candidate<'a>> = utxos.iter().collect();
        candidates.sort_by(|(_, a), (_, b)| b.amount.lovelace().cmp(a.amount.lovelace()));
        candidates
    }
}

/// Selector for a configured strategy
pub fn selector_for(strategy: SelectionStrategy) -> Box<dyn InputSelector> {
    match strategy {
        SelectionStrategy::NaiveGreedy => Box::new(NaiveGreedy),
        SelectionStrategy::LargestFirst => Box::new(LargestFirst),
    }
}
