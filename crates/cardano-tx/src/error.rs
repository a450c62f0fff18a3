//! Balancing errors

use ledger_core::{Credential, Value};
use thiserror::Error;

use crate::tx::TransactionInput;

/// Why a balancing attempt failed. Every variant is terminal for the
/// snapshot it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("No ada-only UTxO available for collateral")]
    NoCollateralAvailable,

    /// `needed` and `got` are rendered as flat per-asset lists
    #[error("Not enough inputs to balance: need {needed}, have {got}")]
    InsufficientInputValue { needed: Value, got: Value },

    #[error("UTxO {input} cannot be used as an input: {reason}")]
    UnconvertibleOutput {
        input: TransactionInput,
        reason: String,
    },

    #[error("{count} outputs pay to change credential {credential}")]
    AmbiguousChangeOutputs { credential: Credential, count: usize },
}

impl BalanceError {
    /// Get a stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoCollateralAvailable => "no_collateral_available",
            Self::InsufficientInputValue { .. } => "insufficient_input_value",
            Self::UnconvertibleOutput { .. } => "unconvertible_output",
            Self::AmbiguousChangeOutputs { .. } => "ambiguous_change_outputs",
        }
    }
}
