//! cardano-tx: Transaction balancing for multi-asset UTxO transactions
//!
//! Provides the transaction body model, collateral selection, native-asset
//! change balancing and fee-covering input collection. Every operation is a
//! pure function of a UTxO snapshot and a body; nothing is mutated in place.

pub mod balance;
pub mod change;
pub mod coin_selection;
pub mod collateral;
pub mod error;
pub mod pipeline;
pub mod tx;

pub use balance::{balance_tx_ins, balance_tx_ins_with, required_value};
pub use change::{balance_non_ada_outs, balance_non_ada_outs_with};
pub use coin_selection::{selector_for, InputSelector, LargestFirst, NaiveGreedy};
pub use collateral::{add_tx_collaterals, select_collateral, select_collateral_with_min};
pub use error::BalanceError;
pub use pipeline::Balancer;
pub use tx::{
    inputs_value, TransactionInput, TransactionOutput, TransactionUnspentOutput, TxBody, UtxoSet,
};
