//! CLI subcommand handlers

mod balance;
mod collateral;

pub use balance::{balance_snapshot, BalanceResponse};
pub use collateral::{select_wallet_collateral, CollateralResponse};
