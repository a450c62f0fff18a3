//! ledger-core: Shared types, value algebra, errors, and configuration
//!
//! This crate provides the foundational types used across the workspace.

pub mod config;
pub mod errors;
pub mod types;
pub mod value;

pub use config::*;
pub use errors::*;
pub use types::*;
pub use value::{FlatAsset, Value};
