//! Error types for the ledger core

use thiserror::Error;

/// Core errors that can occur outside of balancing itself
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while decoding hashes, output references and quantities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid hex for {kind}: {message}")]
    InvalidHex { kind: &'static str, message: String },

    #[error("Invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Asset name is {len} bytes, maximum is {max}")]
    AssetNameTooLong { len: usize, max: usize },

    #[error("Invalid output reference: {value} (expected <tx hash>#<index>)")]
    InvalidOutRef { value: String },

    #[error("Invalid quantity: {value}")]
    InvalidQuantity { value: String },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

impl ParseError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidHex { .. } => "invalid_hex",
            Self::InvalidLength { .. } => "invalid_length",
            Self::AssetNameTooLong { .. } => "asset_name_too_long",
            Self::InvalidOutRef { .. } => "invalid_out_ref",
            Self::InvalidQuantity { .. } => "invalid_quantity",
        }
    }
}
