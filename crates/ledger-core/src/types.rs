//! Core type definitions for the ledger
//!
//! Hashes are kept as lowercase hex strings, like the node and wallet APIs
//! hand them to us. Every hash kind is its own type so a validator hash can
//! never be passed where a minting policy is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// Defines a fixed-length, hex-encoded hash newtype.
macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Length of the underlying hash in bytes
            pub const BYTE_LEN: usize = $len;

            /// Parse a hex string, checking the decoded length
            pub fn parse(hex_str: &str) -> Result<Self, ParseError> {
                let bytes = hex::decode(hex_str).map_err(|e| ParseError::InvalidHex {
                    kind: stringify!($name),
                    message: e.to_string(),
                })?;
                Self::from_bytes(&bytes)
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
                if bytes.len() != $len {
                    return Err(ParseError::InvalidLength {
                        kind: stringify!($name),
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                Ok(Self(hex::encode(bytes)))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

hash_newtype!(
    /// Transaction hash (32 bytes)
    TxHash,
    32
);

hash_newtype!(
    /// Payment verification key hash (28 bytes)
    PubKeyHash,
    28
);

hash_newtype!(
    /// Stake verification key hash (28 bytes)
    StakePubKeyHash,
    28
);

hash_newtype!(
    /// Generic script hash (28 bytes)
    ScriptHash,
    28
);

hash_newtype!(
    /// Hash of a spending validator script
    ValidatorHash,
    28
);

hash_newtype!(
    /// Hash of a minting policy script. Doubles as the policy id of the assets it mints.
    MintingPolicyHash,
    28
);

hash_newtype!(
    /// Hash of a datum attached to an output (32 bytes)
    DatumHash,
    32
);

/// Policy id of a native asset
pub type PolicyId = MintingPolicyHash;

impl From<ValidatorHash> for ScriptHash {
    fn from(value: ValidatorHash) -> Self {
        Self(value.0)
    }
}

impl From<MintingPolicyHash> for ScriptHash {
    fn from(value: MintingPolicyHash) -> Self {
        Self(value.0)
    }
}

/// Asset name within a policy (0 to 32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    pub const MAX_BYTE_LEN: usize = 32;

    pub fn parse(hex_str: &str) -> Result<Self, ParseError> {
        let bytes = hex::decode(hex_str).map_err(|e| ParseError::InvalidHex {
            kind: "AssetName",
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() > Self::MAX_BYTE_LEN {
            return Err(ParseError::AssetNameTooLong {
                len: bytes.len(),
                max: Self::MAX_BYTE_LEN,
            });
        }
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the name as UTF-8 if it is printable text
    pub fn to_utf8(&self) -> Option<String> {
        let bytes = hex::decode(&self.0).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssetName {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetName> for String {
    fn from(value: AssetName) -> Self {
        value.0
    }
}

/// Payment credential of an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Credential {
    PubKey(PubKeyHash),
    Script(ValidatorHash),
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PubKey(hash) => write!(f, "key:{}", hash),
            Self::Script(hash) => write!(f, "script:{}", hash),
        }
    }
}

/// Stake (delegation) credential of an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StakeCredential {
    PubKey(StakePubKeyHash),
    Script(ScriptHash),
}

impl fmt::Display for StakeCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PubKey(hash) => write!(f, "stake_key:{}", hash),
            Self::Script(hash) => write!(f, "stake_script:{}", hash),
        }
    }
}

/// Shelley-style address: payment credential plus optional stake credential
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub network: Network,
    pub payment: Credential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake: Option<StakeCredential>,
}

impl Address {
    /// Enterprise address (no stake credential)
    pub fn new(network: Network, payment: Credential) -> Self {
        Self {
            network,
            payment,
            stake: None,
        }
    }

    pub fn with_stake(mut self, stake: StakeCredential) -> Self {
        self.stake = Some(stake);
        self
    }

    pub fn payment_credential(&self) -> &Credential {
        &self.payment
    }

    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stake {
            Some(stake) => write!(f, "{}/{}/{}", self.network, self.payment, stake),
            None => write!(f, "{}/{}", self.network, self.payment),
        }
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Slot number
pub type Slot = u64;

/// Lovelace amount (1 ADA = 1_000_000 lovelace)
pub type Lovelace = u64;

/// Constants
pub mod constants {
    use super::Lovelace;

    /// Smallest ada-only UTxO a wallet will reserve as collateral (5 ADA)
    pub const MIN_COLLATERAL_LOVELACE: Lovelace = 5_000_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "1c12f03c1ef2e935acc35ec2e6f96c650fd3bfba3e96550504d53361";

    #[test]
    fn test_hash_parse_normalizes_case() {
        let hash = PubKeyHash::parse(&KEY_HEX.to_uppercase()).unwrap();
        assert_eq!(hash.as_str(), KEY_HEX);
    }

    #[test]
    fn test_hash_wrong_length() {
        let err = TxHash::parse(KEY_HEX).unwrap_err();
        match err {
            ParseError::InvalidLength {
                kind,
                expected,
                actual,
            } => {
                assert_eq!(kind, "TxHash");
                assert_eq!(expected, 32);
                assert_eq!(actual, 28);
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_hash_invalid_hex() {
        assert!(matches!(
            ScriptHash::parse("zz"),
            Err(ParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_asset_name_limits() {
        let name = AssetName::from_bytes(b"tokenX").unwrap();
        assert_eq!(name.to_utf8().as_deref(), Some("tokenX"));
        assert!(AssetName::from_bytes(&[]).is_ok());
        assert!(matches!(
            AssetName::from_bytes(&[0u8; 33]),
            Err(ParseError::AssetNameTooLong { len: 33, max: 32 })
        ));
    }

    #[test]
    fn test_script_hash_widening() {
        let validator = ValidatorHash::parse(KEY_HEX).unwrap();
        let script: ScriptHash = validator.into();
        assert_eq!(script.as_str(), KEY_HEX);
    }

    #[test]
    fn test_address_serialization() {
        let addr = Address::new(
            Network::Testnet,
            Credential::PubKey(PubKeyHash::parse(KEY_HEX).unwrap()),
        );
        let json = serde_json::to_string(&addr).unwrap();
        assert!(json.contains("\"pubKey\""));
        assert!(!json.contains("stake"));
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, addr);
        assert!(!parsed.is_mainnet());
    }

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.as_str(), "mainnet");
        assert_eq!(Network::Testnet.as_str(), "testnet");
    }
}
