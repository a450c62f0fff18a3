//! Transaction structures
//!
//! The subset of a transaction body the balancer reads and rewrites, plus the
//! UTxO snapshot it resolves inputs against.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use ledger_core::{Address, DatumHash, Lovelace, ParseError, PubKeyHash, Slot, TxHash, Value};
use serde::{Deserialize, Serialize};

use crate::error::BalanceError;

/// Reference to an output of a previous transaction.
///
/// Ordered by transaction hash, then output index. Serialized as
/// `<tx hash>#<index>` so it can key a JSON map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionInput {
    pub transaction_id: TxHash,
    pub index: u32,
}

impl TransactionInput {
    pub fn new(transaction_id: TxHash, index: u32) -> Self {
        Self {
            transaction_id,
            index,
        }
    }
}

impl fmt::Display for TransactionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.transaction_id, self.index)
    }
}

impl FromStr for TransactionInput {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidOutRef {
            value: s.to_string(),
        };
        let (hash, index) = s.split_once('#').ok_or_else(invalid)?;
        let index = index.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(TxHash::parse(hash)?, index))
    }
}

impl TryFrom<String> for TransactionInput {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionInput> for String {
    fn from(value: TransactionInput) -> Self {
        value.to_string()
    }
}

/// Transaction output. Never edited in place; use [`TransactionOutput::with_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub address: Address,
    pub amount: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum_hash: Option<DatumHash>,
}

impl TransactionOutput {
    pub fn new(address: Address, amount: Value) -> Self {
        Self {
            address,
            amount,
            datum_hash: None,
        }
    }

    pub fn with_datum_hash(mut self, datum_hash: DatumHash) -> Self {
        self.datum_hash = Some(datum_hash);
        self
    }

    /// Copy of this output carrying a different value
    pub fn with_amount(&self, amount: Value) -> Self {
        Self {
            address: self.address.clone(),
            amount,
            datum_hash: self.datum_hash.clone(),
        }
    }
}

/// An input paired with the output it spends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUnspentOutput {
    pub input: TransactionInput,
    pub output: TransactionOutput,
}

impl TransactionUnspentOutput {
    pub fn new(input: TransactionInput, output: TransactionOutput) -> Self {
        Self { input, output }
    }
}

/// Point-in-time UTxO snapshot. Iteration follows [`TransactionInput`] order.
pub type UtxoSet = BTreeMap<TransactionInput, TransactionOutput>;

/// Unsigned transaction body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxBody {
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    /// Fee in lovelace
    #[serde(default)]
    pub fee: Lovelace,
    /// Minted (positive) and burned (negative) assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<Vec<TransactionInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_start_interval: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Slot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_signers: Vec<PubKeyHash>,
}

impl TxBody {
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        Self {
            inputs,
            outputs,
            ..Default::default()
        }
    }

    /// Sum of the values this body's inputs spend. Inputs missing from the
    /// snapshot contribute nothing.
    pub fn input_value(&self, utxos: &UtxoSet) -> Value {
        inputs_value(&self.inputs, utxos)
    }

    /// Sum of all output values
    pub fn output_value(&self) -> Value {
        self.outputs.iter().map(|o| &o.amount).sum()
    }

    /// Output value that has to come from inputs rather than from minting
    pub fn non_minted_output_value(&self) -> Value {
        match &self.mint {
            Some(mint) => self.output_value() - mint.clone(),
            None => self.output_value(),
        }
    }
}

/// Resolve inputs against a snapshot and sum their values.
///
/// A reference listed more than once is spent once and counted once.
pub fn inputs_value<'a>(
    inputs: impl IntoIterator<Item = &'a TransactionInput>,
    utxos: &UtxoSet,
) -> Value {
    let distinct: BTreeSet<&TransactionInput> = inputs.into_iter().collect();
    distinct
        .into_iter()
        .filter_map(|input| {
            let output = utxos.get(input);
            if output.is_none() {
                tracing::debug!("Input {} not found in UTxO snapshot, skipping", input);
            }
            output
        })
        .map(|output| &output.amount)
        .sum()
}

/// Check that a snapshot entry can be spent as an input.
///
/// Outputs on chain never hold negative quantities, so an entry that does is a
/// malformed snapshot and is refused.
pub fn spendable_input(
    input: &TransactionInput,
    output: &TransactionOutput,
) -> Result<TransactionInput, BalanceError> {
    if !output.amount.is_non_neg() {
        return Err(BalanceError::UnconvertibleOutput {
            input: input.clone(),
            reason: format!("output value {} has negative components", output.amount),
        });
    }
    Ok(input.clone())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_input_string_form() {
        let inp = input(7, 3);
        let text = inp.to_string();
        assert!(text.ends_with("#3"));
        assert_eq!(text.parse::<TransactionInput>().unwrap(), inp);
    }

    #[test]
    fn test_input_parse_errors() {
        assert!(matches!(
            "abc".parse::<TransactionInput>(),
            Err(ParseError::InvalidOutRef { .. })
        ));
        let bad_index = format!("{}#x", tx_hash(1));
        assert!(matches!(
            bad_index.parse::<TransactionInput>(),
            Err(ParseError::InvalidOutRef { .. })
        ));
        assert!(matches!(
            "00#1".parse::<TransactionInput>(),
            Err(ParseError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_input_ordering() {
        assert!(input(1, 5) < input(2, 0));
        assert!(input(1, 0) < input(1, 1));
    }

    #[test]
    fn test_input_value_skips_missing() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 2_000_000, &[("tokenX", 5)]))]);
        let body = TxBody::new(vec![input(1, 0), input(9, 0)], vec![]);
        assert_eq!(body.input_value(&utxos), value(2_000_000, &[("tokenX", 5)]));
    }

    #[test]
    fn test_input_value_counts_repeated_input_once() {
        let utxos = utxo_set(vec![(input(1, 0), output(1, 2_000_000, &[("tokenX", 5)]))]);
        let body = TxBody::new(vec![input(1, 0), input(1, 0)], vec![]);
        assert_eq!(body.input_value(&utxos), value(2_000_000, &[("tokenX", 5)]));
    }

    #[test]
    fn test_non_minted_output_value() {
        let mut body = TxBody::new(
            vec![],
            vec![
                output(2, 1_000_000, &[("tokenX", 10)]),
                output(3, 2_000_000, &[]),
            ],
        );
        assert_eq!(body.output_value(), value(3_000_000, &[("tokenX", 10)]));
        body.mint = Some(value(0, &[("tokenX", 4)]));
        assert_eq!(
            body.non_minted_output_value(),
            value(3_000_000, &[("tokenX", 6)])
        );
    }

    #[test]
    fn test_spendable_input_rejects_negative() {
        let good = output(1, 1_000_000, &[]);
        assert_eq!(spendable_input(&input(1, 0), &good).unwrap(), input(1, 0));

        let bad = output(1, 1_000_000, &[("tokenX", -1)]);
        let err = spendable_input(&input(1, 0), &bad).unwrap_err();
        assert!(matches!(err, BalanceError::UnconvertibleOutput { .. }));
    }

    #[test]
    fn test_utxo_set_json_keys() {
        let utxos = utxo_set(vec![(input(1, 2), output(1, 5_000_000, &[]))]);
        let json = serde_json::to_string(&utxos).unwrap();
        assert!(json.contains(&format!("\"{}#2\"", tx_hash(1))));
        let parsed: UtxoSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, utxos);
    }

    #[test]
    fn test_tx_body_defaults_from_json() {
        let json = format!(
            r#"{{"inputs":["{}#0"],"outputs":[]}}"#,
            tx_hash(4)
        );
        let body: TxBody = serde_json::from_str(&json).unwrap();
        assert_eq!(body.inputs, vec![input(4, 0)]);
        assert_eq!(body.fee, 0);
        assert!(body.mint.is_none());
        assert!(body.collateral.is_none());
    }
}
