//! Multi-asset value algebra
//!
//! A [`Value`] is a lovelace amount plus a policy -> asset name -> quantity
//! map. Quantities are arbitrary precision and signed, so values form a
//! group under `+`/`-`. Values are partially ordered by componentwise
//! dominance: `a >= b` holds only when every component of `a` is at least the
//! matching component of `b`.
//!
//! Zero quantities are never stored. Derived equality is therefore value
//! equality.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::types::{AssetName, PolicyId};

/// Native asset quantities keyed by policy, then asset name
pub type AssetMap = BTreeMap<PolicyId, BTreeMap<AssetName, BigInt>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ValueRepr", into = "ValueRepr")]
pub struct Value {
    lovelace: BigInt,
    assets: AssetMap,
}

impl Value {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_lovelace(lovelace: impl Into<BigInt>) -> Self {
        Self {
            lovelace: lovelace.into(),
            assets: AssetMap::new(),
        }
    }

    /// Value holding a single native asset and no lovelace
    pub fn from_asset(policy: PolicyId, name: AssetName, quantity: impl Into<BigInt>) -> Self {
        let mut value = Self::zero();
        value.adjust(&policy, &name, &quantity.into());
        value
    }

    /// Builder-style helper adding a native asset quantity
    pub fn with_asset(
        mut self,
        policy: PolicyId,
        name: AssetName,
        quantity: impl Into<BigInt>,
    ) -> Self {
        self.adjust(&policy, &name, &quantity.into());
        self
    }

    pub fn lovelace(&self) -> &BigInt {
        &self.lovelace
    }

    pub fn assets(&self) -> &AssetMap {
        &self.assets
    }

    /// Quantity of one native asset, zero when absent
    pub fn asset_quantity(&self, policy: &PolicyId, name: &AssetName) -> BigInt {
        self.assets
            .get(policy)
            .and_then(|tokens| tokens.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// All components are zero
    pub fn is_zero(&self) -> bool {
        self.lovelace.is_zero() && self.assets.is_empty()
    }

    /// No component is negative
    pub fn is_non_neg(&self) -> bool {
        !self.lovelace.is_negative()
            && self
                .assets
                .values()
                .flat_map(|tokens| tokens.values())
                .all(|q| !q.is_negative())
    }

    /// Carries no native assets
    pub fn is_ada_only(&self) -> bool {
        self.assets.is_empty()
    }

    /// Drop the lovelace component, keeping only native assets
    pub fn filter_non_ada(&self) -> Value {
        Self {
            lovelace: BigInt::zero(),
            assets: self.assets.clone(),
        }
    }

    /// Lazily list every non-zero component.
    ///
    /// Lovelace comes first, then native assets in policy/name order. The
    /// iterator is cheap to clone, so diagnostics can walk it more than once.
    pub fn flatten(&self) -> impl Iterator<Item = (FlatAsset<'_>, &BigInt)> + Clone + '_ {
        let ada = (!self.lovelace.is_zero()).then_some((FlatAsset::Lovelace, &self.lovelace));
        ada.into_iter()
            .chain(self.assets.iter().flat_map(|(policy, tokens)| {
                tokens
                    .iter()
                    .map(move |(name, quantity)| (FlatAsset::Native { policy, name }, quantity))
            }))
    }

    fn adjust(&mut self, policy: &PolicyId, name: &AssetName, delta: &BigInt) {
        if delta.is_zero() {
            return;
        }
        let tokens = self.assets.entry(policy.clone()).or_default();
        let now_zero = {
            let quantity = tokens.entry(name.clone()).or_default();
            *quantity += delta;
            quantity.is_zero()
        };
        if now_zero {
            tokens.remove(name);
        }
        if tokens.is_empty() {
            self.assets.remove(policy);
        }
    }
}

/// Component label produced by [`Value::flatten`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatAsset<'a> {
    Lovelace,
    Native {
        policy: &'a PolicyId,
        name: &'a AssetName,
    },
}

impl fmt::Display for FlatAsset<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatAsset::Lovelace => write!(f, "lovelace"),
            FlatAsset::Native { policy, name } => match name.to_utf8() {
                Some(text) if !text.is_empty() && text.chars().all(|c| c.is_ascii_graphic()) => {
                    write!(f, "{}.{}", policy, text)
                }
                _ => write!(f, "{}.{}", policy, name),
            },
        }
    }
}

/// Renders as a flat list, e.g. `[lovelace: 2000000, <policy>.tokenX: 5]`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (asset, quantity)) in self.flatten().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", asset, quantity)?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl AddAssign<&Value> for Value {
    fn add_assign(&mut self, rhs: &Value) {
        self.lovelace += &rhs.lovelace;
        for (policy, tokens) in &rhs.assets {
            for (name, quantity) in tokens {
                self.adjust(policy, name, quantity);
            }
        }
    }
}

impl SubAssign<&Value> for Value {
    fn sub_assign(&mut self, rhs: &Value) {
        self.lovelace -= &rhs.lovelace;
        for (policy, tokens) in &rhs.assets {
            for (name, quantity) in tokens {
                self.adjust(policy, name, &-quantity);
            }
        }
    }
}

impl AddAssign for Value {
    fn add_assign(&mut self, rhs: Value) {
        *self += &rhs;
    }
}

impl SubAssign for Value {
    fn sub_assign(&mut self, rhs: Value) {
        *self -= &rhs;
    }
}

impl Add for Value {
    type Output = Value;

    fn add(mut self, rhs: Value) -> Value {
        self += &rhs;
        self
    }
}

impl Add<&Value> for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(mut self, rhs: Value) -> Value {
        self -= &rhs;
        self
    }
}

impl Sub<&Value> for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::zero() - self
    }
}

impl Sum for Value {
    fn sum<I: Iterator<Item = Value>>(iter: I) -> Self {
        iter.fold(Value::zero(), |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a Value> for Value {
    fn sum<I: Iterator<Item = &'a Value>>(iter: I) -> Self {
        iter.fold(Value::zero(), |mut acc, v| {
            acc += v;
            acc
        })
    }
}

/// Componentwise dominance. Returns `None` when neither value dominates.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let diff = self - other;
        if diff.is_zero() {
            Some(Ordering::Equal)
        } else if diff.is_non_neg() {
            Some(Ordering::Greater)
        } else if (-diff).is_non_neg() {
            Some(Ordering::Less)
        } else {
            None
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// JSON form: quantities are decimal strings so they survive any JSON reader
#[derive(Serialize, Deserialize)]
struct ValueRepr {
    #[serde(default = "zero_string")]
    lovelace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    assets: BTreeMap<PolicyId, BTreeMap<AssetName, String>>,
}

fn zero_string() -> String {
    "0".to_string()
}

fn parse_quantity(text: &str) -> Result<BigInt, ParseError> {
    BigInt::from_str(text).map_err(|_| ParseError::InvalidQuantity {
        value: text.to_string(),
    })
}

impl TryFrom<ValueRepr> for Value {
    type Error = ParseError;

    fn try_from(repr: ValueRepr) -> Result<Self, Self::Error> {
        let mut value = Value::from_lovelace(parse_quantity(&repr.lovelace)?);
        for (policy, tokens) in &repr.assets {
            for (name, quantity) in tokens {
                value.adjust(policy, name, &parse_quantity(quantity)?);
            }
        }
        Ok(value)
    }
}

impl From<Value> for ValueRepr {
    fn from(value: Value) -> Self {
        ValueRepr {
            lovelace: value.lovelace.to_string(),
            assets: value
                .assets
                .into_iter()
                .map(|(policy, tokens)| {
                    let tokens = tokens
                        .into_iter()
                        .map(|(name, quantity)| (name, quantity.to_string()))
                        .collect();
                    (policy, tokens)
                })
                .collect(),
        }
    }
}
