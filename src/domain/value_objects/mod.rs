//! Value Objects for the catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable product identifier as issued by the remote catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(value: u64) -> Self { Self(value) }
    pub fn value(&self) -> u64 { self.0 }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { s.trim().parse().map(Self) }
}

/// Price value object. Never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() { return Err(PriceError::Negative(amount)); }
        Ok(Self(amount))
    }
    pub fn zero() -> Self { Self(Decimal::ZERO) }
    pub fn amount(&self) -> Decimal { self.0 }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self { price.0 }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "${}", self.0.normalize()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be negative, got {0}")]
    Negative(Decimal),
}

/// Label of the "no filter" sentinel in the category selector
pub const ALL_CATEGORIES: &str = "all";

/// Category selector: either the `all` sentinel or one concrete label
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Builds a selector from a label. `"all"` always means the sentinel.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_CATEGORIES { Self::All } else { Self::Named(label) }
    }

    pub fn label(&self) -> &str {
        match self { Self::All => ALL_CATEGORIES, Self::Named(label) => label }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self { Self::All => true, Self::Named(label) => label == category }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Price sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

    pub fn as_str(&self) -> &'static str {
        match self { Self::Ascending => "asc", Self::Descending => "desc" }
    }

    pub fn label(&self) -> &'static str {
        match self { Self::Ascending => "Price asc", Self::Descending => "Price desc" }
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(SortOrderError(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order `{0}`, expected asc or desc")]
pub struct SortOrderError(pub String);
