use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an item's price is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// `unit_price` per unit, multiplied by `quantity`.
    #[default]
    Unit,
    /// `unit_price` per kilogram, multiplied by `weight` in grams / 1000.
    Weight,
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceType::Unit => write!(f, "unit"),
            PriceType::Weight => write!(f, "weight"),
        }
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(PriceType::Unit),
            "weight" => Ok(PriceType::Weight),
            _ => Err(format!(
                "Invalid price type '{}'. Valid options: unit, weight",
                s
            )),
        }
    }
}
