//! Shopping list items.
//!
//! An item is either priced per unit (`unit_price * quantity`) or by weight
//! (`unit_price` per kilogram, `weight` in grams). A unit-priced item never
//! carries a weight: every constructor and [`Item::normalize`] clear it.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::PriceType;

fn default_quantity() -> f64 {
    1.0
}

/// A single purchasable entry in a shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price_type: PriceType,
    pub unit_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Grams. Only meaningful for weight-priced items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_selected: bool,
}

impl Item {
    /// Build an item from caller-supplied fields with a fresh id.
    pub fn from_draft(draft: ItemDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            price_type: draft.price_type,
            unit_price: draft.unit_price,
            quantity: draft.quantity,
            weight: draft.weight,
            is_selected: draft.is_selected,
        }
        .normalize()
    }

    /// Enforce the price type / weight co-constraint.
    pub fn normalize(mut self) -> Self {
        if self.price_type == PriceType::Unit {
            self.weight = None;
        }
        self
    }

    /// Price of this item given its current fields. Never cached.
    pub fn total_price(&self) -> f64 {
        match self.price_type {
            PriceType::Unit => self.unit_price * self.quantity,
            PriceType::Weight => self.unit_price * self.weight.unwrap_or(0.0) / 1000.0,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_selected { "[x]" } else { "[ ]" };
        match self.price_type {
            PriceType::Unit => write!(
                f,
                "{} {:<25} {} x {:.2} = {:.2}",
                check,
                self.name,
                format_amount(self.quantity),
                self.unit_price,
                self.total_price()
            ),
            PriceType::Weight => write!(
                f,
                "{} {:<25} {} g @ {:.2}/kg = {:.2}",
                check,
                self.name,
                format_amount(self.weight.unwrap_or(0.0)),
                self.unit_price,
                self.total_price()
            ),
        }
    }
}

/// Format an amount, removing unnecessary decimal places.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.1}", amount)
    }
}

/// Fields for a new item, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub price_type: PriceType,
    pub unit_price: f64,
    pub quantity: f64,
    pub weight: Option<f64>,
    pub is_selected: bool,
}

impl ItemDraft {
    /// A unit-priced draft.
    pub fn unit(name: impl Into<String>, unit_price: f64, quantity: f64) -> Self {
        Self {
            name: name.into(),
            price_type: PriceType::Unit,
            unit_price,
            quantity,
            weight: None,
            is_selected: false,
        }
    }

    /// A weight-priced draft. `unit_price` is per kilogram, `grams` may be unknown.
    pub fn weight(name: impl Into<String>, unit_price: f64, grams: Option<f64>) -> Self {
        Self {
            name: name.into(),
            price_type: PriceType::Weight,
            unit_price,
            quantity: default_quantity(),
            weight: grams,
            is_selected: false,
        }
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}
