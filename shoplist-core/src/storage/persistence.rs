//! Whole-collection JSON save/restore under a fixed key.

use thiserror::Error;

use super::{KeyValueError, KeyValueStore};
use crate::models::ShoppingList;

/// Key under which the list collection is stored.
pub const SHOPPING_LISTS_KEY: &str = "shoppingLists";

/// Errors that can occur saving or loading the list collection.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to encode shopping lists: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode shopping lists: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Item '{name}' has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },

    #[error(transparent)]
    Storage(#[from] KeyValueError),
}

/// Result of hydrating from storage.
///
/// Loading never fails outright. `Recovered` means the stored blob could
/// not be read or decoded and an empty collection was substituted; the
/// blob itself stays in place until the next save overwrites it.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<ShoppingList>),
    Recovered { error: PersistenceError },
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }

    pub fn into_lists(self) -> Vec<ShoppingList> {
        match self {
            LoadOutcome::Loaded(lists) => lists,
            LoadOutcome::Recovered { .. } => Vec::new(),
        }
    }
}

/// Serializes the list collection into a key-value slot.
pub struct ListPersistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ListPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the full collection, replacing whatever was stored before.
    ///
    /// On an encode error nothing is written. JSON has no NaN or infinity,
    /// so those are rejected here rather than written as `null`.
    pub fn save(&mut self, lists: &[ShoppingList]) -> Result<(), PersistenceError> {
        check_finite(lists)?;
        let json = serde_json::to_string(lists).map_err(PersistenceError::Encode)?;
        self.store.set(SHOPPING_LISTS_KEY, &json)?;

        tracing::debug!("Saved {} shopping list(s)", lists.len());
        Ok(())
    }

    /// Read the full collection.
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(SHOPPING_LISTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Loaded(Vec::new()),
            Err(e) => return LoadOutcome::Recovered { error: e.into() },
        };

        match serde_json::from_str::<Vec<ShoppingList>>(&raw) {
            Ok(mut lists) => {
                for list in &mut lists {
                    list.items = std::mem::take(&mut list.items)
                        .into_iter()
                        .map(|item| item.normalize())
                        .collect();
                }
                tracing::debug!("Loaded {} shopping list(s)", lists.len());
                LoadOutcome::Loaded(lists)
            }
            Err(e) => LoadOutcome::Recovered {
                error: PersistenceError::Decode(e),
            },
        }
    }
}

fn check_finite(lists: &[ShoppingList]) -> Result<(), PersistenceError> {
    for item in lists.iter().flat_map(|l| &l.items) {
        let fields = [
            ("unitPrice", Some(item.unit_price)),
            ("quantity", Some(item.quantity)),
            ("weight", item.weight),
        ];
        if let Some((field, _)) = fields
            .into_iter()
            .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        {
            return Err(PersistenceError::NonFinite {
                name: item.name.clone(),
                field,
            });
        }
    }
    Ok(())
}
