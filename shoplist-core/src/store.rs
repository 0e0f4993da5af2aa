//! In-memory shopping list store.
//!
//! The store owns every list and every mutation. Each mutation that changes
//! state is followed by a full save of the collection; there is no dirty
//! tracking and no batching. Save failures are logged and swallowed, the
//! in-memory change stands.
//!
//! Lookups that miss return a [`StoreError`] and leave state untouched, so a
//! caller that ignores the error gets the plain no-op behavior.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Item, ItemDraft, ShoppingList};
use crate::storage::{KeyValueStore, ListPersistence, LoadOutcome, MemoryKeyValueStore};

/// Errors returned by store mutations. None of them change state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Shopping list not found: {0}")]
    ListNotFound(Uuid),

    #[error("No shopping list at position {0}")]
    ListIndexOutOfRange(usize),

    #[error("Item {item_id} not found in shopping list {list_id}")]
    ItemNotFound { list_id: Uuid, item_id: Uuid },
}

pub type StoreResult<T> = Result<T, StoreError>;

type Observer = Box<dyn FnMut(&[ShoppingList])>;

/// The root aggregate holding all shopping lists.
pub struct ShoppingStore<S: KeyValueStore> {
    lists: Vec<ShoppingList>,
    persistence: ListPersistence<S>,
    observer: Option<Observer>,
}

impl ShoppingStore<MemoryKeyValueStore> {
    /// An empty store that persists to memory only.
    pub fn in_memory() -> Self {
        Self {
            lists: Vec::new(),
            persistence: ListPersistence::new(MemoryKeyValueStore::new()),
            observer: None,
        }
    }
}

impl<S: KeyValueStore> ShoppingStore<S> {
    /// Hydrate a store from persistence.
    ///
    /// Returns true alongside the store when stored data could not be
    /// decoded and the store started empty instead.
    pub fn open(persistence: ListPersistence<S>) -> (Self, bool) {
        let outcome = persistence.load();
        let recovered = outcome.is_recovered();
        if let LoadOutcome::Recovered { error } = &outcome {
            tracing::warn!("Discarding unreadable shopping lists: {}", error);
        }

        let store = Self {
            lists: outcome.into_lists(),
            persistence,
            observer: None,
        };
        (store, recovered)
    }

    /// Register a callback run after every successful mutation.
    pub fn set_observer(&mut self, observer: impl FnMut(&[ShoppingList]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn lists(&self) -> &[ShoppingList] {
        &self.lists
    }

    pub fn list(&self, list_id: Uuid) -> Option<&ShoppingList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn persistence(&self) -> &ListPersistence<S> {
        &self.persistence
    }

    /// Total of all items in a list, `None` if the list is unknown.
    pub fn total_price(&self, list_id: Uuid) -> Option<f64> {
        self.list(list_id).map(ShoppingList::total_price)
    }

    /// Total of selected items in a list, `None` if the list is unknown.
    pub fn selected_total_price(&self, list_id: Uuid) -> Option<f64> {
        self.list(list_id).map(ShoppingList::selected_total_price)
    }

    /// Append a new empty list. The name is not validated here.
    pub fn create_list(&mut self, name: impl Into<String>) -> &ShoppingList {
        self.lists.push(ShoppingList::new(name));
        self.commit();
        let idx = self.lists.len() - 1;
        &self.lists[idx]
    }

    pub fn rename_list(
        &mut self,
        list_id: Uuid,
        name: impl Into<String>,
    ) -> StoreResult<&ShoppingList> {
        let idx = self.list_index(list_id)?;
        self.lists[idx].name = name.into();
        self.commit();
        Ok(&self.lists[idx])
    }

    /// Remove a list and all of its items.
    pub fn delete_list(&mut self, list_id: Uuid) -> StoreResult<ShoppingList> {
        let idx = self.list_index(list_id)?;
        let removed = self.lists.remove(idx);
        self.commit();
        Ok(removed)
    }

    /// Remove the list at a position.
    pub fn delete_list_at(&mut self, index: usize) -> StoreResult<ShoppingList> {
        if index >= self.lists.len() {
            return Err(StoreError::ListIndexOutOfRange(index));
        }
        let removed = self.lists.remove(index);
        self.commit();
        Ok(removed)
    }

    pub fn add_item(&mut self, list_id: Uuid, draft: ItemDraft) -> StoreResult<&Item> {
        let idx = self.list_index(list_id)?;
        self.lists[idx].items.push(Item::from_draft(draft));
        self.commit();

        let items = &self.lists[idx].items;
        Ok(&items[items.len() - 1])
    }

    pub fn delete_item(&mut self, list_id: Uuid, item_id: Uuid) -> StoreResult<Item> {
        let (list_idx, item_idx) = self.item_index(list_id, item_id)?;
        let removed = self.lists[list_idx].items.remove(item_idx);
        self.commit();
        Ok(removed)
    }

    /// Remove the items at the given offsets.
    ///
    /// Offsets past the end are skipped and duplicates count once. Returns
    /// the removed items in offset order; saves only if something was removed.
    pub fn delete_items_at(&mut self, list_id: Uuid, offsets: &[usize]) -> StoreResult<Vec<Item>> {
        let idx = self.list_index(list_id)?;
        let items = &mut self.lists[idx].items;

        let mut offsets: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|&o| o < items.len())
            .collect();
        offsets.sort_unstable();
        offsets.dedup();

        let mut removed: Vec<Item> = offsets.iter().rev().map(|&o| items.remove(o)).collect();
        removed.reverse();

        if !removed.is_empty() {
            self.commit();
        }
        Ok(removed)
    }

    /// Replace the item with the same id as `item`.
    pub fn update_item(&mut self, list_id: Uuid, item: Item) -> StoreResult<&Item> {
        let (list_idx, item_idx) = self.item_index(list_id, item.id)?;
        self.lists[list_idx].items[item_idx] = item.normalize();
        self.commit();
        Ok(&self.lists[list_idx].items[item_idx])
    }

    pub fn set_item_selected(
        &mut self,
        list_id: Uuid,
        item_id: Uuid,
        is_selected: bool,
    ) -> StoreResult<&Item> {
        let (list_idx, item_idx) = self.item_index(list_id, item_id)?;
        self.lists[list_idx].items[item_idx].is_selected = is_selected;
        self.commit();
        Ok(&self.lists[list_idx].items[item_idx])
    }

    fn list_index(&self, list_id: Uuid) -> StoreResult<usize> {
        self.lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or(StoreError::ListNotFound(list_id))
    }

    fn item_index(&self, list_id: Uuid, item_id: Uuid) -> StoreResult<(usize, usize)> {
        let list_idx = self.list_index(list_id)?;
        let item_idx = self.lists[list_idx]
            .position_of(item_id)
            .ok_or(StoreError::ItemNotFound { list_id, item_id })?;
        Ok((list_idx, item_idx))
    }

    /// Save the full collection and notify the observer.
    fn commit(&mut self) {
        if let Err(e) = self.persistence.save(&self.lists) {
            tracing::warn!("Failed to save shopping lists: {}", e);
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.lists);
        }
    }
}
