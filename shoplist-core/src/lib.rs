//! shoplist core library
//!
//! Shopping list models, the in-memory store and its local persistence.

pub mod models;
pub mod storage;
pub mod store;

pub use models::{Item, ItemDraft, PriceType, ShoppingList};
pub use storage::{
    FileKeyValueStore, KeyValueError, KeyValueStore, ListPersistence, LoadOutcome,
    MemoryKeyValueStore, PersistenceError, SHOPPING_LISTS_KEY,
};
pub use store::{ShoppingStore, StoreError, StoreResult};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
