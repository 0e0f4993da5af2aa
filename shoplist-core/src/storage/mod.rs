//! Local persistence for shopping lists.
//!
//! The whole list collection is stored as one JSON blob under a fixed key
//! in a key-value slot:
//! - `FileKeyValueStore` keeps each key in `<data_dir>/<key>.json`
//! - `MemoryKeyValueStore` keeps keys in a map (tests, embedders)
//!
//! `ListPersistence` owns the encoding and never fails a load: an absent
//! slot reads as no lists, a corrupt one is reported and replaced by no lists.

mod key_value;
mod persistence;

pub use key_value::{FileKeyValueStore, KeyValueError, KeyValueStore, MemoryKeyValueStore};
pub use persistence::{ListPersistence, LoadOutcome, PersistenceError, SHOPPING_LISTS_KEY};
