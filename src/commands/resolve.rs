//! Argument parsing and lookup helpers shared by the list and item commands.
//!
//! A reference is matched, in order, as a UUID, a 1-based position, or a
//! case-insensitive name (first match wins).

use shoplist_core::{KeyValueStore, ShoppingList, ShoppingStore, StoreError};
use uuid::Uuid;

/// clap value parser for list and item names.
pub fn parse_name(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// clap value parser for prices, quantities and weights.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{}' must be a non-negative number", s));
    }
    Ok(value)
}

pub fn resolve_list<S: KeyValueStore>(store: &ShoppingStore<S>, reference: &str) -> Option<Uuid> {
    find_by_reference(store.lists(), reference, |l| (l.id, l.name.as_str()))
}

pub fn resolve_item(list: &ShoppingList, reference: &str) -> Option<Uuid> {
    find_by_reference(&list.items, reference, |i| (i.id, i.name.as_str()))
}

fn find_by_reference<T>(
    entries: &[T],
    reference: &str,
    key: impl Fn(&T) -> (Uuid, &str),
) -> Option<Uuid> {
    let reference = reference.trim();

    if let Ok(id) = Uuid::parse_str(reference) {
        return entries.iter().map(&key).find(|(e, _)| *e == id).map(|(e, _)| e);
    }

    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|idx| entries.get(idx))
            .map(|e| key(e).0);
    }

    let lower = reference.to_lowercase();
    entries
        .iter()
        .map(&key)
        .find(|(_, name)| name.to_lowercase() == lower)
        .map(|(id, _)| id)
}

/// Format a price with the configured currency prefix.
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{} {:.2}", currency, amount)
}

/// Store lookups that miss are reported and otherwise ignored.
pub fn warn_not_found(err: StoreError) {
    tracing::debug!("Ignoring store miss: {:?}", err);
    println!("Warning: {}, nothing changed", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplist_core::ItemDraft;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("  Milk ").unwrap(), "Milk");
        assert!(parse_name("   ").is_err());
        assert!(parse_name("").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.20").unwrap(), 1.2);
        assert_eq!(parse_amount("2,5").unwrap(), 2.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_resolve_list() {
        let mut store = ShoppingStore::in_memory();
        let groceries = store.create_list("Groceries").id;
        let hardware = store.create_list("Hardware").id;

        assert_eq!(resolve_list(&store, &groceries.to_string()), Some(groceries));
        assert_eq!(resolve_list(&store, "2"), Some(hardware));
        assert_eq!(resolve_list(&store, "groceries"), Some(groceries));
        assert_eq!(resolve_list(&store, "0"), None);
        assert_eq!(resolve_list(&store, "3"), None);
        assert_eq!(resolve_list(&store, "Pharmacy"), None);
        assert_eq!(resolve_list(&store, &Uuid::new_v4().to_string()), None);
    }

    #[test]
    fn test_resolve_item() {
        let mut store = ShoppingStore::in_memory();
        let list_id = store.create_list("Groceries").id;
        let milk = store
            .add_item(list_id, ItemDraft::unit("Milk", 1.2, 2.0))
            .unwrap()
            .id;
        let list = store.list(list_id).unwrap();

        assert_eq!(resolve_item(list, "MILK"), Some(milk));
        assert_eq!(resolve_item(list, "1"), Some(milk));
        assert_eq!(resolve_item(list, &milk.to_string()), Some(milk));
        assert_eq!(resolve_item(list, "Eggs"), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("R$", 4.9), "R$ 4.90");
        assert_eq!(format_money("$", 0.0), "$ 0.00");
    }
}
