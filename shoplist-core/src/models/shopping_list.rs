//! Named shopping lists.
//!
//! A list owns its items in insertion order. Totals are computed from the
//! items on every read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Item;

/// A named, ordered collection of items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingList {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ShoppingList {
    /// Create a new empty list with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Sum of all item totals.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(Item::total_price).sum()
    }

    /// Sum of the totals of selected items only.
    pub fn selected_total_price(&self) -> f64 {
        self.items
            .iter()
            .filter(|i| i.is_selected)
            .map(Item::total_price)
            .sum()
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_selected).count()
    }

    /// Find an item by id.
    pub fn find_item(&self, item_id: Uuid) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub(crate) fn position_of(&self, item_id: Uuid) -> Option<usize> {
        self.items.iter().position(|i| i.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDraft;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_shopping_list_new() {
        let list = ShoppingList::new("Groceries");
        assert_eq!(list.name, "Groceries");
        assert!(list.items.is_empty());
        assert_eq!(list.total_price(), 0.0);
        assert_eq!(list.selected_total_price(), 0.0);
    }

    #[test]
    fn test_totals() {
        let mut list = ShoppingList::new("Groceries");
        list.items
            .push(Item::from_draft(ItemDraft::unit("Milk", 1.20, 2.0).selected(true)));
        list.items
            .push(Item::from_draft(ItemDraft::weight("Cheese", 10.0, Some(250.0))));

        assert!(approx(list.total_price(), 4.90));
        assert!(approx(list.selected_total_price(), 2.40));
        assert_eq!(list.selected_count(), 1);
    }

    #[test]
    fn test_totals_follow_edits() {
        let mut list = ShoppingList::new("Groceries");
        list.items
            .push(Item::from_draft(ItemDraft::unit("Eggs", 0.5, 12.0)));
        assert!(approx(list.total_price(), 6.0));

        list.items[0].quantity = 6.0;
        assert!(approx(list.total_price(), 3.0));
    }

    #[test]
    fn test_find_item() {
        let mut list = ShoppingList::new("Groceries");
        let item = Item::from_draft(ItemDraft::unit("Milk", 1.0, 1.0));
        let id = item.id;
        list.items.push(item);

        assert_eq!(list.find_item(id).map(|i| i.name.as_str()), Some("Milk"));
        assert!(list.find_item(Uuid::new_v4()).is_none());
        assert_eq!(list.position_of(id), Some(0));
    }

    #[test]
    fn test_shopping_list_json_shape() {
        let mut list = ShoppingList::new("Groceries");
        list.items
            .push(Item::from_draft(ItemDraft::unit("Milk", 1.0, 1.0)));

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["name"], "Groceries");
        assert_eq!(value["id"], list.id.to_string());
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }
}
