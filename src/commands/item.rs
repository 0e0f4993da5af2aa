//! Item CLI commands.
//!
//! Add, edit, remove and select items within a shopping list.

use clap::{Args, Subcommand, ValueEnum};
use shoplist_core::{ItemDraft, KeyValueStore, PriceType, ShoppingStore};
use uuid::Uuid;

use super::resolve::{
    format_money, parse_amount, parse_name, resolve_item, resolve_list, warn_not_found,
};
use crate::config::Config;

#[derive(Clone, Copy, ValueEnum)]
pub enum PriceKind {
    /// Priced per unit, times quantity
    Unit,
    /// Priced per kilogram, times weight in grams
    Weight,
}

impl From<PriceKind> for PriceType {
    fn from(kind: PriceKind) -> Self {
        match kind {
            PriceKind::Unit => PriceType::Unit,
            PriceKind::Weight => PriceType::Weight,
        }
    }
}

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Add an item to a shopping list
    Add {
        /// List id, position or name
        list: String,

        /// Item name
        #[arg(value_parser = parse_name)]
        name: String,

        /// Price per unit, or per kilogram for weight-priced items
        #[arg(long, short, value_parser = parse_amount)]
        price: f64,

        /// Price type (defaults to weight when --weight is given, else unit)
        #[arg(long = "type", short = 't', value_enum)]
        price_type: Option<PriceKind>,

        /// Quantity for unit-priced items
        #[arg(long, short, value_parser = parse_amount)]
        qty: Option<f64>,

        /// Weight in grams for weight-priced items
        #[arg(long, short, value_parser = parse_amount)]
        weight: Option<f64>,
    },

    /// Edit an existing item
    Update {
        /// List id, position or name
        list: String,

        /// Item id, position or name
        item: String,

        /// New name
        #[arg(long, short, value_parser = parse_name)]
        name: Option<String>,

        /// New price
        #[arg(long, short, value_parser = parse_amount)]
        price: Option<f64>,

        /// New price type
        #[arg(long = "type", short = 't', value_enum)]
        price_type: Option<PriceKind>,

        /// New quantity
        #[arg(long, short, value_parser = parse_amount)]
        qty: Option<f64>,

        /// New weight in grams
        #[arg(long, short, value_parser = parse_amount)]
        weight: Option<f64>,
    },

    /// Remove an item from a shopping list
    Remove {
        /// List id, position or name
        list: String,

        /// Item id, position or name
        item: String,
    },

    /// Mark an item as selected
    Select {
        /// List id, position or name
        list: String,

        /// Item id, position or name
        item: String,
    },

    /// Clear the selection mark on an item
    Unselect {
        /// List id, position or name
        list: String,

        /// Item id, position or name
        item: String,
    },
}

impl ItemCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        store: &mut ShoppingStore<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let currency = config.currency.value.as_str();

        match &self.command {
            ItemSubcommand::Add {
                list,
                name,
                price,
                price_type,
                qty,
                weight,
            } => {
                let Some(list_id) = lookup_list(store, list) else {
                    return Ok(());
                };

                let kind = price_type.map(PriceType::from).unwrap_or(if weight.is_some() {
                    PriceType::Weight
                } else {
                    PriceType::Unit
                });
                let draft = match kind {
                    PriceType::Unit => {
                        if weight.is_some() {
                            println!("Warning: ignoring --weight for a unit-priced item");
                        }
                        ItemDraft::unit(name.as_str(), *price, qty.unwrap_or(1.0))
                    }
                    PriceType::Weight => {
                        if qty.is_some() {
                            println!("Warning: ignoring --qty for a weight-priced item");
                        }
                        ItemDraft::weight(name.as_str(), *price, *weight)
                    }
                };

                match store.add_item(list_id, draft) {
                    Ok(item) => println!(
                        "Added '{}' ({})",
                        item.name,
                        format_money(currency, item.total_price())
                    ),
                    Err(e) => warn_not_found(e),
                }
                print_totals(store, list_id, currency);
                Ok(())
            }

            ItemSubcommand::Update {
                list,
                item,
                name,
                price,
                price_type,
                qty,
                weight,
            } => {
                let Some((list_id, item_id)) = lookup_item(store, list, item) else {
                    return Ok(());
                };
                let Some(mut updated) = store
                    .list(list_id)
                    .and_then(|l| l.find_item(item_id))
                    .cloned()
                else {
                    return Ok(());
                };

                if let Some(name) = name {
                    updated.name = name.clone();
                }
                if let Some(price) = price {
                    updated.unit_price = *price;
                }
                if let Some(kind) = price_type {
                    updated.price_type = (*kind).into();
                }
                if let Some(qty) = qty {
                    updated.quantity = *qty;
                }
                if let Some(weight) = weight {
                    if updated.price_type == PriceType::Unit {
                        println!("Warning: ignoring --weight for a unit-priced item");
                    }
                    updated.weight = Some(*weight);
                }

                match store.update_item(list_id, updated) {
                    Ok(item) => println!(
                        "Updated '{}' ({})",
                        item.name,
                        format_money(currency, item.total_price())
                    ),
                    Err(e) => warn_not_found(e),
                }
                print_totals(store, list_id, currency);
                Ok(())
            }

            ItemSubcommand::Remove { list, item } => {
                let Some((list_id, item_id)) = lookup_item(store, list, item) else {
                    return Ok(());
                };
                match store.delete_item(list_id, item_id) {
                    Ok(removed) => println!("Removed '{}'", removed.name),
                    Err(e) => warn_not_found(e),
                }
                print_totals(store, list_id, currency);
                Ok(())
            }

            ItemSubcommand::Select { list, item } => {
                set_selected(store, list, item, true, currency);
                Ok(())
            }

            ItemSubcommand::Unselect { list, item } => {
                set_selected(store, list, item, false, currency);
                Ok(())
            }
        }
    }
}

fn set_selected<S: KeyValueStore>(
    store: &mut ShoppingStore<S>,
    list: &str,
    item: &str,
    is_selected: bool,
    currency: &str,
) {
    let Some((list_id, item_id)) = lookup_item(store, list, item) else {
        return;
    };
    match store.set_item_selected(list_id, item_id, is_selected) {
        Ok(item) if is_selected => println!("Selected '{}'", item.name),
        Ok(item) => println!("Unselected '{}'", item.name),
        Err(e) => warn_not_found(e),
    }
    print_totals(store, list_id, currency);
}

fn lookup_list<S: KeyValueStore>(store: &ShoppingStore<S>, list: &str) -> Option<Uuid> {
    let found = resolve_list(store, list);
    if found.is_none() {
        println!("Warning: no shopping list matches '{}'", list);
    }
    found
}

fn lookup_item<S: KeyValueStore>(
    store: &ShoppingStore<S>,
    list: &str,
    item: &str,
) -> Option<(Uuid, Uuid)> {
    let list_id = lookup_list(store, list)?;
    let shopping_list = store.list(list_id)?;
    match resolve_item(shopping_list, item) {
        Some(item_id) => Some((list_id, item_id)),
        None => {
            println!(
                "Warning: no item matches '{}' in '{}'",
                item, shopping_list.name
            );
            None
        }
    }
}

fn print_totals<S: KeyValueStore>(store: &ShoppingStore<S>, list_id: Uuid, currency: &str) {
    if let (Some(total), Some(selected)) = (
        store.total_price(list_id),
        store.selected_total_price(list_id),
    ) {
        println!(
            "Total: {}  Selected total: {}",
            format_money(currency, total),
            format_money(currency, selected)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: ItemSubcommand,
    }

    fn run(store: &mut ShoppingStore<impl KeyValueStore>, args: &[&str]) {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("config.yaml"))).unwrap();
        let mut argv = vec!["item"];
        argv.extend_from_slice(args);
        let cli = TestCli::try_parse_from(argv).unwrap();
        ItemCommand {
            command: cli.command,
        }
        .run(store, &config)
        .unwrap();
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn groceries() -> (ShoppingStore<shoplist_core::MemoryKeyValueStore>, Uuid) {
        let mut store = ShoppingStore::in_memory();
        let list_id = store.create_list("Groceries").id;
        (store, list_id)
    }

    #[test]
    fn test_add_unit_and_weight_items() {
        let (mut store, list_id) = groceries();

        run(&mut store, &["add", "Groceries", "Milk", "--price", "1.20", "--qty", "2"]);
        run(&mut store, &["add", "Groceries", "Cheese", "-p", "10", "-w", "250"]);

        let list = store.list(list_id).unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].price_type, PriceType::Unit);
        assert_eq!(list.items[1].price_type, PriceType::Weight);
        assert_eq!(list.items[1].weight, Some(250.0));
        assert!(approx(list.total_price(), 4.90));
    }

    #[test]
    fn test_add_explicit_unit_ignores_weight() {
        let (mut store, list_id) = groceries();

        run(
            &mut store,
            &["add", "1", "Bread", "-p", "3", "--type", "unit", "-w", "400"],
        );

        let item = &store.list(list_id).unwrap().items[0];
        assert_eq!(item.price_type, PriceType::Unit);
        assert!(item.weight.is_none());
        assert_eq!(item.quantity, 1.0);
    }

    #[test]
    fn test_add_weight_item_ignores_qty() {
        let (mut store, list_id) = groceries();

        run(
            &mut store,
            &["add", "1", "Cheese", "-p", "10", "-w", "250", "--qty", "3"],
        );

        let item = &store.list(list_id).unwrap().items[0];
        assert_eq!(item.price_type, PriceType::Weight);
        assert_eq!(item.quantity, 1.0);
        assert!(approx(item.total_price(), 2.50));
    }

    #[test]
    fn test_add_to_unknown_list_is_noop() {
        let (mut store, _) = groceries();
        let before = store.lists().to_vec();

        run(&mut store, &["add", "Pharmacy", "Soap", "-p", "2"]);

        assert_eq!(store.lists(), before.as_slice());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let result = TestCli::try_parse_from(["item", "add", "1", "Milk", "-p", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_switch_to_unit_clears_weight() {
        let (mut store, list_id) = groceries();
        run(&mut store, &["add", "1", "Cheese", "-p", "10", "-w", "250"]);

        run(&mut store, &["update", "1", "cheese", "--type", "unit", "--qty", "3"]);

        let item = &store.list(list_id).unwrap().items[0];
        assert_eq!(item.price_type, PriceType::Unit);
        assert!(item.weight.is_none());
        assert!(approx(item.total_price(), 30.0));
    }

    #[test]
    fn test_update_name_and_price() {
        let (mut store, list_id) = groceries();
        run(&mut store, &["add", "1", "Milk", "-p", "1"]);

        run(&mut store, &["update", "1", "1", "--name", "Oat milk", "--price", "2.5"]);

        let item = &store.list(list_id).unwrap().items[0];
        assert_eq!(item.name, "Oat milk");
        assert_eq!(item.unit_price, 2.5);
    }

    #[test]
    fn test_select_and_remove() {
        let (mut store, list_id) = groceries();
        run(&mut store, &["add", "1", "Milk", "-p", "1.20", "-q", "2"]);
        run(&mut store, &["add", "1", "Cheese", "-p", "10", "-w", "250"]);

        run(&mut store, &["select", "1", "Milk"]);
        assert!(approx(store.selected_total_price(list_id).unwrap(), 2.40));

        run(&mut store, &["unselect", "1", "Milk"]);
        assert_eq!(store.selected_total_price(list_id).unwrap(), 0.0);

        run(&mut store, &["remove", "1", "Milk"]);
        run(&mut store, &["remove", "1", "Milk"]);
        let list = store.list(list_id).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].name, "Cheese");
        assert!(approx(list.total_price(), 2.50));
    }
}
