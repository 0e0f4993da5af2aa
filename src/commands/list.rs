//! Shopping list CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use shoplist_core::{KeyValueStore, ShoppingList, ShoppingStore};

use super::resolve::{format_money, parse_name, resolve_list, warn_not_found};
use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// Create a new empty shopping list
    Create {
        /// List name
        #[arg(value_parser = parse_name)]
        name: String,
    },

    /// Show all shopping lists with their totals
    Ls {
        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the items of a shopping list
    Show {
        /// List id, position or name
        list: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Rename a shopping list
    Rename {
        /// List id, position or name
        list: String,

        /// New name
        #[arg(value_parser = parse_name)]
        name: String,
    },

    /// Delete a shopping list and all of its items
    Delete {
        /// List id, position or name
        list: String,
    },
}

impl ListCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        store: &mut ShoppingStore<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let currency = config.currency.value.as_str();

        match &self.command {
            ListSubcommand::Create { name } => {
                let list = store.create_list(name.as_str());
                println!("Created list '{}' ({})", list.name, list.id);
                Ok(())
            }

            ListSubcommand::Ls { format } => {
                match format {
                    OutputFormat::Json => {
                        let output: Vec<_> = store.lists().iter().map(list_summary_json).collect();
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Table => {
                        if store.lists().is_empty() {
                            println!("No shopping lists.");
                            return Ok(());
                        }
                        println!("{:<4} {:<25} {:>6} {:>14}", "#", "Name", "Items", "Total");
                        println!("{}", "-".repeat(52));
                        for (idx, list) in store.lists().iter().enumerate() {
                            println!(
                                "{:<4} {:<25} {:>6} {:>14}",
                                idx + 1,
                                list.name,
                                list.items.len(),
                                format_money(currency, list.total_price())
                            );
                        }
                    }
                }
                Ok(())
            }

            ListSubcommand::Show { list, format } => {
                let Some(list_id) = resolve_list(store, list) else {
                    println!("Warning: no shopping list matches '{}'", list);
                    return Ok(());
                };
                let Some(list) = store.list(list_id) else {
                    return Ok(());
                };

                match format {
                    OutputFormat::Json => {
                        let mut output = list_summary_json(list);
                        output["items"] = serde_json::to_value(&list.items)?;
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Table => print_list(list, currency),
                }
                Ok(())
            }

            ListSubcommand::Rename { list, name } => {
                let Some(list_id) = resolve_list(store, list) else {
                    println!("Warning: no shopping list matches '{}'", list);
                    return Ok(());
                };
                match store.rename_list(list_id, name.as_str()) {
                    Ok(renamed) => println!("Renamed list to '{}'", renamed.name),
                    Err(e) => warn_not_found(e),
                }
                Ok(())
            }

            ListSubcommand::Delete { list } => {
                let Some(list_id) = resolve_list(store, list) else {
                    println!("Warning: no shopping list matches '{}'", list);
                    return Ok(());
                };
                match store.delete_list(list_id) {
                    Ok(removed) => println!(
                        "Deleted list '{}' ({} items)",
                        removed.name,
                        removed.items.len()
                    ),
                    Err(e) => warn_not_found(e),
                }
                Ok(())
            }
        }
    }
}

fn list_summary_json(list: &ShoppingList) -> serde_json::Value {
    serde_json::json!({
        "id": list.id,
        "name": list.name,
        "itemCount": list.items.len(),
        "totalPrice": list.total_price(),
        "selectedTotalPrice": list.selected_total_price(),
    })
}

/// Print a list with its items and running totals.
pub fn print_list(list: &ShoppingList, currency: &str) {
    println!("{}", list.name);
    println!("{}", "=".repeat(52));

    if list.items.is_empty() {
        println!("No items in list.");
    } else {
        for (idx, item) in list.items.iter().enumerate() {
            println!("{:>3}. {}", idx + 1, item);
        }
    }

    println!("{}", "-".repeat(52));
    println!("Total: {}", format_money(currency, list.total_price()));
    println!(
        "Selected total: {}",
        format_money(currency, list.selected_total_price())
    );
    println!(
        "{} of {} items selected",
        list.selected_count(),
        list.items.len()
    );
}
