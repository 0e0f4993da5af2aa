mod item;
mod price_type;
mod shopping_list;

pub use item::{Item, ItemDraft};
pub use price_type::PriceType;
pub use shopping_list::ShoppingList;
