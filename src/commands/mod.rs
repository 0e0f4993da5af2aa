mod config_cmd;
mod item;
mod list;
mod resolve;

pub use config_cmd::ConfigCommand;
pub use item::ItemCommand;
pub use list::ListCommand;
