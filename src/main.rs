use clap::{Parser, Subcommand};
use shoplist_core::{FileKeyValueStore, ListPersistence, ShoppingStore};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod commands;
mod config;

use commands::{ConfigCommand, ItemCommand, ListCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(version)]
#[command(about = "A shopping list CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage shopping lists
    List(ListCommand),

    /// Manage items within a shopping list
    Item(ItemCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for init command
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;

    init_tracing(&config.log_level.value);

    match cli.command {
        Some(Commands::List(cmd)) => {
            let mut store = open_store(&config);
            cmd.run(&mut store, &config)?;
        }
        Some(Commands::Item(cmd)) => {
            let mut store = open_store(&config);
            cmd.run(&mut store, &config)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG takes precedence over the configured level.
fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_store(config: &Config) -> ShoppingStore<FileKeyValueStore> {
    let kv = FileKeyValueStore::new(config.data_dir.value.clone());
    tracing::debug!("Data directory: {}", kv.data_dir().display());

    let (store, recovered) = ShoppingStore::open(ListPersistence::new(kv));
    if recovered {
        eprintln!("Warning: stored shopping lists could not be read; starting empty");
    }
    store
}
