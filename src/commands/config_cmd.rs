use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# shoplist configuration

# Directory holding shoppingLists.json (default: platform data dir + /shoplist)
# data_dir: ~/.local/share/shoplist

# Currency prefix for printed totals
currency: "R$"

# Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
log_level: warn
"#;

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print!("{}", render_text(config)),
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = cli_config_path.unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'shoplist config show' to view current configuration.");
                    return Ok(());
                }

                write_default_config(&config_path)?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

fn render_text(config: &Config) -> String {
    let config_file = match &config.config_file {
        Some(path) => path.display().to_string(),
        None => format!("{} (not found)", Config::default_config_path().display()),
    };

    let mut out = format!("Configuration\n=============\n\nConfig file: {}\n", config_file);
    for (name, value, source) in config.entries() {
        out.push_str(&format!("\n{}: {}\n  source: {}\n", name, value, source));
    }
    out
}

fn write_default_config(config_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(config_path)?;
    file.write_all(DEFAULT_CONFIG.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.yaml");
        let config = Config::load(Some(config_path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(config_path.clone())).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(config_path)).unwrap();
        assert_eq!(loaded.currency.value, "R$");
        assert_eq!(loaded.currency.source, ConfigSource::File);
        assert_eq!(loaded.log_level.value, "warn");
        assert_eq!(loaded.data_dir.source, ConfigSource::Default);
    }

    #[test]
    fn test_render_text_lists_sources() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "currency: USD\n").unwrap();
        let config = Config::load(Some(config_path.clone())).unwrap();

        let text = render_text(&config);

        assert!(text.contains(&format!("Config file: {}", config_path.display())));
        assert!(text.contains("currency: USD\n  source: file"));
        assert!(text.contains("log_level: warn\n  source: default"));
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "currency: USD\n").unwrap();
        let config = Config::load(Some(config_path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(config_path.clone())).unwrap();

        assert_eq!(fs::read_to_string(config_path).unwrap(), "currency: USD\n");
    }
}
