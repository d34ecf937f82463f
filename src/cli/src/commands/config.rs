//! CLI configuration management.
//!
//! Settings are persisted as TOML in `~/.mykart/config.toml`. Currently the
//! only recognized key is `api-url`, which provides a default for the
//! `--api-url` flag.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use crate::output::{self, OutputFormat};

const CONFIG_DIR: &str = ".mykart";
const CONFIG_FILE: &str = "config.toml";

const KNOWN_KEYS: &[&str] = &["api-url"];

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. api-url)
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration values
    Show,

    /// Remove the configuration file
    Reset,
}

// ── Storage ─────────────────────────────────────────────────────────────────

fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn load() -> Result<BTreeMap<String, String>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let values: BTreeMap<String, String> =
        toml::from_str(&contents).with_context(|| format!("invalid TOML in {}", path.display()))?;
    Ok(values)
}

fn save(values: &BTreeMap<String, String>) -> Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(values).context("failed to serialize configuration")?;
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Read the configured API URL, if any. Errors reading the config file are
/// treated as absence so a corrupt file never blocks the CLI.
pub fn load_api_url() -> Option<String> {
    load().ok()?.get("api-url").cloned()
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(cmd: ConfigCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        ConfigCommands::Set { key, value } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                bail!("unknown configuration key `{}` (known: {})", key, KNOWN_KEYS.join(", "));
            }
            let mut values = load()?;
            values.insert(key.clone(), value.clone());
            save(&values)?;
            output::print_success(&format!("Set {} = {}", key, value));
        }

        ConfigCommands::Get { key } => {
            let values = load()?;
            match values.get(&key) {
                Some(value) => println!("{}", value),
                None => bail!("configuration key `{}` is not set", key),
            }
        }

        ConfigCommands::Show => {
            let values = load()?;
            if format.is_table() {
                if values.is_empty() {
                    output::print_info("No configuration values set");
                } else {
                    output::print_header("Configuration");
                    for (key, value) in &values {
                        output::print_detail(key, value);
                    }
                }
            } else {
                output::print_item(&values, format);
            }
        }

        ConfigCommands::Reset => {
            let path = config_path()?;
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                output::print_success("Configuration reset");
            } else {
                output::print_info("No configuration file to remove");
            }
        }
    }

    Ok(())
}
