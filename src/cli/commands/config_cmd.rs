//! Configuration inspection command.

use std::path::PathBuf;

use crate::config::{self, Config, ConfigError};

/// Print the config path and effective settings; optionally write defaults
pub fn cmd_config(config: &Config, explicit_path: Option<&PathBuf>, init: bool) -> anyhow::Result<()> {
    let path = explicit_path.cloned().or_else(config::config_path).ok_or(ConfigError::NoConfigDir)?;

    println!("Config file: {}", path.display());

    if init {
        if path.exists() {
            println!("Config file already exists, leaving it untouched.");
        } else {
            config::save_to(&Config::default(), &path)?;
            println!("Wrote default configuration.");
        }
    }

    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
