use crate::config_manager::{Config, KNOWN_KEYS};
use crate::logger;
use crate::GlobalOpts;
use anyhow::{bail, Context};
use clap::Subcommand;
use colored::Colorize;
use std::fs;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set a configuration value (resources-path, library-path, locale)
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, later runs read the configuration from there.
    /// If omitted, the CLI prints the current configuration file path.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> anyhow::Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => show(opts),
        ConfigAction::Set { key, value } => set(&key, value),
        ConfigAction::Path { new_path } => path(new_path),
    }
}

fn show(opts: &GlobalOpts) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    println!("{}", "Configuration:".bold().green());
    if config.is_empty() {
        if opts.verbosity_level() > 0 {
            println!("  {}", "(empty)".yellow());
        }
    } else {
        for (key, value) in config.values_iter() {
            println!("  {}: {}", key.cyan(), value);
        }
    }
    Ok(())
}

fn set(key: &str, value: String) -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load config")?;
    if !config.set(key, value.clone()) {
        bail!(
            "Unknown config key: {}. Currently supported keys: {}",
            key,
            KNOWN_KEYS.join(", ")
        );
    }
    config.save().context("Failed to save config")?;
    logger::success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn path(new_path: Option<String>) -> anyhow::Result<()> {
    let config_path = Config::path();
    logger::debug(&format!("Reading config from: {}", config_path.display()));

    let pointer_path = Config::pointer_path().context("Failed to locate config directory")?;

    match new_path {
        Some(p) => {
            if let Some(parent) = pointer_path.parent() {
                fs::create_dir_all(parent).context("Failed to set config path")?;
            }
            fs::write(&pointer_path, p.as_bytes()).context("Failed to set config path")?;
            logger::success(&format!("Config path set to {}", p));
        }
        None => {
            println!("{}", config_path.display());

            if let Ok(contents) = fs::read_to_string(&pointer_path) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    println!("{} {}", "overridden-by".cyan(), trimmed);
                }
            }
        }
    }
    Ok(())
}
