//! `sda config` command - Configuration management
//!
//! Reads and writes the global config file. Environment variables still
//! override whatever is stored there.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::config::VALID_KEYS;
use crate::core::{Config, SchemaKind};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show the path to the configuration file
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., default_schema, output_dir)
    pub key: String,

    /// Value to set
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        check_key(key)?;
        return match config.get(key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();

    for (key, _) in VALID_KEYS {
        print_config_value(key, config.get(key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (SDA_DEFAULT_SCHEMA, SDA_OUTPUT_DIR, SDA_CLIPBOARD)");
    println!("  2. Global config (~/.config/sda/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    check_value(&args.key, &args.value)?;

    let config_path = get_global_config_path()?;
    let mut config_map = read_config_map(&config_path)?;

    if let serde_yml::Value::Mapping(map) = &mut config_map {
        map.insert(
            serde_yml::Value::String(args.key.clone()),
            serde_yml::Value::String(args.value.clone()),
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;
    log::debug!("wrote {}", config_path.display());

    if !global.quiet {
        println!(
            "{} Set {} {} {}",
            style("✓").green(),
            style(&args.key).cyan(),
            style("→").dim(),
            style(&args.value).yellow()
        );
    }

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;

    let config_path = get_global_config_path()?;
    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_config_map(&config_path)?;
    let removed = match &mut config_map {
        serde_yml::Value::Mapping(map) => map
            .remove(&serde_yml::Value::String(args.key.clone()))
            .is_some(),
        _ => false,
    };

    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Removed {} from config",
            style("✓").green(),
            style(&args.key).cyan()
        );
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let path = get_global_config_path()?;
    println!("{}", path.display());
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'sda config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn get_global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

/// Existing config as a YAML mapping; empty when the file is missing or blank
fn read_config_map(path: &Path) -> Result<serde_yml::Value> {
    if !path.exists() {
        return Ok(serde_yml::Value::Mapping(Default::default()));
    }

    let content = fs::read_to_string(path).into_diagnostic()?;
    let parsed: serde_yml::Value =
        serde_yml::from_str(&content).unwrap_or(serde_yml::Value::Mapping(Default::default()));
    if parsed.is_mapping() {
        Ok(parsed)
    } else {
        Ok(serde_yml::Value::Mapping(Default::default()))
    }
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        return Ok(());
    }
    let keys: Vec<_> = VALID_KEYS.iter().map(|(k, _)| *k).collect();
    Err(miette::miette!(
        help = format!("valid keys: {}", keys.join(", ")),
        "Unknown configuration key '{}'",
        key
    ))
}

fn check_value(key: &str, value: &str) -> Result<()> {
    match key {
        "default_schema" => {
            value.parse::<SchemaKind>()?;
        }
        "default_format" if value != "json" && value != "html" => {
            return Err(miette::miette!(
                "default_format must be 'json' or 'html', got '{}'",
                value
            ));
        }
        _ => {}
    }
    Ok(())
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("output_dir").is_ok());
        assert!(check_key("author").is_err());
    }

    #[test]
    fn test_check_value() {
        assert!(check_value("default_schema", "localbusiness").is_ok());
        assert!(check_value("default_schema", "recipe").is_err());
        assert!(check_value("default_format", "html").is_ok());
        assert!(check_value("default_format", "yaml").is_err());
        assert!(check_value("output_dir", "anything").is_ok());
    }

    #[test]
    fn test_read_config_map_tolerates_missing_and_blank() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        assert!(read_config_map(&path).unwrap().is_mapping());

        fs::write(&path, "").unwrap();
        assert!(read_config_map(&path).unwrap().is_mapping());

        fs::write(&path, "output_dir: ./out\n").unwrap();
        let map = read_config_map(&path).unwrap();
        assert_eq!(map.get("output_dir").and_then(|v| v.as_str()), Some("./out"));
    }
}
