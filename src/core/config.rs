//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::identity::SchemaKind;

/// Valid configuration keys with descriptions
pub const VALID_KEYS: &[(&str, &str)] = &[
    ("default_schema", "Schema type preselected in `sda session`"),
    ("output_dir", "Directory for downloaded schema files"),
    ("clipboard_command", "Command that receives copied markup on stdin"),
    ("default_format", "Default output format for `sda generate` (json, html)"),
];

/// SDA configuration with layered hierarchy
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema type selected when a session starts
    pub default_schema: Option<String>,

    /// Where downloads are written
    pub output_dir: Option<PathBuf>,

    /// Clipboard command, e.g. "xclip -selection clipboard"
    pub clipboard_command: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sda/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match std::fs::read_to_string(&global_path) {
                    Ok(contents) => match serde_yml::from_str::<Config>(&contents) {
                        Ok(global) => config.merge(global),
                        Err(e) => log::warn!("ignoring {}: {}", global_path.display(), e),
                    },
                    Err(e) => log::warn!("cannot read {}: {}", global_path.display(), e),
                }
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env());

        config
    }

    fn from_env() -> Self {
        Config {
            default_schema: std::env::var("SDA_DEFAULT_SCHEMA").ok(),
            output_dir: std::env::var_os("SDA_OUTPUT_DIR").map(PathBuf::from),
            clipboard_command: std::env::var("SDA_CLIPBOARD").ok(),
            default_format: None,
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sda")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_schema.is_some() {
            self.default_schema = other.default_schema;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.clipboard_command.is_some() {
            self.clipboard_command = other.clipboard_command;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Configured default schema, falling back to FAQ when unset or unknown
    pub fn default_schema(&self) -> SchemaKind {
        match self.default_schema.as_deref().map(str::parse::<SchemaKind>) {
            Some(Ok(kind)) => kind,
            Some(Err(e)) => {
                log::warn!("{}; using faq", e);
                SchemaKind::default()
            }
            None => SchemaKind::default(),
        }
    }

    /// Download directory, defaulting to the current directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Value of a key as text, for `sda config show <key>`
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_schema" => self.default_schema.clone(),
            "output_dir" => self
                .output_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            "clipboard_command" => self.clipboard_command.clone(),
            "default_format" => self.default_format.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            default_schema: Some("faq".into()),
            output_dir: Some(PathBuf::from("/tmp/a")),
            ..Config::default()
        };
        base.merge(Config {
            output_dir: Some(PathBuf::from("/tmp/b")),
            clipboard_command: Some("pbcopy".into()),
            ..Config::default()
        });

        assert_eq!(base.default_schema.as_deref(), Some("faq"));
        assert_eq!(base.output_dir(), PathBuf::from("/tmp/b"));
        assert_eq!(base.get("clipboard_command").as_deref(), Some("pbcopy"));
    }

    #[test]
    fn test_default_schema_fallback() {
        let config = Config {
            default_schema: Some("product".into()),
            ..Config::default()
        };
        assert_eq!(config.default_schema(), SchemaKind::Product);

        let config = Config {
            default_schema: Some("recipe".into()),
            ..Config::default()
        };
        assert_eq!(config.default_schema(), SchemaKind::Faq);
        assert_eq!(Config::default().default_schema(), SchemaKind::Faq);
    }

    #[test]
    fn test_parse_yaml() {
        let config: Config =
            serde_yml::from_str("output_dir: ./out\nclipboard_command: wl-copy\n").unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("./out"));
        assert_eq!(config.clipboard_command.as_deref(), Some("wl-copy"));
        assert!(config.get("unknown").is_none());
    }
}
