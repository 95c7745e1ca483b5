//! Form values - the raw field-name to string mapping a form produces

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raw form input keyed by field name. An absent key reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ValuesError {
    #[error("invalid field assignment: '{0}'")]
    #[diagnostic(
        code(sda::values::assignment),
        help("use NAME=VALUE, e.g. --field headline=\"Hello world\"")
    )]
    InvalidAssignment(String),

    #[error("failed to read values file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse values file {path}: {message}")]
    #[diagnostic(code(sda::values::parse))]
    Parse { path: PathBuf, message: String },

    #[error("values file {0} must contain a mapping of field names to values")]
    #[diagnostic(code(sda::values::shape))]
    NotAMapping(PathBuf),

    #[error("field '{key}' in {path} is an unquoted number")]
    #[diagnostic(
        code(sda::values::number),
        help("quote the value so it is kept exactly as written, e.g. {key}: \"10.50\"")
    )]
    UnquotedNumber { path: PathBuf, key: String },

    #[error("field '{key}' in {path} must be a plain value, not a list or mapping")]
    #[diagnostic(
        code(sda::values::nested),
        help("multi-line fields are written as a single string with line breaks")
    )]
    NestedValue { path: PathBuf, key: String },
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field, or "" when absent
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when the raw value is absent or the empty string
    pub fn is_empty_field(&self, name: &str) -> bool {
        self.get(name).is_empty()
    }

    /// True when the value is absent or only whitespace
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).trim().is_empty()
    }

    /// The raw value when it is non-empty
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        let value = self.get(name);
        (!value.is_empty()).then_some(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply a `NAME=VALUE` assignment, splitting on the first '='
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), ValuesError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| ValuesError::InvalidAssignment(assignment.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValuesError::InvalidAssignment(assignment.to_string()));
        }

        self.set(name, value);
        Ok(())
    }

    /// Load values from a JSON or YAML file (chosen by extension, YAML otherwise)
    pub fn from_file(path: &Path) -> Result<Self, ValuesError> {
        let content = std::fs::read_to_string(path).map_err(|source| ValuesError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let parsed: Value = if is_json {
            serde_json::from_str(&content).map_err(|e| ValuesError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yml::from_str(&content).map_err(|e| ValuesError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Self::from_json(parsed, path)
    }

    fn from_json(value: Value, path: &Path) -> Result<Self, ValuesError> {
        let Value::Object(map) = value else {
            return Err(ValuesError::NotAMapping(path.to_path_buf()));
        };

        let mut values = FormValues::new();
        for (key, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                // Numbers lose their written form (10.50 reads back as 10.5)
                Value::Number(_) => {
                    return Err(ValuesError::UnquotedNumber {
                        path: path.to_path_buf(),
                        key,
                    })
                }
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ValuesError::NestedValue {
                        path: path.to_path_buf(),
                        key,
                    })
                }
            };
            values.set(key, text);
        }

        Ok(values)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}
