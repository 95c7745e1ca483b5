//! Schema-driven interactive form
//!
//! Renders a [`SchemaDefinition`] as a sequence of terminal prompts and
//! collects the answers into [`FormValues`]. Existing values are offered as
//! defaults so a loaded template can be edited field by field.

use chrono::NaiveDate;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::values::FormValues;
use crate::schema::registry::{FieldKind, SchemaDefinition, SchemaField};

/// A line containing only this ends multi-line input
const END_OF_TEXT: &str = ".";

/// Entered alone, empties an optional field
const CLEAR_VALUE: &str = "-";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interactive prompts for one schema's fields
pub struct FormWizard {
    theme: ColorfulTheme,
}

impl FormWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompt for every field, starting from `current`
    pub fn run(&self, definition: &SchemaDefinition, current: &FormValues) -> Result<FormValues> {
        println!();
        println!(
            "{} {} {}",
            style("◆").cyan(),
            style(definition.display_name).bold(),
            style(definition.description).dim()
        );
        println!("{}", style("─".repeat(50)).dim());

        let mut values = current.clone();
        for field in definition.fields {
            let value = self.prompt_field(field, current.get(field.name))?;
            values.set(field.name, value);
        }

        println!();
        println!("{} Values collected!", style("✓").green());

        Ok(values)
    }

    /// Prompt for a single field, returning its new raw value
    pub fn prompt_field(&self, field: &SchemaField, current: &str) -> Result<String> {
        let prompt = format_prompt(field, current);

        match field.kind {
            FieldKind::Select => {
                let labels: Vec<&str> = field.options.iter().map(|o| o.label).collect();
                let default_idx = field
                    .options
                    .iter()
                    .position(|o| o.value == current)
                    .unwrap_or(0);

                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(&labels)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;

                Ok(field.options[selection].value.to_string())
            }

            FieldKind::TextArea => self.prompt_multiline(field, &prompt, current),

            FieldKind::Date => {
                let required = field.required;
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(format!("{} {}", prompt, style("(YYYY-MM-DD)").dim()))
                    .allow_empty(!required)
                    .validate_with(move |value: &String| -> std::result::Result<(), String> {
                        if !required && (value.is_empty() || value.trim() == CLEAR_VALUE) {
                            return Ok(());
                        }
                        parse_date(value)
                            .map(|_| ())
                            .ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
                    });
                if !current.is_empty() {
                    input = input.default(current.to_string());
                }
                let value = input.interact_text().into_diagnostic()?;
                Ok(apply_clear(field, value.trim().to_string()))
            }

            FieldKind::Text | FieldKind::Number => {
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .allow_empty(!field.required);
                if !current.is_empty() {
                    input = input.default(current.to_string());
                }
                let value = input.interact_text().into_diagnostic()?;
                Ok(apply_clear(field, value))
            }
        }
    }

    /// Read lines until a lone "." line. An immediate "." keeps the current value.
    fn prompt_multiline(&self, field: &SchemaField, prompt: &str, current: &str) -> Result<String> {
        println!();
        println!("{}", prompt);
        if !current.is_empty() {
            for line in current.lines() {
                println!("  {}", style(line).dim());
            }
            println!(
                "{}",
                style(format!("(enter '{}' alone to keep the text above)", END_OF_TEXT)).dim()
            );
        } else if let Some(example) = field.placeholder {
            for line in example.lines() {
                println!("  {}", style(line).dim());
            }
        }
        println!(
            "{}",
            style(format!("Type your text; finish with a line containing only '{}'", END_OF_TEXT)).dim()
        );

        let mut lines = Vec::new();
        loop {
            let line: String = Input::with_theme(&self.theme)
                .with_prompt("│")
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            if line.trim() == END_OF_TEXT {
                break;
            }
            lines.push(line);
        }

        if lines.is_empty() && !current.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(apply_clear(field, join_lines(&lines)))
        }
    }
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// "Label *" for required fields; filled optional fields mention how to clear them
fn format_prompt(field: &SchemaField, current: &str) -> String {
    let mut prompt = field.label.to_string();
    if field.required {
        prompt.push_str(" *");
    } else if !current.is_empty() {
        prompt.push_str(&format!(" ('{}' clears)", CLEAR_VALUE));
    }
    prompt
}

/// An optional field answered with "-" becomes empty
fn apply_clear(field: &SchemaField, value: String) -> String {
    if !field.required && value.trim() == CLEAR_VALUE {
        String::new()
    } else {
        value
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Join entered lines, dropping trailing blank lines
fn join_lines(lines: &[String]) -> String {
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    lines[..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaKind;
    use crate::schema::registry::SchemaRegistry;

    #[test]
    fn test_required_prompt_is_marked() {
        let def = SchemaRegistry::get(SchemaKind::Article);
        assert_eq!(format_prompt(def.field("headline").unwrap(), ""), "Headline *");
        assert_eq!(format_prompt(def.field("image").unwrap(), ""), "Image URL");
        assert_eq!(
            format_prompt(def.field("image").unwrap(), "https://x.test/a.jpg"),
            "Image URL ('-' clears)"
        );
    }

    #[test]
    fn test_dash_clears_only_optional_fields() {
        let def = SchemaRegistry::get(SchemaKind::LocalBusiness);
        let phone = def.field("phone").unwrap();
        let name = def.field("name").unwrap();

        assert_eq!(apply_clear(phone, "-".into()), "");
        assert_eq!(apply_clear(phone, " - ".into()), "");
        assert_eq!(apply_clear(phone, "555-1234".into()), "555-1234");
        assert_eq!(apply_clear(name, "-".into()), "-");
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date(" 2024-06-01 ").is_some());
        assert!(parse_date("2023-02-29").is_none());
        assert!(parse_date("06/01/2024").is_none());
    }

    #[test]
    fn test_join_lines_keeps_inner_blank_lines() {
        let lines: Vec<String> = ["Q: a?", "A: b.", "", "Q: c?", "A: d.", "", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(join_lines(&lines), "Q: a?\nA: b.\n\nQ: c?\nA: d.");
        assert_eq!(join_lines(&[]), "");
    }
}
