//! Shared helper functions for CLI commands

use console::style;
use miette::Result;

use crate::cli::args::FieldArgs;
use crate::core::values::FormValues;
use crate::schema::registry::SchemaDefinition;

/// Build form values from a values file, then apply `--field` overrides
pub fn collect_values(args: &FieldArgs) -> Result<FormValues> {
    let mut values = match &args.values_file {
        Some(path) => FormValues::from_file(path)?,
        None => FormValues::new(),
    };

    for assignment in &args.fields {
        values.apply_assignment(assignment)?;
    }

    Ok(values)
}

/// Warn about input the form could never have produced: unknown field
/// names and select values outside the option list. Never an error.
pub fn warn_unrecognized(definition: &SchemaDefinition, values: &FormValues) -> Vec<String> {
    let mut warnings = Vec::new();

    for (name, value) in values.iter() {
        match definition.field(name) {
            None => warnings.push(format!(
                "'{}' is not a field of {}; it will be ignored",
                name,
                definition.id()
            )),
            Some(field) if !value.is_empty() && !field.accepts_option(value) => {
                let options: Vec<_> = field.options.iter().map(|o| o.value).collect();
                warnings.push(format!(
                    "'{}' is not a listed {} option ({})",
                    value,
                    field.label.to_lowercase(),
                    options.join(", ")
                ));
            }
            Some(_) => {}
        }
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    warnings
}

/// Print validation messages the way the form showed them
pub fn print_errors(errors: &[String]) {
    eprintln!("{}", style("Please fix the following errors:").red().bold());
    for error in errors {
        eprintln!("  {} {}", style("•").red(), error);
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First line of a multi-line value, marked when more lines follow
pub fn first_line(s: &str) -> String {
    let mut lines = s.lines();
    match (lines.next(), lines.next()) {
        (Some(first), Some(_)) => format!("{} …", first),
        (Some(first), None) => first.to_string(),
        _ => String::new(),
    }
}
