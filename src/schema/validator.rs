//! Form validation with user-facing error messages

use miette::Diagnostic;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::core::identity::SchemaKind;
use crate::core::values::FormValues;
use crate::schema::parsers::parse_faq;
use crate::schema::registry::SchemaRegistry;

static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("price pattern is valid"));

/// Validation failure carrying every message, for display through miette
#[derive(Debug, Error, Diagnostic)]
#[error("Validation failed: {summary}")]
#[diagnostic(
    code(sda::validation::failed),
    help("fix the errors above and try again")
)]
pub struct ValidationError {
    summary: String,

    #[related]
    issues: Vec<ValidationIssue>,
}

/// A single validation message
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
pub struct ValidationIssue {
    message: String,

    #[help]
    help: Option<String>,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        let count = issues.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self { summary, issues }
    }

    /// Build from a single message
    pub fn single(message: impl Into<String>) -> Self {
        Self::new(vec![ValidationIssue::new(message)])
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// The plain messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }
}

/// Ordered validation messages; empty means the values are valid
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// `Ok(())` when valid, otherwise a [`ValidationError`] with every message
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.issues))
        }
    }
}

/// Check required fields, then the one schema-specific format rule
pub fn validate(kind: SchemaKind, values: &FormValues) -> ValidationResult {
    let definition = SchemaRegistry::get(kind);
    let mut result = ValidationResult::default();

    for field in definition.required_fields() {
        if values.is_blank(field.name) {
            let mut issue = ValidationIssue::new(format!("{} is required", field.label));
            if let Some(example) = field.placeholder.and_then(|p| p.lines().next()) {
                issue = issue.with_help(format!("e.g. {}", example));
            } else if !field.options.is_empty() {
                let options: Vec<_> = field.options.iter().map(|o| o.value).collect();
                issue = issue.with_help(format!("one of: {}", options.join(", ")));
            }
            result.push(issue);
        }
    }

    if let Some(issue) = check_format(kind, values) {
        result.push(issue);
    }

    log::debug!(
        "validated {} form: {} issue(s)",
        kind,
        result.issues.len()
    );

    result
}

fn check_format(kind: SchemaKind, values: &FormValues) -> Option<ValidationIssue> {
    match kind {
        SchemaKind::Faq => {
            let text = values.non_empty("mainEntity")?;
            parse_faq(text).is_empty().then(|| {
                ValidationIssue::new("At least one valid FAQ item (Q: and A:) is required")
                    .with_help("separate items with a blank line; start lines with 'Q:' and 'A:'")
            })
        }
        SchemaKind::Product => {
            let price = values.non_empty("price")?;
            (!is_valid_price(price)).then(|| {
                ValidationIssue::new("Price must be a valid number (e.g., 29.99)")
                    .with_help("digits with at most two decimal places, no currency symbol")
            })
        }
        SchemaKind::Article => check_url(values, "image", "Image URL must be a valid URL"),
        SchemaKind::LocalBusiness => {
            check_url(values, "website", "Website URL must be a valid URL")
        }
        SchemaKind::Event => check_url(values, "url", "Event URL must be a valid URL"),
        SchemaKind::Organization => check_url(values, "url", "Website URL must be a valid URL"),
    }
}

/// Shared rule for URL fields: format is only checked when a value is present
fn check_url(values: &FormValues, field: &str, message: &str) -> Option<ValidationIssue> {
    let value = values.non_empty(field)?;
    (!is_valid_url(value)).then(|| {
        ValidationIssue::new(message).with_help("use an absolute URL such as https://example.com")
    })
}

pub fn is_valid_price(price: &str) -> bool {
    PRICE_PATTERN.is_match(price)
}

/// Well-formed absolute URL
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    fn valid_product(price: &str) -> FormValues {
        values(&[
            ("name", "Widget"),
            ("description", "A fine widget"),
            ("price", price),
            ("currency", "USD"),
            ("availability", "InStock"),
        ])
    }

    #[test]
    fn test_required_errors_in_field_order() {
        let result = validate(SchemaKind::Article, &FormValues::new());
        assert_eq!(
            result.messages(),
            [
                "Headline is required",
                "Description is required",
                "Author is required",
                "Publication Date is required",
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let result = validate(
            SchemaKind::Organization,
            &values(&[
                ("name", "   "),
                ("description", "Makers"),
                ("url", "https://acme.test"),
            ]),
        );
        assert_eq!(result.messages(), ["Organization Name is required"]);
    }

    #[test]
    fn test_price_two_decimals_ok() {
        assert!(validate(SchemaKind::Product, &valid_product("29.99")).is_valid());
        assert!(validate(SchemaKind::Product, &valid_product("5")).is_valid());
        assert!(validate(SchemaKind::Product, &valid_product("5.5")).is_valid());
    }

    #[test]
    fn test_price_three_decimals_rejected() {
        let result = validate(SchemaKind::Product, &valid_product("29.999"));
        assert_eq!(
            result.messages(),
            ["Price must be a valid number (e.g., 29.99)"]
        );
    }

    #[test]
    fn test_price_other_formats_rejected() {
        for price in ["$5", "5.", ".5", "1,000", "-3", "abc", "٢٩.٩٩", "29.٩٩"] {
            assert!(!is_valid_price(price), "{price}");
        }
    }

    #[test]
    fn test_non_ascii_digit_price_fails_validation() {
        let result = validate(SchemaKind::Product, &valid_product("٢٩.٩٩"));
        assert_eq!(
            result.messages(),
            ["Price must be a valid number (e.g., 29.99)"]
        );
    }

    #[test]
    fn test_format_error_appended_after_required() {
        let mut v = valid_product("12.345");
        v.remove("name");
        let result = validate(SchemaKind::Product, &v);
        assert_eq!(
            result.messages(),
            [
                "Product Name is required",
                "Price must be a valid number (e.g., 29.99)"
            ]
        );
    }

    #[test]
    fn test_article_image_url() {
        let result = validate(SchemaKind::Article, &values(&[("image", "not-a-url")]));
        assert_eq!(
            result.messages().last().map(String::as_str),
            Some("Image URL must be a valid URL")
        );

        // Omitted image never errors, whatever else is wrong
        let result = validate(SchemaKind::Article, &values(&[("image", "")]));
        assert!(!result
            .messages()
            .iter()
            .any(|m| m == "Image URL must be a valid URL"));
    }

    #[test]
    fn test_url_messages_per_schema() {
        let bad = |kind, field| validate(kind, &values(&[(field, "nope")])).messages();
        assert!(bad(SchemaKind::LocalBusiness, "website")
            .contains(&"Website URL must be a valid URL".to_string()));
        assert!(bad(SchemaKind::Event, "url").contains(&"Event URL must be a valid URL".to_string()));
        assert!(bad(SchemaKind::Organization, "url")
            .contains(&"Website URL must be a valid URL".to_string()));
    }

    #[test]
    fn test_faq_requires_parsable_item() {
        let result = validate(SchemaKind::Faq, &values(&[("mainEntity", "just text")]));
        assert_eq!(
            result.messages(),
            ["At least one valid FAQ item (Q: and A:) is required"]
        );

        let ok = validate(SchemaKind::Faq, &values(&[("mainEntity", "Q: a?\nA: b.")]));
        assert!(ok.is_valid());
    }

    #[test]
    fn test_faq_missing_only_reports_required() {
        let result = validate(SchemaKind::Faq, &FormValues::new());
        assert_eq!(result.messages(), ["FAQ Questions & Answers is required"]);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::default().into_result().is_ok());

        let err = validate(SchemaKind::Event, &FormValues::new())
            .into_result()
            .unwrap_err();
        assert_eq!(err.issue_count(), 4);
        assert_eq!(err.to_string(), "Validation failed: 4 errors");
    }

    #[test]
    fn test_url_rule() {
        assert!(is_valid_url("https://example.com/image.jpg"));
        assert!(is_valid_url("mailto:hello@example.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("not-a-url"));
    }
}
