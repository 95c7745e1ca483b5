//! JSON-LD document generation

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::core::identity::SchemaKind;
use crate::core::values::FormValues;
use crate::schema::parsers::{parse_address, parse_contact_points, parse_faq, parse_hours};
use crate::schema::validator::{validate, ValidationError};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// A generated JSON-LD object. Always carries `@context` and `@type` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonLdDocument(Map<String, Value>);

impl JsonLdDocument {
    fn new(kind: SchemaKind) -> Self {
        let mut map = Map::new();
        map.insert("@context".into(), json!(SCHEMA_CONTEXT));
        map.insert("@type".into(), json!(kind.json_ld_type()));
        Self(map)
    }

    fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// Insert a string copied verbatim from the form
    fn insert_text(&mut self, key: &str, value: &str) {
        self.insert(key, json!(value));
    }

    /// Insert a string only when the form value is non-empty
    fn insert_optional(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.insert_text(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn json_ld_type(&self) -> Option<&str> {
        self.0.get("@type").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_pretty_json(&self) -> String {
        self.to_string()
    }

    /// Parse a previously serialized document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl fmt::Display for JsonLdDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Build the JSON-LD document for already-validated values.
///
/// Callers must run [`validate`] first; invalid input yields an incomplete
/// document rather than an error.
pub fn generate(kind: SchemaKind, values: &FormValues) -> JsonLdDocument {
    let mut doc = JsonLdDocument::new(kind);

    match kind {
        SchemaKind::Faq => {
            let items: Vec<Value> = parse_faq(values.get("mainEntity"))
                .iter()
                .map(|item| item.to_json_ld())
                .collect();
            doc.insert("mainEntity", Value::Array(items));
        }

        SchemaKind::Article => {
            doc.insert_text("headline", values.get("headline"));
            doc.insert_text("description", values.get("description"));
            doc.insert(
                "author",
                json!({
                    "@type": "Person",
                    "name": values.get("author"),
                }),
            );
            doc.insert_text("datePublished", values.get("datePublished"));
            doc.insert_optional("image", values.get("image"));
        }

        SchemaKind::LocalBusiness => {
            doc.insert_text("name", values.get("name"));
            doc.insert_text("description", values.get("description"));
            doc.insert("address", parse_address(values.get("address")).to_json_ld());
            doc.insert_optional("telephone", values.get("phone"));
            doc.insert_optional("url", values.get("website"));
            if let Some(hours) = values.non_empty("hours") {
                doc.insert("openingHours", json!(parse_hours(hours)));
            }
        }

        SchemaKind::Event => {
            doc.insert_text("name", values.get("name"));
            doc.insert_text("description", values.get("description"));
            doc.insert_text("startDate", values.get("startDate"));
            doc.insert_optional("endDate", values.get("endDate"));
            doc.insert(
                "location",
                json!({
                    "@type": "Place",
                    "name": values.get("location"),
                }),
            );
            doc.insert_optional("url", values.get("url"));
        }

        SchemaKind::Product => {
            doc.insert_text("name", values.get("name"));
            doc.insert_text("description", values.get("description"));
            doc.insert(
                "offers",
                json!({
                    "@type": "Offer",
                    "price": values.get("price"),
                    "priceCurrency": values.get("currency"),
                    "availability": format!("https://schema.org/{}", values.get("availability")),
                }),
            );
            doc.insert_optional("image", values.get("image"));
        }

        SchemaKind::Organization => {
            doc.insert_text("name", values.get("name"));
            doc.insert_text("description", values.get("description"));
            doc.insert_text("url", values.get("url"));
            doc.insert_optional("logo", values.get("logo"));
            if let Some(contact) = values.non_empty("contactPoint") {
                let points: Vec<Value> = parse_contact_points(contact)
                    .iter()
                    .map(|p| p.to_json_ld())
                    .collect();
                doc.insert("contactPoint", Value::Array(points));
            }
        }
    }

    log::debug!("generated {} document with {} keys", kind, doc.0.len());
    doc
}

/// Validate, then generate. The only entry point that never sees invalid data.
pub fn generate_validated(
    kind: SchemaKind,
    values: &FormValues,
) -> Result<JsonLdDocument, ValidationError> {
    validate(kind, values).into_result()?;
    Ok(generate(kind, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    fn sample_values(kind: SchemaKind) -> FormValues {
        match kind {
            SchemaKind::Faq => values(&[("mainEntity", "Q: What is X?\nA: X is Y.")]),
            SchemaKind::Article => values(&[
                ("headline", "Launch day"),
                ("description", "We shipped."),
                ("author", "Sam Doe"),
                ("datePublished", "2024-05-01"),
            ]),
            SchemaKind::LocalBusiness => values(&[
                ("name", "Corner Cafe"),
                ("description", "Coffee and cake"),
                ("address", "123 Main St\nSpringfield\nIL\n62704"),
            ]),
            SchemaKind::Event => values(&[
                ("name", "Meetup"),
                ("description", "Monthly meetup"),
                ("startDate", "2024-06-01"),
                ("location", "Town Hall"),
            ]),
            SchemaKind::Product => values(&[
                ("name", "Widget"),
                ("description", "A fine widget"),
                ("price", "29.99"),
                ("currency", "EUR"),
                ("availability", "PreOrder"),
            ]),
            SchemaKind::Organization => values(&[
                ("name", "Acme"),
                ("description", "Makers of things"),
                ("url", "https://acme.test"),
            ]),
        }
    }

    #[test]
    fn test_every_schema_has_context_and_type() {
        for kind in SchemaKind::all() {
            let values = sample_values(*kind);
            let doc = generate_validated(*kind, &values).unwrap();
            assert_eq!(doc.get("@context"), Some(&json!("https://schema.org")));
            assert_eq!(doc.json_ld_type(), Some(kind.json_ld_type()));

            let keys: Vec<_> = doc.as_map().keys().take(2).cloned().collect();
            assert_eq!(keys, ["@context", "@type"]);
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        for kind in SchemaKind::all() {
            let values = sample_values(*kind);
            assert_eq!(generate(*kind, &values), generate(*kind, &values));
        }
    }

    #[test]
    fn test_serialized_text_round_trips() {
        for kind in SchemaKind::all() {
            let doc = generate(*kind, &sample_values(*kind));
            let text = doc.to_pretty_json();
            assert_eq!(JsonLdDocument::from_json(&text).unwrap(), doc);
        }
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let doc = generate(SchemaKind::Organization, &sample_values(SchemaKind::Organization));
        let text = doc.to_pretty_json();
        assert!(text.starts_with("{\n  \"@context\": \"https://schema.org\",\n  \"@type\": \"Organization\""));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_faq_document() {
        let doc = generate(
            SchemaKind::Faq,
            &values(&[("mainEntity", "Q: What is X?\nA: X is Y.\n\nQ: Bad block\n")]),
        );
        assert_eq!(
            doc.into_value(),
            json!({
                "@context": "https://schema.org",
                "@type": "FAQPage",
                "mainEntity": [{
                    "@type": "Question",
                    "name": "What is X?",
                    "acceptedAnswer": {"@type": "Answer", "text": "X is Y."}
                }]
            })
        );
    }

    #[test]
    fn test_article_image_only_when_present() {
        let mut v = sample_values(SchemaKind::Article);
        let doc = generate(SchemaKind::Article, &v);
        assert!(doc.get("image").is_none());
        assert_eq!(
            doc.get("author"),
            Some(&json!({"@type": "Person", "name": "Sam Doe"}))
        );

        v.set("image", "https://example.com/a.jpg");
        let doc = generate(SchemaKind::Article, &v);
        assert_eq!(doc.get("image"), Some(&json!("https://example.com/a.jpg")));
    }

    #[test]
    fn test_local_business_optional_fields() {
        let mut v = sample_values(SchemaKind::LocalBusiness);
        let doc = generate(SchemaKind::LocalBusiness, &v);
        assert!(doc.get("url").is_none());
        assert!(doc.get("openingHours").is_none());
        assert!(doc.get("telephone").is_none());
        assert_eq!(
            doc.get("address"),
            Some(&json!({
                "@type": "PostalAddress",
                "streetAddress": "123 Main St",
                "addressLocality": "Springfield",
                "addressRegion": "IL",
                "postalCode": "62704"
            }))
        );

        v.set("phone", "(555) 123-4567");
        v.set("website", "https://cafe.test");
        v.set("hours", "Mo-Fr 08:00-16:00\n\nSa 09:00-12:00");
        let doc = generate(SchemaKind::LocalBusiness, &v);
        assert_eq!(doc.get("telephone"), Some(&json!("(555) 123-4567")));
        assert_eq!(doc.get("url"), Some(&json!("https://cafe.test")));
        assert_eq!(
            doc.get("openingHours"),
            Some(&json!(["Mo-Fr 08:00-16:00", "Sa 09:00-12:00"]))
        );
    }

    #[test]
    fn test_event_document() {
        let mut v = sample_values(SchemaKind::Event);
        v.set("endDate", "2024-06-02");
        let doc = generate(SchemaKind::Event, &v);
        assert_eq!(doc.get("startDate"), Some(&json!("2024-06-01")));
        assert_eq!(doc.get("endDate"), Some(&json!("2024-06-02")));
        assert_eq!(
            doc.get("location"),
            Some(&json!({"@type": "Place", "name": "Town Hall"}))
        );
        assert!(doc.get("url").is_none());
    }

    #[test]
    fn test_product_offer() {
        let doc = generate(SchemaKind::Product, &sample_values(SchemaKind::Product));
        assert_eq!(
            doc.get("offers"),
            Some(&json!({
                "@type": "Offer",
                "price": "29.99",
                "priceCurrency": "EUR",
                "availability": "https://schema.org/PreOrder"
            }))
        );
    }

    #[test]
    fn test_organization_contact_points() {
        let mut v = sample_values(SchemaKind::Organization);
        assert!(generate(SchemaKind::Organization, &v)
            .get("contactPoint")
            .is_none());

        v.set("contactPoint", "Sales: sales@acme.test\ngarbage");
        v.set("logo", "https://acme.test/logo.png");
        let doc = generate(SchemaKind::Organization, &v);
        assert_eq!(doc.get("logo"), Some(&json!("https://acme.test/logo.png")));
        assert_eq!(
            doc.get("contactPoint"),
            Some(&json!([{
                "@type": "ContactPoint",
                "contactType": "Sales",
                "value": "sales@acme.test"
            }]))
        );
    }

    #[test]
    fn test_generate_validated_rejects_invalid() {
        let err = generate_validated(SchemaKind::Product, &values(&[("price", "abc")]))
            .unwrap_err();
        assert!(err
            .messages()
            .contains(&"Price must be a valid number (e.g., 29.99)".to_string()));
    }

    #[test]
    fn test_snapshot_product_output() {
        let doc = generate(SchemaKind::Product, &sample_values(SchemaKind::Product));
        insta::assert_snapshot!(doc.to_pretty_json(), @r###"
        {
          "@context": "https://schema.org",
          "@type": "Product",
          "name": "Widget",
          "description": "A fine widget",
          "offers": {
            "@type": "Offer",
            "price": "29.99",
            "priceCurrency": "EUR",
            "availability": "https://schema.org/PreOrder"
          }
        }
        "###);
    }
}
