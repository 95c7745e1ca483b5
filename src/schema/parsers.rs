//! Free-text field parsers
//!
//! Multi-line form fields (FAQ blocks, addresses, opening hours, contact
//! details) are entered as plain text and turned into structured JSON-LD
//! sub-objects here. Every parser is total: malformed lines or blocks are
//! dropped, never reported as errors.

use serde_json::{json, Value};

/// One question/answer pair of an FAQ page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn to_json_ld(&self) -> Value {
        json!({
            "@type": "Question",
            "name": self.question,
            "acceptedAnswer": {
                "@type": "Answer",
                "text": self.answer,
            }
        })
    }
}

/// Positional postal address; trailing parts are absent when fewer lines were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
}

impl PostalAddress {
    pub fn to_json_ld(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("@type".into(), json!("PostalAddress"));

        let parts = [
            ("streetAddress", &self.street_address),
            ("addressLocality", &self.address_locality),
            ("addressRegion", &self.address_region),
            ("postalCode", &self.postal_code),
        ];
        for (key, value) in parts {
            if let Some(v) = value {
                obj.insert(key.into(), json!(v));
            }
        }

        Value::Object(obj)
    }
}

/// A contact channel such as "Sales: sales@example.com"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPoint {
    pub contact_type: String,
    pub value: String,
}

impl ContactPoint {
    pub fn to_json_ld(&self) -> Value {
        json!({
            "@type": "ContactPoint",
            "contactType": self.contact_type,
            "value": self.value,
        })
    }
}

/// Non-blank lines of the input, kept verbatim apart from line terminators
fn content_lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().filter(|line| !line.trim().is_empty())
}

/// Parse blank-line separated `Q:` / `A:` blocks.
///
/// Within a block the last `Q:` and last `A:` line win. Blocks missing
/// either half are dropped.
pub fn parse_faq(input: &str) -> Vec<FaqItem> {
    let normalized = input.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .filter_map(|block| {
            let mut question = "";
            let mut answer = "";

            for line in block.split('\n') {
                if let Some(rest) = line.strip_prefix("Q:") {
                    question = rest.trim();
                } else if let Some(rest) = line.strip_prefix("A:") {
                    answer = rest.trim();
                }
            }

            if question.is_empty() || answer.is_empty() {
                None
            } else {
                Some(FaqItem {
                    question: question.to_string(),
                    answer: answer.to_string(),
                })
            }
        })
        .collect()
}

/// Assign up to four non-blank lines to street, locality, region and postal code
pub fn parse_address(input: &str) -> PostalAddress {
    let mut lines = content_lines(input).map(str::to_string);

    PostalAddress {
        street_address: lines.next(),
        address_locality: lines.next(),
        address_region: lines.next(),
        postal_code: lines.next(),
    }
}

/// One opening-hours entry per non-blank line
pub fn parse_hours(input: &str) -> Vec<String> {
    content_lines(input).map(str::to_string).collect()
}

/// Parse `type: value` lines, splitting on the first ':'
pub fn parse_contact_points(input: &str) -> Vec<ContactPoint> {
    content_lines(input)
        .filter_map(|line| {
            let (contact_type, value) = line.split_once(':')?;
            let contact_type = contact_type.trim();
            let value = value.trim();

            if contact_type.is_empty() || value.is_empty() {
                return None;
            }

            Some(ContactPoint {
                contact_type: contact_type.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
