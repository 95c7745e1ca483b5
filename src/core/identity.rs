//! Schema type identity and template identifiers

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// The closed set of supported schema.org content types
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// FAQ page (question/answer pairs)
    #[default]
    Faq,
    /// News article or blog post
    Article,
    /// Local business listing
    LocalBusiness,
    /// Event with dates and location
    Event,
    /// E-commerce product with an offer
    Product,
    /// Company or organization
    Organization,
}

impl SchemaKind {
    /// Identifier used on the command line, in templates and in download names
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Faq => "faq",
            SchemaKind::Article => "article",
            SchemaKind::LocalBusiness => "localbusiness",
            SchemaKind::Event => "event",
            SchemaKind::Product => "product",
            SchemaKind::Organization => "organization",
        }
    }

    /// The schema.org `@type` emitted for this kind
    pub fn json_ld_type(&self) -> &'static str {
        match self {
            SchemaKind::Faq => "FAQPage",
            SchemaKind::Article => "Article",
            SchemaKind::LocalBusiness => "LocalBusiness",
            SchemaKind::Event => "Event",
            SchemaKind::Product => "Product",
            SchemaKind::Organization => "Organization",
        }
    }

    /// All kinds in catalog order
    pub fn all() -> &'static [SchemaKind] {
        &[
            SchemaKind::Faq,
            SchemaKind::Article,
            SchemaKind::LocalBusiness,
            SchemaKind::Event,
            SchemaKind::Product,
            SchemaKind::Organization,
        ]
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = UnknownSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the short id and the schema.org type name
        match s.trim().to_lowercase().as_str() {
            "faq" | "faqpage" => Ok(SchemaKind::Faq),
            "article" => Ok(SchemaKind::Article),
            "localbusiness" | "local-business" => Ok(SchemaKind::LocalBusiness),
            "event" => Ok(SchemaKind::Event),
            "product" => Ok(SchemaKind::Product),
            "organization" | "organisation" => Ok(SchemaKind::Organization),
            _ => Err(UnknownSchema(s.to_string())),
        }
    }
}

/// Lookup of a schema id that is not in the catalog
#[derive(Debug, Error, Diagnostic)]
#[error("unknown schema type: '{0}'")]
#[diagnostic(
    code(sda::schema::unknown),
    help("valid schema types: faq, article, localbusiness, event, product, organization")
)]
pub struct UnknownSchema(pub String);

const TEMPLATE_PREFIX: &str = "TPL";

/// A unique, time-ordered template identifier (`TPL-<ULID>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(Ulid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn ulid(&self) -> Ulid {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", TEMPLATE_PREFIX, self.0)
    }
}

impl FromStr for TemplateId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if !prefix.eq_ignore_ascii_case(TEMPLATE_PREFIX) {
            return Err(IdParseError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for TemplateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing template IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid template prefix: '{0}' (expected TPL)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in template ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_kind_roundtrip() {
        for kind in SchemaKind::all() {
            let parsed: SchemaKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_schema_kind_accepts_type_names() {
        assert_eq!("FAQPage".parse::<SchemaKind>().unwrap(), SchemaKind::Faq);
        assert_eq!(
            "LocalBusiness".parse::<SchemaKind>().unwrap(),
            SchemaKind::LocalBusiness
        );
        assert!("recipe".parse::<SchemaKind>().is_err());
    }

    #[test]
    fn test_schema_kind_serde_uses_ids() {
        let json = serde_json::to_string(&SchemaKind::LocalBusiness).unwrap();
        assert_eq!(json, "\"localbusiness\"");
        let back: SchemaKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SchemaKind::LocalBusiness);
    }

    #[test]
    fn test_template_id_generation() {
        let id = TemplateId::new();
        assert!(id.to_string().starts_with("TPL-"));
        assert_eq!(id.to_string().len(), 30); // TPL- (4) + ULID (26)
    }

    #[test]
    fn test_template_id_parsing() {
        let original = TemplateId::new();
        let parsed = TemplateId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_template_id_invalid_prefix() {
        let err = TemplateId::parse("REQ-01HQ3K4N5M6P7R8S9T0VWXYZAB").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_template_id_missing_delimiter() {
        let err = TemplateId::parse("TPL01HQ3K4N5M6P7R8S9T0VWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_template_id_invalid_ulid() {
        let err = TemplateId::parse("TPL-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }
}
