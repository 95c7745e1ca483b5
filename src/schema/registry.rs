//! Static catalog of the supported schema types and their form fields

use serde::Serialize;

use crate::core::identity::{SchemaKind, UnknownSchema};

/// How a field is rendered and entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text, parsed into structured items for some fields
    TextArea,
    /// One of a fixed list of options
    Select,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// Numeric text
    Number,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
        }
    }
}

/// A selectable option of a [`FieldKind::Select`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A single form field of a schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [ChoiceOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

fn has_no_options(options: &&'static [ChoiceOption]) -> bool {
    options.is_empty()
}

impl SchemaField {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: &[],
            placeholder: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    const fn options(mut self, options: &'static [ChoiceOption]) -> Self {
        self.options = options;
        self
    }

    /// Whether `value` is one of this field's options (always true for non-select fields)
    pub fn accepts_option(&self, value: &str) -> bool {
        self.kind != FieldKind::Select || self.options.iter().any(|o| o.value == value)
    }
}

/// A schema type: its identity, display text and ordered fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    pub kind: SchemaKind,
    pub display_name: &'static str,
    pub description: &'static str,
    pub fields: &'static [SchemaField],
}

impl SchemaDefinition {
    pub fn id(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn json_ld_type(&self) -> &'static str {
        self.kind.json_ld_type()
    }

    pub fn field(&self, name: &str) -> Option<&'static SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static SchemaField> {
        self.fields.iter().filter(|f| f.required)
    }
}

use FieldKind::{Date, Select, Text, TextArea};

const FAQ_FIELDS: &[SchemaField] = &[SchemaField::new(
    "mainEntity",
    "FAQ Questions & Answers",
    TextArea,
)
.required()
.placeholder(
    "Enter questions and answers in format:\nQ: What is your return policy?\nA: We offer 30-day returns on all items.\n\nQ: How long does shipping take?\nA: Standard shipping takes 3-5 business days.",
)];

const ARTICLE_FIELDS: &[SchemaField] = &[
    SchemaField::new("headline", "Headline", Text)
        .required()
        .placeholder("Article title"),
    SchemaField::new("description", "Description", TextArea)
        .required()
        .placeholder("Brief description of the article"),
    SchemaField::new("author", "Author", Text)
        .required()
        .placeholder("Author name"),
    SchemaField::new("datePublished", "Publication Date", Date).required(),
    SchemaField::new("image", "Image URL", Text).placeholder("https://example.com/image.jpg"),
];

const LOCAL_BUSINESS_FIELDS: &[SchemaField] = &[
    SchemaField::new("name", "Business Name", Text)
        .required()
        .placeholder("Your business name"),
    SchemaField::new("description", "Description", TextArea)
        .required()
        .placeholder("Brief description of your business"),
    SchemaField::new("address", "Address", TextArea)
        .required()
        .placeholder("Street address, city, state, zip code"),
    SchemaField::new("phone", "Phone", Text).placeholder("(555) 123-4567"),
    SchemaField::new("website", "Website", Text).placeholder("https://yourwebsite.com"),
    SchemaField::new("hours", "Hours", TextArea)
        .placeholder("Monday-Friday: 9AM-5PM\nSaturday: 10AM-4PM\nSunday: Closed"),
];

const EVENT_FIELDS: &[SchemaField] = &[
    SchemaField::new("name", "Event Name", Text)
        .required()
        .placeholder("Event title"),
    SchemaField::new("description", "Description", TextArea)
        .required()
        .placeholder("Event description"),
    SchemaField::new("startDate", "Start Date", Date).required(),
    SchemaField::new("endDate", "End Date", Date).placeholder("Optional"),
    SchemaField::new("location", "Location", Text)
        .required()
        .placeholder("Event venue or address"),
    SchemaField::new("url", "Event URL", Text).placeholder("https://example.com/event"),
];

const CURRENCIES: &[ChoiceOption] = &[
    ChoiceOption { value: "USD", label: "USD" },
    ChoiceOption { value: "EUR", label: "EUR" },
    ChoiceOption { value: "GBP", label: "GBP" },
    ChoiceOption { value: "CAD", label: "CAD" },
];

const AVAILABILITY: &[ChoiceOption] = &[
    ChoiceOption { value: "InStock", label: "In Stock" },
    ChoiceOption { value: "OutOfStock", label: "Out of Stock" },
    ChoiceOption { value: "PreOrder", label: "Pre-Order" },
];

const PRODUCT_FIELDS: &[SchemaField] = &[
    SchemaField::new("name", "Product Name", Text)
        .required()
        .placeholder("Product name"),
    SchemaField::new("description", "Description", TextArea)
        .required()
        .placeholder("Product description"),
    SchemaField::new("price", "Price", Text)
        .required()
        .placeholder("29.99"),
    SchemaField::new("currency", "Currency", Select)
        .required()
        .options(CURRENCIES),
    SchemaField::new("availability", "Availability", Select)
        .required()
        .options(AVAILABILITY),
    SchemaField::new("image", "Image URL", Text).placeholder("https://example.com/product.jpg"),
];

const ORGANIZATION_FIELDS: &[SchemaField] = &[
    SchemaField::new("name", "Organization Name", Text)
        .required()
        .placeholder("Company name"),
    SchemaField::new("description", "Description", TextArea)
        .required()
        .placeholder("Organization description"),
    SchemaField::new("url", "Website", Text)
        .required()
        .placeholder("https://company.com"),
    SchemaField::new("logo", "Logo URL", Text).placeholder("https://company.com/logo.jpg"),
    SchemaField::new("contactPoint", "Contact Information", TextArea).placeholder(
        "Contact type and details:\nCustomer Service: +1-555-123-4567\nSales: sales@company.com",
    ),
];

const DEFINITIONS: &[SchemaDefinition] = &[
    SchemaDefinition {
        kind: SchemaKind::Faq,
        display_name: "FAQ Page",
        description: "Frequently Asked Questions schema for better search visibility",
        fields: FAQ_FIELDS,
    },
    SchemaDefinition {
        kind: SchemaKind::Article,
        display_name: "Article",
        description: "News article, blog post, or other written content",
        fields: ARTICLE_FIELDS,
    },
    SchemaDefinition {
        kind: SchemaKind::LocalBusiness,
        display_name: "Local Business",
        description: "Local business information for Google Maps and search",
        fields: LOCAL_BUSINESS_FIELDS,
    },
    SchemaDefinition {
        kind: SchemaKind::Event,
        display_name: "Event",
        description: "Event information for better visibility in search results",
        fields: EVENT_FIELDS,
    },
    SchemaDefinition {
        kind: SchemaKind::Product,
        display_name: "Product",
        description: "Product information for e-commerce pages",
        fields: PRODUCT_FIELDS,
    },
    SchemaDefinition {
        kind: SchemaKind::Organization,
        display_name: "Organization",
        description: "Organization information for company pages",
        fields: ORGANIZATION_FIELDS,
    },
];

/// Read-only access to the schema catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    /// All definitions in catalog order
    pub fn list() -> &'static [SchemaDefinition] {
        DEFINITIONS
    }

    /// Definition for a schema kind
    pub fn get(kind: SchemaKind) -> &'static SchemaDefinition {
        // DEFINITIONS is declared in SchemaKind::all() order
        &DEFINITIONS[kind as usize]
    }

    /// Look up a definition by its string id
    pub fn find(id: &str) -> Result<&'static SchemaDefinition, UnknownSchema> {
        id.parse().map(Self::get)
    }
}
