//! Schema system - catalog, field parsing, validation and JSON-LD generation

pub mod generator;
pub mod parsers;
pub mod registry;
pub mod validator;
pub mod wizard;

pub use generator::{generate, generate_validated, JsonLdDocument};
pub use registry::{FieldKind, SchemaDefinition, SchemaField, SchemaRegistry};
pub use validator::{validate, ValidationError, ValidationResult};
pub use wizard::FormWizard;
