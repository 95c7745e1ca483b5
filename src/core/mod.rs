//! Core module - identity, form state, templates and export

pub mod config;
pub mod export;
pub mod identity;
pub mod session;
pub mod store;
pub mod values;

pub use config::Config;
pub use export::{copy_to_clipboard, render_script_tag, DownloadArtifact, ExportError};
pub use identity::{IdParseError, SchemaKind, TemplateId, UnknownSchema};
pub use session::Session;
pub use store::{StoreError, Template, TemplateStore};
pub use values::{FormValues, ValuesError};
