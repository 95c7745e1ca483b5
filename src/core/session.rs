//! Active form session: selected schema, values, output and saved templates

use chrono::{DateTime, Utc};

use crate::core::export::DownloadArtifact;
use crate::core::identity::{SchemaKind, TemplateId};
use crate::core::store::{StoreError, Template, TemplateStore};
use crate::core::values::FormValues;
use crate::schema::generator::generate;
use crate::schema::registry::{SchemaDefinition, SchemaRegistry};
use crate::schema::validator::{validate, ValidationError};

/// Form state as the user sees it between actions
#[derive(Debug, Default)]
pub struct Session {
    schema: SchemaKind,
    values: FormValues,
    output: Option<String>,
    errors: Vec<String>,
    templates: TemplateStore,
}

impl Session {
    pub fn new(schema: SchemaKind) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    pub fn schema(&self) -> SchemaKind {
        self.schema
    }

    pub fn definition(&self) -> &'static SchemaDefinition {
        SchemaRegistry::get(self.schema)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Last successfully generated JSON text
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Messages from the last failed generate
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Output is present and was produced without errors
    pub fn is_valid_output(&self) -> bool {
        self.output.is_some() && self.errors.is_empty()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Switch schema type. Entered values are kept; stale output is dropped.
    pub fn select_schema(&mut self, schema: SchemaKind) {
        if schema != self.schema {
            self.schema = schema;
            self.output = None;
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.set(name, value);
    }

    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
    }

    /// Reset values, output and errors
    pub fn clear_form(&mut self) {
        self.values.clear();
        self.output = None;
        self.errors.clear();
    }

    /// Validate and generate. On failure the errors are kept and any previous output dropped.
    pub fn generate(&mut self) -> Result<&str, ValidationError> {
        self.errors.clear();

        if let Err(err) = validate(self.schema, &self.values).into_result() {
            self.errors = err.messages();
            self.output = None;
            return Err(err);
        }

        let text = generate(self.schema, &self.values).to_pretty_json();
        Ok(self.output.insert(text).as_str())
    }

    pub fn save_template(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&Template, ValidationError> {
        self.templates
            .save(name, description, self.schema, &self.values)
    }

    /// Restore a template's schema and values, clearing output and errors
    pub fn load_template(&mut self, id: &TemplateId) -> Result<(), StoreError> {
        let (schema, values) = self.templates.load(id)?;
        self.schema = schema;
        self.values = values;
        self.output = None;
        self.errors.clear();
        Ok(())
    }

    pub fn delete_template(&mut self, id: &TemplateId) -> Option<Template> {
        self.templates.delete(id)
    }

    /// The current output packaged for download
    pub fn download_artifact(&self, at: DateTime<Utc>) -> Option<DownloadArtifact> {
        self.output
            .as_ref()
            .map(|text| DownloadArtifact::new(self.schema, text.clone(), at))
    }
}
