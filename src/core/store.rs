//! In-memory template store
//!
//! Templates are named snapshots of one schema type's form values. They
//! live for the duration of a session and are never modified in place.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::{SchemaKind, TemplateId};
use crate::core::values::FormValues;
use crate::schema::registry::SchemaRegistry;
use crate::schema::validator::ValidationError;

pub const NAME_REQUIRED: &str = "Template name is required";
pub const NO_DATA_TO_SAVE: &str =
    "Please fill in at least some required fields before saving as template";

/// A saved snapshot of form values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub schema: SchemaKind,
    pub values: FormValues,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("template not found: {0}")]
    #[diagnostic(code(sda::template::not_found))]
    NotFound(TemplateId),
}

/// Templates in insertion order
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `values` under `name`.
    ///
    /// Fails when the trimmed name is empty or when none of the schema's
    /// required fields has a non-blank value.
    pub fn save(
        &mut self,
        name: &str,
        description: &str,
        schema: SchemaKind,
        values: &FormValues,
    ) -> Result<&Template, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::single(NAME_REQUIRED));
        }

        let has_required_data = SchemaRegistry::get(schema)
            .required_fields()
            .any(|field| !values.is_blank(field.name));
        if !has_required_data {
            return Err(ValidationError::single(NO_DATA_TO_SAVE));
        }

        let template = Template {
            id: TemplateId::new(),
            name: name.to_string(),
            description: description.trim().to_string(),
            schema,
            values: values.clone(),
            created_at: Utc::now(),
        };
        log::debug!("saved template {} ({}) for {}", template.id, name, schema);

        self.templates.push(template);
        Ok(&self.templates[self.templates.len() - 1])
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// The schema and a copy of the values stored under `id`
    pub fn load(&self, id: &TemplateId) -> Result<(SchemaKind, FormValues), StoreError> {
        self.get(id)
            .map(|t| (t.schema, t.values.clone()))
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Remove a template; absent ids are ignored
    pub fn delete(&mut self, id: &TemplateId) -> Option<Template> {
        let index = self.templates.iter().position(|t| &t.id == id)?;
        log::debug!("deleted template {}", id);
        Some(self.templates.remove(index))
    }
}
