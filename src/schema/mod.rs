use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The fixed set of field types a collection may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    Datetime,
    Email,
    Url,
    Select,
    Image,
    Array,
    Coordinates,
}

/// A select option: either a bare string or an explicit label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Flat(String),
    Labeled { label: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_aware: Option<bool>,
    /// Nested definitions, valid only when `field_type` is `Array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
}

/// The stored definition of a collection's field structure. Exactly one
/// logical resource exists per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaResource {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    // Candidates submitted over the wire may omit timestamps; the store
    // stamps `updated_at` on every write anyway.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl SchemaResource {
    /// Check shape constraints before the resource is persisted: field names
    /// must be unique at every nesting level, and only `array` fields may
    /// carry nested definitions.
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.fields, "fields")
    }
}

fn validate_fields(fields: &[FieldDefinition], path: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(format!("Duplicate field name '{}' in {}", field.name, path));
        }
        if let Some(nested) = &field.fields {
            if field.field_type != FieldType::Array {
                return Err(format!(
                    "Field '{}' declares nested fields but is not of type array",
                    field.name
                ));
            }
            validate_fields(nested, &format!("{}.{}", path, field.name))?;
        }
    }
    Ok(())
}
