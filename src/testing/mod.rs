//! Fixture helpers shared by the unit test modules.

use chrono::{TimeZone, Utc};

use crate::schema::{FieldDefinition, FieldType, SchemaResource};

pub fn text_field(name: &str, required: bool) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        field_type: FieldType::Text,
        required,
        label: None,
        placeholder: None,
        description: None,
        options: None,
        timezone_aware: None,
        fields: None,
    }
}

/// A minimal "Posts" resource with one required title field and fixed
/// timestamps (2024-01-01T00:00:00Z).
pub fn sample_resource() -> SchemaResource {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    SchemaResource {
        name: "Posts".to_string(),
        slug: "posts".to_string(),
        description: None,
        fields: vec![text_field("title", true)],
        created_at: t,
        updated_at: t,
        icon: None,
        is_public: None,
    }
}
