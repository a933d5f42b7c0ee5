//! # Frame Shapes
//!
//! JSON Schema (Draft 2020-12) declarations for the five frame shapes.
//!
//! The base shape is declared once. Each variant is the base extended
//! with a required `frametype` literal, then narrowed by omitting the
//! fields that do not apply to it. Every object, nested ones included,
//! sets `additionalProperties: false`.

use serde_json::{json, Map, Value};

use essential_core::{FrameType, ESSENTIAL_COLLECTION};

/// Draft the shapes are written against.
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Fields dropped from the slot shape.
///
/// `template_slot`, `template_facet_value` and `superclass` are meant to
/// go here; the narrowing is not active yet.
const SLOT_OMITTED_FIELDS: &[&str] = &[];

/// Fields dropped from the facet shape. The slot list plus
/// `own_slot_value` is meant to go here; not active yet.
const FACET_OMITTED_FIELDS: &[&str] = &[];

/// Fields dropped from the simple-instance shape. Not active yet.
const SIMPLE_INSTANCE_OMITTED_FIELDS: &[&str] = &[];

/// Whether a property must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A closed object shape under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameShape {
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl FrameShape {
    fn empty() -> Self {
        Self {
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// Add a property, or replace an existing one including its presence.
    pub fn extend(mut self, field: &str, schema: Value, presence: Presence) -> Self {
        self.properties.insert(field.to_string(), schema);
        self.required.retain(|r| r != field);
        if presence == Presence::Required {
            self.required.push(field.to_string());
        }
        self
    }

    /// Drop properties from the shape.
    pub fn omit(mut self, fields: &[&str]) -> Self {
        for field in fields {
            self.properties.remove(*field);
        }
        self.required.retain(|r| !fields.contains(&r.as_str()));
        self
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.properties.contains_key(field)
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|r| r == field)
    }

    /// Names of all declared properties.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Render the shape as a JSON Schema object.
    pub fn to_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": Value::Object(self.properties.clone()),
            "required": self.required,
            "additionalProperties": false
        })
    }
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn string_array() -> Value {
    json!({ "type": "array", "items": string() })
}

fn literal(frametype: FrameType) -> Value {
    json!({ "const": frametype.as_str() })
}

/// Multi-component value: `[{value_type, value_content}, ...]`.
fn value_components() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "value_type": string(),
                "value_content": string()
            },
            "required": ["value_type", "value_content"],
            "additionalProperties": false
        }
    })
}

fn own_slot_values() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "slot_reference": string(),
                "value": value_components()
            },
            "required": ["slot_reference", "value"],
            "additionalProperties": false
        }
    })
}

fn template_facet_values() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "slot_reference": string(),
                "facet_reference": string(),
                "value": value_components()
            },
            "required": ["slot_reference", "facet_reference", "value"],
            "additionalProperties": false
        }
    })
}

/// The base frame shape. `frametype` is optional and, when present, must
/// be `frame`.
pub fn frame_shape() -> FrameShape {
    FrameShape::empty()
        .extend("frametype", literal(FrameType::Frame), Presence::Optional)
        .extend("name", string(), Presence::Required)
        .extend("type", string(), Presence::Required)
        .extend("supertype", string_array(), Presence::Required)
        .extend("own_slot_value", own_slot_values(), Presence::Optional)
        .extend("superclass", string_array(), Presence::Optional)
        .extend("template_slot", string_array(), Presence::Optional)
        .extend("template_facet_value", template_facet_values(), Presence::Optional)
}

fn variant_shape(frametype: FrameType) -> FrameShape {
    frame_shape().extend("frametype", literal(frametype), Presence::Required)
}

pub fn class_shape() -> FrameShape {
    variant_shape(FrameType::Class)
}

pub fn slot_shape() -> FrameShape {
    variant_shape(FrameType::Slot).omit(SLOT_OMITTED_FIELDS)
}

pub fn facet_shape() -> FrameShape {
    variant_shape(FrameType::Facet).omit(FACET_OMITTED_FIELDS)
}

pub fn simple_instance_shape() -> FrameShape {
    variant_shape(FrameType::SimpleInstance).omit(SIMPLE_INSTANCE_OMITTED_FIELDS)
}

/// The shape a record with the given `frametype` is validated against.
pub fn shape_for(frametype: FrameType) -> FrameShape {
    match frametype {
        FrameType::Frame => frame_shape(),
        FrameType::Class => class_shape(),
        FrameType::Slot => slot_shape(),
        FrameType::Facet => facet_shape(),
        FrameType::SimpleInstance => simple_instance_shape(),
    }
}

/// A standalone schema document for one shape.
pub fn shape_document(frametype: FrameType) -> Value {
    let mut schema = shape_for(frametype).to_schema();
    if let Value::Object(map) = &mut schema {
        map.insert("$schema".to_string(), json!(SCHEMA_DRAFT));
        map.insert("title".to_string(), json!(frametype.as_str()));
    }
    schema
}

/// The union schema of the `essential` collection: a record is valid iff
/// it matches at least one of the five shapes.
pub fn collection_schema() -> Value {
    let shapes: Vec<Value> = FrameType::all()
        .iter()
        .map(|ft| shape_for(*ft).to_schema())
        .collect();
    json!({
        "$schema": SCHEMA_DRAFT,
        "title": ESSENTIAL_COLLECTION,
        "anyOf": shapes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_FIELDS: &[&str] = &[
        "frametype",
        "name",
        "type",
        "supertype",
        "own_slot_value",
        "superclass",
        "template_slot",
        "template_facet_value",
    ];

    #[test]
    fn test_base_shape_fields() {
        let shape = frame_shape();
        for field in BASE_FIELDS {
            assert!(shape.has_field(field), "base shape missing {field}");
        }
        assert_eq!(shape.fields().count(), BASE_FIELDS.len());
    }

    #[test]
    fn test_base_shape_required_fields() {
        let shape = frame_shape();
        assert!(shape.is_required("name"));
        assert!(shape.is_required("type"));
        assert!(shape.is_required("supertype"));
        assert!(!shape.is_required("frametype"));
        assert!(!shape.is_required("own_slot_value"));
        assert!(!shape.is_required("superclass"));
    }

    #[test]
    fn test_variants_require_frametype_literal() {
        for ft in &FrameType::all()[1..] {
            let shape = shape_for(*ft);
            assert!(shape.is_required("frametype"), "{ft} must require frametype");
            let schema = shape.to_schema();
            assert_eq!(
                schema.pointer("/properties/frametype/const"),
                Some(&json!(ft.as_str()))
            );
        }
    }

    #[test]
    fn test_variants_retain_full_field_set() {
        for ft in FrameType::all() {
            let shape = shape_for(*ft);
            assert_eq!(
                shape.fields().count(),
                BASE_FIELDS.len(),
                "{ft} shape should not be narrowed"
            );
        }
    }

    #[test]
    fn test_extend_replaces_presence() {
        let shape = frame_shape().extend("name", string(), Presence::Optional);
        assert!(!shape.is_required("name"));
        let shape = shape.extend("name", string(), Presence::Required);
        assert_eq!(shape.required.iter().filter(|r| *r == "name").count(), 1);
    }

    #[test]
    fn test_omit_drops_property_and_requirement() {
        let shape = frame_shape().omit(&["superclass", "supertype"]);
        assert!(!shape.has_field("superclass"));
        assert!(!shape.has_field("supertype"));
        assert!(!shape.is_required("supertype"));
        assert!(shape.is_required("name"));
    }

    #[test]
    fn test_shape_schema_is_closed() {
        let schema = frame_shape().to_schema();
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(schema["type"], json!("object"));
    }

    #[test]
    fn test_collection_schema_lists_five_shapes() {
        let schema = collection_schema();
        let shapes = schema["anyOf"].as_array().unwrap();
        assert_eq!(shapes.len(), FrameType::all().len());
        assert_eq!(schema["title"], json!("essential"));
        assert_eq!(schema["$schema"], json!(SCHEMA_DRAFT));
    }

    #[test]
    fn test_shape_document_is_titled() {
        let doc = shape_document(FrameType::Facet);
        assert_eq!(doc["title"], json!("facet"));
        assert_eq!(doc["properties"]["frametype"]["const"], json!("facet"));
    }
}
