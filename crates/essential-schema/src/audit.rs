//! # Closed-Shape Audit
//!
//! Frame records are validated against closed shapes: an unknown field at
//! any depth rejects the whole record. This module walks a schema and
//! reports every object schema that would accept unknown fields, so a
//! shape edit that forgets `additionalProperties: false` is caught.

use serde_json::Value;

/// An object schema that does not reject unknown fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenShapeFinding {
    /// JSON Pointer to the `additionalProperties` keyword (present or not).
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
}

impl std::fmt::Display for OpenShapeFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  {}: {} (expected false)",
            self.json_path, self.current_value
        )
    }
}

/// Audit every object schema reachable through `properties`, `items`,
/// `anyOf` and `oneOf`.
pub fn audit_closed_shapes(schema: &Value) -> Vec<OpenShapeFinding> {
    let mut findings = Vec::new();
    walk(schema, "", &mut findings);
    findings
}

fn is_object_schema(schema: &Value) -> bool {
    schema.get("type") == Some(&Value::String("object".to_string()))
        || schema.get("properties").is_some()
        || schema.get("required").is_some()
}

fn walk(schema: &Value, path: &str, findings: &mut Vec<OpenShapeFinding>) {
    if is_object_schema(schema) {
        match schema.get("additionalProperties") {
            Some(Value::Bool(false)) => {}
            other => findings.push(OpenShapeFinding {
                json_path: format!("{path}/additionalProperties"),
                current_value: other
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "(absent, defaults to true)".to_string()),
            }),
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            walk(property, &format!("{path}/properties/{name}"), findings);
        }
    }

    if let Some(items) = schema.get("items") {
        walk(items, &format!("{path}/items"), findings);
    }

    for keyword in ["anyOf", "oneOf"] {
        if let Some(branches) = schema.get(keyword).and_then(Value::as_array) {
            for (i, branch) in branches.iter().enumerate() {
                walk(branch, &format!("{path}/{keyword}/{i}"), findings);
            }
        }
    }
}
