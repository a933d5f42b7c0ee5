//! # Frame Validation
//!
//! Validates untyped records against the frame shapes and resolves them
//! into typed [`Frame`]s.
//!
//! ## Shape Selection
//!
//! The `frametype` field picks the shape: absent selects the base
//! `frame` shape, a known literal selects its variant. Every violation
//! against that shape is reported together. A record that is not an
//! object, or whose `frametype` is not one of the five literals, matches
//! no shape and is reported against the union schema instead.
//!
//! ## Documents
//!
//! [`FrameValidator::validate_file`] reads one record from a YAML
//! (`.yaml`/`.yml`) or JSON file. YAML is converted to the JSON value
//! model before validation.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use essential_core::{EntrySlug, EssentialEntry, Frame, FrameType};

use crate::schema::{collection_schema, shape_for};

/// Error during frame validation.
#[derive(Error, Debug)]
pub enum FrameValidationError {
    /// The record selected a shape but does not conform to it.
    #[error("record does not match the '{shape}' frame shape:\n{violations}")]
    ShapeMismatch {
        /// The shape selected by the record's `frametype`.
        shape: FrameType,
        violations: ValidationViolations,
    },

    /// The record is not an object or carries an unknown `frametype`.
    #[error("record matches none of the frame shapes:\n{violations}")]
    NoMatchingShape { violations: ValidationViolations },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError { path: String, reason: String },

    /// A shape schema failed to compile.
    #[error("validator build error for shape '{shape}': {reason}")]
    SchemaBuildError { shape: String, reason: String },

    /// The record passed its shape but could not be decoded. Indicates
    /// drift between the shape declarations and the typed model.
    #[error("validated '{shape}' record could not be decoded: {reason}")]
    Deserialize { shape: FrameType, reason: String },
}

impl FrameValidationError {
    /// Structured violations, for shape failures.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            Self::ShapeMismatch { violations, .. } | Self::NoMatchingShape { violations } => {
                Some(violations)
            }
            _ => None,
        }
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating field in the record.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// All violations found for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Number of violations recorded for the record.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True if the record produced no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in the order the validator reported them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take ownership of the violation list.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    /// True if any violation points at `instance_path`.
    pub fn has_path(&self, instance_path: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.instance_path == instance_path)
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Encoding of a frame document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    /// Parse a document into the JSON value model.
    pub fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}")),
            Self::Yaml => {
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
                yaml_to_json_value(&yaml)
                    .map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
            }
        }
    }
}

/// Compiled validators for the five frame shapes and their union.
///
/// Compilation happens once in [`FrameValidator::new`]. The validator
/// holds no mutable state and is `Send + Sync`; records can be validated
/// from any number of threads.
pub struct FrameValidator {
    shapes: HashMap<FrameType, Validator>,
    union: Validator,
}

impl fmt::Debug for FrameValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shapes: Vec<&str> = self.shapes.keys().map(FrameType::as_str).collect();
        shapes.sort_unstable();
        f.debug_struct("FrameValidator")
            .field("shapes", &shapes)
            .finish_non_exhaustive()
    }
}

fn compile(shape: &str, schema: &Value) -> Result<Validator, FrameValidationError> {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(schema)
        .map_err(|e| FrameValidationError::SchemaBuildError {
            shape: shape.to_string(),
            reason: e.to_string(),
        })
}

fn collect_violations(validator: &Validator, record: &Value) -> Vec<Violation> {
    validator
        .iter_errors(record)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect()
}

/// The shape a record's `frametype` selects, if any.
fn select_shape(record: &Value) -> Option<FrameType> {
    let object = record.as_object()?;
    match object.get("frametype") {
        None => Some(FrameType::Frame),
        Some(Value::String(s)) => s.parse().ok(),
        Some(_) => None,
    }
}

impl FrameValidator {
    /// Compile the shape and union validators.
    ///
    /// # Errors
    ///
    /// Returns `FrameValidationError::SchemaBuildError` if a shape fails
    /// to compile.
    pub fn new() -> Result<Self, FrameValidationError> {
        let mut shapes = HashMap::new();
        for frametype in FrameType::all() {
            let schema = shape_for(*frametype).to_schema();
            shapes.insert(*frametype, compile(frametype.as_str(), &schema)?);
        }
        let union = compile(essential_core::ESSENTIAL_COLLECTION, &collection_schema())?;
        tracing::debug!(shape_count = shapes.len(), "compiled frame shape validators");
        Ok(Self { shapes, union })
    }

    /// Validate a record and resolve it into a typed frame.
    ///
    /// # Errors
    ///
    /// - `NoMatchingShape` if the record is not an object or its
    ///   `frametype` is not a known literal.
    /// - `ShapeMismatch` listing every violation against the selected
    ///   shape: missing required fields, wrong field types, and unknown
    ///   fields at any depth.
    pub fn validate(&self, record: &Value) -> Result<Frame, FrameValidationError> {
        let Some(shape) = select_shape(record) else {
            tracing::debug!("record selects no frame shape");
            return Err(FrameValidationError::NoMatchingShape {
                violations: self.union_violations(record),
            });
        };

        let validator =
            self.shapes
                .get(&shape)
                .ok_or_else(|| FrameValidationError::SchemaBuildError {
                    shape: shape.to_string(),
                    reason: "shape validator not compiled".to_string(),
                })?;

        let violations = collect_violations(validator, record);
        if !violations.is_empty() {
            tracing::debug!(
                shape = %shape,
                violation_count = violations.len(),
                "record rejected"
            );
            return Err(FrameValidationError::ShapeMismatch {
                shape,
                violations: ValidationViolations { violations },
            });
        }

        serde_json::from_value(record.clone()).map_err(|e| FrameValidationError::Deserialize {
            shape,
            reason: e.to_string(),
        })
    }

    /// True if the record matches any of the five shapes.
    pub fn is_valid(&self, record: &Value) -> bool {
        self.union.is_valid(record)
    }

    /// Validate a record and pair it with its collection slug.
    pub fn validate_entry(
        &self,
        slug: impl Into<EntrySlug>,
        record: &Value,
    ) -> Result<EssentialEntry, FrameValidationError> {
        let frame = self.validate(record)?;
        Ok(EssentialEntry::new(slug, frame))
    }

    /// Parse a document in the given format and validate it.
    pub fn validate_str(
        &self,
        content: &str,
        format: DocumentFormat,
    ) -> Result<Frame, FrameValidationError> {
        let record = format
            .parse(content)
            .map_err(|reason| FrameValidationError::DocumentLoadError {
                path: "<inline>".to_string(),
                reason,
            })?;
        self.validate(&record)
    }

    /// Read a YAML or JSON frame document from disk and validate it.
    pub fn validate_file(&self, path: &Path) -> Result<Frame, FrameValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FrameValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        let record = DocumentFormat::from_path(path)
            .parse(&content)
            .map_err(|reason| FrameValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason,
            })?;
        self.validate(&record)
    }

    fn union_violations(&self, record: &Value) -> ValidationViolations {
        let mut violations = Vec::new();
        if let Some(frametype) = record.get("frametype") {
            let expected: Vec<String> = FrameType::all()
                .iter()
                .map(|ft| format!("{:?}", ft.as_str()))
                .collect();
            violations.push(Violation {
                instance_path: "/frametype".to_string(),
                schema_path: "/anyOf".to_string(),
                message: format!("{frametype} is not one of {}", expected.join(", ")),
            });
        }
        violations.extend(collect_violations(&self.union, record));
        ValidationViolations { violations }
    }
}

static SHARED_VALIDATOR: OnceLock<Result<FrameValidator, String>> = OnceLock::new();

/// Validate a record with a lazily compiled, process-wide validator.
pub fn validate(record: &Value) -> Result<Frame, FrameValidationError> {
    match SHARED_VALIDATOR.get_or_init(|| FrameValidator::new().map_err(|e| e.to_string())) {
        Ok(validator) => validator.validate(record),
        Err(reason) => Err(FrameValidationError::SchemaBuildError {
            shape: essential_core::ESSENTIAL_COLLECTION.to_string(),
            reason: reason.clone(),
        }),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Frame records use string keys only; any other key type is an error.
/// YAML tags are dropped and their inner value kept.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let serde_yaml::Value::String(key) = k else {
                    return Err(format!("non-string map key: {k:?}"));
                };
                object.insert(key.clone(), yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
