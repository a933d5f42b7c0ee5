//! # essential-schema: Frame Record Validation
//!
//! Owns the shape contract every record of the `essential` collection must
//! satisfy, and turns raw records into typed [`essential_core::Frame`]s.
//!
//! ## Shapes (`schema`)
//!
//! The [`schema`] module declares the base frame shape and derives the
//! class, slot, facet, and simple-instance shapes from it by replacing the
//! `frametype` literal. [`collection_schema`] combines all five into the
//! union document the content loader registers.
//!
//! ## Validation (`validate`)
//!
//! [`FrameValidator`] compiles each shape once and validates records
//! against the shape their `frametype` selects. Failures list every
//! violating field. Records with an unknown `frametype` fail at the union
//! level.
//!
//! ## Closed Shapes (`audit`)
//!
//! Every object in every shape rejects unknown fields. [`audit`] walks a
//! schema and reports any object that does not.
//!
//! ## Crate Policy
//!
//! - Depends only on `essential-core` internally.
//! - Validation is pure: no I/O except in the explicit file helpers.
//! - Invalid records are rejected in full; there is no partial success.

pub mod audit;
pub mod schema;
pub mod validate;

pub use audit::{audit_closed_shapes, OpenShapeFinding};
pub use schema::{collection_schema, shape_for, FrameShape, Presence};
pub use validate::{
    validate, DocumentFormat, FrameValidationError, FrameValidator, ValidationViolations,
    Violation,
};
