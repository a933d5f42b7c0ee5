//! # essential-core: Frame Model for the Essential Collection
//!
//! Defines the typed records of a frame-based vocabulary export: classes,
//! slots, facets, and simple instances, each carried as a [`Frame`]
//! variant. Records are produced by `essential-schema` after validation
//! and are immutable from then on.
//!
//! ## Key Design Principles
//!
//! 1. **One sum type per record.** [`Frame`] has one variant per
//!    `frametype` literal. Type guards are discriminant checks, and the
//!    `as_*` accessors narrow a frame to its variant payload.
//!
//! 2. **Closed shapes.** Every record struct denies unknown fields, and
//!    optional lists may be absent but not `null`, so a frame that
//!    deserializes is a frame the schema would accept.
//!
//! 3. **Locale lives in the slug.** Entries are keyed by `<lang>/<name>`.
//!    There is no locale field on [`Frame`]; [`create_is_lang_entry`]
//!    partitions collections by slug prefix.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `essential-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod entry;
pub mod error;
pub mod frame;

pub use entry::{
    create_is_lang_entry, has_lang_prefix, is_class_entry, is_english_entry, is_facet_entry,
    is_simple_instance_entry, is_slot_entry, EntrySlug, EssentialEntry, ENGLISH,
    ESSENTIAL_COLLECTION,
};
pub use error::EssentialError;
pub use frame::{
    is_class, is_facet, is_simple_instance, is_slot, Frame, FrameData, FrameType, OwnSlotValue,
    TemplateFacetValue, ValueComponent, FRAME_TYPE_COUNT,
};
