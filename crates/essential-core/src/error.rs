//! # Error Types
//!
//! Errors raised by the frame model itself. Shape validation failures are
//! reported by `essential-schema`, which owns the schema contract; the
//! variants here cover conversions performed directly on typed frames.

use thiserror::Error;

/// Top-level error type for the frame model.
#[derive(Error, Debug)]
pub enum EssentialError {
    /// A `frametype` string that is not one of the five literals.
    #[error("unknown frame type: {0:?}")]
    UnknownFrameType(String),

    /// Converting a frame to or from a JSON value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
