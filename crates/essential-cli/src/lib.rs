//! # essential-cli: Command-Line Interface
//!
//! Provides the `essential` binary.
//!
//! ## Subcommands
//!
//! - `essential validate PATH...`: validate frame documents or
//!   collection directories laid out as `<lang>/<name>.{yaml,yml,json}`.
//! - `essential schema`: print the collection schema; `--audit` checks
//!   that every shape is closed.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; validation lives in `essential-schema`.
//! - Handlers return a process exit code: 0 success, 1 failure.

pub mod schema;
pub mod validate;
