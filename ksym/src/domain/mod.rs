//! Domain model for ksym
//!
//! This module contains core domain types and errors that provide:
//! - A typed address for command-line and caller input
//! - Structured error handling for symbol table builds

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::Address;

pub use errors::{AddressParseError, KsymError};
