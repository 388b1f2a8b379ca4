//! Utility modules.

/// Lenient numeric (de)serialization helpers shared by the entity types.
pub mod number;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
