//! Utility modules.

/// Log sanitization utilities to prevent sensitive data exposure.
pub(crate) mod log_sanitizer;

/// Request path normalisation.
pub(crate) mod path;
