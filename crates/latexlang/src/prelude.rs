//! Latexlang prelude.

/// Result type in Latexlang.
///
/// The error is boxed to keep the happy path small.
pub type Result<T> = std::result::Result<T, Box<crate::error::Error>>;
