//! The reference grammar.
//!
//! This module drives the interpreter core the way any LaTeX grammar would:
//!     it recognizes commands, groups, environments and text,
//!     and uses the [dispatcher](crate::dispatch) protocol to parse command arguments.
//!
//! Arguments that are not content (numbers, lengths, coordinates, key-value lists)
//!     are read as raw text and evaluated by the parsers in the submodules.

mod driver;
mod input;
pub mod keyval;
pub mod length;
pub mod number;

pub(crate) use driver::run;

use crate::error::LatexError;

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Location {
    pub fn new<S: Into<String>>(file: S, line: usize, column: usize) -> Location {
        Location {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Error returned when the input does not match the grammar.
#[derive(Debug)]
pub struct Error {
    pub expected: String,
    pub got: String,
    pub guidance: String,
}

impl Error {
    pub fn new<S: Into<String>, T: Into<String>>(expected: S, got: T) -> Error {
        Error {
            expected: expected.into(),
            got: got.into(),
            guidance: String::new(),
        }
    }

    pub fn with_guidance<S: Into<String>>(mut self, guidance: S) -> Error {
        self.guidance = guidance.into();
        self
    }
}

impl LatexError for Error {
    fn title(&self) -> String {
        format!("expected {}, found {}", self.expected, self.got)
    }

    fn notes(&self) -> Vec<String> {
        if self.guidance.is_empty() {
            vec![]
        } else {
            vec![self.guidance.clone()]
        }
    }
}

/// Describes the start of some raw input for error messages.
pub(crate) fn describe(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "nothing".into();
    }
    let mut chars = trimmed.chars();
    let prefix: String = chars.by_ref().take(20).collect();
    if chars.next().is_some() {
        format!("`{prefix}...`")
    } else {
        format!("`{prefix}`")
    }
}

/// Parses a floating point argument.
pub fn parse_float(text: &str) -> Result<f64, Error> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::new("a number", describe(text)))
}
