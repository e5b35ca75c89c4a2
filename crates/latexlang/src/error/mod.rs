//! Error handling
//!
//! Problems found while interpreting a document have one of three severities.
//!
//! - Fatal errors abort the pass.
//!   They are returned from every fallible operation as a boxed [Error],
//!   which wraps a [LatexError] trait object together with the command being
//!   run and the position in the source where the problem occurred.
//!
//! - Recoverable problems (an unknown package, a counter value a formatter
//!   cannot represent) are recorded as warnings in [Diagnostics] and
//!   processing continues.
//!
//! - Informational notes, like references that were never resolved, are
//!   recorded at the end of the document.

use crate::parse::Location;
use latexlang_stdext::algorithms::spellcheck;

pub mod display;

/// Implementations of this trait describe a fatal error in a document.
pub trait LatexError: std::fmt::Debug + 'static {
    fn title(&self) -> String;

    fn notes(&self) -> Vec<String> {
        vec![]
    }
}

/// A fatal error with the context in which it occurred.
#[derive(Debug)]
pub struct Error {
    pub error: Box<dyn LatexError>,
    /// Name of the command that was running, without the leading backslash.
    pub command: Option<String>,
    pub location: Option<Location>,
}

impl Error {
    pub fn new<E: LatexError>(error: E) -> Box<Error> {
        Box::new(Error {
            error: Box::new(error),
            command: None,
            location: None,
        })
    }

    pub fn title(&self) -> String {
        self.error.title()
    }

    pub fn notes(&self) -> Vec<String> {
        self.error.notes()
    }

    /// Attaches the command and location, unless they were already set closer
    ///     to where the error happened.
    pub fn with_context(mut self: Box<Self>, command: Option<&str>, location: &Location) -> Box<Error> {
        if self.command.is_none() {
            self.command = command.map(str::to_string);
        }
        if self.location.is_none() {
            self.location = Some(location.clone());
        }
        self
    }
}

impl<E: LatexError> From<E> for Box<Error> {
    fn from(error: E) -> Self {
        Error::new(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_error(f, self)
    }
}

impl std::error::Error for Error {}

/// The severity of a non-fatal [Diagnostic].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Info,
}

/// A recoverable problem or informational note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub command: Option<String>,
    pub location: Option<Location>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::format_diagnostic(f, self)
    }
}

/// The non-fatal diagnostics recorded while interpreting a document.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => crate::log::warn!("{}", diagnostic.message),
            Severity::Info => crate::log::info!("{}", diagnostic.message),
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An error described by a title and some notes.
#[derive(Debug)]
pub struct SimpleError {
    pub title: String,
    pub notes: Vec<String>,
}

impl SimpleError {
    pub fn new<T: Into<String>>(title: T) -> SimpleError {
        SimpleError {
            title: title.into(),
            notes: vec![],
        }
    }

    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl LatexError for SimpleError {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn notes(&self) -> Vec<String> {
        self.notes.clone()
    }
}

/// Error for a name that is not defined, with spelling suggestions.
///
/// The same shape of error is used for commands, counters, lengths,
///     document classes and environments.
#[derive(Debug)]
pub struct UndefinedError {
    /// What kind of thing is undefined, e.g. "command" or "counter".
    pub what: &'static str,
    pub name: String,
    pub close_names: Vec<String>,
}

impl UndefinedError {
    pub fn new<'a, I: IntoIterator<Item = &'a str>>(
        what: &'static str,
        name: &str,
        dictionary: I,
    ) -> UndefinedError {
        UndefinedError {
            what,
            name: name.into(),
            close_names: spellcheck::suggest(dictionary, name, 3)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl LatexError for UndefinedError {
    fn title(&self) -> String {
        if self.what == "command" {
            format!("undefined command \\{}", self.name)
        } else {
            format!("undefined {} `{}`", self.what, self.name)
        }
    }

    fn notes(&self) -> Vec<String> {
        match self.close_names.as_slice() {
            [] => vec![],
            [name] => vec![format!("did you mean `{name}`?")],
            names => vec![format!(
                "did you mean one of {}?",
                names
                    .iter()
                    .map(|n| format!("`{n}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
        }
    }
}

impl LatexError for dimen::IncompatibleUnitsError {
    fn title(&self) -> String {
        format!("{self}")
    }

    fn notes(&self) -> Vec<String> {
        vec!["lengths in relative units like em and ex cannot be combined with absolute lengths".into()]
    }
}

impl LatexError for dimen::OverflowError {
    fn title(&self) -> String {
        format!("{self}")
    }
}

impl LatexError for dimen::ParseLengthError {
    fn title(&self) -> String {
        format!("{self}")
    }
}

impl LatexError for dimen::RelativeLengthError {
    fn title(&self) -> String {
        format!("{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_error_suggestions() {
        let err = UndefinedError::new("command", "textbd", ["textbf", "textit", "label"]);
        assert_eq!(err.title(), "undefined command \\textbd");
        assert_eq!(err.notes(), vec!["did you mean `textbf`?".to_string()]);

        let err = UndefinedError::new("counter", "sectoin", ["section", "chapter"]);
        assert_eq!(err.title(), "undefined counter `sectoin`");
        assert_eq!(err.notes(), vec!["did you mean `section`?".to_string()]);
    }

    #[test]
    fn context_is_only_attached_once() {
        let inner = Location::new("a.tex", 1, 2);
        let outer = Location::new("a.tex", 3, 4);
        let err = Error::new(SimpleError::new("oops"))
            .with_context(Some("textbf"), &inner)
            .with_context(Some("section"), &outer);
        assert_eq!(err.command.as_deref(), Some("textbf"));
        assert_eq!(err.location, Some(inner));
    }

    #[test]
    fn diagnostics_filter_warnings() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push(Diagnostic {
            severity: Severity::Info,
            message: "note".into(),
            command: None,
            location: None,
        });
        assert!(!diagnostics.has_warnings());
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: "careful".into(),
            command: None,
            location: None,
        });
        assert!(diagnostics.has_warnings());
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);
    }
}
