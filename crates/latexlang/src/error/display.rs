//! Single-line rendering of errors and diagnostics.
//!
//! ```text
//! error: undefined command \textbd (in \textbd at doc.tex:3:5)
//!   = note: did you mean `textbf`?
//! ```

use super::{Diagnostic, Error, Severity};
use crate::parse::Location;
use latexlang_stdext::color::Colorize;
use std::fmt;

pub fn format_error(f: &mut fmt::Formatter<'_>, error: &Error) -> fmt::Result {
    write!(f, "{}: {}", "error".bold().bright_red(), error.title().as_str().bold())?;
    write_context(f, error.command.as_deref(), error.location.as_ref())?;
    for note in error.notes() {
        write!(f, "\n  {} {}", "= note:".bright_cyan(), note)?;
    }
    Ok(())
}

pub fn format_diagnostic(f: &mut fmt::Formatter<'_>, diagnostic: &Diagnostic) -> fmt::Result {
    match diagnostic.severity {
        Severity::Warning => write!(f, "{}: ", "warning".bold().bright_yellow())?,
        Severity::Info => write!(f, "{}: ", "info".bold().bright_blue())?,
    }
    write!(f, "{}", diagnostic.message)?;
    write_context(
        f,
        diagnostic.command.as_deref(),
        diagnostic.location.as_ref(),
    )
}

fn write_context(
    f: &mut fmt::Formatter<'_>,
    command: Option<&str>,
    location: Option<&Location>,
) -> fmt::Result {
    let context = match (command, location) {
        (None, None) => return Ok(()),
        (Some(command), None) => format!("(in \\{command})"),
        (None, Some(location)) => format!("(at {location})"),
        (Some(command), Some(location)) => format!("(in \\{command} at {location})"),
    };
    write!(f, " {}", context.as_str().dimmed())
}

#[cfg(all(test, not(feature = "color")))]
mod tests {
    use super::super::*;

    #[test]
    fn error_line() {
        let err = Error::new(SimpleError::new("groups must be balanced").with_note("close the group"))
            .with_context(Some("end"), &Location::new("doc.tex", 3, 5));
        assert_eq!(
            format!("{err}"),
            "error: groups must be balanced (in \\end at doc.tex:3:5)\n  = note: close the group"
        );
    }

    #[test]
    fn diagnostic_line() {
        let d = Diagnostic {
            severity: Severity::Warning,
            message: "unknown package `foo`".into(),
            command: Some("usepackage".into()),
            location: None,
        };
        assert_eq!(format!("{d}"), "warning: unknown package `foo` (in \\usepackage)");
    }
}
