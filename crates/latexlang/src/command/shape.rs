//! Argument shapes and command signatures
//!
//! A signature is written as a mode token followed by shape codes,
//!     separated by whitespace:
//!
//! ```
//! # use latexlang::command::{Mode, Shape, Signature};
//! let signature: Signature = "V s o? g".parse().unwrap();
//! assert_eq!(signature.mode, Mode::Vertical);
//! assert_eq!(signature.shapes, vec![Shape::Star, Shape::Optional, Shape::Group]);
//! ```
//!
//! | code | shape |
//! |------|-------|
//! | `s` | optional star |
//! | `g`, `hg` | content group, horizontal content group |
//! | `o?` | optional content in brackets |
//! | `i`, `i?` | identifier |
//! | `k`, `k?` | key |
//! | `n`, `n?` | integer expression |
//! | `l`, `l?` | length expression |
//! | `c`, `c?` | coordinate in parentheses |
//! | `kv`, `kv?` | key-value list |
//! | `csv`, `csv?` | comma separated list |
//! | `u` | url |
//! | `m` | command name |
//! | `f` | floating point number |
//! | `X` | run the command's prelude |
//! | `body` | environment body |
//! | `items` | environment body split into list items |
//!
//! A branch `(a b | c d)` is resolved by the next character of the input.

use crate::error::LatexError;

/// The shape of a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Star,
    Group,
    HorizontalGroup,
    Optional,
    Identifier,
    OptionalIdentifier,
    Key,
    OptionalKey,
    Number,
    OptionalNumber,
    Length,
    OptionalLength,
    Coordinate,
    OptionalCoordinate,
    KeyValues,
    OptionalKeyValues,
    Csv,
    OptionalCsv,
    Url,
    Macro,
    Float,
    Execute,
    Body,
    Items,
    Branch(Vec<Vec<Shape>>),
}

const CODES: [(&str, Shape); 24] = [
    ("s", Shape::Star),
    ("g", Shape::Group),
    ("hg", Shape::HorizontalGroup),
    ("o?", Shape::Optional),
    ("i", Shape::Identifier),
    ("i?", Shape::OptionalIdentifier),
    ("k", Shape::Key),
    ("k?", Shape::OptionalKey),
    ("n", Shape::Number),
    ("n?", Shape::OptionalNumber),
    ("l", Shape::Length),
    ("l?", Shape::OptionalLength),
    ("c", Shape::Coordinate),
    ("c?", Shape::OptionalCoordinate),
    ("kv", Shape::KeyValues),
    ("kv?", Shape::OptionalKeyValues),
    ("csv", Shape::Csv),
    ("csv?", Shape::OptionalCsv),
    ("u", Shape::Url),
    ("m", Shape::Macro),
    ("f", Shape::Float),
    ("X", Shape::Execute),
    ("body", Shape::Body),
    ("items", Shape::Items),
];

impl Shape {
    pub fn from_code(code: &str) -> Option<Shape> {
        CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, shape)| shape.clone())
    }

    /// Whether the grammar may decline the shape.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            Shape::Star
                | Shape::Optional
                | Shape::OptionalIdentifier
                | Shape::OptionalKey
                | Shape::OptionalNumber
                | Shape::OptionalLength
                | Shape::OptionalCoordinate
                | Shape::OptionalKeyValues
                | Shape::OptionalCsv
        )
    }

    /// The character that introduces the argument, for shapes with a special opening.
    pub fn opening(&self) -> Option<char> {
        match self {
            Shape::Star => Some('*'),
            Shape::Coordinate | Shape::OptionalCoordinate => Some('('),
            Shape::Optional
            | Shape::OptionalIdentifier
            | Shape::OptionalKey
            | Shape::OptionalNumber
            | Shape::OptionalLength
            | Shape::OptionalKeyValues
            | Shape::OptionalCsv => Some('['),
            _ => None,
        }
    }

    /// Whether the shape, as the first of a branch alternative, accepts the
    ///     next significant character of the input.
    pub fn accepts(&self, next: Option<char>) -> bool {
        match self.opening() {
            Some(opening) => next == Some(opening),
            None => match next {
                Some(c) => !matches!(c, '[' | '(' | '*'),
                None => true,
            },
        }
    }

    pub fn code(&self) -> String {
        if let Shape::Branch(alternatives) = self {
            let alternatives: Vec<String> = alternatives
                .iter()
                .map(|shapes| {
                    shapes
                        .iter()
                        .map(Shape::code)
                        .collect::<Vec<String>>()
                        .join(" ")
                })
                .collect();
            return format!("({})", alternatives.join(" | "));
        }
        CODES
            .iter()
            .find(|(_, shape)| shape == self)
            .map(|(code, _)| code.to_string())
            .unwrap_or_default()
    }
}

/// The mode a command runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Inline: output joins the current paragraph.
    Horizontal,
    /// Block: the current paragraph ends before the output.
    Vertical,
    /// Either mode; output joins the current paragraph.
    #[default]
    Either,
    /// Only allowed before `\begin{document}`.
    Preamble,
}

impl Mode {
    pub fn code(&self) -> &'static str {
        match self {
            Mode::Horizontal => "H",
            Mode::Vertical => "V",
            Mode::Either => "HV",
            Mode::Preamble => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Mode> {
        Some(match code {
            "H" => Mode::Horizontal,
            "V" => Mode::Vertical,
            "HV" => Mode::Either,
            "P" => Mode::Preamble,
            _ => return None,
        })
    }
}

/// The mode and argument shapes of a command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub mode: Mode,
    pub shapes: Vec<Shape>,
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mode.code())?;
        for shape in &self.shapes {
            write!(f, " {}", shape.code())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Signature {
    type Err = InvalidSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| InvalidSignatureError {
            signature: s.into(),
            reason,
        };
        let mut words = tokenize(s).into_iter();
        let mode = match words.next() {
            None => return Err(err("the mode is missing".into())),
            Some(word) => {
                Mode::from_code(word).ok_or_else(|| err(format!("unknown mode `{word}`")))?
            }
        };
        let mut shapes = vec![];
        let mut branch: Option<Vec<Vec<Shape>>> = None;
        for word in words {
            match (word, &mut branch) {
                ("(", Some(_)) => return Err(err("branches cannot be nested".into())),
                ("(", None) => branch = Some(vec![vec![]]),
                ("|", Some(alternatives)) => alternatives.push(vec![]),
                (")", Some(_)) => {
                    if let Some(alternatives) = branch.take() {
                        shapes.push(Shape::Branch(alternatives));
                    }
                }
                ("|" | ")", None) => return Err(err(format!("unexpected `{word}`"))),
                (code, current) => {
                    let shape = Shape::from_code(code)
                        .ok_or_else(|| err(format!("unknown shape `{code}`")))?;
                    match current.as_mut().and_then(|alternatives| alternatives.last_mut()) {
                        Some(alternative) => alternative.push(shape),
                        None => shapes.push(shape),
                    }
                }
            }
        }
        if branch.is_some() {
            return Err(err("unterminated branch".into()));
        }
        Ok(Signature { mode, shapes })
    }
}

fn tokenize(s: &str) -> Vec<&str> {
    let mut words = vec![];
    let mut start: Option<usize> = None;
    for (i, c) in s.char_indices() {
        let delimiter = matches!(c, '(' | ')' | '|');
        if c.is_whitespace() || delimiter {
            if let Some(j) = start.take() {
                words.push(&s[j..i]);
            }
            if delimiter {
                words.push(&s[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(j) = start {
        words.push(&s[j..]);
    }
    words
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSignatureError {
    pub signature: String,
    pub reason: String,
}

impl LatexError for InvalidSignatureError {
    fn title(&self) -> String {
        format!("invalid command signature `{}`: {}", self.signature, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let signature: Signature = "H hg".parse().unwrap();
        assert_eq!(
            signature,
            Signature {
                mode: Mode::Horizontal,
                shapes: vec![Shape::HorizontalGroup]
            }
        );
    }

    #[test]
    fn parse_mode_only() {
        let signature: Signature = "HV".parse().unwrap();
        assert_eq!(signature, Signature::default());
    }

    #[test]
    fn parse_branch() {
        let signature: Signature = "H (c? l | g) X".parse().unwrap();
        assert_eq!(
            signature.shapes,
            vec![
                Shape::Branch(vec![
                    vec![Shape::OptionalCoordinate, Shape::Length],
                    vec![Shape::Group]
                ]),
                Shape::Execute,
            ]
        );
        assert_eq!(signature.to_string(), "H (c? l | g) X");
    }

    #[test]
    fn parse_branch_with_empty_alternative() {
        let signature: Signature = "V (s|)".parse().unwrap();
        assert_eq!(
            signature.shapes,
            vec![Shape::Branch(vec![vec![Shape::Star], vec![]])]
        );
    }

    #[test]
    fn parse_errors() {
        for input in ["", "Q g", "H zz", "H (g | (s))", "H g )", "H (g"] {
            assert!(input.parse::<Signature>().is_err(), "{input}");
        }
    }

    #[test]
    fn accepts() {
        assert!(Shape::Optional.accepts(Some('[')));
        assert!(!Shape::Optional.accepts(Some('{')));
        assert!(Shape::OptionalCoordinate.accepts(Some('(')));
        assert!(Shape::Star.accepts(Some('*')));
        assert!(Shape::Group.accepts(Some('{')));
        assert!(!Shape::Group.accepts(Some('[')));
        assert!(Shape::Group.accepts(None));
    }

    #[test]
    fn every_code_round_trips() {
        for (code, shape) in CODES.iter() {
            assert_eq!(Shape::from_code(code).as_ref(), Some(shape));
            assert_eq!(&shape.code(), code);
        }
    }
}
