//! Latexlang commands API
//!
//! A command is a Rust function together with a [Signature] that tells the grammar
//!     how to parse the command's arguments.
//! When the grammar sees `\name` it asks the [dispatcher](crate::dispatch)
//!     to open an argument frame for the command,
//!     parses each argument in the shape the dispatcher asks for,
//!     and finally invokes the command's [CommandFn] with the parsed [Arguments].
//! The function may change the interpreter state (counters, the scope stack, labels)
//!     and returns nodes of the output tree.
//!
//! ## Preludes
//!
//! Some commands need to change the state before one of their content arguments
//!     is parsed. For example, `\textbf{...}` makes its argument bold.
//! Such commands place the execute marker `X` in their signature and provide a [PreludeFn].
//! The grammar runs the prelude, inside the command's scope frame,
//!     when it reaches the marker.
//!
//! ## Items
//!
//! List environments use the `items` shape.
//! Their body is split at each `\item`, and the command's [ItemFn], if any,
//!     is invoked at the start of every item to produce the item's label.

use crate::output::Backend;
use crate::prelude as txl;
use crate::vm::Interpreter;
use dimen::{Length, Vector};

mod map;
mod shape;

pub use map::Map;
pub use shape::InvalidSignatureError;
pub use shape::Mode;
pub use shape::Shape;
pub use shape::Signature;

/// The Rust type of command functions.
pub type CommandFn<B> = fn(
    interpreter: &mut Interpreter<B>,
    arguments: Arguments<<B as Backend>::Node>,
) -> txl::Result<Vec<<B as Backend>::Node>>;

/// The Rust type of preludes, run when the grammar reaches an `X` shape.
pub type PreludeFn<B> = fn(
    interpreter: &mut Interpreter<B>,
    arguments: &Arguments<<B as Backend>::Node>,
) -> txl::Result<()>;

/// The Rust type of item hooks.
///
/// The hook receives the optional `\item[label]` content and returns the label to render.
pub type ItemFn<B> = fn(
    interpreter: &mut Interpreter<B>,
    arguments: &Arguments<<B as Backend>::Node>,
    label: Option<Vec<<B as Backend>::Node>>,
) -> txl::Result<Vec<<B as Backend>::Node>>;

/// The implementation of a command.
pub struct Implementation<B: Backend> {
    run: CommandFn<B>,
    prelude: Option<PreludeFn<B>>,
    item: Option<ItemFn<B>>,
    doc: Option<&'static str>,
}

impl<B: Backend> Implementation<B> {
    pub fn new(run: CommandFn<B>) -> Implementation<B> {
        Implementation {
            run,
            prelude: None,
            item: None,
            doc: None,
        }
    }

    pub fn with_prelude(mut self, prelude: PreludeFn<B>) -> Implementation<B> {
        self.prelude = Some(prelude);
        self
    }

    pub fn with_item(mut self, item: ItemFn<B>) -> Implementation<B> {
        self.item = Some(item);
        self
    }

    pub fn with_doc(mut self, doc: &'static str) -> Implementation<B> {
        self.doc = Some(doc);
        self
    }

    pub fn run(&self) -> CommandFn<B> {
        self.run
    }

    pub fn prelude(&self) -> Option<PreludeFn<B>> {
        self.prelude
    }

    pub fn item(&self) -> Option<ItemFn<B>> {
        self.item
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }
}

// Implemented manually as the derived implementation requires B to be Clone.
impl<B: Backend> Clone for Implementation<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend> Copy for Implementation<B> {}

impl<B: Backend> From<CommandFn<B>> for Implementation<B> {
    fn from(run: CommandFn<B>) -> Self {
        Implementation::new(run)
    }
}

/// A single item of a list environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<N> {
    pub label: Vec<N>,
    pub content: Vec<N>,
}

/// A parsed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument<N> {
    Star(bool),
    Content(Vec<N>),
    /// Identifiers, keys, urls and command names.
    Text(String),
    Integer(i32),
    Float(f64),
    Length(Length),
    Coordinate(Vector),
    KeyValues(Vec<(String, Option<String>)>),
    List(Vec<String>),
    Items(Vec<Item<N>>),
    /// An optional argument that was not given.
    Absent,
}

impl<N> Argument<N> {
    fn description(&self) -> &'static str {
        match self {
            Argument::Star(_) => "a star",
            Argument::Content(_) => "content",
            Argument::Text(_) => "text",
            Argument::Integer(_) => "an integer",
            Argument::Float(_) => "a number",
            Argument::Length(_) => "a length",
            Argument::Coordinate(_) => "a coordinate",
            Argument::KeyValues(_) => "a key-value list",
            Argument::List(_) => "a list",
            Argument::Items(_) => "list items",
            Argument::Absent => "nothing",
        }
    }
}

/// The arguments of a command invocation, in signature order.
///
/// Optional arguments that were not given are [Argument::Absent],
///     so indices always match the signature.
/// Shapes that produce no argument (`X` and resolved branches) are not counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<N> {
    command: String,
    values: Vec<Argument<N>>,
}

macro_rules! accessors {
    ( $( $name: ident, $optional_name: ident, $variant: ident, $type: ty, )+ ) => {
        $(
            pub fn $name(&self, i: usize) -> txl::Result<$type> {
                match self.values.get(i) {
                    Some(Argument::$variant(v)) => Ok(v.clone()),
                    other => Err(self.type_error(i, stringify!($variant), other)),
                }
            }

            pub fn $optional_name(&self, i: usize) -> txl::Result<Option<$type>> {
                match self.values.get(i) {
                    Some(Argument::$variant(v)) => Ok(Some(v.clone())),
                    Some(Argument::Absent) | None => Ok(None),
                    other => Err(self.type_error(i, stringify!($variant), other)),
                }
            }
        )+
    };
}

impl<N> Arguments<N> {
    pub fn new<S: Into<String>>(command: S, values: Vec<Argument<N>>) -> Arguments<N> {
        Arguments {
            command: command.into(),
            values,
        }
    }

    /// Name of the command the arguments belong to.
    pub fn name(&self) -> &str {
        &self.command
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Argument<N>> {
        self.values.get(i)
    }

    pub fn push(&mut self, argument: Argument<N>) {
        self.values.push(argument);
    }

    pub fn is_present(&self, i: usize) -> bool {
        !matches!(self.values.get(i), Some(Argument::Absent) | None)
    }

    /// Whether the star was given; false for any other argument.
    pub fn star(&self, i: usize) -> bool {
        matches!(self.values.get(i), Some(Argument::Star(true)))
    }

    accessors!(
        text, optional_text, Text, String,
        integer, optional_integer, Integer, i32,
        float, optional_float, Float, f64,
        length, optional_length, Length, Length,
        coordinate, optional_coordinate, Coordinate, Vector,
    );

    /// Returns the key-value list, empty if the argument was not given.
    pub fn key_values(&self, i: usize) -> txl::Result<&[(String, Option<String>)]> {
        match self.values.get(i) {
            Some(Argument::KeyValues(v)) => Ok(v),
            Some(Argument::Absent) | None => Ok(&[]),
            other => Err(self.type_error(i, "KeyValues", other)),
        }
    }

    /// Returns the comma separated list, empty if the argument was not given.
    pub fn list(&self, i: usize) -> txl::Result<&[String]> {
        match self.values.get(i) {
            Some(Argument::List(v)) => Ok(v),
            Some(Argument::Absent) | None => Ok(&[]),
            other => Err(self.type_error(i, "List", other)),
        }
    }

    /// Moves content out of the arguments, leaving it absent.
    pub fn take_content(&mut self, i: usize) -> txl::Result<Vec<N>> {
        match self.take_optional_content(i)? {
            Some(content) => Ok(content),
            None => Err(self.type_error(i, "Content", Some(&Argument::Absent))),
        }
    }

    pub fn take_optional_content(&mut self, i: usize) -> txl::Result<Option<Vec<N>>> {
        match self.values.get(i) {
            Some(Argument::Content(_)) => {}
            Some(Argument::Absent) | None => return Ok(None),
            other => return Err(self.type_error(i, "Content", other)),
        }
        match std::mem::replace(&mut self.values[i], Argument::Absent) {
            Argument::Content(content) => Ok(Some(content)),
            _ => Ok(None),
        }
    }

    pub fn take_items(&mut self, i: usize) -> txl::Result<Vec<Item<N>>> {
        match self.values.get_mut(i) {
            Some(Argument::Items(items)) => return Ok(std::mem::take(items)),
            Some(_) | None => {}
        }
        Err(self.type_error(i, "Items", self.values.get(i)))
    }

    fn type_error(
        &self,
        i: usize,
        expected: &'static str,
        got: Option<&Argument<N>>,
    ) -> Box<crate::error::Error> {
        ArgumentTypeError {
            command: self.command.clone(),
            index: i,
            expected,
            got: got.map(Argument::description).unwrap_or("no argument"),
        }
        .into()
    }
}

/// Error returned when a command reads an argument that does not have the requested type.
///
/// This indicates a mismatch between a command's signature and its implementation.
#[derive(Debug)]
pub struct ArgumentTypeError {
    pub command: String,
    pub index: usize,
    pub expected: &'static str,
    pub got: &'static str,
}

impl crate::error::LatexError for ArgumentTypeError {
    fn title(&self) -> String {
        format!(
            "argument {} of \\{} is {}, not {}",
            self.index + 1,
            self.command,
            self.got,
            self.expected
        )
    }

    fn notes(&self) -> Vec<String> {
        vec!["the command's signature does not match its implementation".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments() -> Arguments<&'static str> {
        Arguments::new(
            "put",
            vec![
                Argument::Star(true),
                Argument::Absent,
                Argument::Content(vec!["a", "b"]),
                Argument::Integer(3),
                Argument::Text("sec:intro".into()),
            ],
        )
    }

    #[test]
    fn typed_accessors() {
        let args = arguments();
        assert_eq!(args.name(), "put");
        assert!(args.star(0));
        assert!(!args.star(1));
        assert!(!args.is_present(1));
        assert_eq!(args.integer(3).unwrap(), 3);
        assert_eq!(args.optional_integer(1).unwrap(), None);
        assert_eq!(args.text(4).unwrap(), "sec:intro");
        assert!(args.key_values(1).unwrap().is_empty());
    }

    #[test]
    fn wrong_type() {
        let args = arguments();
        let err = args.integer(4).unwrap_err();
        assert_eq!(err.title(), "argument 5 of \\put is text, not Integer");
        assert!(args.length(2).is_err());
        assert!(args.optional_length(2).is_err());
    }

    #[test]
    fn take_content() {
        let mut args = arguments();
        assert_eq!(args.take_content(2).unwrap(), vec!["a", "b"]);
        assert!(args.take_content(2).is_err());
        assert_eq!(args.take_optional_content(1).unwrap(), None);
    }
}
