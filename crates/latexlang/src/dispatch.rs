//! Argument dispatcher
//!
//! The dispatcher is the protocol between the grammar and the command registry.
//! When the grammar recognizes a command it [opens](Dispatcher::open) a frame,
//!     which looks up the command's signature.
//! It then repeatedly [peeks](Dispatcher::peek) at the next shape,
//!     parses input in that shape, [consumes](Dispatcher::next_shape) the shape
//!     and [pushes](Dispatcher::push_argument) the parsed argument.
//! Branches are [resolved](Dispatcher::resolve_branch) using the next
//!     significant character of the input.
//! Finally the grammar [closes](Dispatcher::close) the frame and gets the
//!     arguments for the command.
//!
//! Frames stack: a content argument may itself contain command invocations.

use crate::command::{Argument, Arguments, Map, Mode, Shape};
use crate::error::{LatexError, UndefinedError};
use crate::output::Backend;
use crate::prelude as txl;
use std::collections::VecDeque;

#[derive(Debug)]
struct Frame<N> {
    command: String,
    remaining: VecDeque<Shape>,
    arguments: Arguments<N>,
}

#[derive(Debug)]
pub struct Dispatcher<N> {
    frames: Vec<Frame<N>>,
}

impl<N> Default for Dispatcher<N> {
    fn default() -> Self {
        Dispatcher { frames: vec![] }
    }
}

impl<N> Dispatcher<N> {
    /// Opens a frame for the command and returns the mode of its signature.
    pub fn open<B: Backend<Node = N>>(&mut self, commands: &Map<B>, name: &str) -> txl::Result<Mode> {
        if !commands.contains(name) {
            return Err(UndefinedError::new("command", name, commands.names()).into());
        }
        let signature = commands.signature(name);
        crate::log::debug!("opening \\{name} with signature `{signature}`");
        self.frames.push(Frame {
            command: name.to_string(),
            remaining: signature.shapes.into(),
            arguments: Arguments::new(name, vec![]),
        });
        Ok(signature.mode)
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Name of the command in the innermost frame.
    pub fn command(&self) -> Option<&str> {
        self.frames.last().map(|frame| frame.command.as_str())
    }

    /// Returns the next shape of the innermost frame.
    pub fn peek(&self) -> Option<&Shape> {
        self.frames.last().and_then(|frame| frame.remaining.front())
    }

    /// Replaces a leading branch with the first alternative accepting the character.
    ///
    /// Does nothing if the next shape is not a branch.
    pub fn resolve_branch(&mut self, next: Option<char>) -> txl::Result<()> {
        let frame = self.top_mut()?;
        let alternatives = match frame.remaining.front() {
            Some(Shape::Branch(alternatives)) => alternatives,
            _ => return Ok(()),
        };
        let chosen = alternatives
            .iter()
            .find(|shapes| shapes.first().map_or(true, |shape| shape.accepts(next)))
            .cloned();
        let Some(chosen) = chosen else {
            return Err(NoMatchingBranchError {
                command: frame.command.clone(),
                next,
            }
            .into());
        };
        frame.remaining.pop_front();
        for shape in chosen.into_iter().rev() {
            frame.remaining.push_front(shape);
        }
        Ok(())
    }

    /// Consumes the next shape if it equals the expected shape.
    pub fn next_shape(&mut self, expected: &Shape) -> bool {
        match self.frames.last_mut() {
            Some(frame) if frame.remaining.front() == Some(expected) => {
                frame.remaining.pop_front();
                true
            }
            _ => false,
        }
    }

    /// Adds a parsed argument to the innermost frame.
    pub fn push_argument(&mut self, argument: Argument<N>) -> txl::Result<()> {
        self.top_mut()?.arguments.push(argument);
        Ok(())
    }

    /// Arguments parsed so far in the innermost frame.
    pub fn arguments(&self) -> Option<&Arguments<N>> {
        self.frames.last().map(|frame| &frame.arguments)
    }

    /// Closes the innermost frame and returns its arguments.
    ///
    /// Remaining optional shapes are recorded as absent.
    /// Fails if a mandatory shape, an unresolved branch or an execute marker remains.
    pub fn close(&mut self) -> txl::Result<Arguments<N>> {
        let Some(mut frame) = self.frames.pop() else {
            return Err(NoOpenFrameError {}.into());
        };
        for shape in frame.remaining {
            match shape {
                Shape::Star => frame.arguments.push(Argument::Star(false)),
                shape if shape.is_optional() => frame.arguments.push(Argument::Absent),
                shape => {
                    return Err(MissingArgumentError {
                        command: frame.command,
                        shape,
                    }
                    .into())
                }
            }
        }
        Ok(frame.arguments)
    }

    /// Drops every open frame, e.g. after a fatal error.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    fn top_mut(&mut self) -> txl::Result<&mut Frame<N>> {
        match self.frames.last_mut() {
            Some(frame) => Ok(frame),
            None => Err(NoOpenFrameError {}.into()),
        }
    }
}

#[derive(Debug)]
pub struct MissingArgumentError {
    pub command: String,
    pub shape: Shape,
}

impl LatexError for MissingArgumentError {
    fn title(&self) -> String {
        format!("missing argument for \\{}", self.command)
    }

    fn notes(&self) -> Vec<String> {
        vec![format!("expected an argument of shape `{}`", self.shape.code())]
    }
}

#[derive(Debug)]
pub struct NoMatchingBranchError {
    pub command: String,
    pub next: Option<char>,
}

impl LatexError for NoMatchingBranchError {
    fn title(&self) -> String {
        match self.next {
            None => format!("input ended while reading the arguments of \\{}", self.command),
            Some(c) => format!("unexpected `{}` in the arguments of \\{}", c, self.command),
        }
    }
}

#[derive(Debug)]
pub struct NoOpenFrameError {}

impl LatexError for NoOpenFrameError {
    fn title(&self) -> String {
        "no command is being parsed".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandFn, Implementation, Signature};
    use crate::output::tree::{Node, Tree};
    use crate::vm::Interpreter;
    use std::collections::HashMap;

    fn noop(_: &mut Interpreter<Tree>, _: Arguments<Node>) -> txl::Result<Vec<Node>> {
        Ok(vec![])
    }

    fn map(signatures: &[(&'static str, &'static str)]) -> Map<Tree> {
        let mut map: Map<Tree> = Default::default();
        let implementations = signatures
            .iter()
            .map(|(name, _)| (*name, Implementation::new(noop as CommandFn<Tree>)))
            .collect();
        map.extend(implementations, signatures.iter().copied().collect::<HashMap<_, _>>())
            .unwrap();
        map
    }

    #[test]
    fn consume_group_decline_optional() {
        let map = map(&[("cmd", "H g o?")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        assert_eq!(dispatcher.open(&map, "cmd").unwrap(), Mode::Horizontal);
        assert_eq!(dispatcher.peek(), Some(&Shape::Group));
        assert!(!dispatcher.next_shape(&Shape::Optional));
        assert!(dispatcher.next_shape(&Shape::Group));
        dispatcher
            .push_argument(Argument::Content(vec![Node::text("a")]))
            .unwrap();
        let arguments = dispatcher.close().unwrap();
        assert_eq!(arguments.len(), 2);
        assert!(!arguments.is_present(1));
        assert_eq!(dispatcher.depth(), 0);
    }

    #[test]
    fn close_with_mandatory_shape_fails() {
        let map = map(&[("cmd", "H g o?")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "cmd").unwrap();
        let err = dispatcher.close().unwrap_err();
        assert_eq!(err.title(), "missing argument for \\cmd");
    }

    #[test]
    fn unconsumed_star_is_false() {
        let map = map(&[("section", "V s hg")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "section").unwrap();
        assert!(dispatcher.next_shape(&Shape::Star));
        dispatcher.push_argument(Argument::Star(true)).unwrap();
        assert!(dispatcher.next_shape(&Shape::HorizontalGroup));
        dispatcher.push_argument(Argument::Content(vec![])).unwrap();
        let arguments = dispatcher.close().unwrap();
        assert!(arguments.star(0));
    }

    #[test]
    fn undefined_command() {
        let map = map(&[("textbf", "H X hg")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        let err = dispatcher.open(&map, "textbd").unwrap_err();
        assert_eq!(err.title(), "undefined command \\textbd");
        assert_eq!(err.notes(), vec!["did you mean `textbf`?".to_string()]);
        assert_eq!(dispatcher.depth(), 0);
    }

    #[test]
    fn default_signature_for_command_without_one() {
        let mut map = map(&[]);
        map.insert("relax", Implementation::new(noop as CommandFn<Tree>));
        let mut dispatcher: Dispatcher<Node> = Default::default();
        assert_eq!(dispatcher.open(&map, "relax").unwrap(), Mode::Either);
        assert_eq!(dispatcher.peek(), None);
        assert!(dispatcher.close().unwrap().is_empty());
    }

    #[test]
    fn branch_resolution() {
        let map = map(&[("line", "H (c l | g)")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "line").unwrap();
        dispatcher.resolve_branch(Some('(')).unwrap();
        assert_eq!(dispatcher.peek(), Some(&Shape::Coordinate));

        dispatcher.reset();
        dispatcher.open(&map, "line").unwrap();
        dispatcher.resolve_branch(Some('{')).unwrap();
        assert_eq!(dispatcher.peek(), Some(&Shape::Group));
    }

    #[test]
    fn branch_without_match() {
        let map = map(&[("put", "H (c g | s)")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "put").unwrap();
        assert!(dispatcher.resolve_branch(Some('[')).is_err());
    }

    #[test]
    fn unresolved_branch_fails_at_close() {
        let map = map(&[("put", "H (c g | s)")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "put").unwrap();
        assert!(dispatcher.close().is_err());
    }

    #[test]
    fn frames_stack() {
        let map = map(&[("outer", "H g"), ("inner", "H o?")]);
        let mut dispatcher: Dispatcher<Node> = Default::default();
        dispatcher.open(&map, "outer").unwrap();
        assert!(dispatcher.next_shape(&Shape::Group));
        dispatcher.open(&map, "inner").unwrap();
        assert_eq!(dispatcher.command(), Some("inner"));
        assert_eq!(dispatcher.close().unwrap().name(), "inner");
        assert_eq!(dispatcher.command(), Some("outer"));
        dispatcher.push_argument(Argument::Content(vec![])).unwrap();
        assert_eq!(dispatcher.close().unwrap().len(), 1);
    }

    #[test]
    fn signature_display_matches_registry() {
        let map = map(&[("put", "H c g")]);
        assert_eq!(map.signature("put"), "H c g".parse::<Signature>().unwrap());
    }
}
