//! The grammar driver.
//!
//! Output is accumulated in [Flow]s.
//! A block flow (the document, an environment body) collects paragraphs and
//!     vertical material; an inline flow (a horizontal group) only collects text;
//!     a mixed flow (a general group) is inline until vertical material shows up.

use super::input::Input;
use super::{describe, keyval, length, number, parse_float, Error};
use crate::command::{Argument, Arguments, Implementation, Item, Mode, Shape};
use crate::error::{LatexError, UndefinedError};
use crate::output::Backend;
use crate::parse::Location;
use crate::prelude as txl;
use crate::vm::{Interpreter, Phase};

pub(crate) fn run<B: Backend>(
    interpreter: &mut Interpreter<B>,
    file: &str,
    source: &str,
) -> txl::Result<Vec<B::Node>> {
    let mut driver = Driver {
        interpreter,
        input: Input::new(file, source),
        arguments: 0,
    };
    let mut flow = Flow::new(Kind::Block);
    let result = match driver.parse_into(&mut flow, &Stop::EndOfInput) {
        Ok(_) => driver.interpreter.scope.end_balanced_region(),
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        return Err(err.with_context(None, &driver.input.location()));
    }
    Ok(driver.finish(flow))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Block,
    Mixed,
    Inline,
}

struct Flow<N> {
    kind: Kind,
    blocks: Vec<N>,
    paragraph: Vec<N>,
    text: String,
    // false at the start of a paragraph and right after a space
    space_allowed: bool,
}

impl<N> Flow<N> {
    fn new(kind: Kind) -> Flow<N> {
        Flow {
            kind,
            blocks: vec![],
            paragraph: vec![],
            text: String::new(),
            space_allowed: false,
        }
    }
}

/// Where a call to [Driver::parse_into] stops.
enum Stop<'a> {
    EndOfInput,
    Close(char),
    End(&'a str),
    /// Like `End`, but also stops at each `\item`.
    Items(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reason {
    EndOfInput,
    Closed,
    End,
    Item,
}

struct Driver<'a, B: Backend> {
    interpreter: &'a mut Interpreter<B>,
    input: Input,
    // Number of content arguments being parsed; text in the preamble is only
    //     allowed inside them, e.g. in `\title{...}`.
    arguments: usize,
}

impl<'a, B: Backend> Driver<'a, B> {
    fn parse_into(&mut self, flow: &mut Flow<B::Node>, stop: &Stop) -> txl::Result<Reason> {
        loop {
            if let Some(reason) = self.parse_token(flow, stop)? {
                return Ok(reason);
            }
        }
    }

    fn parse_token(&mut self, flow: &mut Flow<B::Node>, stop: &Stop) -> txl::Result<Option<Reason>> {
        let Some(c) = self.input.peek() else {
            return match stop {
                Stop::EndOfInput => Ok(Some(Reason::EndOfInput)),
                Stop::Close(close) => {
                    Err(Error::new(format!("`{close}`"), "the end of the input").into())
                }
                Stop::End(name) | Stop::Items(name) => {
                    Err(Error::new(format!("\\end{{{name}}}"), "the end of the input").into())
                }
            };
        };
        match c {
            '%' => self.input.skip_comment(),
            ' ' | '\t' | '\r' | '\n' => self.whitespace(flow),
            '\\' => return self.control_sequence(flow, stop),
            '{' => {
                self.input.next();
                self.flush_text(flow);
                self.interpreter.scope.enter(false);
                self.interpreter.scope.open_group();
            }
            '}' => {
                self.input.next();
                self.flush_text(flow);
                if self.interpreter.scope.close_group() {
                    self.interpreter.scope.exit()?;
                } else if matches!(stop, Stop::Close('}')) {
                    return Ok(Some(Reason::Closed));
                } else {
                    return Err(ContextError::UnmatchedBrace.into());
                }
            }
            ']' if matches!(stop, Stop::Close(']')) && self.interpreter.scope.open_groups() == 0 => {
                self.input.next();
                self.flush_text(flow);
                return Ok(Some(Reason::Closed));
            }
            '$' => {
                self.input.next();
                self.math(flow)?;
            }
            _ => {
                self.input.next();
                self.character(flow, c)?;
            }
        }
        Ok(None)
    }

    fn whitespace(&mut self, flow: &mut Flow<B::Node>) {
        let mut newlines = 0_usize;
        loop {
            match self.input.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.input.next();
                }
                Some('\n') => {
                    newlines += 1;
                    self.input.next();
                }
                Some('%') => self.input.skip_comment(),
                _ => break,
            }
        }
        if newlines >= 2 {
            self.paragraph_break(flow);
        } else {
            self.space(flow);
        }
    }

    fn space(&mut self, flow: &mut Flow<B::Node>) {
        if flow.space_allowed && !self.in_preamble() {
            flow.text.push(' ');
            flow.space_allowed = false;
        }
    }

    fn paragraph_break(&mut self, flow: &mut Flow<B::Node>) {
        match flow.kind {
            Kind::Inline => self.space(flow),
            Kind::Block | Kind::Mixed => self.end_paragraph(flow),
        }
    }

    fn character(&mut self, flow: &mut Flow<B::Node>, c: char) -> txl::Result<()> {
        self.check_text()?;
        match c {
            '~' => flow.text.push('\u{a0}'),
            '-' if self.input.eat('-') => {
                flow.text.push(if self.input.eat('-') { '—' } else { '–' });
            }
            '`' => flow.text.push(if self.input.eat('`') { '“' } else { '‘' }),
            '\'' => flow.text.push(if self.input.eat('\'') { '”' } else { '’' }),
            c => flow.text.push(c),
        }
        flow.space_allowed = true;
        Ok(())
    }

    fn math(&mut self, flow: &mut Flow<B::Node>) -> txl::Result<()> {
        self.check_text()?;
        let display = self.input.eat('$');
        let math = self.input.read_until('$')?;
        if display && !self.input.eat('$') {
            return Err(Error::new("`$$`", "`$`").into());
        }
        self.flush_text(flow);
        let classes: &[&str] = if display {
            &["math", "display"]
        } else {
            &["math"]
        };
        let text = self.interpreter.backend.text(&math, &[]);
        let node = self.interpreter.backend.create("span", vec![text], classes);
        flow.paragraph.push(node);
        flow.space_allowed = true;
        Ok(())
    }

    fn in_preamble(&self) -> bool {
        self.interpreter.phase == Phase::Preamble && self.arguments == 0
    }

    fn check_text(&self) -> txl::Result<()> {
        if self.in_preamble() {
            return Err(ContextError::TextInPreamble.into());
        }
        Ok(())
    }

    fn control_sequence(&mut self, flow: &mut Flow<B::Node>, stop: &Stop) -> txl::Result<Option<Reason>> {
        let location = self.input.location();
        self.input.next();
        let name = match self.input.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                let name = self.input.read_letters();
                self.skip_spaces_after_command();
                name
            }
            Some(c @ ('{' | '}' | '%' | '$' | '&' | '#' | '_')) => {
                self.input.next();
                self.check_text()?;
                flow.text.push(c);
                flow.space_allowed = true;
                return Ok(None);
            }
            Some(' ' | '\t' | '\n') => {
                self.input.next();
                self.check_text()?;
                flow.text.push(' ');
                flow.space_allowed = false;
                return Ok(None);
            }
            Some(c) => {
                self.input.next();
                c.to_string()
            }
            None => return Err(Error::new("a command name", "the end of the input").into()),
        };
        match name.as_str() {
            "par" => self.paragraph_break(flow),
            "begin" => return self.begin(flow, stop, location),
            "end" => return self.end(stop).map(Some),
            "item" if matches!(stop, Stop::Items(_)) => return Ok(Some(Reason::Item)),
            _ => self.command(flow, &name, location)?,
        }
        Ok(None)
    }

    // Skips the spaces after a command name and a single line break,
    //     but never a blank line.
    fn skip_spaces_after_command(&mut self) {
        while matches!(self.input.peek(), Some(' ' | '\t' | '\r')) {
            self.input.next();
        }
        if self.input.peek() != Some('\n') {
            return;
        }
        let checkpoint = self.input.checkpoint();
        self.input.next();
        while matches!(self.input.peek(), Some(' ' | '\t' | '\r')) {
            self.input.next();
        }
        if self.input.peek() == Some('\n') {
            self.input.restore(checkpoint);
        }
    }

    fn environment_name(&mut self) -> txl::Result<String> {
        self.input.skip_spaces();
        if !self.input.eat('{') {
            return Err(Error::new("an environment name in braces", self.found()).into());
        }
        Ok(self.input.read_raw('}')?.trim().to_string())
    }

    fn begin(
        &mut self,
        flow: &mut Flow<B::Node>,
        stop: &Stop,
        location: Location,
    ) -> txl::Result<Option<Reason>> {
        let name = self.environment_name()?;
        if name == "document" {
            self.document(flow, stop)?;
            return Ok(Some(Reason::EndOfInput));
        }
        let signature = self.interpreter.commands.signature(&name);
        if signature.mode == Mode::Vertical && flow.kind != Kind::Inline {
            self.end_paragraph(flow);
        } else {
            self.flush_text(flow);
        }
        let has_body = signature
            .shapes
            .iter()
            .any(|shape| matches!(shape, Shape::Body | Shape::Items));
        self.interpreter.scope.enter(false);
        self.interpreter.scope.start_balanced_region();
        let (mode, output) = self.invoke(&name, &location)?;
        self.emit(flow, &name, mode, output)?;
        if !has_body {
            self.parse_into(flow, &Stop::End(&name))?;
            if mode == Mode::Vertical && flow.kind != Kind::Inline {
                self.end_paragraph(flow);
            }
        }
        self.flush_text(flow);
        let end = self.input.location();
        self.interpreter
            .scope
            .end_balanced_region()
            .map_err(|err| err.with_context(Some(&name), &end))?;
        self.interpreter.scope.exit()?;
        Ok(None)
    }

    fn end(&mut self, stop: &Stop) -> txl::Result<Reason> {
        let name = self.environment_name()?;
        match stop {
            Stop::End(expected) | Stop::Items(expected) if *expected == name => Ok(Reason::End),
            Stop::End(expected) | Stop::Items(expected) => {
                Err(Error::new(format!("\\end{{{expected}}}"), format!("\\end{{{name}}}")).into())
            }
            Stop::EndOfInput | Stop::Close(_) => Err(ContextError::UnmatchedEnd(name).into()),
        }
    }

    fn document(&mut self, flow: &mut Flow<B::Node>, stop: &Stop) -> txl::Result<()> {
        if matches!(self.interpreter.phase, Phase::Body | Phase::Ended) {
            return Err(ContextError::SecondDocument.into());
        }
        if !matches!(stop, Stop::EndOfInput) || self.interpreter.scope.depth() > 0 {
            return Err(ContextError::NestedDocument.into());
        }
        self.end_paragraph(flow);
        crate::log::debug!("starting the document body");
        self.interpreter.phase = Phase::Body;
        self.interpreter.scope.enter(false);
        self.interpreter.scope.start_balanced_region();
        self.parse_into(flow, &Stop::End("document"))?;
        self.end_paragraph(flow);
        self.interpreter.scope.end_balanced_region()?;
        self.interpreter.scope.exit()?;
        self.interpreter.phase = Phase::Ended;
        Ok(())
    }

    fn command(&mut self, flow: &mut Flow<B::Node>, name: &str, location: Location) -> txl::Result<()> {
        self.flush_text(flow);
        let (mode, output) = self.invoke(name, &location)?;
        self.emit(flow, name, mode, output)
    }

    fn emit(&mut self, flow: &mut Flow<B::Node>, name: &str, mode: Mode, output: Vec<B::Node>) -> txl::Result<()> {
        if !output.is_empty() && self.in_preamble() {
            return Err(ContextError::TextInPreamble.into());
        }
        match mode {
            Mode::Vertical if flow.kind == Kind::Inline => {
                if !output.is_empty() {
                    return Err(ContextError::VerticalInHorizontal(name.into()).into());
                }
            }
            Mode::Vertical => {
                self.end_paragraph(flow);
                flow.blocks.extend(output);
            }
            Mode::Horizontal | Mode::Either | Mode::Preamble => {
                if !output.is_empty() {
                    flow.paragraph.extend(output);
                    flow.space_allowed = true;
                }
            }
        }
        Ok(())
    }

    /// Runs the dispatcher protocol for the command and invokes it.
    fn invoke(&mut self, name: &str, location: &Location) -> txl::Result<(Mode, Vec<B::Node>)> {
        self.invoke_in_context(name, location)
            .map_err(|err| err.with_context(Some(name), location))
    }

    fn invoke_in_context(&mut self, name: &str, location: &Location) -> txl::Result<(Mode, Vec<B::Node>)> {
        set_context(self.interpreter, name, location);
        let interpreter = &mut *self.interpreter;
        let mode = interpreter.dispatcher.open(&interpreter.commands, name)?;
        let Some(implementation) = self.interpreter.commands.get(name).copied() else {
            return Err(UndefinedError::new("command", name, std::iter::empty::<&str>()).into());
        };
        self.check_phase(name, mode)?;
        let scoped = self.arguments(name, location, implementation)?;
        let arguments = self.interpreter.dispatcher.close()?;
        set_context(self.interpreter, name, location);
        let output = (implementation.run())(self.interpreter, arguments)?;
        if scoped {
            self.interpreter.scope.exit()?;
        }
        Ok((mode, output))
    }

    fn check_phase(&self, name: &str, mode: Mode) -> txl::Result<()> {
        match (mode, self.interpreter.phase) {
            (Mode::Preamble, Phase::Body | Phase::Ended) => {
                Err(ContextError::PreambleOnly(name.into()).into())
            }
            (Mode::Horizontal | Mode::Vertical, Phase::Preamble) if self.arguments == 0 => {
                Err(ContextError::NotInPreamble(name.into()).into())
            }
            _ => Ok(()),
        }
    }

    /// Parses the arguments of the innermost dispatcher frame.
    ///
    /// Returns whether a prelude ran, in which case a scope frame was entered.
    fn arguments(
        &mut self,
        name: &str,
        location: &Location,
        implementation: Implementation<B>,
    ) -> txl::Result<bool> {
        let mut scoped = false;
        loop {
            let next = self.next_significant();
            self.interpreter.dispatcher.resolve_branch(next)?;
            let Some(shape) = self.interpreter.dispatcher.peek().cloned() else {
                return Ok(scoped);
            };
            self.interpreter.dispatcher.next_shape(&shape);
            let argument = match &shape {
                Shape::Branch(_) => continue,
                Shape::Execute => {
                    if let Some(prelude) = implementation.prelude() {
                        if !scoped {
                            self.interpreter.scope.enter(false);
                            scoped = true;
                        }
                        let arguments = self.current_arguments(name);
                        set_context(self.interpreter, name, location);
                        prelude(self.interpreter, &arguments)?;
                    }
                    continue;
                }
                Shape::Star => Argument::Star(self.open_optional('*')),
                Shape::Group => Argument::Content(self.group(Kind::Mixed)?),
                Shape::HorizontalGroup => Argument::Content(self.group(Kind::Inline)?),
                Shape::Optional => match self.open_optional('[') {
                    true => Argument::Content(self.optional_content()?),
                    false => Argument::Absent,
                },
                Shape::Body => Argument::Content(self.body(name)?),
                Shape::Items => Argument::Items(self.items(name, location, implementation)?),
                Shape::Coordinate => {
                    self.input.skip_spaces();
                    if !self.input.eat('(') {
                        return Err(Error::new("a coordinate `(x,y)`", self.found()).into());
                    }
                    let raw = self.input.read_raw(')')?;
                    self.evaluate(&shape, &raw)?
                }
                shape if shape.is_optional() => match shape.opening() {
                    Some(opening) if self.open_optional(opening) => {
                        let close = if opening == '(' { ')' } else { ']' };
                        let raw = self.input.read_raw(close)?;
                        self.evaluate(shape, &raw)?
                    }
                    _ => Argument::Absent,
                },
                shape => {
                    let raw = self.raw_argument()?;
                    self.evaluate(shape, &raw)?
                }
            };
            self.interpreter.dispatcher.push_argument(argument)?;
        }
    }

    fn current_arguments(&self, name: &str) -> Arguments<B::Node> {
        self.interpreter
            .dispatcher
            .arguments()
            .cloned()
            .unwrap_or_else(|| Arguments::new(name, vec![]))
    }

    /// The next character after spaces, without consuming anything.
    fn next_significant(&mut self) -> Option<char> {
        let checkpoint = self.input.checkpoint();
        self.input.skip_spaces();
        let next = self.input.peek();
        self.input.restore(checkpoint);
        next
    }

    /// Consumes the opening character after spaces, if it is there.
    fn open_optional(&mut self, opening: char) -> bool {
        let checkpoint = self.input.checkpoint();
        self.input.skip_spaces();
        if self.input.eat(opening) {
            return true;
        }
        self.input.restore(checkpoint);
        false
    }

    fn found(&self) -> String {
        match self.input.peek() {
            None => "the end of the input".into(),
            Some(c) => format!("`{c}`"),
        }
    }

    /// Reads a mandatory raw argument: text in braces, a command name or a single character.
    fn raw_argument(&mut self) -> txl::Result<String> {
        self.input.skip_spaces();
        match self.input.peek() {
            Some('{') => {
                self.input.next();
                self.input.read_raw('}')
            }
            Some('\\') => {
                self.input.next();
                let name = self.input.read_letters();
                if name.is_empty() {
                    let c = self.input.next().unwrap_or_default();
                    return Ok(format!("\\{c}"));
                }
                Ok(format!("\\{name}"))
            }
            Some(c) if !matches!(c, '}' | '[' | ']' | '%') => {
                self.input.next();
                Ok(c.to_string())
            }
            _ => Err(Error::new("an argument", self.found()).into()),
        }
    }

    fn evaluate(&mut self, shape: &Shape, raw: &str) -> txl::Result<Argument<B::Node>> {
        Ok(match shape {
            Shape::Identifier | Shape::OptionalIdentifier | Shape::Key | Shape::OptionalKey => {
                let text = raw.trim();
                if text.is_empty() || text.contains(char::is_whitespace) {
                    return Err(Error::new("a name", describe(raw)).into());
                }
                Argument::Text(text.into())
            }
            Shape::Url => Argument::Text(raw.trim().into()),
            Shape::Macro => match raw.trim().strip_prefix('\\') {
                Some(name) if !name.is_empty() => Argument::Text(name.into()),
                _ => return Err(Error::new("a command name", describe(raw)).into()),
            },
            Shape::Number | Shape::OptionalNumber => {
                Argument::Integer(number::parse_integer(raw, &self.interpreter.counters)?)
            }
            Shape::Length | Shape::OptionalLength => {
                Argument::Length(length::parse_length(raw, &self.interpreter.scope)?)
            }
            Shape::Coordinate | Shape::OptionalCoordinate => {
                Argument::Coordinate(length::parse_coordinate(raw, &self.interpreter.scope)?)
            }
            Shape::KeyValues | Shape::OptionalKeyValues => {
                Argument::KeyValues(keyval::parse_key_values(raw))
            }
            Shape::Csv | Shape::OptionalCsv => Argument::List(keyval::parse_csv(raw)),
            Shape::Float => Argument::Float(parse_float(raw)?),
            Shape::Star
            | Shape::Group
            | Shape::HorizontalGroup
            | Shape::Optional
            | Shape::Execute
            | Shape::Body
            | Shape::Items
            | Shape::Branch(_) => Argument::Absent,
        })
    }

    /// Parses a content argument: a group in braces or a single token.
    fn group(&mut self, kind: Kind) -> txl::Result<Vec<B::Node>> {
        self.input.skip_spaces();
        self.arguments += 1;
        let mut flow = Flow::new(kind);
        self.interpreter.scope.enter(false);
        self.interpreter.scope.start_balanced_region();
        if self.input.eat('{') {
            self.parse_into(&mut flow, &Stop::Close('}'))?;
        } else {
            match self.input.peek() {
                None | Some('}' | '[' | ']' | '%') => {
                    return Err(Error::new("an argument", self.found()).into());
                }
                Some(_) => {
                    if self.parse_token(&mut flow, &Stop::Close('}'))?.is_some() {
                        return Err(Error::new("an argument", self.found()).into());
                    }
                }
            }
        }
        self.interpreter.scope.end_balanced_region()?;
        self.interpreter.scope.exit()?;
        self.arguments -= 1;
        Ok(self.finish(flow))
    }

    fn optional_content(&mut self) -> txl::Result<Vec<B::Node>> {
        self.arguments += 1;
        let mut flow = Flow::new(Kind::Inline);
        self.interpreter.scope.enter(false);
        self.interpreter.scope.start_balanced_region();
        self.parse_into(&mut flow, &Stop::Close(']'))?;
        self.interpreter.scope.end_balanced_region()?;
        self.interpreter.scope.exit()?;
        self.arguments -= 1;
        Ok(self.finish(flow))
    }

    fn body(&mut self, name: &str) -> txl::Result<Vec<B::Node>> {
        let mut flow = Flow::new(Kind::Block);
        self.parse_into(&mut flow, &Stop::End(name))?;
        Ok(self.finish(flow))
    }

    fn items(
        &mut self,
        name: &str,
        location: &Location,
        implementation: Implementation<B>,
    ) -> txl::Result<Vec<Item<B::Node>>> {
        let mut leading = Flow::new(Kind::Block);
        let mut reason = self.parse_into(&mut leading, &Stop::Items(name))?;
        if !self.finish(leading).is_empty() {
            return Err(ContextError::TextBeforeItem(name.into()).into());
        }
        let mut items = vec![];
        while reason == Reason::Item {
            let label = match self.open_optional('[') {
                true => Some(self.optional_content()?),
                false => None,
            };
            self.interpreter.scope.enter(false);
            let label = match implementation.item() {
                Some(hook) => {
                    let arguments = self.current_arguments(name);
                    set_context(self.interpreter, name, location);
                    hook(self.interpreter, &arguments, label)?
                }
                None => label.unwrap_or_default(),
            };
            let mut content = Flow::new(Kind::Block);
            reason = self.parse_into(&mut content, &Stop::Items(name))?;
            let content = self.finish(content);
            self.interpreter.scope.exit()?;
            items.push(Item { label, content });
        }
        Ok(items)
    }

    fn flush_text(&mut self, flow: &mut Flow<B::Node>) {
        if flow.text.is_empty() {
            return;
        }
        let node = self.interpreter.text(&flow.text);
        flow.paragraph.push(node);
        flow.text.clear();
    }

    fn flush_trimmed_text(&mut self, flow: &mut Flow<B::Node>) {
        let len = flow.text.trim_end_matches(' ').len();
        flow.text.truncate(len);
        self.flush_text(flow);
    }

    fn end_paragraph(&mut self, flow: &mut Flow<B::Node>) {
        self.flush_trimmed_text(flow);
        flow.space_allowed = false;
        if flow.paragraph.is_empty() {
            return;
        }
        let children = std::mem::take(&mut flow.paragraph);
        let classes: Vec<&str> = self
            .interpreter
            .scope
            .alignment()
            .map(|alignment| alignment.class())
            .into_iter()
            .collect();
        let paragraph = self.interpreter.backend.create("p", children, &classes);
        flow.blocks.push(paragraph);
    }

    fn finish(&mut self, mut flow: Flow<B::Node>) -> Vec<B::Node> {
        match flow.kind {
            Kind::Mixed if flow.blocks.is_empty() => {
                self.flush_trimmed_text(&mut flow);
                flow.paragraph
            }
            Kind::Block | Kind::Mixed => {
                self.end_paragraph(&mut flow);
                flow.blocks
            }
            Kind::Inline => {
                self.flush_trimmed_text(&mut flow);
                flow.paragraph
            }
        }
    }
}

fn set_context<B: Backend>(interpreter: &mut Interpreter<B>, name: &str, location: &Location) {
    interpreter.command = Some(name.into());
    interpreter.location = Some(location.clone());
}

#[derive(Debug)]
pub enum ContextError {
    PreambleOnly(String),
    NotInPreamble(String),
    TextInPreamble,
    VerticalInHorizontal(String),
    TextBeforeItem(String),
    UnmatchedBrace,
    UnmatchedEnd(String),
    SecondDocument,
    NestedDocument,
}

impl LatexError for ContextError {
    fn title(&self) -> String {
        match self {
            ContextError::PreambleOnly(name) => format!("\\{name} can only be used in the preamble"),
            ContextError::NotInPreamble(name) => format!("\\{name} cannot be used in the preamble"),
            ContextError::TextInPreamble => "text cannot be used in the preamble".into(),
            ContextError::VerticalInHorizontal(name) => {
                format!("\\{name} cannot be used in horizontal mode")
            }
            ContextError::TextBeforeItem(name) => {
                format!("text before the first \\item of the {name} environment")
            }
            ContextError::UnmatchedBrace => "`}` without a matching `{`".into(),
            ContextError::UnmatchedEnd(name) => format!("\\end{{{name}}} without a matching \\begin"),
            ContextError::SecondDocument => "\\begin{document} can only appear once".into(),
            ContextError::NestedDocument => {
                "the document environment cannot be inside a group or another environment".into()
            }
        }
    }

    fn notes(&self) -> Vec<String> {
        match self {
            ContextError::NotInPreamble(_) | ContextError::TextInPreamble => {
                vec!["the document body starts with \\begin{document}".into()]
            }
            ContextError::VerticalInHorizontal(_) => {
                vec!["sections, lists and other block material cannot appear inside text arguments".into()]
            }
            _ => vec![],
        }
    }
}
