//! The Latexlang interpreter.
//!
//! An [Interpreter] is created for a single document.
//! It owns every piece of state the commands work with:
//!     the counter registry, the scope stack, the label table,
//!     the command registry and the argument dispatcher.
//! There is no global state, so independent documents may be interpreted
//!     side by side.

use crate::command;
use crate::config::Config;
use crate::counter;
use crate::dispatch::Dispatcher;
use crate::error::{Diagnostic, Diagnostics, LatexError, Severity};
use crate::extension::{self, Library, Options};
use crate::label::Labels;
use crate::output::Backend;
use crate::parse::{self, Location};
use crate::prelude as txl;
use crate::scope;
use std::collections::HashMap;

/// The parts of a document, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No `\documentclass` has been seen; the input is a document fragment.
    Fragment,
    /// Between `\documentclass` and `\begin{document}`.
    Preamble,
    /// Inside the `document` environment.
    Body,
    /// After `\end{document}`; the rest of the input is ignored.
    Ended,
}

/// The interpreter for one document.
pub struct Interpreter<B: Backend> {
    /// The render backend.
    pub backend: B,

    pub config: Config,

    pub counters: counter::Registry,

    pub scope: scope::Stack,

    pub labels: Labels,

    /// The command registry.
    pub commands: command::Map<B>,

    pub dispatcher: Dispatcher<B::Node>,

    /// Warnings and informational notes recorded so far.
    pub diagnostics: Diagnostics,

    /// Document metadata like the title, set in the preamble and used by `\maketitle`.
    pub metadata: HashMap<String, Vec<B::Node>>,

    pub(crate) extensions: extension::Loader<B>,
    pub(crate) phase: Phase,
    pub(crate) location: Option<Location>,
    pub(crate) command: Option<String>,
    anchors: usize,
}

impl<B: Backend> Interpreter<B> {
    /// Creates an interpreter with no commands.
    pub fn new(mut backend: B, config: Config) -> Interpreter<B> {
        backend.configure(&config);
        Interpreter {
            backend,
            config,
            counters: Default::default(),
            scope: Default::default(),
            labels: Default::default(),
            commands: Default::default(),
            dispatcher: Default::default(),
            diagnostics: Default::default(),
            metadata: Default::default(),
            extensions: Default::default(),
            phase: Phase::Fragment,
            location: None,
            command: None,
            anchors: 0,
        }
    }

    /// Creates an interpreter and installs the library.
    pub fn with_library(backend: B, config: Config, library: Library<B>) -> txl::Result<Interpreter<B>> {
        let mut interpreter = Interpreter::new(backend, config);
        interpreter.install(library)?;
        Ok(interpreter)
    }

    /// Installs the library's built-in commands and registers its classes and packages.
    pub fn install(&mut self, library: Library<B>) -> txl::Result<()> {
        let provider = (library.built_ins)(self, &mut Options::default())?;
        self.merge_commands(provider.as_ref())?;
        self.extensions.register(library.classes, library.packages);
        Ok(())
    }

    /// Interprets the source and returns the output tree.
    ///
    /// The document class in the configuration, if any, is loaded first.
    /// References to undefined labels are reported as informational diagnostics.
    pub fn run(&mut self, source: &str) -> txl::Result<Vec<B::Node>> {
        if let Some(class) = self.config.document_class.clone() {
            let options = Options::parse(&self.config.class_options);
            self.load_document_class(&class, options)?;
        }
        let file_name = self.config.file_name.clone();
        let result = parse::run(self, &file_name, source);
        self.dispatcher.reset();
        let nodes = result?;
        let undefined: Vec<String> = self
            .labels
            .undefined_references()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.location = None;
        self.command = None;
        for name in undefined {
            self.info(format!("reference to undefined label `{name}`"));
        }
        Ok(nodes)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Starts the preamble; only possible at the start of a document.
    pub fn begin_preamble(&mut self) -> txl::Result<()> {
        if self.phase != Phase::Fragment {
            return Err(PreambleError {}.into());
        }
        self.phase = Phase::Preamble;
        Ok(())
    }

    /// The location of the command being run, if any.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Records a warning at the current location.
    pub fn warn<S: Into<String>>(&mut self, message: S) {
        self.diagnose(Severity::Warning, message.into());
    }

    /// Records an informational note at the current location.
    pub fn info<S: Into<String>>(&mut self, message: S) {
        self.diagnose(Severity::Info, message.into());
    }

    fn diagnose(&mut self, severity: Severity, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            message,
            command: self.command.clone(),
            location: self.location.clone(),
        });
    }

    /// Returns a fresh anchor identifier, e.g. `sec-3`.
    pub fn new_anchor(&mut self, prefix: &str) -> String {
        self.anchors += 1;
        format!("{}-{}", prefix, self.anchors)
    }

    /// Creates a text node styled with the active attributes.
    pub fn text(&mut self, text: &str) -> B::Node {
        let classes = self.scope.inline_classes();
        self.backend.text(text, &classes)
    }

    /// Formats the counter's representation, recording a warning for each value
    ///     that cannot be written in its style.
    pub fn display_counter(&mut self, name: &str) -> txl::Result<String> {
        let rendered = self.counters.display(name)?;
        for err in &rendered.domain_errors {
            self.warn(err.to_string());
        }
        Ok(rendered.text)
    }

    /// Documentation of the command, if it has any.
    pub fn doc(&self, name: &str) -> Option<&'static str> {
        self.commands.get(name).and_then(command::Implementation::doc)
    }
}

#[derive(Debug)]
pub struct PreambleError {}

impl LatexError for PreambleError {
    fn title(&self) -> String {
        "\\documentclass must come first".into()
    }

    fn notes(&self) -> Vec<String> {
        vec!["the document class can only be declared at the start of a document".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{Part, Style};
    use crate::output::tree::Tree;

    #[test]
    fn anchors_are_unique() {
        let mut interpreter = Interpreter::new(Tree::default(), Config::default());
        assert_eq!(interpreter.new_anchor("sec"), "sec-1");
        assert_eq!(interpreter.new_anchor("item"), "item-2");
    }

    #[test]
    fn display_counter_records_domain_errors() {
        let mut interpreter = Interpreter::new(Tree::default(), Config::default());
        interpreter.counters.create("footnote", None).unwrap();
        interpreter
            .counters
            .set_representation(
                "footnote",
                vec![Part::Value {
                    counter: "footnote".into(),
                    style: Style::FnSymbol,
                }],
            )
            .unwrap();
        interpreter.counters.set("footnote", 10).unwrap();
        assert_eq!(interpreter.display_counter("footnote").unwrap(), "");
        assert_eq!(interpreter.diagnostics.warnings().count(), 1);
    }

    #[test]
    fn begin_preamble_only_once() {
        let mut interpreter = Interpreter::new(Tree::default(), Config::default());
        interpreter.begin_preamble().unwrap();
        assert_eq!(interpreter.phase(), Phase::Preamble);
        assert!(interpreter.begin_preamble().is_err());
    }

    #[test]
    fn configure_backend() {
        let config = Config {
            precision: 5,
            ..Default::default()
        };
        let interpreter = Interpreter::new(Tree::default(), config);
        assert_eq!(interpreter.backend.precision(), 5);
    }
}
