//! Document classes and packages
//!
//! The command set of an interpreter is built in layers.
//! The built-in commands are installed when the interpreter is created.
//! A document class is then loaded, at most once, and finally any number of packages.
//! Each layer is a [CommandProvider] whose commands and signatures are folded
//!     into the registry; a later layer overwrites earlier entries of the same name.
//!
//! Failures are treated differently for classes and packages.
//! An unknown or failing document class is fatal,
//!     as the document cannot be interpreted meaningfully without it.
//! An unknown or failing package produces a warning and is skipped.

use crate::command::Implementation;
use crate::error::{LatexError, UndefinedError};
use crate::output::Backend;
use crate::parse::keyval;
use crate::prelude as txl;
use crate::vm::Interpreter;
use latexlang_stdext::algorithms::spellcheck;
use std::collections::HashMap;

/// Packages whose functionality the interpreter provides natively.
///
/// Loading them is accepted and does nothing.
pub const PROVIDED_PACKAGES: [&str; 6] = ["calc", "comment", "keyval", "picture", "pict2e", "pspicture"];

/// A source of commands: the built-ins, a document class or a package.
pub trait CommandProvider<B: Backend> {
    fn commands(&self) -> HashMap<&'static str, Implementation<B>>;

    /// Textual signatures; see [Signature](crate::command::Signature) for the format.
    fn signatures(&self) -> HashMap<&'static str, &'static str>;
}

/// Constructor of a document class or package.
///
/// The constructor may change the interpreter, for example to create counters,
///     and reads the options it understands.
pub type Constructor<B> =
    fn(interpreter: &mut Interpreter<B>, options: &mut Options) -> txl::Result<Box<dyn CommandProvider<B>>>;

/// Everything a standard library contributes to an interpreter.
///
/// The built-ins constructor runs when the library is installed and receives no options.
pub struct Library<B: Backend> {
    pub built_ins: Constructor<B>,
    pub classes: HashMap<&'static str, Constructor<B>>,
    pub packages: HashMap<&'static str, Constructor<B>>,
}

/// Options passed to a document class or package.
///
/// Reading an option marks it as used;
///     options nothing reads are reported after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: Vec<(String, Option<String>)>,
    used: Vec<bool>,
}

impl Options {
    pub fn new(entries: Vec<(String, Option<String>)>) -> Options {
        let used = vec![false; entries.len()];
        Options { entries, used }
    }

    /// Parses options given as `key` or `key=value` strings.
    pub fn parse<S: AsRef<str>>(options: &[S]) -> Options {
        Options::new(
            options
                .iter()
                .flat_map(|option| keyval::parse_key_values(option.as_ref()))
                .collect(),
        )
    }

    /// Whether the option was given.
    pub fn flag(&mut self, key: &str) -> bool {
        let mut found = false;
        for (i, (k, _)) in self.entries.iter().enumerate() {
            if k == key {
                self.used[i] = true;
                found = true;
            }
        }
        found
    }

    /// The last value given for the option.
    pub fn value(&mut self, key: &str) -> Option<String> {
        let mut value = None;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if k == key {
                self.used[i] = true;
                if v.is_some() {
                    value = v.clone();
                }
            }
        }
        value
    }

    /// Returns the first of the keys that was given, marking all of them as used.
    pub fn choice<'a>(&mut self, keys: &[&'a str]) -> Option<&'a str> {
        let mut choice = None;
        for key in keys {
            if self.flag(key) && choice.is_none() {
                choice = Some(*key);
            }
        }
        choice
    }

    pub fn unused(&self) -> Vec<&str> {
        self.entries
            .iter()
            .zip(&self.used)
            .filter(|(_, used)| !**used)
            .map(|((k, _), _)| k.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader state held by the interpreter.
pub(crate) struct Loader<B: Backend> {
    classes: HashMap<&'static str, Constructor<B>>,
    packages: HashMap<&'static str, Constructor<B>>,
    class: Option<String>,
    loaded_packages: Vec<String>,
}

impl<B: Backend> Default for Loader<B> {
    fn default() -> Self {
        Loader {
            classes: Default::default(),
            packages: Default::default(),
            class: None,
            loaded_packages: vec![],
        }
    }
}

impl<B: Backend> Loader<B> {
    pub(crate) fn register(
        &mut self,
        classes: HashMap<&'static str, Constructor<B>>,
        packages: HashMap<&'static str, Constructor<B>>,
    ) {
        self.classes.extend(classes);
        self.packages.extend(packages);
    }
}

impl<B: Backend> Interpreter<B> {
    /// Loads the document class.
    ///
    /// Fails if the class is unknown, if its constructor fails,
    ///     or if a class has already been loaded.
    pub fn load_document_class(&mut self, name: &str, mut options: Options) -> txl::Result<()> {
        if let Some(loaded) = &self.extensions.class {
            return Err(ClassAlreadyLoadedError {
                loaded: loaded.clone(),
                requested: name.into(),
            }
            .into());
        }
        let Some(constructor) = self.extensions.classes.get(name).copied() else {
            return Err(UndefinedError::new(
                "document class",
                name,
                self.extensions.classes.keys().copied(),
            )
            .into());
        };
        let provider = constructor(self, &mut options)?;
        self.merge_commands(provider.as_ref())?;
        crate::log::debug!("loaded document class `{name}`");
        self.extensions.class = Some(name.into());
        for option in options.unused() {
            self.warn(format!("unused option `{option}` for document class `{name}`"));
        }
        Ok(())
    }

    /// Loads a package.
    ///
    /// Unknown packages and packages whose constructor fails are skipped with a warning.
    /// Loading a package a second time does nothing.
    /// Returns whether the package is loaded.
    pub fn load_package(&mut self, name: &str, mut options: Options) -> bool {
        if self.is_package_loaded(name) {
            crate::log::debug!("package `{name}` is already loaded");
            return true;
        }
        if PROVIDED_PACKAGES.contains(&name) {
            crate::log::debug!("package `{name}` is provided natively");
            self.extensions.loaded_packages.push(name.into());
            return true;
        }
        let Some(constructor) = self.extensions.packages.get(name).copied() else {
            let dictionary = self
                .extensions
                .packages
                .keys()
                .copied()
                .chain(PROVIDED_PACKAGES);
            let message = match spellcheck::suggest(dictionary, name, 1).first() {
                None => format!("unknown package `{name}`"),
                Some(close) => format!("unknown package `{name}` (did you mean `{close}`?)"),
            };
            self.warn(message);
            return false;
        };
        let result = match constructor(self, &mut options) {
            Ok(provider) => self.merge_commands(provider.as_ref()),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            self.warn(format!("package `{name}` could not be loaded: {}", err.title()));
            return false;
        }
        crate::log::debug!("loaded package `{name}`");
        self.extensions.loaded_packages.push(name.into());
        for option in options.unused() {
            self.warn(format!("unused option `{option}` for package `{name}`"));
        }
        true
    }

    /// Merges commands from an external provider, with the priority of a package.
    pub fn merge_commands(&mut self, provider: &dyn CommandProvider<B>) -> txl::Result<()> {
        self.commands
            .extend(provider.commands(), provider.signatures())
    }

    pub fn document_class(&self) -> Option<&str> {
        self.extensions.class.as_deref()
    }

    pub fn is_package_loaded(&self, name: &str) -> bool {
        self.extensions.loaded_packages.iter().any(|p| p == name)
    }
}

#[derive(Debug)]
pub struct ClassAlreadyLoadedError {
    pub loaded: String,
    pub requested: String,
}

impl LatexError for ClassAlreadyLoadedError {
    fn title(&self) -> String {
        format!(
            "cannot load document class `{}`: the class `{}` is already loaded",
            self.requested, self.loaded
        )
    }

    fn notes(&self) -> Vec<String> {
        vec!["a document has exactly one class".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_usage() {
        let mut options = Options::parse(&["a4paper,12pt", "draft", "fontsize=11pt"]);
        assert!(options.flag("draft"));
        assert!(!options.flag("final"));
        assert_eq!(options.value("fontsize"), Some("11pt".to_string()));
        assert_eq!(options.choice(&["10pt", "11pt", "12pt"]), Some("12pt"));
        assert_eq!(options.unused(), vec!["a4paper"]);
    }

    #[test]
    fn empty_options() {
        let options = Options::parse::<&str>(&[]);
        assert!(options.is_empty());
        assert!(options.unused().is_empty());
    }
}
