//! Counter registry
//!
//! Counters are named non-negative integers, like `section` or `footnote`.
//! A counter may have dependents that are reset to zero whenever it is stepped;
//!     for example stepping `section` resets `subsection`, which in turn resets
//!     `subsubsection`.
//!
//! Each counter also has a [representation](Part), which is what `\the<counter>` prints.
//! By default this is the value in arabic numerals, prefixed with the parent
//!     counter's representation if the counter was created with a parent.
//!
//! The reset relation must be acyclic.
//! Every operation that adds an edge checks this and fails with an error otherwise.

use crate::error::{LatexError, UndefinedError};
use crate::prelude as txl;
use std::collections::{HashMap, HashSet};

pub mod format;

pub use format::DomainError;
pub use format::Style;

/// A piece of a counter representation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Part {
    /// Fixed text, e.g. the `.` in `2.1`.
    Literal(String),
    /// The value of a counter written in a given style.
    Value { counter: String, style: Style },
    /// The full representation of another counter.
    The(String),
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Counter {
    value: i32,
    dependents: Vec<String>,
    representation: Vec<Part>,
}

/// The result of formatting a counter representation.
///
/// Parts that could not be formatted are omitted from the text and reported
///     in `domain_errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub domain_errors: Vec<DomainError>,
}

/// The counter registry.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registry {
    counters: HashMap<String, Counter>,
}

impl Registry {
    /// Creates a counter with value zero.
    ///
    /// If a parent is given, the new counter is reset whenever the parent is stepped.
    pub fn create(&mut self, name: &str, parent: Option<&str>) -> txl::Result<()> {
        if self.counters.contains_key(name) {
            return Err(DuplicateCounterError { name: name.into() }.into());
        }
        let representation = match parent {
            None => vec![Part::Value {
                counter: name.into(),
                style: Style::Arabic,
            }],
            Some(parent) => {
                self.counter_mut(parent)?.dependents.push(name.into());
                vec![
                    Part::The(parent.into()),
                    Part::Literal(".".into()),
                    Part::Value {
                        counter: name.into(),
                        style: Style::Arabic,
                    },
                ]
            }
        };
        self.counters.insert(
            name.into(),
            Counter {
                value: 0,
                dependents: vec![],
                representation,
            },
        );
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.counters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> txl::Result<i32> {
        Ok(self.counter(name)?.value)
    }

    pub fn set(&mut self, name: &str, value: i32) -> txl::Result<()> {
        if value < 0 {
            return Err(NegativeCounterError {
                name: name.into(),
                value,
            }
            .into());
        }
        self.counter_mut(name)?.value = value;
        Ok(())
    }

    pub fn add(&mut self, name: &str, delta: i32) -> txl::Result<()> {
        let value = self.get(name)?.saturating_add(delta);
        self.set(name, value)
    }

    /// Increments the counter and resets all of its dependents, transitively.
    pub fn step(&mut self, name: &str) -> txl::Result<()> {
        let counter = self.counter_mut(name)?;
        counter.value = counter.value.saturating_add(1);
        let mut stack: Vec<String> = counter.dependents.iter().rev().cloned().collect();
        let mut visited: HashSet<String> = HashSet::from([name.to_string()]);
        while let Some(dependent) = stack.pop() {
            if !visited.insert(dependent.clone()) {
                continue;
            }
            if let Some(counter) = self.counters.get_mut(&dependent) {
                counter.value = 0;
                stack.extend(counter.dependents.iter().rev().cloned());
            }
        }
        Ok(())
    }

    /// Makes `name` a dependent of `parent`, so stepping the parent resets it.
    pub fn add_to_reset(&mut self, name: &str, parent: &str) -> txl::Result<()> {
        self.counter(name)?;
        self.counter(parent)?;
        if name == parent || self.descendants(name).contains(parent) {
            return Err(CounterCycleError {
                name: name.into(),
                parent: parent.into(),
            }
            .into());
        }
        let dependents = &mut self.counter_mut(parent)?.dependents;
        if !dependents.iter().any(|d| d == name) {
            dependents.push(name.into());
        }
        Ok(())
    }

    pub fn remove_from_reset(&mut self, name: &str, parent: &str) -> txl::Result<()> {
        self.counter(name)?;
        self.counter_mut(parent)?.dependents.retain(|d| d != name);
        Ok(())
    }

    /// Returns the counters directly reset by the given counter.
    pub fn dependents(&self, name: &str) -> txl::Result<&[String]> {
        Ok(&self.counter(name)?.dependents)
    }

    pub fn representation(&self, name: &str) -> txl::Result<&[Part]> {
        Ok(&self.counter(name)?.representation)
    }

    pub fn set_representation(&mut self, name: &str, representation: Vec<Part>) -> txl::Result<()> {
        self.counter_mut(name)?.representation = representation;
        Ok(())
    }

    /// Formats the counter's representation, e.g. `2.1` for a subsection.
    pub fn display(&self, name: &str) -> txl::Result<Rendered> {
        let mut rendered = Rendered {
            text: String::new(),
            domain_errors: vec![],
        };
        let mut active = vec![];
        self.display_into(name, &mut rendered, &mut active)?;
        Ok(rendered)
    }

    fn display_into<'a>(
        &'a self,
        name: &'a str,
        rendered: &mut Rendered,
        active: &mut Vec<&'a str>,
    ) -> txl::Result<()> {
        if active.contains(&name) {
            return Err(RepresentationCycleError { name: name.into() }.into());
        }
        active.push(name);
        for part in &self.counter(name)?.representation {
            match part {
                Part::Literal(s) => rendered.text.push_str(s),
                Part::Value { counter, style } => match style.format(self.get(counter)?) {
                    Ok(s) => rendered.text.push_str(&s),
                    Err(err) => rendered.domain_errors.push(err),
                },
                Part::The(other) => self.display_into(other, rendered, active)?,
            }
        }
        active.pop();
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }

    fn descendants(&self, name: &str) -> HashSet<&str> {
        let mut seen = HashSet::new();
        let mut stack = vec![name];
        while let Some(next) = stack.pop() {
            if let Some(counter) = self.counters.get(next) {
                for dependent in &counter.dependents {
                    if seen.insert(dependent.as_str()) {
                        stack.push(dependent);
                    }
                }
            }
        }
        seen
    }

    fn counter(&self, name: &str) -> txl::Result<&Counter> {
        match self.counters.get(name) {
            Some(counter) => Ok(counter),
            None => Err(UndefinedError::new("counter", name, self.names()).into()),
        }
    }

    fn counter_mut(&mut self, name: &str) -> txl::Result<&mut Counter> {
        // The suggestions borrow the map, which a single `get_mut` match does not allow.
        if !self.counters.contains_key(name) {
            return Err(UndefinedError::new("counter", name, self.names()).into());
        }
        self.counters
            .get_mut(name)
            .ok_or_else(|| UndefinedError::new("counter", name, std::iter::empty::<&str>()).into())
    }
}

#[derive(Debug)]
pub struct DuplicateCounterError {
    pub name: String,
}

impl LatexError for DuplicateCounterError {
    fn title(&self) -> String {
        format!("counter `{}` is already defined", self.name)
    }
}

#[derive(Debug)]
pub struct NegativeCounterError {
    pub name: String,
    pub value: i32,
}

impl LatexError for NegativeCounterError {
    fn title(&self) -> String {
        format!(
            "counter `{}` cannot be set to the negative value {}",
            self.name, self.value
        )
    }
}

#[derive(Debug)]
pub struct CounterCycleError {
    pub name: String,
    pub parent: String,
}

impl LatexError for CounterCycleError {
    fn title(&self) -> String {
        format!(
            "resetting counter `{}` within `{}` would create a cycle",
            self.name, self.parent
        )
    }

    fn notes(&self) -> Vec<String> {
        vec![format!(
            "`{}` already resets `{}`, directly or indirectly",
            self.name, self.parent
        )]
    }
}

#[derive(Debug)]
pub struct RepresentationCycleError {
    pub name: String,
}

impl LatexError for RepresentationCycleError {
    fn title(&self) -> String {
        format!("the representation of counter `{}` refers to itself", self.name)
    }
}
