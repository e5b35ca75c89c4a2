//! Labels, references and the reference resolution table.
//!
//! `\label{name}` binds a name to a [Snapshot] of the current referenceable unit.
//! `\ref{name}` may appear before the label is defined,
//!     so references are not rendered directly.
//! Instead each reference gets a [ReferenceId], an index into the resolution table,
//!     and the output tree holds that index.
//! After the whole document has been interpreted, a renderer calls
//!     [Labels::resolve] to obtain either the bound snapshot or a placeholder.

use crate::error::LatexError;
use crate::prelude as txl;
use std::collections::HashMap;

/// Text rendered for references whose label is never defined.
pub const PLACEHOLDER: &str = "??";

/// A referenceable unit: an anchor identifier plus its rendered numbering.
///
/// For example, after `\section{Intro}` the snapshot might be `("sec-1", "1")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub id: String,
    pub text: String,
}

impl Snapshot {
    pub fn new<S: Into<String>, T: Into<String>>(id: S, text: T) -> Snapshot {
        Snapshot {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Index of a reference in the resolution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceId(usize);

impl ReferenceId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The state of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Bound(&'a Snapshot),
    /// The label has not been defined (yet); holds the label name.
    Pending(&'a str),
}

#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Labels {
    labels: HashMap<String, Snapshot>,
    references: Vec<String>,
}

impl Labels {
    /// Binds the label; it is an error to bind the same label twice.
    pub fn define(&mut self, name: &str, snapshot: Snapshot) -> txl::Result<()> {
        if self.labels.contains_key(name) {
            return Err(DuplicateLabelError { name: name.into() }.into());
        }
        crate::log::debug!("defining label `{name}` with anchor `{}`", snapshot.id);
        self.labels.insert(name.into(), snapshot);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Snapshot> {
        self.labels.get(name)
    }

    /// Records a reference to the label and returns its index in the resolution table.
    pub fn reference(&mut self, name: &str) -> ReferenceId {
        self.references.push(name.into());
        ReferenceId(self.references.len() - 1)
    }

    /// Returns the current state of the reference.
    ///
    /// An unknown ID resolves to a pending reference to the empty label.
    pub fn resolve(&self, id: ReferenceId) -> Resolution<'_> {
        let name = self.references.get(id.0).map(String::as_str).unwrap_or("");
        match self.labels.get(name) {
            Some(snapshot) => Resolution::Bound(snapshot),
            None => Resolution::Pending(name),
        }
    }

    /// Returns the names of referenced labels that are not defined,
    ///     in the order they were first referenced.
    pub fn undefined_references(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.references
            .iter()
            .map(String::as_str)
            .filter(|name| !self.labels.contains_key(*name))
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

#[derive(Debug)]
pub struct DuplicateLabelError {
    pub name: String,
}

impl LatexError for DuplicateLabelError {
    fn title(&self) -> String {
        format!("label `{}` is already defined", self.name)
    }

    fn notes(&self) -> Vec<String> {
        vec!["each label may only be defined once per document".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_before_label() {
        let mut labels = Labels::default();
        let id = labels.reference("intro");
        assert_eq!(labels.resolve(id), Resolution::Pending("intro"));
        labels.define("intro", Snapshot::new("sec-1", "1")).unwrap();
        assert_eq!(
            labels.resolve(id),
            Resolution::Bound(&Snapshot::new("sec-1", "1"))
        );
    }

    #[test]
    fn every_pending_reference_is_bound() {
        let mut labels = Labels::default();
        let a = labels.reference("fig");
        let b = labels.reference("fig");
        labels.define("fig", Snapshot::new("figure-2", "2")).unwrap();
        assert_eq!(labels.resolve(a), labels.resolve(b));
        assert!(labels.undefined_references().is_empty());
    }

    #[test]
    fn duplicate_label() {
        let mut labels = Labels::default();
        labels.define("intro", Snapshot::new("sec-1", "1")).unwrap();
        let err = labels
            .define("intro", Snapshot::new("sec-2", "2"))
            .unwrap_err();
        assert_eq!(err.title(), "label `intro` is already defined");
        assert_eq!(labels.get("intro").map(|s| s.text.as_str()), Some("1"));
    }

    #[test]
    fn undefined_references_are_unique() {
        let mut labels = Labels::default();
        labels.reference("b");
        labels.reference("a");
        labels.reference("b");
        labels.define("c", Snapshot::default()).unwrap();
        labels.reference("c");
        assert_eq!(labels.undefined_references(), vec!["b", "a"]);
    }
}
