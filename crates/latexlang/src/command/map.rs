//! Map type
use super::*;
use crate::error::Error;
use std::collections::HashMap;

/// Map is the command registry: a map from command names to implementations
///     and signatures.
///
/// Implementations and signatures are stored in separate tables so that a
///     package can override the behavior of a command without restating its
///     signature, or vice versa.
/// Every insertion overwrites the previous entry for the name.
/// A command without a signature runs in either mode and takes no arguments.
pub struct Map<B: Backend> {
    implementations: HashMap<String, Implementation<B>>,
    signatures: HashMap<String, Signature>,
}

impl<B: Backend> Default for Map<B> {
    fn default() -> Self {
        Map {
            implementations: Default::default(),
            signatures: Default::default(),
        }
    }
}

impl<B: Backend> Map<B> {
    pub fn insert<S: Into<String>>(&mut self, name: S, implementation: Implementation<B>) {
        self.implementations.insert(name.into(), implementation);
    }

    pub fn insert_signature<S: Into<String>>(&mut self, name: S, signature: Signature) {
        self.signatures.insert(name.into(), signature);
    }

    pub fn get(&self, name: &str) -> Option<&Implementation<B>> {
        self.implementations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.implementations.contains_key(name)
    }

    /// Returns the signature of the command, or the default signature if none is registered.
    pub fn signature(&self, name: &str) -> Signature {
        self.signatures.get(name).cloned().unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.implementations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }

    /// Folds implementations and textual signatures into the map.
    ///
    /// Signatures are parsed first, so a malformed signature leaves the map unchanged.
    pub fn extend(
        &mut self,
        implementations: HashMap<&'static str, Implementation<B>>,
        signatures: HashMap<&'static str, &'static str>,
    ) -> txl::Result<()> {
        let mut parsed = Vec::with_capacity(signatures.len());
        for (name, signature) in signatures {
            match signature.parse::<Signature>() {
                Ok(signature) => parsed.push((name, signature)),
                Err(err) => {
                    let mut err = Error::new(err);
                    err.command = Some(name.to_string());
                    return Err(err);
                }
            }
        }
        for (name, signature) in parsed {
            self.insert_signature(name, signature);
        }
        for (name, implementation) in implementations {
            self.insert(name, implementation);
        }
        Ok(())
    }
}
