//! Output backends
//!
//! Commands do not build output directly.
//! They call a [Backend], which owns the concrete node type of the output tree.
//! The reference backend is [tree::Tree].

use crate::config::Config;
use crate::label::ReferenceId;
use dimen::{Length, LengthUnit, ScaledUnit, Vector};

pub mod tree;

/// Default length of arrow heads, in pixels.
pub const ARROW_LENGTH_PX: f64 = 10.0;

/// A render backend.
pub trait Backend: Sized + 'static {
    /// The node type of the output tree.
    type Node: Clone + std::fmt::Debug + PartialEq;

    /// Creates an element, e.g. `p`, `h2` or `ul`, with the given renderer classes.
    fn create(&mut self, kind: &str, children: Vec<Self::Node>, classes: &[&str]) -> Self::Node;

    /// Creates a text node.
    fn text(&mut self, text: &str, classes: &[&str]) -> Self::Node;

    /// Groups nodes without creating an element.
    fn fragment(&mut self, children: Vec<Self::Node>) -> Self::Node;

    /// Adds an attribute to an element; other nodes are returned unchanged.
    fn with_attribute(&mut self, node: Self::Node, key: &str, value: &str) -> Self::Node;

    /// Creates a node that renders the reference once labels are resolved.
    fn reference(&mut self, id: ReferenceId) -> Self::Node;

    /// A straight segment.
    ///
    /// With `arrow` set, an arrow head of length [Backend::arrow_length] continues
    ///     the segment past `to`.
    fn line(&mut self, from: Vector, to: Vector, arrow: bool) -> Self::Node;

    /// Length of the arrow heads drawn by [Backend::line].
    fn arrow_length(&self) -> Length {
        Length::new(ARROW_LENGTH_PX, LengthUnit::Absolute(ScaledUnit::Pixel))
    }

    fn circle(&mut self, center: Vector, radius: Length, filled: bool) -> Self::Node;

    /// A quadratic Bézier curve.
    fn curve(&mut self, from: Vector, control: Vector, to: Vector) -> Self::Node;

    /// Called once before a document is interpreted.
    fn configure(&mut self, config: &Config) {
        _ = config;
    }
}
