//! The reference backend: a generic node tree with an HTML serializer.
//!
//! References are kept as [ReferenceId]s in the tree and resolved against the
//!     label table when the tree is serialized,
//!     so a `\ref` may precede its `\label`.
//! Picture coordinates grow upwards, as in LaTeX;
//!     the serializer flips the y axis for SVG.

use super::{Backend, ARROW_LENGTH_PX};
use crate::config::Config;
use crate::label::{Labels, ReferenceId, Resolution, PLACEHOLDER};
use dimen::{Length, Vector};
use std::fmt::Write;

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Element {
        kind: String,
        classes: Vec<String>,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text {
        text: String,
        classes: Vec<String>,
    },
    Fragment(Vec<Node>),
    Reference(ReferenceId),
    Line {
        from: Vector,
        to: Vector,
        arrow: bool,
    },
    Circle {
        center: Vector,
        radius: Length,
        filled: bool,
    },
    Curve {
        from: Vector,
        control: Vector,
        to: Vector,
    },
}

impl Node {
    /// A text node without classes.
    pub fn text<S: Into<String>>(text: S) -> Node {
        Node::Text {
            text: text.into(),
            classes: vec![],
        }
    }

    /// An element without classes or attributes.
    pub fn element<S: Into<String>>(kind: S, children: Vec<Node>) -> Node {
        Node::Element {
            kind: kind.into(),
            classes: vec![],
            attributes: vec![],
            children,
        }
    }

    /// Concatenated text of the node, with references resolved.
    pub fn text_content(&self, labels: &Labels) -> String {
        let mut s = String::new();
        self.write_text(&mut s, labels);
        s
    }

    fn write_text(&self, s: &mut String, labels: &Labels) {
        match self {
            Node::Element { children, .. } | Node::Fragment(children) => {
                for child in children {
                    child.write_text(s, labels);
                }
            }
            Node::Text { text, .. } => s.push_str(text),
            Node::Reference(id) => match labels.resolve(*id) {
                Resolution::Bound(snapshot) => s.push_str(&snapshot.text),
                Resolution::Pending(_) => s.push_str(PLACEHOLDER),
            },
            Node::Line { .. } | Node::Circle { .. } | Node::Curve { .. } => {}
        }
    }
}

/// The tree backend.
#[derive(Debug, Clone)]
pub struct Tree {
    precision: u32,
}

impl Default for Tree {
    fn default() -> Self {
        Tree {
            precision: Config::DEFAULT_PRECISION,
        }
    }
}

impl Tree {
    pub fn precision(&self) -> u32 {
        self.precision
    }
}

fn owned(classes: &[&str]) -> Vec<String> {
    classes.iter().map(|c| c.to_string()).collect()
}

impl Backend for Tree {
    type Node = Node;

    fn create(&mut self, kind: &str, children: Vec<Node>, classes: &[&str]) -> Node {
        Node::Element {
            kind: kind.into(),
            classes: owned(classes),
            attributes: vec![],
            children,
        }
    }

    fn text(&mut self, text: &str, classes: &[&str]) -> Node {
        Node::Text {
            text: text.into(),
            classes: owned(classes),
        }
    }

    fn fragment(&mut self, children: Vec<Node>) -> Node {
        Node::Fragment(children)
    }

    fn with_attribute(&mut self, mut node: Node, key: &str, value: &str) -> Node {
        if let Node::Element { attributes, .. } = &mut node {
            attributes.retain(|(k, _)| k != key);
            attributes.push((key.into(), value.into()));
        }
        node
    }

    fn reference(&mut self, id: ReferenceId) -> Node {
        Node::Reference(id)
    }

    fn line(&mut self, from: Vector, to: Vector, arrow: bool) -> Node {
        Node::Line { from, to, arrow }
    }

    fn circle(&mut self, center: Vector, radius: Length, filled: bool) -> Node {
        Node::Circle {
            center,
            radius,
            filled,
        }
    }

    fn curve(&mut self, from: Vector, control: Vector, to: Vector) -> Node {
        Node::Curve { from, control, to }
    }

    fn configure(&mut self, config: &Config) {
        self.precision = config.precision;
    }
}

/// Serializes nodes to HTML, resolving references against the label table.
pub fn to_html(nodes: &[Node], labels: &Labels, precision: u32) -> String {
    let mut serializer = Serializer {
        out: String::new(),
        labels,
        precision,
        markers: 0,
    };
    for node in nodes {
        serializer.node(node);
    }
    serializer.out
}

struct Serializer<'a> {
    out: String,
    labels: &'a Labels,
    precision: u32,
    markers: usize,
}

const VOID_ELEMENTS: [&str; 2] = ["br", "hr"];

impl<'a> Serializer<'a> {
    fn node(&mut self, node: &Node) {
        match node {
            Node::Element {
                kind,
                classes,
                attributes,
                children,
            } => {
                self.out.push('<');
                self.out.push_str(kind);
                self.classes(classes);
                for (key, value) in attributes {
                    self.attribute(key, value);
                }
                self.out.push('>');
                if VOID_ELEMENTS.contains(&kind.as_str()) {
                    return;
                }
                for child in children {
                    self.node(child);
                }
                _ = write!(self.out, "</{kind}>");
            }
            Node::Text { text, classes } => {
                if classes.is_empty() {
                    escape_into(&mut self.out, text);
                } else {
                    self.out.push_str("<span");
                    self.classes(classes);
                    self.out.push('>');
                    escape_into(&mut self.out, text);
                    self.out.push_str("</span>");
                }
            }
            Node::Fragment(children) => {
                for child in children {
                    self.node(child);
                }
            }
            Node::Reference(id) => match self.labels.resolve(*id) {
                Resolution::Bound(snapshot) => {
                    self.out.push_str("<a");
                    self.attribute("href", &format!("#{}", snapshot.id));
                    self.out.push('>');
                    escape_into(&mut self.out, &snapshot.text);
                    self.out.push_str("</a>");
                }
                Resolution::Pending(_) => self.out.push_str(PLACEHOLDER),
            },
            Node::Line { from, to, arrow } => {
                self.open_svg("line");
                let marker = if *arrow {
                    self.markers += 1;
                    let id = format!("arrow-{}", self.markers);
                    // The head starts at the end of the line.
                    _ = write!(
                        self.out,
                        r#"<defs><marker id="{id}" markerUnits="userSpaceOnUse" markerWidth="{ARROW_LENGTH_PX}" markerHeight="{ARROW_LENGTH_PX}" refX="0" refY="5" orient="auto"><path d="M0,0 L10,5 L0,10 z"/></marker></defs>"#
                    );
                    Some(id)
                } else {
                    None
                };
                _ = write!(
                    self.out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="currentColor""#,
                    self.css(from.x),
                    self.css(-from.y),
                    self.css(to.x),
                    self.css(-to.y),
                );
                if let Some(id) = marker {
                    _ = write!(self.out, r#" marker-end="url(#{id})""#);
                }
                self.out.push_str("/></svg>");
            }
            Node::Circle {
                center,
                radius,
                filled,
            } => {
                self.open_svg("circle");
                _ = write!(
                    self.out,
                    r#"<circle cx="{}" cy="{}" r="{}" stroke="currentColor" fill="{}"/></svg>"#,
                    self.css(center.x),
                    self.css(-center.y),
                    self.css(*radius),
                    if *filled { "currentColor" } else { "none" },
                );
            }
            Node::Curve { from, control, to } => {
                self.open_svg("curve");
                _ = write!(
                    self.out,
                    r#"<path d="M {} {} Q {} {} {} {}" stroke="currentColor" fill="none"/></svg>"#,
                    self.number(from.x),
                    self.number(-from.y),
                    self.number(control.x),
                    self.number(-control.y),
                    self.number(to.x),
                    self.number(-to.y),
                );
            }
        }
    }

    fn open_svg(&mut self, class: &str) {
        _ = write!(
            self.out,
            r#"<svg class="{class}" overflow="visible" width="0" height="0">"#
        );
    }

    fn classes(&mut self, classes: &[String]) {
        if !classes.is_empty() {
            self.attribute("class", &classes.join(" "));
        }
    }

    fn attribute(&mut self, key: &str, value: &str) {
        _ = write!(self.out, " {key}=\"");
        escape_into(&mut self.out, value);
        self.out.push('"');
    }

    fn css(&self, length: Length) -> String {
        length.to_css(self.precision)
    }

    // SVG path data takes unitless user units, which are pixels.
    fn number(&self, length: Length) -> String {
        match length.to_px(self.precision) {
            Ok(px) => px.to_string(),
            Err(_) => self.css(length),
        }
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Snapshot;

    fn pt(s: &str) -> Length {
        s.parse().unwrap()
    }

    #[test]
    fn element_with_classes_and_attributes() {
        let mut tree = Tree::default();
        let text = tree.text("a < b", &["bf"]);
        let node = tree.create("p", vec![text, Node::text(" & c")], &["center"]);
        let node = tree.with_attribute(node, "id", "x");
        assert_eq!(
            to_html(&[node], &Labels::default(), 3),
            r#"<p class="center" id="x"><span class="bf">a &lt; b</span> &amp; c</p>"#
        );
    }

    #[test]
    fn void_element() {
        let node = Node::element("br", vec![]);
        assert_eq!(to_html(&[node], &Labels::default(), 3), "<br>");
    }

    #[test]
    fn references_resolve_at_serialization() {
        let mut labels = Labels::default();
        let id = labels.reference("intro");
        let nodes = vec![Node::Reference(id)];
        assert_eq!(to_html(&nodes, &labels, 3), "??");
        labels.define("intro", Snapshot::new("sec-1", "1")).unwrap();
        assert_eq!(to_html(&nodes, &labels, 3), r##"<a href="#sec-1">1</a>"##);
        assert_eq!(
            Node::Fragment(nodes).text_content(&labels),
            "1".to_string()
        );
    }

    #[test]
    fn line_flips_y_axis() {
        let mut tree = Tree::default();
        let node = tree.line(
            Vector::new(Length::ZERO, Length::ZERO),
            Vector::new(pt("72.27pt"), pt("72.27pt")),
            false,
        );
        assert_eq!(
            to_html(&[node], &Labels::default(), 3),
            r#"<svg class="line" overflow="visible" width="0" height="0"><line x1="0px" y1="0px" x2="96px" y2="-96px" stroke="currentColor"/></svg>"#
        );
    }

    #[test]
    fn configure_sets_precision() {
        let mut tree = Tree::default();
        let config = Config {
            precision: 1,
            ..Default::default()
        };
        tree.configure(&config);
        assert_eq!(tree.precision(), 1);
    }
}
