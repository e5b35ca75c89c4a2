//! Scope stack
//!
//! Every group (`{...}`, an environment, the argument of a command) runs in its own
//!     scope frame.
//! A frame holds the inheritable text attributes, the paragraph alignment and the
//!     current label.
//! Attributes and alignment not set in a frame are looked up in the enclosing frames.
//! The current label and the table of lengths are carried into every new frame,
//!     and changes made while the frame is active are rolled back when it is exited.
//!
//! Independently of the frames, the stack tracks *balanced regions*.
//! Each region counts the groups opened in it and not yet closed;
//!     an environment body is a region and must end with the count at zero.

use crate::error::{LatexError, UndefinedError};
use crate::label::Snapshot;
use crate::prelude as txl;
use dimen::Length;
use latexlang_stdext::collections::scopedmap::{Scope, ScopedMap};

macro_rules! attribute_values {
    ( $( $(#[$doc: meta])* $type: ident { $( $variant: ident => $class: expr, )+ } )+ ) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
            pub enum $type {
                $( $variant, )+
            }

            impl $type {
                /// The renderer class for this value.
                pub fn class(&self) -> &'static str {
                    match self {
                        $( $type::$variant => $class, )+
                    }
                }
            }
        )+
    };
}

attribute_values!(
    FontFamily {
        Roman => "rm",
        SansSerif => "sf",
        Typewriter => "tt",
    }
    FontWeight {
        Medium => "md",
        Bold => "bf",
    }
    FontShape {
        Upright => "up",
        Italic => "it",
        Slanted => "sl",
        SmallCaps => "sc",
    }
    /// Font sizes, from `\tiny` to `\Huge`.
    FontSize {
        Tiny => "tiny",
        ScriptSize => "scriptsize",
        FootnoteSize => "footnotesize",
        Small => "small",
        NormalSize => "normalsize",
        Large => "large",
        Larger => "Large",
        Largest => "LARGE",
        Huge => "huge",
        Huger => "Huge",
    }
    Decoration {
        Underline => "underline",
    }
    /// Paragraph alignment.
    Alignment {
        Justified => "justify",
        FlushLeft => "flushleft",
        FlushRight => "flushright",
        Centered => "center",
    }
);

/// An inheritable text attribute with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Family(FontFamily),
    Weight(FontWeight),
    Shape(FontShape),
    Size(FontSize),
    Decoration(Decoration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Family,
    Weight,
    Shape,
    Size,
    Decoration,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::Family,
        AttributeKind::Weight,
        AttributeKind::Shape,
        AttributeKind::Size,
        AttributeKind::Decoration,
    ];
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Family(_) => AttributeKind::Family,
            Attribute::Weight(_) => AttributeKind::Weight,
            Attribute::Shape(_) => AttributeKind::Shape,
            Attribute::Size(_) => AttributeKind::Size,
            Attribute::Decoration(_) => AttributeKind::Decoration,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Attribute::Family(v) => v.class(),
            Attribute::Weight(v) => v.class(),
            Attribute::Shape(v) => v.class(),
            Attribute::Size(v) => v.class(),
            Attribute::Decoration(v) => v.class(),
        }
    }

    /// Whether this is the value a document starts with.
    ///
    /// Default values produce no renderer class.
    pub fn is_default(&self) -> bool {
        matches!(
            self,
            Attribute::Family(FontFamily::Roman)
                | Attribute::Weight(FontWeight::Medium)
                | Attribute::Shape(FontShape::Upright)
                | Attribute::Size(FontSize::NormalSize)
        )
    }
}

/// The attributes set in a single frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    family: Option<FontFamily>,
    weight: Option<FontWeight>,
    shape: Option<FontShape>,
    size: Option<FontSize>,
    decoration: Option<Decoration>,
}

impl Attributes {
    pub fn get(&self, kind: AttributeKind) -> Option<Attribute> {
        match kind {
            AttributeKind::Family => self.family.map(Attribute::Family),
            AttributeKind::Weight => self.weight.map(Attribute::Weight),
            AttributeKind::Shape => self.shape.map(Attribute::Shape),
            AttributeKind::Size => self.size.map(Attribute::Size),
            AttributeKind::Decoration => self.decoration.map(Attribute::Decoration),
        }
    }

    pub fn set(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Family(v) => self.family = Some(v),
            Attribute::Weight(v) => self.weight = Some(v),
            Attribute::Shape(v) => self.shape = Some(v),
            Attribute::Size(v) => self.size = Some(v),
            Attribute::Decoration(v) => self.decoration = Some(v),
        }
    }

    pub fn clear(&mut self, kind: AttributeKind) {
        match kind {
            AttributeKind::Family => self.family = None,
            AttributeKind::Weight => self.weight = None,
            AttributeKind::Shape => self.shape = None,
            AttributeKind::Size => self.size = None,
            AttributeKind::Decoration => self.decoration = None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Frame {
    attributes: Attributes,
    alignment: Option<Alignment>,
    label: Snapshot,
}

/// The scope stack.
#[derive(Debug, Clone)]
pub struct Stack {
    // Never empty; the first frame is the implicit root.
    frames: Vec<Frame>,
    lengths: ScopedMap<String, Length>,
    // Never empty; the first region is the document itself.
    regions: Vec<usize>,
}

impl Default for Stack {
    fn default() -> Self {
        Stack {
            frames: vec![Frame::default()],
            lengths: Default::default(),
            regions: vec![0],
        }
    }
}

impl Stack {
    /// Pushes a new frame.
    ///
    /// If `copy_attributes` is true the new frame starts with the attributes visible
    ///     at this point; otherwise it starts empty and inherits them by lookup.
    /// Either way the lengths and the current label are carried over.
    pub fn enter(&mut self, copy_attributes: bool) {
        let attributes = if copy_attributes {
            self.active_attributes()
        } else {
            Attributes::default()
        };
        let label = self.current_label().clone();
        self.frames.push(Frame {
            attributes,
            alignment: None,
            label,
        });
        self.lengths.enter();
    }

    /// Pops the innermost frame, rolling back everything set in it.
    pub fn exit(&mut self) -> txl::Result<()> {
        if self.frames.len() <= 1 {
            return Err(NoScopeToExitError {}.into());
        }
        self.frames.pop();
        self.lengths.leave().map_err(|_| NoScopeToExitError {})?;
        Ok(())
    }

    /// Number of frames above the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Returns the innermost value set for the attribute, if any.
    pub fn active_attribute(&self, kind: AttributeKind) -> Option<Attribute> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.attributes.get(kind))
    }

    /// Returns all attributes as visible from the innermost frame.
    pub fn active_attributes(&self) -> Attributes {
        let mut attributes = Attributes::default();
        for kind in AttributeKind::ALL {
            if let Some(attribute) = self.active_attribute(kind) {
                attributes.set(attribute);
            }
        }
        attributes
    }

    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.top_mut().attributes.set(attribute);
    }

    /// Resets all attributes in the innermost frame to the document defaults.
    pub fn reset_attributes(&mut self) {
        let top = self.top_mut();
        top.attributes = Attributes::default();
        top.attributes.set(Attribute::Family(FontFamily::Roman));
        top.attributes.set(Attribute::Weight(FontWeight::Medium));
        top.attributes.set(Attribute::Shape(FontShape::Upright));
        top.attributes.set(Attribute::Size(FontSize::NormalSize));
        top.attributes.clear(AttributeKind::Decoration);
    }

    /// Renderer classes for the visible non-default attributes.
    pub fn inline_classes(&self) -> Vec<&'static str> {
        AttributeKind::ALL
            .into_iter()
            .filter_map(|kind| self.active_attribute(kind))
            .filter(|attribute| !attribute.is_default())
            .map(|attribute| attribute.class())
            .collect()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.frames.iter().rev().find_map(|frame| frame.alignment)
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.top_mut().alignment = Some(alignment);
    }

    pub fn current_label(&self) -> &Snapshot {
        &self.top().label
    }

    pub fn set_current_label(&mut self, label: Snapshot) {
        self.top_mut().label = label;
    }

    /// Allocates a new length register with value zero.
    ///
    /// Allocations are global, as in LaTeX's `\newlength`.
    pub fn new_length(&mut self, name: &str) -> txl::Result<()> {
        if self.lengths.contains_key(&name.to_string()) {
            return Err(DuplicateLengthError { name: name.into() }.into());
        }
        self.lengths
            .insert(name.to_string(), Length::ZERO, Scope::Global);
        Ok(())
    }

    /// Sets a length in the innermost frame.
    pub fn set_length(&mut self, name: &str, value: Length) -> txl::Result<()> {
        self.length(name)?;
        self.lengths.insert(name.to_string(), value, Scope::Local);
        Ok(())
    }

    /// Sets a length in every frame.
    pub fn set_length_globally(&mut self, name: &str, value: Length) -> txl::Result<()> {
        self.length(name)?;
        self.lengths.insert(name.to_string(), value, Scope::Global);
        Ok(())
    }

    pub fn length(&self, name: &str) -> txl::Result<Length> {
        match self.lengths.get(&name.to_string()) {
            Some(length) => Ok(*length),
            None => Err(UndefinedError::new(
                "length",
                name,
                self.lengths.iter().map(|(k, _)| k.as_str()),
            )
            .into()),
        }
    }

    pub fn has_length(&self, name: &str) -> bool {
        self.lengths.contains_key(&name.to_string())
    }

    /// Starts a balanced region, e.g. an environment body.
    pub fn start_balanced_region(&mut self) {
        self.regions.push(0);
    }

    /// Ends the innermost balanced region.
    ///
    /// Fails if groups opened in the region are still open.
    pub fn end_balanced_region(&mut self) -> txl::Result<()> {
        if !self.is_balanced() {
            return Err(UnbalancedGroupsError {
                open: self.open_groups(),
            }
            .into());
        }
        if self.regions.len() > 1 {
            self.regions.pop();
        }
        Ok(())
    }

    /// Whether every group opened in the innermost region has been closed.
    pub fn is_balanced(&self) -> bool {
        self.open_groups() == 0
    }

    pub fn open_groups(&self) -> usize {
        self.regions.last().copied().unwrap_or(0)
    }

    /// Records that a group was opened in the innermost region.
    pub fn open_group(&mut self) {
        if let Some(count) = self.regions.last_mut() {
            *count += 1;
        }
    }

    /// Records that a group was closed in the innermost region.
    ///
    /// Returns false, changing nothing, if the region has no open group.
    pub fn close_group(&mut self) -> bool {
        match self.regions.last_mut() {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    fn top(&self) -> &Frame {
        // the root frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let i = self.frames.len() - 1;
        &mut self.frames[i]
    }
}

#[derive(Debug)]
pub struct NoScopeToExitError {}

impl LatexError for NoScopeToExitError {
    fn title(&self) -> String {
        "there is no group to end".into()
    }
}

#[derive(Debug)]
pub struct UnbalancedGroupsError {
    pub open: usize,
}

impl LatexError for UnbalancedGroupsError {
    fn title(&self) -> String {
        "groups must be balanced".into()
    }

    fn notes(&self) -> Vec<String> {
        vec![format!(
            "{} group(s) opened in this environment are still open",
            self.open
        )]
    }
}

#[derive(Debug)]
pub struct DuplicateLengthError {
    pub name: String,
}

impl LatexError for DuplicateLengthError {
    fn title(&self) -> String {
        format!("length \\{} is already defined", self.name)
    }
}
