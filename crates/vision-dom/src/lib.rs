//! Element tree produced by the vision markup parser.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Each element owns its list of child ids, and the parent link is a plain
//! index, so it never keeps anything alive.
//!
//! Trees are only constructed through [`TreeBuilder`]. Creating an element and
//! attaching it to its parent is a single step there, which means an element
//! can never end up with two parents. Once [`TreeBuilder::finish`] hands out an
//! [`ElementTree`], the tree is read-only.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One markup tag: its name, attributes, direct text and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    attributes: AttributesMap,
    inner_text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    self_closing: bool,
}

impl Element {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            attributes: AttributesMap::new(),
            inner_text: String::new(),
            children: Vec::new(),
            parent,
            self_closing: false,
        }
    }

    /// The tag name, exactly as written in the opening tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes of the element. Keys are unique.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attributes
    }

    /// Concatenation of the element's direct text runs, in document order.
    #[must_use]
    pub fn inner_text(&self) -> &str {
        &self.inner_text
    }

    /// Child element ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The parent element, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if the element was written as `<name .../>`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Returns true if the element carries an attribute named `key`.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns the value of attribute `key`, if present.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Misuse of a [`TreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An element was opened after the root element had been closed.
    #[error("the root element is already closed; a tree has exactly one root")]
    RootAlreadyClosed,
    /// An operation needed an open element but none was open.
    #[error("no element is currently open")]
    NoOpenElement,
    /// `finish` was called before any element was opened.
    #[error("the tree has no root element")]
    EmptyTree,
    /// `finish` was called while elements were still open.
    #[error("{count} element(s) still open")]
    UnclosedElements {
        /// Number of elements that were never closed.
        count: usize,
    },
}

/// Builds an [`ElementTree`] in document order.
///
/// The builder keeps a stack of open elements. [`open_element`](Self::open_element)
/// creates a new element as the last child of the innermost open element (or as
/// the root when nothing is open yet) and pushes it. Attributes and text always
/// go to the innermost open element.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Element>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost open element.
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Create an element and append it to the innermost open element.
    ///
    /// The new element becomes the innermost open element.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::RootAlreadyClosed`] if the root was already closed.
    pub fn open_element(&mut self, name: impl Into<String>) -> Result<NodeId, BuildError> {
        let parent = self.current();
        if parent.is_none() && !self.nodes.is_empty() {
            return Err(BuildError::RootAlreadyClosed);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(name.into(), parent));
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        self.open.push(id);
        Ok(id)
    }

    /// Set an attribute on the innermost open element.
    ///
    /// A repeated key overwrites the earlier value, which is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoOpenElement`] if nothing is open.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, BuildError> {
        let element = self.current_mut()?;
        Ok(element.attributes.insert(key.into(), value.into()))
    }

    /// Append a text run to the innermost open element's inner text.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoOpenElement`] if nothing is open.
    pub fn append_text(&mut self, text: &str) -> Result<(), BuildError> {
        self.current_mut()?.inner_text.push_str(text);
        Ok(())
    }

    /// Close the innermost open element and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoOpenElement`] if nothing is open.
    pub fn close_element(&mut self) -> Result<NodeId, BuildError> {
        self.open.pop().ok_or(BuildError::NoOpenElement)
    }

    /// Close the innermost open element as a self-closing tag.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoOpenElement`] if nothing is open.
    pub fn close_self_closing(&mut self) -> Result<NodeId, BuildError> {
        self.current_mut()?.self_closing = true;
        self.close_element()
    }

    /// Finish construction.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyTree`] if no element was created, or
    /// [`BuildError::UnclosedElements`] if some are still open.
    pub fn finish(self) -> Result<ElementTree, BuildError> {
        if self.nodes.is_empty() {
            return Err(BuildError::EmptyTree);
        }
        if !self.open.is_empty() {
            return Err(BuildError::UnclosedElements {
                count: self.open.len(),
            });
        }
        Ok(ElementTree { nodes: self.nodes })
    }

    fn current_mut(&mut self) -> Result<&mut Element, BuildError> {
        let id = self.current().ok_or(BuildError::NoOpenElement)?;
        Ok(&mut self.nodes[id.0])
    }
}

/// A finished, read-only, single-rooted element tree.
///
/// All elements are stored in a contiguous vector in document order, so the
/// root is always at [`NodeId::ROOT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementTree {
    nodes: Vec<Element>,
}

impl ElementTree {
    /// Get the root element ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get the root element.
    #[must_use]
    pub fn root_element(&self) -> &Element {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Get an element by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Number of elements in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a finished tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get all children of an element.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Get the parent of an element.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Element::parent)
    }

    /// Iterate over all ancestors of an element, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over an element and everything below it in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let stack = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DescendantIterator { tree: self, stack }
    }

    fn fmt_element(&self, f: &mut fmt::Formatter<'_>, id: NodeId, indent: usize) -> fmt::Result {
        let Some(element) = self.get(id) else {
            return Ok(());
        };
        let prefix = "  ".repeat(indent);

        let mut attrs: Vec<(&String, &String)> = element.attributes.iter().collect();
        attrs.sort();
        write!(f, "{prefix}<{}", element.name)?;
        for (key, value) in attrs {
            write!(f, " {key}=\"{value}\"")?;
        }
        if element.self_closing {
            writeln!(f, "/>")?;
            return Ok(());
        }
        writeln!(f, ">")?;

        if !element.inner_text.is_empty() {
            writeln!(f, "{prefix}  \"{}\"", element.inner_text)?;
        }
        for &child in &element.children {
            self.fmt_element(f, child, indent + 1)?;
        }
        Ok(())
    }
}

/// Indented dump of the tree, one element per line, attributes sorted by key.
impl fmt::Display for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_element(f, self.root(), 0)
    }
}

/// Iterator over ancestors of an element.
pub struct AncestorIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over an element and its descendants.
pub struct DescendantIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
