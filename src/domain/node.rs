//! Node data shared by every participant of the document tree.

use std::fmt;

use generational_arena::Index;

use crate::domain::attribute::{AttrQuery, AttrValue, Attribute, AttributeSet};

/// Handle of a node inside a [`DocumentTree`](crate::domain::DocumentTree).
///
/// Generational: a handle to a removed node never aliases a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// Capability an element exposes to its children for navigation.
pub trait ChildSequence {
    fn child_count(&self) -> usize;

    fn child_at(&self, index: usize) -> Option<NodeId>;

    /// Position of `node` by identity.
    fn index_of(&self, node: NodeId) -> Option<usize>;
}

/// Container node payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub name: String,
    pub(crate) children: Vec<NodeId>,
}

impl ElementData {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl ChildSequence for ElementData {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == node)
    }
}

/// Leaf node payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(ElementData),
    Text(TextData),
}

/// A node of the document tree.
///
/// The parent link is a non-owning handle; only the tree's child-management
/// API writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    attrs: AttributeSet,
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, attrs: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            parent: None,
            attrs: AttributeSet::from_attrs(attrs),
            kind,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Element(_) => None,
        }
    }

    /// Element name, `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|e| e.name.as_str())
    }

    /// True if the node holds an attribute with the given key, or, when a full
    /// attribute is given, one with the same key and an equal value.
    pub fn has_attribute<'a>(&self, query: impl Into<AttrQuery<'a>>) -> bool {
        self.attrs.contains(query)
    }

    pub fn get_attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attribute(&mut self, attr: Attribute) {
        self.attrs.set(attr);
    }

    pub fn remove_attribute(&mut self, key: &str) {
        self.attrs.remove(key);
    }

    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attrs
    }
}
