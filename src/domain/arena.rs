use generational_arena::Arena;
use tracing::{instrument, trace};

use crate::domain::attribute::Attribute;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{ChildSequence, ElementData, Node, NodeId, NodeKind, TextData};

/// Arena owning every node of one document.
///
/// Elements own their children through `ElementData::children`; a node's
/// `parent` is a plain handle back into the same arena. All attach/detach
/// goes through this type so the two sides stay in step.
#[derive(Debug)]
pub struct DocumentTree {
    arena: Arena<Node>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    #[instrument(level = "trace", skip(self, attrs))]
    pub fn create_element(
        &mut self,
        name: &str,
        attrs: impl IntoIterator<Item = Attribute>,
    ) -> DomainResult<NodeId> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "element name must not be blank".to_string(),
            ));
        }
        let kind = NodeKind::Element(ElementData {
            name: name.to_string(),
            children: Vec::new(),
        });
        Ok(NodeId(self.arena.insert(Node::new(kind, attrs))))
    }

    #[instrument(level = "trace", skip(self, attrs))]
    pub fn create_text(&mut self, text: &str, attrs: impl IntoIterator<Item = Attribute>) -> NodeId {
        let kind = NodeKind::Text(TextData {
            text: text.to_string(),
        });
        NodeId(self.arena.insert(Node::new(kind, attrs)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    /// Mutable access for attribute changes; the parent link stays private.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id.0)
    }

    fn get(&self, id: NodeId) -> DomainResult<&Node> {
        self.node(id).ok_or(DomainError::NodeNotFound(id))
    }

    fn element(&self, id: NodeId) -> DomainResult<&ElementData> {
        self.get(id)?
            .as_element()
            .ok_or(DomainError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomainResult<&mut ElementData> {
        match &mut self.arena.get_mut(id.0).ok_or(DomainError::NodeNotFound(id))?.kind {
            NodeKind::Element(e) => Ok(e),
            NodeKind::Text(_) => Err(DomainError::NotAnElement(id)),
        }
    }

    /// Children of an element; empty for text nodes and unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .and_then(Node::as_element)
            .map(ElementData::children)
            .unwrap_or(&[])
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).len()
    }

    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent)?.as_element()?.child_at(index)
    }

    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.node(parent)?.as_element()?.index_of(child)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let count = self.element(parent)?.child_count();
        let index = match self.index_of(parent, child) {
            Some(_) => count - 1,
            None => count,
        };
        self.insert_child(parent, index, child)
    }

    /// Insert `child` at `index` of `parent`'s children.
    ///
    /// A child that is already attached somewhere is detached first, and
    /// `index` refers to the sequence after that detachment.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> DomainResult<()> {
        if parent == child {
            return Err(DomainError::InvalidArgument(format!(
                "node {child} cannot be its own child"
            )));
        }
        let current_parent = self.get(child)?.parent;
        let element = self.element(parent)?;
        let mut count = element.child_count();
        if current_parent == Some(parent) && element.index_of(child).is_some() {
            count -= 1;
        }
        if index > count {
            return Err(DomainError::IndexOutOfRange { index, count });
        }

        self.detach(child)?;
        self.element_mut(parent)?.children.insert(index, child);
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        trace!("attached {child} to {parent} at {index}");
        Ok(())
    }

    /// Detach `child` from its parent, returning its former position.
    ///
    /// Detaching a root is a no-op returning `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, child: NodeId) -> DomainResult<Option<usize>> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(None);
        };
        let position = match self.element_mut(parent) {
            Ok(element) => {
                let position = element.index_of(child);
                if let Some(pos) = position {
                    element.children.remove(pos);
                }
                position
            }
            Err(_) => None,
        };
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = None;
        }
        Ok(position)
    }

    /// Detach `id` and drop it together with its whole subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> DomainResult<()> {
        self.detach(id)?;
        let subtree: Vec<NodeId> = self.descendants(id).collect();
        for node in subtree {
            self.arena.remove(node.0);
        }
        Ok(())
    }

    /// Index of `id` in its parent, verified against the parent's children.
    ///
    /// `None` when there is no parent or the parent does not list the node.
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.node(id)?.parent?;
        self.index_of(parent, id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of parent links up to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Topmost ancestor; a parentless node is its own root.
    pub fn root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let pos = self.position_in_parent(id)?;
        self.child_at(self.parent(id)?, pos + 1)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let pos = self.position_in_parent(id)?.checked_sub(1)?;
        self.child_at(self.parent(id)?, pos)
    }

    /// Child indices leading from the root to `id`.
    ///
    /// Stops at the first node whose parent does not list it.
    #[instrument(level = "trace", skip(self))]
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let Some(pos) = self.index_of(parent, current) else {
                break;
            };
            path.push(pos);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Follow `path` down from `from`.
    pub fn resolve_path(&self, from: NodeId, path: &[usize]) -> Option<NodeId> {
        if !self.contains(from) {
            return None;
        }
        path.iter()
            .try_fold(from, |node, &index| self.child_at(node, index))
    }

    /// Preorder walk of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if self.contains(id) {
            stack.push(id);
        }
        Descendants { tree: self, stack }
    }

    #[cfg(test)]
    pub(crate) fn set_parent_unchecked(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.arena.get_mut(id.0) {
            node.parent = parent;
        }
    }
}

pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct Descendants<'a> {
    tree: &'a DocumentTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // reverse keeps left-to-right order
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AttrValue;

    // root
    // ├── a
    // ├── b
    // │   └── b0
    // └── c
    struct Fixture {
        tree: DocumentTree,
        root: NodeId,
        a: NodeId,
        b: NodeId,
        b0: NodeId,
        c: NodeId,
    }

    fn fixture() -> Fixture {
        let mut tree = DocumentTree::new();
        let root = tree.create_element("root", []).unwrap();
        let a = tree.create_element("a", []).unwrap();
        let b = tree.create_element("b", []).unwrap();
        let c = tree.create_text("c", []);
        let b0 = tree.create_text("b0", []);
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        tree.append_child(root, c).unwrap();
        tree.append_child(b, b0).unwrap();
        Fixture {
            tree,
            root,
            a,
            b,
            b0,
            c,
        }
    }

    #[test]
    fn test_navigation_of_middle_child() {
        let f = fixture();
        assert_eq!(f.tree.position_in_parent(f.b), Some(1));
        assert_eq!(f.tree.next_sibling(f.b), Some(f.c));
        assert_eq!(f.tree.previous_sibling(f.b), Some(f.a));
        assert_eq!(f.tree.depth(f.b), 1);
        assert_eq!(f.tree.root(f.b), f.root);
        assert_eq!(f.tree.path(f.b), vec![1]);
    }

    #[test]
    fn test_boundaries_are_absent() {
        let f = fixture();
        assert_eq!(f.tree.previous_sibling(f.a), None);
        assert_eq!(f.tree.next_sibling(f.c), None);
        assert_eq!(f.tree.next_sibling(f.root), None);
        assert_eq!(f.tree.previous_sibling(f.root), None);
    }

    #[test]
    fn test_root_node_properties() {
        let f = fixture();
        assert_eq!(f.tree.position_in_parent(f.root), None);
        assert_eq!(f.tree.depth(f.root), 0);
        assert_eq!(f.tree.root(f.root), f.root);
        assert!(f.tree.path(f.root).is_empty());
    }

    #[test]
    fn test_path_resolves_back_to_node() {
        let f = fixture();
        for id in [f.root, f.a, f.b, f.b0, f.c] {
            let path = f.tree.path(id);
            assert_eq!(f.tree.resolve_path(f.tree.root(id), &path), Some(id));
        }
        assert_eq!(f.tree.path(f.b0), vec![1, 0]);
        assert_eq!(f.tree.depth(f.b0), 2);
    }

    #[test]
    fn test_parent_not_listing_child_is_treated_as_rootless() {
        let mut f = fixture();
        let stray = f.tree.create_text("stray", []);
        f.tree.set_parent_unchecked(stray, Some(f.b));

        assert_eq!(f.tree.position_in_parent(stray), None);
        assert_eq!(f.tree.next_sibling(stray), None);
        assert_eq!(f.tree.previous_sibling(stray), None);
        assert!(f.tree.path(stray).is_empty());
    }

    #[test]
    fn test_append_moves_node_between_parents() {
        let mut f = fixture();
        f.tree.append_child(f.a, f.b0).unwrap();

        assert_eq!(f.tree.child_count(f.b), 0);
        assert_eq!(f.tree.children(f.a), &[f.b0]);
        assert_eq!(f.tree.parent(f.b0), Some(f.a));
        assert_eq!(f.tree.path(f.b0), vec![0, 0]);
    }

    #[test]
    fn test_append_existing_child_moves_it_last() {
        let mut f = fixture();
        f.tree.append_child(f.root, f.a).unwrap();
        assert_eq!(f.tree.children(f.root), &[f.b, f.c, f.a]);
    }

    #[test]
    fn test_insert_child_validates_arguments() {
        let mut f = fixture();
        let x = f.tree.create_text("x", []);

        assert_eq!(
            f.tree.insert_child(f.c, 0, x),
            Err(DomainError::NotAnElement(f.c))
        );
        assert_eq!(
            f.tree.insert_child(f.root, 4, x),
            Err(DomainError::IndexOutOfRange { index: 4, count: 3 })
        );
        assert!(matches!(
            f.tree.insert_child(f.b, 0, f.b),
            Err(DomainError::InvalidArgument(_))
        ));
        f.tree.insert_child(f.root, 0, x).unwrap();
        assert_eq!(f.tree.position_in_parent(f.a), Some(1));
    }

    #[test]
    fn test_detach_and_remove() {
        let mut f = fixture();
        assert_eq!(f.tree.detach(f.a).unwrap(), Some(0));
        assert_eq!(f.tree.parent(f.a), None);
        assert_eq!(f.tree.position_in_parent(f.b), Some(0));
        assert_eq!(f.tree.detach(f.a).unwrap(), None);

        f.tree.remove(f.b).unwrap();
        assert!(!f.tree.contains(f.b));
        assert!(!f.tree.contains(f.b0));
        assert_eq!(f.tree.children(f.root), &[f.c]);
    }

    #[test]
    fn test_descendants_preorder() {
        let f = fixture();
        let order: Vec<_> = f.tree.descendants(f.root).collect();
        assert_eq!(order, vec![f.root, f.a, f.b, f.b0, f.c]);
    }

    #[test]
    fn test_attribute_change_through_node_mut() {
        let mut f = fixture();
        let node = f.tree.node_mut(f.a).unwrap();
        node.set_attribute(Attribute::new("bold", true).unwrap());
        assert_eq!(
            f.tree.node(f.a).unwrap().get_attribute("bold"),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn test_blank_element_name_rejected() {
        let mut tree = DocumentTree::new();
        assert!(matches!(
            tree.create_element(" ", []),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
