//! Element construction helper.

use tracing::debug;

use crate::domain::{AttrValue, Attribute, DocumentTree, DomainError, DomainResult, NodeId};

/// Content accepted as a child by [`create_element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(NodeId),
    /// Wrapped into a new text node.
    Text(String),
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Child::Node(id)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

/// A single child or a sequence of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children(Vec<Child>);

impl Children {
    pub fn none() -> Self {
        Self::default()
    }
}

impl From<Child> for Children {
    fn from(child: Child) -> Self {
        Children(vec![child])
    }
}

impl From<NodeId> for Children {
    fn from(id: NodeId) -> Self {
        Children(vec![Child::Node(id)])
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Children(vec![Child::from(text)])
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Children(vec![Child::Text(text)])
    }
}

impl<C: Into<Child>> From<Vec<C>> for Children {
    fn from(children: Vec<C>) -> Self {
        Children(children.into_iter().map(Into::into).collect())
    }
}

/// Create an element with attributes and children.
///
/// ```ignore
/// create_element(&mut tree, "p", [("class", "foo")], "foo")?;            // <p class="foo">foo</p>
/// create_element(&mut tree, "p", no_attrs(), vec![Child::from("foo"), img.into()])?;
/// ```
pub fn create_element<K, V>(
    tree: &mut DocumentTree,
    name: &str,
    attributes: impl IntoIterator<Item = (K, V)>,
    children: impl Into<Children>,
) -> DomainResult<NodeId>
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    let attrs = attributes
        .into_iter()
        .map(|(k, v)| Attribute::new(k, v))
        .collect::<DomainResult<Vec<_>>>()?;
    let Children(children) = children.into();
    // nothing is created unless every child handle is live
    let unknown = children.iter().find_map(|child| match child {
        Child::Node(id) if !tree.contains(*id) => Some(*id),
        _ => None,
    });
    if let Some(id) = unknown {
        return Err(DomainError::NodeNotFound(id));
    }

    let element = tree.create_element(name, attrs)?;
    debug!("create_element: <{}> with {} children", name, children.len());
    for child in children {
        let child = match child {
            Child::Node(id) => id,
            Child::Text(text) => tree.create_text(&text, []),
        };
        tree.append_child(element, child)?;
    }
    Ok(element)
}

/// Empty attribute mapping for [`create_element`].
pub fn no_attrs() -> Vec<(String, AttrValue)> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bare_element() {
        let mut tree = DocumentTree::new();
        let p = create_element(&mut tree, "p", no_attrs(), Children::none()).unwrap();
        let node = tree.node(p).unwrap();
        assert_eq!(node.name(), Some("p"));
        assert_eq!(node.attribute_count(), 0);
        assert_eq!(tree.child_count(p), 0);
    }

    #[test]
    fn test_create_with_attributes() {
        let mut tree = DocumentTree::new();
        let p = create_element(&mut tree, "p", [("class", "foo")], Children::none()).unwrap();
        assert_eq!(
            tree.node(p).unwrap().get_attribute("class"),
            Some(&AttrValue::Str("foo".into()))
        );
    }

    #[test]
    fn test_single_string_child_becomes_text() {
        let mut tree = DocumentTree::new();
        let p = create_element(&mut tree, "p", no_attrs(), "foo").unwrap();
        let child = tree.child_at(p, 0).unwrap();
        assert_eq!(
            tree.node(child).unwrap().as_text().map(|t| t.text.as_str()),
            Some("foo")
        );
    }

    #[test]
    fn test_mixed_children_appended_in_order() {
        let mut tree = DocumentTree::new();
        let img = create_element(&mut tree, "img", no_attrs(), Children::none()).unwrap();
        let p = create_element(
            &mut tree,
            "p",
            no_attrs(),
            vec![Child::from("foo"), Child::from(img)],
        )
        .unwrap();

        assert_eq!(tree.child_count(p), 2);
        assert_eq!(tree.child_at(p, 1), Some(img));
        assert_eq!(tree.parent(img), Some(p));
    }

    #[test]
    fn test_blank_attribute_key_is_rejected() {
        let mut tree = DocumentTree::new();
        let result = create_element(&mut tree, "p", [("", 1i64)], Children::none());
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_child_leaves_tree_untouched() {
        let mut tree = DocumentTree::new();
        let gone = tree.create_text("gone", []);
        tree.remove(gone).unwrap();
        let kept = tree.create_text("kept", []);
        let before = tree.len();

        let result = create_element(
            &mut tree,
            "p",
            no_attrs(),
            vec![Child::from("foo"), Child::from(kept), Child::from(gone)],
        );

        assert_eq!(result, Err(DomainError::NodeNotFound(gone)));
        assert_eq!(tree.len(), before);
        assert_eq!(tree.parent(kept), None);
    }
}
