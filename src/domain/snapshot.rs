//! Cycle-free structural copies of nodes for export.

use serde::Serialize;

use crate::domain::arena::DocumentTree;
use crate::domain::attribute::Attribute;
use crate::domain::node::{NodeId, NodeKind};
use crate::domain::tree_traits::node_label;

/// Shallow copy of a node's own fields.
///
/// Related nodes are reduced to labels: the parent to its name, children to
/// their one-line labels. Serializing never walks into other nodes, so the
/// cost is independent of the tree's depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub attributes: Vec<Attribute>,
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl DocumentTree {
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.node(id)?;
        let parent = self
            .parent(id)
            .and_then(|p| self.node(p))
            .and_then(|p| p.name())
            .map(str::to_string);
        let (name, text) = match &node.kind {
            NodeKind::Element(e) => (Some(e.name.clone()), None),
            NodeKind::Text(t) => (None, Some(t.text.clone())),
        };
        Some(NodeSnapshot {
            name,
            text,
            attributes: node.attributes().iter().cloned().collect(),
            parent,
            children: self
                .children(id)
                .iter()
                .filter_map(|&c| self.node(c))
                .map(node_label)
                .collect(),
        })
    }
}
