//! Terminal rendering of document trees.

use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::DocumentTree;
use crate::domain::node::{Node, NodeId, NodeKind};

pub trait TreeNodeConvert {
    fn to_tree_string(&self, id: NodeId) -> Tree<String>;
}

/// One-line label: `<p align=left>` for elements, `"foo" [bold=true]` for text.
pub fn node_label(node: &Node) -> String {
    let attrs = node
        .attributes()
        .iter()
        .map(|a| format!("{}={}", a.key(), a.value()))
        .join(" ");
    match &node.kind {
        NodeKind::Element(e) if attrs.is_empty() => format!("<{}>", e.name),
        NodeKind::Element(e) => format!("<{} {}>", e.name, attrs),
        NodeKind::Text(t) if attrs.is_empty() => format!("{:?}", t.text),
        NodeKind::Text(t) => format!("{:?} [{}]", t.text, attrs),
    }
}

enum Visit {
    Enter(NodeId),
    Exit(NodeId, usize),
}

impl TreeNodeConvert for DocumentTree {
    /// Postorder walk on an explicit stack; finished subtrees wait in `built`
    /// until their parent collects them.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, id: NodeId) -> Tree<String> {
        if !self.contains(id) {
            return Tree::new("Empty tree".to_string());
        }
        let mut stack = vec![Visit::Enter(id)];
        let mut built: Vec<Tree<String>> = Vec::new();
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(current) => {
                    let children: Vec<_> = self
                        .children(current)
                        .iter()
                        .copied()
                        .filter(|&c| self.contains(c))
                        .collect();
                    stack.push(Visit::Exit(current, children.len()));
                    stack.extend(children.into_iter().rev().map(Visit::Enter));
                }
                Visit::Exit(current, count) => {
                    let leaves = built.split_off(built.len() - count);
                    let label = self.node(current).map(node_label).unwrap_or_default();
                    built.push(Tree::new(label).with_leaves(leaves));
                }
            }
        }
        built
            .pop()
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
