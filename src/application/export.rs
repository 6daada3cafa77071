//! JSON import and export of documents.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::application::dom::{create_element, Child};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{AttrValue, DocumentTree, DomainError, DomainResult, NodeId};

/// Document description as found in JSON files.
///
/// ```json
/// {"name": "p", "attributes": {"align": "left"}, "children": ["foo", {"name": "img"}]}
/// ```
/// Attributes are applied in the order they appear in the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DocumentSpec {
    Text(String),
    Element {
        name: String,
        #[serde(default)]
        attributes: IndexMap<String, AttrValue>,
        #[serde(default)]
        children: Vec<DocumentSpec>,
    },
}

impl DocumentSpec {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Build the described subtree into `tree`, returning its top node.
    pub fn build(&self, tree: &mut DocumentTree) -> DomainResult<NodeId> {
        match self {
            DocumentSpec::Text(text) => Ok(tree.create_text(text, [])),
            DocumentSpec::Element {
                name,
                attributes,
                children,
            } => {
                let children = children
                    .iter()
                    .map(|child| match child {
                        DocumentSpec::Text(text) => Ok(Child::Text(text.clone())),
                        element => element.build(tree).map(Child::Node),
                    })
                    .collect::<DomainResult<Vec<_>>>()?;
                create_element(
                    tree,
                    name,
                    attributes.iter().map(|(k, v)| (k.clone(), v.clone())),
                    children,
                )
            }
        }
    }
}

/// Serialize the node at `id` (and its subtree) without ancestor structure.
pub fn node_to_json(tree: &DocumentTree, id: NodeId, pretty: bool) -> ApplicationResult<String> {
    let snapshot = tree
        .snapshot(id)
        .ok_or(DomainError::NodeNotFound(id))?;
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    };
    json.map_err(|e| ApplicationError::OperationFailed {
        context: format!("serialize node {id}"),
        source: Box::new(e),
    })
}
