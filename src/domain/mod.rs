//! Domain layer: the document tree model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod attribute;
pub mod error;
pub mod node;
pub mod snapshot;
pub mod tree_traits;

pub use arena::{Ancestors, Descendants, DocumentTree};
pub use attribute::{AttrQuery, AttrValue, Attribute, AttributeSet};
pub use error::{DomainError, DomainResult};
pub use node::{ChildSequence, ElementData, Node, NodeId, NodeKind, TextData};
pub use snapshot::NodeSnapshot;
pub use tree_traits::TreeNodeConvert;

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Leaves the input untouched if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
