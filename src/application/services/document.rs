//! Document loading service
//!
//! Reads JSON document files into a [`DocumentTree`].

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::export::DocumentSpec;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DocumentTree, NodeId};
use crate::infrastructure::traits::FileSystem;

/// A loaded document: the arena and its top node.
#[derive(Debug)]
pub struct LoadedDocument {
    pub tree: DocumentTree,
    pub root: NodeId,
}

impl LoadedDocument {
    /// Node at `path` below the document root.
    pub fn node_at(&self, path: &[usize]) -> ApplicationResult<NodeId> {
        self.tree
            .resolve_path(self.root, path)
            .ok_or_else(|| ApplicationError::PathNotFound(path.to_vec()))
    }
}

pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
}

impl DocumentService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedDocument> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        let spec = DocumentSpec::from_json(&content).map_err(|e| {
            ApplicationError::InvalidDocument {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let mut tree = DocumentTree::new();
        let root = spec.build(&mut tree)?;
        debug!("load: {} nodes from {}", tree.len(), path.display());
        Ok(LoadedDocument { tree, root })
    }
}
