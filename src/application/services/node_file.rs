//! Node file service
//!
//! Loads flat node lists from TOML files and assembles them into forests.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{build_tree, Forest, Node};
use crate::infrastructure::traits::FileSystem;

/// On-disk shape of a flat node list.
///
/// ```toml
/// [[nodes]]
/// id = 1
/// data = "Documents"
///
/// [[nodes]]
/// id = 2
/// parent_id = 1
/// data = "Work"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFile {
    #[serde(default)]
    pub nodes: Vec<Node<String>>,
}

impl NodeFile {
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::InvalidNodeFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Flat pre-order listing of `forest`.
    pub fn from_forest(forest: &Forest<String>) -> Self {
        Self {
            nodes: forest.flatten(),
        }
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize node list".to_string(),
            source: Box::new(e),
        })
    }
}

/// Service reading node files through the filesystem boundary.
pub struct NodeFileService {
    fs: Arc<dyn FileSystem>,
}

impl NodeFileService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a node file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<NodeFile> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("node file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read node file", path)?;
        let file = NodeFile::parse(&content, path)?;
        debug!("loaded {} nodes from {}", file.nodes.len(), path.display());
        Ok(file)
    }

    /// Read a node file and build its forest.
    pub fn load_forest(&self, path: &Path) -> ApplicationResult<Forest<String>> {
        let file = self.load(path)?;
        Ok(build_tree(file.nodes)?)
    }
}
