/*!
 * Core types and data structures for treeforge
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// One directory visited by the enumerator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Path of the directory, joined onto the enumeration root
    pub path: PathBuf,
    /// Names of the non-directory entries it directly contains
    pub files: Vec<String>,
}

/// Children of a folder, keyed by entry name
pub type TreeDescription = BTreeMap<String, DescriptionNode>;

/// A node of a tree description
///
/// Serializes to the wire shape directly: a folder becomes
/// `{"files": {...}}` and a file becomes its content string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DescriptionNode {
    /// Directory holding nested entries
    Folder {
        #[serde(rename = "files")]
        children: TreeDescription,
    },
    /// Terminal file holding its literal text content
    File(String),
}

impl DescriptionNode {
    /// Build a folder node from its children
    pub fn folder(children: TreeDescription) -> Self {
        Self::Folder { children }
    }

    /// Build a file node from its content
    pub fn file(content: impl Into<String>) -> Self {
        Self::File(content.into())
    }
}

/// Top-level document wrapping the root description under `"files"`
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionDocument<'a> {
    pub files: &'a TreeDescription,
}

/// Count the file nodes in a description
pub fn count_files(description: &TreeDescription) -> u64 {
    description
        .values()
        .map(|node| match node {
            DescriptionNode::Folder { children } => count_files(children),
            DescriptionNode::File(_) => 1,
        })
        .sum()
}

/// Count the folder nodes in a description
pub fn count_folders(description: &TreeDescription) -> usize {
    description
        .values()
        .map(|node| match node {
            DescriptionNode::Folder { children } => 1 + count_folders(children),
            DescriptionNode::File(_) => 0,
        })
        .sum()
}
