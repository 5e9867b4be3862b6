/*!
 * Lazy top-down enumeration of a directory tree
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{require_directory, FsResultExt, Result};
use crate::types::DirectoryListing;

/// Directory name skipped when no exclusion is configured
pub const DEFAULT_EXCLUSION: &str = "node_modules";

/// Pre-order walk yielding one [`DirectoryListing`] per directory
///
/// Directories whose base name equals the exclusion name are pruned before
/// they are visited, at any depth. Unreadable subdirectories are logged and
/// skipped.
#[derive(Debug)]
pub struct TreeEnumerator {
    exclusion: String,
    /// Directories still to visit; the next one is at the end
    pending: Vec<PathBuf>,
}

impl TreeEnumerator {
    /// Start a walk at `root`
    pub fn new(root: impl Into<PathBuf>, exclusion: impl Into<String>) -> Result<Self> {
        let root = root.into();
        require_directory(&root)?;
        fs::read_dir(&root).fs_context(&root)?;

        Ok(Self {
            exclusion: exclusion.into(),
            pending: vec![root],
        })
    }

    /// Read one directory, returning its listing and the subdirectories to descend into
    fn read_listing(&self, dir: &Path) -> io::Result<(DirectoryListing, Vec<PathBuf>)> {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);

            if !is_dir {
                files.push(name);
            } else if name == self.exclusion {
                debug!("Excluding {}", entry.path().display());
            } else {
                subdirs.push(entry.path());
            }
        }

        files.sort();
        subdirs.sort();

        Ok((
            DirectoryListing {
                path: dir.to_path_buf(),
                files,
            },
            subdirs,
        ))
    }
}

impl Iterator for TreeEnumerator {
    type Item = DirectoryListing;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(dir) = self.pending.pop() {
            match self.read_listing(&dir) {
                Ok((listing, subdirs)) => {
                    // Reversed so the first child is popped next
                    self.pending.extend(subdirs.into_iter().rev());
                    return Some(listing);
                }
                Err(e) => warn!("Skipping directory {}: {}", dir.display(), e),
            }
        }

        None
    }
}
