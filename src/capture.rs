/*!
 * Capturing an existing project into a tree description
 *
 * This is the inverse of materialization: directories become folder nodes
 * and matching files are read into file nodes.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob_match::glob_match;
use indicatif::ProgressBar;
use log::warn;
use walkdir::WalkDir;

use crate::error::{require_directory, FsResultExt, Result};
use crate::types::{DescriptionNode, TreeDescription};
use crate::utils::{to_owned_list, DEFAULT_IGNORE_DIRS, DEFAULT_INCLUDE_PATTERNS};

/// Capture options
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Directory names skipped at any depth
    pub ignore_dirs: Vec<String>,
    /// File name patterns to keep (if empty, keep all)
    pub include_patterns: Vec<String>,
    /// File never captured, usually the capture output itself
    pub skip_file: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: to_owned_list(&DEFAULT_IGNORE_DIRS),
            include_patterns: to_owned_list(&DEFAULT_INCLUDE_PATTERNS),
            skip_file: None,
        }
    }
}

/// Walks a directory and builds its [`TreeDescription`]
pub struct Capturer {
    options: CaptureOptions,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Capturer {
    /// Create a new capturer
    pub fn new(options: CaptureOptions, progress: Arc<ProgressBar>) -> Self {
        Self { options, progress }
    }

    /// Capture `root` into a description of its contents
    pub fn capture(&self, root: &Path) -> Result<TreeDescription> {
        require_directory(root)?;

        // Compared by canonical path so a relative --output still matches
        let skip_file = self
            .options
            .skip_file
            .as_ref()
            .and_then(|path| fs::canonicalize(path).ok());

        self.capture_directory(root, skip_file.as_deref())
            .fs_context(root)
    }

    /// Fails only when `dir` itself cannot be read
    fn capture_directory(
        &self,
        dir: &Path,
        skip_file: Option<&Path>,
    ) -> io::Result<TreeDescription> {
        // WalkDir reports an unreadable directory as an entry error, which
        // would turn it into an empty folder
        fs::read_dir(dir)?;

        let mut entries = TreeDescription::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();

            if entry.file_type().is_dir() {
                if self.should_ignore_dir(&name) {
                    continue;
                }
                match self.capture_directory(entry.path(), skip_file) {
                    Ok(children) => {
                        entries.insert(name, DescriptionNode::folder(children));
                    }
                    Err(e) => warn!("Skipping directory {}: {}", entry.path().display(), e),
                }
            } else if self.should_include(&name) {
                if skip_file.is_some()
                    && fs::canonicalize(entry.path()).ok().as_deref() == skip_file
                {
                    continue;
                }

                self.progress.inc(1);
                match fs::read_to_string(entry.path()) {
                    Ok(content) => {
                        entries.insert(name, DescriptionNode::File(content));
                    }
                    Err(e) => warn!("Error reading file {}: {}", entry.path().display(), e),
                }
            }
        }

        Ok(entries)
    }

    /// Check if a directory name is in the ignore list
    pub fn should_ignore_dir(&self, name: &str) -> bool {
        self.options.ignore_dirs.iter().any(|ignored| ignored == name)
    }

    /// Check if a file name matches the include patterns, ignoring case
    pub fn should_include(&self, name: &str) -> bool {
        if self.options.include_patterns.is_empty() {
            return true;
        }

        let name = name.to_lowercase();
        self.options
            .include_patterns
            .iter()
            .any(|pattern| glob_match(&pattern.to_lowercase(), &name))
    }
}

/// Capture with default options and no progress reporting
pub fn capture(root: &Path) -> Result<TreeDescription> {
    Capturer::new(CaptureOptions::default(), Arc::new(ProgressBar::hidden())).capture(root)
}
