/*!
 * Realizing a tree description on disk
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info};
use tempfile::Builder;

use crate::error::{FsResultExt, Result};
use crate::types::{DescriptionNode, TreeDescription};

/// Materializer statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeStatistics {
    /// Directories that did not exist before
    pub directories_created: usize,
    /// Directories that already existed and were reused
    pub directories_reused: usize,
    /// Files written or overwritten
    pub files_written: usize,
    /// Total content bytes written
    pub bytes_written: u64,
}

/// Creates folders and files described by a [`TreeDescription`]
///
/// Not transactional: on failure, whatever was created before the failing
/// entry stays on disk.
pub struct Materializer {
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Materializer {
    /// Create a new materializer
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Ensure every entry of `description` exists under `base`
    pub fn materialize(
        &self,
        base: &Path,
        description: &TreeDescription,
    ) -> Result<MaterializeStatistics> {
        let mut stats = MaterializeStatistics::default();

        if base.is_dir() {
            stats.directories_reused += 1;
        } else {
            fs::create_dir_all(base).fs_context(base)?;
            stats.directories_created += 1;
        }

        self.materialize_entries(base, description, &mut stats)?;
        info!(
            "Materialized {} files under {}",
            stats.files_written,
            base.display()
        );

        Ok(stats)
    }

    fn materialize_entries(
        &self,
        base: &Path,
        entries: &TreeDescription,
        stats: &mut MaterializeStatistics,
    ) -> Result<()> {
        for (name, node) in entries {
            let path = base.join(name);

            match node {
                DescriptionNode::Folder { children } => {
                    self.create_folder(&path, stats)?;
                    self.materialize_entries(&path, children, stats)?;
                }
                DescriptionNode::File(content) => {
                    self.write_file(&path, content)?;
                    stats.files_written += 1;
                    stats.bytes_written += content.len() as u64;
                }
            }
        }

        Ok(())
    }

    /// Create a directory, reusing it if it is already there
    fn create_folder(&self, path: &Path, stats: &mut MaterializeStatistics) -> Result<()> {
        match fs::create_dir(path) {
            Ok(()) => {
                debug!("Created directory {}", path.display());
                stats.directories_created += 1;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
                stats.directories_reused += 1;
                Ok(())
            }
            // A regular file in the way lands here too
            Err(e) => Err(e).fs_context(path),
        }
    }

    /// Replace the content of `path` atomically
    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        self.progress.inc(1);
        self.progress.set_message(format!("Writing {}", path.display()));

        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a directory exists where a file is described",
            ))
            .fs_context(path);
        }

        // An overwritten file keeps its mode
        let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let mut staged = staging_builder().tempfile_in(parent).fs_context(path)?;
        staged.write_all(content.as_bytes()).fs_context(path)?;
        staged.flush().fs_context(path)?;
        if let Some(permissions) = existing {
            staged.as_file().set_permissions(permissions).fs_context(path)?;
        }
        staged.persist(path).map_err(|e| e.error).fs_context(path)?;

        debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Temp files are created like a plain `open(path, "w")`: 0o666 minus the umask
fn staging_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

/// Materialize without progress reporting
pub fn materialize(base: &Path, description: &TreeDescription) -> Result<MaterializeStatistics> {
    Materializer::new(Arc::new(ProgressBar::hidden())).materialize(base, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{parse_description, DEFAULT_MAX_NESTING};
    use crate::error::TreeForgeError;
    use tempfile::tempdir;

    fn sample() -> TreeDescription {
        parse_description(
            r#"{"files": {"src": {"files": {"main.txt": "hello"}}, "readme.txt": "info"}}"#,
            DEFAULT_MAX_NESTING,
        )
        .unwrap()
    }

    #[test]
    fn test_materialize_sample() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");

        let stats = materialize(&out, &sample()).unwrap();

        assert!(out.join("src").is_dir());
        assert_eq!(fs::read_to_string(out.join("src").join("main.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(out.join("readme.txt")).unwrap(), "info");
        assert_eq!(
            stats,
            MaterializeStatistics {
                directories_created: 2,
                directories_reused: 0,
                files_written: 2,
                bytes_written: 9,
            }
        );
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");

        materialize(&out, &sample()).unwrap();
        let stats = materialize(&out, &sample()).unwrap();

        assert_eq!(stats.directories_created, 0);
        assert_eq!(stats.directories_reused, 2);
        assert_eq!(fs::read_to_string(out.join("src").join("main.txt")).unwrap(), "hello");

        let entries: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 2, "no temporary files should be left behind");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "a much longer previous content").unwrap();

        materialize(dir.path(), &sample()).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("readme.txt")).unwrap(), "info");
    }

    #[test]
    fn test_content_is_byte_exact() {
        let dir = tempdir().unwrap();
        let content = "line one\r\nline two\n\tünïcödé ✓\n";
        let mut description = TreeDescription::new();
        description.insert("data.txt".to_string(), DescriptionNode::file(content));

        materialize(dir.path(), &description).unwrap();
        assert_eq!(fs::read(dir.path().join("data.txt")).unwrap(), content.as_bytes());
    }

    #[test]
    fn test_folder_over_existing_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("src"), "i am a file").unwrap();

        let err = materialize(dir.path(), &sample()).unwrap_err();
        match err {
            TreeForgeError::Filesystem { path, .. } => assert_eq!(path, dir.path().join("src")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_to_string(dir.path().join("src")).unwrap(), "i am a file");
    }

    #[test]
    fn test_file_over_existing_directory_fails() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("readme.txt")).unwrap();

        let err = materialize(dir.path(), &sample()).unwrap_err();
        assert!(matches!(err, TreeForgeError::Filesystem { .. }));
        assert!(dir.path().join("readme.txt").is_dir());
    }

    #[test]
    fn test_base_is_a_file_fails() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("base");
        fs::write(&base, "x").unwrap();

        let err = materialize(&base, &sample()).unwrap_err();
        assert!(matches!(err, TreeForgeError::Filesystem { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_files_get_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        // Same umask applies to a plain write
        let reference = dir.path().join("reference.txt");
        fs::write(&reference, "x").unwrap();
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let out = dir.path().join("out");
        materialize(&out, &sample()).unwrap();

        let mode = fs::metadata(out.join("readme.txt")).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
        assert_ne!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let script = dir.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\necho old\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut description = TreeDescription::new();
        description.insert("run.sh".to_string(), DescriptionNode::file("#!/bin/sh\necho new\n"));
        materialize(dir.path(), &description).unwrap();

        let mode = fs::metadata(&script).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
        assert_eq!(fs::read_to_string(&script).unwrap(), "#!/bin/sh\necho new\n");
    }
}
