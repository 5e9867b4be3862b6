/*!
 * Text writers for directory listings and trees
 */

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs::{self, DirEntry};
use std::io::{self, Write};
use std::path::Path;

use log::warn;

use crate::types::DirectoryListing;

/// Writes enumerator output in the `Carpeta:` / `Archivo:` format
///
/// Each directory is written as its path line, one indented line per file
/// and a blank separator line.
pub struct ListingWriter<W: Write> {
    out: W,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write a single directory listing
    pub fn write_listing(&mut self, listing: &DirectoryListing) -> io::Result<()> {
        writeln!(self.out, "Carpeta: {}", listing.path.display())?;
        for file in &listing.files {
            writeln!(self.out, "  Archivo: {}", file)?;
        }
        writeln!(self.out)
    }

    /// Write every listing of a walk, returning how many directories were written
    pub fn write_all<I>(&mut self, listings: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = DirectoryListing>,
    {
        let mut count = 0;
        for listing in listings {
            self.write_listing(&listing)?;
            count += 1;
        }
        self.out.flush()?;
        Ok(count)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Renders a directory as a `tree`-style box-drawing listing
///
/// Directories come before files, then entries are ordered by name.
/// Entries named like the exclusion name are left out entirely.
pub struct TreeWriter {
    exclusion: String,
    max_depth: usize,
}

impl TreeWriter {
    /// `max_depth` of 0 lists only the root's children
    pub fn new(exclusion: impl Into<String>, max_depth: usize) -> Self {
        Self {
            exclusion: exclusion.into(),
            max_depth,
        }
    }

    /// Render the tree below `root` into lines
    pub fn render(&self, root: &Path) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        let entries = self.sorted_entries(root)?;
        self.render_entries(entries, "", self.max_depth, &mut lines);
        Ok(lines)
    }

    /// Render the tree below `root` into `out`, one line per entry
    pub fn write<W: Write>(&self, root: &Path, out: &mut W) -> io::Result<()> {
        let lines = self.render(root)?;
        writeln!(out, "{}", lines.join("\n"))?;
        out.flush()
    }

    fn render_entries(
        &self,
        entries: Vec<DirEntry>,
        prefix: &str,
        depth: usize,
        lines: &mut Vec<String>,
    ) {
        let last_index = entries.len().saturating_sub(1);

        for (index, entry) in entries.into_iter().enumerate() {
            let is_last = index == last_index;
            let connector = if is_last { "└── " } else { "├── " };
            lines.push(format!(
                "{}{}{}",
                prefix,
                connector,
                entry.file_name().to_string_lossy()
            ));

            if depth == 0 || !is_dir(&entry) {
                continue;
            }

            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            match self.sorted_entries(&entry.path()) {
                Ok(children) => self.render_entries(children, &child_prefix, depth - 1, lines),
                Err(e) => warn!("Skipping directory {}: {}", entry.path().display(), e),
            }
        }
    }

    fn sorted_entries(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries: Vec<DirEntry> = fs::read_dir(dir)?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_name().to_string_lossy() != self.exclusion.as_str())
            .collect();

        entries.sort_by(|a, b| match (is_dir(a), is_dir(b)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => compare_names(&a.file_name(), &b.file_name()),
        });

        Ok(entries)
    }
}

/// Case-insensitive order, falling back to byte order for names that differ only in case
fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    let (a, b) = (a.to_string_lossy(), b.to_string_lossy());
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false)
}
