/*!
 * Utility functions and shared defaults for treeforge
 */

use once_cell::sync::Lazy;

/// Format a human-readable byte count
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Directories never descended into while capturing a project
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["node_modules", ".git", "build", "dist"]);

/// File name patterns kept while capturing a project (code and configuration)
pub static DEFAULT_INCLUDE_PATTERNS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "*.js", "*.jsx", "*.ts", "*.tsx", "*.json", "*.css", "*.scss", "*.html",
    ]
});

/// Owned copies of a static default list
pub fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
