//! File system scanner for source files that may reference icons.
//!
//! Recursively walks source directories and keeps script, markup and
//! component files. Dependencies under `node_modules` are skipped unless
//! they belong to a configured library.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;

/// Extensions of files that are scanned for icon references.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "json", "vue", "svelte", "htm", "html",
];

const DEPENDENCY_DIR: &str = "node_modules";

/// Scan a directory for source files, in sorted path order.
pub fn scan_directory(root: &Path, config: &Config) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .map(|e| e.into_path())
        .filter(|path| !config.is_excluded(path))
        .filter(|path| is_source_file(path))
        .filter(|path| is_allowed_dependency(path, &config.libraries))
        .collect();

    files.sort();
    files
}

/// Scan multiple source paths relative to `base_path`.
///
/// A file reachable from two sources is returned once.
pub fn scan_sources(sources: &[String], base_path: &Path, config: &Config) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        for file in scan_directory(&source_path, config) {
            if !result.contains(&file) {
                result.push(file);
            }
        }
    }

    result
}

/// Check whether a path has one of the scanned source extensions.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Paths outside `node_modules` are always allowed. Paths inside it are
/// allowed when a configured library appears as a `/<library>/` fragment.
pub fn is_allowed_dependency(path: &Path, libraries: &[String]) -> bool {
    let normalized = path.to_string_lossy().replace('\\', "/");

    if !normalized.contains(DEPENDENCY_DIR) {
        return true;
    }

    libraries
        .iter()
        .any(|library| normalized.contains(&format!("/{}/", library)))
}
