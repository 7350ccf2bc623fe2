//! Project discovery: configuration lookup and source file listing.
//!
//! # Example
//!
//! ```ignore
//! use waltz_icons::discovery::discover;
//!
//! let project = discover("./my-app")?;
//! println!("Found {} source files", project.files.len());
//! ```

mod scanner;

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::Result;

pub use scanner::{
    is_allowed_dependency, is_source_file, scan_directory, scan_sources, SOURCE_EXTENSIONS,
};

/// Result of discovering a project.
#[derive(Debug)]
pub struct Discovery {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded configuration, with paths resolved against `root`.
    pub config: Config,

    /// Whether a waltz.yaml was found.
    pub has_config: bool,

    /// Source files to scan, in scan order.
    pub files: Vec<PathBuf>,
}

/// Load the project configuration in `root`, falling back to defaults.
pub fn load_config(root: &Path) -> Result<(Config, bool)> {
    let config_path = root.join(CONFIG_FILENAME);
    if config_path.exists() {
        Ok((Config::load(&config_path)?, true))
    } else {
        Ok((Config::default(), false))
    }
}

/// Discover a project: load its configuration and list its source files.
pub fn discover(root: impl AsRef<Path>) -> Result<Discovery> {
    let root = root.as_ref().to_path_buf();
    let (config, has_config) = load_config(&root)?;
    Ok(discover_with(root, config, has_config))
}

/// Discover source files for an already loaded configuration.
///
/// The root is canonicalized when it exists, so every listed file and
/// configured directory is absolute. Files inside the output directory are
/// never sources.
pub fn discover_with(root: PathBuf, config: Config, has_config: bool) -> Discovery {
    let root = root.canonicalize().unwrap_or(root);
    let mut files = scan_sources(&config.effective_sources(), &root, &config);
    let config = config.rooted(&root);
    files.retain(|file| !file.starts_with(&config.output));

    Discovery {
        root,
        config,
        has_config,
        files,
    }
}
