//! Project configuration (waltz.yaml).
//!
//! Holds the options that drive extraction (tag, ensure list, libraries)
//! and emission (pack / per-file, hash), plus where to find sources and
//! icon assets and where to write output.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaltzError};
use crate::icon::IconName;
use crate::store::DEFAULT_ICON_ROOT;

/// The name of the configuration file.
pub const CONFIG_FILENAME: &str = "waltz.yaml";

/// Default element name searched for by the tag-restricted matcher.
pub const DEFAULT_TAG: &str = "icon";

/// How collected icons are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// One combined sprite document.
    Packed,
    /// One copied file per icon plus a preload script.
    Unpacked,
}

impl fmt::Display for EmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitMode::Packed => write!(f, "packed"),
            EmitMode::Unpacked => write!(f, "per-file"),
        }
    }
}

/// Project configuration loaded from waltz.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Element name for the tag-restricted attribute matcher.
    pub tag: String,

    /// Icons always collected, applied on the first scan of a build.
    pub ensure_list: Vec<IconName>,

    /// Third-party package names under `node_modules` that are scanned too.
    pub libraries: Vec<String>,

    /// Pack all icons into one sprite. Unset means packed.
    pub pack: Option<bool>,

    /// Copy each icon as its own file. Conflicts with `pack: true`.
    pub per_file: Option<bool>,

    /// Append a build hash to the sprite filename.
    pub hash: bool,

    /// Source directories to scan. Defaults to the project root.
    pub sources: Vec<String>,

    /// Root of the icon asset store.
    pub icons: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            ensure_list: vec![],
            libraries: vec![],
            pack: None,
            per_file: None,
            hash: false,
            sources: vec![],
            icons: PathBuf::from(DEFAULT_ICON_ROOT),
            output: PathBuf::from("dist"),
            excludes: vec![],
        }
    }
}

impl Config {
    /// Load configuration from a waltz.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WaltzError::io(path, "Failed to read configuration", e))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| WaltzError::Config {
            message: format!("Invalid configuration: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Resolve the emission mode, rejecting contradictory directives.
    pub fn emit_mode(&self) -> Result<EmitMode> {
        match (self.pack, self.per_file) {
            (Some(true), Some(true)) => Err(WaltzError::Config {
                message: "both `pack: true` and `per_file: true` are set".to_string(),
                help: Some("Choose either a packed sprite or per-file icons".to_string()),
            }),
            (_, Some(true)) | (Some(false), _) => Ok(EmitMode::Unpacked),
            _ => Ok(EmitMode::Packed),
        }
    }

    /// Get effective source paths, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Resolve relative paths in this configuration against `root`.
    pub fn rooted(mut self, root: &Path) -> Self {
        if self.icons.is_relative() {
            self.icons = root.join(&self.icons);
        }
        if self.output.is_relative() {
            self.output = root.join(&self.output);
        }
        self
    }
}

/// Simple glob matching: `*.ext`, `dir/*`, `**/dir/*`, otherwise substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix)) || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
