//! Icon names and the `style:filename` resolution rule.
//!
//! An icon name is the raw token authored in source text. It either names
//! a file in the default style (`home`) or carries an explicit style
//! prefix (`solid:home`). Names are compared verbatim: no trimming, no
//! case folding.

use std::borrow::Borrow;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Style used when a name has no `:` separator.
pub const DEFAULT_STYLE: &str = "line";

/// Extension of every asset in the icon store.
pub const ICON_EXTENSION: &str = "svg";

/// URL prefix individual icons are served from in per-file mode.
pub const PUBLIC_ICON_PATH: &str = "/assets/icons";

/// A raw icon reference as first encountered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconName(String);

impl IconName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split this name into its style and filename.
    pub fn resolve(&self) -> IconRef<'_> {
        resolve(&self.0)
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IconName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IconName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for IconName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A resolved `(style, filename)` pair borrowed from an icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRef<'a> {
    pub style: &'a str,
    pub filename: &'a str,
}

impl IconRef<'_> {
    /// Symbol identifier used inside a sprite. Always carries the style,
    /// including the default one.
    pub fn symbol_id(&self) -> String {
        format!("{}:{}", self.style, self.filename)
    }

    /// Path of the asset relative to a store root: `<style>/<filename>.svg`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.style).join(format!("{}.{}", self.filename, ICON_EXTENSION))
    }

    /// URL path the asset is served from in per-file mode.
    pub fn public_path(&self) -> String {
        format!(
            "{}/{}/{}.{}",
            PUBLIC_ICON_PATH, self.style, self.filename, ICON_EXTENSION
        )
    }
}

/// Resolve a raw name into `(style, filename)`.
///
/// Splits once on the first `:`. Without a separator the style is
/// [`DEFAULT_STYLE`]. Total: every string resolves.
pub fn resolve(name: &str) -> IconRef<'_> {
    match name.split_once(':') {
        Some((style, filename)) => IconRef { style, filename },
        None => IconRef {
            style: DEFAULT_STYLE,
            filename: name,
        },
    }
}
