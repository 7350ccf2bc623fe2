//! Icon asset store.
//!
//! Assets live on disk at `<root>/<style>/<filename>.svg`. A failed read
//! of any kind is reported as a single [`MissingIcon`]; callers decide
//! whether that is a warning or a failure.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::icon::{IconName, IconRef};

/// Default asset root, relative to the project.
pub const DEFAULT_ICON_ROOT: &str = "icons";

/// Read-only store of SVG icon assets.
#[derive(Debug, Clone)]
pub struct IconStore {
    root: PathBuf,
}

impl IconStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of an icon's asset in the store.
    pub fn path_for(&self, icon: IconRef<'_>) -> PathBuf {
        self.root.join(icon.relative_path())
    }

    /// Read the raw asset behind an icon name.
    pub fn load(&self, name: &IconName) -> LoadOutcome {
        let path = self.path_for(name.resolve());

        match fs::read(&path) {
            Ok(content) => LoadOutcome::Loaded { path, content },
            Err(e) => LoadOutcome::Missing(MissingIcon {
                name: name.clone(),
                path,
                reason: e.to_string(),
            }),
        }
    }
}

/// Result of loading one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { path: PathBuf, content: Vec<u8> },
    Missing(MissingIcon),
}

/// An icon whose asset could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIcon {
    pub name: IconName,
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for MissingIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "icon {} not found ({}: {})",
            self.name,
            self.path.display(),
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_path_convention() {
        let store = IconStore::new("/srv/icons");
        let name = IconName::from("solid:star");
        assert_eq!(
            store.path_for(name.resolve()),
            PathBuf::from("/srv/icons/solid/star.svg")
        );
    }

    #[test]
    fn test_load_existing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("line")).unwrap();
        fs::write(dir.path().join("line/home.svg"), "<svg/>").unwrap();

        let store = IconStore::new(dir.path());
        assert_eq!(
            store.load(&"home".into()),
            LoadOutcome::Loaded {
                path: dir.path().join("line/home.svg"),
                content: b"<svg/>".to_vec(),
            }
        );
    }

    #[test]
    fn test_load_missing() {
        let dir = tempdir().unwrap();
        let store = IconStore::new(dir.path());

        match store.load(&"solid:ghost".into()) {
            LoadOutcome::Missing(missing) => {
                assert_eq!(missing.name.as_str(), "solid:ghost");
                assert_eq!(missing.path, dir.path().join("solid/ghost.svg"));
                assert!(missing.to_string().starts_with("icon solid:ghost not found"));
            }
            other => panic!("expected missing, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_in_place_of_file_is_missing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("line/home.svg")).unwrap();

        let store = IconStore::new(dir.path());
        assert!(matches!(
            store.load(&"home".into()),
            LoadOutcome::Missing(_)
        ));
    }
}
