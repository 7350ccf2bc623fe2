//! Sprite assembly.
//!
//! Each icon asset is expected to be a minimal single-symbol document:
//!
//! ```text
//! <svg xmlns="http://www.w3.org/2000/svg"><symbol id="root">...</symbol></svg>
//! ```
//!
//! The wrapper is stripped and the inner markup re-wrapped in a
//! `<symbol id="style:filename">`, so a page can reference any icon with
//! `<use href="icons.svg#solid:star">`.

use rayon::prelude::*;
use tracing::warn;

use crate::icon::IconName;
use crate::store::{IconStore, LoadOutcome, MissingIcon};

/// Opening wrapper of a single-icon asset.
pub const ICON_PREAMBLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><symbol id="root">"#;

/// Closing wrapper of a single-icon asset.
pub const ICON_SUFFIX: &str = "</symbol></svg>";

const SPRITE_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">";

const SPRITE_FOOTER: &str = "</svg>";

const SYMBOL_OPEN: &str = "<symbol id=\"";
const SYMBOL_CLOSE: &str = "</symbol>";

/// One icon inside a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: String,
    pub fragment: String,
}

/// A combined sprite and the icons that could not be included.
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    symbols: Vec<Symbol>,
    missing: Vec<MissingIcon>,
}

impl Sprite {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.id.as_str())
    }

    pub fn missing(&self) -> &[MissingIcon] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Render the full sprite document.
    pub fn document(&self) -> String {
        let body_len: usize = self.symbols.iter().map(|s| s.fragment.len()).sum();
        let mut doc = String::with_capacity(SPRITE_HEADER.len() + body_len + SPRITE_FOOTER.len());

        doc.push_str(SPRITE_HEADER);
        for symbol in &self.symbols {
            doc.push_str(&symbol.fragment);
        }
        doc.push_str(SPRITE_FOOTER);
        doc
    }
}

/// Combine icons into one sprite, in the given order.
///
/// Empty names are skipped. An icon whose asset cannot be read is logged
/// and left out; it is listed in [`Sprite::missing`].
pub fn assemble(names: &[IconName], store: &IconStore) -> Sprite {
    let loaded: Vec<(&IconName, LoadOutcome)> = names
        .par_iter()
        .filter(|name| !name.is_empty())
        .map(|name| (name, store.load(name)))
        .collect();

    let mut sprite = Sprite::default();
    for (name, outcome) in loaded {
        match outcome {
            LoadOutcome::Loaded { content, .. } => {
                let id = name.resolve().symbol_id();
                let inner = strip_wrapper(&String::from_utf8_lossy(&content));
                let fragment = wrap_symbol(&id, &inner);
                sprite.symbols.push(Symbol { id, fragment });
            }
            LoadOutcome::Missing(missing) => {
                warn!(icon = %missing.name, path = %missing.path.display(), "icon not found");
                sprite.missing.push(missing);
            }
        }
    }
    sprite
}

/// Remove the single-icon wrapper from an asset, leaving the inner markup.
/// Content without the wrapper is returned unchanged.
pub fn strip_wrapper(content: &str) -> String {
    content.replacen(ICON_PREAMBLE, "", 1).replacen(ICON_SUFFIX, "", 1)
}

/// Wrap inner markup in a sprite symbol.
pub fn wrap_symbol(id: &str, inner: &str) -> String {
    format!("{SYMBOL_OPEN}{id}\">{inner}{SYMBOL_CLOSE}")
}

/// Split a symbol fragment back into its id and inner markup.
pub fn unwrap_symbol(fragment: &str) -> Option<(&str, &str)> {
    let rest = fragment.strip_prefix(SYMBOL_OPEN)?;
    let (id, rest) = rest.split_once("\">")?;
    let inner = rest.strip_suffix(SYMBOL_CLOSE)?;
    Some((id, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn icon_file(inner: &str) -> String {
        format!("{ICON_PREAMBLE}{inner}{ICON_SUFFIX}")
    }

    fn store_with(icons: &[(&str, &str)]) -> (TempDir, IconStore) {
        let dir = tempdir().unwrap();
        for (name, inner) in icons {
            let path = dir.path().join(IconName::from(*name).resolve().relative_path());
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, icon_file(inner)).unwrap();
        }
        let store = IconStore::new(dir.path());
        (dir, store)
    }

    fn names(list: &[&str]) -> Vec<IconName> {
        list.iter().map(|n| IconName::from(*n)).collect()
    }

    #[test]
    fn test_ids_are_style_prefixed_in_order() {
        let (_dir, store) = store_with(&[
            ("home", r#"<path d="M0 0"/>"#),
            ("solid:star", r#"<path d="M1 1"/>"#),
        ]);

        let sprite = assemble(&names(&["home", "solid:star"]), &store);

        assert_eq!(sprite.ids().collect::<Vec<_>>(), vec!["line:home", "solid:star"]);
        assert!(sprite.missing().is_empty());
    }

    #[test]
    fn test_document_snapshot() {
        let (_dir, store) = store_with(&[
            ("home", r#"<path d="M0 0"/>"#),
            ("solid:star", r#"<path d="M1 1"/>"#),
        ]);

        let sprite = assemble(&names(&["home", "solid:star"]), &store);

        assert_snapshot!(sprite.document(), @r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <svg version="1.1" xmlns="http://www.w3.org/2000/svg"><symbol id="line:home"><path d="M0 0"/></symbol><symbol id="solid:star"><path d="M1 1"/></symbol></svg>
        "#);
    }

    #[test]
    fn test_missing_icon_is_skipped() {
        let (_dir, store) = store_with(&[("home", "<g/>"), ("gear", "<circle/>")]);

        let sprite = assemble(&names(&["home", "ghost", "gear"]), &store);

        assert_eq!(sprite.ids().collect::<Vec<_>>(), vec!["line:home", "line:gear"]);
        assert_eq!(sprite.missing().len(), 1);
        assert_eq!(sprite.missing()[0].name.as_str(), "ghost");
        assert!(sprite.document().ends_with("<symbol id=\"line:gear\"><circle/></symbol></svg>"));
    }

    #[test]
    fn test_empty_names_skipped() {
        let (_dir, store) = store_with(&[("home", "<g/>")]);

        let sprite = assemble(&names(&["", "home", ""]), &store);

        assert_eq!(sprite.len(), 1);
        assert!(sprite.missing().is_empty());
    }

    #[test]
    fn test_empty_sprite_is_valid_document() {
        let (_dir, store) = store_with(&[]);
        let sprite = assemble(&[], &store);

        assert!(sprite.is_empty());
        assert_eq!(
            sprite.document(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\"></svg>"
        );
    }

    #[test]
    fn test_unwrapped_asset_kept_verbatim() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("line")).unwrap();
        fs::write(dir.path().join("line/raw.svg"), "<svg><rect/></svg>").unwrap();

        let sprite = assemble(&names(&["raw"]), &IconStore::new(dir.path()));

        assert_eq!(sprite.symbols()[0].fragment, "<symbol id=\"line:raw\"><svg><rect/></svg></symbol>");
    }

    #[test]
    fn test_symbol_round_trip() {
        let inner = r#"<path d="M4 4h16v16H4z" stroke="currentColor"/><circle r="2"/>"#;
        let (dir, store) = store_with(&[("solid:box", inner)]);

        let sprite = assemble(&names(&["solid:box"]), &store);
        let (id, unwrapped) = unwrap_symbol(&sprite.symbols()[0].fragment).unwrap();

        let original = fs::read_to_string(dir.path().join("solid/box.svg")).unwrap();
        assert_eq!(id, "solid:box");
        assert_eq!(unwrapped, strip_wrapper(&original));
        assert_eq!(unwrapped, inner);
    }

    #[test]
    fn test_unwrap_rejects_non_symbol() {
        assert_eq!(unwrap_symbol("<g/>"), None);
        assert_eq!(unwrap_symbol("<symbol id=\"x\"><g/>"), None);
    }
}
