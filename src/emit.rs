//! Output sinks for a finished build.
//!
//! Packed mode writes one sprite to `<output>/assets/icons[-<hash>].svg`.
//! Per-file mode copies every icon to `<output>/assets/icons/<style>/` and
//! writes `<output>/preload-script.js` when at least one icon was found.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use tracing::info;

use crate::config::EmitMode;
use crate::error::{Result, WaltzError};
use crate::icon::IconName;
use crate::preload::{self, PRELOAD_FILENAME};
use crate::sprite;
use crate::store::{IconStore, LoadOutcome, MissingIcon};

/// Directory under the output root that receives icon assets.
pub const ASSETS_DIR: &str = "assets";

/// Base name of the packed sprite.
pub const SPRITE_STEM: &str = "icons";

const HASH_DIGITS: usize = 10;

/// Cache-busting token, fixed for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildHash(String);

impl BuildHash {
    /// Hash from the current wall clock.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self::from_millis(millis)
    }

    /// Last ten digits of a millisecond timestamp.
    pub fn from_millis(millis: u128) -> Self {
        let digits = millis.to_string();
        let start = digits.len().saturating_sub(HASH_DIGITS);
        Self(digits[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Filename of the packed sprite, with or without a hash suffix.
pub fn sprite_filename(hash: Option<&BuildHash>) -> String {
    match hash {
        Some(hash) => format!("{}-{}.svg", SPRITE_STEM, hash.as_str()),
        None => format!("{}.svg", SPRITE_STEM),
    }
}

/// What an emission wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub mode: EmitMode,
    /// The sprite document (packed mode).
    pub sprite: Option<PathBuf>,
    /// Copied icon files (per-file mode), in accumulation order.
    pub files: Vec<PathBuf>,
    /// The preload script (per-file mode, non-empty builds only).
    pub preload: Option<PathBuf>,
    /// Number of icons written.
    pub icons: usize,
    /// Icons that could not be written.
    pub missing: Vec<MissingIcon>,
}

/// Write the collected icons in the given mode.
pub fn emit(
    mode: EmitMode,
    output: &Path,
    names: &[IconName],
    store: &IconStore,
    hash: Option<&BuildHash>,
) -> Result<Emitted> {
    match mode {
        EmitMode::Packed => emit_packed(output, names, store, hash),
        EmitMode::Unpacked => emit_unpacked(output, names, store),
    }
}

fn emit_packed(
    output: &Path,
    names: &[IconName],
    store: &IconStore,
    hash: Option<&BuildHash>,
) -> Result<Emitted> {
    let sprite = sprite::assemble(names, store);
    let path = write_sprite(output, &sprite.document(), hash)?;

    info!(path = %path.display(), icons = sprite.len(), "wrote sprite");

    Ok(Emitted {
        mode: EmitMode::Packed,
        sprite: Some(path),
        files: Vec::new(),
        preload: None,
        icons: sprite.len(),
        missing: sprite.missing().to_vec(),
    })
}

fn emit_unpacked(output: &Path, names: &[IconName], store: &IconStore) -> Result<Emitted> {
    let (files, missing) = copy_icons(output, names, store)?;
    let preload = write_preload(output, names)?;

    info!(output = %output.display(), icons = files.len(), "copied icons");

    Ok(Emitted {
        mode: EmitMode::Unpacked,
        sprite: None,
        icons: files.len(),
        files,
        preload,
        missing,
    })
}

/// Write a sprite document under `<output>/assets/`.
pub fn write_sprite(output: &Path, document: &str, hash: Option<&BuildHash>) -> Result<PathBuf> {
    let dir = output.join(ASSETS_DIR);
    create_dir(&dir)?;

    let path = dir.join(sprite_filename(hash));
    fs::write(&path, document).map_err(|e| WaltzError::io(&path, "Failed to write sprite", e))?;
    Ok(path)
}

type CopyOutcome = std::result::Result<PathBuf, MissingIcon>;

/// Copy every icon into `<output>/assets/icons/<style>/<filename>.svg`.
///
/// Copies run in parallel; the returned lists keep the order of `names`.
pub fn copy_icons(
    output: &Path,
    names: &[IconName],
    store: &IconStore,
) -> Result<(Vec<PathBuf>, Vec<MissingIcon>)> {
    let target_root = output.join(ASSETS_DIR).join(SPRITE_STEM);

    let results: Vec<Result<CopyOutcome>> = names
        .par_iter()
        .filter(|name| !name.is_empty())
        .map(|name| -> Result<CopyOutcome> {
            let content = match store.load(name) {
                LoadOutcome::Loaded { content, .. } => content,
                LoadOutcome::Missing(missing) => return Ok(Err(missing)),
            };

            let target = target_root.join(name.resolve().relative_path());
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }
            fs::write(&target, content)
                .map_err(|e| WaltzError::io(&target, "Failed to copy icon", e))?;
            Ok(Ok(target))
        })
        .collect();

    let mut copied = Vec::new();
    let mut missing = Vec::new();
    for result in results {
        match result? {
            Ok(path) => copied.push(path),
            Err(m) => missing.push(m),
        }
    }
    Ok((copied, missing))
}

/// Write the preload script, unless there is nothing to preload.
pub fn write_preload(output: &Path, names: &[IconName]) -> Result<Option<PathBuf>> {
    let Some(script) = preload::generate(names) else {
        return Ok(None);
    };

    create_dir(output)?;
    let path = output.join(PRELOAD_FILENAME);
    fs::write(&path, script)
        .map_err(|e| WaltzError::io(&path, "Failed to write preload script", e))?;
    Ok(Some(path))
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| WaltzError::io(dir, "Failed to create directory", e))
}
