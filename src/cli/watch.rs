//! Watch command implementation.
//!
//! Runs a full build, then keeps the same session alive: every changed
//! source file is rescanned and, when it introduces new icons, the output
//! is written again. Icons are never forgotten while watching.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::build::Build;
use crate::config::Config;
use crate::discovery::{is_allowed_dependency, is_source_file};
use crate::error::{Result, WaltzError};
use crate::output::{display_path, Printer};

use super::build::{finish, prepare, scan_all};
use super::ConfigOverrides;

/// Build, then rebuild whenever a source file changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let (discovery, build) = prepare(&args.path, &args.overrides, &[])?;

    scan_all(&discovery, &build, printer)?;
    finish(build.finish()?, false, printer)?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;

    for source in discovery.config.effective_sources() {
        let dir = discovery.root.join(source);
        if dir.exists() {
            watcher
                .watch(&dir, RecursiveMode::Recursive)
                .map_err(watch_error)?;
        }
    }

    printer.info("Watching", &display_path(&discovery.root));

    for event in rx {
        match event {
            Ok(event) => {
                if rescan(&event, &build, printer) {
                    finish(build.finish()?, false, printer)?;
                }
            }
            Err(e) => printer.warning("Watch", &e.to_string()),
        }
    }

    Ok(())
}

/// Rescan the files touched by one event. Returns `true` when new icons
/// were discovered.
fn rescan(event: &Event, build: &Build, printer: &Printer) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }

    let mut discovered = false;
    for path in event.paths.iter().filter(|p| is_watched(p, build.config())) {
        match build.scan_file(path) {
            Ok(outcome) => {
                for name in &outcome.discovered {
                    printer.info("Found", &format!("{} {}", name, printer.dim(&display_path(path))));
                }
                discovered |= !outcome.is_empty();
            }
            Err(e) => printer.warning("Skipped", &e.to_string()),
        }
    }
    discovered
}

/// Whether a changed path is a source file the build would scan.
fn is_watched(path: &Path, config: &Config) -> bool {
    path.is_file()
        && is_source_file(path)
        && is_allowed_dependency(path, &config.libraries)
        && !config.is_excluded(path)
        && !path.starts_with(&config.output)
}

fn watch_error(e: notify::Error) -> WaltzError {
    WaltzError::Build {
        message: format!("Failed to watch sources: {}", e),
        help: None,
    }
}
