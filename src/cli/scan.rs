//! Scan command implementation.
//!
//! Lists the icon references found in files without loading any assets.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::accumulator::Accumulator;
use crate::config::DEFAULT_TAG;
use crate::error::{Result, WaltzError};
use crate::icon::IconName;
use crate::output::{display_path, plural, Printer};
use crate::patterns::PatternSet;

/// List the icon references found in files
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Element name searched for icon attributes
    #[arg(long, default_value = DEFAULT_TAG)]
    pub tag: String,

    /// Print JSON to stdout instead of status lines
    #[arg(long)]
    pub json: bool,
}

/// Icons first seen in one file.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileIcons {
    pub file: PathBuf,
    pub icons: Vec<IconName>,
}

pub fn run(args: ScanArgs, printer: &Printer) -> Result<()> {
    let results = scan_files(&args.files, &args.tag)?;

    if args.json {
        let json = serde_json::to_string_pretty(&results).map_err(|e| WaltzError::Build {
            message: format!("Failed to serialize scan results: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    let mut total = 0;
    for result in &results {
        total += result.icons.len();
        let names: Vec<&str> = result.icons.iter().map(IconName::as_str).collect();
        if names.is_empty() {
            printer.info("Scanned", &printer.dim(&display_path(&result.file)));
        } else {
            printer.info("Scanned", &format!("{} {}", display_path(&result.file), names.join(", ")));
        }
    }
    printer.status("Found", &plural(total, "icon", "icons"));

    Ok(())
}

/// Scan files in order; each icon is attributed to the first file it
/// appears in.
pub fn scan_files(files: &[PathBuf], tag: &str) -> Result<Vec<FileIcons>> {
    let patterns = PatternSet::for_tag(tag)?;
    let accumulator = Accumulator::new();

    files
        .iter()
        .map(|file| {
            let source = fs::read_to_string(file)
                .map_err(|e| WaltzError::io(file, "Failed to read source", e))?;
            let icons = accumulator.admit([], patterns.find_all(&source));
            Ok(FileIcons {
                file: file.clone(),
                icons,
            })
        })
        .collect()
}
