//! Build command implementation.
//!
//! Scans a project's source files, then writes a sprite or per-file icons.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::build::{Build, BuildSummary};
use crate::config::EmitMode;
use crate::discovery::{discover_with, load_config, Discovery};
use crate::error::{Result, WaltzError};
use crate::hooks::ExtraSources;
use crate::output::{display_path, plural, Printer};

use super::ConfigOverrides;

/// Scan a project and emit its icons
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Extra file scanned before emission, whatever its extension (repeatable)
    #[arg(long = "extra", value_name = "FILE")]
    pub extra: Vec<PathBuf>,

    /// Fail the build when an icon is missing
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let (discovery, build) = prepare(&args.path, &args.overrides, &args.extra)?;

    scan_all(&discovery, &build, printer)?;
    let summary = build.finish()?;
    finish(summary, args.strict, printer)
}

/// Load configuration, apply overrides, list sources and start a build.
pub(crate) fn prepare(
    path: &Path,
    overrides: &ConfigOverrides,
    extra: &[PathBuf],
) -> Result<(Discovery, Build)> {
    let (config, has_config) = load_config(path)?;
    let config = overrides.apply(config);
    let discovery = discover_with(path.to_path_buf(), config, has_config);

    let mut build = Build::new(discovery.config.clone())?;
    if !extra.is_empty() {
        build = build.with_hook(ExtraSources::new(extra.to_vec()));
    }

    Ok((discovery, build))
}

/// Scan every discovered source file in order.
pub(crate) fn scan_all(discovery: &Discovery, build: &Build, printer: &Printer) -> Result<()> {
    printer.status(
        "Scanning",
        &format!(
            "{} ({})",
            display_path(&discovery.root),
            plural(discovery.files.len(), "file", "files")
        ),
    );

    for file in &discovery.files {
        let outcome = build.scan_file(file)?;
        for name in &outcome.discovered {
            printer.info("Found", &format!("{} {}", name, printer.dim(&display_path(file))));
        }
    }

    Ok(())
}

/// Print what was written and apply the missing-icon policy.
pub(crate) fn finish(summary: BuildSummary, strict: bool, printer: &Printer) -> Result<()> {
    let report = if strict {
        summary.report.into_strict()
    } else {
        summary.report
    };
    printer.report(&report);

    let emitted = &summary.emitted;
    match emitted.mode {
        EmitMode::Packed => {
            if let Some(sprite) = &emitted.sprite {
                printer.status(
                    "Packed",
                    &format!(
                        "{} into {}",
                        plural(emitted.icons, "icon", "icons"),
                        printer.cyan(&display_path(sprite))
                    ),
                );
            }
        }
        EmitMode::Unpacked => {
            printer.status("Copied", &plural(emitted.icons, "icon", "icons"));
            if let Some(preload) = &emitted.preload {
                printer.status("Wrote", &printer.cyan(&display_path(preload)));
            }
        }
    }

    if report.has_errors() {
        return Err(WaltzError::Build {
            message: format!(
                "{} missing",
                plural(report.error_count(), "icon is", "icons are")
            ),
            help: Some("Add the assets to the icon store or run without --strict".to_string()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::{ICON_PREAMBLE, ICON_SUFFIX};
    use std::fs;
    use tempfile::tempdir;

    fn write_icon(root: &Path, style: &str, name: &str) {
        let dir = root.join("icons").join(style);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}.svg", name)),
            format!("{ICON_PREAMBLE}<path/>{ICON_SUFFIX}"),
        )
        .unwrap();
    }

    fn args(path: &Path) -> BuildArgs {
        BuildArgs {
            path: path.to_path_buf(),
            overrides: ConfigOverrides::default(),
            extra: vec![],
            strict: false,
        }
    }

    #[test]
    fn test_build_packed_project() {
        let dir = tempdir().unwrap();
        write_icon(dir.path(), "line", "home");
        write_icon(dir.path(), "solid", "star");
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(
            dir.path().join("src/App.vue"),
            "<template><icon icon=\"home\" /><icon icon=\"solid:star\" /></template>",
        )
        .unwrap();

        run(args(dir.path()), &Printer::plain()).unwrap();

        let doc = fs::read_to_string(dir.path().join("dist/assets/icons.svg")).unwrap();
        assert!(doc.contains("<symbol id=\"line:home\">"));
        assert!(doc.contains("<symbol id=\"solid:star\">"));
    }

    #[test]
    fn test_build_per_file_project() {
        let dir = tempdir().unwrap();
        write_icon(dir.path(), "line", "home");
        fs::write(dir.path().join("waltz.yaml"), "per_file: true\n").unwrap();
        fs::write(dir.path().join("menu.ts"), "export default { icon: 'home' }\n").unwrap();

        run(args(dir.path()), &Printer::plain()).unwrap();

        assert!(dir.path().join("dist/assets/icons/line/home.svg").exists());
        assert!(dir.path().join("dist/preload-script.js").exists());
        assert!(!dir.path().join("dist/assets/icons.svg").exists());
    }

    #[test]
    fn test_build_missing_icon_is_warning_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("page.html"), "<i icon=\"ghost\"></i>").unwrap();

        run(args(dir.path()), &Printer::plain()).unwrap();

        let doc = fs::read_to_string(dir.path().join("dist/assets/icons.svg")).unwrap();
        assert!(!doc.contains("<symbol"));
    }

    #[test]
    fn test_build_strict_fails_on_missing_icon() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("page.html"), "<i icon=\"ghost\"></i>").unwrap();

        let mut build_args = args(dir.path());
        build_args.strict = true;

        let err = run(build_args, &Printer::plain()).unwrap_err();
        assert!(err.to_string().contains("1 icon is missing"));
    }

    #[test]
    fn test_build_extra_sources() {
        let dir = tempdir().unwrap();
        write_icon(dir.path(), "line", "gear");
        fs::write(dir.path().join("icons.list"), "icon: gear\n").unwrap();

        let mut build_args = args(dir.path());
        build_args.extra = vec![dir.path().join("icons.list")];

        run(build_args, &Printer::plain()).unwrap();

        let doc = fs::read_to_string(dir.path().join("dist/assets/icons.svg")).unwrap();
        assert!(doc.contains("<symbol id=\"line:gear\">"));
    }

    #[test]
    fn test_build_conflicting_modes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("waltz.yaml"), "pack: true\nper_file: true\n").unwrap();

        let err = run(args(dir.path()), &Printer::plain()).unwrap_err();
        assert!(matches!(err, WaltzError::Config { .. }));
    }
}
