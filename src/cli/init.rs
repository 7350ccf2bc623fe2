//! Init command implementation.
//!
//! Generates a starter `waltz.yaml` for a project.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{CONFIG_FILENAME, DEFAULT_TAG};
use crate::discovery::discover;
use crate::error::{Result, WaltzError};
use crate::output::{plural, Printer};
use crate::store::DEFAULT_ICON_ROOT;

/// Directories commonly holding application sources, in preference order.
const SOURCE_DIR_CANDIDATES: &[&str] = &["src", "app", "pages", "components"];

/// Initialize a waltz project by generating a waltz.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing waltz.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(WaltzError::Build {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let source_dirs: Vec<&str> = SOURCE_DIR_CANDIDATES
        .iter()
        .copied()
        .filter(|dir| args.path.join(dir).is_dir())
        .collect();

    // Build YAML by hand so optional keys can be shown commented out.
    let mut yaml = String::new();
    yaml.push_str(&format!("tag: {}\n", DEFAULT_TAG));
    if !source_dirs.is_empty() {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}/\"\n", dir));
        }
    }
    yaml.push_str(&format!("icons: {}\n", DEFAULT_ICON_ROOT));
    yaml.push_str("output: dist\n");
    yaml.push_str("# ensure_list: []\n");
    yaml.push_str("# libraries: []\n");
    yaml.push_str("# per_file: true\n");
    yaml.push_str("# hash: true\n");

    fs::write(&config_path, &yaml)
        .map_err(|e| WaltzError::io(&config_path, "Failed to write configuration", e))?;

    let discovery = discover(&args.path)?;

    if !source_dirs.is_empty() {
        printer.info("Sources", &source_dirs.join(", "));
    }
    printer.status(
        "Created",
        &format!(
            "{} ({} to scan)",
            CONFIG_FILENAME,
            plural(discovery.files.len(), "file", "files")
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_config() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join("waltz.yaml")).unwrap();
        assert!(content.contains("output: dist"));
        assert!(!content.contains("sources:"));

        let config = Config::parse(&content).unwrap();
        assert_eq!(config.tag, "icon");
    }

    #[test]
    fn test_init_lists_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::plain()).unwrap();

        let config = Config::load(&dir.path().join("waltz.yaml")).unwrap();
        assert_eq!(config.sources, vec!["src/", "components/"]);
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("waltz.yaml"), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        assert!(run(args, &Printer::plain()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("waltz.yaml"), "output: build").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join("waltz.yaml")).unwrap();
        assert!(content.contains("output: dist"));
    }
}
