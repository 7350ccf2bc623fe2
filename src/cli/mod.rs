pub mod build;
pub mod completions;
pub mod init;
pub mod scan;
pub mod watch;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::icon::IconName;

/// waltz - collect icon references and pack them into SVG sprites
#[derive(Parser, Debug)]
#[command(name = "waltz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a project and emit its icons
    Build(build::BuildArgs),

    /// List the icon references found in files
    Scan(scan::ScanArgs),

    /// Build, then rebuild whenever a source file changes
    Watch(watch::WatchArgs),

    /// Initialize a waltz project (generates waltz.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Command-line overrides for waltz.yaml settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Element name searched for icon attributes
    #[arg(long)]
    pub tag: Option<String>,

    /// Icon always collected (repeatable)
    #[arg(long = "ensure", value_name = "ICON")]
    pub ensure: Vec<String>,

    /// Package under node_modules to scan as well (repeatable)
    #[arg(long = "library", value_name = "NAME")]
    pub libraries: Vec<String>,

    /// Pack all icons into one sprite
    #[arg(long)]
    pub pack: bool,

    /// Copy each icon as its own file and write a preload script
    #[arg(long)]
    pub per_file: bool,

    /// Append a build hash to the sprite filename
    #[arg(long)]
    pub hash: bool,

    /// Icon asset directory (relative to the project root)
    #[arg(long)]
    pub icons: Option<PathBuf>,

    /// Output directory (relative to the project root)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Layer these overrides over a loaded configuration.
    ///
    /// Mode flags are set explicitly rather than replacing the file's
    /// value, so `pack: true` in waltz.yaml plus `--per-file` is reported
    /// as a conflict.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(tag) = &self.tag {
            config.tag = tag.clone();
        }
        config
            .ensure_list
            .extend(self.ensure.iter().map(|n| IconName::from(n.as_str())));
        config.libraries.extend(self.libraries.iter().cloned());
        if self.pack {
            config.pack = Some(true);
        }
        if self.per_file {
            config.per_file = Some(true);
        }
        if self.hash {
            config.hash = true;
        }
        if let Some(icons) = &self.icons {
            config.icons = icons.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config
    }
}
