//! Build session.
//!
//! A [`Build`] owns everything that lives for one build invocation: the
//! compiled pattern set, the accumulator, the icon store, the build hash
//! and the diagnostics report. Two builds never share discovered icons.
//!
//! # Example
//!
//! ```ignore
//! use waltz_icons::{Build, Config};
//!
//! let build = Build::new(Config::default())?;
//! build.scan_source(r#"<icon icon="home" />"#);
//! let summary = build.finish()?;
//! ```

use std::fs;
use std::path::Path;

use parking_lot::Mutex;
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::config::{Config, EmitMode};
use crate::emit::{self, BuildHash, Emitted};
use crate::error::{Result, WaltzError};
use crate::extract::{Extractor, ScanOutcome};
use crate::hooks::PreEmit;
use crate::icon::IconName;
use crate::patterns::PatternSet;
use crate::report::Report;
use crate::store::{IconStore, MissingIcon};

/// State of one build invocation.
pub struct Build {
    config: Config,
    mode: EmitMode,
    patterns: PatternSet,
    accumulator: Accumulator,
    store: IconStore,
    hash: BuildHash,
    hooks: Vec<Box<dyn PreEmit>>,
    report: Mutex<Report>,
}

/// Outcome of [`Build::finish`].
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub emitted: Emitted,
    pub report: Report,
}

impl Build {
    /// Start a build. Fails on an invalid tag or conflicting emit mode.
    pub fn new(config: Config) -> Result<Self> {
        let mode = config.emit_mode()?;
        let patterns = PatternSet::for_tag(&config.tag)?;
        let store = IconStore::new(&config.icons);

        Ok(Self {
            config,
            mode,
            patterns,
            accumulator: Accumulator::new(),
            store,
            hash: BuildHash::now(),
            hooks: Vec::new(),
            report: Mutex::new(Report::new()),
        })
    }

    /// Register a hook to run before emission.
    pub fn with_hook(mut self, hook: impl PreEmit + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Replace the build hash (for reproducible output).
    pub fn with_hash(mut self, hash: BuildHash) -> Self {
        self.hash = hash;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> EmitMode {
        self.mode
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn store(&self) -> &IconStore {
        &self.store
    }

    pub fn hash(&self) -> &BuildHash {
        &self.hash
    }

    /// Icons discovered so far, in accumulation order.
    pub fn icons(&self) -> Vec<IconName> {
        self.accumulator.snapshot()
    }

    /// Copy of the diagnostics gathered so far.
    pub fn report(&self) -> Report {
        self.report.lock().clone()
    }

    pub fn extractor(&self) -> Extractor<'_> {
        Extractor::new(
            &self.patterns,
            &self.config.ensure_list,
            &self.accumulator,
            &self.store,
        )
    }

    /// Scan one unit of source text.
    pub fn scan_source(&self, source: &str) -> ScanOutcome {
        self.scan_source_with(source, |_, _| {})
    }

    /// Scan one unit of source text, handing each newly loaded asset to
    /// `emit`. Missing assets are recorded in the report.
    pub fn scan_source_with<E>(&self, source: &str, emit: E) -> ScanOutcome
    where
        E: FnMut(&Path, &[u8]),
    {
        let mut missing: Vec<MissingIcon> = Vec::new();
        let discovered = self
            .extractor()
            .scan(source, emit, |m| missing.push(m.clone()));

        let mut report = self.report.lock();
        for m in &missing {
            report.missing(m);
        }

        ScanOutcome {
            discovered,
            missing,
        }
    }

    /// Read and scan one source file.
    pub fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
        let bytes = fs::read(path).map_err(|e| WaltzError::io(path, "Failed to read source", e))?;
        let outcome = self.scan_source(&String::from_utf8_lossy(&bytes));
        debug!(file = %path.display(), new = outcome.discovered.len(), "scanned source");
        Ok(outcome)
    }

    /// Run hooks, then write the collected icons to the output directory.
    pub fn finish(&self) -> Result<BuildSummary> {
        for hook in &self.hooks {
            debug!(hook = hook.name(), "running pre-emit hook");
            hook.run(self).map_err(|e| WaltzError::Build {
                message: format!("pre-emit hook '{}' failed: {}", hook.name(), e),
                help: None,
            })?;
        }

        let hash = self.config.hash.then_some(&self.hash);
        let emitted = emit::emit(
            self.mode,
            &self.config.output,
            &self.accumulator.snapshot(),
            &self.store,
            hash,
        )?;

        let mut report = self.report.lock();
        for m in &emitted.missing {
            report.missing(m);
        }

        Ok(BuildSummary {
            emitted,
            report: report.clone(),
        })
    }
}

impl std::fmt::Debug for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Build")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("icons", &self.accumulator.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
