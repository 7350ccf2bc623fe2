//! Extraction engine: find new icon references in one unit of source text
//! and hand their assets to the caller.

use std::path::Path;

use tracing::debug;

use crate::accumulator::Accumulator;
use crate::icon::IconName;
use crate::patterns::PatternSet;
use crate::store::{IconStore, LoadOutcome, MissingIcon};

/// Scans source text against a pattern set, gated by an accumulator.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    patterns: &'a PatternSet,
    ensure_list: &'a [IconName],
    accumulator: &'a Accumulator,
    store: &'a IconStore,
}

/// What one scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Names admitted by this scan, in discovery order.
    pub discovered: Vec<IconName>,
    /// Names whose asset could not be read.
    pub missing: Vec<MissingIcon>,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }
}

impl<'a> Extractor<'a> {
    pub fn new(
        patterns: &'a PatternSet,
        ensure_list: &'a [IconName],
        accumulator: &'a Accumulator,
        store: &'a IconStore,
    ) -> Self {
        Self {
            patterns,
            ensure_list,
            accumulator,
            store,
        }
    }

    /// Scan `source` and collect the outcome, discarding asset content.
    pub fn extract(&self, source: &str) -> ScanOutcome {
        let mut missing = Vec::new();
        let discovered = self.scan(source, |_, _| {}, |m| missing.push(m.clone()));
        ScanOutcome {
            discovered,
            missing,
        }
    }

    /// Scan `source`, admit every reference not seen before, and load each
    /// admitted icon.
    ///
    /// `emit` receives the asset path and content of every icon that
    /// loaded; `on_error` receives every icon that did not. One failure
    /// never stops the remaining icons. Returns the admitted names in
    /// discovery order: ensure list (first scan only), then matcher order,
    /// then position in the text.
    pub fn scan<E, W>(&self, source: &str, mut emit: E, mut on_error: W) -> Vec<IconName>
    where
        E: FnMut(&Path, &[u8]),
        W: FnMut(&MissingIcon),
    {
        let found = self.patterns.find_all(source);
        let seed = self.ensure_list.iter().map(|n| n.as_str());
        let admitted = self.accumulator.admit(seed, found);

        for name in &admitted {
            debug!(icon = %name, "discovered icon");
            match self.store.load(name) {
                LoadOutcome::Loaded { path, content } => emit(&path, &content),
                LoadOutcome::Missing(missing) => on_error(&missing),
            }
        }

        admitted
    }
}
