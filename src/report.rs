//! Diagnostics collected over a build.
//!
//! Per-icon problems never abort a build on their own. They are gathered
//! here and the caller decides whether warnings fail the build.

use std::fmt;

use crate::store::MissingIcon;

/// Diagnostic code for an icon whose asset could not be read.
pub const MISSING_ICON: &str = "waltz::icon::missing";

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code, e.g. `waltz::icon::missing`.
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Warning for an icon that was referenced but has no asset.
    pub fn missing_icon(missing: &MissingIcon) -> Self {
        Self::warning(MISSING_ICON, missing.to_string()).with_help(format!(
            "Add {} to the icon store or fix the reference",
            missing.path.display()
        ))
    }
}

/// Collects diagnostics over a build.
#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record a missing icon once, even if it is reported again later.
    pub fn missing(&mut self, missing: &MissingIcon) {
        let diagnostic = Diagnostic::missing_icon(missing);
        if !self.diagnostics.contains(&diagnostic) {
            self.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Escalate every warning to an error (strict builds).
    pub fn into_strict(mut self) -> Self {
        for d in &mut self.diagnostics {
            d.severity = Severity::Error;
        }
        self
    }
}
