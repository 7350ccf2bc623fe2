//! Extension points run during a build.

use std::path::PathBuf;

use crate::build::Build;
use crate::error::Result;

/// A hook run once, immediately before a build emits its output.
///
/// Hooks typically feed the session icon references that live outside
/// conventionally scanned files. Hooks run in registration order; the
/// first error aborts emission.
pub trait PreEmit: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    fn run(&self, session: &Build) -> Result<()>;
}

/// Scans extra files regardless of their extension.
#[derive(Debug, Clone, Default)]
pub struct ExtraSources {
    files: Vec<PathBuf>,
}

impl ExtraSources {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }
}

impl PreEmit for ExtraSources {
    fn name(&self) -> &str {
        "extra-sources"
    }

    fn run(&self, session: &Build) -> Result<()> {
        for file in &self.files {
            session.scan_file(file)?;
        }
        Ok(())
    }
}
