use miette::Diagnostic;
use thiserror::Error;

/// Main error type for waltz operations.
///
/// A missing icon asset is never one of these; see [`crate::store::LoadOutcome`].
#[derive(Error, Diagnostic, Debug)]
pub enum WaltzError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(waltz::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(waltz::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pattern error: {message}")]
    #[diagnostic(code(waltz::pattern))]
    Pattern {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(waltz::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl WaltzError {
    /// Wrap an IO failure with the path it happened on.
    pub fn io(path: impl Into<std::path::PathBuf>, context: &str, err: std::io::Error) -> Self {
        WaltzError::Io {
            path: path.into(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaltzError>;
