//! Error taxonomy shared by the loader, the puzzle model and the runners.

use std::path::PathBuf;

/// Errors raised while loading a puzzle, validating configuration, or
/// selecting parents.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The puzzle file is missing or unreadable.
    #[error("cannot read puzzle file {}: {}", .path.display(), .source)]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure (`NotFound` for a missing file).
        #[source]
        source: std::io::Error,
    },

    /// The puzzle text is malformed.
    ///
    /// `line` is 1-based and counts the dimension header as line 1.
    #[error("malformed puzzle at line {line}: {reason}")]
    Parse {
        /// Offending line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid dimension, cell value, or engine parameter.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Fitness-proportional selection could not pick a member.
    #[error("proportional selection failed: {0}")]
    Selection(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SearchError>;
