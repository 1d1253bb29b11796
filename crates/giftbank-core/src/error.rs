//! Export error types.
//!
//! Defined separately so callers can distinguish the policy gate from real
//! I/O failures without string matching.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{MAX_EXPORT_QUESTIONS, MIN_EXPORT_QUESTIONS};

/// Reasons an exam export can be refused or fail.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The exam misses the regulation question-count window.
    #[error(
        "exam has {count} questions, export requires between \
         {MIN_EXPORT_QUESTIONS} and {MAX_EXPORT_QUESTIONS}"
    )]
    CardinalityOutOfRange { count: usize },

    /// Writing the output file failed.
    #[error("failed to write exam to {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Returns `true` when the failure is the policy gate rather than I/O.
    pub fn is_gate(&self) -> bool {
        matches!(self, ExportError::CardinalityOutOfRange { .. })
    }
}
