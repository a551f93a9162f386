//! Error taxonomy (spec §7). Every variant here is recovered locally at the
//! per-job boundary and captured into a [`crate::finding::Finding`]'s error
//! list — nothing here is meant to unwind past the dispatcher.

use std::path::PathBuf;

use thiserror::Error;

/// The seven error kinds the dispatcher can produce for a single job.
///
/// `Invariant` is the one variant that is never captured into a Finding: it
/// signals a programming-invariant violation (queue counter underflow,
/// unreachable dispatch state) and is process-fatal per spec §4.8/§7.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("size {size} exceeds limit {limit} for {path}")]
    SizeExceeded {
        path: String,
        size: u64,
        limit: u64,
    },

    #[error("failed to classify {path}: {source}")]
    ClassificationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress {path}: {message}")]
    DecompressionFailed { path: String, message: String },

    #[error("failed to decode {path}: {message}")]
    DecodeFailed { path: String, message: String },

    #[error("insufficient memory to enqueue {path} ({size} bytes)")]
    InsufficientMemory { path: String, size: u64 },

    #[error("scan invariant violated: {0}")]
    Invariant(String),
}

impl ScanError {
    /// Whether this error is process-fatal (escalated past the dispatcher)
    /// rather than captured into a failure Finding. Only `Invariant` is.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::Invariant(_))
    }
}
