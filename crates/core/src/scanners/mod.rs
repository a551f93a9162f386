//! Leaf scanners (spec §4.5, C5): terminal handlers that search a job's
//! bytes for PANs instead of re-enqueuing children. Dispatch is by
//! [`crate::mime::ContentKind`].

pub mod pdf;
pub mod text;

use std::collections::HashSet;

use crate::error::ScanError;
use crate::pan::Pan;
use crate::patterns::PatternSet;

/// Shared context every leaf scanner needs: the compiled patterns and the
/// caller's PAN exclusion list. Cheap to clone; callers typically hold one
/// per scan and pass `&ScanContext`.
pub struct ScanContext<'a> {
    pub patterns: &'a PatternSet,
    pub excluded_pans: &'a HashSet<String>,
}

/// A format-specific leaf handler: turn payload bytes into matched PANs.
pub trait LeafScanner {
    fn scan(&self, payload: &[u8], ctx: &ScanContext) -> Result<Vec<Pan>, ScanError>;
}
