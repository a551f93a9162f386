//! Container extractors (spec §4.6, C6): decompress/unpack a container
//! payload into child jobs, enforcing the size limit while doing so.
//! Dispatch is by [`crate::mime::ContentKind`].

pub mod gzip;
pub mod tar;
pub mod xz;
pub mod zip;

use crate::error::ScanError;
use crate::job::Job;

/// Extracts the members of a container job into child jobs. Implementors
/// must stop extracting (returning [`ScanError::SizeExceeded`]) as soon as
/// a member would exceed `size_limit_bytes`, rather than reading it fully
/// first — this bounds peak memory regardless of a container's claimed
/// size in its header.
pub trait ArchiveExtractor {
    fn extract(&self, job: &Job, size_limit_bytes: u64) -> Result<Vec<Job>, ScanError>;
}
