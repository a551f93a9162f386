//! Tar extractor (spec §4.6): one child job per regular file entry.

use std::io::{Cursor, Read};

use crate::error::ScanError;
use crate::job::Job;

use super::ArchiveExtractor;

pub struct TarExtractor;

impl ArchiveExtractor for TarExtractor {
    fn extract(&self, job: &Job, size_limit_bytes: u64) -> Result<Vec<Job>, ScanError> {
        let cursor = Cursor::new(job.payload());
        let mut archive = tar::Archive::new(cursor);
        let entries = archive.entries().map_err(|e| ScanError::DecompressionFailed {
            path: job.abspath().display().to_string(),
            message: format!("invalid tar: {e}"),
        })?;

        let mut children = Vec::new();
        for entry in entries {
            let mut entry = entry.map_err(|e| ScanError::DecompressionFailed {
                path: job.abspath().display().to_string(),
                message: format!("failed to read tar entry: {e}"),
            })?;

            if !entry.header().entry_type().is_file() {
                continue;
            }

            let size = entry.header().size().unwrap_or(0);
            if size > size_limit_bytes {
                let name = entry.path().map(|p| p.display().to_string()).unwrap_or_default();
                return Err(ScanError::SizeExceeded {
                    path: format!("{}/{}", job.abspath().display(), name),
                    size,
                    limit: size_limit_bytes,
                });
            }

            let name = entry
                .path()
                .map_err(|e| ScanError::DecompressionFailed {
                    path: job.abspath().display().to_string(),
                    message: format!("invalid tar entry path: {e}"),
                })?
                .display()
                .to_string();

            let mut buf = Vec::with_capacity(size as usize);
            entry.read_to_end(&mut buf).map_err(|e| ScanError::ReadFailed {
                path: job.abspath().join(&name),
                source: e,
            })?;
            children.push(job.child(name, buf));
        }
        Ok(children)
    }
}
