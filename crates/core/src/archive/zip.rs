//! Zip extractor (spec §4.6): one child job per non-directory entry.

use std::io::{Cursor, Read};

use crate::error::ScanError;
use crate::job::Job;

use super::ArchiveExtractor;

pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, job: &Job, size_limit_bytes: u64) -> Result<Vec<Job>, ScanError> {
        let cursor = Cursor::new(job.payload());
        let mut archive = zip::ZipArchive::new(cursor).map_err(|e| ScanError::DecompressionFailed {
            path: job.abspath().display().to_string(),
            message: format!("invalid zip: {e}"),
        })?;

        let mut children = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| ScanError::DecompressionFailed {
                path: job.abspath().display().to_string(),
                message: format!("failed to read zip entry {i}: {e}"),
            })?;

            if entry.is_dir() {
                continue;
            }
            if entry.size() > size_limit_bytes {
                return Err(ScanError::SizeExceeded {
                    path: format!("{}/{}", job.abspath().display(), entry.name()),
                    size: entry.size(),
                    limit: size_limit_bytes,
                });
            }

            let name = entry.name().to_string();
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buf).map_err(|e| ScanError::ReadFailed {
                path: job.abspath().join(&name),
                source: e,
            })?;
            children.push(job.child(name, buf));
        }
        Ok(children)
    }
}
