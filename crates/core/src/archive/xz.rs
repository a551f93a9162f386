//! Xz extractor (spec §4.6): a single-member container, decompressed in
//! fixed-size chunks with incremental size-limit enforcement, same shape
//! as [`crate::archive::gzip`].

use std::io::Read;

use xz2::read::XzDecoder;

use crate::error::ScanError;
use crate::job::Job;

use super::ArchiveExtractor;

const CHUNK_SIZE: usize = 1024 * 1024;

pub struct XzExtractor;

impl ArchiveExtractor for XzExtractor {
    fn extract(&self, job: &Job, size_limit_bytes: u64) -> Result<Vec<Job>, ScanError> {
        let mut decoder = XzDecoder::new(job.payload());
        let member_name = strip_xz_suffix(&job.basename);

        let mut buf = Vec::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let n = decoder.read(&mut chunk).map_err(|e| ScanError::DecompressionFailed {
                path: job.abspath().display().to_string(),
                message: format!("xz decode failed: {e}"),
            })?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.len() as u64 > size_limit_bytes {
                return Err(ScanError::SizeExceeded {
                    path: job.abspath().join(&member_name).display().to_string(),
                    size: buf.len() as u64,
                    limit: size_limit_bytes,
                });
            }
        }

        Ok(vec![job.child(member_name, buf)])
    }
}

fn strip_xz_suffix(basename: &str) -> String {
    basename.strip_suffix(".xz").unwrap_or(basename).to_string()
}
