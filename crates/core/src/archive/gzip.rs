//! Gzip extractor (spec §4.6): a single-member container. Decompresses in
//! fixed-size chunks so a job that would exceed the size limit is caught
//! before the whole output is buffered, and recovers the original member
//! name from the gzip header's FNAME field when present.

use std::io::Read;

use flate2::read::GzDecoder;

use crate::error::ScanError;
use crate::job::Job;

use super::ArchiveExtractor;

/// Read in 1 MiB chunks while enforcing the size limit incrementally.
const CHUNK_SIZE: usize = 1024 * 1024;

pub struct GzipExtractor;

impl ArchiveExtractor for GzipExtractor {
    fn extract(&self, job: &Job, size_limit_bytes: u64) -> Result<Vec<Job>, ScanError> {
        let mut decoder = GzDecoder::new(job.payload());
        let mut buf = Vec::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let n = decoder.read(&mut chunk).map_err(|e| ScanError::DecompressionFailed {
                path: job.abspath().display().to_string(),
                message: format!("gzip decode failed: {e}"),
            })?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.len() as u64 > size_limit_bytes {
                let name = gz_member_name(&decoder, &job.basename);
                return Err(ScanError::SizeExceeded {
                    path: job.abspath().join(&name).display().to_string(),
                    size: buf.len() as u64,
                    limit: size_limit_bytes,
                });
            }
        }

        // The header (and its optional FNAME field) is only guaranteed
        // parsed once at least one read has happened.
        let member_name = gz_member_name(&decoder, &job.basename);
        Ok(vec![job.child(member_name, buf)])
    }
}

fn strip_gz_suffix(basename: &str) -> String {
    basename.strip_suffix(".gz").unwrap_or(basename).to_string()
}

fn gz_member_name(decoder: &GzDecoder<&[u8]>, basename: &str) -> String {
    decoder
        .header()
        .and_then(|h| h.filename())
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_else(|| strip_gz_suffix(basename))
}
