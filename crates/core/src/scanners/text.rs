//! Plaintext leaf scanner (spec §4.5): decode and search flat text. Small
//! payloads are decoded and searched whole; large payloads are searched in
//! overlapping chunks so memory use stays bounded regardless of file size.

use crate::error::ScanError;
use crate::finder;
use crate::pan::Pan;

use super::{LeafScanner, ScanContext};

/// Payloads at or under this size are decoded and searched in one pass.
const SLURP_THRESHOLD_BYTES: usize = 30 * 1024 * 1024;

/// Chunk size used once a payload exceeds the slurp threshold.
const CHUNK_SIZE_BYTES: usize = 4 * 1024 * 1024;

/// Overlap carried from the end of one chunk into the next so a PAN
/// straddling a chunk boundary is never missed. Larger than the longest
/// possible separated PAN (19 chars for a spaced/hyphenated 16-digit PAN).
const CHUNK_OVERLAP_BYTES: usize = 64;

pub struct PlainTextScanner;

impl LeafScanner for PlainTextScanner {
    fn scan(&self, payload: &[u8], ctx: &ScanContext) -> Result<Vec<Pan>, ScanError> {
        if payload.len() <= SLURP_THRESHOLD_BYTES {
            let text = decode(payload);
            return Ok(finder::find_pans(&text, ctx.patterns, ctx.excluded_pans));
        }

        let mut found = Vec::new();
        let mut offset = 0usize;
        while offset < payload.len() {
            let end = (offset + CHUNK_SIZE_BYTES).min(payload.len());
            let chunk = &payload[offset..end];
            let text = decode(chunk);
            found.extend(finder::find_pans(&text, ctx.patterns, ctx.excluded_pans));
            if end == payload.len() {
                break;
            }
            offset = end.saturating_sub(CHUNK_OVERLAP_BYTES);
        }
        Ok(found)
    }
}

/// Decode UTF-8 if valid (with BOM stripped), else fall back to
/// Windows-1252 — matches the encoding labels [`crate::mime`] reports.
fn decode(bytes: &[u8]) -> String {
    let stripped = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(stripped) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(stripped);
            text.into_owned()
        }
    }
}
