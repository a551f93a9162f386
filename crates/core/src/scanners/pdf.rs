//! PDF leaf scanner (spec §4.5/§6): text extraction is delegated to a
//! [`PdfDecoder`] port so the extraction library stays swappable behind a
//! thin seam, the way [`crate::mail::MailDecoder`] does for email.

use crate::error::ScanError;
use crate::finder;
use crate::pan::Pan;

use super::{LeafScanner, ScanContext};

/// Extracts plain text from a PDF document. The default implementation is
/// backed by `pdf-extract`; tests substitute a fake to avoid depending on
/// real PDF fixtures.
pub trait PdfDecoder {
    fn extract_text(&self, payload: &[u8]) -> Result<String, ScanError>;
}

/// Default [`PdfDecoder`] backed by the `pdf-extract` crate.
pub struct PdfExtractDecoder;

impl PdfDecoder for PdfExtractDecoder {
    fn extract_text(&self, payload: &[u8]) -> Result<String, ScanError> {
        pdf_extract::extract_text_from_mem(payload).map_err(|e| ScanError::DecodeFailed {
            path: Default::default(),
            message: format!("pdf extraction failed: {e}"),
        })
    }
}

pub struct PdfScanner<D: PdfDecoder = PdfExtractDecoder> {
    decoder: D,
}

impl Default for PdfScanner<PdfExtractDecoder> {
    fn default() -> Self {
        PdfScanner { decoder: PdfExtractDecoder }
    }
}

impl<D: PdfDecoder> PdfScanner<D> {
    pub fn with_decoder(decoder: D) -> Self {
        PdfScanner { decoder }
    }
}

impl<D: PdfDecoder> LeafScanner for PdfScanner<D> {
    fn scan(&self, payload: &[u8], ctx: &ScanContext) -> Result<Vec<Pan>, ScanError> {
        let text = self.decoder.extract_text(payload)?;
        Ok(finder::find_pans(&text, ctx.patterns, ctx.excluded_pans))
    }
}
