//! Outlook `.pst` port (spec §4.6, Open Question): trait-only, with no
//! bundled default decoder, for the same reason as [`crate::mail::msg`] —
//! no dependable PST-container crate could be confidently grounded.
//! Gated behind the `pst` feature, which is off by default.

use crate::error::ScanError;
use crate::mail::ParsedMail;

/// One message extracted from a `.pst` store. The size limit (spec §4.8)
/// applies per-message here, not to the PST file as a whole — a resolved
/// Open Question recorded in DESIGN.md.
pub struct PstMessage {
    pub identifier: String,
    pub raw_eml: Vec<u8>,
}

/// Enumerates the messages inside a `.pst` store. No implementation ships
/// with this crate; enable the `pst` feature and supply one via
/// [`crate::dispatcher::Dispatcher`]'s configuration to handle `.pst` jobs.
pub trait PstDecoder {
    fn list_messages(&self, payload: &[u8]) -> Result<Vec<PstMessage>, ScanError>;
    fn parse_message(&self, message: &PstMessage) -> Result<ParsedMail, ScanError>;
}
