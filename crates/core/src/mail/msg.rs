//! Outlook `.msg` port (spec §4.6, Open Question): trait-only, with no
//! bundled default decoder. No dependably-maintained pure-Rust CFB/MSG
//! parser could be confidently grounded at the time this crate was
//! written (see DESIGN.md) — fabricating a dependency to fill the gap
//! would violate the no-fabrication rule, so callers wire their own.
//! Gated behind the `msg` feature, which is off by default.

use crate::error::ScanError;
use crate::mail::ParsedMail;

/// Parses a raw Outlook `.msg` (CFB-container) payload. No implementation
/// ships with this crate; enable the `msg` feature and supply one via
/// [`crate::dispatcher::Dispatcher`]'s configuration to handle `.msg` jobs.
pub trait MsgDecoder {
    fn parse(&self, payload: &[u8]) -> Result<ParsedMail, ScanError>;
}
