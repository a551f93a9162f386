//! Mail formats (spec §4.5/§4.6, C5/C6): EML is a leaf scanner over a
//! parsed message; MBOX is a container that splits into EML-shaped
//! members. MSG and PST are trait-only ports with no bundled default (see
//! DESIGN.md) — no dependable pure-Rust crate for either format's binary
//! container could be confidently grounded.

pub mod eml;
pub mod mbox;
#[cfg(feature = "msg")]
pub mod msg;
#[cfg(feature = "pst")]
pub mod pst;

use crate::error::ScanError;

/// One parsed email: the searchable text body plus any attachments,
/// which become child jobs for the dispatcher to re-classify.
pub struct ParsedMail {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

pub struct Attachment {
    pub filename: String,
    pub payload: Vec<u8>,
}

/// Parses a raw `.eml`-shaped byte string (headers + body, optionally
/// MIME-multipart) into searchable text and attachment payloads.
pub trait MailDecoder {
    fn parse(&self, payload: &[u8]) -> Result<ParsedMail, ScanError>;
}

/// Default [`MailDecoder`] backed by the `mailparse` crate.
pub struct MailparseDecoder;

impl MailDecoder for MailparseDecoder {
    fn parse(&self, payload: &[u8]) -> Result<ParsedMail, ScanError> {
        let parsed = mailparse::parse_mail(payload).map_err(|e| ScanError::DecodeFailed {
            path: String::new(),
            message: format!("mail parse failed: {e}"),
        })?;
        collect(&parsed)
    }
}

fn collect(parsed: &mailparse::ParsedMail) -> Result<ParsedMail, ScanError> {
    let mut text = String::new();
    let mut attachments = Vec::new();
    collect_part(parsed, &mut text, &mut attachments)?;
    Ok(ParsedMail { text, attachments })
}

fn collect_part(
    part: &mailparse::ParsedMail,
    text: &mut String,
    attachments: &mut Vec<Attachment>,
) -> Result<(), ScanError> {
    if part.subparts.is_empty() {
        let disposition = part.get_content_disposition();
        let is_attachment = matches!(disposition.disposition, mailparse::DispositionType::Attachment)
            || disposition.params.get("filename").is_some();

        if is_attachment {
            let filename = disposition
                .params
                .get("filename")
                .cloned()
                .unwrap_or_else(|| "attachment".to_string());
            let body = part.get_body_raw().map_err(|e| ScanError::DecodeFailed {
                path: String::new(),
                message: format!("attachment body decode failed: {e}"),
            })?;
            attachments.push(Attachment { filename, payload: body });
        } else if let Ok(body) = part.get_body() {
            text.push_str(&body);
            text.push('\n');
        }
        // Also search the raw headers of every part, matching the
        // original's behavior of scanning header text for PANs.
        text.push_str(&part.headers.iter().map(|h| h.get_value()).collect::<Vec<_>>().join("\n"));
        text.push('\n');
        return Ok(());
    }

    for sub in &part.subparts {
        collect_part(sub, text, attachments)?;
    }
    Ok(())
}
