//! MIME classifier (spec §4.4, C4): sniff content, disambiguate with the
//! filename extension, and map onto the closed `ContentKind` set.

use crate::error::ScanError;

/// Closed set of content kinds the dispatcher routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Plaintext,
    Rtf,
    MsWord,
    MsExcel,
    MsPowerpoint,
    Pdf,
    MsMsg,
    MsPst,
    Eml,
    Mbox,
    Zip,
    Tar,
    Gzip,
    Xz,
    Unknown,
}

/// `(mime_type, encoding)` as spec §6 describes the sniffer's contract.
#[derive(Debug, Clone)]
pub struct Classification {
    pub mime_type: String,
    pub encoding: String,
    pub kind: ContentKind,
}

const SNIFF_WINDOW: usize = 2048;

/// Classify up to the first 2048 bytes of `content` plus `extension`
/// (lowercase, with leading dot, e.g. `.eml`).
pub fn classify(content: &[u8], extension: &str) -> Result<Classification, ScanError> {
    let window = &content[..content.len().min(SNIFF_WINDOW)];
    let (mime_type, kind) = classify_kind(window, extension);
    let encoding = detect_encoding(window, kind);
    Ok(Classification { mime_type, encoding, kind })
}

/// Compound File Binary header (OLE2): shared by legacy Office binaries,
/// `.msg`, and `.pst`. `infer`'s matchers only disambiguate a subset of
/// these, so the extension breaks the tie here rather than relying on a
/// deeper structural read.
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

fn classify_kind(window: &[u8], extension: &str) -> (String, ContentKind) {
    if window.starts_with(&CFB_MAGIC) {
        let kind = match extension {
            ".msg" => ContentKind::MsMsg,
            ".pst" | ".ost" => ContentKind::MsPst,
            ".doc" => ContentKind::Plaintext,
            ".xls" => ContentKind::Plaintext,
            ".ppt" => ContentKind::Plaintext,
            _ => ContentKind::Unknown,
        };
        let mime = match kind {
            ContentKind::MsMsg => "application/vnd.ms-outlook",
            ContentKind::MsPst => "application/vnd.ms-outlook-pst",
            ContentKind::Plaintext => "application/msword",
            _ => "application/x-cfb",
        };
        return (mime.to_string(), kind);
    }

    match infer::get(window) {
        Some(ty) => {
            let mime = ty.mime_type().to_string();
            let kind = map_mime(&mime, extension);
            (mime, kind)
        }
        None => {
            // No magic-byte match: infer nothing beyond "is it text".
            if looks_like_text(window) {
                let kind = if extension == ".eml" {
                    ContentKind::Eml
                } else if extension == ".mbox" {
                    ContentKind::Mbox
                } else {
                    ContentKind::Plaintext
                };
                ("text/plain".to_string(), kind)
            } else {
                ("application/octet-stream".to_string(), map_mime("application/octet-stream", extension))
            }
        }
    }
}

/// Applies the original `mappings.__map_file_to_filetype` decision table.
fn map_mime(mime_type: &str, extension: &str) -> ContentKind {
    let mut parts = mime_type.splitn(2, '/');
    let top = parts.next().unwrap_or("");
    let sub = parts.next().unwrap_or("");

    const INERT: &[&str] = &[
        "audio", "video", "image", "chemical", "model", "gcode", "x-conference", "font", "x-world",
    ];
    if INERT.contains(&top) {
        return ContentKind::Unknown;
    }

    match top {
        "text" | "message" => {
            if sub == "plain" && extension == ".eml" {
                ContentKind::Eml
            } else if sub == "plain" && extension == ".mbox" {
                ContentKind::Mbox
            } else {
                ContentKind::Plaintext
            }
        }
        "application" => match sub {
            "octet-stream" => {
                if extension == ".mbox" {
                    ContentKind::Mbox
                } else {
                    ContentKind::Unknown
                }
            }
            "vnd.openxmlformats-officedocument.wordprocessingml.document" => ContentKind::MsWord,
            "vnd.openxmlformats-officedocument.spreadsheetml.sheet" => ContentKind::MsExcel,
            "vnd.openxmlformats-officedocument.presentationml.presentation" => {
                ContentKind::MsPowerpoint
            }
            // Legacy binary Office formats scan as raw text, matching the
            // original's mappings.py — preserved intentionally.
            "vnd.ms-powerpoint" | "vnd.ms-excel" | "msword" => ContentKind::Plaintext,
            "vnd.ms-outlook" => ContentKind::MsMsg,
            "pdf" => ContentKind::Pdf,
            "zip" => ContentKind::Zip,
            "x-tar" => ContentKind::Tar,
            "gzip" => ContentKind::Gzip,
            "x-xz" => ContentKind::Xz,
            "rtf" => ContentKind::Rtf,
            "vnd.ms-outlook-pst" => ContentKind::MsPst,
            _ => ContentKind::Unknown,
        },
        _ => ContentKind::Unknown,
    }
}

fn looks_like_text(window: &[u8]) -> bool {
    !window.contains(&0)
}

/// Closed label set standing in for libmagic's `mime_encoding`.
fn detect_encoding(window: &[u8], kind: ContentKind) -> String {
    if !matches!(
        kind,
        ContentKind::Plaintext | ContentKind::Rtf | ContentKind::Eml | ContentKind::Mbox
    ) {
        return "binary".to_string();
    }

    if window.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return "utf-8".to_string();
    }
    if window.starts_with(&[0xFF, 0xFE]) || window.starts_with(&[0xFE, 0xFF]) {
        return "utf-16".to_string();
    }
    match std::str::from_utf8(window) {
        Ok(_) => "utf-8".to_string(),
        Err(_) => {
            let (_, _, had_errors) = encoding_rs::WINDOWS_1252.decode(window);
            if had_errors {
                "binary".to_string()
            } else {
                "iso-8859-1".to_string()
            }
        }
    }
}
