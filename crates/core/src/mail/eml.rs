//! EML leaf scanner (spec §4.5): search the message body/headers for PANs
//! and re-enqueue attachments as child jobs for the dispatcher to classify.

use crate::error::ScanError;
use crate::finder;
use crate::job::Job;
use crate::pan::Pan;
use crate::scanners::ScanContext;

use super::{MailDecoder, MailparseDecoder};

/// Unlike [`crate::scanners::LeafScanner`], an EML scan can also yield
/// child jobs (its attachments), so it gets its own return shape rather
/// than implementing the plain `LeafScanner` trait.
pub struct EmlScanResult {
    pub matches: Vec<Pan>,
    pub children: Vec<Job>,
}

pub struct EmlScanner<D: MailDecoder = MailparseDecoder> {
    decoder: D,
}

impl Default for EmlScanner<MailparseDecoder> {
    fn default() -> Self {
        EmlScanner { decoder: MailparseDecoder }
    }
}

impl<D: MailDecoder> EmlScanner<D> {
    pub fn with_decoder(decoder: D) -> Self {
        EmlScanner { decoder }
    }

    pub fn scan(&self, job: &Job, ctx: &ScanContext) -> Result<EmlScanResult, ScanError> {
        let parsed = self.decoder.parse(job.payload())?;
        let matches = finder::find_pans(&parsed.text, ctx.patterns, ctx.excluded_pans);
        let children = parsed
            .attachments
            .into_iter()
            .map(|att| job.child(att.filename, att.payload))
            .collect();
        Ok(EmlScanResult { matches, children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::mail::ParsedMail;
    use crate::patterns::PatternSet;
    use std::collections::HashSet;

    struct FakeDecoder {
        text: &'static str,
        attachments: Vec<(&'static str, Vec<u8>)>,
    }

    impl MailDecoder for FakeDecoder {
        fn parse(&self, _payload: &[u8]) -> Result<ParsedMail, ScanError> {
            Ok(ParsedMail {
                text: self.text.to_string(),
                attachments: self
                    .attachments
                    .iter()
                    .map(|(name, bytes)| super::super::Attachment {
                        filename: name.to_string(),
                        payload: bytes.clone(),
                    })
                    .collect(),
            })
        }
    }

    #[test]
    fn scenario_s6_attachment_becomes_child_job_with_correct_provenance() {
        let patterns = PatternSet::new();
        let excluded = HashSet::new();
        let ctx = ScanContext { patterns: &patterns, excluded_pans: &excluded };
        let decoder = FakeDecoder {
            text: "no card here",
            attachments: vec![("invoice.pdf", b"%PDF-1.4 ...".to_vec())],
        };
        let scanner = EmlScanner::with_decoder(decoder);
        let job = Job::new("message.eml", "/mail", b"raw eml bytes".to_vec());
        let result = scanner.scan(&job, &ctx).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.children.len(), 1);
        assert_eq!(result.children[0].basename, "invoice.pdf");
        assert_eq!(result.children[0].dirname, job.abspath());
    }

    #[test]
    fn body_text_is_searched_for_pans() {
        let patterns = PatternSet::new();
        let excluded = HashSet::new();
        let ctx = ScanContext { patterns: &patterns, excluded_pans: &excluded };
        let decoder = FakeDecoder { text: "card 4111 1111 1111 1111", attachments: vec![] };
        let scanner = EmlScanner::with_decoder(decoder);
        let job = Job::new("message.eml", "/mail", vec![]);
        let result = scanner.scan(&job, &ctx).unwrap();
        assert_eq!(result.matches.len(), 1);
    }
}
