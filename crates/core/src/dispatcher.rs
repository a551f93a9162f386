//! Dispatcher (spec §4.8, C8): the single worker that pops jobs, classifies
//! them, and routes to either a container extractor (re-enqueuing children)
//! or a leaf scanner (producing a Finding).

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::archive::gzip::GzipExtractor;
use crate::archive::tar::TarExtractor;
use crate::archive::xz::XzExtractor;
use crate::archive::zip::ZipExtractor;
use crate::archive::ArchiveExtractor;
use crate::error::ScanError;
use crate::finding::Finding;
use crate::job::Job;
use crate::mail::eml::EmlScanner;
use crate::mail::mbox;
use crate::mime::{self, ContentKind};
use crate::patterns::PatternSet;
use crate::queue::JobQueue;
use crate::scanners::pdf::PdfScanner;
use crate::scanners::text::PlainTextScanner;
use crate::scanners::{LeafScanner, ScanContext};

/// Everything the dispatcher needs that doesn't change per job: the
/// compiled patterns, the exclusion list, and the configured size limit.
pub struct DispatcherConfig {
    pub patterns: PatternSet,
    pub excluded_pans: HashSet<String>,
    pub size_limit_bytes: u64,
}

/// Pops jobs from `queue` until `queue.is_finished()`, classifying and
/// routing each one. Runs on a single worker thread (spec §5's one-worker
/// reference semantics) — call [`Dispatcher::run_once`] in a loop from
/// that thread, or use [`crate::engine::Engine`] to spawn it.
pub struct Dispatcher {
    queue: Arc<JobQueue>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(queue: Arc<JobQueue>, config: DispatcherConfig) -> Self {
        Dispatcher { queue, config }
    }

    /// Drain the queue until input is complete, in-progress work hits
    /// zero, and the queue is empty (or a stop was requested). Returns the
    /// accumulated findings in the order jobs completed, or a fatal
    /// [`ScanError`] if a queue invariant was violated (spec §4.8 "Fatal
    /// conditions" — abort the whole scan rather than continue on
    /// corrupted bookkeeping).
    pub fn run(&self) -> Result<Vec<Finding>, ScanError> {
        let mut findings = Vec::new();
        loop {
            if self.queue.should_stop() {
                break;
            }
            match self.queue.pop() {
                Some(job) => {
                    if let Some(finding) = self.process(job) {
                        findings.push(finding);
                    }
                    self.queue.mark_processed()?;
                }
                None => {
                    if self.queue.is_finished() {
                        break;
                    }
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
        findings.extend(self.queue.take_push_failures());
        Ok(findings)
    }

    /// Classify and route a single job. A container (archive, mbox) or an
    /// `Unknown` job produces no Finding — success is implicit, and its
    /// children (if any) are re-enqueued directly (spec §4.8 step 3). Only
    /// a leaf scan, or a failure at any stage, produces one.
    fn process(&self, mut job: Job) -> Option<Finding> {
        let abspath = job.abspath();
        let basename = job.basename.clone();

        if job.size() > self.config.size_limit_bytes {
            let err = ScanError::SizeExceeded {
                path: abspath.display().to_string(),
                size: job.size(),
                limit: self.config.size_limit_bytes,
            };
            warn!(path = %abspath.display(), "size exceeded");
            return Some(Finding::failure(abspath, basename, vec![err.to_string()]));
        }

        if let Err(e) = job.load() {
            let err = ScanError::ReadFailed { path: abspath.clone(), source: e };
            warn!(path = %abspath.display(), error = %err, "failed to read job content");
            return Some(Finding::failure(abspath, basename, vec![err.to_string()]));
        }

        let classification = match mime::classify(job.payload(), &job.extension()) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %abspath.display(), error = %e, "classification failed");
                return Some(Finding::failure(abspath, basename, vec![e.to_string()]));
            }
        };
        debug!(path = %abspath.display(), kind = ?classification.kind, "dispatching job");

        match classification.kind {
            ContentKind::Unknown => None,

            ContentKind::Zip => self.extract(job, &ZipExtractor),
            ContentKind::Tar => self.extract(job, &TarExtractor),
            ContentKind::Gzip => self.extract(job, &GzipExtractor),
            ContentKind::Xz => self.extract(job, &XzExtractor),

            ContentKind::Mbox => {
                let children = mbox::extract_children(&job);
                for child in children {
                    self.queue.push(child);
                }
                None
            }

            ContentKind::Eml => Some(self.scan_eml(job)),

            ContentKind::Pdf => Some(self.scan_with(&job, &PdfScanner::default())),

            ContentKind::Plaintext
            | ContentKind::Rtf
            | ContentKind::MsWord
            | ContentKind::MsExcel
            | ContentKind::MsPowerpoint => Some(self.scan_with(&job, &PlainTextScanner)),

            ContentKind::MsMsg => {
                let err = ScanError::DecodeFailed {
                    path: abspath.display().to_string(),
                    message: "no MsgDecoder configured (enable the `msg` feature and supply one)"
                        .to_string(),
                };
                Some(Finding::failure(abspath, basename, vec![err.to_string()]))
            }
            ContentKind::MsPst => {
                let err = ScanError::DecodeFailed {
                    path: abspath.display().to_string(),
                    message: "no PstDecoder configured (enable the `pst` feature and supply one)"
                        .to_string(),
                };
                Some(Finding::failure(abspath, basename, vec![err.to_string()]))
            }
        }
    }

    /// Extracts `job`'s members and re-enqueues them as children. Returns
    /// `None` on success (the container itself produces no Finding) and
    /// `Some(failure)` only if extraction itself failed.
    fn extract(&self, job: Job, extractor: &dyn ArchiveExtractor) -> Option<Finding> {
        let abspath = job.abspath();
        let basename = job.basename.clone();
        match extractor.extract(&job, self.config.size_limit_bytes) {
            Ok(children) => {
                for child in children {
                    self.queue.push(child);
                }
                None
            }
            Err(e) => {
                warn!(path = %abspath.display(), error = %e, "extraction failed");
                Some(Finding::failure(abspath, basename, vec![e.to_string()]))
            }
        }
    }

    fn scan_with(&self, job: &Job, scanner: &dyn LeafScanner) -> Finding {
        let ctx = ScanContext { patterns: &self.config.patterns, excluded_pans: &self.config.excluded_pans };
        let abspath = job.abspath();
        let basename = job.basename.clone();
        match scanner.scan(job.payload(), &ctx) {
            Ok(matches) => Finding::success(abspath, basename, matches),
            Err(e) => {
                warn!(path = %abspath.display(), error = %e, "leaf scan failed");
                Finding::failure(abspath, basename, vec![e.to_string()])
            }
        }
    }

    fn scan_eml(&self, job: Job) -> Finding {
        let ctx = ScanContext { patterns: &self.config.patterns, excluded_pans: &self.config.excluded_pans };
        let abspath = job.abspath();
        let basename = job.basename.clone();
        let scanner = EmlScanner::default();
        match scanner.scan(&job, &ctx) {
            Ok(result) => {
                for child in result.children {
                    self.queue.push(child);
                }
                Finding::success(abspath, basename, result.matches)
            }
            Err(e) => {
                warn!(path = %abspath.display(), error = %e, "eml scan failed");
                Finding::failure(abspath, basename, vec![e.to_string()])
            }
        }
    }
}
