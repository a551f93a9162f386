//! Scan engine facade (spec §4.12, C13): ties traversal, the job queue, and
//! the dispatcher together behind a single `run()` call.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info_span;

use crate::config::Config;
use crate::dispatcher::{Dispatcher, DispatcherConfig};
use crate::error::ScanError;
use crate::finding::Finding;
use crate::patterns::PatternSet;
use crate::queue::JobQueue;
use crate::report::{build_report, ScanReport};
use crate::traversal;

pub struct Engine {
    config: Config,
    patterns: PatternSet,
}

impl Engine {
    pub fn new(config: Config, patterns: PatternSet) -> Self {
        Engine { config, patterns }
    }

    /// Seed the queue from the search root, run the single dispatcher
    /// worker to completion, and package the results into a `ScanReport`.
    /// Returns a fatal [`ScanError`] only if a queue invariant was
    /// violated (spec §4.8 "Fatal conditions") — per-job failures are
    /// captured in the report's `failures` list instead.
    pub fn run(&self) -> Result<ScanReport, ScanError> {
        let _span = info_span!("scan", root = %self.config.search_root.display()).entered();
        let start = Instant::now();

        let queue = Arc::new(JobQueue::new(self.config.low_memory_threshold_bytes));
        let dispatcher_config = DispatcherConfig {
            patterns: self.patterns.clone(),
            excluded_pans: self.config.excluded_pans.clone(),
            size_limit_bytes: self.config.size_limit_bytes,
        };
        let dispatcher = Dispatcher::new(queue.clone(), dispatcher_config);

        // Traversal runs on this thread; the dispatcher runs on its own,
        // per spec §5's single-background-worker contract.
        let worker = std::thread::spawn(move || dispatcher.run());

        traversal::seed_jobs(&self.config, &queue);

        let findings: Vec<Finding> = worker.join().expect("dispatcher thread panicked")?;
        let elapsed = start.elapsed();

        Ok(build(&self.config, findings, elapsed))
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

fn build(config: &Config, findings: Vec<Finding>, elapsed: Duration) -> ScanReport {
    let (successes, failures): (Vec<_>, Vec<_>) = findings.into_iter().partition(|f| f.is_success());
    let excluded_dirs: HashSet<String> = config.excluded_dirs.clone();
    build_report(successes, failures, config.search_root.clone(), excluded_dirs, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s5_nested_zip_preserves_provenance_through_the_engine() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();

        let mut inner_zip_bytes = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut inner_zip_bytes));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("secret.txt", options).unwrap();
            writer.write_all(b"card 4111 1111 1111 1111").unwrap();
            writer.finish().unwrap();
        }

        let mut outer_zip_bytes = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut outer_zip_bytes));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("inner.zip", options).unwrap();
            writer.write_all(&inner_zip_bytes).unwrap();
            writer.finish().unwrap();
        }

        std::fs::write(dir.path().join("outer.zip"), &outer_zip_bytes).unwrap();

        let config = Config::new(dir.path());
        let engine = Engine::new(config, PatternSet::new());
        let report = engine.run().unwrap();

        // Exactly one Finding for the nested file: the outer.zip and
        // inner.zip containers themselves produce none (spec §4.8 step 3).
        assert_eq!(report.successes.len(), 1);
        assert!(report.failures.is_empty());

        let leaf = report
            .successes
            .iter()
            .find(|f| f.basename == "secret.txt")
            .expect("nested PAN file should have been scanned");
        assert_eq!(leaf.matches.len(), 1);
        assert!(leaf.abspath.to_string_lossy().contains("outer.zip"));
        assert!(leaf.abspath.to_string_lossy().contains("inner.zip"));
    }

    #[test]
    fn scenario_s5_two_leaves_across_one_level_of_nesting_yield_exactly_two_findings() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();

        let mut nested_zip_bytes = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut nested_zip_bytes));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("b.txt", options).unwrap();
            writer.write_all(b"378282246310005").unwrap();
            writer.finish().unwrap();
        }

        let mut outer_zip_bytes = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut outer_zip_bytes));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("a.txt", options).unwrap();
            writer.write_all(b"4111 1111 1111 1111").unwrap();
            writer.start_file("nested.zip", options).unwrap();
            writer.write_all(&nested_zip_bytes).unwrap();
            writer.finish().unwrap();
        }

        std::fs::write(dir.path().join("outer.zip"), &outer_zip_bytes).unwrap();

        let config = Config::new(dir.path());
        let engine = Engine::new(config, PatternSet::new());
        let report = engine.run().unwrap();

        // a.txt and nested.zip/b.txt are the only leaves; outer.zip and
        // nested.zip produce no Finding of their own.
        assert_eq!(report.successes.len(), 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn scenario_s8_excluded_directory_produces_no_findings_within_it() {
        let dir = tempfile::tempdir().unwrap();
        let excluded = dir.path().join(".git");
        std::fs::create_dir(&excluded).unwrap();
        std::fs::write(excluded.join("config"), b"card 4111 1111 1111 1111").unwrap();
        std::fs::write(dir.path().join("visible.txt"), b"nothing interesting").unwrap();

        let config = Config::new(dir.path());
        let engine = Engine::new(config, PatternSet::new());
        let report = engine.run().unwrap();

        assert!(report.successes.iter().all(|f| !f.abspath.to_string_lossy().contains(".git")));
    }

    #[test]
    fn clean_tree_yields_success_findings_with_zero_total_pan_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"nothing sensitive here").unwrap();

        let config = Config::new(dir.path());
        let engine = Engine::new(config, PatternSet::new());
        let report = engine.run().unwrap();

        assert_eq!(report.metadata.total_pan_count, 0);
        assert!(report.successes.iter().all(|f| f.is_success()));
    }
}
