//! Report-input builder (spec §4.13, C14): sorts findings and packages
//! them with scan metadata. Stops short of rendering — text/JSON writers
//! are an external collaborator per spec §1.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::finding::Finding;

/// Scan-level summary data, independent of any individual Finding.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanMetadata {
    pub search_root: PathBuf,
    pub excluded_dirs: HashSet<String>,
    pub elapsed: Duration,
    pub total_pan_count: usize,
}

/// The sorted, packaged output of a scan: everything a report writer
/// needs and nothing it would need to recompute.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanReport {
    pub successes: Vec<Finding>,
    pub failures: Vec<Finding>,
    pub metadata: ScanMetadata,
}

/// Sort successes by `abspath`, failures by `basename` (spec §5's
/// ordering guarantee), and total the PAN count across sorted successes.
pub fn build_report(
    mut successes: Vec<Finding>,
    mut failures: Vec<Finding>,
    search_root: PathBuf,
    excluded_dirs: HashSet<String>,
    elapsed: Duration,
) -> ScanReport {
    successes.sort_by(|a, b| a.abspath.cmp(&b.abspath));
    failures.sort_by(|a, b| a.basename.cmp(&b.basename));

    let total_pan_count: usize = successes.iter().map(|f| f.matches.len()).sum();

    ScanReport {
        successes,
        failures,
        metadata: ScanMetadata { search_root, excluded_dirs, elapsed, total_pan_count },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(abspath: &str, basename: &str) -> Finding {
        Finding::success(PathBuf::from(abspath), basename.to_string(), Vec::new())
    }

    #[test]
    fn successes_sort_by_abspath() {
        let successes = vec![finding("/z/b.txt", "b.txt"), finding("/a/a.txt", "a.txt")];
        let report = build_report(successes, Vec::new(), PathBuf::from("/"), HashSet::new(), Duration::ZERO);
        assert_eq!(report.successes[0].abspath, PathBuf::from("/a/a.txt"));
        assert_eq!(report.successes[1].abspath, PathBuf::from("/z/b.txt"));
    }

    #[test]
    fn failures_sort_by_basename() {
        let failures = vec![
            Finding::failure(PathBuf::from("/x/z.bin"), "z.bin".into(), vec!["err".into()]),
            Finding::failure(PathBuf::from("/y/a.bin"), "a.bin".into(), vec!["err".into()]),
        ];
        let report = build_report(Vec::new(), failures, PathBuf::from("/"), HashSet::new(), Duration::ZERO);
        assert_eq!(report.failures[0].basename, "a.bin");
        assert_eq!(report.failures[1].basename, "z.bin");
    }

    #[test]
    fn total_pan_count_sums_matches_across_successes() {
        use crate::pan::{Brand, Pan};
        let mut a = finding("/a.txt", "a.txt");
        a.matches.push(Pan::new(Brand::Visa, "4111111111111111"));
        let mut b = finding("/b.txt", "b.txt");
        b.matches.push(Pan::new(Brand::Amex, "378282246310005"));
        b.matches.push(Pan::new(Brand::Visa, "4111111111111111"));

        let report = build_report(vec![a, b], Vec::new(), PathBuf::from("/"), HashSet::new(), Duration::ZERO);
        assert_eq!(report.metadata.total_pan_count, 3);
    }
}
