//! Finding model (spec §7, C9): the immutable-after-construction result of
//! scanning one job. Payload bytes are dropped at construction; only the
//! path, matches, and any errors survive.

use std::path::PathBuf;

use crate::pan::Pan;

/// Outcome of scanning a single job.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Status {
    Success,
    Failure,
}

/// One job's result. Constructed once; `matches` and `errors` are only
/// ever appended to during construction, never after.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Finding {
    pub abspath: PathBuf,
    pub basename: String,
    pub status: Status,
    pub matches: Vec<Pan>,
    pub errors: Vec<String>,
}

impl Finding {
    /// A successful scan, possibly with zero matches (a clean file still
    /// produces a `Success` Finding, per spec §7).
    pub fn success(abspath: PathBuf, basename: String, matches: Vec<Pan>) -> Self {
        Finding { abspath, basename, status: Status::Success, matches, errors: Vec::new() }
    }

    /// A scan that could not complete; carries one or more human-readable
    /// error strings instead of matches.
    pub fn failure(abspath: PathBuf, basename: String, errors: Vec<String>) -> Self {
        Finding { abspath, basename, status: Status::Failure, matches: Vec::new(), errors }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan::Brand;

    #[test]
    fn success_finding_with_matches_reports_them() {
        let pan = Pan::new(Brand::Visa, "4111111111111111");
        let f = Finding::success(PathBuf::from("/a/b.txt"), "b.txt".into(), vec![pan]);
        assert!(f.is_success());
        assert!(f.has_matches());
        assert!(f.errors.is_empty());
    }

    #[test]
    fn clean_scan_is_still_a_success_finding() {
        let f = Finding::success(PathBuf::from("/a/b.txt"), "b.txt".into(), vec![]);
        assert!(f.is_success());
        assert!(!f.has_matches());
    }

    #[test]
    fn failure_finding_carries_no_matches() {
        let f = Finding::failure(
            PathBuf::from("/a/bad.zip"),
            "bad.zip".into(),
            vec!["decompression failed".into()],
        );
        assert!(!f.is_success());
        assert!(!f.has_matches());
        assert_eq!(f.errors.len(), 1);
    }
}
