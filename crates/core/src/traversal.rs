//! Traversal (spec §4.7/§9): walks the search root and seeds the job queue.
//! Uses `ignore::WalkBuilder` the way the teacher repo walks a project
//! tree, pruning excluded directories and the configured report
//! directories by name/prefix rather than descending into them and
//! discarding results after the fact.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::warn;

use crate::config::Config;
use crate::job::Job;
use crate::queue::JobQueue;

/// Walk `config.search_root`, pushing one `Job` per regular file onto
/// `queue`, then mark the queue's input complete. Symlinks are not
/// followed (a resolved Open Question — see DESIGN.md): following them
/// risks infinite loops across nested excluded trees, and the original
/// implementation does not follow them either.
pub fn seed_jobs(config: &Config, queue: &JobQueue) {
    let root = &config.search_root;

    if root.is_file() {
        seed_single_file(root, queue);
        queue.mark_input_complete();
        return;
    }

    let mut builder = WalkBuilder::new(root);
    builder.follow_links(false).standard_filters(false).hidden(false);

    let excluded_dirs = config.excluded_dirs.clone();
    let report_dirs = config.report_dirs.clone();
    builder.filter_entry(move |entry| {
        let Some(name) = entry.file_name().to_str() else { return true };
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            if excluded_dirs.contains(name) {
                return false;
            }
            if report_dirs.contains(entry.path()) {
                return false;
            }
        }
        true
    });

    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    seed_single_file(entry.path(), queue);
                }
            }
            Err(e) => {
                warn!(error = %e, "traversal entry error, skipping");
            }
        }
    }

    queue.mark_input_complete();
}

/// Builds a disk-backed `Job` via `stat` only — no read happens here. The
/// dispatcher reads the content itself, and only after its size gate
/// clears (spec §3/§4.8 step 1): this is what lets an oversized file be
/// rejected without ever loading it into memory.
fn seed_single_file(path: &Path, queue: &JobQueue) {
    match Job::from_path(path) {
        Ok(job) => queue.push(job),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to stat file during traversal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn seeds_one_job_per_file_and_marks_input_complete() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"world").unwrap();

        let config = Config::new(dir.path());
        let queue = JobQueue::new(0);
        seed_jobs(&config, &queue);

        assert_eq!(queue.enqueued_count(), 2);
    }

    #[test]
    fn excluded_directory_is_pruned() {
        let dir = tempfile::tempdir().unwrap();
        let excluded = dir.path().join(".git");
        std::fs::create_dir(&excluded).unwrap();
        std::fs::write(excluded.join("config"), b"secret").unwrap();
        std::fs::write(dir.path().join("visible.txt"), b"ok").unwrap();

        let config = Config::new(dir.path());
        let queue = JobQueue::new(0);
        seed_jobs(&config, &queue);

        assert_eq!(queue.enqueued_count(), 1);
    }

    #[test]
    fn single_file_root_seeds_exactly_one_job() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("single.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        f.write_all(b"content").unwrap();

        let config = Config::new(&file_path);
        let queue = JobQueue::new(0);
        seed_jobs(&config, &queue);

        assert_eq!(queue.enqueued_count(), 1);
    }
}
