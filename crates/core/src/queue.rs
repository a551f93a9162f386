//! Job queue (spec §5, C7): a FIFO of pending `Job`s plus the shared state
//! the dispatcher, producer, and caller all observe concurrently.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sysinfo::System;
use tracing::warn;

use crate::error::ScanError;
use crate::finding::Finding;
use crate::job::Job;

/// Poll interval while waiting for memory headroom before enqueuing.
const MEMORY_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Give up waiting for headroom after this long and fail the enqueue
/// rather than risk exhausting memory (spec §4.7).
const MEMORY_WAIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Thread-safe FIFO with the counters needed to answer "is the scan
/// finished" without a dedicated coordinator.
pub struct JobQueue {
    items: Mutex<VecDeque<Job>>,
    enqueued: AtomicUsize,
    in_progress: AtomicUsize,
    processed: AtomicUsize,
    input_complete: AtomicBool,
    stop: AtomicBool,
    /// Zero disables back-pressure entirely (used by tests that don't want
    /// a live `sysinfo` read on every push); any other value enables the
    /// per-job headroom check below.
    low_memory_threshold_bytes: u64,
    /// Findings for jobs that never made it into the queue because
    /// back-pressure rejected them (spec §7: "Job-queue back-pressure
    /// timeout → failure Finding for the offending candidate child").
    push_failures: Mutex<Vec<Finding>>,
}

impl JobQueue {
    pub fn new(low_memory_threshold_bytes: u64) -> Self {
        JobQueue {
            items: Mutex::new(VecDeque::new()),
            enqueued: AtomicUsize::new(0),
            in_progress: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            input_complete: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            low_memory_threshold_bytes,
            push_failures: Mutex::new(Vec::new()),
        }
    }

    /// Enqueue `job`, subject to the back-pressure policy of spec §4.7: fail
    /// outright if its payload exceeds total system memory, block (polling)
    /// while it is at least half of currently-free memory, and fail if that
    /// wait exceeds `MEMORY_WAIT_TIMEOUT`. A rejected job is not enqueued;
    /// instead it is recorded as a failure Finding, retrievable via
    /// [`JobQueue::take_push_failures`], for "the offending candidate
    /// child" per spec §7.
    pub fn push(&self, job: Job) {
        if let Err(err) = self.ensure_memory_ready(job.size()) {
            warn!(path = %job.abspath().display(), error = %err, "job rejected by back-pressure");
            let finding = Finding::failure(job.abspath(), job.basename.clone(), vec![err.to_string()]);
            self.push_failures.lock().expect("queue mutex poisoned").push(finding);
            return;
        }
        self.items.lock().expect("queue mutex poisoned").push_back(job);
        self.enqueued.fetch_add(1, Ordering::SeqCst);
    }

    fn ensure_memory_ready(&self, payload_size: u64) -> Result<(), ScanError> {
        if self.low_memory_threshold_bytes == 0 {
            return Ok(());
        }

        let mut sys = System::new();
        sys.refresh_memory();
        if payload_size > sys.total_memory() {
            return Err(ScanError::InsufficientMemory { path: String::new(), size: payload_size });
        }

        let start = Instant::now();
        loop {
            sys.refresh_memory();
            if payload_size < sys.available_memory() / 2 {
                return Ok(());
            }
            if start.elapsed() >= MEMORY_WAIT_TIMEOUT {
                return Err(ScanError::InsufficientMemory { path: String::new(), size: payload_size });
            }
            std::thread::sleep(MEMORY_POLL_INTERVAL);
        }
    }

    /// Drain and return any findings recorded for jobs back-pressure
    /// rejected. Call once the queue is finished.
    pub fn take_push_failures(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.push_failures.lock().expect("queue mutex poisoned"))
    }

    /// Pop the next job, if any, marking it in-progress.
    pub fn pop(&self) -> Option<Job> {
        let job = self.items.lock().expect("queue mutex poisoned").pop_front();
        if job.is_some() {
            self.in_progress.fetch_add(1, Ordering::SeqCst);
        }
        job
    }

    /// Mark one in-progress job as processed (called once per popped job,
    /// regardless of success or failure). Returns a fatal [`ScanError`] if
    /// called with no job in progress — a queue-invariant violation that
    /// should never happen given the dispatcher's pop/process/mark loop.
    pub fn mark_processed(&self) -> Result<(), ScanError> {
        let prev = self.in_progress.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if prev.is_err() {
            return Err(ScanError::Invariant("mark_processed called with no job in progress".to_string()));
        }
        self.processed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Caller (traversal) signals no further jobs will ever be pushed.
    pub fn mark_input_complete(&self) {
        self.input_complete.store(true, Ordering::SeqCst);
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// A scan is finished once the producer is done, the queue is empty,
    /// and nothing is mid-flight — or a stop was requested.
    pub fn is_finished(&self) -> bool {
        if self.stop.load(Ordering::SeqCst) {
            return true;
        }
        self.input_complete.load(Ordering::SeqCst)
            && self.in_progress.load(Ordering::SeqCst) == 0
            && self.items.lock().expect("queue mutex poisoned").is_empty()
    }

    pub fn enqueued_count(&self) -> usize {
        self.enqueued.load(Ordering::SeqCst)
    }

    pub fn processed_count(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn in_progress_count(&self) -> usize {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("queue mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
