//! Job model (spec §3/§5, C7): the unit of work the queue and dispatcher
//! move around. Carries enough path provenance to survive arbitrary
//! nesting. A disk-backed job's payload is `optional` per spec §3: it is
//! `stat`'d, not read, until the dispatcher's size gate clears it.

use std::io;
use std::path::{Path, PathBuf};

/// Either the bytes themselves (archive members, mail attachments — these
/// are already in memory by the time a child `Job` exists) or a path plus
/// its `stat`-reported size, for a job seeded directly from disk.
#[derive(Debug, Clone)]
enum PayloadSource {
    Bytes(Vec<u8>),
    Disk { path: PathBuf, size: u64 },
}

/// One unit of scan work: a file (or archive member, or mail attachment)
/// plus the provenance trail of where it came from.
#[derive(Debug, Clone)]
pub struct Job {
    /// File name alone, e.g. `invoice.pdf`.
    pub basename: String,
    /// Logical parent path. For a file on disk this is its containing
    /// directory; for a child job produced by an extractor, this is the
    /// parent's `abspath` with the member name appended, so provenance
    /// survives arbitrary nesting (spec §5, provenance invariant).
    pub dirname: PathBuf,
    source: PayloadSource,
}

impl Job {
    /// Build a job whose payload is already in memory (archive members,
    /// mail attachments, and anything else not read from disk directly).
    pub fn new(basename: impl Into<String>, dirname: impl Into<PathBuf>, payload: Vec<u8>) -> Self {
        Job { basename: basename.into(), dirname: dirname.into(), source: PayloadSource::Bytes(payload) }
    }

    /// Build a job for a file on disk: `stat`s it for its size but does
    /// not read its contents. `size()` is available immediately; call
    /// [`Job::load`] to read the bytes once the dispatcher's size gate has
    /// cleared (spec §4.8 step 1).
    pub fn from_path(path: &Path) -> Result<Self, io::Error> {
        let size = std::fs::metadata(path)?.len();
        let basename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let dirname = path.parent().unwrap_or(Path::new("")).to_path_buf();
        Ok(Job { basename, dirname, source: PayloadSource::Disk { path: path.to_path_buf(), size } })
    }

    /// `dirname` joined with `basename`: the full logical path reported in
    /// findings, unique per job regardless of nesting depth.
    pub fn abspath(&self) -> PathBuf {
        self.dirname.join(&self.basename)
    }

    /// Extension, lowercased, with leading dot (e.g. `.eml`); empty string
    /// if the basename has none.
    pub fn extension(&self) -> String {
        Path::new(&self.basename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// The job's size without reading its content: the in-memory length,
    /// or the `stat`-reported size for a disk-backed job.
    pub fn size(&self) -> u64 {
        match &self.source {
            PayloadSource::Bytes(b) => b.len() as u64,
            PayloadSource::Disk { size, .. } => *size,
        }
    }

    /// Read the payload into memory if it hasn't been already. Callers
    /// must only do this after `size()` has cleared the size gate —
    /// that's the entire point of keeping disk-backed payloads unread
    /// until this point.
    pub fn load(&mut self) -> Result<&[u8], io::Error> {
        if let PayloadSource::Disk { path, .. } = &self.source {
            let bytes = std::fs::read(path)?;
            self.source = PayloadSource::Bytes(bytes);
        }
        Ok(self.payload())
    }

    /// The loaded payload bytes. Panics if this is a disk-backed job whose
    /// [`Job::load`] has not yet been called — every code path that reads
    /// a job's content runs strictly after the dispatcher's `load()` call.
    pub fn payload(&self) -> &[u8] {
        match &self.source {
            PayloadSource::Bytes(b) => b,
            PayloadSource::Disk { .. } => panic!("Job::payload called before Job::load"),
        }
    }

    /// Build a child job whose `dirname` is this job's `abspath` — the
    /// mechanism that keeps provenance intact through zip-in-tar-in-gzip
    /// and mail-attachment nesting alike. Children are always in-memory:
    /// they come from an already-loaded parent's extracted bytes.
    pub fn child(&self, member_name: impl Into<String>, payload: Vec<u8>) -> Job {
        Job::new(member_name, self.abspath(), payload)
    }
}
