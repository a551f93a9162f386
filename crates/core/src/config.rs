//! Configuration (spec §9, C10): read-only scan parameters. Construct via
//! [`Config::new`] for the documented defaults, or [`Config::from_toml_str`]
//! to override them from a `panscan.toml`-shaped document. The original's
//! interactive INI prompt flow has no counterpart here — that's a CLI
//! surface concern, out of scope for this crate.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Default maximum payload size considered for scanning: 1 GiB.
pub const DEFAULT_SIZE_LIMIT_BYTES: u64 = 1024 * 1024 * 1024;

/// Default low-memory back-pressure threshold: 100 MiB available.
pub const DEFAULT_LOW_MEMORY_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;

/// Default for [`Config::mask_additional_pans`]: report matches masked.
pub const DEFAULT_MASK_ADDITIONAL_PANS: bool = true;

/// A `panscan.toml` document failed to parse. Distinct from [`ScanError`]:
/// a malformed config file is a routine, recoverable input error, not a
/// programming-invariant violation.
#[derive(Debug, Error)]
#[error("invalid config: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

fn default_excluded_dirs() -> HashSet<String> {
    [".git", "node_modules", "__pycache__", ".venv", "venv"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Read-only scan configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub search_root: PathBuf,
    pub size_limit_bytes: u64,
    pub low_memory_threshold_bytes: u64,
    pub excluded_dirs: HashSet<String>,
    pub excluded_pans: HashSet<String>,
    /// Directories the report itself may be written under; scanning never
    /// descends into these even if they fall under `search_root` (avoids a
    /// scan re-discovering its own prior output).
    pub report_dirs: HashSet<PathBuf>,
    /// When true, a masked form of every match is reported instead of the
    /// full PAN, including matches beyond the first for a given artifact.
    /// An escape hatch for operators who need raw values in the report.
    pub mask_additional_pans: bool,
}

/// Mirrors the subset of a `panscan.toml` document this crate honors; all
/// fields optional so a partial file only overrides what it names.
#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    size_limit_bytes: Option<u64>,
    low_memory_threshold_bytes: Option<u64>,
    excluded_dirs: Option<Vec<String>>,
    excluded_pans: Option<Vec<String>>,
    report_dirs: Option<Vec<PathBuf>>,
    mask_additional_pans: Option<bool>,
}

impl Config {
    /// Defaults per spec §9: 1 GiB size limit, the usual VCS/dependency
    /// directory exclusions, no PAN exclusions, no report directories.
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Config {
            search_root: search_root.into(),
            size_limit_bytes: DEFAULT_SIZE_LIMIT_BYTES,
            low_memory_threshold_bytes: DEFAULT_LOW_MEMORY_THRESHOLD_BYTES,
            excluded_dirs: default_excluded_dirs(),
            excluded_pans: HashSet::new(),
            report_dirs: HashSet::new(),
            mask_additional_pans: DEFAULT_MASK_ADDITIONAL_PANS,
        }
    }

    /// Start from defaults, then apply whatever `toml_str` overrides.
    pub fn from_toml_str(search_root: impl Into<PathBuf>, toml_str: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(toml_str)?;
        let mut config = Config::new(search_root);
        if let Some(limit) = parsed.size_limit_bytes {
            config.size_limit_bytes = limit;
        }
        if let Some(threshold) = parsed.low_memory_threshold_bytes {
            config.low_memory_threshold_bytes = threshold;
        }
        if let Some(dirs) = parsed.excluded_dirs {
            config.excluded_dirs = dirs.into_iter().collect();
        }
        if let Some(pans) = parsed.excluded_pans {
            config.excluded_pans = pans.into_iter().collect();
        }
        if let Some(dirs) = parsed.report_dirs {
            config.report_dirs = dirs.into_iter().collect();
        }
        if let Some(mask) = parsed.mask_additional_pans {
            config.mask_additional_pans = mask;
        }
        Ok(config)
    }
}
