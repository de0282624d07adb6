//! Configuration for building and persisting the catalog.
//!
//! This module provides [`HlbConfig`], which says where the taxonomy comes
//! from, where the snapshot lives, and what to do with taxonomy ranges that
//! cannot be normalized.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Published location of the High Level Browse taxonomy XML.
pub const DEFAULT_SOURCE_URL: &str = "https://www.lib.umich.edu/browse/categories/xml.php";

/// Environment variable overriding [`DEFAULT_SOURCE_URL`].
pub const SOURCE_URL_ENV: &str = "HLB_XML_ENDPOINT";

/// Environment variable naming the snapshot directory.
pub const SNAPSHOT_DIR_ENV: &str = "HLB_SNAPSHOT_DIR";

/// What to do with a taxonomy range whose bounds do not normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IllegalRangePolicy {
    /// Drop the range, logging only at debug level
    Skip,
    /// Drop the range and log a warning
    #[default]
    Warn,
    /// Fail the whole build
    Reject,
}

impl fmt::Display for IllegalRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Warn => write!(f, "warn"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Configuration for building, saving and loading a catalog.
///
/// # Examples
///
/// ```
/// use hlb::config::{HlbConfig, IllegalRangePolicy};
///
/// let config = HlbConfig::new()
///     .with_snapshot_dir("/var/lib/hlb")
///     .with_illegal_ranges(IllegalRangePolicy::Reject);
/// assert_eq!(config.snapshot_path().to_str(), Some("/var/lib/hlb/hlb.json.gz"));
/// ```
#[derive(Debug, Clone)]
pub struct HlbConfig {
    /// Where the taxonomy XML is fetched from.
    pub source_url: String,

    /// Directory holding the snapshot file.
    pub snapshot_dir: PathBuf,

    /// Handling of taxonomy ranges that fail normalization.
    pub illegal_ranges: IllegalRangePolicy,
}

impl Default for HlbConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            snapshot_dir: PathBuf::from("."),
            illegal_ranges: IllegalRangePolicy::default(),
        }
    }
}

impl HlbConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from `HLB_XML_ENDPOINT` and
    /// `HLB_SNAPSHOT_DIR`, falling back to defaults for unset variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(SOURCE_URL_ENV) {
            if !url.trim().is_empty() {
                config.source_url = url;
            }
        }
        if let Some(dir) = env::var_os(SNAPSHOT_DIR_ENV) {
            config.snapshot_dir = PathBuf::from(dir);
        }
        config
    }

    /// Sets the taxonomy source URL.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Sets the snapshot directory.
    #[must_use]
    pub fn with_snapshot_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.snapshot_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the illegal range policy.
    #[must_use]
    pub const fn with_illegal_ranges(mut self, policy: IllegalRangePolicy) -> Self {
        self.illegal_ranges = policy;
        self
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_dir.join(crate::snapshot::SNAPSHOT_FILENAME)
    }
}
