//! Error types for High Level Browse operations.
//!
//! This module provides the [`HlbError`] type for all fallible operations in
//! the crate and the [`Result`] convenience type.
//!
//! A call number that cannot be normalized is *not* an error: normalization
//! returns `None` and lookups simply yield no topics.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for all High Level Browse operations.
///
/// Represents the conditions that can occur while obtaining the taxonomy
/// document, building the catalog from it, or persisting and restoring a
/// snapshot of the catalog.
#[derive(Error, Debug)]
pub enum HlbError {
    /// The taxonomy document could not be read or fetched.
    #[error("Could not fetch taxonomy from '{location}': {message}")]
    Fetch {
        /// Where the document was being read from (URL or file path)
        location: String,
        /// Underlying failure
        message: String,
    },

    /// The taxonomy document was read but is not valid taxonomy XML.
    #[error("Could not parse taxonomy from '{location}': {message}")]
    TaxonomyParse {
        /// Where the document was read from
        location: String,
        /// Underlying parse failure
        message: String,
    },

    /// A call-number range in the taxonomy failed to normalize and the
    /// configured policy rejects such ranges.
    #[error("Illegal call number range [{min_raw} - {max_raw}] under {topic_array:?}")]
    IllegalRange {
        /// Raw lower bound as it appeared in the taxonomy
        min_raw: String,
        /// Raw upper bound as it appeared in the taxonomy
        max_raw: String,
        /// Topic path the range was attached to
        topic_array: Vec<String>,
    },

    /// A persisted snapshot is corrupt or in an unrecognized format.
    #[error("Invalid snapshot {}: {message}", path.display())]
    Snapshot {
        /// Snapshot file being read
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`HlbError`].
pub type Result<T> = std::result::Result<T, HlbError>;
