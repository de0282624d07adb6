//! Parallel classification of many records using Rayon.
//!
//! A [`HighLevelBrowse`] catalog is read-only, so bulk indexing jobs can
//! classify records on every core without locking. [`topics_batch`] does this
//! for a slice of records, where each record is the list of call numbers
//! extracted from it.
//!
//! # Examples
//!
//! ```
//! use hlb::{HighLevelBrowse, IllegalRangePolicy};
//! use hlb::parallel::topics_batch;
//!
//! let xml = r#"<hlb><subject name="Science">
//!   <topic name="Mathematics"><call-numbers start="QA1" end="QA999"/></topic>
//! </subject></hlb>"#;
//! let hlb = HighLevelBrowse::from_xml(xml, IllegalRangePolicy::Warn)?;
//!
//! let records = vec![vec!["QA1"], vec!["Z1"], vec!["QA2", "QA3"]];
//! let topics = topics_batch(&hlb, &records);
//! assert_eq!(topics.len(), 3);
//! assert!(topics[1].is_empty());
//! # Ok::<(), hlb::HlbError>(())
//! ```

use crate::db::HighLevelBrowse;
use crate::indexing::{hlb3_fields, Hlb3Fields};
use crate::range::TopicPath;
use rayon::prelude::*;

/// Classify each record in parallel.
///
/// The output has one entry per record, in input order, holding the same
/// result as [`HighLevelBrowse::topics`] on that record's call numbers.
/// Work is spread over Rayon's global pool, which honors `RAYON_NUM_THREADS`.
pub fn topics_batch<S>(hlb: &HighLevelBrowse, records: &[Vec<S>]) -> Vec<Vec<TopicPath>>
where
    S: AsRef<str> + Sync,
{
    records
        .par_iter()
        .map(|call_numbers| hlb.topics(call_numbers))
        .collect()
}

/// Derive the `hlb3` index fields for each record in parallel.
pub fn hlb3_fields_batch<S>(hlb: &HighLevelBrowse, records: &[Vec<S>]) -> Vec<Hlb3Fields>
where
    S: AsRef<str> + Sync,
{
    records
        .par_iter()
        .map(|call_numbers| hlb3_fields(hlb, call_numbers))
        .collect()
}
