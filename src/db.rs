//! The classification catalog.
//!
//! [`HighLevelBrowse`] owns every range from one taxonomy build and answers
//! "which topics does this call number belong to". It is built once, from the
//! taxonomy XML or from a saved snapshot, and has no mutating methods, so a
//! single instance can be shared freely between threads.
//!
//! # Examples
//!
//! ```
//! use hlb::{HighLevelBrowse, IllegalRangePolicy};
//!
//! let xml = r#"<hlb>
//!   <subject name="Science">
//!     <topic name="Mathematics"><call-numbers start="QA1" end="QA999"/></topic>
//!   </subject>
//! </hlb>"#;
//!
//! let hlb = HighLevelBrowse::from_xml(xml, IllegalRangePolicy::Warn)?;
//! assert_eq!(hlb.topics(["QA1"]), vec![vec!["Science", "Mathematics"]]);
//! assert!(hlb.topics(["AAA11"]).is_empty());
//! # Ok::<(), hlb::HlbError>(())
//! ```

use crate::catalog::LetterIndex;
use crate::config::{HlbConfig, IllegalRangePolicy};
use crate::error::Result;
use crate::range::{CallNumberRange, TopicPath};
use crate::snapshot;
use crate::source::TaxonomySource;
use crate::taxonomy::TaxonomyDocument;
use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// Immutable call number to topic catalog.
#[derive(Debug)]
pub struct HighLevelBrowse {
    index: LetterIndex,
}

impl HighLevelBrowse {
    /// Build a catalog from ranges.
    ///
    /// Illegal ranges are ignored.
    #[must_use]
    pub fn new(ranges: Vec<CallNumberRange>) -> Self {
        let index = LetterIndex::new(ranges);
        tracing::info!(
            ranges = index.ranges().len(),
            buckets = index.populated_buckets(),
            "Built call number catalog"
        );
        Self { index }
    }

    /// Build a catalog from a parsed taxonomy document.
    ///
    /// # Errors
    ///
    /// Returns [`HlbError::IllegalRange`](crate::HlbError::IllegalRange) when
    /// `policy` is [`IllegalRangePolicy::Reject`] and some range in the
    /// document does not normalize.
    pub fn build_from_taxonomy(
        document: &TaxonomyDocument,
        policy: IllegalRangePolicy,
    ) -> Result<Self> {
        Ok(Self::new(document.ranges(policy)?))
    }

    /// Parse taxonomy XML and build a catalog from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML cannot be parsed, or if `policy` rejects
    /// an illegal range.
    pub fn from_xml(xml: &str, policy: IllegalRangePolicy) -> Result<Self> {
        let document = TaxonomyDocument::parse(xml, "<inline>")?;
        Self::build_from_taxonomy(&document, policy)
    }

    /// Read the taxonomy from `source` and build a catalog from it.
    ///
    /// The source is read exactly once; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns [`HlbError::Fetch`](crate::HlbError::Fetch) or
    /// [`HlbError::TaxonomyParse`](crate::HlbError::TaxonomyParse) naming the
    /// source location, or an illegal range error under
    /// [`IllegalRangePolicy::Reject`].
    pub fn fetch(source: &dyn TaxonomySource, policy: IllegalRangePolicy) -> Result<Self> {
        let location = source.location();
        tracing::info!(%location, "Fetching taxonomy");
        let xml = source.read_document()?;
        let document = TaxonomyDocument::parse(&xml, &location)?;
        Self::build_from_taxonomy(&document, policy)
    }

    /// Fetch and build as in [`fetch`](Self::fetch), then save a snapshot
    /// into `config.snapshot_dir`.
    ///
    /// # Errors
    ///
    /// Returns any error from fetching, building or saving.
    pub fn fetch_and_save(source: &dyn TaxonomySource, config: &HlbConfig) -> Result<Self> {
        let hlb = Self::fetch(source, config.illegal_ranges)?;
        hlb.save(&config.snapshot_dir)?;
        Ok(hlb)
    }

    /// Load a catalog from the snapshot in `dir`.
    ///
    /// The stored keys are used as-is; nothing is normalized again.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is missing, unreadable or corrupt.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let ranges = snapshot::load(dir)?;
        tracing::info!(dir = %dir.display(), ranges = ranges.len(), "Loaded snapshot");
        Ok(Self::new(ranges))
    }

    /// Save a snapshot of every range into `dir`, replacing any previous
    /// snapshot there.
    ///
    /// Returns the path of the snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = snapshot::save(dir.as_ref(), self.ranges())?;
        tracing::info!(path = %path.display(), ranges = self.len(), "Saved snapshot");
        Ok(path)
    }

    /// Topic paths for any number of raw call numbers.
    ///
    /// The result is the union over all inputs with duplicates removed,
    /// keeping the order in which each path was first found. Call numbers
    /// that do not normalize or match no range contribute nothing.
    pub fn topics<I, S>(&self, raw_call_numbers: I) -> Vec<TopicPath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw_call_numbers
            .into_iter()
            .flat_map(|raw| self.index.topics_for(raw.as_ref()))
            .collect::<IndexSet<TopicPath>>()
            .into_iter()
            .collect()
    }

    /// Topic paths for a single raw call number.
    #[must_use]
    pub fn topics_for(&self, raw_call_number: &str) -> Vec<TopicPath> {
        self.index.topics_for(raw_call_number)
    }

    /// Every range in the catalog, in build order.
    pub fn ranges(&self) -> impl Iterator<Item = &CallNumberRange> {
        self.index.ranges().iter().map(|r| &**r)
    }

    /// Number of ranges in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.ranges().len()
    }

    /// Whether the catalog holds no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.ranges().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::HlbError;

    const XML: &str = r#"<hlb>
        <subject name="Science">
          <topic name="Mathematics"><call-numbers start="QA1" end="QA999"/></topic>
          <topic name="Computer Science"><call-numbers start="QA75" end="QA76.95"/></topic>
        </subject>
        <subject name="Humanities">
          <topic name="Linguistics"><call-numbers start="P1" end="P1091"/></topic>
        </subject>
      </hlb>"#;

    fn path(labels: &[&str]) -> TopicPath {
        labels.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_topics_single() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        assert_eq!(hlb.topics(["QA1"]), vec![path(&["Science", "Mathematics"])]);
        assert_eq!(hlb.topics_for("P11"), vec![path(&["Humanities", "Linguistics"])]);
    }

    #[test]
    fn test_topics_union_across_inputs() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        let combined = hlb.topics(["QA76.73", "QA1", "P11", "garbage"]);
        assert_eq!(
            combined,
            vec![
                path(&["Science", "Mathematics"]),
                path(&["Science", "Computer Science"]),
                path(&["Humanities", "Linguistics"]),
            ]
        );
    }

    #[test]
    fn test_topics_empty_input() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        assert!(hlb.topics(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_fetch_reports_parse_location() {
        let source = StaticSource::new("http://example.org/hlb.xml", "<hlb><subject");
        match HighLevelBrowse::fetch(&source, IllegalRangePolicy::Warn) {
            Err(HlbError::TaxonomyParse { location, .. }) => {
                assert_eq!(location, "http://example.org/hlb.xml");
            }
            other => panic!("expected TaxonomyParse, got {other:?}"),
        }
    }

    #[test]
    fn test_len_and_ranges() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        assert_eq!(hlb.len(), 3);
        assert!(!hlb.is_empty());
        let raw: Vec<&str> = hlb.ranges().map(CallNumberRange::min_raw).collect();
        assert_eq!(raw, vec!["QA1", "QA75", "P1"]);
    }

    #[test]
    fn test_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HighLevelBrowse>();
    }
}
