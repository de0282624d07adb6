//! Letter-bucketed range catalog.
//!
//! Ranges are split into 26 buckets by the first letter of their normalized
//! lower bound, and each bucket gets its own [`RangeTree`]. A lookup
//! normalizes the call number once, picks the bucket for its first letter and
//! runs a point query against that bucket only.

use crate::normalize::normalize;
use crate::range::{CallNumberRange, TopicPath};
use crate::range_tree::RangeTree;
use indexmap::IndexSet;
use std::sync::Arc;

/// An indexed set of ranges that all share one first letter.
#[derive(Debug, Default)]
pub struct CallNumberRangeSet {
    tree: RangeTree<Arc<CallNumberRange>>,
}

impl CallNumberRangeSet {
    /// Build a set from the given ranges.
    #[must_use]
    pub fn new(ranges: Vec<Arc<CallNumberRange>>) -> Self {
        Self {
            tree: RangeTree::new(ranges),
        }
    }

    /// Ranges containing the already-normalized key `key`.
    #[must_use]
    pub fn ranges_for_key(&self, key: &str) -> Vec<&CallNumberRange> {
        self.tree
            .search_point(key)
            .into_iter()
            .map(|r| &**r)
            .collect()
    }

    /// Topic paths for a raw call number, deduplicated in first-seen order.
    ///
    /// A call number that does not normalize has no topics.
    #[must_use]
    pub fn topics_for(&self, raw: &str) -> Vec<TopicPath> {
        match normalize(raw) {
            Some(key) => dedup_topics(self.ranges_for_key(&key)),
            None => Vec::new(),
        }
    }

    /// Number of ranges in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether this set holds no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// The 26 per-letter range sets plus the complete range list they were built
/// from.
///
/// Illegal ranges are left out of both. The range list is kept in its
/// original order so that a saved snapshot reflects the taxonomy.
#[derive(Debug)]
pub struct LetterIndex {
    all: Vec<Arc<CallNumberRange>>,
    buckets: Vec<CallNumberRangeSet>,
}

impl LetterIndex {
    /// Distribute `ranges` into per-letter buckets.
    ///
    /// Ranges whose first letter is not one of `a`..=`z` stay in the range
    /// list but are not reachable through lookups.
    #[must_use]
    pub fn new(ranges: Vec<CallNumberRange>) -> Self {
        let all: Vec<Arc<CallNumberRange>> = ranges
            .into_iter()
            .filter(|r| !r.is_illegal())
            .map(Arc::new)
            .collect();

        let mut grouped: Vec<Vec<Arc<CallNumberRange>>> = vec![Vec::new(); 26];
        for range in &all {
            if let Some(slot) = range.firstletter().and_then(bucket_index) {
                grouped[slot].push(Arc::clone(range));
            }
        }

        let buckets = grouped.into_iter().map(CallNumberRangeSet::new).collect();
        Self { all, buckets }
    }

    /// The range set for `letter`, if it is an ASCII letter.
    #[must_use]
    pub fn bucket(&self, letter: char) -> Option<&CallNumberRangeSet> {
        bucket_index(letter).and_then(|i| self.buckets.get(i))
    }

    /// Topic paths for a raw call number, deduplicated in first-seen order.
    ///
    /// Returns an empty list when the call number does not normalize or its
    /// normalized key does not start with a letter.
    #[must_use]
    pub fn topics_for(&self, raw: &str) -> Vec<TopicPath> {
        let Some(key) = normalize(raw) else {
            return Vec::new();
        };
        match key.chars().next().and_then(|c| self.bucket(c)) {
            Some(set) => dedup_topics(set.ranges_for_key(&key)),
            None => Vec::new(),
        }
    }

    /// Every legal range, in the order it was supplied.
    #[must_use]
    pub fn ranges(&self) -> &[Arc<CallNumberRange>] {
        &self.all
    }

    /// Number of non-empty buckets.
    #[must_use]
    pub fn populated_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }
}

fn bucket_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    ('a'..='z').position(|c| c == lower)
}

fn dedup_topics<'a>(ranges: impl IntoIterator<Item = &'a CallNumberRange>) -> Vec<TopicPath> {
    ranges
        .into_iter()
        .map(|r| r.topic_array().to_vec())
        .collect::<IndexSet<TopicPath>>()
        .into_iter()
        .collect()
}
