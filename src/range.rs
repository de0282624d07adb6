//! Call number ranges labeled with a topic path.
//!
//! A [`CallNumberRange`] keeps the raw bounds exactly as they appeared in the
//! taxonomy alongside their normalized keys. The upper key carries the
//! [`SENTINEL`](crate::normalize::SENTINEL) so that it covers every call
//! number extending the raw upper bound.

use crate::normalize::{normalize, normalize_upper_bound};
use crate::range_tree::Interval;
use std::cmp::Ordering;
use std::fmt;

/// Root-to-leaf labels in the subject taxonomy, e.g. `["Science", "Mathematics"]`.
pub type TopicPath = Vec<String>;

/// A normalized call number interval attached to a topic path.
///
/// Ranges are immutable once built. A range whose bounds could not be
/// normalized is *illegal*: it keeps its raw bounds for diagnostics but has
/// empty keys and no first letter, and it is never placed in a catalog.
///
/// # Examples
///
/// ```
/// use hlb::CallNumberRange;
///
/// let range = CallNumberRange::new("QA1", "QA999", vec!["Science".into(), "Mathematics".into()]);
/// assert_eq!(range.min_key(), "qa11");
/// assert_eq!(range.max_key(), "qa3999~");
/// assert_eq!(range.firstletter(), Some('q'));
/// assert!(range.contains("qa276.73 j38"));
/// assert_eq!(range.to_string(), "[QA1 - QA999]");
/// ```
#[derive(Debug, Clone)]
pub struct CallNumberRange {
    min: String,
    max: String,
    min_raw: String,
    max_raw: String,
    firstletter: Option<char>,
    topic_array: TopicPath,
    illegal: bool,
}

impl CallNumberRange {
    /// Create a range from raw lower and upper bounds.
    ///
    /// Never fails: if either bound does not normalize, the range is marked
    /// illegal (see [`is_illegal`](Self::is_illegal)).
    #[must_use]
    pub fn new(
        min_raw: impl Into<String>,
        max_raw: impl Into<String>,
        topic_array: TopicPath,
    ) -> Self {
        let min_raw = min_raw.into();
        let max_raw = max_raw.into();
        let min = normalize(&min_raw);
        let max = normalize_upper_bound(&max_raw);

        match (min, max) {
            (Some(min), Some(max)) => {
                let firstletter = min.chars().next();
                Self {
                    min,
                    max,
                    min_raw,
                    max_raw,
                    firstletter,
                    topic_array,
                    illegal: false,
                }
            }
            _ => Self {
                min: String::new(),
                max: String::new(),
                min_raw,
                max_raw,
                firstletter: None,
                topic_array,
                illegal: true,
            },
        }
    }

    /// Create a range covering a single call number or bare class prefix.
    ///
    /// `CallNumberRange::single("P", ..)` covers everything filed under `P`.
    #[must_use]
    pub fn single(value: impl Into<String>, topic_array: TopicPath) -> Self {
        let value = value.into();
        Self::new(value.clone(), value, topic_array)
    }

    /// Rebuild a range from already-normalized keys without normalizing again.
    pub(crate) fn from_parts(
        min: String,
        max: String,
        min_raw: String,
        max_raw: String,
        firstletter: Option<char>,
        topic_array: TopicPath,
    ) -> Self {
        Self {
            min,
            max,
            min_raw,
            max_raw,
            firstletter,
            topic_array,
            illegal: false,
        }
    }

    /// Normalized lower bound.
    #[must_use]
    pub fn min_key(&self) -> &str {
        &self.min
    }

    /// Normalized upper bound, including the trailing sentinel.
    #[must_use]
    pub fn max_key(&self) -> &str {
        &self.max
    }

    /// Lower bound as given.
    #[must_use]
    pub fn min_raw(&self) -> &str {
        &self.min_raw
    }

    /// Upper bound as given.
    #[must_use]
    pub fn max_raw(&self) -> &str {
        &self.max_raw
    }

    /// First character of the normalized lower bound; the catalog bucket key.
    #[must_use]
    pub fn firstletter(&self) -> Option<char> {
        self.firstletter
    }

    /// Topic path this range classifies into.
    #[must_use]
    pub fn topic_array(&self) -> &[String] {
        &self.topic_array
    }

    /// Whether either bound failed to normalize.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        self.illegal
    }

    /// Whether the normalized key `key` falls inside this range.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        !self.illegal && self.min.as_str() <= key && self.max.as_str() >= key
    }

    /// Whether `other` lies entirely inside this range.
    #[must_use]
    pub fn surrounds(&self, other: &CallNumberRange) -> bool {
        self.min <= other.min && self.max >= other.max
    }
}

impl Interval for CallNumberRange {
    type Key = str;

    fn start(&self) -> &str {
        &self.min
    }

    fn end(&self) -> &str {
        &self.max
    }
}

/// Two ranges are equal when their keys and topic paths match; the raw
/// strings are not compared.
impl PartialEq for CallNumberRange {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max && self.topic_array == other.topic_array
    }
}

impl Eq for CallNumberRange {}

/// Ordered by `(min, max)`, with the topic path breaking ties.
impl Ord for CallNumberRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.min
            .cmp(&other.min)
            .then_with(|| self.max.cmp(&other.max))
            .then_with(|| self.topic_array.cmp(&other.topic_array))
    }
}

impl PartialOrd for CallNumberRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CallNumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.min_raw, self.max_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(labels: &[&str]) -> TopicPath {
        labels.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_new_normalizes_bounds() {
        let range = CallNumberRange::new("QA1", "QA999", topics(&["Science", "Mathematics"]));
        assert!(!range.is_illegal());
        assert_eq!(range.min_key(), "qa11");
        assert_eq!(range.max_key(), "qa3999~");
        assert_eq!(range.min_raw(), "QA1");
        assert_eq!(range.max_raw(), "QA999");
        assert_eq!(range.firstletter(), Some('q'));
        assert_eq!(range.topic_array(), ["Science", "Mathematics"]);
    }

    #[test]
    fn test_illegal_when_bound_fails() {
        let bad_min = CallNumberRange::new("1234", "QA999", topics(&["X"]));
        assert!(bad_min.is_illegal());
        assert_eq!(bad_min.firstletter(), None);
        assert_eq!(bad_min.min_raw(), "1234");

        let bad_max = CallNumberRange::new("QA1", "", topics(&["X"]));
        assert!(bad_max.is_illegal());
        assert!(!bad_max.contains("qa11"));
    }

    #[test]
    fn test_single_prefix_range() {
        let range = CallNumberRange::single("P", topics(&["Humanities", "Linguistics"]));
        assert_eq!(range.min_key(), "p");
        assert_eq!(range.max_key(), "p~");
        assert!(range.contains("p211"));
        assert!(range.contains("pc41100"));
        assert!(!range.contains("q11"));
    }

    #[test]
    fn test_key_getters_on_owned_ranges() {
        let low = CallNumberRange::new("P1", "P1091", topics(&["Humanities"]));
        let high = CallNumberRange::new("QA1", "QA999", topics(&["Science"]));
        assert_eq!(low.min_key(), "p11");
        assert_eq!(high.max_key(), "qa3999~");

        let smaller = low.clone().min(high.clone());
        let larger = low.max(high);
        assert_eq!(smaller.min_key(), "p11");
        assert_eq!(larger.max_key(), "qa3999~");
    }

    #[test]
    fn test_contains_inclusive_bounds() {
        let range = CallNumberRange::new("QA1", "QA999", topics(&["Science"]));
        assert!(range.contains("qa11"));
        assert!(range.contains("qa3999"));
        assert!(range.contains("qa3999 b2 1990"));
        assert!(!range.contains("qa41000"));
        assert!(!range.contains("q"));
    }

    #[test]
    fn test_surrounds() {
        let outer = CallNumberRange::new("QA1", "QA999", topics(&["Science"]));
        let inner = CallNumberRange::new("QA76", "QA76.9", topics(&["Science", "Computing"]));
        assert!(outer.surrounds(&inner));
        assert!(!inner.surrounds(&outer));
    }

    #[test]
    fn test_equality_ignores_raw_strings() {
        let a = CallNumberRange::new("QA1", "QA999", topics(&["Science"]));
        let b = CallNumberRange::new("qa 1", "qa  999", topics(&["Science"]));
        let c = CallNumberRange::new("QA1", "QA999", topics(&["Other"]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ordering_by_bounds() {
        let mut ranges = vec![
            CallNumberRange::new("QA10", "QA20", topics(&["B"])),
            CallNumberRange::new("QA9", "QA50", topics(&["A"])),
            CallNumberRange::new("QA9", "QA10", topics(&["C"])),
        ];
        ranges.sort();
        let raw: Vec<(&str, &str)> = ranges.iter().map(|r| (r.min_raw(), r.max_raw())).collect();
        assert_eq!(raw, vec![("QA9", "QA10"), ("QA9", "QA50"), ("QA10", "QA20")]);
    }

    #[test]
    fn test_display() {
        let range = CallNumberRange::new("PC1001", "PC1977", topics(&["Humanities"]));
        assert_eq!(range.to_string(), "[PC1001 - PC1977]");
    }
}
