//! Static interval tree for overlap queries.
//!
//! [`RangeTree`] is built once from a collection of intervals and never
//! mutated. Construction sorts the intervals by `(start, end)` and splits the
//! sorted slice recursively at its midpoint: the middle interval becomes the
//! node, the halves become its subtrees. Every node also records the smallest
//! start and largest end found anywhere beneath it, which lets a search skip
//! whole subtrees that cannot overlap the query.
//!
//! Rebuilding from scratch is the only way to change the contents.
//!
//! # Examples
//!
//! ```
//! use hlb::range_tree::{Interval, RangeTree};
//!
//! struct Span(u32, u32);
//!
//! impl Interval for Span {
//!     type Key = u32;
//!     fn start(&self) -> &u32 { &self.0 }
//!     fn end(&self) -> &u32 { &self.1 }
//! }
//!
//! let tree = RangeTree::new(vec![Span(1, 5), Span(4, 9), Span(20, 30)]);
//! let hits: Vec<u32> = tree.search_point(&4).iter().map(|s| s.0).collect();
//! assert_eq!(hits, vec![1, 4]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A closed interval `[start, end]` over an ordered key.
pub trait Interval {
    /// Key type of the endpoints.
    type Key: Ord + ?Sized;

    /// Inclusive lower endpoint.
    fn start(&self) -> &Self::Key;

    /// Inclusive upper endpoint.
    fn end(&self) -> &Self::Key;

    /// Whether this interval shares at least one point with `[lo, hi]`.
    fn overlaps(&self, lo: &Self::Key, hi: &Self::Key) -> bool {
        lo <= self.end() && hi >= self.start()
    }
}

impl<T: Interval + ?Sized> Interval for Arc<T> {
    type Key = T::Key;

    fn start(&self) -> &Self::Key {
        (**self).start()
    }

    fn end(&self) -> &Self::Key {
        (**self).end()
    }
}

struct Node {
    /// Index of this node's interval in `RangeTree::items`
    item: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
    /// Item with the smallest start in this subtree
    min: usize,
    /// Item with the largest end in this subtree
    max: usize,
}

/// Immutable interval tree answering "which intervals overlap this one".
pub struct RangeTree<T: Interval> {
    items: Vec<T>,
    root: Option<Box<Node>>,
}

impl<T: Interval> RangeTree<T> {
    /// Build a tree from an arbitrary collection of intervals.
    ///
    /// The intervals are sorted by start and then by end; the secondary key
    /// keeps nodes sharing a start grouped by length, which tightens the
    /// subtree bounds.
    #[must_use]
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by(compare_bounds);
        let root = split(&items, 0, items.len());
        Self { items, root }
    }

    /// Find every interval overlapping `[lo, hi]`.
    ///
    /// Results come back in ascending `(start, end)` order.
    #[must_use]
    pub fn search(&self, lo: &T::Key, hi: &T::Key) -> Vec<&T> {
        self.search_limited(lo, hi, usize::MAX)
    }

    /// Find every interval containing the single point `key`.
    #[must_use]
    pub fn search_point(&self, key: &T::Key) -> Vec<&T> {
        self.search(key, key)
    }

    /// Like [`search`](Self::search), but stops once `limit` intervals have
    /// been collected.
    #[must_use]
    pub fn search_limited(&self, lo: &T::Key, hi: &T::Key, limit: usize) -> Vec<&T> {
        let mut result = Vec::new();
        if let Some(root) = &self.root {
            self.search_node(root, lo, hi, limit, &mut result);
        }
        result
    }

    fn search_node<'a>(
        &'a self,
        node: &Node,
        lo: &T::Key,
        hi: &T::Key,
        limit: usize,
        result: &mut Vec<&'a T>,
    ) {
        if result.len() >= limit {
            return;
        }

        // Nothing on the left can reach lo
        if let Some(left) = &node.left {
            if self.items[left.max].end() >= lo {
                self.search_node(left, lo, hi, limit, result);
            }
        }

        if result.len() >= limit {
            return;
        }

        let item = &self.items[node.item];
        if item.overlaps(lo, hi) {
            result.push(item);
        }

        // Everything on the right starts after hi
        if let Some(right) = &node.right {
            if self.items[right.min].start() <= hi {
                self.search_node(right, lo, hi, limit, result);
            }
        }
    }

    /// Number of intervals in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree holds no intervals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all intervals in `(start, end)` order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Interval> FromIterator<T> for RangeTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Interval> Default for RangeTree<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Interval> fmt::Debug for RangeTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeTree")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

fn compare_bounds<T: Interval>(a: &T, b: &T) -> Ordering {
    a.start()
        .cmp(b.start())
        .then_with(|| a.end().cmp(b.end()))
}

/// Build the subtree over `items[lo..hi]`.
fn split<T: Interval>(items: &[T], lo: usize, hi: usize) -> Option<Box<Node>> {
    if lo >= hi {
        return None;
    }

    let middle = lo + (hi - lo) / 2;
    let left = split(items, lo, middle);
    let right = split(items, middle + 1, hi);

    let mut min = middle;
    let mut max = middle;
    for child in [&left, &right].into_iter().flatten() {
        if items[child.min].start() < items[min].start() {
            min = child.min;
        }
        if items[child.max].end() > items[max].end() {
            max = child.max;
        }
    }

    Some(Box::new(Node {
        item: middle,
        left,
        right,
        min,
        max,
    }))
}
