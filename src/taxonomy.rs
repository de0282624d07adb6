//! The High Level Browse taxonomy document.
//!
//! The taxonomy is published as XML nested three levels deep. Any level may
//! carry `<call-numbers>` children, and each of those becomes a
//! [`CallNumberRange`] labeled with the names from the root down to the node
//! that holds it:
//!
//! ```xml
//! <hlb>
//!   <subject name="Science">
//!     <topic name="Mathematics">
//!       <call-numbers start="QA1" end="QA999"/>
//!     </topic>
//!   </subject>
//!   <subject name="Humanities">
//!     <topic name="Romance Languages and Literatures">
//!       <sub-topic name="Italian Language and Literatures">
//!         <call-numbers start="PC1001" end="PC1977"/>
//!       </sub-topic>
//!     </topic>
//!   </subject>
//! </hlb>
//! ```
//!
//! Only `subject` > `topic` > `sub-topic` nesting is followed; elements found
//! anywhere else are ignored.

use crate::config::IllegalRangePolicy;
use crate::error::{HlbError, Result};
use crate::range::{CallNumberRange, TopicPath};
use quick_xml::de::from_str as xml_from_str;
use serde::Deserialize;

/// Root `<hlb>` element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "hlb")]
pub struct TaxonomyDocument {
    /// Top-level subjects
    #[serde(default, rename = "subject")]
    pub subjects: Vec<TaxonomyNode>,
}

/// A `<subject>`, `<topic>` or `<sub-topic>` element.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyNode {
    /// Display name as an XML attribute
    #[serde(default, rename = "@name")]
    pub name: String,
    /// Call number ranges attached directly to this node
    #[serde(default, rename = "call-numbers")]
    pub call_numbers: Vec<CallNumberSpan>,
    /// `<topic>` children (followed only under a subject)
    #[serde(default, rename = "topic")]
    pub topics: Vec<TaxonomyNode>,
    /// `<sub-topic>` children (followed only under a topic)
    #[serde(default, rename = "sub-topic")]
    pub sub_topics: Vec<TaxonomyNode>,
}

/// A `<call-numbers start=".." end=".."/>` element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallNumberSpan {
    /// Raw lower bound
    #[serde(rename = "@start")]
    pub start: String,
    /// Raw upper bound; a missing `end` makes a single-value range
    #[serde(default, rename = "@end")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Subject,
    Topic,
    SubTopic,
}

impl Level {
    fn children(self, node: &TaxonomyNode) -> (&[TaxonomyNode], Option<Level>) {
        match self {
            Level::Subject => (node.topics.as_slice(), Some(Level::Topic)),
            Level::Topic => (node.sub_topics.as_slice(), Some(Level::SubTopic)),
            Level::SubTopic => (&[], None),
        }
    }
}

impl TaxonomyDocument {
    /// Parse taxonomy XML.
    ///
    /// # Arguments
    ///
    /// * `xml` - The document text
    /// * `location` - Where the text came from, used in error messages
    ///
    /// # Errors
    ///
    /// Returns [`HlbError::TaxonomyParse`] if the text is not well-formed
    /// taxonomy XML.
    pub fn parse(xml: &str, location: &str) -> Result<Self> {
        xml_from_str(xml).map_err(|e| HlbError::TaxonomyParse {
            location: location.to_string(),
            message: e.to_string(),
        })
    }

    /// Walk the document depth-first and build a range for every
    /// `<call-numbers>` element.
    ///
    /// Ranges come out in document order: a node's own ranges first, then
    /// those of each child in turn. Ranges that fail to normalize are
    /// handled according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`HlbError::IllegalRange`] for the first illegal range when
    /// `policy` is [`IllegalRangePolicy::Reject`].
    pub fn ranges(&self, policy: IllegalRangePolicy) -> Result<Vec<CallNumberRange>> {
        let mut walker = Walker {
            policy,
            path: Vec::with_capacity(3),
            ranges: Vec::new(),
            dropped: 0,
        };
        for subject in &self.subjects {
            walker.visit(subject, Level::Subject)?;
        }

        if walker.dropped > 0 {
            tracing::info!(
                dropped = walker.dropped,
                kept = walker.ranges.len(),
                "Dropped illegal call number ranges from taxonomy"
            );
        }
        Ok(walker.ranges)
    }
}

struct Walker {
    policy: IllegalRangePolicy,
    path: TopicPath,
    ranges: Vec<CallNumberRange>,
    dropped: usize,
}

impl Walker {
    fn visit(&mut self, node: &TaxonomyNode, level: Level) -> Result<()> {
        self.path.push(node.name.clone());

        for span in &node.call_numbers {
            let range = match &span.end {
                Some(end) => {
                    CallNumberRange::new(span.start.as_str(), end.as_str(), self.path.clone())
                }
                None => CallNumberRange::single(span.start.as_str(), self.path.clone()),
            };
            if range.is_illegal() {
                self.drop_illegal(range)?;
            } else {
                self.ranges.push(range);
            }
        }

        let (children, next) = level.children(node);
        if let Some(next) = next {
            for child in children {
                self.visit(child, next)?;
            }
        }

        self.path.pop();
        Ok(())
    }

    fn drop_illegal(&mut self, range: CallNumberRange) -> Result<()> {
        match self.policy {
            IllegalRangePolicy::Skip => {
                tracing::debug!(
                    range = %range,
                    topics = ?range.topic_array(),
                    "Skipping illegal call number range"
                );
            }
            IllegalRangePolicy::Warn => {
                tracing::warn!(
                    range = %range,
                    topics = ?range.topic_array(),
                    "Skipping illegal call number range"
                );
            }
            IllegalRangePolicy::Reject => {
                return Err(HlbError::IllegalRange {
                    min_raw: range.min_raw().to_string(),
                    max_raw: range.max_raw().to_string(),
                    topic_array: range.topic_array().to_vec(),
                });
            }
        }
        self.dropped += 1;
        Ok(())
    }
}
