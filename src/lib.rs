#![warn(missing_docs)]

//! # HLB: High Level Browse
//!
//! Classify library call numbers into subject-topic paths.
//!
//! The High Level Browse taxonomy labels call number ranges with paths such
//! as `Science > Mathematics` or
//! `Humanities > Romance Languages and Literatures > Italian Language and Literatures`.
//! This crate turns that taxonomy into an immutable catalog that can answer
//! lookups for millions of bibliographic records during bulk indexing.
//!
//! ## Quick Start
//!
//! ### Building from the taxonomy XML
//!
//! ```
//! use hlb::{HighLevelBrowse, IllegalRangePolicy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = r#"<hlb>
//!   <subject name="Humanities">
//!     <topic name="Linguistics"><call-numbers start="P1" end="P1091"/></topic>
//!   </subject>
//! </hlb>"#;
//!
//! let hlb = HighLevelBrowse::from_xml(xml, IllegalRangePolicy::Warn)?;
//! assert_eq!(hlb.topics(["P11"]), vec![vec!["Humanities", "Linguistics"]]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Saving and loading a snapshot
//!
//! ```no_run
//! use hlb::{FileSource, HighLevelBrowse, HlbConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HlbConfig::from_env().with_snapshot_dir("/app/lib/translation_maps");
//! let source = FileSource::new("hlb.xml");
//! HighLevelBrowse::fetch_and_save(&source, &config)?;
//!
//! // Later, in the indexing process
//! let hlb = HighLevelBrowse::load(&config.snapshot_dir)?;
//! let topics = hlb.topics(["QA 76.73 .J38 2005", "PC1100 .B5"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] — Call number normalization into sortable keys
//! - [`range`] — Call number ranges labeled with topic paths
//! - [`range_tree`] — Static interval tree for overlap queries
//! - [`catalog`] — Per-letter buckets of range trees
//! - [`taxonomy`] — The taxonomy XML document and its traversal
//! - [`snapshot`] — Compressed JSON snapshots of the range list
//! - [`source`] — Where the taxonomy document is read from
//! - [`config`] — Configuration
//! - [`db`] — The [`HighLevelBrowse`] catalog
//! - [`indexing`] — `hlb3` search-index fields
//! - [`parallel`] — Rayon batch classification
//! - [`error`] — Error types and result type
//!
//! ## Features
//!
//! - `fetch` — [`HttpSource`](source::HttpSource) for reading the taxonomy over HTTP

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod indexing;
pub mod normalize;
pub mod parallel;
pub mod range;
pub mod range_tree;
pub mod snapshot;
pub mod source;
pub mod taxonomy;

pub use catalog::{CallNumberRangeSet, LetterIndex};
pub use config::{HlbConfig, IllegalRangePolicy};
pub use db::HighLevelBrowse;
pub use error::{HlbError, Result};
pub use indexing::Hlb3Fields;
pub use normalize::normalize;
pub use range::{CallNumberRange, TopicPath};
pub use range_tree::{Interval, RangeTree};
#[cfg(feature = "fetch")]
pub use source::HttpSource;
pub use source::{FileSource, StaticSource, TaxonomySource};
pub use taxonomy::TaxonomyDocument;
