//! Common test helpers and fixtures shared across the test suite.

#![allow(dead_code)]

use hlb::{HighLevelBrowse, IllegalRangePolicy, TopicPath};

/// A trimmed-down copy of the published taxonomy covering the cases the
/// tests exercise: two- and three-level paths, ranges directly on a subject,
/// overlapping ranges, a bare class prefix and a few malformed entries.
pub const TAXONOMY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hlb>
  <subject name="Science">
    <topic name="Mathematics">
      <call-numbers start="QA1" end="QA999"/>
    </topic>
    <topic name="Computer Science">
      <call-numbers start="QA75.5" end="QA76.95"/>
      <call-numbers start="T58.5" end="T58.64"/>
    </topic>
    <topic name="Physics">
      <call-numbers start="QC1" end="QC999"/>
    </topic>
  </subject>
  <subject name="Humanities">
    <topic name="Linguistics">
      <call-numbers start="P1" end="P1091"/>
    </topic>
    <topic name="Romance Languages and Literatures">
      <call-numbers start="PC1" end="PC5498"/>
      <sub-topic name="Italian Language and Literatures">
        <call-numbers start="PC1001" end="PC1977"/>
      </sub-topic>
      <sub-topic name="French Language and Literature">
        <call-numbers start="PC2001" end="PC3761"/>
        <call-numbers start="PQ1" end="PQ3999"/>
      </sub-topic>
    </topic>
  </subject>
  <subject name="Business">
    <call-numbers start="HF"/>
    <topic name="Accounting">
      <call-numbers start="HF5601" end="HF5689"/>
      <call-numbers start="see HF5601" end="HF5689"/>
    </topic>
  </subject>
  <subject name="Government Information">
    <topic name="Documents">
      <call-numbers start="Y 1.1" end="Y 4.9"/>
      <call-numbers start="" end=""/>
    </topic>
  </subject>
</hlb>"#;

/// Number of well-formed ranges in [`TAXONOMY_XML`].
pub const LEGAL_RANGE_COUNT: usize = 12;

/// Build the fixture catalog.
pub fn fixture_catalog() -> HighLevelBrowse {
    HighLevelBrowse::from_xml(TAXONOMY_XML, IllegalRangePolicy::Skip)
        .expect("fixture taxonomy should build")
}

/// Shorthand for a topic path.
pub fn path(labels: &[&str]) -> TopicPath {
    labels.iter().map(|s| (*s).to_string()).collect()
}

/// Call numbers in the shapes found in catalog records, including malformed ones.
pub fn sample_call_numbers() -> Vec<&'static str> {
    vec![
        "QA1",
        "QA76.73 .J38 2005",
        "QA 76.9 .D3 S5 1998",
        "QC174.12 .B35",
        "P11",
        "P121 .C5",
        "PC1100 .B5",
        "PC2112 .G7",
        "PQ2603.E362 Z5",
        "HF5635 .M6",
        "HF 1025",
        "T58.6 .K3",
        "AAA11",
        "Y 3.2",
        "005.133",
        "",
        "   ",
        "microfilm 1234",
    ]
}
