//! Search-index fields derived from a record's call numbers.
//!
//! For every bibliographic record the indexer collects call numbers from the
//! classification and holdings fields (`050ab`, `082a`, `090ab`, `099a`,
//! `086a`, `086z`, `852hij`) and stores two fields:
//!
//! - `hlb3Delimited`: each matching topic path joined with `" | "`
//! - `hlb3`: every distinct label appearing in any of those paths
//!
//! # Examples
//!
//! ```
//! use hlb::{HighLevelBrowse, IllegalRangePolicy};
//! use hlb::indexing::hlb3_fields;
//!
//! let xml = r#"<hlb><subject name="Science">
//!   <topic name="Mathematics"><call-numbers start="QA1" end="QA999"/></topic>
//! </subject></hlb>"#;
//! let hlb = HighLevelBrowse::from_xml(xml, IllegalRangePolicy::Warn)?;
//!
//! let fields = hlb3_fields(&hlb, ["QA76.73 .J38"]);
//! assert_eq!(fields.hlb3_delimited, vec!["Science | Mathematics"]);
//! assert_eq!(fields.hlb3, vec!["Science", "Mathematics"]);
//! # Ok::<(), hlb::HlbError>(())
//! ```

use crate::db::HighLevelBrowse;
use indexmap::IndexSet;
use serde::Serialize;

/// Separator placed between labels in `hlb3Delimited` values.
pub const DELIMITER: &str = " | ";

/// The two High Level Browse fields of one search-index document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hlb3Fields {
    /// Topic paths joined with [`DELIMITER`], one entry per distinct path
    #[serde(rename = "hlb3Delimited", skip_serializing_if = "Vec::is_empty")]
    pub hlb3_delimited: Vec<String>,
    /// Distinct labels from all paths, in first-seen order
    #[serde(rename = "hlb3", skip_serializing_if = "Vec::is_empty")]
    pub hlb3: Vec<String>,
}

impl Hlb3Fields {
    /// Whether no call number produced a topic.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hlb3_delimited.is_empty()
    }
}

/// Derive the `hlb3` and `hlb3Delimited` fields for one record.
pub fn hlb3_fields<I, S>(hlb: &HighLevelBrowse, call_numbers: I) -> Hlb3Fields
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let paths = hlb.topics(call_numbers);

    let hlb3: IndexSet<&str> = paths.iter().flatten().map(String::as_str).collect();
    let hlb3 = hlb3.into_iter().map(str::to_string).collect();
    let hlb3_delimited = paths.iter().map(|p| p.join(DELIMITER)).collect();

    Hlb3Fields {
        hlb3_delimited,
        hlb3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IllegalRangePolicy;

    const XML: &str = r#"<hlb>
        <subject name="Science">
          <topic name="Mathematics"><call-numbers start="QA1" end="QA999"/></topic>
        </subject>
        <subject name="Humanities">
          <topic name="Romance Languages and Literatures">
            <sub-topic name="Italian Language and Literatures">
              <call-numbers start="PC1001" end="PC1977"/>
            </sub-topic>
          </topic>
          <topic name="Linguistics"><call-numbers start="P1" end="P1091"/></topic>
        </subject>
      </hlb>"#;

    #[test]
    fn test_fields_for_multiple_call_numbers() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        let fields = hlb3_fields(&hlb, ["PC1100 .B5", "QA1", "P11", "QA5"]);

        assert_eq!(
            fields.hlb3_delimited,
            vec![
                "Humanities | Romance Languages and Literatures | Italian Language and Literatures",
                "Science | Mathematics",
                "Humanities | Linguistics",
            ]
        );
        assert_eq!(
            fields.hlb3,
            vec![
                "Humanities",
                "Romance Languages and Literatures",
                "Italian Language and Literatures",
                "Science",
                "Mathematics",
                "Linguistics",
            ]
        );
    }

    #[test]
    fn test_repeated_path_across_call_numbers_emitted_once() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        let fields = hlb3_fields(&hlb, ["QA1", "QA76.73 .J38", "QA5"]);
        assert_eq!(fields.hlb3_delimited, vec!["Science | Mathematics"]);
        assert_eq!(fields.hlb3, vec!["Science", "Mathematics"]);
    }

    #[test]
    fn test_no_matches_serializes_empty_object() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        let fields = hlb3_fields(&hlb, ["005.133", "Z1"]);
        assert!(fields.is_empty());
        assert_eq!(serde_json::to_string(&fields).unwrap(), "{}");
    }

    #[test]
    fn test_serialized_field_names() {
        let hlb = HighLevelBrowse::from_xml(XML, IllegalRangePolicy::Warn).unwrap();
        let json = serde_json::to_value(hlb3_fields(&hlb, ["QA1"])).unwrap();
        assert_eq!(json["hlb3Delimited"][0], "Science | Mathematics");
        assert_eq!(json["hlb3"][1], "Mathematics");
    }
}
