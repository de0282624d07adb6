//! Call number normalization.
//!
//! Turns loosely formatted Library of Congress style call numbers into
//! canonical keys that sort correctly as plain strings. The key is built from
//! three parts:
//!
//! - the class letters, lowercased (`qa`)
//! - the class number with its digit count prepended (`76` becomes `276`), so
//!   that `9` (`19`) sorts before `10` (`210`)
//! - an optional decimal extension and a cleaned-up free-text remainder
//!   (cutters, dates, volume designations)
//!
//! # Examples
//!
//! ```
//! use hlb::normalize::{normalize, normalize_upper_bound};
//!
//! assert_eq!(normalize("QA 76.73 .J38 2005").as_deref(), Some("qa276.73 j38 2005"));
//! assert_eq!(normalize("P").as_deref(), Some("p"));
//! assert_eq!(normalize("not a call number"), None);
//! assert_eq!(normalize_upper_bound("QA999").as_deref(), Some("qa3999~"));
//! ```

use lazy_static::lazy_static;
use regex::Regex;

/// Character appended to normalized upper bounds.
///
/// `~` sorts after ASCII letters, digits, space and the punctuation found in
/// call numbers, so `"qa3999~"` is greater than every key that starts with
/// `"qa3999"`.
pub const SENTINEL: char = '~';

lazy_static! {
    /// A bare class prefix such as `P` or `QA.`
    static ref JUST_LETTERS: Regex = Regex::new(r"^\s*\p{L}{1,3}[\s\p{P}]*$").expect("static regex");

    static ref CALL_NUMBER: Regex = Regex::new(
        r"(?s)^\s*(?P<letters>\p{L}{1,3})\s*(?P<digits>[0-9]{1,5})(?:\.(?P<decimals>[0-9]+))?(?P<rest>.*)$"
    ).expect("static regex");

    static ref DOT_BEFORE_LETTER: Regex = Regex::new(r"\.(\p{L})").expect("static regex");

    static ref DOT_BETWEEN_LETTERS: Regex = Regex::new(r"(\p{L})\.(\p{L})").expect("static regex");

    static ref DIGIT_THEN_LETTER: Regex = Regex::new(r"([0-9])(\p{L})").expect("static regex");

    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("static regex");
}

/// Normalize a raw call number into a sortable key.
///
/// Returns `None` when the input does not look like a call number: it must
/// start with one to three letters followed by a class number of at most five
/// digits, or consist of nothing but one to three letters.
///
/// # Arguments
///
/// * `raw` - The call number as found in a record or taxonomy (e.g. `"qa 112.3 .A4 1990"`)
///
/// # Examples
///
/// ```
/// use hlb::normalize::normalize;
///
/// assert_eq!(normalize("qa 112.3 .A4 1990").as_deref(), Some("qa3112.3 a4 1990"));
/// assert!(normalize("QA9") < normalize("QA10"));
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();

    if JUST_LETTERS.is_match(&lowered) {
        return Some(lowered.trim().to_string());
    }

    let caps = CALL_NUMBER.captures(&lowered)?;
    let letters = caps.name("letters")?.as_str();
    let digits = caps.name("digits")?.as_str();
    let rest = caps.name("rest").map_or("", |m| m.as_str());

    // More than five digits in the class number
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut key = String::with_capacity(lowered.len() + 2);
    key.push_str(letters);
    key.push_str(&digits.len().to_string());
    key.push_str(digits);
    if let Some(decimals) = caps.name("decimals") {
        key.push('.');
        key.push_str(decimals.as_str());
    }
    key.push(' ');
    key.push_str(&cleanup_freetext(rest));

    Some(collapse_whitespace(&key))
}

/// Normalize a raw call number for use as an inclusive range upper bound.
///
/// This is [`normalize`] with [`SENTINEL`] appended, so the result is greater
/// than or equal to every key that extends the normalized prefix: the upper
/// bound `QA999` covers `QA999 .B2 1990`.
#[must_use]
pub fn normalize_upper_bound(raw: &str) -> Option<String> {
    normalize(raw).map(|mut key| {
        key.push(SENTINEL);
        key
    })
}

/// Clean up the free text that follows the class number.
fn cleanup_freetext(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let s = DOT_BEFORE_LETTER.replace_all(trimmed, "$1");
    let s = DOT_BETWEEN_LETTERS.replace_all(&s, "$1$2");
    let s = DIGIT_THEN_LETTER.replace_all(&s, "$1 $2");
    collapse_whitespace(&s)
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}
