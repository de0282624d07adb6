//! Persisted snapshots of the range list.
//!
//! A snapshot is a gzip-compressed file holding a single line of JSON: an
//! array with one type-tagged element per range.
//!
//! ```json
//! [{"json_class":"HighLevelBrowse::CallNumberRange",
//!   "data":["qa11","qa3999~","QA1","QA999","q",["Science","Mathematics"]]}]
//! ```
//!
//! The `data` tuple is `[min, max, min_raw, max_raw, firstletter, topic_array]`.
//! Loading trusts the stored keys and never normalizes the raw strings again,
//! so a snapshot answers queries exactly as the catalog that wrote it.
//!
//! Writes go to a uniquely named temporary file in the same directory which
//! is then renamed over the snapshot, so a concurrent reader sees either the
//! old file or the new one.

use crate::error::{HlbError, Result};
use crate::range::CallNumberRange;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// File name of the snapshot within its directory.
pub const SNAPSHOT_FILENAME: &str = "hlb.json.gz";

/// Type tag carried by every snapshot element.
pub const RANGE_CLASS_TAG: &str = "HighLevelBrowse::CallNumberRange";

#[derive(Serialize)]
struct EntryRef<'a> {
    json_class: &'static str,
    data: (&'a str, &'a str, &'a str, &'a str, Option<String>, &'a [String]),
}

#[derive(Deserialize)]
struct Entry {
    json_class: String,
    data: (String, String, String, String, Option<String>, Vec<String>),
}

impl<'a> From<&'a CallNumberRange> for EntryRef<'a> {
    fn from(range: &'a CallNumberRange) -> Self {
        Self {
            json_class: RANGE_CLASS_TAG,
            data: (
                range.min_key(),
                range.max_key(),
                range.min_raw(),
                range.max_raw(),
                range.firstletter().map(String::from),
                range.topic_array(),
            ),
        }
    }
}

impl Entry {
    fn into_range(self, path: &Path) -> Result<CallNumberRange> {
        if self.json_class != RANGE_CLASS_TAG {
            return Err(snapshot_error(
                path,
                format!("unexpected json_class '{}'", self.json_class),
            ));
        }
        let (min, max, min_raw, max_raw, firstletter, topic_array) = self.data;
        let firstletter = firstletter.and_then(|s| s.chars().next());
        Ok(CallNumberRange::from_parts(
            min,
            max,
            min_raw,
            max_raw,
            firstletter,
            topic_array,
        ))
    }
}

fn snapshot_error(path: &Path, message: impl Into<String>) -> HlbError {
    HlbError::Snapshot {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Serialize ranges as uncompressed snapshot JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_json<'a, W: Write>(
    mut writer: W,
    ranges: impl IntoIterator<Item = &'a CallNumberRange>,
) -> Result<()> {
    let entries: Vec<EntryRef<'a>> = ranges.into_iter().map(EntryRef::from).collect();
    serde_json::to_writer(&mut writer, &entries).map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Deserialize ranges from uncompressed snapshot JSON.
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Returns [`HlbError::Snapshot`] if the JSON is malformed or an element
/// carries an unknown type tag.
pub fn read_json<R: Read>(reader: R, path: &Path) -> Result<Vec<CallNumberRange>> {
    let entries: Vec<Entry> =
        serde_json::from_reader(reader).map_err(|e| snapshot_error(path, e.to_string()))?;
    entries.into_iter().map(|e| e.into_range(path)).collect()
}

/// Write a compressed snapshot of `ranges` into `dir`, replacing any
/// existing one.
///
/// Each call writes its own uniquely named temporary file, so concurrent
/// saves into one directory never share a partially written file.
///
/// Returns the path of the written snapshot.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
pub fn save<'a>(
    dir: &Path,
    ranges: impl IntoIterator<Item = &'a CallNumberRange>,
) -> Result<PathBuf> {
    let path = dir.join(SNAPSHOT_FILENAME);
    let tmp = tempfile::Builder::new()
        .prefix(SNAPSHOT_FILENAME)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    // Dropping `tmp` on error removes the file
    write_compressed(tmp.as_file(), ranges)?;
    tmp.persist(&path).map_err(|e| e.error)?;

    Ok(path)
}

fn write_compressed<'a>(
    file: &File,
    ranges: impl IntoIterator<Item = &'a CallNumberRange>,
) -> Result<()> {
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    write_json(&mut encoder, ranges)?;
    encoder
        .finish()?
        .into_inner()
        .map_err(std::io::IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(())
}

/// Read the compressed snapshot stored in `dir`.
///
/// # Errors
///
/// Returns [`HlbError::IoError`] if the file cannot be opened and
/// [`HlbError::Snapshot`] if its contents cannot be decoded.
pub fn load(dir: &Path) -> Result<Vec<CallNumberRange>> {
    let path = dir.join(SNAPSHOT_FILENAME);
    let file = File::open(&path)?;
    read_json(GzDecoder::new(BufReader::new(file)), &path)
}
