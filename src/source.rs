//! Where the taxonomy document comes from.
//!
//! [`TaxonomySource`] is the seam between the catalog and whatever retrieves
//! the taxonomy XML. [`FileSource`] reads a local copy; with the `fetch`
//! feature enabled, [`HttpSource`] performs a single HTTP GET. Neither retries:
//! scheduling and retry policy belong to the caller.

use crate::error::{HlbError, Result};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// A place the taxonomy XML can be read from.
pub trait TaxonomySource: Debug {
    /// Human-readable location (URL or path) used in logs and errors.
    fn location(&self) -> String;

    /// Read the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`HlbError::Fetch`] naming [`location`](Self::location) when
    /// the document cannot be read.
    fn read_document(&self) -> Result<String>;
}

/// A taxonomy document stored on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read from `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TaxonomySource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_document(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| HlbError::Fetch {
            location: self.location(),
            message: e.to_string(),
        })
    }
}

/// An in-memory document, mostly useful for tests and embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSource {
    label: String,
    xml: String,
}

impl StaticSource {
    /// Serve `xml`, reporting `label` as its location.
    #[must_use]
    pub fn new(label: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            xml: xml.into(),
        }
    }
}

impl TaxonomySource for StaticSource {
    fn location(&self) -> String {
        self.label.clone()
    }

    fn read_document(&self) -> Result<String> {
        Ok(self.xml.clone())
    }
}

/// The taxonomy published over HTTP(S).
#[cfg(feature = "fetch")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    /// Fetch from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Fetch from the URL named in `config`.
    #[must_use]
    pub fn from_config(config: &crate::config::HlbConfig) -> Self {
        Self::new(config.source_url.clone())
    }
}

#[cfg(feature = "fetch")]
impl TaxonomySource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn read_document(&self) -> Result<String> {
        let fetch_error = |message: String| HlbError::Fetch {
            location: self.url.clone(),
            message,
        };

        let response = ureq::get(self.url.as_str())
            .call()
            .map_err(|e| fetch_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fetch_error(format!(
                "server responded with {}",
                response.status()
            )));
        }
        response
            .into_body()
            .read_to_string()
            .map_err(|e| fetch_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_source_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<hlb/>").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.read_document().unwrap(), "<hlb/>");
        assert_eq!(source.location(), file.path().display().to_string());
    }

    #[test]
    fn test_file_source_missing_file_names_location() {
        let source = FileSource::new("/nonexistent/hlb.xml");
        match source.read_document() {
            Err(HlbError::Fetch { location, .. }) => assert_eq!(location, "/nonexistent/hlb.xml"),
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new("fixture", "<hlb/>");
        assert_eq!(source.location(), "fixture");
        assert_eq!(source.read_document().unwrap(), "<hlb/>");
    }
}
