//! Eager corpus loading.

use std::path::Path;

use tracing::info;

use crate::{
    entry::RantEntry,
    error::{Error, Result},
};

/// The full set of rants, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct RantStore {
    entries: Vec<RantEntry>,
}

impl RantStore {
    /// Load the corpus from a JSON resource on disk.
    ///
    /// Fails when the file is unreadable, when it is not a JSON array of
    /// complete records, or when the array is empty. An empty corpus makes
    /// every selection undefined, so it is rejected up front.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_slice(&raw)?;
        info!(path = %path.display(), entries = store.len(), "corpus loaded");
        Ok(store)
    }

    /// Parse a corpus from in-memory JSON bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let entries: Vec<RantEntry> = serde_json::from_slice(raw)?;
        if entries.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        Ok(Self { entries })
    }

    /// Borrow the full corpus.
    #[must_use]
    pub fn entries(&self) -> &[RantEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const TWO_ENTRIES: &str = r#"[
        {"date": "2024-01-01", "source": "code review", "type": "C", "text": "A"},
        {"date": "2024-01-02", "source": "retro board", "type": "P", "text": "B"}
    ]"#;

    #[test]
    fn parses_valid_corpus() {
        let store = RantStore::from_slice(TWO_ENTRIES.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[1].text, "B");
    }

    #[test]
    fn empty_array_rejected() {
        let err = RantStore::from_slice(b"[]").unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = RantStore::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn record_missing_field_rejected() {
        let raw = br#"[{"date": "2024-01-01", "source": "irc", "text": "A"}]"#;
        assert!(matches!(
            RantStore::from_slice(raw).unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_ENTRIES.as_bytes()).unwrap();
        let store = RantStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = RantStore::load("/nonexistent/rants.json").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
