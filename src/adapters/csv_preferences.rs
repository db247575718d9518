use crate::core::{PreferenceStore, Result};
use crate::domain::model::{MatchingAction, PreferenceLookup};
use crate::utils::error::MatchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    member_id: String,
    opted_in: String,
}

/// Opt-in status read from a `member_id,opted_in` CSV on every run.
///
/// `opted_in` accepts `true`, `false`, `optin` or `optout`.
#[derive(Debug, Clone)]
pub struct CsvPreferenceStore {
    path: PathBuf,
}

impl CsvPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(content: &[u8]) -> Result<PreferenceLookup> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut entries = HashMap::new();
        for row in reader.deserialize() {
            let row: PreferenceRow = row?;
            let action: MatchingAction = row
                .opted_in
                .parse()
                .map_err(|e: String| MatchError::preference_store(format!("{}: {}", row.member_id, e)))?;
            entries.insert(row.member_id, action.is_opted_in());
        }

        Ok(PreferenceLookup::new(entries))
    }
}

#[async_trait]
impl PreferenceStore for CsvPreferenceStore {
    async fn load_all_opt_in_status(&self) -> Result<PreferenceLookup> {
        let content = tokio::fs::read(&self.path).await?;
        let lookup = Self::parse(&content)?;
        tracing::debug!("Loaded {} opt-in entries from {}", lookup.len(), self.path.display());
        Ok(lookup)
    }
}

/// Fixed lookup, for runs without a preference file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    lookup: PreferenceLookup,
}

impl InMemoryPreferenceStore {
    pub fn new(lookup: PreferenceLookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load_all_opt_in_status(&self) -> Result<PreferenceLookup> {
        Ok(self.lookup.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "member_id,opted_in").unwrap();
        writeln!(file, "a, true").unwrap();
        writeln!(file, "b,optout").unwrap();
        writeln!(file, "c,OptIn").unwrap();
        writeln!(file, "d,false").unwrap();

        let store = CsvPreferenceStore::new(file.path());
        let lookup = store.load_all_opt_in_status().await.unwrap();

        assert_eq!(lookup.len(), 4);
        assert!(lookup.is_opted_in("a"));
        assert!(!lookup.is_opted_in("b"));
        assert!(lookup.is_opted_in("c"));
        assert!(!lookup.is_opted_in("d"));
        assert!(lookup.is_opted_in("missing"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let content = b"member_id,opted_in\na,perhaps\n";
        assert!(CsvPreferenceStore::parse(content).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let store = CsvPreferenceStore::new("/nonexistent/optin.csv");
        assert!(store.load_all_opt_in_status().await.is_err());
    }
}
