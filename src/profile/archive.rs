//! Per-publication archive of topics that have already been written.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a topic archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// IO error while reading the archive file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is not valid JSON or has the wrong shape.
    #[error("invalid topic archive: {0}")]
    Json(#[from] serde_json::Error),
}

/// Archived topics for one publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationTopics {
    /// Headlines or topics that should not be written again
    #[serde(default)]
    pub topics_to_avoid: Vec<String>,
}

/// Archive keyed by publication, e.g. `forbes`, `entrepreneur`, `fast_company`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicArchive {
    publications: BTreeMap<String, PublicationTopics>,
}

impl TopicArchive {
    /// Parse an archive from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ArchiveError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load an archive from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Topics recorded for a publication, matched by its normalized key.
    ///
    /// "Fast Company", "fastcompany" and "fast-company" all resolve to the
    /// `fast_company` entry. A name such as "Forbes Business Council" falls
    /// back to the longest archive key it starts with.
    pub fn topics_for(&self, publication: &str) -> &[String] {
        let key = publication_key(publication);
        if let Some(entry) = self.publications.get(&key) {
            return &entry.topics_to_avoid;
        }
        self.publications
            .iter()
            .filter(|(k, _)| key.starts_with(k.as_str()))
            .max_by_key(|(k, _)| k.len())
            .map(|(_, entry)| entry.topics_to_avoid.as_slice())
            .unwrap_or(&[])
    }

    /// Publication keys present in the archive.
    pub fn publications(&self) -> Vec<&str> {
        self.publications.keys().map(String::as_str).collect()
    }
}

/// Normalize a publication name into an archive key.
pub fn publication_key(publication: &str) -> String {
    let key: String = publication
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    match key.as_str() {
        "fastcompany" => "fast_company".to_string(),
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ARCHIVE: &str = r#"{
        "forbes": { "topics_to_avoid": ["Hiring for grit", "Why trust is a moat"] },
        "entrepreneur": { "topics_to_avoid": [] },
        "fast_company": { "topics_to_avoid": ["Remote work rituals"] }
    }"#;

    #[test]
    fn test_publication_key() {
        assert_eq!(publication_key("Fast Company"), "fast_company");
        assert_eq!(publication_key("fastcompany"), "fast_company");
        assert_eq!(publication_key("fast-company"), "fast_company");
        assert_eq!(publication_key(" Forbes "), "forbes");
    }

    #[test]
    fn test_topics_for_exact_and_prefix() {
        let archive = TopicArchive::from_json(ARCHIVE).unwrap();
        assert_eq!(archive.topics_for("fastcompany"), ["Remote work rituals"]);
        assert_eq!(archive.topics_for("Forbes").len(), 2);
        assert_eq!(archive.topics_for("Forbes Business Council").len(), 2);
        assert_eq!(
            archive.topics_for("Fast Company Executive Board"),
            ["Remote work rituals"]
        );
        assert!(archive.topics_for("Inc").is_empty());
        assert_eq!(
            archive.publications(),
            vec!["entrepreneur", "fast_company", "forbes"]
        );
    }

    #[test]
    fn test_missing_topics_field_defaults_to_empty() {
        let archive = TopicArchive::from_json(r#"{ "forbes": {} }"#).unwrap();
        assert!(archive.topics_for("forbes").is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = TopicArchive::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ArchiveError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("topic_archive.json");
        fs::write(&path, ARCHIVE).unwrap();

        let archive = TopicArchive::load(&path).unwrap();
        assert_eq!(archive.topics_for("entrepreneur").len(), 0);
        assert!(matches!(
            TopicArchive::load(temp.path().join("missing.json")),
            Err(ArchiveError::Io(_))
        ));
    }
}
