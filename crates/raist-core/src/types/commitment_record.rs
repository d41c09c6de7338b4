//! Persisted commitment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommitmentVector;

/// String identifier of a commitment ("V-000", "CAUSAL-V-3", ...).
pub type CommitmentId = String;

/// A (text, vector) pair remembered by the store.
///
/// `created_at` stays `None` until the record is inserted; the store stamps
/// it exactly once and never touches it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentRecord {
    pub id: CommitmentId,

    /// Query that produced this commitment. Seed records may have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    pub commitment_text: String,

    pub vector: CommitmentVector,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Provenance label, e.g. the generating agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
}

impl CommitmentRecord {
    pub fn new(
        id: impl Into<CommitmentId>,
        commitment_text: impl Into<String>,
        vector: CommitmentVector,
    ) -> Self {
        Self {
            id: id.into(),
            query: None,
            commitment_text: commitment_text.into(),
            vector,
            created_at: None,
            source_tag: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_source_tag(mut self, source_tag: impl Into<String>) -> Self {
        self.source_tag = Some(source_tag.into());
        self
    }

    /// Pin the creation time instead of letting the store stamp it.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let record = CommitmentRecord::new(
            "V-000",
            "The covenant is irrevocable.",
            CommitmentVector::new([0.05, 0.05, 0.98, 0.90]),
        )
        .with_query("initialization")
        .with_source_tag("seed");

        assert_eq!(record.id, "V-000");
        assert_eq!(record.query.as_deref(), Some("initialization"));
        assert_eq!(record.source_tag.as_deref(), Some("seed"));
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let record = CommitmentRecord::new("V-1", "text", CommitmentVector::zeroed());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("query").is_none());
        assert!(json.get("created_at").is_none());
        assert!(json.get("source_tag").is_none());

        let back: CommitmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
