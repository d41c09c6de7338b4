//! In-memory commitment store.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};
use crate::retrieval::{RetrievalResult, RetrievedCommitment};
use crate::similarity::cosine_similarity;
use crate::traits::CommitmentStore;
use crate::types::{CommitmentId, CommitmentRecord, CommitmentVector};

#[derive(Debug, Clone)]
struct StoredCommitment {
    /// Insertion sequence number; breaks score ties.
    seq: u64,
    record: CommitmentRecord,
}

/// HashMap-backed [`CommitmentStore`].
///
/// Retrieval is a linear scan, which is fine at the sizes this model deals
/// with. Each insert takes the next sequence number, so an overwritten id
/// moves to the back of the insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommitmentStore {
    records: HashMap<CommitmentId, StoredCommitment>,
    next_seq: u64,
}

impl InMemoryCommitmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, inserted in order.
    pub fn with_records(
        records: impl IntoIterator<Item = CommitmentRecord>,
    ) -> CoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    fn validate(record: &CommitmentRecord) -> CoreResult<()> {
        if record.id.trim().is_empty() {
            return Err(CoreError::ValidationError {
                field: "id".to_string(),
                message: "commitment id must not be empty".to_string(),
            });
        }
        record.vector.validated()?;
        Ok(())
    }
}

impl CommitmentStore for InMemoryCommitmentStore {
    fn insert(&mut self, mut record: CommitmentRecord) -> CoreResult<()> {
        Self::validate(&record)?;

        if record.created_at.is_none() {
            record.created_at = Some(Utc::now());
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let id = record.id.clone();
        let previous = self
            .records
            .insert(id.clone(), StoredCommitment { seq, record });

        if previous.is_some() {
            debug!(id = %id, "Overwrote existing commitment (last write wins)");
        } else {
            debug!(id = %id, total = self.records.len(), "Stored commitment");
        }
        Ok(())
    }

    fn retrieve_relevant(
        &self,
        query: &CommitmentVector,
        threshold: f32,
    ) -> CoreResult<RetrievalResult> {
        let mut scored: Vec<(f32, u64, &CommitmentRecord)> = self
            .records
            .values()
            .map(|stored| {
                let score = cosine_similarity(query.as_slice(), stored.record.vector.as_slice());
                trace!(id = %stored.record.id, score, "Scored commitment");
                (score, stored.seq, &stored.record)
            })
            .filter(|(score, _, _)| *score >= threshold)
            .collect();

        // Score descending, then insertion order.
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        debug!(
            scanned = self.records.len(),
            matched = scored.len(),
            threshold,
            "Retrieved relevant commitments"
        );

        let entries = scored
            .into_iter()
            .map(|(score, _, record)| RetrievedCommitment {
                id: record.id.clone(),
                commitment_text: record.commitment_text.clone(),
                score,
            })
            .collect();

        Ok(RetrievalResult::from_entries(entries))
    }

    fn get(&self, id: &str) -> Option<&CommitmentRecord> {
        self.records.get(id).map(|stored| &stored.record)
    }

    fn records(&self) -> Vec<&CommitmentRecord> {
        let mut stored: Vec<&StoredCommitment> = self.records.values().collect();
        stored.sort_by_key(|s| s.seq);
        stored.into_iter().map(|s| &s.record).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
