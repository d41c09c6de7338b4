//! Commitment store trait.

use crate::error::CoreResult;
use crate::retrieval::RetrievalResult;
use crate::types::{CommitmentRecord, CommitmentVector};

/// Append-only storage for commitment records with similarity retrieval.
///
/// There is deliberately no update or delete. Re-inserting an existing id
/// replaces the record (last write wins); keeping ids unique is the caller's
/// job, and the governance loop's id counter guarantees it for generated
/// records.
///
/// # Example
///
/// ```
/// use raist_core::store::InMemoryCommitmentStore;
/// use raist_core::traits::CommitmentStore;
/// use raist_core::types::{CommitmentRecord, CommitmentVector};
///
/// let mut store = InMemoryCommitmentStore::new();
/// store
///     .insert(CommitmentRecord::new(
///         "V-000",
///         "Irrevocability is the first principle.",
///         CommitmentVector::new([0.05, 0.05, 0.98, 0.90]),
///     ))
///     .unwrap();
///
/// let hits = store
///     .retrieve_relevant(&CommitmentVector::new([0.1, 0.1, 0.9, 0.85]), 0.75)
///     .unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits.ids(), vec!["V-000"]);
/// ```
pub trait CommitmentStore: Send + Sync {
    /// Insert a record keyed by `record.id`.
    ///
    /// Stamps `created_at` with the current time when unset.
    fn insert(&mut self, record: CommitmentRecord) -> CoreResult<()>;

    /// Score every stored record against `query`, keep those with
    /// similarity `>= threshold`, ordered by score descending. Equal scores
    /// keep insertion order.
    fn retrieve_relevant(
        &self,
        query: &CommitmentVector,
        threshold: f32,
    ) -> CoreResult<RetrievalResult>;

    /// Look up a record by id.
    fn get(&self, id: &str) -> Option<&CommitmentRecord>;

    /// All records in insertion order.
    fn records(&self) -> Vec<&CommitmentRecord>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
