//! Ranked retrieval output.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::CommitmentId;

/// One relevant commitment and its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedCommitment {
    pub id: CommitmentId,
    pub commitment_text: String,
    pub score: f32,
}

/// Commitments relevant to a query, highest score first.
///
/// Built fresh for every query and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    entries: Vec<RetrievedCommitment>,
}

impl RetrievalResult {
    /// Rank `entries` by descending score.
    ///
    /// The sort is stable, so entries with equal scores keep the order they
    /// were given in. Already ranked input is returned unchanged.
    pub fn from_entries(mut entries: Vec<RetrievedCommitment>) -> Self {
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RetrievedCommitment] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RetrievedCommitment> {
        self.entries.iter()
    }

    /// Highest-ranked entry.
    pub fn top(&self) -> Option<&RetrievedCommitment> {
        self.entries.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a RetrievalResult {
    type Item = &'a RetrievedCommitment;
    type IntoIter = std::slice::Iter<'a, RetrievedCommitment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for RetrievalResult {
    type Item = RetrievedCommitment;
    type IntoIter = std::vec::IntoIter<RetrievedCommitment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, score: f32) -> RetrievedCommitment {
        RetrievedCommitment {
            id: id.to_string(),
            commitment_text: format!("commitment {}", id),
            score,
        }
    }

    #[test]
    fn test_from_entries_ranks_unsorted_input() {
        let result = RetrievalResult::from_entries(vec![
            entry("low", 0.76),
            entry("high", 0.99),
            entry("tie-1", 0.80),
            entry("tie-2", 0.80),
        ]);

        assert_eq!(result.ids(), vec!["high", "tie-1", "tie-2", "low"]);
        assert_eq!(result.top().map(|e| e.id.as_str()), Some("high"));
        println!("[VERIFIED] unsorted entries are ranked, ties keep given order");
    }

    #[test]
    fn test_from_entries_keeps_ranked_input() {
        let ranked = vec![entry("a", 0.9), entry("b", 0.9), entry("c", 0.8)];
        let result = RetrievalResult::from_entries(ranked.clone());
        assert_eq!(result.entries(), ranked.as_slice());
    }

    #[test]
    fn test_empty() {
        let result = RetrievalResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.top(), None);
        assert_eq!(result.into_iter().count(), 0);
    }
}
