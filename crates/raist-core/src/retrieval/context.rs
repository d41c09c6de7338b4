//! Context assembly: query text plus ranked prior commitments.

use super::RetrievalResult;

/// Line emitted when retrieval found nothing.
pub const NO_RELEVANT_COMMITMENTS: &str = "No relevant prior commitments found.";

/// Header preceding the list of retrieved commitments.
pub const RELEVANT_COMMITMENTS_HEADER: &str = "--- Relevant prior commitments ---";

/// Formats the prompt handed to the response generator.
///
/// Pure formatting. Ranking and threshold filtering already happened in the
/// store, so entries are rendered exactly in the order supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build the context payload.
    ///
    /// ```
    /// use raist_core::retrieval::{ContextAssembler, RetrievalResult};
    ///
    /// let context = ContextAssembler::new().assemble("Why persist?", &RetrievalResult::empty());
    /// assert_eq!(context, "Current query: Why persist?\nNo relevant prior commitments found.");
    /// ```
    pub fn assemble(&self, query_text: &str, retrieved: &RetrievalResult) -> String {
        let mut lines = Vec::with_capacity(retrieved.len() + 2);
        lines.push(format!("Current query: {}", query_text));

        if retrieved.is_empty() {
            lines.push(NO_RELEVANT_COMMITMENTS.to_string());
        } else {
            lines.push(RELEVANT_COMMITMENTS_HEADER.to_string());
            for entry in retrieved {
                lines.push(format!(
                    "Commitment [{}]: {} (relevance: {:.2})",
                    entry.id, entry.commitment_text, entry.score
                ));
            }
        }

        lines.join("\n")
    }
}
