//! Response generator trait.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::CommitmentVector;

/// Candidate produced by a generator for one governance cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub text: String,
    pub vector: CommitmentVector,
}

impl GeneratedResponse {
    pub fn new(text: impl Into<String>, vector: CommitmentVector) -> Self {
        Self {
            text: text.into(),
            vector,
        }
    }
}

/// Produces a candidate response and commitment vector from an assembled
/// context.
///
/// The governance loop calls `generate` exactly once per cycle and relies on
/// nothing but its return value. A canned lookup table, a test double, or a
/// real model all fit behind this trait.
pub trait ResponseGenerator: Send + Sync {
    /// Generate a candidate for `query` given the assembled `context`.
    fn generate(&self, context: &str, query: &str) -> CoreResult<GeneratedResponse>;

    /// Identity of the generator, used as the default provenance tag.
    fn generator_id(&self) -> &str;
}
