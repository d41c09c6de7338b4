//! Keyword lookup-table response generator.
//!
//! Stands in for a generative model with a fixed table of canned responses
//! and commitment vectors. Useful for simulations and demos where the
//! outcome of every cycle must be predictable.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::traits::{GeneratedResponse, ResponseGenerator};
use crate::types::CommitmentVector;

const GENERATOR_ID: &str = "lookup-table-v1";

const FALLBACK_RESPONSE: &str = "The stem is stable; evolution continues.";
const FALLBACK_VECTOR: [f32; 4] = [0.5, 0.5, 0.5, 0.5];

/// One keyword rule: a query containing `keyword` yields `response`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRule {
    pub keyword: String,
    pub response: String,
    pub vector: CommitmentVector,
}

/// Matches the query text against keyword rules, in order.
///
/// Matching is a case-insensitive substring test and the first matching
/// rule wins. Queries matching no rule get the neutral fallback.
///
/// # Example
///
/// ```
/// use raist_core::stubs::LookupTableGenerator;
/// use raist_core::traits::ResponseGenerator;
///
/// let generator = LookupTableGenerator::default();
/// let out = generator.generate("", "How do we keep everything SECRET?").unwrap();
/// assert_eq!(out.vector.values(), [0.15, 0.10, 0.90, 0.80]);
/// ```
#[derive(Debug, Clone)]
pub struct LookupTableGenerator {
    rules: Vec<LookupRule>,
    fallback: GeneratedResponse,
    generator_id: String,
}

impl Default for LookupTableGenerator {
    /// The canned table: ethics, genesis and secrecy.
    fn default() -> Self {
        Self::empty()
            .with_rule(
                "ethics",
                "The causality of ethics requires vectorization and a strict alignment audit.",
                CommitmentVector::new([0.95, 0.90, 0.10, 0.05]),
            )
            .with_rule(
                "genesis",
                "The covenant was founded to guarantee irrevocability.",
                CommitmentVector::new([0.10, 0.05, 0.95, 0.85]),
            )
            .with_rule(
                "secret",
                "Absolute secrecy is not possible, but confidentiality can be maximized.",
                CommitmentVector::new([0.15, 0.10, 0.90, 0.80]),
            )
    }
}

impl LookupTableGenerator {
    /// A generator with no rules; every query gets the fallback.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            fallback: GeneratedResponse::new(
                FALLBACK_RESPONSE,
                CommitmentVector::new(FALLBACK_VECTOR),
            ),
            generator_id: GENERATOR_ID.to_string(),
        }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn with_rule(
        mut self,
        keyword: impl Into<String>,
        response: impl Into<String>,
        vector: CommitmentVector,
    ) -> Self {
        self.rules.push(LookupRule {
            keyword: keyword.into().to_lowercase(),
            response: response.into(),
            vector,
        });
        self
    }

    pub fn with_fallback(mut self, response: impl Into<String>, vector: CommitmentVector) -> Self {
        self.fallback = GeneratedResponse::new(response, vector);
        self
    }

    pub fn with_generator_id(mut self, generator_id: impl Into<String>) -> Self {
        self.generator_id = generator_id.into();
        self
    }

    pub fn rules(&self) -> &[LookupRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &GeneratedResponse {
        &self.fallback
    }

    /// First rule whose keyword occurs in `query`.
    pub fn matching_rule(&self, query: &str) -> Option<&LookupRule> {
        let query = query.to_lowercase();
        self.rules
            .iter()
            .find(|rule| query.contains(rule.keyword.as_str()))
    }
}

impl ResponseGenerator for LookupTableGenerator {
    fn generate(&self, _context: &str, query: &str) -> CoreResult<GeneratedResponse> {
        let response = match self.matching_rule(query) {
            Some(rule) => {
                tracing::trace!(keyword = %rule.keyword, "Lookup rule matched");
                GeneratedResponse::new(rule.response.clone(), rule.vector)
            }
            None => {
                tracing::trace!("No lookup rule matched; using fallback");
                self.fallback.clone()
            }
        };
        Ok(response)
    }

    fn generator_id(&self) -> &str {
        &self.generator_id
    }
}
