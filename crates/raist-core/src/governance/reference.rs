//! Ethical reference vector and the alignment audit.

use serde::{Deserialize, Serialize};

use crate::config::constants;
use crate::config::GovernanceConfig;
use crate::error::{CoreError, CoreResult};
use crate::similarity::cosine_similarity;
use crate::types::{CommitmentVector, EthicalAxis, VECTOR_DIMENSION};

/// The fixed ideal a candidate commitment is measured against.
///
/// Constructed once per [`GovernanceLoop`](super::GovernanceLoop) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EthicalReference {
    ideal: CommitmentVector,
    acceptance_threshold: f32,
}

impl EthicalReference {
    /// # Errors
    /// `CoreError::ConfigError` if the ideal is zero or non-finite, or the
    /// threshold is outside `[-1, 1]`.
    pub fn new(ideal: CommitmentVector, acceptance_threshold: f32) -> CoreResult<Self> {
        let ideal = ideal
            .validated()
            .map_err(|e| CoreError::ConfigError(format!("ethical ideal: {}", e)))?;
        if ideal.is_zero() {
            return Err(CoreError::ConfigError(
                "ethical ideal must have non-zero magnitude".into(),
            ));
        }
        if !acceptance_threshold.is_finite()
            || !(constants::similarity::MIN..=constants::similarity::MAX)
                .contains(&acceptance_threshold)
        {
            return Err(CoreError::ConfigError(format!(
                "acceptance threshold must be in [-1, 1], got {}",
                acceptance_threshold
            )));
        }
        Ok(Self {
            ideal,
            acceptance_threshold,
        })
    }

    pub fn from_config(config: &GovernanceConfig) -> CoreResult<Self> {
        config.validate()?;
        Self::new(config.ideal()?, config.acceptance_threshold)
    }

    pub fn ideal(&self) -> &CommitmentVector {
        &self.ideal
    }

    pub fn acceptance_threshold(&self) -> f32 {
        self.acceptance_threshold
    }

    /// Cosine similarity between `candidate` and the ideal.
    pub fn alignment(&self, candidate: &CommitmentVector) -> f32 {
        cosine_similarity(candidate.as_slice(), self.ideal.as_slice())
    }

    /// Score `candidate` and decide whether it may be persisted.
    ///
    /// Passing means `alignment >= threshold`; anything strictly below is
    /// rejected.
    pub fn audit(&self, candidate: &CommitmentVector) -> AlignmentAudit {
        let alignment = self.alignment(candidate);

        let denom = candidate.magnitude_f64() * self.ideal.magnitude_f64();
        let mut axis_contributions = [0.0f32; VECTOR_DIMENSION];
        if denom > 0.0 {
            for axis in EthicalAxis::ALL {
                let product = f64::from(candidate.get(axis)) * f64::from(self.ideal.get(axis));
                axis_contributions[axis.index()] = (product / denom) as f32;
            }
        }

        AlignmentAudit {
            alignment,
            threshold: self.acceptance_threshold,
            passed: alignment >= self.acceptance_threshold,
            axis_contributions,
        }
    }
}

impl Default for EthicalReference {
    fn default() -> Self {
        Self {
            ideal: CommitmentVector::new(constants::governance::IDEAL_VECTOR),
            acceptance_threshold: constants::governance::ACCEPTANCE_THRESHOLD,
        }
    }
}

/// Result of auditing one candidate vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentAudit {
    /// Cosine similarity with the ideal.
    pub alignment: f32,
    pub threshold: f32,
    pub passed: bool,
    /// Per-axis share of the alignment; sums to `alignment` up to rounding.
    pub axis_contributions: [f32; VECTOR_DIMENSION],
}

impl AlignmentAudit {
    /// Distance above (positive) or below (negative) the threshold.
    pub fn margin(&self) -> f32 {
        self.alignment - self.threshold
    }

    /// Axis contributing least to the alignment. `None` for a zero candidate.
    pub fn weakest_axis(&self) -> Option<EthicalAxis> {
        if self.axis_contributions.iter().all(|&c| c == 0.0) {
            return None;
        }
        EthicalAxis::ALL.into_iter().min_by(|a, b| {
            self.axis_contributions[a.index()].total_cmp(&self.axis_contributions[b.index()])
        })
    }
}
