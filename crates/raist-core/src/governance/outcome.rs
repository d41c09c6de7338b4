//! Cycle phases and terminal outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AlignmentAudit;
use crate::types::CommitmentId;

/// Phase of a governance cycle.
///
/// `Retrieving -> Generating -> Auditing -> {Accepting | Rejecting}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Retrieving,
    Generating,
    Auditing,
    Accepting,
    Rejecting,
}

impl CyclePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::Retrieving => "retrieving",
            CyclePhase::Generating => "generating",
            CyclePhase::Auditing => "auditing",
            CyclePhase::Accepting => "accepting",
            CyclePhase::Rejecting => "rejecting",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CyclePhase::Accepting | CyclePhase::Rejecting)
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a governance cycle ended.
///
/// Rejection is an ordinary outcome, not an error. `Display` renders the
/// human-readable summary with the response text and the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Candidate persisted under a freshly assigned id.
    Accepted {
        id: CommitmentId,
        response: String,
        audit: AlignmentAudit,
    },
    /// Candidate discarded; the store was not touched.
    Rejected {
        response: String,
        audit: AlignmentAudit,
    },
}

impl CycleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CycleOutcome::Accepted { .. })
    }

    pub fn response(&self) -> &str {
        match self {
            CycleOutcome::Accepted { response, .. } | CycleOutcome::Rejected { response, .. } => {
                response
            }
        }
    }

    pub fn audit(&self) -> &AlignmentAudit {
        match self {
            CycleOutcome::Accepted { audit, .. } | CycleOutcome::Rejected { audit, .. } => audit,
        }
    }

    pub fn alignment(&self) -> f32 {
        self.audit().alignment
    }

    /// Id of the persisted commitment, if accepted.
    pub fn commitment_id(&self) -> Option<&str> {
        match self {
            CycleOutcome::Accepted { id, .. } => Some(id),
            CycleOutcome::Rejected { .. } => None,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        match self {
            CycleOutcome::Accepted { .. } => CyclePhase::Accepting,
            CycleOutcome::Rejected { .. } => CyclePhase::Rejecting,
        }
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Accepted {
                id,
                response,
                audit,
            } => write!(
                f,
                "Response: {} | Accepted: new commitment persisted (ID: {}, alignment {:.4}).",
                response, id, audit.alignment
            ),
            CycleOutcome::Rejected { response, audit } => write!(
                f,
                "Response: {} | Rejected by the ethical governor: alignment {:.4} below threshold {:.2}; the commitment must be revised.",
                response, audit.alignment, audit.threshold
            ),
        }
    }
}
