//! Governance event stream.
//!
//! The loop emits a [`GovernanceEvent`] at every step of a cycle. Listeners
//! observe; they cannot influence control flow. Registering none is fine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CyclePhase;
use crate::types::{CommitmentId, CommitmentVector, EthicalAxis};

/// A step in the life of the governance loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    /// A root commitment was loaded outside any cycle.
    CommitmentSeeded {
        id: CommitmentId,
        timestamp: DateTime<Utc>,
    },
    CycleStarted {
        cycle_id: Uuid,
        query: String,
        timestamp: DateTime<Utc>,
    },
    PhaseEntered {
        cycle_id: Uuid,
        phase: CyclePhase,
        timestamp: DateTime<Utc>,
    },
    /// Retrieval finished and the context was built.
    ContextAssembled {
        cycle_id: Uuid,
        retrieved_ids: Vec<CommitmentId>,
        timestamp: DateTime<Utc>,
    },
    CandidateGenerated {
        cycle_id: Uuid,
        response: String,
        vector: CommitmentVector,
        timestamp: DateTime<Utc>,
    },
    CommitmentAccepted {
        cycle_id: Uuid,
        id: CommitmentId,
        alignment: f32,
        timestamp: DateTime<Utc>,
    },
    CommitmentRejected {
        cycle_id: Uuid,
        alignment: f32,
        threshold: f32,
        weakest_axis: Option<EthicalAxis>,
        timestamp: DateTime<Utc>,
    },
}

impl GovernanceEvent {
    /// Cycle this event belongs to; `None` for seeding.
    pub fn cycle_id(&self) -> Option<Uuid> {
        match self {
            GovernanceEvent::CommitmentSeeded { .. } => None,
            GovernanceEvent::CycleStarted { cycle_id, .. }
            | GovernanceEvent::PhaseEntered { cycle_id, .. }
            | GovernanceEvent::ContextAssembled { cycle_id, .. }
            | GovernanceEvent::CandidateGenerated { cycle_id, .. }
            | GovernanceEvent::CommitmentAccepted { cycle_id, .. }
            | GovernanceEvent::CommitmentRejected { cycle_id, .. } => Some(*cycle_id),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            GovernanceEvent::CommitmentSeeded { timestamp, .. }
            | GovernanceEvent::CycleStarted { timestamp, .. }
            | GovernanceEvent::PhaseEntered { timestamp, .. }
            | GovernanceEvent::ContextAssembled { timestamp, .. }
            | GovernanceEvent::CandidateGenerated { timestamp, .. }
            | GovernanceEvent::CommitmentAccepted { timestamp, .. }
            | GovernanceEvent::CommitmentRejected { timestamp, .. } => *timestamp,
        }
    }

    /// Phase carried by a `PhaseEntered` event.
    pub fn phase(&self) -> Option<CyclePhase> {
        match self {
            GovernanceEvent::PhaseEntered { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// Receives governance events.
pub trait GovernanceEventListener: Send + Sync {
    fn on_event(&self, event: &GovernanceEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventListener;

impl GovernanceEventListener for TracingEventListener {
    fn on_event(&self, event: &GovernanceEvent) {
        match event {
            GovernanceEvent::CommitmentSeeded { id, .. } => {
                tracing::info!(id = %id, "Root commitment anchored");
            }
            GovernanceEvent::CycleStarted { cycle_id, query, .. } => {
                tracing::info!(%cycle_id, query = %query, "Governance cycle started");
            }
            GovernanceEvent::PhaseEntered {
                cycle_id, phase, ..
            } => {
                tracing::debug!(%cycle_id, %phase, "Phase entered");
            }
            GovernanceEvent::ContextAssembled {
                cycle_id,
                retrieved_ids,
                ..
            } => {
                if retrieved_ids.is_empty() {
                    tracing::info!(%cycle_id, "Context built without prior commitments");
                } else {
                    tracing::info!(
                        %cycle_id,
                        linked = retrieved_ids.len(),
                        ids = ?retrieved_ids,
                        "Context built from prior commitments"
                    );
                }
            }
            GovernanceEvent::CandidateGenerated {
                cycle_id, vector, ..
            } => {
                tracing::debug!(%cycle_id, %vector, "Candidate generated");
            }
            GovernanceEvent::CommitmentAccepted {
                cycle_id,
                id,
                alignment,
                ..
            } => {
                tracing::info!(%cycle_id, id = %id, alignment, "Commitment accepted");
            }
            GovernanceEvent::CommitmentRejected {
                cycle_id,
                alignment,
                threshold,
                weakest_axis,
                ..
            } => {
                tracing::warn!(
                    %cycle_id,
                    alignment,
                    threshold,
                    weakest_axis = ?weakest_axis,
                    "Commitment rejected by ethical governor"
                );
            }
        }
    }
}

/// Collects events into a shared buffer.
///
/// Clones share the same buffer, so keep a clone before handing the listener
/// to the loop.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventListener {
    events: Arc<Mutex<Vec<GovernanceEvent>>>,
}

impl RecordingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().clone()
    }

    /// Phases entered during `cycle_id`, in order.
    pub fn phases(&self, cycle_id: Uuid) -> Vec<CyclePhase> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.cycle_id() == Some(cycle_id))
            .filter_map(GovernanceEvent::phase)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl GovernanceEventListener for RecordingEventListener {
    fn on_event(&self, event: &GovernanceEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_listener_shares_buffer() {
        let recorder = RecordingEventListener::new();
        let handle = recorder.clone();
        let cycle_id = Uuid::new_v4();

        recorder.on_event(&GovernanceEvent::PhaseEntered {
            cycle_id,
            phase: CyclePhase::Retrieving,
            timestamp: Utc::now(),
        });
        recorder.on_event(&GovernanceEvent::CommitmentSeeded {
            id: "V-000".into(),
            timestamp: Utc::now(),
        });

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.phases(cycle_id), vec![CyclePhase::Retrieving]);
        handle.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_event_accessors() {
        let seeded = GovernanceEvent::CommitmentSeeded {
            id: "V-000".into(),
            timestamp: Utc::now(),
        };
        assert_eq!(seeded.cycle_id(), None);
        assert_eq!(seeded.phase(), None);

        let cycle_id = Uuid::new_v4();
        let rejected = GovernanceEvent::CommitmentRejected {
            cycle_id,
            alignment: 0.71,
            threshold: 0.85,
            weakest_axis: Some(EthicalAxis::Integrity),
            timestamp: Utc::now(),
        };
        assert_eq!(rejected.cycle_id(), Some(cycle_id));
    }

    #[test]
    fn test_event_json_shape() {
        let event = GovernanceEvent::CommitmentAccepted {
            cycle_id: Uuid::nil(),
            id: "CAUSAL-V-1".into(),
            alignment: 0.99,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "commitment_accepted");
        assert_eq!(json["id"], "CAUSAL-V-1");
    }

    #[test]
    fn test_tracing_listener_handles_every_event() {
        let listener = TracingEventListener;
        let cycle_id = Uuid::new_v4();
        let now = Utc::now();
        for event in [
            GovernanceEvent::CycleStarted {
                cycle_id,
                query: "q".into(),
                timestamp: now,
            },
            GovernanceEvent::ContextAssembled {
                cycle_id,
                retrieved_ids: vec![],
                timestamp: now,
            },
            GovernanceEvent::CandidateGenerated {
                cycle_id,
                response: "r".into(),
                vector: CommitmentVector::zeroed(),
                timestamp: now,
            },
        ] {
            listener.on_event(&event);
        }
    }
}
