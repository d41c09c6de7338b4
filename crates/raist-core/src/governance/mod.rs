//! Ethical governance of new commitments.
//!
//! A [`GovernanceLoop`] cycle retrieves relevant prior commitments, asks the
//! [`ResponseGenerator`](crate::traits::ResponseGenerator) for a candidate,
//! audits the candidate vector against the [`EthicalReference`] and persists
//! it only when the alignment reaches the acceptance threshold.
//!
//! ```text
//! Retrieving -> Generating -> Auditing -> Accepting  (store += 1, counter += 1)
//!                                      \-> Rejecting  (no mutation)
//! ```

mod engine;
mod events;
mod outcome;
mod reference;


pub use engine::GovernanceLoop;
pub use events::{
    GovernanceEvent, GovernanceEventListener, RecordingEventListener, TracingEventListener,
};
pub use outcome::{CycleOutcome, CyclePhase};
pub use reference::{AlignmentAudit, EthicalReference};
