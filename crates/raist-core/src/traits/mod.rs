//! Core trait definitions.

mod commitment_store;
mod response_generator;

pub use commitment_store::CommitmentStore;
pub use response_generator::{GeneratedResponse, ResponseGenerator};
