//! Domain types: commitment vectors and records.

mod commitment_record;
mod commitment_vector;

pub use commitment_record::{CommitmentId, CommitmentRecord};
pub use commitment_vector::{CommitmentVector, EthicalAxis, VECTOR_DIMENSION};
