//! Retrieval results and context assembly.
//!
//! The store ranks and filters ([`CommitmentStore::retrieve_relevant`]);
//! this module carries the ranked result and turns it into the textual
//! context handed to the response generator.
//!
//! [`CommitmentStore::retrieve_relevant`]: crate::traits::CommitmentStore::retrieve_relevant

mod context;
mod result;

pub use context::{ContextAssembler, NO_RELEVANT_COMMITMENTS, RELEVANT_COMMITMENTS_HEADER};
pub use result::{RetrievalResult, RetrievedCommitment};
