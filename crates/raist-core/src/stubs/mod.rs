//! Stand-in implementations of the core traits.
//!
//! - [`LookupTableGenerator`]: deterministic keyword table, used by the
//!   simulation CLI
//! - [`StubResponseGenerator`]: scripted test double

mod lookup_generator;
mod response_stub;

pub use lookup_generator::{LookupRule, LookupTableGenerator};
pub use response_stub::StubResponseGenerator;
