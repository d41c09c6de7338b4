//! RAIST core: commitment retrieval and ethical governance.
//!
//! Past commitments are stored as 4-dimensional vectors over the ethical
//! axes `[transparency, integrity, stability, respect]`. Each governance
//! cycle retrieves the commitments relevant to a query, has a
//! [`ResponseGenerator`](traits::ResponseGenerator) propose a new one, and
//! persists it only if it is aligned closely enough with a fixed ethical
//! ideal.
//!
//! # Example
//!
//! ```
//! use raist_core::governance::GovernanceLoop;
//! use raist_core::store::InMemoryCommitmentStore;
//! use raist_core::stubs::LookupTableGenerator;
//! use raist_core::Config;
//!
//! let mut governance = GovernanceLoop::from_config(
//!     InMemoryCommitmentStore::new(),
//!     LookupTableGenerator::default(),
//!     &Config::default_config(),
//! )?;
//!
//! let outcome = governance.evolve("How do we keep this secret?", &[0.1, 0.1, 0.9, 0.9])?;
//! assert!(!outcome.is_accepted());
//! assert_eq!(governance.records().len(), 1);
//! # Ok::<(), raist_core::CoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod governance;
pub mod retrieval;
pub mod similarity;
pub mod store;
pub mod stubs;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{CoreError, CoreResult};
