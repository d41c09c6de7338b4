//! CLI command handlers
//!
//! - `simulate`: the reference three-cycle simulation
//! - `evolve`: a single governance cycle

pub mod evolve;
pub mod simulate;

use raist_core::governance::{GovernanceLoop, RecordingEventListener};
use raist_core::store::InMemoryCommitmentStore;
use raist_core::stubs::LookupTableGenerator;
use raist_core::types::CommitmentRecord;
use raist_core::{Config, CoreResult};

/// Governance loop used by every command.
pub type CliGovernance = GovernanceLoop<InMemoryCommitmentStore, LookupTableGenerator>;

/// Build the loop from `config` with a recorder attached before seeding, so
/// seed events are captured too.
pub fn build_governance(config: &Config) -> CoreResult<(CliGovernance, RecordingEventListener)> {
    config.validate()?;

    let recorder = RecordingEventListener::new();
    let mut governance = GovernanceLoop::new(
        InMemoryCommitmentStore::new(),
        LookupTableGenerator::default(),
        &config.governance,
    )?
    .with_listener(recorder.clone());

    for record in config.seed_records()? {
        governance.seed(record)?;
    }
    Ok((governance, recorder))
}

/// Print the audit listing of persisted commitments.
pub fn print_records(records: &[&CommitmentRecord]) {
    println!("Persisted commitments: {}", records.len());
    for record in records {
        let created = record
            .created_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  -> {}: '{}' | vector {} | created {}",
            record.id, record.commitment_text, record.vector, created
        );
    }
}
