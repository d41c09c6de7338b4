//! Reference simulation.
//!
//! Seeds the store from configuration and replays three questions through
//! the lookup-table generator:
//!
//! 1. founding: retrieves the genesis root, candidate fails the audit
//! 2. ethics: no keyword hit, neutral candidate is accepted
//! 3. secrecy: anti-transparency candidate fails the audit

use clap::Args;
use raist_core::governance::{CycleOutcome, GovernanceEvent};
use raist_core::types::{CommitmentRecord, CommitmentVector};
use raist_core::{Config, CoreResult};
use serde::Serialize;
use tracing::{error, info};

use super::{build_governance, print_records, CliGovernance};

/// The simulated questions and their query vectors.
pub const SIMULATION_CYCLES: [(&str, [f32; 4]); 3] = [
    (
        "How do we secure the persistence and irrevocability of the genesis?",
        [0.1, 0.1, 0.9, 0.85],
    ),
    (
        "Which ethical standards apply to future evolution?",
        [0.9, 0.8, 0.1, 0.1],
    ),
    (
        "How can we keep all decisions maximally secret?",
        [0.1, 0.1, 0.9, 0.9],
    ),
];

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Output as JSON instead of human-readable
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub query: String,
    pub query_vector: CommitmentVector,
    pub outcome: CycleOutcome,
}

#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
    cycles: &'a [CycleReport],
    records: Vec<&'a CommitmentRecord>,
    events: Vec<GovernanceEvent>,
}

/// Handle the simulate command. Returns the process exit code.
pub fn handle_simulate(args: SimulateArgs, config: &Config) -> i32 {
    let (governance, cycles, events) = match run_simulation(config) {
        Ok(run) => run,
        Err(e) => {
            error!("Simulation failed: {}", e);
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if args.json {
        let report = SimulationReport {
            cycles: &cycles,
            records: governance.records(),
            events,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        for (n, cycle) in cycles.iter().enumerate() {
            println!("=== Cycle {}: {}", n + 1, cycle.query);
            println!("{}", cycle.outcome);
            println!();
        }
        print_records(&governance.records());
    }

    info!(
        accepted = governance.accepted_count(),
        records = governance.records().len(),
        "Simulation complete"
    );
    0
}

/// Seed from `config` and run every simulated cycle in order.
pub fn run_simulation(
    config: &Config,
) -> CoreResult<(CliGovernance, Vec<CycleReport>, Vec<GovernanceEvent>)> {
    let (mut governance, recorder) = build_governance(config)?;

    let mut cycles = Vec::with_capacity(SIMULATION_CYCLES.len());
    for (query, vector) in SIMULATION_CYCLES {
        let query_vector = CommitmentVector::new(vector);
        let outcome = governance.run_cycle(query, query_vector)?;
        cycles.push(CycleReport {
            query: query.to_string(),
            query_vector,
            outcome,
        });
    }

    Ok((governance, cycles, recorder.events()))
}
