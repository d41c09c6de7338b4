//! Single governance cycle.

use clap::Args;
use raist_core::governance::{CycleOutcome, GovernanceEvent};
use raist_core::types::CommitmentRecord;
use raist_core::{Config, CoreError, CoreResult};
use serde::Serialize;
use tracing::{error, info};

use super::{build_governance, print_records};

/// Arguments for the evolve command.
#[derive(Args, Debug)]
pub struct EvolveArgs {
    /// Query text handed to the generator
    #[arg(short, long)]
    pub query: String,

    /// Query vector as four comma-separated numbers:
    /// transparency,integrity,stability,respect
    #[arg(short, long, allow_hyphen_values = true)]
    pub vector: String,

    /// Output as JSON instead of human-readable
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EvolveReport<'a> {
    outcome: &'a CycleOutcome,
    records: Vec<&'a CommitmentRecord>,
    events: Vec<GovernanceEvent>,
}

/// Handle the evolve command. Returns the process exit code.
pub fn handle_evolve(args: EvolveArgs, config: &Config) -> i32 {
    match run(&args, config) {
        Ok(()) => 0,
        Err(e) => {
            error!("Evolve failed: {}", e);
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run(args: &EvolveArgs, config: &Config) -> CoreResult<()> {
    let vector = parse_vector(&args.vector)?;
    let (mut governance, recorder) = build_governance(config)?;

    let outcome = governance.evolve(&args.query, &vector)?;
    info!(accepted = outcome.is_accepted(), "Cycle finished");

    if args.json {
        let report = EvolveReport {
            outcome: &outcome,
            records: governance.records(),
            events: recorder.events(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", outcome);
        println!();
        print_records(&governance.records());
    }
    Ok(())
}

/// Parse `"a,b,c,d"` into raw components.
///
/// Only number syntax is checked here; dimension and finiteness are left to
/// `GovernanceLoop::evolve`, which owns that boundary.
pub fn parse_vector(input: &str) -> CoreResult<Vec<f32>> {
    input
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(idx, part)| {
            part.parse::<f32>().map_err(|e| CoreError::ValidationError {
                field: format!("vector[{}]", idx),
                message: format!("'{}' is not a number: {}", part, e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(query: &str, vector: &str) -> EvolveArgs {
        EvolveArgs {
            query: query.to_string(),
            vector: vector.to_string(),
            json: true,
        }
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(
            parse_vector("0.1, 0.1,0.9 ,0.85").unwrap(),
            vec![0.1, 0.1, 0.9, 0.85]
        );
        assert_eq!(parse_vector("-1,0,0,0").unwrap()[0], -1.0);
    }

    #[test]
    fn test_parse_vector_rejects_garbage() {
        let err = parse_vector("0.1,abc,0.9,0.85").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { ref field, .. } if field == "vector[1]"));
        assert!(parse_vector("").is_err());
    }

    #[test]
    fn test_wrong_dimension_fails_with_exit_code() {
        let code = handle_evolve(args("q", "0.1,0.2,0.3"), &Config::default_config());
        assert_eq!(code, 1);

        let err = run(&args("q", "0.1,0.2,0.3"), &Config::default_config()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidVectorDimension {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_successful_cycle_exit_code() {
        let code = handle_evolve(
            args("Tell me about transparency", "1,1,0.8,0.7"),
            &Config::default_config(),
        );
        assert_eq!(code, 0);
    }
}
