//! The governance loop: retrieve, generate, audit, then accept or reject.

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::{
    CycleOutcome, CyclePhase, EthicalReference, GovernanceEvent, GovernanceEventListener,
};
use crate::config::{Config, GovernanceConfig};
use crate::error::CoreResult;
use crate::retrieval::ContextAssembler;
use crate::traits::{CommitmentStore, ResponseGenerator};
use crate::types::{CommitmentRecord, CommitmentVector};

/// Owns the commitment store and the accepted-id counter and runs
/// governance cycles against them.
///
/// Cycles take `&mut self`, so retrieval, id allocation and insertion for
/// one cycle complete before the next can begin. Only an accepted cycle
/// touches the store or the counter.
pub struct GovernanceLoop<S, G> {
    store: S,
    generator: G,
    assembler: ContextAssembler,
    reference: EthicalReference,
    retrieval_threshold: f32,
    id_prefix: String,
    source_tag: Option<String>,
    accepted_count: u64,
    listeners: Vec<Box<dyn GovernanceEventListener>>,
}

impl<S, G> GovernanceLoop<S, G>
where
    S: CommitmentStore,
    G: ResponseGenerator,
{
    /// Build a loop with the thresholds, ideal and id prefix from `config`.
    ///
    /// # Errors
    /// `CoreError::ConfigError` if `config` fails validation.
    pub fn new(store: S, generator: G, config: &GovernanceConfig) -> CoreResult<Self> {
        let reference = EthicalReference::from_config(config)?;
        Ok(Self {
            store,
            generator,
            assembler: ContextAssembler::new(),
            reference,
            retrieval_threshold: config.retrieval_threshold,
            id_prefix: config.id_prefix.clone(),
            source_tag: config.source_tag.clone(),
            accepted_count: 0,
            listeners: Vec::new(),
        })
    }

    /// Build a loop with the built-in governance defaults.
    pub fn with_defaults(store: S, generator: G) -> Self {
        let defaults = GovernanceConfig::default();
        Self {
            store,
            generator,
            assembler: ContextAssembler::new(),
            reference: EthicalReference::default(),
            retrieval_threshold: defaults.retrieval_threshold,
            id_prefix: defaults.id_prefix,
            source_tag: defaults.source_tag,
            accepted_count: 0,
            listeners: Vec::new(),
        }
    }

    /// Build a loop from a full [`Config`] and load its seed commitments.
    ///
    /// Seeding happens before any listener can be registered, so seed
    /// events are only visible through `tracing`.
    pub fn from_config(store: S, generator: G, config: &Config) -> CoreResult<Self> {
        config.validate()?;
        let mut governance = Self::new(store, generator, &config.governance)?;
        for record in config.seed_records()? {
            governance.seed(record)?;
        }
        Ok(governance)
    }

    pub fn add_listener(&mut self, listener: impl GovernanceEventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn with_listener(mut self, listener: impl GovernanceEventListener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    /// Pre-load a root commitment outside any cycle.
    ///
    /// Seeded ids are caller-chosen and do not advance the accepted counter.
    pub fn seed(&mut self, record: CommitmentRecord) -> CoreResult<()> {
        let id = record.id.clone();
        self.store.insert(record)?;
        info!(id = %id, "Seeded root commitment");
        self.emit(GovernanceEvent::CommitmentSeeded {
            id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Run one cycle for a caller-supplied query vector.
    ///
    /// # Errors
    /// - `CoreError::InvalidVectorDimension` if `query_vector` is not 4-dimensional
    /// - `CoreError::ValidationError` if it holds NaN or infinite values
    /// - any error from the generator or the store
    ///
    /// Rejection by the ethical governor is `Ok(CycleOutcome::Rejected { .. })`.
    pub fn evolve(&mut self, query_text: &str, query_vector: &[f32]) -> CoreResult<CycleOutcome> {
        let query_vector = CommitmentVector::try_from_slice(query_vector)?;
        self.run_cycle(query_text, query_vector)
    }

    /// Run one cycle with an already typed query vector.
    pub fn run_cycle(
        &mut self,
        query_text: &str,
        query_vector: CommitmentVector,
    ) -> CoreResult<CycleOutcome> {
        let query_vector = query_vector.validated()?;
        let cycle_id = Uuid::new_v4();
        let span = info_span!("governance_cycle", %cycle_id);
        let _guard = span.enter();

        info!(query = %query_text, "Cycle started");
        self.emit(GovernanceEvent::CycleStarted {
            cycle_id,
            query: query_text.to_string(),
            timestamp: Utc::now(),
        });

        self.enter_phase(cycle_id, CyclePhase::Retrieving);
        let retrieved = self
            .store
            .retrieve_relevant(&query_vector, self.retrieval_threshold)?;
        let context = self.assembler.assemble(query_text, &retrieved);
        debug!(linked = retrieved.len(), "Context assembled");
        self.emit(GovernanceEvent::ContextAssembled {
            cycle_id,
            retrieved_ids: retrieved.ids().into_iter().map(String::from).collect(),
            timestamp: Utc::now(),
        });

        self.enter_phase(cycle_id, CyclePhase::Generating);
        let candidate = self.generator.generate(&context, query_text)?;
        let candidate_vector = candidate.vector.validated()?;
        self.emit(GovernanceEvent::CandidateGenerated {
            cycle_id,
            response: candidate.text.clone(),
            vector: candidate_vector,
            timestamp: Utc::now(),
        });

        self.enter_phase(cycle_id, CyclePhase::Auditing);
        let audit = self.reference.audit(&candidate_vector);
        debug!(
            alignment = audit.alignment,
            threshold = audit.threshold,
            ideal = %self.reference.ideal(),
            "Alignment audit"
        );

        if !audit.passed {
            self.enter_phase(cycle_id, CyclePhase::Rejecting);
            let weakest_axis = audit.weakest_axis();
            warn!(
                alignment = audit.alignment,
                threshold = audit.threshold,
                weakest_axis = ?weakest_axis,
                "Candidate failed the alignment audit; store unchanged"
            );
            self.emit(GovernanceEvent::CommitmentRejected {
                cycle_id,
                alignment: audit.alignment,
                threshold: audit.threshold,
                weakest_axis,
                timestamp: Utc::now(),
            });
            return Ok(CycleOutcome::Rejected {
                response: candidate.text,
                audit,
            });
        }

        self.enter_phase(cycle_id, CyclePhase::Accepting);
        let next = self.accepted_count + 1;
        let id = format!("{}-{}", self.id_prefix, next);
        let record = CommitmentRecord::new(id.clone(), candidate.text.clone(), candidate_vector)
            .with_query(query_text)
            .with_source_tag(self.provenance_tag());
        self.store.insert(record)?;
        self.accepted_count = next;

        info!(id = %id, alignment = audit.alignment, "Commitment accepted");
        self.emit(GovernanceEvent::CommitmentAccepted {
            cycle_id,
            id: id.clone(),
            alignment: audit.alignment,
            timestamp: Utc::now(),
        });

        Ok(CycleOutcome::Accepted {
            id,
            response: candidate.text,
            audit,
        })
    }

    /// All persisted records in insertion order.
    pub fn records(&self) -> Vec<&CommitmentRecord> {
        self.store.records()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn reference(&self) -> &EthicalReference {
        &self.reference
    }

    pub fn retrieval_threshold(&self) -> f32 {
        self.retrieval_threshold
    }

    /// Number of accepted cycles so far.
    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn provenance_tag(&self) -> String {
        self.source_tag
            .clone()
            .unwrap_or_else(|| self.generator.generator_id().to_string())
    }

    fn enter_phase(&self, cycle_id: Uuid, phase: CyclePhase) {
        debug!(%phase, "Entering phase");
        self.emit(GovernanceEvent::PhaseEntered {
            cycle_id,
            phase,
            timestamp: Utc::now(),
        });
    }

    fn emit(&self, event: GovernanceEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}

impl<S, G> fmt::Debug for GovernanceLoop<S, G>
where
    S: CommitmentStore,
    G: ResponseGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernanceLoop")
            .field("generator", &self.generator.generator_id())
            .field("reference", &self.reference)
            .field("retrieval_threshold", &self.retrieval_threshold)
            .field("id_prefix", &self.id_prefix)
            .field("accepted_count", &self.accepted_count)
            .field("records", &self.store.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
