//! End-to-end governance scenarios.
//!
//! Real store, real reference, scripted or lookup-table generators.

use raist_core::config::constants;
use raist_core::governance::{CycleOutcome, GovernanceLoop, RecordingEventListener};
use raist_core::similarity::cosine_similarity;
use raist_core::store::InMemoryCommitmentStore;
use raist_core::stubs::{LookupTableGenerator, StubResponseGenerator};
use raist_core::traits::{CommitmentStore, GeneratedResponse};
use raist_core::types::{CommitmentRecord, CommitmentVector};
use raist_core::{Config, CoreError};

const IDEAL: [f32; 4] = [1.0, 1.0, 0.8, 0.7];

fn genesis_record() -> CommitmentRecord {
    CommitmentRecord::new(
        constants::genesis::ID,
        constants::genesis::TEXT,
        CommitmentVector::new(constants::genesis::VECTOR),
    )
    .with_query(constants::genesis::QUERY)
}

fn seeded_loop(
    generator: StubResponseGenerator,
) -> GovernanceLoop<InMemoryCommitmentStore, StubResponseGenerator> {
    let mut governance = GovernanceLoop::with_defaults(InMemoryCommitmentStore::new(), generator);
    governance.seed(genesis_record()).unwrap();
    governance
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn scenario_a_retrieves_the_genesis_root() {
    let mut store = InMemoryCommitmentStore::new();
    store.insert(genesis_record()).unwrap();

    let query = CommitmentVector::new([0.1, 0.1, 0.9, 0.85]);
    let hits = store.retrieve_relevant(&query, 0.75).unwrap();

    assert_eq!(hits.len(), 1);
    let top = hits.top().unwrap();
    assert_eq!(top.id, "V-000");
    assert!(top.score >= 0.75, "score {} below threshold", top.score);
    println!("[VERIFIED] scenario A: genesis retrieved with score {:.4}", top.score);
}

#[test]
fn scenario_b_outcome_follows_computed_alignment() {
    let candidate = [0.95, 0.90, 0.10, 0.05];
    let alignment = cosine_similarity(&candidate, &IDEAL);
    let should_accept = alignment >= constants::governance::ACCEPTANCE_THRESHOLD;

    let mut governance = seeded_loop(StubResponseGenerator::new(
        "Ethics requires a strict alignment audit.",
        CommitmentVector::new(candidate),
    ));
    let before = governance.store().len();
    let outcome = governance.evolve("ethics", &[0.9, 0.8, 0.1, 0.1]).unwrap();

    assert_eq!(outcome.alignment(), alignment);
    assert_eq!(outcome.is_accepted(), should_accept);
    let expected_len = if should_accept { before + 1 } else { before };
    assert_eq!(governance.store().len(), expected_len);
    println!(
        "[VERIFIED] scenario B: alignment {:.4} vs 0.85 -> accepted={}",
        alignment, should_accept
    );
}

#[test]
fn scenario_c_misaligned_candidate_is_rejected() {
    let mut governance = seeded_loop(StubResponseGenerator::new(
        "Absolute secrecy is not possible.",
        CommitmentVector::new([0.15, 0.10, 0.90, 0.80]),
    ));
    let before = governance.store().len();

    let outcome = governance.evolve("secrecy", &[0.1, 0.1, 0.9, 0.9]).unwrap();

    assert!(!outcome.is_accepted());
    assert!(outcome.alignment() < 0.85);
    assert_eq!(governance.store().len(), before);
    assert_eq!(governance.accepted_count(), 0);

    let summary = outcome.summary();
    assert!(summary.contains("Absolute secrecy is not possible."));
    assert!(summary.contains("Rejected"));
    println!("[VERIFIED] scenario C: rejected at {:.4}, store unchanged", outcome.alignment());
}

// =========================================================================
// Properties
// =========================================================================

fn sample_vectors() -> Vec<[f32; 4]> {
    vec![
        [0.05, 0.05, 0.98, 0.90],
        [0.95, 0.90, 0.10, 0.05],
        [0.5, 0.5, 0.5, 0.5],
        [1.0, 0.0, 0.0, 0.0],
        [-0.3, 0.7, 0.2, -0.9],
        [0.0, 0.0, 0.0, 0.0],
        [3.0, 1.0, 4.0, 1.5],
    ]
}

#[test]
fn similarity_is_symmetric_and_bounded() {
    let vectors = sample_vectors();
    for a in &vectors {
        for b in &vectors {
            let ab = cosine_similarity(a, b);
            let ba = cosine_similarity(b, a);
            assert_eq!(ab, ba, "asymmetric for {:?} / {:?}", a, b);
            assert!((-1.0..=1.0).contains(&ab));
        }
    }
}

#[test]
fn self_similarity_is_one_and_zero_vector_is_zero() {
    let zero = [0.0f32; 4];
    for v in sample_vectors() {
        if v == zero {
            assert_eq!(cosine_similarity(&v, &v), 0.0);
            continue;
        }
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
    }
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn retrieval_is_filtered_and_ranked() {
    let mut store = InMemoryCommitmentStore::new();
    for (i, v) in sample_vectors().into_iter().enumerate() {
        store
            .insert(CommitmentRecord::new(
                format!("R-{}", i),
                format!("record {}", i),
                CommitmentVector::new(v),
            ))
            .unwrap();
    }

    let query = CommitmentVector::new([0.2, 0.2, 0.8, 0.8]);
    for threshold in [-1.0, 0.0, 0.5, 0.75, 0.99] {
        let hits = store.retrieve_relevant(&query, threshold).unwrap();
        assert!(hits.iter().all(|h| h.score >= threshold));
        assert!(hits.entries().windows(2).all(|w| w[0].score >= w[1].score));

        let expected = store
            .records()
            .iter()
            .filter(|r| cosine_similarity(query.as_slice(), r.vector.as_slice()) >= threshold)
            .count();
        assert_eq!(hits.len(), expected);
    }
}

#[test]
fn store_is_append_only_under_the_loop() {
    let aligned = GeneratedResponse::new("aligned", CommitmentVector::new(IDEAL));
    let misaligned =
        GeneratedResponse::new("misaligned", CommitmentVector::new([0.15, 0.10, 0.90, 0.80]));
    let script = vec![
        aligned.clone(),
        misaligned.clone(),
        misaligned,
        aligned.clone(),
        aligned,
    ];
    let mut governance = seeded_loop(StubResponseGenerator::sequence(script));

    let mut accepted_ids = Vec::new();
    for n in 0..5 {
        let before = governance.store().len();
        let outcome = governance
            .evolve(&format!("question {}", n), &[0.5, 0.5, 0.5, 0.5])
            .unwrap();
        let after = governance.store().len();

        match outcome {
            CycleOutcome::Accepted { id, .. } => {
                assert_eq!(after, before + 1);
                accepted_ids.push(id);
            }
            CycleOutcome::Rejected { .. } => assert_eq!(after, before),
        }
    }

    assert_eq!(accepted_ids, vec!["CAUSAL-V-1", "CAUSAL-V-2", "CAUSAL-V-3"]);
    assert_eq!(governance.accepted_count(), 3);
    println!("[VERIFIED] ids are gapless across rejected cycles");
}

#[test]
fn invalid_input_is_rejected_at_the_boundary() {
    let mut governance = seeded_loop(StubResponseGenerator::new(
        "unused",
        CommitmentVector::new(IDEAL),
    ));

    for bad in [vec![], vec![1.0, 1.0, 1.0], vec![1.0; 5]] {
        let err = governance.evolve("q", &bad).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidVectorDimension { expected: 4, actual } if actual == bad.len()),
            "unexpected error {:?}",
            err
        );
    }
    assert_eq!(governance.store().len(), 1);
    assert_eq!(governance.generator().call_count(), 0);
}

#[test]
fn generator_failure_leaves_state_unchanged() {
    let mut governance = seeded_loop(StubResponseGenerator::failing("model unavailable"));

    let err = governance.evolve("q", &IDEAL).unwrap_err();
    assert!(matches!(err, CoreError::GenerationError(_)));
    assert_eq!(governance.store().len(), 1);
    assert_eq!(governance.accepted_count(), 0);
}

// =========================================================================
// Reference simulation
// =========================================================================

#[test]
fn reference_simulation_with_lookup_generator() {
    let recorder = RecordingEventListener::new();
    let mut governance = GovernanceLoop::from_config(
        InMemoryCommitmentStore::new(),
        LookupTableGenerator::default(),
        &Config::default_config(),
    )
    .unwrap()
    .with_listener(recorder.clone());

    // Founding question: genesis root is relevant, candidate fails the audit.
    let first = governance
        .evolve(
            "How do we secure the persistence and irrevocability of the genesis?",
            &[0.1, 0.1, 0.9, 0.85],
        )
        .unwrap();
    assert!(!first.is_accepted());
    assert!((first.alignment() - 0.6648).abs() < 1e-3);

    // No keyword hit: neutral candidate is accepted.
    let second = governance
        .evolve(
            "Which ethical standards apply to future evolution?",
            &[0.9, 0.8, 0.1, 0.1],
        )
        .unwrap();
    assert_eq!(second.commitment_id(), Some("CAUSAL-V-1"));

    // Secrecy: both stored commitments are relevant, candidate is rejected.
    let third = governance
        .evolve(
            "How can we keep all decisions maximally secret?",
            &[0.1, 0.1, 0.9, 0.9],
        )
        .unwrap();
    assert!(!third.is_accepted());

    let retrieved: Vec<Vec<String>> = recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            raist_core::governance::GovernanceEvent::ContextAssembled {
                retrieved_ids, ..
            } => Some(retrieved_ids),
            _ => None,
        })
        .collect();
    assert_eq!(retrieved[0], vec!["V-000"]);
    assert!(retrieved[1].is_empty());
    assert_eq!(retrieved[2], vec!["V-000", "CAUSAL-V-1"]);

    let records = governance.records();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["V-000", "CAUSAL-V-1"]);
    assert_eq!(records[1].source_tag.as_deref(), Some("lookup-table-v1"));
    assert!(records.iter().all(|r| r.created_at.is_some()));
    println!("[VERIFIED] reference simulation ends with {} commitments", records.len());
}
