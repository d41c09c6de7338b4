//! Scripted response generator for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::{GeneratedResponse, ResponseGenerator};
use crate::types::CommitmentVector;

/// Returns scripted responses and records how it was called.
///
/// A sequence of responses is replayed in order and wraps around once
/// exhausted. A failing stub returns `CoreError::GenerationError` on every
/// call.
#[derive(Debug)]
pub struct StubResponseGenerator {
    responses: Vec<GeneratedResponse>,
    failure: Option<String>,
    generator_id: String,
    calls: AtomicUsize,
    last_context: Mutex<Option<String>>,
}

impl StubResponseGenerator {
    /// Always answer with `text` and `vector`.
    pub fn new(text: impl Into<String>, vector: CommitmentVector) -> Self {
        Self::sequence(vec![GeneratedResponse::new(text, vector)])
    }

    pub fn sequence(responses: Vec<GeneratedResponse>) -> Self {
        Self {
            responses,
            failure: None,
            generator_id: "stub-generator".to_string(),
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        let mut stub = Self::sequence(Vec::new());
        stub.failure = Some(message.into());
        stub
    }

    pub fn with_generator_id(mut self, generator_id: impl Into<String>) -> Self {
        self.generator_id = generator_id.into();
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Context passed to the most recent `generate` call.
    pub fn last_context(&self) -> Option<String> {
        self.last_context.lock().clone()
    }
}

impl ResponseGenerator for StubResponseGenerator {
    fn generate(&self, context: &str, _query: &str) -> CoreResult<GeneratedResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_context.lock() = Some(context.to_string());

        if let Some(message) = &self.failure {
            return Err(CoreError::GenerationError(message.clone()));
        }
        if self.responses.is_empty() {
            return Err(CoreError::GenerationError(
                "stub generator has no scripted responses".to_string(),
            ));
        }
        Ok(self.responses[call % self.responses.len()].clone())
    }

    fn generator_id(&self) -> &str {
        &self.generator_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps() {
        let stub = StubResponseGenerator::sequence(vec![
            GeneratedResponse::new("a", CommitmentVector::new([1.0; 4])),
            GeneratedResponse::new("b", CommitmentVector::new([0.5; 4])),
        ]);
        let texts: Vec<String> = (0..3)
            .map(|_| stub.generate("ctx", "q").unwrap().text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "a"]);
        assert_eq!(stub.call_count(), 3);
        assert_eq!(stub.last_context().as_deref(), Some("ctx"));
    }

    #[test]
    fn test_failing_stub() {
        let stub = StubResponseGenerator::failing("model offline");
        let err = stub.generate("ctx", "q").unwrap_err();
        assert!(matches!(err, CoreError::GenerationError(ref m) if m == "model offline"));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        let stub = StubResponseGenerator::sequence(Vec::new());
        assert!(stub.generate("", "").is_err());
    }
}
