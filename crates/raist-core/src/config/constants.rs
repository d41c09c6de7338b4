//! Default values for the governance loop.
//!
//! Named here so configuration defaults, the CLI and tests agree on one
//! source of truth.

/// Ethical reference defaults.
pub mod governance {
    /// Ideal `[transparency, integrity, stability, respect]` vector.
    /// Transparency and integrity carry the highest weight.
    pub const IDEAL_VECTOR: [f32; 4] = [1.0, 1.0, 0.8, 0.7];

    /// Minimum alignment with the ideal for a candidate to be persisted.
    /// Alignment strictly below this value is rejected.
    pub const ACCEPTANCE_THRESHOLD: f32 = 0.85;

    /// Minimum similarity for a stored commitment to count as relevant
    /// context. Inclusive.
    pub const RETRIEVAL_THRESHOLD: f32 = 0.75;

    /// Prefix of engine-assigned ids: `CAUSAL-V-1`, `CAUSAL-V-2`, ...
    pub const ID_PREFIX: &str = "CAUSAL-V";
}

/// Genesis root commitment seeded by default.
pub mod genesis {
    pub const ID: &str = "V-000";
    pub const TEXT: &str = "The irrevocability of the covenant is the supreme principle.";
    pub const QUERY: &str = "Initialization";
    pub const SOURCE_TAG: &str = "genesis";
    /// High stability and respect for the founding rule.
    pub const VECTOR: [f32; 4] = [0.05, 0.05, 0.98, 0.90];
}

/// Similarity bounds.
pub mod similarity {
    pub const MIN: f32 = -1.0;
    pub const MAX: f32 = 1.0;
}
