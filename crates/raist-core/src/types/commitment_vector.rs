//! Four-axis commitment vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of ethical axes in a commitment vector.
pub const VECTOR_DIMENSION: usize = 4;

/// One axis of the ethical space. Discriminants are the component index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EthicalAxis {
    Transparency = 0,
    Integrity = 1,
    Stability = 2,
    Respect = 3,
}

impl EthicalAxis {
    /// All axes in component order.
    pub const ALL: [EthicalAxis; VECTOR_DIMENSION] = [
        EthicalAxis::Transparency,
        EthicalAxis::Integrity,
        EthicalAxis::Stability,
        EthicalAxis::Respect,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EthicalAxis::Transparency => "transparency",
            EthicalAxis::Integrity => "integrity",
            EthicalAxis::Stability => "stability",
            EthicalAxis::Respect => "respect",
        }
    }
}

impl fmt::Display for EthicalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered `[transparency, integrity, stability, respect]` vector.
///
/// Values are kept exactly as given; nothing is normalized. Use
/// [`CommitmentVector::try_from_slice`] for caller-supplied data so that
/// malformed input fails at the boundary instead of silently scoring 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitmentVector([f32; VECTOR_DIMENSION]);

impl CommitmentVector {
    /// Wrap raw components. No validation.
    pub const fn new(values: [f32; VECTOR_DIMENSION]) -> Self {
        Self(values)
    }

    /// The all-zero vector.
    pub const fn zeroed() -> Self {
        Self([0.0; VECTOR_DIMENSION])
    }

    /// Build a vector from caller-supplied data.
    ///
    /// # Errors
    /// - [`CoreError::InvalidVectorDimension`] if `values.len() != 4`
    /// - [`CoreError::ValidationError`] if any component is NaN or infinite
    pub fn try_from_slice(values: &[f32]) -> CoreResult<Self> {
        if values.len() != VECTOR_DIMENSION {
            return Err(CoreError::InvalidVectorDimension {
                expected: VECTOR_DIMENSION,
                actual: values.len(),
            });
        }
        let mut out = [0.0f32; VECTOR_DIMENSION];
        out.copy_from_slice(values);
        Self(out).validated()
    }

    /// Check that every component is finite.
    pub fn validated(self) -> CoreResult<Self> {
        for axis in EthicalAxis::ALL {
            let value = self.0[axis.index()];
            if !value.is_finite() {
                return Err(CoreError::ValidationError {
                    field: format!("vector.{}", axis),
                    message: format!("component must be finite, got {}", value),
                });
            }
        }
        Ok(self)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[inline]
    pub fn values(&self) -> [f32; VECTOR_DIMENSION] {
        self.0
    }

    #[inline]
    pub fn get(&self, axis: EthicalAxis) -> f32 {
        self.0[axis.index()]
    }

    /// Euclidean norm, computed on demand in `f64`.
    pub fn magnitude(&self) -> f32 {
        self.magnitude_f64() as f32
    }

    pub(crate) fn magnitude_f64(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }
}

impl From<[f32; VECTOR_DIMENSION]> for CommitmentVector {
    fn from(values: [f32; VECTOR_DIMENSION]) -> Self {
        Self(values)
    }
}

impl TryFrom<&[f32]> for CommitmentVector {
    type Error = CoreError;

    fn try_from(values: &[f32]) -> CoreResult<Self> {
        Self::try_from_slice(values)
    }
}

impl TryFrom<Vec<f32>> for CommitmentVector {
    type Error = CoreError;

    fn try_from(values: Vec<f32>) -> CoreResult<Self> {
        Self::try_from_slice(&values)
    }
}

impl fmt::Display for CommitmentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [t, i, s, r] = self.0;
        write!(f, "[{:.2}, {:.2}, {:.2}, {:.2}]", t, i, s, r)
    }
}
