//! Cosine similarity between commitment vectors.

/// Compute cosine similarity between two vectors.
///
/// Returns `0.0` when either input is empty, the lengths differ, or either
/// vector has zero magnitude. The result is clamped to `[-1.0, 1.0]`.
///
/// Sums are accumulated in `f64`, so every finite input scores in range.
///
/// # Performance
/// O(n) in the vector dimension.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
}
