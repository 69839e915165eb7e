// src/core/scorer.rs
use crate::core::index::WeightVector;

/// Dot product over shared tokens divided by the product of both vectors'
/// full Euclidean norms. Returns 0 when either norm is 0.
pub fn cosine_similarity(a: &WeightVector, b: &WeightVector) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (token, wa) in a {
        if let Some(wb) = b.get(token) {
            dot += wa * wb;
        }
        norm_a += wa * wa;
    }
    let norm_b: f64 = b.values().map(|w| w * w).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
