// Cosine similarity between embedding vectors.

use anyhow::Result;

/// Cosine similarity: `dot(a, b) / (|a| * |b|)`.
///
/// The result is not clamped, so it spans [-1, 1]. A zero-norm input has
/// no direction and yields NaN, which callers see propagated into their
/// scores. Vectors of different length are rejected.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    anyhow::ensure!(
        a.len() == b.len(),
        "Cannot compare embeddings of different dimensions ({} vs {})",
        a.len(),
        b.len()
    );

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    Ok(dot / (mag_a * mag_b))
}
