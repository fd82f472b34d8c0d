// Embedder trait: swap-ready abstraction over the embedding model.

use anyhow::Result;
use async_trait::async_trait;

/// Maps text to a fixed-length dense vector. Semantically similar texts map
/// to vectors with high cosine similarity.
///
/// Implementations must be deterministic: the same input always produces
/// the same vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed several texts, returning one vector per text in the same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f64>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        match vectors.pop() {
            Some(v) => Ok(v),
            None => anyhow::bail!("Embedder returned no vector for a single input"),
        }
    }
}
