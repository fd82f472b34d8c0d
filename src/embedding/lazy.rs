// Lazy-loading wrapper around SentenceEmbedder.
//
// Loading the ONNX model takes seconds, so it is deferred until the first
// embedding request and then shared read-only for the rest of the process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::onnx::SentenceEmbedder;
use super::traits::Embedder;

/// A process-wide embedder that loads its model on first use.
///
/// Concurrent first calls load the model exactly once. A failed load is
/// cached too: every later call reports the same error without retrying.
pub struct LazyEmbedder {
    model_dir: PathBuf,
    embedder: OnceLock<std::result::Result<SentenceEmbedder, String>>,
}

impl LazyEmbedder {
    /// Remember where the model lives. Nothing is loaded yet.
    pub fn new(model_dir: &Path) -> Self {
        Self {
            model_dir: model_dir.to_path_buf(),
            embedder: OnceLock::new(),
        }
    }

    fn ensure_loaded(&self) -> Result<&SentenceEmbedder> {
        let loaded = self.embedder.get_or_init(|| {
            info!(model_dir = %self.model_dir.display(), "Loading sentence embedding model");
            SentenceEmbedder::load(&self.model_dir).map_err(|e| format!("{e:#}"))
        });

        match loaded {
            Ok(embedder) => Ok(embedder),
            Err(e) => anyhow::bail!("Sentence embedding model unavailable: {e}"),
        }
    }

    /// Whether the model has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(self.embedder.get(), Some(Ok(_)))
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}

#[async_trait]
impl Embedder for LazyEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        self.ensure_loaded()?.embed_batch(texts).await
    }
}
