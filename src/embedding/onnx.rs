// Sentence embedder using all-mpnet-base-v2 via ONNX Runtime.
//
// Text is tokenized with the model's own tokenizer.json, run through the
// MPNet encoder, and mean-pooled over tokens (weighted by the attention
// mask) to give one 768-dimensional vector per input. This matches how the
// sentence-transformers model was trained; the model's final L2
// normalization is skipped since cosine similarity is scale-invariant.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::traits::Embedder;

/// Embedding dimension for all-mpnet-base-v2.
pub const EMBEDDING_DIM: usize = 768;

/// Longest token sequence the model was trained on.
pub const MAX_SEQ_LEN: usize = 384;

/// MPNet `<pad>` token id.
const PAD_TOKEN_ID: i64 = 1;

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Local ONNX sentence embedder.
///
/// The session sits behind Arc<Mutex> because `Session::run` takes
/// `&mut self` and inference is moved onto a blocking thread.
pub struct SentenceEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl SentenceEmbedder {
    /// Load the model and tokenizer from `model_dir`.
    ///
    /// Expects `model.onnx` and `tokenizer.json` in the directory.
    /// Run the download step first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Embedding model not found: {}\nRun `semscore download` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Embedding tokenizer not found: {}\nRun `semscore download` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!(
                    "Failed to load embedding model from {}",
                    model_path.display()
                )
            })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure tokenizer truncation: {}", e))?;
        tokenizer.with_padding(None);

        debug!(
            "Loaded sentence embedding model from {}",
            model_dir.display()
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl Embedder for SentenceEmbedder {
    /// Tokenization and inference are CPU-bound, so they run on
    /// spawn_blocking to keep the async runtime responsive.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || embed_sync(&session, &tokenizer, &texts))
            .await
            .context("spawn_blocking panicked")?
    }
}

fn embed_sync(
    session: &Mutex<Session>,
    tokenizer: &Tokenizer,
    texts: &[String],
) -> Result<Vec<Vec<f64>>> {
    let encodings: Vec<_> = texts
        .iter()
        .map(|t| {
            tokenizer
                .encode(t.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);

    if max_len == 0 {
        return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch_size]);
    }

    // Right-pad every sequence to max_len. Shape: [batch_size, max_len]
    let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let ids = enc.get_ids();
        let pad_len = max_len - ids.len();

        input_ids_flat.extend(ids.iter().map(|&id| id as i64));
        attention_mask_flat.extend(enc.get_attention_mask().iter().map(|&m| m as i64));

        input_ids_flat.extend(std::iter::repeat_n(PAD_TOKEN_ID, pad_len));
        attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
    }

    let shape = [batch_size as i64, max_len as i64];

    let input_ids_tensor =
        Tensor::from_array((shape, input_ids_flat)).context("Failed to create input_ids tensor")?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat.clone()))
        .context("Failed to create attention_mask tensor")?;

    // Output is last_hidden_state: [batch, seq_len, 768]
    let hidden_states = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            })
            .context("Embedding ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract embedding output tensor")?;

        data.to_vec()
    };

    anyhow::ensure!(
        hidden_states.len() == batch_size * max_len * EMBEDDING_DIM,
        "Unexpected embedding output size {} (expected {}x{}x{})",
        hidden_states.len(),
        batch_size,
        max_len,
        EMBEDDING_DIM
    );

    let embeddings = mean_pool(&hidden_states, &attention_mask_flat, batch_size, max_len);

    debug!(
        batch_size = batch_size,
        dim = EMBEDDING_DIM,
        "Computed sentence embeddings"
    );

    Ok(embeddings)
}

/// Average token embeddings per sequence, counting only unmasked tokens.
///
/// `hidden_states` is a flattened `[batch, seq_len, EMBEDDING_DIM]` tensor
/// and `attention_mask` a flattened `[batch, seq_len]` mask.
fn mean_pool(
    hidden_states: &[f32],
    attention_mask: &[i64],
    batch_size: usize,
    max_len: usize,
) -> Vec<Vec<f64>> {
    let mut embeddings = Vec::with_capacity(batch_size);

    for i in 0..batch_size {
        let mut sum = vec![0.0_f64; EMBEDDING_DIM];
        let mut mask_sum = 0.0_f64;

        for j in 0..max_len {
            let mask_val = attention_mask[i * max_len + j] as f64;
            if mask_val > 0.0 {
                mask_sum += mask_val;
                let offset = (i * max_len + j) * EMBEDDING_DIM;
                for (k, acc) in sum.iter_mut().enumerate() {
                    *acc += hidden_states[offset + k] as f64 * mask_val;
                }
            }
        }

        if mask_sum > 0.0 {
            for val in &mut sum {
                *val /= mask_sum;
            }
        }

        embeddings.push(sum);
    }

    embeddings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_fails() {
        let dir = std::env::temp_dir().join("semscore-test-no-model");
        let err = SentenceEmbedder::load(&dir).err().expect("load should fail");
        assert!(err.to_string().contains("Embedding model not found"));
    }

    #[test]
    fn test_mean_pool_ignores_padding() {
        // One sequence of 2 tokens where the second is padding.
        let mut hidden = vec![0.0_f32; 2 * EMBEDDING_DIM];
        hidden[0] = 2.0;
        hidden[EMBEDDING_DIM] = 100.0;
        let mask = vec![1, 0];

        let pooled = mean_pool(&hidden, &mask, 1, 2);
        assert_eq!(pooled.len(), 1);
        assert_eq!(pooled[0].len(), EMBEDDING_DIM);
        assert!((pooled[0][0] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_pool_averages_tokens() {
        let mut hidden = vec![0.0_f32; 2 * EMBEDDING_DIM];
        hidden[5] = 1.0;
        hidden[EMBEDDING_DIM + 5] = 3.0;
        let mask = vec![1, 1];

        let pooled = mean_pool(&hidden, &mask, 1, 2);
        assert!((pooled[0][5] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_pool_batches_are_independent() {
        let mut hidden = vec![0.0_f32; 2 * EMBEDDING_DIM];
        hidden[0] = 4.0;
        hidden[EMBEDDING_DIM + 1] = 7.0;
        let mask = vec![1, 1];

        let pooled = mean_pool(&hidden, &mask, 2, 1);
        assert!((pooled[0][0] - 4.0).abs() < 1e-10);
        assert!(pooled[0][1].abs() < 1e-10);
        assert!((pooled[1][1] - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_pool_fully_masked_is_zero() {
        let hidden = vec![1.0_f32; EMBEDDING_DIM];
        let mask = vec![0];
        let pooled = mean_pool(&hidden, &mask, 1, 1);
        assert!(pooled[0].iter().all(|&v| v == 0.0));
    }
}
