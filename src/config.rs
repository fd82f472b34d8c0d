use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::resources::download;

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment works. The .env
/// file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding model.onnx and tokenizer.json (SEMSCORE_MODEL_DIR)
    pub model_dir: PathBuf,
    /// Directory holding the WordNet noun files (SEMSCORE_LEXICON_DIR)
    pub lexicon_dir: PathBuf,
    /// Base URL the model files are fetched from (SEMSCORE_MODEL_URL)
    pub model_url: String,
    /// URL of the WordNet database tarball (SEMSCORE_LEXICON_URL)
    pub lexicon_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_url = non_empty("SEMSCORE_MODEL_URL")
            .unwrap_or_else(|| download::DEFAULT_MODEL_URL.to_string());
        let lexicon_url = non_empty("SEMSCORE_LEXICON_URL")
            .unwrap_or_else(|| download::DEFAULT_LEXICON_URL.to_string());

        for (name, url) in [
            ("SEMSCORE_MODEL_URL", &model_url),
            ("SEMSCORE_LEXICON_URL", &lexicon_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{name} must be an http(s) URL, got: {url}");
            }
        }

        Ok(Self {
            model_dir: non_empty("SEMSCORE_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(download::default_model_dir),
            lexicon_dir: non_empty("SEMSCORE_LEXICON_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(download::default_lexicon_dir),
            model_url: model_url.trim_end_matches('/').to_string(),
            lexicon_url,
        })
    }
}
