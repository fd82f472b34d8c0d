// External resources: the embedding model and the WordNet lexicon.
//
// Scoring never touches the network. The bootstrap step here makes sure
// both resources are on disk before a scorer is built, fetching whatever
// is missing exactly once.

pub mod download;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

/// Make sure the embedding model and the lexicon are installed, downloading
/// any that are missing. A failed download is fatal.
///
/// Runs ahead of a report, so download progress goes to stderr and stdout
/// carries only the report.
pub async fn ensure_resources(config: &Config) -> Result<()> {
    ensure_resources_to(config, &mut std::io::stderr()).await
}

async fn ensure_resources_to(config: &Config, out: &mut impl Write) -> Result<()> {
    if !download::model_files_present(&config.model_dir) {
        info!(dir = %config.model_dir.display(), "Embedding model missing, downloading");
        download::download_model(&config.model_dir, &config.model_url, out)
            .await
            .context("Could not fetch the sentence embedding model")?;
    }

    if !download::lexicon_files_present(&config.lexicon_dir) {
        info!(dir = %config.lexicon_dir.display(), "WordNet lexicon missing, downloading");
        download::download_lexicon(&config.lexicon_dir, &config.lexicon_url, out)
            .await
            .context("Could not fetch the WordNet lexicon")?;
    }

    Ok(())
}

/// Whether both resources are already installed.
pub fn resources_present(config: &Config) -> bool {
    download::model_files_present(&config.model_dir)
        && download::lexicon_files_present(&config.lexicon_dir)
}
