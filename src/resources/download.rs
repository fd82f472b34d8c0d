// Resource download helpers.
//
// Two resources are fetched on first use and cached on disk:
// 1. all-mpnet-base-v2: ONNX sentence embedding model + tokenizer (~420MB)
// 2. WordNet 3.0 noun database: index.noun + noun.exc for lemmatization
//
// Files live in the platform data directory
// (~/.local/share/semscore/ on Linux) so they persist across runs.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::embedding::onnx::{MODEL_FILE, TOKENIZER_FILE};
use crate::text::lemmatizer::{NOUN_EXCEPTIONS_FILE, NOUN_INDEX_FILE};

/// HuggingFace repo for the sentence embedding model.
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/sentence-transformers/all-mpnet-base-v2/resolve/main";

/// WordNet 3.0 database files (dict/ directory only).
pub const DEFAULT_LEXICON_URL: &str = "https://wordnetcode.princeton.edu/3.0/WNdb-3.0.tar.gz";

/// Location of the ONNX export inside the model repo.
const REMOTE_MODEL_FILE: &str = "onnx/model.onnx";

/// Returns the base directory for all downloaded resources.
/// Uses the platform data directory: ~/.local/share/semscore/ on Linux.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("semscore")
}

/// Default directory for the sentence embedding model.
pub fn default_model_dir() -> PathBuf {
    default_data_dir().join("models").join("all-mpnet-base-v2")
}

/// Default directory for the WordNet noun files.
pub fn default_lexicon_dir() -> PathBuf {
    default_data_dir().join("wordnet")
}

/// Check whether both embedding model files exist.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Check whether both WordNet noun files exist.
pub fn lexicon_files_present(dir: &Path) -> bool {
    dir.join(NOUN_INDEX_FILE).exists() && dir.join(NOUN_EXCEPTIONS_FILE).exists()
}

/// Download the embedding model and tokenizer from `base_url`.
///
/// Skips files that already exist. Creates the directory as needed.
/// Progress lines go to `out`.
pub async fn download_model(dir: &Path, base_url: &str, out: &mut impl Write) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    writeln!(out, "\nSentence embedding model (all-mpnet-base-v2):")?;

    let tokenizer_path = dir.join(TOKENIZER_FILE);
    if tokenizer_path.exists() {
        info!("Embedding tokenizer already exists, skipping");
        writeln!(out, "  {} (already exists)", TOKENIZER_FILE)?;
    } else {
        writeln!(out, "  Downloading {}...", TOKENIZER_FILE)?;
        let bytes = fetch(&format!("{}/{}", base_url, TOKENIZER_FILE), false).await?;
        write_file(&tokenizer_path, &bytes)?;
    }

    let model_path = dir.join(MODEL_FILE);
    if model_path.exists() {
        info!("Embedding model already exists, skipping");
        writeln!(out, "  {} (already exists)", MODEL_FILE)?;
    } else {
        writeln!(out, "  Downloading {} (~420 MB)...", MODEL_FILE)?;
        let bytes = fetch(&format!("{}/{}", base_url, REMOTE_MODEL_FILE), true).await?;
        write_file(&model_path, &bytes)?;
    }

    Ok(())
}

/// Download the WordNet database archive from `url` and unpack the noun
/// index and exception list into `dir`.
///
/// Skips the download if both files already exist. Progress lines go to
/// `out`.
pub async fn download_lexicon(dir: &Path, url: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\nWordNet noun lexicon:")?;

    if lexicon_files_present(dir) {
        info!("WordNet noun files already exist, skipping");
        writeln!(
            out,
            "  {} + {} (already exist)",
            NOUN_INDEX_FILE, NOUN_EXCEPTIONS_FILE
        )?;
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create lexicon directory: {}", dir.display()))?;

    writeln!(out, "  Downloading WordNet database (~10 MB)...")?;
    let archive = fetch(url, true).await?;
    let extracted = extract_lexicon(&archive, dir)?;
    writeln!(out, "  Extracted {}", extracted.join(", "))?;

    Ok(())
}

/// Unpack the noun files from a gzipped WordNet tarball into `dir`.
///
/// Entries are matched on file name, so the archive layout (`dict/`,
/// `WordNet-3.0/dict/`) doesn't matter. Returns the names written.
pub fn extract_lexicon(archive: &[u8], dir: &Path) -> Result<Vec<String>> {
    let wanted = [NOUN_INDEX_FILE, NOUN_EXCEPTIONS_FILE];
    let mut written = Vec::new();

    let mut tar = tar::Archive::new(GzDecoder::new(archive));
    for entry in tar.entries().context("Failed to read WordNet archive")? {
        let mut entry = entry.context("Corrupt entry in WordNet archive")?;
        let name = entry
            .path()
            .context("Invalid path in WordNet archive")?
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        let Some(name) = name.filter(|n| wanted.contains(&n.as_str())) else {
            continue;
        };

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("Failed to unpack {name} from WordNet archive"))?;
        write_file(&dir.join(&name), &contents)?;
        written.push(name);
    }

    for file in wanted {
        if !written.iter().any(|w| w == file) {
            anyhow::bail!("WordNet archive does not contain {file}");
        }
    }

    Ok(written)
}

/// Fetch a URL into memory. If `show_progress` is true, display a
/// progress bar while the body streams in.
async fn fetch(url: &str, show_progress: bool) -> Result<Vec<u8>> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let mut body = Vec::with_capacity(total_size.unwrap_or(0) as usize);
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?
    {
        body.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(body.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!(bytes = body.len(), "Downloaded {}", url);
    Ok(body)
}

/// Write via a `.part` file and rename, so an interrupted download never
/// leaves a file that looks complete.
fn write_file(dest: &Path, bytes: &[u8]) -> Result<()> {
    let partial = dest.with_extension("part");
    std::fs::write(&partial, bytes)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_default_dirs_are_under_semscore() {
        let model = default_model_dir();
        let lexicon = default_lexicon_dir();
        assert!(model.to_string_lossy().contains("semscore"));
        assert!(model.ends_with("all-mpnet-base-v2"));
        assert!(lexicon.ends_with("wordnet"));
    }

    #[test]
    fn test_files_present_false_when_empty() {
        let dir = std::env::temp_dir().join("semscore-test-nonexistent");
        assert!(!model_files_present(&dir));
        assert!(!lexicon_files_present(&dir));
    }

    #[test]
    fn test_model_files_present_true_when_files_exist() {
        let dir = std::env::temp_dir().join("semscore-model-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MODEL_FILE), b"fake").unwrap();
        assert!(!model_files_present(&dir));
        std::fs::write(dir.join(TOKENIZER_FILE), b"fake").unwrap();
        assert!(model_files_present(&dir));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_extract_lexicon_picks_noun_files() {
        let dir = std::env::temp_dir().join("semscore-extract-test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let archive = tarball(&[
            ("dict/index.verb", "run v 1 0\n"),
            ("dict/index.noun", "photo n 1 0\n"),
            ("dict/noun.exc", "mice mouse\n"),
        ]);
        let written = extract_lexicon(&archive, &dir).unwrap();

        assert_eq!(written, vec!["index.noun", "noun.exc"]);
        assert!(lexicon_files_present(&dir));
        assert!(!dir.join("index.verb").exists());
        assert_eq!(
            std::fs::read_to_string(dir.join("noun.exc")).unwrap(),
            "mice mouse\n"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_extract_lexicon_missing_file_fails() {
        let dir = std::env::temp_dir().join("semscore-extract-missing-test");
        std::fs::create_dir_all(&dir).unwrap();

        let archive = tarball(&[("dict/index.noun", "photo n 1 0\n")]);
        let err = extract_lexicon(&archive, &dir).unwrap_err();
        assert!(err.to_string().contains("noun.exc"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_download_lexicon_skips_present_files() {
        let dir = std::env::temp_dir().join("semscore-lexicon-present-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(NOUN_INDEX_FILE), "photo n 1 0\n").unwrap();
        std::fs::write(dir.join(NOUN_EXCEPTIONS_FILE), "").unwrap();

        let mut out = Vec::new();
        download_lexicon(&dir, "http://127.0.0.1:9/unused.tar.gz", &mut out)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("WordNet noun lexicon:"));
        assert!(out.contains("(already exist)"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_extract_lexicon_rejects_garbage() {
        let dir = std::env::temp_dir().join("semscore-extract-garbage-test");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(extract_lexicon(b"not a tarball", &dir).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
