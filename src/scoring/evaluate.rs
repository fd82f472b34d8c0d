// Listing evaluation: the scoring entry point.
//
// Each section is normalized (lowercased, tokenized, lemmatized), embedded,
// and compared against the keyword embedding. The keyword itself is embedded
// as-is, without normalization, and only once per evaluation.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::weights::SectionWeights;
use crate::embedding::similarity::cosine_similarity;
use crate::embedding::traits::Embedder;
use crate::listing::AppListing;
use crate::text::normalize::TextNormalizer;

/// Similarity of each listing section to the keyword, plus the weighted
/// overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ListingScores {
    pub title_score: f64,
    pub short_description_score: f64,
    pub long_description_score: f64,
    pub overall_score: f64,
}

/// Similarity between a piece of listing text and a keyword.
///
/// The text is normalized before embedding; the keyword is not.
pub async fn semantic_score(
    normalizer: &TextNormalizer,
    embedder: &dyn Embedder,
    text: &str,
    keyword: &str,
) -> Result<f64> {
    let keyword_embedding = embedder.embed(keyword).await?;
    score_against(normalizer, embedder, text, &keyword_embedding).await
}

/// Score every section of `listing` against `keyword`.
pub async fn evaluate_listing(
    normalizer: &TextNormalizer,
    embedder: &dyn Embedder,
    listing: &AppListing,
    keyword: &str,
    weights: &SectionWeights,
) -> Result<ListingScores> {
    weights.validate()?;

    let keyword_embedding = embedder.embed(keyword).await?;

    let title_score =
        score_against(normalizer, embedder, &listing.title, &keyword_embedding).await?;
    let short_description_score = score_against(
        normalizer,
        embedder,
        &listing.short_description,
        &keyword_embedding,
    )
    .await?;
    let long_description_score = score_against(
        normalizer,
        embedder,
        &listing.long_description,
        &keyword_embedding,
    )
    .await?;

    let overall_score = weights.combine(
        title_score,
        short_description_score,
        long_description_score,
    );

    debug!(
        keyword,
        title_score,
        short_description_score,
        long_description_score,
        overall_score,
        "Evaluated listing"
    );

    Ok(ListingScores {
        title_score,
        short_description_score,
        long_description_score,
        overall_score,
    })
}

async fn score_against(
    normalizer: &TextNormalizer,
    embedder: &dyn Embedder,
    text: &str,
    keyword_embedding: &[f64],
) -> Result<f64> {
    let normalized = normalizer.normalize(text);
    let text_embedding = embedder.embed(&normalized).await?;
    cosine_similarity(&text_embedding, keyword_embedding)
}
