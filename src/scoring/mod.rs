// Relevance scoring: per-section similarity and the weighted overall score.

pub mod evaluate;
pub mod weights;
