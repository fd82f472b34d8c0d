// semscore: semantic keyword relevance for app store listings
//
// This is the library root. The scoring pipeline runs text → normalized
// lemmas → sentence embedding → cosine similarity → weighted overall score.

pub mod config;
pub mod embedding;
pub mod listing;
pub mod output;
pub mod resources;
pub mod scoring;
pub mod status;
pub mod text;
