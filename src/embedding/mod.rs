// Sentence embeddings and vector similarity.
//
// The Embedder trait is the seam between scoring and the model: the ONNX
// sentence-transformer implements it for real runs, tests plug in a
// deterministic stand-in.

pub mod lazy;
pub mod onnx;
pub mod similarity;
pub mod traits;
