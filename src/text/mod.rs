// Text normalization: tokenization and lemmatization ahead of embedding.

pub mod lemmatizer;
pub mod normalize;
pub mod tokenizer;
