// Text normalizer: lowercase → tokenize → lemmatize → rejoin.
//
// The output is a single space-separated string, ready to hand to the
// embedder. Punctuation tokens survive normalization, so markup artifacts
// in long descriptions ("*", ":") end up in the embedded text.

use std::sync::Arc;

use super::lemmatizer::Lemmatizer;
use super::tokenizer::word_tokenize;

/// Normalizes raw listing text before it is embedded.
#[derive(Clone)]
pub struct TextNormalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl TextNormalizer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { lemmatizer }
    }

    /// Lowercase, tokenize and lemmatize `text`, keeping token order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        word_tokenize(&text.to_lowercase())
            .iter()
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect()
    }

    /// Normalize `text` into one string of lemmas joined by single spaces.
    ///
    /// Empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::lemmatizer::{NounLexicon, WordNetLemmatizer};

    const INDEX: &str = "photo n 1 0\nfilter n 1 0\neffect n 1 0\neditor n 1 0\npro n 1 0\n";

    fn normalizer() -> TextNormalizer {
        let lexicon = NounLexicon::parse(INDEX, "");
        TextNormalizer::new(Arc::new(WordNetLemmatizer::new(Arc::new(lexicon))))
    }

    #[test]
    fn test_normalize_title() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Photo Editor Pro - Filters & Effects"),
            "photo editor pro - filter & effect"
        );
    }

    #[test]
    fn test_normalize_empty() {
        let n = normalizer();
        assert!(n.tokens("").is_empty());
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let n = normalizer();
        assert_eq!(n.normalize("  Photos\n\n   Filters  "), "photo filter");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        let once = n.normalize("Edit PHOTOS with Filters, Effects and more!");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_token_order_preserved() {
        let n = normalizer();
        assert_eq!(n.tokens("effects photos"), vec!["effect", "photo"]);
    }
}
