// Word tokenizer: sentence-aware splitting in the Penn Treebank style.
//
// Text is first split on Unicode sentence boundaries, then each sentence on
// Unicode word boundaries (UAX #29). Whitespace segments are dropped and
// punctuation is kept as standalone tokens. Hyphenated compounds written
// without spaces stay whole. Word segments then have their
// English clitics split off the way the Treebank tokenizer does it, so
// "don't" becomes ["do", "n't"] and "you're" becomes ["you", "'re"].

use std::sync::LazyLock;

use regex_lite::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Trailing clitics: possessive/verb contractions and the negation "n't".
static CLITIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)(n't|'ll|'re|'ve|'s|'m|'d)$").expect("valid clitic pattern")
});

/// Whole-word contractions the Treebank tokenizer splits into two tokens.
const SPLIT_WORDS: [(&str, usize); 8] = [
    ("cannot", 3),
    ("d'ye", 1),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("more'n", 4),
    ("wanna", 3),
];

/// Clitic bodies that follow a standalone apostrophe.
const DETACHED_CLITICS: [&str; 6] = ["s", "m", "d", "ll", "re", "ve"];

/// Split text into sentences, keeping each sentence's raw text.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split_sentence_bounds()
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Tokenize text into words and punctuation marks.
///
/// Case is preserved; callers that want lowercase tokens should lowercase
/// the input first.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for sentence in sentences(text) {
        let segments: Vec<&str> = sentence.split_word_bounds().collect();
        let mut i = 0;
        while i < segments.len() {
            let segment = segments[i];
            i += 1;
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            // A clitic already split off by an earlier pass ("you 're")
            // arrives as an apostrophe followed by its letters.
            if segment == "'" {
                if let Some(next) = segments.get(i) {
                    if DETACHED_CLITICS.contains(&next.to_lowercase().as_str()) {
                        tokens.push(format!("'{next}"));
                        i += 1;
                        continue;
                    }
                }
            }
            if is_word(segment) {
                // Hyphenated compounds ("fine-tune") stay one token.
                let mut word = segment.to_string();
                while segments.get(i) == Some(&"-")
                    && segments.get(i + 1).is_some_and(|next| is_word(next))
                {
                    word.push('-');
                    word.push_str(segments[i + 1]);
                    i += 2;
                }
                split_contractions(&word, &mut tokens);
            } else {
                tokens.push(segment.to_string());
            }
        }
    }
    tokens
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

fn split_contractions(word: &str, out: &mut Vec<String>) {
    let lower = word.to_lowercase();
    if let Some(&(_, at)) = SPLIT_WORDS.iter().find(|(w, _)| *w == lower) {
        let (head, tail) = word.split_at(at);
        out.push(head.to_string());
        out.push(tail.to_string());
        return;
    }

    match CLITIC.captures(word) {
        Some(caps) => {
            out.push(caps[1].to_string());
            out.push(caps[2].to_string());
        }
        None => out.push(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_is_separate() {
        let tokens = word_tokenize("photo editor pro - filters & effects");
        assert_eq!(
            tokens,
            vec!["photo", "editor", "pro", "-", "filters", "&", "effects"]
        );
    }

    #[test]
    fn test_hyphenated_words_stay_whole() {
        let tokens = word_tokenize("fine-tune brightness, photo-editing app");
        assert_eq!(tokens, vec!["fine-tune", "brightness", ",", "photo-editing", "app"]);
        assert_eq!(word_tokenize("state-of-the-art"), vec!["state-of-the-art"]);
        assert_eq!(word_tokenize("photo- editing"), vec!["photo", "-", "editing"]);
    }

    #[test]
    fn test_sentence_final_period() {
        let tokens = word_tokenize("Edit photos. Enhance images!");
        assert_eq!(tokens, vec!["Edit", "photos", ".", "Enhance", "images", "!"]);
    }

    #[test]
    fn test_negation_clitic() {
        assert_eq!(word_tokenize("don't"), vec!["do", "n't"]);
        assert_eq!(word_tokenize("can't"), vec!["ca", "n't"]);
    }

    #[test]
    fn test_verb_clitics() {
        assert_eq!(word_tokenize("you're"), vec!["you", "'re"]);
        assert_eq!(word_tokenize("we'll"), vec!["we", "'ll"]);
        assert_eq!(word_tokenize("app's"), vec!["app", "'s"]);
    }

    #[test]
    fn test_detached_clitics_stay_whole() {
        assert_eq!(word_tokenize("you 're"), vec!["you", "'re"]);
        assert_eq!(word_tokenize("do n't"), vec!["do", "n't"]);
        assert_eq!(word_tokenize("app 's"), vec!["app", "'s"]);
        assert_eq!(word_tokenize("' sorry"), vec!["'", "sorry"]);
    }

    #[test]
    fn test_whole_word_contractions() {
        assert_eq!(word_tokenize("cannot"), vec!["can", "not"]);
        assert_eq!(word_tokenize("gonna"), vec!["gon", "na"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(word_tokenize("").is_empty());
        assert!(word_tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_markup_bullets_become_tokens() {
        let tokens = word_tokenize("*   **Filters:** apply");
        assert_eq!(tokens, vec!["*", "*", "*", "Filters", ":", "*", "*", "apply"]);
    }

    #[test]
    fn test_sentences_split() {
        let s = sentences("One sentence. Another one! A third?");
        assert_eq!(s.len(), 3);
        assert!(s[0].starts_with("One"));
        assert!(s[2].starts_with("A third"));
    }

    #[test]
    fn test_numbers_stay_whole() {
        assert_eq!(word_tokenize("version 2.5"), vec!["version", "2.5"]);
    }
}
