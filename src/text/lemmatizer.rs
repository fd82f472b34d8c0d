// WordNet-style lemmatizer.
//
// Reduces a token to its dictionary base form using the WordNet noun
// database: the irregular-form exception list (noun.exc) plus the standard
// suffix detachment rules, keeping only candidates that WordNet knows as
// nouns. Part of speech is never supplied by callers, so every token is
// treated as a noun.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

/// File in the WordNet dict directory listing every noun lemma.
pub const NOUN_INDEX_FILE: &str = "index.noun";
/// File in the WordNet dict directory mapping irregular nouns to base forms.
pub const NOUN_EXCEPTIONS_FILE: &str = "noun.exc";

/// Noun detachment rules, applied to the token's suffix in this order.
const NOUN_SUFFIX_RULES: [(&str, &str); 9] = [
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Something that maps a token to its lemma.
pub trait Lemmatizer: Send + Sync {
    /// Return the base form of `token`, or the token itself if none is known.
    fn lemmatize(&self, token: &str) -> String;
}

/// The WordNet noun lexicon: known lemmas and irregular forms.
#[derive(Debug, Default)]
pub struct NounLexicon {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl NounLexicon {
    /// Load `index.noun` and `noun.exc` from a WordNet dict directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let index_path = dir.join(NOUN_INDEX_FILE);
        let exc_path = dir.join(NOUN_EXCEPTIONS_FILE);

        if !index_path.exists() {
            anyhow::bail!(
                "WordNet noun index not found: {}\nRun `semscore download` to download it.",
                index_path.display()
            );
        }

        let index = std::fs::read_to_string(&index_path)
            .with_context(|| format!("Failed to read {}", index_path.display()))?;
        let exceptions = std::fs::read_to_string(&exc_path)
            .with_context(|| format!("Failed to read {}", exc_path.display()))?;

        let lexicon = Self::parse(&index, &exceptions);
        debug!(
            lemmas = lexicon.lemmas.len(),
            exceptions = lexicon.exceptions.len(),
            "Loaded WordNet noun lexicon from {}",
            dir.display()
        );
        Ok(lexicon)
    }

    /// Build a lexicon from the contents of `index.noun` and `noun.exc`.
    ///
    /// Index lines start with the lemma; lines beginning with a space are
    /// the license header. Exception lines are `inflected base [base ...]`.
    pub fn parse(index: &str, exceptions: &str) -> Self {
        let lemmas = index
            .lines()
            .filter(|line| !line.starts_with(' '))
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect();

        let mut exception_map: HashMap<String, Vec<String>> = HashMap::new();
        for line in exceptions.lines() {
            let mut fields = line.split_whitespace();
            if let Some(inflected) = fields.next() {
                let bases: Vec<String> = fields.map(str::to_string).collect();
                if !bases.is_empty() {
                    exception_map
                        .entry(inflected.to_string())
                        .or_default()
                        .extend(bases);
                }
            }
        }

        Self {
            lemmas,
            exceptions: exception_map,
        }
    }

    /// Whether WordNet lists `word` as a noun. Multi-word lemmas use `_`.
    pub fn contains(&self, word: &str) -> bool {
        self.lemmas.contains(word)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// Noun lemmatizer backed by a shared [`NounLexicon`].
#[derive(Clone)]
pub struct WordNetLemmatizer {
    lexicon: Arc<NounLexicon>,
}

impl WordNetLemmatizer {
    pub fn new(lexicon: Arc<NounLexicon>) -> Self {
        Self { lexicon }
    }

    /// Load the lexicon from a WordNet dict directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self::new(Arc::new(NounLexicon::load(dir)?)))
    }

    /// All base-form candidates for `form` that the lexicon knows,
    /// deduplicated and in discovery order.
    ///
    /// Irregular forms are answered from the exception list alone. Otherwise
    /// the suffix rules are applied once and the results, plus `form` itself,
    /// are checked; if none is known the rules are re-applied to the
    /// previous round's outputs until something matches or nothing is left.
    fn candidates(&self, form: &str) -> Vec<String> {
        if let Some(bases) = self.lexicon.exceptions.get(form) {
            let forms = std::iter::once(form.to_string()).chain(bases.iter().cloned());
            return self.known(forms);
        }

        let mut forms = detach_suffixes(&[form.to_string()]);
        let found = self.known(std::iter::once(form.to_string()).chain(forms.iter().cloned()));
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = detach_suffixes(&forms);
            let found = self.known(forms.iter().cloned());
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    fn known(&self, forms: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|f| self.lexicon.contains(f))
            .filter(|f| seen.insert(f.clone()))
            .collect()
    }
}

/// Apply every matching suffix rule to every form. Each rule either
/// shortens the form or leaves a suffix no rule matches, so repeated
/// application runs dry.
fn detach_suffixes(forms: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for form in forms {
        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = form.strip_suffix(suffix) {
                out.push(format!("{stem}{replacement}"));
            }
        }
    }
    out
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        self.candidates(token)
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| token.to_string())
    }
}
