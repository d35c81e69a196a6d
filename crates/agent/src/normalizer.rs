use std::sync::Arc;

use campus_core::lexicon::Lexicon;

use crate::morph::MorphReducer;

/// One word of a question after stop-word filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzedWord {
    /// The word as written, punctuation removed, case preserved.
    pub surface: String,
    pub lemma: String,
    /// First word of the question or of a sentence after a `SENTENCE_TERMINATORS` mark.
    pub opens_sentence: bool,
}

impl AnalyzedWord {
    pub fn is_capitalized(&self) -> bool {
        self.surface.chars().next().map(char::is_uppercase).unwrap_or(false)
    }

    /// Capitalized where sentence case would not explain it, as with a surname.
    pub fn is_name_cased(&self) -> bool {
        self.is_capitalized() && !self.opens_sentence
    }
}

const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

/// Tokenizes a question, reduces every word and drops stop words.
#[derive(Clone)]
pub struct Normalizer {
    reducer: Arc<dyn MorphReducer>,
    lexicon: Arc<Lexicon>,
}

impl Normalizer {
    pub fn new(reducer: Arc<dyn MorphReducer>, lexicon: Arc<Lexicon>) -> Self {
        Self { reducer, lexicon }
    }

    pub fn reducer_name(&self) -> &'static str {
        self.reducer.name()
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|word| word.lemma).collect()
    }

    pub fn analyze(&self, text: &str) -> Vec<AnalyzedWord> {
        let mut words = Vec::new();
        let mut at_sentence_start = true;

        for chunk in text.split_whitespace() {
            for surface in strip_punctuation(chunk).split_whitespace() {
                let opens_sentence = std::mem::replace(&mut at_sentence_start, false);
                let lemma = self.reduce_word(&surface.to_lowercase());
                if self.lexicon.is_stop_word(&lemma) {
                    continue;
                }
                words.push(AnalyzedWord { surface: surface.to_string(), lemma, opens_sentence });
            }
            if chunk.ends_with(SENTENCE_TERMINATORS) {
                at_sentence_start = true;
            }
        }

        words
    }

    fn reduce_word(&self, word: &str) -> String {
        match self.reducer.reduce(word) {
            Ok(lemma) if !lemma.is_empty() => lemma,
            Ok(_) => word.to_string(),
            Err(error) => {
                tracing::trace!(
                    event_name = "nlp.normalize.reduce_fallback",
                    reducer = self.reducer.name(),
                    word,
                    error = %error,
                    "keeping raw word"
                );
                word.to_string()
            }
        }
    }
}

/// Replaces every character that is neither a word character nor whitespace with a space.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_alphanumeric() || ch == '_' || ch.is_whitespace() { ch } else { ' ' })
        .collect()
}
