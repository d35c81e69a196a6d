//! Morphological reducers used by the normalizer to map inflected words to a normal form.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use campus_core::config::{NlpConfig, ReducerKind};
use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReduceError {
    #[error("cannot reduce an empty word")]
    EmptyWord,
    #[error("no normal form known for `{0}`")]
    UnknownForm(String),
}

#[derive(Debug, Error)]
pub enum DictionaryLoadError {
    #[error("could not read dictionary `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("dictionary `{path}` line {line}: expected `form<TAB>lemma`")]
    MalformedLine { path: PathBuf, line: usize },
    #[error("dictionary reducer selected but no dictionary path configured")]
    MissingPath,
}

/// Maps one lowercase word to its normal form.
///
/// Failures are per word; callers keep the raw word when a reduction fails.
pub trait MorphReducer: Send + Sync {
    fn name(&self) -> &'static str;

    fn reduce(&self, word: &str) -> Result<String, ReduceError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityReducer;

impl MorphReducer for IdentityReducer {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn reduce(&self, word: &str) -> Result<String, ReduceError> {
        if word.is_empty() {
            return Err(ReduceError::EmptyWord);
        }
        Ok(word.to_string())
    }
}

/// Lookup table of inflected form to lemma, loaded from a tab-separated file.
#[derive(Clone, Debug, Default)]
pub struct DictionaryReducer {
    forms: HashMap<String, String>,
}

impl DictionaryReducer {
    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: AsRef<str>,
    {
        let forms = pairs
            .into_iter()
            .map(|(form, lemma)| {
                (form.as_ref().trim().to_lowercase(), lemma.as_ref().trim().to_lowercase())
            })
            .collect();
        Self { forms }
    }

    /// Reads `form<TAB>lemma` lines. Blank lines and `#` comments are ignored.
    pub fn load(path: &Path) -> Result<Self, DictionaryLoadError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| DictionaryLoadError::Read { path: path.to_path_buf(), source })?;

        let mut pairs = Vec::new();
        for (index, line) in raw.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut columns = trimmed.split('\t');
            match (columns.next(), columns.next()) {
                (Some(form), Some(lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    pairs.push((form.to_string(), lemma.to_string()));
                }
                _ => {
                    return Err(DictionaryLoadError::MalformedLine {
                        path: path.to_path_buf(),
                        line: index + 1,
                    })
                }
            }
        }

        Ok(Self::from_pairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl MorphReducer for DictionaryReducer {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn reduce(&self, word: &str) -> Result<String, ReduceError> {
        if word.is_empty() {
            return Err(ReduceError::EmptyWord);
        }
        self.forms.get(word).cloned().ok_or_else(|| ReduceError::UnknownForm(word.to_string()))
    }
}

/// Snowball stemmer for Russian. Produces stems rather than dictionary lemmas.
pub struct SnowballReducer {
    stemmer: Stemmer,
}

impl SnowballReducer {
    pub fn russian() -> Self {
        Self { stemmer: Stemmer::create(Algorithm::Russian) }
    }
}

impl Default for SnowballReducer {
    fn default() -> Self {
        Self::russian()
    }
}

impl MorphReducer for SnowballReducer {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn reduce(&self, word: &str) -> Result<String, ReduceError> {
        if word.is_empty() {
            return Err(ReduceError::EmptyWord);
        }
        Ok(self.stemmer.stem(word).into_owned())
    }
}

pub fn reducer_from_config(nlp: &NlpConfig) -> Result<Arc<dyn MorphReducer>, DictionaryLoadError> {
    match nlp.reducer {
        ReducerKind::Identity => Ok(Arc::new(IdentityReducer)),
        ReducerKind::Snowball => Ok(Arc::new(SnowballReducer::russian())),
        ReducerKind::Dictionary => {
            let path = nlp.dictionary_path.as_deref().ok_or(DictionaryLoadError::MissingPath)?;
            Ok(Arc::new(DictionaryReducer::load(path)?))
        }
    }
}
