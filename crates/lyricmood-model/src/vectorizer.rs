//! Pre-fitted TF-IDF vectorizer.
//!
//! Turns free text into a fixed-width sparse vector using a vocabulary and
//! IDF weights learned offline. Nothing here fits; the vocabulary is read
//! from the artifact as-is.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::{read_artifact, write_artifact};
use crate::features::FeatureVector;
use crate::pipeline::FeatureTransformer;
use crate::{ModelError, Result};

pub const VECTORIZER_KIND: &str = "tfidf_vectorizer";

/// Row normalization applied after tf-idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of the vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfSpec {
    /// term -> column
    pub vocabulary: HashMap<String, usize>,
    /// One weight per column.
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool { true }
fn default_token_pattern() -> String { r"(?u)\b\w\w+\b".to_string() }
fn default_ngram_range() -> (usize, usize) { (1, 1) }
fn default_norm() -> Option<Norm> { Some(Norm::L2) }

impl TfidfSpec {
    /// A spec with default analyzer settings for the given vocabulary.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: None,
            sublinear_tf: false,
            norm: default_norm(),
        }
    }
}

/// A validated vectorizer ready for inference.
pub struct TfidfVectorizer {
    spec: TfidfSpec,
    pattern: Regex,
    /// Whether the pattern's single capture group holds the token.
    capture_group: bool,
    stop_words: HashSet<String>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.spec.vocabulary.len())
            .field("ngram_range", &self.spec.ngram_range)
            .field("norm", &self.spec.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Validate a spec and compile its token pattern.
    pub fn from_spec(spec: TfidfSpec) -> Result<Self> {
        let width = spec.idf.len();
        if spec.vocabulary.len() != width {
            return Err(ModelError::invalid(
                VECTORIZER_KIND,
                format!(
                    "vocabulary has {} terms but idf has {} weights",
                    spec.vocabulary.len(),
                    width
                ),
            ));
        }
        let mut seen = vec![false; width];
        for (term, &col) in &spec.vocabulary {
            if col >= width || std::mem::replace(&mut seen[col], true) {
                return Err(ModelError::invalid(
                    VECTORIZER_KIND,
                    format!("term '{term}' maps to invalid or duplicate column {col}"),
                ));
            }
        }
        if spec.idf.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::invalid(VECTORIZER_KIND, "idf contains non-finite weights"));
        }
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::invalid(
                VECTORIZER_KIND,
                format!("invalid ngram_range ({min_n}, {max_n})"),
            ));
        }

        let pattern = Regex::new(&spec.token_pattern)?;
        let capture_group = match pattern.captures_len() {
            1 => false,
            2 => true,
            _ => {
                return Err(ModelError::invalid(
                    VECTORIZER_KIND,
                    "token_pattern has more than one capturing group",
                ))
            }
        };

        let stop_words = spec
            .stop_words
            .iter()
            .flatten()
            .map(|w| if spec.lowercase { w.to_lowercase() } else { w.clone() })
            .collect();

        Ok(Self { spec, pattern, capture_group, stop_words })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let spec: TfidfSpec = read_artifact(path, VECTORIZER_KIND)?;
        Self::from_spec(spec)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(path, VECTORIZER_KIND, &self.spec)
    }

    /// Width of the produced vectors.
    pub fn n_features(&self) -> usize {
        self.spec.idf.len()
    }

    pub fn spec(&self) -> &TfidfSpec {
        &self.spec
    }

    /// Tokens of `text` after case folding and stop-word removal.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let folded: Cow<'_, str> = if self.spec.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens: Vec<String> = if self.capture_group {
            self.pattern
                .captures_iter(&folded)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        } else {
            self.pattern
                .find_iter(&folded)
                .map(|m| m.as_str().to_string())
                .collect()
        };

        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Vectorize a single document.
    pub fn transform_one(&self, text: &str) -> FeatureVector {
        let tokens = self.analyze(text);
        let (min_n, max_n) = self.spec.ngram_range;

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&col) = self.spec.vocabulary.get(&term) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }

        let entries = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.spec.sublinear_tf { 1.0 + count.ln() } else { count };
                (col, tf * self.spec.idf[col])
            })
            .collect();

        let mut row = FeatureVector::new(self.n_features(), entries);
        self.normalize(&mut row);
        debug!(tokens = tokens.len(), nnz = row.nnz(), "vectorized document");
        row
    }

    fn normalize(&self, row: &mut FeatureVector) {
        let norm = match self.spec.norm {
            Some(Norm::L2) => row.entries().iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.entries().iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => return,
        };
        if norm > 0.0 {
            row.scale(1.0 / norm);
        }
    }
}

impl FeatureTransformer for TfidfVectorizer {
    fn transform(&self, texts: &[&str]) -> Result<Vec<FeatureVector>> {
        Ok(texts.iter().map(|t| self.transform_one(t)).collect())
    }
}
