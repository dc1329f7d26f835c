//! TF-IDF vector space over feature documents.
//!
//! ## Weighting
//! ```text
//! tfidf(t, d) = count(t, d) × idf(t)
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//! Each document row is then L2-normalized. Terms present in every document
//! get the minimum idf, rarer terms get more weight.
//!
//! The space is fitted from scratch for every request; nothing about the
//! vocabulary outlives the catalog snapshot it was built from.

use crate::features::FeatureDocument;
use crate::stopwords::StopWords;
use catalog::MovieId;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors raised while building or comparing vectors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorizeError {
    /// `fit` was called without any documents
    #[error("Cannot fit a vector space on zero documents")]
    EmptyCorpus,

    /// Two vectors from different spaces were compared
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// A sparse row of the vector space.
///
/// Entries are `(column, weight)` pairs sorted by column with no zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// The zero vector of the given dimensionality
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from `(column, weight)` pairs; zero weights are dropped.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(col, weight)| col < dim && weight != 0.0);
        entries.sort_by_key(|&(col, _)| col);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product with a dense vector of the same dimensionality
    pub fn dot_dense(&self, dense: &[f64]) -> Result<f64, VectorizeError> {
        if dense.len() != self.dim {
            return Err(VectorizeError::DimensionMismatch {
                expected: self.dim,
                found: dense.len(),
            });
        }
        Ok(self.entries.iter().map(|&(col, w)| w * dense[col]).sum())
    }

    /// Scale to unit length; the zero vector stays zero.
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }
}

/// One row of the space, bound to the movie it describes.
#[derive(Debug, Clone)]
pub struct DocumentVector {
    pub movie_id: MovieId,
    pub vector: SparseVector,
}

/// The fitted vocabulary plus one vector per feature document.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// Terms in column order (sorted)
    terms: Vec<String>,
    /// Term -> column
    vocabulary: HashMap<String, usize>,
    /// idf per column
    idf: Vec<f64>,
    rows: Vec<DocumentVector>,
}

impl VectorSpace {
    /// Number of documents (rows)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimensionality shared by every row
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn rows(&self) -> &[DocumentVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&DocumentVector> {
        self.rows.get(index)
    }

    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column_of(term).map(|col| self.idf[col])
    }

    /// The `n` highest-weighted terms of a row, heaviest first
    pub fn top_terms(&self, index: usize, n: usize) -> Vec<(&str, f64)> {
        let Some(row) = self.rows.get(index) else {
            return Vec::new();
        };

        let mut weighted: Vec<(&str, f64)> = row
            .vector
            .iter()
            .map(|(col, weight)| (self.terms[col].as_str(), weight))
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        weighted.truncate(n);
        weighted
    }
}

/// Builds a [`VectorSpace`] from feature documents.
///
/// ## Usage
/// ```ignore
/// let space = TfidfVectorizer::new()
///     .with_stop_words_english()
///     .fit_transform(&documents)?;
/// ```
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: Option<StopWords>,
}

impl TfidfVectorizer {
    /// A vectorizer without stop word removal
    pub fn new() -> Self {
        Self { stop_words: None }
    }

    /// Drop common English words before weighting
    pub fn with_stop_words_english(self) -> Self {
        self.with_stop_words(StopWords::english())
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Split text into lowercase terms.
    ///
    /// A term is a run of at least two alphanumeric or `_` characters, so
    /// punctuation splits words and single letters are ignored.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| {
                self.stop_words
                    .as_ref()
                    .is_none_or(|stop_words| !stop_words.contains(token))
            })
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary and idf weights, and vectorize every document.
    ///
    /// Row `i` of the result describes `documents[i]`.
    pub fn fit_transform(
        &self,
        documents: &[FeatureDocument],
    ) -> Result<VectorSpace, VectorizeError> {
        if documents.is_empty() {
            return Err(VectorizeError::EmptyCorpus);
        }

        let n_docs = documents.len();

        // Term counts per document and document frequency per term
        let mut counts: Vec<HashMap<String, usize>> = Vec::with_capacity(n_docs);
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let mut term_counts: HashMap<String, usize> = HashMap::new();
            for token in self.tokenize(&doc.text) {
                *term_counts.entry(token).or_insert(0) += 1;
            }
            for term in term_counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            counts.push(term_counts);
        }

        // BTreeMap iteration gives the sorted column order
        let terms: Vec<String> = doc_freq.keys().cloned().collect();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| smoothed_idf(n_docs, df))
            .collect();

        let dim = terms.len();
        let rows = documents
            .iter()
            .zip(counts)
            .map(|(doc, term_counts)| {
                let entries = term_counts
                    .into_iter()
                    .map(|(term, count)| {
                        let col = vocabulary[&term];
                        (col, count as f64 * idf[col])
                    })
                    .collect();
                let mut vector = SparseVector::from_entries(dim, entries);
                vector.normalize();
                DocumentVector {
                    movie_id: doc.movie_id.clone(),
                    vector,
                }
            })
            .collect();

        Ok(VectorSpace {
            terms,
            vocabulary,
            idf,
            rows,
        })
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}
