//! Latent semantic analysis: TF-IDF followed by truncated SVD.
//!
//! The SVD is computed from the eigendecomposition of whichever Gram matrix
//! is smaller (documents × documents or terms × terms). That matrix is dense,
//! so memory grows with the square and time with the cube of the short side
//! of the TF-IDF matrix. The vocabulary is capped before fitting to bound it.

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::{debug, info};

use fable_core::errors::{EmbeddingError, FableError, FableResult};
use fable_core::traits::TextEmbedder;

use crate::tfidf::{SparseVector, TfidfVectorizer};

/// Vocabulary cap used by [`LsaEmbedder::fit`].
pub const DEFAULT_MAX_VOCABULARY: usize = 4096;

/// Eigenvalues below this fraction of the largest are treated as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// Caption-space embedder. Fit once; `transform` never refits.
#[derive(Debug, Clone)]
pub struct LsaEmbedder {
    vectorizer: TfidfVectorizer,
    /// `k` right singular vectors, each of vocabulary length.
    components: Vec<Vec<f32>>,
}

impl LsaEmbedder {
    /// Fit on `texts`, keeping at most `dimensions` components (fewer when
    /// the TF-IDF matrix has lower rank) over at most
    /// [`DEFAULT_MAX_VOCABULARY`] terms.
    pub fn fit(texts: &[String], dimensions: usize) -> FableResult<Self> {
        Self::fit_capped(texts, dimensions, DEFAULT_MAX_VOCABULARY)
    }

    /// Fit over the `max_vocabulary` most document-frequent terms.
    pub fn fit_capped(texts: &[String], dimensions: usize, max_vocabulary: usize) -> FableResult<Self> {
        if dimensions == 0 {
            return Err(FableError::ConfigError(
                "lsa dimensions must be at least 1".to_string(),
            ));
        }
        let vectorizer = TfidfVectorizer::fit_with_limit(texts, Some(max_vocabulary))?;
        let rows: Vec<SparseVector> = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let vocab = vectorizer.vocabulary_size();

        let components = if rows.len() <= vocab {
            components_from_document_gram(&rows, vocab, dimensions)
        } else {
            components_from_term_gram(&rows, vocab, dimensions)
        };
        if components.is_empty() {
            return Err(EmbeddingError::EmptyVocabulary.into());
        }

        info!(
            documents = texts.len(),
            vocabulary = vocab,
            requested = dimensions,
            dimensions = components.len(),
            "fit LSA embedder"
        );

        Ok(Self {
            vectorizer,
            components,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    fn project(&self, text: &str) -> Vec<f32> {
        let row = self.vectorizer.transform(text);
        self.components
            .iter()
            .map(|component| {
                row.iter()
                    .map(|(idx, w)| *w * component[*idx] as f64)
                    .sum::<f64>() as f32
            })
            .collect()
    }
}

impl TextEmbedder for LsaEmbedder {
    fn transform(&self, texts: &[String]) -> FableResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.project(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.components.len()
    }

    fn name(&self) -> &str {
        "lsa"
    }
}

/// Eigenpairs sorted by descending eigenvalue, truncated to `k` and to the
/// numerical rank.
fn leading_eigenpairs(gram: DMatrix<f64>, k: usize) -> Vec<(f64, Vec<f64>)> {
    let eigen = SymmetricEigen::new(gram);
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let largest = order
        .first()
        .map(|&i| eigen.eigenvalues[i])
        .unwrap_or(0.0);
    if largest <= 0.0 {
        return Vec::new();
    }

    let pairs: Vec<(f64, Vec<f64>)> = order
        .into_iter()
        .take(k)
        .filter(|&i| eigen.eigenvalues[i] > largest * RANK_TOLERANCE)
        .map(|i| {
            (
                eigen.eigenvalues[i],
                eigen.eigenvectors.column(i).iter().copied().collect(),
            )
        })
        .collect();
    debug!(kept = pairs.len(), largest, "truncated eigendecomposition");
    pairs
}

/// `X Xᵀ = U Σ² Uᵀ`, then `v = Xᵀ u / σ`.
fn components_from_document_gram(rows: &[SparseVector], vocab: usize, k: usize) -> Vec<Vec<f32>> {
    let n = rows.len();
    let mut gram = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let dot = sparse_dot(&rows[i], &rows[j]);
            gram[(i, j)] = dot;
            gram[(j, i)] = dot;
        }
    }

    leading_eigenpairs(gram, k)
        .into_iter()
        .map(|(lambda, u)| {
            let sigma = lambda.sqrt();
            let mut v = vec![0.0f64; vocab];
            for (row, weight) in rows.iter().zip(&u) {
                for (idx, x) in row {
                    v[*idx] += x * weight;
                }
            }
            v.into_iter().map(|x| (x / sigma) as f32).collect()
        })
        .collect()
}

/// `Xᵀ X = V Σ² Vᵀ` directly.
fn components_from_term_gram(rows: &[SparseVector], vocab: usize, k: usize) -> Vec<Vec<f32>> {
    let mut gram = DMatrix::<f64>::zeros(vocab, vocab);
    for row in rows {
        for (a, xa) in row {
            for (b, xb) in row {
                gram[(*a, *b)] += xa * xb;
            }
        }
    }

    leading_eigenpairs(gram, k)
        .into_iter()
        .map(|(_, v)| v.into_iter().map(|x| x as f32).collect())
        .collect()
}

/// Dot product of two index-sorted sparse rows.
fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::rank_by_similarity;

    fn captions() -> Vec<String> {
        vec![
            "a red fox sitting in the snow".to_string(),
            "a brown bear fishing in a river".to_string(),
            "snow covered mountain peaks at dawn".to_string(),
            "a red barn in a green field".to_string(),
        ]
    }

    #[test]
    fn dimensions_clamp_to_rank() {
        let lsa = LsaEmbedder::fit(&captions(), 500).unwrap();
        assert!(lsa.dimensions() <= captions().len());
        assert!(lsa.dimensions() >= 1);
    }

    #[test]
    fn requested_dimensions_are_respected() {
        let lsa = LsaEmbedder::fit(&captions(), 2).unwrap();
        assert_eq!(lsa.dimensions(), 2);
        let out = lsa.transform(&["red fox".to_string()]).unwrap();
        assert_eq!(out[0].len(), 2);
    }

    #[test]
    fn query_ranks_matching_caption_first() {
        let corpus = captions();
        let lsa = LsaEmbedder::fit(&corpus, 500).unwrap();
        let rows = lsa.transform(&corpus).unwrap();
        let query = lsa.transform(&["fox snow".to_string()]).unwrap();
        let ranked = rank_by_similarity(&query[0], &rows);
        assert_eq!(ranked[0].0, 0);
    }

    #[test]
    fn term_gram_path_matches_shape() {
        // More documents than vocabulary terms.
        let corpus: Vec<String> = (0..6)
            .map(|i| if i % 2 == 0 { "fox snow" } else { "bear river" }.to_string())
            .collect();
        let lsa = LsaEmbedder::fit(&corpus, 10).unwrap();
        assert_eq!(lsa.vocabulary_size(), 4);
        assert_eq!(lsa.dimensions(), 2);
    }

    #[test]
    fn vocabulary_cap_bounds_the_gram_matrix() {
        let corpus: Vec<String> = (0..6)
            .map(|i| if i % 2 == 0 { "fox snow" } else { "bear river" }.to_string())
            .collect();
        let lsa = LsaEmbedder::fit_capped(&corpus, 10, 2).unwrap();
        assert_eq!(lsa.vocabulary_size(), 2);
        assert_eq!(lsa.dimensions(), 1);
    }

    #[test]
    fn zero_dimensions_is_a_config_error() {
        assert!(matches!(
            LsaEmbedder::fit(&captions(), 0),
            Err(FableError::ConfigError(_))
        ));
    }

    #[test]
    fn sparse_dot_merges_indices() {
        let a = vec![(0, 1.0), (2, 2.0), (5, 1.0)];
        let b = vec![(2, 3.0), (5, 4.0), (7, 1.0)];
        assert_eq!(sparse_dot(&a, &b), 10.0);
    }
}
