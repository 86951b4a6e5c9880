use serde::{Deserialize, Serialize};

use crate::errors::RankingError;

/// Registered ranking features. Declaration order is the column order of
/// every [`FeatureVector`] and [`ScoreMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Coherency,
    Readability,
    Sentiment,
    Simplicity,
    Diversity,
    ModelDivergence,
}

impl Feature {
    pub const COUNT: usize = 6;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Coherency,
        Feature::Readability,
        Feature::Sentiment,
        Feature::Simplicity,
        Feature::Diversity,
        Feature::ModelDivergence,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::Coherency => "coherency",
            Feature::Readability => "readability",
            Feature::Sentiment => "sentiment",
            Feature::Simplicity => "simplicity",
            Feature::Diversity => "diversity",
            Feature::ModelDivergence => "model_divergence",
        }
    }
}

/// One score per registered feature, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector([f64; Feature::COUNT]);

impl FeatureVector {
    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn from_array(values: [f64; Feature::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.0[feature.index()] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(name, score)` pairs for display.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        Feature::ALL
            .iter()
            .map(|f| (f.name(), self.get(*f)))
            .collect()
    }
}

/// Row-major score matrix, shape `(candidates × features)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
    width: usize,
}

impl ScoreMatrix {
    /// Build from arbitrary rows. All rows must have the same length and
    /// every value must be finite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, RankingError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RankingError::RaggedMatrix {
                    row: row_idx,
                    expected: width,
                    actual: row.len(),
                });
            }
            if let Some(feature) = row.iter().position(|v| !v.is_finite()) {
                return Err(RankingError::NonFiniteScore {
                    row: row_idx,
                    feature,
                });
            }
        }
        Ok(Self { rows, width })
    }

    pub fn from_vectors(vectors: &[FeatureVector]) -> Result<Self, RankingError> {
        Self::new(vectors.iter().map(|v| v.as_slice().to_vec()).collect())
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_features(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
