//! Multinomial Naive Bayes over sparse term vectors.

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{ClassifierConfig, LabelSource};
use crate::data::{
    FeatureRow, NumericField, Prediction, ReviewTable, RowId, SentimentLabel, SparseVector,
};
use crate::errors::PipelineError;
use crate::lexicon::LexiconScores;

/// Untrained multinomial Naive Bayes estimator.
#[derive(Clone, Debug, PartialEq)]
pub struct NaiveBayes {
    smoothing: f64,
    labels: Vec<SentimentLabel>,
}

impl NaiveBayes {
    /// Estimator with additive `smoothing` over the declared `labels`.
    pub fn new(smoothing: f64, labels: Vec<SentimentLabel>) -> Self {
        Self { smoothing, labels }
    }

    /// Estimator from a validated [`ClassifierConfig`].
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.smoothing, config.labels.clone())
    }

    /// Estimate log priors and per-class term log probabilities.
    ///
    /// Unlabelled rows are ignored. Every declared label must appear at
    /// least once among the labelled rows.
    pub fn fit(&self, rows: &[FeatureRow]) -> Result<NaiveBayesModel, PipelineError> {
        let labelled: Vec<(&FeatureRow, usize)> = rows
            .iter()
            .filter_map(|row| {
                row.label
                    .and_then(|label| self.labels.iter().position(|l| *l == label))
                    .map(|class| (row, class))
            })
            .collect();
        let Some((first, _)) = labelled.first() else {
            return Err(PipelineError::InsufficientTrainingData {
                label: self.labels.first().copied().unwrap_or(SentimentLabel::Neutral),
            });
        };
        let dims = first.features.size;

        let classes = self.labels.len();
        let mut doc_counts = vec![0u64; classes];
        let mut term_totals = vec![vec![0.0f64; dims]; classes];
        for (row, class) in &labelled {
            if row.features.size != dims {
                return Err(PipelineError::DimensionMismatch {
                    expected: dims,
                    actual: row.features.size,
                });
            }
            for (index, value) in row.features.iter() {
                if !value.is_finite() || value < 0.0 {
                    return Err(PipelineError::InvalidFeature {
                        row: row.id,
                        index,
                        value,
                    });
                }
                term_totals[*class][index as usize] += value;
            }
            doc_counts[*class] += 1;
        }
        if let Some(class) = doc_counts.iter().position(|count| *count == 0) {
            return Err(PipelineError::InsufficientTrainingData {
                label: self.labels[class],
            });
        }

        let alpha = self.smoothing;
        let n = labelled.len() as f64;
        let log_priors: Vec<f64> = doc_counts
            .iter()
            .map(|count| ((*count as f64 + alpha) / (n + alpha * classes as f64)).ln())
            .collect();
        let log_theta: Vec<Vec<f64>> = term_totals
            .into_par_iter()
            .map(|totals| {
                let denom = totals.iter().sum::<f64>() + alpha * dims as f64;
                totals
                    .into_iter()
                    .map(|total| ((total + alpha) / denom).ln())
                    .collect::<Vec<f64>>()
            })
            .collect();
        debug!(
            labelled = labelled.len(),
            skipped = rows.len() - labelled.len(),
            num_features = dims,
            "naive bayes fitted"
        );
        Ok(NaiveBayesModel {
            labels: self.labels.clone(),
            num_features: dims,
            log_priors,
            log_theta,
        })
    }
}

/// Fitted Naive Bayes parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct NaiveBayesModel {
    labels: Vec<SentimentLabel>,
    num_features: usize,
    log_priors: Vec<f64>,
    log_theta: Vec<Vec<f64>>,
}

impl NaiveBayesModel {
    /// Declared labels in tie-break order.
    pub fn labels(&self) -> &[SentimentLabel] {
        &self.labels
    }

    /// Dimensionality the model was trained on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Log prior of each declared label.
    pub fn log_priors(&self) -> &[f64] {
        &self.log_priors
    }

    /// Unnormalized log posterior per label.
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> Result<Vec<f64>, PipelineError> {
        if features.size != self.num_features {
            return Err(PipelineError::DimensionMismatch {
                expected: self.num_features,
                actual: features.size,
            });
        }
        Ok(self
            .log_priors
            .iter()
            .zip(&self.log_theta)
            .map(|(prior, theta)| {
                prior
                    + features
                        .iter()
                        .map(|(index, value)| value * theta[index as usize])
                        .sum::<f64>()
            })
            .collect())
    }

    /// Most probable label for one row; ties resolve to the earliest declared label.
    pub fn predict_row(&self, row: &FeatureRow) -> Result<Prediction, PipelineError> {
        let scores = self.joint_log_likelihood(&row.features)?;
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        let normalizer: f64 = scores.iter().map(|s| (s - scores[best]).exp()).sum();
        Ok(Prediction {
            id: row.id,
            label: self.labels[best],
            confidence: 1.0 / normalizer,
        })
    }

    /// Predictions for every row, in input order.
    ///
    /// Any row with the wrong dimensionality fails the whole call.
    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Prediction>, PipelineError> {
        rows.par_iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Training labels for each review under `source`.
///
/// Rows that yield no label are absent from the map. `scores` is only
/// consulted by [`LabelSource::LexiconAgreement`].
pub fn derive_labels(
    table: &ReviewTable,
    source: &LabelSource,
    scores: Option<&LexiconScores>,
) -> HashMap<RowId, SentimentLabel> {
    table
        .rows
        .iter()
        .filter_map(|review| {
            let label = match *source {
                LabelSource::Rating {
                    negative_max,
                    positive_min,
                } => review
                    .numeric
                    .get(NumericField::Overall)
                    .map(|rating| rating_label(rating, negative_max, positive_min)),
                LabelSource::LexiconAgreement { threshold } => scores
                    .and_then(|scores| scores.get(review.id))
                    .map(|score| agreement_label(score.pattern, score.valence, threshold)),
            };
            label.map(|label| (review.id, label))
        })
        .collect()
}

fn rating_label(rating: i64, negative_max: i64, positive_min: i64) -> SentimentLabel {
    if rating <= negative_max {
        SentimentLabel::Negative
    } else if rating >= positive_min {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

fn agreement_label(pattern: f64, valence: f64, threshold: f64) -> SentimentLabel {
    if pattern > threshold && valence > threshold {
        SentimentLabel::Positive
    } else if pattern < -threshold && valence < -threshold {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
