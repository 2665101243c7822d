use rayon::prelude::*;

use crate::data::{FeatureRow, SparseVector};
use crate::errors::PipelineError;

/// Inverse-document-frequency estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Idf {
    min_doc_freq: usize,
}

impl Idf {
    /// Buckets present in fewer than `min_doc_freq` documents get weight 0.
    pub fn new(min_doc_freq: usize) -> Self {
        Self { min_doc_freq }
    }

    /// Fit weights `ln((m + 1) / (df + 1))` over `vectors`.
    ///
    /// This is a full pass over every vector; nothing can be weighted until it returns.
    pub fn fit<'a, I>(&self, num_features: usize, vectors: I) -> Result<IdfModel, PipelineError>
    where
        I: IntoIterator<Item = &'a SparseVector>,
    {
        let mut doc_freq = vec![0u64; num_features];
        let mut doc_count = 0u64;
        for vector in vectors {
            if vector.size != num_features {
                return Err(PipelineError::DimensionMismatch {
                    expected: num_features,
                    actual: vector.size,
                });
            }
            doc_count += 1;
            for (index, value) in vector.iter() {
                if value > 0.0 {
                    doc_freq[index as usize] += 1;
                }
            }
        }
        let numerator = doc_count as f64 + 1.0;
        let weights = doc_freq
            .into_iter()
            .map(|df| {
                if (df as usize) < self.min_doc_freq {
                    0.0
                } else {
                    (numerator / (df as f64 + 1.0)).ln()
                }
            })
            .collect();
        Ok(IdfModel { weights, doc_count })
    }
}

/// Fitted IDF weights.
#[derive(Clone, Debug, PartialEq)]
pub struct IdfModel {
    weights: Vec<f64>,
    doc_count: u64,
}

impl IdfModel {
    /// Dimensionality the weights were fitted for.
    pub fn num_features(&self) -> usize {
        self.weights.len()
    }

    /// Number of documents seen during fitting.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Weight of one bucket, or `None` past the fitted dimensionality.
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// Elementwise product with the fitted weights; exact zeros are dropped.
    pub fn transform(&self, vector: &SparseVector) -> Result<SparseVector, PipelineError> {
        if vector.size != self.weights.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.weights.len(),
                actual: vector.size,
            });
        }
        let mut weighted = SparseVector::zeros(vector.size);
        for (index, value) in vector.iter() {
            let product = value * self.weights[index as usize];
            if product != 0.0 {
                weighted.indices.push(index);
                weighted.values.push(product);
            }
        }
        Ok(weighted)
    }

    /// Weight every row, in parallel, preserving order.
    pub fn transform_rows(&self, rows: Vec<FeatureRow>) -> Result<Vec<FeatureRow>, PipelineError> {
        rows.into_par_iter()
            .map(|row| {
                let features = self.transform(&row.features)?;
                Ok(FeatureRow { features, ..row })
            })
            .collect()
    }
}
