//! Bag-of-words features: tokenize, hash into fixed buckets, IDF-weight.

mod hashing;
mod idf;
mod tokenizer;

pub use hashing::HashingTf;
pub use idf::{Idf, IdfModel};
pub use tokenizer::tokenize;

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{FeatureConfig, TokenizerRule};
use crate::data::{FeatureRow, ReviewTable, RowId, SentimentLabel, SparseVector};
use crate::errors::PipelineError;
use crate::types::Token;

/// Text to fixed-dimensionality vectors for one configuration.
#[derive(Clone, Debug)]
pub struct FeatureExtractor {
    tokenizer: TokenizerRule,
    hashing: HashingTf,
    idf: Idf,
}

impl FeatureExtractor {
    /// Extractor for `config` (assumed validated).
    pub fn new(config: &FeatureConfig) -> Self {
        Self {
            tokenizer: config.tokenizer,
            hashing: HashingTf::new(config.num_features, config.binary),
            idf: Idf::new(config.min_doc_freq),
        }
    }

    /// Shared vector dimensionality.
    pub fn num_features(&self) -> usize {
        self.hashing.num_features()
    }

    /// Tokens of `text` under the configured rule.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(self.tokenizer, text)
    }

    /// Term-frequency vector of one text.
    pub fn term_frequency(&self, text: &str) -> SparseVector {
        self.hashing.transform(&self.tokenize(text))
    }

    /// Term-frequency rows for every review, in table order.
    ///
    /// Missing text yields an empty vector; `labels` attaches training labels by row id.
    pub fn term_frequencies(
        &self,
        table: &ReviewTable,
        labels: &HashMap<RowId, SentimentLabel>,
    ) -> Vec<FeatureRow> {
        table
            .rows
            .par_iter()
            .map(|review| FeatureRow {
                id: review.id,
                label: labels.get(&review.id).copied(),
                features: self.term_frequency(review.text_or_empty()),
            })
            .collect()
    }

    /// Fit IDF weights over `rows` (a barrier over the whole slice).
    pub fn fit_idf(&self, rows: &[FeatureRow]) -> Result<IdfModel, PipelineError> {
        let model = self
            .idf
            .fit(self.num_features(), rows.iter().map(|row| &row.features))?;
        debug!(
            documents = model.doc_count(),
            num_features = model.num_features(),
            "idf weights fitted"
        );
        Ok(model)
    }

    /// Term frequencies, IDF fitted over the same rows, then weighted rows.
    pub fn fit_transform(
        &self,
        table: &ReviewTable,
        labels: &HashMap<RowId, SentimentLabel>,
    ) -> Result<(IdfModel, Vec<FeatureRow>), PipelineError> {
        let tf = self.term_frequencies(table, labels);
        let model = self.fit_idf(&tf)?;
        let weighted = model.transform_rows(tf)?;
        Ok((model, weighted))
    }
}
