use std::collections::BTreeMap;

use crate::data::SparseVector;
use crate::hash::fnv1a64;
use crate::types::{FeatureIndex, Token};

/// Maps token sequences to term-frequency vectors of fixed dimensionality.
///
/// Distinct tokens that land in the same bucket are merged; that loss is
/// accepted in exchange for a bounded feature space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashingTf {
    num_features: usize,
    binary: bool,
}

impl HashingTf {
    /// `num_features` must be non-zero (validated by `PipelineConfig`).
    pub fn new(num_features: usize, binary: bool) -> Self {
        Self {
            num_features,
            binary,
        }
    }

    /// Vector dimensionality.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Bucket for one token.
    pub fn bucket(&self, token: &str) -> FeatureIndex {
        (fnv1a64(token) % self.num_features as u64) as FeatureIndex
    }

    /// Term-frequency vector with sorted indices.
    pub fn transform(&self, tokens: &[Token]) -> SparseVector {
        let mut counts: BTreeMap<FeatureIndex, f64> = BTreeMap::new();
        for token in tokens {
            let entry = counts.entry(self.bucket(token)).or_insert(0.0);
            *entry = if self.binary { 1.0 } else { *entry + 1.0 };
        }
        let (indices, values) = counts.into_iter().unzip();
        SparseVector {
            size: self.num_features,
            indices,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn repeated_tokens_accumulate_counts() {
        let tf = HashingTf::new(1 << 18, false);
        let vector = tf.transform(&tokens(&["great", "great", "product"]));
        assert_eq!(vector.size, 1 << 18);
        assert_eq!(vector.get(tf.bucket("great")), 2.0);
        assert_eq!(vector.get(tf.bucket("product")), 1.0);
        assert!(vector.indices.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn binary_mode_caps_counts() {
        let tf = HashingTf::new(64, true);
        let vector = tf.transform(&tokens(&["a", "a", "a"]));
        assert_eq!(vector.values, vec![1.0]);
    }

    #[test]
    fn single_bucket_merges_every_token() {
        let tf = HashingTf::new(1, false);
        let vector = tf.transform(&tokens(&["x", "y", "z"]));
        assert_eq!(vector.indices, vec![0]);
        assert_eq!(vector.values, vec![3.0]);
    }

    #[test]
    fn buckets_are_stable() {
        let tf = HashingTf::new(1 << 18, false);
        assert_eq!(tf.bucket("a"), (0xaf63dc4c8601ec8c_u64 % (1 << 18)) as FeatureIndex);
    }
}
