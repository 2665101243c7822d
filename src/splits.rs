use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{SplitConfig, validate_train_fraction};
use crate::errors::PipelineError;

/// Dataset partitions produced by the splitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitLabel {
    /// Training split.
    Train,
    /// Held-out test split.
    Test,
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitLabel::Train => f.write_str("train"),
            SplitLabel::Test => f.write_str("test"),
        }
    }
}

/// Minimal splitmix64 generator; the same seed always yields the same stream.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64_internal().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Seeded random train/test partitioner.
///
/// One uniform draw per row, consumed in row order. A draw below
/// `train_fraction` sends the row to [`SplitLabel::Train`], so partition
/// sizes are approximate. Identical seed and row order give identical
/// partitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetSplitter {
    train_fraction: f64,
    seed: u64,
}

impl DatasetSplitter {
    /// Splitter for `train_fraction` in (0, 1).
    pub fn new(train_fraction: f64, seed: u64) -> Result<Self, PipelineError> {
        validate_train_fraction(train_fraction)?;
        Ok(Self {
            train_fraction,
            seed,
        })
    }

    /// Splitter from a [`SplitConfig`].
    pub fn from_config(config: &SplitConfig) -> Result<Self, PipelineError> {
        Self::new(config.train_fraction, config.seed)
    }

    /// Configured train fraction.
    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    /// Configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Partition label for each of `len` rows, in row order.
    pub fn assignments(&self, len: usize) -> Vec<SplitLabel> {
        let mut rng = DeterministicRng::new(self.seed);
        (0..len)
            .map(|_| {
                if rng.random::<f64>() < self.train_fraction {
                    SplitLabel::Train
                } else {
                    SplitLabel::Test
                }
            })
            .collect()
    }

    /// Split `rows` into `(train, test)`, preserving relative order in each.
    pub fn split<T>(&self, rows: Vec<T>) -> (Vec<T>, Vec<T>) {
        let labels = self.assignments(rows.len());
        let mut train = Vec::with_capacity(rows.len());
        let mut test = Vec::new();
        for (row, label) in rows.into_iter().zip(labels) {
            match label {
                SplitLabel::Train => train.push(row),
                SplitLabel::Test => test.push(row),
            }
        }
        (train, test)
    }
}
