use serde::{Deserialize, Serialize};

use crate::constants::classifier::{
    DEFAULT_NEGATIVE_MAX_RATING, DEFAULT_POSITIVE_MIN_RATING, DEFAULT_SMOOTHING,
};
use crate::constants::features::{DEFAULT_NUM_FEATURES, MAX_NUM_FEATURES};
use crate::constants::splits::{DEFAULT_SPLIT_SEED, DEFAULT_TRAIN_FRACTION};
use crate::data::{NumericField, SentimentLabel};
use crate::errors::PipelineError;

/// Rule that turns review text into tokens.
///
/// The rule is part of feature identity: changing it changes every bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerRule {
    /// Lowercase, split on whitespace, drop empty tokens. Punctuation stays attached.
    #[default]
    Whitespace,
    /// Lowercase, split on anything that is not alphanumeric or `'`, trim `'`.
    Words,
}

/// Which rows the IDF weights are fitted on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfFitScope {
    /// Fit on every row before splitting (leaks test document frequencies).
    #[default]
    FullCorpus,
    /// Fit on the train partition only, then apply to both partitions.
    TrainingOnly,
}

/// How training labels are derived from a review.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LabelSource {
    /// Bucket the `overall` star rating.
    Rating {
        /// Ratings `<= negative_max` are negative.
        negative_max: i64,
        /// Ratings `>= positive_min` are positive.
        positive_min: i64,
    },
    /// Use rows where both lexicon scores agree on a sign.
    LexiconAgreement {
        /// Scores within `[-threshold, threshold]` count as neutral.
        threshold: f64,
    },
}

impl Default for LabelSource {
    fn default() -> Self {
        LabelSource::Rating {
            negative_max: DEFAULT_NEGATIVE_MAX_RATING,
            positive_min: DEFAULT_POSITIVE_MIN_RATING,
        }
    }
}

/// Feature extraction settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Number of hash buckets (vector dimensionality).
    pub num_features: usize,
    /// Tokenization rule.
    pub tokenizer: TokenizerRule,
    /// Cap term counts at one.
    pub binary: bool,
    /// Buckets seen in fewer documents get zero IDF weight.
    pub min_doc_freq: usize,
    /// Rows used for IDF fitting.
    pub idf_scope: IdfFitScope,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            num_features: DEFAULT_NUM_FEATURES,
            tokenizer: TokenizerRule::default(),
            binary: false,
            min_doc_freq: 0,
            idf_scope: IdfFitScope::default(),
        }
    }
}

/// Train/test partition settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Target fraction of rows assigned to train.
    pub train_fraction: f64,
    /// Seed of the per-row assignment stream.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_fraction: DEFAULT_TRAIN_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

/// Naive Bayes settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Additive (Laplace) smoothing constant.
    pub smoothing: f64,
    /// Declared label domain; each must appear in training data.
    pub labels: Vec<SentimentLabel>,
    /// Where training labels come from.
    pub label_source: LabelSource,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            labels: SentimentLabel::ALL.to_vec(),
            label_source: LabelSource::default(),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Feature extraction settings.
    pub features: FeatureConfig,
    /// Partition settings.
    pub split: SplitConfig,
    /// Classifier settings.
    pub classifier: ClassifierConfig,
    /// Optional descending sort applied after normalization.
    pub sort_by: Option<NumericField>,
    /// Worker threads for row-parallel stages; `None` uses the global pool.
    pub workers: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            features: FeatureConfig::default(),
            split: SplitConfig::default(),
            classifier: ClassifierConfig::default(),
            sort_by: Some(NumericField::WilsonLowerBound),
            workers: None,
        }
    }
}

impl PipelineConfig {
    /// Check every option against its accepted range.
    pub fn validated(self) -> Result<Self, PipelineError> {
        let features = &self.features;
        if features.num_features == 0 || features.num_features > MAX_NUM_FEATURES {
            return Err(PipelineError::Configuration(format!(
                "num_features must be in 1..={MAX_NUM_FEATURES}, got {}",
                features.num_features
            )));
        }
        validate_train_fraction(self.split.train_fraction)?;

        let classifier = &self.classifier;
        if !classifier.smoothing.is_finite() || classifier.smoothing <= 0.0 {
            return Err(PipelineError::Configuration(format!(
                "smoothing must be finite and greater than zero, got {}",
                classifier.smoothing
            )));
        }
        if classifier.labels.is_empty() {
            return Err(PipelineError::Configuration(
                "label domain must not be empty".to_string(),
            ));
        }
        for (idx, label) in classifier.labels.iter().enumerate() {
            if classifier.labels[..idx].contains(label) {
                return Err(PipelineError::Configuration(format!(
                    "label '{label}' is declared more than once"
                )));
            }
        }
        match classifier.label_source {
            LabelSource::Rating {
                negative_max,
                positive_min,
            } if negative_max >= positive_min => {
                return Err(PipelineError::Configuration(format!(
                    "negative_max ({negative_max}) must be below positive_min ({positive_min})"
                )));
            }
            LabelSource::LexiconAgreement { threshold }
                if !(0.0..1.0).contains(&threshold) =>
            {
                return Err(PipelineError::Configuration(format!(
                    "lexicon agreement threshold must be in [0, 1), got {threshold}"
                )));
            }
            _ => {}
        }

        if self.workers == Some(0) {
            return Err(PipelineError::Configuration(
                "workers must be at least 1 when set".to_string(),
            ));
        }
        Ok(self)
    }
}

pub(crate) fn validate_train_fraction(fraction: f64) -> Result<(), PipelineError> {
    if fraction.is_finite() && fraction > 0.0 && fraction < 1.0 {
        Ok(())
    } else {
        Err(PipelineError::Configuration(format!(
            "train_fraction must be in (0, 1), got {fraction}"
        )))
    }
}
