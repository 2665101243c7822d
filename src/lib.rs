#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Joins lexicon scores and predictions into output records.
pub mod assembler;
/// Naive Bayes training, inference, and label derivation.
pub mod classifier;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants for columns, defaults, and lexicon rules.
pub mod constants;
/// Row, table, vector, and record types.
pub mod data;
/// Reusable CLI runners shared by the demo binaries.
pub mod example_apps;
/// Tokenization, term hashing, and IDF weighting.
pub mod features;
mod hash;
/// Lexicon polarity analyzers.
pub mod lexicon;
/// Held-out accuracy and lexicon agreement.
pub mod metrics;
/// Stage orchestration.
pub mod pipeline;
/// Missing-value analysis and table summaries.
pub mod profile;
/// Raw row to typed review normalization.
pub mod schema;
/// Seeded train/test partitioning.
pub mod splits;
/// Input and output transports (JSONL files today).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use assembler::{Assembly, Signal, assemble, assemble_row};
pub use classifier::{NaiveBayes, NaiveBayesModel, derive_labels};
pub use config::{
    ClassifierConfig, FeatureConfig, IdfFitScope, LabelSource, PipelineConfig, SplitConfig,
    TokenizerRule,
};
pub use data::{
    FeatureRow, LexiconScore, NumericField, NumericValues, Prediction, PredictionRecord, RawRow,
    RawTable, Review, ReviewTable, SentimentLabel, SparseVector,
};
pub use errors::PipelineError;
pub use features::{FeatureExtractor, HashingTf, Idf, IdfModel};
pub use lexicon::{
    AnalyzerBuilder, LexiconScorer, LexiconScores, PatternAnalyzer, PolarityAnalyzer,
    ValenceAnalyzer, analyzer_builder,
};
pub use metrics::{Evaluation, LexiconAgreement, evaluate, lexicon_agreement};
pub use pipeline::{PipelineOutput, SentimentPipeline, Stage};
pub use profile::{ColumnMissing, ColumnQuantiles, ColumnType, TableSummary, profile, summarize};
pub use schema::SchemaNormalizer;
pub use splits::{DatasetSplitter, DeterministicRng, SplitLabel};
pub use types::{AnalyzerName, ColumnName, FeatureIndex, ReviewText, RowId, Token};
