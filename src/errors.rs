use std::io;

use thiserror::Error;

use crate::assembler::Signal;
use crate::data::SentimentLabel;
use crate::pipeline::Stage;
use crate::types::{AnalyzerName, FeatureIndex, RowId};

/// Error type for configuration, ingestion, training, prediction, and join failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("feature dimensionality mismatch: model expects {expected}, input has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("no training rows carry label '{label}'")]
    InsufficientTrainingData { label: SentimentLabel },
    #[error("row {row} is missing {} and cannot be assembled", join_signals(.missing))]
    IncompleteJoin { row: RowId, missing: Vec<Signal> },
    #[error("row {row} has invalid feature value {value} at index {index}")]
    InvalidFeature {
        row: RowId,
        index: FeatureIndex,
        value: f64,
    },
    #[error("analyzer '{analyzer}' failed: {reason}")]
    Analyzer {
        analyzer: AnalyzerName,
        reason: String,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("ingest failure at line {line}: {reason}")]
    Ingest { line: usize, reason: String },
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<PipelineError>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Wrap `self` with the pipeline stage that produced it.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            already @ PipelineError::Stage { .. } => already,
            other => PipelineError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }
}

fn join_signals(signals: &[Signal]) -> String {
    signals
        .iter()
        .map(|signal| signal.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
