use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use crate::data::{Prediction, PredictionRecord, Review, ReviewTable, RowId};
use crate::errors::PipelineError;
use crate::lexicon::LexiconScores;

/// Per-row signals an output record is joined from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Lexicon score A.
    PatternScore,
    /// Lexicon score B.
    ValenceScore,
    /// Classifier label.
    Prediction,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Signal::PatternScore => "pattern score",
            Signal::ValenceScore => "valence score",
            Signal::Prediction => "prediction",
        };
        f.write_str(name)
    }
}

/// Records that joined cleanly, plus the rows that did not.
#[derive(Debug, Default)]
pub struct Assembly {
    /// Complete output records, in prediction order.
    pub records: Vec<PredictionRecord>,
    /// One `IncompleteJoin` per row that could not be assembled.
    pub failures: Vec<PipelineError>,
}

/// Join one row's text and signals into a record.
///
/// Both lexicon scores are stored together, so a row without a score is
/// missing both of them.
pub fn assemble_row(
    id: RowId,
    text: Option<&str>,
    scores: &LexiconScores,
    prediction: Option<&Prediction>,
) -> Result<PredictionRecord, PipelineError> {
    let score = scores.get(id);
    let mut missing = Vec::new();
    if score.is_none() {
        missing.push(Signal::PatternScore);
        missing.push(Signal::ValenceScore);
    }
    if prediction.is_none() {
        missing.push(Signal::Prediction);
    }
    match (score, prediction) {
        (Some(score), Some(prediction)) => Ok(PredictionRecord {
            review_text: text.map(str::to_string),
            pattern_sentiment: score.pattern,
            valence_sentiment: score.valence,
            predicted: prediction.label,
        }),
        _ => Err(PipelineError::IncompleteJoin { row: id, missing }),
    }
}

/// Assemble a record for every prediction.
pub fn assemble(
    table: &ReviewTable,
    scores: &LexiconScores,
    predictions: &[Prediction],
) -> Assembly {
    let reviews: HashMap<RowId, &Review> = table.rows.iter().map(|r| (r.id, r)).collect();
    let mut assembly = Assembly::default();
    for prediction in predictions {
        let text = reviews
            .get(&prediction.id)
            .and_then(|review| review.text.as_deref());
        match assemble_row(prediction.id, text, scores, Some(prediction)) {
            Ok(record) => assembly.records.push(record),
            Err(err) => {
                warn!(row = prediction.id, error = %err, "dropping incomplete row");
                assembly.failures.push(err);
            }
        }
    }
    assembly
}
