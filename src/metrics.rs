use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

use crate::data::{FeatureRow, Prediction, RowId, SentimentLabel};
use crate::lexicon::LexiconScores;

/// Held-out accuracy of the classifier.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    /// Labelled test rows that were scored.
    pub evaluated: usize,
    /// Fraction of evaluated rows predicted correctly.
    pub accuracy: f64,
    /// Counts keyed by actual label, then predicted label.
    pub confusion: IndexMap<SentimentLabel, IndexMap<SentimentLabel, usize>>,
}

impl Evaluation {
    /// Rows with `actual` label predicted as `predicted`.
    pub fn count(&self, actual: SentimentLabel, predicted: SentimentLabel) -> usize {
        self.confusion
            .get(&actual)
            .and_then(|row| row.get(&predicted))
            .copied()
            .unwrap_or(0)
    }
}

/// Compare predictions against the labels carried by `rows`.
///
/// Returns `None` when no predicted row has a label.
pub fn evaluate(predictions: &[Prediction], rows: &[FeatureRow]) -> Option<Evaluation> {
    let actual: HashMap<RowId, SentimentLabel> = rows
        .iter()
        .filter_map(|row| row.label.map(|label| (row.id, label)))
        .collect();
    let mut confusion: IndexMap<SentimentLabel, IndexMap<SentimentLabel, usize>> =
        SentimentLabel::ALL
            .iter()
            .map(|actual| {
                let row = SentimentLabel::ALL.iter().map(|p| (*p, 0)).collect();
                (*actual, row)
            })
            .collect();
    let mut evaluated = 0;
    let mut correct = 0;
    for prediction in predictions {
        let Some(label) = actual.get(&prediction.id) else {
            continue;
        };
        evaluated += 1;
        if *label == prediction.label {
            correct += 1;
        }
        *confusion
            .entry(*label)
            .or_default()
            .entry(prediction.label)
            .or_insert(0) += 1;
    }
    if evaluated == 0 {
        return None;
    }
    Some(Evaluation {
        evaluated,
        accuracy: correct as f64 / evaluated as f64,
        confusion,
    })
}

/// How often each lexicon score's sign matches the predicted label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LexiconAgreement {
    /// Predictions that had a lexicon score.
    pub compared: usize,
    /// Share where score A's sign matched.
    pub pattern: f64,
    /// Share where score B's sign matched.
    pub valence: f64,
}

/// Sign agreement between lexicon scores and predictions.
pub fn lexicon_agreement(predictions: &[Prediction], scores: &LexiconScores) -> Option<LexiconAgreement> {
    let mut compared = 0;
    let mut pattern = 0;
    let mut valence = 0;
    for prediction in predictions {
        let Some(score) = scores.get(prediction.id) else {
            continue;
        };
        compared += 1;
        let expected = prediction.label.sign();
        if score_sign(score.pattern) == expected {
            pattern += 1;
        }
        if score_sign(score.valence) == expected {
            valence += 1;
        }
    }
    (compared > 0).then(|| LexiconAgreement {
        compared,
        pattern: pattern as f64 / compared as f64,
        valence: valence as f64 / compared as f64,
    })
}

fn score_sign(score: f64) -> i8 {
    if score > 0.0 {
        1
    } else if score < 0.0 {
        -1
    } else {
        0
    }
}
