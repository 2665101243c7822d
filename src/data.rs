use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

use crate::constants::schema;

pub use crate::types::{ColumnName, FeatureIndex, ReviewText, RowId};

/// Integer-typed engagement columns of a review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// `helpful_yes`
    HelpfulYes,
    /// `helpful_no`
    HelpfulNo,
    /// `day_diff`
    DayDiff,
    /// `overall`
    Overall,
    /// `score_average_rating`
    ScoreAverageRating,
    /// `score_pos_neg_diff`
    ScorePosNegDiff,
    /// `total_vote`
    TotalVote,
    /// `wilson_lower_bound`
    WilsonLowerBound,
}

impl NumericField {
    /// Canonical column order.
    pub const ALL: [NumericField; 8] = [
        NumericField::HelpfulYes,
        NumericField::HelpfulNo,
        NumericField::DayDiff,
        NumericField::Overall,
        NumericField::ScoreAverageRating,
        NumericField::ScorePosNegDiff,
        NumericField::TotalVote,
        NumericField::WilsonLowerBound,
    ];

    /// Wire column name.
    pub fn column_name(self) -> &'static str {
        match self {
            NumericField::HelpfulYes => schema::HELPFUL_YES,
            NumericField::HelpfulNo => schema::HELPFUL_NO,
            NumericField::DayDiff => schema::DAY_DIFF,
            NumericField::Overall => schema::OVERALL,
            NumericField::ScoreAverageRating => schema::SCORE_AVERAGE_RATING,
            NumericField::ScorePosNegDiff => schema::SCORE_POS_NEG_DIFF,
            NumericField::TotalVote => schema::TOTAL_VOTE,
            NumericField::WilsonLowerBound => schema::WILSON_LOWER_BOUND,
        }
    }

    /// Resolve a wire column name.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.column_name() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Coerced numeric columns; `None` is the missing sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NumericValues([Option<i64>; 8]);

impl NumericValues {
    /// Value for `field`, or `None` when missing.
    pub fn get(&self, field: NumericField) -> Option<i64> {
        self.0[field.slot()]
    }

    /// Set (or clear) the value for `field`.
    pub fn set(&mut self, field: NumericField, value: Option<i64>) {
        self.0[field.slot()] = value;
    }

    /// Builder-style variant of [`NumericValues::set`].
    pub fn with(mut self, field: NumericField, value: Option<i64>) -> Self {
        self.set(field, value);
        self
    }

    /// Number of missing slots.
    pub fn missing_count(&self) -> usize {
        self.0.iter().filter(|value| value.is_none()).count()
    }
}

/// One ingested row before type coercion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Ingestion ordinal.
    pub id: RowId,
    /// Loosely-typed fields in input order.
    pub fields: IndexMap<ColumnName, Value>,
}

/// Owned table of raw rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    /// Rows in ingestion order.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table from field maps, assigning ids by position.
    pub fn from_objects<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = IndexMap<ColumnName, Value>>,
    {
        let rows = objects
            .into_iter()
            .enumerate()
            .map(|(idx, fields)| RawRow {
                id: idx as RowId,
                fields,
            })
            .collect();
        Self { rows }
    }

    /// Row count.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A normalized review.
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    /// Stable row identity from ingestion.
    pub id: RowId,
    /// Review body; `None` when absent or not a string.
    pub text: Option<ReviewText>,
    /// Coerced engagement columns.
    pub numeric: NumericValues,
    /// Every other ingested column, untouched.
    pub extra: IndexMap<ColumnName, Value>,
}

impl Review {
    /// Review with only a body and no numeric values.
    pub fn from_text(id: RowId, text: impl Into<ReviewText>) -> Self {
        Self {
            id,
            text: Some(text.into()),
            numeric: NumericValues::default(),
            extra: IndexMap::new(),
        }
    }

    /// Body text, or the empty string when missing.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Owned table of normalized reviews.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewTable {
    /// Rows in current order.
    pub rows: Vec<Review>,
}

impl ReviewTable {
    /// Wrap a row vector.
    pub fn new(rows: Vec<Review>) -> Self {
        Self { rows }
    }

    /// Row count.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable descending sort by `field`; missing values go last.
    pub fn sorted_desc(mut self, field: NumericField) -> Self {
        self.rows
            .sort_by(|a, b| match (a.numeric.get(field), b.numeric.get(field)) {
                (Some(left), Some(right)) => right.cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        self
    }

    /// Extra column names in order of first appearance.
    pub fn extra_columns(&self) -> Vec<ColumnName> {
        let mut seen: IndexMap<ColumnName, ()> = IndexMap::new();
        for row in &self.rows {
            for key in row.extra.keys() {
                if !seen.contains_key(key) {
                    seen.insert(key.clone(), ());
                }
            }
        }
        seen.into_keys().collect()
    }

    /// Every column: text, numeric fields, then extras.
    pub fn columns(&self) -> Vec<ColumnName> {
        let mut columns = vec![schema::REVIEW_TEXT.to_string()];
        columns.extend(
            NumericField::ALL
                .iter()
                .map(|field| field.column_name().to_string()),
        );
        columns.extend(self.extra_columns());
        columns
    }
}

/// Discrete sentiment label domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Negative sentiment.
    Negative,
    /// Neither clearly positive nor negative.
    Neutral,
    /// Positive sentiment.
    Positive,
}

impl SentimentLabel {
    /// Every label, negative to positive.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Sign of the label (-1, 0, 1).
    pub fn sign(self) -> i8 {
        match self {
            SentimentLabel::Negative => -1,
            SentimentLabel::Neutral => 0,
            SentimentLabel::Positive => 1,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        };
        f.write_str(name)
    }
}

/// Sparse numeric vector with sorted, unique indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    /// Declared dimensionality.
    pub size: usize,
    /// Strictly increasing bucket indices, each `< size`.
    pub indices: Vec<FeatureIndex>,
    /// Values matching `indices`.
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Empty vector of dimensionality `size`.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Value at `index` (zero when absent).
    pub fn get(&self, index: FeatureIndex) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Iterate `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureIndex, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

/// Feature vector for one review, optionally labelled for training.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRow {
    /// Row identity from ingestion.
    pub id: RowId,
    /// Training label, when one could be derived.
    pub label: Option<SentimentLabel>,
    /// Hashed (and possibly IDF-weighted) term vector.
    pub features: SparseVector,
}

/// Both lexicon scores for one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LexiconScore {
    /// Averaged-polarity score (A), in [-1, 1].
    pub pattern: f64,
    /// Compound-valence score (B), in [-1, 1].
    pub valence: f64,
}

/// Classifier output for one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Row identity from ingestion.
    pub id: RowId,
    /// Predicted label.
    pub label: SentimentLabel,
    /// Posterior probability of `label`.
    pub confidence: f64,
}

/// Fully assembled output row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Review body.
    #[serde(rename = "reviewText")]
    pub review_text: Option<ReviewText>,
    /// Lexicon score A.
    pub pattern_sentiment: f64,
    /// Lexicon score B.
    pub valence_sentiment: f64,
    /// Classifier label.
    #[serde(rename = "naivebayes_predicted")]
    pub predicted: SentimentLabel,
}
