//! Lexicon polarity scoring.
//!
//! Two independent analyzers score every review body:
//! - [`PatternAnalyzer`] averages per-word polarity (score A).
//! - [`ValenceAnalyzer`] sums rule-adjusted valences into a compound score (score B).
//!
//! Analyzers may hold scratch state (`&mut self`), so they are never shared
//! between threads. [`LexiconScorer::score_table`] builds one pair per rayon
//! job (a handful per worker) and reuses it for every row of that job.

mod pattern;
mod valence;
mod words;

pub use pattern::PatternAnalyzer;
pub use valence::ValenceAnalyzer;

use indexmap::IndexMap;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::data::{LexiconScore, ReviewTable, RowId};
use crate::errors::PipelineError;
use crate::types::AnalyzerName;

/// A polarity function over one text string.
pub trait PolarityAnalyzer: Send {
    /// Short analyzer name used in logs and errors.
    fn name(&self) -> AnalyzerName;
    /// Polarity of `text`; callers clamp the result to [-1, 1].
    fn polarity(&mut self, text: &str) -> Result<f64, PipelineError>;
}

/// Constructor for a fresh analyzer instance.
pub type AnalyzerBuilder = Arc<dyn Fn() -> Box<dyn PolarityAnalyzer> + Send + Sync>;

/// Wrap a concrete analyzer constructor as an [`AnalyzerBuilder`].
pub fn analyzer_builder<A, F>(make: F) -> AnalyzerBuilder
where
    A: PolarityAnalyzer + 'static,
    F: Fn() -> A + Send + Sync + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn PolarityAnalyzer>)
}

/// Applies both analyzers per review.
#[derive(Clone)]
pub struct LexiconScorer {
    pattern: AnalyzerBuilder,
    valence: AnalyzerBuilder,
}

impl fmt::Debug for LexiconScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconScorer").finish_non_exhaustive()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(
            analyzer_builder(PatternAnalyzer::new),
            analyzer_builder(ValenceAnalyzer::new),
        )
    }
}

impl LexiconScorer {
    /// Scorer with caller-provided analyzers for scores A and B.
    pub fn new(pattern: AnalyzerBuilder, valence: AnalyzerBuilder) -> Self {
        Self { pattern, valence }
    }

    /// Score A for one text, with a freshly built analyzer.
    pub fn score_a(&self, text: &str) -> Result<f64, PipelineError> {
        score_with((self.pattern)().as_mut(), Some(text))
    }

    /// Score B for one text, with a freshly built analyzer.
    pub fn score_b(&self, text: &str) -> Result<f64, PipelineError> {
        score_with((self.valence)().as_mut(), Some(text))
    }

    /// Score every row of `table`.
    ///
    /// A row whose analyzer fails gets no score and is listed in
    /// [`LexiconScores::failed`]; the remaining rows are unaffected.
    pub fn score_table(&self, table: &ReviewTable) -> LexiconScores {
        let results: Vec<(RowId, Result<LexiconScore, PipelineError>)> = table
            .rows
            .par_iter()
            .map_init(
                || ((self.pattern)(), (self.valence)()),
                |(pattern, valence), row| {
                    let text = row.text.as_deref();
                    let score = score_with(pattern.as_mut(), text).and_then(|a| {
                        score_with(valence.as_mut(), text).map(|b| LexiconScore {
                            pattern: a,
                            valence: b,
                        })
                    });
                    (row.id, score)
                },
            )
            .collect();

        let mut scores = LexiconScores::default();
        for (id, result) in results {
            match result {
                Ok(score) => {
                    scores.insert(id, score);
                }
                Err(err) => {
                    warn!(row = id, error = %err, "lexicon scoring failed for row");
                    scores.failed.push(id);
                }
            }
        }
        debug!(
            scored = scores.len(),
            failed = scores.failed.len(),
            "lexicon scoring completed"
        );
        scores
    }
}

fn score_with(analyzer: &mut dyn PolarityAnalyzer, text: Option<&str>) -> Result<f64, PipelineError> {
    match text {
        Some(text) if !text.trim().is_empty() => analyzer.polarity(text).map(bounded),
        _ => Ok(0.0),
    }
}

fn bounded(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}

/// Lexicon scores keyed by row id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexiconScores {
    scores: IndexMap<RowId, LexiconScore>,
    failed: Vec<RowId>,
}

impl LexiconScores {
    /// Score for `id`, if one was produced.
    pub fn get(&self, id: RowId) -> Option<&LexiconScore> {
        self.scores.get(&id)
    }

    /// Insert or replace the score for `id`.
    pub fn insert(&mut self, id: RowId, score: LexiconScore) -> Option<LexiconScore> {
        self.scores.insert(id, score)
    }

    /// Drop the score for `id`.
    pub fn remove(&mut self, id: RowId) -> Option<LexiconScore> {
        self.scores.shift_remove(&id)
    }

    /// Rows whose analyzers failed.
    pub fn failed(&self) -> &[RowId] {
        &self.failed
    }

    /// Number of scored rows.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if no row was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate scores in row order of the scored table.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &LexiconScore)> {
        self.scores.iter().map(|(id, score)| (*id, score))
    }
}

/// Lowercased word tokens shared by the built-in analyzers.
fn words_into(text: &str, out: &mut Vec<String>) {
    out.clear();
    for raw in text.split(|ch: char| !(ch.is_alphanumeric() || ch == '\'')) {
        let trimmed = raw.trim_matches('\'');
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
    }
}

/// Expects an already lowercased token.
fn is_negation(token: &str) -> bool {
    words::NEGATIONS.contains(&token) || token.ends_with("n't")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;

    struct Fixed(f64);

    impl PolarityAnalyzer for Fixed {
        fn name(&self) -> AnalyzerName {
            "fixed"
        }

        fn polarity(&mut self, _text: &str) -> Result<f64, PipelineError> {
            Ok(self.0)
        }
    }

    struct FailsOn(&'static str);

    impl PolarityAnalyzer for FailsOn {
        fn name(&self) -> AnalyzerName {
            "fails_on"
        }

        fn polarity(&mut self, text: &str) -> Result<f64, PipelineError> {
            if text.contains(self.0) {
                Err(PipelineError::Analyzer {
                    analyzer: self.name(),
                    reason: "simulated".into(),
                })
            } else {
                Ok(0.25)
            }
        }
    }

    #[test]
    fn empty_and_missing_text_score_exactly_zero() {
        let scorer = LexiconScorer::default();
        assert_eq!(scorer.score_a("").unwrap(), 0.0);
        assert_eq!(scorer.score_b("").unwrap(), 0.0);
        assert_eq!(scorer.score_a("   \t").unwrap(), 0.0);

        let table = ReviewTable::new(vec![Review {
            text: None,
            ..Review::from_text(0, "")
        }]);
        let scores = scorer.score_table(&table);
        assert_eq!(
            scores.get(0),
            Some(&LexiconScore {
                pattern: 0.0,
                valence: 0.0
            })
        );
    }

    #[test]
    fn out_of_range_and_nan_scores_are_bounded() {
        let scorer = LexiconScorer::new(
            analyzer_builder(|| Fixed(7.5)),
            analyzer_builder(|| Fixed(f64::NAN)),
        );
        assert_eq!(scorer.score_a("anything").unwrap(), 1.0);
        assert_eq!(scorer.score_b("anything").unwrap(), 0.0);
    }

    #[test]
    fn analyzers_are_built_per_job_not_per_row() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let scorer = LexiconScorer::new(
            analyzer_builder(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                PatternAnalyzer::new()
            }),
            analyzer_builder(ValenceAnalyzer::new),
        );
        let rows: Vec<Review> = (0..2_000)
            .map(|id| Review::from_text(id, "great product"))
            .collect();
        let scores = scorer.score_table(&ReviewTable::new(rows));
        let built = builds.load(Ordering::SeqCst);
        assert!(built >= 1);
        assert!(built < 2_000, "built {built} analyzers for 2000 rows");
        let expected = scorer.score_a("great product").unwrap();
        assert!(scores.iter().all(|(_, score)| score.pattern == expected));
    }

    #[test]
    fn failing_rows_are_recorded_without_aborting() {
        let scorer = LexiconScorer::new(
            analyzer_builder(|| Fixed(0.5)),
            analyzer_builder(|| FailsOn("boom")),
        );
        let table = ReviewTable::new(vec![
            Review::from_text(0, "fine"),
            Review::from_text(1, "boom goes the row"),
            Review::from_text(2, "also fine"),
        ]);
        let scores = scorer.score_table(&table);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.failed(), &[1]);
        assert!(scores.get(1).is_none());
        assert_eq!(scores.get(2).map(|score| score.valence), Some(0.25));
    }

    #[test]
    fn words_into_strips_punctuation_and_quotes() {
        let mut out = Vec::new();
        words_into("'Great' product, didn't break!", &mut out);
        assert_eq!(out, vec!["Great", "product", "didn't", "break"]);
    }

    #[test]
    fn negations_include_contractions() {
        assert!(is_negation("not"));
        assert!(is_negation("never"));
        assert!(is_negation("wouldn't"));
        assert!(!is_negation("nothingness"));
    }
}
