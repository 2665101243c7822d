use std::collections::HashMap;

use super::words::{PATTERN_INTENSIFIERS, PATTERN_POLARITY};
use super::{PolarityAnalyzer, is_negation, words_into};
use crate::constants::pattern::{NEGATION_FACTOR, NEGATION_WINDOW};
use crate::errors::PipelineError;
use crate::types::AnalyzerName;

/// Averaged word polarity (score A).
///
/// Each lexicon word contributes its polarity, scaled by an intensifier
/// directly before it and flipped (and halved) by a negation within
/// [`NEGATION_WINDOW`] preceding tokens. The score is the mean contribution,
/// or 0.0 when no lexicon word occurs.
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    polarity: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    tokens: Vec<String>,
}

impl PatternAnalyzer {
    /// Build the analyzer and its lookup tables.
    pub fn new() -> Self {
        Self {
            polarity: PATTERN_POLARITY.iter().copied().collect(),
            intensifiers: PATTERN_INTENSIFIERS.iter().copied().collect(),
            tokens: Vec::new(),
        }
    }

    fn score_tokens(&self) -> f64 {
        let mut total = 0.0;
        let mut matched = 0usize;
        for (idx, token) in self.tokens.iter().enumerate() {
            let Some(&base) = self.polarity.get(token.as_str()) else {
                continue;
            };
            let mut score = base;
            let factor = idx
                .checked_sub(1)
                .and_then(|prev| self.intensifiers.get(self.tokens[prev].as_str()));
            if let Some(&factor) = factor {
                score = (score * factor).clamp(-1.0, 1.0);
            }
            let window_start = idx.saturating_sub(NEGATION_WINDOW);
            if self.tokens[window_start..idx]
                .iter()
                .any(|prior| is_negation(prior))
            {
                score *= NEGATION_FACTOR;
            }
            total += score;
            matched += 1;
        }
        if matched == 0 {
            0.0
        } else {
            total / matched as f64
        }
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityAnalyzer for PatternAnalyzer {
    fn name(&self) -> AnalyzerName {
        "pattern"
    }

    fn polarity(&mut self, text: &str) -> Result<f64, PipelineError> {
        words_into(&text.to_lowercase(), &mut self.tokens);
        Ok(self.score_tokens())
    }
}
