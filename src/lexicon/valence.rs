use std::collections::HashMap;

use super::words::{BOOSTERS_DOWN, BOOSTERS_UP, VALENCE};
use super::{PolarityAnalyzer, is_negation, words_into};
use crate::constants::valence::{
    AFTER_BUT_WEIGHT, BEFORE_BUT_WEIGHT, BOOSTER_INCREMENT, CAPS_INCREMENT, EXCLAMATION_INCREMENT,
    MAX_EXCLAMATIONS, NEGATION_SCALAR, NEGATION_WINDOW, NORMALIZATION_ALPHA,
};
use crate::errors::PipelineError;
use crate::types::AnalyzerName;

/// Booster decay by distance (1, 2, 3 tokens before the sentiment word).
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

/// Rule-adjusted compound valence (score B).
///
/// Word valences on [-4, 4] are adjusted for boosters, negation, ALL-CAPS
/// emphasis, a contrastive "but", and exclamation marks, summed, then
/// squashed into [-1, 1] with `s / sqrt(s^2 + alpha)`.
#[derive(Debug, Clone)]
pub struct ValenceAnalyzer {
    valence: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    raw: Vec<String>,
    lower: Vec<String>,
    sentiments: Vec<f64>,
}

impl ValenceAnalyzer {
    /// Build the analyzer and its lookup tables.
    pub fn new() -> Self {
        let boosters = BOOSTERS_UP
            .iter()
            .map(|word| (*word, BOOSTER_INCREMENT))
            .chain(BOOSTERS_DOWN.iter().map(|word| (*word, -BOOSTER_INCREMENT)))
            .collect();
        Self {
            valence: VALENCE.iter().copied().collect(),
            boosters,
            raw: Vec::new(),
            lower: Vec::new(),
            sentiments: Vec::new(),
        }
    }

    fn token_valence(&self, idx: usize, caps_differential: bool) -> f64 {
        let word = self.lower[idx].as_str();
        if self.boosters.contains_key(word) {
            return 0.0;
        }
        let Some(&base) = self.valence.get(word) else {
            return 0.0;
        };
        let direction = base.signum();
        let mut valence = base;
        if caps_differential && is_all_caps(&self.raw[idx]) {
            valence += CAPS_INCREMENT * direction;
        }
        for (offset, decay) in BOOSTER_DECAY.iter().enumerate() {
            let Some(prior) = idx.checked_sub(offset + 1) else {
                break;
            };
            if let Some(&increment) = self.boosters.get(self.lower[prior].as_str()) {
                let mut scalar = increment * decay * direction;
                if caps_differential && is_all_caps(&self.raw[prior]) {
                    scalar += CAPS_INCREMENT * direction;
                }
                valence += scalar;
            }
        }
        let window_start = idx.saturating_sub(NEGATION_WINDOW);
        if self.lower[window_start..idx]
            .iter()
            .any(|prior| is_negation(prior))
        {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl Default for ValenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityAnalyzer for ValenceAnalyzer {
    fn name(&self) -> AnalyzerName {
        "valence"
    }

    fn polarity(&mut self, text: &str) -> Result<f64, PipelineError> {
        words_into(text, &mut self.raw);
        self.lower.clear();
        self.lower
            .extend(self.raw.iter().map(|token| token.to_lowercase()));

        let caps = self.raw.iter().filter(|token| is_all_caps(token)).count();
        let caps_differential = caps > 0 && caps < self.raw.len();

        let mut sentiments = std::mem::take(&mut self.sentiments);
        sentiments.clear();
        sentiments.extend((0..self.lower.len()).map(|idx| self.token_valence(idx, caps_differential)));

        if let Some(but) = self.lower.iter().position(|word| word == "but") {
            for (idx, value) in sentiments.iter_mut().enumerate() {
                if idx < but {
                    *value *= BEFORE_BUT_WEIGHT;
                } else if idx > but {
                    *value *= AFTER_BUT_WEIGHT;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        self.sentiments = sentiments;
        if sum != 0.0 {
            let marks = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += marks * EXCLAMATION_INCREMENT * sum.signum();
        }
        Ok(sum / (sum * sum + NORMALIZATION_ALPHA).sqrt())
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        ValenceAnalyzer::new().polarity(text).unwrap()
    }

    #[test]
    fn compound_normalizes_single_word_valence() {
        let expected = 3.1 / (3.1f64 * 3.1 + 15.0).sqrt();
        assert!((score("great product") - expected).abs() < 1e-12);
        assert!(score("terrible purchase") < 0.0);
        assert_eq!(score("it arrived tuesday"), 0.0);
    }

    #[test]
    fn negation_boosters_and_emphasis_shift_scores() {
        assert!(score("not good") < 0.0);
        assert!(score("very good") > score("good"));
        assert!(score("slightly good") < score("good"));
        assert!(score("good!!!") > score("good"));
        assert_eq!(score("good!!!!!!"), score("good!!!!"));
    }

    #[test]
    fn caps_emphasis_needs_mixed_case() {
        assert!(score("GREAT product") > score("great product"));
        assert_eq!(score("GREAT PRODUCT"), score("great product"));
    }

    #[test]
    fn contrastive_but_favours_the_second_clause() {
        assert!(score("good but terrible") < 0.0);
        assert!(score("terrible but good") > 0.0);
    }

    #[test]
    fn compound_stays_in_unit_interval() {
        let text = "best best best best best best best best best!!!!";
        let value = score(text);
        assert!(value > 0.9 && value <= 1.0);
    }
}
