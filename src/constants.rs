/// Column names of the review schema.
pub mod schema {
    /// Free-text review body column.
    pub const REVIEW_TEXT: &str = "reviewText";
    /// Helpful-yes vote count column.
    pub const HELPFUL_YES: &str = "helpful_yes";
    /// Helpful-no vote count column.
    pub const HELPFUL_NO: &str = "helpful_no";
    /// Days between review and snapshot column.
    pub const DAY_DIFF: &str = "day_diff";
    /// Overall star rating column.
    pub const OVERALL: &str = "overall";
    /// Average-rating score column.
    pub const SCORE_AVERAGE_RATING: &str = "score_average_rating";
    /// Positive/negative vote difference column.
    pub const SCORE_POS_NEG_DIFF: &str = "score_pos_neg_diff";
    /// Total vote count column.
    pub const TOTAL_VOTE: &str = "total_vote";
    /// Wilson lower-bound score column.
    pub const WILSON_LOWER_BOUND: &str = "wilson_lower_bound";
}

/// Keys of the emitted prediction records.
pub mod output {
    /// Review body key (same as the input column).
    pub const REVIEW_TEXT: &str = super::schema::REVIEW_TEXT;
    /// Pattern (averaged polarity) lexicon score key.
    pub const PATTERN_SENTIMENT: &str = "pattern_sentiment";
    /// Valence (compound) lexicon score key.
    pub const VALENCE_SENTIMENT: &str = "valence_sentiment";
    /// Naive Bayes predicted label key.
    pub const NAIVE_BAYES_PREDICTED: &str = "naivebayes_predicted";
}

/// Defaults and bounds for feature extraction.
pub mod features {
    /// Default hashing dimensionality (2^18).
    pub const DEFAULT_NUM_FEATURES: usize = 1 << 18;
    /// Largest accepted hashing dimensionality (2^24).
    pub const MAX_NUM_FEATURES: usize = 1 << 24;
    /// FNV-1a 64-bit offset basis used for token bucketing.
    pub const FNV1A64_OFFSET: u64 = 0xcbf29ce484222325;
    /// FNV-1a 64-bit prime used for token bucketing.
    pub const FNV1A64_PRIME: u64 = 0x100000001b3;
}

/// Defaults for partitioning.
pub mod splits {
    /// Default fraction of rows assigned to train.
    pub const DEFAULT_TRAIN_FRACTION: f64 = 0.7;
    /// Default split seed.
    pub const DEFAULT_SPLIT_SEED: u64 = 100;
}

/// Defaults for Naive Bayes training and label derivation.
pub mod classifier {
    /// Default additive smoothing constant.
    pub const DEFAULT_SMOOTHING: f64 = 1.0;
    /// Highest `overall` rating still labelled negative.
    pub const DEFAULT_NEGATIVE_MAX_RATING: i64 = 2;
    /// Lowest `overall` rating labelled positive.
    pub const DEFAULT_POSITIVE_MIN_RATING: i64 = 4;
}

/// Tuning constants for the pattern (averaged polarity) analyzer.
pub mod pattern {
    /// Multiplier applied to a word preceded by a negation.
    pub const NEGATION_FACTOR: f64 = -0.5;
    /// Number of preceding tokens searched for a negation.
    pub const NEGATION_WINDOW: usize = 2;
}

/// Tuning constants for the valence (compound) analyzer.
pub mod valence {
    /// Normalization constant for the compound score.
    pub const NORMALIZATION_ALPHA: f64 = 15.0;
    /// Scalar added (or removed) by a booster word.
    pub const BOOSTER_INCREMENT: f64 = 0.293;
    /// Scalar added for ALL-CAPS emphasis in mixed-case text.
    pub const CAPS_INCREMENT: f64 = 0.733;
    /// Multiplier applied to negated valences.
    pub const NEGATION_SCALAR: f64 = -0.74;
    /// Number of preceding tokens searched for a negation.
    pub const NEGATION_WINDOW: usize = 3;
    /// Per-mark emphasis for exclamation points.
    pub const EXCLAMATION_INCREMENT: f64 = 0.292;
    /// Maximum number of exclamation points that add emphasis.
    pub const MAX_EXCLAMATIONS: usize = 4;
    /// Weight of sentiment before a contrastive "but".
    pub const BEFORE_BUT_WEIGHT: f64 = 0.5;
    /// Weight of sentiment after a contrastive "but".
    pub const AFTER_BUT_WEIGHT: f64 = 1.5;
}

/// Diagnostic profile settings.
pub mod profile {
    /// Percentiles reported by the table summary.
    pub const SUMMARY_PERCENTILES: [f64; 6] = [0.0, 5.0, 50.0, 95.0, 99.0, 100.0];
    /// Width of section banners in the text summary.
    pub const BANNER_WIDTH: usize = 82;
}
