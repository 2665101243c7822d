//! Word tables for the built-in analyzers.

/// Per-word polarity in [-1, 1] for the pattern analyzer.
pub(super) const PATTERN_POLARITY: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("cheap", 0.4),
    ("clean", 0.37),
    ("comfortable", 0.4),
    ("convenient", 0.3),
    ("cool", 0.35),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("favorite", 0.5),
    ("fine", 0.42),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("ok", 0.5),
    ("okay", 0.5),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("positive", 0.23),
    ("recommend", 0.4),
    ("reliable", 0.6),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("solid", 0.3),
    ("sturdy", 0.45),
    ("superb", 1.0),
    ("useful", 0.3),
    ("well", 0.2),
    ("wonderful", 1.0),
    ("worth", 0.3),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broke", -0.5),
    ("broken", -0.4),
    ("cheaply", -0.3),
    ("defective", -0.7),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dead", -0.2),
    ("fail", -0.5),
    ("failed", -0.5),
    ("flimsy", -0.6),
    ("frustrating", -0.7),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("junk", -0.6),
    ("lousy", -0.7),
    ("mediocre", -0.3),
    ("negative", -0.3),
    ("poor", -0.4),
    ("problem", -0.4),
    ("refund", -0.2),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("useless", -0.5),
    ("waste", -0.6),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Multipliers applied to the word that follows.
pub(super) const PATTERN_INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("completely", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("pretty", 1.1),
    ("quite", 1.1),
    ("really", 1.2),
    ("so", 1.3),
    ("super", 1.4),
    ("too", 1.2),
    ("totally", 1.3),
    ("very", 1.3),
    ("slightly", 0.7),
    ("somewhat", 0.8),
];

/// Per-word valence on [-4, 4] for the valence analyzer.
pub(super) const VALENCE: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("comfortable", 1.5),
    ("cool", 1.3),
    ("delighted", 2.9),
    ("easy", 1.9),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressive", 2.3),
    ("incredible", 2.2),
    ("like", 1.5),
    ("love", 3.2),
    ("loved", 2.9),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("reliable", 1.4),
    ("satisfied", 1.8),
    ("solid", 0.6),
    ("sturdy", 0.9),
    ("superb", 3.1),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broke", -1.8),
    ("broken", -2.0),
    ("defective", -1.9),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("flimsy", -1.2),
    ("frustrating", -1.9),
    ("garbage", -2.0),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("junk", -1.7),
    ("lousy", -2.5),
    ("mediocre", -1.0),
    ("poor", -2.1),
    ("problem", -1.7),
    ("refund", -0.5),
    ("sad", -2.1),
    ("slow", -0.9),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Boosters that increase the magnitude of the following valence.
pub(super) const BOOSTERS_UP: &[&str] = &[
    "absolutely",
    "amazingly",
    "completely",
    "especially",
    "extremely",
    "highly",
    "incredibly",
    "really",
    "so",
    "super",
    "totally",
    "truly",
    "very",
];

/// Dampeners that decrease the magnitude of the following valence.
pub(super) const BOOSTERS_DOWN: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "marginally",
    "partly",
    "scarcely",
    "slightly",
    "somewhat",
];

/// Tokens that flip the polarity of nearby sentiment words.
pub(super) const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "didnt", "doesnt", "dont", "hardly", "isnt", "neither", "never",
    "no", "nobody", "none", "nor", "not", "nothing", "nowhere", "wasnt", "without", "wont",
];
