/// Stable row identity assigned at ingestion (zero-based input ordinal).
/// Example: `0` for the first JSON line, `41` for the forty-second.
pub type RowId = u64;
/// Column name as it appears on the wire.
/// Examples: `reviewText`, `overall`, `wilson_lower_bound`
pub type ColumnName = String;
/// Raw review body text.
/// Example: `Works great, battery lasts all week.`
pub type ReviewText = String;
/// Single normalized token produced by a tokenizer rule.
/// Examples: `great`, `product`, `didn't`
pub type Token = String;
/// Hash bucket index inside a feature vector.
/// Example: `171_402` (always `< num_features`)
pub type FeatureIndex = u32;
/// Name of a polarity analyzer, used in logs and errors.
/// Examples: `pattern`, `valence`
pub type AnalyzerName = &'static str;
