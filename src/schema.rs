//! Type coercion from loosely-typed ingested rows to [`Review`] values.
//!
//! Malformed numeric cells never fail a row: they become the missing
//! sentinel (`None`) and are surfaced later by the profiler.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::constants::schema::REVIEW_TEXT;
use crate::data::{NumericField, NumericValues, RawRow, RawTable, Review, ReviewTable};

/// Casts raw rows to the review schema.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    /// Normalize every row, preserving order and row count.
    pub fn normalize(&self, raw: RawTable) -> ReviewTable {
        let normalized: Vec<(Review, usize)> =
            raw.rows.into_par_iter().map(normalize_row).collect();
        let malformed: usize = normalized.iter().map(|(_, bad)| bad).sum();
        let rows: Vec<Review> = normalized.into_iter().map(|(row, _)| row).collect();
        debug!(
            rows = rows.len(),
            malformed_cells = malformed,
            "schema normalization completed"
        );
        ReviewTable::new(rows)
    }
}

/// Returns the review plus the count of present-but-uncoercible cells (numeric or text).
fn normalize_row(raw: RawRow) -> (Review, usize) {
    let RawRow { id, mut fields } = raw;
    let mut numeric = NumericValues::default();
    let mut malformed = 0;
    for field in NumericField::ALL {
        let value = fields.shift_remove(field.column_name());
        let coerced = value.as_ref().and_then(coerce_integer);
        if coerced.is_none() && value.as_ref().is_some_and(|value| !value.is_null()) {
            malformed += 1;
        }
        numeric.set(field, coerced);
    }
    let text = match fields.shift_remove(REVIEW_TEXT) {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(_) => {
            malformed += 1;
            None
        }
    };
    let extra: IndexMap<_, _> = fields;
    (
        Review {
            id,
            text,
            numeric,
            extra,
        },
        malformed,
    )
}

/// Integer coercion for one loosely-typed cell.
///
/// Integers pass through, finite floats and decimal strings truncate toward
/// zero, booleans map to 1/0, and everything else is missing.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().and_then(|v| i64::try_from(v).ok()))
            .or_else(|| number.as_f64().and_then(truncate_float)),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(raw) => {
            let trimmed = raw.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate_float))
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truncate_float(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // i64::MAX is not exactly representable; the upper bound is exclusive.
    if truncated >= -9_223_372_036_854_775_808.0 && truncated < 9_223_372_036_854_775_808.0 {
        Some(truncated as i64)
    } else {
        None
    }
}
