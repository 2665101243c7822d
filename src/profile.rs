//! Read-only data-quality diagnostics over a normalized table.
//!
//! Nothing here gates the pipeline; the reports exist for human review.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use crate::constants::profile::{BANNER_WIDTH, SUMMARY_PERCENTILES};
use crate::constants::schema::REVIEW_TEXT;
use crate::data::{ColumnName, NumericField, Review, ReviewTable};

/// Missing-value count for one column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnMissing {
    /// Column name.
    pub column: ColumnName,
    /// Rows where the column is missing.
    pub missing: usize,
    /// `missing / rows * 100`.
    pub ratio: f64,
}

/// Coarse value type observed for a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text.
    String,
    /// Integer (coerced numeric columns).
    Integer,
    /// Non-integer JSON numbers.
    Float,
    /// JSON booleans.
    Boolean,
    /// JSON arrays or objects.
    Nested,
    /// More than one of the above.
    Mixed,
    /// Only nulls or absent values.
    Empty,
}

/// Nearest-rank percentiles of one numeric column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnQuantiles {
    /// Column name.
    pub column: ColumnName,
    /// `(percentile, value)` pairs; value is `None` when the column has no values.
    pub values: Vec<(f64, Option<i64>)>,
}

/// Shape, types, missing values, duplicates, and quantiles of a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSummary {
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub columns: usize,
    /// Observed type per column.
    pub column_types: Vec<(ColumnName, ColumnType)>,
    /// Columns with at least one missing value.
    pub missing: Vec<ColumnMissing>,
    /// Rows identical to an earlier row.
    pub duplicates: usize,
    /// Per-numeric-column quantiles.
    pub quantiles: Vec<ColumnQuantiles>,
}

impl TableSummary {
    /// Rows left after dropping duplicates.
    pub fn distinct(&self) -> usize {
        self.rows - self.duplicates
    }
}

/// Per-column missing counts; fully-populated columns are omitted.
pub fn profile(table: &ReviewTable) -> Vec<ColumnMissing> {
    let rows = table.len();
    if rows == 0 {
        return Vec::new();
    }
    let mut report = Vec::new();
    let mut push = |column: ColumnName, missing: usize| {
        if missing > 0 {
            report.push(ColumnMissing {
                column,
                missing,
                ratio: missing as f64 / rows as f64 * 100.0,
            });
        }
    };

    push(
        REVIEW_TEXT.to_string(),
        table.rows.iter().filter(|row| row.text.is_none()).count(),
    );
    for field in NumericField::ALL {
        push(
            field.column_name().to_string(),
            table
                .rows
                .iter()
                .filter(|row| row.numeric.get(field).is_none())
                .count(),
        );
    }
    for column in table.extra_columns() {
        let missing = table
            .rows
            .iter()
            .filter(|row| row.extra.get(&column).is_none_or(Value::is_null))
            .count();
        push(column, missing);
    }
    report
}

/// Rows identical (across every column) to an earlier row.
pub fn duplicate_count(table: &ReviewTable) -> usize {
    let extras = table.extra_columns();
    let mut seen: HashSet<String> = HashSet::with_capacity(table.len());
    table
        .rows
        .iter()
        .filter(|row| !seen.insert(row_key(row, &extras)))
        .count()
}

/// Rows left after dropping duplicates.
pub fn distinct_count(table: &ReviewTable) -> usize {
    table.len() - duplicate_count(table)
}

/// Full diagnostic summary.
pub fn summarize(table: &ReviewTable) -> TableSummary {
    let extras = table.extra_columns();
    let mut column_types = vec![(REVIEW_TEXT.to_string(), ColumnType::String)];
    column_types.extend(
        NumericField::ALL
            .iter()
            .map(|field| (field.column_name().to_string(), ColumnType::Integer)),
    );
    for column in &extras {
        column_types.push((column.clone(), infer_type(table, column)));
    }

    let quantiles = NumericField::ALL
        .iter()
        .map(|field| {
            let mut values: Vec<i64> = table
                .rows
                .iter()
                .filter_map(|row| row.numeric.get(*field))
                .collect();
            values.sort_unstable();
            ColumnQuantiles {
                column: field.column_name().to_string(),
                values: SUMMARY_PERCENTILES
                    .iter()
                    .map(|pct| (*pct, nearest_rank(&values, *pct)))
                    .collect(),
            }
        })
        .collect();

    TableSummary {
        rows: table.len(),
        columns: column_types.len(),
        column_types,
        missing: profile(table),
        duplicates: duplicate_count(table),
        quantiles,
    }
}

/// Nearest-rank percentile of pre-sorted `values`.
pub fn nearest_rank(sorted: &[i64], percentile: f64) -> Option<i64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (percentile / 100.0 * sorted.len() as f64).ceil() as usize;
    let idx = rank.clamp(1, sorted.len()) - 1;
    Some(sorted[idx])
}

fn row_key(row: &Review, extras: &[ColumnName]) -> String {
    let numeric: Vec<Option<i64>> = NumericField::ALL
        .iter()
        .map(|field| row.numeric.get(*field))
        .collect();
    let extra: Vec<&Value> = extras
        .iter()
        .map(|column| row.extra.get(column).unwrap_or(&Value::Null))
        .collect();
    // Serializing a tuple of owned scalars cannot fail.
    serde_json::to_string(&(&row.text, numeric, extra)).unwrap_or_default()
}

fn infer_type(table: &ReviewTable, column: &str) -> ColumnType {
    let mut observed: Option<ColumnType> = None;
    for value in table.rows.iter().filter_map(|row| row.extra.get(column)) {
        let kind = match value {
            Value::Null => continue,
            Value::String(_) => ColumnType::String,
            Value::Bool(_) => ColumnType::Boolean,
            Value::Number(number) if number.is_i64() || number.is_u64() => ColumnType::Integer,
            Value::Number(_) => ColumnType::Float,
            Value::Array(_) | Value::Object(_) => ColumnType::Nested,
        };
        observed = match observed {
            None => Some(kind),
            Some(prev) if prev == kind => Some(prev),
            Some(_) => return ColumnType::Mixed,
        };
    }
    observed.unwrap_or(ColumnType::Empty)
}

fn banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title:~^width$}", width = BANNER_WIDTH)
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "SHAPE")?;
        writeln!(f, "ROWS:{}", self.rows)?;
        writeln!(f, "COLUMNS:{}", self.columns)?;
        banner(f, "TYPES")?;
        for (column, kind) in &self.column_types {
            writeln!(f, "  {column}: {kind:?}")?;
        }
        banner(f, "MISSING VALUES")?;
        if self.missing.is_empty() {
            writeln!(f, "  none")?;
        }
        for entry in &self.missing {
            writeln!(
                f,
                "  {}: {} ({:.2}%)",
                entry.column, entry.missing, entry.ratio
            )?;
        }
        banner(f, "DUPLICATED VALUES")?;
        writeln!(f, "  duplicates: {}", self.duplicates)?;
        writeln!(f, "  distinct rows: {}", self.distinct())?;
        banner(f, "QUANTILES")?;
        for column in &self.quantiles {
            let cells: Vec<String> = column
                .values
                .iter()
                .map(|(pct, value)| match value {
                    Some(value) => format!("{pct}%={value}"),
                    None => format!("{pct}%=-"),
                })
                .collect();
            writeln!(f, "  {}: {}", column.column, cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(id: u64, text: Option<&str>, overall: Option<i64>) -> Review {
        let mut review = Review {
            id,
            text: text.map(str::to_string),
            ..Review::from_text(id, "")
        };
        review.numeric.set(NumericField::Overall, overall);
        for field in NumericField::ALL {
            if field != NumericField::Overall {
                review.numeric.set(field, Some(1));
            }
        }
        review
    }

    #[test]
    fn profile_lists_only_columns_with_missing_values() {
        let table = ReviewTable::new(vec![
            review(0, Some("a"), Some(5)),
            review(1, Some("b"), None),
            review(2, None, None),
            review(3, Some("d"), Some(4)),
        ]);
        let report = profile(&table);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].column, "reviewText");
        assert_eq!(report[0].missing, 1);
        assert!((report[0].ratio - 25.0).abs() < 1e-9);
        assert_eq!(report[1].column, "overall");
        assert_eq!(report[1].missing, 2);
        assert!((report[1].ratio - 50.0).abs() < 1e-9);
    }

    #[test]
    fn profile_counts_absent_and_null_extras() {
        let mut first = review(0, Some("a"), Some(1));
        first.extra.insert("asin".into(), json!("B01"));
        let mut second = review(1, Some("b"), Some(1));
        second.extra.insert("asin".into(), Value::Null);
        let third = review(2, Some("c"), Some(1));
        let report = profile(&ReviewTable::new(vec![first, second, third]));
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].column, "asin");
        assert_eq!(report[0].missing, 2);
    }

    #[test]
    fn empty_table_has_empty_profile() {
        assert!(profile(&ReviewTable::default()).is_empty());
        assert_eq!(duplicate_count(&ReviewTable::default()), 0);
    }

    #[test]
    fn duplicates_ignore_row_identity() {
        let table = ReviewTable::new(vec![
            review(0, Some("same"), Some(5)),
            review(1, Some("same"), Some(5)),
            review(2, Some("same"), Some(4)),
            review(3, Some("same"), Some(5)),
        ]);
        assert_eq!(duplicate_count(&table), 2);
        assert_eq!(distinct_count(&table), 2);
    }

    #[test]
    fn nearest_rank_covers_extremes() {
        let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(nearest_rank(&values, 0.0), Some(1));
        assert_eq!(nearest_rank(&values, 5.0), Some(1));
        assert_eq!(nearest_rank(&values, 50.0), Some(5));
        assert_eq!(nearest_rank(&values, 95.0), Some(10));
        assert_eq!(nearest_rank(&values, 100.0), Some(10));
        assert_eq!(nearest_rank(&[], 50.0), None);
    }

    #[test]
    fn summary_reports_shape_and_mixed_types() {
        let mut first = review(0, Some("a"), Some(5));
        first.extra.insert("reviewTime".into(), json!("2014-07-23"));
        let mut second = review(1, Some("b"), Some(3));
        second.extra.insert("reviewTime".into(), json!(20140723));
        let summary = summarize(&ReviewTable::new(vec![first, second]));
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns, 10);
        assert_eq!(
            summary.column_types.last(),
            Some(&("reviewTime".to_string(), ColumnType::Mixed))
        );
        let overall = summary
            .quantiles
            .iter()
            .find(|column| column.column == "overall")
            .unwrap();
        assert_eq!(overall.values[0], (0.0, Some(3)));
        assert_eq!(overall.values[5], (100.0, Some(5)));
        let rendered = summary.to_string();
        assert!(rendered.contains("ROWS:2"));
        assert!(rendered.contains("QUANTILES"));
    }
}
