use indexmap::IndexMap;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::data::{PredictionRecord, RawTable};
use crate::errors::PipelineError;
use crate::types::ColumnName;

/// Read one JSON object per line into a [`RawTable`].
///
/// Blank lines are skipped. Row ids follow the order of non-blank lines.
/// Line numbers in errors are one-based.
pub fn read_raw_table<R: BufRead>(reader: R) -> Result<RawTable, PipelineError> {
    let mut objects = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line).map_err(|err| PipelineError::Ingest {
            line: idx + 1,
            reason: err.to_string(),
        })?;
        let Value::Object(map) = value else {
            return Err(PipelineError::Ingest {
                line: idx + 1,
                reason: format!("expected a JSON object, found {}", kind_of(&value)),
            });
        };
        objects.push(map.into_iter().collect::<IndexMap<ColumnName, Value>>());
    }
    debug!(rows = objects.len(), "jsonl rows read");
    Ok(RawTable::from_objects(objects))
}

/// Read a JSONL file from `path`.
pub fn read_raw_table_path(path: impl AsRef<Path>) -> Result<RawTable, PipelineError> {
    let file = File::open(path.as_ref())?;
    read_raw_table(BufReader::new(file))
}

/// Write one record per line.
pub fn write_predictions<W: Write>(
    mut writer: W,
    records: &[PredictionRecord],
) -> Result<(), PipelineError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a new (or truncated) file at `path`.
pub fn write_predictions_path(
    path: impl AsRef<Path>,
    records: &[PredictionRecord],
) -> Result<(), PipelineError> {
    let file = File::create(path.as_ref())?;
    write_predictions(BufWriter::new(file), records)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
