/// Newline-delimited JSON input and output.
pub mod jsonl;

pub use jsonl::{read_raw_table, read_raw_table_path, write_predictions, write_predictions_path};
