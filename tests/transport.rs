use std::fs;
use std::io::Write;

use serde_json::Value;

use review_sentiment::constants::output;
use review_sentiment::transport::{read_raw_table_path, write_predictions_path};
use review_sentiment::{PipelineConfig, PipelineError, SentimentPipeline};

fn write_corpus(file: &mut impl Write) {
    for idx in 0..60 {
        let line = match idx % 3 {
            0 => r#"{"reviewText":"great product","overall":"5","day_diff":120}"#,
            1 => r#"{"reviewText":"terrible purchase","overall":1,"day_diff":"N/A"}"#,
            _ => r#"{"reviewText":"it was fine","overall":3.0,"reviewerName":"anon"}"#,
        };
        writeln!(file, "{line}").unwrap();
        if idx % 10 == 0 {
            writeln!(file).unwrap();
        }
    }
}

#[test]
fn jsonl_round_trip_through_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reviews.jsonl");
    let mut file = fs::File::create(&input).unwrap();
    write_corpus(&mut file);
    drop(file);

    let raw = read_raw_table_path(&input).unwrap();
    assert_eq!(raw.len(), 60);

    let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
    let run = pipeline.run(raw).unwrap();
    let destination = dir.path().join("predictions.jsonl");
    write_predictions_path(&destination, &run.records).unwrap();

    let written = fs::read_to_string(&destination).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), run.records.len());
    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                output::REVIEW_TEXT,
                output::PATTERN_SENTIMENT,
                output::VALENCE_SENTIMENT,
                output::NAIVE_BAYES_PREDICTED,
            ]
        );
        let label = object[output::NAIVE_BAYES_PREDICTED].as_str().unwrap();
        assert!(["negative", "neutral", "positive"].contains(&label));
    }
}

#[test]
fn malformed_line_reports_its_position() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.jsonl");
    fs::write(&input, "{\"reviewText\":\"a\"}\n\n{\"reviewText\": oops}\n").unwrap();
    match read_raw_table_path(&input) {
        Err(PipelineError::Ingest { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_raw_table_path(dir.path().join("absent.jsonl"));
    assert!(matches!(result, Err(PipelineError::Io(_))));
}
