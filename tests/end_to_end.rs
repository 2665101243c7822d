use indexmap::IndexMap;
use serde_json::{Value, json};

use review_sentiment::{
    LabelSource, LexiconScorer, NumericField, PipelineConfig, PipelineError, RawTable,
    SchemaNormalizer, SentimentLabel, SentimentPipeline, Stage, profile,
};

fn row(text: &str, overall: Value) -> IndexMap<String, Value> {
    let mut fields = IndexMap::new();
    fields.insert("reviewText".to_string(), json!(text));
    fields.insert("overall".to_string(), overall);
    fields.insert("helpful_yes".to_string(), json!(0));
    fields
}

fn text_only_corpus() -> RawTable {
    let objects = (0..100).map(|idx| {
        let text = match idx % 10 {
            0..=2 => "great product",
            3..=5 => "terrible purchase",
            _ => "it was fine",
        };
        let mut fields: IndexMap<String, Value> = IndexMap::new();
        fields.insert("reviewText".to_string(), json!(text));
        fields
    });
    RawTable::from_objects(objects)
}

/// Text-only corpora carry no rating, so labels come from lexicon agreement
/// over a binary domain.
fn lexicon_labelled_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.split.train_fraction = 0.7;
    config.split.seed = 100;
    config.classifier.labels = vec![SentimentLabel::Negative, SentimentLabel::Positive];
    config.classifier.label_source = LabelSource::LexiconAgreement { threshold: 0.05 };
    config
}

fn rated_corpus() -> RawTable {
    let mut objects = Vec::new();
    for idx in 0..100 {
        let fields = match idx % 10 {
            0..=2 => row("great product", json!(5)),
            3..=5 => row("terrible purchase", json!(1)),
            _ => row("it was fine", json!(3)),
        };
        objects.push(fields);
    }
    RawTable::from_objects(objects)
}

fn majority(labels: &[SentimentLabel]) -> Option<SentimentLabel> {
    SentimentLabel::ALL
        .into_iter()
        .max_by_key(|label| labels.iter().filter(|l| *l == label).count())
}

#[test]
fn rating_labels_separate_the_rated_corpus() {
    let mut config = PipelineConfig::default();
    config.split.train_fraction = 0.7;
    config.split.seed = 100;
    let pipeline = SentimentPipeline::new(config).unwrap();
    let output = pipeline.run(rated_corpus()).unwrap();

    assert_eq!(output.summary.rows, 100);
    assert_eq!(output.train_rows + output.test_rows, 100);
    assert!(output.join_failures.is_empty());
    assert_eq!(output.records.len(), output.test_rows);

    let labels_for = |text: &str| -> Vec<SentimentLabel> {
        output
            .records
            .iter()
            .filter(|record| record.review_text.as_deref() == Some(text))
            .map(|record| record.predicted)
            .collect()
    };
    let great = labels_for("great product");
    let terrible = labels_for("terrible purchase");
    assert!(!great.is_empty() && !terrible.is_empty());
    assert_eq!(majority(&great), Some(SentimentLabel::Positive));
    assert_eq!(majority(&terrible), Some(SentimentLabel::Negative));

    for record in &output.records {
        match record.review_text.as_deref() {
            Some("great product") => {
                assert!(record.pattern_sentiment > 0.0);
                assert!(record.valence_sentiment > 0.0);
            }
            Some("terrible purchase") => {
                assert!(record.pattern_sentiment < 0.0);
                assert!(record.valence_sentiment < 0.0);
            }
            _ => {}
        }
    }

    let evaluation = output.evaluation.expect("labelled test rows");
    assert!(evaluation.accuracy > 0.9, "accuracy = {}", evaluation.accuracy);
}

#[test]
fn repeated_runs_are_identical() {
    let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
    let first = pipeline.run(rated_corpus()).unwrap();
    let second = pipeline.run(rated_corpus()).unwrap();
    assert_eq!(first.predictions, second.predictions);
    assert_eq!(first.records, second.records);
}

#[test]
fn unparseable_rating_is_missing_but_row_survives() {
    let raw = RawTable::from_objects(vec![
        row("great product", json!("N/A")),
        row("terrible purchase", json!("1")),
    ]);
    let table = SchemaNormalizer.normalize(raw);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].numeric.get(NumericField::Overall), None);
    assert_eq!(table.rows[1].numeric.get(NumericField::Overall), Some(1));

    let report = profile(&table);
    let overall = report
        .iter()
        .find(|entry| entry.column == "overall")
        .expect("overall reported as missing");
    assert_eq!(overall.missing, 1);
    assert_eq!(overall.ratio, 50.0);

    let scorer = LexiconScorer::default();
    let scores = scorer.score_table(&table);
    let score = scores.get(0).expect("row with missing rating is still scored");
    assert_eq!(score.pattern, scorer.score_a("great product").unwrap());
    assert_eq!(score.valence, scorer.score_b("great product").unwrap());
}

#[test]
fn unparseable_rating_rows_still_get_predictions() {
    let mut objects: Vec<IndexMap<String, Value>> = Vec::new();
    for idx in 0..60 {
        objects.push(match idx % 3 {
            0 => row("great product", json!(5)),
            1 => row("terrible purchase", json!(1)),
            _ => row("it was fine", json!(3)),
        });
    }
    for _ in 0..20 {
        objects.push(row("great product", json!("N/A")));
    }
    let mut config = PipelineConfig::default();
    config.sort_by = None;
    let output = SentimentPipeline::new(config)
        .unwrap()
        .run(RawTable::from_objects(objects))
        .unwrap();
    assert_eq!(output.summary.rows, 80);
    let unlabelled_predicted = output.predictions.iter().filter(|p| p.id >= 60).count();
    assert!(unlabelled_predicted > 0);
    assert_eq!(output.records.len(), output.predictions.len());
}

#[test]
fn text_only_corpus_separates_under_lexicon_labels() {
    let pipeline = SentimentPipeline::new(lexicon_labelled_config()).unwrap();
    let output = pipeline.run(text_only_corpus()).unwrap();

    assert_eq!(output.summary.rows, 100);
    assert_eq!(output.train_rows + output.test_rows, 100);
    assert!(output.join_failures.is_empty());
    assert_eq!(output.records.len(), output.test_rows);

    let labels_for = |text: &str| -> Vec<SentimentLabel> {
        output
            .records
            .iter()
            .filter(|record| record.review_text.as_deref() == Some(text))
            .map(|record| record.predicted)
            .collect()
    };
    let great = labels_for("great product");
    let terrible = labels_for("terrible purchase");
    assert!(!great.is_empty() && !terrible.is_empty());
    assert_eq!(majority(&great), Some(SentimentLabel::Positive));
    assert_eq!(majority(&terrible), Some(SentimentLabel::Negative));

    for record in &output.records {
        match record.review_text.as_deref() {
            Some("great product") => {
                assert!(record.pattern_sentiment > 0.0);
                assert!(record.valence_sentiment > 0.0);
            }
            Some("terrible purchase") => {
                assert!(record.pattern_sentiment < 0.0);
                assert!(record.valence_sentiment < 0.0);
            }
            _ => {}
        }
    }
}

#[test]
fn text_only_corpus_under_rating_labels_fails_at_fit() {
    let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
    match pipeline.run(text_only_corpus()) {
        Err(PipelineError::Stage { stage, source }) => {
            assert_eq!(stage, Stage::Fit);
            assert!(matches!(
                *source,
                PipelineError::InsufficientTrainingData { .. }
            ));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
