//! End-to-end batch run: normalize, score, featurize, split, train, predict, join.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use tracing::info;

use crate::assembler::assemble;
use crate::classifier::{NaiveBayes, derive_labels};
use crate::config::{IdfFitScope, PipelineConfig};
use crate::data::{FeatureRow, Prediction, PredictionRecord, RawTable, ReviewTable, RowId};
use crate::errors::PipelineError;
use crate::features::FeatureExtractor;
use crate::lexicon::LexiconScorer;
use crate::metrics::{Evaluation, LexiconAgreement, evaluate, lexicon_agreement};
use crate::profile::{TableSummary, summarize};
use crate::schema::SchemaNormalizer;
use crate::splits::DatasetSplitter;

/// Named pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Raw rows to typed reviews.
    Normalize,
    /// Optional descending sort.
    Sort,
    /// Table profiling.
    Summarize,
    /// Lexicon scores A and B.
    Lexicon,
    /// Training label derivation.
    Label,
    /// Term frequencies and IDF weighting.
    Features,
    /// Train/test partition.
    Split,
    /// Naive Bayes training.
    Fit,
    /// Naive Bayes inference on the test partition.
    Predict,
    /// Output record join.
    Assemble,
    /// Held-out accuracy.
    Evaluate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Normalize => "normalize",
            Stage::Sort => "sort",
            Stage::Summarize => "summarize",
            Stage::Lexicon => "lexicon",
            Stage::Label => "label",
            Stage::Features => "features",
            Stage::Split => "split",
            Stage::Fit => "fit",
            Stage::Predict => "predict",
            Stage::Assemble => "assemble",
            Stage::Evaluate => "evaluate",
        };
        f.write_str(name)
    }
}

/// Everything a successful run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Profile of the normalized (and sorted) table.
    pub summary: TableSummary,
    /// Rows assigned to training.
    pub train_rows: usize,
    /// Rows assigned to testing.
    pub test_rows: usize,
    /// Classifier output for every test row.
    pub predictions: Vec<Prediction>,
    /// Joined output records for test rows with every signal present.
    pub records: Vec<PredictionRecord>,
    /// Test rows whose join was incomplete.
    pub join_failures: Vec<PipelineError>,
    /// Rows whose lexicon analyzers failed.
    pub analyzer_failures: Vec<RowId>,
    /// Held-out accuracy; `None` when no test row carries a label.
    pub evaluation: Option<Evaluation>,
    /// Lexicon sign agreement with the classifier.
    pub agreement: Option<LexiconAgreement>,
}

/// A configured pipeline; runs are independent of each other.
pub struct SentimentPipeline {
    config: PipelineConfig,
    scorer: LexiconScorer,
    pool: Option<ThreadPool>,
}

impl fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("config", &self.config)
            .field("scorer", &self.scorer)
            .finish_non_exhaustive()
    }
}

impl SentimentPipeline {
    /// Validate `config` and size the worker pool.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let config = config.validated()?;
        let pool = match config.workers {
            Some(workers) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|err| PipelineError::Configuration(err.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            config,
            scorer: LexiconScorer::default(),
            pool,
        })
    }

    /// Replace the built-in lexicon analyzers.
    pub fn with_scorer(mut self, scorer: LexiconScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over `raw`.
    pub fn run(&self, raw: RawTable) -> Result<PipelineOutput, PipelineError> {
        self.install(|| self.run_stages(raw))
    }

    /// Normalize, sort, and profile `raw` without training.
    pub fn profile_only(&self, raw: RawTable) -> TableSummary {
        self.install(|| summarize(&self.prepare(raw)))
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn prepare(&self, raw: RawTable) -> ReviewTable {
        let input = raw.len();
        let table = SchemaNormalizer.normalize(raw);
        info!(stage = %Stage::Normalize, rows = input, "stage complete");
        match self.config.sort_by {
            Some(field) => {
                let table = table.sorted_desc(field);
                info!(stage = %Stage::Sort, rows = table.len(), by = %field, "stage complete");
                table
            }
            None => table,
        }
    }

    fn run_stages(&self, raw: RawTable) -> Result<PipelineOutput, PipelineError> {
        let table = self.prepare(raw);

        let summary = summarize(&table);
        info!(
            stage = %Stage::Summarize,
            rows = summary.rows,
            columns = summary.columns,
            duplicates = summary.duplicates,
            "stage complete"
        );

        let scores = self.scorer.score_table(&table);
        info!(
            stage = %Stage::Lexicon,
            scored = scores.len(),
            failed = scores.failed().len(),
            "stage complete"
        );

        let labels = derive_labels(&table, &self.config.classifier.label_source, Some(&scores));
        info!(stage = %Stage::Label, labelled = labels.len(), rows = table.len(), "stage complete");

        let extractor = FeatureExtractor::new(&self.config.features);
        let tf = extractor.term_frequencies(&table, &labels);
        let scope = self.config.features.idf_scope;
        let rows = match scope {
            IdfFitScope::FullCorpus => {
                let idf = extractor
                    .fit_idf(&tf)
                    .map_err(|err| err.in_stage(Stage::Features))?;
                idf.transform_rows(tf)
                    .map_err(|err| err.in_stage(Stage::Features))?
            }
            IdfFitScope::TrainingOnly => tf,
        };
        info!(
            stage = %Stage::Features,
            rows = rows.len(),
            num_features = extractor.num_features(),
            idf_scope = ?scope,
            "stage complete"
        );

        let splitter =
            DatasetSplitter::from_config(&self.config.split).map_err(|err| err.in_stage(Stage::Split))?;
        let (train, test) = splitter.split(rows);
        let (train, test) = match scope {
            IdfFitScope::FullCorpus => (train, test),
            IdfFitScope::TrainingOnly => weigh_by_train(&extractor, train, test)
                .map_err(|err| err.in_stage(Stage::Features))?,
        };
        info!(stage = %Stage::Split, train = train.len(), test = test.len(), "stage complete");

        let model = NaiveBayes::from_config(&self.config.classifier)
            .fit(&train)
            .map_err(|err| err.in_stage(Stage::Fit))?;
        info!(stage = %Stage::Fit, train = train.len(), classes = model.labels().len(), "stage complete");

        let predictions = model
            .predict(&test)
            .map_err(|err| err.in_stage(Stage::Predict))?;
        info!(stage = %Stage::Predict, predictions = predictions.len(), "stage complete");

        let assembly = assemble(&table, &scores, &predictions);
        info!(
            stage = %Stage::Assemble,
            records = assembly.records.len(),
            failures = assembly.failures.len(),
            "stage complete"
        );

        let evaluation = evaluate(&predictions, &test);
        let agreement = lexicon_agreement(&predictions, &scores);
        match &evaluation {
            Some(eval) => info!(
                stage = %Stage::Evaluate,
                evaluated = eval.evaluated,
                accuracy = eval.accuracy,
                "stage complete"
            ),
            None => info!(stage = %Stage::Evaluate, "no labelled test rows"),
        }

        Ok(PipelineOutput {
            summary,
            train_rows: train.len(),
            test_rows: test.len(),
            predictions,
            records: assembly.records,
            join_failures: assembly.failures,
            analyzer_failures: scores.failed().to_vec(),
            evaluation,
            agreement,
        })
    }
}

fn weigh_by_train(
    extractor: &FeatureExtractor,
    train: Vec<FeatureRow>,
    test: Vec<FeatureRow>,
) -> Result<(Vec<FeatureRow>, Vec<FeatureRow>), PipelineError> {
    let idf = extractor.fit_idf(&train)?;
    Ok((idf.transform_rows(train)?, idf.transform_rows(test)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::{Value, json};

    fn raw(rows: &[(&str, i64)]) -> RawTable {
        RawTable::from_objects(rows.iter().map(|(text, overall)| {
            let mut fields: IndexMap<String, Value> = IndexMap::new();
            fields.insert("reviewText".to_string(), json!(text));
            fields.insert("overall".to_string(), json!(overall));
            fields
        }))
    }

    fn corpus() -> RawTable {
        let mut rows = Vec::new();
        for _ in 0..20 {
            rows.push(("love it great", 5));
            rows.push(("awful broken junk", 1));
            rows.push(("okay average item", 3));
        }
        raw(&rows)
    }

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(Stage::Normalize.to_string(), "normalize");
        assert_eq!(Stage::Evaluate.to_string(), "evaluate");
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = PipelineConfig::default();
        config.workers = Some(0);
        assert!(matches!(
            SentimentPipeline::new(config),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn run_partitions_every_row() {
        let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
        let output = pipeline.run(corpus()).unwrap();
        assert_eq!(output.train_rows + output.test_rows, 60);
        assert_eq!(output.predictions.len(), output.test_rows);
        assert_eq!(output.records.len(), output.test_rows);
        assert!(output.join_failures.is_empty());
    }

    #[test]
    fn fit_failures_name_their_stage() {
        let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
        let err = pipeline.run(raw(&[("only good things", 5)])).unwrap_err();
        match err {
            PipelineError::Stage { stage, source } => {
                assert_eq!(stage, Stage::Fit);
                assert!(matches!(*source, PipelineError::InsufficientTrainingData { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pinned_pool_matches_global_pool() {
        let global = SentimentPipeline::new(PipelineConfig::default()).unwrap();
        let mut config = PipelineConfig::default();
        config.workers = Some(2);
        let pinned = SentimentPipeline::new(config).unwrap();
        let left = global.run(corpus()).unwrap();
        let right = pinned.run(corpus()).unwrap();
        assert_eq!(left.predictions, right.predictions);
        assert_eq!(left.records, right.records);
    }

    #[test]
    fn training_only_idf_runs() {
        let mut config = PipelineConfig::default();
        config.features.idf_scope = IdfFitScope::TrainingOnly;
        let output = SentimentPipeline::new(config).unwrap().run(corpus()).unwrap();
        assert_eq!(output.train_rows + output.test_rows, 60);
    }

    #[test]
    fn profile_only_reports_shape() {
        let pipeline = SentimentPipeline::new(PipelineConfig::default()).unwrap();
        let summary = pipeline.profile_only(corpus());
        assert_eq!(summary.rows, 60);
        assert_eq!(summary.duplicates, 57);
    }
}
