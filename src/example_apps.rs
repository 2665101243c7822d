use std::error::Error;
use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{IdfFitScope, PipelineConfig, TokenizerRule};
use crate::pipeline::{PipelineOutput, SentimentPipeline};
use crate::transport::{read_raw_table_path, write_predictions, write_predictions_path};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdfScopeArg {
    FullCorpus,
    TrainingOnly,
}

impl From<IdfScopeArg> for IdfFitScope {
    fn from(value: IdfScopeArg) -> Self {
        match value {
            IdfScopeArg::FullCorpus => IdfFitScope::FullCorpus,
            IdfScopeArg::TrainingOnly => IdfFitScope::TrainingOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenizerArg {
    Whitespace,
    Words,
}

impl From<TokenizerArg> for TokenizerRule {
    fn from(value: TokenizerArg) -> Self {
        match value {
            TokenizerArg::Whitespace => TokenizerRule::Whitespace,
            TokenizerArg::Words => TokenizerRule::Words,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sentiment_pipeline",
    disable_help_subcommand = true,
    about = "Label a review corpus with lexicon scores and Naive Bayes predictions",
    long_about = "Read JSONL reviews, profile them, score each body with two lexicon analyzers, train Naive Bayes on hashed TF-IDF features, and write one JSON record per held-out row.",
    after_help = "Options given on the command line override values from --config. Set RUST_LOG=info to see per-stage progress."
)]
/// CLI for `sentiment_pipeline`.
///
/// Common usage:
/// - Profile only: `--input reviews.jsonl --profile-only`
/// - Full run to a file: `--input reviews.jsonl --output predictions.jsonl`
/// - Leak-free IDF: `--idf-scope training-only`
struct SentimentPipelineCli {
    #[arg(long, value_name = "PATH", help = "JSONL file with one review object per line")]
    input: PathBuf,
    #[arg(
        long,
        value_name = "PATH",
        help = "Destination JSONL file for prediction records (stdout when omitted)"
    )]
    output: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "JSON file holding a pipeline configuration")]
    config: Option<PathBuf>,
    #[arg(long, help = "Deterministic seed for the train/test split")]
    seed: Option<u64>,
    #[arg(long = "train-fraction", help = "Fraction of rows assigned to training, in (0, 1)")]
    train_fraction: Option<f64>,
    #[arg(long = "num-features", help = "Number of hash buckets for term vectors")]
    num_features: Option<usize>,
    #[arg(long, help = "Additive smoothing for Naive Bayes")]
    smoothing: Option<f64>,
    #[arg(long = "idf-scope", value_enum, help = "Rows the IDF weights are fitted on")]
    idf_scope: Option<IdfScopeArg>,
    #[arg(long, value_enum, help = "Tokenization rule")]
    tokenizer: Option<TokenizerArg>,
    #[arg(
        long,
        value_parser = parse_positive_usize,
        help = "Worker threads for row-parallel stages"
    )]
    workers: Option<usize>,
    #[arg(
        long = "profile-only",
        help = "Print the table summary and exit without training"
    )]
    profile_only: bool,
}

impl SentimentPipelineCli {
    fn resolve_config(&self) -> Result<PipelineConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str::<PipelineConfig>(&fs::read_to_string(path)?)?,
            None => PipelineConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.split.seed = seed;
        }
        if let Some(fraction) = self.train_fraction {
            config.split.train_fraction = fraction;
        }
        if let Some(num_features) = self.num_features {
            config.features.num_features = num_features;
        }
        if let Some(smoothing) = self.smoothing {
            config.classifier.smoothing = smoothing;
        }
        if let Some(scope) = self.idf_scope {
            config.features.idf_scope = scope.into();
        }
        if let Some(tokenizer) = self.tokenizer {
            config.features.tokenizer = tokenizer.into();
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        Ok(config)
    }
}

/// Run the review sentiment pipeline with CLI-style arguments.
pub fn run_sentiment_pipeline<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<SentimentPipelineCli, _>(
        std::iter::once("sentiment_pipeline".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let pipeline = SentimentPipeline::new(cli.resolve_config()?)?;
    let raw = read_raw_table_path(&cli.input)?;

    if cli.profile_only {
        println!("{}", pipeline.profile_only(raw));
        return Ok(());
    }

    let output = pipeline.run(raw)?;
    match &cli.output {
        Some(path) => write_predictions_path(path, &output.records)?,
        None => write_predictions(BufWriter::new(io::stdout().lock()), &output.records)?,
    }
    eprintln!("{}", output.summary);
    print_run_report(&output);
    Ok(())
}

fn print_run_report(output: &PipelineOutput) {
    eprintln!("=== run ===");
    eprintln!("train rows     : {}", output.train_rows);
    eprintln!("test rows      : {}", output.test_rows);
    eprintln!("records written: {}", output.records.len());
    if !output.join_failures.is_empty() {
        eprintln!("join failures  : {}", output.join_failures.len());
    }
    if !output.analyzer_failures.is_empty() {
        eprintln!("analyzer fails : {}", output.analyzer_failures.len());
    }
    match &output.evaluation {
        Some(eval) => {
            eprintln!(
                "accuracy       : {:.4} over {} labelled test rows",
                eval.accuracy, eval.evaluated
            );
            for (actual, row) in &eval.confusion {
                let cells: Vec<String> = row
                    .iter()
                    .map(|(predicted, count)| format!("{predicted}={count}"))
                    .collect();
                eprintln!("  actual {actual} -> {}", cells.join(", "));
            }
        }
        None => eprintln!("accuracy       : n/a (no labelled test rows)"),
    }
    if let Some(agreement) = &output.agreement {
        eprintln!(
            "lexicon agree  : pattern {:.2}, valence {:.2} ({} rows)",
            agreement.pattern, agreement.valence, agreement.compared
        );
    }
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --workers value '{raw}' as a positive integer"))?;
    if parsed == 0 {
        return Err("--workers must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> SentimentPipelineCli {
        parse_cli::<SentimentPipelineCli, _>(
            std::iter::once("sentiment_pipeline").chain(args.iter().copied()),
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let cli = cli(&[
            "--input",
            "reviews.jsonl",
            "--seed",
            "7",
            "--train-fraction",
            "0.5",
            "--idf-scope",
            "training-only",
            "--tokenizer",
            "words",
            "--workers",
            "3",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.split.seed, 7);
        assert_eq!(config.split.train_fraction, 0.5);
        assert_eq!(config.features.idf_scope, IdfFitScope::TrainingOnly);
        assert_eq!(config.features.tokenizer, TokenizerRule::Words);
        assert_eq!(config.workers, Some(3));
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"split":{"seed":5,"train_fraction":0.6},"features":{"num_features":64}}"#)
            .unwrap();
        let path_arg = path.to_string_lossy().to_string();
        let cli = cli(&["--input", "x.jsonl", "--config", &path_arg, "--seed", "9"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.split.seed, 9);
        assert_eq!(config.split.train_fraction, 0.6);
        assert_eq!(config.features.num_features, 64);
    }

    #[test]
    fn zero_workers_is_a_parse_error() {
        let result = parse_cli::<SentimentPipelineCli, _>(
            ["sentiment_pipeline", "--input", "x", "--workers", "0"].into_iter(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn help_returns_none() {
        let result =
            parse_cli::<SentimentPipelineCli, _>(["sentiment_pipeline", "--help"].into_iter()).unwrap();
        assert!(result.is_none());
    }
}
