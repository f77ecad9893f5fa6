use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use transcript_rank::{
    EmbeddingService, HashingEmbedder, Summarizer, SummaryConfig, TracingObserver,
};

#[derive(Parser)]
#[command(
    name = "transcript-summarize",
    about = "Extractive summary of a speech-to-text transcript"
)]
#[command(version)]
struct Cli {
    /// Transcript file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// JSON config file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the summary and run diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Fraction of sentences to keep
    #[arg(long)]
    ratio: Option<f64>,

    /// Minimum number of sentences
    #[arg(long)]
    min: Option<usize>,

    /// Maximum number of sentences
    #[arg(long)]
    max: Option<usize>,

    /// MMR relevance/diversity tradeoff in [0, 1]
    #[arg(long)]
    lambda: Option<f64>,

    /// Pick the top sentences by centrality only
    #[arg(long)]
    no_mmr: bool,

    /// Keep sign-off and subscribe sentences
    #[arg(long)]
    keep_closings: bool,

    /// Skip filler removal before segmentation
    #[arg(long)]
    no_preprocess: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SummaryConfig> {
        let mut cfg = match &self.config {
            Some(path) => SummaryConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SummaryConfig::default(),
        };

        if let Some(ratio) = self.ratio {
            cfg.selection_ratio = ratio;
        }
        if let Some(min) = self.min {
            cfg.min_sentences = min;
        }
        if let Some(max) = self.max {
            cfg.max_sentences = max;
        }
        if let Some(lambda) = self.lambda {
            cfg.mmr_lambda = lambda;
        }
        if self.no_mmr {
            cfg.use_mmr = false;
        }
        if self.keep_closings {
            cfg.filter_closings = false;
        }
        if self.no_preprocess {
            cfg.run_preprocessing = false;
        }
        Ok(cfg)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cfg = cli.load_config()?;
    let report = cfg.validate();
    for warning in report.warnings() {
        tracing::warn!("{warning}");
    }
    if report.has_errors() {
        for error in report.errors() {
            eprintln!("error: {error}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let text = cli.read_input()?;
    let summarizer = Summarizer::new(EmbeddingService::from_embedder(HashingEmbedder::default()));

    match summarizer.summarize_with_observer(&text, &cfg, &mut TracingObserver) {
        Ok(summary) => {
            if cli.json {
                let doc = serde_json::json!({
                    "summary": summary.text(),
                    "result": summary,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", summary.text());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if cli.json {
                let doc = serde_json::json!({
                    "error": { "code": err.code(), "message": err.to_string() },
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                eprintln!("error: {err}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
