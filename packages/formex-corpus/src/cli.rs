//! Command-line interface for the corpus builder.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{load_config, ValidationConfig, WorkflowConfig};
use crate::corpus::render_corpus;
use crate::error::{CorpusError, Result};
use crate::formex::assemble_document;
use crate::summary::PipelineSummary;
use crate::validation::{report_path, utc_timestamp, validate_source, ValidationReport};

/// Formex corpus builder - Extract EU legal acts into a Markdown corpus.
#[derive(Parser)]
#[command(name = "formex-corpus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, validate and render a directory of Formex files.
    Build {
        /// Directory holding the extracted Formex XML files
        source_dir: PathBuf,

        /// Workflow configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Corpus output directory
        #[arg(short, long, default_value = "corpus")]
        output: PathBuf,

        #[command(flatten)]
        overrides: ValidationOverrides,
    },
    /// Parse and validate only, printing the tally.
    Validate {
        /// Directory holding the extracted Formex XML files
        source_dir: PathBuf,

        /// Workflow configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        overrides: ValidationOverrides,
    },
}

/// Command-line overrides of the `validation` configuration.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidationOverrides {
    /// Expected number of articles
    #[arg(long)]
    pub expected_articles: Option<usize>,

    /// Expected number of recitals
    #[arg(long)]
    pub expected_recitals: Option<usize>,

    /// Expected number of annexes
    #[arg(long)]
    pub expected_annexes: Option<usize>,

    /// Coverage ratio below which an item is reported (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl ValidationOverrides {
    /// Apply the overrides and re-validate the result.
    pub fn apply(&self, config: &mut ValidationConfig) -> Result<()> {
        if let Some(n) = self.expected_articles {
            config.expected_articles = n;
        }
        if let Some(n) = self.expected_recitals {
            config.expected_recitals = n;
        }
        if let Some(n) = self.expected_annexes {
            config.expected_annexes = n;
        }
        if let Some(t) = self.threshold {
            config.coverage_ratio_threshold = t;
        }
        config.validate()
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source_dir,
            config,
            output,
            overrides,
        } => build_command(&source_dir, config.as_deref(), &output, &overrides),
        Commands::Validate {
            source_dir,
            config,
            report,
            overrides,
        } => validate_command(&source_dir, config.as_deref(), report.as_deref(), &overrides),
    }
}

fn load_workflow(path: Option<&Path>, overrides: &ValidationOverrides) -> Result<WorkflowConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => WorkflowConfig::default(),
    };
    overrides.apply(&mut config.validation)?;
    Ok(config)
}

fn check_source_dir(source_dir: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(CorpusError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Source directory does not exist: {}", source_dir.display()),
        )));
    }
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute the build command.
fn build_command(
    source_dir: &Path,
    config_path: Option<&Path>,
    output: &Path,
    overrides: &ValidationOverrides,
) -> Result<()> {
    let config = load_workflow(config_path, overrides)?;
    check_source_dir(source_dir)?;

    println!(
        "{} {}",
        style("Building corpus from").bold(),
        style(source_dir.display()).cyan()
    );
    println!();

    let mut summary = PipelineSummary::new();
    let pb = spinner();

    pb.set_message("Parsing Formex documents...");
    let assembled = match assemble_document(source_dir) {
        Ok(assembled) => assembled,
        Err(e) => {
            pb.finish_and_clear();
            summary.counter("parse").failed += 1;
            return Err(e);
        }
    };
    summary.counter("parse").ok += 1;
    let annexes = summary.counter("annexes");
    annexes.ok = assembled.document.annexes.len();
    annexes.failed = assembled.skipped_annexes.len();

    pb.set_message("Validating coverage...");
    let timestamp = utc_timestamp();
    let report = validate_source(&assembled.document, source_dir, &config.validation, &timestamp);
    let report_file = report_path(output);
    if let Err(e) = report.save(&report_file) {
        pb.finish_and_clear();
        return Err(e);
    }
    report.log_summary();
    let validation = summary.counter("validation");
    validation.ok = report.total_pass;
    validation.failed = report.total_fail;

    let stats = match &config.corpus {
        Some(corpus) => {
            pb.set_message("Rendering corpus...");
            match render_corpus(
                &assembled.document,
                corpus,
                &config.postprocess,
                &config.source,
                &timestamp,
                output,
            ) {
                Ok(stats) => {
                    let render = summary.counter("render");
                    render.ok = stats.written();
                    render.failed = stats.failed;
                    Some(stats)
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }
        }
        None => None,
    };

    pb.finish_and_clear();
    summary.log();

    print_document_counts(&report);
    for path in &assembled.skipped_annexes {
        println!(
            "  {} {}",
            style("Skipped annex:").yellow().bold(),
            path.display()
        );
    }
    print_tally(&report);

    println!();
    match stats {
        Some(stats) => println!(
            "{} {} files in {}",
            style("Wrote").green().bold(),
            stats.written(),
            output.display()
        ),
        None => println!(
            "{}",
            style("No corpus section configured, nothing rendered").yellow()
        ),
    }
    println!(
        "{} {}",
        style("Validation report:").green().bold(),
        report_file.display()
    );

    Ok(())
}

/// Execute the validate command.
fn validate_command(
    source_dir: &Path,
    config_path: Option<&Path>,
    report_file: Option<&Path>,
    overrides: &ValidationOverrides,
) -> Result<()> {
    let config = load_workflow(config_path, overrides)?;
    check_source_dir(source_dir)?;

    let pb = spinner();
    pb.set_message("Parsing Formex documents...");
    let assembled = match assemble_document(source_dir) {
        Ok(assembled) => assembled,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Validating coverage...");
    let report = validate_source(
        &assembled.document,
        source_dir,
        &config.validation,
        &utc_timestamp(),
    );
    pb.finish_and_clear();
    report.log_summary();

    print_document_counts(&report);
    print_tally(&report);

    if let Some(path) = report_file {
        report.save(path)?;
        println!();
        println!(
            "{} {}",
            style("Validation report:").green().bold(),
            path.display()
        );
    }

    Ok(())
}

fn print_document_counts(report: &ValidationReport) {
    for (label, actual, expected) in report.deterministic.counts() {
        let count = format!("{actual}/{expected}");
        let count = if actual == expected {
            style(count).green()
        } else {
            style(count).red()
        };
        println!("  {:<9} {}", format!("{label}:"), count);
    }
}

fn print_tally(report: &ValidationReport) {
    println!(
        "  Result:   {} pass, {} warn, {} fail",
        style(report.total_pass).green(),
        style(report.total_warn).yellow(),
        style(report.total_fail).red().bold()
    );
}
