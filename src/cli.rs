use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use datasift::data::DataLoader;
use datasift::report::ReportGenerator;
use datasift::timing::{TimingSuite, Variant};
use datasift::{Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "datasift",
    version,
    about = "Clean CSV data, compute column statistics and write text reports"
)]
pub struct Cli {
    /// Path to a JSON pipeline configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deduplicate, impute and normalize a CSV file
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Write the cleaned table to this CSV file instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print mean, median, std and skewness of one column
    Stats {
        /// Input CSV file
        input: PathBuf,

        /// Column name
        column: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a text report with statistics for every numeric column
    Report {
        /// Input CSV file
        input: PathBuf,

        /// Report file, overwritten if it exists
        output: PathBuf,
    },
    /// Run the timing demo tasks
    Timing {
        #[arg(value_enum, default_value_t = TimingTarget::All)]
        target: TimingTarget,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimingTarget {
    A,
    B,
    C,
    All,
}

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Clean { input, output } => handle_clean(config, input, output),
        Commands::Stats {
            input,
            column,
            json,
        } => handle_stats(config, input, &column, json),
        Commands::Report { input, output } => handle_report(config, input, output),
        Commands::Timing { target } => {
            handle_timing(target);
            Ok(())
        }
    }
}

fn load_pipeline(config: PipelineConfig, input: &Path) -> Result<Pipeline> {
    let mut pipeline = Pipeline::with_config(config);
    pipeline
        .try_load(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    Ok(pipeline)
}

fn handle_clean(config: PipelineConfig, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut pipeline = load_pipeline(config, &input)?;
    let cleaned = pipeline.clean().context("Cleaning failed")?;

    match output {
        Some(path) => {
            DataLoader::save_csv(cleaned, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Cleaned data written to {}", path.display());
        }
        None => println!("{}", cleaned.dataframe()),
    }
    Ok(())
}

fn handle_stats(config: PipelineConfig, input: PathBuf, column: &str, json: bool) -> Result<()> {
    let pipeline = load_pipeline(config, &input)?;
    let stats = pipeline.statistics(column)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let precision = pipeline.config().report_precision;
        for (name, value) in stats.entries() {
            println!("{name}: {}", ReportGenerator::format_value(value, precision));
        }
    }
    Ok(())
}

fn handle_report(config: PipelineConfig, input: PathBuf, output: PathBuf) -> Result<()> {
    let pipeline = load_pipeline(config, &input)?;
    pipeline.generate_report(&output)?;
    println!("Report written to {}", output.display());
    Ok(())
}

fn handle_timing(target: TimingTarget) {
    let suite = TimingSuite::new();
    let variants: &[Variant] = match target {
        TimingTarget::A => &[Variant::A],
        TimingTarget::B => &[Variant::B],
        TimingTarget::C => &[Variant::C],
        TimingTarget::All => &Variant::ALL,
    };

    if target == TimingTarget::All {
        suite.run_all();
    } else {
        for &variant in variants {
            suite.run(variant);
        }
    }

    for task in variants.iter().filter_map(|&v| suite.task(v)) {
        println!("{}", task.debug_info());
    }
}
