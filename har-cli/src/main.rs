use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};

use har_data::{load_dataset, DatasetSummary};

use crate::config::{load_config, RunConfig};
use crate::report::write_report;

mod config;
mod report;

#[derive(Parser, Debug)]
#[command(author, version, about = "har-load: load the UCI HAR dataset and summarize its labels")]
struct Cli {
    /// Dataset root (the unzipped "UCI HAR Dataset" directory)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// TOML configuration file with a [dataset] section
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log row-count mismatches and unknown activity ids instead of failing
    #[arg(long)]
    lenient: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Loads the configured dataset and writes its summary to `out`.
fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let run_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    let dataset_config = run_config.into_dataset_config(cli.root, cli.lenient)?;

    let dataset = load_dataset(&dataset_config)
        .with_context(|| format!("failed to load dataset from {}", dataset_config.root.display()))?;
    info!(
        "Loaded {} train and {} test samples",
        dataset.train.len(),
        dataset.test.len()
    );

    let summary = DatasetSummary::from_dataset(&dataset);
    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &summary).context("serialize summary")?;
        writeln!(out).context("write summary")?;
    } else {
        write_report(out, &summary).context("write summary")?;
    }

    Ok(())
}

/// Without `-v` the `RUST_LOG` filter applies (default `warn`); each `-v` overrides it.
fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.try_init().map_err(|err| err.into())
}
