//! `shrinkwrap-deps` — run the `extractDependencies` row function over local files.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`load_config`]).
//! 3. Turn inputs into rows ([`read_rows`]).
//! 4. Register the function and invoke it per row ([`FunctionRegistry`], [`run_rows`]).
//! 5. Optionally group by `name@version` (`--count`, [`count_references`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `1` when no input rows were found.

mod cli;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use shrinkwrap_deps::aggregate::count_references;
use shrinkwrap_deps::config::load_config;
use shrinkwrap_deps::host::run_rows;
use shrinkwrap_deps::models::{NestedMode, Row};
use shrinkwrap_deps::report::{self, ReportData};
use shrinkwrap_deps::source::{collect_inputs, read_rows};
use shrinkwrap_deps::udf::{FunctionRegistry, EXTRACT_DEPENDENCIES};

use cli::{Cli, ReportFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Config is looked up next to the first input
    let base_dir = cli
        .paths
        .first()
        .map(|p| {
            if p.is_dir() {
                p.as_path()
            } else {
                p.parent().unwrap_or(Path::new("."))
            }
        })
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let config = load_config(&base_dir, cli.config.as_deref())?;

    let nested: NestedMode = cli.nested.map(Into::into).unwrap_or(config.extract.nested);
    tracing::debug!("nested dependencies mode: {}", nested);

    // Collect rows from every input
    let mut rows: Vec<Row> = Vec::new();
    for path in &cli.paths {
        for input in collect_inputs(path, &config.input.file_names) {
            let file_rows = read_rows(&input)?;
            if !cli.quiet {
                eprintln!(
                    "  {} {} {} rows",
                    "→".cyan(),
                    input.display(),
                    file_rows.len()
                );
            }
            rows.extend(file_rows);
        }
    }

    if rows.is_empty() {
        eprintln!("No shrinkwrap input found");
        std::process::exit(1);
    }

    let registry = FunctionRegistry::with_builtins(nested);

    let pb = progress_bar(rows.len(), cli.quiet)?;
    let (records, summary) = run_rows(&registry, EXTRACT_DEPENDENCIES, &rows, || {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    tracing::info!(
        "{} rows, {} records from {} rows with dependencies",
        summary.rows,
        summary.records,
        summary.productive_rows
    );

    let data = if cli.count {
        ReportData::Counts(count_references(&records))
    } else {
        ReportData::Records(records)
    };

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&data, &summary, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            let mut out = std::io::stdout().lock();
            report::json::render(&data, &mut out)?;
            out.flush()?;
        }
        ReportFormat::Jsonl => {
            let mut out = std::io::stdout().lock();
            report::json::render_lines(&data, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar(len: usize, quiet: bool) -> Result<Option<ProgressBar>> {
    if quiet || len < 2 {
        return Ok(None);
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows")?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}
