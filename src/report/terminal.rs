use std::collections::HashSet;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::{ReportData, ScanSummary};
use crate::models::{DependencyCount, OutputRecord};

/// Rows shown in the table unless `--verbose` is set.
const PREVIEW_ROWS: usize = 25;

/// Render a colored terminal report.
pub fn render(data: &ReportData, summary: &ScanSummary, verbose: bool, quiet: bool) -> Result<()> {
    let unique = unique_packages(data);

    if quiet {
        println!(
            "Rows: {}  With dependencies: {}  Records: {}  Packages: {}",
            summary.rows,
            summary.productive_rows.to_string().green(),
            summary.records.to_string().cyan(),
            unique,
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "shrinkwrap-deps".bold(),
        env!("CARGO_PKG_VERSION")
    );

    let skipped = summary.rows - summary.productive_rows;

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Rows read          : {:>6}", summary.rows));
    println!(
        " │  {:<48} │",
        format!("{}  With dependencies : {:>6}", "✓".green(), summary.productive_rows)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Without / invalid : {:>6}", "·".dimmed(), skipped)
    );
    println!(" │  {:<48} │", format!("Records emitted    : {:>6}", summary.records));
    println!(" │  {:<48} │", format!("Unique packages    : {:>6}", unique));
    println!(" └────────────────────────────────────────────────────┘\n");

    if data.is_empty() {
        println!(" {} No dependencies found.\n", "[INFO]".cyan().bold());
        return Ok(());
    }

    let limit = if verbose { data.len() } else { PREVIEW_ROWS };
    match data {
        ReportData::Records(records) => render_records(records, limit),
        ReportData::Counts(counts) => render_counts(counts, limit),
    }

    if data.len() > limit {
        println!(
            " … {} more (use {} to show all)\n",
            data.len() - limit,
            "--verbose".bold()
        );
    } else {
        println!();
    }

    Ok(())
}

fn render_records(records: &[OutputRecord], limit: usize) {
    let mut table = new_table(&["Name", "Version"]);
    for record in records.iter().take(limit) {
        table.add_row(vec![Cell::new(&record.name), Cell::new(&record.version)]);
    }
    println!("{}", table);
}

fn render_counts(counts: &[DependencyCount], limit: usize) {
    let mut table = new_table(&["Name", "Version", "Count", "Percentile", "Ecosystem"]);
    for entry in counts.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(&entry.version),
            Cell::new(entry.count)
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Right),
            Cell::new(entry.percentile_rank).set_alignment(CellAlignment::Right),
            Cell::new(&entry.ecosystem_backend),
        ]);
    }
    println!("{}", table);
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

/// Distinct package names in the report.
fn unique_packages(data: &ReportData) -> usize {
    let names: HashSet<&str> = match data {
        ReportData::Records(records) => records.iter().map(|r| r.name.as_str()).collect(),
        ReportData::Counts(counts) => counts.iter().map(|c| c.name.as_str()).collect(),
    };
    names.len()
}
