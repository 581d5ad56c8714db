use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::ReportData;

/// Write `data` as a pretty-printed JSON array.
pub fn render<W: Write>(data: &ReportData, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}

/// Write one compact JSON object per line.
pub fn render_lines<W: Write>(data: &ReportData, out: &mut W) -> Result<()> {
    match data {
        ReportData::Records(records) => write_lines(records, out),
        ReportData::Counts(counts) => write_lines(counts, out),
    }
}

fn write_lines<T: Serialize, W: Write>(items: &[T], out: &mut W) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    Ok(())
}
