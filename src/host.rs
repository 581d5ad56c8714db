//! In-process host that feeds rows to a registered function.

use anyhow::Result;

use crate::models::{OutputRecord, Row};
use crate::report::ScanSummary;
use crate::udf::FunctionRegistry;

/// Invoke function `name` on every row and collect what it emits.
///
/// `on_row` is called after each row, for progress reporting.
pub fn run_rows<F>(
    registry: &FunctionRegistry,
    name: &str,
    rows: &[Row],
    mut on_row: F,
) -> Result<(Vec<OutputRecord>, ScanSummary)>
where
    F: FnMut(),
{
    let mut records = Vec::new();
    let mut summary = ScanSummary::default();

    for row in rows {
        let before = records.len();
        registry.invoke(name, row, &mut |record| records.push(record))?;

        let emitted = records.len() - before;
        summary.rows += 1;
        summary.records += emitted;
        if emitted > 0 {
            summary.productive_rows += 1;
        }
        tracing::trace!("row {} emitted {} records", summary.rows, emitted);
        on_row();
    }

    Ok((records, summary))
}
