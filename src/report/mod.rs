//! Report renderers for extracted dependencies.
//!
//! - [`terminal`] — colored summary box and table; respects `--verbose` / `--quiet`.
//! - [`json`] — a pretty JSON array, or JSON Lines with one record per line.

pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::models::{DependencyCount, OutputRecord};

/// What the host produced from all rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Records(Vec<OutputRecord>),
    Counts(Vec<DependencyCount>),
}

impl ReportData {
    pub fn len(&self) -> usize {
        match self {
            ReportData::Records(records) => records.len(),
            ReportData::Counts(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-level totals gathered while invoking the function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub rows: usize,
    /// Rows that produced at least one record.
    pub productive_rows: usize,
    pub records: usize,
}
