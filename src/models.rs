use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One input row handed to a function by the host, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub columns: Map<String, Value>,
}

impl Row {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Build a row with a single `content` column.
    pub fn from_content(content: impl Into<String>) -> Self {
        let mut columns = Map::new();
        columns.insert("content".to_string(), Value::String(content.into()));
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// The `content` column as text, if present and a string.
    pub fn content(&self) -> Option<&str> {
        self.get("content").and_then(Value::as_str)
    }
}

/// A single `{name, version}` pair found in a shrinkwrap document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputRecord {
    pub name: String,
    pub version: String,
}

impl OutputRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Ecosystem tag attached to every aggregated count.
pub const NPM_ECOSYSTEM: &str = "npm";

/// Number of rows referencing a given `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCount {
    pub name: String,
    pub version: String,
    pub count: usize,
    /// Share of all groups with a count at or below this one, 0-100.
    pub percentile_rank: u32,
    pub ecosystem_backend: String,
}

/// What to do with records found below the first level of `dependencies`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedMode {
    /// Nested levels are walked but their records are dropped; only the
    /// top-level packages are emitted.
    #[default]
    Discard,
    /// Nested records are emitted right after their parent (depth-first
    /// pre-order).
    Flatten,
}

impl std::fmt::Display for NestedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NestedMode::Discard => write!(f, "discard"),
            NestedMode::Flatten => write!(f, "flatten"),
        }
    }
}
