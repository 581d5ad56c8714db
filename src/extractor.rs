//! Dependency extraction from NPM shrinkwrap documents.
//!
//! A shrinkwrap file nests packages under `dependencies` objects:
//!
//! ```json
//! { "dependencies": { "express": { "version": "4.18.2", "dependencies": { ... } } } }
//! ```
//!
//! Parsing is best-effort. Invalid JSON, missing keys and odd shapes all
//! produce no records instead of an error.

use serde_json::{Number, Value};

use crate::models::{NestedMode, OutputRecord, Row};

/// Walks shrinkwrap documents and emits one [`OutputRecord`] per versioned package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyExtractor {
    nested: NestedMode,
}

impl DependencyExtractor {
    pub fn new(nested: NestedMode) -> Self {
        Self { nested }
    }

    /// Parse `row.content` and pass every dependency found to `emit`.
    ///
    /// Nothing is emitted when `content` is missing, not text, not valid JSON,
    /// or has no top-level `dependencies` key.
    pub fn extract_dependencies<F>(&self, row: &Row, mut emit: F)
    where
        F: FnMut(OutputRecord),
    {
        let Some(content) = row.content() else {
            return;
        };
        let Ok(document) = serde_json::from_str::<Value>(content) else {
            return;
        };

        if let Some(dependencies) = document.get("dependencies") {
            for record in self.extract(dependencies) {
                emit(record);
            }
        }
    }

    /// Convenience wrapper collecting the emitted records.
    pub fn extract_all(&self, row: &Row) -> Vec<OutputRecord> {
        let mut records = Vec::new();
        self.extract_dependencies(row, |record| records.push(record));
        records
    }

    /// Records for one `dependencies` mapping, in document order.
    fn extract(&self, node: &Value) -> Vec<OutputRecord> {
        let mut results = Vec::new();
        let Some(packages) = node.as_object() else {
            return results;
        };

        for (name, details) in packages {
            let details = details.as_object();
            let version = details.and_then(|d| d.get("version")).and_then(version_text);

            let (Some(details), Some(version)) = (details, version) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            results.push(OutputRecord::new(name.as_str(), version));

            if let Some(nested) = details.get("dependencies") {
                let children = self.extract(nested);
                match self.nested {
                    NestedMode::Discard => drop(children),
                    NestedMode::Flatten => results.extend(children),
                }
            }
        }

        results
    }
}

/// Text of a `version` attribute, or `None` when the value is falsy.
///
/// `null`, `false`, `0` and `""` are treated as absent. Numbers are written the
/// way JavaScript prints them, other values keep their JSON rendering.
fn version_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => number_text(n),
        other => Some(other.to_string()),
    }
}

/// JavaScript `String(number)` for a parsed JSON number; `None` for zero.
///
/// Out-of-range literals such as `1e400` become `Infinity`.
fn number_text(n: &Number) -> Option<String> {
    let literal = n.to_string();
    let Ok(value) = literal.parse::<f64>() else {
        return Some(literal);
    };

    if value == 0.0 {
        return None;
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return Some(text.to_string());
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return Some(value.to_string());
    }

    // Exponent form, with an explicit sign on positive exponents
    let exp = format!("{:e}", value);
    let text = match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => {
            format!("{}e+{}", mantissa, power)
        }
        _ => exp,
    };
    Some(text)
}

/// Extract with the default ([`NestedMode::Discard`]) behaviour.
pub fn extract_dependencies<F>(row: &Row, emit: F)
where
    F: FnMut(OutputRecord),
{
    DependencyExtractor::default().extract_dependencies(row, emit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn run(content: &str) -> Vec<OutputRecord> {
        DependencyExtractor::default().extract_all(&Row::from_content(content))
    }

    fn run_flat(content: &str) -> Vec<OutputRecord> {
        DependencyExtractor::new(NestedMode::Flatten).extract_all(&Row::from_content(content))
    }

    #[test]
    fn test_invalid_json_emits_nothing() {
        assert!(run("{not json").is_empty());
        assert!(run("").is_empty());
        assert!(run(r#"{"dependencies": {"a": {"version": "1.0.0"}}"#).is_empty());
    }

    #[test]
    fn test_missing_dependencies_key() {
        assert!(run(r#"{"name": "app", "version": "1.0.0"}"#).is_empty());
        assert!(run("[1, 2, 3]").is_empty());
        assert!(run(r#""dependencies""#).is_empty());
    }

    #[test]
    fn test_single_dependency() {
        let records = run(r#"{"dependencies": {"a": {"version": "1.0.0"}}}"#);
        assert_eq!(records, vec![OutputRecord::new("a", "1.0.0")]);
    }

    #[test]
    fn test_nested_records_are_discarded_by_default() {
        let content = r#"{"dependencies": {"a": {"version": "1.0.0", "dependencies": {"b": {"version": "2.0.0"}}}}}"#;
        assert_eq!(run(content), vec![OutputRecord::new("a", "1.0.0")]);
    }

    #[test]
    fn test_flatten_emits_nested_in_pre_order() {
        let content = r#"{"dependencies": {
            "a": {"version": "1.0.0", "dependencies": {
                "b": {"version": "2.0.0", "dependencies": {"c": {"version": "3.0.0"}}}
            }},
            "d": {"version": "4.0.0"}
        }}"#;
        assert_eq!(
            run_flat(content),
            vec![
                OutputRecord::new("a", "1.0.0"),
                OutputRecord::new("b", "2.0.0"),
                OutputRecord::new("c", "3.0.0"),
                OutputRecord::new("d", "4.0.0"),
            ]
        );
    }

    #[test]
    fn test_node_without_version_is_skipped_with_children() {
        let content = r#"{"dependencies": {"a": {"dependencies": {"b": {"version": "2.0.0"}}}}}"#;
        assert!(run(content).is_empty());
        // Children of an unversioned node stay unvisited even when flattening.
        assert!(run_flat(content).is_empty());
        assert!(run(r#"{"dependencies": {"a": {}}}"#).is_empty());
    }

    #[test]
    fn test_empty_name_is_skipped() {
        assert!(run(r#"{"dependencies": {"": {"version": "1.0.0"}}}"#).is_empty());
    }

    #[test]
    fn test_order_follows_document() {
        let content = r#"{"dependencies": {
            "zeta": {"version": "1.0.0"},
            "alpha": {"version": "2.0.0"},
            "mid": {"version": "3.0.0"}
        }}"#;
        let names: Vec<_> = run(content).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_object_entries_are_ignored() {
        let content = r#"{"dependencies": {
            "a": "1.0.0",
            "b": null,
            "c": [1, 2],
            "d": {"version": "4.0.0"}
        }}"#;
        assert_eq!(run(content), vec![OutputRecord::new("d", "4.0.0")]);
        assert!(run(r#"{"dependencies": ["a", "b"]}"#).is_empty());
        assert!(run(r#"{"dependencies": null}"#).is_empty());
    }

    #[test]
    fn test_version_value_shapes() {
        let content = r#"{"dependencies": {
            "null": {"version": null},
            "empty": {"version": ""},
            "num": {"version": 2},
            "zero": {"version": 0},
            "flag": {"version": true}
        }}"#;
        assert_eq!(
            run(content),
            vec![
                OutputRecord::new("num", "2"),
                OutputRecord::new("flag", "true"),
            ]
        );
    }

    #[test]
    fn test_number_versions_print_like_javascript() {
        let content = r#"{"dependencies": {
            "float": {"version": 1.0},
            "frac": {"version": 2.50},
            "neg": {"version": -0.0},
            "big": {"version": 1e21},
            "tiny": {"version": 1e-7},
            "huge": {"version": 123456789012345678901234567890}
        }}"#;
        assert_eq!(
            run(content),
            vec![
                OutputRecord::new("float", "1"),
                OutputRecord::new("frac", "2.5"),
                OutputRecord::new("big", "1e+21"),
                OutputRecord::new("tiny", "1e-7"),
                OutputRecord::new("huge", "1.2345678901234568e+29"),
            ]
        );
    }

    #[test]
    fn test_out_of_range_number_keeps_row() {
        let content = r#"{"dependencies": {"a": {"version": 1.0}, "b": {"version": 1e400}}}"#;
        assert_eq!(
            run(content),
            vec![
                OutputRecord::new("a", "1"),
                OutputRecord::new("b", "Infinity"),
            ]
        );

        let content = r#"{"dependencies": {"a": {"version": "1.0.0", "size": -1e999}}}"#;
        assert_eq!(run(content), vec![OutputRecord::new("a", "1.0.0")]);
    }

    #[test]
    fn test_missing_or_non_text_content_column() {
        let extractor = DependencyExtractor::default();
        assert!(extractor.extract_all(&Row::default()).is_empty());

        let mut columns = Map::new();
        columns.insert("content".to_string(), serde_json::json!({"dependencies": {}}));
        assert!(extractor.extract_all(&Row::new(columns)).is_empty());
    }

    #[test]
    fn test_emit_callback_receives_each_record() {
        let row = Row::from_content(
            r#"{"dependencies": {"a": {"version": "1.0.0"}, "b": {"version": "2.0.0"}}}"#,
        );
        let mut seen = Vec::new();
        extract_dependencies(&row, |r| seen.push(r.to_string()));
        assert_eq!(seen, vec!["a@1.0.0", "b@2.0.0"]);
    }
}
