//! Turning input files into host rows.
//!
//! A plain file becomes a single row whose `content` is the file text. A JSON
//! Lines export (`.jsonl` / `.ndjson`) yields one row per line, each line being
//! an object of column values.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::models::Row;

pub trait RowReader {
    fn read(&self, path: &Path) -> Result<Vec<Row>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    File,
    JsonLines,
}

/// Guess the input format from the file extension.
pub fn detect_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
            InputFormat::JsonLines
        }
        _ => InputFormat::File,
    }
}

pub struct FileRowReader;

impl RowReader for FileRowReader {
    fn read(&self, path: &Path) -> Result<Vec<Row>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(vec![Row::from_content(content)])
    }
}

pub struct JsonLinesRowReader;

impl RowReader for JsonLinesRowReader {
    fn read(&self, path: &Path) -> Result<Vec<Row>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_json_lines(&content).with_context(|| format!("in {}", path.display()))
    }
}

fn parse_json_lines(content: &str) -> Result<Vec<Row>> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("line {} is not valid JSON", idx + 1))?;
        match value {
            Value::Object(columns) => rows.push(Row::new(columns)),
            _ => bail!("line {} is not a JSON object", idx + 1),
        }
    }

    Ok(rows)
}

/// Expand `path` into the files to read.
///
/// Directories are searched one level deep for any of `file_names`.
pub fn collect_inputs(path: &Path, file_names: &[String]) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    file_names
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| candidate.is_file())
        .collect()
}

/// Read every row from `path` using the reader matching its format.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    match detect_format(path) {
        InputFormat::File => FileRowReader.read(path),
        InputFormat::JsonLines => JsonLinesRowReader.read(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("rows.jsonl")), InputFormat::JsonLines);
        assert_eq!(detect_format(Path::new("rows.NDJSON")), InputFormat::JsonLines);
        assert_eq!(detect_format(Path::new("npm-shrinkwrap.json")), InputFormat::File);
        assert_eq!(detect_format(Path::new("lockfile")), InputFormat::File);
    }

    #[test]
    fn test_file_reader_single_row() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"dependencies": {{}}}}"#).unwrap();
        let rows = FileRowReader.read(f.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content(), Some(r#"{"dependencies": {}}"#));
    }

    #[test]
    fn test_parse_json_lines() {
        let content = r#"{"content": "{\"dependencies\": {}}", "repo": "a/b"}

{"content": "not json"}
"#;
        let rows = parse_json_lines(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].content(), Some(r#"{"dependencies": {}}"#));
        assert_eq!(rows[0].get("repo"), Some(&Value::String("a/b".into())));
        assert_eq!(rows[1].content(), Some("not json"));
    }

    #[test]
    fn test_parse_json_lines_rejects_non_objects() {
        let err = parse_json_lines("{\"content\": \"x\"}\n[1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_json_lines("{oops").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_collect_inputs_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("npm-shrinkwrap.json"), "{}").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let names = vec![
            "npm-shrinkwrap.json".to_string(),
            "package-lock.json".to_string(),
        ];
        let inputs = collect_inputs(dir.path(), &names);
        assert_eq!(inputs, vec![dir.path().join("npm-shrinkwrap.json")]);

        let file = dir.path().join("package.json");
        assert_eq!(collect_inputs(&file, &names), vec![file.clone()]);
    }
}
