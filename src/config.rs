use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::NestedMode;

/// Root configuration structure, deserialized from `.shrinkwrap-deps/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// How the extractor walks nested `dependencies`.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractConfig {
    /// `discard` (default) keeps only top-level packages, `flatten` emits every level.
    #[serde(default)]
    pub nested: NestedMode,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// File names looked up when a directory is given on the command line.
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,
}

fn default_file_names() -> Vec<String> {
    vec![
        "npm-shrinkwrap.json".to_string(),
        "package-lock.json".to_string(),
    ]
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file_names: default_file_names(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.shrinkwrap-deps/config.toml`
/// 3. `~/.config/shrinkwrap-deps/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_dir.join(".shrinkwrap-deps").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("shrinkwrap-deps")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
