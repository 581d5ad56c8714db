use std::path::PathBuf;

use clap::Parser;

use shrinkwrap_deps::models::NestedMode;

#[derive(Parser, Debug)]
#[command(
    name = "shrinkwrap-deps",
    about = "Extract package dependencies from NPM shrinkwrap files",
    version
)]
pub struct Cli {
    /// Shrinkwrap files, JSON Lines row exports, or directories to scan
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Config file [default: ./.shrinkwrap-deps/config.toml, fallback ~/.config/shrinkwrap-deps/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Group records by name and version and count references
    #[arg(long)]
    pub count: bool,

    /// Handling of nested dependencies (overrides config)
    #[arg(long, value_name = "MODE")]
    pub nested: Option<NestedArg>,

    /// Show debug logging and every record
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Jsonl,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum NestedArg {
    Discard,
    Flatten,
}

impl From<NestedArg> for NestedMode {
    fn from(arg: NestedArg) -> Self {
        match arg {
            NestedArg::Discard => NestedMode::Discard,
            NestedArg::Flatten => NestedMode::Flatten,
        }
    }
}
