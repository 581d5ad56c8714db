//! `shrinkwrap-deps` — a row function that lists the packages pinned in NPM
//! shrinkwrap files, plus a small host for running it over local files.
//!
//! - [`extractor`] — the `extractDependencies` function itself.
//! - [`udf`] — registration contract and [`udf::FunctionRegistry`].
//! - [`host`] — per-row invocation loop.
//! - [`source`], [`config`], [`aggregate`], [`report`] — CLI plumbing.

pub mod aggregate;
pub mod config;
pub mod extractor;
pub mod host;
pub mod models;
pub mod report;
pub mod source;
pub mod udf;

pub use extractor::{extract_dependencies, DependencyExtractor};
pub use models::{NestedMode, OutputRecord, Row};
pub use udf::{FunctionRegistry, RowFunction, UdfDefinition, EXTRACT_DEPENDENCIES};
