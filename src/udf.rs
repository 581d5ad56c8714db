//! Registration contract between row functions and the hosting engine.
//!
//! A function declares its name, the input columns it reads and the schema of
//! the records it emits. The host looks functions up by name and calls them
//! once per row with an `emit` sink.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::extractor::DependencyExtractor;
use crate::models::{NestedMode, OutputRecord, Row};

/// Name the shrinkwrap extractor is callable under from queries.
pub const EXTRACT_DEPENDENCIES: &str = "extractDependencies";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
}

/// One named, typed column of a function's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UdfDefinition {
    pub name: String,
    pub input_columns: Vec<String>,
    pub output_schema: Vec<Field>,
}

/// A function the host invokes per row.
pub trait RowFunction: Send + Sync {
    fn definition(&self) -> UdfDefinition;

    fn call(&self, row: &Row, emit: &mut dyn FnMut(OutputRecord));
}

impl RowFunction for DependencyExtractor {
    fn definition(&self) -> UdfDefinition {
        UdfDefinition {
            name: EXTRACT_DEPENDENCIES.to_string(),
            input_columns: vec!["content".to_string()],
            output_schema: vec![Field::string("name"), Field::string("version")],
        }
    }

    fn call(&self, row: &Row, emit: &mut dyn FnMut(OutputRecord)) {
        self.extract_dependencies(row, emit);
    }
}

/// Functions known to the host, keyed by their registered name.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn RowFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the shrinkwrap extractor already defined.
    pub fn with_builtins(nested: NestedMode) -> Self {
        let mut registry = Self::new();
        registry.define_function(Arc::new(DependencyExtractor::new(nested)));
        registry
    }

    /// Register `function` under its declared name, replacing any previous
    /// function with the same name.
    pub fn define_function(&mut self, function: Arc<dyn RowFunction>) {
        let name = function.definition().name;
        tracing::debug!("registered function {}", name);
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn RowFunction>> {
        self.functions.get(name)
    }

    pub fn definitions(&self) -> Vec<UdfDefinition> {
        let mut defs: Vec<_> = self.functions.values().map(|f| f.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Call function `name` on `row`, checking its declared input columns first.
    pub fn invoke(
        &self,
        name: &str,
        row: &Row,
        emit: &mut dyn FnMut(OutputRecord),
    ) -> Result<()> {
        let Some(function) = self.get(name) else {
            bail!("function not registered: {}", name);
        };

        let definition = function.definition();
        if let Some(missing) = definition
            .input_columns
            .iter()
            .find(|column| row.get(column).is_none())
        {
            bail!("missing input column `{}` for function {}", missing, name);
        }

        function.call(row, emit);
        Ok(())
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
