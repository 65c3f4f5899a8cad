//! Staged analysis pipeline.
//!
//! ```text
//! Analyzer --check_graph()--> GraphChecked --resolve()--> Program
//! ```
//!
//! Resolution is only reachable through a `GraphChecked`, so the graph gate
//! always runs first.

use sable_core::Program;
use tracing::debug;

use crate::Result;
use crate::analyze::{InterfaceTable, check_graph, resolve_module, validate_entries};

const DEFAULT_RECURSION_LIMIT: u32 = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalyzeConfig {
    /// Maximum expression/type nesting the resolver descends into.
    pub recursion_limit: u32,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

pub struct Analyzer<'p> {
    program: &'p Program,
    config: AnalyzeConfig,
}

impl<'p> Analyzer<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            config: AnalyzeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalyzeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.config.recursion_limit = limit;
        self
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Run the module graph gate and build the interface table.
    pub fn check_graph(self) -> Result<GraphChecked<'p>> {
        check_graph(&self.program.modules)?;
        let interfaces = InterfaceTable::build(self.program);
        Ok(GraphChecked {
            program: self.program,
            config: self.config,
            interfaces,
        })
    }
}

/// A program whose import graph is known to be valid.
pub struct GraphChecked<'p> {
    program: &'p Program,
    config: AnalyzeConfig,
    interfaces: InterfaceTable<'p>,
}

impl<'p> GraphChecked<'p> {
    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn interfaces(&self) -> &InterfaceTable<'p> {
        &self.interfaces
    }

    /// Validate every module's entries, then resolve modules in order.
    ///
    /// Returns the first error; no partially resolved program escapes.
    pub fn resolve(self) -> Result<Program> {
        for module in &self.program.modules {
            validate_entries(module)?;
        }

        let modules = self
            .program
            .modules
            .iter()
            .map(|module| resolve_module(&self.interfaces, module, self.config.recursion_limit))
            .collect::<Result<Vec<_>>>()?;

        debug!(modules = modules.len(), "program resolved");
        Ok(Program::new(modules))
    }
}
