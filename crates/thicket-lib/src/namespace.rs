//! In-memory registry of loaded grammars.
//!
//! Each grammar is reachable under two names: the flat parser name
//! (`Test::GrammarParser`) and the nested path (`Test::Grammar::Parser`).
//! Both resolve to the same shared [`Program`].

use std::sync::Arc;

use indexmap::IndexMap;
use thicket_ir::Program;
use thicket_vm::CompiledParser;

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    parsers: IndexMap<String, Arc<Program>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `program` under both of its parser names.
    ///
    /// A grammar loaded again under the same name replaces the earlier one.
    pub fn register(&mut self, program: Program) -> Arc<Program> {
        let program = Arc::new(program);
        for name in parser_names(program.name()) {
            self.parsers.insert(name, Arc::clone(&program));
        }
        program
    }

    /// Fresh parser handle for a registered name.
    pub fn parser(&self, name: &str) -> Result<CompiledParser> {
        self.get(name)
            .map(|program| CompiledParser::from_arc(Arc::clone(program)))
            .ok_or_else(|| Error::UnknownParser(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Program>> {
        self.parsers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Registered parser names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Flat and nested parser names for a grammar name.
pub fn parser_names(grammar: &str) -> [String; 2] {
    [format!("{grammar}Parser"), format!("{grammar}::Parser")]
}
