//! Thicket compiler: grammar parser, analyzer, and parser generator.
//!
//! This crate provides the compilation pipeline for Thicket grammars:
//! - `parser` - lexer, CST, and AST construction
//! - `analyze` - semantic analysis (symbol table, labels, left recursion)
//! - `generate` - lowering to a `Program` and Rust source emission
//! - `diagnostics` - error reporting
//! - `source` - staged facade over the pipeline

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod generate;
pub mod parser;
pub mod source;

#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use generate::{RustConfig, emit_rust, lower};
pub use source::{
    DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, GrammarAnalyzed, GrammarBuilder, GrammarParsed,
    compile_grammar,
};

/// Errors that can occur while compiling a grammar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("grammar parsing failed with {} errors", .0.error_count())]
    GrammarSyntaxError(Diagnostics),

    #[error("grammar analysis failed with {} errors", .0.error_count())]
    GrammarAnalyzeError(Diagnostics),

    #[error(transparent)]
    Build(#[from] thicket_ir::BuildError),
}

impl Error {
    /// Diagnostics carried by syntax and analysis errors.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::GrammarSyntaxError(d) | Error::GrammarAnalyzeError(d) => Some(d),
            _ => None,
        }
    }
}

/// Result type for grammar compilation.
pub type Result<T> = std::result::Result<T, Error>;
