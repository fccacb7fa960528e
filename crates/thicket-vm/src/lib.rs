#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Backtracking runtime for executing compiled Thicket grammars.
//!
//! This crate provides the interpreter that runs a compiled
//! [`Program`](thicket_ir::Program) against input text, producing a
//! [`SyntaxTree`] or a failure report.

#![allow(clippy::comparison_chain)]

pub mod engine;

#[cfg(test)]
mod test_utils;

// Re-export commonly used items at crate root
pub use engine::{
    CompiledParser, DEFAULT_RECURSION_LIMIT, Elements, FailureReport, FuelLimits, MatchEnv, Node, NodeId, NodeKind,
    NoopTracer, ParseOptions, PredicateError, PredicateFn, PrintTracer, RuntimeError,
    SyntaxTree, TerminalFailure, Tracer, Verbosity,
};
