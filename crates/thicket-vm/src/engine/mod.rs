//! Runtime engine for executing compiled Thicket grammars.
//!
//! The interpreter walks a [`Program`](thicket_ir::Program) with plain
//! backtracking, building a [`SyntaxTree`] on success and a
//! [`FailureReport`] either way.

mod error;
mod failure;
mod options;
mod parser;
mod predicate;
mod trace;
mod tree;
mod vm;

#[cfg(test)]
mod predicate_tests;
#[cfg(test)]
mod trace_tests;

pub use error::RuntimeError;
pub use failure::{FailureReport, TerminalFailure};
pub use options::ParseOptions;
pub use parser::CompiledParser;
pub use predicate::{MatchEnv, PredicateError, PredicateFn};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use tree::{Elements, Node, NodeId, NodeKind, SyntaxTree};
pub use vm::{DEFAULT_RECURSION_LIMIT, FuelLimits};
