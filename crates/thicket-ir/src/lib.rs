#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Expression model and compiled program representation.
//!
//! Two layers:
//! - **Grammar layer** ([`Grammar`], [`Rule`], [`Expr`]): the tree a grammar
//!   source parses into. Rule references are names.
//! - **Program layer** ([`Program`], [`Op`]): a flat, name-resolved op table the
//!   runtime interprets. Built through [`ProgramBuilder`], either by lowering a
//!   `Grammar` or by generated source code.

mod builder;
mod dump;
mod expr;
mod grammar;
mod program;

#[cfg(test)]
mod dump_tests;

pub use builder::ProgramBuilder;
pub use dump::dump;
pub use expr::{CharClass, ClassRange, Expr, quote_terminal};
pub use grammar::{Grammar, Rule};
pub use program::{ExprId, Op, Program, RuleEntry, RuleId};

/// Errors raised while assembling a [`Program`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A rule was referenced but never given a body.
    #[error("rule `{0}` is referenced but never defined")]
    UndefinedRule(String),

    /// A rule was given a body more than once.
    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),
}
