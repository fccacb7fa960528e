//! Errors that can occur while running a compiled parser.
//!
//! A failed match is not an error: `parse` returns `Ok(None)` and the failure
//! report explains it. These are the conditions that abort a parse outright.

use super::predicate::PredicateError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// Root rule named in options or assigned on the handle does not exist.
    #[error("grammar `{grammar}` has no rule named `{rule}`")]
    UnknownRule { grammar: String, rule: String },

    /// The grammar declares no rules, so there is nothing to start from.
    #[error("grammar `{0}` has no rules")]
    NoRules(String),

    /// Start index past the end of input or inside a multi-byte character.
    #[error("start index {index} is not a character boundary of input of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A predicate hook was evaluated without a bound callable.
    #[error("no predicate bound for `{0}`")]
    UnboundPredicate(String),

    /// A bound predicate returned an error.
    #[error("predicate `{hook}` failed: {source}")]
    Predicate {
        hook: String,
        #[source]
        source: PredicateError,
    },

    /// Execution fuel exhausted (too many expression evaluations).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (too many nested rule calls).
    #[error("runtime recursion limit exceeded")]
    RecursionLimitExceeded,
}
