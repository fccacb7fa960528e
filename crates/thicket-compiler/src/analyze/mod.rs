//! Semantic analysis passes.
//!
//! - Name resolution (symbol_table)
//! - Label validation (labels)
//! - Lowering to the grammar model (model)
//! - Left-recursion detection (recursion)

pub mod labels;
pub mod model;
pub mod recursion;
pub mod symbol_table;

#[cfg(test)]
mod analyze_tests;

pub use labels::validate_labels;
pub use model::build_grammar;
pub use recursion::{left_recursive_rules, validate_left_recursion};
pub use symbol_table::{SymbolTable, resolve_names};

use thicket_ir::Grammar;

use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Root;

/// Run every pass in order, collecting diagnostics into `diag`.
pub fn analyze(root: &Root, diag: &mut Diagnostics) -> (SymbolTable, Grammar) {
    let symbols = resolve_names(root, diag);
    validate_labels(root, diag);
    let grammar = build_grammar(root, &symbols, diag);

    if grammar.rule_count() == 0
        && let Some(keyword) = root.grammar().and_then(|g| g.grammar_keyword())
    {
        diag.report(DiagnosticKind::EmptyGrammar, keyword.text_range())
            .emit();
    }

    validate_left_recursion(&grammar, &symbols, diag);
    (symbols, grammar)
}
