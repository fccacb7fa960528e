//! Left-recursion detection.
//!
//! A rule is left-recursive when it can reach itself through calls made before
//! any input is consumed. Such a rule never terminates under PEG semantics.

use indexmap::{IndexMap, IndexSet};
use thicket_ir::{Expr, Grammar};

use super::symbol_table::SymbolTable;
use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;

/// Rules that may succeed without consuming input, computed to a fixpoint.
pub fn nullable_rules(grammar: &Grammar) -> IndexSet<String> {
    let mut nullable = IndexSet::new();
    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            if !nullable.contains(rule.name.as_str()) && is_nullable(&rule.body, &nullable) {
                nullable.insert(rule.name.to_string());
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

pub fn is_nullable(expr: &Expr, nullable_rules: &IndexSet<String>) -> bool {
    match expr {
        Expr::Terminal(text) => text.is_empty(),
        Expr::Class(_) | Expr::AnyChar => false,
        Expr::Sequence(items) => items.iter().all(|e| is_nullable(e, nullable_rules)),
        Expr::Choice(alts) => alts.iter().any(|e| is_nullable(e, nullable_rules)),
        Expr::Repetition { inner, min } => *min == 0 || is_nullable(inner, nullable_rules),
        Expr::Optional(_) | Expr::Lookahead(_) | Expr::NegativeLookahead(_) => true,
        Expr::Predicate { .. } => true,
        Expr::Label { inner, .. } => is_nullable(inner, nullable_rules),
        Expr::RuleRef(name) => nullable_rules.contains(name.as_str()),
    }
}

/// Rules that `expr` may call at its starting position.
fn leftmost_calls<'g>(expr: &'g Expr, nullable: &IndexSet<String>, out: &mut IndexSet<&'g str>) {
    match expr {
        Expr::Terminal(_) | Expr::Class(_) | Expr::AnyChar | Expr::Predicate { .. } => {}
        Expr::Sequence(items) => {
            for item in items {
                leftmost_calls(item, nullable, out);
                if !is_nullable(item, nullable) {
                    break;
                }
            }
        }
        Expr::Choice(alts) => {
            for alt in alts {
                leftmost_calls(alt, nullable, out);
            }
        }
        Expr::Repetition { inner, .. }
        | Expr::Optional(inner)
        | Expr::Lookahead(inner)
        | Expr::NegativeLookahead(inner)
        | Expr::Label { inner, .. } => leftmost_calls(inner, nullable, out),
        Expr::RuleRef(name) => {
            out.insert(name.as_str());
        }
    }
}

/// Names of left-recursive rules, in declaration order.
pub fn left_recursive_rules(grammar: &Grammar) -> Vec<&str> {
    let nullable = nullable_rules(grammar);
    let graph: IndexMap<&str, IndexSet<&str>> = grammar
        .rules()
        .map(|rule| {
            let mut calls = IndexSet::new();
            leftmost_calls(&rule.body, &nullable, &mut calls);
            (rule.name.as_str(), calls)
        })
        .collect();

    graph
        .keys()
        .copied()
        .filter(|&start| reaches(&graph, start))
        .collect()
}

fn reaches(graph: &IndexMap<&str, IndexSet<&str>>, start: &str) -> bool {
    let mut visited: IndexSet<&str> = IndexSet::new();
    let mut stack: Vec<&str> = graph.get(start).into_iter().flatten().copied().collect();
    while let Some(name) = stack.pop() {
        if name == start {
            return true;
        }
        if !visited.insert(name) {
            continue;
        }
        stack.extend(graph.get(name).into_iter().flatten().copied());
    }
    false
}

pub fn validate_left_recursion(grammar: &Grammar, symbols: &SymbolTable, diag: &mut Diagnostics) {
    for name in left_recursive_rules(grammar) {
        let Some(rule) = symbols.get(name) else {
            continue;
        };
        let range = rule.name().map_or(rule.text_range(), |t| t.text_range());
        diag.report(DiagnosticKind::LeftRecursion, range)
            .message(name)
            .emit();
    }
}
