//! Symbol table: rule name resolution and reference checking.
//!
//! Two-pass approach:
//! 1. Collect all `rule name ... end` definitions
//! 2. Check that every referenced rule is defined

use indexmap::IndexMap;

use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Root, ast};

/// Rule definitions in declaration order. On duplicates the first definition wins.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: IndexMap<String, ast::Rule>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ast::Rule> {
        self.table.get(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ast::Rule)> {
        self.table.iter().map(|(k, v)| (k.as_str(), v))
    }
}

pub fn resolve_names(root: &Root, diag: &mut Diagnostics) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    let Some(grammar) = root.grammar() else {
        return symbols;
    };

    for rule in grammar.rules() {
        let Some(name) = rule.name() else {
            continue;
        };
        let text = name.text();
        if let Some(first) = symbols.get(text) {
            let first_range = first.name().map_or(first.text_range(), |t| t.text_range());
            diag.report(DiagnosticKind::DuplicateRule, name.text_range())
                .message(text)
                .related_to("first defined here", first_range)
                .emit();
            continue;
        }
        symbols.table.insert(text.to_string(), rule);
    }

    for reference in root.as_cst().descendants().filter_map(ast::Ref::cast) {
        let Some(name) = reference.name() else {
            continue;
        };
        if !symbols.contains(name.text()) {
            diag.report(DiagnosticKind::UndefinedRule, name.text_range())
                .message(name.text())
                .emit();
        }
    }

    symbols
}
