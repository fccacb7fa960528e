//! Test helpers for grammar sources.

use thicket_core::Colors;
use thicket_ir::Grammar;

use crate::GrammarBuilder;
use crate::generate::{RustConfig, emit_rust, lower};
use crate::parser::print_cst;

impl GrammarBuilder<'_> {
    /// Parse and analyze, panicking on any error. Warnings are allowed.
    pub fn expect_valid(src: &str) -> Grammar {
        match GrammarBuilder::new(src)
            .parse()
            .and_then(|p| p.analyze())
            .and_then(|a| a.into_grammar())
        {
            Ok(grammar) => grammar,
            Err(err) => {
                let rendered = err
                    .diagnostics()
                    .map(|d| d.printer().render())
                    .unwrap_or_default();
                panic!("expected valid grammar, got {err}:\n{rendered}");
            }
        }
    }

    pub fn expect_valid_cst(src: &str) -> String {
        let parsed = GrammarBuilder::new(src).parse().unwrap();
        assert!(
            parsed.is_valid(),
            "expected valid grammar:\n{}",
            parsed.diagnostics().printer().render()
        );
        print_cst(parsed.root().as_cst())
    }

    /// Plain rendering of the filtered diagnostics of an invalid grammar.
    pub fn expect_invalid(src: &str) -> String {
        let err = GrammarBuilder::new(src)
            .parse()
            .and_then(|p| p.analyze())
            .and_then(|a| a.into_grammar())
            .expect_err("expected invalid grammar");
        err.diagnostics()
            .expect("expected diagnostics")
            .printer()
            .render()
    }

    /// Plain rendering of the diagnostics of a grammar that has warnings only.
    pub fn expect_warnings(src: &str) -> String {
        let analyzed = GrammarBuilder::new(src).parse().unwrap().analyze().unwrap();
        assert!(analyzed.is_valid(), "expected no errors");
        assert!(analyzed.diagnostics().has_warnings(), "expected warnings");
        analyzed.diagnostics().printer().render()
    }

    pub fn expect_valid_dump(src: &str) -> String {
        let grammar = Self::expect_valid(src);
        let program = lower(&grammar).unwrap();
        thicket_ir::dump(&program, Colors::OFF)
    }

    pub fn expect_valid_rust(src: &str) -> String {
        let grammar = Self::expect_valid(src);
        emit_rust(&grammar, &RustConfig::new()).unwrap()
    }
}
