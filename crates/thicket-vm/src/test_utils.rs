//! Helpers for building parsers from grammar source in tests.

use thicket_compiler::{compile_grammar, lower};

use crate::{CompiledParser, ParseOptions};

/// Compile grammar source into a parser, panicking on any error.
pub fn parser(src: &str) -> CompiledParser {
    let grammar = compile_grammar(src).unwrap_or_else(|err| {
        let rendered = err
            .diagnostics()
            .map(|d| d.printer().source(src).render())
            .unwrap_or_default();
        panic!("grammar failed to compile: {err}\n{rendered}");
    });
    CompiledParser::new(lower(&grammar).expect("grammar should lower"))
}

/// Parse and render the tree, or the failure reason.
pub fn outline(parser: &mut CompiledParser, input: &str, options: ParseOptions) -> String {
    match parser.parse(input, options) {
        Ok(Some(tree)) => tree.render(thicket_core::Colors::OFF),
        Ok(None) => format!(
            "NO MATCH: {}",
            parser.failure_reason().unwrap_or_default()
        ),
        Err(err) => format!("RUNTIME ERROR: {err}"),
    }
}
