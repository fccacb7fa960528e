//! Parser infrastructure for the grammar language.
//!
//! Produces a lossless concrete syntax tree via Rowan's green tree builder.
//! Trivia is buffered and attached as leading trivia of the next node, and
//! quantifiers wrap their operand retroactively through checkpoints.
//!
//! The parser is resilient and always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. `rule` and `end` act as synchronization points inside a rule body
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt::Write;

pub use ast::{Expr, Root};
pub use core::{ParseResult, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

use crate::Error;
use lexer::lex;

pub fn parse(
    source: &str,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
) -> Result<ParseResult, Error> {
    Parser::new(source, lex(source))
        .with_exec_fuel(exec_fuel)
        .with_recursion_fuel(recursion_fuel)
        .parse()
}

/// Indented dump of the non-trivia CST, one node or token per line.
pub fn print_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    print_node(node, 0, &mut out);
    out
}

fn print_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{:?}", node.kind());
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => print_node(&n, depth + 1, out),
            rowan::NodeOrToken::Token(t) if t.kind().is_trivia() => {}
            rowan::NodeOrToken::Token(t) => {
                let _ = writeln!(out, "{indent}  {:?} {:?}", t.kind(), t.text());
            }
        }
    }
}
