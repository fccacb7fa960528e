//! Thicket: PEG grammar compiler and backtracking parsing runtime.
//!
//! # Example
//!
//! ```
//! use thicket::vm::ParseOptions;
//!
//! let source = r#"
//!     grammar Greeting
//!       rule greeting
//!         'hello' ' '+ name:[a-z]+
//!       end
//!     end
//! "#;
//!
//! let mut parser = thicket::compile(source).expect("valid grammar");
//! let tree = parser
//!     .parse("hello world", ParseOptions::new())
//!     .expect("no runtime error")
//!     .expect("input matches");
//! assert_eq!(tree.text_value(), "hello world");
//!
//! let name = tree.root().child_by_label("name").map(|n| n.text_value());
//! assert_eq!(name, Some("world"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

pub mod loader;
pub mod namespace;

#[cfg(test)]
mod loader_tests;

pub use thicket_compiler as compiler;
pub use thicket_ir as ir;
pub use thicket_vm as vm;

pub use loader::{compile_file, load, load_from_string};
pub use namespace::Namespace;
pub use thicket_compiler::{Diagnostics, RustConfig, compile_grammar};
pub use thicket_core::Colors;
pub use thicket_vm::CompiledParser;

/// Errors surfaced by the facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] thicket_compiler::Error),

    #[error(transparent)]
    Build(#[from] thicket_ir::BuildError),

    #[error("cannot access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No file exists at the path or under any grammar extension.
    #[error("grammar not found (tried {})", display_paths(.candidates))]
    GrammarNotFound { candidates: Vec<PathBuf> },

    #[error("no parser named `{0}` is loaded")]
    UnknownParser(String),
}

impl Error {
    /// Grammar diagnostics, if compilation failed on invalid source.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Compile(err) => err.diagnostics(),
            _ => None,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compile grammar source into a parser ready to run.
pub fn compile(source: &str) -> Result<CompiledParser> {
    let grammar = compile_grammar(source)?;
    let program = thicket_compiler::lower(&grammar)?;
    Ok(CompiledParser::new(program))
}

/// Compile grammar source into Rust source text.
pub fn compile_to_rust(source: &str, config: &RustConfig) -> Result<String> {
    let grammar = compile_grammar(source)?;
    Ok(thicket_compiler::emit_rust(&grammar, config)?)
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("`{}`", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
