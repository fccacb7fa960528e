//! Generate Rust source from a grammar.

use std::fs;
use std::path::PathBuf;

use thicket::RustConfig;
use thicket::compiler::emit_rust;
use thicket::loader::default_output_path;

use super::run_common::{compile_or_exit, load_grammar_or_exit};

pub struct CompileArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub runtime_path: Option<String>,
    pub nested_alias: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let loaded = load_grammar_or_exit(args.grammar_path.as_deref(), args.grammar_text.as_deref());
    let grammar = compile_or_exit(&loaded, args.color);

    let mut config = RustConfig::new().nested_alias(args.nested_alias);
    if let Some(path) = args.runtime_path {
        config = config.runtime_path(path);
    }

    let output = emit_rust(&grammar, &config).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    if args.stdout {
        print!("{}", output);
        return;
    }

    let Some(dest) = args.output.or_else(|| loaded.path.as_deref().map(default_output_path)) else {
        eprintln!("error: --output is required for grammars read from stdin");
        std::process::exit(1);
    };

    if let Err(e) = fs::write(&dest, output) {
        eprintln!("error: failed to write '{}': {}", dest.display(), e);
        std::process::exit(1);
    }
    eprintln!("wrote {}", dest.display());
}
