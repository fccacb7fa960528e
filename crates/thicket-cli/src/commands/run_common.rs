//! Shared grammar compilation and parser setup for the CLI commands.

use std::path::PathBuf;

use thicket::compiler::GrammarBuilder;
use thicket::ir::Grammar;
use thicket::vm::{FuelLimits, ParseOptions};
use thicket::{CompiledParser, Diagnostics};

use super::grammar_loader::{LoadedGrammar, load_grammar, load_input};

/// Grammar, input and runtime options of `parse` and `trace`.
pub struct RunInput {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub root: Option<String>,
    pub partial: bool,
    pub index: Option<usize>,
    pub fuel: u32,
    pub color: bool,
}

pub struct PreparedParser {
    pub parser: CompiledParser,
    pub input: String,
    pub options: ParseOptions,
}

pub fn load_grammar_or_exit(path: Option<&std::path::Path>, text: Option<&str>) -> LoadedGrammar {
    load_grammar(path, text).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    })
}

/// Parse and analyze, printing diagnostics and exiting on errors.
pub fn compile_or_exit(loaded: &LoadedGrammar, color: bool) -> Grammar {
    let result = GrammarBuilder::new(&loaded.source)
        .parse()
        .and_then(|parsed| parsed.analyze())
        .and_then(|analyzed| analyzed.into_grammar());

    match result {
        Ok(grammar) => grammar,
        Err(err) => {
            match err.diagnostics() {
                Some(diagnostics) => eprint!("{}", render_diagnostics(diagnostics, loaded, color)),
                None => eprintln!("error: {}", err),
            }
            std::process::exit(1);
        }
    }
}

pub fn render_diagnostics(diagnostics: &Diagnostics, loaded: &LoadedGrammar, color: bool) -> String {
    let path = loaded.display_path();
    let mut printer = diagnostics
        .printer()
        .source(&loaded.source)
        .colored(color);
    if let Some(path) = path.as_deref() {
        printer = printer.path(path);
    }
    printer.render()
}

/// Compile the grammar, configure a parser handle, and load the input.
pub fn prepare(run: &RunInput) -> PreparedParser {
    let loaded = load_grammar_or_exit(run.grammar_path.as_deref(), run.grammar_text.as_deref());
    let grammar = compile_or_exit(&loaded, run.color);

    let program = thicket::compiler::lower(&grammar).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    let mut parser = CompiledParser::new(program);
    parser.set_limits(FuelLimits::new().exec_fuel(run.fuel));
    if let Some(root) = &run.root
        && let Err(e) = parser.set_root(root)
    {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let input = load_input(run.input_path.as_deref(), run.input_text.as_deref()).unwrap_or_else(
        |msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        },
    );

    let mut options = ParseOptions::new();
    if run.partial {
        options = options.consume_all_input(false);
    }
    if let Some(index) = run.index {
        options = options.start_index(index);
    }

    PreparedParser {
        parser,
        input,
        options,
    }
}
