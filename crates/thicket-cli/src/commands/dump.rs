use std::path::PathBuf;

use thicket::Colors;
use thicket::compiler::GrammarBuilder;
use thicket::compiler::parser::print_cst;

use super::run_common::{compile_or_exit, load_grammar_or_exit, render_diagnostics};

pub struct DumpArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub cst: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let loaded = load_grammar_or_exit(args.grammar_path.as_deref(), args.grammar_text.as_deref());

    if args.cst {
        let parsed = GrammarBuilder::new(&loaded.source)
            .parse()
            .unwrap_or_else(|e| {
                eprintln!("error: {}", e);
                std::process::exit(1);
            });
        if !parsed.diagnostics().is_empty() {
            eprint!(
                "{}",
                render_diagnostics(parsed.diagnostics(), &loaded, args.color)
            );
        }
        // Lossless: prints even with syntax errors.
        print!("{}", print_cst(parsed.root().as_cst()));
        return;
    }

    let grammar = compile_or_exit(&loaded, args.color);
    let program = thicket::compiler::lower(&grammar).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });
    print!("{}", thicket::ir::dump(&program, Colors::new(args.color)));
}
