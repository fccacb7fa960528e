use std::path::PathBuf;

use thicket::compiler::GrammarBuilder;

use super::run_common::{load_grammar_or_exit, render_diagnostics};

pub struct CheckArgs {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let loaded = load_grammar_or_exit(args.grammar_path.as_deref(), args.grammar_text.as_deref());

    let analyzed = match GrammarBuilder::new(&loaded.source)
        .parse()
        .and_then(|parsed| parsed.analyze())
    {
        Ok(analyzed) => analyzed,
        Err(err) => {
            match err.diagnostics() {
                Some(diagnostics) => {
                    eprint!("{}", render_diagnostics(diagnostics, &loaded, args.color))
                }
                None => eprintln!("error: {}", err),
            }
            std::process::exit(1);
        }
    };

    let diagnostics = analyzed.diagnostics();
    let is_valid = if args.strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        analyzed.is_valid()
    };

    if !diagnostics.is_empty() {
        eprint!("{}", render_diagnostics(diagnostics, &loaded, args.color));
    }
    if !is_valid {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
