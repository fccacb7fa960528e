//! From clap matches to command arguments.
//!
//! Each `*Params` reads only the flags its command acts on; hidden shared
//! flags are accepted and dropped here. With `-g`, a lone positional names
//! the input rather than the grammar.

use std::path::PathBuf;

use clap::ArgMatches;
use thicket::vm::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::run_common::RunInput;
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompileParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub runtime_path: Option<String>,
    pub no_alias: bool,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            stdout: m.get_flag("stdout"),
            runtime_path: m.get_one::<String>("runtime_path").cloned(),
            no_alias: m.get_flag("no_alias"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        // Inline grammars have no file to write next to.
        let stdout = p.stdout || (p.grammar_text.is_some() && p.output.is_none());

        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            output: p.output,
            stdout,
            runtime_path: p.runtime_path,
            nested_alias: !p.no_alias,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub cst: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: m.get_one::<PathBuf>("grammar_path").cloned(),
            grammar_text: m.get_one::<String>("grammar_text").cloned(),
            cst: m.get_flag("cst"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            cst: p.cst,
            color: p.color.should_colorize(),
        }
    }
}

/// Inputs and runtime options shared by `parse` and `trace`.
pub struct RunParams {
    pub grammar_path: Option<PathBuf>,
    pub grammar_text: Option<String>,
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub root: Option<String>,
    pub partial: bool,
    pub index: Option<usize>,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let grammar_path = m.get_one::<PathBuf>("grammar_path").cloned();
        let grammar_text = m.get_one::<String>("grammar_text").cloned();
        let input_path = m.get_one::<PathBuf>("input_path").cloned();

        let (grammar_path, input_path) =
            shift_positional_to_input(grammar_text.is_some(), grammar_path, input_path);

        Self {
            grammar_path,
            grammar_text,
            input_path,
            input_text: m.get_one::<String>("input_text").cloned(),
            root: m.get_one::<String>("root").cloned(),
            partial: m.get_flag("partial"),
            index: m.get_one::<usize>("index").copied(),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunInput {
    fn from(p: RunParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            grammar_text: p.grammar_text,
            input_path: p.input_path,
            input_text: p.input_text,
            root: p.root,
            partial: p.partial,
            index: p.index,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ParseParams {
    pub run: RunParams,
    pub json: bool,
    pub compact: bool,
    // Note: verbose and no_result are parsed but not extracted (unified flags)
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            run: RunParams::from_matches(m),
            json: m.get_flag("json"),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            run: p.run.into(),
            json: p.json,
            pretty,
        }
    }
}

pub struct TraceParams {
    pub run: RunParams,
    pub verbose: u8,
    pub no_result: bool,
    // Note: json and compact are parsed but not extracted (unified flags)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            run: RunParams::from_matches(m),
            verbose: m.get_count("verbose"),
            no_result: m.get_flag("no_result"),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            run: p.run.into(),
            verbosity,
            no_result: p.no_result,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// With -g and a single positional, the positional is the input.
/// This enables: `thicket parse -g 'grammar ...' input.txt`
fn shift_positional_to_input(
    has_grammar_text: bool,
    grammar_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
) -> (Option<PathBuf>, Option<PathBuf>) {
    if has_grammar_text && grammar_path.is_some() && input_path.is_none() {
        (None, grammar_path)
    } else {
        (grammar_path, input_path)
    }
}
