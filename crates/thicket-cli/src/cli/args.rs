//! One builder per flag. Commands share definitions so `parse` and `trace`
//! accept each other's flags, hidden from help where they do nothing.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar file or bare name (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("grammar_path")
        .value_name("GRAMMAR")
        .value_parser(value_parser!(PathBuf))
        .help("Grammar file (extension may be omitted)")
}

/// Inline grammar text (-g/--grammar).
pub fn grammar_text_arg() -> Arg {
    Arg::new("grammar_text")
        .short('g')
        .long("grammar")
        .value_name("TEXT")
        .help("Inline grammar text")
}

/// Input file to parse (positional).
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Input file to parse (use \"-\" for stdin)")
}

/// Inline input text (-s/--source).
pub fn input_text_arg() -> Arg {
    Arg::new("input_text")
        .short('s')
        .long("source")
        .value_name("TEXT")
        .help("Inline input text")
}

pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// --strict
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Fail when the grammar has warnings")
}

/// Show the grammar CST instead of the compiled program (--cst).
pub fn cst_arg() -> Arg {
    Arg::new("cst")
        .long("cst")
        .action(ArgAction::SetTrue)
        .help("Show the grammar CST instead of the compiled program")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file (default: next to the grammar, as .rs)")
}

/// Print generated source instead of writing a file (--stdout).
pub fn stdout_arg() -> Arg {
    Arg::new("stdout")
        .long("stdout")
        .action(ArgAction::SetTrue)
        .conflicts_with("output")
        .help("Print generated source to stdout")
}

/// Runtime crate path used by generated code (--runtime-path).
pub fn runtime_path_arg() -> Arg {
    Arg::new("runtime_path")
        .long("runtime-path")
        .value_name("PATH")
        .help("Path of the runtime crate in generated code (default: thicket)")
}

/// Skip the nested `Parser` alias module (--no-alias).
pub fn no_alias_arg() -> Arg {
    Arg::new("no_alias")
        .long("no-alias")
        .action(ArgAction::SetTrue)
        .help("Don't emit the nested `Parser` alias module")
}

/// Root rule (--root).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .value_name("RULE")
        .help("Rule to start from (default: first rule)")
}

/// Accept a match that leaves input unconsumed (--partial).
pub fn partial_arg() -> Arg {
    Arg::new("partial")
        .long("partial")
        .action(ArgAction::SetTrue)
        .help("Accept a match that does not consume the whole input")
}

/// Start byte index (--index).
pub fn index_arg() -> Arg {
    Arg::new("index")
        .long("index")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Byte index to start parsing at")
}

/// Output JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output the tree as JSON")
}

pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for terminals, -vv for matched text)")
}

/// Skip printing the tree after the trace (--no-result).
pub fn no_result_arg() -> Arg {
    Arg::new("no_result")
        .long("no-result")
        .action(ArgAction::SetTrue)
        .help("Show the trace only")
}

/// Interpreter step budget; exhausting it is a runtime error.
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Maximum interpreter steps")
}
