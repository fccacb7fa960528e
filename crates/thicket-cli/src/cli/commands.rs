//! Command builders for the CLI.
//!
//! `parse` and `trace` share their inputs and accept each other's flags, with
//! the irrelevant ones hidden from `--help`.

use clap::Command;

use super::args::*;

/// Grammar input accepted by every command.
fn with_grammar_args(cmd: Command) -> Command {
    cmd.arg(grammar_path_arg()).arg(grammar_text_arg())
}

/// Input and runtime options shared by `parse` and `trace`.
fn with_run_args(cmd: Command) -> Command {
    with_grammar_args(cmd)
        .arg(input_path_arg())
        .arg(input_text_arg())
        .arg(root_arg())
        .arg(partial_arg())
        .arg(index_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("thicket")
        .about("PEG grammar compiler and backtracking parser")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(compile_command())
        .subcommand(dump_command())
        .subcommand(parse_command())
        .subcommand(trace_command())
}

/// Validate a grammar.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar")
        .override_usage(
            "\
  thicket check <GRAMMAR>
  thicket check -g <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  thicket check arith.thicket         # validate a file
  thicket check arith                 # tries arith.thicket, then arith.tkt
  thicket check arith --strict        # warnings are errors too"#,
        );

    with_grammar_args(cmd).arg(strict_arg()).arg(color_arg())
}

/// Generate Rust source from a grammar.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Generate Rust source from a grammar")
        .override_usage(
            "\
  thicket compile <GRAMMAR> [-o <FILE>]
  thicket compile <GRAMMAR> --stdout",
        )
        .after_help(
            r#"EXAMPLES:
  thicket compile arith.thicket            # writes arith.rs
  thicket compile arith -o src/arith.rs    # explicit destination
  thicket compile arith --stdout           # print instead of writing"#,
        );

    with_grammar_args(cmd)
        .arg(output_file_arg())
        .arg(stdout_arg())
        .arg(runtime_path_arg())
        .arg(no_alias_arg())
        .arg(color_arg())
}

/// Show the compiled program.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the compiled program")
        .override_usage(
            "\
  thicket dump <GRAMMAR> [--cst]
  thicket dump -g <TEXT> [--cst]",
        )
        .after_help(
            r#"EXAMPLES:
  thicket dump arith                  # rules and op table
  thicket dump arith --cst            # concrete syntax tree of the grammar"#,
        );

    with_grammar_args(cmd).arg(cst_arg()).arg(color_arg())
}

/// Parse input and print the syntax tree.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Parse input and print the syntax tree")
        .override_usage(
            "\
  thicket parse <GRAMMAR> <INPUT>
  thicket parse <GRAMMAR> -s <TEXT>
  thicket parse -g <TEXT> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  thicket parse arith input.txt           # parse a file
  thicket parse arith -s '1+2'            # inline input
  thicket parse arith -s '1+2 x' --partial
  thicket parse arith -s '1+2' --json     # JSON tree"#,
        );

    with_run_args(cmd)
        .arg(json_arg())
        .arg(compact_arg())
        .arg(verbose_arg().hide(true))
        .arg(no_result_arg().hide(true))
}

/// Trace parser execution for debugging.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace parser execution for debugging")
        .override_usage(
            "\
  thicket trace <GRAMMAR> <INPUT>
  thicket trace <GRAMMAR> -s <TEXT> [-v | -vv]",
        )
        .after_help(
            r#"EXAMPLES:
  thicket trace arith -s '1+2'            # rule calls and backtracks
  thicket trace arith -s '1+2' -v         # also terminals and predicates
  thicket trace arith -s '1+2' -vv        # also matched text"#,
        );

    with_run_args(cmd)
        .arg(verbose_arg())
        .arg(no_result_arg())
        .arg(json_arg().hide(true))
        .arg(compact_arg().hide(true))
}
