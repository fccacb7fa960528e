//! Parse input and print the syntax tree.

use serde::Serialize;
use thicket::Colors;
use thicket::vm::{CompiledParser, TerminalFailure};

use super::run_common::{self, PreparedParser, RunInput};

pub struct ParseArgs {
    pub run: RunInput,
    pub json: bool,
    pub pretty: bool,
}

/// JSON shape of a failed parse.
#[derive(Serialize)]
struct FailureOutput<'a> {
    reason: Option<String>,
    index: Option<usize>,
    line: Option<usize>,
    column: Option<usize>,
    expected: &'a [TerminalFailure],
}

impl<'a> FailureOutput<'a> {
    fn new(parser: &'a CompiledParser) -> Self {
        Self {
            reason: parser.failure_reason(),
            index: parser.failure_index(),
            line: parser.failure_line(),
            column: parser.failure_column(),
            expected: parser.terminal_failures(),
        }
    }
}

pub fn run(args: ParseArgs) {
    let PreparedParser {
        mut parser,
        input,
        options,
    } = run_common::prepare(&args.run);
    let colors = Colors::new(args.run.color);

    match parser.parse(&input, options) {
        Ok(Some(tree)) => {
            if args.json {
                print_json(&tree, args.pretty);
            } else {
                print!("{}", tree.render(colors));
            }
        }
        Ok(None) => {
            if args.json {
                print_json(&FailureOutput::new(&parser), args.pretty);
            }
            match parser.failure_reason() {
                Some(reason) => eprintln!("error: {}", reason),
                None => eprintln!("error: no match"),
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("runtime error: {}", e);
            std::process::exit(2);
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: failed to serialize output: {}", e);
            std::process::exit(2);
        }
    }
}
