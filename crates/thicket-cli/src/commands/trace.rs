//! Trace parser execution for debugging.

use std::sync::Arc;

use thicket::Colors;
use thicket::vm::{PrintTracer, Verbosity};

use super::run_common::{self, PreparedParser, RunInput};

pub struct TraceArgs {
    pub run: RunInput,
    pub verbosity: Verbosity,
    pub no_result: bool,
}

pub fn run(args: TraceArgs) {
    let PreparedParser {
        mut parser,
        input,
        options,
    } = run_common::prepare(&args.run);
    let colors = Colors::new(args.run.color);

    let program = Arc::clone(parser.program());
    let mut tracer = PrintTracer::new(&input, &program, args.verbosity, colors);
    let result = parser.parse_with(&input, options, &mut tracer);
    tracer.print();

    match result {
        Ok(Some(tree)) => {
            if args.no_result {
                return;
            }
            println!("{}---{}", colors.dim, colors.reset);
            print!("{}", tree.render(colors));
        }
        Ok(None) => {
            if let Some(reason) = parser.failure_reason() {
                eprintln!("error: {}", reason);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("runtime error: {}", e);
            std::process::exit(2);
        }
    }
}
