//! The checked-in generated parser must stay in sync with the emitter and
//! behave exactly like the interpreted program.

use thicket::vm::ParseOptions;
use thicket::{Colors, RustConfig};

mod greeting {
    #![allow(dead_code)]
    include!("generated/greeting.rs");
}

const SOURCE: &str = include_str!("generated/greeting.thicket");
const GENERATED: &str = include_str!("generated/greeting.rs");

#[test]
fn checked_in_output_is_current() {
    let out = thicket::compile_to_rust(SOURCE, &RustConfig::new()).unwrap();
    assert_eq!(out, GENERATED);
}

#[test]
fn generated_program_matches_lowered() {
    let generated = greeting::greeting_program().unwrap();
    let lowered = thicket::compiler::lower(&thicket::compile_grammar(SOURCE).unwrap()).unwrap();

    assert_eq!(
        thicket::ir::dump(&generated, Colors::OFF),
        thicket::ir::dump(&lowered, Colors::OFF)
    );
}

#[test]
fn generated_parser_behaves_like_interpreted() {
    let mut generated = greeting::GreetingParser::new().unwrap();
    let mut interpreted = thicket::compile(SOURCE).unwrap();

    for input in ["hello world", "hello  x", "hello", "hello World", "hi there"] {
        let a = generated.parse_greeting(input).unwrap();
        let b = interpreted.parse(input, ParseOptions::new()).unwrap();
        assert_eq!(
            a.map(|t| t.render(Colors::OFF)),
            b.map(|t| t.render(Colors::OFF)),
            "input: {input:?}"
        );
        assert_eq!(generated.failure_reason(), interpreted.failure_reason());
    }
}

#[test]
fn rule_methods_and_nested_alias() {
    let mut parser: greeting::greeting::Parser = greeting::GreetingParser::new().unwrap();

    let tree = parser.parse_name("abc").unwrap().unwrap();
    assert_eq!(tree.root().rule_name(), Some("name"));

    // Per-rule methods leave the sticky root alone.
    assert_eq!(parser.root(), Some("greeting"));
    assert!(parser.parse_greeting("abc").unwrap().is_none());
}
