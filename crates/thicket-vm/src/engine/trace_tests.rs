use std::sync::Arc;

use indoc::indoc;
use thicket_core::Colors;

use crate::test_utils::parser;
use crate::{ParseOptions, PrintTracer, Verbosity};

const GRAMMAR: &str = indoc! {"
    grammar T
      rule a
        'x' b / 'x' 'y'
      end

      rule b
        'z'
      end
    end
"};

fn trace(grammar: &str, input: &str, verbosity: Verbosity) -> String {
    let mut parser = parser(grammar);
    let program = Arc::clone(parser.program());
    let mut tracer = PrintTracer::new(input, &program, verbosity, Colors::OFF);
    parser
        .parse_with(input, ParseOptions::new(), &mut tracer)
        .expect("no runtime error");
    trimmed(&tracer)
}

fn trimmed(tracer: &PrintTracer<'_>) -> String {
    tracer
        .lines()
        .iter()
        .map(|line| line.trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn default_verbosity_shows_calls_and_backtracks() {
    insta::assert_snapshot!(trace(GRAMMAR, "xy", Verbosity::Default), @r"
    0 ▶ (a)
    1 ▶   (b)
    1 ○   (b)
    0 ❮❮❮
    2 ◀ (a) 0..2
    ");
}

#[test]
fn verbose_shows_terminals() {
    insta::assert_snapshot!(trace(GRAMMAR, "xy", Verbosity::Verbose), @r"
    0 ▶ (a)
    0 ●   'x'
    1 ▶   (b)
    1 ○     'z'
    1 ○   (b)
    0 ❮❮❮
    0 ●   'x'
    1 ●   'y'
    2 ◀ (a) 0..2
    ");
}

#[test]
fn very_verbose_shows_text() {
    let grammar = indoc! {"
        grammar T
          rule a
            [a-z]+ &{ ok }
          end
        end
    "};
    let mut parser = parser(grammar);
    parser.bind_predicate("ok", |_| Ok(true));
    let program = Arc::clone(parser.program());
    let mut tracer = PrintTracer::new("ab", &program, Verbosity::VeryVerbose, Colors::OFF);
    parser
        .parse_with("ab", ParseOptions::new(), &mut tracer)
        .unwrap();

    insta::assert_snapshot!(trimmed(&tracer), @r#"
    0 ▶ (a)
    0 ●   [a-z] "a"
    1 ●   [a-z] "b"
    2 ○   [a-z]
    2 ●   &{ ok }
    2 ◀ (a) 0..2 "ab"
    "#);
}

#[test]
fn tracing_does_not_change_the_result() {
    let mut plain = parser(GRAMMAR);
    let mut traced = plain.clone();
    let program = Arc::clone(traced.program());
    let mut tracer = PrintTracer::new("xy", &program, Verbosity::Verbose, Colors::ON);

    let expected = plain.parse("xy", ParseOptions::new()).unwrap().unwrap();
    let actual = traced
        .parse_with("xy", ParseOptions::new(), &mut tracer)
        .unwrap()
        .unwrap();
    assert_eq!(expected.render(Colors::OFF), actual.render(Colors::OFF));
    assert!(tracer.output().contains("\x1b[34ma\x1b[0m"));
}
