use thicket_core::Colors;

use crate::{CharClass, Expr, ProgramBuilder, dump};

#[test]
fn dump_choice_of_terminals() {
    let mut b = ProgramBuilder::new("Choice");
    let a = b.terminal("a");
    let bb = b.terminal("b");
    let c = b.terminal("c");
    let choice = b.choice(vec![a, bb, c]);
    b.rule("choice", choice);
    let program = b.finish().unwrap();

    insta::assert_snapshot!(dump(&program, Colors::OFF), @r"
    [grammar]
    name = Choice
    root = choice

    [rules]
    R0 choice = E3

    [code]
    E0  'a'
    E1  'b'
    E2  'c'
    E3  choice E0 E1 E2
    ");
}

#[test]
fn dump_labels_predicates_and_calls() {
    let mut b = ProgramBuilder::new("Test::Labels");
    b.leading_comment("# encoding: UTF-8");
    let main = b.declare_rule("main");
    let item = b.declare_rule("item");

    let body = b.add_expr(&Expr::seq([
        Expr::label("first", Expr::rule("item")),
        Expr::predicate("ok", false),
        Expr::label("rest", Expr::zero_or_more(Expr::rule("item"))),
    ]));
    b.define_rule(main, body);
    let class = b.class(CharClass::from_ranges(&[('a', 'z')], false));
    b.define_rule(item, class);
    let program = b.finish().unwrap();

    insta::assert_snapshot!(dump(&program, Colors::OFF), @r#"
    [grammar]
    name = Test::Labels
    root = main

    [comments]
    # encoding: UTF-8

    [symbols]
    S0 "first"
    S1 "ok"
    S2 "rest"

    [rules]
    R0 main = E6
    R1 item = E7

    [code]
    E0  call R1  ; item
    E1  label S0 E0  ; first
    E2  pred& S1  ; ok
    E3  call R1  ; item
    E4  repeat E3 min=0
    E5  label S2 E4  ; rest
    E6  seq E1 E2 E5
    E7  [a-z]
    "#);
}

#[test]
fn dump_colored_wraps_names() {
    let mut b = ProgramBuilder::new("Tiny");
    let t = b.terminal("x");
    b.rule("tiny", t);
    let program = b.finish().unwrap();

    let out = dump(&program, Colors::ON);
    assert!(out.contains("\x1b[34mtiny\x1b[0m"));
    assert!(out.contains("\x1b[32m'x'\x1b[0m"));
}
