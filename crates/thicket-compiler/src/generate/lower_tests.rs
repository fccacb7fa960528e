use thicket_ir::{BuildError, Expr, Grammar};

use super::lower;
use crate::GrammarBuilder;

#[test]
fn choice_of_terminals() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_valid_dump("grammar Choice rule choice 'a' / 'b' / 'c' end end"),
        @r"
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
    "
    );
}

#[test]
fn forward_reference_keeps_declaration_order() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_valid_dump("grammar G rule a b end rule b 'x' end end"),
        @r"
    [grammar]
    name = G
    root = a

    [rules]
    R0 a = E0
    R1 b = E1

    [code]
    E0  call R1  ; b
    E1  'x'
    "
    );
}

#[test]
fn labels_and_predicates_are_interned() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_valid_dump("# encoding: UTF-8\ngrammar G rule a n:[0-9] !{ big } end end"),
        @r#"
    [grammar]
    name = G
    root = a

    [comments]
    # encoding: UTF-8

    [symbols]
    S0 "n"
    S1 "big"

    [rules]
    R0 a = E3

    [code]
    E0  [0-9]
    E1  label S0 E0  ; n
    E2  pred! S1  ; big
    E3  seq E1 E2
    "#
    );
}

#[test]
fn undefined_reference_fails_to_build() {
    let grammar = Grammar::new("G").with_rule("a", Expr::rule("missing"));
    assert_eq!(
        lower(&grammar).unwrap_err(),
        BuildError::UndefinedRule("missing".to_string())
    );
}

#[test]
fn empty_grammar_has_no_root() {
    let program = lower(&Grammar::new("Empty")).unwrap();
    assert_eq!(program.rule_count(), 0);
    assert!(program.default_root().is_none());
}
