use indoc::indoc;
use thicket_ir::{Expr, Grammar};

use super::left_recursive_rules;
use crate::{Error, GrammarBuilder};

#[test]
fn valid_grammar_keeps_declaration_order() {
    let grammar = GrammarBuilder::expect_valid(indoc! {"
        grammar Arith
          rule sum
            num ('+' num)*
          end
          rule num
            [0-9]+
          end
        end
    "});

    let names: Vec<_> = grammar.rules().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["sum", "num"]);
    assert_eq!(grammar.default_root().map(|r| r.name.as_str()), Some("sum"));
}

#[test]
fn duplicate_rule() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_invalid("grammar G rule a 'x' end rule a 'y' end end"),
        @"error at 30..31: `a` is already defined (related: first defined here at 15..16)"
    );
}

#[test]
fn undefined_rule() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_invalid("grammar G rule a b end end"),
        @"error at 17..18: `b` is not defined"
    );
}

#[test]
fn duplicate_label_in_sequence() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_invalid("grammar G rule a x:'a' x:'b' end end"),
        @"error at 23..24: label `x` is used more than once in this sequence (related: first used here at 17..18)"
    );
}

#[test]
fn same_label_in_different_sequences_is_fine() {
    GrammarBuilder::expect_valid("grammar G rule a x:'a' 'b' / x:'c' 'd' end end");
}

#[test]
fn direct_left_recursion_warns() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_warnings("grammar G rule e e '+' 'n' / 'n' end end"),
        @"warning at 15..16: rule `e` is left-recursive and will never match"
    );
}

#[test]
fn indirect_left_recursion_through_nullable_prefix() {
    let grammar = Grammar::new("G")
        .with_rule("a", Expr::seq([Expr::rule("b"), Expr::terminal("x")]))
        .with_rule(
            "b",
            Expr::seq([Expr::optional(Expr::terminal("y")), Expr::rule("a")]),
        )
        .with_rule("c", Expr::seq([Expr::terminal("z"), Expr::rule("c")]));

    assert_eq!(left_recursive_rules(&grammar), ["a", "b"]);
}

#[test]
fn right_recursion_is_fine() {
    let analyzed = GrammarBuilder::new("grammar G rule a 'x' a / 'x' end end")
        .parse()
        .unwrap()
        .analyze()
        .unwrap();
    assert!(analyzed.diagnostics().is_empty());
}

#[test]
fn empty_grammar_warns() {
    insta::assert_snapshot!(
        GrammarBuilder::expect_warnings("grammar G end"),
        @"warning at 0..7: grammar has no rules"
    );
}

#[test]
fn syntax_errors_stop_before_analysis() {
    let result = GrammarBuilder::new("grammar G rule a end end")
        .parse()
        .unwrap()
        .analyze();
    assert!(matches!(result, Err(Error::GrammarSyntaxError(_))));
}

#[test]
fn analysis_errors_are_reported_together() {
    let err = GrammarBuilder::new("grammar G rule a b c end end")
        .parse()
        .unwrap()
        .analyze()
        .unwrap()
        .into_grammar()
        .unwrap_err();

    assert!(matches!(err, Error::GrammarAnalyzeError(_)));
    assert_eq!(err.to_string(), "grammar analysis failed with 2 errors");
}
