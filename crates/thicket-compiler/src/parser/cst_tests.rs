use indoc::indoc;

use super::{parse, print_cst};
use crate::Error;

fn cst(src: &str) -> String {
    let result = parse(src, None, None).unwrap();
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        result.diagnostics.printer().render()
    );
    print_cst(result.root.as_cst())
}

fn errors(src: &str) -> String {
    let result = parse(src, None, None).unwrap();
    assert!(result.diagnostics.has_errors(), "expected errors");
    result.diagnostics.printer().render()
}

#[test]
fn simple_grammar() {
    let src = indoc! {"
        grammar Foo
          rule a
            'a' b
          end
        end
    "};

    insta::assert_snapshot!(cst(src), @r#"
    Root
      Grammar
        KwGrammar "grammar"
        GrammarName
          Id "Foo"
        Rule
          KwRule "rule"
          Id "a"
          Seq
            Str
              SingleQuote "'"
              StrVal "a"
              SingleQuote "'"
            Ref
              Id "b"
          KwEnd "end"
        KwEnd "end"
    "#);
}

#[test]
fn nested_name_with_do_blocks() {
    let src = indoc! {r#"
        grammar Test::Grammar do
          rule foo do
            "foo"
          end
        end
    "#};

    insta::assert_snapshot!(cst(src), @r#"
    Root
      Grammar
        KwGrammar "grammar"
        GrammarName
          Id "Test"
          DoubleColon "::"
          Id "Grammar"
        KwDo "do"
        Rule
          KwRule "rule"
          Id "foo"
          KwDo "do"
          Str
            DoubleQuote "\""
            StrVal "foo"
            DoubleQuote "\""
          KwEnd "end"
        KwEnd "end"
    "#);
}

#[test]
fn choice_with_prefix_operators() {
    let src = "grammar G rule r x:a* / !b . &{ ok } end end";

    insta::assert_snapshot!(cst(src), @r#"
    Root
      Grammar
        KwGrammar "grammar"
        GrammarName
          Id "G"
        Rule
          KwRule "rule"
          Id "r"
          Choice
            Label
              Id "x"
              Colon ":"
              Quantifier
                Ref
                  Id "a"
                Star "*"
            Slash "/"
            Seq
              Lookahead
                Bang "!"
                Ref
                  Id "b"
              Any
                Dot "."
              Predicate
                Amp "&"
                Block "{ ok }"
          KwEnd "end"
        KwEnd "end"
    "#);
}

#[test]
fn quantified_group_with_class() {
    let src = "grammar G rule r ([a-z] / 'x')+ end end";

    insta::assert_snapshot!(cst(src), @r#"
    Root
      Grammar
        KwGrammar "grammar"
        GrammarName
          Id "G"
        Rule
          KwRule "rule"
          Id "r"
          Quantifier
            Group
              ParenOpen "("
              Choice
                CharClass
                  Class "[a-z]"
                Slash "/"
                Str
                  SingleQuote "'"
                  StrVal "x"
                  SingleQuote "'"
              ParenClose ")"
            Plus "+"
          KwEnd "end"
        KwEnd "end"
    "#);
}

#[test]
fn missing_grammar_declaration() {
    insta::assert_snapshot!(
        errors("rule a 'x' end"),
        @"error at 0..4: expected a `grammar` declaration"
    );
}

#[test]
fn unclosed_grammar() {
    insta::assert_snapshot!(
        errors("grammar G rule a 'x' end"),
        @"error at 0..24: missing `end` for grammar (related: grammar starts here at 0..7)"
    );
}

#[test]
fn stray_token_in_rule_body() {
    insta::assert_snapshot!(
        errors("grammar G rule a 'x' ) end end"),
        @"error at 21..22: unexpected token: expected `end`"
    );
}

#[test]
fn empty_group() {
    insta::assert_snapshot!(
        errors("grammar G rule a () end end"),
        @"error at 18..19: empty `()` is not allowed"
    );
}

#[test]
fn missing_rule_body() {
    insta::assert_snapshot!(
        errors("grammar G rule a end end"),
        @"error at 17..20: expected an expression: rule body is missing"
    );
}

#[test]
fn unclosed_group() {
    insta::assert_snapshot!(
        errors("grammar G rule a ('x' end end"),
        @"error at 17..25: missing closing `)` (related: group starts here at 17..18)"
    );
}

#[test]
fn tree_is_lossless_with_errors() {
    let src = "grammar G rule a 'x' ) ( end end";
    let result = parse(src, None, None).unwrap();
    assert_eq!(result.root.as_cst().text().to_string(), src);
}

#[test]
fn recursion_limit_is_fatal() {
    let result = parse("grammar G rule a ((('x'))) end end", None, Some(2));
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn exec_fuel_is_fatal() {
    let result = parse("grammar G rule a 'x' 'y' 'z' end end", Some(3), None);
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn exec_fuel_is_reported() {
    let result = parse("grammar G rule a 'x' end end", Some(100), None).unwrap();
    assert!(result.exec_fuel_consumed > 0);
}
