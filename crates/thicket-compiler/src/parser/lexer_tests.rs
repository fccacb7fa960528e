use super::cst::SyntaxKind;
use super::lexer::{lex, token_text};

fn snapshot(source: &str) -> String {
    lex(source)
        .iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| format!("{:?} {:?}", t.kind, token_text(source, t)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn grammar_header_and_rule() {
    insta::assert_snapshot!(snapshot("grammar Test::Grammar do rule a 'a' end end"), @r#"
    KwGrammar "grammar"
    Id "Test"
    DoubleColon "::"
    Id "Grammar"
    KwDo "do"
    KwRule "rule"
    Id "a"
    SingleQuote "'"
    StrVal "a"
    SingleQuote "'"
    KwEnd "end"
    KwEnd "end"
    "#);
}

#[test]
fn operators() {
    insta::assert_snapshot!(snapshot("x:a* / &b+ !c? ."), @r#"
    Id "x"
    Colon ":"
    Id "a"
    Star "*"
    Slash "/"
    Amp "&"
    Id "b"
    Plus "+"
    Bang "!"
    Id "c"
    Question "?"
    Dot "."
    "#);
}

#[test]
fn keywords_need_word_boundary() {
    insta::assert_snapshot!(snapshot("ending done rules"), @r#"
    Id "ending"
    Id "done"
    Id "rules"
    "#);
}

#[test]
fn string_with_escaped_quote() {
    insta::assert_snapshot!(snapshot(r#""a\"b""#), @r#"
    DoubleQuote "\""
    StrVal "a\\\"b"
    DoubleQuote "\""
    "#);
}

#[test]
fn empty_string_has_no_value_token() {
    insta::assert_snapshot!(snapshot("''"), @r#"
    SingleQuote "'"
    SingleQuote "'"
    "#);
}

#[test]
fn char_class_is_one_token() {
    insta::assert_snapshot!(snapshot(r"[a-z\]] [^0-9]"), @r#"
    Class "[a-z\\]]"
    Class "[^0-9]"
    "#);
}

#[test]
fn predicate_block_balances_braces() {
    insta::assert_snapshot!(snapshot("&{ check({x}) } a"), @r#"
    Amp "&"
    Block "{ check({x}) }"
    Id "a"
    "#);
}

#[test]
fn unclosed_block_is_garbage() {
    let tokens = lex("&{ open");
    assert_eq!(tokens[1].kind, SyntaxKind::Garbage);
}

#[test]
fn both_comment_styles_are_trivia() {
    let tokens = lex("# encoding: UTF-8\n// note\na");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::LineComment,
            SyntaxKind::Newline,
            SyntaxKind::LineComment,
            SyntaxKind::Newline,
            SyntaxKind::Id,
        ]
    );
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("a @@@ b"), @r#"
    Id "a"
    Garbage "@@@"
    Id "b"
    "#);
}
