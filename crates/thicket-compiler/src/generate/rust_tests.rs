use indoc::indoc;

use super::{RustConfig, emit_rust};
use crate::GrammarBuilder;

#[test]
fn nested_grammar_with_magic_comment() {
    let src = indoc! {r#"
        # encoding: UTF-8
        grammar Test::Grammar do
          rule foo do
            "foo"
          end
        end
    "#};

    insta::assert_snapshot!(GrammarBuilder::expect_valid_rust(src), @r##"
    # encoding: UTF-8
    // @generated by thicket from grammar `Test::Grammar`. Do not edit.

    pub mod test {
        /// Builds the compiled program for grammar `Test::Grammar`.
        pub fn grammar_program() -> Result<thicket::ir::Program, thicket::ir::BuildError> {
            let mut b = thicket::ir::ProgramBuilder::new("Test::Grammar");
            b.leading_comment("# encoding: UTF-8");
            let r0 = b.declare_rule("foo");
            let e0 = b.terminal("foo");
            b.define_rule(r0, e0);
            b.finish()
        }

        #[derive(Clone)]
        pub struct GrammarParser(thicket::vm::CompiledParser);

        impl GrammarParser {
            pub fn new() -> Result<Self, thicket::ir::BuildError> {
                Ok(Self(thicket::vm::CompiledParser::new(grammar_program()?)))
            }

            pub fn parse_foo<'i>(&mut self, input: &'i str) -> Result<Option<thicket::vm::SyntaxTree<'i>>, thicket::vm::RuntimeError> {
                self.0.parse(input, thicket::vm::ParseOptions::new().root("foo"))
            }
        }

        impl std::ops::Deref for GrammarParser {
            type Target = thicket::vm::CompiledParser;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for GrammarParser {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        pub mod grammar {
            pub type Parser = super::GrammarParser;
        }
    }
    "##);
}

#[test]
fn coding_comment_is_first_line_verbatim() {
    let out = GrammarBuilder::expect_valid_rust("# coding: UTF-8\ngrammar G rule a 'a' end end");
    assert_eq!(out.lines().next(), Some("# coding: UTF-8"));

    let out = GrammarBuilder::expect_valid_rust(
        "// -*- coding: utf-8 -*-\ngrammar G rule a 'a' end end",
    );
    assert_eq!(out.lines().next(), Some("// -*- coding: utf-8 -*-"));
}

// `#` pragmas are copied as written and are not Rust; `//` pragmas keep the
// header made of line comments only.
#[test]
fn slash_pragma_header_is_all_line_comments() {
    let out = GrammarBuilder::expect_valid_rust(
        "// -*- coding: utf-8 -*-\ngrammar G rule a 'a' end end",
    );
    let header: Vec<&str> = out.lines().take_while(|l| !l.trim().is_empty()).collect();
    assert_eq!(
        header,
        [
            "// -*- coding: utf-8 -*-",
            "// @generated by thicket from grammar `G`. Do not edit.",
        ]
    );
}

#[test]
fn no_comment_starts_with_banner() {
    let out = GrammarBuilder::expect_valid_rust("grammar G rule a 'a' end end");
    assert!(out.starts_with("// @generated by thicket from grammar `G`."));
}

#[test]
fn flat_grammar_items_at_top_level() {
    let out = GrammarBuilder::expect_valid_rust("grammar Arith rule sum 'x' end end");
    assert!(out.contains("\npub fn arith_program()"));
    assert!(out.contains("\npub struct ArithParser(thicket::vm::CompiledParser);"));
    assert!(out.contains("\npub mod arith {\n    pub type Parser = super::ArithParser;\n}"));
    assert!(!out.contains("pub mod test"));
}

#[test]
fn every_op_kind_is_replayed() {
    let out = GrammarBuilder::expect_valid_rust(indoc! {"
        grammar G
          rule main
            x:[a-z] . (&'y' / !'z')? item+ item* &{ ok }
          end
          rule item
            'i'
          end
        end
    "});

    for expected in [
        "let r0 = b.declare_rule(\"main\");",
        "let r1 = b.declare_rule(\"item\");",
        "let e0 = b.class(thicket::ir::CharClass::new(\"a-z\", vec![thicket::ir::ClassRange::new('a', 'z')], false));",
        "let e1 = b.label(\"x\", e0);",
        "let e2 = b.any_char();",
        "let e3 = b.terminal(\"y\");",
        "let e4 = b.lookahead(e3);",
        "let e5 = b.terminal(\"z\");",
        "let e6 = b.negative_lookahead(e5);",
        "let e7 = b.choice(vec![e4, e6]);",
        "let e8 = b.optional(e7);",
        "let e9 = b.call(r1);",
        "let e10 = b.repetition(e9, 1);",
        "let e11 = b.call(r1);",
        "let e12 = b.repetition(e11, 0);",
        "let e13 = b.predicate(\"ok\", false);",
        "let e14 = b.sequence(vec![e1, e2, e8, e10, e12, e13]);",
        "let e15 = b.terminal(\"i\");",
        "b.define_rule(r0, e14);",
        "b.define_rule(r1, e15);",
        "pub fn parse_main<'i>",
        "pub fn parse_item<'i>",
    ] {
        assert!(out.contains(expected), "missing `{expected}` in:\n{out}");
    }
}

#[test]
fn config_changes_runtime_path_and_alias() {
    let grammar = GrammarBuilder::expect_valid("grammar G rule a 'a' end end");
    let config = RustConfig::new().runtime_path("::rt").nested_alias(false);
    let out = emit_rust(&grammar, &config).unwrap();

    assert!(out.contains("pub struct GParser(::rt::vm::CompiledParser);"));
    assert!(out.contains("let mut b = ::rt::ir::ProgramBuilder::new(\"G\");"));
    assert!(!out.contains("pub type Parser"));
}

#[test]
fn rule_names_become_snake_case_methods() {
    let out = GrammarBuilder::expect_valid_rust("grammar G rule TopLevel 'a' end end");
    assert!(out.contains("pub fn parse_top_level<'i>"));
    assert!(out.contains("ParseOptions::new().root(\"TopLevel\")"));
}
