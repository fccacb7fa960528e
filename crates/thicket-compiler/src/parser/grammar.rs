//! Grammar productions for the grammar language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{EXPR_FIRST, QUANTIFIERS, RULE_RECOVERY, SEQ_END};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        if self.currently_is(SyntaxKind::KwGrammar) {
            self.parse_grammar();
        } else {
            self.error(DiagnosticKind::ExpectedGrammar);
        }

        if !self.at_end() {
            self.error(DiagnosticKind::TrailingInput);
            self.bump_rest_as_error();
        }

        self.drain_trivia();
        self.finish_node();
    }

    /// `grammar Name [do] rule* end`
    fn parse_grammar(&mut self) {
        self.assert_current(SyntaxKind::KwGrammar);
        self.start_node(SyntaxKind::Grammar);
        let open = self.current_span();
        self.bump();

        self.parse_grammar_name();
        self.eat_token(SyntaxKind::KwDo);

        loop {
            if self.at_end() {
                self.error_unclosed(DiagnosticKind::UnclosedGrammar, "grammar starts here", open);
                break;
            }
            match self.current() {
                SyntaxKind::KwRule => self.parse_rule(),
                SyntaxKind::KwEnd => {
                    self.bump();
                    break;
                }
                _ => self.error_and_bump_msg(
                    DiagnosticKind::UnexpectedToken,
                    "expected `rule` or `end`",
                ),
            }
        }

        self.finish_node();
    }

    /// `Id (:: Id)*`
    fn parse_grammar_name(&mut self) {
        if !self.currently_is(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedGrammarName);
            return;
        }

        self.start_node(SyntaxKind::GrammarName);
        self.bump();
        while self.currently_is(SyntaxKind::DoubleColon) {
            self.bump();
            if !self.eat_token(SyntaxKind::Id) {
                self.error(DiagnosticKind::ExpectedGrammarName);
                break;
            }
        }
        self.finish_node();
    }

    /// `rule Id [do] expr end`
    fn parse_rule(&mut self) {
        self.assert_current(SyntaxKind::KwRule);
        self.start_node(SyntaxKind::Rule);
        let open = self.current_span();
        self.bump();

        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedRuleName);
        }
        self.eat_token(SyntaxKind::KwDo);

        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_choice();
        } else {
            self.error_msg(DiagnosticKind::ExpectedExpression, "rule body is missing");
        }

        loop {
            if self.at_end() {
                self.error_unclosed(DiagnosticKind::UnclosedRule, "rule starts here", open);
                break;
            }
            match self.current() {
                SyntaxKind::KwEnd => {
                    self.bump();
                    break;
                }
                SyntaxKind::KwRule => {
                    self.error_unclosed(DiagnosticKind::UnclosedRule, "rule starts here", open);
                    break;
                }
                _ => self.error_recover(
                    DiagnosticKind::UnexpectedToken,
                    "expected `end`",
                    RULE_RECOVERY,
                ),
            }
        }

        self.finish_node();
    }

    /// `seq (/ seq)*`, wrapped in `Choice` only when a `/` is present.
    fn parse_choice(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_sequence();

        if !self.currently_is(SyntaxKind::Slash) {
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::Choice);
        while self.currently_is(SyntaxKind::Slash) {
            self.bump();
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_sequence();
            } else {
                self.error_msg(DiagnosticKind::ExpectedExpression, "alternative after `/`");
            }
        }
        self.finish_node();
    }

    /// `prefixed+`, wrapped in `Seq` only when there is more than one item.
    fn parse_sequence(&mut self) {
        let checkpoint = self.checkpoint();
        let mut count = 0usize;

        loop {
            if self.at_end() || self.currently_is_one_of(SEQ_END) {
                break;
            }
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_prefixed();
                count += 1;
            } else {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected an expression");
            }
        }

        if count > 1 {
            self.start_node_at(checkpoint, SyntaxKind::Seq);
            self.finish_node();
        }
    }

    /// `&expr` | `!expr` | `&{ hook }` | `!{ hook }` | `label:expr` | postfix
    fn parse_prefixed(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::Amp | SyntaxKind::Bang if self.next_is(SyntaxKind::Block) => {
                self.start_node(SyntaxKind::Predicate);
                self.bump();
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Amp | SyntaxKind::Bang => {
                self.start_node(SyntaxKind::Lookahead);
                self.bump();
                self.parse_operand("lookahead");
                self.finish_node();
            }
            SyntaxKind::Id if self.next_is(SyntaxKind::Colon) => {
                self.start_node(SyntaxKind::Label);
                self.bump();
                self.bump();
                self.parse_operand("label");
                self.finish_node();
            }
            _ => self.parse_postfix(),
        }

        self.exit_recursion();
    }

    fn parse_operand(&mut self, what: &str) {
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_prefixed();
        } else {
            self.error_msg(
                DiagnosticKind::ExpectedExpression,
                format!("{what} needs an operand"),
            );
        }
    }

    /// `primary (* | + | ?)*`
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();

        while self.currently_is_one_of(QUANTIFIERS) {
            self.start_node_at(checkpoint, SyntaxKind::Quantifier);
            self.bump();
            self.finish_node();
        }
    }

    fn parse_primary(&mut self) {
        match self.current() {
            SyntaxKind::Id => self.bump_single(SyntaxKind::Ref),
            SyntaxKind::Class => self.bump_single(SyntaxKind::CharClass),
            SyntaxKind::Dot => self.bump_single(SyntaxKind::Any),
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => self.parse_str(),
            SyntaxKind::ParenOpen => self.parse_group(),
            _ => self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected an expression"),
        }
    }

    fn bump_single(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// Quote, optional content, matching quote. The lexer guarantees the closing quote.
    fn parse_str(&mut self) {
        self.start_node(SyntaxKind::Str);
        let quote = self.current();
        self.bump();
        self.eat_token(SyntaxKind::StrVal);
        self.eat_token(quote);
        self.finish_node();
    }

    /// `( choice )`
    fn parse_group(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::Group);
        let open = self.current_span();
        self.bump();

        if self.currently_is(SyntaxKind::ParenClose) {
            self.error(DiagnosticKind::EmptyGroup);
            self.bump();
            self.finish_node();
            return;
        }

        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_choice();
        }

        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed(DiagnosticKind::UnclosedGroup, "group starts here", open);
        }
        self.finish_node();
    }
}
