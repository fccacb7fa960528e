//! Parser state and token-level operations shared by the productions.

use std::cell::Cell;

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Lookaheads allowed between two consumed tokens before the parser is
/// considered stuck.
const LOOKAHEAD_BUDGET: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

/// Optional countdown; `None` means unlimited.
#[derive(Clone, Copy, Debug, Default)]
struct Fuel {
    limit: Option<u32>,
    left: Option<u32>,
}

impl Fuel {
    fn new(limit: Option<u32>) -> Self {
        Self { limit, left: limit }
    }

    /// False once the budget is spent.
    fn burn(&mut self) -> bool {
        match &mut self.left {
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            }
            None => true,
        }
    }

    fn consumed(&self) -> u32 {
        match (self.limit, self.left) {
            (Some(limit), Some(left)) => limit - left,
            _ => 0,
        }
    }
}

/// Recursive-descent parser over a pre-lexed token stream.
///
/// Trivia is held back until the next node or token is emitted, so it ends
/// up inside the node that follows it.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    recursion_limit: Option<u32>,
    exec_fuel: Fuel,
    lookaheads_left: Cell<u32>,
    last_error_at: Option<TextSize>,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            recursion_limit: None,
            exec_fuel: Fuel::default(),
            lookaheads_left: Cell::new(LOOKAHEAD_BUDGET),
            last_error_at: None,
            fatal: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = Fuel::new(limit);
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        self.drain_trivia();
        if let Some(err) = self.fatal {
            return Err(err);
        }

        Ok(ParseResult {
            root: Root::from_green(self.builder.finish()),
            diagnostics: self.diagnostics,
            exec_fuel_consumed: self.exec_fuel.consumed(),
        })
    }

    fn fail(&mut self, err: Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
    }

    // Token inspection

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.buffer_trivia();
        self.tick_lookahead();
        self.tokens
            .get(self.pos)
            .map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.buffer_trivia();
        match self.tokens.get(self.pos) {
            Some(token) => token.span,
            None => TextRange::empty(TextSize::from(self.source.len() as u32)),
        }
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Whether the token after the current one (trivia skipped) is `kind`.
    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.buffer_trivia();
        self.tick_lookahead();
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(1)
            .is_some_and(|t| t.kind == kind)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// End of tokens (trailing trivia included) or a fatal error.
    pub(super) fn at_end(&mut self) -> bool {
        self.buffer_trivia();
        self.eof() || self.fatal.is_some()
    }

    // Tree building

    fn buffer_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.pending_trivia.push(*token);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in std::mem::take(&mut self.pending_trivia) {
            self.push_token(token);
        }
    }

    fn push_token(&mut self, token: Token) {
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at end of input");
        self.lookaheads_left.set(LOOKAHEAD_BUDGET);
        if !self.exec_fuel.burn() {
            self.fail(Error::ExecFuelExhausted);
        }

        self.drain_trivia();
        let token = self.tokens[self.pos];
        self.push_token(token);
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Productions dispatch on the current token before calling in.
    pub(super) fn assert_current(&mut self, expected: SyntaxKind) {
        let found = self.current();
        assert_eq!(
            found, expected,
            "broken parser invariant: expected {expected:?} but found {found:?}"
        );
    }

    // Recursion

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.recursion_limit.is_some_and(|limit| self.depth >= limit) {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        self.lookaheads_left.set(LOOKAHEAD_BUDGET);
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.lookaheads_left.set(LOOKAHEAD_BUDGET);
    }

    fn tick_lookahead(&self) {
        let left = self.lookaheads_left.get();
        assert!(left != 0, "parser is stuck: too many lookaheads");
        self.lookaheads_left.set(left - 1);
    }

    // Diagnostics

    /// One diagnostic per source position; later ones at the same spot are
    /// cascades.
    fn claim_error_position(&mut self, at: TextSize) -> bool {
        let fresh = self.last_error_at != Some(at);
        self.last_error_at = Some(at);
        fresh
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if self.claim_error_position(range.start()) {
            self.diagnostics.report(kind, range).emit();
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if self.claim_error_position(range.start()) {
            self.diagnostics.report(kind, range).message(message).emit();
        }
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Report, then wrap everything up to a recovery token in one `Error` node.
    pub(super) fn error_recover(&mut self, kind: DiagnosticKind, message: &str, recovery: TokenSet) {
        if self.currently_is_one_of(recovery) || self.at_end() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        while !self.currently_is_one_of(recovery) && !self.at_end() {
            self.bump();
        }
        self.finish_node();
    }

    /// Swallow the remaining input into a single `Error` node.
    pub(super) fn bump_rest_as_error(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.eof() && self.fatal.is_none() {
            self.bump();
        }
        self.finish_node();
    }

    /// Report a construct opened at `open` that never closed. The diagnostic
    /// spans from the opener to the current token.
    pub(super) fn error_unclosed(
        &mut self,
        kind: DiagnosticKind,
        related_msg: impl Into<String>,
        open: TextRange,
    ) {
        let current = self.current_span();
        if !self.claim_error_position(current.start()) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::new(open.start(), current.end()))
            .related_to(related_msg, open)
            .emit();
    }
}
