//! Lexer for the grammar language.
//!
//! Tokens carry spans only; text is sliced from the source on demand.
//! Runs of unrecognized characters collapse into one `Garbage` token.

use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    fn at(kind: SyntaxKind, start: usize, end: usize) -> Self {
        Self::new(kind, TextRange::new((start as u32).into(), (end as u32).into()))
    }
}

/// Tokenize `source`. String literals come out as quote, `StrVal`, quote.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut garbage_start: Option<usize> = None;

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        let Ok(kind) = result else {
            garbage_start.get_or_insert(span.start);
            continue;
        };

        if let Some(start) = garbage_start.take() {
            tokens.push(Token::at(SyntaxKind::Garbage, start, span.start));
        }

        match kind {
            SyntaxKind::StringLiteral => push_string_parts(source, span, &mut tokens),
            _ => tokens.push(Token::at(kind, span.start, span.end)),
        }
    }

    if let Some(start) = garbage_start {
        tokens.push(Token::at(SyntaxKind::Garbage, start, source.len()));
    }

    tokens
}

fn push_string_parts(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let Range { start, end } = span;
    let quote = match source.as_bytes()[start] {
        b'"' => SyntaxKind::DoubleQuote,
        _ => SyntaxKind::SingleQuote,
    };

    tokens.push(Token::at(quote, start, start + 1));
    // Empty strings have no value token.
    if end - start > 2 {
        tokens.push(Token::at(SyntaxKind::StrVal, start + 1, end - 1));
    }
    tokens.push(Token::at(quote, end - 1, end));
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
