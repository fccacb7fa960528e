//! Lowering of the typed AST into the grammar model.
//!
//! Strings are unescaped and character classes resolved to code point ranges here,
//! so malformed escapes and classes are reported by this pass.

use regex_syntax::hir::{Class, HirKind};
use rowan::{TextRange, TextSize};
use thicket_ir::{CharClass, ClassRange, Expr, Grammar, Rule};

use super::symbol_table::SymbolTable;
use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Root, ast};

pub fn build_grammar(root: &Root, symbols: &SymbolTable, diag: &mut Diagnostics) -> Grammar {
    let name = root
        .grammar()
        .and_then(|g| g.name())
        .map(|n| n.text())
        .unwrap_or_default();
    let mut grammar = Grammar::new(name).with_leading_comment_lines(root.leading_comments());

    let mut lower = Lower { diag };
    for (name, rule) in symbols.iter() {
        let body = match rule.body() {
            Some(body) => lower.expr(&body),
            None => Expr::seq([]),
        };
        grammar.add_rule(Rule::new(name, body));
    }
    grammar
}

struct Lower<'d> {
    diag: &'d mut Diagnostics,
}

impl Lower<'_> {
    fn expr(&mut self, expr: &ast::Expr) -> Expr {
        match expr {
            ast::Expr::Choice(choice) => {
                Expr::choice(choice.alternatives().map(|alt| self.expr(&alt)).collect::<Vec<_>>())
            }
            ast::Expr::Seq(seq) => {
                Expr::seq(seq.items().map(|item| self.expr(&item)).collect::<Vec<_>>())
            }
            ast::Expr::Quantifier(q) => {
                let inner = self.operand(q.inner());
                match q.operator().map(|t| t.kind()) {
                    Some(crate::parser::SyntaxKind::Plus) => Expr::one_or_more(inner),
                    Some(crate::parser::SyntaxKind::Question) => Expr::optional(inner),
                    _ => Expr::zero_or_more(inner),
                }
            }
            ast::Expr::Lookahead(la) => {
                let inner = self.operand(la.inner());
                if la.is_negative() {
                    Expr::not(inner)
                } else {
                    Expr::lookahead(inner)
                }
            }
            ast::Expr::Predicate(pred) => {
                Expr::predicate(pred.hook().unwrap_or_default(), pred.is_negative())
            }
            ast::Expr::Label(label) => {
                let name = label.name().map(|t| t.text().to_string()).unwrap_or_default();
                Expr::label(name, self.operand(label.inner()))
            }
            ast::Expr::Ref(r) => Expr::rule(r.name().map(|t| t.text().to_string()).unwrap_or_default()),
            ast::Expr::Str(s) => Expr::terminal(self.string(s)),
            ast::Expr::CharClass(c) => self.class(c),
            ast::Expr::Any(_) => Expr::AnyChar,
            ast::Expr::Group(g) => self.operand(g.inner()),
        }
    }

    /// Missing operands were already reported by the parser.
    fn operand(&mut self, expr: Option<ast::Expr>) -> Expr {
        match expr {
            Some(e) => self.expr(&e),
            None => Expr::seq([]),
        }
    }

    fn string(&mut self, s: &ast::Str) -> String {
        let raw = s.raw_value();
        match unescape(&raw) {
            Ok(value) => value,
            Err(bad) => {
                let base = s.value_range().start();
                let range = TextRange::new(
                    base + TextSize::from(bad.start as u32),
                    base + TextSize::from(bad.end as u32),
                );
                let escape = &raw[bad];
                self.diag
                    .report(DiagnosticKind::InvalidEscape, range)
                    .message(format!("`{escape}`"))
                    .emit();
                raw
            }
        }
    }

    fn class(&mut self, c: &ast::CharClass) -> Expr {
        let Some(token) = c.token() else {
            return Expr::AnyChar;
        };
        match parse_class(token.text()) {
            Ok(class) => Expr::Class(class),
            Err(reason) => {
                self.diag
                    .report(DiagnosticKind::InvalidCharClass, token.text_range())
                    .message(reason)
                    .emit();
                Expr::Class(CharClass::new("", Vec::new(), false))
            }
        }
    }
}

/// Process backslash escapes. On failure returns the byte range of the offending escape.
pub fn unescape(raw: &str) -> Result<String, std::ops::Range<usize>> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((at, esc)) = chars.next() else {
            return Err(start..raw.len());
        };
        let end = at + esc.len_utf8();
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' | '\'' | '"' => out.push(esc),
            'u' => {
                let rest = &raw[end..];
                let Some(body) = rest.strip_prefix('{') else {
                    return Err(start..end);
                };
                let Some(close) = body.find('}') else {
                    return Err(start..raw.len());
                };
                let escape_end = end + 1 + close + 1;
                let decoded = u32::from_str_radix(&body[..close], 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(start..escape_end)?;
                out.push(decoded);
                while chars.peek().is_some_and(|&(i, _)| i < escape_end) {
                    chars.next();
                }
            }
            _ => return Err(start..end),
        }
    }

    Ok(out)
}

/// Resolve `[...]` or `[^...]` into a [`CharClass`].
pub fn parse_class(text: &str) -> Result<CharClass, String> {
    let body = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| "missing brackets".to_string())?;
    let (negated, body) = match body.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    if body.is_empty() {
        return Err("class is empty".to_string());
    }

    let hir = regex_syntax::ParserBuilder::new()
        .build()
        .parse(&format!("[{body}]"))
        .map_err(|e| match e {
            regex_syntax::Error::Parse(e) => e.kind().to_string(),
            regex_syntax::Error::Translate(e) => e.kind().to_string(),
            _ => "unsupported class syntax".to_string(),
        })?;

    let ranges = match hir.kind() {
        HirKind::Class(Class::Unicode(cls)) => cls
            .ranges()
            .iter()
            .map(|r| ClassRange::new(r.start(), r.end()))
            .collect(),
        HirKind::Literal(lit) => std::str::from_utf8(&lit.0)
            .map_err(|_| "class is not valid UTF-8".to_string())?
            .chars()
            .map(|c| ClassRange::new(c, c))
            .collect(),
        _ => return Err("unsupported class syntax".to_string()),
    };

    Ok(CharClass::new(body, ranges, negated))
}
