//! The parsing-expression tree.
//!
//! An [`Expr`] is owned by the rule that declares it. Rule references are
//! plain names and are only resolved when a [`Program`](crate::Program) is
//! built, so rules may refer to rules declared later.

use std::fmt;

/// One parsing-expression operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Literal text, matched byte-for-byte.
    Terminal(String),
    /// One character in (or, if negated, not in) a set of ranges.
    Class(CharClass),
    /// Any single character.
    AnyChar,
    Sequence(Vec<Expr>),
    /// Ordered choice: first successful alternative wins.
    Choice(Vec<Expr>),
    /// Greedy repetition with a lower bound and no upper bound.
    Repetition { inner: Box<Expr>, min: u32 },
    Optional(Box<Expr>),
    Lookahead(Box<Expr>),
    NegativeLookahead(Box<Expr>),
    /// Host-bound boolean guard, keyed by the text between its braces.
    Predicate { hook: String, negated: bool },
    Label { name: String, inner: Box<Expr> },
    RuleRef(String),
}

impl Expr {
    pub fn terminal(text: impl Into<String>) -> Self {
        Self::Terminal(text.into())
    }

    pub fn rule(name: impl Into<String>) -> Self {
        Self::RuleRef(name.into())
    }

    pub fn seq(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    pub fn choice(alternatives: impl IntoIterator<Item = Expr>) -> Self {
        Self::Choice(alternatives.into_iter().collect())
    }

    pub fn zero_or_more(inner: Expr) -> Self {
        Self::Repetition {
            inner: Box::new(inner),
            min: 0,
        }
    }

    pub fn one_or_more(inner: Expr) -> Self {
        Self::Repetition {
            inner: Box::new(inner),
            min: 1,
        }
    }

    pub fn optional(inner: Expr) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn lookahead(inner: Expr) -> Self {
        Self::Lookahead(Box::new(inner))
    }

    pub fn not(inner: Expr) -> Self {
        Self::NegativeLookahead(Box::new(inner))
    }

    pub fn predicate(hook: impl Into<String>, negated: bool) -> Self {
        Self::Predicate {
            hook: hook.into(),
            negated,
        }
    }

    pub fn label(name: impl Into<String>, inner: Expr) -> Self {
        Self::Label {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Text recorded as the expected string when this expression fails.
    ///
    /// Only terminal-like expressions record failures; composites delegate.
    pub fn describe(&self) -> Option<String> {
        match self {
            Expr::Terminal(text) => Some(quote_terminal(text)),
            Expr::Class(class) => Some(class.describe()),
            Expr::AnyChar => Some("any character".to_string()),
            _ => None,
        }
    }

    /// Names of every rule referenced from this expression, in source order.
    pub fn rule_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::RuleRef(name) => out.push(name),
            Expr::Sequence(items) | Expr::Choice(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
            Expr::Repetition { inner, .. }
            | Expr::Optional(inner)
            | Expr::Lookahead(inner)
            | Expr::NegativeLookahead(inner)
            | Expr::Label { inner, .. } => inner.collect_refs(out),
            Expr::Terminal(_) | Expr::Class(_) | Expr::AnyChar | Expr::Predicate { .. } => {}
        }
    }

    /// Binding strength when rendered in grammar notation.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Choice(alts) if alts.len() > 1 => 0,
            Expr::Choice(alts) => alts.first().map_or(4, Expr::precedence),
            Expr::Sequence(items) if items.len() > 1 => 1,
            Expr::Sequence(items) => items.first().map_or(4, Expr::precedence),
            Expr::Lookahead(_) | Expr::NegativeLookahead(_) | Expr::Label { .. } => 2,
            Expr::Repetition { .. } | Expr::Optional(_) => 3,
            _ => 4,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_at(f, 0)?;
            return write!(f, ")");
        }

        match self {
            Expr::Terminal(text) => write!(f, "{}", quote_terminal(text)),
            Expr::Class(class) => write!(f, "{}", class.describe()),
            Expr::AnyChar => write!(f, "."),
            Expr::Sequence(items) if items.is_empty() => write!(f, "''"),
            Expr::Sequence(items) => fmt_joined(f, items, " ", 2),
            Expr::Choice(alts) if alts.is_empty() => write!(f, "''"),
            Expr::Choice(alts) => fmt_joined(f, alts, " / ", 1),
            Expr::Repetition { inner, min } => {
                inner.fmt_at(f, 4)?;
                match min {
                    0 => write!(f, "*"),
                    1 => write!(f, "+"),
                    n => write!(f, "{{{n},}}"),
                }
            }
            Expr::Optional(inner) => {
                inner.fmt_at(f, 4)?;
                write!(f, "?")
            }
            Expr::Lookahead(inner) => {
                write!(f, "&")?;
                inner.fmt_at(f, 2)
            }
            Expr::NegativeLookahead(inner) => {
                write!(f, "!")?;
                inner.fmt_at(f, 2)
            }
            Expr::Predicate { hook, negated } => {
                let sigil = if *negated { '!' } else { '&' };
                write!(f, "{sigil}{{ {hook} }}")
            }
            Expr::Label { name, inner } => {
                write!(f, "{name}:")?;
                inner.fmt_at(f, 2)
            }
            Expr::RuleRef(name) => write!(f, "{name}"),
        }
    }
}

fn fmt_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str, min: u8) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        item.fmt_at(f, min)?;
    }
    Ok(())
}

/// Renders in grammar notation, e.g. `'a' ('b' / c)* &{ check }`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

/// Single-quote a terminal the way failure messages show it.
///
/// ```
/// use thicket_ir::quote_terminal;
/// assert_eq!(quote_terminal("a"), "'a'");
/// assert_eq!(quote_terminal("it's\n"), r"'it\'s\n'");
/// ```
pub fn quote_terminal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Inclusive character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassRange {
    pub start: char,
    pub end: char,
}

impl ClassRange {
    pub fn new(start: char, end: char) -> Self {
        Self { start, end }
    }
}

/// Character class: a sorted set of ranges plus the bracket body as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    text: String,
    ranges: Vec<ClassRange>,
    negated: bool,
}

impl CharClass {
    /// `text` is the bracket body without the brackets or the leading `^`.
    /// Overlapping ranges are merged.
    pub fn new(text: impl Into<String>, mut ranges: Vec<ClassRange>, negated: bool) -> Self {
        ranges.sort();
        let mut merged: Vec<ClassRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }
        Self {
            text: text.into(),
            ranges: merged,
            negated,
        }
    }

    /// Build a class from ranges, rendering its bracket body.
    pub fn from_ranges(ranges: &[(char, char)], negated: bool) -> Self {
        let mut text = String::new();
        for &(start, end) in ranges {
            push_class_char(&mut text, start);
            if start != end {
                text.push('-');
                push_class_char(&mut text, end);
            }
        }
        let ranges = ranges
            .iter()
            .map(|&(start, end)| ClassRange::new(start, end))
            .collect();
        Self::new(text, ranges, negated)
    }

    pub fn contains(&self, c: char) -> bool {
        let inside = self
            .ranges
            .binary_search_by(|r| {
                if r.end < c {
                    std::cmp::Ordering::Less
                } else if r.start > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok();
        inside != self.negated
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ranges(&self) -> &[ClassRange] {
        &self.ranges
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Bracket form, e.g. `[a-z]` or `[^0-9]`.
    pub fn describe(&self) -> String {
        let caret = if self.negated { "^" } else { "" };
        format!("[{caret}{}]", self.text)
    }
}

fn push_class_char(out: &mut String, c: char) {
    match c {
        ']' | '\\' | '^' | '-' | '[' => {
            out.push('\\');
            out.push(c);
        }
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        c => out.push(c),
    }
}
