//! Compiled, name-resolved parser representation.

use serde::Serialize;
use thicket_core::{Interner, Symbol};

use crate::CharClass;
use crate::expr::quote_terminal;

/// Index into [`Program::ops`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExprId(pub(crate) u32);

impl ExprId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into [`Program::rules`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One operation in the flat op table.
///
/// Mirrors [`Expr`](crate::Expr) with children as ids, names interned and
/// rule references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Terminal(String),
    Class(CharClass),
    AnyChar,
    Sequence(Vec<ExprId>),
    Choice(Vec<ExprId>),
    Repetition { inner: ExprId, min: u32 },
    Optional(ExprId),
    Lookahead(ExprId),
    NegativeLookahead(ExprId),
    Predicate { hook: Symbol, negated: bool },
    Label { name: Symbol, inner: ExprId },
    Call(RuleId),
}

impl Op {
    /// Expected-string for terminal-like ops.
    pub fn describe(&self) -> Option<String> {
        match self {
            Op::Terminal(text) => Some(quote_terminal(text)),
            Op::Class(class) => Some(class.describe()),
            Op::AnyChar => Some("any character".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub name: String,
    pub body: ExprId,
}

/// A compiled grammar, immutable and shareable across parser handles.
#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) name: String,
    pub(crate) leading_comment_lines: Vec<String>,
    pub(crate) ops: Vec<Op>,
    pub(crate) rules: Vec<RuleEntry>,
    pub(crate) symbols: Interner,
}

impl Program {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn leading_comment_lines(&self) -> &[String] {
        &self.leading_comment_lines
    }

    #[inline]
    pub fn op(&self, id: ExprId) -> &Op {
        &self.ops[id.index()]
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    #[inline]
    pub fn rule(&self, id: RuleId) -> &RuleEntry {
        &self.rules[id.index()]
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &RuleEntry)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, r)| (RuleId(i as u32), r))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_by_name(&self, name: &str) -> Option<RuleId> {
        self.rules
            .iter()
            .position(|r| r.name == name)
            .map(|i| RuleId(i as u32))
    }

    /// First declared rule, if the grammar has any.
    pub fn default_root(&self) -> Option<RuleId> {
        (!self.rules.is_empty()).then_some(RuleId(0))
    }

    pub fn symbols(&self) -> &Interner {
        &self.symbols
    }

    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        self.symbols.resolve(sym)
    }

    /// Every predicate hook the program can evaluate, in first-use order.
    pub fn predicate_hooks(&self) -> Vec<&str> {
        let mut hooks: Vec<&str> = Vec::new();
        for op in &self.ops {
            if let Op::Predicate { hook, .. } = op {
                let text = self.resolve(*hook);
                if !hooks.contains(&text) {
                    hooks.push(text);
                }
            }
        }
        hooks
    }
}
