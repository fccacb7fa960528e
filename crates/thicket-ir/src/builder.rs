//! Incremental construction of a [`Program`].
//!
//! Rules are declared before (or while) their bodies are built, so a rule
//! reference resolves to a `RuleId` immediately even when the referenced rule
//! is defined later. [`ProgramBuilder::finish`] rejects rules that were
//! referenced but never defined.

use thicket_core::Interner;

use crate::program::{ExprId, Op, Program, RuleEntry, RuleId};
use crate::{BuildError, CharClass, Expr};

#[derive(Debug)]
struct PendingRule {
    name: String,
    body: Option<ExprId>,
}

/// Builder for [`Program`]. Children must be built before their parents.
#[derive(Debug)]
pub struct ProgramBuilder {
    name: String,
    leading_comment_lines: Vec<String>,
    ops: Vec<Op>,
    rules: Vec<PendingRule>,
    symbols: Interner,
    duplicate: Option<String>,
}

impl ProgramBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leading_comment_lines: Vec::new(),
            ops: Vec::new(),
            rules: Vec::new(),
            symbols: Interner::new(),
            duplicate: None,
        }
    }

    pub fn leading_comment(&mut self, line: impl Into<String>) -> &mut Self {
        self.leading_comment_lines.push(line.into());
        self
    }

    /// Declare a rule by name. Declaring the same name twice returns the same id.
    ///
    /// Declaration order is rule order; the first declared rule is the default root.
    pub fn declare_rule(&mut self, name: &str) -> RuleId {
        if let Some(i) = self.rules.iter().position(|r| r.name == name) {
            return RuleId(i as u32);
        }
        self.rules.push(PendingRule {
            name: name.to_string(),
            body: None,
        });
        RuleId(self.rules.len() as u32 - 1)
    }

    /// Attach a body to a declared rule.
    pub fn define_rule(&mut self, rule: RuleId, body: ExprId) {
        let pending = &mut self.rules[rule.index()];
        if pending.body.is_some() {
            self.duplicate.get_or_insert_with(|| pending.name.clone());
            return;
        }
        pending.body = Some(body);
    }

    /// Declare and define in one step.
    pub fn rule(&mut self, name: &str, body: ExprId) -> RuleId {
        let id = self.declare_rule(name);
        self.define_rule(id, body);
        id
    }

    fn push(&mut self, op: Op) -> ExprId {
        self.ops.push(op);
        ExprId(self.ops.len() as u32 - 1)
    }

    pub fn terminal(&mut self, text: impl Into<String>) -> ExprId {
        self.push(Op::Terminal(text.into()))
    }

    pub fn class(&mut self, class: CharClass) -> ExprId {
        self.push(Op::Class(class))
    }

    pub fn any_char(&mut self) -> ExprId {
        self.push(Op::AnyChar)
    }

    pub fn sequence(&mut self, items: Vec<ExprId>) -> ExprId {
        self.push(Op::Sequence(items))
    }

    pub fn choice(&mut self, alternatives: Vec<ExprId>) -> ExprId {
        self.push(Op::Choice(alternatives))
    }

    pub fn repetition(&mut self, inner: ExprId, min: u32) -> ExprId {
        self.push(Op::Repetition { inner, min })
    }

    pub fn zero_or_more(&mut self, inner: ExprId) -> ExprId {
        self.repetition(inner, 0)
    }

    pub fn one_or_more(&mut self, inner: ExprId) -> ExprId {
        self.repetition(inner, 1)
    }

    pub fn optional(&mut self, inner: ExprId) -> ExprId {
        self.push(Op::Optional(inner))
    }

    pub fn lookahead(&mut self, inner: ExprId) -> ExprId {
        self.push(Op::Lookahead(inner))
    }

    pub fn negative_lookahead(&mut self, inner: ExprId) -> ExprId {
        self.push(Op::NegativeLookahead(inner))
    }

    pub fn predicate(&mut self, hook: &str, negated: bool) -> ExprId {
        let hook = self.symbols.intern(hook);
        self.push(Op::Predicate { hook, negated })
    }

    pub fn label(&mut self, name: &str, inner: ExprId) -> ExprId {
        let name = self.symbols.intern(name);
        self.push(Op::Label { name, inner })
    }

    pub fn call(&mut self, rule: RuleId) -> ExprId {
        self.push(Op::Call(rule))
    }

    /// Reference a rule by name, declaring it if needed.
    pub fn rule_ref(&mut self, name: &str) -> ExprId {
        let rule = self.declare_rule(name);
        self.call(rule)
    }

    /// Flatten an expression tree into ops, returning the id of its root.
    pub fn add_expr(&mut self, expr: &Expr) -> ExprId {
        match expr {
            Expr::Terminal(text) => self.terminal(text.as_str()),
            Expr::Class(class) => self.class(class.clone()),
            Expr::AnyChar => self.any_char(),
            Expr::Sequence(items) => {
                let items = items.iter().map(|e| self.add_expr(e)).collect();
                self.sequence(items)
            }
            Expr::Choice(alternatives) => {
                let alternatives = alternatives.iter().map(|e| self.add_expr(e)).collect();
                self.choice(alternatives)
            }
            Expr::Repetition { inner, min } => {
                let inner = self.add_expr(inner);
                self.repetition(inner, *min)
            }
            Expr::Optional(inner) => {
                let inner = self.add_expr(inner);
                self.optional(inner)
            }
            Expr::Lookahead(inner) => {
                let inner = self.add_expr(inner);
                self.lookahead(inner)
            }
            Expr::NegativeLookahead(inner) => {
                let inner = self.add_expr(inner);
                self.negative_lookahead(inner)
            }
            Expr::Predicate { hook, negated } => self.predicate(hook, *negated),
            Expr::Label { name, inner } => {
                let inner = self.add_expr(inner);
                self.label(name, inner)
            }
            Expr::RuleRef(name) => self.rule_ref(name),
        }
    }

    pub fn finish(self) -> Result<Program, BuildError> {
        if let Some(name) = self.duplicate {
            return Err(BuildError::DuplicateRule(name));
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for pending in self.rules {
            let Some(body) = pending.body else {
                return Err(BuildError::UndefinedRule(pending.name));
            };
            rules.push(RuleEntry {
                name: pending.name,
                body,
            });
        }

        Ok(Program {
            name: self.name,
            leading_comment_lines: self.leading_comment_lines,
            ops: self.ops,
            rules,
            symbols: self.symbols,
        })
    }
}
