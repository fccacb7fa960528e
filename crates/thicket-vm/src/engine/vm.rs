//! Backtracking interpreter over a compiled [`Program`].
//!
//! Plain recursive descent without memoization. Every evaluation that fails
//! leaves the node arena exactly as it found it, so a failed alternative can
//! never leak nodes (or parent links) into the tree that finally succeeds.

use thicket_core::Symbol;
use thicket_ir::{ExprId, Op, Program, RuleId};

use super::error::RuntimeError;
use super::failure::{Expected, FailureSet};
use super::predicate::{MatchEnv, PredicateFn};
use super::trace::Tracer;
use super::tree::{NodeData, NodeId, NodeKind};

/// Runtime limits for parser execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuelLimits {
    /// Maximum expression evaluations per parse (default: unlimited).
    pub(crate) exec_fuel: Option<u32>,
    /// Maximum nesting of expression evaluations, rule calls included
    /// (default: [`DEFAULT_RECURSION_LIMIT`]).
    pub(crate) recursion_limit: u32,
}

/// Nesting depth the interpreter allows by default.
///
/// Every nested evaluation is a native stack frame, so this bounds stack use:
/// it stays within a 2 MiB thread stack in unoptimized builds. A rule call
/// costs one level per operator between the call and the next call, e.g.
/// three for `'(' l? ')'`.
pub const DEFAULT_RECURSION_LIMIT: u32 = 512;

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Remove the execution fuel limit.
    pub fn unlimited_exec_fuel(mut self) -> Self {
        self.exec_fuel = None;
        self
    }

    /// Set the nesting limit. Raising it far above the default needs a
    /// thread with a larger stack.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// A match: the node built and the position after it.
type Match = Option<(NodeId, usize)>;

/// What a finished run leaves behind.
pub(crate) struct Outcome {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: Match,
    pub(crate) failures: FailureSet,
}

/// Interpreter state for one parse.
pub(crate) struct VM<'p, 'i> {
    program: &'p Program,
    input: &'i str,
    /// Bound predicate callables, indexed by symbol.
    predicates: Vec<Option<PredicateFn>>,
    nodes: Vec<NodeData>,
    failures: FailureSet,
    /// Elements matched so far by the sequences being evaluated.
    matched: Vec<NodeId>,
    /// Start of each open sequence's slice of `matched`. Rule calls push a
    /// frame too, so predicates never see the caller's elements.
    frames: Vec<usize>,
    /// Failures are not recorded while > 0 (inside a negative lookahead).
    suppress_depth: u32,
    exec_fuel: Option<u32>,
    /// Evaluations currently on the native stack.
    depth: u32,
    limits: FuelLimits,
}

impl<'p, 'i> VM<'p, 'i> {
    pub(crate) fn new(
        program: &'p Program,
        input: &'i str,
        predicates: Vec<Option<PredicateFn>>,
        limits: FuelLimits,
    ) -> Self {
        Self {
            program,
            input,
            predicates,
            nodes: Vec::new(),
            failures: FailureSet::new(),
            matched: Vec::new(),
            frames: Vec::new(),
            suppress_depth: 0,
            exec_fuel: limits.get_exec_fuel(),
            depth: 0,
            limits,
        }
    }

    /// Match `rule` at `start`.
    ///
    /// With `consume_all_input`, a match ending before the end of input is a
    /// failure, reported as expecting the end of input unless something
    /// further right already explains it.
    pub(crate) fn run<T: Tracer>(
        mut self,
        rule: RuleId,
        start: usize,
        consume_all_input: bool,
        tracer: &mut T,
    ) -> Result<Outcome, RuntimeError> {
        let root = match self.call(rule, start, tracer)? {
            Some((_, end)) if consume_all_input && end < self.input.len() => {
                self.failures.record(end, Expected::EndOfInput);
                None
            }
            found => found,
        };

        Ok(Outcome {
            nodes: self.nodes,
            root,
            failures: self.failures,
        })
    }

    fn eval<T: Tracer>(
        &mut self,
        id: ExprId,
        pos: usize,
        tracer: &mut T,
    ) -> Result<Match, RuntimeError> {
        self.consume_exec_fuel()?;
        if self.depth >= self.limits.get_recursion_limit() {
            return Err(RuntimeError::RecursionLimitExceeded);
        }

        self.depth += 1;
        let mark = self.nodes.len();
        let found = self.eval_op(id, pos, tracer);
        self.depth -= 1;

        let found = found?;
        if found.is_none() {
            self.nodes.truncate(mark);
        }
        Ok(found)
    }

    fn eval_op<T: Tracer>(
        &mut self,
        id: ExprId,
        pos: usize,
        tracer: &mut T,
    ) -> Result<Match, RuntimeError> {
        let program = self.program;
        match program.op(id) {
            Op::Terminal(text) => {
                if !self.input[pos..].starts_with(text.as_str()) {
                    tracer.trace_match_failure(id, pos);
                    self.record_failure(pos, id);
                    return Ok(None);
                }
                let end = pos + text.len();
                tracer.trace_match_success(id, pos, end);
                let node = self.push(NodeData::new(NodeKind::Terminal, pos, end));
                Ok(Some((node, end)))
            }

            Op::Class(class) => Ok(self.eval_char(id, pos, |c| class.contains(c), tracer)),

            Op::AnyChar => Ok(self.eval_char(id, pos, |_| true, tracer)),

            Op::Sequence(items) => self.eval_sequence(items, pos, tracer),

            Op::Choice(alternatives) => {
                for (i, &alt) in alternatives.iter().enumerate() {
                    if let Some(found) = self.eval(alt, pos, tracer)? {
                        return Ok(Some(found));
                    }
                    if i + 1 < alternatives.len() {
                        tracer.trace_backtrack(pos);
                    }
                }
                Ok(None)
            }

            Op::Repetition { inner, min } => self.eval_repetition(*inner, *min, pos, tracer),

            Op::Optional(inner) => match self.eval(*inner, pos, tracer)? {
                Some(found) => Ok(Some(found)),
                None => Ok(Some((self.push_empty(pos), pos))),
            },

            Op::Lookahead(inner) => {
                let mark = self.nodes.len();
                if self.eval(*inner, pos, tracer)?.is_none() {
                    return Ok(None);
                }
                self.nodes.truncate(mark);
                Ok(Some((self.push_empty(pos), pos)))
            }

            Op::NegativeLookahead(inner) => {
                self.suppress_depth += 1;
                let found = self.eval(*inner, pos, tracer);
                self.suppress_depth -= 1;
                match found? {
                    Some(_) => Ok(None),
                    None => Ok(Some((self.push_empty(pos), pos))),
                }
            }

            Op::Predicate { hook, negated } => {
                let passed = self.check_predicate(*hook, pos)? != *negated;
                tracer.trace_predicate(id, pos, passed);
                if !passed {
                    return Ok(None);
                }
                Ok(Some((self.push_empty(pos), pos)))
            }

            Op::Label { name, inner } => {
                let found = self.eval(*inner, pos, tracer)?;
                if let Some((node, _)) = found {
                    self.nodes[node.index()].label = Some(*name);
                }
                Ok(found)
            }

            Op::Call(rule) => self.call(*rule, pos, tracer),
        }
    }

    // Arms with sizeable locals live in their own functions so that the
    // frame `eval_op` puts on the stack at every nesting level stays small.

    fn eval_sequence<T: Tracer>(
        &mut self,
        items: &[ExprId],
        pos: usize,
        tracer: &mut T,
    ) -> Result<Match, RuntimeError> {
        let base = self.matched.len();
        self.frames.push(base);
        let mut cur = pos;
        for &item in items {
            let Some((node, end)) = self.eval(item, cur, tracer)? else {
                self.matched.truncate(base);
                self.frames.pop();
                return Ok(None);
            };
            self.matched.push(node);
            cur = end;
        }
        self.frames.pop();
        let elements: Vec<NodeId> = self.matched.drain(base..).collect();
        let node = self.push_parent(NodeKind::Sequence, pos, cur, elements);
        Ok(Some((node, cur)))
    }

    fn eval_repetition<T: Tracer>(
        &mut self,
        inner: ExprId,
        min: u32,
        pos: usize,
        tracer: &mut T,
    ) -> Result<Match, RuntimeError> {
        let mut elements = Vec::new();
        let mut cur = pos;
        while let Some((node, end)) = self.eval(inner, cur, tracer)? {
            elements.push(node);
            let progressed = end > cur;
            cur = end;
            // `(e?)*` would loop forever
            if !progressed {
                break;
            }
        }
        if elements.len() < min as usize {
            return Ok(None);
        }
        let node = self.push_parent(NodeKind::Repetition, pos, cur, elements);
        Ok(Some((node, cur)))
    }

    /// Ask the bound callable; `negated` is applied by the caller.
    fn check_predicate(&self, hook: Symbol, pos: usize) -> Result<bool, RuntimeError> {
        let program = self.program;
        let Some(Some(f)) = self.predicates.get(hook.as_usize()) else {
            return Err(RuntimeError::UnboundPredicate(program.resolve(hook).to_string()));
        };
        let elements: &[NodeId] = match self.frames.last() {
            Some(&base) => &self.matched[base..],
            None => &[],
        };
        let env = MatchEnv {
            input: self.input,
            program,
            nodes: &self.nodes,
            elements,
            position: pos,
        };
        f(&env).map_err(|source| RuntimeError::Predicate {
            hook: program.resolve(hook).to_string(),
            source,
        })
    }

    fn call<T: Tracer>(
        &mut self,
        rule: RuleId,
        pos: usize,
        tracer: &mut T,
    ) -> Result<Match, RuntimeError> {
        tracer.trace_call(rule, pos);
        self.frames.push(self.matched.len());

        let body = self.program.rule(rule).body;
        let found = self.eval(body, pos, tracer)?;

        self.frames.pop();

        match found {
            Some((node, end)) => {
                // Outer rules overwrite: `a = b` tags b's node with `a`.
                self.nodes[node.index()].rule = Some(rule);
                tracer.trace_return(rule, pos, Some(end));
            }
            None => tracer.trace_return(rule, pos, None),
        }
        Ok(found)
    }

    fn eval_char<T: Tracer>(
        &mut self,
        id: ExprId,
        pos: usize,
        accept: impl Fn(char) -> bool,
        tracer: &mut T,
    ) -> Match {
        match self.input[pos..].chars().next() {
            Some(c) if accept(c) => {
                let end = pos + c.len_utf8();
                tracer.trace_match_success(id, pos, end);
                let node = self.push(NodeData::new(NodeKind::Terminal, pos, end));
                Some((node, end))
            }
            _ => {
                tracer.trace_match_failure(id, pos);
                self.record_failure(pos, id);
                None
            }
        }
    }

    fn record_failure(&mut self, pos: usize, id: ExprId) {
        if self.suppress_depth == 0 {
            self.failures.record(pos, Expected::Expr(id));
        }
    }

    fn consume_exec_fuel(&mut self) -> Result<(), RuntimeError> {
        if let Some(fuel) = self.exec_fuel.as_mut() {
            if *fuel == 0 {
                return Err(RuntimeError::ExecFuelExhausted);
            }
            *fuel -= 1;
        }
        Ok(())
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }

    fn push_empty(&mut self, pos: usize) -> NodeId {
        self.push(NodeData::new(NodeKind::Empty, pos, pos))
    }

    /// Build a node owning `elements` and point each element back at it.
    fn push_parent(
        &mut self,
        kind: NodeKind,
        start: usize,
        end: usize,
        elements: Vec<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for element in &elements {
            self.nodes[element.index()].parent = Some(id);
        }
        let mut data = NodeData::new(kind, start, end);
        data.elements = elements;
        self.push(data)
    }
}
