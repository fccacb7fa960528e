//! Parser handle: a shared compiled program plus per-use state.

use std::sync::Arc;

use thicket_ir::{Program, RuleId};

use super::error::RuntimeError;
use super::failure::{FailureReport, TerminalFailure};
use super::options::ParseOptions;
use super::predicate::{MatchEnv, PredicateError, PredicateTable};
use super::trace::{NoopTracer, Tracer};
use super::tree::SyntaxTree;
use super::vm::{FuelLimits, VM};

/// A ready-to-use parser for one grammar.
///
/// The program is shared; everything else (sticky options, predicate
/// bindings, the last failure report) belongs to this handle. Cloning gives an
/// independent handle over the same program.
#[derive(Clone, Debug)]
pub struct CompiledParser {
    program: Arc<Program>,
    root: Option<RuleId>,
    consume_all_input: bool,
    predicates: PredicateTable,
    limits: FuelLimits,
    report: FailureReport,
}

impl CompiledParser {
    pub fn new(program: Program) -> Self {
        Self::from_arc(Arc::new(program))
    }

    pub fn from_arc(program: Arc<Program>) -> Self {
        Self {
            program,
            root: None,
            consume_all_input: true,
            predicates: PredicateTable::default(),
            limits: FuelLimits::default(),
            report: FailureReport::default(),
        }
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    /// Parse `input`, returning `Ok(None)` when it does not match.
    pub fn parse<'i>(
        &mut self,
        input: &'i str,
        options: ParseOptions,
    ) -> Result<Option<SyntaxTree<'i>>, RuntimeError> {
        self.parse_with(input, options, &mut NoopTracer)
    }

    /// Like [`parse`](Self::parse), reporting execution to `tracer`.
    pub fn parse_with<'i, T: Tracer>(
        &mut self,
        input: &'i str,
        options: ParseOptions,
        tracer: &mut T,
    ) -> Result<Option<SyntaxTree<'i>>, RuntimeError> {
        self.report = FailureReport::default();

        let root = match options.get_root() {
            Some(name) => self.lookup_rule(name)?,
            None => self.effective_root()?,
        };
        let consume_all_input = options
            .get_consume_all_input()
            .unwrap_or(self.consume_all_input);
        let start = options.get_start_index().unwrap_or(0);
        if start > input.len() || !input.is_char_boundary(start) {
            return Err(RuntimeError::InvalidIndex {
                index: start,
                len: input.len(),
            });
        }

        let predicates = self.predicates.resolve(&self.program);
        let vm = VM::new(&self.program, input, predicates, self.limits);
        let outcome = vm.run(root, start, consume_all_input, tracer)?;

        self.report = outcome.failures.into_report(&self.program, input);

        Ok(outcome
            .root
            .map(|(id, _)| SyntaxTree::new(input, Arc::clone(&self.program), outcome.nodes, id)))
    }

    /// Name of the rule parses start from unless overridden per call.
    pub fn root(&self) -> Option<&str> {
        self.effective_root()
            .ok()
            .map(|rule| self.program.rule(rule).name.as_str())
    }

    /// Make `rule` the root for every later parse on this handle.
    pub fn set_root(&mut self, rule: &str) -> Result<(), RuntimeError> {
        self.root = Some(self.lookup_rule(rule)?);
        Ok(())
    }

    /// Go back to the grammar's first rule as root.
    pub fn reset_root(&mut self) {
        self.root = None;
    }

    pub fn consume_all_input(&self) -> bool {
        self.consume_all_input
    }

    pub fn set_consume_all_input(&mut self, consume: bool) {
        self.consume_all_input = consume;
    }

    pub fn limits(&self) -> FuelLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: FuelLimits) {
        self.limits = limits;
    }

    /// Bind the predicate whose braces contain `key` (surrounding whitespace
    /// ignored).
    pub fn bind_predicate<F>(&mut self, key: &str, f: F) -> &mut Self
    where
        F: Fn(&MatchEnv<'_>) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        self.predicates.bind(key, Arc::new(f));
        self
    }

    /// Returns whether a binding was removed.
    pub fn unbind_predicate(&mut self, key: &str) -> bool {
        self.predicates.unbind(key)
    }

    /// Predicate keys used by the grammar that have no binding yet.
    pub fn unbound_predicates(&self) -> Vec<&str> {
        self.program
            .predicate_hooks()
            .into_iter()
            .filter(|hook| !self.predicates.contains(hook))
            .collect()
    }

    /// Failure report of the most recent parse.
    pub fn failure_report(&self) -> &FailureReport {
        &self.report
    }

    pub fn terminal_failures(&self) -> &[TerminalFailure] {
        self.report.terminal_failures()
    }

    pub fn failure_index(&self) -> Option<usize> {
        self.report.index()
    }

    pub fn failure_line(&self) -> Option<usize> {
        self.report.line()
    }

    pub fn failure_column(&self) -> Option<usize> {
        self.report.column()
    }

    pub fn failure_reason(&self) -> Option<String> {
        self.report.reason()
    }

    fn effective_root(&self) -> Result<RuleId, RuntimeError> {
        self.root
            .or_else(|| self.program.default_root())
            .ok_or_else(|| RuntimeError::NoRules(self.program.name().to_string()))
    }

    fn lookup_rule(&self, name: &str) -> Result<RuleId, RuntimeError> {
        self.program
            .rule_by_name(name)
            .ok_or_else(|| RuntimeError::UnknownRule {
                grammar: self.program.name().to_string(),
                rule: name.to_string(),
            })
    }
}
