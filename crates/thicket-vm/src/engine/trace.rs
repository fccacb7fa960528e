//! Tracing infrastructure for debugging parser execution.
//!
//! The tracer is a zero-cost abstraction: the interpreter is generic over
//! [`Tracer`], and with [`NoopTracer`] every call is an empty
//! `#[inline(always)]` function the compiler removes together with its
//! arguments. Tracing-only state (call depth for indentation, names) lives in
//! the tracer, never in the interpreter.

use thicket_core::Colors;
use thicket_ir::{ExprId, Op, Program, RuleId};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Rule calls, returns and backtracks.
    #[default]
    Default,
    /// Also terminal matches and failures, and predicate results.
    Verbose,
    /// Also the text matched by terminals and rules.
    VeryVerbose,
}

/// Tracer trait for interpreter instrumentation.
///
/// Methods receive raw ids and byte offsets; names are resolved by the
/// implementation.
pub trait Tracer {
    /// Entering a rule at `pos`.
    fn trace_call(&mut self, rule: RuleId, pos: usize);

    /// Leaving a rule entered at `pos`; `end` is `None` when it failed.
    fn trace_return(&mut self, rule: RuleId, pos: usize, end: Option<usize>);

    /// A terminal, class or any-character expression matched `start..end`.
    fn trace_match_success(&mut self, expr: ExprId, start: usize, end: usize);

    /// A terminal, class or any-character expression failed at `pos`.
    fn trace_match_failure(&mut self, expr: ExprId, pos: usize);

    /// A predicate was evaluated; `passed` already accounts for negation.
    fn trace_predicate(&mut self, expr: ExprId, pos: usize, passed: bool);

    /// A choice alternative failed and the next one is tried from `pos`.
    fn trace_backtrack(&mut self, pos: usize);
}

/// No-op tracer that gets optimized away.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_call(&mut self, _rule: RuleId, _pos: usize) {}

    #[inline(always)]
    fn trace_return(&mut self, _rule: RuleId, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_match_success(&mut self, _expr: ExprId, _start: usize, _end: usize) {}

    #[inline(always)]
    fn trace_match_failure(&mut self, _expr: ExprId, _pos: usize) {}

    #[inline(always)]
    fn trace_predicate(&mut self, _expr: ExprId, _pos: usize, _passed: bool) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _pos: usize) {}
}

mod symbol {
    pub const CALL: &str = "▶";
    pub const RETURN: &str = "◀";
    pub const MATCH_SUCCESS: &str = "●";
    pub const MATCH_FAILURE: &str = "○";
    pub const BACKTRACK: &str = "❮❮❮";
}

const TEXT_BUDGET: usize = 32;

/// Tracer that collects execution trace lines.
///
/// Line layout: `  <pos> <symbol> <indent><content>`, where `<pos>` is the
/// zero-padded byte offset and the indent follows rule call depth.
pub struct PrintTracer<'s> {
    input: &'s str,
    program: &'s Program,
    verbosity: Verbosity,
    lines: Vec<String>,
    depth: usize,
    pos_width: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(input: &'s str, program: &'s Program, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            input,
            program,
            verbosity,
            lines: Vec::new(),
            depth: 0,
            pos_width: width_for(input.len()),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines.
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, pos: usize, symbol: &str, content: &str) {
        let indent = "  ".repeat(self.depth);
        let c = &self.colors;
        let line = format!(
            "  {}{:0w$}{} {symbol} {indent}{content}",
            c.dim,
            pos,
            c.reset,
            w = self.pos_width
        );
        self.lines.push(line.trim_end().to_string());
    }

    fn rule_name(&self, rule: RuleId) -> String {
        let c = &self.colors;
        format!("({}{}{})", c.blue, self.program.rule(rule).name, c.reset)
    }

    fn with_text(&self, content: String, start: usize, end: usize) -> String {
        let c = &self.colors;
        let text = truncate_text(&self.input[start..end], TEXT_BUDGET);
        format!("{content} {}{:?}{}", c.green, text, c.reset)
    }

    fn describe(&self, expr: ExprId) -> String {
        match self.program.op(expr) {
            Op::Predicate { hook, negated } => {
                let sigil = if *negated { '!' } else { '&' };
                format!("{sigil}{{ {} }}", self.program.resolve(*hook))
            }
            op => op.describe().unwrap_or_else(|| format!("E{}", expr.index())),
        }
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_call(&mut self, rule: RuleId, pos: usize) {
        let content = self.rule_name(rule);
        self.push(pos, symbol::CALL, &content);
        self.depth += 1;
    }

    fn trace_return(&mut self, rule: RuleId, pos: usize, end: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        let name = self.rule_name(rule);
        match end {
            Some(end) => {
                let c = &self.colors;
                let mut content = format!("{name} {}{pos}..{end}{}", c.dim, c.reset);
                if self.verbosity == Verbosity::VeryVerbose {
                    content = self.with_text(content, pos, end);
                }
                self.push(end, symbol::RETURN, &content);
            }
            None => self.push(pos, symbol::MATCH_FAILURE, &name),
        }
    }

    fn trace_match_success(&mut self, expr: ExprId, start: usize, end: usize) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let mut content = self.describe(expr);
        if self.verbosity == Verbosity::VeryVerbose {
            content = self.with_text(content, start, end);
        }
        self.push(start, symbol::MATCH_SUCCESS, &content);
    }

    fn trace_match_failure(&mut self, expr: ExprId, pos: usize) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let content = self.describe(expr);
        self.push(pos, symbol::MATCH_FAILURE, &content);
    }

    fn trace_predicate(&mut self, expr: ExprId, pos: usize, passed: bool) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let content = self.describe(expr);
        let sym = if passed {
            symbol::MATCH_SUCCESS
        } else {
            symbol::MATCH_FAILURE
        };
        self.push(pos, sym, &content);
    }

    fn trace_backtrack(&mut self, pos: usize) {
        self.push(pos, symbol::BACKTRACK, "");
    }
}

/// Digits needed to print every offset up to `max`.
fn width_for(max: usize) -> usize {
    max.to_string().len()
}

/// Truncate text to max length with ellipsis.
fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}
