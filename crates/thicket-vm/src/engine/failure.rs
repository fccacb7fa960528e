//! Terminal failure tracking.
//!
//! Only the failures at the furthest index reached matter for reporting: a
//! failure further right clears everything recorded so far, one further left
//! is ignored.

use thicket_core::{Position, position_of};
use thicket_ir::{ExprId, Program};

/// What the parser expected when a terminal-like expression failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Expected {
    Expr(ExprId),
    EndOfInput,
}

/// Failures at the furthest index, in first-occurrence order.
#[derive(Debug, Default)]
pub(crate) struct FailureSet {
    index: Option<usize>,
    expected: Vec<Expected>,
}

impl FailureSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, index: usize, expected: Expected) {
        match self.index {
            Some(furthest) if index < furthest => return,
            Some(furthest) if index == furthest => {}
            _ => {
                self.index = Some(index);
                self.expected.clear();
            }
        }
        if !self.expected.contains(&expected) {
            self.expected.push(expected);
        }
    }

    /// Resolve expectations to their display strings.
    pub(crate) fn into_report(self, program: &Program, input: &str) -> FailureReport {
        let Some(index) = self.index else {
            return FailureReport::default();
        };

        let mut failures: Vec<TerminalFailure> = Vec::with_capacity(self.expected.len());
        for expected in self.expected {
            let expected_string = match expected {
                Expected::Expr(id) => program
                    .op(id)
                    .describe()
                    .unwrap_or_else(|| format!("E{}", id.index())),
                Expected::EndOfInput => "end of input".to_string(),
            };
            // Distinct ops can describe the same way: `'a' / 'a'`.
            if !failures.iter().any(|f| f.expected_string == expected_string) {
                failures.push(TerminalFailure {
                    index,
                    expected_string,
                });
            }
        }

        FailureReport {
            failures,
            position: Some(position_of(input, index)),
        }
    }
}

/// One thing the parser expected at a given byte index.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TerminalFailure {
    pub index: usize,
    pub expected_string: String,
}

/// Failure information about the most recent parse.
///
/// Kept after successful parses too: a match can still have failed
/// alternatives further right than where it ended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureReport {
    failures: Vec<TerminalFailure>,
    position: Option<Position>,
}

impl FailureReport {
    pub fn terminal_failures(&self) -> &[TerminalFailure] {
        &self.failures
    }

    /// Byte index of the furthest failure.
    pub fn index(&self) -> Option<usize> {
        self.failures.first().map(|f| f.index)
    }

    /// 1-based line of the furthest failure.
    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    /// 1-based column (in characters) of the furthest failure.
    pub fn column(&self) -> Option<usize> {
        self.position.map(|p| p.column)
    }

    /// `Expected one of 'a', 'b' at line 1, column 3 (byte 3)`.
    ///
    /// Expectations are sorted; the byte offset is 1-based like the column.
    pub fn reason(&self) -> Option<String> {
        let index = self.index()?;
        let position = self.position?;

        let mut expected: Vec<&str> = self
            .failures
            .iter()
            .map(|f| f.expected_string.as_str())
            .collect();
        expected.sort_unstable();
        expected.dedup();

        let what = match expected.as_slice() {
            [single] => (*single).to_string(),
            many => format!("one of {}", many.join(", ")),
        };
        Some(format!(
            "Expected {what} at line {}, column {} (byte {})",
            position.line,
            position.column,
            index + 1
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}
