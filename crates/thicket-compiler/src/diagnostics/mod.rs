//! Compiler diagnostics: collected during parsing and analysis, rendered on
//! demand with or without source context.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use message::RelatedInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Pending report. Nothing is recorded until [`DiagnosticBuilder::emit`].
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Diagnostics,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a report of `kind` underlining `range`, worded with the kind's
    /// headline unless `.message()` supplies a detail.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: self,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity() == severity)
            .count()
    }

    /// Copy without the follow-on noise of an earlier error.
    ///
    /// A report is dropped when a higher-priority report strictly encloses
    /// its span, or when both start at the same offset and the other one
    /// outranks it. At a shared offset a missing piece beats the unclosed
    /// construct it caused, regardless of priority.
    pub fn filtered(&self) -> Diagnostics {
        let mut dropped = vec![false; self.messages.len()];

        for (i, a) in self.messages.iter().enumerate() {
            for (j, b) in self.messages.iter().enumerate() {
                if i == j || dropped[i] || dropped[j] {
                    continue;
                }
                match loser(a, b) {
                    Some(Loser::First) => dropped[i] = true,
                    Some(Loser::Second) => dropped[j] = true,
                    None => {}
                }
            }
        }

        let messages = self
            .messages
            .iter()
            .zip(dropped)
            .filter_map(|(m, gone)| (!gone).then(|| m.clone()))
            .collect();
        Diagnostics { messages }
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl DiagnosticBuilder<'_> {
    /// Word the report around `detail` (usually the offending name).
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        self.pending.message = self.pending.kind.with_detail(&detail.into());
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.pending.related.push(RelatedInfo {
            range,
            message: msg.into(),
        });
        self
    }

    pub fn emit(self) {
        self.sink.messages.push(self.pending);
    }
}

enum Loser {
    First,
    Second,
}

fn loser(a: &DiagnosticMessage, b: &DiagnosticMessage) -> Option<Loser> {
    let (ra, rb) = (a.range, b.range);
    if ra.start() < rb.start() && rb.end() <= ra.end() && a.kind.suppresses(&b.kind) {
        return Some(Loser::Second);
    }
    if ra.start() != rb.start() {
        return None;
    }

    if a.kind.is_root_cause_error() && b.kind.is_structural_error() {
        Some(Loser::Second)
    } else if b.kind.is_root_cause_error() && a.kind.is_structural_error() {
        Some(Loser::First)
    } else if a.kind.suppresses(&b.kind) {
        Some(Loser::Second)
    } else {
        None
    }
}
