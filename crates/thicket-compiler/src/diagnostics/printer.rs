//! Rendering. With source attached, each diagnostic becomes an
//! annotate-snippets report; without it, one `severity at a..b: message`
//! line per diagnostic.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::Severity;

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter {
            diagnostics: self,
            source: None,
            path: None,
            colored: false,
        }
    }
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn source(self, source: &'s str) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// File name shown in the snippet header.
    pub fn path(self, path: &'s str) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    pub fn colored(self, colored: bool) -> Self {
        Self { colored, ..self }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // fmt::Write for String is infallible.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        match self.source {
            Some(source) => self.format_snippets(source, w),
            None => self.format_lines(w),
        }
    }

    fn format_snippets(&self, source: &str, w: &mut impl Write) -> fmt::Result {
        let renderer = match self.colored {
            true => Renderer::styled(),
            false => Renderer::plain(),
        };
        let limit = source.len();

        for (n, diag) in self.diagnostics.iter().enumerate() {
            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(visible_span(diag.range, limit)));
            if let Some(path) = self.path {
                snippet = snippet.path(path);
            }
            for related in &diag.related {
                let span = visible_span(related.range, limit);
                snippet = snippet
                    .annotation(AnnotationKind::Context.span(span).label(&related.message));
            }

            let report = [level(diag.severity())
                .primary_title(&diag.message)
                .element(snippet)];
            if n > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    fn format_lines(&self, w: &mut impl Write) -> fmt::Result {
        for (n, diag) in self.diagnostics.iter().enumerate() {
            if n > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Empty ranges widen to one byte so the caret has something to point at.
fn visible_span(range: TextRange, limit: usize) -> Range<usize> {
    let range = Range::<usize>::from(range);
    if range.is_empty() {
        range.start..(range.start + 1).min(limit)
    } else {
        range
    }
}
