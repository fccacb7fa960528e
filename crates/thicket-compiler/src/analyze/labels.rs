//! Label validation: a label may appear at most once among the items of a sequence.

use indexmap::IndexMap;
use rowan::TextRange;

use crate::Diagnostics;
use crate::diagnostics::DiagnosticKind;
use crate::parser::{Root, ast};

pub fn validate_labels(root: &Root, diag: &mut Diagnostics) {
    for seq in root.as_cst().descendants().filter_map(ast::Seq::cast) {
        let mut seen: IndexMap<String, TextRange> = IndexMap::new();
        for item in seq.items() {
            let ast::Expr::Label(label) = item else {
                continue;
            };
            let Some(name) = label.name() else {
                continue;
            };
            if let Some(&first) = seen.get(name.text()) {
                diag.report(DiagnosticKind::DuplicateLabel, name.text_range())
                    .message(name.text())
                    .related_to("first used here", first)
                    .emit();
            } else {
                seen.insert(name.text().to_string(), name.text_range());
            }
        }
    }
}
