use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedRuleName, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 0..5: expected rule name");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(3, 8))
        .message("digit")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 3..8: `digit` is not defined");
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::LeftRecursion, range(0, 4))
        .message("expr")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn related_info_in_plain_output() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(0, 5))
        .related_to("group starts here", range(0, 1))
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 0..5: missing closing `)` (related: group starts here at 0..1)"
    );
}

#[test]
fn render_with_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(4, 8))
        .message("Undefined")
        .emit();

    let result = diagnostics.printer().source("src Undefined").render();
    assert!(result.starts_with("error: `Undefined` is not defined"));
    assert!(result.contains("1 | src Undefined"));
}

#[test]
fn multiple_diagnostics_are_separated() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::TrailingInput, range(2, 3))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 0..1: expected an expression
    error at 2..3: unexpected input after grammar
    ");
}

#[test]
fn filtered_suppresses_contained_lower_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedRule, range(0, 20))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(5, 6))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.iter().next().map(|d| d.kind()),
        Some(DiagnosticKind::UnclosedRule)
    );
}

#[test]
fn filtered_root_cause_wins_at_same_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedGroup, range(4, 10))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(4, 5))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        filtered.iter().next().map(|d| d.kind()),
        Some(DiagnosticKind::ExpectedExpression)
    );
}

#[test]
fn filtered_keeps_disjoint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule, range(0, 3))
        .message("a")
        .emit();
    diagnostics
        .report(DiagnosticKind::UndefinedRule, range(10, 11))
        .message("b")
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::EmptyGrammar, range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::EmptyGroup, range(1, 2)).emit();
    a.extend(b);
    assert_eq!(a.len(), 2);
}
