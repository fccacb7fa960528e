use std::fmt;

use rowan::TextRange;

/// What went wrong. Declaration order is priority order: when two reports
/// collide, the kind declared first survives [`super::Diagnostics::filtered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // A construct left open swallows everything after it.
    UnclosedGrammar,
    UnclosedRule,
    UnclosedGroup,

    // Missing pieces.
    ExpectedGrammar,
    ExpectedGrammarName,
    ExpectedRuleName,
    ExpectedExpression,

    // Misplaced or malformed pieces.
    EmptyGroup,
    InvalidEscape,
    InvalidCharClass,
    UnexpectedToken,
    TrailingInput,

    // Well-formed but meaningless.
    DuplicateRule,
    UndefinedRule,
    DuplicateLabel,

    LeftRecursion,
    EmptyGrammar,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::LeftRecursion | Self::EmptyGrammar => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Reported at the point where an open construct should have closed.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedGrammar | Self::UnclosedRule | Self::UnclosedGroup
        )
    }

    /// A missing piece, which usually explains a structural error at the
    /// same spot.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedGrammar
                | Self::ExpectedGrammarName
                | Self::ExpectedRuleName
                | Self::ExpectedExpression
        )
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::UnclosedGrammar => "missing `end` for grammar",
            Self::UnclosedRule => "missing `end` for rule",
            Self::UnclosedGroup => "missing closing `)`",
            Self::ExpectedGrammar => "expected a `grammar` declaration",
            Self::ExpectedGrammarName => "expected grammar name",
            Self::ExpectedRuleName => "expected rule name",
            Self::ExpectedExpression => "expected an expression",
            Self::EmptyGroup => "empty `()` is not allowed",
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidCharClass => "invalid character class",
            Self::UnexpectedToken => "unexpected token",
            Self::TrailingInput => "unexpected input after grammar",
            Self::DuplicateRule => "duplicate rule",
            Self::UndefinedRule => "undefined rule",
            Self::DuplicateLabel => "duplicate label",
            Self::LeftRecursion => "left recursion",
            Self::EmptyGrammar => "grammar has no rules",
        }
    }

    /// Message text once the reporter supplies a detail, usually a name.
    pub fn with_detail(&self, detail: &str) -> String {
        match self {
            Self::DuplicateRule => format!("`{detail}` is already defined"),
            Self::UndefinedRule => format!("`{detail}` is not defined"),
            Self::DuplicateLabel => {
                format!("label `{detail}` is used more than once in this sequence")
            }
            Self::LeftRecursion => {
                format!("rule `{detail}` is left-recursive and will never match")
            }
            kind if kind.is_structural_error() => format!("{}; {detail}", kind.headline()),
            kind => format!("{}: {detail}", kind.headline()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Secondary span shown alongside the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            message: kind.headline().to_string(),
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Span underlined when rendered against source.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

fn write_span(f: &mut fmt::Formatter<'_>, range: TextRange) -> fmt::Result {
    write!(
        f,
        "{}..{}",
        u32::from(range.start()),
        u32::from(range.end())
    )
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ", self.severity())?;
        write_span(f, self.range)?;
        write!(f, ": {}", self.message)?;
        for related in &self.related {
            write!(f, " (related: {} at ", related.message)?;
            write_span(f, related.range)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}
