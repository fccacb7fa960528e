//! Typed views over the lossless syntax tree.
//!
//! A view is a `SyntaxNode` known to have a given kind. Accessors return
//! `Option` because the tree keeps malformed input; the parser has already
//! reported whatever is missing.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Grammar, Grammar);
ast_node!(GrammarName, GrammarName);
ast_node!(Rule, Rule);
ast_node!(Choice, Choice);
ast_node!(Seq, Seq);
ast_node!(Quantifier, Quantifier);
ast_node!(Lookahead, Lookahead);
ast_node!(Predicate, Predicate);
ast_node!(Label, Label);
ast_node!(Ref, Ref);
ast_node!(Str, Str);
ast_node!(CharClass, CharClass);
ast_node!(Any, Any);
ast_node!(Group, Group);

/// Parsing expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Choice(Choice),
    Seq(Seq),
    Quantifier(Quantifier),
    Lookahead(Lookahead),
    Predicate(Predicate),
    Label(Label),
    Ref(Ref),
    Str(Str),
    CharClass(CharClass),
    Any(Any),
    Group(Group),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Choice => Choice::cast(node).map(Expr::Choice),
            SyntaxKind::Seq => Seq::cast(node).map(Expr::Seq),
            SyntaxKind::Quantifier => Quantifier::cast(node).map(Expr::Quantifier),
            SyntaxKind::Lookahead => Lookahead::cast(node).map(Expr::Lookahead),
            SyntaxKind::Predicate => Predicate::cast(node).map(Expr::Predicate),
            SyntaxKind::Label => Label::cast(node).map(Expr::Label),
            SyntaxKind::Ref => Ref::cast(node).map(Expr::Ref),
            SyntaxKind::Str => Str::cast(node).map(Expr::Str),
            SyntaxKind::CharClass => CharClass::cast(node).map(Expr::CharClass),
            SyntaxKind::Any => Any::cast(node).map(Expr::Any),
            SyntaxKind::Group => Group::cast(node).map(Expr::Group),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Choice(n) => n.as_cst(),
            Expr::Seq(n) => n.as_cst(),
            Expr::Quantifier(n) => n.as_cst(),
            Expr::Lookahead(n) => n.as_cst(),
            Expr::Predicate(n) => n.as_cst(),
            Expr::Label(n) => n.as_cst(),
            Expr::Ref(n) => n.as_cst(),
            Expr::Str(n) => n.as_cst(),
            Expr::CharClass(n) => n.as_cst(),
            Expr::Any(n) => n.as_cst(),
            Expr::Group(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }

    /// Direct expression children.
    pub fn children(&self) -> Vec<Expr> {
        self.as_cst().children().filter_map(Expr::cast).collect()
    }
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    /// `parse_root` always opens a `Root` node, so the top of a finished tree is one.
    pub(super) fn from_green(green: rowan::GreenNode) -> Self {
        Self(SyntaxNode::new_root(green))
    }

    pub fn grammar(&self) -> Option<Grammar> {
        self.0.children().find_map(Grammar::cast)
    }

    /// Comment lines preceding the grammar declaration that carry an encoding
    /// pragma, e.g. `# encoding: UTF-8`. They are copied verbatim into generated code.
    pub fn leading_comments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .take_while(|it| it.kind() != SyntaxKind::Grammar)
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::LineComment && is_encoding_pragma(t.text()))
            .map(|t| t.text().to_string())
            .collect()
    }
}

fn is_encoding_pragma(text: &str) -> bool {
    text.find("coding").is_some_and(|at| {
        matches!(text[at + "coding".len()..].chars().next(), Some(':' | '='))
    })
}

impl Grammar {
    pub fn name(&self) -> Option<GrammarName> {
        self.0.children().find_map(GrammarName::cast)
    }

    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.0.children().filter_map(Rule::cast)
    }

    pub fn grammar_keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::KwGrammar)
    }
}

impl GrammarName {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Id)
    }

    /// `A::B::C`, without surrounding trivia.
    pub fn text(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join("::")
    }
}

impl Rule {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Choice {
    pub fn alternatives(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Seq {
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Quantifier {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question
                )
            })
    }
}

impl Lookahead {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn is_negative(&self) -> bool {
        token(&self.0, SyntaxKind::Bang).is_some()
    }
}

impl Predicate {
    pub fn block(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Block)
    }

    /// Block contents with the braces and surrounding whitespace removed.
    pub fn hook(&self) -> Option<String> {
        let block = self.block()?;
        let text = block.text();
        let inner = text.strip_prefix('{')?.strip_suffix('}')?;
        Some(inner.trim().to_string())
    }

    pub fn is_negative(&self) -> bool {
        token(&self.0, SyntaxKind::Bang).is_some()
    }
}

impl Label {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Ref {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl Str {
    /// Raw text between the quotes, escapes not yet processed.
    pub fn raw_value(&self) -> String {
        token(&self.0, SyntaxKind::StrVal)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn value_range(&self) -> TextRange {
        token(&self.0, SyntaxKind::StrVal).map_or_else(|| self.text_range(), |t| t.text_range())
    }

    pub fn is_double_quoted(&self) -> bool {
        token(&self.0, SyntaxKind::DoubleQuote).is_some()
    }
}

impl CharClass {
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Class)
    }
}

impl Group {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}
