//! Token and node kinds of the grammar language, plus the rowan glue.
//!
//! Logos recognizes the token kinds directly from their attributes. Node
//! kinds carry no attributes and are only produced by the parser.

use logos::Logos;
use rowan::Language;

/// Token kinds come first, node kinds after them. `__LAST` bounds the raw
/// values accepted back from rowan.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    /// Separator in nested grammar names.
    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token("/")]
    Slash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    #[token("&")]
    Amp,

    #[token("!")]
    Bang,

    #[token(".")]
    Dot,

    /// Predicate body, braces balanced.
    #[token("{", lex_block)]
    Block,

    #[regex(r"\[(?:[^\]\\\n]|\\.)*\]")]
    Class,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // split by the lexer, never reaches the tree

    DoubleQuote,
    SingleQuote,
    StrVal,

    #[token("grammar")]
    KwGrammar,

    #[token("rule")]
    KwRule,

    #[token("do")]
    KwDo,

    #[token("end")]
    KwEnd,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// A run of characters no rule recognizes.
    Garbage,
    Error,

    // Nodes
    Root,
    Grammar,
    GrammarName,
    Rule,
    Choice,
    Seq,
    Quantifier,
    Lookahead,
    Predicate,
    Label,
    Ref,
    Str,
    CharClass,
    Any,
    Group,

    #[doc(hidden)]
    __LAST,
}

/// Consume through the brace that closes the opening one. An unbalanced
/// block fails to lex.
fn lex_block(lex: &mut logos::Lexer<SyntaxKind>) -> bool {
    let mut depth = 1usize;
    for (offset, byte) in lex.remainder().bytes().enumerate() {
        depth = match byte {
            b'{' => depth + 1,
            b'}' => depth - 1,
            _ => depth,
        };
        if depth == 0 {
            lex.bump(offset + 1);
            return true;
        }
    }
    false
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment)
    }

    fn from_raw(raw: u16) -> Option<SyntaxKind> {
        // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants
        // below `__LAST`.
        (raw < __LAST as u16).then(|| unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThicketLanguage {}

impl Language for ThicketLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
            .unwrap_or_else(|| panic!("raw syntax kind {} out of range", raw.0))
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ThicketLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ThicketLanguage>;

/// Set of token kinds, one bit per discriminant. Only token kinds fit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let raw = kinds[i] as u16;
            assert!(raw < u64::BITS as u16, "kind does not fit in a TokenSet");
            bits |= 1 << raw;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let raw = kind as u16;
        raw < u64::BITS as u16 && self.0 & (1 << raw) != 0
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = (0..u64::BITS as u16)
            .filter(|raw| self.0 & (1 << raw) != 0)
            .filter_map(SyntaxKind::from_raw);
        f.debug_set().entries(kinds).finish()
    }
}

pub mod token_sets {
    use super::*;

    /// Tokens that can start an expression.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        Id,
        DoubleQuote,
        SingleQuote,
        Class,
        Dot,
        Amp,
        Bang,
    ]);

    pub const QUANTIFIERS: TokenSet = TokenSet::new(&[Star, Plus, Question]);

    /// Where a sequence stops without complaint.
    pub const SEQ_END: TokenSet = TokenSet::new(&[Slash, ParenClose, KwEnd, KwRule]);

    pub const RULE_RECOVERY: TokenSet = TokenSet::new(&[KwRule, KwEnd]);
}
