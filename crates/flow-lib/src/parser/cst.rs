//! One `SyntaxKind` enum for tokens and nodes.
//!
//! Variants with a logos attribute are produced by the lexer, the rest only by the parser.

use logos::Logos;
use rowan::Language;

/// Tokens come first so `TokenSet` can hold any of them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    /// `=>` in build shape specs. Longest match keeps it apart from `=`.
    #[token("=>")]
    FatArrow,

    #[token("=")]
    Equals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("^")]
    Caret,

    /// Matrix multiplication.
    #[token("@")]
    At,

    /// Attribute access: `x.T`, `x.shape`.
    #[token(".")]
    Dot,

    #[token("flow")]
    KwFlow,

    #[token("build")]
    KwBuild,

    #[token("let")]
    KwLet,

    #[token("return")]
    KwReturn,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// Defined after keywords so they take precedence.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Id,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// A run of characters the lexer could not match.
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    FlowDef,
    SymbolList,
    ArgList,
    Body,
    LetStmt,
    LetInit,
    AssignStmt,
    ReturnStmt,
    BuildDef,
    BuildBody,
    ShapeSpec,
    Dims,
    BinaryExpr,
    NegExpr,
    AttrExpr,
    CallExpr,
    CallArgs,
    ParenExpr,
    TupleExpr,
    NameRef,
    Literal,

    // Upper bound of valid discriminants
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Binding powers for infix operators: `(left, right)`.
    /// Right-associative operators bind tighter on the left.
    pub fn infix_binding_power(self) -> Option<(u8, u8)> {
        let bp = match self {
            Plus | Minus => (1, 2),
            Star | Slash => (3, 4),
            At => (5, 6),
            Caret => (8, 7),
            _ => return None,
        };
        Some(bp)
    }
}

impl SyntaxKind {
    /// `None` for raw values outside the enum.
    fn from_raw(raw: u16) -> Option<Self> {
        // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants below `__LAST`
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
pub enum FlowLang {}

impl Language for FlowLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0).expect("raw kind was produced from a SyntaxKind")
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<FlowLang>;
pub type SyntaxToken = rowan::SyntaxToken<FlowLang>;

/// Set of token kinds, one bit per discriminant.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Fails const evaluation for kinds that do not fit in 64 bits.
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    const fn with(self, kind: SyntaxKind) -> Self {
        let bit = kind as u16;
        assert!(bit < 64, "node kinds cannot go in a TokenSet");
        TokenSet(self.0 | 1 << bit)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let bit = kind as u16;
        bit < 64 && (self.0 >> bit) & 1 == 1
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members = (0..64u16)
            .filter(|bit| (self.0 >> bit) & 1 == 1)
            .filter_map(SyntaxKind::from_raw);
        f.debug_set().entries(members).finish()
    }
}

pub mod token_sets {
    use super::*;

    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[Number, Id, ParenOpen, Minus]);

    pub const STMT_FIRST: TokenSet = EXPR_FIRST.union(TokenSet::new(&[KwLet, KwReturn]));

    pub const ITEM_FIRST: TokenSet = TokenSet::new(&[KwFlow, KwBuild]);

    pub const DIM_FIRST: TokenSet = TokenSet::new(&[Number, Id]);

    /// Where a broken statement resumes.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, BraceClose, KwFlow, KwBuild]);

    /// Tokens that end a delimited list without belonging to it.
    pub const LIST_RECOVERY: TokenSet = STMT_RECOVERY.union(TokenSet::new(&[
        BraceOpen,
        ParenClose,
        BracketClose,
        Equals,
    ]));
}
