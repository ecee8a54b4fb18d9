#![forbid(unsafe_code)]

//! Token kinds and their default descriptors.
//!
//! Every node on the canvas is an instance of one [`TokenKind`]. The kind
//! decides the default label, the regex fragment the node contributes and the
//! colour category used to draw it. The defaults live in a single static
//! table ([`TOKENS`]) indexed by the kind's ordinal, so adding a kind is a
//! table edit rather than a new match arm.
//!
//! The ordinal is also the on-disk type tag of the project format; reordering
//! the table breaks existing `.vreg` files.

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Visual grouping of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Anchor,
    Character,
    Digit,
    Special,
    Symbol,
    Negated,
    Quantifier,
    Structure,
}

impl ColorCategory {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Anchor => "anchor",
            Self::Character => "character",
            Self::Digit => "digit",
            Self::Special => "special",
            Self::Symbol => "symbol",
            Self::Negated => "negated",
            Self::Quantifier => "quantifier",
            Self::Structure => "structure",
        }
    }

    /// Default fill colour for the category.
    #[must_use]
    pub const fn rgba(self) -> Rgba {
        match self {
            Self::Anchor => Rgba::new(255, 100, 100, 255),
            Self::Character => Rgba::new(0, 228, 48, 255),
            Self::Digit => Rgba::new(0, 121, 241, 255),
            Self::Special => Rgba::new(255, 161, 0, 255),
            Self::Symbol => Rgba::new(200, 122, 255, 255),
            Self::Negated => Rgba::new(100, 100, 100, 255),
            Self::Quantifier => Rgba::new(255, 255, 0, 255),
            Self::Structure => Rgba::new(180, 80, 255, 255),
        }
    }
}

/// The closed set of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    StartAnchor = 0,
    EndAnchor,
    Letters,
    Digit,
    Whitespace,
    AnyChar,
    Word,
    Symbol,
    CustomText,
    NotDigit,
    NotWhitespace,
    NotWord,
    ZeroOrMore,
    OneOrMore,
    Optional,
    GroupStart,
    GroupEnd,
    Alternation,
}

/// Default fields for a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub kind: TokenKind,
    /// Short machine name, used by the CLI and in log lines.
    pub name: &'static str,
    pub label: &'static str,
    pub fragment: &'static str,
    pub category: ColorCategory,
}

const fn token(
    kind: TokenKind,
    name: &'static str,
    label: &'static str,
    fragment: &'static str,
    category: ColorCategory,
) -> TokenDescriptor {
    TokenDescriptor {
        kind,
        name,
        label,
        fragment,
        category,
    }
}

/// Default fragment of a freshly placed custom-text node.
pub const DEFAULT_CUSTOM_TEXT: &str = "abc";

/// Descriptor table, indexed by [`TokenKind::ordinal`].
pub static TOKENS: [TokenDescriptor; TokenKind::COUNT] = {
    use ColorCategory as C;
    use TokenKind as K;
    [
        token(K::StartAnchor, "start", "Start of Line", "^", C::Anchor),
        token(K::EndAnchor, "end", "End of Line", "$", C::Anchor),
        token(K::Letters, "letters", "Letters (a-z)", "[a-zA-Z]+", C::Character),
        token(K::Digit, "digit", "Number (0-9)", r"\d", C::Digit),
        token(K::Whitespace, "whitespace", "Whitespace", r"\s", C::Special),
        token(K::AnyChar, "any", "Anything", ".", C::Special),
        token(K::Word, "word", "Word Char", r"\w", C::Character),
        token(K::Symbol, "symbol", "Specific Symbol", "@", C::Symbol),
        token(K::CustomText, "custom", DEFAULT_CUSTOM_TEXT, DEFAULT_CUSTOM_TEXT, C::Special),
        token(K::NotDigit, "not-digit", "Not a Number", r"\D", C::Negated),
        token(K::NotWhitespace, "not-whitespace", "Not Whitespace", r"\S", C::Negated),
        token(K::NotWord, "not-word", "Not Word Char", r"\W", C::Negated),
        token(K::ZeroOrMore, "zero-or-more", "Repeat (0+)", "*", C::Quantifier),
        token(K::OneOrMore, "one-or-more", "Repeat (1+)", "+", C::Quantifier),
        token(K::Optional, "optional", "Optional", "?", C::Quantifier),
        token(K::GroupStart, "group-start", "Start Group", "(", C::Structure),
        token(K::GroupEnd, "group-end", "End Group", ")", C::Structure),
        token(K::Alternation, "or", "OR (Either)", "|", C::Structure),
    ]
};

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = 18;

    /// Every kind in ordinal order.
    pub const ALL: [TokenKind; Self::COUNT] = [
        Self::StartAnchor,
        Self::EndAnchor,
        Self::Letters,
        Self::Digit,
        Self::Whitespace,
        Self::AnyChar,
        Self::Word,
        Self::Symbol,
        Self::CustomText,
        Self::NotDigit,
        Self::NotWhitespace,
        Self::NotWord,
        Self::ZeroOrMore,
        Self::OneOrMore,
        Self::Optional,
        Self::GroupStart,
        Self::GroupEnd,
        Self::Alternation,
    ];

    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ordinal`](Self::ordinal).
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Look a kind up by its short name (`"digit"`, `"one-or-more"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        TOKENS.iter().find(|t| t.name == name).map(|t| t.kind)
    }

    #[inline]
    #[must_use]
    pub fn descriptor(self) -> &'static TokenDescriptor {
        &TOKENS[usize::from(self.ordinal())]
    }

    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Only custom-text nodes may have their fragment edited.
    #[inline]
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::CustomText)
    }
}
