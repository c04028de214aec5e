//! Punctuation vocabulary.
//!
//! Delimiters, separators and access markers that are not operators.
//!
//! ## Notes
//! - `:` is the statement separator. The named-argument `:=` is an operator, see
//!   [`crate::lang::operators::OperatorId::ColonEq`].
//! - Lookup via [`from_str`] is exact.
//!
//! ## Examples
//! ```rust
//! use vbsyn_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str(".@"), Some(PunctuationId::DotAt));
//! assert_eq!(punctuation::as_str(PunctuationId::Exclamation), "!");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Parentheses and braces.
    Delimiter,
    /// `,` and the `:` statement separator.
    Separator,
    /// Member, dictionary and XML-axis access markers.
    Access,
    /// `?` (nullable type suffix).
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Colon,
    Question,

    Dot,
    Exclamation,
    DotAt,
    TripleDot,

    LParen,
    RParen,
    LBrace,
    RBrace,
}

impl PunctuationId {
    /// Number of punctuation ids.
    pub const COUNT: usize = PunctuationId::RBrace as usize + 1;

    /// Position of this punctuation in [`PUNCTUATION`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens, ordered by [`PunctuationId`] discriminant.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Question, "?", PunctuationCategory::Marker),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Exclamation, "!", PunctuationCategory::Access),
    info(PunctuationId::DotAt, ".@", PunctuationCategory::Access),
    info(PunctuationId::TripleDot, "...", PunctuationCategory::Access),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id.index()]
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
