//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word operators like
//! `AndAlso`) together with the precedence tier each binary operator belongs to.
//!
//! ## Notes
//! - Symbol lookup via [`from_str`] is exact. Word operators are lexed as keywords; their entries carry
//!   the corresponding [`KeywordId`] in [`OperatorInfo::keyword`].
//! - Tiers are listed from loosest to tightest binding in [`PrecedenceTier`]. The parser's precedence
//!   chain follows this order one tier per rule; do not reorder variants.
//!
//! ## Examples
//! ```rust
//! use vbsyn_core::lang::operators::{self, OperatorId, PrecedenceTier};
//!
//! assert_eq!(operators::from_str("\\"), Some(OperatorId::Backslash));
//! assert_eq!(operators::info_for(OperatorId::Backslash).tier, Some(PrecedenceTier::IntegerDivision));
//! assert!(PrecedenceTier::Modulo < PrecedenceTier::IntegerDivision);
//! ```

use super::keywords::KeywordId;

/// Binary precedence tiers, loosest first.
///
/// `Unary` is the prefix `+`/`-` tier; it sits between multiplicative and exponentiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrecedenceTier {
    LogicalOr,
    LogicalAnd,
    LogicalNot,
    Relational,
    Shift,
    Concatenation,
    Additive,
    Modulo,
    IntegerDivision,
    Multiplicative,
    Unary,
    Exponentiation,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Backslash,
    Caret,
    Ampersand,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Shift
    ShiftLeft,
    ShiftRight,

    // Named argument / compound assignment
    ColonEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    BackslashEq,
    CaretEq,
    AmpersandEq,
    ShiftLeftEq,
    ShiftRightEq,

    // Word operators (lexed as keywords)
    Or,
    OrElse,
    Xor,
    And,
    AndAlso,
    Not,
    Like,
    Is,
    IsNot,
    Mod,
}

impl OperatorId {
    /// Number of operator ids.
    pub const COUNT: usize = OperatorId::Mod as usize + 1;

    /// Position of this operator in [`OPERATORS`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Metadata for an operator.
///
/// ## Notes
/// - `tier` is `None` for operators that never appear in the binary chain (`:=`, compound assignment).
/// - `prefix` marks operators that also have a prefix form (`-x`, `Not x`, `*p`).
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub tier: Option<PrecedenceTier>,
    pub prefix: bool,
    pub keyword: Option<KeywordId>,
}

/// Registry of all operators, ordered by [`OperatorId`] discriminant.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", Some(PrecedenceTier::Additive), true),
    op(OperatorId::Minus, "-", Some(PrecedenceTier::Additive), true),
    op(OperatorId::Star, "*", Some(PrecedenceTier::Multiplicative), true),
    op(OperatorId::Slash, "/", Some(PrecedenceTier::Multiplicative), false),
    op(OperatorId::Backslash, "\\", Some(PrecedenceTier::IntegerDivision), false),
    op(OperatorId::Caret, "^", Some(PrecedenceTier::Exponentiation), false),
    op(OperatorId::Ampersand, "&", Some(PrecedenceTier::Concatenation), false),
    // Comparison
    op(OperatorId::Eq, "=", Some(PrecedenceTier::Relational), false),
    op(OperatorId::NotEq, "<>", Some(PrecedenceTier::Relational), false),
    op(OperatorId::Lt, "<", Some(PrecedenceTier::Relational), false),
    op(OperatorId::Gt, ">", Some(PrecedenceTier::Relational), false),
    op(OperatorId::LtEq, "<=", Some(PrecedenceTier::Relational), false),
    op(OperatorId::GtEq, ">=", Some(PrecedenceTier::Relational), false),
    // Shift
    op(OperatorId::ShiftLeft, "<<", Some(PrecedenceTier::Shift), false),
    op(OperatorId::ShiftRight, ">>", Some(PrecedenceTier::Shift), false),
    // Named argument / compound assignment
    op(OperatorId::ColonEq, ":=", None, false),
    op(OperatorId::PlusEq, "+=", None, false),
    op(OperatorId::MinusEq, "-=", None, false),
    op(OperatorId::StarEq, "*=", None, false),
    op(OperatorId::SlashEq, "/=", None, false),
    op(OperatorId::BackslashEq, "\\=", None, false),
    op(OperatorId::CaretEq, "^=", None, false),
    op(OperatorId::AmpersandEq, "&=", None, false),
    op(OperatorId::ShiftLeftEq, "<<=", None, false),
    op(OperatorId::ShiftRightEq, ">>=", None, false),
    // Word operators
    word(OperatorId::Or, KeywordId::Or, PrecedenceTier::LogicalOr, false),
    word(OperatorId::OrElse, KeywordId::OrElse, PrecedenceTier::LogicalOr, false),
    word(OperatorId::Xor, KeywordId::Xor, PrecedenceTier::LogicalOr, false),
    word(OperatorId::And, KeywordId::And, PrecedenceTier::LogicalAnd, false),
    word(OperatorId::AndAlso, KeywordId::AndAlso, PrecedenceTier::LogicalAnd, false),
    word(OperatorId::Not, KeywordId::Not, PrecedenceTier::LogicalNot, true),
    word(OperatorId::Like, KeywordId::Like, PrecedenceTier::Relational, false),
    word(OperatorId::Is, KeywordId::Is, PrecedenceTier::Relational, false),
    word(OperatorId::IsNot, KeywordId::IsNot, PrecedenceTier::Relational, false),
    word(OperatorId::Mod, KeywordId::Mod, PrecedenceTier::Modulo, false),
];

/// Return the full metadata entry for an operator.
pub const fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id.index()]
}

/// Return the spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve a symbol spelling to its identifier.
///
/// ## Notes
/// - Word operators are not resolved here; use [`for_keyword`] with the lexed keyword.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.keyword.is_none() && o.spelling == spelling)
        .map(|o| o.id)
}

/// Return the binary precedence tier of an operator, if it takes part in the binary chain.
pub const fn tier_of(id: OperatorId) -> Option<PrecedenceTier> {
    info_for(id).tier
}

/// Resolve a keyword to the word operator it spells, if any.
pub fn for_keyword(id: KeywordId) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.keyword == Some(id)).map(|o| o.id)
}

/// Map a compound assignment operator to the binary operator it applies.
pub fn compound_base(id: OperatorId) -> Option<OperatorId> {
    match id {
        OperatorId::PlusEq => Some(OperatorId::Plus),
        OperatorId::MinusEq => Some(OperatorId::Minus),
        OperatorId::StarEq => Some(OperatorId::Star),
        OperatorId::SlashEq => Some(OperatorId::Slash),
        OperatorId::BackslashEq => Some(OperatorId::Backslash),
        OperatorId::CaretEq => Some(OperatorId::Caret),
        OperatorId::AmpersandEq => Some(OperatorId::Ampersand),
        OperatorId::ShiftLeftEq => Some(OperatorId::ShiftLeft),
        OperatorId::ShiftRightEq => Some(OperatorId::ShiftRight),
        _ => None,
    }
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, tier: Option<PrecedenceTier>, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        tier,
        prefix,
        keyword: None,
    }
}

const fn word(id: OperatorId, keyword: KeywordId, tier: PrecedenceTier, prefix: bool) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling: super::keywords::KEYWORDS[keyword.index()].canonical,
        tier: Some(tier),
        prefix,
        keyword: Some(keyword),
    }
}
