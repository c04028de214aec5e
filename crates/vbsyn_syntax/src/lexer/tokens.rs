//! Token types for the Visual Basic lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved and contextual words (including word operators like `AndAlso`)
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! XML literal content is tokenized separately (`Xml*` kinds); inside `<%= ... %>` holes the
//! ordinary kinds resume.
//!
//! ## Notes
//! - Every token keeps the exact source `text` it was scanned from; identifiers and literals also
//!   carry a decoded payload.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use vbsyn_core::lang::keywords::{self, KeywordId};
use vbsyn_core::lang::operators::OperatorId;
use vbsyn_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    /// Identifier without `[]` escaping and without its type character.
    Ident(String),
    Literal(LiteralValue),

    // ========== XML literals ==========
    /// `<` opening a start tag.
    XmlOpenTag,
    /// `>` closing a start or end tag.
    XmlCloseTag,
    /// `</`
    XmlOpenEndTag,
    /// `/>`
    XmlEmptyTagClose,
    XmlName(String),
    /// `=` between an attribute name and its value.
    XmlEq,
    /// Attribute value without quotes, entities decoded.
    XmlAttributeValue(String),
    XmlText(String),
    XmlComment(String),
    XmlCData(String),
    XmlProcessingInstruction(String),
    /// `<%=`
    XmlEmbedOpen,
    /// `%>`
    XmlEmbedClose,

    // ========== Layout ==========
    /// End of a logical line.
    Eol,
    Eof,
}

/// Decoded literal payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Floating(f64),
    Decimal(String),
    String(String),
    Char(char),
    Date(String),
}

/// A token with its kind, source text and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Resolve an identifier spelling to a keyword id (case-insensitive).
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
