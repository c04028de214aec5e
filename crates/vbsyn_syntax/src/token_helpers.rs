//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::lexer::{Token, TokenKind};
use vbsyn_core::lang::keywords::{self, KeywordId};
use vbsyn_core::lang::operators::OperatorId;
use vbsyn_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for tokens that end a statement: `Eol`, `:` and `Eof`.
    pub fn is_statement_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::Eol | TokenKind::Eof | TokenKind::Punctuation(PunctuationId::Colon)
        )
    }

    /// Return `true` for an identifier or a contextual keyword, both usable as names.
    pub fn is_identifier_like(&self) -> bool {
        match self {
            TokenKind::Ident(_) => true,
            TokenKind::Keyword(id) => keywords::is_contextual(*id),
            _ => false,
        }
    }

    /// Return `true` for the XML literal token kinds.
    pub fn is_xml(&self) -> bool {
        matches!(
            self,
            TokenKind::XmlOpenTag
                | TokenKind::XmlCloseTag
                | TokenKind::XmlOpenEndTag
                | TokenKind::XmlEmptyTagClose
                | TokenKind::XmlName(_)
                | TokenKind::XmlEq
                | TokenKind::XmlAttributeValue(_)
                | TokenKind::XmlText(_)
                | TokenKind::XmlComment(_)
                | TokenKind::XmlCData(_)
                | TokenKind::XmlProcessingInstruction(_)
                | TokenKind::XmlEmbedOpen
                | TokenKind::XmlEmbedClose
        )
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }

    /// The identifier text if this token can serve as a name (identifiers and contextual keywords).
    pub fn name_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            TokenKind::Keyword(id) if keywords::is_contextual(*id) => Some(&self.text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Span::default())
    }

    #[test]
    fn contextual_keywords_are_identifier_like() {
        assert!(TokenKind::Keyword(KeywordId::From).is_identifier_like());
        assert!(!TokenKind::Keyword(KeywordId::Dim).is_identifier_like());
        assert_eq!(tok(TokenKind::Keyword(KeywordId::Key), "key").name_text(), Some("key"));
        assert_eq!(tok(TokenKind::Keyword(KeywordId::Class), "Class").name_text(), None);
    }

    #[test]
    fn statement_terminators() {
        assert!(TokenKind::Eol.is_statement_terminator());
        assert!(TokenKind::Punctuation(PunctuationId::Colon).is_statement_terminator());
        assert!(!TokenKind::Punctuation(PunctuationId::Comma).is_statement_terminator());
    }
}
