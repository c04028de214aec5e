//! String, character and date literals, `[escaped]` identifiers and comments.
//!
//! Strings use doubled quotes as the only escape (`"say ""hi"""`); a trailing `c` turns a
//! one-character string into a `Char`. None of these constructs may span lines.

use super::{Lexer, LiteralValue, TokenKind, is_ident_continue};
use crate::ast::{Location, Span};
use crate::diagnostics::DiagnosticCode;

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\u{201c}' | '\u{201d}')
}

impl Lexer<'_> {
    /// Scan a string or char literal; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: Location) {
        let mut value = String::new();
        let mut terminated = false;

        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
            if is_quote(c) {
                if self.peek().is_some_and(is_quote) {
                    self.advance();
                    value.push('"');
                } else {
                    terminated = true;
                    break;
                }
            } else {
                value.push(c);
            }
        }

        if !terminated {
            let span = Span::new(start, self.here());
            self.error(DiagnosticCode::UnterminatedString, "unterminated string literal", span);
            self.add_token(TokenKind::Literal(LiteralValue::String(value)), start);
            return;
        }

        let char_suffix = matches!(self.peek(), Some('c' | 'C')) && !self.peek_next().is_some_and(is_ident_continue);
        if !char_suffix {
            self.add_token(TokenKind::Literal(LiteralValue::String(value)), start);
            return;
        }

        self.advance();
        let mut chars = value.chars();
        let literal = match (chars.next(), chars.next()) {
            (Some(c), None) => LiteralValue::Char(c),
            _ => {
                let span = Span::new(start, self.here());
                self.error(
                    DiagnosticCode::InvalidCharacter,
                    "character literal must contain exactly one character",
                    span,
                );
                LiteralValue::Char(value.chars().next().unwrap_or('\0'))
            }
        };
        self.add_token(TokenKind::Literal(literal), start);
    }

    /// Scan a `#...#` date literal; the opening `#` is already consumed.
    pub(super) fn scan_date(&mut self, start: Location) {
        let rest = self.rest();
        let line = rest.split('\n').next().unwrap_or_default();
        match line.find('#') {
            Some(end) => {
                let value = line[..end].trim().to_string();
                self.advance_bytes(end + 1);
                self.add_token(TokenKind::Literal(LiteralValue::Date(value)), start);
            }
            None => {
                let value = line.trim().to_string();
                self.advance_bytes(line.trim_end_matches('\r').len());
                let span = Span::new(start, self.here());
                self.error(DiagnosticCode::UnterminatedDate, "unterminated date literal", span);
                self.add_token(TokenKind::Literal(LiteralValue::Date(value)), start);
            }
        }
    }

    /// Scan a `[name]` identifier; the `[` is already consumed.
    pub(super) fn scan_escaped_identifier(&mut self, start: Location) {
        let rest = self.rest();
        let line = rest.split('\n').next().unwrap_or_default();
        match line.find(']') {
            Some(end) => {
                let name = line[..end].to_string();
                self.advance_bytes(end + 1);
                self.scan_type_character();
                self.add_token(TokenKind::Ident(name), start);
            }
            None => {
                let span = Span::new(start, self.here());
                self.error(DiagnosticCode::InvalidCharacter, "unexpected character '['", span);
            }
        }
    }

    /// Skip to the end of the line, leaving the newline for the caller.
    pub(super) fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }
}
