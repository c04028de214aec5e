//! Numeric literal scanning.
//!
//! Decimal literals may carry a fraction, an exponent and a type suffix. `&H`, `&O` and `&B`
//! prefixes select hexadecimal, octal and binary digits. Values that do not fit their type are
//! reported and replaced by zero.

use super::{Lexer, LiteralValue, TokenKind};
use crate::ast::{Location, Span};
use crate::diagnostics::DiagnosticCode;

/// What a type suffix says about the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    None,
    Integral,
    Floating,
    Decimal,
}

impl Lexer<'_> {
    /// Scan a decimal literal whose first character (a digit or `.`) is already consumed.
    pub(super) fn scan_number(&mut self, start: Location, first: char) {
        let mut is_float = first == '.';
        self.consume_digits(10);

        if !is_float && self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits(10);
            is_float = true;
        }

        if matches!(self.peek(), Some('e' | 'E')) && self.exponent_ahead() {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.consume_digits(10);
            is_float = true;
        }

        let source = self.source;
        let digits = &source[start.offset..self.current_pos];
        let suffix = self.scan_suffix();

        let value = match suffix {
            Suffix::Decimal => Some(LiteralValue::Decimal(digits.to_string())),
            Suffix::Floating => digits.parse::<f64>().ok().map(LiteralValue::Floating),
            Suffix::None | Suffix::Integral if is_float => digits.parse::<f64>().ok().map(LiteralValue::Floating),
            Suffix::None | Suffix::Integral => digits.parse::<i64>().ok().map(LiteralValue::Integer),
        };
        self.finish_number(value, start);
    }

    /// `&H`, `&O` or `&B` followed by at least one digit of that radix.
    pub(super) fn radix_literal_ahead(&self) -> bool {
        let mut rest = self.rest().chars();
        let radix = match rest.next() {
            Some('h' | 'H') => 16,
            Some('o' | 'O') => 8,
            Some('b' | 'B') => 2,
            _ => return false,
        };
        rest.next().is_some_and(|c| c.is_digit(radix))
    }

    /// Scan a prefixed literal; the `&` is already consumed.
    pub(super) fn scan_radix_number(&mut self, start: Location) {
        let radix = match self.advance() {
            Some('h' | 'H') => 16,
            Some('o' | 'O') => 8,
            _ => 2,
        };
        let digits_start = self.current_pos;
        self.consume_digits(radix);
        let source = self.source;
        let digits = &source[digits_start..self.current_pos];

        let value = match self.scan_suffix() {
            Suffix::Floating | Suffix::Decimal => None,
            Suffix::None | Suffix::Integral => u64::from_str_radix(digits, radix)
                .ok()
                .map(|v| LiteralValue::Integer(v as i64)),
        };
        self.finish_number(value, start);
    }

    fn finish_number(&mut self, value: Option<LiteralValue>, start: Location) {
        let value = match value {
            Some(value) => value,
            None => {
                let span = Span::new(start, self.here());
                let source = self.source;
                let text = &source[start.offset..self.current_pos];
                self.error(DiagnosticCode::InvalidNumber, format!("invalid numeric literal '{text}'"), span);
                LiteralValue::Integer(0)
            }
        };
        self.add_token(TokenKind::Literal(value), start);
    }

    fn consume_digits(&mut self, radix: u32) {
        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn exponent_ahead(&self) -> bool {
        let mut rest = self.rest().chars().skip(1);
        match rest.next() {
            Some('+' | '-') => rest.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Consume a type suffix, if one follows the digits.
    fn scan_suffix(&mut self) -> Suffix {
        let rest = self.rest();
        let mut chars = rest.chars();
        let first = chars.next().map(|c| c.to_ascii_uppercase());
        let second = chars.next().map(|c| c.to_ascii_uppercase());
        let third = chars.next();
        let word_ends = |c: Option<char>| !c.is_some_and(|c| c.is_alphanumeric() || c == '_');

        let (len, suffix) = match (first, second) {
            (Some('U'), Some('S' | 'I' | 'L')) if word_ends(third) => (2, Suffix::Integral),
            (Some('S' | 'I' | 'L'), next) if word_ends(next) => (1, Suffix::Integral),
            (Some('F' | 'R'), next) if word_ends(next) => (1, Suffix::Floating),
            (Some('D'), next) if word_ends(next) => (1, Suffix::Decimal),
            (Some('%' | '&'), next) if word_ends(next) => (1, Suffix::Integral),
            (Some('!' | '#'), next) if word_ends(next) => (1, Suffix::Floating),
            (Some('@'), _) => (1, Suffix::Decimal),
            _ => (0, Suffix::None),
        };
        self.advance_bytes(len);
        suffix
    }
}
