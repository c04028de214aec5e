//! Reference lexer for Visual Basic source.
//!
//! Handles tokenization including:
//! - Case-insensitive keywords, `[escaped]` identifiers and type characters (`x%`, `name$`)
//! - Numeric literals (`&H`/`&O`/`&B`, exponents, type suffixes), strings with `""` escapes,
//!   `"x"c` characters and `#date#` literals
//! - `'` and `REM` comments, `#Region`-style directive lines (skipped)
//! - Explicit (` _`) and implicit line continuation
//! - XML literals in expression position, including `<%= %>` holes
//!
//! The parser never sees source text; any producer of a token vector that ends in `Eof` can drive
//! it. This lexer always produces such a vector and reports lexical problems as diagnostics.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, LiteralValue)
//! - `strings` - String/char/date literals, escaped identifiers, comments
//! - `numbers` - Numeric literal scanning
//! - `xml` - XML literal mode

mod numbers;
mod strings;
pub mod tokens;
mod xml;

pub use tokens::{LiteralValue, Token, TokenKind, keyword_id};

use crate::ast::{Location, Span};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use vbsyn_core::lang::keywords::{self, KeywordCategory, KeywordId};
use vbsyn_core::lang::operators::OperatorId;
use vbsyn_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Mode stack (empty = ordinary code):
//
// [code] → `<name` in operand position → [Tag] → `>` → [Content] → `</name>` → [code]
//                                          ↓                ↓
//                                        `<%=` → [Embedded] ← `<%=`
//                                                     ↓
//                                                   `%>` → back to Tag/Content
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Ordinary code inside a `<%= ... %>` hole.
    Embedded,
    /// Inside a start tag (after `<`) or an end tag (after `</`).
    Tag { closing: bool },
    /// Between the tags of an open element.
    Content,
    /// After an `<?xml ...?>` declaration, before the root element.
    Prolog,
}

/// Output of [`lex`]: the token stream (always terminated by `Eol Eof` or just `Eof`) and any
/// lexical diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexer for Visual Basic source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: u32,
    line_start: usize,
    modes: Vec<Mode>,
    /// Parenthesis depth on the current logical line.
    paren_depth: usize,
    /// A `From`/`Aggregate` query began on the current logical line.
    query_open: bool,
    /// The current logical line is a member header (`Sub`, `Function`, `Property`, ...).
    declaration_line: bool,
    /// Between `.<` / `...<` and the closing `>` of an XML axis name.
    axis_name_open: bool,
    /// The last token closed an XML axis name; it must not continue the line.
    last_closes_axis: bool,
    /// The input is a fragment that may open with an expression.
    expression_start: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            line_start: 0,
            modes: Vec::new(),
            paren_depth: 0,
            query_open: false,
            declaration_line: false,
            axis_name_open: false,
            last_closes_axis: false,
            expression_start: false,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Treat the very start of the input as an operand position, so a fragment may open with
    /// an XML literal.
    pub fn starting_in_expression(mut self) -> Self {
        self.expression_start = true;
        self
    }

    /// Tokenize the entire source.
    pub fn tokenize(mut self) -> Lexed {
        while !self.is_at_end() {
            match self.modes.last().copied() {
                None | Some(Mode::Embedded) => self.scan_token(),
                Some(Mode::Tag { closing }) => self.scan_xml_tag(closing),
                Some(Mode::Content) => self.scan_xml_content(),
                Some(Mode::Prolog) => self.scan_xml_prolog(),
            }
        }

        let end = self.here();
        if !self.modes.is_empty() {
            self.error(DiagnosticCode::UnterminatedXml, "unterminated XML literal", Span::point(end));
            self.modes.clear();
        }
        if !matches!(self.tokens.last().map(|t| &t.kind), None | Some(TokenKind::Eol)) {
            self.tokens.push(Token::new(TokenKind::Eol, "", Span::point(end)));
        }
        self.tokens.push(Token::new(TokenKind::Eof, "", Span::point(end)));

        Lexed {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.current_pos;
        }
        Some(c)
    }

    /// Advance until `byte_len` more bytes have been consumed.
    fn advance_bytes(&mut self, byte_len: usize) {
        let target = self.current_pos + byte_len;
        while self.current_pos < target && self.advance().is_some() {}
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Current location.
    fn here(&self) -> Location {
        let column = self.source[self.line_start..self.current_pos].chars().count() as u32 + 1;
        Location::new(self.current_pos, self.line, column)
    }

    fn skip_blanks(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' || c == '\u{a0}' || c == '\u{feff}' {
                self.advance();
            } else {
                break;
            }
        }
    }

    // ========================================================================
    // Token emission
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: Location) {
        let source = self.source;
        let span = Span::new(start, self.here());
        self.tokens.push(Token::new(kind, &source[start.offset..self.current_pos], span));
        self.last_closes_axis = false;
    }

    fn add_op(&mut self, id: OperatorId, start: Location) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: Location) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: Location, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(code, message, span));
    }

    fn last_kind(&self) -> Option<&TokenKind> {
        self.tokens.last().map(|t| &t.kind)
    }

    fn at_line_start(&self) -> bool {
        matches!(self.last_kind(), None | Some(TokenKind::Eol))
    }

    fn in_embedded(&self) -> bool {
        self.modes.last() == Some(&Mode::Embedded)
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        self.skip_blanks();
        let start = self.here();
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '\n' => self.newline(start),
            '\'' | '\u{2018}' | '\u{2019}' => self.skip_comment(),
            '_' if self.is_explicit_continuation() => self.skip_to_next_line(),
            '#' if self.at_line_start() && self.peek().is_some_and(|c| c.is_ascii_alphabetic()) => {
                self.skip_comment()
            }
            '#' => self.scan_date(start),
            '"' | '\u{201c}' | '\u{201d}' => self.scan_string(start),
            '[' => self.scan_escaped_identifier(start),
            '0'..='9' => self.scan_number(start, c),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start, c),
            '&' if self.radix_literal_ahead() => self.scan_radix_number(start),
            '<' if self.xml_literal_ahead() => self.begin_xml(start),
            '%' if self.in_embedded() && self.peek() == Some('>') => {
                self.advance();
                self.add_token(TokenKind::XmlEmbedClose, start);
                self.modes.pop();
            }

            // Operators and punctuation
            '+' => self.operator(start, OperatorId::Plus, &[('=', OperatorId::PlusEq)]),
            '-' => self.operator(start, OperatorId::Minus, &[('=', OperatorId::MinusEq)]),
            '*' => self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '/' => self.operator(start, OperatorId::Slash, &[('=', OperatorId::SlashEq)]),
            '\\' => self.operator(start, OperatorId::Backslash, &[('=', OperatorId::BackslashEq)]),
            '^' => self.operator(start, OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '&' => self.operator(start, OperatorId::Ampersand, &[('=', OperatorId::AmpersandEq)]),
            '=' => self.add_op(OperatorId::Eq, start),
            '<' => self.scan_less_than(start),
            '>' => self.scan_greater_than(start),
            ':' => self.operator_or_punct(start, '=', OperatorId::ColonEq, PunctuationId::Colon),
            ',' => self.add_punct(PunctuationId::Comma, start),
            '?' => self.add_punct(PunctuationId::Question, start),
            '!' => self.add_punct(PunctuationId::Exclamation, start),
            '.' => {
                if self.rest().starts_with("..") {
                    self.advance_bytes(2);
                    self.add_punct(PunctuationId::TripleDot, start);
                } else if self.match_char('@') {
                    self.add_punct(PunctuationId::DotAt, start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }
            '(' => {
                self.paren_depth += 1;
                self.add_punct(PunctuationId::LParen, start);
            }
            ')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.add_punct(PunctuationId::RParen, start);
            }
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                let span = Span::new(start, self.here());
                self.error(DiagnosticCode::InvalidCharacter, format!("unexpected character '{c}'"), span);
            }
        }
    }

    fn operator_or_punct(&mut self, start: Location, next: char, op: OperatorId, punct: PunctuationId) {
        if self.match_char(next) {
            self.add_op(op, start);
        } else {
            self.add_punct(punct, start);
        }
    }

    fn scan_less_than(&mut self, start: Location) {
        let opens_axis = matches!(
            self.last_kind(),
            Some(TokenKind::Punctuation(PunctuationId::Dot | PunctuationId::TripleDot))
        );
        if opens_axis {
            self.axis_name_open = true;
            self.add_op(OperatorId::Lt, start);
        } else if self.match_char('=') {
            self.add_op(OperatorId::LtEq, start);
        } else if self.match_char('>') {
            self.add_op(OperatorId::NotEq, start);
        } else if self.match_char('<') {
            self.operator(start, OperatorId::ShiftLeft, &[('=', OperatorId::ShiftLeftEq)]);
        } else {
            self.add_op(OperatorId::Lt, start);
        }
    }

    fn scan_greater_than(&mut self, start: Location) {
        if self.axis_name_open {
            self.axis_name_open = false;
            self.add_op(OperatorId::Gt, start);
            self.last_closes_axis = true;
        } else if self.match_char('=') {
            self.add_op(OperatorId::GtEq, start);
        } else if self.match_char('>') {
            self.operator(start, OperatorId::ShiftRight, &[('=', OperatorId::ShiftRightEq)]);
        } else {
            self.add_op(OperatorId::Gt, start);
        }
    }

    // ========================================================================
    // Line handling
    // ========================================================================

    fn newline(&mut self, start: Location) {
        if self.in_embedded() || self.continues_after_last_token() || self.next_line_continues() {
            return;
        }
        self.query_open = false;
        self.declaration_line = false;
        self.paren_depth = 0;
        self.axis_name_open = false;
        if !self.at_line_start() {
            self.add_token(TokenKind::Eol, start);
        }
    }

    /// `_` preceded by whitespace and followed only by blanks (or a comment) up to the line end.
    fn is_explicit_continuation(&self) -> bool {
        let before = self.source[..self.current_pos - 1].chars().next_back();
        if !matches!(before, None | Some(' ' | '\t')) {
            return false;
        }
        let tail = self.rest().trim_start_matches([' ', '\t', '\r']);
        tail.is_empty() || tail.starts_with('\n') || tail.starts_with('\'')
    }

    fn skip_to_next_line(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Implicit continuation after a comma, an opening bracket or a binary operator.
    fn continues_after_last_token(&self) -> bool {
        if self.last_closes_axis {
            return false;
        }
        if matches!(self.last_kind(), Some(TokenKind::Operator(OperatorId::Gt))) && self.closes_line_level_angle() {
            return false;
        }
        match self.last_kind() {
            Some(TokenKind::Punctuation(p)) => {
                matches!(p, PunctuationId::Comma | PunctuationId::LParen | PunctuationId::LBrace)
            }
            Some(TokenKind::Operator(_)) => true,
            Some(TokenKind::Keyword(id)) => matches!(
                id,
                KeywordId::And
                    | KeywordId::AndAlso
                    | KeywordId::Or
                    | KeywordId::OrElse
                    | KeywordId::Xor
                    | KeywordId::Mod
                    | KeywordId::Like
                    | KeywordId::Is
                    | KeywordId::IsNot
            ),
            _ => false,
        }
    }

    /// `Imports <xmlns:...>` and `<Assembly: ...>` stand on their own line.
    fn closes_line_level_angle(&self) -> bool {
        let line_start = self
            .tokens
            .iter()
            .rposition(|t| t.kind == TokenKind::Eol)
            .map_or(0, |i| i + 1);
        match &self.tokens[line_start..] {
            [first, ..] if first.kind.is_keyword(KeywordId::Imports) => true,
            [first, second, ..] => {
                first.kind.is_operator(OperatorId::Lt)
                    && (second.kind.is_keyword(KeywordId::Assembly) || second.kind.is_keyword(KeywordId::Module))
            }
            _ => false,
        }
    }

    /// Implicit continuation before a closing bracket, or before a query clause while a query is open.
    fn next_line_continues(&self) -> bool {
        let next = self.rest().trim_start_matches([' ', '\t', '\r', '\n']);
        if next.starts_with(')') || next.starts_with('}') {
            return true;
        }
        if !self.query_open {
            return false;
        }
        let word: String = next.chars().take_while(|c| is_ident_continue(*c)).collect();
        let Some(id) = keywords::from_str(&word) else {
            return false;
        };
        if id == KeywordId::Select {
            let after = next[word.len()..].trim_start();
            let following: String = after.chars().take_while(|c| is_ident_continue(*c)).collect();
            return !following.eq_ignore_ascii_case("Case");
        }
        matches!(
            id,
            KeywordId::Where
                | KeywordId::Order
                | KeywordId::Group
                | KeywordId::Join
                | KeywordId::Let
                | KeywordId::Distinct
                | KeywordId::Skip
                | KeywordId::Take
                | KeywordId::Into
                | KeywordId::From
                | KeywordId::Aggregate
                | KeywordId::On
        )
    }

    /// The previous token leaves the lexer expecting an operand.
    fn expects_operand(&self) -> bool {
        match self.last_kind() {
            None => self.expression_start,
            Some(TokenKind::Operator(op)) => matches!(
                op,
                OperatorId::Eq
                    | OperatorId::ColonEq
                    | OperatorId::Ampersand
                    | OperatorId::AmpersandEq
                    | OperatorId::Plus
                    | OperatorId::NotEq
            ),
            Some(TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::Comma)) => {
                !(self.declaration_line && self.paren_depth > 0)
            }
            Some(TokenKind::Punctuation(PunctuationId::LBrace)) | Some(TokenKind::XmlEmbedOpen) => true,
            Some(TokenKind::Keyword(id)) => matches!(
                id,
                KeywordId::Return | KeywordId::Throw | KeywordId::In | KeywordId::Select | KeywordId::Yield
            ),
            _ => false,
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: Location) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        let source = self.source;
        let spelling = &source[start.offset..self.current_pos];
        let has_type_char = self.scan_type_character();

        if !has_type_char {
            if spelling.eq_ignore_ascii_case("REM") {
                self.skip_comment();
                return;
            }
            if let Some(id) = keyword_id(spelling) {
                self.keyword(id, start);
                return;
            }
        }
        self.add_token(TokenKind::Ident(spelling.to_string()), start);
    }

    /// Consume a trailing type character (`%&@!#$`), if any.
    fn scan_type_character(&mut self) -> bool {
        match self.peek() {
            Some('%' | '@' | '$') => {
                // `%>` closes an embedded expression.
                if self.peek() == Some('%') && self.peek_next() == Some('>') {
                    return false;
                }
                self.advance();
                true
            }
            Some('&' | '!' | '#') => {
                let next = self.peek_next();
                if next.is_some_and(|c| is_ident_continue(c) || c == '"') {
                    return false;
                }
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn keyword(&mut self, id: KeywordId, start: Location) {
        match id {
            KeywordId::From | KeywordId::Aggregate => {
                let next = self.rest().trim_start_matches([' ', '\t']).chars().next();
                if self.expects_operand() && next.is_some_and(|c| is_ident_start(c) || c == '[') {
                    self.query_open = true;
                }
            }
            KeywordId::Sub
            | KeywordId::Function
            | KeywordId::Property
            | KeywordId::Event
            | KeywordId::Operator
            | KeywordId::Delegate
            | KeywordId::Declare => {
                if self.only_modifiers_on_line() {
                    self.declaration_line = true;
                }
            }
            _ => {}
        }
        self.add_token(TokenKind::Keyword(id), start);
    }

    fn only_modifiers_on_line(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .take_while(|t| !t.kind.is_statement_terminator())
            .all(|t| matches!(t.kind, TokenKind::Keyword(k) if keywords::category(k) == KeywordCategory::Modifier))
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Lexed {
    let lexed = Lexer::new(source).tokenize();
    tracing::trace!(tokens = lexed.tokens.len(), diagnostics = lexed.diagnostics.len(), "lexed");
    lexed
}

/// Lex a snippet: a bare statement list or a single expression.
///
/// Same as [`lex`], except that a leading `<` starts an XML literal.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_snippet(source: &str) -> Lexed {
    Lexer::new(source).starting_in_expression().tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let lexed = lex(source);
        assert!(lexed.diagnostics.is_empty(), "unexpected diagnostics: {:?}", lexed.diagnostics);
        lexed.tokens.into_iter().map(|t| t.kind).collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    fn int(v: i64) -> TokenKind {
        TokenKind::Literal(LiteralValue::Integer(v))
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let tokens = kinds(k.canonical);
            assert_eq!(tokens.len(), 3, "expected keyword + Eol + Eof for {:?}, got {:?}", k.id, tokens);
            assert!(tokens[0].is_keyword(k.id));
        }
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let tokens = kinds("dim DIM Dim");
        assert!(tokens[..3].iter().all(|t| t.is_keyword(KeywordId::Dim)));
    }

    #[test]
    fn test_symbol_operator_parity() {
        use vbsyn_core::lang::operators;

        for o in operators::OPERATORS.iter().filter(|o| o.keyword.is_none()) {
            let tokens = kinds(&format!("a {} b", o.spelling));
            assert!(tokens[1].is_operator(o.id), "{:?} lexed as {:?}", o.spelling, tokens[1]);
        }
    }

    #[test]
    fn test_punctuation() {
        let tokens = kinds("a.b!c, d? : e.@f ...g (x) {y}");
        assert!(tokens[1].is_punctuation(PunctuationId::Dot));
        assert!(tokens[3].is_punctuation(PunctuationId::Exclamation));
        assert!(tokens[5].is_punctuation(PunctuationId::Comma));
        assert!(tokens[7].is_punctuation(PunctuationId::Question));
        assert!(tokens[8].is_punctuation(PunctuationId::Colon));
        assert!(tokens[10].is_punctuation(PunctuationId::DotAt));
        assert!(tokens[12].is_punctuation(PunctuationId::TripleDot));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("42 &HFF &O17 &B101 1.5 2E3 10D 7L 3.0F");
        assert_eq!(tokens[0], int(42));
        assert_eq!(tokens[1], int(255));
        assert_eq!(tokens[2], int(15));
        assert_eq!(tokens[3], int(5));
        assert_eq!(tokens[4], TokenKind::Literal(LiteralValue::Floating(1.5)));
        assert_eq!(tokens[5], TokenKind::Literal(LiteralValue::Floating(2000.0)));
        assert_eq!(tokens[6], TokenKind::Literal(LiteralValue::Decimal("10".into())));
        assert_eq!(tokens[7], int(7));
        assert_eq!(tokens[8], TokenKind::Literal(LiteralValue::Floating(3.0)));
    }

    #[test]
    fn test_strings_chars_and_dates() {
        let tokens = kinds(r#""say ""hi""" "x"c #1/2/2003#"#);
        assert_eq!(tokens[0], TokenKind::Literal(LiteralValue::String("say \"hi\"".into())));
        assert_eq!(tokens[1], TokenKind::Literal(LiteralValue::Char('x')));
        assert_eq!(tokens[2], TokenKind::Literal(LiteralValue::Date("1/2/2003".into())));
    }

    #[test]
    fn test_unterminated_string_is_reported() {
        let lexed = lex("x = \"abc\ny = 1");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics[0].code, DiagnosticCode::UnterminatedString);
        assert!(lexed.tokens.iter().any(|t| t.kind == ident("y")));
    }

    #[test]
    fn test_escaped_identifiers_and_type_characters() {
        let tokens = kinds("[Class] = name$ & count%");
        assert_eq!(tokens[0], ident("Class"));
        assert_eq!(tokens[2], ident("name"));
        assert_eq!(tokens[4], ident("count"));
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("x = 1 ' trailing\nREM whole line\ny = 2");
        assert_eq!(tokens, vec![
            ident("x"),
            TokenKind::Operator(OperatorId::Eq),
            int(1),
            TokenKind::Eol,
            ident("y"),
            TokenKind::Operator(OperatorId::Eq),
            int(2),
            TokenKind::Eol,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_blank_lines_collapse() {
        let tokens = kinds("\n\nx\n\n\ny\n");
        assert_eq!(tokens, vec![ident("x"), TokenKind::Eol, ident("y"), TokenKind::Eol, TokenKind::Eof]);
    }

    #[test]
    fn test_explicit_line_continuation() {
        let tokens = kinds("x = 1 + _\n    2");
        assert!(!tokens[..tokens.len() - 2].contains(&TokenKind::Eol));
    }

    #[test]
    fn test_implicit_line_continuation() {
        let tokens = kinds("Foo(a,\n    b\n)\nx = 1 +\n 2");
        let eols = tokens.iter().filter(|t| **t == TokenKind::Eol).count();
        assert_eq!(eols, 2);
    }

    #[test]
    fn test_query_clauses_continue_the_line() {
        let tokens = kinds("Dim q = From c In customers\n    Where c.Age > 1\n    Select c\nSelect Case q\nEnd Select");
        let eols = tokens.iter().filter(|t| **t == TokenKind::Eol).count();
        assert_eq!(eols, 3);
    }

    #[test]
    fn test_directive_lines_are_skipped() {
        let tokens = kinds("#Region \"x\"\nx\n#End Region");
        assert_eq!(tokens, vec![ident("x"), TokenKind::Eol, TokenKind::Eof]);
    }

    #[test]
    fn test_attribute_is_not_xml() {
        let tokens = kinds("<Serializable>\nClass A\nEnd Class");
        assert!(tokens[0].is_operator(OperatorId::Lt));
        assert!(tokens[2].is_operator(OperatorId::Gt));
        assert!(tokens[3].is_keyword(KeywordId::Class));
    }

    #[test]
    fn test_snippet_may_open_with_xml() {
        let lexed = lex_snippet("<a/>");
        assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
        assert_eq!(lexed.tokens[0].kind, TokenKind::XmlOpenTag);

        let tokens = kinds("<a/>");
        assert!(tokens[0].is_operator(OperatorId::Lt));
    }

    #[test]
    fn test_xml_literal() {
        let tokens = kinds("x = <a b=\"1\"><%= y %>text</a>");
        assert_eq!(tokens[2], TokenKind::XmlOpenTag);
        assert_eq!(tokens[3], TokenKind::XmlName("a".into()));
        assert_eq!(tokens[4], TokenKind::XmlName("b".into()));
        assert_eq!(tokens[5], TokenKind::XmlEq);
        assert_eq!(tokens[6], TokenKind::XmlAttributeValue("1".into()));
        assert_eq!(tokens[7], TokenKind::XmlCloseTag);
        assert_eq!(tokens[8], TokenKind::XmlEmbedOpen);
        assert_eq!(tokens[9], ident("y"));
        assert_eq!(tokens[10], TokenKind::XmlEmbedClose);
        assert_eq!(tokens[11], TokenKind::XmlText("text".into()));
        assert_eq!(tokens[12], TokenKind::XmlOpenEndTag);
        assert_eq!(tokens[13], TokenKind::XmlName("a".into()));
        assert_eq!(tokens[14], TokenKind::XmlCloseTag);
        assert_eq!(tokens[15], TokenKind::Eol);
    }

    #[test]
    fn test_xml_axis_does_not_continue_line() {
        let tokens = kinds("y = x.<child>\nz = 1");
        assert!(tokens.contains(&TokenKind::Eol));
        assert_eq!(tokens.iter().filter(|t| **t == TokenKind::Eol).count(), 2);
    }

    #[test]
    fn test_global_attribute_ends_its_line() {
        let tokens = kinds("<Assembly: A>\nImports <xmlns:p=\"urn:x\">\nClass C\nEnd Class");
        assert_eq!(tokens[5], TokenKind::Eol);
        assert_eq!(tokens.iter().filter(|t| **t == TokenKind::Eol).count(), 4);
    }

    #[test]
    fn test_parameter_attribute_is_not_xml() {
        let tokens = kinds("Sub Foo(<Out> ByRef x As Integer)");
        assert!(tokens[3].is_operator(OperatorId::Lt));
    }

    #[test]
    fn test_locations_are_one_based() {
        let lexed = lex("a\n  bc");
        let bc = &lexed.tokens[2];
        assert_eq!(bc.kind, ident("bc"));
        assert_eq!((bc.span.start.line, bc.span.start.column), (2, 3));
        assert_eq!((bc.span.end.line, bc.span.end.column), (2, 5));
        assert_eq!(bc.text, "bc");
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
