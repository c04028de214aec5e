/// Token cursor.
///
/// A non-mutating `peek(k)` view over the token slice plus `advance()`. Lookahead past the end
/// clamps to the trailing `Eof`, so every `peek` is total.
///
/// ## Notes
/// - `peek(0)` is `current()`; after `advance()` the new `current()` is the old `peek(1)`.
/// - Returned tokens borrow the slice (`'a`), not the parser, so callers can keep them across
///   `&mut self` calls.
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn current(&self) -> &'a Token {
        self.peek(0)
    }

    /// Return the token `k` positions ahead without consuming anything.
    fn peek(&self, k: usize) -> &'a Token {
        let tokens = self.tokens;
        let idx = (self.pos + k).min(tokens.len() - 1);
        &tokens[idx]
    }

    fn peek_kind(&self, k: usize) -> &'a TokenKind {
        &self.peek(k).kind
    }

    /// Consume the current token and return it. `Eof` is never consumed.
    fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Start location of the current token.
    fn start(&self) -> Location {
        self.current().span.start
    }

    /// End location of the most recently consumed token.
    fn prev_end(&self) -> Location {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span.end,
            None => self.start(),
        }
    }

    /// Span from `start` to the end of the last consumed token, never inverted.
    ///
    /// A construct still open at `Eof` extends to the end of the file.
    fn span_from(&self, start: Location) -> Span {
        let end = if self.is_at_end() { self.start() } else { self.prev_end() };
        Span::new(start, end.max(start))
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.current().kind.is_keyword(id)
    }

    fn check_keyword_at(&self, k: usize, id: KeywordId) -> bool {
        self.peek_kind(k).is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.current().kind.is_punctuation(id)
    }

    fn check_punct_at(&self, k: usize, id: PunctuationId) -> bool {
        self.peek_kind(k).is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.current().kind.is_operator(id)
    }

    fn check_op_at(&self, k: usize, id: OperatorId) -> bool {
        self.peek_kind(k).is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// `Eol`, `:` or `Eof`.
    fn at_terminator(&self) -> bool {
        self.current().kind.is_statement_terminator()
    }

    /// `Eol` or `Eof`.
    fn at_end_of_line(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eol | TokenKind::Eof)
    }

    /// The current token starts a logical line.
    fn at_line_start(&self) -> bool {
        match self.pos.checked_sub(1) {
            Some(prev) => matches!(self.tokens[prev].kind, TokenKind::Eol),
            None => true,
        }
    }
}
