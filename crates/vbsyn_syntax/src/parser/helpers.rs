/// Diagnostics, `expect_*` helpers and recovery.
///
/// ## Notes
/// - `expect_*` never consumes on failure: the caller carries on as if the token were there.
/// - Only one suppressible diagnostic is reported per token index, so a single bad token does
///   not produce a cascade of "expected X" messages from the rules above it.
impl<'a> Parser<'a> {
    // ========================================================================
    // Reporting
    // ========================================================================

    /// Report at the current token, unless something was already reported there.
    fn error_here(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        if self.last_error_at == Some(self.pos) {
            return;
        }
        self.last_error_at = Some(self.pos);
        let span = self.current().span;
        self.diagnostics.push(Diagnostic::new(code, message, span));
    }

    /// Report at an explicit span. Never suppressed.
    fn error_at(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(code, message, span));
    }

    /// Human-readable description of the current token.
    fn found(&self) -> String {
        match &self.current().kind {
            TokenKind::Eol => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.current().text),
        }
    }

    fn expected(&mut self, code: DiagnosticCode, what: &str) {
        let message = format!("expected {what}, found {}", self.found());
        self.error_here(code, message);
    }

    // ========================================================================
    // Expect
    // ========================================================================

    fn expect_keyword(&mut self, id: KeywordId) -> bool {
        if self.match_keyword(id) {
            return true;
        }
        self.expected(DiagnosticCode::ExpectedToken, &format!("'{}'", keywords::as_str(id)));
        false
    }

    fn expect_punct(&mut self, id: PunctuationId) -> bool {
        if self.match_punct(id) {
            return true;
        }
        let spelling = vbsyn_core::lang::punctuation::as_str(id);
        self.expected(DiagnosticCode::ExpectedToken, &format!("'{spelling}'"));
        false
    }

    fn expect_op(&mut self, id: OperatorId) -> bool {
        if self.match_op(id) {
            return true;
        }
        self.expected(DiagnosticCode::ExpectedToken, &format!("'{}'", operators::as_str(id)));
        false
    }

    /// An identifier or contextual keyword. On failure reports and yields an empty name.
    fn identifier(&mut self) -> Ident {
        match self.current().name_text() {
            Some(name) => {
                let name = name.to_string();
                self.advance();
                name
            }
            None => {
                self.expected(DiagnosticCode::ExpectedIdentifier, "identifier");
                Ident::new()
            }
        }
    }

    /// A name after `.`: any keyword is accepted as well.
    fn member_name(&mut self) -> Ident {
        match &self.current().kind {
            TokenKind::Keyword(_) => self.advance().text.clone(),
            _ => self.identifier(),
        }
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Report a dispatch failure and skip to a member of `sync`.
    ///
    /// At least one token is consumed unless the cursor is already at `Eof`.
    fn recover_to(&mut self, code: DiagnosticCode, message: impl Into<String>, sync: TokenSet) {
        self.error_here(code, message);
        let from = self.pos;
        self.advance();
        while !sync.contains(self.peek_kind(0)) && !self.is_at_end() {
            self.advance();
        }
        self.note_skipped(from);
    }

    /// Skip to the end of the logical line, leaving the `Eol` in place.
    fn skip_line(&mut self) {
        let from = self.pos;
        while !self.at_end_of_line() {
            self.advance();
        }
        self.note_skipped(from);
    }

    /// Consume one token when a list iteration made no progress.
    fn force_progress(&mut self) {
        let from = self.pos;
        self.advance();
        self.note_skipped(from);
    }

    fn note_skipped(&mut self, from: usize) {
        let skipped = self.pos - from;
        if skipped > 0 {
            self.stats.tokens_skipped += skipped;
            tracing::debug!(skipped, at = %self.tokens[from].span.start, "skipped tokens during recovery");
        }
    }

    /// After a complete statement: anything but a terminator is reported once and skipped.
    ///
    /// A block terminator that was already reported here (a nested block missing its own
    /// `End`) is left for the enclosing list.
    fn end_of_statement(&mut self) {
        if self.at_terminator() {
            return;
        }
        if self.last_error_at == Some(self.pos) && self.boundary(true) != Boundary::None {
            return;
        }
        self.expected(DiagnosticCode::ExpectedEndOfStatement, "end of statement");
        self.skip_line();
    }

    fn skip_separators(&mut self) {
        while self.at_terminator() && !self.is_at_end() {
            self.advance();
        }
    }

    fn skip_eols(&mut self) {
        while matches!(self.current().kind, TokenKind::Eol) {
            self.advance();
        }
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// `( item, item, ... )` with the `(` as the current token.
    fn parenthesized<T>(&mut self, mut item: impl FnMut(&mut Self) -> T) -> Vec<T> {
        self.advance();
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                items.push(item(self));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen);
        items
    }

    /// `{ item, item, ... }` with the `{` as the current token.
    fn braced<T>(&mut self, mut item: impl FnMut(&mut Self) -> T) -> Vec<T> {
        self.advance();
        let mut items = Vec::new();
        if !self.check_punct(PunctuationId::RBrace) {
            loop {
                items.push(item(self));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RBrace);
        items
    }

    // ========================================================================
    // Outline mode
    // ========================================================================

    /// Skip an executable body up to its `End <Kind>`, without parsing it.
    ///
    /// Multi-line lambdas inside the body are counted so their `End Sub` / `End Function`
    /// does not end the skip early. A lambda header is recognized while walking: its parameter
    /// list closes at the end of the line or before `As`. The skip also stops at an enclosing
    /// block's terminator and at a line that can only start a declaration.
    fn skip_body(&mut self, kind: BlockKind) -> Span {
        let start = self.start();
        let mut lambdas = 0usize;
        let mut depth = 0usize;
        // Paren depth at which an open lambda parameter list started.
        let mut header: Option<usize> = None;
        while !self.is_at_end() {
            if self.check_keyword(KeywordId::End) {
                let next = self.peek_kind(1).keyword_id();
                if lambdas > 0 && matches!(next, Some(KeywordId::Sub | KeywordId::Function)) {
                    lambdas -= 1;
                    self.advance();
                    self.advance();
                    continue;
                }
                if next.is_some() && next == kind.end_keyword() {
                    break;
                }
            }
            if lambdas == 0 && self.at_line_start() && self.boundary(true) == Boundary::Close {
                break;
            }
            match self.peek_kind(0) {
                TokenKind::Keyword(KeywordId::Sub | KeywordId::Function)
                    if header.is_none() && self.check_punct_at(1, PunctuationId::LParen) =>
                {
                    header = Some(depth);
                }
                TokenKind::Punctuation(PunctuationId::LParen) => depth += 1,
                TokenKind::Punctuation(PunctuationId::RParen) => {
                    depth = depth.saturating_sub(1);
                    if header == Some(depth) {
                        header = None;
                        let after = self.peek_kind(1);
                        if matches!(after, TokenKind::Eol | TokenKind::Eof) || after.is_keyword(KeywordId::As) {
                            lambdas += 1;
                        }
                    }
                }
                TokenKind::Eol => {
                    depth = 0;
                    header = None;
                }
                _ => {}
            }
            self.advance();
        }
        self.span_from(start)
    }
}
