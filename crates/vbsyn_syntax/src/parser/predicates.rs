/// Most tokens any list-walking predicate inspects.
const LOOKAHEAD_LIMIT: usize = 32;

/// Lookahead predicates.
///
/// Every predicate here is a pure scan over `peek(k)`: nothing is consumed and nothing is
/// reported. Most inspect a fixed handful of tokens; the few that walk a list (a rank
/// specifier, an accessor's attribute group) give up after [`LOOKAHEAD_LIMIT`] tokens.
impl<'a> Parser<'a> {
    // ========================================================================
    // Names and arguments
    // ========================================================================

    fn identifier_like_at(&self, k: usize) -> bool {
        self.peek_kind(k).is_identifier_like()
    }

    /// `name :=`
    fn named_argument_ahead(&self) -> bool {
        self.identifier_like_at(0) && self.check_op_at(1, OperatorId::ColonEq)
    }

    /// `.` followed by something usable as a name segment. Any keyword qualifies after a dot.
    fn qualified_name_continues(&self) -> bool {
        self.check_punct(PunctuationId::Dot)
            && matches!(self.peek_kind(1), TokenKind::Ident(_) | TokenKind::Keyword(_))
    }

    /// `,` that is not the last thing before `)`.
    fn not_final_comma(&self) -> bool {
        self.check_punct(PunctuationId::Comma) && !self.check_punct_at(1, PunctuationId::RParen)
    }

    // ========================================================================
    // Types and declarators
    // ========================================================================

    /// `(` `Of`
    fn generic_argument_list_ahead(&self) -> bool {
        self.check_punct(PunctuationId::LParen) && self.check_keyword_at(1, KeywordId::Of)
    }

    /// `(` `,`* `)` starting `k` tokens ahead.
    fn array_rank_at(&self, k: usize) -> bool {
        if !self.check_punct_at(k, PunctuationId::LParen) {
            return false;
        }
        self.check_punct_at(k + self.rank_len_at(k) - 1, PunctuationId::RParen)
    }

    /// `()`, `(,)`, ...: a rank specifier with no bounds.
    fn array_rank_ahead(&self) -> bool {
        self.array_rank_at(0)
    }

    /// `(` that opens explicit bounds rather than a generic argument list.
    fn array_bound_ahead(&self) -> bool {
        self.check_punct(PunctuationId::LParen) && !self.check_keyword_at(1, KeywordId::Of)
    }

    /// `As New`
    fn object_creation_ahead(&self) -> bool {
        self.check_keyword(KeywordId::As) && self.check_keyword_at(1, KeywordId::New)
    }

    /// `i As`, `i? ...` or `i() As` in a `For` header: a new control variable rather than an
    /// existing one.
    fn loop_variable_declaration_ahead(&self) -> bool {
        if !self.identifier_like_at(0) {
            return false;
        }
        self.check_keyword_at(1, KeywordId::As)
            || self.check_punct_at(1, PunctuationId::Question)
            || (self.array_rank_at(1) && self.check_keyword_at(self.rank_len_at(1) + 1, KeywordId::As))
    }

    /// Number of tokens in the rank specifier starting `k` tokens ahead.
    fn rank_len_at(&self, k: usize) -> usize {
        let limit = k + LOOKAHEAD_LIMIT;
        let mut i = k + 1;
        while i < limit && self.check_punct_at(i, PunctuationId::Comma) {
            i += 1;
        }
        i + 1 - k
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// `Else If` written as two words.
    fn else_if_ahead(&self) -> bool {
        self.check_keyword(KeywordId::Else) && self.check_keyword_at(1, KeywordId::If)
    }

    /// `End` on its own: the terminate statement, not a block terminator.
    fn end_statement_ahead(&self) -> bool {
        self.check_keyword(KeywordId::End) && self.peek_kind(1).is_statement_terminator()
    }

    /// `Resume Next`
    fn resume_next_ahead(&self) -> bool {
        self.check_keyword(KeywordId::Resume) && self.check_keyword_at(1, KeywordId::Next)
    }

    /// `-1` after `On Error GoTo`.
    fn negative_label_ahead(&self) -> bool {
        self.check_op(OperatorId::Minus)
            && matches!(self.peek_kind(1), TokenKind::Literal(LiteralValue::Integer(1)))
    }

    /// `name:` or `10:` at the start of a line.
    fn label_ahead(&self) -> bool {
        let name = match self.current().kind {
            TokenKind::Ident(_) => true,
            TokenKind::Literal(LiteralValue::Integer(_)) => true,
            TokenKind::Keyword(id) => keywords::is_contextual(id),
            _ => false,
        };
        name && self.at_line_start() && self.check_punct_at(1, PunctuationId::Colon)
    }

    /// `Yield expr` as a statement, as opposed to a variable named `Yield`.
    fn yield_statement_ahead(&self) -> bool {
        let next = self.peek_kind(1);
        self.check_keyword(KeywordId::Yield)
            && EXPRESSION_FIRST.contains(next)
            && !next.is_punctuation(PunctuationId::Dot)
            && !next.is_punctuation(PunctuationId::Exclamation)
    }

    /// The current token starts a keyword statement.
    fn at_statement_keyword(&self) -> bool {
        let Some(id) = self.current().keyword_id() else {
            return false;
        };
        match STATEMENT_TABLE[id.index()] {
            StatementStart::None => false,
            StatementStart::Yield => self.yield_statement_ahead(),
            _ => true,
        }
    }

    fn expression_ahead(&self) -> bool {
        EXPRESSION_FIRST.contains(self.peek_kind(0))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// `From x In` / `From x As` / `Aggregate x In`.
    fn query_expression_ahead(&self) -> bool {
        let opener = self.check_keyword(KeywordId::From) || self.check_keyword(KeywordId::Aggregate);
        opener
            && self.identifier_like_at(1)
            && (self.check_keyword_at(2, KeywordId::In) || self.check_keyword_at(2, KeywordId::As))
    }

    /// `With {`
    fn object_initializer_ahead(&self) -> bool {
        self.check_keyword(KeywordId::With) && self.check_punct_at(1, PunctuationId::LBrace)
    }

    /// `From {`
    fn collection_initializer_ahead(&self) -> bool {
        self.check_keyword(KeywordId::From) && self.check_punct_at(1, PunctuationId::LBrace)
    }

    /// After a lambda header: the body continues on the same line.
    fn lambda_body_on_same_line(&self) -> bool {
        !self.at_end_of_line()
    }

    /// `Sub`/`Function` (optionally after `Async`/`Iterator`) followed by `(`: a lambda.
    fn lambda_ahead(&self) -> bool {
        let k = usize::from(self.check_keyword(KeywordId::Async) || self.check_keyword(KeywordId::Iterator));
        (self.check_keyword_at(k, KeywordId::Sub) || self.check_keyword_at(k, KeywordId::Function))
            && self.check_punct_at(k + 1, PunctuationId::LParen)
    }

    /// `Await` applied to an operand, as opposed to a variable named `Await`.
    fn await_ahead(&self) -> bool {
        let next = self.peek_kind(1);
        self.check_keyword(KeywordId::Await)
            && EXPRESSION_FIRST.contains(next)
            && !next.is_punctuation(PunctuationId::Dot)
            && !next.is_punctuation(PunctuationId::LParen)
            && !next.is_operator(OperatorId::Plus)
            && !next.is_operator(OperatorId::Minus)
            && !next.is_operator(OperatorId::Star)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// After a property header: no `Get`/`Set` region follows, so this is an auto-property.
    fn auto_property_ahead(&self) -> bool {
        let mut k = 0;
        while k < LOOKAHEAD_LIMIT && (matches!(self.peek_kind(k), TokenKind::Eol) || self.check_punct_at(k, PunctuationId::Colon)) {
            k += 1;
        }
        if self.check_op_at(k, OperatorId::Lt) {
            k = self.skip_angle_group(k);
            if matches!(self.peek_kind(k), TokenKind::Eol) {
                k += 1;
            }
        }
        let limit = k + LOOKAHEAD_LIMIT;
        while k < limit && self.peek_kind(k).keyword_id().is_some_and(|id| MODIFIERS.contains(&TokenKind::Keyword(id))) {
            k += 1;
        }
        !(self.check_keyword_at(k, KeywordId::Get) || self.check_keyword_at(k, KeywordId::Set))
    }

    /// Index just past the `>` closing the attribute list that opens at `k`.
    ///
    /// A list longer than [`LOOKAHEAD_LIMIT`] stops the scan where it gave up.
    fn skip_angle_group(&self, k: usize) -> usize {
        let limit = k + LOOKAHEAD_LIMIT;
        let mut i = k + 1;
        while i < limit {
            match self.peek_kind(i) {
                TokenKind::Operator(OperatorId::Gt) => return i + 1,
                TokenKind::Eol | TokenKind::Eof => return i,
                _ => i += 1,
            }
        }
        i
    }

    /// `AddHandler(`, `RemoveHandler(` or `RaiseEvent(` opening an accessor region.
    fn event_accessor_ahead(&self) -> bool {
        let opener = self.check_keyword(KeywordId::AddHandler)
            || self.check_keyword(KeywordId::RemoveHandler)
            || self.check_keyword(KeywordId::RaiseEvent);
        opener && self.check_punct_at(1, PunctuationId::LParen)
    }

    /// `<Assembly:` / `<Module:`
    fn global_attribute_ahead(&self) -> bool {
        self.check_op(OperatorId::Lt)
            && (self.check_keyword_at(1, KeywordId::Assembly) || self.check_keyword_at(1, KeywordId::Module))
            && self.check_punct_at(2, PunctuationId::Colon)
    }

    /// `Sub New`
    fn constructor_ahead(&self) -> bool {
        self.check_keyword(KeywordId::Sub) && self.check_keyword_at(1, KeywordId::New)
    }
}
