/// Statement parsing.
///
/// Block statements share one shape: record the start, push a block context, parse statements
/// until a terminator of this block (or of any enclosing block) shows up, pop, and take the end
/// location from the terminator.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statement lists
    // ========================================================================

    /// Statements up to a block boundary or `Eof`.
    fn statements(&mut self) -> PResult<Block> {
        let mut body = Vec::new();
        loop {
            // A shared `Next` leaves its line's separator to the outermost loop it closes.
            if self.pending_next > 0 {
                break;
            }
            self.skip_separators();
            if self.is_at_end() {
                break;
            }
            match self.boundary(true) {
                Boundary::Close => break,
                Boundary::Stray => {
                    self.stray_terminator();
                    continue;
                }
                Boundary::None => {}
            }
            let before = self.pos;
            body.push(self.statement()?);
            self.end_of_statement();
            if self.pos == before {
                self.force_progress();
            }
        }
        Ok(body)
    }

    /// `:`-separated statements up to `Else` or the end of the line.
    fn line_statements(&mut self) -> PResult<Block> {
        let mut body = Vec::new();
        loop {
            while self.match_punct(PunctuationId::Colon) {}
            if self.at_end_of_line() || self.check_keyword(KeywordId::Else) {
                break;
            }
            let before = self.pos;
            body.push(self.statement()?);
            if !self.at_terminator() && !self.check_keyword(KeywordId::Else) {
                self.expected(DiagnosticCode::ExpectedEndOfStatement, "end of statement");
                self.skip_line();
            }
            if self.pos == before {
                self.force_progress();
            }
        }
        Ok(body)
    }

    fn statement(&mut self) -> PResult<Spanned<Statement>> {
        self.check_cancelled()?;
        let start = self.start();
        if self.label_ahead() {
            let name = self.advance().text.clone();
            return Ok(Spanned::new(Statement::Label(name), self.span_from(start)));
        }

        let dispatch = match self.current().keyword_id() {
            Some(id) => STATEMENT_TABLE[id.index()],
            None => StatementStart::None,
        };
        let statement = match dispatch {
            StatementStart::If => self.if_statement(start)?,
            StatementStart::Select => self.select_statement(start)?,
            StatementStart::For => self.for_statement(start)?,
            StatementStart::Do => self.do_statement(start)?,
            StatementStart::While => self.while_statement(start)?,
            StatementStart::Try => self.try_statement(start)?,
            StatementStart::Using => self.using_statement(start)?,
            StatementStart::With => {
                self.advance();
                let target = self.expression();
                let body = self.simple_block(BlockKind::With, start)?;
                Statement::With(WithStmt { target, body })
            }
            StatementStart::SyncLock => {
                self.advance();
                let lock = self.expression();
                let body = self.simple_block(BlockKind::SyncLock, start)?;
                Statement::SyncLock(SyncLockStmt { lock, body })
            }
            StatementStart::Return => {
                self.advance();
                Statement::Return(self.optional_expression())
            }
            StatementStart::Throw => {
                self.advance();
                Statement::Throw(self.optional_expression())
            }
            StatementStart::Yield if self.yield_statement_ahead() => {
                self.advance();
                Statement::Yield(self.expression())
            }
            StatementStart::GoTo => {
                self.advance();
                Statement::GoTo(self.label_name())
            }
            StatementStart::Exit => self.exit_statement(),
            StatementStart::Continue => self.continue_statement(),
            StatementStart::Local => self.local_declaration(),
            StatementStart::RaiseEvent => {
                self.advance();
                let name = self.identifier();
                let args = if self.check_punct(PunctuationId::LParen) {
                    self.argument_list()
                } else {
                    Vec::new()
                };
                Statement::RaiseEvent { name, args }
            }
            StatementStart::AddHandler => Statement::AddHandler(self.handler_statement()),
            StatementStart::RemoveHandler => Statement::RemoveHandler(self.handler_statement()),
            StatementStart::ReDim => {
                self.advance();
                let preserve = self.match_keyword(KeywordId::Preserve);
                Statement::ReDim(ReDimStmt {
                    preserve,
                    clauses: self.expression_list(),
                })
            }
            StatementStart::Erase => {
                self.advance();
                Statement::Erase(self.expression_list())
            }
            StatementStart::On => self.on_error_statement(),
            StatementStart::Resume => self.resume_statement(),
            StatementStart::Error => {
                self.advance();
                Statement::Error(self.expression())
            }
            StatementStart::Stop => {
                self.advance();
                Statement::Stop
            }
            StatementStart::End => {
                self.advance();
                Statement::End
            }
            StatementStart::Call => {
                self.advance();
                Statement::Call(self.expression().node)
            }
            _ if self.expression_ahead() => self.expression_statement(),
            _ => {
                let message = format!("expected statement, found {}", self.found());
                self.recover_to(DiagnosticCode::InvalidStatement, message, STATEMENT_SYNC);
                Statement::Invalid
            }
        };
        Ok(Spanned::new(statement, self.span_from(start)))
    }

    /// The rest of the header line, then statements up to `End <Kind>`.
    fn simple_block(&mut self, kind: BlockKind, start: Location) -> PResult<Block> {
        self.end_of_statement();
        self.with_block(kind, start, |p| {
            let body = p.statements()?;
            p.close_block(kind);
            Ok(body)
        })
    }

    /// An expression unless the statement ends here.
    fn optional_expression(&mut self) -> Option<Spanned<Expr>> {
        if self.at_terminator() || self.check_keyword(KeywordId::Else) {
            None
        } else {
            Some(self.expression())
        }
    }

    fn expression_list(&mut self) -> Vec<Spanned<Expr>> {
        let mut exprs = vec![self.expression()];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression());
        }
        exprs
    }

    /// A label name: identifier or line number.
    fn label_name(&mut self) -> Ident {
        if let TokenKind::Literal(LiteralValue::Integer(_)) = self.current().kind {
            return self.advance().text.clone();
        }
        self.identifier()
    }

    // ========================================================================
    // Expression statements
    // ========================================================================

    /// Assignment (`x = 1`, `x += 1`) or a bare expression such as a call.
    fn expression_statement(&mut self) -> Statement {
        let prefixed = self.check_keyword(KeywordId::Not)
            || self.check_op(OperatorId::Plus)
            || self.check_op(OperatorId::Minus)
            || self.check_op(OperatorId::Star)
            || self.await_ahead();
        if prefixed {
            return Statement::Expression(self.expression().node);
        }

        let start = self.start();
        let target = self.postfix_expression();
        if let Some(op) = assignment_operator(&self.current().kind) {
            self.advance();
            let value = self.expression();
            return Statement::Assignment(AssignmentStmt { target, op, value });
        }
        Statement::Expression(self.binary_rest(start, target, PrecedenceTier::LogicalOr).node)
    }

    /// `If(a, b).M()` or `If(a, b).P = x` at the start of a statement.
    fn conditional_statement(&mut self, start: Location, operands: Vec<Spanned<Expr>>) -> Statement {
        let conditional = self.conditional_from(start, operands);
        let target = self.postfix_rest(start, conditional);
        if let Some(op) = assignment_operator(&self.current().kind) {
            self.advance();
            let value = self.expression();
            return Statement::Assignment(AssignmentStmt { target, op, value });
        }
        Statement::Expression(self.binary_rest(start, target, PrecedenceTier::LogicalOr).node)
    }

    fn handler_statement(&mut self) -> HandlerStmt {
        self.advance();
        let event = self.expression();
        self.expect_punct(PunctuationId::Comma);
        let handler = self.expression();
        HandlerStmt { event, handler }
    }

    fn local_declaration(&mut self) -> Statement {
        let (modifiers, span) = self.modifiers();
        let disallowed = ModifierSet::all().difference(ModifierSet::DIM.union(ModifierSet::STATIC).union(ModifierSet::CONST));
        self.check_modifiers(modifiers, span, disallowed, "local declarations");
        Statement::LocalDecl(LocalDecl {
            modifiers,
            declarators: self.declarators(),
        })
    }

    // ========================================================================
    // If / Select
    // ========================================================================

    /// `If c Then ...` in block or single-line form.
    ///
    /// `If (` is decided after the parenthesized group: two or three operands make it the
    /// `If(...)` operator starting an expression statement, a single one is the start of the
    /// condition.
    fn if_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        let condition = if self.check_punct(PunctuationId::LParen) {
            let group_start = self.start();
            let mut operands = self.parenthesized(Self::expression);
            if operands.len() > 1 {
                return Ok(self.conditional_statement(start, operands));
            }
            let inner = match operands.pop() {
                Some(inner) => inner,
                None => self.missing_expression(),
            };
            let group = Spanned::new(Expr::Parenthesized(Box::new(inner)), self.span_from(group_start));
            let operand = self.postfix_rest(group_start, group);
            self.binary_rest(group_start, operand, PrecedenceTier::LogicalOr)
        } else {
            self.expression()
        };
        let then = self.match_keyword(KeywordId::Then);

        if then && !self.at_terminator() {
            let then_branch = self.line_statements()?;
            let else_branch = if self.match_keyword(KeywordId::Else) {
                Some(self.line_statements()?)
            } else {
                None
            };
            return Ok(Statement::If(IfStmt {
                condition,
                then_branch,
                else_ifs: Vec::new(),
                else_branch,
                single_line: true,
            }));
        }
        if !then && !self.at_terminator() {
            self.expect_keyword(KeywordId::Then);
        }
        self.end_of_statement();

        self.with_block(BlockKind::If, start, |p| {
            let then_branch = p.statements()?;
            let mut else_ifs = Vec::new();
            let mut else_branch = None;
            loop {
                if p.check_keyword(KeywordId::ElseIf) || p.else_if_ahead() {
                    let clause_start = p.start();
                    if !p.match_keyword(KeywordId::ElseIf) {
                        p.advance();
                        p.advance();
                    }
                    let condition = p.expression();
                    p.match_keyword(KeywordId::Then);
                    p.end_of_statement();
                    let body = p.statements()?;
                    else_ifs.push(Spanned::new(ElseIfClause { condition, body }, p.span_from(clause_start)));
                } else if p.check_keyword(KeywordId::Else) && else_branch.is_none() {
                    p.advance();
                    p.end_of_statement();
                    else_branch = Some(p.statements()?);
                } else {
                    break;
                }
            }
            p.close_block(BlockKind::If);
            Ok(Statement::If(IfStmt {
                condition,
                then_branch,
                else_ifs,
                else_branch,
                single_line: false,
            }))
        })
    }

    fn select_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        self.match_keyword(KeywordId::Case);
        let subject = self.expression();
        self.end_of_statement();

        self.with_block(BlockKind::Select, start, |p| {
            let mut cases = Vec::new();
            loop {
                p.skip_separators();
                if p.is_at_end() {
                    break;
                }
                if p.check_keyword(KeywordId::Case) {
                    cases.push(p.case_block()?);
                    continue;
                }
                match p.boundary(true) {
                    Boundary::Close => break,
                    Boundary::Stray => p.stray_terminator(),
                    Boundary::None => {
                        let message = format!("expected 'Case', found {}", p.found());
                        p.recover_to(DiagnosticCode::InvalidStatement, message, LINE_SYNC);
                    }
                }
            }
            p.close_block(BlockKind::Select);
            Ok(Statement::Select(SelectStmt { subject, cases }))
        })
    }

    fn case_block(&mut self) -> PResult<Spanned<CaseBlock>> {
        let start = self.start();
        self.advance();
        let is_else = self.match_keyword(KeywordId::Else);
        let mut labels = Vec::new();
        if !is_else {
            labels.push(self.case_label());
            while self.match_punct(PunctuationId::Comma) {
                labels.push(self.case_label());
            }
        }
        self.end_of_statement();
        let body = self.statements()?;
        Ok(Spanned::new(CaseBlock { labels, is_else, body }, self.span_from(start)))
    }

    /// `1`, `1 To 5`, `Is > 3`, `> 3`
    fn case_label(&mut self) -> Spanned<CaseLabel> {
        let start = self.start();
        let is = self.match_keyword(KeywordId::Is);
        let label = match relational_operator(&self.current().kind) {
            Some(op) => {
                self.advance();
                CaseLabel::Relational {
                    op,
                    value: self.expression(),
                }
            }
            None if is => {
                self.expected(DiagnosticCode::ExpectedToken, "comparison operator");
                CaseLabel::Relational {
                    op: BinaryOp::Equal,
                    value: self.expression(),
                }
            }
            None => {
                let low = self.expression();
                if self.match_keyword(KeywordId::To) {
                    CaseLabel::Range {
                        low,
                        high: self.expression(),
                    }
                } else {
                    CaseLabel::Value(low.node)
                }
            }
        };
        Spanned::new(label, self.span_from(start))
    }

    // ========================================================================
    // Loops
    // ========================================================================

    fn for_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        if self.match_keyword(KeywordId::Each) {
            let variable = self.loop_variable();
            self.expect_keyword(KeywordId::In);
            let collection = self.expression();
            self.end_of_statement();
            return self.with_block(BlockKind::For, start, |p| {
                let body = p.statements()?;
                let next_variables = p.close_for();
                Ok(Statement::ForEach(ForEachStmt {
                    variable,
                    collection,
                    body,
                    next_variables,
                }))
            });
        }

        let variable = self.loop_variable();
        self.expect_op(OperatorId::Eq);
        let from = self.expression();
        self.expect_keyword(KeywordId::To);
        let to = self.expression();
        let step = if self.match_keyword(KeywordId::Step) {
            Some(self.expression())
        } else {
            None
        };
        self.end_of_statement();
        self.with_block(BlockKind::For, start, |p| {
            let body = p.statements()?;
            let next_variables = p.close_for();
            Ok(Statement::For(ForStmt {
                variable,
                start: from,
                end: to,
                step,
                body,
                next_variables,
            }))
        })
    }

    fn loop_variable(&mut self) -> LoopVariable {
        if self.loop_variable_declaration_ahead() {
            let name = self.declared_name();
            let ty = self.as_clause();
            self.check_rank_once(&name, &ty);
            LoopVariable::Declared { name, ty }
        } else {
            LoopVariable::Existing(self.postfix_expression())
        }
    }

    /// Close the innermost `For`.
    ///
    /// `Next i, j` closes this loop and, through `pending_next`, as many directly enclosing
    /// loops as it names extra variables.
    fn close_for(&mut self) -> Vec<Spanned<Expr>> {
        if self.pending_next > 0 {
            self.pending_next -= 1;
            return Vec::new();
        }
        if !self.match_keyword(KeywordId::Next) {
            self.missing_block_end(BlockKind::For);
            return Vec::new();
        }
        let variables = if self.at_terminator() { Vec::new() } else { self.expression_list() };

        let available = self.enclosing_for_depth().saturating_sub(1);
        let extra = variables.len().saturating_sub(1);
        self.pending_next = extra.min(available);
        if let Some(surplus) = variables.get(1 + available) {
            self.error_at(
                DiagnosticCode::UnmatchedTerminator,
                "'Next' names more loops than are open",
                surplus.span,
            );
        }
        variables
    }

    fn do_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        let pre_condition = self.loop_condition();
        self.end_of_statement();
        self.with_block(BlockKind::Do, start, |p| {
            let body = p.statements()?;
            let mut post_condition = None;
            if p.match_keyword(KeywordId::Loop) {
                post_condition = p.loop_condition();
                if let (Some(_), Some(post)) = (&pre_condition, &post_condition) {
                    p.error_at(
                        DiagnosticCode::InvalidStatement,
                        "'Loop' cannot have a condition when 'Do' has one",
                        post.expr.span,
                    );
                }
            } else {
                p.missing_block_end(BlockKind::Do);
            }
            Ok(Statement::DoLoop(DoLoopStmt {
                pre_condition,
                body,
                post_condition,
            }))
        })
    }

    /// `While cond` / `Until cond`, if present.
    fn loop_condition(&mut self) -> Option<LoopCondition> {
        let kind = if self.match_keyword(KeywordId::While) {
            LoopConditionKind::While
        } else if self.match_keyword(KeywordId::Until) {
            LoopConditionKind::Until
        } else {
            return None;
        };
        Some(LoopCondition {
            kind,
            expr: self.expression(),
        })
    }

    fn while_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        let condition = self.expression();
        let body = self.simple_block(BlockKind::While, start)?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    // ========================================================================
    // Try / Using
    // ========================================================================

    fn try_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        self.end_of_statement();
        self.with_block(BlockKind::Try, start, |p| {
            let body = p.statements()?;
            let mut catches = Vec::new();
            while p.check_keyword(KeywordId::Catch) {
                catches.push(p.catch_clause()?);
            }
            let finally = if p.match_keyword(KeywordId::Finally) {
                p.end_of_statement();
                Some(p.statements()?)
            } else {
                None
            };
            p.close_block(BlockKind::Try);
            Ok(Statement::Try(TryStmt { body, catches, finally }))
        })
    }

    /// `Catch [name [As T]] [When filter]` and its statements.
    fn catch_clause(&mut self) -> PResult<Spanned<CatchClause>> {
        let start = self.start();
        self.advance();
        let (name, ty) = if self.identifier_like_at(0) {
            let name = self.identifier();
            (Some(name), self.as_clause())
        } else {
            (None, None)
        };
        let filter = if self.match_keyword(KeywordId::When) {
            Some(self.expression())
        } else {
            None
        };
        self.end_of_statement();
        let body = self.statements()?;
        Ok(Spanned::new(CatchClause { name, ty, filter, body }, self.span_from(start)))
    }

    fn using_statement(&mut self, start: Location) -> PResult<Statement> {
        self.advance();
        let declares = self.identifier_like_at(0)
            && (self.check_keyword_at(1, KeywordId::As) || self.check_op_at(1, OperatorId::Eq));
        let resource = if declares {
            UsingResource::Declarations(self.declarators())
        } else {
            UsingResource::Expression(self.expression())
        };
        let body = self.simple_block(BlockKind::Using, start)?;
        Ok(Statement::Using(UsingStmt { resource, body }))
    }

    // ========================================================================
    // Jumps
    // ========================================================================

    fn exit_statement(&mut self) -> Statement {
        self.advance();
        let kind = match self.current().keyword_id() {
            Some(KeywordId::Sub) => ExitKind::Sub,
            Some(KeywordId::Function) => ExitKind::Function,
            Some(KeywordId::Property) => ExitKind::Property,
            Some(KeywordId::Do) => ExitKind::Do,
            Some(KeywordId::For) => ExitKind::For,
            Some(KeywordId::While) => ExitKind::While,
            Some(KeywordId::Select) => ExitKind::Select,
            Some(KeywordId::Try) => ExitKind::Try,
            _ => {
                self.expected(
                    DiagnosticCode::ExpectedToken,
                    "'Sub', 'Function', 'Property', 'Do', 'For', 'While', 'Select' or 'Try'",
                );
                return Statement::Invalid;
            }
        };
        self.advance();
        Statement::Exit(kind)
    }

    fn continue_statement(&mut self) -> Statement {
        self.advance();
        let kind = match self.current().keyword_id() {
            Some(KeywordId::Do) => ContinueKind::Do,
            Some(KeywordId::For) => ContinueKind::For,
            Some(KeywordId::While) => ContinueKind::While,
            _ => {
                self.expected(DiagnosticCode::ExpectedToken, "'Do', 'For' or 'While'");
                return Statement::Invalid;
            }
        };
        self.advance();
        Statement::Continue(kind)
    }

    /// `On Error GoTo label | 0 | -1` / `On Error Resume Next`
    fn on_error_statement(&mut self) -> Statement {
        self.advance();
        self.expect_keyword(KeywordId::Error);
        if self.match_keyword(KeywordId::Resume) {
            self.expect_keyword(KeywordId::Next);
            return Statement::OnError(OnErrorStmt::ResumeNext);
        }
        self.expect_keyword(KeywordId::GoTo);
        if self.negative_label_ahead() {
            self.advance();
            self.advance();
            return Statement::OnError(OnErrorStmt::GoToMinusOne);
        }
        if let TokenKind::Literal(LiteralValue::Integer(0)) = self.current().kind {
            self.advance();
            return Statement::OnError(OnErrorStmt::GoToZero);
        }
        Statement::OnError(OnErrorStmt::GoTo(self.label_name()))
    }

    fn resume_statement(&mut self) -> Statement {
        if self.resume_next_ahead() {
            self.advance();
            self.advance();
            return Statement::Resume(ResumeTarget::Next);
        }
        self.advance();
        if self.at_terminator() || self.check_keyword(KeywordId::Else) {
            Statement::Resume(ResumeTarget::Current)
        } else {
            Statement::Resume(ResumeTarget::Label(self.label_name()))
        }
    }
}

/// `=`, `<>`, `<`, `>`, `<=`, `>=`
fn relational_operator(kind: &TokenKind) -> Option<BinaryOp> {
    match kind.operator_id()? {
        OperatorId::Eq => Some(BinaryOp::Equal),
        OperatorId::NotEq => Some(BinaryOp::NotEqual),
        OperatorId::Lt => Some(BinaryOp::LessThan),
        OperatorId::Gt => Some(BinaryOp::GreaterThan),
        OperatorId::LtEq => Some(BinaryOp::LessThanOrEqual),
        OperatorId::GtEq => Some(BinaryOp::GreaterThanOrEqual),
        _ => None,
    }
}
