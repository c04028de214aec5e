/// Expression parsing.
///
/// ## Notes
/// - Binary operators use precedence climbing over [`operators::PrecedenceTier`]; every tier is
///   left-associative.
/// - Prefix `Not` binds looser than comparisons (`Not a = b` is `Not (a = b)`); prefix `-` binds
///   looser than `^` (`-a ^ b` is `-(a ^ b)`).
/// - Expression rules never fail: a missing operand is reported once and stands in as
///   [`Expr::Error`] so the enclosing statement still produces a node.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Spanned<Expr> {
        if self.query_expression_ahead() {
            return self.query_expression();
        }
        if self.lambda_ahead() {
            return self.lambda();
        }
        self.binary(PrecedenceTier::LogicalOr)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Operators of tier `min` and above.
    fn binary(&mut self, min: PrecedenceTier) -> Spanned<Expr> {
        let start = self.start();
        let left = self.unary();
        self.binary_rest(start, left, min)
    }

    /// Continue a binary chain whose first operand has already been parsed.
    fn binary_rest(&mut self, start: Location, mut left: Spanned<Expr>, min: PrecedenceTier) -> Spanned<Expr> {
        while let Some((tier, mut op)) = binary_operator(&self.current().kind) {
            if tier < min {
                break;
            }
            self.advance();
            if op == BinaryOp::Is && self.match_keyword(KeywordId::Not) {
                op = BinaryOp::IsNot;
            }
            let right = if tier == PrecedenceTier::Exponentiation {
                self.exponent_operand()
            } else {
                self.binary(tier_above(tier))
            };
            left = Spanned::new(
                Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                self.span_from(start),
            );
        }
        left
    }

    /// Right operand of `^`: a postfix expression, optionally negated (`2 ^ -1`).
    fn exponent_operand(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let op = match self.current().operator_id() {
            Some(OperatorId::Minus) => UnaryOp::Minus,
            Some(OperatorId::Plus) => UnaryOp::Plus,
            _ => return self.postfix_expression(),
        };
        self.advance();
        let operand = self.exponent_operand();
        Spanned::new(
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        )
    }

    fn unary(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let (op, operand_tier) = if self.check_keyword(KeywordId::Not) {
            (UnaryOp::Not, PrecedenceTier::LogicalNot)
        } else if self.await_ahead() {
            self.advance();
            let operand = self.postfix_expression();
            return Spanned::new(
                Expr::Unary {
                    op: UnaryOp::Await,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            );
        } else {
            match self.current().operator_id() {
                Some(OperatorId::Minus) => (UnaryOp::Minus, PrecedenceTier::Unary),
                Some(OperatorId::Plus) => (UnaryOp::Plus, PrecedenceTier::Unary),
                Some(OperatorId::Star) => (UnaryOp::Dereference, PrecedenceTier::Unary),
                _ => return self.postfix_expression(),
            }
        };
        self.advance();
        let operand = self.binary(operand_tier);
        Spanned::new(
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        )
    }

    // ========================================================================
    // Postfix
    // ========================================================================

    fn postfix_expression(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let primary = self.primary();
        self.postfix_rest(start, primary)
    }

    /// Member access, dictionary access, XML axes, invocation and `(Of ...)` after an operand.
    fn postfix_rest(&mut self, start: Location, mut expr: Spanned<Expr>) -> Spanned<Expr> {
        loop {
            let node = match self.current().punctuation_id() {
                Some(PunctuationId::Dot | PunctuationId::TripleDot | PunctuationId::DotAt | PunctuationId::Exclamation) => {
                    self.access(Some(Box::new(expr)))
                }
                Some(PunctuationId::LParen) if self.generic_argument_list_ahead() => {
                    let type_args = self.type_arguments();
                    self.attach_type_args(expr.node, type_args, start)
                }
                Some(PunctuationId::LParen) => {
                    let args = self.argument_list();
                    Expr::Invocation {
                        target: Box::new(expr),
                        args,
                    }
                }
                _ => break,
            };
            expr = Spanned::new(node, self.span_from(start));
        }
        expr
    }

    /// `Foo(Of T)`: type arguments belong to the name they follow.
    fn attach_type_args(&mut self, node: Expr, type_args: Vec<Spanned<TypeReference>>, start: Location) -> Expr {
        match node {
            Expr::Identifier { name, type_args: existing } if existing.is_empty() => Expr::Identifier { name, type_args },
            Expr::MemberAccess {
                target,
                name,
                type_args: existing,
            } if existing.is_empty() => Expr::MemberAccess { target, name, type_args },
            other => {
                self.error_at(
                    DiagnosticCode::InvalidExpression,
                    "type arguments can only follow a name",
                    self.span_from(start),
                );
                other
            }
        }
    }

    /// `(Of T, U)` after a name in expression position.
    fn type_arguments(&mut self) -> Vec<Spanned<TypeReference>> {
        self.advance();
        self.advance();
        let args = self.type_list();
        self.expect_punct(PunctuationId::RParen);
        args
    }

    /// `.name`, `!key`, `.<elem>`, `...<desc>`, `.@attr`; `target` is `None` inside `With`.
    fn access(&mut self, target: Option<Box<Spanned<Expr>>>) -> Expr {
        let punct = self.current().punctuation_id();
        self.advance();
        match punct {
            Some(PunctuationId::Exclamation) => Expr::DictionaryAccess {
                target,
                key: self.identifier(),
            },
            Some(PunctuationId::TripleDot) => Expr::XmlAxis {
                target,
                axis: XmlAxisKind::Descendant,
                name: self.xml_axis_name(),
            },
            Some(PunctuationId::DotAt) => {
                let name = if self.check_op(OperatorId::Lt) {
                    self.xml_axis_name()
                } else {
                    self.member_name()
                };
                Expr::XmlAxis {
                    target,
                    axis: XmlAxisKind::Attribute,
                    name,
                }
            }
            _ if self.check_op(OperatorId::Lt) => Expr::XmlAxis {
                target,
                axis: XmlAxisKind::Element,
                name: self.xml_axis_name(),
            },
            _ => Expr::MemberAccess {
                target,
                name: self.member_name(),
                type_args: Vec::new(),
            },
        }
    }

    /// `<p:name>` after an axis; the name tokens are joined back together.
    fn xml_axis_name(&mut self) -> String {
        if !self.expect_op(OperatorId::Lt) {
            return String::new();
        }
        let mut name = String::new();
        while !self.check_op(OperatorId::Gt) && !self.at_end_of_line() {
            name.push_str(&self.advance().text);
        }
        if name.is_empty() {
            self.expected(DiagnosticCode::ExpectedIdentifier, "XML name");
        }
        self.expect_op(OperatorId::Gt);
        name
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// `(a, , name:=b, 0 To 9)` with the cursor on `(`.
    fn argument_list(&mut self) -> Vec<Spanned<Argument>> {
        self.parenthesized(Self::argument)
    }

    fn argument(&mut self) -> Spanned<Argument> {
        let start = self.start();
        if self.check_punct(PunctuationId::Comma) || self.check_punct(PunctuationId::RParen) {
            return Spanned::new(Argument::Omitted, Span::point(start));
        }
        let argument = if self.named_argument_ahead() {
            let name = self.identifier();
            self.advance();
            Argument::Named {
                name,
                value: self.expression(),
            }
        } else {
            let value = self.expression();
            if self.match_keyword(KeywordId::To) {
                Argument::Range {
                    low: value,
                    high: self.expression(),
                }
            } else {
                Argument::Positional(value.node)
            }
        };
        Spanned::new(argument, self.span_from(start))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn primary(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let token = self.current();
        let node = match &token.kind {
            TokenKind::Literal(value) => {
                let literal = match value {
                    LiteralValue::Integer(v) => Literal::Integer(*v),
                    LiteralValue::Floating(v) => Literal::Floating(*v),
                    LiteralValue::Decimal(v) => Literal::Decimal(v.clone()),
                    LiteralValue::String(v) => Literal::String(v.clone()),
                    LiteralValue::Char(v) => Literal::Char(*v),
                    LiteralValue::Date(v) => Literal::Date(v.clone()),
                };
                self.advance();
                Expr::Literal(literal)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Expr::ident(name)
            }
            TokenKind::Keyword(id) => return self.keyword_primary(*id),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression();
                self.expect_punct(PunctuationId::RParen);
                Expr::Parenthesized(Box::new(inner))
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                Expr::CollectionInitializer(self.braced(Self::expression))
            }
            TokenKind::Punctuation(
                PunctuationId::Dot | PunctuationId::TripleDot | PunctuationId::DotAt | PunctuationId::Exclamation,
            ) => self.access(None),
            kind if kind.is_xml() => Expr::Xml(self.xml_literal()),
            _ => return self.missing_expression(),
        };
        Spanned::new(node, self.span_from(start))
    }

    /// Report a missing operand without consuming anything.
    fn missing_expression(&mut self) -> Spanned<Expr> {
        self.expected(DiagnosticCode::ExpectedExpression, "expression");
        let span = if self.is_at_end() {
            Span::point(self.start())
        } else {
            self.current().span
        };
        Spanned::new(Expr::Error, span)
    }

    fn keyword_primary(&mut self, id: KeywordId) -> Spanned<Expr> {
        let start = self.start();
        let node = match id {
            KeywordId::True | KeywordId::False => {
                self.advance();
                Expr::Literal(Literal::Boolean(id == KeywordId::True))
            }
            KeywordId::Nothing => {
                self.advance();
                Expr::Literal(Literal::Nothing)
            }
            KeywordId::Me => {
                self.advance();
                Expr::Me
            }
            KeywordId::MyBase => {
                self.advance();
                Expr::MyBase
            }
            KeywordId::MyClass => {
                self.advance();
                Expr::MyClass
            }
            KeywordId::Global => {
                self.advance();
                if !self.check_punct(PunctuationId::Dot) {
                    self.expected(DiagnosticCode::ExpectedToken, "'.'");
                }
                Expr::Global
            }
            KeywordId::New => return self.new_expression(),
            KeywordId::CType => self.cast(CastKind::Conversion),
            KeywordId::DirectCast => self.cast(CastKind::Direct),
            KeywordId::TryCast => self.cast(CastKind::TryCast),
            KeywordId::GetType => {
                self.advance();
                self.expect_punct(PunctuationId::LParen);
                let ty = self.type_reference_with(true);
                self.expect_punct(PunctuationId::RParen);
                Expr::GetType(ty)
            }
            KeywordId::GetXmlNamespace => {
                self.advance();
                self.expect_punct(PunctuationId::LParen);
                let prefix = if self.identifier_like_at(0) { Some(self.identifier()) } else { None };
                self.expect_punct(PunctuationId::RParen);
                Expr::GetXmlNamespace(prefix)
            }
            KeywordId::TypeOf => self.type_of(),
            KeywordId::AddressOf => {
                self.advance();
                Expr::AddressOf(Box::new(self.postfix_expression()))
            }
            KeywordId::If => self.conditional(),
            _ if self.lambda_ahead() => return self.lambda(),
            _ if self.query_expression_ahead() => return self.query_expression(),
            _ if PRIMITIVE_CONVERSIONS.contains(&TokenKind::Keyword(id)) => self.primitive_conversion(id),
            _ if PRIMITIVE_TYPES.contains(&TokenKind::Keyword(id)) => {
                self.advance();
                Expr::PrimitiveType(id)
            }
            _ if keywords::is_contextual(id) => Expr::ident(self.identifier()),
            _ => return self.missing_expression(),
        };
        Spanned::new(node, self.span_from(start))
    }

    /// `CType(x, T)`, `DirectCast(x, T)`, `TryCast(x, T)`
    fn cast(&mut self, kind: CastKind) -> Expr {
        self.advance();
        self.expect_punct(PunctuationId::LParen);
        let expr = self.expression();
        self.expect_punct(PunctuationId::Comma);
        let ty = self.type_reference();
        self.expect_punct(PunctuationId::RParen);
        Expr::Cast {
            kind,
            expr: Box::new(expr),
            ty,
        }
    }

    /// `CInt(x)`, `CStr(x)`, ...: the target type comes from the conversion registry.
    fn primitive_conversion(&mut self, id: KeywordId) -> Expr {
        let keyword = self.current().span;
        self.advance();
        self.expect_punct(PunctuationId::LParen);
        let expr = self.expression();
        self.expect_punct(PunctuationId::RParen);
        let target = primitives::PRIMITIVE_CONVERSIONS
            .iter()
            .find(|info| info.keyword == id)
            .map_or(id, |info| info.target);
        Expr::Cast {
            kind: CastKind::Primitive,
            expr: Box::new(expr),
            ty: Spanned::new(TypeReference::primitive(target), keyword),
        }
    }

    /// `TypeOf x Is T` / `TypeOf x IsNot T`
    fn type_of(&mut self) -> Expr {
        self.advance();
        let expr = self.binary(PrecedenceTier::Shift);
        let negated = if self.match_keyword(KeywordId::Is) {
            self.match_keyword(KeywordId::Not)
        } else if self.match_keyword(KeywordId::IsNot) {
            true
        } else {
            self.expected(DiagnosticCode::ExpectedToken, "'Is' or 'IsNot'");
            false
        };
        Expr::TypeOfIs {
            expr: Box::new(expr),
            ty: self.type_reference(),
            negated,
        }
    }

    /// `If(c, a, b)` / `If(a, b)`
    fn conditional(&mut self) -> Expr {
        self.advance();
        self.expect_punct(PunctuationId::LParen);
        let first = self.expression();
        self.expect_punct(PunctuationId::Comma);
        let second = self.expression();
        let node = if self.match_punct(PunctuationId::Comma) {
            Expr::Conditional {
                condition: Box::new(first),
                when_true: Box::new(second),
                when_false: Box::new(self.expression()),
            }
        } else {
            Expr::Binary {
                op: BinaryOp::NullCoalescing,
                left: Box::new(first),
                right: Box::new(second),
            }
        };
        self.expect_punct(PunctuationId::RParen);
        node
    }

    /// `If(...)` whose operands are already parsed; `start` is the `If` keyword.
    fn conditional_from(&mut self, start: Location, operands: Vec<Spanned<Expr>>) -> Spanned<Expr> {
        if let Some(extra) = operands.get(3) {
            self.error_at(
                DiagnosticCode::InvalidExpression,
                "'If' takes two or three operands",
                extra.span,
            );
        }
        let mut operands = operands.into_iter();
        let node = match (operands.next(), operands.next(), operands.next()) {
            (Some(condition), Some(when_true), Some(when_false)) => Expr::Conditional {
                condition: Box::new(condition),
                when_true: Box::new(when_true),
                when_false: Box::new(when_false),
            },
            (Some(left), Some(right), None) => Expr::Binary {
                op: BinaryOp::NullCoalescing,
                left: Box::new(left),
                right: Box::new(right),
            },
            _ => Expr::Error,
        };
        Spanned::new(node, self.span_from(start))
    }

    // ========================================================================
    // Object and array creation
    // ========================================================================

    /// `New T(args) [With {...} | From {...}]`, `New T(bounds) {...}`, `New With {...}`.
    ///
    /// The cursor is on `New`.
    fn new_expression(&mut self) -> Spanned<Expr> {
        let start = self.start();
        self.advance();

        if self.object_initializer_ahead() {
            self.advance();
            let fields = self.braced(|p| p.field_initializer(false));
            return Spanned::new(Expr::AnonymousObject(fields), self.span_from(start));
        }

        let ty_start = self.start();
        let mut ty = self.created_type_name();
        let args = if self.check_punct(PunctuationId::LParen) {
            Some(self.argument_list())
        } else {
            None
        };

        let node = match args {
            Some(args) if self.check_punct(PunctuationId::LBrace) || self.array_rank_ahead() => {
                while self.array_rank_ahead() {
                    let rank = self.array_rank();
                    ty.array_ranks.push(rank);
                }
                let mut bounds: Vec<_> = args
                    .into_iter()
                    .map(|arg| match arg.node {
                        Argument::Omitted => None,
                        Argument::Positional(expr) => Some(Spanned::new(expr, arg.span)),
                        Argument::Range { high, .. } => Some(high),
                        Argument::Named { value, .. } => Some(value),
                    })
                    .collect();
                if bounds.is_empty() {
                    bounds.push(None);
                }
                let initializer = if self.check_punct(PunctuationId::LBrace) {
                    self.braced(Self::expression)
                } else {
                    self.expected(DiagnosticCode::ExpectedToken, "'{'");
                    Vec::new()
                };
                Expr::ArrayCreate {
                    element: Spanned::new(ty, self.span_from(ty_start)),
                    bounds,
                    initializer,
                }
            }
            args => {
                let ty_span = Span::new(ty_start, ty_start.max(self.prev_end()));
                let init_start = self.start();
                let initializer = if self.object_initializer_ahead() {
                    self.advance();
                    Some(ObjectInitializer::Members(self.braced(|p| p.field_initializer(false))))
                } else if self.collection_initializer_ahead() {
                    self.advance();
                    Some(ObjectInitializer::Collection(self.braced(Self::expression)))
                } else {
                    None
                };
                Expr::ObjectCreate {
                    ty: Spanned::new(ty, ty_span),
                    args,
                    initializer: initializer.map(|init| Spanned::new(init, self.span_from(init_start))),
                }
            }
        };
        Spanned::new(node, self.span_from(start))
    }

    /// The type after `New`: a name or primitive, without array ranks.
    fn created_type_name(&mut self) -> TypeReference {
        let mut ty = match self.current().keyword_id() {
            Some(id) if PRIMITIVE_TYPES.contains(&TokenKind::Keyword(id)) => {
                self.advance();
                TypeReference::primitive(id)
            }
            _ if self.check_keyword(KeywordId::Global) || self.identifier_like_at(0) => self.named_type(false),
            _ => {
                self.expected(DiagnosticCode::ExpectedType, "type");
                TypeReference::named(QualifiedName::default())
            }
        };
        if self.match_punct(PunctuationId::Question) {
            ty.nullable = true;
        }
        ty
    }

    /// `.Name = value`, `Key .Name = value` or an inferred-name `value`.
    ///
    /// With `bare_names`, `Name = value` also names the field (query `Select`/`Let` lists).
    fn field_initializer(&mut self, bare_names: bool) -> Spanned<FieldInitializer> {
        let start = self.start();
        let key = self.check_keyword(KeywordId::Key)
            && (self.check_punct_at(1, PunctuationId::Dot) || self.identifier_like_at(1));
        if key {
            self.advance();
        }

        let dotted = self.check_punct(PunctuationId::Dot)
            && matches!(self.peek_kind(1), TokenKind::Ident(_) | TokenKind::Keyword(_))
            && self.check_op_at(2, OperatorId::Eq);
        let bare = bare_names && self.identifier_like_at(0) && self.check_op_at(1, OperatorId::Eq);
        let name = if dotted || bare {
            if dotted {
                self.advance();
            }
            let name = self.member_name();
            self.advance();
            Some(name)
        } else {
            None
        };
        let value = self.expression();
        Spanned::new(FieldInitializer { key, name, value }, self.span_from(start))
    }

    // ========================================================================
    // Lambdas
    // ========================================================================

    /// `[Async|Iterator] Sub|Function (params) [As T] body`
    fn lambda(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let mut modifiers = ModifierSet::empty();
        while let Some(flag) = self
            .current()
            .keyword_id()
            .filter(|id| matches!(id, KeywordId::Async | KeywordId::Iterator))
            .and_then(ModifierSet::from_keyword)
        {
            self.advance();
            modifiers |= flag;
        }
        let is_function = self.check_keyword(KeywordId::Function);
        self.advance();
        let params = self.parameter_list();
        let return_type = if is_function { self.as_clause() } else { None };

        let body = if self.lambda_body_on_same_line() {
            if is_function {
                LambdaBody::Expression(Box::new(self.expression()))
            } else {
                let statement = match self.statement() {
                    Ok(statement) => statement,
                    Err(Cancelled) => Spanned::new(Statement::Invalid, Span::point(self.start())),
                };
                LambdaBody::Statement(Box::new(statement))
            }
        } else {
            let kind = if is_function { BlockKind::Function } else { BlockKind::Sub };
            // Cancellation is observed again by the next statement-level check.
            let block = self.with_block(kind, start, |p| {
                let body = p.statements()?;
                p.close_block(kind);
                Ok(body)
            });
            LambdaBody::Block(block.unwrap_or_default())
        };

        let lambda = LambdaExpr {
            is_function,
            modifiers,
            params,
            return_type,
            body,
        };
        Spanned::new(Expr::Lambda(Box::new(lambda)), self.span_from(start))
    }
}

/// The tier just above `tier`; right operands are parsed from there so chains associate left.
fn tier_above(tier: PrecedenceTier) -> PrecedenceTier {
    match tier {
        PrecedenceTier::LogicalOr => PrecedenceTier::LogicalAnd,
        PrecedenceTier::LogicalAnd => PrecedenceTier::LogicalNot,
        PrecedenceTier::LogicalNot => PrecedenceTier::Relational,
        PrecedenceTier::Relational => PrecedenceTier::Shift,
        PrecedenceTier::Shift => PrecedenceTier::Concatenation,
        PrecedenceTier::Concatenation => PrecedenceTier::Additive,
        PrecedenceTier::Additive => PrecedenceTier::Modulo,
        PrecedenceTier::Modulo => PrecedenceTier::IntegerDivision,
        PrecedenceTier::IntegerDivision => PrecedenceTier::Multiplicative,
        PrecedenceTier::Multiplicative => PrecedenceTier::Unary,
        PrecedenceTier::Unary | PrecedenceTier::Exponentiation => PrecedenceTier::Exponentiation,
    }
}
