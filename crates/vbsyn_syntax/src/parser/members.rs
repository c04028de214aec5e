/// Type members: methods, constructors, properties, events, fields, operators, declares and
/// enum members.
impl<'a> Parser<'a> {
    // ========================================================================
    // Dispatch
    // ========================================================================

    fn member(&mut self, container: Container) -> PResult<Option<Spanned<MemberDecl>>> {
        let start = self.start();
        let attributes = self.attribute_lists();

        if container == Container::Type(TypeKind::Enum) {
            let member = self.enum_member(attributes);
            return Ok(Some(Spanned::new(member, self.span_from(start))));
        }

        let (modifiers, modifier_span) = self.modifiers();
        let dispatch = match self.current().keyword_id() {
            Some(id) => MEMBER_TABLE[id.index()],
            None => MemberStart::None,
        };

        let member = match dispatch {
            MemberStart::Type => {
                self.check_modifiers(modifiers, modifier_span, container.type_disallowed(), "nested types");
                MemberDecl::Type(self.type_declaration(start, attributes, modifiers)?)
            }
            MemberStart::None if !modifiers.is_empty() && self.identifier_like_at(0) => {
                let disallowed = container.member_disallowed().union(FIELD_DISALLOWED);
                self.check_modifiers(modifiers, modifier_span, disallowed, "fields");
                MemberDecl::Field(FieldDecl {
                    attributes,
                    modifiers,
                    declarators: self.declarators(),
                })
            }
            MemberStart::None => {
                let message = format!("expected member declaration, found {}", self.found());
                self.recover_to(DiagnosticCode::InvalidMember, message, LINE_SYNC);
                return Ok(None);
            }
            _ => {
                let header = MemberHeader {
                    start,
                    attributes,
                    modifiers,
                    container,
                };
                let disallowed = container.member_disallowed().union(dispatch_disallowed(dispatch));
                self.check_modifiers(modifiers, modifier_span, disallowed, dispatch_label(dispatch));
                match dispatch {
                    MemberStart::Method if self.constructor_ahead() => self.constructor(header)?,
                    MemberStart::Method => self.method(header)?,
                    MemberStart::Property => self.property(header)?,
                    MemberStart::Event => self.event(header)?,
                    MemberStart::Operator => match self.operator(header)? {
                        Some(op) => op,
                        None => return Ok(None),
                    },
                    _ => self.declare(header),
                }
            }
        };
        Ok(Some(Spanned::new(member, self.span_from(start))))
    }

    // ========================================================================
    // Methods
    // ========================================================================

    fn method(&mut self, header: MemberHeader) -> PResult<MemberDecl> {
        let is_function = self.check_keyword(KeywordId::Function);
        let header_start = self.start();
        self.advance();
        let name = self.identifier();
        let type_params = self.type_parameters();
        let params = self.parameter_list();
        let return_type = if is_function { self.as_clause() } else { None };

        let handles = if self.match_keyword(KeywordId::Handles) {
            let mut events = vec![self.event_reference()];
            while self.match_punct(PunctuationId::Comma) {
                events.push(self.event_reference());
            }
            events
        } else {
            Vec::new()
        };
        let implements = self.implements_clause();
        let header_span = self.span_from(header_start);

        let kind = if is_function { BlockKind::Function } else { BlockKind::Sub };
        let has_body = header.has_body();
        let body = self.member_body(kind, header.start, has_body, header_span)?;
        Ok(MemberDecl::Method(MethodDecl {
            attributes: header.attributes,
            modifiers: header.modifiers,
            name,
            type_params,
            signature: Signature {
                is_function,
                params,
                return_type,
            },
            handles,
            implements,
            body,
        }))
    }

    fn constructor(&mut self, header: MemberHeader) -> PResult<MemberDecl> {
        let header_start = self.start();
        self.advance();
        self.advance();
        let params = self.parameter_list();
        let header_span = self.span_from(header_start);
        let body = self
            .member_body(BlockKind::Sub, header.start, !header.container.is_interface(), header_span)?
            .unwrap_or(MethodBody::Parsed(Vec::new()));
        Ok(MemberDecl::Constructor(ConstructorDecl {
            attributes: header.attributes,
            modifiers: header.modifiers,
            params,
            body,
        }))
    }

    /// `Me.Click`, `button.Click`, `MyBase.Load` after `Handles`.
    fn event_reference(&mut self) -> Spanned<Expr> {
        let start = self.start();
        let mut target = match self.current().keyword_id() {
            Some(KeywordId::Me) => {
                self.advance();
                Expr::Me
            }
            Some(KeywordId::MyBase) => {
                self.advance();
                Expr::MyBase
            }
            Some(KeywordId::MyClass) => {
                self.advance();
                Expr::MyClass
            }
            _ => Expr::ident(self.identifier()),
        };
        while self.qualified_name_continues() {
            let left = Spanned::new(target, self.span_from(start));
            self.advance();
            target = Expr::MemberAccess {
                target: Some(Box::new(left)),
                name: self.member_name(),
                type_args: Vec::new(),
            };
        }
        Spanned::new(target, self.span_from(start))
    }

    fn implements_clause(&mut self) -> Vec<Spanned<TypeReference>> {
        if self.match_keyword(KeywordId::Implements) {
            self.type_list()
        } else {
            Vec::new()
        }
    }

    /// Finish the header line and parse (or skip) the body.
    ///
    /// A declaration that may not have a body (`MustOverride`, interface members) normally has
    /// none; if one follows anyway it is reported, consumed and dropped.
    fn member_body(
        &mut self,
        kind: BlockKind,
        start: Location,
        has_body: bool,
        header_span: Span,
    ) -> PResult<Option<MethodBody>> {
        self.end_of_statement();
        if has_body {
            return Ok(Some(self.body(kind, start)?));
        }
        if self.stray_body_ahead(kind) {
            self.error_at(
                DiagnosticCode::BodyNotAllowed,
                "this declaration cannot have a body",
                header_span,
            );
            self.body(kind, start)?;
        }
        Ok(None)
    }

    /// Statements up to `End <Kind>`, or a skipped span in outline mode.
    fn body(&mut self, kind: BlockKind, start: Location) -> PResult<MethodBody> {
        self.with_block(kind, start, |p| {
            let body = if p.options.parse_method_bodies {
                MethodBody::Parsed(p.statements()?)
            } else {
                MethodBody::Skipped(p.skip_body(kind))
            };
            p.close_block(kind);
            Ok(body)
        })
    }

    /// A body and its `End <Kind>` follow a declaration that should have none.
    ///
    /// Decided from the first token of the next line: its `End <Kind>` or a statement, as
    /// opposed to the next member or the container's terminator.
    fn stray_body_ahead(&self, kind: BlockKind) -> bool {
        let Some(end) = kind.end_keyword() else {
            return false;
        };
        let k = usize::from(self.at_terminator());
        let first = self.peek_kind(k);
        if first.is_keyword(KeywordId::End) {
            return self.check_keyword_at(k + 1, end);
        }
        if MEMBER_ONLY_FIRST.contains(first) || LOCAL_MODIFIERS.contains(first) || first.is_operator(OperatorId::Lt) {
            return false;
        }
        first.keyword_id().is_some_and(|id| STATEMENT_TABLE[id.index()] != StatementStart::None)
            || EXPRESSION_FIRST.contains(first)
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// `(a As Integer, Optional b As String = "")`, if present.
    fn parameter_list(&mut self) -> Vec<Spanned<Parameter>> {
        if self.check_punct(PunctuationId::LParen) {
            self.parenthesized(Self::parameter)
        } else {
            Vec::new()
        }
    }

    fn parameter(&mut self) -> Spanned<Parameter> {
        let start = self.start();
        let attributes = self.attribute_lists();
        let mut modifiers = ParameterModifiers::empty();
        while let Some(flag) = self.current().keyword_id().and_then(ParameterModifiers::from_keyword) {
            self.advance();
            modifiers |= flag;
        }
        let name = self.declared_name();
        let ty = self.as_clause();
        self.check_rank_once(&name, &ty);
        let default = if self.match_op(OperatorId::Eq) {
            Some(self.expression())
        } else {
            None
        };
        Spanned::new(
            Parameter {
                attributes,
                modifiers,
                name: name.node,
                ty,
                default,
            },
            self.span_from(start),
        )
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn property(&mut self, header: MemberHeader) -> PResult<MemberDecl> {
        self.advance();
        let name = self.identifier();
        let params = self.parameter_list();

        let (ty, mut initializer) = if self.object_creation_ahead() {
            self.advance();
            let creation = self.new_expression();
            (created_type(&creation), Some(creation))
        } else {
            (self.as_clause(), None)
        };
        if self.match_op(OperatorId::Eq) {
            initializer = Some(self.expression());
        }
        let implements = self.implements_clause();
        self.end_of_statement();

        let has_body = header.has_body();
        let mut property = PropertyDecl {
            attributes: header.attributes,
            modifiers: header.modifiers,
            name,
            params,
            ty,
            initializer,
            implements,
            accessors: Vec::new(),
            is_auto: false,
        };
        if !has_body {
            return Ok(MemberDecl::Property(property));
        }
        if self.auto_property_ahead() {
            property.is_auto = true;
            return Ok(MemberDecl::Property(property));
        }

        property.accessors = self.accessor_regions(BlockKind::Property, header.start)?;
        self.check_property_accessors(&property, header.start);
        Ok(MemberDecl::Property(property))
    }

    fn check_property_accessors(&mut self, property: &PropertyDecl, start: Location) {
        let has = |kind| property.accessors.iter().any(|a| a.node.kind == kind);
        let missing = if property.modifiers.contains(ModifierSet::READ_ONLY) {
            (!has(AccessorKind::Get)).then_some("'Get'")
        } else if property.modifiers.contains(ModifierSet::WRITE_ONLY) {
            (!has(AccessorKind::Set)).then_some("'Set'")
        } else if !has(AccessorKind::Get) {
            Some("'Get'")
        } else if !has(AccessorKind::Set) {
            Some("'Set'")
        } else {
            None
        };
        if let Some(accessor) = missing {
            let span = Span::new(start, self.prev_end().max(start));
            self.error_at(
                DiagnosticCode::MissingAccessor,
                format!("property '{}' is missing a {accessor} accessor", property.name),
                span,
            );
        }
    }

    /// `Get`/`Set` regions of a property or the three regions of a custom event, then the
    /// closing `End Property` / `End Event`.
    fn accessor_regions(&mut self, block: BlockKind, start: Location) -> PResult<Vec<Spanned<Accessor>>> {
        let mut accessors = Vec::new();
        self.with_block(block, start, |p| {
            loop {
                p.skip_separators();
                if p.is_at_end() || block.end_keyword().is_some_and(|k| p.check_keyword(KeywordId::End) && p.check_keyword_at(1, k)) {
                    break;
                }
                if p.accessor_keyword(block).is_none() && !p.check_op(OperatorId::Lt) && !MODIFIERS.contains(p.peek_kind(0)) {
                    match p.boundary(false) {
                        Boundary::Close => break,
                        Boundary::Stray => {
                            p.stray_terminator();
                            continue;
                        }
                        Boundary::None => {}
                    }
                }
                p.check_cancelled()?;
                let before = p.pos;
                let accessor_start = p.start();
                let attributes = p.attribute_lists();
                let (modifiers, _) = p.modifiers();
                match p.accessor_keyword(block) {
                    Some(kind) => accessors.push(p.accessor(kind, accessor_start, attributes, modifiers)?),
                    None => {
                        let message = format!("expected accessor, found {}", p.found());
                        p.recover_to(DiagnosticCode::InvalidMember, message, LINE_SYNC);
                    }
                }
                p.end_of_statement();
                if p.pos == before {
                    p.force_progress();
                }
            }
            p.close_block(block);
            Ok(())
        })?;
        Ok(accessors)
    }

    /// The accessor the current token opens inside `block`, if any.
    fn accessor_keyword(&self, block: BlockKind) -> Option<AccessorKind> {
        if block == BlockKind::Property {
            return match self.current().keyword_id() {
                Some(KeywordId::Get) => Some(AccessorKind::Get),
                Some(KeywordId::Set) => Some(AccessorKind::Set),
                _ => None,
            };
        }
        if !self.event_accessor_ahead() {
            return None;
        }
        match self.current().keyword_id() {
            Some(KeywordId::AddHandler) => Some(AccessorKind::AddHandler),
            Some(KeywordId::RemoveHandler) => Some(AccessorKind::RemoveHandler),
            _ => Some(AccessorKind::RaiseEvent),
        }
    }

    fn accessor(
        &mut self,
        kind: AccessorKind,
        start: Location,
        attributes: Vec<Spanned<AttributeSection>>,
        modifiers: ModifierSet,
    ) -> PResult<Spanned<Accessor>> {
        self.advance();
        let params = self.parameter_list();
        self.end_of_statement();
        let body = self.body(BlockKind::for_accessor(kind), start)?;
        Ok(Spanned::new(
            Accessor {
                kind,
                attributes,
                modifiers,
                params,
                body,
            },
            self.span_from(start),
        ))
    }

    // ========================================================================
    // Events
    // ========================================================================

    fn event(&mut self, header: MemberHeader) -> PResult<MemberDecl> {
        self.advance();
        let name = self.identifier();
        let params = self.parameter_list();
        let ty = if params.is_empty() { self.as_clause() } else { None };
        let implements = self.implements_clause();

        let mut event = EventDecl {
            attributes: header.attributes,
            modifiers: header.modifiers,
            name,
            params,
            ty,
            implements,
            accessors: Vec::new(),
        };
        if !event.modifiers.contains(ModifierSet::CUSTOM) {
            return Ok(MemberDecl::Event(event));
        }

        self.end_of_statement();
        event.accessors = self.accessor_regions(BlockKind::Event, header.start)?;
        for (kind, label) in [
            (AccessorKind::AddHandler, "AddHandler"),
            (AccessorKind::RemoveHandler, "RemoveHandler"),
            (AccessorKind::RaiseEvent, "RaiseEvent"),
        ] {
            if !event.accessors.iter().any(|a| a.node.kind == kind) {
                let span = Span::new(header.start, self.prev_end().max(header.start));
                self.error_at(
                    DiagnosticCode::MissingAccessor,
                    format!("custom event '{}' is missing a '{label}' accessor", event.name),
                    span,
                );
            }
        }
        Ok(MemberDecl::Event(event))
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// `a, b As Integer, c As New Foo(), d() As String = Nothing`
    fn declarators(&mut self) -> Vec<Spanned<VariableDeclarator>> {
        let mut declarators = vec![self.declarator()];
        while self.match_punct(PunctuationId::Comma) {
            declarators.push(self.declarator());
        }
        declarators
    }

    fn declarator(&mut self) -> Spanned<VariableDeclarator> {
        let start = self.start();
        let mut names = vec![self.declared_name()];
        // `a, b As T` shares one clause; `a As T, b As U` is two declarators.
        while self.check_punct(PunctuationId::Comma) && self.identifier_like_at(1) {
            self.advance();
            names.push(self.declared_name());
        }

        let mut as_new = false;
        let (ty, mut initializer) = if self.object_creation_ahead() {
            self.advance();
            as_new = true;
            let creation = self.new_expression();
            (created_type(&creation), Some(creation))
        } else {
            (self.as_clause(), None)
        };
        for name in &names {
            self.check_rank_once(name, &ty);
        }
        if !as_new && self.match_op(OperatorId::Eq) {
            initializer = Some(self.expression());
        }
        Spanned::new(
            VariableDeclarator {
                names,
                ty,
                initializer,
                as_new,
            },
            self.span_from(start),
        )
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn operator(&mut self, header: MemberHeader) -> PResult<Option<MemberDecl>> {
        self.advance();
        let op_token = self.current();
        let operator = overloadable_operator(&op_token.kind);
        if operator.is_none() {
            self.error_at(
                DiagnosticCode::InvalidOperator,
                format!("'{}' is not an overloadable operator", op_token.text),
                op_token.span,
            );
        }
        if !op_token.kind.is_punctuation(PunctuationId::LParen) {
            self.advance();
        }
        let params = self.parameter_list();
        let return_type = self.as_clause();
        let body = self
            .member_body(BlockKind::Operator, header.start, header.has_body(), op_token.span)?
            .unwrap_or(MethodBody::Parsed(Vec::new()));
        Ok(operator.map(|operator| {
            MemberDecl::Operator(OperatorDecl {
                attributes: header.attributes,
                modifiers: header.modifiers,
                operator,
                params,
                return_type,
                body,
            })
        }))
    }

    // ========================================================================
    // Declare
    // ========================================================================

    /// `Declare Auto Function F Lib "lib" Alias "f" (...) As Integer`
    fn declare(&mut self, header: MemberHeader) -> MemberDecl {
        self.advance();
        let charset = match self.current().keyword_id() {
            Some(KeywordId::Ansi) => CharsetModifier::Ansi,
            Some(KeywordId::Unicode) => CharsetModifier::Unicode,
            Some(KeywordId::Auto) => CharsetModifier::Auto,
            _ => CharsetModifier::None,
        };
        if charset != CharsetModifier::None {
            self.advance();
        }
        let is_function = self.check_keyword(KeywordId::Function);
        if !self.match_keyword(KeywordId::Function) {
            self.expect_keyword(KeywordId::Sub);
        }
        let name = self.identifier();
        self.expect_keyword(KeywordId::Lib);
        let library = self.string_literal().unwrap_or_default();
        let alias = if self.match_keyword(KeywordId::Alias) {
            self.string_literal()
        } else {
            None
        };
        let params = self.parameter_list();
        let return_type = if is_function { self.as_clause() } else { None };
        MemberDecl::Declare(DeclareDecl {
            attributes: header.attributes,
            modifiers: header.modifiers,
            charset,
            name,
            library,
            alias,
            signature: Signature {
                is_function,
                params,
                return_type,
            },
        })
    }

    fn string_literal(&mut self) -> Option<String> {
        match &self.current().kind {
            TokenKind::Literal(LiteralValue::String(value)) => {
                let value = value.clone();
                self.advance();
                Some(value)
            }
            _ => {
                self.expected(DiagnosticCode::ExpectedToken, "string literal");
                None
            }
        }
    }

    // ========================================================================
    // Enum members
    // ========================================================================

    fn enum_member(&mut self, attributes: Vec<Spanned<AttributeSection>>) -> MemberDecl {
        let name = match &self.current().kind {
            TokenKind::Keyword(_) if !self.current().kind.is_identifier_like() => {
                self.expected(DiagnosticCode::ExpectedIdentifier, "enum member name");
                self.advance();
                Ident::new()
            }
            _ => self.identifier(),
        };
        let value = if self.match_op(OperatorId::Eq) {
            Some(self.expression())
        } else {
            None
        };
        MemberDecl::EnumMember(EnumMemberDecl { attributes, name, value })
    }
}

/// Attributes, modifiers and position shared by every member rule.
struct MemberHeader {
    start: Location,
    attributes: Vec<Spanned<AttributeSection>>,
    modifiers: ModifierSet,
    container: Container,
}

impl MemberHeader {
    /// Interface members and `MustOverride` members are declared without a body.
    fn has_body(&self) -> bool {
        !self.container.is_interface() && !self.modifiers.contains(ModifierSet::MUST_OVERRIDE)
    }
}

const FIELD_DISALLOWED: ModifierSet = ModifierSet::OVERRIDABLE
    .union(ModifierSet::OVERRIDES)
    .union(ModifierSet::NOT_OVERRIDABLE)
    .union(ModifierSet::MUST_OVERRIDE)
    .union(ModifierSet::OVERLOADS)
    .union(ModifierSet::PARTIAL)
    .union(ModifierSet::DEFAULT)
    .union(ModifierSet::WRITE_ONLY)
    .union(ModifierSet::WIDENING)
    .union(ModifierSet::NARROWING)
    .union(ModifierSet::ASYNC)
    .union(ModifierSet::ITERATOR)
    .union(ModifierSet::CUSTOM);

fn dispatch_disallowed(dispatch: MemberStart) -> ModifierSet {
    let storage = ModifierSet::CONST
        .union(ModifierSet::DIM)
        .union(ModifierSet::WITH_EVENTS)
        .union(ModifierSet::PARTIAL);
    let conversion = ModifierSet::WIDENING.union(ModifierSet::NARROWING);
    match dispatch {
        MemberStart::Method => storage
            .difference(ModifierSet::PARTIAL)
            .union(conversion)
            .union(ModifierSet::READ_ONLY)
            .union(ModifierSet::WRITE_ONLY)
            .union(ModifierSet::DEFAULT)
            .union(ModifierSet::CUSTOM),
        MemberStart::Property => storage
            .union(conversion)
            .union(ModifierSet::ASYNC)
            .union(ModifierSet::CUSTOM),
        MemberStart::Event => storage
            .union(conversion)
            .union(ModifierSet::READ_ONLY)
            .union(ModifierSet::WRITE_ONLY)
            .union(ModifierSet::DEFAULT)
            .union(ModifierSet::ASYNC)
            .union(ModifierSet::ITERATOR),
        MemberStart::Operator => storage
            .union(ModifierSet::READ_ONLY)
            .union(ModifierSet::WRITE_ONLY)
            .union(ModifierSet::DEFAULT)
            .union(ModifierSet::ASYNC)
            .union(ModifierSet::ITERATOR)
            .union(ModifierSet::CUSTOM),
        _ => storage
            .union(conversion)
            .union(ModifierSet::READ_ONLY)
            .union(ModifierSet::WRITE_ONLY)
            .union(ModifierSet::DEFAULT)
            .union(ModifierSet::ASYNC)
            .union(ModifierSet::ITERATOR)
            .union(ModifierSet::CUSTOM)
            .union(ModifierSet::OVERRIDABLE)
            .union(ModifierSet::OVERRIDES)
            .union(ModifierSet::MUST_OVERRIDE),
    }
}

fn dispatch_label(dispatch: MemberStart) -> &'static str {
    match dispatch {
        MemberStart::Method => "methods",
        MemberStart::Property => "properties",
        MemberStart::Event => "events",
        MemberStart::Operator => "operators",
        _ => "external declarations",
    }
}

/// Type named by an `As New T(...)` creation.
fn created_type(creation: &Spanned<Expr>) -> Option<Spanned<TypeReference>> {
    match &creation.node {
        Expr::ObjectCreate { ty, .. } => Some(ty.clone()),
        Expr::ArrayCreate { element, .. } => Some(element.clone()),
        _ => None,
    }
}

fn overloadable_operator(kind: &TokenKind) -> Option<OverloadableOperator> {
    if let TokenKind::Keyword(id) = kind {
        let op = match id {
            KeywordId::Not => OverloadableOperator::Not,
            KeywordId::IsTrue => OverloadableOperator::IsTrue,
            KeywordId::IsFalse => OverloadableOperator::IsFalse,
            KeywordId::CType => OverloadableOperator::CType,
            KeywordId::Like => OverloadableOperator::Like,
            KeywordId::Mod => OverloadableOperator::Modulus,
            KeywordId::And => OverloadableOperator::And,
            KeywordId::Or => OverloadableOperator::Or,
            KeywordId::Xor => OverloadableOperator::Xor,
            _ => return None,
        };
        return Some(op);
    }
    let op = match kind.operator_id()? {
        OperatorId::Plus => OverloadableOperator::Add,
        OperatorId::Minus => OverloadableOperator::Subtract,
        OperatorId::Star => OverloadableOperator::Multiply,
        OperatorId::Slash => OverloadableOperator::Divide,
        OperatorId::Backslash => OverloadableOperator::IntegerDivide,
        OperatorId::Caret => OverloadableOperator::Power,
        OperatorId::Ampersand => OverloadableOperator::Concat,
        OperatorId::Eq => OverloadableOperator::Equality,
        OperatorId::NotEq => OverloadableOperator::Inequality,
        OperatorId::Lt => OverloadableOperator::LessThan,
        OperatorId::Gt => OverloadableOperator::GreaterThan,
        OperatorId::LtEq => OverloadableOperator::LessThanOrEqual,
        OperatorId::GtEq => OverloadableOperator::GreaterThanOrEqual,
        OperatorId::ShiftLeft => OverloadableOperator::ShiftLeft,
        OperatorId::ShiftRight => OverloadableOperator::ShiftRight,
        _ => return None,
    };
    Some(op)
}
