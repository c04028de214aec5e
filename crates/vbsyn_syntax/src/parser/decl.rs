/// Compilation unit, directives, attributes, namespaces and type declarations.
///
/// File layout is `Option` directives, then `Imports`, then global attributes, then
/// declarations. A directive that shows up late is still parsed and kept, with a diagnostic.
impl<'a> Parser<'a> {
    // ========================================================================
    // Compilation unit
    // ========================================================================

    fn compilation_unit(&mut self, unit: &mut CompilationUnit) -> PResult<()> {
        let mut seen_declaration = false;
        loop {
            self.skip_separators();
            if self.is_at_end() {
                break;
            }
            self.check_cancelled()?;
            let before = self.pos;

            if self.check_keyword(KeywordId::Option) {
                let late = seen_declaration || !unit.imports.is_empty() || !unit.attributes.is_empty();
                self.misplaced_directive(late, "'Option' must precede all other statements");
                if let Some(option) = self.option_directive() {
                    unit.options.push(option);
                }
            } else if self.check_keyword(KeywordId::Imports) {
                let late = seen_declaration || !unit.attributes.is_empty();
                self.misplaced_directive(late, "'Imports' must precede any declarations");
                unit.imports.extend(self.imports_directive());
            } else if self.global_attribute_ahead() {
                self.misplaced_directive(seen_declaration, "assembly and module attributes must precede any declarations");
                unit.attributes.push(self.attribute_section());
            } else if self.boundary(false) == Boundary::Stray {
                self.stray_terminator();
            } else if let Some(member) = self.namespace_member(Container::File)? {
                seen_declaration = true;
                unit.members.push(member);
            }

            self.end_of_statement();
            if self.pos == before {
                self.force_progress();
            }
        }
        Ok(())
    }

    fn misplaced_directive(&mut self, late: bool, message: &str) {
        if late {
            let span = self.current().span;
            self.error_at(DiagnosticCode::MisplacedDirective, message, span);
        }
    }

    /// `Option Strict On`, `Option Compare Text`, ...
    fn option_directive(&mut self) -> Option<Spanned<OptionDirective>> {
        let start = self.start();
        self.advance();
        let directive = match self.current().keyword_id() {
            Some(KeywordId::Explicit) => {
                self.advance();
                OptionDirective::Explicit(self.on_off())
            }
            Some(KeywordId::Strict) => {
                self.advance();
                OptionDirective::Strict(self.on_off())
            }
            Some(KeywordId::Infer) => {
                self.advance();
                OptionDirective::Infer(self.on_off())
            }
            Some(KeywordId::Compare) => {
                self.advance();
                if self.match_keyword(KeywordId::Text) {
                    OptionDirective::CompareText
                } else {
                    self.expect_keyword(KeywordId::Binary);
                    OptionDirective::CompareBinary
                }
            }
            _ => {
                self.expected(DiagnosticCode::ExpectedToken, "'Explicit', 'Strict', 'Infer' or 'Compare'");
                return None;
            }
        };
        Some(Spanned::new(directive, self.span_from(start)))
    }

    /// Optional `On` / `Off`; absent means `On`.
    fn on_off(&mut self) -> bool {
        if self.match_keyword(KeywordId::Off) {
            return false;
        }
        self.match_keyword(KeywordId::On);
        true
    }

    /// `Imports A.B, Alias = C.D, <xmlns:p="urn">`
    ///
    /// The first clause's span starts at `Imports`, so the clauses of a directive cover its line.
    fn imports_directive(&mut self) -> Vec<Spanned<ImportsClause>> {
        let start = self.start();
        self.advance();
        let mut clauses = vec![self.imports_clause(start)];
        while self.match_punct(PunctuationId::Comma) {
            let start = self.start();
            clauses.push(self.imports_clause(start));
        }
        clauses
    }

    fn imports_clause(&mut self, start: Location) -> Spanned<ImportsClause> {
        let clause = if self.check_op(OperatorId::Lt) {
            self.xml_namespace_import()
        } else if self.identifier_like_at(0) && self.check_op_at(1, OperatorId::Eq) {
            let alias = self.identifier();
            self.advance();
            ImportsClause::Alias {
                alias,
                target: self.type_reference().node,
            }
        } else {
            ImportsClause::Namespace(self.type_reference().node)
        };
        Spanned::new(clause, self.span_from(start))
    }

    /// `<xmlns:p="urn:x">` or `<xmlns="urn:x">`.
    fn xml_namespace_import(&mut self) -> ImportsClause {
        self.advance();
        if self.current().name_text() == Some("xmlns") {
            self.advance();
        } else {
            self.expected(DiagnosticCode::ExpectedToken, "'xmlns'");
        }
        let prefix = if self.match_punct(PunctuationId::Colon) {
            Some(self.identifier())
        } else {
            None
        };
        self.expect_op(OperatorId::Eq);
        let uri = match &self.current().kind {
            TokenKind::Literal(LiteralValue::String(uri)) => {
                let uri = uri.clone();
                self.advance();
                uri
            }
            _ => {
                self.expected(DiagnosticCode::ExpectedToken, "namespace string");
                String::new()
            }
        };
        self.expect_op(OperatorId::Gt);
        ImportsClause::XmlNamespace { prefix, uri }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Zero or more `<...>` sections, each optionally followed by a line break.
    fn attribute_lists(&mut self) -> Vec<Spanned<AttributeSection>> {
        let mut sections = Vec::new();
        while self.check_op(OperatorId::Lt) {
            sections.push(self.attribute_section());
            self.skip_eols();
        }
        sections
    }

    fn attribute_section(&mut self) -> Spanned<AttributeSection> {
        let start = self.start();
        self.advance();
        let target = if self.check_punct_at(1, PunctuationId::Colon) {
            match self.current().keyword_id() {
                Some(KeywordId::Assembly) => Some(AttributeTarget::Assembly),
                Some(KeywordId::Module) => Some(AttributeTarget::Module),
                _ => None,
            }
        } else {
            None
        };
        if target.is_some() {
            self.advance();
            self.advance();
        }

        let mut attributes = vec![self.attribute()];
        while self.match_punct(PunctuationId::Comma) {
            attributes.push(self.attribute());
        }
        self.expect_op(OperatorId::Gt);
        Spanned::new(AttributeSection { target, attributes }, self.span_from(start))
    }

    fn attribute(&mut self) -> Spanned<Attribute> {
        let start = self.start();
        let name = TypeReference::named(self.qualified_name());
        let args = if self.check_punct(PunctuationId::LParen) {
            self.argument_list()
        } else {
            Vec::new()
        };
        Spanned::new(Attribute { name, args }, self.span_from(start))
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    /// A namespace or type declaration at file or namespace level.
    fn namespace_member(&mut self, container: Container) -> PResult<Option<Spanned<NamespaceMember>>> {
        let start = self.start();
        if self.check_keyword(KeywordId::Namespace) {
            let namespace = self.namespace_declaration(start)?;
            return Ok(Some(Spanned::new(NamespaceMember::Namespace(namespace), self.span_from(start))));
        }

        let attributes = self.attribute_lists();
        let (modifiers, modifier_span) = self.modifiers();
        if !TYPE_DECLARATION_KEYWORDS.contains(self.peek_kind(0)) {
            let message = format!("expected namespace or type declaration, found {}", self.found());
            self.recover_to(DiagnosticCode::InvalidTopLevel, message, LINE_SYNC);
            return Ok(None);
        }
        self.check_modifiers(modifiers, modifier_span, container.type_disallowed(), "namespace-level types");
        let decl = self.type_declaration(start, attributes, modifiers)?;
        Ok(Some(Spanned::new(NamespaceMember::Type(decl), self.span_from(start))))
    }

    fn namespace_declaration(&mut self, start: Location) -> PResult<NamespaceDecl> {
        self.advance();
        let name = self.qualified_name();
        self.end_of_statement();

        let mut members = Vec::new();
        self.with_block(BlockKind::Namespace, start, |p| {
            loop {
                p.skip_separators();
                if p.is_at_end() {
                    break;
                }
                match p.boundary(false) {
                    Boundary::Close => break,
                    Boundary::Stray => {
                        p.stray_terminator();
                        continue;
                    }
                    Boundary::None => {}
                }
                p.check_cancelled()?;
                let before = p.pos;
                if let Some(member) = p.namespace_member(Container::Namespace)? {
                    members.push(member);
                }
                p.end_of_statement();
                if p.pos == before {
                    p.force_progress();
                }
            }
            p.close_block(BlockKind::Namespace);
            Ok(())
        })?;
        Ok(NamespaceDecl { name, members })
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// `Class`, `Module`, `Structure`, `Interface`, `Enum` or `Delegate`, after attributes and
    /// modifiers.
    fn type_declaration(
        &mut self,
        start: Location,
        attributes: Vec<Spanned<AttributeSection>>,
        modifiers: ModifierSet,
    ) -> PResult<TypeDecl> {
        let kind = match self.advance().keyword_id() {
            Some(KeywordId::Module) => TypeKind::Module,
            Some(KeywordId::Structure) => TypeKind::Structure,
            Some(KeywordId::Interface) => TypeKind::Interface,
            Some(KeywordId::Enum) => TypeKind::Enum,
            Some(KeywordId::Delegate) => TypeKind::Delegate,
            _ => TypeKind::Class,
        };

        let mut decl = TypeDecl {
            kind,
            name: Ident::new(),
            attributes,
            modifiers,
            type_params: Vec::new(),
            inherits: Vec::new(),
            implements: Vec::new(),
            enum_base: None,
            delegate: None,
            members: Vec::new(),
        };

        if kind == TypeKind::Delegate {
            let is_function = self.check_keyword(KeywordId::Function);
            if !self.match_keyword(KeywordId::Function) {
                self.expect_keyword(KeywordId::Sub);
            }
            decl.name = self.identifier();
            decl.type_params = self.type_parameters();
            let params = self.parameter_list();
            let return_type = if is_function { self.as_clause() } else { None };
            decl.delegate = Some(Signature {
                is_function,
                params,
                return_type,
            });
            return Ok(decl);
        }

        decl.name = self.identifier();
        if kind == TypeKind::Enum {
            decl.enum_base = self.as_clause();
        } else {
            decl.type_params = self.type_parameters();
        }
        self.end_of_statement();

        let block = BlockKind::for_type(kind);
        self.with_block(block, start, |p| {
            p.inheritance_clauses(&mut decl);
            decl.members = p.type_members(Container::Type(kind))?;
            p.close_block(block);
            Ok(())
        })?;
        Ok(decl)
    }

    /// `Inherits` / `Implements` lines at the top of a type body.
    fn inheritance_clauses(&mut self, decl: &mut TypeDecl) {
        loop {
            self.skip_separators();
            if self.match_keyword(KeywordId::Inherits) {
                decl.inherits.extend(self.type_list());
            } else if self.match_keyword(KeywordId::Implements) {
                decl.implements.extend(self.type_list());
            } else {
                break;
            }
            self.end_of_statement();
        }
    }

    fn type_members(&mut self, container: Container) -> PResult<Vec<Spanned<MemberDecl>>> {
        let mut members = Vec::new();
        loop {
            self.skip_separators();
            if self.is_at_end() {
                break;
            }
            match self.boundary(false) {
                Boundary::Close => break,
                Boundary::Stray => {
                    self.stray_terminator();
                    continue;
                }
                Boundary::None => {}
            }
            self.check_cancelled()?;
            let before = self.pos;
            if let Some(member) = self.member(container)? {
                members.push(member);
            }
            self.end_of_statement();
            if self.pos == before {
                self.force_progress();
            }
        }
        Ok(members)
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Collect declaration modifiers. Repeats are reported and ignored.
    fn modifiers(&mut self) -> (ModifierSet, Span) {
        let start = self.start();
        let mut set = ModifierSet::empty();
        while let Some(id) = self.current().keyword_id() {
            if !MODIFIERS.contains(self.peek_kind(0)) {
                break;
            }
            // `Async`, `Iterator` and `Custom` are only modifiers in front of a declaration.
            if keywords::is_contextual(id) && !MODIFIERS.union(MEMBER_KEYWORDS).contains(self.peek_kind(1)) {
                break;
            }
            let Some(flag) = ModifierSet::from_keyword(id) else {
                break;
            };
            let token = self.advance();
            if set.contains(flag) {
                self.error_at(
                    DiagnosticCode::DuplicateModifier,
                    format!("duplicate modifier '{}'", token.text),
                    token.span,
                );
            }
            set |= flag;
        }
        (set, self.span_from(start))
    }

    /// Report conflicting modifiers and modifiers in `disallowed`, once each per declaration.
    fn check_modifiers(&mut self, set: ModifierSet, span: Span, disallowed: ModifierSet, what: &str) {
        if let Some((a, b)) = MODIFIER_CONFLICTS
            .iter()
            .find(|(a, b)| set.intersects(*a) && set.intersects(*b))
        {
            let message = format!(
                "modifiers '{}' and '{}' cannot be combined",
                modifier_names(set & *a),
                modifier_names(set & *b)
            );
            self.error_at(DiagnosticCode::InvalidModifierCombination, message, span);
        }

        let rejected = set & disallowed;
        if !rejected.is_empty() {
            let message = format!("modifier '{}' is not allowed on {what}", modifier_names(rejected));
            self.error_at(DiagnosticCode::ModifierNotAllowed, message, span);
        }
    }
}

/// Where a declaration sits; decides which modifiers it may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    File,
    Namespace,
    Type(TypeKind),
}

impl Container {
    fn type_disallowed(self) -> ModifierSet {
        let nested = ModifierSet::ACCESS
            .union(ModifierSet::SHADOWS)
            .union(ModifierSet::MUST_INHERIT)
            .union(ModifierSet::NOT_INHERITABLE)
            .union(ModifierSet::PARTIAL);
        match self {
            Container::File | Container::Namespace => ModifierSet::all()
                .difference(nested)
                .union(ModifierSet::PRIVATE)
                .union(ModifierSet::PROTECTED)
                .union(ModifierSet::SHADOWS),
            Container::Type(TypeKind::Interface) => ModifierSet::all().difference(nested).union(ModifierSet::ACCESS),
            Container::Type(_) => ModifierSet::all().difference(nested),
        }
    }

    /// Modifiers a non-type member may never carry in this container.
    fn member_disallowed(self) -> ModifierSet {
        let never = ModifierSet::MUST_INHERIT
            .union(ModifierSet::NOT_INHERITABLE)
            .union(ModifierSet::STATIC);
        let inheritance = ModifierSet::OVERRIDABLE
            .union(ModifierSet::OVERRIDES)
            .union(ModifierSet::NOT_OVERRIDABLE)
            .union(ModifierSet::MUST_OVERRIDE);
        match self {
            Container::Type(TypeKind::Module) => never
                .union(inheritance)
                .union(ModifierSet::SHARED)
                .union(ModifierSet::PROTECTED)
                .union(ModifierSet::DEFAULT),
            Container::Type(TypeKind::Interface) => never
                .union(inheritance)
                .union(ModifierSet::ACCESS)
                .union(ModifierSet::SHARED)
                .union(ModifierSet::CONST)
                .union(ModifierSet::DIM)
                .union(ModifierSet::ASYNC)
                .union(ModifierSet::ITERATOR),
            Container::Type(TypeKind::Structure) => never
                .union(ModifierSet::PROTECTED)
                .union(ModifierSet::OVERRIDABLE)
                .union(ModifierSet::NOT_OVERRIDABLE)
                .union(ModifierSet::MUST_OVERRIDE),
            _ => never,
        }
    }

    fn is_interface(self) -> bool {
        self == Container::Type(TypeKind::Interface)
    }
}

/// Modifier pairs that may not appear together.
const MODIFIER_CONFLICTS: &[(ModifierSet, ModifierSet)] = &[
    (
        ModifierSet::PUBLIC,
        ModifierSet::PRIVATE.union(ModifierSet::PROTECTED).union(ModifierSet::FRIEND),
    ),
    (ModifierSet::PRIVATE, ModifierSet::FRIEND),
    (ModifierSet::OVERRIDABLE, ModifierSet::NOT_OVERRIDABLE),
    (
        ModifierSet::MUST_OVERRIDE,
        ModifierSet::OVERRIDABLE.union(ModifierSet::NOT_OVERRIDABLE),
    ),
    (ModifierSet::MUST_INHERIT, ModifierSet::NOT_INHERITABLE),
    (ModifierSet::READ_ONLY, ModifierSet::WRITE_ONLY),
    (ModifierSet::WIDENING, ModifierSet::NARROWING),
    (
        ModifierSet::CONST,
        ModifierSet::DIM
            .union(ModifierSet::STATIC)
            .union(ModifierSet::READ_ONLY)
            .union(ModifierSet::SHARED)
            .union(ModifierSet::WITH_EVENTS),
    ),
    (
        ModifierSet::SHARED,
        ModifierSet::OVERRIDABLE
            .union(ModifierSet::MUST_OVERRIDE)
            .union(ModifierSet::OVERRIDES)
            .union(ModifierSet::NOT_OVERRIDABLE),
    ),
];

/// Source spelling of each flag in `set`, space separated.
fn modifier_names(set: ModifierSet) -> String {
    keywords::KEYWORDS
        .iter()
        .filter(|info| ModifierSet::from_keyword(info.id).is_some_and(|flag| set.contains(flag)))
        .map(|info| info.canonical)
        .collect::<Vec<_>>()
        .join(" ")
}
