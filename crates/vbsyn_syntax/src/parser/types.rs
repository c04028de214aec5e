/// Type reference, type parameter and declared-name parsing.
///
/// ## Notes
/// - A generic argument list is either fully bound (`(Of Integer, String)`) or fully unbound
///   (`(Of ,)`); the unbound form is only accepted where the caller allows it (`GetType`).
/// - Array ranks may sit on the type (`Integer()`) or on the declared name (`x() As Integer`),
///   not both.
impl<'a> Parser<'a> {
    // ========================================================================
    // Type references
    // ========================================================================

    fn type_reference(&mut self) -> Spanned<TypeReference> {
        self.type_reference_with(false)
    }

    /// Parse a type reference; `allow_unbound` permits `(Of )` / `(Of ,)`.
    fn type_reference_with(&mut self, allow_unbound: bool) -> Spanned<TypeReference> {
        let start = self.start();
        let mut ty = match self.current().kind {
            TokenKind::Keyword(id) if PRIMITIVE_TYPES.contains(&TokenKind::Keyword(id)) => {
                self.advance();
                TypeReference::primitive(id)
            }
            _ if self.check_keyword(KeywordId::Global) || self.current().kind.is_identifier_like() => {
                self.named_type(allow_unbound)
            }
            _ => {
                self.expected(DiagnosticCode::ExpectedType, "type");
                return Spanned::new(TypeReference::named(QualifiedName::default()), Span::point(start));
            }
        };

        if self.match_punct(PunctuationId::Question) {
            ty.nullable = true;
        }
        while self.array_rank_ahead() {
            ty.array_ranks.push(self.array_rank());
        }
        Spanned::new(ty, self.span_from(start))
    }

    /// `[Global.]A.B(Of T).C`
    fn named_type(&mut self, allow_unbound: bool) -> TypeReference {
        let mut ty = TypeReference::named(self.qualified_name());
        if !self.generic_argument_list_ahead() {
            return ty;
        }
        ty.generic_args = self.generic_arguments(allow_unbound);
        if self.qualified_name_continues() {
            self.advance();
            let start = self.start();
            let nested = self.named_type(allow_unbound);
            ty.nested = Some(Box::new(Spanned::new(nested, self.span_from(start))));
        }
        ty
    }

    /// `(Of T1, T2)` or `(Of ,)`; the cursor is on `(`.
    fn generic_arguments(&mut self, allow_unbound: bool) -> GenericArgs {
        let start = self.start();
        self.advance();
        self.advance();

        if self.check_punct(PunctuationId::RParen) || self.check_punct(PunctuationId::Comma) {
            let mut arity = 1;
            while self.match_punct(PunctuationId::Comma) {
                arity += 1;
            }
            self.expect_punct(PunctuationId::RParen);
            if !allow_unbound {
                self.error_at(
                    DiagnosticCode::UnboundGenericNotAllowed,
                    "unbound generic type is only allowed in 'GetType'",
                    self.span_from(start),
                );
            }
            return GenericArgs::Unbound(arity);
        }

        let mut args = vec![self.type_reference()];
        while self.not_final_comma() {
            self.advance();
            args.push(self.type_reference());
        }
        // `(Of A,)`: a bound list cannot end in an unbound slot.
        if self.match_punct(PunctuationId::Comma) {
            self.expected(DiagnosticCode::ExpectedType, "type argument");
        }
        self.expect_punct(PunctuationId::RParen);
        GenericArgs::Bound(args)
    }

    /// `(` `,`* `)`: returns the rank.
    fn array_rank(&mut self) -> u32 {
        self.advance();
        let mut rank = 1;
        while self.match_punct(PunctuationId::Comma) {
            rank += 1;
        }
        self.expect_punct(PunctuationId::RParen);
        rank
    }

    /// `As T`, if present.
    fn as_clause(&mut self) -> Option<Spanned<TypeReference>> {
        if self.match_keyword(KeywordId::As) {
            // Return-type attributes are accepted and dropped.
            self.attribute_lists();
            Some(self.type_reference())
        } else {
            None
        }
    }

    /// `Implements I.M, J.N` lists and `Inherits A, B` lists.
    fn type_list(&mut self) -> Vec<Spanned<TypeReference>> {
        let mut types = vec![self.type_reference()];
        while self.match_punct(PunctuationId::Comma) {
            types.push(self.type_reference());
        }
        types
    }

    // ========================================================================
    // Type parameters
    // ========================================================================

    /// `(Of In T As {Class, New}, U)` if present.
    fn type_parameters(&mut self) -> Vec<Spanned<TypeParameter>> {
        if !self.generic_argument_list_ahead() {
            return Vec::new();
        }
        self.advance();
        self.advance();
        let mut params = vec![self.type_parameter()];
        while self.match_punct(PunctuationId::Comma) {
            params.push(self.type_parameter());
        }
        self.expect_punct(PunctuationId::RParen);
        params
    }

    fn type_parameter(&mut self) -> Spanned<TypeParameter> {
        let start = self.start();
        let variance = if self.match_keyword(KeywordId::In) {
            Variance::In
        } else if self.check_keyword(KeywordId::Out) && self.identifier_like_at(1) {
            self.advance();
            Variance::Out
        } else {
            Variance::Invariant
        };
        let name = self.identifier();

        let mut constraints = Vec::new();
        if self.match_keyword(KeywordId::As) {
            if self.check_punct(PunctuationId::LBrace) {
                constraints = self.braced(Self::type_constraint);
            } else {
                constraints.push(self.type_constraint());
            }
        }
        Spanned::new(
            TypeParameter {
                name,
                variance,
                constraints,
            },
            self.span_from(start),
        )
    }

    fn type_constraint(&mut self) -> Spanned<TypeConstraint> {
        let start = self.start();
        let constraint = if self.match_keyword(KeywordId::Class) {
            TypeConstraint::Class
        } else if self.match_keyword(KeywordId::Structure) {
            TypeConstraint::Structure
        } else if self.match_keyword(KeywordId::New) {
            TypeConstraint::New
        } else {
            TypeConstraint::Type(self.type_reference().node)
        };
        Spanned::new(constraint, self.span_from(start))
    }

    // ========================================================================
    // Declared names
    // ========================================================================

    /// `x`, `x?`, `x(10, 20)`, `x()`.
    fn declared_name(&mut self) -> Spanned<DeclaredName> {
        let start = self.start();
        let mut name = DeclaredName::simple(self.identifier());
        if self.match_punct(PunctuationId::Question) {
            name.nullable = true;
        }
        if self.array_rank_ahead() {
            let rank = self.array_rank();
            name.array_bounds = Some(vec![None; rank as usize]);
        } else if self.array_bound_ahead() {
            name.array_bounds = Some(self.parenthesized(Self::array_bound));
        }
        Spanned::new(name, self.span_from(start))
    }

    /// One upper bound; `0 To n` keeps `n`.
    fn array_bound(&mut self) -> Option<Spanned<Expr>> {
        if self.check_punct(PunctuationId::Comma) || self.check_punct(PunctuationId::RParen) {
            return None;
        }
        let bound = self.expression();
        if self.match_keyword(KeywordId::To) {
            return Some(self.expression());
        }
        Some(bound)
    }

    /// Report a rank on both the declared name and its type.
    fn check_rank_once(&mut self, name: &Spanned<DeclaredName>, ty: &Option<Spanned<TypeReference>>) {
        let Some(ty) = ty else {
            return;
        };
        if name.node.array_bounds.is_some() && ty.node.is_array() {
            self.error_at(
                DiagnosticCode::ArrayRankSpecifiedTwice,
                format!("array rank of '{}' is specified on both the name and the type", name.node.name),
                ty.span,
            );
        }
    }
}
