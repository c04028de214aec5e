#[cfg(test)]
/// Parser unit tests.
///
/// These cover individual syntactic forms, the disambiguation predicates and recovery
/// behavior (one diagnostic per problem, no cascades).
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_str(source: &str) -> ParseOutput {
        let lexed = lexer::lex(source);
        parse(&lexed.tokens, &ParseOptions::default()).unwrap()
    }

    fn parse_snippet(source: &str) -> ParseOutput {
        let lexed = lexer::lex_snippet(source);
        parse(&lexed.tokens, &ParseOptions::snippet()).unwrap()
    }

    fn dump_statements(source: &str) -> String {
        let out = parse_snippet(source);
        assert!(out.diagnostics.is_empty(), "unexpected diagnostics: {:?}", out.diagnostics);
        match out.snippet {
            Some(Snippet::Statements(stmts)) => dump::statements(&stmts),
            other => panic!("expected statements, got {other:?}"),
        }
    }

    fn dump_expr(source: &str) -> String {
        let out = parse_snippet(source);
        assert!(out.diagnostics.is_empty(), "unexpected diagnostics: {:?}", out.diagnostics);
        match out.snippet {
            Some(Snippet::Expression(e)) => dump::expr(&e.node),
            other => panic!("expected an expression, got {other:?}"),
        }
    }

    fn codes(out: &ParseOutput) -> Vec<DiagnosticCode> {
        out.diagnostics.iter().map(|d| d.code).collect()
    }

    fn class_members(source: &str) -> (Vec<Spanned<MemberDecl>>, Vec<Diagnostic>) {
        let out = parse_str(source);
        match out.unit.members.into_iter().next().map(|m| m.node) {
            Some(NamespaceMember::Type(t)) => (t.members, out.diagnostics),
            other => panic!("expected a type, got {other:?}"),
        }
    }

    #[test]
    fn test_parser_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Parser<'static>>();
    }

    // ---- declarations ---------------------------------------------------------

    #[test]
    fn test_empty_class() {
        let out = parse_str("Class A\nEnd Class");
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.unit.members.len(), 1);
        match &out.unit.members[0].node {
            NamespaceMember::Type(t) => {
                assert_eq!(t.kind, TypeKind::Class);
                assert_eq!(t.name, "A");
                assert!(t.members.is_empty());
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_class_reports_once_and_spans_to_eof() {
        let lexed = lexer::lex("Class A");
        let eof = lexed.tokens.last().unwrap().span.start;
        let out = parse(&lexed.tokens, &ParseOptions::default()).unwrap();

        assert_eq!(codes(&out), vec![DiagnosticCode::MissingBlockEnd]);
        assert!(out.diagnostics[0].message.contains("End Class"));
        let class = &out.unit.members[0];
        assert_eq!(class.span.start.offset, 0);
        assert_eq!(class.span.end, eof);
    }

    #[test]
    fn test_missing_end_if_inside_method_is_one_error() {
        let source = "Class C\nSub M()\nIf x Then\nEnd Sub\nEnd Class\n";
        let (members, diagnostics) = class_members(source);
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].code, DiagnosticCode::MissingBlockEnd);
        assert!(diagnostics[0].message.contains("End If"));
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn test_missing_end_if_leaves_next_method_intact() {
        let source = "Class C\nSub M()\nIf x Then\nEnd Sub\nSub N()\nEnd Sub\nEnd Class\n";
        let (members, diagnostics) = class_members(source);
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].code, DiagnosticCode::MissingBlockEnd);
        assert_eq!(diagnostics[0].line, 4);
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_namespace_with_nested_types() {
        let source = "Namespace N.M\nPublic Module Mod1\nFriend Class Inner\nEnd Class\nEnd Module\nEnd Namespace\n";
        let out = parse_str(source);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        match &out.unit.members[0].node {
            NamespaceMember::Namespace(ns) => {
                assert_eq!(ns.name.segments, vec!["N".to_string(), "M".to_string()]);
                assert_eq!(ns.members.len(), 1);
            }
            other => panic!("expected namespace, got {other:?}"),
        }
    }

    #[test]
    fn test_method_signature_and_handles() {
        let source = "Class C\nPrivate Function F(ByVal a As Integer, Optional b As String = \"\") As Boolean\nReturn True\nEnd Function\nSub OnClick(sender As Object, e As EventArgs) Handles Button1.Click\nEnd Sub\nEnd Class\n";
        let (members, diagnostics) = class_members(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        match &members[0].node {
            MemberDecl::Method(m) => {
                assert_eq!(m.name, "F");
                assert!(m.signature.is_function);
                assert_eq!(m.signature.params.len(), 2);
                assert!(m.signature.params[1].node.modifiers.contains(ParameterModifiers::OPTIONAL));
                assert!(m.modifiers.contains(ModifierSet::PRIVATE));
            }
            other => panic!("expected method, got {other:?}"),
        }
        match &members[1].node {
            MemberDecl::Method(m) => assert_eq!(m.handles.len(), 1),
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_auto_property_and_full_property() {
        let source = "Class C\nPublic Property Name As String = \"x\"\nProperty Age As Integer\nGet\nReturn 1\nEnd Get\nSet(value As Integer)\nEnd Set\nEnd Property\nEnd Class\n";
        let (members, diagnostics) = class_members(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        match (&members[0].node, &members[1].node) {
            (MemberDecl::Property(auto), MemberDecl::Property(full)) => {
                assert!(auto.is_auto);
                assert!(auto.initializer.is_some());
                assert!(!full.is_auto);
                assert_eq!(full.accessors.len(), 2);
            }
            other => panic!("expected two properties, got {other:?}"),
        }
    }

    #[test]
    fn test_property_without_set_reports_missing_accessor() {
        let source = "Class C\nProperty Age As Integer\nGet\nReturn 1\nEnd Get\nEnd Property\nEnd Class\n";
        let (members, diagnostics) = class_members(source);
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].code, DiagnosticCode::MissingAccessor);
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn test_conflicting_and_duplicate_modifiers() {
        let (_, diagnostics) = class_members("Class C\nPublic Private Sub M()\nEnd Sub\nEnd Class\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidModifierCombination);

        let (_, diagnostics) = class_members("Class C\nPublic Public Sub M()\nEnd Sub\nEnd Class\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateModifier);
    }

    #[test]
    fn test_generic_type_parameters_with_constraints() {
        let out = parse_str("Class Box(Of In T As {Class, New}, U)\nEnd Class\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        match &out.unit.members[0].node {
            NamespaceMember::Type(t) => {
                assert_eq!(t.type_params.len(), 2);
                assert_eq!(t.type_params[0].node.variance, Variance::In);
                assert_eq!(t.type_params[0].node.constraints.len(), 2);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_outline_mode_skips_bodies() {
        let lexed = lexer::lex("Class C\nSub M()\nx = (\nEnd Sub\nEnd Class\n");
        let out = parse(&lexed.tokens, &ParseOptions::outline()).unwrap();
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        let NamespaceMember::Type(t) = &out.unit.members[0].node else {
            panic!("expected class");
        };
        match &t.members[0].node {
            MemberDecl::Method(m) => assert!(matches!(m.body, Some(MethodBody::Skipped(_)))),
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_outline_mode_counts_multi_line_lambdas() {
        let source = "Class C\nSub M()\nDim f = Sub(x As Integer)\nConsole.WriteLine(x)\nEnd Sub\nEnd Sub\nSub N()\nEnd Sub\nEnd Class\n";
        let lexed = lexer::lex(source);
        let out = parse(&lexed.tokens, &ParseOptions::outline()).unwrap();
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        let NamespaceMember::Type(t) = &out.unit.members[0].node else {
            panic!("expected class");
        };
        assert_eq!(t.members.len(), 2);
    }

    #[test]
    fn test_must_override_with_body_is_reported_once() {
        let (members, diagnostics) =
            class_members("MustInherit Class C\nMustOverride Sub M()\nx = 1\nEnd Sub\nSub N()\nEnd Sub\nEnd Class\n");
        assert_eq!(diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(), vec![DiagnosticCode::BodyNotAllowed]);
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_must_override_followed_by_member() {
        let (members, diagnostics) =
            class_members("MustInherit Class C\nMustOverride Sub M()\nPublic Sub N()\nEnd Sub\nEnd Class\n");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_option_and_imports() {
        let out = parse_str("Option Strict On\nImports System.Text\nImports IO = System.IO\nModule M\nEnd Module\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(out.unit.options.len(), 1);
        assert_eq!(out.unit.imports.len(), 2);
    }

    // ---- statements -----------------------------------------------------------

    #[test]
    fn test_dim_with_precedence() {
        assert_eq!(
            dump_statements("Dim x As Integer = 1 + 2 * 3"),
            "(Dim (var x Integer (Add 1 (Multiply 2 3))))"
        );
    }

    #[test]
    fn test_for_next_without_step() {
        let out = parse_snippet("For i = 1 To 10\nNext");
        assert!(out.diagnostics.is_empty());
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        match &stmts[0].node {
            Statement::For(f) => {
                assert_eq!(f.start.node, Expr::Literal(Literal::Integer(1)));
                assert_eq!(f.end.node, Expr::Literal(Literal::Integer(10)));
                assert!(f.step.is_none());
            }
            other => panic!("expected For, got {other:?}"),
        }
    }

    #[test]
    fn test_single_line_if_else() {
        let out = parse_snippet("If x Then y Else z");
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.stats.blocks_pushed, 0);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        match &stmts[0].node {
            Statement::If(stmt) => {
                assert!(stmt.single_line);
                assert_eq!(stmt.then_branch.len(), 1);
                assert_eq!(stmt.else_branch.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn test_block_if_with_else_if_forms() {
        assert_eq!(
            dump_statements("If a Then\nx = 1\nElseIf b Then\nx = 2\nElse If c Then\nElse\nx = 3\nEnd If"),
            "(If a (Then (Assign x 1)) (ElseIf b (Then (Assign x 2))) (ElseIf c (Then)) (Else (Assign x 3)))"
        );
    }

    #[test]
    fn test_select_case_labels() {
        assert_eq!(
            dump_statements("Select Case x\nCase 1, 2 To 3\nCase Is > 5\nCase Else\nEnd Select"),
            "(Select x (Case 1 (To 2 3) (Body)) (Case (IsGreaterThan 5) (Body)) (Case Else (Body)))"
        );
    }

    #[test]
    fn test_try_catch_when_finally() {
        assert_eq!(
            dump_statements("Try\nFoo()\nCatch ex As Exception When ex IsNot Nothing\nFinally\nEnd Try"),
            "(Try (Body (Call Foo)) (Catch ex Exception (When (IsNot ex Nothing)) (Body)) (Finally))"
        );
    }

    #[test]
    fn test_do_loop_until() {
        assert_eq!(
            dump_statements("Do\nx += 1\nLoop Until x > 3"),
            "(Do (Body (Assign+ x 1)) (Until (GreaterThan x 3)))"
        );
    }

    #[test]
    fn test_next_with_two_variables_closes_two_loops() {
        let out = parse_snippet("For i = 1 To 2\nFor j = 1 To 2\nNext j, i\nx = 1\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        assert_eq!(stmts.len(), 2);
        let Statement::For(outer) = &stmts[0].node else {
            panic!("expected For");
        };
        assert_eq!(outer.body.len(), 1);
    }

    #[test]
    fn test_for_each_with_declared_variable() {
        assert_eq!(
            dump_statements("For Each item As String In items\nNext"),
            "(ForEach (var item String) items (Body))"
        );
    }

    #[test]
    fn test_with_block_leading_dot() {
        assert_eq!(dump_statements("With o\n.Name = 1\nEnd With"), "(With o (Body (Assign (. Name) 1)))");
    }

    #[test]
    fn test_on_error_forms() {
        assert_eq!(
            dump_statements("On Error GoTo -1\nOn Error Resume Next\nOn Error GoTo Handler\nResume Next"),
            "(OnError GoTo -1)\n(OnError ResumeNext)\n(OnError GoTo Handler)\n(Resume Next)"
        );
    }

    #[test]
    fn test_using_with_declaration() {
        assert_eq!(
            dump_statements("Using r As New Reader()\nEnd Using"),
            "(Using (var r Reader (New Reader (Args))) (Body))"
        );
    }

    #[test]
    fn test_array_rank_on_name_and_type() {
        let out = parse_snippet("Dim a() As Integer()");
        assert_eq!(codes(&out), vec![DiagnosticCode::ArrayRankSpecifiedTwice]);
    }

    #[test]
    fn test_stray_next_is_reported_and_skipped() {
        let out = parse_snippet("Next\nx = 1\n");
        assert_eq!(codes(&out), vec![DiagnosticCode::UnmatchedTerminator]);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_invalid_statement_recovers_at_line_end() {
        let out = parse_snippet(") x\ny = 2\n");
        assert_eq!(codes(&out), vec![DiagnosticCode::InvalidStatement]);
        assert!(out.stats.tokens_skipped >= 2);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        assert_eq!(dump::statement(&stmts[1].node), "(Assign y 2)");
    }

    #[test]
    fn test_trailing_junk_after_statement() {
        let out = parse_snippet("Return 1 2\n");
        assert_eq!(codes(&out), vec![DiagnosticCode::ExpectedEndOfStatement]);
    }

    // ---- expressions ----------------------------------------------------------

    #[test]
    fn test_precedence_tiers() {
        assert_eq!(dump_expr("a Mod b \\ c"), "(Modulus a (IntegerDivide b c))");
        assert_eq!(dump_expr("a \\ b Mod c"), "(Modulus (IntegerDivide a b) c)");
        assert_eq!(dump_expr("a - b - c"), "(Subtract (Subtract a b) c)");
        assert_eq!(dump_expr("a & b + c"), "(Concat a (Add b c))");
        assert_eq!(dump_expr("a Or b And c"), "(Or a (And b c))");
        assert_eq!(dump_expr("x << 1 = y"), "(Equal (ShiftLeft x 1) y)");
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(dump_expr("Not a = b And c"), "(And (Not (Equal a b)) c)");
        assert_eq!(dump_expr("-2 ^ 2"), "(Minus (Power 2 2))");
        assert_eq!(dump_expr("2 ^ -1"), "(Power 2 (Minus 1))");
        assert_eq!(dump_expr("-a * b"), "(Multiply (Minus a) b)");
    }

    #[test]
    fn test_is_not_folding() {
        assert_eq!(dump_expr("x Is Not Nothing"), "(IsNot x Nothing)");
        assert_eq!(dump_expr("x IsNot Nothing"), "(IsNot x Nothing)");
    }

    #[test]
    fn test_invocation_and_named_arguments() {
        assert_eq!(dump_expr("Foo(bar)"), "(Call Foo bar)");
        assert_eq!(dump_expr("Foo(bar:=1)"), "(Call Foo (bar:= 1))");
        assert_eq!(dump_expr("Foo(1, , 3)"), "(Call Foo 1 _ 3)");
    }

    #[test]
    fn test_object_initializer_only_right_after_arguments() {
        assert_eq!(dump_expr("New Foo() With {.A = 1}"), "(New Foo (Args) (With (A= 1)))");
        assert_eq!(dump_expr("New List(Of Integer) From {1, 2}"), "(New List(Of Integer) (From 1 2))");

        let out = parse_snippet("Dim f = New Foo()\nWith f\nEnd With\n");
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_array_and_anonymous_creation() {
        assert_eq!(dump_expr("New Integer() {1, 2}"), "(NewArray Integer (Bounds _) (Init 1 2))");
        assert_eq!(dump_expr("New String(0 To 4) {}"), "(NewArray String (Bounds 4) (Init))");
        assert_eq!(dump_expr("New With {Key .Id = 1, .Name = n}"), "(New (With (Key Id= 1) (Name= n)))");
    }

    #[test]
    fn test_casts_and_type_operators() {
        assert_eq!(dump_expr("CType(x, String)"), "(ConversionCast x String)");
        assert_eq!(dump_expr("TryCast(x, Foo)"), "(TryCastCast x Foo)");
        assert_eq!(dump_expr("CInt(x)"), "(PrimitiveCast x Integer)");
        assert_eq!(dump_expr("TypeOf x Is Foo"), "(TypeOfIs x Foo)");
        assert_eq!(dump_expr("TypeOf x IsNot Foo"), "(TypeOfIsNot x Foo)");
        assert_eq!(dump_expr("GetType(Dictionary(Of ,))"), "(GetType Dictionary(Of ,))");
    }

    #[test]
    fn test_unbound_generic_outside_get_type() {
        let out = parse_snippet("Dim x As List(Of )");
        assert_eq!(codes(&out), vec![DiagnosticCode::UnboundGenericNotAllowed]);
    }

    #[test]
    fn test_bound_generic_list_cannot_end_unbound() {
        let out = parse_snippet("Dim d As Dictionary(Of String,)");
        assert_eq!(codes(&out), vec![DiagnosticCode::ExpectedType]);
        assert_eq!(out.stats.tokens_skipped, 0);
    }

    #[test]
    fn test_inline_if_forms() {
        assert_eq!(dump_expr("If(c, a, b)"), "(If c a b)");
        assert_eq!(dump_expr("If(a, b)"), "(NullCoalescing a b)");
    }

    #[test]
    fn test_if_statement_with_parenthesized_condition() {
        assert_eq!(
            dump_statements("If (a) And b Then x = 1"),
            "(If (And (Paren a) b) (Then (Assign x 1)))"
        );
    }

    #[test]
    fn test_inline_if_at_statement_start() {
        assert_eq!(dump_expr("If(a, b).M()"), "(Call (. (NullCoalescing a b) M))");
        assert_eq!(dump_statements("If(c, a, b).P = 1"), "(Assign (. (If c a b) P) 1)");
    }

    #[test]
    fn test_member_access_and_generic_application() {
        assert_eq!(dump_expr("a.b(1).c"), "(. (Call (. a b) 1) c)");
        assert_eq!(dump_expr("Foo(Of Integer)(x)"), "(Call (Of Foo Integer) x)");
        assert_eq!(dump_expr("d!key"), "(! d key)");
        assert_eq!(dump_expr("Integer.MaxValue"), "(. Integer MaxValue)");
    }

    #[test]
    fn test_lambdas() {
        assert_eq!(dump_expr("Function(x) x * 2"), "(Function (Params (x _)) (Multiply x 2))");
        assert_eq!(
            dump_statements("Dim f = Sub(x As Integer)\nPrint(x)\nEnd Sub"),
            "(Dim (var f _ (Sub (Params (x Integer)) (Body (Call Print x)))))"
        );
    }

    #[test]
    fn test_query_expression() {
        assert_eq!(
            dump_expr("From x In xs Where x > 1 Order By x Descending Select x"),
            "(Query (From (In x xs)) (Where (GreaterThan x 1)) (OrderBy (Descending x)) (Select x))"
        );
        assert_eq!(
            dump_expr("From a In xs Join b In ys On a.Id Equals b.Id Select a"),
            "(Query (From (In a xs)) (Join (In b ys) (On (Equals (. a Id) (. b Id)))) (Select a))"
        );
    }

    #[test]
    fn test_xml_literal() {
        assert_eq!(
            dump_expr("<a b=\"1\"><%= x %></a>"),
            "(XmlElement a (@b \"1\") (Embed x))"
        );
    }

    #[test]
    fn test_snippet_of_a_single_empty_element() {
        assert_eq!(dump_expr("<a/>"), "(XmlEmpty a)");
    }

    #[test]
    fn test_missing_operand_yields_error_node() {
        let out = parse_snippet("x = 1 +\n");
        assert_eq!(codes(&out), vec![DiagnosticCode::ExpectedExpression]);
        let Some(Snippet::Statements(stmts)) = &out.snippet else {
            panic!("expected statements");
        };
        assert_eq!(dump::statement(&stmts[0].node), "(Assign x (Add 1 <error>))");
    }

    // ---- api ------------------------------------------------------------------

    #[test]
    fn test_fatal_token_streams() {
        assert!(matches!(parse(&[], &ParseOptions::default()), Err(ParseError::EmptyTokenStream)));

        let mut tokens = lexer::lex("x").tokens;
        tokens.pop();
        assert!(matches!(parse(&tokens, &ParseOptions::default()), Err(ParseError::MissingEof)));
    }

    #[test]
    fn test_cancellation_returns_partial_unit() {
        let lexed = lexer::lex("Class A\nEnd Class\n");
        let cancel = AtomicBool::new(true);
        match parse_with_cancellation(&lexed.tokens, &ParseOptions::default(), &cancel) {
            Err(ParseError::Cancelled { partial, .. }) => assert!(partial.members.is_empty()),
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    /// Fires once it has been polled `after` times.
    struct Countdown {
        after: usize,
        polls: std::sync::atomic::AtomicUsize,
    }

    impl CancellationSignal for Countdown {
        fn is_cancelled(&self) -> bool {
            self.polls.fetch_add(1, std::sync::atomic::Ordering::Relaxed) >= self.after
        }
    }

    #[test]
    fn test_cancellation_keeps_finished_declarations() {
        let lexed = lexer::lex("Class A\nEnd Class\nClass B\nEnd Class\n");
        let cancel = Countdown {
            after: 1,
            polls: std::sync::atomic::AtomicUsize::new(0),
        };
        match parse_with_cancellation(&lexed.tokens, &ParseOptions::default(), &cancel) {
            Err(ParseError::Cancelled { partial, .. }) => {
                assert_eq!(partial.members.len(), 1);
                match &partial.members[0].node {
                    NamespaceMember::Type(t) => assert_eq!(t.name, "A"),
                    other => panic!("expected class A, got {other:?}"),
                }
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn test_block_stack_balanced_on_malformed_input() {
        let out = parse_str("Class A\nSub M()\nFor i = 1 To 3\nIf x Then\nWhile y\n");
        assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped);
        assert_eq!(out.stats.max_block_depth, 5);
        assert_eq!(out.diagnostics.len(), 5);
    }
}
