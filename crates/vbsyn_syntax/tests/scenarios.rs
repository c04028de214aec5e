//! End-to-end parser scenarios: source text in, tree and diagnostics out.
//!
//! Each test drives the reference lexer and the parser together, the way a caller would.

use insta::assert_snapshot;
use vbsyn_syntax::ast::{self, dump, NamespaceMember, Statement, TypeKind};
use vbsyn_syntax::diagnostics::{DiagnosticCategory, DiagnosticCode};
use vbsyn_syntax::lexer;
use vbsyn_syntax::parser::{self, ParseOptions, ParseOutput, Snippet};

fn parse(source: &str) -> ParseOutput {
    let lexed = lexer::lex(source);
    assert!(lexed.diagnostics.is_empty(), "lexer diagnostics: {:?}", lexed.diagnostics);
    parser::parse(&lexed.tokens, &ParseOptions::default()).expect("well-formed token stream")
}

fn snippet(source: &str) -> ParseOutput {
    let lexed = lexer::lex_snippet(source);
    parser::parse(&lexed.tokens, &ParseOptions::snippet()).expect("well-formed token stream")
}

fn statements(out: &ParseOutput) -> &[ast::Spanned<Statement>] {
    match &out.snippet {
        Some(Snippet::Statements(stmts)) => stmts,
        other => panic!("expected statements, got {other:?}"),
    }
}

// ---- the five reference scenarios ---------------------------------------------

#[test]
fn test_class_with_end_class() {
    let out = parse("Class A\nEnd Class");
    assert!(out.diagnostics.is_empty());
    assert_eq!(out.unit.members.len(), 1);
    let NamespaceMember::Type(ty) = &out.unit.members[0].node else {
        panic!("expected a type declaration");
    };
    assert_eq!(ty.kind, TypeKind::Class);
    assert_eq!(ty.name, "A");
    assert!(ty.members.is_empty());
    assert_snapshot!(dump::unit(&out.unit), @"(Class A)");
}

#[test]
fn test_dim_initializer_precedence() {
    let out = snippet("Dim x As Integer = 1 + 2 * 3");
    assert!(out.diagnostics.is_empty());
    assert_snapshot!(dump::statements(statements(&out)), @"(Dim (var x Integer (Add 1 (Multiply 2 3))))");
}

#[test]
fn test_for_next_has_no_step() {
    let out = snippet("For i = 1 To 10\nNext");
    assert!(out.diagnostics.is_empty());
    let stmts = statements(&out);
    assert_eq!(stmts.len(), 1);
    let Statement::For(for_stmt) = &stmts[0].node else {
        panic!("expected For, got {:?}", stmts[0].node);
    };
    assert!(for_stmt.step.is_none());
    assert_eq!(dump::expr(&for_stmt.start.node), "1");
    assert_eq!(dump::expr(&for_stmt.end.node), "10");
}

#[test]
fn test_single_line_if_else() {
    let out = snippet("If x Then y Else z");
    assert!(out.diagnostics.is_empty());
    let stmts = statements(&out);
    let Statement::If(if_stmt) = &stmts[0].node else {
        panic!("expected If, got {:?}", stmts[0].node);
    };
    assert!(if_stmt.single_line);
    assert_eq!(if_stmt.then_branch.len(), 1);
    assert_eq!(if_stmt.else_branch.as_ref().map(Vec::len), Some(1));
    assert_eq!(out.stats.blocks_pushed, 0);
    assert_snapshot!(dump::statements(stmts), @"(If x (Then y) (Else z))");
}

#[test]
fn test_truncated_class_spans_to_eof() {
    let lexed = lexer::lex("Class A");
    let eof = lexed.tokens.last().expect("eof token").span.start;
    let out = parser::parse(&lexed.tokens, &ParseOptions::default()).expect("well-formed token stream");

    assert_eq!(out.diagnostics.len(), 1);
    let diagnostic = &out.diagnostics[0];
    assert_eq!(diagnostic.code, DiagnosticCode::MissingBlockEnd);
    assert_eq!(diagnostic.category, DiagnosticCategory::StructuralMismatch);
    assert_eq!(out.unit.members.len(), 1);
    assert_eq!(out.unit.members[0].span.start.offset, 0);
    assert_eq!(out.unit.members[0].span.end, eof);
}

// ---- coverage and recovery ----------------------------------------------------

#[test]
fn test_top_level_spans_cover_the_source() {
    let source = "Imports System, IO = System.IO\n\nNamespace N\n    Class A\n        Sub M()\n        End Sub\n    End Class\nEnd Namespace\n";
    let out = parse(source);
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);

    let namespace = &out.unit.members[0];
    assert_eq!(&source[namespace.span.start.offset..namespace.span.end.offset], "Namespace N\n    Class A\n        Sub M()\n        End Sub\n    End Class\nEnd Namespace");
    assert_eq!(out.unit.imports[0].span.start.offset, 0);
    assert_eq!(&source[..out.unit.imports[0].span.end.offset], "Imports System");
    assert_eq!(out.unit.imports[1].span.end.offset, source.find('\n').unwrap());
}

#[test]
fn test_every_error_is_reported_in_one_pass() {
    let source = "\
Class A
    Sub M()
        x = 1 2
        Dim a() As Integer()
        y = )
    End Sub
End Class
";
    let out = parse(source);
    let lines: Vec<u32> = out.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![3, 4, 5], "{:#?}", out.diagnostics);
    assert_eq!(out.diagnostics[1].code, DiagnosticCode::ArrayRankSpecifiedTwice);
    assert_eq!(out.diagnostics[1].category, DiagnosticCategory::SemanticDuringParse);

    let NamespaceMember::Type(ty) = &out.unit.members[0].node else {
        panic!("expected a type declaration");
    };
    assert_eq!(ty.members.len(), 1);
}

#[test]
fn test_missing_operand_keeps_an_error_node() {
    let out = snippet("x = 1 +");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::ExpectedExpression);
    let Statement::Assignment(assign) = &statements(&out)[0].node else {
        panic!("expected an assignment");
    };
    let ast::Expr::Binary { right, .. } = &assign.value.node else {
        panic!("expected a binary value");
    };
    assert!(right.node.is_error());
}

#[test]
fn test_outline_mode_still_matches_terminators() {
    let source = "Module M\n    Function F() As Integer\n        If x Then\n        Return 1\n    End Function\nEnd Module\n";
    let lexed = lexer::lex(source);
    let out = parser::parse(&lexed.tokens, &ParseOptions::outline()).expect("well-formed token stream");

    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    assert_snapshot!(dump::outline(&out.unit).trim_end(), @r"
    Module M  [1:1-6:11]
      Function F  [2:5-5:17]
    ");
}

#[test]
fn test_primitive_types_are_marked() {
    let out = snippet("Dim s As String, n As Foo");
    let Statement::LocalDecl(decl) = &statements(&out)[0].node else {
        panic!("expected a local declaration");
    };
    let kinds: Vec<bool> = decl
        .declarators
        .iter()
        .map(|d| d.node.ty.as_ref().is_some_and(|t| t.node.is_keyword_type()))
        .collect();
    assert_eq!(kinds, vec![true, false]);
}
