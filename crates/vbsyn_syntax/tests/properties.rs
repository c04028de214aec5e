//! Property-based tests for the parser.
//!
//! These generate source text from small vocabularies and check invariants that must hold for
//! every input: operator nesting follows the precedence tiers, every block pushed is popped, and
//! malformed input never panics.

use proptest::prelude::*;
use vbsyn_syntax::ast::dump;
use vbsyn_syntax::lexer;
use vbsyn_syntax::parser::{self, ParseOptions, ParseOutput, Snippet};

fn parse_snippet(source: &str) -> ParseOutput {
    let lexed = lexer::lex_snippet(source);
    parser::parse(&lexed.tokens, &ParseOptions::snippet()).expect("well-formed token stream")
}

fn parse_unit(source: &str) -> ParseOutput {
    let lexed = lexer::lex(source);
    parser::parse(&lexed.tokens, &ParseOptions::default()).expect("well-formed token stream")
}

// =============================================================================
// Precedence
// =============================================================================

/// Spelling, dump name and tier rank (higher binds tighter).
const BINARY_OPERATORS: &[(&str, &str, u8)] = &[
    ("Or", "Or", 0),
    ("OrElse", "OrElse", 0),
    ("Xor", "Xor", 0),
    ("And", "And", 1),
    ("AndAlso", "AndAlso", 1),
    (">", "GreaterThan", 3),
    (">=", "GreaterThanOrEqual", 3),
    ("Like", "Like", 3),
    (">>", "ShiftRight", 4),
    ("&", "Concat", 5),
    ("+", "Add", 6),
    ("-", "Subtract", 6),
    ("Mod", "Modulus", 7),
    ("\\", "IntegerDivide", 8),
    ("*", "Multiply", 9),
    ("/", "Divide", 9),
    ("^", "Power", 11),
];

fn operator() -> impl Strategy<Value = (&'static str, &'static str, u8)> {
    prop::sample::select(BINARY_OPERATORS)
}

proptest! {
    /// `a op1 b op2 c` nests the tighter operator deeper; equal tiers associate to the left.
    #[test]
    fn prop_two_operators_nest_by_tier(first in operator(), second in operator()) {
        let (spell1, name1, tier1) = first;
        let (spell2, name2, tier2) = second;
        let out = parse_snippet(&format!("a {spell1} b {spell2} c"));
        prop_assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);

        let Some(Snippet::Expression(e)) = &out.snippet else {
            return Err(TestCaseError::fail(format!("expected an expression, got {:?}", out.snippet)));
        };
        let expected = if tier2 > tier1 {
            format!("({name1} a ({name2} b c))")
        } else {
            format!("({name2} ({name1} a b) c)")
        };
        prop_assert_eq!(dump::expr(&e.node), expected);
    }

    /// Parentheses always win over tiers.
    #[test]
    fn prop_parentheses_override_tiers(first in operator(), second in operator()) {
        let (spell1, name1, _) = first;
        let (spell2, name2, _) = second;
        let out = parse_snippet(&format!("a {spell1} (b {spell2} c)"));
        prop_assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);

        let Some(Snippet::Expression(e)) = &out.snippet else {
            return Err(TestCaseError::fail("expected an expression"));
        };
        prop_assert_eq!(dump::expr(&e.node), format!("({name1} a (Paren ({name2} b c)))"));
    }
}

// =============================================================================
// Block balance and termination
// =============================================================================

/// Lines that open, close or sit inside blocks, including mismatched and stray terminators.
const LINES: &[&str] = &[
    "Class C",
    "End Class",
    "Module M",
    "End Module",
    "Namespace N",
    "End Namespace",
    "Structure S",
    "Interface I",
    "Enum E",
    "End Enum",
    "Sub M()",
    "End Sub",
    "Function F() As Integer",
    "End Function",
    "Property P As Integer",
    "Property Q() As Integer",
    "Get",
    "End Get",
    "Set(value As Integer)",
    "End Set",
    "End Property",
    "If x Then",
    "If x Then y Else z",
    "ElseIf y Then",
    "Else",
    "End If",
    "For i = 1 To 10",
    "For Each v In vs",
    "Next",
    "Next i, j",
    "While x",
    "End While",
    "Do",
    "Loop Until x",
    "Select Case x",
    "Case 1, 2 To 3",
    "Case Else",
    "End Select",
    "Try",
    "Catch e As Exception",
    "Finally",
    "End Try",
    "With o",
    "End With",
    "Using r = Open()",
    "End Using",
    "SyncLock o",
    "End SyncLock",
    "Dim a() As Integer() = {1, 2}",
    "x = 1 + * 2",
    "Call Foo(, bar:=1)",
    "Return",
    "End",
    "Exit For",
    "Label:",
    "f = Function(q) q * 2",
    "Dim s = Sub()",
    "Dim q = From a In b Where a > 1 Select a",
    "Dim e = <a b=\"1\"><%= x %></a>",
    ")",
    "Public Private Shared x As Integer",
    "<Obsolete>",
];

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(LINES), 0..24).prop_map(|lines| lines.join("\n"))
}

/// Keywords, punctuation and operators in any order.
const WORDS: &[&str] = &[
    "Class", "Sub", "Function", "End", "If", "Then", "Else", "For", "Each", "In", "To", "Next",
    "Dim", "As", "New", "With", "From", "Select", "Case", "Do", "Loop", "While", "Try", "Catch",
    "Get", "Set", "Property", "Of", "Is", "Not", "And", "x", "y", "1", "\"s\"", "(", ")", "{",
    "}", ",", ".", "=", "+", "*", ":", ":=", "<", ">", "\n",
];

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..48).prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_blocks_balance_on_any_line_mix(src in source()) {
        let out = parse_unit(&src);
        prop_assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped, "source:\n{}", src);
    }

    #[test]
    fn prop_snippets_balance_on_any_line_mix(src in source()) {
        let out = parse_snippet(&src);
        prop_assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped, "source:\n{}", src);
    }

    #[test]
    fn prop_outline_mode_balances_too(src in source()) {
        let lexed = lexer::lex(&src);
        let out = parser::parse(&lexed.tokens, &ParseOptions::outline()).expect("well-formed token stream");
        prop_assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped, "source:\n{}", src);
    }

    /// Arbitrary word salad parses to completion.
    #[test]
    fn prop_word_salad_never_panics(src in words()) {
        let out = parse_unit(&src);
        prop_assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped, "source:\n{}", src);
        for d in &out.diagnostics {
            prop_assert!(d.span.start <= d.span.end);
        }
    }

    /// Diagnostics come back in source order.
    #[test]
    fn prop_diagnostics_are_sorted(src in source()) {
        let out = parse_unit(&src);
        let starts: Vec<_> = out.diagnostics.iter().map(|d| d.span.start.offset).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        prop_assert_eq!(starts, sorted);
    }
}
