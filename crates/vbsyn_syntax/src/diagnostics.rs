//! Syntax diagnostics.
//!
//! Diagnostics are plain values collected in source order; nothing in the lexer or parser returns
//! early because of one. Each carries a stable [`DiagnosticCode`] (rendered as `VBSnnnn`) and a
//! [`DiagnosticCategory`] describing how the parser reacted to the problem.
//!
//! [`Diagnostic`] implements [`miette::Diagnostic`] so front ends can render it with source context.

use crate::ast::Span;
use std::fmt;
use thiserror::Error;

/// How the parser reacted to a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// The reference lexer could not form a token.
    Lexical,
    /// A required token was absent. Nothing was consumed; parsing continued as if it were present.
    StructuralMismatch,
    /// No alternative matched. Tokens were skipped up to a synchronization point.
    NoViableAlternative,
    /// The syntax was recognized but violates a grammar-adjacent rule. The node was still built.
    SemanticDuringParse,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Lexical => write!(f, "lexical error"),
            DiagnosticCategory::StructuralMismatch => write!(f, "syntax error"),
            DiagnosticCategory::NoViableAlternative => write!(f, "syntax error"),
            DiagnosticCategory::SemanticDuringParse => write!(f, "error"),
        }
    }
}

/// Stable diagnostic identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Lexical (VBS00xx)
    InvalidCharacter,
    UnterminatedString,
    InvalidNumber,
    UnterminatedDate,
    UnterminatedXml,

    // Structural mismatch (VBS10xx)
    ExpectedToken,
    ExpectedIdentifier,
    ExpectedExpression,
    ExpectedEndOfStatement,
    MissingBlockEnd,
    ExpectedType,

    // No viable alternative (VBS11xx)
    InvalidStatement,
    InvalidMember,
    InvalidExpression,
    UnmatchedTerminator,
    InvalidTopLevel,

    // Semantic during parse (VBS12xx)
    ArrayRankSpecifiedTwice,
    InvalidModifierCombination,
    ModifierNotAllowed,
    DuplicateModifier,
    MissingAccessor,
    BodyNotAllowed,
    UnboundGenericNotAllowed,
    InvalidOperator,
    MisplacedDirective,
}

impl DiagnosticCode {
    /// Stable string form, e.g. `VBS1005`.
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidCharacter => "VBS0001",
            DiagnosticCode::UnterminatedString => "VBS0002",
            DiagnosticCode::InvalidNumber => "VBS0003",
            DiagnosticCode::UnterminatedDate => "VBS0004",
            DiagnosticCode::UnterminatedXml => "VBS0005",
            DiagnosticCode::ExpectedToken => "VBS1001",
            DiagnosticCode::ExpectedIdentifier => "VBS1002",
            DiagnosticCode::ExpectedExpression => "VBS1003",
            DiagnosticCode::ExpectedEndOfStatement => "VBS1004",
            DiagnosticCode::MissingBlockEnd => "VBS1005",
            DiagnosticCode::ExpectedType => "VBS1006",
            DiagnosticCode::InvalidStatement => "VBS1101",
            DiagnosticCode::InvalidMember => "VBS1102",
            DiagnosticCode::InvalidExpression => "VBS1103",
            DiagnosticCode::UnmatchedTerminator => "VBS1104",
            DiagnosticCode::InvalidTopLevel => "VBS1105",
            DiagnosticCode::ArrayRankSpecifiedTwice => "VBS1201",
            DiagnosticCode::InvalidModifierCombination => "VBS1202",
            DiagnosticCode::ModifierNotAllowed => "VBS1203",
            DiagnosticCode::DuplicateModifier => "VBS1204",
            DiagnosticCode::MissingAccessor => "VBS1205",
            DiagnosticCode::BodyNotAllowed => "VBS1206",
            DiagnosticCode::UnboundGenericNotAllowed => "VBS1207",
            DiagnosticCode::InvalidOperator => "VBS1208",
            DiagnosticCode::MisplacedDirective => "VBS1209",
        }
    }

    pub fn category(self) -> DiagnosticCategory {
        use DiagnosticCode::*;
        match self {
            InvalidCharacter | UnterminatedString | InvalidNumber | UnterminatedDate | UnterminatedXml => {
                DiagnosticCategory::Lexical
            }
            ExpectedToken | ExpectedIdentifier | ExpectedExpression | ExpectedEndOfStatement | MissingBlockEnd
            | ExpectedType => DiagnosticCategory::StructuralMismatch,
            InvalidStatement | InvalidMember | InvalidExpression | UnmatchedTerminator | InvalidTopLevel => {
                DiagnosticCategory::NoViableAlternative
            }
            ArrayRankSpecifiedTwice
            | InvalidModifierCombination
            | ModifierNotAllowed
            | DuplicateModifier
            | MissingAccessor
            | BodyNotAllowed
            | UnboundGenericNotAllowed
            | InvalidOperator
            | MisplacedDirective => DiagnosticCategory::SemanticDuringParse,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single syntax problem.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            line: span.start.line,
            column: span.start.column,
            code,
            message: message.into(),
            span,
            category: code.category(),
        }
    }

    fn help_text(&self) -> Option<&'static str> {
        match self.code {
            DiagnosticCode::MissingBlockEnd => Some("every block must be closed by its matching terminator"),
            DiagnosticCode::UnmatchedTerminator => Some("this terminator does not close any open block"),
            DiagnosticCode::UnboundGenericNotAllowed => Some("open generic types are only allowed inside GetType(...)"),
            DiagnosticCode::ArrayRankSpecifiedTwice => {
                Some("specify array bounds either on the variable name or on the type, not both")
            }
            _ => None,
        }
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text().map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = miette::SourceSpan::new(self.span.start.offset.into(), self.span.len());
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(self.category.to_string()),
            span,
        ))))
    }
}

/// Stable sort by start offset; diagnostics at the same position keep their emission order.
pub fn sort_in_source_order(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.span.start.offset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Location;

    #[test]
    fn codes_are_unique_and_prefixed() {
        use DiagnosticCode::*;
        let all = [
            InvalidCharacter,
            UnterminatedString,
            InvalidNumber,
            UnterminatedDate,
            UnterminatedXml,
            ExpectedToken,
            ExpectedIdentifier,
            ExpectedExpression,
            ExpectedEndOfStatement,
            MissingBlockEnd,
            ExpectedType,
            InvalidStatement,
            InvalidMember,
            InvalidExpression,
            UnmatchedTerminator,
            InvalidTopLevel,
            ArrayRankSpecifiedTwice,
            InvalidModifierCombination,
            ModifierNotAllowed,
            DuplicateModifier,
            MissingAccessor,
            BodyNotAllowed,
            UnboundGenericNotAllowed,
            InvalidOperator,
            MisplacedDirective,
        ];
        let mut seen = std::collections::HashSet::new();
        for code in all {
            assert!(code.as_str().starts_with("VBS"));
            assert!(seen.insert(code.as_str()), "duplicate code {}", code);
        }
    }

    #[test]
    fn location_comes_from_span_start() {
        let span = Span::new(Location::new(10, 2, 5), Location::new(13, 2, 8));
        let d = Diagnostic::new(DiagnosticCode::ExpectedToken, "expected `Then`", span);
        assert_eq!((d.line, d.column), (2, 5));
        assert_eq!(d.category, DiagnosticCategory::StructuralMismatch);
        assert_eq!(d.to_string(), "expected `Then`");
    }

    #[test]
    fn source_order_sort_is_stable() {
        let at = |offset| Span::point(Location::new(offset, 1, offset as u32 + 1));
        let mut diags = vec![
            Diagnostic::new(DiagnosticCode::InvalidStatement, "b", at(5)),
            Diagnostic::new(DiagnosticCode::ExpectedToken, "a1", at(1)),
            Diagnostic::new(DiagnosticCode::ExpectedToken, "a2", at(1)),
        ];
        sort_in_source_order(&mut diags);
        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["a1", "a2", "b"]);
    }
}
