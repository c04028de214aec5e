//! Predictive, error-tolerant parser for Visual Basic.
//!
//! Converts a token stream into a location-annotated [`CompilationUnit`] plus a list of
//! [`Diagnostic`]s. The parser is single-pass and never backtracks: branch selection uses FIRST
//! sets and bounded `peek(k)` predicates. Syntax errors are recorded and parsing continues, so one
//! call reports every problem in the file.
//!
//! ## Examples
//!
//! ```rust
//! use vbsyn_syntax::{ast, lexer, parser};
//!
//! let lexed = lexer::lex("Dim x As Integer = 1 + 2 * 3\n");
//! let out = parser::parse(&lexed.tokens, &parser::ParseOptions::snippet()).unwrap();
//! let Some(parser::Snippet::Statements(stmts)) = &out.snippet else { panic!() };
//! assert_eq!(ast::dump::statements(stmts), "(Dim (var x Integer (Add 1 (Multiply 2 3))))");
//! ```

use crate::ast::*;
use crate::diagnostics::{self, Diagnostic, DiagnosticCode};
use crate::lexer::{LiteralValue, Token, TokenKind};
use vbsyn_core::lang::keywords::{self, KeywordCategory, KeywordId};
use vbsyn_core::lang::operators::{self, OperatorId, PrecedenceTier};
use vbsyn_core::lang::punctuation::PunctuationId;
use vbsyn_core::lang::types as primitives;

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use thiserror::Error;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/cursor.rs");
include!("parser/sets.rs");
include!("parser/predicates.rs");
include!("parser/blocks.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/query.rs");
include!("parser/xml.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
