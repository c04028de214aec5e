//! Shared syntax frontend for Visual Basic source: reference lexer, AST, parser, diagnostics.
//!
//! The parser is predictive and single-pass. It consumes a token slice, never backtracks, and
//! keeps going after syntax errors so a single call reports every problem in the file alongside a
//! best-effort tree.
//!
//! ## Notes
//! - This crate is "syntax-only": no name resolution, no binding, no type checking.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `vbsyn_core::lang` registries.
//! - Lexing is a separate collaborator. [`lexer`] is a reference implementation; any producer of
//!   `Vec<Token>` ending in `Eof` can drive the parser.
//!
//! ## Examples
//! ```rust
//! use vbsyn_syntax::{lexer, parser};
//!
//! let lexed = lexer::lex("Class A\nEnd Class\n");
//! let output = parser::parse(&lexed.tokens, &parser::ParseOptions::default()).unwrap();
//! assert!(output.diagnostics.is_empty());
//! assert_eq!(output.unit.members.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
