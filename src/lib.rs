#![forbid(unsafe_code)]
//! vbsyn: an error-tolerant Visual Basic syntax checker.
//!
//! The heavy lifting lives in the workspace crates: `vbsyn_core` holds the canonical vocabulary
//! and `vbsyn_syntax` the lexer, parser, AST and diagnostics. This crate adds the command-line
//! front end on top of them.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;

pub use vbsyn_syntax::ast;
pub use vbsyn_syntax::diagnostics;
pub use vbsyn_syntax::lexer;
pub use vbsyn_syntax::parser;
