//! Provide the canonical Visual Basic vocabulary shared by the lexer, the parser and tooling.
//!
//! This crate is intentionally small and dependency-free. It holds **registries**: stable IDs
//! (`KeywordId`, `OperatorId`, `PunctuationId`) plus const metadata tables describing spellings,
//! categories and operator precedence tiers.
//!
//! ## Notes
//!
//! - No AST types, no IO, no global mutable state.
//! - Keyword lookup is case-insensitive, matching the language; operator and punctuation lookup is exact.

pub mod lang;
