//! Visual Basic vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables instead of comparing strings.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings, categories and precedence metadata.
//! - Every table is ordered by its ID's discriminant, so lookups by ID are plain indexing. The
//!   guardrail tests in `tests/registry_guardrails.rs` keep that ordering honest.
//!
//! ## Examples
//! ```rust
//! use vbsyn_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("endif"), Some(KeywordId::EndIf));
//! assert_eq!(keywords::as_str(KeywordId::AndAlso), "AndAlso");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
