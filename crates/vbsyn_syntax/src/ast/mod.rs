//! Abstract Syntax Tree definitions for Visual Basic.
//!
//! Every node is wrapped in [`Spanned`], which carries the start and end [`Location`] of the
//! source text the node was built from. Ownership is strictly tree shaped: a child belongs to
//! exactly one parent collection.
//!
//! ## Module Structure
//!
//! - `decl` - compilation unit, namespaces, types, members, attributes
//! - `stmt` - statements
//! - `expr` - expressions, queries, XML literals
//! - `types` - type references, type parameters, modifier sets
//! - `dump` - compact S-expression rendering used by the CLI and snapshot tests

mod decl;
pub mod dump;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;

use std::fmt;

/// A position in source text.
///
/// `line` and `column` are 1-based; `offset` is the byte offset from the start of the file.
/// Ordering compares byte offsets first, which agrees with (line, column) order for any two
/// locations taken from the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range covered by a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// An empty span at `at`.
    pub fn point(at: Location) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn start(&self) -> Location {
        self.span.start
    }

    pub fn end(&self) -> Location {
        self.span.end
    }
}

/// Identifier as written (without `[]` escaping or type character).
pub type Ident = String;

/// A dotted name such as `System.Collections.Generic`, optionally rooted at `Global`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedName {
    pub global: bool,
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    pub fn simple(name: impl Into<Ident>) -> Self {
        Self {
            global: false,
            segments: vec![name.into()],
        }
    }

    /// Last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "Global.")?;
        }
        write!(f, "{}", self.segments.join("."))
    }
}
