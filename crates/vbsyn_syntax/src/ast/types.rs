// ============================================================================
// Type references, type parameters, modifiers
// ============================================================================

use super::{Ident, QualifiedName, Spanned};
use std::fmt;
use vbsyn_core::lang::keywords::{self, KeywordId};

/// A syntactic reference to a type: `Integer`, `List(Of String)`, `Outer(Of T).Inner`,
/// `Integer()()`, `Date?`, `Dictionary(Of ,)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub name: QualifiedName,
    pub generic_args: GenericArgs,
    /// Member type reached through a generic outer type, e.g. `Inner` in `Outer(Of T).Inner`.
    pub nested: Option<Box<Spanned<TypeReference>>>,
    /// One entry per `( , )` specifier; each entry is the rank (number of commas + 1).
    pub array_ranks: Vec<u32>,
    pub nullable: bool,
    /// The name is a primitive type keyword (`Integer`, `String`, ...).
    pub keyword: Option<KeywordId>,
}

impl TypeReference {
    pub fn named(name: QualifiedName) -> Self {
        Self {
            name,
            generic_args: GenericArgs::None,
            nested: None,
            array_ranks: Vec::new(),
            nullable: false,
            keyword: None,
        }
    }

    pub fn primitive(id: KeywordId) -> Self {
        Self {
            keyword: Some(id),
            ..Self::named(QualifiedName::simple(keywords::as_str(id)))
        }
    }

    pub fn is_keyword_type(&self) -> bool {
        self.keyword.is_some()
    }

    pub fn is_array(&self) -> bool {
        !self.array_ranks.is_empty()
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.generic_args {
            GenericArgs::None => {}
            GenericArgs::Bound(args) => {
                write!(f, "(Of ")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg.node)?;
                }
                write!(f, ")")?;
            }
            GenericArgs::Unbound(arity) => {
                write!(f, "(Of {})", ",".repeat(arity.saturating_sub(1)))?;
            }
        }
        if let Some(nested) = &self.nested {
            write!(f, ".{}", nested.node)?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        for rank in &self.array_ranks {
            write!(f, "({})", ",".repeat(rank.saturating_sub(1) as usize))?;
        }
        Ok(())
    }
}

/// Generic argument list of a type reference.
///
/// A list is either fully bound or fully unbound; unbound lists are only legal inside `GetType`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GenericArgs {
    #[default]
    None,
    Bound(Vec<Spanned<TypeReference>>),
    /// `(Of )`, `(Of ,)`: the arity of the open generic type.
    Unbound(usize),
}

/// Variance annotation on a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// `(Of In T As {Class, New, IComparable})`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub name: Ident,
    pub variance: Variance,
    pub constraints: Vec<Spanned<TypeConstraint>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeConstraint {
    Class,
    Structure,
    New,
    Type(TypeReference),
}

bitflags::bitflags! {
    /// Declaration modifiers.
    ///
    /// `Dim` is tracked as a modifier so "`Dim` together with `Const`" can be reported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierSet: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const FRIEND = 1 << 3;
        const SHARED = 1 << 4;
        const CONST = 1 << 5;
        const READ_ONLY = 1 << 6;
        const WRITE_ONLY = 1 << 7;
        const OVERRIDABLE = 1 << 8;
        const OVERRIDES = 1 << 9;
        const NOT_OVERRIDABLE = 1 << 10;
        const MUST_OVERRIDE = 1 << 11;
        const MUST_INHERIT = 1 << 12;
        const NOT_INHERITABLE = 1 << 13;
        const OVERLOADS = 1 << 14;
        const SHADOWS = 1 << 15;
        const PARTIAL = 1 << 16;
        const WITH_EVENTS = 1 << 17;
        const DIM = 1 << 18;
        const STATIC = 1 << 19;
        const DEFAULT = 1 << 20;
        const WIDENING = 1 << 21;
        const NARROWING = 1 << 22;
        const ASYNC = 1 << 23;
        const ITERATOR = 1 << 24;
        const CUSTOM = 1 << 25;

        const ACCESS = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits() | Self::FRIEND.bits();
    }
}

impl ModifierSet {
    /// Map a modifier keyword to its flag.
    pub fn from_keyword(id: KeywordId) -> Option<ModifierSet> {
        let flag = match id {
            KeywordId::Public => ModifierSet::PUBLIC,
            KeywordId::Private => ModifierSet::PRIVATE,
            KeywordId::Protected => ModifierSet::PROTECTED,
            KeywordId::Friend => ModifierSet::FRIEND,
            KeywordId::Shared => ModifierSet::SHARED,
            KeywordId::Const => ModifierSet::CONST,
            KeywordId::ReadOnly => ModifierSet::READ_ONLY,
            KeywordId::WriteOnly => ModifierSet::WRITE_ONLY,
            KeywordId::Overridable => ModifierSet::OVERRIDABLE,
            KeywordId::Overrides => ModifierSet::OVERRIDES,
            KeywordId::NotOverridable => ModifierSet::NOT_OVERRIDABLE,
            KeywordId::MustOverride => ModifierSet::MUST_OVERRIDE,
            KeywordId::MustInherit => ModifierSet::MUST_INHERIT,
            KeywordId::NotInheritable => ModifierSet::NOT_INHERITABLE,
            KeywordId::Overloads => ModifierSet::OVERLOADS,
            KeywordId::Shadows => ModifierSet::SHADOWS,
            KeywordId::Partial => ModifierSet::PARTIAL,
            KeywordId::WithEvents => ModifierSet::WITH_EVENTS,
            KeywordId::Dim => ModifierSet::DIM,
            KeywordId::Static => ModifierSet::STATIC,
            KeywordId::Default => ModifierSet::DEFAULT,
            KeywordId::Widening => ModifierSet::WIDENING,
            KeywordId::Narrowing => ModifierSet::NARROWING,
            KeywordId::Async => ModifierSet::ASYNC,
            KeywordId::Iterator => ModifierSet::ITERATOR,
            KeywordId::Custom => ModifierSet::CUSTOM,
            _ => return None,
        };
        Some(flag)
    }
}

bitflags::bitflags! {
    /// Parameter modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParameterModifiers: u8 {
        const BY_VAL = 1 << 0;
        const BY_REF = 1 << 1;
        const OPTIONAL = 1 << 2;
        const PARAM_ARRAY = 1 << 3;
    }
}

impl ParameterModifiers {
    pub fn from_keyword(id: KeywordId) -> Option<ParameterModifiers> {
        match id {
            KeywordId::ByVal => Some(ParameterModifiers::BY_VAL),
            KeywordId::ByRef => Some(ParameterModifiers::BY_REF),
            KeywordId::Optional => Some(ParameterModifiers::OPTIONAL),
            KeywordId::ParamArray => Some(ParameterModifiers::PARAM_ARRAY),
            _ => None,
        }
    }
}
