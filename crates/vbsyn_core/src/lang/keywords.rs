//! Define the keyword vocabulary for Visual Basic.
//!
//! This module is the single source of truth for keywords: a stable identifier ([`KeywordId`]) plus
//! a const metadata table ([`KEYWORDS`]) that records the canonical spelling, a category, and whether
//! the word is **reserved** or only **contextual**.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive**: `dim`, `Dim` and `DIM` are the same keyword.
//! - Contextual keywords (`From`, `Where`, `Key`, `Custom`, ...) are still lexed as keywords. The
//!   parser accepts them wherever an identifier is expected; [`is_contextual`] tells it which ones.
//! - Word operators (`And`, `Mod`, `Like`, ...) live here as well. Precedence metadata for them is in
//!   [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use vbsyn_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("SyncLock"), Some(KeywordId::SyncLock));
//! assert_eq!(keywords::from_str("synclock"), Some(KeywordId::SyncLock));
//! assert!(keywords::is_contextual(KeywordId::Where));
//! assert!(!keywords::is_contextual(KeywordId::Select));
//! ```

/// Stable identifier for every keyword.
///
/// ## Notes
/// - Reserved words come first (alphabetical), contextual words after them (alphabetical).
/// - The discriminant doubles as the index into [`KEYWORDS`]; see [`KeywordId::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordId {
    // Reserved
    AddHandler,
    AddressOf,
    Alias,
    And,
    AndAlso,
    As,
    Boolean,
    ByRef,
    Byte,
    ByVal,
    Call,
    Case,
    Catch,
    CBool,
    CByte,
    CChar,
    CDate,
    CDbl,
    CDec,
    Char,
    CInt,
    Class,
    CLng,
    CObj,
    Const,
    Continue,
    CSByte,
    CShort,
    CSng,
    CStr,
    CType,
    CUInt,
    CULng,
    CUShort,
    Date,
    Decimal,
    Declare,
    Default,
    Delegate,
    Dim,
    DirectCast,
    Do,
    Double,
    Each,
    Else,
    ElseIf,
    End,
    EndIf,
    Enum,
    Erase,
    Error,
    Event,
    Exit,
    False,
    Finally,
    For,
    Friend,
    Function,
    Get,
    GetType,
    GetXmlNamespace,
    Global,
    GoSub,
    GoTo,
    Handles,
    If,
    Implements,
    Imports,
    In,
    Inherits,
    Integer,
    Interface,
    Is,
    IsNot,
    Let,
    Lib,
    Like,
    Long,
    Loop,
    Me,
    Mod,
    Module,
    MustInherit,
    MustOverride,
    MyBase,
    MyClass,
    Namespace,
    Narrowing,
    New,
    Next,
    Not,
    Nothing,
    NotInheritable,
    NotOverridable,
    Object,
    Of,
    On,
    Operator,
    Option,
    Optional,
    Or,
    OrElse,
    Overloads,
    Overridable,
    Overrides,
    ParamArray,
    Partial,
    Private,
    Property,
    Protected,
    Public,
    RaiseEvent,
    ReadOnly,
    ReDim,
    RemoveHandler,
    Resume,
    Return,
    SByte,
    Select,
    Set,
    Shadows,
    Shared,
    Short,
    Single,
    Static,
    Step,
    Stop,
    String,
    Structure,
    Sub,
    SyncLock,
    Then,
    Throw,
    To,
    True,
    Try,
    TryCast,
    TypeOf,
    UInteger,
    ULong,
    UShort,
    Using,
    Variant,
    Wend,
    When,
    While,
    Widening,
    With,
    WithEvents,
    WriteOnly,
    Xor,

    // Contextual
    Aggregate,
    Ansi,
    Ascending,
    Assembly,
    Async,
    Auto,
    Await,
    Binary,
    By,
    Compare,
    Custom,
    Descending,
    Distinct,
    Equals,
    Explicit,
    From,
    Group,
    Infer,
    Into,
    IsFalse,
    IsTrue,
    Iterator,
    Join,
    Key,
    Mid,
    Off,
    Order,
    Out,
    Preserve,
    Skip,
    Strict,
    Take,
    Text,
    Unicode,
    Until,
    Where,
    Yield,
}

impl KeywordId {
    /// Number of keyword ids.
    pub const COUNT: usize = KeywordId::Yield as usize + 1;

    /// Position of this keyword in [`KEYWORDS`] (and in any per-keyword table).
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// High-level grouping for documentation, highlighting and diagnostics.
///
/// ## Notes
/// - Categories are metadata only. They do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Modifier,
    Type,
    Operator,
    Literal,
    Conversion,
    Query,
    Expression,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub contextual: bool,
}

/// Registry of all keywords, ordered by [`KeywordId`] discriminant.
pub const KEYWORDS: &[KeywordInfo] = &[
    kw(KeywordId::AddHandler, "AddHandler", KeywordCategory::ControlFlow),
    kw(KeywordId::AddressOf, "AddressOf", KeywordCategory::Operator),
    kw(KeywordId::Alias, "Alias", KeywordCategory::Declaration),
    kw(KeywordId::And, "And", KeywordCategory::Operator),
    kw(KeywordId::AndAlso, "AndAlso", KeywordCategory::Operator),
    kw(KeywordId::As, "As", KeywordCategory::Declaration),
    kw(KeywordId::Boolean, "Boolean", KeywordCategory::Type),
    kw(KeywordId::ByRef, "ByRef", KeywordCategory::Modifier),
    kw(KeywordId::Byte, "Byte", KeywordCategory::Type),
    kw(KeywordId::ByVal, "ByVal", KeywordCategory::Modifier),
    kw(KeywordId::Call, "Call", KeywordCategory::ControlFlow),
    kw(KeywordId::Case, "Case", KeywordCategory::ControlFlow),
    kw(KeywordId::Catch, "Catch", KeywordCategory::ControlFlow),
    kw(KeywordId::CBool, "CBool", KeywordCategory::Conversion),
    kw(KeywordId::CByte, "CByte", KeywordCategory::Conversion),
    kw(KeywordId::CChar, "CChar", KeywordCategory::Conversion),
    kw(KeywordId::CDate, "CDate", KeywordCategory::Conversion),
    kw(KeywordId::CDbl, "CDbl", KeywordCategory::Conversion),
    kw(KeywordId::CDec, "CDec", KeywordCategory::Conversion),
    kw(KeywordId::Char, "Char", KeywordCategory::Type),
    kw(KeywordId::CInt, "CInt", KeywordCategory::Conversion),
    kw(KeywordId::Class, "Class", KeywordCategory::Declaration),
    kw(KeywordId::CLng, "CLng", KeywordCategory::Conversion),
    kw(KeywordId::CObj, "CObj", KeywordCategory::Conversion),
    kw(KeywordId::Const, "Const", KeywordCategory::Modifier),
    kw(KeywordId::Continue, "Continue", KeywordCategory::ControlFlow),
    kw(KeywordId::CSByte, "CSByte", KeywordCategory::Conversion),
    kw(KeywordId::CShort, "CShort", KeywordCategory::Conversion),
    kw(KeywordId::CSng, "CSng", KeywordCategory::Conversion),
    kw(KeywordId::CStr, "CStr", KeywordCategory::Conversion),
    kw(KeywordId::CType, "CType", KeywordCategory::Conversion),
    kw(KeywordId::CUInt, "CUInt", KeywordCategory::Conversion),
    kw(KeywordId::CULng, "CULng", KeywordCategory::Conversion),
    kw(KeywordId::CUShort, "CUShort", KeywordCategory::Conversion),
    kw(KeywordId::Date, "Date", KeywordCategory::Type),
    kw(KeywordId::Decimal, "Decimal", KeywordCategory::Type),
    kw(KeywordId::Declare, "Declare", KeywordCategory::Declaration),
    kw(KeywordId::Default, "Default", KeywordCategory::Modifier),
    kw(KeywordId::Delegate, "Delegate", KeywordCategory::Declaration),
    kw(KeywordId::Dim, "Dim", KeywordCategory::Modifier),
    kw(KeywordId::DirectCast, "DirectCast", KeywordCategory::Conversion),
    kw(KeywordId::Do, "Do", KeywordCategory::ControlFlow),
    kw(KeywordId::Double, "Double", KeywordCategory::Type),
    kw(KeywordId::Each, "Each", KeywordCategory::ControlFlow),
    kw(KeywordId::Else, "Else", KeywordCategory::ControlFlow),
    kw(KeywordId::ElseIf, "ElseIf", KeywordCategory::ControlFlow),
    kw(KeywordId::End, "End", KeywordCategory::ControlFlow),
    kw(KeywordId::EndIf, "EndIf", KeywordCategory::ControlFlow),
    kw(KeywordId::Enum, "Enum", KeywordCategory::Declaration),
    kw(KeywordId::Erase, "Erase", KeywordCategory::ControlFlow),
    kw(KeywordId::Error, "Error", KeywordCategory::ControlFlow),
    kw(KeywordId::Event, "Event", KeywordCategory::Declaration),
    kw(KeywordId::Exit, "Exit", KeywordCategory::ControlFlow),
    kw(KeywordId::False, "False", KeywordCategory::Literal),
    kw(KeywordId::Finally, "Finally", KeywordCategory::ControlFlow),
    kw(KeywordId::For, "For", KeywordCategory::ControlFlow),
    kw(KeywordId::Friend, "Friend", KeywordCategory::Modifier),
    kw(KeywordId::Function, "Function", KeywordCategory::Declaration),
    kw(KeywordId::Get, "Get", KeywordCategory::Declaration),
    kw(KeywordId::GetType, "GetType", KeywordCategory::Expression),
    kw(KeywordId::GetXmlNamespace, "GetXmlNamespace", KeywordCategory::Expression),
    kw(KeywordId::Global, "Global", KeywordCategory::Expression),
    kw(KeywordId::GoSub, "GoSub", KeywordCategory::ControlFlow),
    kw(KeywordId::GoTo, "GoTo", KeywordCategory::ControlFlow),
    kw(KeywordId::Handles, "Handles", KeywordCategory::Declaration),
    kw(KeywordId::If, "If", KeywordCategory::ControlFlow),
    kw(KeywordId::Implements, "Implements", KeywordCategory::Declaration),
    kw(KeywordId::Imports, "Imports", KeywordCategory::Declaration),
    kw(KeywordId::In, "In", KeywordCategory::ControlFlow),
    kw(KeywordId::Inherits, "Inherits", KeywordCategory::Declaration),
    kw(KeywordId::Integer, "Integer", KeywordCategory::Type),
    kw(KeywordId::Interface, "Interface", KeywordCategory::Declaration),
    kw(KeywordId::Is, "Is", KeywordCategory::Operator),
    kw(KeywordId::IsNot, "IsNot", KeywordCategory::Operator),
    kw(KeywordId::Let, "Let", KeywordCategory::ControlFlow),
    kw(KeywordId::Lib, "Lib", KeywordCategory::Declaration),
    kw(KeywordId::Like, "Like", KeywordCategory::Operator),
    kw(KeywordId::Long, "Long", KeywordCategory::Type),
    kw(KeywordId::Loop, "Loop", KeywordCategory::ControlFlow),
    kw(KeywordId::Me, "Me", KeywordCategory::Expression),
    kw(KeywordId::Mod, "Mod", KeywordCategory::Operator),
    kw(KeywordId::Module, "Module", KeywordCategory::Declaration),
    kw(KeywordId::MustInherit, "MustInherit", KeywordCategory::Modifier),
    kw(KeywordId::MustOverride, "MustOverride", KeywordCategory::Modifier),
    kw(KeywordId::MyBase, "MyBase", KeywordCategory::Expression),
    kw(KeywordId::MyClass, "MyClass", KeywordCategory::Expression),
    kw(KeywordId::Namespace, "Namespace", KeywordCategory::Declaration),
    kw(KeywordId::Narrowing, "Narrowing", KeywordCategory::Modifier),
    kw(KeywordId::New, "New", KeywordCategory::Expression),
    kw(KeywordId::Next, "Next", KeywordCategory::ControlFlow),
    kw(KeywordId::Not, "Not", KeywordCategory::Operator),
    kw(KeywordId::Nothing, "Nothing", KeywordCategory::Literal),
    kw(KeywordId::NotInheritable, "NotInheritable", KeywordCategory::Modifier),
    kw(KeywordId::NotOverridable, "NotOverridable", KeywordCategory::Modifier),
    kw(KeywordId::Object, "Object", KeywordCategory::Type),
    kw(KeywordId::Of, "Of", KeywordCategory::Declaration),
    kw(KeywordId::On, "On", KeywordCategory::ControlFlow),
    kw(KeywordId::Operator, "Operator", KeywordCategory::Declaration),
    kw(KeywordId::Option, "Option", KeywordCategory::Declaration),
    kw(KeywordId::Optional, "Optional", KeywordCategory::Modifier),
    kw(KeywordId::Or, "Or", KeywordCategory::Operator),
    kw(KeywordId::OrElse, "OrElse", KeywordCategory::Operator),
    kw(KeywordId::Overloads, "Overloads", KeywordCategory::Modifier),
    kw(KeywordId::Overridable, "Overridable", KeywordCategory::Modifier),
    kw(KeywordId::Overrides, "Overrides", KeywordCategory::Modifier),
    kw(KeywordId::ParamArray, "ParamArray", KeywordCategory::Modifier),
    kw(KeywordId::Partial, "Partial", KeywordCategory::Modifier),
    kw(KeywordId::Private, "Private", KeywordCategory::Modifier),
    kw(KeywordId::Property, "Property", KeywordCategory::Declaration),
    kw(KeywordId::Protected, "Protected", KeywordCategory::Modifier),
    kw(KeywordId::Public, "Public", KeywordCategory::Modifier),
    kw(KeywordId::RaiseEvent, "RaiseEvent", KeywordCategory::ControlFlow),
    kw(KeywordId::ReadOnly, "ReadOnly", KeywordCategory::Modifier),
    kw(KeywordId::ReDim, "ReDim", KeywordCategory::ControlFlow),
    kw(KeywordId::RemoveHandler, "RemoveHandler", KeywordCategory::ControlFlow),
    kw(KeywordId::Resume, "Resume", KeywordCategory::ControlFlow),
    kw(KeywordId::Return, "Return", KeywordCategory::ControlFlow),
    kw(KeywordId::SByte, "SByte", KeywordCategory::Type),
    kw(KeywordId::Select, "Select", KeywordCategory::ControlFlow),
    kw(KeywordId::Set, "Set", KeywordCategory::Declaration),
    kw(KeywordId::Shadows, "Shadows", KeywordCategory::Modifier),
    kw(KeywordId::Shared, "Shared", KeywordCategory::Modifier),
    kw(KeywordId::Short, "Short", KeywordCategory::Type),
    kw(KeywordId::Single, "Single", KeywordCategory::Type),
    kw(KeywordId::Static, "Static", KeywordCategory::Modifier),
    kw(KeywordId::Step, "Step", KeywordCategory::ControlFlow),
    kw(KeywordId::Stop, "Stop", KeywordCategory::ControlFlow),
    kw(KeywordId::String, "String", KeywordCategory::Type),
    kw(KeywordId::Structure, "Structure", KeywordCategory::Declaration),
    kw(KeywordId::Sub, "Sub", KeywordCategory::Declaration),
    kw(KeywordId::SyncLock, "SyncLock", KeywordCategory::ControlFlow),
    kw(KeywordId::Then, "Then", KeywordCategory::ControlFlow),
    kw(KeywordId::Throw, "Throw", KeywordCategory::ControlFlow),
    kw(KeywordId::To, "To", KeywordCategory::ControlFlow),
    kw(KeywordId::True, "True", KeywordCategory::Literal),
    kw(KeywordId::Try, "Try", KeywordCategory::ControlFlow),
    kw(KeywordId::TryCast, "TryCast", KeywordCategory::Conversion),
    kw(KeywordId::TypeOf, "TypeOf", KeywordCategory::Expression),
    kw(KeywordId::UInteger, "UInteger", KeywordCategory::Type),
    kw(KeywordId::ULong, "ULong", KeywordCategory::Type),
    kw(KeywordId::UShort, "UShort", KeywordCategory::Type),
    kw(KeywordId::Using, "Using", KeywordCategory::ControlFlow),
    kw(KeywordId::Variant, "Variant", KeywordCategory::Type),
    kw(KeywordId::Wend, "Wend", KeywordCategory::ControlFlow),
    kw(KeywordId::When, "When", KeywordCategory::ControlFlow),
    kw(KeywordId::While, "While", KeywordCategory::ControlFlow),
    kw(KeywordId::Widening, "Widening", KeywordCategory::Modifier),
    kw(KeywordId::With, "With", KeywordCategory::ControlFlow),
    kw(KeywordId::WithEvents, "WithEvents", KeywordCategory::Modifier),
    kw(KeywordId::WriteOnly, "WriteOnly", KeywordCategory::Modifier),
    kw(KeywordId::Xor, "Xor", KeywordCategory::Operator),
    ctx(KeywordId::Aggregate, "Aggregate", KeywordCategory::Query),
    ctx(KeywordId::Ansi, "Ansi", KeywordCategory::Declaration),
    ctx(KeywordId::Ascending, "Ascending", KeywordCategory::Query),
    ctx(KeywordId::Assembly, "Assembly", KeywordCategory::Declaration),
    ctx(KeywordId::Async, "Async", KeywordCategory::Modifier),
    ctx(KeywordId::Auto, "Auto", KeywordCategory::Declaration),
    ctx(KeywordId::Await, "Await", KeywordCategory::Expression),
    ctx(KeywordId::Binary, "Binary", KeywordCategory::Declaration),
    ctx(KeywordId::By, "By", KeywordCategory::Query),
    ctx(KeywordId::Compare, "Compare", KeywordCategory::Declaration),
    ctx(KeywordId::Custom, "Custom", KeywordCategory::Modifier),
    ctx(KeywordId::Descending, "Descending", KeywordCategory::Query),
    ctx(KeywordId::Distinct, "Distinct", KeywordCategory::Query),
    ctx(KeywordId::Equals, "Equals", KeywordCategory::Query),
    ctx(KeywordId::Explicit, "Explicit", KeywordCategory::Declaration),
    ctx(KeywordId::From, "From", KeywordCategory::Query),
    ctx(KeywordId::Group, "Group", KeywordCategory::Query),
    ctx(KeywordId::Infer, "Infer", KeywordCategory::Declaration),
    ctx(KeywordId::Into, "Into", KeywordCategory::Query),
    ctx(KeywordId::IsFalse, "IsFalse", KeywordCategory::Operator),
    ctx(KeywordId::IsTrue, "IsTrue", KeywordCategory::Operator),
    ctx(KeywordId::Iterator, "Iterator", KeywordCategory::Modifier),
    ctx(KeywordId::Join, "Join", KeywordCategory::Query),
    ctx(KeywordId::Key, "Key", KeywordCategory::Query),
    ctx(KeywordId::Mid, "Mid", KeywordCategory::ControlFlow),
    ctx(KeywordId::Off, "Off", KeywordCategory::Declaration),
    ctx(KeywordId::Order, "Order", KeywordCategory::Query),
    ctx(KeywordId::Out, "Out", KeywordCategory::Modifier),
    ctx(KeywordId::Preserve, "Preserve", KeywordCategory::ControlFlow),
    ctx(KeywordId::Skip, "Skip", KeywordCategory::Query),
    ctx(KeywordId::Strict, "Strict", KeywordCategory::Declaration),
    ctx(KeywordId::Take, "Take", KeywordCategory::Query),
    ctx(KeywordId::Text, "Text", KeywordCategory::Declaration),
    ctx(KeywordId::Unicode, "Unicode", KeywordCategory::Declaration),
    ctx(KeywordId::Until, "Until", KeywordCategory::ControlFlow),
    ctx(KeywordId::Where, "Where", KeywordCategory::Query),
    ctx(KeywordId::Yield, "Yield", KeywordCategory::ControlFlow),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if the keyword is contextual (usable as an identifier).
pub const fn is_contextual(id: KeywordId) -> bool {
    KEYWORDS[id.index()].contextual
}

/// Return the full metadata entry for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id.index()]
}

/// Resolve a spelling to a keyword id, ignoring ASCII case.
///
/// ## Notes
/// - `REM` is not a keyword here: the lexer treats it as a comment introducer.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|k| k.canonical.eq_ignore_ascii_case(s))
        .map(|k| k.id)
}

const fn kw(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        contextual: false,
    }
}

const fn ctx(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        contextual: true,
    }
}
