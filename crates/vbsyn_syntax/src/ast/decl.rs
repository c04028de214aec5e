// ============================================================================
// Compilation unit and declarations
// ============================================================================

use super::{
    Argument, Expr, Ident, ModifierSet, ParameterModifiers, QualifiedName, Span, Spanned, Statement, TypeParameter,
    TypeReference,
};

/// Root of a parsed file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub options: Vec<Spanned<OptionDirective>>,
    pub imports: Vec<Spanned<ImportsClause>>,
    /// `<Assembly: ...>` / `<Module: ...>` sections.
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub members: Vec<Spanned<NamespaceMember>>,
}

/// `Option Strict On`, `Option Compare Text`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDirective {
    Explicit(bool),
    Strict(bool),
    Infer(bool),
    CompareBinary,
    CompareText,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportsClause {
    /// `Imports System.Text`
    Namespace(TypeReference),
    /// `Imports Txt = System.Text`
    Alias { alias: Ident, target: TypeReference },
    /// `Imports <xmlns:p="urn:x">`
    XmlNamespace { prefix: Option<Ident>, uri: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    Assembly,
    Module,
}

/// `<A, B(1)>`
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSection {
    pub target: Option<AttributeTarget>,
    pub attributes: Vec<Spanned<Attribute>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: TypeReference,
    pub args: Vec<Spanned<Argument>>,
}

/// A member that may appear directly in a file or a namespace.
#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    pub members: Vec<Spanned<NamespaceMember>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Module,
    Structure,
    Interface,
    Enum,
    Delegate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: Ident,
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub type_params: Vec<Spanned<TypeParameter>>,
    pub inherits: Vec<Spanned<TypeReference>>,
    pub implements: Vec<Spanned<TypeReference>>,
    /// `Enum E As Byte`
    pub enum_base: Option<Spanned<TypeReference>>,
    /// Signature of a `Delegate Sub/Function` declaration.
    pub delegate: Option<Signature>,
    pub members: Vec<Spanned<MemberDecl>>,
}

/// Parameter list and return type shared by methods, delegates, declares and events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub is_function: bool,
    pub params: Vec<Spanned<Parameter>>,
    pub return_type: Option<Spanned<TypeReference>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberDecl {
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Event(EventDecl),
    Operator(OperatorDecl),
    Declare(DeclareDecl),
    EnumMember(EnumMemberDecl),
    Type(TypeDecl),
}

/// Body of an executable member.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodBody {
    Parsed(Vec<Spanned<Statement>>),
    /// Outline mode: the body was skipped; the span covers the skipped tokens.
    Skipped(Span),
}

impl MethodBody {
    pub fn statements(&self) -> &[Spanned<Statement>] {
        match self {
            MethodBody::Parsed(stmts) => stmts,
            MethodBody::Skipped(_) => &[],
        }
    }
}

/// `Sub`/`Function` member.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub name: Ident,
    pub type_params: Vec<Spanned<TypeParameter>>,
    pub signature: Signature,
    pub handles: Vec<Spanned<Expr>>,
    pub implements: Vec<Spanned<TypeReference>>,
    /// `None` for `MustOverride` and interface members.
    pub body: Option<MethodBody>,
}

/// `Sub New`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub params: Vec<Spanned<Parameter>>,
    pub body: MethodBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub name: Ident,
    pub params: Vec<Spanned<Parameter>>,
    pub ty: Option<Spanned<TypeReference>>,
    /// Auto-property initializer: `Property P As Integer = 5` or `As New List(Of T)`.
    pub initializer: Option<Spanned<Expr>>,
    pub implements: Vec<Spanned<TypeReference>>,
    pub accessors: Vec<Spanned<Accessor>>,
    /// Declared without `Get`/`Set` regions.
    pub is_auto: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
    AddHandler,
    RemoveHandler,
    RaiseEvent,
}

/// `Get ... End Get`, `AddHandler(value As EventHandler) ... End AddHandler`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub params: Vec<Spanned<Parameter>>,
    pub body: MethodBody,
}

/// Field members and local declarations share declarators.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub declarators: Vec<Spanned<VariableDeclarator>>,
}

/// `a, b(10) As Integer = ...` or `c As New Foo(1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub names: Vec<Spanned<DeclaredName>>,
    pub ty: Option<Spanned<TypeReference>>,
    pub initializer: Option<Spanned<Expr>>,
    /// The initializer came from `As New ...` and also provides the type.
    pub as_new: bool,
}

/// A declared variable or parameter name with its optional suffixes.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredName {
    pub name: Ident,
    /// `x(10, 20)`: explicit upper bounds (`None` for an omitted bound, as in `x(,)`).
    pub array_bounds: Option<Vec<Option<Spanned<Expr>>>>,
    pub nullable: bool,
}

impl DeclaredName {
    pub fn simple(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            array_bounds: None,
            nullable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub name: Ident,
    pub params: Vec<Spanned<Parameter>>,
    pub ty: Option<Spanned<TypeReference>>,
    pub implements: Vec<Spanned<TypeReference>>,
    /// `Custom Event` regions; empty for plain events.
    pub accessors: Vec<Spanned<Accessor>>,
}

/// Operators that may be overloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadableOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulus,
    Power,
    Concat,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    ShiftLeft,
    ShiftRight,
    Like,
    And,
    Or,
    Xor,
    Not,
    IsTrue,
    IsFalse,
    CType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub operator: OverloadableOperator,
    pub params: Vec<Spanned<Parameter>>,
    pub return_type: Option<Spanned<TypeReference>>,
    pub body: MethodBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetModifier {
    #[default]
    None,
    Ansi,
    Unicode,
    Auto,
}

/// `Declare Auto Function GetTickCount Lib "kernel32" Alias "GetTickCount" () As Integer`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ModifierSet,
    pub charset: CharsetModifier,
    pub name: Ident,
    pub library: String,
    pub alias: Option<String>,
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub name: Ident,
    pub value: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<Spanned<AttributeSection>>,
    pub modifiers: ParameterModifiers,
    pub name: DeclaredName,
    pub ty: Option<Spanned<TypeReference>>,
    pub default: Option<Spanned<Expr>>,
}
