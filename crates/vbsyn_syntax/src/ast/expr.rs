// ============================================================================
// Expressions
// ============================================================================

use super::{Block, Ident, ModifierSet, Parameter, Spanned, Statement, TypeReference};
use vbsyn_core::lang::keywords::KeywordId;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Floating(f64),
    /// Decimal literals keep their digits; no lossless native type exists.
    Decimal(String),
    String(String),
    Char(char),
    /// Contents between the `#` delimiters.
    Date(String),
    Boolean(bool),
    Nothing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// `x`, `Foo(Of Integer)`
    Identifier {
        name: Ident,
        type_args: Vec<Spanned<TypeReference>>,
    },
    /// A primitive type keyword used as an expression target: `Integer.MaxValue`.
    PrimitiveType(KeywordId),
    Me,
    MyBase,
    MyClass,
    /// `Global` as the root of a qualified name.
    Global,
    /// `a.b`; `target` is `None` for leading-dot access inside `With`.
    MemberAccess {
        target: Option<Box<Spanned<Expr>>>,
        name: Ident,
        type_args: Vec<Spanned<TypeReference>>,
    },
    /// `a!key`
    DictionaryAccess {
        target: Option<Box<Spanned<Expr>>>,
        key: Ident,
    },
    /// `x.<child>`, `x...<descendant>`, `x.@attr`
    XmlAxis {
        target: Option<Box<Spanned<Expr>>>,
        axis: XmlAxisKind,
        name: String,
    },
    /// Call or index: `f(1, 2)`, `arr(0)`.
    Invocation {
        target: Box<Spanned<Expr>>,
        args: Vec<Spanned<Argument>>,
    },
    ObjectCreate {
        ty: Spanned<TypeReference>,
        /// `None` when no argument list was written (`New Foo`).
        args: Option<Vec<Spanned<Argument>>>,
        initializer: Option<Spanned<ObjectInitializer>>,
    },
    /// `New With {.A = 1, Key .B = 2}`
    AnonymousObject(Vec<Spanned<FieldInitializer>>),
    /// `New Integer(9) {}`, `New String() {"a", "b"}`
    ArrayCreate {
        element: Spanned<TypeReference>,
        /// One entry per dimension of the first rank; `None` for an omitted bound.
        bounds: Vec<Option<Spanned<Expr>>>,
        initializer: Vec<Spanned<Expr>>,
    },
    /// `{1, 2, 3}`
    CollectionInitializer(Vec<Spanned<Expr>>),
    Lambda(Box<LambdaExpr>),
    Query(Vec<Spanned<QueryClause>>),
    Cast {
        kind: CastKind,
        expr: Box<Spanned<Expr>>,
        ty: Spanned<TypeReference>,
    },
    /// `TypeOf x Is T` / `TypeOf x IsNot T`
    TypeOfIs {
        expr: Box<Spanned<Expr>>,
        ty: Spanned<TypeReference>,
        negated: bool,
    },
    GetType(Spanned<TypeReference>),
    /// `GetXmlNamespace(prefix)`; `None` for the default namespace.
    GetXmlNamespace(Option<Ident>),
    /// `If(c, a, b)`
    Conditional {
        condition: Box<Spanned<Expr>>,
        when_true: Box<Spanned<Expr>>,
        when_false: Box<Spanned<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Expr>>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Spanned<Expr>>,
        right: Box<Spanned<Expr>>,
    },
    AddressOf(Box<Spanned<Expr>>),
    Parenthesized(Box<Spanned<Expr>>),
    Xml(XmlNode),
    /// Placeholder for an expression that could not be parsed. The span covers the offending token.
    Error,
}

impl Expr {
    /// Plain identifier without type arguments.
    pub fn ident(name: impl Into<Ident>) -> Self {
        Expr::Identifier {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlAxisKind {
    Element,
    Descendant,
    Attribute,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Positional(Expr),
    /// `name:=value`
    Named { name: Ident, value: Spanned<Expr> },
    /// An empty slot: `f(1, , 3)`.
    Omitted,
    /// `0 To 9` in array bounds.
    Range { low: Spanned<Expr>, high: Spanned<Expr> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectInitializer {
    /// `With {.A = 1}`
    Members(Vec<Spanned<FieldInitializer>>),
    /// `From {1, 2}`
    Collection(Vec<Spanned<Expr>>),
}

/// A named value in an initializer, `Select`, `Let`, `Group By` or `Into` list.
///
/// `name` is `None` when the name is inferred from the expression (`Select x.Name`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInitializer {
    pub key: bool,
    pub name: Option<Ident>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    /// `CType(x, T)`
    Conversion,
    /// `DirectCast(x, T)`
    Direct,
    /// `TryCast(x, T)`
    TryCast,
    /// `CInt(x)`, `CStr(x)`, ...
    Primitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
    /// Prefix `*`.
    Dereference,
    Await,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    OrElse,
    Xor,
    And,
    AndAlso,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,
    Is,
    IsNot,
    ShiftLeft,
    ShiftRight,
    Concat,
    Add,
    Subtract,
    Modulus,
    IntegerDivide,
    Multiply,
    Divide,
    Power,
    /// Two-argument `If(a, b)`.
    NullCoalescing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub is_function: bool,
    /// `Async` / `Iterator`
    pub modifiers: ModifierSet,
    pub params: Vec<Spanned<Parameter>>,
    pub return_type: Option<Spanned<TypeReference>>,
    pub body: LambdaBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// `Function(x) x * 2`
    Expression(Box<Spanned<Expr>>),
    /// `Sub(x) Console.WriteLine(x)`
    Statement(Box<Spanned<Statement>>),
    /// Multi-line form closed by `End Function` / `End Sub`.
    Block(Block),
}

// ============================================================================
// Query expressions
// ============================================================================

/// `x As T In source`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeVariable {
    pub name: Ident,
    pub ty: Option<Spanned<TypeReference>>,
    pub source: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
    pub expr: Spanned<Expr>,
    pub descending: bool,
}

/// `a.Id Equals b.Id`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCondition {
    pub left: Spanned<Expr>,
    pub right: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryClause {
    From(Vec<Spanned<RangeVariable>>),
    Aggregate {
        variables: Vec<Spanned<RangeVariable>>,
        clauses: Vec<Spanned<QueryClause>>,
        into: Vec<Spanned<FieldInitializer>>,
    },
    Select(Vec<Spanned<FieldInitializer>>),
    Where(Spanned<Expr>),
    OrderBy(Vec<Spanned<Ordering>>),
    Join {
        variable: Spanned<RangeVariable>,
        conditions: Vec<Spanned<JoinCondition>>,
    },
    GroupJoin {
        variable: Spanned<RangeVariable>,
        conditions: Vec<Spanned<JoinCondition>>,
        into: Vec<Spanned<FieldInitializer>>,
    },
    /// `Group [items] By keys Into aggregates`
    GroupBy {
        items: Vec<Spanned<FieldInitializer>>,
        keys: Vec<Spanned<FieldInitializer>>,
        into: Vec<Spanned<FieldInitializer>>,
    },
    Let(Vec<Spanned<FieldInitializer>>),
    Distinct,
    Skip(Spanned<Expr>),
    Take(Spanned<Expr>),
    SkipWhile(Spanned<Expr>),
    TakeWhile(Spanned<Expr>),
}

// ============================================================================
// XML literals
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// `<?xml version="1.0"?><root/>`
    Document {
        declaration: String,
        prolog: Vec<Spanned<XmlNode>>,
        root: Box<Spanned<XmlNode>>,
    },
    Element {
        name: XmlName,
        attributes: Vec<Spanned<XmlAttribute>>,
        content: Vec<Spanned<XmlNode>>,
        /// Written as `<name/>`.
        empty: bool,
    },
    Text(String),
    Comment(String),
    CData(String),
    ProcessingInstruction(String),
    /// `<%= expr %>`
    Embedded(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlName {
    Literal(String),
    Embedded(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlAttribute {
    Named { name: String, value: XmlAttributeValue },
    /// `<a <%= attr %>/>`
    Embedded(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlAttributeValue {
    Literal(String),
    Embedded(Box<Spanned<Expr>>),
}
