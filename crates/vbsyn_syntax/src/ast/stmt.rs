// ============================================================================
// Statements
// ============================================================================

use super::{Expr, Ident, ModifierSet, Spanned, TypeReference, VariableDeclarator};

pub type Block = Vec<Spanned<Statement>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfStmt),
    Select(SelectStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    While(WhileStmt),
    DoLoop(DoLoopStmt),
    Try(TryStmt),
    Using(UsingStmt),
    With(WithStmt),
    SyncLock(SyncLockStmt),
    /// `x = 1`, `x += 1`, `Mid(s, 1, 2) = "ab"`
    Assignment(AssignmentStmt),
    /// A bare invocation or member access used as a statement.
    Expression(Expr),
    /// `Call Foo()`
    Call(Expr),
    Return(Option<Spanned<Expr>>),
    Throw(Option<Spanned<Expr>>),
    /// `Yield expr` inside an iterator.
    Yield(Spanned<Expr>),
    GoTo(Ident),
    /// `Label:`; numeric labels keep their digits as the name.
    Label(Ident),
    Exit(ExitKind),
    Continue(ContinueKind),
    LocalDecl(LocalDecl),
    RaiseEvent {
        name: Ident,
        args: Vec<Spanned<super::Argument>>,
    },
    AddHandler(HandlerStmt),
    RemoveHandler(HandlerStmt),
    ReDim(ReDimStmt),
    Erase(Vec<Spanned<Expr>>),
    OnError(OnErrorStmt),
    Resume(ResumeTarget),
    /// `Error 5`
    Error(Spanned<Expr>),
    Stop,
    /// The `End` statement (terminate execution), not a block terminator.
    End,
    /// Placeholder left after a statement could not be parsed.
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_branch: Block,
    pub else_ifs: Vec<Spanned<ElseIfClause>>,
    pub else_branch: Option<Block>,
    /// Written on one line: `If c Then a : b Else d`.
    pub single_line: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub subject: Spanned<Expr>,
    pub cases: Vec<Spanned<CaseBlock>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBlock {
    /// Empty for `Case Else`.
    pub labels: Vec<Spanned<CaseLabel>>,
    pub is_else: bool,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Value(Expr),
    Range { low: Spanned<Expr>, high: Spanned<Expr> },
    /// `Is > 5` and the shorthand `> 5`.
    Relational { op: super::BinaryOp, value: Spanned<Expr> },
}

/// The control variable of `For` / `For Each`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopVariable {
    /// `For i = ...` refers to an existing variable (any assignable expression).
    Existing(Spanned<Expr>),
    /// `For i As Integer = ...` declares a new one.
    Declared {
        name: Spanned<super::DeclaredName>,
        ty: Option<Spanned<TypeReference>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: LoopVariable,
    pub start: Spanned<Expr>,
    pub end: Spanned<Expr>,
    pub step: Option<Spanned<Expr>>,
    pub body: Block,
    /// Variables listed after `Next`; a single `Next i, j` closes several loops.
    pub next_variables: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub variable: LoopVariable,
    pub collection: Spanned<Expr>,
    pub body: Block,
    pub next_variables: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopConditionKind {
    While,
    Until,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopCondition {
    pub kind: LoopConditionKind,
    pub expr: Spanned<Expr>,
}

/// `Do [While|Until c] ... Loop [While|Until c]`; at most one side carries a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct DoLoopStmt {
    pub pre_condition: Option<LoopCondition>,
    pub body: Block,
    pub post_condition: Option<LoopCondition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Block,
    pub catches: Vec<Spanned<CatchClause>>,
    pub finally: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub name: Option<Ident>,
    pub ty: Option<Spanned<TypeReference>>,
    pub filter: Option<Spanned<Expr>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingResource {
    Expression(Spanned<Expr>),
    Declarations(Vec<Spanned<VariableDeclarator>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsingStmt {
    pub resource: UsingResource,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStmt {
    pub target: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncLockStmt {
    pub lock: Spanned<Expr>,
    pub body: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Power,
    Concat,
    ShiftLeft,
    ShiftRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub target: Spanned<Expr>,
    pub op: AssignmentOp,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    Sub,
    Function,
    Property,
    Do,
    For,
    While,
    Select,
    Try,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueKind {
    Do,
    For,
    While,
}

/// `Dim`/`Static`/`Const` inside a method body.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDecl {
    pub modifiers: ModifierSet,
    pub declarators: Vec<Spanned<VariableDeclarator>>,
}

/// `AddHandler evt, AddressOf handler`
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerStmt {
    pub event: Spanned<Expr>,
    pub handler: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReDimStmt {
    pub preserve: bool,
    /// Each clause is an invocation-shaped expression: `arr(10, 20)`.
    pub clauses: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OnErrorStmt {
    GoTo(Ident),
    /// `On Error GoTo 0`
    GoToZero,
    /// `On Error GoTo -1`
    GoToMinusOne,
    ResumeNext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResumeTarget {
    Current,
    Next,
    Label(Ident),
}
