//! Compact S-expression rendering of the AST.
//!
//! The output is meant for humans and snapshot tests, not for round-tripping. Operators print as
//! their variant names (`(Add 1 (Multiply 2 3))`), identifiers print bare, and absent optional
//! parts print as `_`.
//!
//! ## Examples
//! ```rust
//! use vbsyn_syntax::{ast, lexer, parser};
//!
//! let lexed = lexer::lex("1 + 2 * 3");
//! let out = parser::parse(&lexed.tokens, &parser::ParseOptions::snippet()).unwrap();
//! let Some(parser::Snippet::Expression(e)) = &out.snippet else { panic!() };
//! assert_eq!(ast::dump::expr(&e.node), "(Add 1 (Multiply 2 3))");
//! ```

use super::*;
use vbsyn_core::lang::keywords;

/// Render an expression.
pub fn expr(e: &Expr) -> String {
    let mut p = Printer::default();
    p.expr(e);
    p.out
}

/// Render a statement.
pub fn statement(s: &Statement) -> String {
    let mut p = Printer::default();
    p.statement(s);
    p.out
}

/// Render a statement list, one statement per line.
pub fn statements(stmts: &[Spanned<Statement>]) -> String {
    stmts
        .iter()
        .map(|s| statement(&s.node))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a whole compilation unit, one top-level item per line.
pub fn unit(u: &CompilationUnit) -> String {
    let mut lines = Vec::new();
    for opt in &u.options {
        lines.push(format!("(Option {:?})", opt.node));
    }
    for imp in &u.imports {
        let mut p = Printer::default();
        p.imports(&imp.node);
        lines.push(p.out);
    }
    for attr in &u.attributes {
        let mut p = Printer::default();
        p.attribute_section(&attr.node);
        lines.push(p.out);
    }
    for member in &u.members {
        let mut p = Printer::default();
        p.namespace_member(&member.node);
        lines.push(p.out);
    }
    lines.join("\n")
}

/// Render a declaration outline: namespaces, types and member headers, indented by nesting.
pub fn outline(u: &CompilationUnit) -> String {
    let mut out = String::new();
    for member in &u.members {
        outline_namespace_member(&mut out, &member.node, member.span, 0);
    }
    out
}

fn outline_namespace_member(out: &mut String, m: &NamespaceMember, span: Span, depth: usize) {
    match m {
        NamespaceMember::Namespace(ns) => {
            outline_line(out, depth, &format!("Namespace {}", ns.name), span);
            for child in &ns.members {
                outline_namespace_member(out, &child.node, child.span, depth + 1);
            }
        }
        NamespaceMember::Type(t) => outline_type(out, t, span, depth),
    }
}

fn outline_type(out: &mut String, t: &TypeDecl, span: Span, depth: usize) {
    outline_line(out, depth, &format!("{:?} {}", t.kind, t.name), span);
    for member in &t.members {
        let label = match &member.node {
            MemberDecl::Method(m) => {
                let kw = if m.signature.is_function { "Function" } else { "Sub" };
                format!("{kw} {}", m.name)
            }
            MemberDecl::Constructor(_) => "Sub New".to_string(),
            MemberDecl::Property(p) => format!("Property {}", p.name),
            MemberDecl::Field(f) => {
                let names: Vec<&str> = f
                    .declarators
                    .iter()
                    .flat_map(|d| d.node.names.iter().map(|n| n.node.name.as_str()))
                    .collect();
                let kw = if f.modifiers.contains(ModifierSet::CONST) { "Const" } else { "Field" };
                format!("{kw} {}", names.join(", "))
            }
            MemberDecl::Event(e) => format!("Event {}", e.name),
            MemberDecl::Operator(o) => format!("Operator {:?}", o.operator),
            MemberDecl::Declare(d) => format!("Declare {}", d.name),
            MemberDecl::EnumMember(e) => e.name.clone(),
            MemberDecl::Type(nested) => {
                outline_type(out, nested, member.span, depth + 1);
                continue;
            }
        };
        outline_line(out, depth + 1, &label, member.span);
    }
}

fn outline_line(out: &mut String, depth: usize, label: &str, span: Span) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(label);
    out.push_str(&format!("  [{}-{}]\n", span.start, span.end));
}

// ============================================================================
// Printer
// ============================================================================

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn sep(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('(') {
            self.out.push(' ');
        }
    }

    fn open(&mut self, tag: &str) {
        self.sep();
        self.out.push('(');
        self.out.push_str(tag);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn atom(&mut self, s: &str) {
        self.sep();
        self.out.push_str(s);
    }

    fn absent(&mut self) {
        self.atom("_");
    }

    fn list<T>(&mut self, tag: &str, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.open(tag);
        for item in items {
            each(self, item);
        }
        self.close();
    }

    // ---- declarations -------------------------------------------------------

    fn imports(&mut self, imp: &ImportsClause) {
        self.open("Imports");
        match imp {
            ImportsClause::Namespace(t) => self.type_ref(t),
            ImportsClause::Alias { alias, target } => {
                self.atom(alias);
                self.atom("=");
                self.type_ref(target);
            }
            ImportsClause::XmlNamespace { prefix, uri } => {
                self.atom(&format!("xmlns:{}", prefix.as_deref().unwrap_or("")));
                self.atom(&format!("{uri:?}"));
            }
        }
        self.close();
    }

    fn attribute_section(&mut self, sec: &AttributeSection) {
        let tag = match sec.target {
            Some(AttributeTarget::Assembly) => "Attributes:Assembly",
            Some(AttributeTarget::Module) => "Attributes:Module",
            None => "Attributes",
        };
        self.open(tag);
        for attr in &sec.attributes {
            self.open(&attr.node.name.to_string());
            for arg in &attr.node.args {
                self.argument(&arg.node);
            }
            self.close();
        }
        self.close();
    }

    fn namespace_member(&mut self, m: &NamespaceMember) {
        match m {
            NamespaceMember::Namespace(ns) => {
                self.open("Namespace");
                self.atom(&ns.name.to_string());
                for child in &ns.members {
                    self.namespace_member(&child.node);
                }
                self.close();
            }
            NamespaceMember::Type(t) => self.type_decl(t),
        }
    }

    fn type_decl(&mut self, t: &TypeDecl) {
        self.open(&format!("{:?}", t.kind));
        self.atom(&t.name);
        if !t.type_params.is_empty() {
            self.list("Of", &t.type_params, |p, tp| p.atom(&tp.node.name));
        }
        if !t.inherits.is_empty() {
            self.list("Inherits", &t.inherits, |p, ty| p.type_ref(&ty.node));
        }
        if !t.implements.is_empty() {
            self.list("Implements", &t.implements, |p, ty| p.type_ref(&ty.node));
        }
        if let Some(sig) = &t.delegate {
            self.signature(sig);
        }
        for member in &t.members {
            self.member(&member.node);
        }
        self.close();
    }

    fn member(&mut self, m: &MemberDecl) {
        match m {
            MemberDecl::Method(m) => {
                self.open(if m.signature.is_function { "Function" } else { "Sub" });
                self.atom(&m.name);
                self.signature(&m.signature);
                match &m.body {
                    Some(body) => self.body(body),
                    None => self.absent(),
                }
                self.close();
            }
            MemberDecl::Constructor(c) => {
                self.open("New");
                self.params(&c.params);
                self.body(&c.body);
                self.close();
            }
            MemberDecl::Property(prop) => {
                self.open("Property");
                self.atom(&prop.name);
                self.params(&prop.params);
                self.opt_type(&prop.ty);
                if let Some(init) = &prop.initializer {
                    self.expr(&init.node);
                }
                for acc in &prop.accessors {
                    self.accessor(&acc.node);
                }
                self.close();
            }
            MemberDecl::Field(f) => {
                self.open(if f.modifiers.contains(ModifierSet::CONST) { "Const" } else { "Field" });
                for d in &f.declarators {
                    self.declarator(&d.node);
                }
                self.close();
            }
            MemberDecl::Event(e) => {
                self.open("Event");
                self.atom(&e.name);
                self.params(&e.params);
                self.opt_type(&e.ty);
                for acc in &e.accessors {
                    self.accessor(&acc.node);
                }
                self.close();
            }
            MemberDecl::Operator(o) => {
                self.open("Operator");
                self.atom(&format!("{:?}", o.operator));
                self.params(&o.params);
                self.opt_type(&o.return_type);
                self.body(&o.body);
                self.close();
            }
            MemberDecl::Declare(d) => {
                self.open("Declare");
                self.atom(&d.name);
                self.atom(&format!("{:?}", d.library));
                if let Some(alias) = &d.alias {
                    self.atom(&format!("{alias:?}"));
                }
                self.signature(&d.signature);
                self.close();
            }
            MemberDecl::EnumMember(e) => {
                self.open("Member");
                self.atom(&e.name);
                if let Some(v) = &e.value {
                    self.expr(&v.node);
                }
                self.close();
            }
            MemberDecl::Type(t) => self.type_decl(t),
        }
    }

    fn accessor(&mut self, acc: &Accessor) {
        self.open(&format!("{:?}", acc.kind));
        self.params(&acc.params);
        self.body(&acc.body);
        self.close();
    }

    fn signature(&mut self, sig: &Signature) {
        self.params(&sig.params);
        if sig.is_function {
            self.opt_type(&sig.return_type);
        }
    }

    fn params(&mut self, params: &[Spanned<Parameter>]) {
        self.list("Params", params, |p, param| {
            let param = &param.node;
            p.open(&param.name.name);
            p.opt_type(&param.ty);
            if let Some(d) = &param.default {
                p.expr(&d.node);
            }
            p.close();
        });
    }

    fn body(&mut self, body: &MethodBody) {
        match body {
            MethodBody::Parsed(stmts) => self.block("Body", stmts),
            MethodBody::Skipped(span) => self.atom(&format!("(Skipped {}-{})", span.start, span.end)),
        }
    }

    fn declarator(&mut self, d: &VariableDeclarator) {
        self.open("var");
        for name in &d.names {
            self.declared_name(&name.node);
        }
        self.opt_type(&d.ty);
        match &d.initializer {
            Some(init) => self.expr(&init.node),
            None => self.absent(),
        }
        self.close();
    }

    fn declared_name(&mut self, n: &DeclaredName) {
        let mut name = n.name.clone();
        if n.nullable {
            name.push('?');
        }
        match &n.array_bounds {
            None => self.atom(&name),
            Some(bounds) => {
                self.open(&name);
                for b in bounds {
                    match b {
                        Some(e) => self.expr(&e.node),
                        None => self.absent(),
                    }
                }
                self.close();
            }
        }
    }

    fn opt_type(&mut self, ty: &Option<Spanned<TypeReference>>) {
        match ty {
            Some(t) => self.type_ref(&t.node),
            None => self.absent(),
        }
    }

    fn type_ref(&mut self, t: &TypeReference) {
        self.atom(&t.to_string());
    }

    // ---- statements ---------------------------------------------------------

    fn block(&mut self, tag: &str, stmts: &[Spanned<Statement>]) {
        self.list(tag, stmts, |p, s| p.statement(&s.node));
    }

    fn statement(&mut self, s: &Statement) {
        match s {
            Statement::If(stmt) => {
                self.open("If");
                self.expr(&stmt.condition.node);
                self.block("Then", &stmt.then_branch);
                for clause in &stmt.else_ifs {
                    self.open("ElseIf");
                    self.expr(&clause.node.condition.node);
                    self.block("Then", &clause.node.body);
                    self.close();
                }
                if let Some(e) = &stmt.else_branch {
                    self.block("Else", e);
                }
                self.close();
            }
            Statement::Select(stmt) => {
                self.open("Select");
                self.expr(&stmt.subject.node);
                for case in &stmt.cases {
                    self.open("Case");
                    if case.node.is_else {
                        self.atom("Else");
                    }
                    for label in &case.node.labels {
                        self.case_label(&label.node);
                    }
                    self.block("Body", &case.node.body);
                    self.close();
                }
                self.close();
            }
            Statement::For(stmt) => {
                self.open("For");
                self.loop_variable(&stmt.variable);
                self.expr(&stmt.start.node);
                self.expr(&stmt.end.node);
                match &stmt.step {
                    Some(step) => self.expr(&step.node),
                    None => self.absent(),
                }
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::ForEach(stmt) => {
                self.open("ForEach");
                self.loop_variable(&stmt.variable);
                self.expr(&stmt.collection.node);
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::While(stmt) => {
                self.open("While");
                self.expr(&stmt.condition.node);
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::DoLoop(stmt) => {
                self.open("Do");
                self.loop_condition(&stmt.pre_condition);
                self.block("Body", &stmt.body);
                self.loop_condition(&stmt.post_condition);
                self.close();
            }
            Statement::Try(stmt) => {
                self.open("Try");
                self.block("Body", &stmt.body);
                for c in &stmt.catches {
                    self.open("Catch");
                    match &c.node.name {
                        Some(n) => self.atom(n),
                        None => self.absent(),
                    }
                    self.opt_type(&c.node.ty);
                    if let Some(f) = &c.node.filter {
                        self.open("When");
                        self.expr(&f.node);
                        self.close();
                    }
                    self.block("Body", &c.node.body);
                    self.close();
                }
                if let Some(f) = &stmt.finally {
                    self.block("Finally", f);
                }
                self.close();
            }
            Statement::Using(stmt) => {
                self.open("Using");
                match &stmt.resource {
                    UsingResource::Expression(e) => self.expr(&e.node),
                    UsingResource::Declarations(decls) => {
                        for d in decls {
                            self.declarator(&d.node);
                        }
                    }
                }
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::With(stmt) => {
                self.open("With");
                self.expr(&stmt.target.node);
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::SyncLock(stmt) => {
                self.open("SyncLock");
                self.expr(&stmt.lock.node);
                self.block("Body", &stmt.body);
                self.close();
            }
            Statement::Assignment(a) => {
                self.open(match a.op {
                    AssignmentOp::Assign => "Assign",
                    AssignmentOp::Add => "Assign+",
                    AssignmentOp::Subtract => "Assign-",
                    AssignmentOp::Multiply => "Assign*",
                    AssignmentOp::Divide => "Assign/",
                    AssignmentOp::IntegerDivide => "Assign\\",
                    AssignmentOp::Power => "Assign^",
                    AssignmentOp::Concat => "Assign&",
                    AssignmentOp::ShiftLeft => "Assign<<",
                    AssignmentOp::ShiftRight => "Assign>>",
                });
                self.expr(&a.target.node);
                self.expr(&a.value.node);
                self.close();
            }
            Statement::Expression(e) => self.expr(e),
            Statement::Call(e) => {
                self.open("Call");
                self.expr(e);
                self.close();
            }
            Statement::Return(e) => self.keyword_with_opt("Return", e),
            Statement::Throw(e) => self.keyword_with_opt("Throw", e),
            Statement::Yield(e) => {
                self.open("Yield");
                self.expr(&e.node);
                self.close();
            }
            Statement::GoTo(label) => {
                self.open("GoTo");
                self.atom(label);
                self.close();
            }
            Statement::Label(label) => {
                self.open("Label");
                self.atom(label);
                self.close();
            }
            Statement::Exit(kind) => self.atom(&format!("(Exit {kind:?})")),
            Statement::Continue(kind) => self.atom(&format!("(Continue {kind:?})")),
            Statement::LocalDecl(decl) => {
                let tag = if decl.modifiers.contains(ModifierSet::CONST) {
                    "Const"
                } else if decl.modifiers.contains(ModifierSet::STATIC) {
                    "Static"
                } else {
                    "Dim"
                };
                self.open(tag);
                for d in &decl.declarators {
                    self.declarator(&d.node);
                }
                self.close();
            }
            Statement::RaiseEvent { name, args } => {
                self.open("RaiseEvent");
                self.atom(name);
                for arg in args {
                    self.argument(&arg.node);
                }
                self.close();
            }
            Statement::AddHandler(h) => self.handler("AddHandler", h),
            Statement::RemoveHandler(h) => self.handler("RemoveHandler", h),
            Statement::ReDim(r) => {
                self.open(if r.preserve { "ReDimPreserve" } else { "ReDim" });
                for c in &r.clauses {
                    self.expr(&c.node);
                }
                self.close();
            }
            Statement::Erase(targets) => self.list("Erase", targets, |p, t| p.expr(&t.node)),
            Statement::OnError(on) => match on {
                OnErrorStmt::GoTo(label) => self.atom(&format!("(OnError GoTo {label})")),
                OnErrorStmt::GoToZero => self.atom("(OnError GoTo 0)"),
                OnErrorStmt::GoToMinusOne => self.atom("(OnError GoTo -1)"),
                OnErrorStmt::ResumeNext => self.atom("(OnError ResumeNext)"),
            },
            Statement::Resume(target) => match target {
                ResumeTarget::Current => self.atom("(Resume)"),
                ResumeTarget::Next => self.atom("(Resume Next)"),
                ResumeTarget::Label(l) => self.atom(&format!("(Resume {l})")),
            },
            Statement::Error(e) => {
                self.open("Error");
                self.expr(&e.node);
                self.close();
            }
            Statement::Stop => self.atom("(Stop)"),
            Statement::End => self.atom("(End)"),
            Statement::Invalid => self.atom("(Invalid)"),
        }
    }

    fn keyword_with_opt(&mut self, tag: &str, e: &Option<Spanned<Expr>>) {
        self.open(tag);
        if let Some(e) = e {
            self.expr(&e.node);
        }
        self.close();
    }

    fn handler(&mut self, tag: &str, h: &HandlerStmt) {
        self.open(tag);
        self.expr(&h.event.node);
        self.expr(&h.handler.node);
        self.close();
    }

    fn case_label(&mut self, label: &CaseLabel) {
        match label {
            CaseLabel::Value(e) => self.expr(e),
            CaseLabel::Range { low, high } => {
                self.open("To");
                self.expr(&low.node);
                self.expr(&high.node);
                self.close();
            }
            CaseLabel::Relational { op, value } => {
                self.open(&format!("Is{op:?}"));
                self.expr(&value.node);
                self.close();
            }
        }
    }

    fn loop_variable(&mut self, v: &LoopVariable) {
        match v {
            LoopVariable::Existing(e) => self.expr(&e.node),
            LoopVariable::Declared { name, ty } => {
                self.open("var");
                self.declared_name(&name.node);
                self.opt_type(ty);
                self.close();
            }
        }
    }

    fn loop_condition(&mut self, c: &Option<LoopCondition>) {
        if let Some(c) = c {
            self.open(&format!("{:?}", c.kind));
            self.expr(&c.expr.node);
            self.close();
        }
    }

    // ---- expressions --------------------------------------------------------

    fn expr(&mut self, e: &Expr) {
        match e {
            Expr::Literal(lit) => self.literal(lit),
            Expr::Identifier { name, type_args } => {
                if type_args.is_empty() {
                    self.atom(name);
                } else {
                    self.open("Of");
                    self.atom(name);
                    for t in type_args {
                        self.type_ref(&t.node);
                    }
                    self.close();
                }
            }
            Expr::PrimitiveType(id) => self.atom(keywords::as_str(*id)),
            Expr::Me => self.atom("Me"),
            Expr::MyBase => self.atom("MyBase"),
            Expr::MyClass => self.atom("MyClass"),
            Expr::Global => self.atom("Global"),
            Expr::MemberAccess { target, name, type_args } => {
                self.open(".");
                self.opt_target(target);
                self.atom(name);
                for t in type_args {
                    self.type_ref(&t.node);
                }
                self.close();
            }
            Expr::DictionaryAccess { target, key } => {
                self.open("!");
                self.opt_target(target);
                self.atom(key);
                self.close();
            }
            Expr::XmlAxis { target, axis, name } => {
                self.open(match axis {
                    XmlAxisKind::Element => ".<>",
                    XmlAxisKind::Descendant => "...<>",
                    XmlAxisKind::Attribute => ".@",
                });
                self.opt_target(target);
                self.atom(name);
                self.close();
            }
            Expr::Invocation { target, args } => {
                self.open("Call");
                self.expr(&target.node);
                for arg in args {
                    self.argument(&arg.node);
                }
                self.close();
            }
            Expr::ObjectCreate { ty, args, initializer } => {
                self.open("New");
                self.type_ref(&ty.node);
                if let Some(args) = args {
                    self.list("Args", args, |p, a| p.argument(&a.node));
                }
                if let Some(init) = initializer {
                    match &init.node {
                        ObjectInitializer::Members(fields) => {
                            self.list("With", fields, |p, f| p.field_initializer(&f.node))
                        }
                        ObjectInitializer::Collection(items) => self.list("From", items, |p, i| p.expr(&i.node)),
                    }
                }
                self.close();
            }
            Expr::AnonymousObject(fields) => {
                self.open("New");
                self.list("With", fields, |p, f| p.field_initializer(&f.node));
                self.close();
            }
            Expr::ArrayCreate {
                element,
                bounds,
                initializer,
            } => {
                self.open("NewArray");
                self.type_ref(&element.node);
                self.list("Bounds", bounds, |p, b| match b {
                    Some(b) => p.expr(&b.node),
                    None => p.absent(),
                });
                self.list("Init", initializer, |p, i| p.expr(&i.node));
                self.close();
            }
            Expr::CollectionInitializer(items) => self.list("{}", items, |p, i| p.expr(&i.node)),
            Expr::Lambda(l) => {
                self.open(if l.is_function { "Function" } else { "Sub" });
                self.params(&l.params);
                match &l.body {
                    LambdaBody::Expression(e) => self.expr(&e.node),
                    LambdaBody::Statement(s) => self.statement(&s.node),
                    LambdaBody::Block(stmts) => self.block("Body", stmts),
                }
                self.close();
            }
            Expr::Query(clauses) => self.list("Query", clauses, |p, c| p.query_clause(&c.node)),
            Expr::Cast { kind, expr, ty } => {
                self.open(&format!("{kind:?}Cast"));
                self.expr(&expr.node);
                self.type_ref(&ty.node);
                self.close();
            }
            Expr::TypeOfIs { expr, ty, negated } => {
                self.open(if *negated { "TypeOfIsNot" } else { "TypeOfIs" });
                self.expr(&expr.node);
                self.type_ref(&ty.node);
                self.close();
            }
            Expr::GetType(ty) => {
                self.open("GetType");
                self.type_ref(&ty.node);
                self.close();
            }
            Expr::GetXmlNamespace(prefix) => {
                self.open("GetXmlNamespace");
                match prefix {
                    Some(p) => self.atom(p),
                    None => self.absent(),
                }
                self.close();
            }
            Expr::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.open("If");
                self.expr(&condition.node);
                self.expr(&when_true.node);
                self.expr(&when_false.node);
                self.close();
            }
            Expr::Unary { op, operand } => {
                self.open(&format!("{op:?}"));
                self.expr(&operand.node);
                self.close();
            }
            Expr::Binary { op, left, right } => {
                self.open(&format!("{op:?}"));
                self.expr(&left.node);
                self.expr(&right.node);
                self.close();
            }
            Expr::AddressOf(target) => {
                self.open("AddressOf");
                self.expr(&target.node);
                self.close();
            }
            Expr::Parenthesized(inner) => {
                self.open("Paren");
                self.expr(&inner.node);
                self.close();
            }
            Expr::Xml(node) => self.xml(node),
            Expr::Error => self.atom("<error>"),
        }
    }

    fn opt_target(&mut self, target: &Option<Box<Spanned<Expr>>>) {
        if let Some(t) = target {
            self.expr(&t.node);
        }
    }

    fn literal(&mut self, lit: &Literal) {
        let text = match lit {
            Literal::Integer(v) => v.to_string(),
            Literal::Floating(v) => format!("{v:?}"),
            Literal::Decimal(d) => format!("{d}D"),
            Literal::String(s) => format!("{s:?}"),
            Literal::Char(c) => format!("{:?}c", c.to_string()),
            Literal::Date(d) => format!("#{d}#"),
            Literal::Boolean(true) => "True".to_string(),
            Literal::Boolean(false) => "False".to_string(),
            Literal::Nothing => "Nothing".to_string(),
        };
        self.atom(&text);
    }

    fn argument(&mut self, arg: &Argument) {
        match arg {
            Argument::Positional(e) => self.expr(e),
            Argument::Named { name, value } => {
                self.open(&format!("{name}:="));
                self.expr(&value.node);
                self.close();
            }
            Argument::Omitted => self.absent(),
            Argument::Range { low, high } => {
                self.open("To");
                self.expr(&low.node);
                self.expr(&high.node);
                self.close();
            }
        }
    }

    fn field_initializer(&mut self, f: &FieldInitializer) {
        match &f.name {
            Some(name) => {
                let tag = if f.key { format!("Key {name}") } else { name.clone() };
                self.open(&format!("{tag}="));
                self.expr(&f.value.node);
                self.close();
            }
            None if f.key => {
                self.open("Key");
                self.expr(&f.value.node);
                self.close();
            }
            None => self.expr(&f.value.node),
        }
    }

    fn range_variable(&mut self, v: &RangeVariable) {
        self.open("In");
        self.atom(&v.name);
        if let Some(ty) = &v.ty {
            self.type_ref(&ty.node);
        }
        self.expr(&v.source.node);
        self.close();
    }

    fn join_conditions(&mut self, conditions: &[Spanned<JoinCondition>]) {
        self.list("On", conditions, |p, c| {
            p.open("Equals");
            p.expr(&c.node.left.node);
            p.expr(&c.node.right.node);
            p.close();
        });
    }

    fn query_clause(&mut self, c: &QueryClause) {
        match c {
            QueryClause::From(vars) => self.list("From", vars, |p, v| p.range_variable(&v.node)),
            QueryClause::Aggregate {
                variables,
                clauses,
                into,
            } => {
                self.open("Aggregate");
                for v in variables {
                    self.range_variable(&v.node);
                }
                for c in clauses {
                    self.query_clause(&c.node);
                }
                self.list("Into", into, |p, f| p.field_initializer(&f.node));
                self.close();
            }
            QueryClause::Select(fields) => self.list("Select", fields, |p, f| p.field_initializer(&f.node)),
            QueryClause::Where(e) => {
                self.open("Where");
                self.expr(&e.node);
                self.close();
            }
            QueryClause::OrderBy(orderings) => self.list("OrderBy", orderings, |p, o| {
                if o.node.descending {
                    p.open("Descending");
                    p.expr(&o.node.expr.node);
                    p.close();
                } else {
                    p.expr(&o.node.expr.node);
                }
            }),
            QueryClause::Join { variable, conditions } => {
                self.open("Join");
                self.range_variable(&variable.node);
                self.join_conditions(conditions);
                self.close();
            }
            QueryClause::GroupJoin {
                variable,
                conditions,
                into,
            } => {
                self.open("GroupJoin");
                self.range_variable(&variable.node);
                self.join_conditions(conditions);
                self.list("Into", into, |p, f| p.field_initializer(&f.node));
                self.close();
            }
            QueryClause::GroupBy { items, keys, into } => {
                self.open("GroupBy");
                self.list("Items", items, |p, f| p.field_initializer(&f.node));
                self.list("Keys", keys, |p, f| p.field_initializer(&f.node));
                self.list("Into", into, |p, f| p.field_initializer(&f.node));
                self.close();
            }
            QueryClause::Let(fields) => self.list("Let", fields, |p, f| p.field_initializer(&f.node)),
            QueryClause::Distinct => self.atom("(Distinct)"),
            QueryClause::Skip(e) => self.tagged("Skip", e),
            QueryClause::Take(e) => self.tagged("Take", e),
            QueryClause::SkipWhile(e) => self.tagged("SkipWhile", e),
            QueryClause::TakeWhile(e) => self.tagged("TakeWhile", e),
        }
    }

    fn tagged(&mut self, tag: &str, e: &Spanned<Expr>) {
        self.open(tag);
        self.expr(&e.node);
        self.close();
    }

    fn xml(&mut self, node: &XmlNode) {
        match node {
            XmlNode::Document { declaration, prolog, root } => {
                self.open("XmlDocument");
                self.atom(&format!("{declaration:?}"));
                for n in prolog {
                    self.xml(&n.node);
                }
                self.xml(&root.node);
                self.close();
            }
            XmlNode::Element {
                name,
                attributes,
                content,
                empty,
            } => {
                self.open(if *empty { "XmlEmpty" } else { "XmlElement" });
                self.xml_name(name);
                for attr in attributes {
                    match &attr.node {
                        XmlAttribute::Named { name, value } => {
                            self.open(&format!("@{name}"));
                            match value {
                                XmlAttributeValue::Literal(v) => self.atom(&format!("{v:?}")),
                                XmlAttributeValue::Embedded(e) => self.tagged("Embed", e),
                            }
                            self.close();
                        }
                        XmlAttribute::Embedded(e) => self.tagged("Embed", e),
                    }
                }
                for child in content {
                    self.xml(&child.node);
                }
                self.close();
            }
            XmlNode::Text(t) => self.atom(&format!("{t:?}")),
            XmlNode::Comment(c) => self.atom(&format!("(XmlComment {c:?})")),
            XmlNode::CData(c) => self.atom(&format!("(CData {c:?})")),
            XmlNode::ProcessingInstruction(pi) => self.atom(&format!("(Pi {pi:?})")),
            XmlNode::Embedded(e) => self.tagged("Embed", e),
        }
    }

    fn xml_name(&mut self, name: &XmlName) {
        match name {
            XmlName::Literal(n) => self.atom(n),
            XmlName::Embedded(e) => self.tagged("Embed", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: i64) -> Spanned<Expr> {
        Spanned::new(Expr::Literal(Literal::Integer(v)), Span::default())
    }

    #[test]
    fn binary_nests_in_prefix_form() {
        let e = Expr::Binary {
            op: BinaryOp::Add,
            left: Box::new(lit(1)),
            right: Box::new(Spanned::new(
                Expr::Binary {
                    op: BinaryOp::Multiply,
                    left: Box::new(lit(2)),
                    right: Box::new(lit(3)),
                },
                Span::default(),
            )),
        };
        assert_eq!(expr(&e), "(Add 1 (Multiply 2 3))");
    }

    #[test]
    fn literals_render_distinctly() {
        let render = |l| expr(&Expr::Literal(l));
        assert_eq!(render(Literal::String("a\"b".into())), "\"a\\\"b\"");
        assert_eq!(render(Literal::Char('x')), "\"x\"c");
        assert_eq!(render(Literal::Floating(1.0)), "1.0");
        assert_eq!(render(Literal::Boolean(true)), "True");
        assert_eq!(render(Literal::Date("1/1/2000".into())), "#1/1/2000#");
    }

    #[test]
    fn member_access_without_target_is_a_with_reference() {
        let e = Expr::MemberAccess {
            target: None,
            name: "Name".into(),
            type_args: Vec::new(),
        };
        assert_eq!(expr(&e), "(. Name)");
    }
}
