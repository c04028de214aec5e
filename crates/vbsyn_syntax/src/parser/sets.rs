// ============================================================================
// Classification tables
// ----------------------------------------------------------------------------
// FIRST and synchronization sets are bitsets over token kinds. They are built once, at compile
// time, from the vocabulary registries and from unions of smaller sets.
// ============================================================================

/// Payload-carrying token kinds, grouped for set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Ident,
    Literal,
    /// Any token that can open an XML literal.
    XmlStart,
    Eol,
    Eof,
    /// XML content tokens and `%>`; they never start a rule.
    Other,
}

const OPERATOR_BASE: usize = KeywordId::COUNT;
const PUNCTUATION_BASE: usize = OPERATOR_BASE + OperatorId::COUNT;
const CLASS_BASE: usize = PUNCTUATION_BASE + PunctuationId::COUNT;

/// A set of token kinds.
///
/// Bits `0..KeywordId::COUNT` are keywords, followed by operators, punctuation and
/// [`TokenClass`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenSet([u64; 4]);

impl TokenSet {
    const EMPTY: TokenSet = TokenSet([0; 4]);

    const fn with_bit(self, bit: usize) -> Self {
        let mut words = self.0;
        words[bit / 64] |= 1u64 << (bit % 64);
        TokenSet(words)
    }

    const fn keyword(self, id: KeywordId) -> Self {
        self.with_bit(id.index())
    }

    const fn keywords(self, ids: &[KeywordId]) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < ids.len() {
            set = set.keyword(ids[i]);
            i += 1;
        }
        set
    }

    const fn operators(self, ids: &[OperatorId]) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < ids.len() {
            set = set.with_bit(OPERATOR_BASE + ids[i].index());
            i += 1;
        }
        set
    }

    const fn punctuation(self, ids: &[PunctuationId]) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < ids.len() {
            set = set.with_bit(PUNCTUATION_BASE + ids[i].index());
            i += 1;
        }
        set
    }

    const fn class(self, class: TokenClass) -> Self {
        self.with_bit(CLASS_BASE + class as usize)
    }

    const fn union(self, other: TokenSet) -> Self {
        let mut words = self.0;
        let mut i = 0;
        while i < words.len() {
            words[i] |= other.0[i];
            i += 1;
        }
        TokenSet(words)
    }

    const fn without(self, other: TokenSet) -> Self {
        let mut words = self.0;
        let mut i = 0;
        while i < words.len() {
            words[i] &= !other.0[i];
            i += 1;
        }
        TokenSet(words)
    }

    fn contains(&self, kind: &TokenKind) -> bool {
        let bit = bit_of(kind);
        self.0[bit / 64] & (1u64 << (bit % 64)) != 0
    }
}

fn bit_of(kind: &TokenKind) -> usize {
    let class = match kind {
        TokenKind::Keyword(id) => return id.index(),
        TokenKind::Operator(id) => return OPERATOR_BASE + id.index(),
        TokenKind::Punctuation(id) => return PUNCTUATION_BASE + id.index(),
        TokenKind::Ident(_) => TokenClass::Ident,
        TokenKind::Literal(_) => TokenClass::Literal,
        TokenKind::XmlOpenTag
        | TokenKind::XmlComment(_)
        | TokenKind::XmlCData(_)
        | TokenKind::XmlProcessingInstruction(_) => TokenClass::XmlStart,
        TokenKind::Eol => TokenClass::Eol,
        TokenKind::Eof => TokenClass::Eof,
        _ => TokenClass::Other,
    };
    CLASS_BASE + class as usize
}

// ----------------------------------------------------------------------------
// Registry-derived sets
// ----------------------------------------------------------------------------

/// Keywords of one category, optionally restricted to reserved or contextual ones.
const fn keywords_where(category: Option<KeywordCategory>, contextual: Option<bool>) -> TokenSet {
    let mut set = TokenSet::EMPTY;
    let mut i = 0;
    while i < keywords::KEYWORDS.len() {
        let info = &keywords::KEYWORDS[i];
        let category_ok = match category {
            Some(c) => info.category as u8 == c as u8,
            None => true,
        };
        let contextual_ok = match contextual {
            Some(c) => info.contextual == c,
            None => true,
        };
        if category_ok && contextual_ok {
            set = set.keyword(info.id);
        }
        i += 1;
    }
    set
}

const fn primitive_type_keywords() -> TokenSet {
    let mut set = TokenSet::EMPTY;
    let mut i = 0;
    while i < primitives::PRIMITIVE_TYPES.len() {
        set = set.keyword(primitives::PRIMITIVE_TYPES[i].keyword);
        i += 1;
    }
    set
}

const fn conversion_keywords() -> TokenSet {
    let mut set = TokenSet::EMPTY;
    let mut i = 0;
    while i < primitives::PRIMITIVE_CONVERSIONS.len() {
        set = set.keyword(primitives::PRIMITIVE_CONVERSIONS[i].keyword);
        i += 1;
    }
    set
}

const PARAMETER_MODIFIERS: TokenSet = TokenSet::EMPTY.keywords(&[
    KeywordId::ByVal,
    KeywordId::ByRef,
    KeywordId::Optional,
    KeywordId::ParamArray,
]);

/// Declaration modifiers (`Public`, `Shared`, `Dim`, `Custom`, ...).
const MODIFIERS: TokenSet = keywords_where(Some(KeywordCategory::Modifier), None)
    .without(PARAMETER_MODIFIERS)
    .without(TokenSet::EMPTY.keyword(KeywordId::Out));

const LOCAL_MODIFIERS: TokenSet = TokenSet::EMPTY.keywords(&[KeywordId::Dim, KeywordId::Static, KeywordId::Const]);

/// Identifiers and contextual keywords.
const IDENTIFIER_LIKE: TokenSet = keywords_where(None, Some(true)).class(TokenClass::Ident);

const PRIMITIVE_TYPES: TokenSet = primitive_type_keywords();

const PRIMITIVE_CONVERSIONS: TokenSet = conversion_keywords();

// ----------------------------------------------------------------------------
// FIRST sets
// ----------------------------------------------------------------------------

const TYPE_DECLARATION_KEYWORDS: TokenSet = TokenSet::EMPTY.keywords(&[
    KeywordId::Class,
    KeywordId::Module,
    KeywordId::Structure,
    KeywordId::Interface,
    KeywordId::Enum,
    KeywordId::Delegate,
]);

const MEMBER_KEYWORDS: TokenSet = TYPE_DECLARATION_KEYWORDS.keywords(&[
    KeywordId::Sub,
    KeywordId::Function,
    KeywordId::Property,
    KeywordId::Event,
    KeywordId::Operator,
    KeywordId::Declare,
]);

/// FIRST(expression).
const EXPRESSION_FIRST: TokenSet = IDENTIFIER_LIKE
    .union(PRIMITIVE_TYPES)
    .union(PRIMITIVE_CONVERSIONS)
    .class(TokenClass::Literal)
    .class(TokenClass::XmlStart)
    .keywords(&[
        KeywordId::True,
        KeywordId::False,
        KeywordId::Nothing,
        KeywordId::Me,
        KeywordId::MyBase,
        KeywordId::MyClass,
        KeywordId::Global,
        KeywordId::New,
        KeywordId::CType,
        KeywordId::DirectCast,
        KeywordId::TryCast,
        KeywordId::GetType,
        KeywordId::GetXmlNamespace,
        KeywordId::TypeOf,
        KeywordId::If,
        KeywordId::AddressOf,
        KeywordId::Not,
        KeywordId::Function,
        KeywordId::Sub,
    ])
    .operators(&[OperatorId::Plus, OperatorId::Minus, OperatorId::Star])
    .punctuation(&[
        PunctuationId::LParen,
        PunctuationId::LBrace,
        PunctuationId::Dot,
        PunctuationId::Exclamation,
        PunctuationId::DotAt,
        PunctuationId::TripleDot,
    ]);

/// Tokens that close or section a block and are never statements on their own.
const BLOCK_TERMINATORS: TokenSet = TokenSet::EMPTY.keywords(&[
    KeywordId::End,
    KeywordId::EndIf,
    KeywordId::Next,
    KeywordId::Loop,
    KeywordId::Else,
    KeywordId::ElseIf,
    KeywordId::Case,
    KeywordId::Catch,
    KeywordId::Finally,
    KeywordId::Wend,
]);

/// Keywords that open an accessor region inside a property or custom event.
const ACCESSOR_KEYWORDS: TokenSet = TokenSet::EMPTY.keywords(&[
    KeywordId::Get,
    KeywordId::Set,
    KeywordId::AddHandler,
    KeywordId::RemoveHandler,
    KeywordId::RaiseEvent,
]);

/// Tokens that can only begin a declaration; seeing one inside a statement list means the
/// enclosing member is missing its terminator.
const MEMBER_ONLY_FIRST: TokenSet = MEMBER_KEYWORDS
    .union(keywords_where(Some(KeywordCategory::Modifier), Some(false)))
    .without(LOCAL_MODIFIERS)
    .without(PARAMETER_MODIFIERS)
    .keywords(&[
        KeywordId::Namespace,
        KeywordId::Inherits,
        KeywordId::Implements,
        KeywordId::Imports,
        KeywordId::Option,
    ])
    .operators(&[OperatorId::Lt]);

// ----------------------------------------------------------------------------
// Synchronization sets
// ----------------------------------------------------------------------------

/// End of a logical line.
const LINE_SYNC: TokenSet = TokenSet::EMPTY.class(TokenClass::Eol).class(TokenClass::Eof);

/// End of a statement (line end or `:`).
const STATEMENT_SYNC: TokenSet = LINE_SYNC.punctuation(&[PunctuationId::Colon]);

// ----------------------------------------------------------------------------
// Dispatch tables
// ----------------------------------------------------------------------------

/// Statement rule selected by a leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementStart {
    None,
    If,
    Select,
    For,
    Do,
    While,
    Try,
    Using,
    With,
    SyncLock,
    Return,
    Throw,
    Yield,
    GoTo,
    Exit,
    Continue,
    Local,
    RaiseEvent,
    AddHandler,
    RemoveHandler,
    ReDim,
    Erase,
    On,
    Resume,
    Error,
    Stop,
    End,
    Call,
}

const STATEMENT_TABLE: [StatementStart; KeywordId::COUNT] = {
    let entries: &[(KeywordId, StatementStart)] = &[
        (KeywordId::If, StatementStart::If),
        (KeywordId::Select, StatementStart::Select),
        (KeywordId::For, StatementStart::For),
        (KeywordId::Do, StatementStart::Do),
        (KeywordId::While, StatementStart::While),
        (KeywordId::Try, StatementStart::Try),
        (KeywordId::Using, StatementStart::Using),
        (KeywordId::With, StatementStart::With),
        (KeywordId::SyncLock, StatementStart::SyncLock),
        (KeywordId::Return, StatementStart::Return),
        (KeywordId::Throw, StatementStart::Throw),
        (KeywordId::Yield, StatementStart::Yield),
        (KeywordId::GoTo, StatementStart::GoTo),
        (KeywordId::Exit, StatementStart::Exit),
        (KeywordId::Continue, StatementStart::Continue),
        (KeywordId::Dim, StatementStart::Local),
        (KeywordId::Static, StatementStart::Local),
        (KeywordId::Const, StatementStart::Local),
        (KeywordId::RaiseEvent, StatementStart::RaiseEvent),
        (KeywordId::AddHandler, StatementStart::AddHandler),
        (KeywordId::RemoveHandler, StatementStart::RemoveHandler),
        (KeywordId::ReDim, StatementStart::ReDim),
        (KeywordId::Erase, StatementStart::Erase),
        (KeywordId::On, StatementStart::On),
        (KeywordId::Resume, StatementStart::Resume),
        (KeywordId::Error, StatementStart::Error),
        (KeywordId::Stop, StatementStart::Stop),
        (KeywordId::End, StatementStart::End),
        (KeywordId::Call, StatementStart::Call),
    ];
    let mut table = [StatementStart::None; KeywordId::COUNT];
    let mut i = 0;
    while i < entries.len() {
        table[entries[i].0.index()] = entries[i].1;
        i += 1;
    }
    table
};

/// Member rule selected by the keyword after attributes and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberStart {
    None,
    Method,
    Property,
    Event,
    Operator,
    Declare,
    Type,
}

const MEMBER_TABLE: [MemberStart; KeywordId::COUNT] = {
    let entries: &[(KeywordId, MemberStart)] = &[
        (KeywordId::Sub, MemberStart::Method),
        (KeywordId::Function, MemberStart::Method),
        (KeywordId::Property, MemberStart::Property),
        (KeywordId::Event, MemberStart::Event),
        (KeywordId::Operator, MemberStart::Operator),
        (KeywordId::Declare, MemberStart::Declare),
        (KeywordId::Class, MemberStart::Type),
        (KeywordId::Module, MemberStart::Type),
        (KeywordId::Structure, MemberStart::Type),
        (KeywordId::Interface, MemberStart::Type),
        (KeywordId::Enum, MemberStart::Type),
        (KeywordId::Delegate, MemberStart::Type),
    ];
    let mut table = [MemberStart::None; KeywordId::COUNT];
    let mut i = 0;
    while i < entries.len() {
        table[entries[i].0.index()] = entries[i].1;
        i += 1;
    }
    table
};

/// Binary operator selected by a token, per precedence tier.
fn binary_operator(kind: &TokenKind) -> Option<(operators::PrecedenceTier, BinaryOp)> {
    let id = match kind {
        TokenKind::Operator(id) => *id,
        TokenKind::Keyword(k) => operators::for_keyword(*k)?,
        _ => return None,
    };
    let op = match id {
        OperatorId::Or => BinaryOp::Or,
        OperatorId::OrElse => BinaryOp::OrElse,
        OperatorId::Xor => BinaryOp::Xor,
        OperatorId::And => BinaryOp::And,
        OperatorId::AndAlso => BinaryOp::AndAlso,
        OperatorId::Eq => BinaryOp::Equal,
        OperatorId::NotEq => BinaryOp::NotEqual,
        OperatorId::Lt => BinaryOp::LessThan,
        OperatorId::Gt => BinaryOp::GreaterThan,
        OperatorId::LtEq => BinaryOp::LessThanOrEqual,
        OperatorId::GtEq => BinaryOp::GreaterThanOrEqual,
        OperatorId::Like => BinaryOp::Like,
        OperatorId::Is => BinaryOp::Is,
        OperatorId::IsNot => BinaryOp::IsNot,
        OperatorId::ShiftLeft => BinaryOp::ShiftLeft,
        OperatorId::ShiftRight => BinaryOp::ShiftRight,
        OperatorId::Ampersand => BinaryOp::Concat,
        OperatorId::Plus => BinaryOp::Add,
        OperatorId::Minus => BinaryOp::Subtract,
        OperatorId::Mod => BinaryOp::Modulus,
        OperatorId::Backslash => BinaryOp::IntegerDivide,
        OperatorId::Star => BinaryOp::Multiply,
        OperatorId::Slash => BinaryOp::Divide,
        OperatorId::Caret => BinaryOp::Power,
        _ => return None,
    };
    Some((operators::tier_of(id)?, op))
}

/// Compound assignment operator for a token, if any.
fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOp> {
    let op = match kind.operator_id()? {
        OperatorId::Eq => AssignmentOp::Assign,
        OperatorId::PlusEq => AssignmentOp::Add,
        OperatorId::MinusEq => AssignmentOp::Subtract,
        OperatorId::StarEq => AssignmentOp::Multiply,
        OperatorId::SlashEq => AssignmentOp::Divide,
        OperatorId::BackslashEq => AssignmentOp::IntegerDivide,
        OperatorId::CaretEq => AssignmentOp::Power,
        OperatorId::AmpersandEq => AssignmentOp::Concat,
        OperatorId::ShiftLeftEq => AssignmentOp::ShiftLeft,
        OperatorId::ShiftRightEq => AssignmentOp::ShiftRight,
        _ => return None,
    };
    Some(op)
}
