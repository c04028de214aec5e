// ============================================================================
// Block contexts
// ============================================================================

/// Kind of an open block construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Namespace,
    Class,
    Module,
    Structure,
    Interface,
    Enum,
    Sub,
    Function,
    Property,
    Get,
    Set,
    Event,
    AddHandler,
    RemoveHandler,
    RaiseEvent,
    Operator,
    If,
    Select,
    For,
    While,
    Do,
    Try,
    Using,
    With,
    SyncLock,
}

impl BlockKind {
    /// Keyword that follows `End` to close this block; `None` for `Next` and `Loop` blocks.
    fn end_keyword(self) -> Option<KeywordId> {
        let id = match self {
            BlockKind::Namespace => KeywordId::Namespace,
            BlockKind::Class => KeywordId::Class,
            BlockKind::Module => KeywordId::Module,
            BlockKind::Structure => KeywordId::Structure,
            BlockKind::Interface => KeywordId::Interface,
            BlockKind::Enum => KeywordId::Enum,
            BlockKind::Sub => KeywordId::Sub,
            BlockKind::Function => KeywordId::Function,
            BlockKind::Property => KeywordId::Property,
            BlockKind::Get => KeywordId::Get,
            BlockKind::Set => KeywordId::Set,
            BlockKind::Event => KeywordId::Event,
            BlockKind::AddHandler => KeywordId::AddHandler,
            BlockKind::RemoveHandler => KeywordId::RemoveHandler,
            BlockKind::RaiseEvent => KeywordId::RaiseEvent,
            BlockKind::Operator => KeywordId::Operator,
            BlockKind::If => KeywordId::If,
            BlockKind::Select => KeywordId::Select,
            BlockKind::While => KeywordId::While,
            BlockKind::Try => KeywordId::Try,
            BlockKind::Using => KeywordId::Using,
            BlockKind::With => KeywordId::With,
            BlockKind::SyncLock => KeywordId::SyncLock,
            BlockKind::For | BlockKind::Do => return None,
        };
        Some(id)
    }

    /// How the terminator is spelled in diagnostics.
    fn terminator(self) -> String {
        match self {
            BlockKind::For => "Next".to_string(),
            BlockKind::Do => "Loop".to_string(),
            _ => match self.end_keyword() {
                Some(id) => format!("End {}", keywords::as_str(id)),
                None => "End".to_string(),
            },
        }
    }

    /// Blocks whose bodies hold declarations rather than statements.
    fn holds_members(self) -> bool {
        matches!(
            self,
            BlockKind::Namespace
                | BlockKind::Class
                | BlockKind::Module
                | BlockKind::Structure
                | BlockKind::Interface
                | BlockKind::Enum
        )
    }

    fn for_type(kind: TypeKind) -> BlockKind {
        match kind {
            TypeKind::Class => BlockKind::Class,
            TypeKind::Module => BlockKind::Module,
            TypeKind::Structure => BlockKind::Structure,
            TypeKind::Interface => BlockKind::Interface,
            TypeKind::Enum | TypeKind::Delegate => BlockKind::Enum,
        }
    }

    fn for_accessor(kind: AccessorKind) -> BlockKind {
        match kind {
            AccessorKind::Get => BlockKind::Get,
            AccessorKind::Set => BlockKind::Set,
            AccessorKind::AddHandler => BlockKind::AddHandler,
            AccessorKind::RemoveHandler => BlockKind::RemoveHandler,
            AccessorKind::RaiseEvent => BlockKind::RaiseEvent,
        }
    }
}

/// An entry on the block context stack.
#[derive(Debug, Clone, Copy)]
struct BlockContext {
    kind: BlockKind,
    start: Location,
}

/// What the current token means for the innermost statement or member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// Not a boundary; parse an item.
    None,
    /// Closes (or sections) an open block; the list ends here.
    Close,
    /// A terminator that matches no open block.
    Stray,
}

/// Block stack maintenance and terminator detection.
///
/// ## Notes
/// - Every push has exactly one pop, including when a rule unwinds on cancellation; the
///   [`Parser::with_block`] wrapper is the only place that pushes.
/// - A missing terminator is always reported, even right after another error.
impl<'a> Parser<'a> {
    /// Run `body` with `kind` pushed on the block stack.
    fn with_block<T>(
        &mut self,
        kind: BlockKind,
        start: Location,
        body: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.blocks.push(BlockContext { kind, start });
        self.stats.blocks_pushed += 1;
        self.stats.max_block_depth = self.stats.max_block_depth.max(self.blocks.len());

        let result = body(self);

        if self.blocks.pop().is_some() {
            self.stats.blocks_popped += 1;
        }
        result
    }

    /// Whether the current tokens close or section a block of `kind`.
    fn closes(&self, kind: BlockKind) -> bool {
        let Some(id) = self.current().keyword_id() else {
            return false;
        };
        match id {
            KeywordId::End => kind.end_keyword().is_some_and(|k| self.check_keyword_at(1, k)),
            KeywordId::EndIf | KeywordId::Else | KeywordId::ElseIf => kind == BlockKind::If,
            KeywordId::Case => kind == BlockKind::Select,
            KeywordId::Catch | KeywordId::Finally => kind == BlockKind::Try,
            KeywordId::Next => kind == BlockKind::For,
            KeywordId::Loop => kind == BlockKind::Do,
            KeywordId::Wend => kind == BlockKind::While,
            KeywordId::Get | KeywordId::Set => kind == BlockKind::Property,
            KeywordId::AddHandler | KeywordId::RemoveHandler | KeywordId::RaiseEvent => {
                kind == BlockKind::Event && self.event_accessor_ahead()
            }
            _ => false,
        }
    }

    /// Classify the current token for the innermost list.
    ///
    /// In a statement list, a declaration-only token ends the list when a type or namespace
    /// is open, so a member that lost its terminator does not swallow its siblings.
    fn boundary(&self, statements: bool) -> Boundary {
        let kind = self.peek_kind(0);
        let terminator = BLOCK_TERMINATORS.contains(kind);
        let accessor = ACCESSOR_KEYWORDS.contains(kind);
        let member_only = statements && MEMBER_ONLY_FIRST.contains(kind);
        if !terminator && !accessor && !member_only {
            return Boundary::None;
        }
        if self.end_statement_ahead() {
            return Boundary::None;
        }
        if self.blocks.iter().rev().any(|ctx| self.closes(ctx.kind)) {
            return Boundary::Close;
        }
        if member_only && self.blocks.iter().any(|ctx| ctx.kind.holds_members()) {
            return Boundary::Close;
        }
        if terminator { Boundary::Stray } else { Boundary::None }
    }

    /// Report and skip a terminator that closes nothing.
    fn stray_terminator(&mut self) {
        let message = match self.current().keyword_id() {
            Some(KeywordId::End) if self.peek_kind(1).keyword_id().is_some() => {
                format!("'End {}' without a matching block", self.peek(1).text)
            }
            _ => format!("'{}' without a matching block", self.current().text),
        };
        self.error_here(DiagnosticCode::UnmatchedTerminator, message);
        self.skip_line();
    }

    /// Consume `End <Kind>` for `kind`, or report it missing.
    ///
    /// A missing terminator is reported at the current token and nothing is consumed.
    fn close_block(&mut self, kind: BlockKind) {
        let closed = kind
            .end_keyword()
            .is_some_and(|k| self.check_keyword(KeywordId::End) && self.check_keyword_at(1, k));
        if closed {
            self.advance();
            self.advance();
        } else if (kind == BlockKind::If && self.check_keyword(KeywordId::EndIf))
            || (kind == BlockKind::While && self.check_keyword(KeywordId::Wend))
        {
            self.advance();
        } else {
            self.missing_block_end(kind);
        }
    }

    fn missing_block_end(&mut self, kind: BlockKind) {
        let message = format!("expected '{}', found {}", kind.terminator(), self.found());
        let span = self.current().span;
        self.diagnostics.push(Diagnostic::new(DiagnosticCode::MissingBlockEnd, message, span));
        self.last_error_at = Some(self.pos);
        if let Some(ctx) = self.blocks.last() {
            tracing::debug!(block = ?ctx.kind, opened_at = %ctx.start, "block left open");
        }
    }

    /// Number of `For` blocks open directly above the innermost non-`For` block.
    fn enclosing_for_depth(&self) -> usize {
        self.blocks.iter().rev().take_while(|ctx| ctx.kind == BlockKind::For).count()
    }
}
