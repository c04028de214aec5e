// ============================================================================
// Public API
// ============================================================================

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse executable member bodies. When `false`, bodies are recorded as
    /// [`MethodBody::Skipped`] spans (outline mode).
    pub parse_method_bodies: bool,
    /// Parse a bare statement list or a single expression instead of a compilation unit.
    pub snippet_mode: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            parse_method_bodies: true,
            snippet_mode: false,
        }
    }
}

impl ParseOptions {
    /// Snippet mode: statements or one expression, no surrounding declarations.
    pub fn snippet() -> Self {
        Self::default().with_snippet_mode(true)
    }

    /// Declarations only; member bodies are skipped.
    pub fn outline() -> Self {
        Self::default().with_method_bodies(false)
    }

    pub fn with_method_bodies(mut self, parse: bool) -> Self {
        self.parse_method_bodies = parse;
        self
    }

    pub fn with_snippet_mode(mut self, snippet: bool) -> Self {
        self.snippet_mode = snippet;
        self
    }
}

/// Cooperative cancellation, polled before every statement and member declaration.
pub trait CancellationSignal: Sync {
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(AtomicOrdering::Relaxed)
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Result of a snippet-mode parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Snippet {
    Statements(Block),
    Expression(Spanned<Expr>),
}

/// Counters collected during a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseStats {
    pub blocks_pushed: usize,
    pub blocks_popped: usize,
    pub max_block_depth: usize,
    /// Tokens discarded by error recovery.
    pub tokens_skipped: usize,
}

#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// Empty in snippet mode.
    pub unit: CompilationUnit,
    /// Every syntax diagnostic, in source order.
    pub diagnostics: Vec<Diagnostic>,
    pub snippet: Option<Snippet>,
    pub stats: ParseStats,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Conditions under which no tree is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("token stream is empty")]
    EmptyTokenStream,
    #[error("token stream does not end with an end-of-file token")]
    MissingEof,
    #[error("parse cancelled")]
    Cancelled {
        /// Top-level members finished before cancellation.
        partial: Box<CompilationUnit>,
        diagnostics: Vec<Diagnostic>,
    },
}

/// Parse a token stream into a [`CompilationUnit`] (or a [`Snippet`] in snippet mode).
///
/// ## Errors
/// Only a malformed token stream is fatal; syntax errors are returned as diagnostics next to a
/// best-effort tree.
pub fn parse(tokens: &[Token], options: &ParseOptions) -> Result<ParseOutput, ParseError> {
    parse_with_cancellation(tokens, options, &NeverCancelled)
}

/// [`parse`] with a cancellation signal.
///
/// ## Errors
/// Additionally returns [`ParseError::Cancelled`] with the partial tree once `cancel` fires.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with_cancellation(
    tokens: &[Token],
    options: &ParseOptions,
    cancel: &dyn CancellationSignal,
) -> Result<ParseOutput, ParseError> {
    let Some(last) = tokens.last() else {
        return Err(ParseError::EmptyTokenStream);
    };
    if last.kind != TokenKind::Eof {
        return Err(ParseError::MissingEof);
    }
    Parser::new(tokens, *options, cancel).run()
}
