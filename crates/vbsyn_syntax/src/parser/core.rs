/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] state value and the two top-level drivers: the compilation
/// unit and snippet mode.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - All parse state lives in one `Parser` value owned by a single `parse` call; nothing is
///   shared between parses.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: ParseOptions,
    cancel: &'a dyn CancellationSignal,
    blocks: Vec<BlockContext>,
    diagnostics: Vec<Diagnostic>,
    stats: ParseStats,
    /// Token index of the last suppressible diagnostic; a second one at the same token is dropped.
    last_error_at: Option<usize>,
    /// `Next i, j` closes more than one `For`; enclosing loops still owed a close.
    pending_next: usize,
}

/// The parse was cancelled by the caller's signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cancelled;

/// Result of a rule that may observe cancellation. Expression rules never do.
type PResult<T> = Result<T, Cancelled>;

impl<'a> Parser<'a> {
    /// Create a parser over a token stream that is non-empty and ends in `Eof`.
    fn new(tokens: &'a [Token], options: ParseOptions, cancel: &'a dyn CancellationSignal) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            cancel,
            blocks: Vec::new(),
            diagnostics: Vec::new(),
            stats: ParseStats::default(),
            last_error_at: None,
            pending_next: 0,
        }
    }

    /// Run the parse to completion (or cancellation).
    fn run(mut self) -> Result<ParseOutput, ParseError> {
        let mut unit = CompilationUnit::default();
        let outcome = if self.options.snippet_mode {
            self.snippet().map(Some)
        } else {
            self.compilation_unit(&mut unit).map(|()| None)
        };

        diagnostics::sort_in_source_order(&mut self.diagnostics);
        match outcome {
            Ok(snippet) => {
                tracing::debug!(
                    diagnostics = self.diagnostics.len(),
                    skipped = self.stats.tokens_skipped,
                    max_depth = self.stats.max_block_depth,
                    "parse finished"
                );
                Ok(ParseOutput {
                    unit,
                    diagnostics: self.diagnostics,
                    snippet,
                    stats: self.stats,
                })
            }
            Err(Cancelled) => {
                tracing::debug!(position = self.pos, members = unit.members.len(), "parse cancelled");
                Err(ParseError::Cancelled {
                    partial: Box::new(unit),
                    diagnostics: self.diagnostics,
                })
            }
        }
    }

    /// Return `Err(Cancelled)` once the caller has signalled cancellation.
    fn check_cancelled(&self) -> PResult<()> {
        if self.cancel.is_cancelled() { Err(Cancelled) } else { Ok(()) }
    }

    // ========================================================================
    // Snippet mode
    // ========================================================================

    /// A bare statement list, or a single expression when the input is nothing more than one.
    fn snippet(&mut self) -> PResult<Snippet> {
        self.skip_separators();
        let conditional = self.check_keyword(KeywordId::If) && self.check_punct_at(1, PunctuationId::LParen);
        if !conditional && (self.at_statement_keyword() || !self.expression_ahead()) {
            return Ok(Snippet::Statements(self.statements()?));
        }

        let start = self.start();
        let first = if conditional {
            self.if_statement(start)?
        } else if self.query_expression_ahead() || self.lambda_ahead() {
            Statement::Expression(self.expression().node)
        } else {
            self.expression_statement()
        };
        let span = self.span_from(start);
        let terminated = self.at_terminator();
        self.skip_separators();
        let first = match first {
            Statement::Expression(expr) if terminated && self.is_at_end() => {
                return Ok(Snippet::Expression(Spanned::new(expr, span)));
            }
            other => Spanned::new(other, span),
        };
        if !terminated {
            self.end_of_statement();
        }
        let mut stmts = vec![first];
        stmts.extend(self.statements()?);
        Ok(Snippet::Statements(stmts))
    }
}
