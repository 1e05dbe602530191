//! Parser state and token-level operations used by the grammar.

use std::cell::Cell;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Lookaheads allowed between two consumed tokens before the parser is considered stuck.
pub(super) const LOOKAHEAD_FUEL: u32 = 256;

/// An opening `(`, `[` or `{` waiting for its partner.
#[derive(Debug, Clone, Copy)]
struct Opener {
    kind: SyntaxKind,
    span: TextRange,
}

/// Exec and recursion limits of one parse.
#[derive(Debug, Clone, Copy, Default)]
struct Limits {
    exec_initial: Option<u32>,
    exec_left: Option<u32>,
    max_depth: Option<u32>,
}

impl Limits {
    /// Burns one unit of exec fuel. `false` once the tank is empty.
    fn burn(&mut self) -> bool {
        match &mut self.exec_left {
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            }
            None => true,
        }
    }

    fn consumed(&self) -> u32 {
        match (self.exec_initial, self.exec_left) {
            (Some(initial), Some(left)) => initial.saturating_sub(left),
            _ => 0,
        }
    }
}

/// Trivia is held back and emitted right before the next node or token,
/// so it lands inside the node that follows it.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    depth: u32,
    last_report: Option<TextSize>,
    openers: Vec<Opener>,
    pub(super) lookahead_fuel: Cell<u32>,
    limits: Limits,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_report: None,
            openers: Vec::new(),
            lookahead_fuel: Cell::new(LOOKAHEAD_FUEL),
            limits: Limits::default(),
            fatal: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.limits.exec_initial = limit;
        self.limits.exec_left = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.limits.max_depth = limit;
        self
    }

    /// Green tree, diagnostics and exec fuel used; `Err` if a limit was hit.
    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics, u32), Error> {
        self.flush_trivia();
        if let Some(err) = self.fatal {
            return Err(err);
        }
        let consumed = self.limits.consumed();
        Ok((self.builder.finish(), self.diagnostics, consumed))
    }

    fn abort(&mut self, err: Error) {
        self.fatal.get_or_insert(err);
    }

    fn refuel(&self) {
        self.lookahead_fuel.set(LOOKAHEAD_FUEL);
    }

    fn token_kind(&self, at: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens.get(at).map_or(SyntaxKind::Error, |t| t.kind)
    }

    /// Kind of the next non-trivia token; `Error` at the end of input.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.buffer_trivia();
        self.token_kind(self.pos)
    }

    fn current_span(&mut self) -> TextRange {
        self.buffer_trivia();
        match self.tokens.get(self.pos) {
            Some(t) => t.span,
            None => TextRange::empty(TextSize::from(self.source.len() as u32)),
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.fatal.is_some()
    }

    /// Like `should_stop`, but looks past pending trivia first.
    pub(super) fn at_end(&mut self) -> bool {
        self.buffer_trivia();
        self.should_stop()
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Whether the token after the current one, trivia skipped, is `kind`.
    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.buffer_trivia();
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(1)
            .is_some_and(|t| t.kind == kind)
    }

    fn buffer_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.pending_trivia.push(token);
            self.pos += 1;
        }
    }

    fn flush_trivia(&mut self) {
        for token in std::mem::take(&mut self.pending_trivia) {
            self.builder
                .token(token.kind.into(), token_text(self.source, &token));
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.buffer_trivia();
        self.flush_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Moves the current token into the tree.
    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.refuel();
        if !self.limits.burn() {
            self.abort(Error::ExecFuelExhausted);
        }
        self.flush_trivia();
        let token = self.tokens[self.pos];
        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Reports `expected {what}` on mismatch without consuming anything.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    /// One diagnostic per source position.
    fn claim_position(&mut self, pos: TextSize) -> bool {
        self.last_report.replace(pos) != Some(pos)
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if self.claim_position(range.start()) {
            self.diagnostics.report(kind, range).emit();
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if self.claim_position(range.start()) {
            self.diagnostics.report(kind, range).message(message).emit();
        }
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Reports at the current token, then wraps everything up to a token in
    /// `recovery` (or the end of input) in one `Error` node.
    pub(super) fn error_recover(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        recovery: TokenSet,
    ) {
        let skip = !self.currently_is_one_of(recovery) && !self.should_stop();
        if skip {
            self.start_node(SyntaxKind::Error);
        }
        self.error_msg(kind, message);
        if skip {
            while !self.currently_is_one_of(recovery) && !self.should_stop() {
                self.bump();
            }
            self.finish_node();
        }
    }

    /// `false` once nesting would exceed the recursion limit.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.limits.max_depth.is_some_and(|max| self.depth >= max) {
            self.abort(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        self.refuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.refuel();
    }

    /// Remembers the current token as an opener; call before bumping it.
    pub(super) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.openers.push(Opener { kind, span });
    }

    /// Consumes `close`, or reports its opener as unclosed.
    pub(super) fn close_delimiter(&mut self, close: SyntaxKind) -> bool {
        let opener = self.openers.pop();
        if self.eat_token(close) {
            return true;
        }
        let Some(opener) = opener else {
            return self.expect(close, close_name(close));
        };
        let here = self.current_span();
        if !self.claim_position(here.start()) {
            return false;
        }
        let kind = match opener.kind {
            SyntaxKind::ParenOpen => DiagnosticKind::UnclosedParen,
            SyntaxKind::BracketOpen => DiagnosticKind::UnclosedBracket,
            _ => DiagnosticKind::UnclosedBrace,
        };
        // Spanning opener to here lets unclosed errors suppress what they cause
        let range = TextRange::new(opener.span.start(), here.end());
        self.diagnostics
            .report(kind, range)
            .related_to("opened here", opener.span)
            .emit();
        false
    }
}

fn close_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::ParenClose => "`)`",
        SyntaxKind::BracketClose => "`]`",
        _ => "`}`",
    }
}
