//! Tokenizer. Tokens carry spans only; text is sliced back out of the source.
//!
//! Runs of unrecognized characters become a single `Garbage` token.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

fn offset(at: usize) -> TextSize {
    TextSize::from(at as u32)
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = SyntaxKind::lexer(source);
    let mut tokens = Vec::new();
    let mut garbage: Option<TextSize> = None;

    let flush = |tokens: &mut Vec<Token>, garbage: &mut Option<TextSize>, end: usize| {
        if let Some(start) = garbage.take() {
            let span = TextRange::new(start, offset(end));
            tokens.push(Token { kind: SyntaxKind::Garbage, span });
        }
    };

    while let Some(next) = lexer.next() {
        let span = lexer.span();
        match next {
            Ok(kind) => {
                flush(&mut tokens, &mut garbage, span.start);
                let span = TextRange::new(offset(span.start), offset(span.end));
                tokens.push(Token { kind, span });
            }
            Err(()) => {
                garbage.get_or_insert(offset(span.start));
            }
        }
    }
    flush(&mut tokens, &mut garbage, source.len());

    tracing::trace!(count = tokens.len(), "lexed source");
    tokens
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span]
}
