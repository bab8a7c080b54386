//! Token cursor with single-token lookahead.

use stlc_ir::Span;
use stlc_lexer::{Token, TokenKind};

use crate::SyntaxError;

pub(crate) struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Cursor {
            source,
            tokens,
            pos: 0,
        }
    }

    /// The current token. Past the end this keeps returning the final
    /// `Eof` token.
    #[inline]
    pub(crate) fn current(&self) -> Token {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(token) => *token,
            None => Token {
                kind: TokenKind::Eof,
                span: Span::DUMMY,
            },
        }
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn current_text(&self) -> &'a str {
        self.current().text(self.source)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail naming it as expected.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        self.eat(kind).ok_or_else(|| self.unexpected(&[kind]))
    }

    pub(crate) fn unexpected(&self, expected: &[TokenKind]) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            expected: expected.to_vec(),
            found: self.current_kind(),
            span: self.current_span(),
        }
    }
}
