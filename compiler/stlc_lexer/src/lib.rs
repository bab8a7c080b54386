//! Lexer for stlc using logos.
//!
//! [`tokenize`] turns source text into a `Vec<Token>` that always ends with a
//! single [`TokenKind::Eof`]. Whitespace and `//` line comments are skipped.
//! Token text is not copied; use [`Token::text`] with the original source.

use std::fmt;

use logos::Logos;
use stlc_ir::Span;

/// Raw token from logos, before the end-of-stream marker is appended.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\r\n\f]+|//[^\n]*)")]
enum RawToken {
    #[token("let")]
    Let,
    #[token("rec")]
    Rec,
    #[token("in")]
    In,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("True")]
    True,
    #[token("False")]
    False,

    #[token("\\")]
    Backslash,
    #[token("->")]
    Arrow,
    #[token("==")]
    EqualEqual,
    #[token("=")]
    Equal,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex("[0-9]+")]
    LiteralInt,
    #[regex("[a-zA-Z_][a-zA-Z0-9_']*")]
    Identifier,
}

/// Kinds of token the parser sees.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Let,
    Rec,
    In,
    If,
    Else,
    True,
    False,
    Backslash,
    Arrow,
    EqualEqual,
    Equal,
    Semicolon,
    Comma,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    LiteralInt,
    Identifier,
    Eof,
}

impl TokenKind {
    /// How the token is named in "expected ..." messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Let => "let",
            TokenKind::Rec => "rec",
            TokenKind::In => "in",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Backslash => "'\\'",
            TokenKind::Arrow => "'->'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::Equal => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::LiteralInt => "literal int",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "<end-of-stream>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Let => TokenKind::Let,
            RawToken::Rec => TokenKind::Rec,
            RawToken::In => TokenKind::In,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Backslash => TokenKind::Backslash,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::EqualEqual => TokenKind::EqualEqual,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::LiteralInt => TokenKind::LiteralInt,
            RawToken::Identifier => TokenKind::Identifier,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// The token's source text.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

/// A character sequence no token matches.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("unrecognised input {text:?}")]
pub struct LexError {
    pub text: String,
    pub span: Span,
}

/// Tokenize `source`, appending a trailing [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match raw {
            Ok(raw) => tokens.push(Token {
                kind: raw.into(),
                span,
            }),
            Err(()) => {
                return Err(LexError {
                    text: lexer.slice().to_string(),
                    span,
                })
            }
        }
    }

    let end = Span::from_range(source.len()..source.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: end,
    });
    Ok(tokens)
}
