//! Grammar productions.
//!
//! ```text
//! program        := expression EOF
//! expression     := relational { relational }
//! relational     := additive [ "==" additive ]
//! additive       := multiplicative { ("+" | "-") multiplicative }
//! multiplicative := factor { ("*" | "/") factor }
//! factor         := "(" expression { "," expression } ")"
//!                 | INT | "True" | "False"
//!                 | "\" IDENT { IDENT } "->" expression
//!                 | "let" ["rec"] decl { ";" decl } "in" expression
//!                 | "if" "(" expression ")" expression "else" expression
//!                 | IDENT
//! decl           := IDENT { IDENT } "=" expression
//! ```

use stlc_ir::{BinaryOp, Declaration, Expr, Name, Span};
use stlc_lexer::{Token, TokenKind};
use stlc_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::SyntaxError;

/// Tokens that can begin a `factor`, and therefore an application argument.
const FACTOR_START: [TokenKind; 8] = [
    TokenKind::LParen,
    TokenKind::LiteralInt,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Backslash,
    TokenKind::Let,
    TokenKind::If,
    TokenKind::Identifier,
];

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(source, tokens),
        }
    }

    pub(crate) fn parse_program(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression()?;
        if !self.cursor.check(TokenKind::Eof) {
            let mut expected = FACTOR_START.to_vec();
            expected.extend([
                TokenKind::EqualEqual,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]);
            return Err(self.cursor.unexpected(&expected));
        }
        Ok(expr)
    }

    /// Juxtaposition is application, left associative.
    fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        ensure_sufficient_stack(|| {
            let mut expr = self.parse_relational()?;
            while FACTOR_START.contains(&self.cursor.current_kind()) {
                let arg = self.parse_relational()?;
                let span = expr.span.merge(arg.span);
                expr = Expr::apply(expr, arg, span);
            }
            Ok(expr)
        })
    }

    fn parse_relational(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_additive()?;
        if self.cursor.eat(TokenKind::EqualEqual).is_some() {
            let right = self.parse_additive()?;
            let span = left.span.merge(right.span);
            return Ok(Expr::binary(BinaryOp::Equals, left, right, span));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => BinaryOp::Plus,
                TokenKind::Minus => BinaryOp::Minus,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span.merge(right.span);
            left = Expr::binary(op, left, right, span);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => BinaryOp::Times,
                TokenKind::Slash => BinaryOp::Divide,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_factor()?;
            let span = left.span.merge(right.span);
            left = Expr::binary(op, left, right, span);
        }
    }

    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => self.parse_parenthesised(),
            TokenKind::LiteralInt => self.parse_int(),
            TokenKind::True => Ok(Expr::bool(true, self.cursor.advance().span)),
            TokenKind::False => Ok(Expr::bool(false, self.cursor.advance().span)),
            TokenKind::Backslash => self.parse_lambda(),
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            TokenKind::Identifier => {
                let name = self.cursor.current_text();
                let token = self.cursor.advance();
                Ok(Expr::var(name, token.span))
            }
            _ => Err(self.cursor.unexpected(&FACTOR_START)),
        }
    }

    /// `( e )` is grouping; `( e, e, ... )` is a tuple literal.
    fn parse_parenthesised(&mut self) -> Result<Expr, SyntaxError> {
        let open = self.cursor.expect(TokenKind::LParen)?;
        let mut elements = vec![self.parse_expression()?];
        while self.cursor.eat(TokenKind::Comma).is_some() {
            elements.push(self.parse_expression()?);
        }
        let close = self
            .cursor
            .eat(TokenKind::RParen)
            .ok_or_else(|| self.cursor.unexpected(&[TokenKind::Comma, TokenKind::RParen]))?;
        let span = open.span.merge(close.span);

        if elements.len() == 1 {
            let mut inner = elements.remove(0);
            inner.span = span;
            Ok(inner)
        } else {
            Ok(Expr::tuple(elements, span))
        }
    }

    fn parse_int(&mut self) -> Result<Expr, SyntaxError> {
        let text = self.cursor.current_text();
        let token = self.cursor.advance();
        match text.parse::<i32>() {
            Ok(value) => Ok(Expr::int(value, token.span)),
            Err(_) => Err(SyntaxError::InvalidInteger {
                text: text.to_string(),
                span: token.span,
            }),
        }
    }

    fn parse_lambda(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.cursor.expect(TokenKind::Backslash)?.span;
        let params = self.parse_params(true)?;
        self.cursor.expect(TokenKind::Arrow)?;
        let body = self.parse_expression()?;
        Ok(curry(params, body, Some(start)))
    }

    fn parse_let(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.cursor.expect(TokenKind::Let)?.span;
        let recursive = self.cursor.eat(TokenKind::Rec).is_some();

        let mut decls = vec![self.parse_declaration()?];
        while self.cursor.eat(TokenKind::Semicolon).is_some() {
            decls.push(self.parse_declaration()?);
        }
        if !self.cursor.check(TokenKind::In) {
            return Err(self
                .cursor
                .unexpected(&[TokenKind::Semicolon, TokenKind::In]));
        }
        self.cursor.advance();

        let body = self.parse_expression()?;
        let span = start.merge(body.span);
        if recursive {
            Ok(Expr::let_rec(decls, body, span))
        } else {
            Ok(Expr::let_(decls, body, span))
        }
    }

    /// `name p1 p2 = e` binds `name` to `\p1 -> \p2 -> e`.
    fn parse_declaration(&mut self) -> Result<Declaration, SyntaxError> {
        let name = self.parse_ident()?.0;
        let params = self.parse_params(false)?;
        self.cursor.expect(TokenKind::Equal)?;
        let expr = self.parse_expression()?;
        Ok(Declaration::new(name, curry(params, expr, None)))
    }

    fn parse_if(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.cursor.expect(TokenKind::If)?.span;
        self.cursor.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.cursor.expect(TokenKind::RParen)?;
        let then_branch = self.parse_expression()?;
        self.cursor.expect(TokenKind::Else)?;
        let else_branch = self.parse_expression()?;
        let span = start.merge(else_branch.span);
        Ok(Expr::if_(cond, then_branch, else_branch, span))
    }

    /// Parameter names up to `->` or `=`. A lambda needs at least one.
    fn parse_params(&mut self, at_least_one: bool) -> Result<Vec<(Name, Span)>, SyntaxError> {
        let mut params = Vec::new();
        if at_least_one {
            params.push(self.parse_ident()?);
        }
        while self.cursor.check(TokenKind::Identifier) {
            params.push(self.parse_ident()?);
        }
        Ok(params)
    }

    fn parse_ident(&mut self) -> Result<(Name, Span), SyntaxError> {
        let text = self.cursor.current_text();
        let token = self.cursor.expect(TokenKind::Identifier)?;
        Ok((Name::new(text), token.span))
    }
}

/// Fold parameters right to left into nested lambdas. The outermost lambda
/// starts at `start` when given (the backslash), otherwise at its parameter.
fn curry(params: Vec<(Name, Span)>, body: Expr, start: Option<Span>) -> Expr {
    params
        .into_iter()
        .enumerate()
        .rev()
        .fold(body, |body, (index, (param, param_span))| {
            let begin = match start {
                Some(start) if index == 0 => start,
                _ => param_span,
            };
            let span = begin.merge(body.span);
            Expr::lambda(param, body, span)
        })
}
