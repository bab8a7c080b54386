//! Parser for stlc.
//!
//! Recursive descent over the token stream from `stlc_lexer`. There is no
//! error recovery: the first problem ends the parse with a [`SyntaxError`].
//!
//! Multi-parameter lambdas and declarations (`\a b -> e`, `add a b = e`)
//! desugar to nested single-parameter lambdas, and a parenthesised group with
//! more than one comma-separated element is a tuple literal.

mod cursor;
mod error;
mod parser;

pub use error::SyntaxError;

use stlc_ir::Expr;

/// Parse a complete program: one expression followed by end of input.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Expr, SyntaxError> {
    let tokens = stlc_lexer::tokenize(source).map_err(SyntaxError::from)?;
    parser::Parser::new(source, &tokens).parse_program()
}

#[cfg(test)]
mod tests;
