use stlc_diagnostic::{Diagnostic, ErrorCode};
use stlc_ir::Span;
use stlc_lexer::{LexError, TokenKind};

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected {}, found {found}", describe_expected(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        span: Span,
    },

    #[error("integer literal {text} does not fit in 32 bits")]
    InvalidInteger { text: String, span: Span },

    #[error("unrecognised character {text:?}")]
    UnexpectedCharacter { text: String, span: Span },
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::InvalidInteger { span, .. }
            | SyntaxError::UnexpectedCharacter { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SyntaxError::UnexpectedToken { .. } => ErrorCode::E1001,
            SyntaxError::UnexpectedCharacter { .. } => ErrorCode::E1002,
            SyntaxError::InvalidInteger { .. } => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_span(self.span())
    }
}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        SyntaxError::UnexpectedCharacter {
            text: err.text,
            span: err.span,
        }
    }
}

/// `a`, `a or b`, `a, b or c`.
fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.describe().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|kind| kind.describe()).collect();
            format!("{} or {}", init.join(", "), last.describe())
        }
    }
}
