use stlc_diagnostic::{Diagnostic, ErrorCode};
use stlc_ir::{Name, Span};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("unbound variable {name}")]
    UnboundVariable { name: Name, span: Span },

    /// A `let rec` declaration read before it finished evaluating, as in
    /// `let rec x = x in x`.
    #[error("{name} is used before its definition is evaluated")]
    Uninitialised { name: Name, span: Span },

    #[error("expected {expected}, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("division by zero")]
    DivisionByZero { span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::UnboundVariable { span, .. }
            | EvalError::Uninitialised { span, .. }
            | EvalError::WrongKind { span, .. }
            | EvalError::DivisionByZero { span } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::DivisionByZero { .. } => ErrorCode::E4002,
            _ => ErrorCode::E4001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_span(self.span())
    }
}
