use std::fmt;

use stlc_diagnostic::{Diagnostic, ErrorCode};
use stlc_ir::{Name, Span};

use crate::Type;

/// Failure to unify two types or two type lists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnifyError {
    #[error("unable to unify {left} with {right}")]
    Mismatch { left: Type, right: Type },

    #[error("unable to unify {} with {}", TypeList(.left), TypeList(.right))]
    ArityMismatch { left: Vec<Type>, right: Vec<Type> },
}

impl UnifyError {
    /// Location of the first located type involved.
    pub fn span(&self) -> Option<Span> {
        match self {
            UnifyError::Mismatch { left, right } => left.span.or(right.span),
            UnifyError::ArityMismatch { left, right } => {
                left.iter().chain(right).find_map(|ty| ty.span)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error(transparent)]
    Unification(#[from] UnifyError),

    #[error("unknown name {name}")]
    UnknownName { name: Name, span: Span },
}

impl TypeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::Unification(UnifyError::Mismatch { .. }) => ErrorCode::E2001,
            TypeError::Unification(UnifyError::ArityMismatch { .. }) => ErrorCode::E2002,
            TypeError::UnknownName { .. } => ErrorCode::E2003,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            TypeError::Unification(err) => err.span(),
            TypeError::UnknownName { span, .. } => Some(*span),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.to_string());
        match self.span() {
            Some(span) => diagnostic.with_span(span),
            None => diagnostic,
        }
    }
}

/// Comma separated type list for error messages.
struct TypeList<'a>(&'a [Type]);

impl fmt::Display for TypeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
