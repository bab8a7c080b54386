use std::fmt;

use stlc_ir::Span;

use crate::span_utils::describe_span;
use crate::ErrorCode;

/// A reportable error: code, message and the primary source location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            span: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Render as one line, appending the span as `line:col` when the
    /// source text is available.
    pub fn render_line(&self, source: Option<&str>) -> String {
        match (self.span, source) {
            (Some(span), Some(source)) => {
                format!(
                    "error[{}]: {} at {}",
                    self.code,
                    self.message,
                    describe_span(source, span)
                )
            }
            _ => format!("error[{}]: {}", self.code, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}
