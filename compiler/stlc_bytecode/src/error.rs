use stlc_diagnostic::{Diagnostic, ErrorCode};
use stlc_ir::{Name, Span};

use crate::Opcode;

/// Label resolution failure while linking blocks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("unknown label {label} referenced from block {block}")]
    UnknownLabel { block: String, label: String },

    #[error("label {label} defined twice in block {block}")]
    DuplicateLabel { block: String, label: String },

    #[error("offset {offset} does not fit in a 32-bit operand")]
    OffsetOverflow { offset: usize },
}

impl LinkError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            LinkError::UnknownLabel { .. } | LinkError::DuplicateLabel { .. } => ErrorCode::E3002,
            LinkError::OffsetOverflow { .. } => ErrorCode::E3004,
        };
        Diagnostic::error(code).with_message(self.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Only reachable for programs that skipped type checking.
    #[error("unbound variable {name}")]
    UnboundVariable { name: Name, span: Span },

    #[error(transparent)]
    Link(#[from] LinkError),
}

impl CompileError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::UnboundVariable { span, .. } => Diagnostic::error(ErrorCode::E3001)
                .with_message(self.to_string())
                .with_span(*span),
            CompileError::Link(err) => err.to_diagnostic(),
        }
    }
}

/// Assembly failure. `line` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AsmError {
    #[error("line {line}: unknown instruction {mnemonic}")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("line {line}: {mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        mnemonic: Opcode,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid operand {operand}")]
    InvalidOperand { line: usize, operand: String },

    #[error("line {line}: invalid label name {label:?}")]
    InvalidLabel { line: usize, label: String },

    #[error("line {line}: unknown label {label}")]
    UnknownLabel { line: usize, label: String },

    #[error("line {line}: label {label} already defined")]
    DuplicateLabel { line: usize, label: String },

    #[error(transparent)]
    Link(#[from] LinkError),
}

impl AsmError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            AsmError::UnknownMnemonic { .. }
            | AsmError::OperandCount { .. }
            | AsmError::InvalidOperand { .. }
            | AsmError::InvalidLabel { .. } => ErrorCode::E3003,
            AsmError::UnknownLabel { .. } | AsmError::DuplicateLabel { .. } => ErrorCode::E3002,
            AsmError::Link(err) => return err.to_diagnostic(),
        };
        Diagnostic::error(code).with_message(self.to_string())
    }
}

/// Malformed byte stream.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("offset {offset} is past the end of the stream (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("unknown opcode {byte} at offset {offset}")]
    UnknownOpcode { offset: usize, byte: u8 },

    #[error("{opcode} at offset {offset} is missing operand bytes")]
    TruncatedOperand { offset: usize, opcode: Opcode },
}

impl DecodeError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E3004).with_message(self.to_string())
    }
}
