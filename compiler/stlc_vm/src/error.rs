use stlc_bytecode::Opcode;
use stlc_diagnostic::{Diagnostic, ErrorCode};

/// A broken instruction precondition. Every variant ends the run; `ip` is
/// the offset of the offending instruction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VmError {
    #[error("{opcode} at {ip}: operand stack underflow")]
    StackUnderflow { ip: usize, opcode: Opcode },

    #[error("unknown opcode {byte} at {ip}")]
    UnknownOpcode { ip: usize, byte: u8 },

    #[error("{opcode} at {ip} is missing operand bytes")]
    TruncatedOperand { ip: usize, opcode: Opcode },

    #[error("instruction pointer {ip} is outside the program (length {len})")]
    IpOutOfRange { ip: usize, len: usize },

    #[error("ENTER at {ip}: activation already has slots")]
    DoubleEnter { ip: usize },

    #[error("{opcode} at {ip}: activation has no slots")]
    NoSlots { ip: usize, opcode: Opcode },

    #[error("{opcode} at {ip}: slot {slot} out of range for {size} slot(s)")]
    SlotOutOfRange {
        ip: usize,
        opcode: Opcode,
        slot: i32,
        size: usize,
    },

    #[error("PUSH_VAR at {ip}: slot {slot} read before it was written")]
    UnsetSlot { ip: usize, slot: usize },

    #[error("PUSH_VAR at {ip}: scope chain ends before depth {depth}")]
    ScopeUnderflow { ip: usize, depth: i32 },

    #[error("{opcode} at {ip}: expected {expected}, found {found}")]
    WrongKind {
        ip: usize,
        opcode: Opcode,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{opcode} at {ip}: invalid operand {value}")]
    InvalidOperand { ip: usize, opcode: Opcode, value: i32 },

    #[error("division by zero at {ip}")]
    DivisionByZero { ip: usize },

    #[error("cannot write trace: {0}")]
    Trace(String),
}

impl VmError {
    pub fn code(&self) -> ErrorCode {
        match self {
            VmError::DivisionByZero { .. } => ErrorCode::E4002,
            VmError::Trace(_) => ErrorCode::E5001,
            _ => ErrorCode::E4001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}
