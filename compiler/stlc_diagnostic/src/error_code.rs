use std::fmt;

/// Error codes for all toolchain diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E1xxx: syntax
/// - E2xxx: types
/// - E3xxx: bytecode generation, assembly and decoding
/// - E4xxx: virtual machine contract violations
/// - E5xxx: tool I/O
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax (E1xxx)
    /// Unexpected token
    E1001,
    /// Unrecognised character
    E1002,
    /// Integer literal out of range
    E1003,

    // Types (E2xxx)
    /// Unification mismatch
    E2001,
    /// Unification of type lists with differing lengths
    E2002,
    /// Unknown name
    E2003,

    // Bytecode (E3xxx)
    /// Unbound variable during code generation
    E3001,
    /// Unknown or duplicate label
    E3002,
    /// Malformed assembly line
    E3003,
    /// Malformed bytecode stream
    E3004,

    // Virtual machine (E4xxx)
    /// Operand stack or activation contract violated
    E4001,
    /// Integer division by zero
    E4002,

    // Tool I/O (E5xxx)
    /// File could not be read or written
    E5001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E5001 => "E5001",
        }
    }

    /// Syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Runtime contract violation (E4xxx range).
    pub fn is_vm_error(&self) -> bool {
        self.as_str().starts_with("E4")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
