use std::io;
use std::path::PathBuf;

use stlc_bytecode::{AsmError, CompileError, DecodeError};
use stlc_diagnostic::{Diagnostic, ErrorCode};
use stlc_eval::EvalError;
use stlc_parse::SyntaxError;
use stlc_types::TypeError;
use stlc_vm::VmError;

/// Any failure of a driver pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Asm(#[from] AsmError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Vm(#[from] VmError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

impl DriverError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DriverError::Syntax(err) => err.to_diagnostic(),
            DriverError::Type(err) => err.to_diagnostic(),
            DriverError::Compile(err) => err.to_diagnostic(),
            DriverError::Asm(err) => err.to_diagnostic(),
            DriverError::Decode(err) => err.to_diagnostic(),
            DriverError::Vm(err) => err.to_diagnostic(),
            DriverError::Eval(err) => err.to_diagnostic(),
            DriverError::Io { .. } => Diagnostic::error(ErrorCode::E5001).with_message(self.to_string()),
        }
    }

    /// `error[E....]: message [at line:col]`
    pub fn render_line(&self, source: Option<&str>) -> String {
        self.to_diagnostic().render_line(source)
    }
}
