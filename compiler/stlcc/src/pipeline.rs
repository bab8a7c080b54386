//! Source-to-result pipelines.

use std::fmt;
use std::io::Write;

use stlc_ir::Expr;
use stlc_types::{infer_type, Type, TypeEnv, TypeKind};
use stlc_vm::{execute, execute_with_trace, Value};

use crate::DriverError;

/// What runs a type-checked program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Engine {
    /// Compile to bytecode and execute on the stack machine.
    #[default]
    Vm,
    /// Interpret the syntax tree directly.
    Eval,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Write one trace line per executed instruction. Ignored by
    /// [`Engine::Eval`].
    pub trace: bool,
    pub engine: Engine,
}

/// A parsed program and its principal type, with type variables renamed
/// to `a`, `b`, ...
#[derive(Clone, Debug)]
pub struct Checked {
    pub expr: Expr,
    pub ty: Type,
}

/// Result of [`run`]: the rendered value and the program's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub value: String,
    pub ty: Type,
}

impl Outcome {
    pub fn is_function(&self) -> bool {
        matches!(self.ty.kind, TypeKind::Arrow(..))
    }
}

/// `<value>: <type>`, or `function: <type>` when the program is a function.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_function() {
            write!(f, "function: {}", self.ty)
        } else {
            write!(f, "{}: {}", self.value, self.ty)
        }
    }
}

/// Parse and infer.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check(source: &str) -> Result<Checked, DriverError> {
    let expr = stlc_parse::parse(source)?;
    let ty = infer_type(&TypeEnv::new(), &expr)?.normalize();
    Ok(Checked { expr, ty })
}

/// Parse, infer and compile. Ill-typed programs are rejected before code
/// generation.
pub fn compile(source: &str) -> Result<Vec<u8>, DriverError> {
    let checked = check(source)?;
    Ok(stlc_bytecode::compile(&checked.expr)?)
}

/// Parse, infer and execute with the engine chosen in `options`. Trace
/// lines, when enabled, go to `trace`.
#[tracing::instrument(level = "debug", skip(source, trace))]
pub fn run(
    source: &str,
    options: &RunOptions,
    trace: &mut dyn Write,
) -> Result<Outcome, DriverError> {
    let Checked { expr, ty } = check(source)?;
    let value = match options.engine {
        Engine::Vm => {
            let code = stlc_bytecode::compile(&expr)?;
            exec(&code, options.trace.then_some(trace))?.to_string()
        }
        Engine::Eval => stlc_eval::evaluate(&expr)?.to_string(),
    };
    Ok(Outcome { value, ty })
}

/// Execute bytecode from offset 0.
pub fn exec(code: &[u8], trace: Option<&mut dyn Write>) -> Result<Value, DriverError> {
    let value = match trace {
        Some(out) => execute_with_trace(code, 0, out)?,
        None => execute(code, 0)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests;
