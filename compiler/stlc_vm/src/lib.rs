//! Stack machine for stlc bytecode.
//!
//! State is an operand stack, an instruction pointer and the current
//! activation. Activations form two chains: the dynamic one through
//! `parent` (where `RET` returns to) and the lexical one through the
//! closure that created each activation (what `PUSH_VAR` walks).
//!
//! Activations are shared, reference-counted records. A closure holds the
//! activation it captured, so `STORE_VAR` after capture is visible through
//! the closure, and a frame nothing captured is freed when it returns.
//!
//! Any violated instruction precondition stops the run with a [`VmError`].

mod activation;
mod error;
mod value;
mod vm;

pub use error::VmError;
pub use value::{Closure, Value};
pub use vm::{execute, execute_with_trace};
