//! Reference evaluator.
//!
//! Interprets the syntax tree directly with the same integer semantics as
//! the virtual machine (32-bit wrapping arithmetic, truncating division,
//! division by zero is an error). The driver runs it alongside the machine
//! to cross-check compiled programs.
//!
//! `let rec` declarations are bound to empty cells before any of them is
//! evaluated; each cell is filled once its declaration has a value.

mod error;
mod eval;
mod value;

pub use error::EvalError;
pub use eval::evaluate;
pub use value::{Function, Value};
