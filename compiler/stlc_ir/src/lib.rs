//! stlc IR - shared data structures.
//!
//! - [`Span`]: byte range of a node in its source text
//! - [`Name`]: cheaply clonable identifier, used both for program names and
//!   type variable names
//! - [`Expr`]: the syntax tree consumed by type inference, the bytecode
//!   compiler and the reference evaluator
//!
//! The tree is produced by `stlc_parse`, but nothing here depends on the
//! parser; tests and tools build trees directly through the constructors on
//! [`Expr`].

mod ast;
mod name;
mod span;

pub use ast::{BinaryOp, Declaration, Expr, ExprKind};
pub use name::Name;
pub use span::Span;
