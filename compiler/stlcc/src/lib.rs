//! Driver for the stlc toolchain.
//!
//! ```text
//! source ──parse──► Expr ──infer──► Type
//!                    │
//!                    ├──compile──► bytecode ──execute──► stlc_vm::Value
//!                    │
//!                    └──evaluate──► stlc_eval::Value
//! ```
//!
//! Each stage's error converts into [`DriverError`], which renders as a
//! one-line diagnostic. The `stlc` binary is a thin argument parser over
//! [`commands`].

pub mod commands;
mod error;
mod logging;
mod pipeline;
mod program;
mod repl;

pub use error::DriverError;
pub use logging::init_tracing;
pub use pipeline::{check, compile, exec, run, Checked, Engine, Outcome, RunOptions};
pub use program::{read_program, read_source, write_program};
pub use repl::repl;
