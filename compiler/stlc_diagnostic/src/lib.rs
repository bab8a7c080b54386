//! Diagnostics for the stlc toolchain.
//!
//! Every phase reports failure as a structured error value; at the tool
//! boundary that value becomes a [`Diagnostic`] with an [`ErrorCode`], a
//! message and an optional primary [`Span`](stlc_ir::Span). The boundary
//! renders it as a single line such as
//!
//! ```text
//! error[E2001]: unable to unify Bool from 1:5-8 with Int
//! ```
//!
//! Line/column arithmetic lives in [`span_utils`].

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
