//! Stack growth guard for deeply nested programs.
//!
//! Type inference, unification, code generation and the reference evaluator
//! all recurse on the depth of the syntax tree or of a type term. A program
//! such as a long chain of nested `let`s or a type with thousands of arrows
//! would overflow the native stack, so each of those recursive entry points
//! runs its body through [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining stack drops below [`RED_ZONE`]. On `wasm32` the guard is a plain
//! call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn infer(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
///     ensure_sufficient_stack(|| self.infer_inner(env, expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `wasm32` manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
