//! Type inference for stlc.
//!
//! Constraint-based Hindley-Milner in three layers:
//!
//! - Type algebra: [`Type`], [`Subst`], [`Scheme`], [`TypeEnv`], [`Pump`]
//! - Unification and the constraint solver: [`unify`], [`Constraints::solve`]
//! - The inference engine: [`infer`] walks the tree, emits constraints and
//!   returns the (unsolved) type of the expression
//!
//! Callers solve the returned constraints and apply the substitution to get
//! the principal type; [`infer_type`] does both.
//!
//! ```text
//! let InferResult { constraints, ty } = infer(&TypeEnv::new(), &expr)?;
//! let subst = constraints.solve()?;
//! let principal = ty.apply(&subst);
//! ```

mod constraints;
mod env;
mod error;
mod infer;
mod pump;
mod scheme;
mod subst;
mod ty;
mod unify;

pub use constraints::{Constraint, Constraints};
pub use env::TypeEnv;
pub use error::{TypeError, UnifyError};
pub use infer::{infer, infer_type, operator_signature, InferResult};
pub use pump::Pump;
pub use scheme::Scheme;
pub use subst::Subst;
pub use ty::{Type, TypeKind};
pub use unify::{unify, unify_many, Unifier};
