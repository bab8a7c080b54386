//! Unification.
//!
//! No occurs check is performed. The surface language has no way to
//! express a recursive type, so binding a variable to a term containing it
//! cannot arise from a well-formed program.

use stlc_stack::ensure_sufficient_stack;

use crate::{Constraint, Subst, Type, TypeKind, UnifyError};

/// Result of unifying two types: the most general unifier and any residual
/// constraints that still need solving.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Unifier {
    pub subst: Subst,
    pub constraints: Vec<Constraint>,
}

impl Unifier {
    fn bind(var: &Type, other: &Type) -> Result<Unifier, UnifyError> {
        let Some(name) = var.as_var() else {
            return Err(UnifyError::Mismatch {
                left: var.clone(),
                right: other.clone(),
            });
        };
        // The binding keeps the other side's location unless only the
        // variable has one.
        let ty = if var.span.is_none() || other.span.is_some() {
            other.clone()
        } else {
            other.at_location(var.span)
        };
        Ok(Unifier {
            subst: Subst::singleton(name.clone(), ty),
            constraints: Vec::new(),
        })
    }
}

/// Most general unifier of `left` and `right`.
#[tracing::instrument(level = "trace", skip_all, fields(left = %left, right = %right))]
pub fn unify(left: &Type, right: &Type) -> Result<Unifier, UnifyError> {
    ensure_sufficient_stack(|| {
        if left == right {
            return Ok(Unifier::default());
        }
        match (&left.kind, &right.kind) {
            (TypeKind::Var(_), _) => Unifier::bind(left, right),
            (_, TypeKind::Var(_)) => Unifier::bind(right, left),
            (TypeKind::Arrow(d1, r1), TypeKind::Arrow(d2, r2)) => unify_many(
                &[(**d1).clone(), (**r1).clone()],
                &[(**d2).clone(), (**r2).clone()],
            ),
            (TypeKind::Tuple(ts1), TypeKind::Tuple(ts2)) if ts1.len() == ts2.len() => {
                unify_many(ts1, ts2)
            }
            _ => Err(UnifyError::Mismatch {
                left: left.clone(),
                right: right.clone(),
            }),
        }
    })
}

/// Unify two lists pairwise, left to right. The substitution from each pair
/// is applied to the remaining elements before they are compared.
pub fn unify_many(left: &[Type], right: &[Type]) -> Result<Unifier, UnifyError> {
    match (left, right) {
        ([], []) => Ok(Unifier::default()),
        ([t1, rest1 @ ..], [t2, rest2 @ ..]) => {
            let first = unify(t1, t2)?;
            let rest1: Vec<Type> = rest1.iter().map(|t| t.apply(&first.subst)).collect();
            let rest2: Vec<Type> = rest2.iter().map(|t| t.apply(&first.subst)).collect();
            let rest = unify_many(&rest1, &rest2)?;

            let mut constraints = first.constraints;
            constraints.extend(rest.constraints);
            Ok(Unifier {
                subst: rest.subst.compose(&first.subst),
                constraints,
            })
        }
        _ => Err(UnifyError::ArityMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }),
    }
}
