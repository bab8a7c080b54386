//! Equality constraints and the solver.

use std::fmt;

use crate::{unify, Subst, Type, UnifyError};

/// `left ~ right`: the two types must be made equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
}

impl Constraint {
    pub fn new(left: Type, right: Type) -> Self {
        Constraint { left, right }
    }

    #[must_use]
    pub fn apply(&self, subst: &Subst) -> Constraint {
        Constraint {
            left: self.left.apply(subst),
            right: self.right.apply(subst),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.left, self.right)
    }
}

/// Ordered constraint list accumulated during one inference run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    items: Vec<Constraint>,
}

impl Constraints {
    pub fn new() -> Self {
        Constraints::default()
    }

    pub fn add(&mut self, left: Type, right: Type) {
        self.items.push(Constraint::new(left, right));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.items.iter()
    }

    /// Unify every constraint in order into one substitution.
    ///
    /// Each step's substitution is composed after the accumulated one and
    /// applied to the constraints still waiting. The list itself is left
    /// intact, so a `let` can solve again after adding more constraints.
    pub fn solve(&self) -> Result<Subst, UnifyError> {
        solve(self.items.clone())
    }
}

fn solve(mut pending: Vec<Constraint>) -> Result<Subst, UnifyError> {
    let count = pending.len();
    let mut subst = Subst::new();
    // Pop from the back of a reversed list to take constraints in order.
    pending.reverse();

    while let Some(Constraint { left, right }) = pending.pop() {
        let step = unify(&left, &right)?;
        subst = step.subst.compose(&subst);
        for constraint in &mut pending {
            *constraint = constraint.apply(&step.subst);
        }
        pending.extend(step.constraints.into_iter().rev());
    }

    tracing::debug!(constraints = count, bindings = subst.len(), "solved");
    Ok(subst)
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{constraint}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Constraints {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
