//! Substitutions: finite maps from type variable names to types.

use std::fmt;

use rustc_hash::FxHashMap;
use stlc_ir::Name;

use crate::Type;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Subst {
    bindings: FxHashMap<Name, Type>,
}

impl Subst {
    pub fn new() -> Self {
        Subst::default()
    }

    pub fn singleton(name: Name, ty: Type) -> Self {
        let mut subst = Subst::new();
        subst.insert(name, ty);
        subst
    }

    pub fn insert(&mut self, name: Name, ty: Type) {
        self.bindings.insert(name, ty);
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Type)> {
        self.bindings.iter()
    }

    /// `self` after `inner`: every binding of `inner` with `self` applied
    /// to its type, plus the bindings of `self`. On a shared key `self`
    /// wins.
    ///
    /// Applying the result equals applying `inner` and then `self`.
    #[must_use]
    pub fn compose(&self, inner: &Subst) -> Subst {
        let mut bindings: FxHashMap<Name, Type> = inner
            .bindings
            .iter()
            .map(|(name, ty)| (name.clone(), ty.apply(self)))
            .collect();
        for (name, ty) in &self.bindings {
            bindings.insert(name.clone(), ty.clone());
        }
        Subst { bindings }
    }

    /// The substitution without bindings for `names`.
    #[must_use]
    pub fn without(&self, names: &[Name]) -> Subst {
        if names.is_empty() {
            return self.clone();
        }
        Subst {
            bindings: self
                .bindings
                .iter()
                .filter(|(name, _)| !names.contains(name))
                .map(|(name, ty)| (name.clone(), ty.clone()))
                .collect(),
        }
    }
}

/// Sorted by variable name so output is stable.
impl fmt::Debug for Subst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(entries.into_iter().map(|(name, ty)| (name.as_str(), ty.to_string())))
            .finish()
    }
}

#[cfg(test)]
mod tests;
