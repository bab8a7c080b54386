//! Type environments.

use rustc_hash::FxHashSet;
use stlc_ir::Name;

use crate::{Scheme, Subst, Type};

/// Persistent map from program names to schemes.
///
/// Backed by `im::HashMap`, so `extend` and `apply` share structure with
/// the environment they came from and never mutate it.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    bindings: im::HashMap<Name, Scheme>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv::default()
    }

    #[must_use]
    pub fn extend(&self, name: Name, scheme: Scheme) -> TypeEnv {
        TypeEnv {
            bindings: self.bindings.update(name, scheme),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn apply(&self, subst: &Subst) -> TypeEnv {
        if subst.is_empty() {
            return self.clone();
        }
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), scheme.apply(subst)))
                .collect(),
        }
    }

    /// Free variables of every scheme in the environment.
    pub fn ftv(&self) -> FxHashSet<Name> {
        self.bindings
            .values()
            .flat_map(Scheme::ftv)
            .collect()
    }

    /// Quantify `ty` over its free variables that are not free here.
    pub fn generalise(&self, ty: &Type) -> Scheme {
        let env_vars = self.ftv();
        let mut vars = ty.ftv();
        vars.retain(|name| !env_vars.contains(name));
        Scheme::new(vars, ty.clone())
    }
}
