use std::fmt;

use stlc_ir::Name;

use crate::{Pump, Subst, Type};

/// A type quantified over `vars`.
///
/// `vars` keeps the order in which the variables first occur in `ty`, so
/// instantiation hands out fresh names in a predictable order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheme {
    pub vars: Vec<Name>,
    pub ty: Type,
}

impl Scheme {
    pub fn new(vars: Vec<Name>, ty: Type) -> Self {
        Scheme { vars, ty }
    }

    /// Unquantified scheme.
    pub fn mono(ty: Type) -> Self {
        Scheme {
            vars: Vec::new(),
            ty,
        }
    }

    /// Apply `subst` to the body, leaving bound variables alone.
    #[must_use]
    pub fn apply(&self, subst: &Subst) -> Scheme {
        Scheme {
            vars: self.vars.clone(),
            ty: self.ty.apply(&subst.without(&self.vars)),
        }
    }

    /// Free variables of the body that are not bound.
    pub fn ftv(&self) -> Vec<Name> {
        let mut vars = self.ty.ftv();
        vars.retain(|name| !self.vars.contains(name));
        vars
    }

    /// Replace every bound variable with a fresh one from `pump`.
    pub fn instantiate(&self, pump: &mut Pump) -> Type {
        if self.vars.is_empty() {
            return self.ty.clone();
        }
        let mut subst = Subst::new();
        for name in &self.vars {
            subst.insert(name.clone(), pump.next());
        }
        self.ty.apply(&subst)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "{}", self.ty);
        }
        f.write_str("forall")?;
        for name in &self.vars {
            write!(f, " {name}")?;
        }
        write!(f, ". {}", self.ty)
    }
}
