use std::fmt;
use std::rc::Rc;

use crate::activation::ActivationRef;

/// Code entry point paired with the activation in scope at creation.
#[derive(Clone)]
pub struct Closure {
    pub entry: usize,
    pub(crate) env: ActivationRef,
}

/// Closures are equal when they share both entry and captured activation.
impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Eq for Closure {}

// The captured activation may hold this closure in one of its slots.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<closure@{}>", self.entry)
    }
}

/// Runtime value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Closure(Closure),
    Tuple(Rc<[Value]>),
}

impl Value {
    /// Kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Closure(_) => "closure",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Closure(closure) => write!(f, "{closure}"),
            Value::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}
