use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use stlc_ir::{Expr, Name};

/// A binding's storage. Plain `let` cells are filled on creation.
pub(crate) type Cell<'ast> = Rc<OnceCell<Value<'ast>>>;

/// Variables in scope.
pub(crate) type Env<'ast> = im::HashMap<Name, Cell<'ast>>;

/// A lambda with the environment it was created in.
pub struct Function<'ast> {
    pub param: &'ast Name,
    pub body: &'ast Expr,
    pub(crate) env: Env<'ast>,
}

// The environment may reach this function again through a `let rec` cell.
impl fmt::Debug for Function<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("param", self.param)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub enum Value<'ast> {
    Int(i32),
    Bool(bool),
    Function(Rc<Function<'ast>>),
    Tuple(Rc<[Value<'ast>]>),
}

impl Value<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Function(_) => "function",
            Value::Tuple(_) => "tuple",
        }
    }
}

/// Functions compare by identity.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Function(function) => write!(f, "<function \\{}>", function.param),
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
