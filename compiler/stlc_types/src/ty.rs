//! Type terms.

use std::fmt;

use stlc_diagnostic::span_utils::describe_span;
use stlc_ir::{Name, Span};
use stlc_stack::ensure_sufficient_stack;

use crate::Subst;

/// A type term with an optional source location.
///
/// The location is diagnostic metadata only: equality ignores it, and so
/// does every algebraic operation except [`Type::at_location`].
#[derive(Clone, Debug)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Option<Span>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeKind {
    /// Type variable.
    Var(Name),
    /// Nullary constructor: `Int`, `Bool`, `Error`.
    Con(Name),
    Arrow(Box<Type>, Box<Type>),
    Tuple(Vec<Type>),
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Type {}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Type { kind, span: None }
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Type::new(TypeKind::Var(name.into()))
    }

    pub fn con(name: impl Into<Name>) -> Self {
        Type::new(TypeKind::Con(name.into()))
    }

    pub fn arrow(domain: Type, range: Type) -> Self {
        Type::new(TypeKind::Arrow(Box::new(domain), Box::new(range)))
    }

    pub fn tuple(elements: Vec<Type>) -> Self {
        Type::new(TypeKind::Tuple(elements))
    }

    pub fn int() -> Self {
        Type::con("Int")
    }

    pub fn bool() -> Self {
        Type::con("Bool")
    }

    /// Signature placeholder for an operator with no known type.
    pub fn error() -> Self {
        Type::con("Error")
    }

    /// The same term tagged with a different location.
    #[must_use]
    pub fn at_location(&self, span: Option<Span>) -> Type {
        Type {
            kind: self.kind.clone(),
            span,
        }
    }

    /// Name of the variable if this is a bare type variable.
    pub fn as_var(&self) -> Option<&Name> {
        match &self.kind {
            TypeKind::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Replace free variables with their bindings in `subst`.
    ///
    /// A variable is replaced by the bound type as stored, including that
    /// type's location. Compound nodes keep their own location.
    #[must_use]
    pub fn apply(&self, subst: &Subst) -> Type {
        if subst.is_empty() {
            return self.clone();
        }
        ensure_sufficient_stack(|| match &self.kind {
            TypeKind::Var(name) => match subst.get(name) {
                Some(ty) => ty.clone(),
                None => self.clone(),
            },
            TypeKind::Con(_) => self.clone(),
            TypeKind::Arrow(domain, range) => Type {
                kind: TypeKind::Arrow(Box::new(domain.apply(subst)), Box::new(range.apply(subst))),
                span: self.span,
            },
            TypeKind::Tuple(elements) => Type {
                kind: TypeKind::Tuple(elements.iter().map(|t| t.apply(subst)).collect()),
                span: self.span,
            },
        })
    }

    /// Free type variables in first-occurrence order, without duplicates.
    pub fn ftv(&self) -> Vec<Name> {
        let mut vars = Vec::new();
        self.collect_ftv(&mut vars);
        vars
    }

    pub(crate) fn collect_ftv(&self, vars: &mut Vec<Name>) {
        ensure_sufficient_stack(|| match &self.kind {
            TypeKind::Var(name) => {
                if !vars.contains(name) {
                    vars.push(name.clone());
                }
            }
            TypeKind::Con(_) => {}
            TypeKind::Arrow(domain, range) => {
                domain.collect_ftv(vars);
                range.collect_ftv(vars);
            }
            TypeKind::Tuple(elements) => {
                for element in elements {
                    element.collect_ftv(vars);
                }
            }
        });
    }

    /// Rename free variables in first-occurrence order to `a`..`z`, then
    /// `t0`, `t1`, ...
    #[must_use]
    pub fn normalize(&self) -> Type {
        let mut subst = Subst::new();
        for (index, name) in self.ftv().into_iter().enumerate() {
            subst.insert(name, Type::var(display_var_name(index)));
        }
        self.apply(&subst)
    }

    /// Render with the location appended as ` from <line:col>`, or as a byte
    /// range when no source text is available.
    pub fn pretty_print(&self, source: Option<&str>) -> String {
        match (self.span, source) {
            (None, _) => self.to_string(),
            (Some(span), Some(source)) => format!("{self} from {}", describe_span(source, span)),
            (Some(span), None) => format!("{self} from {span}"),
        }
    }
}

fn display_var_name(index: usize) -> String {
    const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
    match LETTERS.get(index) {
        Some(letter) => char::from(*letter).to_string(),
        None => format!("t{}", index - LETTERS.len()),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Var(name) | TypeKind::Con(name) => write!(f, "{name}"),
            TypeKind::Arrow(domain, range) => {
                if matches!(domain.kind, TypeKind::Arrow(..)) {
                    write!(f, "({domain}) -> {range}")
                } else {
                    write!(f, "{domain} -> {range}")
                }
            }
            TypeKind::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" * ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}
