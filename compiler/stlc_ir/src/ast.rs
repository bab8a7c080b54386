//! Syntax tree.
//!
//! The node set is closed: application, conditional, lambda, `let`,
//! `let rec`, boolean/integer/tuple literals, binary operators and variable
//! references. Every node carries the [`Span`] of its full source extent.

use std::fmt;

use crate::{Name, Span};

/// Binary operators. All operate on `Int`; `Equals` yields `Bool`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Equals,
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Equals => "==",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `name = expr` binding of a `let` or `let rec`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Declaration {
    pub name: Name,
    pub expr: Expr,
}

impl Declaration {
    pub fn new(name: impl Into<Name>, expr: Expr) -> Self {
        Declaration {
            name: name.into(),
            expr,
        }
    }
}

/// An expression node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    /// `func arg`
    Apply { func: Box<Expr>, arg: Box<Expr> },
    /// `if (cond) then_branch else else_branch`
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `\param -> body`
    Lambda { param: Name, body: Box<Expr> },
    /// Sequential, non-recursive bindings.
    Let {
        decls: Vec<Declaration>,
        body: Box<Expr>,
    },
    /// Mutually recursive bindings.
    LetRec {
        decls: Vec<Declaration>,
        body: Box<Expr>,
    },
    Bool(bool),
    Int(i32),
    Tuple(Vec<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Var(Name),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn apply(func: Expr, arg: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::Apply {
                func: Box::new(func),
                arg: Box::new(arg),
            },
            span,
        )
    }

    pub fn if_(cond: Expr, then_branch: Expr, else_branch: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        )
    }

    pub fn lambda(param: impl Into<Name>, body: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::Lambda {
                param: param.into(),
                body: Box::new(body),
            },
            span,
        )
    }

    pub fn let_(decls: Vec<Declaration>, body: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::Let {
                decls,
                body: Box::new(body),
            },
            span,
        )
    }

    pub fn let_rec(decls: Vec<Declaration>, body: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::LetRec {
                decls,
                body: Box::new(body),
            },
            span,
        )
    }

    pub fn bool(value: bool, span: Span) -> Self {
        Expr::new(ExprKind::Bool(value), span)
    }

    pub fn int(value: i32, span: Span) -> Self {
        Expr::new(ExprKind::Int(value), span)
    }

    pub fn tuple(elements: Vec<Expr>, span: Span) -> Self {
        Expr::new(ExprKind::Tuple(elements), span)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn var(name: impl Into<Name>, span: Span) -> Self {
        Expr::new(ExprKind::Var(name.into()), span)
    }
}

#[cfg(test)]
mod tests;
