use std::cell::OnceCell;
use std::rc::Rc;

use stlc_ir::{BinaryOp, Expr, ExprKind, Span};
use stlc_stack::ensure_sufficient_stack;

use crate::value::{Cell, Env};
use crate::{EvalError, Function, Value};

/// Evaluate a closed expression.
#[tracing::instrument(level = "debug", skip_all)]
pub fn evaluate(expr: &Expr) -> Result<Value<'_>, EvalError> {
    eval(expr, &Env::default())
}

fn eval<'ast>(expr: &'ast Expr, env: &Env<'ast>) -> Result<Value<'ast>, EvalError> {
    ensure_sufficient_stack(|| eval_inner(expr, env))
}

fn eval_inner<'ast>(expr: &'ast Expr, env: &Env<'ast>) -> Result<Value<'ast>, EvalError> {
    match &expr.kind {
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::Int(n) => Ok(Value::Int(*n)),

        ExprKind::Var(name) => {
            let cell = env.get(name).ok_or_else(|| EvalError::UnboundVariable {
                name: name.clone(),
                span: expr.span,
            })?;
            cell.get().cloned().ok_or_else(|| EvalError::Uninitialised {
                name: name.clone(),
                span: expr.span,
            })
        }

        ExprKind::Lambda { param, body } => Ok(Value::Function(Rc::new(Function {
            param,
            body: body.as_ref(),
            env: env.clone(),
        }))),

        ExprKind::Apply { func, arg } => {
            let function = match eval(func, env)? {
                Value::Function(function) => function,
                other => return Err(wrong_kind("function", &other, func.span)),
            };
            let argument = eval(arg, env)?;
            let mut scope = function.env.clone();
            scope.insert(function.param.clone(), filled(argument));
            eval(function.body, &scope)
        }

        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => match eval(cond, env)? {
            Value::Bool(true) => eval(then_branch, env),
            Value::Bool(false) => eval(else_branch, env),
            other => Err(wrong_kind("Bool", &other, cond.span)),
        },

        ExprKind::Let { decls, body } => {
            let mut scope = env.clone();
            for decl in decls {
                let value = eval(&decl.expr, &scope)?;
                scope.insert(decl.name.clone(), filled(value));
            }
            eval(body, &scope)
        }

        // A recursive closure captures the scope holding its own cell, so
        // every let rec binding is an Rc cycle that outlives the run. The
        // cells stay strong: a recursive function can escape its let.
        ExprKind::LetRec { decls, body } => {
            let mut scope = env.clone();
            let cells: Vec<Cell<'ast>> = decls
                .iter()
                .map(|decl| {
                    let cell = Rc::new(OnceCell::new());
                    scope.insert(decl.name.clone(), Rc::clone(&cell));
                    cell
                })
                .collect();
            for (decl, cell) in decls.iter().zip(&cells) {
                let value = eval(&decl.expr, &scope)?;
                // Each cell is set exactly once, here.
                let _ = cell.set(value);
            }
            eval(body, &scope)
        }

        ExprKind::Tuple(elements) => {
            let values = elements
                .iter()
                .map(|element| eval(element, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Tuple(Rc::from(values)))
        }

        ExprKind::Binary { op, left, right } => {
            let a = int_operand(eval(left, env)?, left.span)?;
            let b = int_operand(eval(right, env)?, right.span)?;
            binary(*op, a, b, expr.span)
        }
    }
}

fn binary<'ast>(op: BinaryOp, a: i32, b: i32, span: Span) -> Result<Value<'ast>, EvalError> {
    Ok(match op {
        BinaryOp::Equals => Value::Bool(a == b),
        BinaryOp::Plus => Value::Int(a.wrapping_add(b)),
        BinaryOp::Minus => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Times => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Divide => {
            if b == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Value::Int(a.wrapping_div(b))
        }
    })
}

fn int_operand(value: Value<'_>, span: Span) -> Result<i32, EvalError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(wrong_kind("Int", &other, span)),
    }
}

fn filled(value: Value<'_>) -> Cell<'_> {
    Rc::new(OnceCell::from(value))
}

fn wrong_kind(expected: &'static str, found: &Value<'_>, span: Span) -> EvalError {
    EvalError::WrongKind {
        expected,
        found: found.kind_name(),
        span,
    }
}

#[cfg(test)]
mod tests;
