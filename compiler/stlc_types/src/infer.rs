//! Constraint generation.
//!
//! One [`Inference`] owns the constraint list and the fresh variable pump
//! for a whole top-level run. `let` and `let rec` solve the constraints
//! gathered so far in order to generalise their bindings; everything else
//! only adds constraints.

use stlc_ir::{BinaryOp, Declaration, Expr, ExprKind};
use stlc_stack::ensure_sufficient_stack;

use crate::{Constraints, Pump, Scheme, Type, TypeEnv, TypeError};

/// Constraints gathered for an expression together with its unsolved type.
#[derive(Clone, Debug)]
pub struct InferResult {
    pub constraints: Constraints,
    pub ty: Type,
}

/// Infer the type of `expr` under `env` without solving the final
/// constraints.
#[tracing::instrument(level = "debug", skip_all)]
pub fn infer(env: &TypeEnv, expr: &Expr) -> Result<InferResult, TypeError> {
    let mut inference = Inference::default();
    let ty = inference.infer(env, expr)?;
    tracing::debug!(
        constraints = inference.constraints.len(),
        vars = inference.pump.issued(),
        "inferred"
    );
    Ok(InferResult {
        constraints: inference.constraints,
        ty,
    })
}

/// Infer, solve and apply: the principal type of `expr`.
pub fn infer_type(env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
    let InferResult { constraints, ty } = infer(env, expr)?;
    let subst = constraints.solve()?;
    Ok(ty.apply(&subst))
}

/// `Int -> Int -> Int` for arithmetic, `Int -> Int -> Bool` for `==`.
pub fn operator_signature(op: BinaryOp) -> Type {
    let result = match op {
        BinaryOp::Equals => Type::bool(),
        BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide => Type::int(),
    };
    Type::arrow(Type::int(), Type::arrow(Type::int(), result))
}

#[derive(Default)]
struct Inference {
    constraints: Constraints,
    pump: Pump,
}

impl Inference {
    fn infer(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
        ensure_sufficient_stack(|| self.infer_inner(env, expr))
    }

    fn infer_inner(&mut self, env: &TypeEnv, expr: &Expr) -> Result<Type, TypeError> {
        let span = Some(expr.span);
        match &expr.kind {
            ExprKind::Apply { func, arg } => {
                let func_ty = self.infer(env, func)?;
                let arg_ty = self.infer(env, arg)?;
                let result = self.pump.next();
                self.constraints
                    .add(func_ty, Type::arrow(arg_ty, result.clone()));
                Ok(result)
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_ty = self.infer(env, cond)?;
                let then_ty = self.infer(env, then_branch)?;
                let else_ty = self.infer(env, else_branch)?;
                self.constraints.add(cond_ty, Type::bool());
                self.constraints.add(then_ty.clone(), else_ty);
                Ok(then_ty)
            }

            ExprKind::Lambda { param, body } => {
                let param_ty = self.pump.next();
                let scope = env.extend(param.clone(), Scheme::mono(param_ty.clone()));
                let body_ty = self.infer(&scope, body)?;
                Ok(Type::arrow(param_ty, body_ty))
            }

            ExprKind::Let { decls, body } => {
                let scope = self.infer_let(env, decls)?;
                self.infer(&scope, body)
            }

            ExprKind::LetRec { decls, body } => {
                let scope = self.infer_let_rec(env, decls)?;
                self.infer(&scope, body)
            }

            ExprKind::Bool(_) => Ok(Type::bool().at_location(span)),

            ExprKind::Int(_) => Ok(Type::int().at_location(span)),

            ExprKind::Tuple(elements) => {
                let types = elements
                    .iter()
                    .map(|element| self.infer(env, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Type::tuple(types))
            }

            ExprKind::Binary { op, left, right } => {
                let left_ty = self.infer(env, left)?;
                let right_ty = self.infer(env, right)?;
                let result = self.pump.next().at_location(span);

                let usage =
                    Type::arrow(left_ty, Type::arrow(right_ty, result.clone())).at_location(span);
                self.constraints
                    .add(usage, operator_signature(*op).at_location(span));
                Ok(result)
            }

            ExprKind::Var(name) => match env.get(name) {
                Some(scheme) => Ok(scheme.instantiate(&mut self.pump).at_location(span)),
                None => Err(TypeError::UnknownName {
                    name: name.clone(),
                    span: expr.span,
                }),
            },
        }
    }

    /// Declarations left to right, each solved and generalised before the
    /// next one is inferred.
    fn infer_let(&mut self, env: &TypeEnv, decls: &[Declaration]) -> Result<TypeEnv, TypeError> {
        let mut scope = env.clone();
        for decl in decls {
            let ty = self.infer(&scope, &decl.expr)?;
            let subst = self.constraints.solve()?;
            scope = scope.apply(&subst);
            let scheme = scope.generalise(&ty.apply(&subst));
            tracing::trace!(name = %decl.name, %scheme, "let binding");
            scope = scope.extend(decl.name.clone(), scheme);
        }
        Ok(scope)
    }

    /// All declarations typed together as the fixpoint of
    /// `\_ -> (e1, ..., en)`.
    ///
    /// Each name is bound monomorphically to a fresh variable while the
    /// bodies are inferred. The synthetic lambda's type `p -> (t1 * ... * tn)`
    /// is constrained against `f -> f`, then `f` against the tuple of the
    /// names' variables. After solving, each name is generalised against the
    /// outer environment.
    fn infer_let_rec(
        &mut self,
        env: &TypeEnv,
        decls: &[Declaration],
    ) -> Result<TypeEnv, TypeError> {
        let vars = self.pump.next_n(decls.len());
        let interim = decls.iter().zip(&vars).fold(env.clone(), |scope, (decl, var)| {
            scope.extend(decl.name.clone(), Scheme::mono(var.clone()))
        });

        let param = self.pump.next();
        let bodies = decls
            .iter()
            .map(|decl| self.infer(&interim, &decl.expr))
            .collect::<Result<Vec<_>, _>>()?;
        let lambda = Type::arrow(param, Type::tuple(bodies));

        let fixed = self.pump.next();
        self.constraints
            .add(Type::arrow(fixed.clone(), fixed.clone()), lambda);
        self.constraints.add(fixed, Type::tuple(vars.clone()));

        let subst = self.constraints.solve()?;
        let solved = env.apply(&subst);
        let mut scope = solved.clone();
        for (decl, var) in decls.iter().zip(&vars) {
            let scheme = solved.generalise(&var.apply(&subst));
            tracing::trace!(name = %decl.name, %scheme, "let rec binding");
            scope = scope.extend(decl.name.clone(), scheme);
        }
        Ok(scope)
    }
}
