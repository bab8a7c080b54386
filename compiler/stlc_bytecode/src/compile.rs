//! Syntax tree to bytecode.
//!
//! Variables are addressed by `(depth, offset)`: `depth` counts function
//! activations between the use and the binding, `offset` is the slot in
//! that activation. Every lambda becomes its own block that starts with
//! `ENTER n; STORE_VAR 0`, where `n` is one slot for the parameter plus one
//! for each `let`/`let rec` binding evaluated in that activation. The
//! top-level block gets `ENTER` sized the same way, without the parameter.

use stlc_ir::{BinaryOp, Declaration, Expr, ExprKind, Name};
use stlc_stack::ensure_sufficient_stack;

use crate::{BlockId, Builder, CompileError, Opcode};

/// Compile `expr` into a linked byte stream whose entry point is offset 0.
pub fn compile(expr: &Expr) -> Result<Vec<u8>, CompileError> {
    Ok(compile_to_builder(expr)?.build()?)
}

/// Compile `expr` into unlinked blocks; the first block is the entry.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile_to_builder(expr: &Expr) -> Result<Builder, CompileError> {
    let mut compiler = Compiler::default();
    let label = compiler.next_label();
    let entry = compiler.builder.create_block(label);

    let slots = enter_size(expr);
    let block = compiler.builder.block(entry);
    block.write_opcode(Opcode::Enter);
    block.write_int(slots);

    let mut frame = Frame::default();
    compiler.compile_expr(entry, expr, &Environment::default(), &mut frame)?;
    compiler.builder.block(entry).write_opcode(Opcode::Ret);
    debug_assert_eq!(frame.next_offset, slots, "top-level slot count");

    Ok(compiler.builder)
}

/// Slots an activation needs for the bindings evaluated in it.
///
/// Counts every `let`/`let rec` declaration reached without crossing a
/// lambda, including those nested inside declarations, operands and
/// tuple elements. Lambda bodies run in their own activation.
pub fn enter_size(expr: &Expr) -> i32 {
    ensure_sufficient_stack(|| match &expr.kind {
        ExprKind::Apply { func, arg } => enter_size(func) + enter_size(arg),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => enter_size(cond) + enter_size(then_branch) + enter_size(else_branch),
        ExprKind::Lambda { .. } | ExprKind::Bool(_) | ExprKind::Int(_) | ExprKind::Var(_) => 0,
        ExprKind::Let { decls, body } | ExprKind::LetRec { decls, body } => {
            declarations_size(decls) + enter_size(body)
        }
        ExprKind::Tuple(elements) => elements.iter().map(enter_size).sum(),
        ExprKind::Binary { left, right, .. } => enter_size(left) + enter_size(right),
    })
}

fn declarations_size(decls: &[Declaration]) -> i32 {
    let own = i32::try_from(decls.len()).unwrap_or(i32::MAX);
    decls
        .iter()
        .map(|decl| enter_size(&decl.expr))
        .fold(own, i32::saturating_add)
}

/// Where a name lives.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Binding {
    depth: i32,
    offset: i32,
}

/// Compile-time scope: names in view and the current activation depth.
#[derive(Clone, Debug, Default)]
struct Environment {
    variables: im::HashMap<Name, Binding>,
    depth: i32,
}

impl Environment {
    /// Scope for a lambda body: one activation deeper.
    fn open_scope(&self) -> Environment {
        Environment {
            variables: self.variables.clone(),
            depth: self.depth + 1,
        }
    }

    fn bind(&self, name: Name, offset: i32) -> Environment {
        Environment {
            variables: self.variables.update(
                name,
                Binding {
                    depth: self.depth,
                    offset,
                },
            ),
            depth: self.depth,
        }
    }
}

/// Slot allocator for one activation. Bindings never share a slot, so a
/// closure that captured the activation keeps seeing its own values.
#[derive(Default)]
struct Frame {
    next_offset: i32,
}

impl Frame {
    fn with_parameter() -> Self {
        Frame { next_offset: 1 }
    }

    fn allocate(&mut self) -> i32 {
        let offset = self.next_offset;
        self.next_offset += 1;
        offset
    }
}

#[derive(Default)]
struct Compiler {
    builder: Builder,
    labels: u32,
}

impl Compiler {
    /// `L0`, `L1`, ... shared by block names and branch labels.
    fn next_label(&mut self) -> String {
        let label = format!("L{}", self.labels);
        self.labels += 1;
        label
    }

    fn emit(&mut self, block: BlockId, opcode: Opcode) {
        self.builder.block(block).write_opcode(opcode);
    }

    fn emit_int(&mut self, block: BlockId, opcode: Opcode, operand: i32) {
        let code = self.builder.block(block);
        code.write_opcode(opcode);
        code.write_int(operand);
    }

    fn emit_label(&mut self, block: BlockId, opcode: Opcode, label: &str) {
        let code = self.builder.block(block);
        code.write_opcode(opcode);
        code.write_label(label);
    }

    fn compile_expr(
        &mut self,
        block: BlockId,
        expr: &Expr,
        env: &Environment,
        frame: &mut Frame,
    ) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| self.compile_expr_inner(block, expr, env, frame))
    }

    fn compile_expr_inner(
        &mut self,
        block: BlockId,
        expr: &Expr,
        env: &Environment,
        frame: &mut Frame,
    ) -> Result<(), CompileError> {
        match &expr.kind {
            ExprKind::Apply { func, arg } => {
                self.compile_expr(block, func, env, frame)?;
                self.compile_expr(block, arg, env, frame)?;
                self.emit(block, Opcode::SwapCall);
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let then_label = self.next_label();
                let next_label = self.next_label();

                self.compile_expr(block, cond, env, frame)?;
                self.emit_label(block, Opcode::JmpTrue, &then_label);

                self.compile_expr(block, else_branch, env, frame)?;
                self.emit_label(block, Opcode::Jmp, &next_label);

                self.builder.block(block).mark_label(then_label)?;
                self.compile_expr(block, then_branch, env, frame)?;
                self.builder.block(block).mark_label(next_label)?;
            }

            ExprKind::Lambda { param, body } => {
                let label = self.compile_lambda(param, body, env)?;
                self.emit_label(block, Opcode::PushClosure, &label);
            }

            ExprKind::Let { decls, body } => {
                let mut scope = env.clone();
                for decl in decls {
                    self.compile_expr(block, &decl.expr, &scope, frame)?;
                    let offset = frame.allocate();
                    scope = scope.bind(decl.name.clone(), offset);
                    self.emit_int(block, Opcode::StoreVar, offset);
                }
                self.compile_expr(block, body, &scope, frame)?;
            }

            ExprKind::LetRec { decls, body } => {
                let mut scope = env.clone();
                let mut offsets = Vec::with_capacity(decls.len());
                for decl in decls {
                    let offset = frame.allocate();
                    scope = scope.bind(decl.name.clone(), offset);
                    offsets.push(offset);
                }
                for (decl, offset) in decls.iter().zip(offsets) {
                    self.compile_expr(block, &decl.expr, &scope, frame)?;
                    self.emit_int(block, Opcode::StoreVar, offset);
                }
                self.compile_expr(block, body, &scope, frame)?;
            }

            ExprKind::Bool(true) => self.emit(block, Opcode::PushTrue),
            ExprKind::Bool(false) => self.emit(block, Opcode::PushFalse),

            ExprKind::Int(value) => self.emit_int(block, Opcode::PushInt, *value),

            ExprKind::Tuple(elements) => {
                for element in elements {
                    self.compile_expr(block, element, env, frame)?;
                }
                let arity = i32::try_from(elements.len()).unwrap_or(i32::MAX);
                self.emit_int(block, Opcode::PushTuple, arity);
            }

            ExprKind::Binary { op, left, right } => {
                self.compile_expr(block, left, env, frame)?;
                self.compile_expr(block, right, env, frame)?;
                self.emit(block, binary_opcode(*op));
            }

            ExprKind::Var(name) => {
                let Some(binding) = env.variables.get(name) else {
                    return Err(CompileError::UnboundVariable {
                        name: name.clone(),
                        span: expr.span,
                    });
                };
                let code = self.builder.block(block);
                code.write_opcode(Opcode::PushVar);
                code.write_int(env.depth - binding.depth);
                code.write_int(binding.offset);
            }
        }
        Ok(())
    }

    /// Emit `\param -> body` as a new block and return its label.
    fn compile_lambda(
        &mut self,
        param: &Name,
        body: &Expr,
        env: &Environment,
    ) -> Result<String, CompileError> {
        let label = self.next_label();
        let block = self.builder.create_block(label.clone());
        let slots = 1 + enter_size(body);
        tracing::trace!(%label, %param, slots, "lambda block");

        self.emit_int(block, Opcode::Enter, slots);
        self.emit_int(block, Opcode::StoreVar, 0);

        let scope = env.open_scope().bind(param.clone(), 0);
        let mut frame = Frame::with_parameter();
        self.compile_expr(block, body, &scope, &mut frame)?;
        self.emit(block, Opcode::Ret);
        debug_assert_eq!(frame.next_offset, slots, "lambda slot count");

        Ok(label)
    }
}

fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Plus => Opcode::Add,
        BinaryOp::Minus => Opcode::Sub,
        BinaryOp::Times => Opcode::Mul,
        BinaryOp::Divide => Opcode::Div,
        BinaryOp::Equals => Opcode::Eq,
    }
}
