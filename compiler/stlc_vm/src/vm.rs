//! Instruction dispatch.

use std::io;
use std::rc::Rc;

use stlc_bytecode::{decode_at, DecodeError, Instruction, Opcode};

use crate::activation::{render, Activation, ActivationRef, LiveCount};
use crate::{Closure, Value, VmError};

/// Run `code` from `entry` until the top-level `RET`, returning the value
/// left on the stack.
pub fn execute(code: &[u8], entry: usize) -> Result<Value, VmError> {
    Vm::new(code, entry).run(None)
}

/// [`execute`], writing one line per instruction to `out` before it runs:
///
/// ```text
/// <ip>: <MNEMONIC> [operands]: [<stack>] <activation chain>
/// ```
pub fn execute_with_trace(
    code: &[u8],
    entry: usize,
    out: &mut dyn io::Write,
) -> Result<Value, VmError> {
    Vm::new(code, entry).run(Some(out))
}

struct Vm<'code> {
    code: &'code [u8],
    ip: usize,
    stack: Vec<Value>,
    current: ActivationRef,
    live: LiveCount,
    /// Most activations alive at once during the run.
    peak: usize,
}

impl<'code> Vm<'code> {
    fn new(code: &'code [u8], entry: usize) -> Self {
        let live = LiveCount::default();
        Vm {
            code,
            ip: entry,
            stack: Vec::new(),
            current: Activation::root(&live),
            peak: live.get(),
            live,
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(entry = self.ip, len = self.code.len()))]
    fn run(&mut self, mut trace: Option<&mut dyn io::Write>) -> Result<Value, VmError> {
        let mut steps: u64 = 0;
        loop {
            let instruction = self.fetch()?;
            if let Some(out) = trace.as_deref_mut() {
                writeln!(out, "{}", self.trace_line(&instruction))
                    .map_err(|err| VmError::Trace(err.to_string()))?;
            }
            self.ip = instruction.next_offset();
            steps += 1;

            if let Some(result) = self.step(&instruction)? {
                tracing::debug!(steps, peak_activations = self.peak, "halt");
                return Ok(result);
            }
        }
    }

    fn fetch(&self) -> Result<Instruction, VmError> {
        decode_at(self.code, self.ip).map_err(|err| match err {
            DecodeError::OffsetOutOfRange { offset, len } => VmError::IpOutOfRange { ip: offset, len },
            DecodeError::UnknownOpcode { offset, byte } => VmError::UnknownOpcode { ip: offset, byte },
            DecodeError::TruncatedOperand { offset, opcode } => {
                VmError::TruncatedOperand { ip: offset, opcode }
            }
        })
    }

    fn trace_line(&self, instruction: &Instruction) -> String {
        let stack: Vec<String> = self.stack.iter().map(ToString::to_string).collect();
        format!(
            "{}: [{}] {}",
            instruction,
            stack.join(", "),
            render(&self.current)
        )
    }

    /// Execute one instruction; `Some` is the program result.
    fn step(&mut self, instruction: &Instruction) -> Result<Option<Value>, VmError> {
        let at = instruction.offset;
        let opcode = instruction.opcode;
        let operand = |index: usize| instruction.operands.get(index).copied().unwrap_or_default();

        match opcode {
            Opcode::PushTrue => self.stack.push(Value::Bool(true)),
            Opcode::PushFalse => self.stack.push(Value::Bool(false)),
            Opcode::PushInt => self.stack.push(Value::Int(operand(0))),

            Opcode::PushVar => {
                let value = self.load(at, operand(0), operand(1))?;
                self.stack.push(value);
            }

            Opcode::PushClosure => {
                let entry = self.target(instruction, operand(0))?;
                self.stack.push(Value::Closure(Closure {
                    entry,
                    env: Rc::clone(&self.current),
                }));
            }

            Opcode::PushTuple => {
                let count = usize::try_from(operand(0)).map_err(|_| VmError::InvalidOperand {
                    ip: at,
                    opcode,
                    value: operand(0),
                })?;
                if count > self.stack.len() {
                    return Err(VmError::StackUnderflow { ip: at, opcode });
                }
                let elements = self.stack.split_off(self.stack.len() - count);
                self.stack.push(Value::Tuple(Rc::from(elements)));
            }

            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Eq => {
                let right = self.pop_int(instruction)?;
                let left = self.pop_int(instruction)?;
                let result = match opcode {
                    Opcode::Add => Value::Int(left.wrapping_add(right)),
                    Opcode::Sub => Value::Int(left.wrapping_sub(right)),
                    Opcode::Mul => Value::Int(left.wrapping_mul(right)),
                    Opcode::Div => {
                        if right == 0 {
                            return Err(VmError::DivisionByZero { ip: at });
                        }
                        Value::Int(left.wrapping_div(right))
                    }
                    _ => Value::Bool(left == right),
                };
                self.stack.push(result);
            }

            Opcode::Jmp => self.ip = self.target(instruction, operand(0))?,

            Opcode::JmpTrue => {
                let target = self.target(instruction, operand(0))?;
                match self.pop(instruction)? {
                    Value::Bool(true) => self.ip = target,
                    Value::Bool(false) => {}
                    other => return Err(wrong_kind(instruction, "Bool", &other)),
                }
            }

            Opcode::SwapCall => {
                let argument = self.pop(instruction)?;
                let closure = match self.pop(instruction)? {
                    Value::Closure(closure) => closure,
                    other => return Err(wrong_kind(instruction, "closure", &other)),
                };
                let entry = closure.entry;
                self.current = Activation::call(
                    &self.live,
                    Some(Rc::clone(&self.current)),
                    Some(closure),
                    Some(self.ip),
                );
                self.peak = self.peak.max(self.live.get());
                self.stack.push(argument);
                self.ip = entry;
            }

            Opcode::Enter => {
                let size = usize::try_from(operand(0)).map_err(|_| VmError::InvalidOperand {
                    ip: at,
                    opcode,
                    value: operand(0),
                })?;
                let mut activation = self.current.borrow_mut();
                if activation.slots.is_some() {
                    return Err(VmError::DoubleEnter { ip: at });
                }
                activation.slots = Some(vec![None; size]);
            }

            Opcode::Ret => {
                let (return_ip, parent) = {
                    let activation = self.current.borrow();
                    (activation.return_ip, activation.parent.clone())
                };
                match (return_ip, parent) {
                    (Some(return_ip), Some(parent)) => {
                        self.ip = return_ip;
                        self.current = parent;
                    }
                    _ => return self.pop(instruction).map(Some),
                }
            }

            Opcode::StoreVar => {
                let value = self.pop(instruction)?;
                let slot = operand(0);
                let mut activation = self.current.borrow_mut();
                let slots = activation
                    .slots
                    .as_mut()
                    .ok_or(VmError::NoSlots { ip: at, opcode })?;
                let size = slots.len();
                let cell = usize::try_from(slot)
                    .ok()
                    .and_then(|index| slots.get_mut(index))
                    .ok_or(VmError::SlotOutOfRange {
                        ip: at,
                        opcode,
                        slot,
                        size,
                    })?;
                *cell = Some(value);
            }
        }
        Ok(None)
    }

    /// Read slot `offset` of the activation `depth` lexical links up.
    fn load(&self, at: usize, depth: i32, offset: i32) -> Result<Value, VmError> {
        let opcode = Opcode::PushVar;
        let steps = usize::try_from(depth).map_err(|_| VmError::InvalidOperand {
            ip: at,
            opcode,
            value: depth,
        })?;

        let mut scope = Rc::clone(&self.current);
        for _ in 0..steps {
            let env = scope
                .borrow()
                .closure
                .as_ref()
                .map(|closure| Rc::clone(&closure.env))
                .ok_or(VmError::ScopeUnderflow { ip: at, depth })?;
            scope = env;
        }

        let activation = scope.borrow();
        let slots = activation
            .slots
            .as_ref()
            .ok_or(VmError::NoSlots { ip: at, opcode })?;
        let index = usize::try_from(offset)
            .ok()
            .filter(|index| *index < slots.len())
            .ok_or(VmError::SlotOutOfRange {
                ip: at,
                opcode,
                slot: offset,
                size: slots.len(),
            })?;
        slots[index]
            .clone()
            .ok_or(VmError::UnsetSlot { ip: at, slot: index })
    }

    /// A label operand as an offset; range is checked at the next fetch.
    fn target(&self, instruction: &Instruction, value: i32) -> Result<usize, VmError> {
        usize::try_from(value).map_err(|_| VmError::InvalidOperand {
            ip: instruction.offset,
            opcode: instruction.opcode,
            value,
        })
    }

    fn pop(&mut self, instruction: &Instruction) -> Result<Value, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow {
            ip: instruction.offset,
            opcode: instruction.opcode,
        })
    }

    fn pop_int(&mut self, instruction: &Instruction) -> Result<i32, VmError> {
        match self.pop(instruction)? {
            Value::Int(n) => Ok(n),
            other => Err(wrong_kind(instruction, "Int", &other)),
        }
    }
}

fn wrong_kind(instruction: &Instruction, expected: &'static str, found: &Value) -> VmError {
    VmError::WrongKind {
        ip: instruction.offset,
        opcode: instruction.opcode,
        expected,
        found: found.kind_name(),
    }
}

#[cfg(test)]
mod tests;
