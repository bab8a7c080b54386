//! The instruction table.

use std::fmt;

/// Operand interpretation. Both encode as a 32-bit little-endian integer;
/// a label operand is patched to an absolute byte offset at link time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperandKind {
    Int,
    Label,
}

/// VM opcodes. The discriminant is the encoded byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    PushTrue = 0,
    PushFalse = 1,
    PushInt = 2,
    PushVar = 3,
    PushClosure = 4,
    PushTuple = 5,
    Add = 6,
    Sub = 7,
    Mul = 8,
    Div = 9,
    Eq = 10,
    Jmp = 11,
    JmpTrue = 12,
    SwapCall = 13,
    Enter = 14,
    Ret = 15,
    StoreVar = 16,
}

impl Opcode {
    /// Every opcode, in encoding order.
    pub const ALL: [Opcode; 17] = [
        Opcode::PushTrue,
        Opcode::PushFalse,
        Opcode::PushInt,
        Opcode::PushVar,
        Opcode::PushClosure,
        Opcode::PushTuple,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Eq,
        Opcode::Jmp,
        Opcode::JmpTrue,
        Opcode::SwapCall,
        Opcode::Enter,
        Opcode::Ret,
        Opcode::StoreVar,
    ];

    #[inline]
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Opcode::ALL.get(usize::from(byte)).copied()
    }

    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::PushTrue => "PUSH_TRUE",
            Opcode::PushFalse => "PUSH_FALSE",
            Opcode::PushInt => "PUSH_INT",
            Opcode::PushVar => "PUSH_VAR",
            Opcode::PushClosure => "PUSH_CLOSURE",
            Opcode::PushTuple => "PUSH_TUPLE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Eq => "EQ",
            Opcode::Jmp => "JMP",
            Opcode::JmpTrue => "JMP_TRUE",
            Opcode::SwapCall => "SWAP_CALL",
            Opcode::Enter => "ENTER",
            Opcode::Ret => "RET",
            Opcode::StoreVar => "STORE_VAR",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    pub fn operands(self) -> &'static [OperandKind] {
        use OperandKind::{Int, Label};
        match self {
            Opcode::PushInt | Opcode::PushTuple | Opcode::Enter | Opcode::StoreVar => &[Int],
            Opcode::PushVar => &[Int, Int],
            Opcode::PushClosure | Opcode::Jmp | Opcode::JmpTrue => &[Label],
            Opcode::PushTrue
            | Opcode::PushFalse
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Eq
            | Opcode::SwapCall
            | Opcode::Ret => &[],
        }
    }

    #[inline]
    pub fn arity(self) -> usize {
        self.operands().len()
    }

    /// Encoded size in bytes: the opcode plus four bytes per operand.
    #[inline]
    pub fn encoded_len(self) -> usize {
        1 + 4 * self.arity()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
