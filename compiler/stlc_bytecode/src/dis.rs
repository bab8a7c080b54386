//! Decoding and listing of byte streams.

use std::fmt;

use smallvec::SmallVec;

use crate::{DecodeError, Opcode};

/// One decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode.
    pub offset: usize,
    pub opcode: Opcode,
    pub operands: SmallVec<[i32; 2]>,
}

impl Instruction {
    /// Offset of the instruction that follows this one.
    pub fn next_offset(&self) -> usize {
        self.offset + self.opcode.encoded_len()
    }

    /// `MNEMONIC op1 op2`, the form the assembler reads.
    pub fn to_asm(&self) -> String {
        let mut text = self.opcode.mnemonic().to_string();
        for operand in &self.operands {
            text.push(' ');
            text.push_str(&operand.to_string());
        }
        text
    }
}

/// `offset: MNEMONIC op1 op2`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.offset, self.to_asm())
    }
}

/// Little-endian `i32` at `offset`, if four bytes are available.
#[inline]
pub fn read_operand(bytes: &[u8], offset: usize) -> Option<i32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(i32::from_le_bytes(raw))
}

/// Decode the instruction starting at `offset`.
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<Instruction, DecodeError> {
    let byte = *bytes.get(offset).ok_or(DecodeError::OffsetOutOfRange {
        offset,
        len: bytes.len(),
    })?;
    let opcode = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode { offset, byte })?;

    let mut operands = SmallVec::new();
    for index in 0..opcode.arity() {
        let at = offset + 1 + 4 * index;
        let value =
            read_operand(bytes, at).ok_or(DecodeError::TruncatedOperand { offset, opcode })?;
        operands.push(value);
    }

    Ok(Instruction {
        offset,
        opcode,
        operands,
    })
}

/// Decode a whole stream, front to back.
pub fn disassemble(bytes: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let instruction = decode_at(bytes, offset)?;
        offset = instruction.next_offset();
        instructions.push(instruction);
    }
    Ok(instructions)
}

/// One `offset: MNEMONIC operands` line per instruction.
pub fn listing(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut text = String::new();
    for instruction in disassemble(bytes)? {
        text.push_str(&instruction.to_string());
        text.push('\n');
    }
    Ok(text)
}
