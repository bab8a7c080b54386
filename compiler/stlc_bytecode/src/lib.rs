//! Bytecode for the stlc virtual machine.
//!
//! The format is a flat byte stream: one opcode byte followed by the
//! opcode's fixed number of 32-bit little-endian signed operands. There is
//! no header.
//!
//! - [`Opcode`]: the instruction table
//! - [`Builder`]: named blocks with symbolic labels, linked into one stream
//! - [`compile`]: syntax tree to bytecode with `(depth, offset)` addressing
//! - [`assemble`] / [`disassemble`]: text listings to bytes and back

mod asm;
mod builder;
mod compile;
mod dis;
mod error;
mod opcode;

pub use asm::assemble;
pub use builder::{BlockBuilder, BlockId, Builder};
pub use compile::{compile, compile_to_builder, enter_size};
pub use dis::{decode_at, disassemble, listing, read_operand, Instruction};
pub use error::{AsmError, CompileError, DecodeError, LinkError};
pub use opcode::{Opcode, OperandKind};
