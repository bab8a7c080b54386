//! Text listings to bytecode.
//!
//! ```text
//! # comment
//! :loop
//! PUSH_INT 10
//! JMP loop
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. `:name` marks a
//! label at the current offset. Any other line is a mnemonic followed by
//! its operands separated by whitespace; an operand is either an integer
//! or the name of a label.

use crate::{AsmError, BlockBuilder, Builder, Opcode};

pub fn assemble(text: &str) -> Result<Vec<u8>, AsmError> {
    // Not a valid label name, so no label can resolve to the block itself.
    let mut code = BlockBuilder::new("<asm>");
    let mut references: Vec<(usize, String)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(label) = trimmed.strip_prefix(':') {
            let label = label.trim();
            if !is_label_name(label) {
                return Err(AsmError::InvalidLabel {
                    line,
                    label: label.to_string(),
                });
            }
            code.mark_label(label).map_err(|_| AsmError::DuplicateLabel {
                line,
                label: label.to_string(),
            })?;
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let mnemonic = words.next().unwrap_or_default();
        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
            line,
            mnemonic: mnemonic.to_string(),
        })?;
        let operands: Vec<&str> = words.collect();
        if operands.len() != opcode.arity() {
            return Err(AsmError::OperandCount {
                line,
                mnemonic: opcode,
                expected: opcode.arity(),
                found: operands.len(),
            });
        }

        code.write_opcode(opcode);
        for operand in operands {
            if let Ok(value) = operand.parse::<i32>() {
                code.write_int(value);
            } else if is_label_name(operand) {
                references.push((line, operand.to_string()));
                code.write_label(operand);
            } else {
                return Err(AsmError::InvalidOperand {
                    line,
                    operand: operand.to_string(),
                });
            }
        }
    }

    if let Some((line, label)) = references
        .into_iter()
        .find(|(_, label)| !code.has_label(label))
    {
        return Err(AsmError::UnknownLabel { line, label });
    }

    let mut builder = Builder::new();
    builder.add_block(code);
    Ok(builder.build()?)
}

fn is_label_name(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
