//! 6502 opcode encoder.
//!
//! Supported forms:
//!
//! | Mnemonic | Bytes |
//! |---|---|
//! | `LDA #imm` | `A9 imm` |
//! | `STA zp` (< `$100`) | `85 zp` |
//! | `STA abs` | `8D lo hi` |
//!
//! Labels, blank lines and `;` comments produce nothing; so does any other
//! mnemonic (`JSR` included, since call targets are never resolved).
//! Operands are `$`-hex or decimal. Immediates wider than a byte are
//! truncated to their low byte.

use gv_diagnostic::{CompileError, ErrorCode};
use gv_ir::FinalProgram;
use thiserror::Error;

const LDA_IMMEDIATE: u8 = 0xA9;
const STA_ZERO_PAGE: u8 = 0x85;
const STA_ABSOLUTE: u8 = 0x8D;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("line {line}: unable to parse value '{operand}'")]
    InvalidImmediate { line: usize, operand: String },

    #[error("line {line}: unable to parse address '{operand}'")]
    InvalidAddress { line: usize, operand: String },
}

impl From<EncodeError> for CompileError {
    fn from(err: EncodeError) -> Self {
        CompileError::pipeline(ErrorCode::E2004, "Encoding failed", err.to_string())
    }
}

/// Encode assembly lines to machine code.
pub fn assemble(lines: &[String]) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::with_capacity(lines.len() * 2);
    for (index, line) in lines.iter().enumerate() {
        encode_line(line, index + 1, &mut bytes)?;
    }
    Ok(bytes)
}

/// `program` with its encoded bytes attached.
pub fn assemble_program(program: &FinalProgram) -> Result<FinalProgram, EncodeError> {
    Ok(program.with_bytes(assemble(&program.lines)?))
}

fn encode_line(line: &str, line_no: usize, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') || line.ends_with(':') {
        return Ok(());
    }

    if let Some(operand) = line.strip_prefix("LDA #") {
        let operand = operand.trim();
        let value = parse_number(operand).ok_or_else(|| EncodeError::InvalidImmediate {
            line: line_no,
            operand: operand.to_string(),
        })?;
        out.push(LDA_IMMEDIATE);
        out.push(value.to_le_bytes()[0]);
    } else if let Some(operand) = line.strip_prefix("STA ") {
        let operand = operand.trim();
        let address = parse_number(operand)
            .and_then(|v| u16::try_from(v).ok())
            .ok_or_else(|| EncodeError::InvalidAddress {
                line: line_no,
                operand: operand.to_string(),
            })?;
        let [lo, hi] = address.to_le_bytes();
        if hi == 0 {
            out.extend([STA_ZERO_PAGE, lo]);
        } else {
            out.extend([STA_ABSOLUTE, lo, hi]);
        }
    }
    Ok(())
}

/// `$`-prefixed hex or signed decimal.
fn parse_number(text: &str) -> Option<i64> {
    match text.strip_prefix('$') {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
