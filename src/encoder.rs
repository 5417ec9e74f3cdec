//! Encoding instruction lines into 32-bit machine words.
//!
//! Each encoder is a pure function from operand tokens to a word; encoding
//! never mutates the symbol table and the same line always encodes to the
//! same word.

use crate::error::ErrorKind;
use crate::instruction::{Format, InstructionSpec, Mnemonic, Register};
use crate::symbol_table::SymbolTable;

/// Encodes one instruction line into its 32-bit word.
///
/// `address` is the byte address assigned to the line by the first pass and
/// `symbols` the completed symbol table; both are only consulted for branch
/// offsets.
pub fn encode(
    mnemonic: &str,
    operands: &[String],
    address: u32,
    symbols: &SymbolTable,
) -> Result<u32, ErrorKind> {
    let mnemonic = Mnemonic::parse(mnemonic)?;
    let spec = mnemonic.spec();

    match spec.format {
        Format::R => encode_r(mnemonic, &spec, operands),
        Format::I => encode_i(mnemonic, &spec, operands),
        Format::S => encode_s(mnemonic, &spec, operands),
        Format::B => encode_b(mnemonic, &spec, operands, address, symbols),
    }
}

fn expect_arity(mnemonic: Mnemonic, operands: &[String], expected: usize) -> Result<(), ErrorKind> {
    if operands.len() != expected {
        return Err(ErrorKind::OperandArity {
            mnemonic: mnemonic.name().to_string(),
            expected,
            found: operands.len(),
        });
    }

    Ok(())
}

/// `funct7 | rs2 | rs1 | funct3 | rd | opcode`, operands `rd, rs1, rs2`.
fn encode_r(
    mnemonic: Mnemonic,
    spec: &InstructionSpec,
    operands: &[String],
) -> Result<u32, ErrorKind> {
    expect_arity(mnemonic, operands, 3)?;

    let rd = Register::parse(&operands[0])?;
    let rs1 = Register::parse(&operands[1])?;
    let rs2 = Register::parse(&operands[2])?;

    Ok(spec.funct7.unwrap_or(0) << 25
        | rs2.number() << 20
        | rs1.number() << 15
        | spec.funct3 << 12
        | rd.number() << 7
        | spec.opcode)
}

/// `imm[11:0] | rs1 | funct3 | rd | opcode`.
///
/// `addi` takes `rd, rs1, imm`; `lw` takes `rd, offset(base)` where the
/// composite token supplies both `rs1` and the immediate. The immediate is
/// truncated to 12 bits, not range-checked.
fn encode_i(
    mnemonic: Mnemonic,
    spec: &InstructionSpec,
    operands: &[String],
) -> Result<u32, ErrorKind> {
    let (rd, rs1, immediate) = match mnemonic {
        Mnemonic::Lw => {
            expect_arity(mnemonic, operands, 2)?;

            let rd = Register::parse(&operands[0])?;
            let (offset, base) = parse_memory_operand(&operands[1])?;

            (rd, base, offset)
        }
        _ => {
            expect_arity(mnemonic, operands, 3)?;

            let rd = Register::parse(&operands[0])?;
            let rs1 = Register::parse(&operands[1])?;
            let immediate = parse_immediate(&operands[2])?;

            (rd, rs1, immediate)
        }
    };

    let immediate = (immediate as u32) & 0xFFF;

    Ok(immediate << 20
        | rs1.number() << 15
        | spec.funct3 << 12
        | rd.number() << 7
        | spec.opcode)
}

/// `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`, operands
/// `rs2, offset(base)`.
fn encode_s(
    mnemonic: Mnemonic,
    spec: &InstructionSpec,
    operands: &[String],
) -> Result<u32, ErrorKind> {
    expect_arity(mnemonic, operands, 2)?;

    let rs2 = Register::parse(&operands[0])?;
    let (offset, rs1) = parse_memory_operand(&operands[1])?;

    let immediate = (offset as u32) & 0xFFF;

    Ok((immediate >> 5) << 25
        | rs2.number() << 20
        | rs1.number() << 15
        | spec.funct3 << 12
        | (immediate & 0x1F) << 7
        | spec.opcode)
}

/// `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`,
/// operands `rs1, rs2, target`.
///
/// The target is a label resolved through the symbol table, or a literal
/// byte offset. The offset is masked to 13 bits; its low bit is always zero
/// here and never emitted.
fn encode_b(
    mnemonic: Mnemonic,
    spec: &InstructionSpec,
    operands: &[String],
    address: u32,
    symbols: &SymbolTable,
) -> Result<u32, ErrorKind> {
    expect_arity(mnemonic, operands, 3)?;

    let rs1 = Register::parse(&operands[0])?;
    let rs2 = Register::parse(&operands[1])?;

    let target = &operands[2];
    let offset = match parse_immediate(target) {
        Ok(literal) => literal,
        Err(_) => {
            let resolved = symbols
                .address_of(target)
                .ok_or_else(|| ErrorKind::UndefinedLabel {
                    label: target.to_string(),
                })?;

            resolved as i64 - address as i64
        }
    };

    let immediate = (offset as u32) & 0x1FFF;

    Ok((immediate >> 12) << 31
        | ((immediate >> 5) & 0x3F) << 25
        | rs2.number() << 20
        | rs1.number() << 15
        | spec.funct3 << 12
        | ((immediate >> 1) & 0xF) << 8
        | ((immediate >> 11) & 1) << 7
        | spec.opcode)
}

/// Parses an immediate token: an optional leading `-`, then decimal digits
/// or a `0x`-prefixed hexadecimal literal.
fn parse_immediate(token: &str) -> Result<i64, ErrorKind> {
    let invalid = || ErrorKind::ImmediateParse {
        token: token.to_string(),
    };

    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, token),
    };

    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        i64::from_str_radix(hex, 16).map_err(|_| invalid())?
    } else {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        digits.parse::<i64>().map_err(|_| invalid())?
    };

    Ok(sign * magnitude)
}

/// Parses a composite `offset(base)` token: a signed integer immediately
/// followed by `(`, a register of the form `x<digits>`, then `)`.
///
/// Shape mismatches are [ErrorKind::MalformedMemoryOperand]; a base register
/// of the right shape but out of range is [ErrorKind::InvalidRegister].
fn parse_memory_operand(token: &str) -> Result<(i64, Register), ErrorKind> {
    let malformed = || ErrorKind::MalformedMemoryOperand {
        token: token.to_string(),
    };

    let open = token.find('(').ok_or_else(malformed)?;

    if !token.ends_with(')') || open + 2 > token.len() {
        return Err(malformed());
    }

    let offset = parse_immediate(&token[..open]).map_err(|_| malformed())?;

    let base = &token[open + 1..token.len() - 1];
    let base_digits = base.strip_prefix('x').unwrap_or("");

    if base_digits.is_empty() || !base_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    Ok((offset, Register::parse(base)?))
}
