//! Types for representing instructions and their parts.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use edit_distance::edit_distance;
use lazy_static::lazy_static;

use crate::error::ErrorKind;

/// Instruction formats of the supported RV32I subset.
///
/// The format determines both the operand arity of the textual form and the
/// bit layout of the encoded word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register arithmetic. (`sub`, `xor`, `srl`)
    R,

    /// Register-immediate arithmetic and loads. (`addi`, `lw`)
    I,

    /// Stores. (`sw`)
    S,

    /// Conditional branches. (`beq`)
    B,
}

/// The fixed encoding parameters of a single mnemonic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InstructionSpec {
    pub opcode: u32,
    pub funct3: u32,
    /// Only present for [R-format](Format::R) instructions.
    pub funct7: Option<u32>,
    pub format: Format,
}

/// Instructions of the supported RV32I subset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// Load a word from memory. (`lw rd, offset(base)`)
    Lw,

    /// Store a word to memory. (`sw rs2, offset(base)`)
    Sw,

    /// Subtract two registers. (`sub rd, rs1, rs2`)
    Sub,

    /// Exclusive or of two registers. (`xor rd, rs1, rs2`)
    Xor,

    /// Add an immediate to a register. (`addi rd, rs1, imm`)
    Addi,

    /// Logical shift right by a register amount. (`srl rd, rs1, rs2`)
    Srl,

    /// Branch if two registers are equal. (`beq rs1, rs2, target`)
    Beq,
}

lazy_static! {
    static ref MNEMONICS: HashMap<&'static str, Mnemonic> = {
        let mut table = HashMap::new();

        table.insert("lw", Mnemonic::Lw);
        table.insert("sw", Mnemonic::Sw);
        table.insert("sub", Mnemonic::Sub);
        table.insert("xor", Mnemonic::Xor);
        table.insert("addi", Mnemonic::Addi);
        table.insert("srl", Mnemonic::Srl);
        table.insert("beq", Mnemonic::Beq);

        table
    };
}

impl Mnemonic {
    /// Looks up a mnemonic by its textual name. Lookup is case-insensitive.
    ///
    /// On failure the returned [ErrorKind::UnknownMnemonic] carries the
    /// closest known mnemonic as a suggestion, if any is close enough.
    pub fn parse(name: &str) -> Result<Mnemonic, ErrorKind> {
        let normalized = name.to_lowercase();

        MNEMONICS.get(normalized.as_str()).copied().ok_or_else(|| {
            let suggestion = MNEMONICS
                .keys()
                .map(|known| (edit_distance(known, &normalized), *known))
                .min()
                .filter(|(distance, _)| *distance <= 2)
                .map(|(_, known)| known);

            ErrorKind::UnknownMnemonic {
                mnemonic: name.to_string(),
                suggestion,
            }
        })
    }

    /// The canonical lower-case name of the mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Lw => "lw",
            Mnemonic::Sw => "sw",
            Mnemonic::Sub => "sub",
            Mnemonic::Xor => "xor",
            Mnemonic::Addi => "addi",
            Mnemonic::Srl => "srl",
            Mnemonic::Beq => "beq",
        }
    }

    /// The encoding parameters of the mnemonic.
    pub fn spec(&self) -> InstructionSpec {
        match self {
            Mnemonic::Lw => InstructionSpec {
                opcode: 0b0000011,
                funct3: 0b010,
                funct7: None,
                format: Format::I,
            },
            Mnemonic::Sw => InstructionSpec {
                opcode: 0b0100011,
                funct3: 0b010,
                funct7: None,
                format: Format::S,
            },
            Mnemonic::Sub => InstructionSpec {
                opcode: 0b0110011,
                funct3: 0b000,
                funct7: Some(0b0100000),
                format: Format::R,
            },
            Mnemonic::Xor => InstructionSpec {
                opcode: 0b0110011,
                funct3: 0b100,
                funct7: Some(0b0000000),
                format: Format::R,
            },
            Mnemonic::Addi => InstructionSpec {
                opcode: 0b0010011,
                funct3: 0b000,
                funct7: None,
                format: Format::I,
            },
            Mnemonic::Srl => InstructionSpec {
                opcode: 0b0110011,
                funct3: 0b101,
                funct7: Some(0b0000000),
                format: Format::R,
            },
            Mnemonic::Beq => InstructionSpec {
                opcode: 0b1100011,
                funct3: 0b000,
                funct7: None,
                format: Format::B,
            },
        }
    }
}

impl FromStr for Mnemonic {
    type Err = ErrorKind;

    fn from_str(name: &str) -> Result<Mnemonic, Self::Err> {
        Mnemonic::parse(name)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the 32 general purpose registers, `x0`..`x31`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Register(u8);

impl Register {
    /// Parses a register token of the form `x<N>` with `0 <= N <= 31`.
    ///
    /// No sign and no leading `+` are accepted in the digits.
    pub fn parse(token: &str) -> Result<Register, ErrorKind> {
        let invalid = || ErrorKind::InvalidRegister {
            token: token.to_string(),
        };

        let digits = token.strip_prefix('x').ok_or_else(invalid)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let number: u8 = digits.parse().map_err(|_| invalid())?;

        if number > 31 {
            return Err(invalid());
        }

        Ok(Register(number))
    }

    /// The 5-bit register index.
    pub fn number(&self) -> u32 {
        self.0 as u32
    }
}

impl FromStr for Register {
    type Err = ErrorKind;

    fn from_str(token: &str) -> Result<Register, Self::Err> {
        Register::parse(token)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
