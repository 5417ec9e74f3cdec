//! Parsed representation of an assembly source text.

use slog::Logger;

use crate::assembler::{self, Assembly};
use crate::error::{AssemblyError, SourceError};
use crate::parser;

/// One non-blank, non-comment-only line of source.
///
/// A line carries a label, an instruction, or both; a label-only line does
/// not occupy an address slot of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine {
    /// 1-based line number in the original source.
    pub number: usize,
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    /// Operand tokens in source order. Composite `offset(base)` operands
    /// are kept as a single string.
    pub operands: Vec<String>,
}

/// An instruction line annotated with the address assigned by the first pass.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionEntry {
    /// 1-based line number in the original source.
    pub number: usize,
    /// Byte address of the instruction, in 4-byte increments starting at 0.
    pub address: u32,
    pub mnemonic: String,
    pub operands: Vec<String>,
}

/// A parsed program: the ordered line stream handed to the assembler.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub lines: Vec<SourceLine>,
    /// Lines the front end could not tokenize. These are reported alongside
    /// encoding errors and do not abort parsing.
    pub errors: Vec<SourceError>,
}

impl Program {
    /// Parses an entire source text, in file order.
    ///
    /// Blank and comment-only lines are skipped. A line that fails to
    /// tokenize is recorded in [Program::errors] and parsing continues with
    /// the next line.
    pub fn parse(source: &str) -> Program {
        let mut lines = Vec::new();
        let mut errors = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            match parser::parse_line(index + 1, raw) {
                Ok(Some(line)) => lines.push(line),
                Ok(None) => (),
                Err(kind) => errors.push(SourceError {
                    line: index + 1,
                    kind,
                }),
            }
        }

        Program { lines, errors }
    }

    /// Assembles the program into machine words.
    ///
    /// See [assembler::assemble] for the two-pass contract. Front-end errors
    /// collected during parsing are merged into the result, ordered by line.
    pub fn assemble(&self) -> Result<Assembly, AssemblyError> {
        self.assemble_with_logger(None)
    }

    /// Like [Program::assemble], but logs the assembly stages to `logger`.
    pub fn assemble_with_logger<L>(&self, logger: L) -> Result<Assembly, AssemblyError>
    where
        L: Into<Option<Logger>>,
    {
        let mut assembly = assembler::assemble_with_logger(&self.lines, logger)?;

        if !self.errors.is_empty() {
            assembly.errors.extend(self.errors.iter().cloned());
            assembly.errors.sort_by_key(|error| error.line);
        }

        Ok(assembly)
    }
}
