//! The two-pass assembly driver.

use itertools::Itertools;
use slog::{o, trace, Discard, Logger};

use crate::encoder;
use crate::error::{AssemblyError, SourceError};
use crate::program::SourceLine;
use crate::symbol_table::{build_symbols, SymbolTable};

/// The result of assembling a line stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// One 32-bit word per instruction line that encoded successfully, in
    /// source order.
    pub words: Vec<u32>,

    /// Per-line failures, in line order. A failed line produces no word but
    /// does not disturb the addresses of the lines around it.
    pub errors: Vec<SourceError>,

    /// The completed symbol table from the first pass.
    pub symbols: SymbolTable,
}

impl Assembly {
    /// Whether every instruction line produced a word.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The words as newline-joined 32-bit binary strings, the format the
    /// report writer persists.
    pub fn to_bitstrings(&self) -> String {
        self.words.iter().map(|word| format!("{:032b}", word)).join("\n")
    }

    /// The words as newline-joined 8-digit hexadecimal strings.
    pub fn to_hexstrings(&self) -> String {
        self.words.iter().map(|word| format!("{:08x}", word)).join("\n")
    }
}

/// Assembles an ordered line stream into machine words.
///
/// The first pass binds every label before any encoding happens, which is
/// what allows a branch to target a label defined later in the file. The
/// second pass encodes each instruction line independently: a failure is
/// recorded against its line number and the run continues, so one bad line
/// costs exactly one word.
///
/// The only fatal error is [AssemblyError::DuplicateLabel], which makes the
/// address map ambiguous and aborts the run before any encoding.
pub fn assemble(lines: &[SourceLine]) -> Result<Assembly, AssemblyError> {
    assemble_with_logger(lines, None)
}

/// Like [assemble], but logs both passes to `logger`.
pub fn assemble_with_logger<L>(lines: &[SourceLine], logger: L) -> Result<Assembly, AssemblyError>
where
    L: Into<Option<Logger>>,
{
    let logger = logger
        .into()
        .unwrap_or(Logger::root(Discard, o!()))
        .new(o!("stage" => "assembly"));

    let (symbols, entries) = build_symbols(lines)?;

    for (label, address) in symbols.iter() {
        trace!(logger, "bound label"; "label" => label, "address" => address);
    }

    let mut words = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();

    for entry in &entries {
        match encoder::encode(&entry.mnemonic, &entry.operands, entry.address, &symbols) {
            Ok(word) => {
                trace!(
                    logger,
                    "encoded instruction";
                    "mnemonic" => entry.mnemonic.as_str(),
                    "address" => entry.address,
                    "word" => format!("{:08x}", word)
                );

                words.push(word);
            }
            Err(kind) => {
                trace!(
                    logger,
                    "skipped instruction";
                    "line" => entry.number,
                    "reason" => format!("{}", kind)
                );

                errors.push(SourceError {
                    line: entry.number,
                    kind,
                });
            }
        }
    }

    Ok(Assembly {
        words,
        errors,
        symbols,
    })
}

#[test]
fn test_assemble_sample_program() {
    let source = r#"
        addi x1, x0, 10
        addi x2, x0, 0
loop:   lw   x3, 0(x1)
        xor  x4, x3, x2
        srl  x5, x4, x2
        sw   x5, 4(x1)
        sub  x1, x1, x2
        beq  x1, x0, end
end:
    "#;

    let program = crate::Program::parse(source);
    assert!(program.errors.is_empty());

    let assembly = assemble(&program.lines).unwrap();

    assert!(assembly.is_clean());
    assert_eq!(assembly.symbols.address_of("loop"), Some(8));
    assert_eq!(assembly.symbols.address_of("end"), Some(32));

    assert_eq!(assembly.words, vec![
        0x00A00093, // addi x1, x0, 10
        0x00000113, // addi x2, x0, 0
        0x0000A183, // lw   x3, 0(x1)
        0x0021C233, // xor  x4, x3, x2
        0x002252B3, // srl  x5, x4, x2
        0x0050A223, // sw   x5, 4(x1)
        0x402080B3, // sub  x1, x1, x2
        0x00008263, // beq  x1, x0, +4
    ]);
}

#[test]
fn test_assemble_continues_past_bad_lines() {
    let source = r#"
        addi x1, x0, 1
        sw   x5, x1
        addi x2, x0, 2
    "#;

    let program = crate::Program::parse(source);
    let assembly = assemble(&program.lines).unwrap();

    assert_eq!(assembly.words.len(), 2);
    assert_eq!(assembly.errors.len(), 1);
    assert_eq!(assembly.errors[0].line, 3);
}

#[test]
fn test_duplicate_label_aborts_with_no_words() {
    let source = r#"
loop:   addi x1, x0, 1
loop:   addi x2, x0, 2
    "#;

    let program = crate::Program::parse(source);

    assert_eq!(
        assemble(&program.lines),
        Err(crate::error::AssemblyError::DuplicateLabel {
            label: "loop".to_string(),
            first_line: 2,
            second_line: 3,
        }),
    );
}
