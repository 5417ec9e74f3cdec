//! A crate for assembling a small subset of the RV32I instruction
//! architecture into 32-bit machine-code words.
//!
//! The supported instruction set is the fixed list `lw`, `sw`, `sub`,
//! `xor`, `addi`, `srl` and `beq`, covering the R, I, S and B encoding
//! formats. Assembly is a two-pass batch transformation:
//!
//! 1. The first pass walks the line stream in order, assigns every
//!    instruction line a 4-byte-aligned address and binds labels to
//!    addresses.
//! 2. The second pass encodes each instruction independently against the
//!    completed symbol table, which is what makes both forward and backward
//!    branch references work.
//!
//! Per-line problems (an unknown mnemonic, a register out of range, a
//! malformed memory operand, ...) are collected against their line numbers
//! while the rest of the program still assembles; the only fatal error is a
//! duplicated label, which would make the address map ambiguous.
//!
//! # Example
//! ```
//! use rv32asm::Program;
//!
//! // Count down from 10, branching back until x1 reaches zero.
//! let source = r#"
//!         addi x1, x0, 10
//! loop:   addi x1, x1, -1
//!         beq  x1, x0, end
//!         beq  x0, x0, loop
//! end:
//! "#;
//!
//! // Parse the source into an ordered line stream.
//! let program = Program::parse(source);
//! assert!(program.errors.is_empty());
//!
//! // Run both assembly passes.
//! let assembly = program.assemble().unwrap();
//!
//! assert!(assembly.is_clean());
//! assert_eq!(assembly.words.len(), 4);
//! assert_eq!(assembly.symbols.address_of("loop"), Some(4));
//!
//! for word in &assembly.words {
//!     println!("{:032b}", word);
//! }
//! ```
//!
//! # Executables
//!
//! ## `rvasm`
//!
//! Assembles a source file and writes the words as newline-joined 32-bit
//! binary strings (or hexadecimal with `--hex`) to a file or stdout.
//! Requires the `rvasm` feature.
//!
//! ## `rvasm-repl`
//!
//! Interactive mode: captures numbered lines from the terminal until a
//! blank line, then assembles the captured program and prints the words
//! and any diagnostics. Requires the `rvasmrepl` feature.

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod instruction;
pub mod parser;
pub mod program;
pub mod symbol_table;
pub mod token;

pub use assembler::{assemble, assemble_with_logger, Assembly};
pub use program::{Program, SourceLine};
