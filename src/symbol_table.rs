//! The label → address mapping built by the first pass.

use std::collections::HashMap;

use crate::error::AssemblyError;
use crate::program::{InstructionEntry, SourceLine};

#[derive(Debug, Clone, PartialEq)]
struct Symbol {
    address: u32,
    /// Line the label was defined on, kept for duplicate diagnostics.
    line: usize,
}

/// Mapping from unique label names to byte addresses.
///
/// The table is filled once by [build_symbols] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    inner: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            inner: HashMap::new(),
        }
    }

    /// The address a label is bound to, if it is defined.
    pub fn address_of(&self, label: &str) -> Option<u32> {
        self.inner.get(label).map(|symbol| symbol.address)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(label, address)` bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.inner
            .iter()
            .map(|(label, symbol)| (label.as_str(), symbol.address))
    }

    fn define(&mut self, label: &str, address: u32, line: usize) -> Result<(), AssemblyError> {
        if let Some(existing) = self.inner.get(label) {
            return Err(AssemblyError::DuplicateLabel {
                label: label.to_string(),
                first_line: existing.line,
                second_line: line,
            });
        }

        self.inner.insert(label.to_string(), Symbol { address, line });

        Ok(())
    }
}

/// The first pass: assigns each instruction line a 4-byte-aligned address
/// and records label bindings.
///
/// A label binds to the current address and does not advance it, so a
/// label-only line marks the address the next instruction will receive.
/// Redefining a label aborts the run, since the address map it would
/// produce is ambiguous.
pub fn build_symbols(
    lines: &[SourceLine],
) -> Result<(SymbolTable, Vec<InstructionEntry>), AssemblyError> {
    let mut table = SymbolTable::new();
    let mut entries = Vec::new();
    let mut address = 0u32;

    for line in lines {
        if let Some(label) = &line.label {
            table.define(label, address, line.number)?;
        }

        if let Some(mnemonic) = &line.mnemonic {
            entries.push(InstructionEntry {
                number: line.number,
                address,
                mnemonic: mnemonic.clone(),
                operands: line.operands.clone(),
            });

            address += 4;
        }
    }

    Ok((table, entries))
}
