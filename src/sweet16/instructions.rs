// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SWEET16 instruction table.

use std::collections::HashMap;

use crate::core::family::Decoded;
use crate::sweet16::mode::{Sweet16Mode, Sweet16ModeSet};

use Sweet16Mode as S;

/// A SWEET16 table row. Register modes use the high nibble only.
#[derive(Debug, Clone, Copy)]
pub struct Sweet16Entry {
    pub mnemonic: &'static str,
    pub mode: Sweet16Mode,
    pub opcode: u8,
}

const fn row(mnemonic: &'static str, mode: Sweet16Mode, opcode: u8) -> Sweet16Entry {
    Sweet16Entry {
        mnemonic,
        mode,
        opcode,
    }
}

/// Sorted by mnemonic; rows of one mnemonic are adjacent.
pub static SWEET16_INSTRUCTION_TABLE: &[Sweet16Entry] = &[
    row("ADD", S::Register, 0xA0),
    row("BC", S::Branch, 0x03),
    row("BK", S::Implicit, 0x0A),
    row("BM", S::Branch, 0x05),
    row("BM1", S::Branch, 0x08),
    row("BNC", S::Branch, 0x02),
    row("BNM1", S::Branch, 0x09),
    row("BNZ", S::Branch, 0x07),
    row("BP", S::Branch, 0x04),
    row("BR", S::Branch, 0x01),
    row("BS", S::Branch, 0x0C),
    row("BZ", S::Branch, 0x06),
    row("CPR", S::Register, 0xD0),
    row("DCR", S::Register, 0xF0),
    row("INR", S::Register, 0xE0),
    row("LD", S::Indirect, 0x40),
    row("LD", S::Register, 0x20),
    row("LDD", S::Indirect, 0x60),
    row("POP", S::Indirect, 0x80),
    row("POPD", S::Indirect, 0xC0),
    row("RS", S::Implicit, 0x0B),
    row("RTN", S::Implicit, 0x00),
    row("SET", S::Immediate, 0x10),
    row("ST", S::Indirect, 0x50),
    row("ST", S::Register, 0x30),
    row("STD", S::Indirect, 0x70),
    row("STP", S::Indirect, 0x90),
    row("SUB", S::Register, 0xB0),
];

/// One SWEET16 mnemonic with its per-mode opcodes.
#[derive(Debug, Clone)]
pub struct Sweet16Descriptor {
    pub mnemonic: &'static str,
    encodings: Vec<(Sweet16Mode, u8)>,
}

impl Sweet16Descriptor {
    pub fn modes(&self) -> Sweet16ModeSet {
        self.encodings.iter().map(|(mode, _)| *mode).collect()
    }

    pub fn opcode(&self, mode: Sweet16Mode) -> Option<u8> {
        self.encodings
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, opcode)| *opcode)
    }

    pub fn encodings(&self) -> &[(Sweet16Mode, u8)] {
        &self.encodings
    }
}

/// The SWEET16 instruction table with its reverse index.
#[derive(Debug, Clone)]
pub struct Sweet16Table {
    descriptors: Vec<Sweet16Descriptor>,
    reverse: HashMap<u8, (usize, Sweet16Mode)>,
}

impl Sweet16Table {
    pub fn new() -> Self {
        let mut descriptors: Vec<Sweet16Descriptor> = Vec::new();
        for entry in SWEET16_INSTRUCTION_TABLE {
            match descriptors.last_mut() {
                Some(desc) if desc.mnemonic == entry.mnemonic => {
                    desc.encodings.push((entry.mode, entry.opcode));
                }
                _ => descriptors.push(Sweet16Descriptor {
                    mnemonic: entry.mnemonic,
                    encodings: vec![(entry.mode, entry.opcode)],
                }),
            }
        }

        let mut reverse = HashMap::new();
        for (index, desc) in descriptors.iter().enumerate() {
            for &(mode, opcode) in &desc.encodings {
                let registers = if mode.has_register() { 0..16 } else { 0..1 };
                for register in registers {
                    reverse.entry(opcode | register).or_insert((index, mode));
                }
            }
        }

        Self {
            descriptors,
            reverse,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[Sweet16Descriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, index: usize) -> &Sweet16Descriptor {
        &self.descriptors[index]
    }

    pub fn find_instruction(&self, mnemonic: &str) -> Option<usize> {
        let upper = mnemonic.to_ascii_uppercase();
        self.descriptors
            .binary_search_by(|desc| desc.mnemonic.cmp(upper.as_str()))
            .ok()
    }

    pub fn decode(&self, bytes: &[u8]) -> Option<Decoded<Sweet16Mode>> {
        let opcode = *bytes.first()?;
        self.reverse.get(&opcode).map(|&(index, mode)| Decoded {
            index,
            mnemonic: self.descriptors[index].mnemonic,
            mode,
            length: 1 + mode.extra_bytes(),
        })
    }
}

impl Default for Sweet16Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        for pair in SWEET16_INSTRUCTION_TABLE.windows(2) {
            assert!(pair[0].mnemonic <= pair[1].mnemonic);
        }
        assert_eq!(Sweet16Table::new().len(), 26);
    }

    #[test]
    fn ld_has_register_and_indirect_forms() {
        let table = Sweet16Table::new();
        let desc = table.descriptor(table.find_instruction("ld").unwrap());
        assert_eq!(desc.opcode(Sweet16Mode::Register), Some(0x20));
        assert_eq!(desc.opcode(Sweet16Mode::Indirect), Some(0x40));
    }

    #[test]
    fn decode_folds_register_nibble() {
        let table = Sweet16Table::new();
        let set = table.decode(&[0x15, 0x34, 0x12]).unwrap();
        assert_eq!(set.mnemonic, "SET");
        assert_eq!(set.length, 3);
        let dcr = table.decode(&[0xFA]).unwrap();
        assert_eq!((dcr.mnemonic, dcr.mode), ("DCR", Sweet16Mode::Register));
        assert_eq!(table.decode(&[0x0A]).unwrap().mnemonic, "BK");
        assert!(table.decode(&[0x0D]).is_none());
    }
}
