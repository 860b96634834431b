// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction tables for the MOS 6502 family.
//!
//! Static tables are flat `(mnemonic, mode, opcode)` rows. The base table
//! holds the NMOS 6502 instruction set; each CPU module contributes extension
//! layers. [`InstructionTable::build`] folds the layers for one CPU into a
//! sorted descriptor list, dropping modes the CPU cannot execute. A later
//! layer replaces the opcode of an existing mnemonic/mode pair, which is how
//! CPU-specific opcode remaps are expressed.

use std::collections::{BTreeMap, HashMap};

use crate::core::cpu::{CpuVariant, RegisterWidths};
use crate::core::family::Decoded;
use crate::families::mos6502::mode::{AddressingMode, ModeSet};

use AddressingMode as M;

/// A static instruction table row.
#[derive(Debug, Clone, Copy)]
pub struct TableEntry {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub prefix: &'static [u8],
    pub opcode: u8,
}

/// Row without prefix bytes.
pub const fn op(mnemonic: &'static str, mode: AddressingMode, opcode: u8) -> TableEntry {
    TableEntry {
        mnemonic,
        mode,
        prefix: &[],
        opcode,
    }
}

/// Row whose opcode is preceded by fixed prefix bytes.
pub const fn ext(
    mnemonic: &'static str,
    mode: AddressingMode,
    prefix: &'static [u8],
    opcode: u8,
) -> TableEntry {
    TableEntry {
        mnemonic,
        mode,
        prefix,
        opcode,
    }
}

/// Opcode bytes for one addressing mode of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub mode: AddressingMode,
    pub prefix: &'static [u8],
    pub opcode: u8,
}

impl Encoding {
    /// Prefix plus opcode.
    pub fn opcode_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.prefix.len() + 1);
        bytes.extend_from_slice(self.prefix);
        bytes.push(self.opcode);
        bytes
    }

    pub fn opcode_len(&self) -> usize {
        self.prefix.len() + 1
    }
}

/// One mnemonic of a CPU's instruction table.
#[derive(Debug, Clone)]
pub struct InstructionDescriptor {
    pub mnemonic: &'static str,
    encodings: Vec<Encoding>,
}

impl InstructionDescriptor {
    /// Supported addressing modes.
    pub fn modes(&self) -> ModeSet {
        self.encodings.iter().map(|enc| enc.mode).collect()
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn encoding(&self, mode: AddressingMode) -> Option<&Encoding> {
        self.encodings.iter().find(|enc| enc.mode == mode)
    }

    /// Opcode of the lowest-ordinal mode.
    pub fn base_opcode(&self) -> u8 {
        self.encodings.first().map_or(0, |enc| enc.opcode)
    }
}

/// Instruction table derived for one CPU.
#[derive(Debug, Clone)]
pub struct InstructionTable {
    cpu: CpuVariant,
    capabilities: ModeSet,
    descriptors: Vec<InstructionDescriptor>,
    reverse: HashMap<Vec<u8>, (usize, AddressingMode)>,
    max_opcode_len: usize,
}

impl InstructionTable {
    /// Fold `layers` into a table for `cpu`, keeping only modes in
    /// `capabilities`.
    pub fn build(cpu: CpuVariant, capabilities: ModeSet, layers: &[&[TableEntry]]) -> Self {
        let mut merged: BTreeMap<&'static str, Vec<Encoding>> = BTreeMap::new();
        for entry in layers.iter().flat_map(|layer| layer.iter()) {
            if !capabilities.contains_mode(entry.mode) {
                continue;
            }
            let encodings = merged.entry(entry.mnemonic).or_default();
            let encoding = Encoding {
                mode: entry.mode,
                prefix: entry.prefix,
                opcode: entry.opcode,
            };
            match encodings.iter_mut().find(|enc| enc.mode == entry.mode) {
                Some(existing) => *existing = encoding,
                None => encodings.push(encoding),
            }
        }

        let mut descriptors = Vec::with_capacity(merged.len());
        let mut reverse = HashMap::new();
        let mut max_opcode_len = 1;
        for (mnemonic, mut encodings) in merged {
            encodings.sort_by_key(|enc| enc.mode);
            let index = descriptors.len();
            for enc in &encodings {
                max_opcode_len = max_opcode_len.max(enc.opcode_len());
                reverse
                    .entry(enc.opcode_bytes())
                    .or_insert((index, enc.mode));
            }
            descriptors.push(InstructionDescriptor {
                mnemonic,
                encodings,
            });
        }

        Self {
            cpu,
            capabilities,
            descriptors,
            reverse,
            max_opcode_len,
        }
    }

    pub fn cpu(&self) -> CpuVariant {
        self.cpu
    }

    pub fn capabilities(&self) -> ModeSet {
        self.capabilities
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptors(&self) -> &[InstructionDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, index: usize) -> &InstructionDescriptor {
        &self.descriptors[index]
    }

    /// Find a mnemonic (case-insensitive, exact) in this CPU's table.
    pub fn find_instruction(&self, mnemonic: &str) -> Option<usize> {
        let upper = mnemonic.to_ascii_uppercase();
        self.descriptors
            .binary_search_by(|desc| desc.mnemonic.cmp(upper.as_str()))
            .ok()
    }

    /// Decode the instruction at the start of `bytes`.
    ///
    /// Longer opcode sequences (prefixed forms) take precedence over shorter
    /// ones. The operand bytes need not be present.
    ///
    /// Where two mnemonics share an opcode (`NOP`/`EOM` on the 4510,
    /// `JMP`/`JML` and `JSR`/`JSL` long on the 65816) the alphabetically first
    /// mnemonic is registered first and wins.
    pub fn decode(&self, bytes: &[u8], widths: RegisterWidths) -> Option<Decoded<AddressingMode>> {
        let longest = self.max_opcode_len.min(bytes.len());
        (1..=longest).rev().find_map(|len| {
            self.reverse.get(&bytes[..len]).map(|&(index, mode)| Decoded {
                index,
                mnemonic: self.descriptors[index].mnemonic,
                mode,
                length: len + mode.operand_len(self.cpu, widths),
            })
        })
    }
}

/// Instruction table for the NMOS 6502.
///
/// Every CPU of the family except SWEET16 starts from this table.
pub static FAMILY_INSTRUCTION_TABLE: &[TableEntry] = &[
    op("ADC", M::ImmediateAccumulatorWidth, 0x69),
    op("ADC", M::ZeroPage, 0x65),
    op("ADC", M::ZeroPageX, 0x75),
    op("ADC", M::Absolute, 0x6D),
    op("ADC", M::AbsoluteX, 0x7D),
    op("ADC", M::AbsoluteY, 0x79),
    op("ADC", M::ZeroPageXIndirect, 0x61),
    op("ADC", M::ZeroPageIndirectY, 0x71),
    op("AND", M::ImmediateAccumulatorWidth, 0x29),
    op("AND", M::ZeroPage, 0x25),
    op("AND", M::ZeroPageX, 0x35),
    op("AND", M::Absolute, 0x2D),
    op("AND", M::AbsoluteX, 0x3D),
    op("AND", M::AbsoluteY, 0x39),
    op("AND", M::ZeroPageXIndirect, 0x21),
    op("AND", M::ZeroPageIndirectY, 0x31),
    op("ASL", M::Accumulator, 0x0A),
    op("ASL", M::ZeroPage, 0x06),
    op("ASL", M::ZeroPageX, 0x16),
    op("ASL", M::Absolute, 0x0E),
    op("ASL", M::AbsoluteX, 0x1E),
    op("BCC", M::Relative, 0x90),
    op("BCS", M::Relative, 0xB0),
    op("BEQ", M::Relative, 0xF0),
    op("BIT", M::ZeroPage, 0x24),
    op("BIT", M::Absolute, 0x2C),
    op("BMI", M::Relative, 0x30),
    op("BNE", M::Relative, 0xD0),
    op("BPL", M::Relative, 0x10),
    op("BRK", M::Implicit, 0x00),
    op("BVC", M::Relative, 0x50),
    op("BVS", M::Relative, 0x70),
    op("CLC", M::Implicit, 0x18),
    op("CLD", M::Implicit, 0xD8),
    op("CLI", M::Implicit, 0x58),
    op("CLV", M::Implicit, 0xB8),
    op("CMP", M::ImmediateAccumulatorWidth, 0xC9),
    op("CMP", M::ZeroPage, 0xC5),
    op("CMP", M::ZeroPageX, 0xD5),
    op("CMP", M::Absolute, 0xCD),
    op("CMP", M::AbsoluteX, 0xDD),
    op("CMP", M::AbsoluteY, 0xD9),
    op("CMP", M::ZeroPageXIndirect, 0xC1),
    op("CMP", M::ZeroPageIndirectY, 0xD1),
    op("CPX", M::ImmediateIndexWidth, 0xE0),
    op("CPX", M::ZeroPage, 0xE4),
    op("CPX", M::Absolute, 0xEC),
    op("CPY", M::ImmediateIndexWidth, 0xC0),
    op("CPY", M::ZeroPage, 0xC4),
    op("CPY", M::Absolute, 0xCC),
    op("DEC", M::ZeroPage, 0xC6),
    op("DEC", M::ZeroPageX, 0xD6),
    op("DEC", M::Absolute, 0xCE),
    op("DEC", M::AbsoluteX, 0xDE),
    op("DEX", M::Implicit, 0xCA),
    op("DEY", M::Implicit, 0x88),
    op("EOR", M::ImmediateAccumulatorWidth, 0x49),
    op("EOR", M::ZeroPage, 0x45),
    op("EOR", M::ZeroPageX, 0x55),
    op("EOR", M::Absolute, 0x4D),
    op("EOR", M::AbsoluteX, 0x5D),
    op("EOR", M::AbsoluteY, 0x59),
    op("EOR", M::ZeroPageXIndirect, 0x41),
    op("EOR", M::ZeroPageIndirectY, 0x51),
    op("INC", M::ZeroPage, 0xE6),
    op("INC", M::ZeroPageX, 0xF6),
    op("INC", M::Absolute, 0xEE),
    op("INC", M::AbsoluteX, 0xFE),
    op("INX", M::Implicit, 0xE8),
    op("INY", M::Implicit, 0xC8),
    op("JMP", M::Absolute, 0x4C),
    op("JMP", M::AbsoluteIndirect, 0x6C),
    op("JSR", M::Absolute, 0x20),
    op("LDA", M::ImmediateAccumulatorWidth, 0xA9),
    op("LDA", M::ZeroPage, 0xA5),
    op("LDA", M::ZeroPageX, 0xB5),
    op("LDA", M::Absolute, 0xAD),
    op("LDA", M::AbsoluteX, 0xBD),
    op("LDA", M::AbsoluteY, 0xB9),
    op("LDA", M::ZeroPageXIndirect, 0xA1),
    op("LDA", M::ZeroPageIndirectY, 0xB1),
    op("LDX", M::ImmediateIndexWidth, 0xA2),
    op("LDX", M::ZeroPage, 0xA6),
    op("LDX", M::ZeroPageY, 0xB6),
    op("LDX", M::Absolute, 0xAE),
    op("LDX", M::AbsoluteY, 0xBE),
    op("LDY", M::ImmediateIndexWidth, 0xA0),
    op("LDY", M::ZeroPage, 0xA4),
    op("LDY", M::ZeroPageX, 0xB4),
    op("LDY", M::Absolute, 0xAC),
    op("LDY", M::AbsoluteX, 0xBC),
    op("LSR", M::Accumulator, 0x4A),
    op("LSR", M::ZeroPage, 0x46),
    op("LSR", M::ZeroPageX, 0x56),
    op("LSR", M::Absolute, 0x4E),
    op("LSR", M::AbsoluteX, 0x5E),
    op("NOP", M::Implicit, 0xEA),
    op("ORA", M::ImmediateAccumulatorWidth, 0x09),
    op("ORA", M::ZeroPage, 0x05),
    op("ORA", M::ZeroPageX, 0x15),
    op("ORA", M::Absolute, 0x0D),
    op("ORA", M::AbsoluteX, 0x1D),
    op("ORA", M::AbsoluteY, 0x19),
    op("ORA", M::ZeroPageXIndirect, 0x01),
    op("ORA", M::ZeroPageIndirectY, 0x11),
    op("PHA", M::Implicit, 0x48),
    op("PHP", M::Implicit, 0x08),
    op("PLA", M::Implicit, 0x68),
    op("PLP", M::Implicit, 0x28),
    op("ROL", M::Accumulator, 0x2A),
    op("ROL", M::ZeroPage, 0x26),
    op("ROL", M::ZeroPageX, 0x36),
    op("ROL", M::Absolute, 0x2E),
    op("ROL", M::AbsoluteX, 0x3E),
    op("ROR", M::Accumulator, 0x6A),
    op("ROR", M::ZeroPage, 0x66),
    op("ROR", M::ZeroPageX, 0x76),
    op("ROR", M::Absolute, 0x6E),
    op("ROR", M::AbsoluteX, 0x7E),
    op("RTI", M::Implicit, 0x40),
    op("RTS", M::Implicit, 0x60),
    op("SBC", M::ImmediateAccumulatorWidth, 0xE9),
    op("SBC", M::ZeroPage, 0xE5),
    op("SBC", M::ZeroPageX, 0xF5),
    op("SBC", M::Absolute, 0xED),
    op("SBC", M::AbsoluteX, 0xFD),
    op("SBC", M::AbsoluteY, 0xF9),
    op("SBC", M::ZeroPageXIndirect, 0xE1),
    op("SBC", M::ZeroPageIndirectY, 0xF1),
    op("SEC", M::Implicit, 0x38),
    op("SED", M::Implicit, 0xF8),
    op("SEI", M::Implicit, 0x78),
    op("STA", M::ZeroPage, 0x85),
    op("STA", M::ZeroPageX, 0x95),
    op("STA", M::Absolute, 0x8D),
    op("STA", M::AbsoluteX, 0x9D),
    op("STA", M::AbsoluteY, 0x99),
    op("STA", M::ZeroPageXIndirect, 0x81),
    op("STA", M::ZeroPageIndirectY, 0x91),
    op("STX", M::ZeroPage, 0x86),
    op("STX", M::ZeroPageY, 0x96),
    op("STX", M::Absolute, 0x8E),
    op("STY", M::ZeroPage, 0x84),
    op("STY", M::ZeroPageX, 0x94),
    op("STY", M::Absolute, 0x8C),
    op("TAX", M::Implicit, 0xAA),
    op("TAY", M::Implicit, 0xA8),
    op("TSX", M::Implicit, 0xBA),
    op("TXA", M::Implicit, 0x8A),
    op("TXS", M::Implicit, 0x9A),
    op("TYA", M::Implicit, 0x98),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn nmos_table() -> InstructionTable {
        InstructionTable::build(
            CpuVariant::M6502,
            ModeSet::all(),
            &[FAMILY_INSTRUCTION_TABLE],
        )
    }

    #[test]
    fn nmos_table_has_56_mnemonics() {
        assert_eq!(nmos_table().len(), 56);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = nmos_table();
        let idx = table.find_instruction("lda").expect("LDA");
        assert_eq!(table.descriptor(idx).mnemonic, "LDA");
        assert_eq!(table.find_instruction("LdA"), Some(idx));
        assert_eq!(table.find_instruction("XXX"), None);
        assert_eq!(table.find_instruction("LD"), None);
    }

    #[test]
    fn lda_immediate_opcode() {
        let table = nmos_table();
        let desc = table.descriptor(table.find_instruction("LDA").unwrap());
        let enc = desc.encoding(AddressingMode::ImmediateAccumulatorWidth).unwrap();
        assert_eq!(enc.opcode, 0xA9);
        assert_eq!(desc.base_opcode(), 0xA5);
    }

    #[test]
    fn later_layer_remaps_opcode() {
        static REMAP: &[TableEntry] = &[op("NOP", M::Implicit, 0x42)];
        let table = InstructionTable::build(
            CpuVariant::M6502,
            ModeSet::all(),
            &[FAMILY_INSTRUCTION_TABLE, REMAP],
        );
        let desc = table.descriptor(table.find_instruction("NOP").unwrap());
        assert_eq!(desc.encodings().len(), 1);
        assert_eq!(desc.encoding(M::Implicit).unwrap().opcode, 0x42);
    }

    #[test]
    fn capabilities_drop_modes_and_mnemonics() {
        let table = InstructionTable::build(
            CpuVariant::M6502,
            ModeSet::IMPLICIT,
            &[FAMILY_INSTRUCTION_TABLE],
        );
        assert!(table.find_instruction("LDA").is_none());
        assert!(table.find_instruction("NOP").is_some());
    }

    #[test]
    fn decode_reports_mode_and_length() {
        let table = nmos_table();
        let decoded = table
            .decode(&[0xBD, 0x00, 0x20], RegisterWidths::default())
            .unwrap();
        assert_eq!(decoded.mnemonic, "LDA");
        assert_eq!(decoded.mode, M::AbsoluteX);
        assert_eq!(decoded.length, 3);
        assert!(table.decode(&[0x02], RegisterWidths::default()).is_none());
        assert!(table.decode(&[], RegisterWidths::default()).is_none());
    }
}
