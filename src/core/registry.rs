// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU capability registry and active CPU selection.
//!
//! The registry knows, per CPU, which addressing modes the hardware decodes
//! and which table layers make up its instruction set. [`CpuSelection`] owns
//! the table derived for the active CPU and rebuilds it when the CPU changes.

use log::debug;

use crate::core::cpu::CpuVariant;
use crate::families::mos6502::mode::ModeSet;
use crate::families::mos6502::table::{InstructionTable, TableEntry, FAMILY_INSTRUCTION_TABLE};
use crate::sweet16::Sweet16Table;
use crate::{m4510, m45gs02, m65816, m65c02, m740};

const M6502_MODES: ModeSet = ModeSet::IMPLICIT
    .union(ModeSet::ACCUMULATOR)
    .union(ModeSet::ZERO_PAGE)
    .union(ModeSet::ABSOLUTE)
    .union(ModeSet::ZERO_PAGE_X)
    .union(ModeSet::ABSOLUTE_X)
    .union(ModeSet::ZERO_PAGE_Y)
    .union(ModeSet::ABSOLUTE_Y)
    .union(ModeSet::ABSOLUTE_INDIRECT)
    .union(ModeSet::ZERO_PAGE_X_INDIRECT)
    .union(ModeSet::ZERO_PAGE_INDIRECT_Y)
    .union(ModeSet::RELATIVE)
    .union(ModeSet::IMMEDIATE_ACCUMULATOR)
    .union(ModeSet::IMMEDIATE_INDEX)
    .union(ModeSet::IMMEDIATE_IMPLICIT);

const M65C02_MODES: ModeSet = M6502_MODES
    .union(ModeSet::ZERO_PAGE_INDIRECT)
    .union(ModeSet::ABSOLUTE_X_INDIRECT)
    .union(ModeSet::ZERO_PAGE_RELATIVE);

const W65816_MODES: ModeSet = M65C02_MODES
    .difference(ModeSet::ZERO_PAGE_RELATIVE)
    .union(ModeSet::ABSOLUTE_LONG)
    .union(ModeSet::ABSOLUTE_LONG_X)
    .union(ModeSet::ZERO_PAGE_INDIRECT_LONG)
    .union(ModeSet::ZERO_PAGE_INDIRECT_LONG_Y)
    .union(ModeSet::RELATIVE_LONG)
    .union(ModeSet::STACK_RELATIVE)
    .union(ModeSet::STACK_RELATIVE_INDIRECT_Y)
    .union(ModeSet::BLOCK_MOVE)
    .union(ModeSet::ABSOLUTE_INDIRECT_LONG);

const CSG4510_MODES: ModeSet = M65C02_MODES
    .union(ModeSet::RELATIVE_LONG)
    .union(ModeSet::STACK_RELATIVE_INDIRECT_Y)
    .union(ModeSet::IMMEDIATE_IMPLICIT_WORD);

const M45GS02_MODES: ModeSet = CSG4510_MODES
    .union(ModeSet::BASE_INDEXED_INDIRECT_32)
    .union(ModeSet::Q_REGISTER);

const M740_MODES: ModeSet = M6502_MODES
    .union(ModeSet::ZERO_PAGE_INDIRECT)
    .union(ModeSet::ZERO_PAGE_RELATIVE)
    .union(ModeSet::SPECIAL_PAGE)
    .union(ModeSet::IMMEDIATE_ZERO_PAGE);

/// Addressing modes the CPU can execute.
pub fn capability_mask(cpu: CpuVariant) -> ModeSet {
    match cpu {
        CpuVariant::M6502 => M6502_MODES,
        CpuVariant::M65C02 => M65C02_MODES,
        CpuVariant::W65816 => W65816_MODES,
        CpuVariant::Csg4510 => CSG4510_MODES,
        CpuVariant::M45GS02 => M45GS02_MODES,
        CpuVariant::M740 => M740_MODES,
        CpuVariant::Sweet16 => ModeSet::empty(),
    }
}

/// True where `(zp)` is implicitly indexed by Z.
pub fn zero_page_indirect_uses_z(cpu: CpuVariant) -> bool {
    matches!(cpu, CpuVariant::Csg4510 | CpuVariant::M45GS02)
}

/// Table layers for a 6502-family CPU, base table first.
pub fn instruction_layers(cpu: CpuVariant) -> Vec<&'static [TableEntry]> {
    let cmos = m65c02::instructions::CMOS_INSTRUCTION_TABLE;
    let rockwell = m65c02::instructions::ROCKWELL_INSTRUCTION_TABLE;
    let wdc = m65c02::instructions::WDC_INSTRUCTION_TABLE;
    match cpu {
        CpuVariant::M6502 => vec![FAMILY_INSTRUCTION_TABLE],
        CpuVariant::M65C02 => vec![FAMILY_INSTRUCTION_TABLE, cmos, rockwell, wdc],
        CpuVariant::W65816 => vec![
            FAMILY_INSTRUCTION_TABLE,
            cmos,
            wdc,
            m65816::instructions::CPU_INSTRUCTION_TABLE,
        ],
        CpuVariant::Csg4510 => vec![
            FAMILY_INSTRUCTION_TABLE,
            cmos,
            rockwell,
            m4510::instructions::CPU_INSTRUCTION_TABLE,
        ],
        CpuVariant::M45GS02 => vec![
            FAMILY_INSTRUCTION_TABLE,
            cmos,
            rockwell,
            m4510::instructions::CPU_INSTRUCTION_TABLE,
            m45gs02::instructions::CPU_INSTRUCTION_TABLE,
        ],
        CpuVariant::M740 => vec![
            FAMILY_INSTRUCTION_TABLE,
            m740::instructions::CPU_INSTRUCTION_TABLE,
        ],
        CpuVariant::Sweet16 => Vec::new(),
    }
}

/// Build the 6502-family table for `cpu`.
pub fn instruction_table(cpu: CpuVariant) -> InstructionTable {
    InstructionTable::build(cpu, capability_mask(cpu), &instruction_layers(cpu))
}

/// Table derived for the active CPU.
#[derive(Debug, Clone)]
pub enum ActiveTable {
    Mos6502(InstructionTable),
    Sweet16(Sweet16Table),
}

impl ActiveTable {
    pub fn for_cpu(cpu: CpuVariant) -> Self {
        if cpu.is_sweet16() {
            ActiveTable::Sweet16(Sweet16Table::new())
        } else {
            ActiveTable::Mos6502(instruction_table(cpu))
        }
    }

    pub fn cpu(&self) -> CpuVariant {
        match self {
            ActiveTable::Mos6502(table) => table.cpu(),
            ActiveTable::Sweet16(_) => CpuVariant::Sweet16,
        }
    }

    /// Number of mnemonics in the table.
    pub fn len(&self) -> usize {
        match self {
            ActiveTable::Mos6502(table) => table.len(),
            ActiveTable::Sweet16(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The active CPU and its derived instruction table.
#[derive(Debug, Clone)]
pub struct CpuSelection {
    table: ActiveTable,
}

impl CpuSelection {
    pub fn new(cpu: CpuVariant) -> Self {
        Self {
            table: ActiveTable::for_cpu(cpu),
        }
    }

    /// Switch CPUs. The table is only rebuilt when the CPU actually changes.
    pub fn set_cpu(&mut self, cpu: CpuVariant) {
        if self.cpu() != cpu {
            debug!("switching CPU from {} to {}", self.cpu(), cpu);
            self.table = ActiveTable::for_cpu(cpu);
        }
    }

    pub fn cpu(&self) -> CpuVariant {
        self.table.cpu()
    }

    pub fn table(&self) -> &ActiveTable {
        &self.table
    }
}

impl Default for CpuSelection {
    fn default() -> Self {
        Self::new(CpuVariant::M6502)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_nest_along_the_family_tree() {
        assert!(capability_mask(CpuVariant::M65C02).contains(capability_mask(CpuVariant::M6502)));
        assert!(capability_mask(CpuVariant::M45GS02).contains(capability_mask(CpuVariant::Csg4510)));
        assert!(capability_mask(CpuVariant::M740).contains(capability_mask(CpuVariant::M6502)));
        assert!(!capability_mask(CpuVariant::W65816).contains(ModeSet::ZERO_PAGE_RELATIVE));
        assert!(capability_mask(CpuVariant::Sweet16).is_empty());
    }

    #[test]
    fn every_table_stays_within_its_mask() {
        for cpu in CpuVariant::ALL {
            let table = instruction_table(cpu);
            let mask = capability_mask(cpu);
            for desc in table.descriptors() {
                assert!(
                    mask.contains(desc.modes()),
                    "{} on {cpu} uses {}",
                    desc.mnemonic,
                    desc.modes() - mask
                );
                assert!(!desc.modes().is_empty());
            }
        }
    }

    #[test]
    fn mnemonics_are_unique_and_sorted() {
        for cpu in CpuVariant::ALL {
            let table = instruction_table(cpu);
            for pair in table.descriptors().windows(2) {
                assert!(pair[0].mnemonic < pair[1].mnemonic, "{cpu}");
            }
        }
    }

    #[test]
    fn cpu_specific_mnemonics_stay_on_their_cpu() {
        assert!(instruction_table(CpuVariant::M6502).find_instruction("BRA").is_none());
        assert!(instruction_table(CpuVariant::M65C02).find_instruction("BRA").is_some());
        assert!(instruction_table(CpuVariant::W65816).find_instruction("BBR0").is_none());
        assert!(instruction_table(CpuVariant::W65816).find_instruction("RMB0").is_none());
        assert!(instruction_table(CpuVariant::Csg4510).find_instruction("LDQ").is_none());
        assert!(instruction_table(CpuVariant::M45GS02).find_instruction("LDQ").is_some());
        assert!(instruction_table(CpuVariant::Csg4510).find_instruction("WAI").is_none());
        assert!(instruction_table(CpuVariant::M740).find_instruction("STZ").is_none());
    }

    #[test]
    fn decode_recovers_every_encoding() {
        use std::collections::HashMap;

        use crate::core::cpu::RegisterWidths;

        let widths = RegisterWidths::default();
        for cpu in CpuVariant::ALL {
            let table = instruction_table(cpu);
            let mut owners: HashMap<Vec<u8>, usize> = HashMap::new();
            for enc in table.descriptors().iter().flat_map(|desc| desc.encodings()) {
                *owners.entry(enc.opcode_bytes()).or_default() += 1;
            }
            for desc in table.descriptors() {
                for enc in desc.encodings() {
                    let mut bytes = enc.opcode_bytes();
                    bytes.resize(bytes.len() + enc.mode.operand_len(cpu, widths), 0);
                    let decoded = table
                        .decode(&bytes, widths)
                        .unwrap_or_else(|| panic!("{cpu}: {} {} not decoded", desc.mnemonic, enc.mode));
                    assert_eq!(decoded.mode, enc.mode, "{cpu}: {}", desc.mnemonic);
                    assert_eq!(decoded.length, bytes.len(), "{cpu}: {}", desc.mnemonic);
                    let again = table
                        .descriptor(decoded.index)
                        .encoding(decoded.mode)
                        .map(|e| e.opcode_bytes());
                    assert_eq!(again, Some(enc.opcode_bytes()));
                    if owners[&enc.opcode_bytes()] == 1 {
                        assert_eq!(decoded.mnemonic, desc.mnemonic, "{cpu}: {}", enc.mode);
                    }
                }
            }
        }
    }

    #[test]
    fn aliased_opcodes_decode_to_first_mnemonic() {
        use crate::core::cpu::RegisterWidths;

        let widths = RegisterWidths::default();
        let decode = |cpu, bytes: &[u8]| {
            instruction_table(cpu)
                .decode(bytes, widths)
                .map(|decoded| decoded.mnemonic)
        };
        assert_eq!(decode(CpuVariant::M6502, &[0xEA]), Some("NOP"));
        assert_eq!(decode(CpuVariant::Csg4510, &[0xEA]), Some("EOM"));
        assert_eq!(decode(CpuVariant::W65816, &[0x5C, 0, 0, 0]), Some("JML"));
        assert_eq!(decode(CpuVariant::W65816, &[0x22, 0, 0, 0]), Some("JSL"));
        assert_eq!(decode(CpuVariant::W65816, &[0x20, 0, 0]), Some("JSR"));
    }

    #[test]
    fn selection_switches_tables() {
        let mut selection = CpuSelection::default();
        assert_eq!(selection.cpu(), CpuVariant::M6502);
        selection.set_cpu(CpuVariant::Sweet16);
        assert!(matches!(selection.table(), ActiveTable::Sweet16(_)));
        selection.set_cpu(CpuVariant::W65816);
        assert_eq!(selection.cpu(), CpuVariant::W65816);
        assert!(matches!(selection.table(), ActiveTable::Mos6502(_)));
        assert!(!selection.table().is_empty());
    }
}
