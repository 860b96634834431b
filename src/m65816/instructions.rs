// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65816-specific instruction table.
//!
//! Layered on the family table plus the 65C02 CMOS and WDC tables. The
//! Rockwell bit instructions are absent on this CPU.

use crate::families::mos6502::mode::AddressingMode as M;
use crate::families::mos6502::table::{op, TableEntry};

pub static CPU_INSTRUCTION_TABLE: &[TableEntry] = &[
    // Long, indirect long and stack relative forms of the ALU group
    op("ADC", M::AbsoluteLong, 0x6F),
    op("ADC", M::AbsoluteLongX, 0x7F),
    op("ADC", M::ZeroPageIndirectLong, 0x67),
    op("ADC", M::ZeroPageIndirectLongY, 0x77),
    op("ADC", M::StackRelative, 0x63),
    op("ADC", M::StackRelativeIndirectY, 0x73),
    op("AND", M::AbsoluteLong, 0x2F),
    op("AND", M::AbsoluteLongX, 0x3F),
    op("AND", M::ZeroPageIndirectLong, 0x27),
    op("AND", M::ZeroPageIndirectLongY, 0x37),
    op("AND", M::StackRelative, 0x23),
    op("AND", M::StackRelativeIndirectY, 0x33),
    op("CMP", M::AbsoluteLong, 0xCF),
    op("CMP", M::AbsoluteLongX, 0xDF),
    op("CMP", M::ZeroPageIndirectLong, 0xC7),
    op("CMP", M::ZeroPageIndirectLongY, 0xD7),
    op("CMP", M::StackRelative, 0xC3),
    op("CMP", M::StackRelativeIndirectY, 0xD3),
    op("EOR", M::AbsoluteLong, 0x4F),
    op("EOR", M::AbsoluteLongX, 0x5F),
    op("EOR", M::ZeroPageIndirectLong, 0x47),
    op("EOR", M::ZeroPageIndirectLongY, 0x57),
    op("EOR", M::StackRelative, 0x43),
    op("EOR", M::StackRelativeIndirectY, 0x53),
    op("LDA", M::AbsoluteLong, 0xAF),
    op("LDA", M::AbsoluteLongX, 0xBF),
    op("LDA", M::ZeroPageIndirectLong, 0xA7),
    op("LDA", M::ZeroPageIndirectLongY, 0xB7),
    op("LDA", M::StackRelative, 0xA3),
    op("LDA", M::StackRelativeIndirectY, 0xB3),
    op("ORA", M::AbsoluteLong, 0x0F),
    op("ORA", M::AbsoluteLongX, 0x1F),
    op("ORA", M::ZeroPageIndirectLong, 0x07),
    op("ORA", M::ZeroPageIndirectLongY, 0x17),
    op("ORA", M::StackRelative, 0x03),
    op("ORA", M::StackRelativeIndirectY, 0x13),
    op("SBC", M::AbsoluteLong, 0xEF),
    op("SBC", M::AbsoluteLongX, 0xFF),
    op("SBC", M::ZeroPageIndirectLong, 0xE7),
    op("SBC", M::ZeroPageIndirectLongY, 0xF7),
    op("SBC", M::StackRelative, 0xE3),
    op("SBC", M::StackRelativeIndirectY, 0xF3),
    op("STA", M::AbsoluteLong, 0x8F),
    op("STA", M::AbsoluteLongX, 0x9F),
    op("STA", M::ZeroPageIndirectLong, 0x87),
    op("STA", M::ZeroPageIndirectLongY, 0x97),
    op("STA", M::StackRelative, 0x83),
    op("STA", M::StackRelativeIndirectY, 0x93),
    op("BRL", M::RelativeLong, 0x82),
    op("PER", M::RelativeLong, 0x62),
    op("COP", M::ImmediateImplicitWidth, 0x02),
    op("WDM", M::ImmediateImplicitWidth, 0x42),
    op("REP", M::ImmediateImplicitWidth, 0xC2),
    op("SEP", M::ImmediateImplicitWidth, 0xE2),
    op("JML", M::AbsoluteLong, 0x5C),
    op("JML", M::AbsoluteIndirectLong, 0xDC),
    op("JMP", M::AbsoluteLong, 0x5C),
    op("JMP", M::AbsoluteIndirectLong, 0xDC),
    op("JSL", M::AbsoluteLong, 0x22),
    op("JSR", M::AbsoluteLong, 0x22),
    op("JSR", M::AbsoluteXIndirect, 0xFC),
    op("MVN", M::BlockMove, 0x54),
    op("MVP", M::BlockMove, 0x44),
    op("PEA", M::Absolute, 0xF4),
    op("PEI", M::ZeroPageIndirect, 0xD4),
    op("PHB", M::Implicit, 0x8B),
    op("PHD", M::Implicit, 0x0B),
    op("PHK", M::Implicit, 0x4B),
    op("PLB", M::Implicit, 0xAB),
    op("PLD", M::Implicit, 0x2B),
    op("RTL", M::Implicit, 0x6B),
    op("TCD", M::Implicit, 0x5B),
    op("TCS", M::Implicit, 0x1B),
    op("TDC", M::Implicit, 0x7B),
    op("TSC", M::Implicit, 0x3B),
    op("TXY", M::Implicit, 0x9B),
    op("TYX", M::Implicit, 0xBB),
    op("XBA", M::Implicit, 0xEB),
    op("XCE", M::Implicit, 0xFB),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(mnemonic: &str, mode: M) -> Option<u8> {
        CPU_INSTRUCTION_TABLE
            .iter()
            .find(|entry| entry.mnemonic == mnemonic && entry.mode == mode)
            .map(|entry| entry.opcode)
    }

    #[test]
    fn table_contains_long_forms() {
        assert_eq!(lookup("BRL", M::RelativeLong), Some(0x82));
        assert_eq!(lookup("JML", M::AbsoluteLong), Some(0x5C));
        assert_eq!(lookup("LDA", M::AbsoluteLongX), Some(0xBF));
        assert_eq!(lookup("MVN", M::BlockMove), Some(0x54));
    }

    #[test]
    fn jump_aliases_share_opcodes() {
        assert_eq!(lookup("JML", M::AbsoluteLong), lookup("JMP", M::AbsoluteLong));
        assert_eq!(lookup("JSL", M::AbsoluteLong), lookup("JSR", M::AbsoluteLong));
    }
}
