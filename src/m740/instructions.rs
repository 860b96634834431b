// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Mitsubishi 740 instruction table.
//!
//! Layered directly on the NMOS family table. Bit numbers are part of the
//! mnemonic (`BBS3`, `SEB0`), the accumulator forms of the bit instructions
//! use `Relative`/`Accumulator` and the memory forms `ZeroPageRelative`/
//! `ZeroPage`. `LDM #imm,zp` stores an immediate straight to zero page.

use crate::families::mos6502::mode::AddressingMode as M;
use crate::families::mos6502::table::{op, TableEntry};

pub static CPU_INSTRUCTION_TABLE: &[TableEntry] = &[
    op("BRA", M::Relative, 0x80),
    // INC A / DEC A use the opposite slots from the 65C02
    op("INC", M::Accumulator, 0x3A),
    op("DEC", M::Accumulator, 0x1A),
    op("JMP", M::ZeroPageIndirect, 0xB2),
    op("JSR", M::ZeroPageIndirect, 0x02),
    op("JSR", M::SpecialPage, 0x22),
    op("BBC0", M::Relative, 0x13),
    op("BBC1", M::Relative, 0x33),
    op("BBC2", M::Relative, 0x53),
    op("BBC3", M::Relative, 0x73),
    op("BBC4", M::Relative, 0x93),
    op("BBC5", M::Relative, 0xB3),
    op("BBC6", M::Relative, 0xD3),
    op("BBC7", M::Relative, 0xF3),
    op("BBC0", M::ZeroPageRelative, 0x17),
    op("BBC1", M::ZeroPageRelative, 0x37),
    op("BBC2", M::ZeroPageRelative, 0x57),
    op("BBC3", M::ZeroPageRelative, 0x77),
    op("BBC4", M::ZeroPageRelative, 0x97),
    op("BBC5", M::ZeroPageRelative, 0xB7),
    op("BBC6", M::ZeroPageRelative, 0xD7),
    op("BBC7", M::ZeroPageRelative, 0xF7),
    op("BBS0", M::Relative, 0x03),
    op("BBS1", M::Relative, 0x23),
    op("BBS2", M::Relative, 0x43),
    op("BBS3", M::Relative, 0x63),
    op("BBS4", M::Relative, 0x83),
    op("BBS5", M::Relative, 0xA3),
    op("BBS6", M::Relative, 0xC3),
    op("BBS7", M::Relative, 0xE3),
    op("BBS0", M::ZeroPageRelative, 0x07),
    op("BBS1", M::ZeroPageRelative, 0x27),
    op("BBS2", M::ZeroPageRelative, 0x47),
    op("BBS3", M::ZeroPageRelative, 0x67),
    op("BBS4", M::ZeroPageRelative, 0x87),
    op("BBS5", M::ZeroPageRelative, 0xA7),
    op("BBS6", M::ZeroPageRelative, 0xC7),
    op("BBS7", M::ZeroPageRelative, 0xE7),
    op("CLB0", M::Accumulator, 0x1B),
    op("CLB1", M::Accumulator, 0x3B),
    op("CLB2", M::Accumulator, 0x5B),
    op("CLB3", M::Accumulator, 0x7B),
    op("CLB4", M::Accumulator, 0x9B),
    op("CLB5", M::Accumulator, 0xBB),
    op("CLB6", M::Accumulator, 0xDB),
    op("CLB7", M::Accumulator, 0xFB),
    op("CLB0", M::ZeroPage, 0x1F),
    op("CLB1", M::ZeroPage, 0x3F),
    op("CLB2", M::ZeroPage, 0x5F),
    op("CLB3", M::ZeroPage, 0x7F),
    op("CLB4", M::ZeroPage, 0x9F),
    op("CLB5", M::ZeroPage, 0xBF),
    op("CLB6", M::ZeroPage, 0xDF),
    op("CLB7", M::ZeroPage, 0xFF),
    op("SEB0", M::Accumulator, 0x0B),
    op("SEB1", M::Accumulator, 0x2B),
    op("SEB2", M::Accumulator, 0x4B),
    op("SEB3", M::Accumulator, 0x6B),
    op("SEB4", M::Accumulator, 0x8B),
    op("SEB5", M::Accumulator, 0xAB),
    op("SEB6", M::Accumulator, 0xCB),
    op("SEB7", M::Accumulator, 0xEB),
    op("SEB0", M::ZeroPage, 0x0F),
    op("SEB1", M::ZeroPage, 0x2F),
    op("SEB2", M::ZeroPage, 0x4F),
    op("SEB3", M::ZeroPage, 0x6F),
    op("SEB4", M::ZeroPage, 0x8F),
    op("SEB5", M::ZeroPage, 0xAF),
    op("SEB6", M::ZeroPage, 0xCF),
    op("SEB7", M::ZeroPage, 0xEF),
    op("CLT", M::Implicit, 0x12),
    op("SET", M::Implicit, 0x32),
    op("COM", M::ZeroPage, 0x44),
    op("RRF", M::ZeroPage, 0x82),
    op("STP", M::Implicit, 0x42),
    op("WIT", M::Implicit, 0xC2),
    op("TST", M::ZeroPage, 0x64),
    op("LDM", M::ImmediateZeroPage, 0x3C),
    op("MUL", M::ZeroPageX, 0x62),
    op("DIV", M::ZeroPageX, 0xE2),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn opcode(mnemonic: &str, mode: M) -> u8 {
        CPU_INSTRUCTION_TABLE
            .iter()
            .find(|e| e.mnemonic == mnemonic && e.mode == mode)
            .map(|e| e.opcode)
            .expect("entry")
    }

    #[test]
    fn bit_instructions_step_by_0x20() {
        for bit in 0..8u8 {
            let step = 0x20 * bit;
            assert_eq!(opcode(&format!("BBS{bit}"), M::ZeroPageRelative), 0x07 + step);
            assert_eq!(opcode(&format!("BBC{bit}"), M::Relative), 0x13 + step);
            assert_eq!(opcode(&format!("SEB{bit}"), M::Accumulator), 0x0B + step);
            assert_eq!(opcode(&format!("CLB{bit}"), M::ZeroPage), 0x1F + step);
        }
    }
}
