// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 65C02-specific instruction tables.
//!
//! These tables contain only the instructions and addressing modes that are
//! not available on the base 6502. They are layered on top of the family
//! table, so entries here add modes to existing mnemonics or introduce new
//! ones.

use crate::families::mos6502::mode::AddressingMode as M;
use crate::families::mos6502::table::{op, TableEntry};

/// CMOS additions shared by the 65C02, 65816 and 4510 lines.
pub static CMOS_INSTRUCTION_TABLE: &[TableEntry] = &[
    // (zp) without index
    op("ADC", M::ZeroPageIndirect, 0x72),
    op("AND", M::ZeroPageIndirect, 0x32),
    op("CMP", M::ZeroPageIndirect, 0xD2),
    op("EOR", M::ZeroPageIndirect, 0x52),
    op("LDA", M::ZeroPageIndirect, 0xB2),
    op("ORA", M::ZeroPageIndirect, 0x12),
    op("SBC", M::ZeroPageIndirect, 0xF2),
    op("STA", M::ZeroPageIndirect, 0x92),
    // BIT gains immediate and indexed forms
    op("BIT", M::ImmediateAccumulatorWidth, 0x89),
    op("BIT", M::ZeroPageX, 0x34),
    op("BIT", M::AbsoluteX, 0x3C),
    op("DEC", M::Accumulator, 0x3A),
    op("INC", M::Accumulator, 0x1A),
    op("JMP", M::AbsoluteXIndirect, 0x7C),
    op("BRA", M::Relative, 0x80),
    op("PHX", M::Implicit, 0xDA),
    op("PHY", M::Implicit, 0x5A),
    op("PLX", M::Implicit, 0xFA),
    op("PLY", M::Implicit, 0x7A),
    op("STZ", M::ZeroPage, 0x64),
    op("STZ", M::ZeroPageX, 0x74),
    op("STZ", M::Absolute, 0x9C),
    op("STZ", M::AbsoluteX, 0x9E),
    op("TRB", M::ZeroPage, 0x14),
    op("TRB", M::Absolute, 0x1C),
    op("TSB", M::ZeroPage, 0x04),
    op("TSB", M::Absolute, 0x0C),
];

/// Rockwell bit manipulation and bit branch instructions.
pub static ROCKWELL_INSTRUCTION_TABLE: &[TableEntry] = &[
    op("BBR0", M::ZeroPageRelative, 0x0F),
    op("BBR1", M::ZeroPageRelative, 0x1F),
    op("BBR2", M::ZeroPageRelative, 0x2F),
    op("BBR3", M::ZeroPageRelative, 0x3F),
    op("BBR4", M::ZeroPageRelative, 0x4F),
    op("BBR5", M::ZeroPageRelative, 0x5F),
    op("BBR6", M::ZeroPageRelative, 0x6F),
    op("BBR7", M::ZeroPageRelative, 0x7F),
    op("BBS0", M::ZeroPageRelative, 0x8F),
    op("BBS1", M::ZeroPageRelative, 0x9F),
    op("BBS2", M::ZeroPageRelative, 0xAF),
    op("BBS3", M::ZeroPageRelative, 0xBF),
    op("BBS4", M::ZeroPageRelative, 0xCF),
    op("BBS5", M::ZeroPageRelative, 0xDF),
    op("BBS6", M::ZeroPageRelative, 0xEF),
    op("BBS7", M::ZeroPageRelative, 0xFF),
    op("RMB0", M::ZeroPage, 0x07),
    op("RMB1", M::ZeroPage, 0x17),
    op("RMB2", M::ZeroPage, 0x27),
    op("RMB3", M::ZeroPage, 0x37),
    op("RMB4", M::ZeroPage, 0x47),
    op("RMB5", M::ZeroPage, 0x57),
    op("RMB6", M::ZeroPage, 0x67),
    op("RMB7", M::ZeroPage, 0x77),
    op("SMB0", M::ZeroPage, 0x87),
    op("SMB1", M::ZeroPage, 0x97),
    op("SMB2", M::ZeroPage, 0xA7),
    op("SMB3", M::ZeroPage, 0xB7),
    op("SMB4", M::ZeroPage, 0xC7),
    op("SMB5", M::ZeroPage, 0xD7),
    op("SMB6", M::ZeroPage, 0xE7),
    op("SMB7", M::ZeroPage, 0xF7),
];

/// WDC low-power instructions.
pub static WDC_INSTRUCTION_TABLE: &[TableEntry] = &[
    op("STP", M::Implicit, 0xDB),
    op("WAI", M::Implicit, 0xCB),
];
