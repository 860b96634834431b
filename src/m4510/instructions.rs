// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 4510-specific instruction table.
//!
//! Layered on the family table plus the 65C02 CMOS and Rockwell tables. The
//! 4510 reuses several 65C02 NOP slots and the WDC `STP`/`WAI` opcodes for
//! its own instructions, so the WDC table is not part of its stack.

use crate::families::mos6502::mode::AddressingMode as M;
use crate::families::mos6502::table::{op, TableEntry};

pub static CPU_INSTRUCTION_TABLE: &[TableEntry] = &[
    // 16-bit branches
    op("BCC", M::RelativeLong, 0x93),
    op("BCS", M::RelativeLong, 0xB3),
    op("BEQ", M::RelativeLong, 0xF3),
    op("BMI", M::RelativeLong, 0x33),
    op("BNE", M::RelativeLong, 0xD3),
    op("BPL", M::RelativeLong, 0x13),
    op("BRA", M::RelativeLong, 0x83),
    op("BVC", M::RelativeLong, 0x53),
    op("BVS", M::RelativeLong, 0x73),
    op("BSR", M::RelativeLong, 0x63),
    op("ASR", M::Accumulator, 0x43),
    op("ASR", M::ZeroPage, 0x44),
    op("ASR", M::ZeroPageX, 0x54),
    op("ASW", M::Absolute, 0xCB),
    op("ROW", M::Absolute, 0xEB),
    op("DEW", M::ZeroPage, 0xC3),
    op("INW", M::ZeroPage, 0xE3),
    op("CLE", M::Implicit, 0x02),
    op("SEE", M::Implicit, 0x03),
    op("CPZ", M::ImmediateIndexWidth, 0xC2),
    op("CPZ", M::ZeroPage, 0xD4),
    op("CPZ", M::Absolute, 0xDC),
    op("DEZ", M::Implicit, 0x3B),
    op("INZ", M::Implicit, 0x1B),
    op("LDA", M::StackRelativeIndirectY, 0xE2),
    op("STA", M::StackRelativeIndirectY, 0x82),
    op("LDZ", M::ImmediateIndexWidth, 0xA3),
    op("LDZ", M::Absolute, 0xAB),
    op("LDZ", M::AbsoluteX, 0xBB),
    op("MAP", M::Implicit, 0x5C),
    op("EOM", M::Implicit, 0xEA),
    op("NEG", M::Implicit, 0x42),
    op("PHW", M::ImmediateImplicitWidthWord, 0xF4),
    op("PHW", M::Absolute, 0xFC),
    op("PHZ", M::Implicit, 0xDB),
    op("PLZ", M::Implicit, 0xFB),
    op("RTN", M::ImmediateImplicitWidth, 0x62),
    op("STX", M::AbsoluteY, 0x9B),
    op("STY", M::AbsoluteX, 0x8B),
    op("TAB", M::Implicit, 0x5B),
    op("TBA", M::Implicit, 0x7B),
    op("TAZ", M::Implicit, 0x4B),
    op("TZA", M::Implicit, 0x6B),
    op("TSY", M::Implicit, 0x0B),
    op("TYS", M::Implicit, 0x2B),
    op("JSR", M::AbsoluteIndirect, 0x22),
    op("JSR", M::AbsoluteXIndirect, 0x23),
];
