// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! 45GS02-specific instruction table.
//!
//! The 45GS02 extends the 4510 through prefix bytes: `EA` (the old `NOP`)
//! turns `(zp),Z` into the 32-bit pointer form `[zp],Z`, and `42 42`
//! (`NEG NEG`) widens accumulator instructions to the 32-bit Q register.

use crate::families::mos6502::mode::AddressingMode as M;
use crate::families::mos6502::table::{ext, TableEntry};

/// Prefix selecting 32-bit pointer indirection.
pub const FLAT_PREFIX: &[u8] = &[0xEA];
/// Prefix selecting the Q register.
pub const QUAD_PREFIX: &[u8] = &[0x42, 0x42];
/// Q register with 32-bit pointer indirection.
pub const QUAD_FLAT_PREFIX: &[u8] = &[0x42, 0x42, 0xEA];

pub static CPU_INSTRUCTION_TABLE: &[TableEntry] = &[
    ext("ADC", M::BaseIndexedIndirect32, FLAT_PREFIX, 0x72),
    ext("AND", M::BaseIndexedIndirect32, FLAT_PREFIX, 0x32),
    ext("CMP", M::BaseIndexedIndirect32, FLAT_PREFIX, 0xD2),
    ext("EOR", M::BaseIndexedIndirect32, FLAT_PREFIX, 0x52),
    ext("LDA", M::BaseIndexedIndirect32, FLAT_PREFIX, 0xB2),
    ext("ORA", M::BaseIndexedIndirect32, FLAT_PREFIX, 0x12),
    ext("SBC", M::BaseIndexedIndirect32, FLAT_PREFIX, 0xF2),
    ext("STA", M::BaseIndexedIndirect32, FLAT_PREFIX, 0x92),
    // Q register loads, stores and arithmetic
    ext("LDQ", M::ZeroPage, QUAD_PREFIX, 0xA5),
    ext("LDQ", M::Absolute, QUAD_PREFIX, 0xAD),
    ext("LDQ", M::ZeroPageIndirect, QUAD_PREFIX, 0xB2),
    ext("LDQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0xB2),
    ext("STQ", M::ZeroPage, QUAD_PREFIX, 0x85),
    ext("STQ", M::Absolute, QUAD_PREFIX, 0x8D),
    ext("STQ", M::ZeroPageIndirect, QUAD_PREFIX, 0x92),
    ext("STQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0x92),
    ext("ADCQ", M::ZeroPage, QUAD_PREFIX, 0x65),
    ext("ADCQ", M::Absolute, QUAD_PREFIX, 0x6D),
    ext("ADCQ", M::ZeroPageIndirect, QUAD_PREFIX, 0x72),
    ext("ADCQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0x72),
    ext("ANDQ", M::ZeroPage, QUAD_PREFIX, 0x25),
    ext("ANDQ", M::Absolute, QUAD_PREFIX, 0x2D),
    ext("ANDQ", M::ZeroPageIndirect, QUAD_PREFIX, 0x32),
    ext("ANDQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0x32),
    ext("CPQ", M::ZeroPage, QUAD_PREFIX, 0xC5),
    ext("CPQ", M::Absolute, QUAD_PREFIX, 0xCD),
    ext("CPQ", M::ZeroPageIndirect, QUAD_PREFIX, 0xD2),
    ext("CPQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0xD2),
    ext("EORQ", M::ZeroPage, QUAD_PREFIX, 0x45),
    ext("EORQ", M::Absolute, QUAD_PREFIX, 0x4D),
    ext("EORQ", M::ZeroPageIndirect, QUAD_PREFIX, 0x52),
    ext("EORQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0x52),
    ext("ORQ", M::ZeroPage, QUAD_PREFIX, 0x05),
    ext("ORQ", M::Absolute, QUAD_PREFIX, 0x0D),
    ext("ORQ", M::ZeroPageIndirect, QUAD_PREFIX, 0x12),
    ext("ORQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0x12),
    ext("SBCQ", M::ZeroPage, QUAD_PREFIX, 0xE5),
    ext("SBCQ", M::Absolute, QUAD_PREFIX, 0xED),
    ext("SBCQ", M::ZeroPageIndirect, QUAD_PREFIX, 0xF2),
    ext("SBCQ", M::BaseIndexedIndirect32, QUAD_FLAT_PREFIX, 0xF2),
    ext("BITQ", M::ZeroPage, QUAD_PREFIX, 0x24),
    ext("BITQ", M::Absolute, QUAD_PREFIX, 0x2C),
    // Q register shifts and increments
    ext("ASLQ", M::QRegister, QUAD_PREFIX, 0x0A),
    ext("ASLQ", M::ZeroPage, QUAD_PREFIX, 0x06),
    ext("ASLQ", M::ZeroPageX, QUAD_PREFIX, 0x16),
    ext("ASLQ", M::Absolute, QUAD_PREFIX, 0x0E),
    ext("ASLQ", M::AbsoluteX, QUAD_PREFIX, 0x1E),
    ext("LSRQ", M::QRegister, QUAD_PREFIX, 0x4A),
    ext("LSRQ", M::ZeroPage, QUAD_PREFIX, 0x46),
    ext("LSRQ", M::ZeroPageX, QUAD_PREFIX, 0x56),
    ext("LSRQ", M::Absolute, QUAD_PREFIX, 0x4E),
    ext("LSRQ", M::AbsoluteX, QUAD_PREFIX, 0x5E),
    ext("ROLQ", M::QRegister, QUAD_PREFIX, 0x2A),
    ext("ROLQ", M::ZeroPage, QUAD_PREFIX, 0x26),
    ext("ROLQ", M::ZeroPageX, QUAD_PREFIX, 0x36),
    ext("ROLQ", M::Absolute, QUAD_PREFIX, 0x2E),
    ext("ROLQ", M::AbsoluteX, QUAD_PREFIX, 0x3E),
    ext("RORQ", M::QRegister, QUAD_PREFIX, 0x6A),
    ext("RORQ", M::ZeroPage, QUAD_PREFIX, 0x66),
    ext("RORQ", M::ZeroPageX, QUAD_PREFIX, 0x76),
    ext("RORQ", M::Absolute, QUAD_PREFIX, 0x6E),
    ext("RORQ", M::AbsoluteX, QUAD_PREFIX, 0x7E),
    ext("ASRQ", M::QRegister, QUAD_PREFIX, 0x43),
    ext("ASRQ", M::ZeroPage, QUAD_PREFIX, 0x44),
    ext("ASRQ", M::ZeroPageX, QUAD_PREFIX, 0x54),
    ext("INQ", M::QRegister, QUAD_PREFIX, 0x1A),
    ext("INQ", M::ZeroPage, QUAD_PREFIX, 0xE6),
    ext("INQ", M::Absolute, QUAD_PREFIX, 0xEE),
    ext("DEQ", M::QRegister, QUAD_PREFIX, 0x3A),
    ext("DEQ", M::ZeroPage, QUAD_PREFIX, 0xC6),
    ext("DEQ", M::Absolute, QUAD_PREFIX, 0xCE),
];
