// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Addressing modes for the MOS 6502 family.
//!
//! The enum covers every mode used by any CPU in the family. Ordinals are
//! stable and double as bit positions in [`ModeSet`], so set operations on
//! modes are single integer operations.

use std::fmt;

use bitflags::bitflags;

use crate::core::cpu::{CpuVariant, RegisterWidths, Width};

/// Addressing modes for the MOS 6502 family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AddressingMode {
    /// No operand (NOP, RTS, BRK, etc.)
    Implicit = 0,
    /// A
    Accumulator = 1,
    /// $nn
    ZeroPage = 2,
    /// $nnnn
    Absolute = 3,
    /// $nnnnnn (65816)
    AbsoluteLong = 4,
    /// $nn,X
    ZeroPageX = 5,
    /// $nnnn,X
    AbsoluteX = 6,
    /// $nnnnnn,X (65816)
    AbsoluteLongX = 7,
    /// $nn,Y
    ZeroPageY = 8,
    /// $nnnn,Y
    AbsoluteY = 9,
    /// ($nn), or ($nn),Z on the 4510
    ZeroPageIndirect = 10,
    /// ($nnnn)
    AbsoluteIndirect = 11,
    /// [$nn] (65816)
    ZeroPageIndirectLong = 12,
    /// ($nn),Y
    ZeroPageIndirectY = 13,
    /// [$nn],Y (65816)
    ZeroPageIndirectLongY = 14,
    /// ($nn,X)
    ZeroPageXIndirect = 15,
    /// ($nnnn,X)
    AbsoluteXIndirect = 16,
    /// 8-bit signed branch displacement
    Relative = 17,
    /// 16-bit signed branch displacement
    RelativeLong = 18,
    /// $nn,S
    StackRelative = 19,
    /// ($nn,S),Y
    StackRelativeIndirectY = 20,
    /// #imm sized by the accumulator width
    ImmediateAccumulatorWidth = 21,
    /// #imm sized by the index width
    ImmediateIndexWidth = 22,
    /// #imm, always 8 bits
    ImmediateImplicitWidth = 23,
    /// MVN/MVP src,dst
    BlockMove = 24,
    /// Block transfer src,dst
    BlockTransfer = 25,
    /// [$nnnn] (JML)
    AbsoluteIndirectLong = 26,
    /// #imm, always 16 bits (PHW on the 4510)
    ImmediateImplicitWidthWord = 27,
    /// $nn,rel (bit branches)
    ZeroPageRelative = 28,
    /// \$FFxx (m740 special page)
    SpecialPage = 29,
    /// [$nn],Z (45GS02 32-bit pointer)
    BaseIndexedIndirect32 = 30,
    /// Q (45GS02 32-bit pseudo register)
    QRegister = 31,
    /// #imm,$nn (m740 LDM)
    ImmediateZeroPage = 32,
}

impl AddressingMode {
    pub const COUNT: usize = 33;

    /// All modes in ordinal order.
    pub const ALL: [AddressingMode; Self::COUNT] = [
        AddressingMode::Implicit,
        AddressingMode::Accumulator,
        AddressingMode::ZeroPage,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteLong,
        AddressingMode::ZeroPageX,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteLongX,
        AddressingMode::ZeroPageY,
        AddressingMode::AbsoluteY,
        AddressingMode::ZeroPageIndirect,
        AddressingMode::AbsoluteIndirect,
        AddressingMode::ZeroPageIndirectLong,
        AddressingMode::ZeroPageIndirectY,
        AddressingMode::ZeroPageIndirectLongY,
        AddressingMode::ZeroPageXIndirect,
        AddressingMode::AbsoluteXIndirect,
        AddressingMode::Relative,
        AddressingMode::RelativeLong,
        AddressingMode::StackRelative,
        AddressingMode::StackRelativeIndirectY,
        AddressingMode::ImmediateAccumulatorWidth,
        AddressingMode::ImmediateIndexWidth,
        AddressingMode::ImmediateImplicitWidth,
        AddressingMode::BlockMove,
        AddressingMode::BlockTransfer,
        AddressingMode::AbsoluteIndirectLong,
        AddressingMode::ImmediateImplicitWidthWord,
        AddressingMode::ZeroPageRelative,
        AddressingMode::SpecialPage,
        AddressingMode::BaseIndexedIndirect32,
        AddressingMode::QRegister,
        AddressingMode::ImmediateZeroPage,
    ];

    /// Operand bytes that follow the opcode, indexed by ordinal.
    const EXTRA_BYTES: [u8; Self::COUNT] = [
        0, // Implicit
        0, // Accumulator
        1, // ZeroPage
        2, // Absolute
        3, // AbsoluteLong
        1, // ZeroPageX
        2, // AbsoluteX
        3, // AbsoluteLongX
        1, // ZeroPageY
        2, // AbsoluteY
        1, // ZeroPageIndirect
        2, // AbsoluteIndirect
        1, // ZeroPageIndirectLong
        1, // ZeroPageIndirectY
        1, // ZeroPageIndirectLongY
        1, // ZeroPageXIndirect
        2, // AbsoluteXIndirect
        1, // Relative
        2, // RelativeLong
        1, // StackRelative
        1, // StackRelativeIndirectY
        1, // ImmediateAccumulatorWidth
        1, // ImmediateIndexWidth
        1, // ImmediateImplicitWidth
        2, // BlockMove
        2, // BlockTransfer
        2, // AbsoluteIndirectLong
        2, // ImmediateImplicitWidthWord
        2, // ZeroPageRelative
        1, // SpecialPage
        1, // BaseIndexedIndirect32
        0, // QRegister
        2, // ImmediateZeroPage
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The single-bit set for this mode.
    pub fn bit(self) -> ModeSet {
        ModeSet::from_bits_retain(1u64 << (self as u32))
    }

    /// Fixed operand byte count, independent of CPU and register widths.
    pub fn extra_bytes(self) -> usize {
        Self::EXTRA_BYTES[self.ordinal()] as usize
    }

    /// Operand byte count on `cpu` with the given register widths.
    ///
    /// Only the 65816 has register-width dependent immediates.
    pub fn operand_len(self, cpu: CpuVariant, widths: RegisterWidths) -> usize {
        if cpu == CpuVariant::W65816 {
            let wide = match self {
                AddressingMode::ImmediateAccumulatorWidth => widths.accumulator == Width::Bits16,
                AddressingMode::ImmediateIndexWidth => widths.index == Width::Bits16,
                _ => false,
            };
            if wide {
                return 2;
            }
        }
        self.extra_bytes()
    }

    pub fn is_branch(self) -> bool {
        matches!(
            self,
            AddressingMode::Relative | AddressingMode::RelativeLong
        )
    }

    pub fn is_immediate(self) -> bool {
        ModeSet::IMMEDIATE_FORMS.contains(self.bit())
    }

    /// Short syntax sketch used in listings and diagnostics.
    pub fn syntax(self) -> &'static str {
        match self {
            AddressingMode::Implicit => "imp",
            AddressingMode::Accumulator => "a",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::Absolute => "abs",
            AddressingMode::AbsoluteLong => "long",
            AddressingMode::ZeroPageX => "zp,x",
            AddressingMode::AbsoluteX => "abs,x",
            AddressingMode::AbsoluteLongX => "long,x",
            AddressingMode::ZeroPageY => "zp,y",
            AddressingMode::AbsoluteY => "abs,y",
            AddressingMode::ZeroPageIndirect => "(zp)",
            AddressingMode::AbsoluteIndirect => "(abs)",
            AddressingMode::ZeroPageIndirectLong => "[zp]",
            AddressingMode::ZeroPageIndirectY => "(zp),y",
            AddressingMode::ZeroPageIndirectLongY => "[zp],y",
            AddressingMode::ZeroPageXIndirect => "(zp,x)",
            AddressingMode::AbsoluteXIndirect => "(abs,x)",
            AddressingMode::Relative => "rel",
            AddressingMode::RelativeLong => "rel16",
            AddressingMode::StackRelative => "sr,s",
            AddressingMode::StackRelativeIndirectY => "(sr,s),y",
            AddressingMode::ImmediateAccumulatorWidth => "#imm.a",
            AddressingMode::ImmediateIndexWidth => "#imm.i",
            AddressingMode::ImmediateImplicitWidth => "#imm",
            AddressingMode::BlockMove => "src,dst",
            AddressingMode::BlockTransfer => "xfer",
            AddressingMode::AbsoluteIndirectLong => "[abs]",
            AddressingMode::ImmediateImplicitWidthWord => "#imm16",
            AddressingMode::ZeroPageRelative => "zp,rel",
            AddressingMode::SpecialPage => "\\sp",
            AddressingMode::BaseIndexedIndirect32 => "[zp],z",
            AddressingMode::QRegister => "q",
            AddressingMode::ImmediateZeroPage => "#imm,zp",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syntax())
    }
}

bitflags! {
    /// Set of addressing modes, one bit per [`AddressingMode`] ordinal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModeSet: u64 {
        const IMPLICIT = 1 << 0;
        const ACCUMULATOR = 1 << 1;
        const ZERO_PAGE = 1 << 2;
        const ABSOLUTE = 1 << 3;
        const ABSOLUTE_LONG = 1 << 4;
        const ZERO_PAGE_X = 1 << 5;
        const ABSOLUTE_X = 1 << 6;
        const ABSOLUTE_LONG_X = 1 << 7;
        const ZERO_PAGE_Y = 1 << 8;
        const ABSOLUTE_Y = 1 << 9;
        const ZERO_PAGE_INDIRECT = 1 << 10;
        const ABSOLUTE_INDIRECT = 1 << 11;
        const ZERO_PAGE_INDIRECT_LONG = 1 << 12;
        const ZERO_PAGE_INDIRECT_Y = 1 << 13;
        const ZERO_PAGE_INDIRECT_LONG_Y = 1 << 14;
        const ZERO_PAGE_X_INDIRECT = 1 << 15;
        const ABSOLUTE_X_INDIRECT = 1 << 16;
        const RELATIVE = 1 << 17;
        const RELATIVE_LONG = 1 << 18;
        const STACK_RELATIVE = 1 << 19;
        const STACK_RELATIVE_INDIRECT_Y = 1 << 20;
        const IMMEDIATE_ACCUMULATOR = 1 << 21;
        const IMMEDIATE_INDEX = 1 << 22;
        const IMMEDIATE_IMPLICIT = 1 << 23;
        const BLOCK_MOVE = 1 << 24;
        const BLOCK_TRANSFER = 1 << 25;
        const ABSOLUTE_INDIRECT_LONG = 1 << 26;
        const IMMEDIATE_IMPLICIT_WORD = 1 << 27;
        const ZERO_PAGE_RELATIVE = 1 << 28;
        const SPECIAL_PAGE = 1 << 29;
        const BASE_INDEXED_INDIRECT_32 = 1 << 30;
        const Q_REGISTER = 1 << 31;
        const IMMEDIATE_ZERO_PAGE = 1 << 32;

        /// Zero page forms that have an absolute counterpart.
        const ZERO_PAGE_FORMS = Self::ZERO_PAGE.bits()
            | Self::ZERO_PAGE_X.bits()
            | Self::ZERO_PAGE_Y.bits()
            | Self::ZERO_PAGE_INDIRECT.bits()
            | Self::ZERO_PAGE_X_INDIRECT.bits()
            | Self::ZERO_PAGE_INDIRECT_LONG.bits();
        const ABSOLUTE_FORMS = Self::ABSOLUTE.bits()
            | Self::ABSOLUTE_X.bits()
            | Self::ABSOLUTE_Y.bits()
            | Self::ABSOLUTE_INDIRECT.bits()
            | Self::ABSOLUTE_X_INDIRECT.bits()
            | Self::ABSOLUTE_INDIRECT_LONG.bits();
        const FAR_FORMS = Self::ABSOLUTE_LONG.bits() | Self::ABSOLUTE_LONG_X.bits();
        const IMMEDIATE_FORMS = Self::IMMEDIATE_ACCUMULATOR.bits()
            | Self::IMMEDIATE_INDEX.bits()
            | Self::IMMEDIATE_IMPLICIT.bits()
            | Self::IMMEDIATE_IMPLICIT_WORD.bits();
        const BRANCH_FORMS = Self::RELATIVE.bits() | Self::RELATIVE_LONG.bits();
    }
}

impl ModeSet {
    /// Number of modes in the set.
    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    pub fn contains_mode(&self, mode: AddressingMode) -> bool {
        self.contains(mode.bit())
    }

    /// Iterate over the modes in ordinal order.
    pub fn modes(&self) -> impl Iterator<Item = AddressingMode> + '_ {
        AddressingMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(mode.bit()))
    }

    /// The only mode in the set, if it has exactly one.
    pub fn single(&self) -> Option<AddressingMode> {
        if self.len() == 1 {
            self.modes().next()
        } else {
            None
        }
    }
}

impl FromIterator<AddressingMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = AddressingMode>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ModeSet::empty(), |set, mode| set | mode.bit())
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for mode in self.modes() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{mode}")?;
        }
        Ok(())
    }
}
