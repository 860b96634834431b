// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Operand classification for the MOS 6502 family.
//!
//! Operands arrive already parsed: the shape (immediate, indexed, indirect,
//! ...) comes from syntax, the value from the expression evaluator. The type
//! is generic over the value so callers can keep symbolic operands around and
//! evaluate them once per pass with [`Operand::map`].

use super::mode::ModeSet;

/// An evaluated operand value.
///
/// `known == false` marks a value that depends on a symbol that is not yet
/// defined; `value` is then only a placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Value {
    pub value: i64,
    pub known: bool,
}

impl Value {
    pub const fn known(value: i64) -> Self {
        Self { value, known: true }
    }

    pub const fn unknown() -> Self {
        Self {
            value: 0,
            known: false,
        }
    }

    /// True if the value is known and fits in the zero page.
    pub fn is_zero_page(&self) -> bool {
        self.known && (0..=0xFF).contains(&self.value)
    }
}

/// Explicit operand size from the source syntax (`<`, `a:`, `f:`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressSize {
    #[default]
    Auto,
    ZeroPage,
    Absolute,
    Far,
}

/// Index register for `expr,X` / `expr,Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexRegister {
    X,
    Y,
}

/// Classified operand, as produced by the family parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand<V> {
    /// No operand
    Implicit,
    /// A
    Accumulator,
    /// Q (45GS02)
    QRegister,
    /// #expr
    Immediate(V),
    /// expr (zero page, absolute or far)
    Direct { value: V, size: AddressSize },
    /// expr,X / expr,Y
    Indexed {
        value: V,
        size: AddressSize,
        index: IndexRegister,
    },
    /// expr,S
    StackRelative(V),
    /// (expr)
    Indirect(V),
    /// (expr,X)
    IndirectX(V),
    /// (expr),Y
    IndirectY(V),
    /// (expr),Z (4510)
    IndirectZ(V),
    /// (expr,S),Y
    StackRelativeIndirectY(V),
    /// [expr]
    IndirectLong(V),
    /// [expr],Y
    IndirectLongY(V),
    /// [expr],Z (45GS02)
    IndirectLongZ(V),
    /// Branch target address
    BranchTarget(V),
    /// zp,target (bit branches)
    ZeroPageBranch { zp: V, target: V },
    /// src,dst banks (MVN/MVP)
    BlockMove { src: V, dst: V },
    /// \$FFxx (m740)
    SpecialPage(V),
    /// #imm,zp (m740 LDM)
    ImmediateZeroPage { value: V, zp: V },
}

impl<V> Operand<V> {
    /// Addressing modes consistent with the operand's syntax.
    pub fn shape_modes(&self) -> ModeSet {
        match self {
            Operand::Implicit => ModeSet::IMPLICIT | ModeSet::ACCUMULATOR | ModeSet::Q_REGISTER,
            Operand::Accumulator => ModeSet::ACCUMULATOR,
            Operand::QRegister => ModeSet::Q_REGISTER,
            Operand::Immediate(_) => ModeSet::IMMEDIATE_FORMS,
            Operand::Direct { size, .. } => {
                let width = match size {
                    AddressSize::Auto => {
                        ModeSet::ZERO_PAGE | ModeSet::ABSOLUTE | ModeSet::ABSOLUTE_LONG
                    }
                    AddressSize::ZeroPage => ModeSet::ZERO_PAGE,
                    AddressSize::Absolute => ModeSet::ABSOLUTE,
                    AddressSize::Far => ModeSet::ABSOLUTE_LONG,
                };
                width | ModeSet::BRANCH_FORMS
            }
            Operand::Indexed {
                size,
                index: IndexRegister::X,
                ..
            } => match size {
                AddressSize::Auto => {
                    ModeSet::ZERO_PAGE_X | ModeSet::ABSOLUTE_X | ModeSet::ABSOLUTE_LONG_X
                }
                AddressSize::ZeroPage => ModeSet::ZERO_PAGE_X,
                AddressSize::Absolute => ModeSet::ABSOLUTE_X,
                AddressSize::Far => ModeSet::ABSOLUTE_LONG_X,
            },
            Operand::Indexed {
                size,
                index: IndexRegister::Y,
                ..
            } => match size {
                AddressSize::Auto => ModeSet::ZERO_PAGE_Y | ModeSet::ABSOLUTE_Y,
                AddressSize::ZeroPage => ModeSet::ZERO_PAGE_Y,
                AddressSize::Absolute => ModeSet::ABSOLUTE_Y,
                AddressSize::Far => ModeSet::empty(),
            },
            Operand::StackRelative(_) => ModeSet::STACK_RELATIVE,
            Operand::Indirect(_) => ModeSet::ZERO_PAGE_INDIRECT | ModeSet::ABSOLUTE_INDIRECT,
            Operand::IndirectX(_) => ModeSet::ZERO_PAGE_X_INDIRECT | ModeSet::ABSOLUTE_X_INDIRECT,
            Operand::IndirectY(_) => ModeSet::ZERO_PAGE_INDIRECT_Y,
            Operand::IndirectZ(_) => ModeSet::ZERO_PAGE_INDIRECT,
            Operand::StackRelativeIndirectY(_) => ModeSet::STACK_RELATIVE_INDIRECT_Y,
            Operand::IndirectLong(_) => {
                ModeSet::ZERO_PAGE_INDIRECT_LONG | ModeSet::ABSOLUTE_INDIRECT_LONG
            }
            Operand::IndirectLongY(_) => ModeSet::ZERO_PAGE_INDIRECT_LONG_Y,
            Operand::IndirectLongZ(_) => ModeSet::BASE_INDEXED_INDIRECT_32,
            Operand::BranchTarget(_) => ModeSet::BRANCH_FORMS,
            Operand::ZeroPageBranch { .. } => ModeSet::ZERO_PAGE_RELATIVE,
            Operand::BlockMove { .. } => ModeSet::BLOCK_MOVE,
            Operand::SpecialPage(_) => ModeSet::SPECIAL_PAGE,
            Operand::ImmediateZeroPage { .. } => ModeSet::IMMEDIATE_ZERO_PAGE,
        }
    }

    /// Explicit size override, if the shape carries one.
    pub fn size(&self) -> AddressSize {
        match self {
            Operand::Direct { size, .. } | Operand::Indexed { size, .. } => *size,
            _ => AddressSize::Auto,
        }
    }

    /// The single value carried by the operand, if it carries exactly one.
    pub fn value(&self) -> Option<&V> {
        match self {
            Operand::Implicit
            | Operand::Accumulator
            | Operand::QRegister
            | Operand::ZeroPageBranch { .. }
            | Operand::BlockMove { .. }
            | Operand::ImmediateZeroPage { .. } => None,
            Operand::Immediate(v)
            | Operand::Direct { value: v, .. }
            | Operand::Indexed { value: v, .. }
            | Operand::StackRelative(v)
            | Operand::Indirect(v)
            | Operand::IndirectX(v)
            | Operand::IndirectY(v)
            | Operand::IndirectZ(v)
            | Operand::StackRelativeIndirectY(v)
            | Operand::IndirectLong(v)
            | Operand::IndirectLongY(v)
            | Operand::IndirectLongZ(v)
            | Operand::BranchTarget(v)
            | Operand::SpecialPage(v) => Some(v),
        }
    }

    /// Convert every value with `f`, keeping the shape.
    pub fn map<U, E>(&self, mut f: impl FnMut(&V) -> Result<U, E>) -> Result<Operand<U>, E> {
        Ok(match self {
            Operand::Implicit => Operand::Implicit,
            Operand::Accumulator => Operand::Accumulator,
            Operand::QRegister => Operand::QRegister,
            Operand::Immediate(v) => Operand::Immediate(f(v)?),
            Operand::Direct { value, size } => Operand::Direct {
                value: f(value)?,
                size: *size,
            },
            Operand::Indexed { value, size, index } => Operand::Indexed {
                value: f(value)?,
                size: *size,
                index: *index,
            },
            Operand::StackRelative(v) => Operand::StackRelative(f(v)?),
            Operand::Indirect(v) => Operand::Indirect(f(v)?),
            Operand::IndirectX(v) => Operand::IndirectX(f(v)?),
            Operand::IndirectY(v) => Operand::IndirectY(f(v)?),
            Operand::IndirectZ(v) => Operand::IndirectZ(f(v)?),
            Operand::StackRelativeIndirectY(v) => Operand::StackRelativeIndirectY(f(v)?),
            Operand::IndirectLong(v) => Operand::IndirectLong(f(v)?),
            Operand::IndirectLongY(v) => Operand::IndirectLongY(f(v)?),
            Operand::IndirectLongZ(v) => Operand::IndirectLongZ(f(v)?),
            Operand::BranchTarget(v) => Operand::BranchTarget(f(v)?),
            Operand::ZeroPageBranch { zp, target } => Operand::ZeroPageBranch {
                zp: f(zp)?,
                target: f(target)?,
            },
            Operand::BlockMove { src, dst } => Operand::BlockMove {
                src: f(src)?,
                dst: f(dst)?,
            },
            Operand::SpecialPage(v) => Operand::SpecialPage(f(v)?),
            Operand::ImmediateZeroPage { value, zp } => Operand::ImmediateZeroPage {
                value: f(value)?,
                zp: f(zp)?,
            },
        })
    }
}

impl Operand<Value> {
    /// Shorthand for a direct operand with automatic sizing.
    pub fn direct(value: i64) -> Self {
        Operand::Direct {
            value: Value::known(value),
            size: AddressSize::Auto,
        }
    }

    pub fn immediate(value: i64) -> Self {
        Operand::Immediate(Value::known(value))
    }

    pub fn indexed(value: i64, index: IndexRegister) -> Self {
        Operand::Indexed {
            value: Value::known(value),
            size: AddressSize::Auto,
            index,
        }
    }

    pub fn branch(target: i64) -> Self {
        Operand::BranchTarget(Value::known(target))
    }

    /// True if every value the operand carries is known.
    pub fn is_known(&self) -> bool {
        match self {
            Operand::ZeroPageBranch { zp, target } => zp.known && target.known,
            Operand::BlockMove { src, dst } => src.known && dst.known,
            Operand::ImmediateZeroPage { value, zp } => value.known && zp.known,
            other => other.value().map_or(true, |v| v.known),
        }
    }
}
