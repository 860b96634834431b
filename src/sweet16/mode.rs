// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SWEET16 addressing modes and operands.

use std::fmt;

use bitflags::bitflags;

/// SWEET16 addressing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Sweet16Mode {
    Implicit = 0,
    Branch = 1,
    /// `SET Rn,value`
    Immediate = 2,
    /// `@Rn`
    Indirect = 3,
    /// `Rn`
    Register = 4,
}

impl Sweet16Mode {
    pub const ALL: [Sweet16Mode; 5] = [
        Sweet16Mode::Implicit,
        Sweet16Mode::Branch,
        Sweet16Mode::Immediate,
        Sweet16Mode::Indirect,
        Sweet16Mode::Register,
    ];

    pub fn bit(self) -> Sweet16ModeSet {
        Sweet16ModeSet::from_bits_retain(1 << (self as u8))
    }

    /// Operand bytes that follow the opcode.
    pub fn extra_bytes(self) -> usize {
        match self {
            Sweet16Mode::Branch => 1,
            Sweet16Mode::Immediate => 2,
            _ => 0,
        }
    }

    /// True if the register number is folded into the opcode's low nibble.
    pub fn has_register(self) -> bool {
        matches!(
            self,
            Sweet16Mode::Immediate | Sweet16Mode::Indirect | Sweet16Mode::Register
        )
    }
}

impl fmt::Display for Sweet16Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sweet16Mode::Implicit => "imp",
            Sweet16Mode::Branch => "rel",
            Sweet16Mode::Immediate => "rn,#imm",
            Sweet16Mode::Indirect => "@rn",
            Sweet16Mode::Register => "rn",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Set of SWEET16 addressing modes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sweet16ModeSet: u8 {
        const IMPLICIT = 1 << 0;
        const BRANCH = 1 << 1;
        const IMMEDIATE = 1 << 2;
        const INDIRECT = 1 << 3;
        const REGISTER = 1 << 4;
    }
}

impl Sweet16ModeSet {
    pub fn modes(&self) -> impl Iterator<Item = Sweet16Mode> + '_ {
        Sweet16Mode::ALL
            .into_iter()
            .filter(move |mode| self.contains(mode.bit()))
    }
}

impl FromIterator<Sweet16Mode> for Sweet16ModeSet {
    fn from_iter<I: IntoIterator<Item = Sweet16Mode>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Sweet16ModeSet::empty(), |set, mode| set | mode.bit())
    }
}

/// Classified SWEET16 operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sweet16Operand<V> {
    Implicit,
    Register(u8),
    Indirect(u8),
    Immediate { register: u8, value: V },
    BranchTarget(V),
}

impl<V> Sweet16Operand<V> {
    pub fn shape_modes(&self) -> Sweet16ModeSet {
        match self {
            Sweet16Operand::Implicit => Sweet16ModeSet::IMPLICIT,
            Sweet16Operand::Register(_) => Sweet16ModeSet::REGISTER,
            Sweet16Operand::Indirect(_) => Sweet16ModeSet::INDIRECT,
            Sweet16Operand::Immediate { .. } => Sweet16ModeSet::IMMEDIATE,
            Sweet16Operand::BranchTarget(_) => Sweet16ModeSet::BRANCH,
        }
    }

    pub fn register(&self) -> Option<u8> {
        match self {
            Sweet16Operand::Register(reg)
            | Sweet16Operand::Indirect(reg)
            | Sweet16Operand::Immediate { register: reg, .. } => Some(*reg),
            _ => None,
        }
    }

    /// Convert the value with `f`, keeping the shape.
    pub fn map<U, E>(
        &self,
        mut f: impl FnMut(&V) -> Result<U, E>,
    ) -> Result<Sweet16Operand<U>, E> {
        Ok(match self {
            Sweet16Operand::Implicit => Sweet16Operand::Implicit,
            Sweet16Operand::Register(reg) => Sweet16Operand::Register(*reg),
            Sweet16Operand::Indirect(reg) => Sweet16Operand::Indirect(*reg),
            Sweet16Operand::Immediate { register, value } => Sweet16Operand::Immediate {
                register: *register,
                value: f(value)?,
            },
            Sweet16Operand::BranchTarget(target) => Sweet16Operand::BranchTarget(f(target)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(Sweet16Mode::Implicit.extra_bytes(), 0);
        assert_eq!(Sweet16Mode::Branch.extra_bytes(), 1);
        assert_eq!(Sweet16Mode::Immediate.extra_bytes(), 2);
        assert_eq!(Sweet16Mode::Register.extra_bytes(), 0);
    }

    #[test]
    fn shapes_are_single_modes() {
        let op: Sweet16Operand<i64> = Sweet16Operand::Indirect(3);
        assert_eq!(op.shape_modes(), Sweet16ModeSet::INDIRECT);
        assert_eq!(op.register(), Some(3));
        let set: Sweet16ModeSet = [Sweet16Mode::Register, Sweet16Mode::Indirect]
            .into_iter()
            .collect();
        assert_eq!(
            set.modes().collect::<Vec<_>>(),
            vec![Sweet16Mode::Indirect, Sweet16Mode::Register]
        );
    }
}
