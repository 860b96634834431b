// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU identifiers, register widths and shared encoding errors.

use std::fmt;
use std::str::FromStr;

/// CPU variants understood by the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CpuVariant {
    /// NMOS 6502
    M6502,
    /// WDC 65C02 (including the Rockwell bit instructions)
    M65C02,
    /// WDC 65816 / 65802
    W65816,
    /// CSG 4510 (65CE02 core of the C65)
    Csg4510,
    /// MEGA65 45GS02
    M45GS02,
    /// Mitsubishi 740 series
    M740,
    /// Wozniak's SWEET16 interpreter
    Sweet16,
}

impl CpuVariant {
    pub const ALL: [CpuVariant; 7] = [
        CpuVariant::M6502,
        CpuVariant::M65C02,
        CpuVariant::W65816,
        CpuVariant::Csg4510,
        CpuVariant::M45GS02,
        CpuVariant::M740,
        CpuVariant::Sweet16,
    ];

    /// Canonical CPU name.
    pub fn name(&self) -> &'static str {
        match self {
            CpuVariant::M6502 => "6502",
            CpuVariant::M65C02 => "65C02",
            CpuVariant::W65816 => "65816",
            CpuVariant::Csg4510 => "4510",
            CpuVariant::M45GS02 => "45GS02",
            CpuVariant::M740 => "m740",
            CpuVariant::Sweet16 => "sweet16",
        }
    }

    /// True for the SWEET16 pseudo CPU, which has its own mode vocabulary.
    pub fn is_sweet16(&self) -> bool {
        matches!(self, CpuVariant::Sweet16)
    }
}

impl fmt::Display for CpuVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a CPU name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCpu(pub String);

impl fmt::Display for UnknownCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown CPU: {}", self.0)
    }
}

impl std::error::Error for UnknownCpu {}

impl FromStr for CpuVariant {
    type Err = UnknownCpu;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CpuVariant::ALL
            .into_iter()
            .find(|cpu| cpu.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCpu(name.to_string()))
    }
}

/// Register width on the 65816.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Width {
    #[default]
    Bits8,
    Bits16,
}

/// Accumulator and index widths as tracked by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterWidths {
    pub accumulator: Width,
    pub index: Width,
}

impl RegisterWidths {
    pub const fn new(accumulator: Width, index: Width) -> Self {
        Self { accumulator, index }
    }
}

/// Categories of encoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    UnknownMnemonic,
    UnsupportedMode,
    BranchOutOfRange,
    AmbiguousOperand,
    RangeError,
    PhaseError,
}

impl EncodeErrorKind {
    /// Only phase errors invalidate the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EncodeErrorKind::PhaseError)
    }
}

/// Error returned by instruction resolution and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
    pub message: String,
}

impl EncodeError {
    pub fn new(kind: EncodeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_mnemonic(mnemonic: &str) -> Self {
        Self::new(
            EncodeErrorKind::UnknownMnemonic,
            format!("Unknown mnemonic: {mnemonic}"),
        )
    }

    pub fn unsupported_mode(mnemonic: &str, cpu: CpuVariant) -> Self {
        Self::new(
            EncodeErrorKind::UnsupportedMode,
            format!("Illegal addressing mode for {mnemonic} on {cpu}"),
        )
    }

    pub fn branch_out_of_range(offset: i64) -> Self {
        Self::new(
            EncodeErrorKind::BranchOutOfRange,
            format!("Branch target out of range: offset {offset}"),
        )
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(EncodeErrorKind::RangeError, message)
    }

    pub fn phase(message: impl Into<String>) -> Self {
        Self::new(EncodeErrorKind::PhaseError, message)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_names_parse_case_insensitively() {
        assert_eq!("65c02".parse::<CpuVariant>(), Ok(CpuVariant::M65C02));
        assert_eq!("45gs02".parse::<CpuVariant>(), Ok(CpuVariant::M45GS02));
        assert_eq!("M740".parse::<CpuVariant>(), Ok(CpuVariant::M740));
        assert_eq!(
            "z80".parse::<CpuVariant>(),
            Err(UnknownCpu("z80".to_string()))
        );
    }

    #[test]
    fn every_cpu_name_round_trips() {
        for cpu in CpuVariant::ALL {
            assert_eq!(cpu.name().parse::<CpuVariant>(), Ok(cpu));
        }
    }

    #[test]
    fn only_phase_errors_are_fatal() {
        assert!(EncodeErrorKind::PhaseError.is_fatal());
        assert!(!EncodeErrorKind::BranchOutOfRange.is_fatal());
        assert!(!EncodeErrorKind::UnsupportedMode.is_fatal());
    }
}
