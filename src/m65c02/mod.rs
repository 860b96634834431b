// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! WDC 65C02 CPU extension module.
//!
//! This module provides the 65C02 extensions to the base 6502 instruction
//! set. The core 6502 table lives in the MOS 6502 family; this module adds
//! only the layers on top of it.
//!
//! # 65C02 Extensions
//!
//! ## New Instructions
//! - `BRA` - Branch Always
//! - `PHX`, `PLX`, `PHY`, `PLY` - Push/Pull index registers
//! - `STZ` - Store Zero
//! - `TRB`, `TSB` - Test and Reset/Set Bits
//! - `BBRn`, `BBSn`, `RMBn`, `SMBn` - Rockwell bit instructions (n = 0-7)
//! - `STP`, `WAI` - Stop and Wait
//!
//! ## New Addressing Modes
//! - Zero Page Indirect: `LDA ($20)`
//! - Absolute Indexed Indirect: `JMP ($1234,X)`
//! - Zero Page Relative: `BBR0 $20,label`

pub mod instructions;
