// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 CPU family.
//!
//! This module provides the addressing-mode vocabulary, the layered
//! instruction tables, the mode resolver and the byte emitter shared by all
//! 6502-derived CPUs (6502, 65C02, 65816, 4510, 45GS02, m740).
//!
//! # Addressing Modes (Family Common)
//!
//! | Syntax | Mode |
//! |--------|------|
//! | `#$20` | Immediate |
//! | `$20` | Zero Page |
//! | `$20,X` | Zero Page,X |
//! | `$20,Y` | Zero Page,Y |
//! | `$1234` | Absolute |
//! | `$1234,X` | Absolute,X |
//! | `$1234,Y` | Absolute,Y |
//! | `($20,X)` | Indexed Indirect |
//! | `($20),Y` | Indirect Indexed |
//!
//! # CPU Extensions
//!
//! Some addressing modes are CPU-specific:
//! - `($20)` - Zero Page Indirect (65C02, m740; `(zp),Z` on the 4510)
//! - `($1234,X)` - Absolute Indexed Indirect (65C02 and later)
//! - `f:$123456` - Absolute Long (65816)
//! - `[$20],Z` - 32-bit Base Indirect (45GS02)

pub mod emitter;
pub mod handler;
pub mod mode;
pub mod operand;
pub mod table;

pub use handler::{resolve, worst_case_length};
pub use mode::{AddressingMode, ModeSet};
pub use operand::{AddressSize, IndexRegister, Operand, Value};
pub use table::{InstructionDescriptor, InstructionTable, TableEntry, FAMILY_INSTRUCTION_TABLE};
