// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SWEET16 pseudo CPU.
//!
//! Wozniak's 16-bit interpreter for the Apple II. It has sixteen 16-bit
//! registers and a byte code that shares nothing with the 6502 opcode map,
//! so it carries its own mode vocabulary, table and resolver.
//!
//! | Syntax | Mode |
//! |--------|------|
//! | `RTN` | Implicit |
//! | `BNZ label` | Branch |
//! | `SET R1,$1234` | Immediate |
//! | `LD @R2` | Indirect |
//! | `ADD R3` | Register |

mod handler;
pub mod instructions;
pub mod mode;

pub use handler::{emit, resolve};
pub use instructions::{Sweet16Descriptor, Sweet16Table};
pub use mode::{Sweet16Mode, Sweet16ModeSet, Sweet16Operand};
