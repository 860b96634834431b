// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CSG 4510 CPU extension module.
//!
//! The 4510 is the 65CE02 core of the Commodore 65. It adds the Z register,
//! 16-bit branches, word increment/shift instructions and `PHW #imm16`. On
//! this CPU `(zp)` is `(zp),Z`.

pub mod instructions;
