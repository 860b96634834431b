// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MEGA65 45GS02 CPU extension module.
//!
//! Everything the 4510 has, plus prefixed 32-bit pointer (`[zp],Z`) and
//! Q register instructions.

pub mod instructions;
