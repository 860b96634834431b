// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Mitsubishi 740 CPU extension module.
//!
//! Adds accumulator and zero-page bit instructions, `(zp)` jumps and the
//! one-byte special page call `JSR \$FFxx`.

pub mod instructions;
