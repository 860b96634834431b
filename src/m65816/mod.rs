// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! WDC 65816 CPU extension module.
//!
//! Adds 24-bit long addressing (`LDA $123456`, `LDA $123456,X`), indirect
//! long (`[dp]`, `[dp],Y`, `JML [$1234]`), stack relative (`sr,S`,
//! `(sr,S),Y`), 16-bit branches (`BRL`, `PER`), block moves (`MVN`, `MVP`)
//! and the register-width dependent immediates.

pub mod instructions;
