// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU families. Each family owns an addressing-mode vocabulary, the base
//! instruction table its CPUs extend, and the resolver and emitter shared by
//! those CPUs.

pub mod mos6502;
