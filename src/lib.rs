// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the encoder, the CPU tables and the pass driver.
pub mod cli;
pub mod core;
pub mod families;
pub mod m4510;
pub mod m45gs02;
pub mod m65816;
pub mod m65c02;
pub mod m740;
pub mod sweet16;
