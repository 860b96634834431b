// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! CPU-agnostic encoder core.
//!
//! # Components
//!
//! - [`cpu`] - CPU variants, register widths and encoding errors
//! - [`family`] - the instruction-set trait and the resolution types it trades in
//! - [`registry`] - capability masks and per-CPU table derivation
//! - [`assembler`] - multi-pass driver, diagnostics and listings

pub mod assembler;
pub mod cpu;
pub mod family;
pub mod registry;

// Re-exports for convenience
pub use cpu::{CpuVariant, EncodeError, EncodeErrorKind, RegisterWidths, UnknownCpu, Width};
pub use family::{AssemblerContext, InstructionSet, OperandValue, Resolution, ResolvedEncoding, SimpleContext};
pub use registry::{ActiveTable, CpuSelection};
