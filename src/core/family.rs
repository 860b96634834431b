// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction set abstraction shared by the 6502 family and SWEET16.
//!
//! # Architecture Overview
//!
//! ```text
//! Driver → Mnemonic Resolver → Mode Resolver → Byte Emitter → Output
//! ```
//!
//! - **Driver**: Owns the CPU selection, evaluates operands once per pass
//! - **Mnemonic Resolver**: Finds the mnemonic in the active CPU's table
//! - **Mode Resolver**: Picks one addressing mode and the instruction length
//! - **Byte Emitter**: Produces opcode and operand bytes for that choice
//!
//! Each instruction set has its own operand and mode vocabulary, exposed as
//! associated types of [`InstructionSet`].

use std::fmt;

use crate::core::cpu::{CpuVariant, EncodeError, RegisterWidths};

/// Assembler state visible to the resolver and the emitter.
pub trait AssemblerContext {
    /// Address of the instruction being encoded.
    fn current_address(&self) -> u32;

    /// Current pass, starting at 1.
    fn pass(&self) -> u8;

    /// Accumulator and index widths in effect.
    fn register_widths(&self) -> RegisterWidths;

    /// Length this instruction had in the previous pass, if any.
    fn previous_length(&self) -> Option<usize> {
        None
    }
}

/// Plain context value for callers without a driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleContext {
    pub address: u32,
    pub pass: u8,
    pub widths: RegisterWidths,
    pub previous_length: Option<usize>,
}

impl SimpleContext {
    pub fn at(address: u32) -> Self {
        Self {
            address,
            pass: 1,
            ..Self::default()
        }
    }

    pub fn with_widths(mut self, widths: RegisterWidths) -> Self {
        self.widths = widths;
        self
    }

    pub fn with_previous_length(mut self, length: Option<usize>) -> Self {
        self.previous_length = length;
        self
    }
}

impl AssemblerContext for SimpleContext {
    fn current_address(&self) -> u32 {
        self.address
    }

    fn pass(&self) -> u8 {
        self.pass
    }

    fn register_widths(&self) -> RegisterWidths {
        self.widths
    }

    fn previous_length(&self) -> Option<usize> {
        self.previous_length
    }
}

/// Operand payload carried from the resolver to the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandValue {
    None,
    /// Address or immediate, emitted little-endian.
    Value(i64),
    /// Branch target address; the emitter computes the displacement.
    Target(i64),
    ZeroPageBranch { zp: i64, target: i64 },
    BlockMove { src: i64, dst: i64 },
    /// Immediate byte followed by a zero-page address.
    ImmediateZeroPage { value: i64, zp: i64 },
    /// Register number folded into the opcode.
    Register(u8),
    /// Register number plus a 16-bit constant (SWEET16 `SET`).
    RegisterValue { register: u8, value: i64 },
}

/// The addressing mode chosen for one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<M> {
    pub mode: M,
    pub value: OperandValue,
    /// Total instruction length, prefix and opcode included.
    pub length: usize,
    /// False while the operand depends on an undefined symbol. The emitter
    /// then writes zero operand bytes of the right length.
    pub known: bool,
}

/// Bytes produced for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEncoding<M> {
    pub mode: M,
    pub opcode: Vec<u8>,
    pub operand: Vec<u8>,
}

impl<M> ResolvedEncoding<M> {
    pub fn len(&self) -> usize {
        self.opcode.len() + self.operand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.opcode);
        bytes.extend_from_slice(&self.operand);
        bytes
    }
}

/// Result of a reverse (opcode to instruction) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<M> {
    pub index: usize,
    pub mnemonic: &'static str,
    pub mode: M,
    /// Total instruction length, opcode bytes included.
    pub length: usize,
}

/// An instruction table with its resolver and emitter.
pub trait InstructionSet {
    type Mode: Copy + fmt::Debug + fmt::Display + PartialEq;
    type Operand;

    fn cpu(&self) -> CpuVariant;

    /// Index of `mnemonic` in this table (case-insensitive).
    fn find_instruction(&self, mnemonic: &str) -> Option<usize>;

    fn mnemonic(&self, index: usize) -> &'static str;

    /// Choose exactly one addressing mode for the operand.
    fn resolve(
        &self,
        index: usize,
        operand: &Self::Operand,
        ctx: &dyn AssemblerContext,
    ) -> Result<Resolution<Self::Mode>, EncodeError>;

    /// Longest length any mode matching the operand's shape could take.
    fn worst_case_length(
        &self,
        index: usize,
        operand: &Self::Operand,
        ctx: &dyn AssemblerContext,
    ) -> usize;

    fn emit(
        &self,
        index: usize,
        resolution: &Resolution<Self::Mode>,
        ctx: &dyn AssemblerContext,
    ) -> Result<ResolvedEncoding<Self::Mode>, EncodeError>;

    fn decode(&self, bytes: &[u8], widths: RegisterWidths) -> Option<Decoded<Self::Mode>>;

    /// Resolve and emit in one step.
    fn encode(
        &self,
        mnemonic: &str,
        operand: &Self::Operand,
        ctx: &dyn AssemblerContext,
    ) -> Result<ResolvedEncoding<Self::Mode>, EncodeError> {
        let index = self
            .find_instruction(mnemonic)
            .ok_or_else(|| EncodeError::unknown_mnemonic(mnemonic))?;
        let resolution = self.resolve(index, operand, ctx)?;
        self.emit(index, &resolution, ctx)
    }
}

/// Write `value` little-endian into `len` bytes, dropping higher bytes.
pub fn little_endian(value: i64, len: usize) -> Vec<u8> {
    (0..len).map(|i| (value >> (8 * i)) as u8).collect()
}

/// True if `value` fits a signed 8-bit displacement.
pub fn fits_i8(value: i64) -> bool {
    (i64::from(i8::MIN)..=i64::from(i8::MAX)).contains(&value)
}

/// True if `value` fits a signed 16-bit displacement.
pub fn fits_i16(value: i64) -> bool {
    (i64::from(i16::MIN)..=i64::from(i16::MAX)).contains(&value)
}
