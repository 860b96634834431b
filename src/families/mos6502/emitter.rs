// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Byte emitter for the MOS 6502 family.

use crate::core::cpu::{EncodeError, EncodeErrorKind};
use crate::core::family::{
    fits_i16, fits_i8, little_endian, AssemblerContext, OperandValue, Resolution,
    ResolvedEncoding,
};
use crate::families::mos6502::mode::AddressingMode;
use crate::families::mos6502::table::InstructionTable;

/// Emit prefix, opcode and operand bytes for a resolved instruction.
pub fn emit(
    table: &InstructionTable,
    index: usize,
    resolution: &Resolution<AddressingMode>,
    ctx: &dyn AssemblerContext,
) -> Result<ResolvedEncoding<AddressingMode>, EncodeError> {
    let desc = table.descriptor(index);
    let mode = resolution.mode;
    let encoding = desc
        .encoding(mode)
        .ok_or_else(|| EncodeError::unsupported_mode(desc.mnemonic, table.cpu()))?;
    let operand_len = mode.operand_len(table.cpu(), ctx.register_widths());
    let address = i64::from(ctx.current_address());

    let operand = if !resolution.known {
        vec![0; operand_len]
    } else {
        match resolution.value {
            OperandValue::None => Vec::new(),
            OperandValue::Value(value) => little_endian(value, operand_len),
            OperandValue::Target(target) => {
                let offset = target - (address + resolution.length as i64);
                let fits = match operand_len {
                    1 => fits_i8(offset),
                    _ => fits_i16(offset),
                };
                if !fits {
                    return Err(EncodeError::branch_out_of_range(offset));
                }
                little_endian(offset, operand_len)
            }
            OperandValue::ZeroPageBranch { zp, target } => {
                let offset = target - (address + 3);
                if !fits_i8(offset) {
                    return Err(EncodeError::branch_out_of_range(offset));
                }
                vec![zp as u8, offset as u8]
            }
            // Machine order is destination bank first.
            OperandValue::BlockMove { src, dst } => vec![dst as u8, src as u8],
            OperandValue::ImmediateZeroPage { value, zp } => vec![value as u8, zp as u8],
            OperandValue::Register(_) | OperandValue::RegisterValue { .. } => {
                return Err(EncodeError::new(
                    EncodeErrorKind::UnsupportedMode,
                    format!("Register operand is not valid for {}", desc.mnemonic),
                ));
            }
        }
    };

    let encoded = ResolvedEncoding {
        mode,
        opcode: encoding.opcode_bytes(),
        operand,
    };
    if encoded.len() != resolution.length {
        return Err(EncodeError::phase(format!(
            "Encoded length {} differs from resolved length {} for {}",
            encoded.len(),
            resolution.length,
            desc.mnemonic
        )));
    }
    Ok(encoded)
}
