// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! SWEET16 resolver and emitter.
//!
//! Every SWEET16 operand shape maps to exactly one mode, so resolution is a
//! table check plus range checks on the register and the value.

use crate::core::cpu::{CpuVariant, EncodeError, EncodeErrorKind, RegisterWidths};
use crate::core::family::{
    fits_i8, little_endian, AssemblerContext, Decoded, InstructionSet, OperandValue, Resolution,
    ResolvedEncoding,
};
use crate::families::mos6502::operand::Value;
use crate::sweet16::instructions::Sweet16Table;
use crate::sweet16::mode::{Sweet16Mode, Sweet16Operand};

fn select_mode(
    table: &Sweet16Table,
    index: usize,
    operand: &Sweet16Operand<Value>,
) -> Result<Sweet16Mode, EncodeError> {
    let desc = table.descriptor(index);
    (desc.modes() & operand.shape_modes())
        .modes()
        .next()
        .ok_or_else(|| EncodeError::unsupported_mode(desc.mnemonic, CpuVariant::Sweet16))
}

pub fn resolve(
    table: &Sweet16Table,
    index: usize,
    operand: &Sweet16Operand<Value>,
    ctx: &dyn AssemblerContext,
) -> Result<Resolution<Sweet16Mode>, EncodeError> {
    let mode = select_mode(table, index, operand)?;
    if let Some(register) = operand.register() {
        if register > 15 {
            return Err(EncodeError::range(format!(
                "Register R{register} out of range"
            )));
        }
    }

    let length = 1 + mode.extra_bytes();
    let (value, known) = match operand {
        Sweet16Operand::Implicit => (OperandValue::None, true),
        Sweet16Operand::Register(register) | Sweet16Operand::Indirect(register) => {
            (OperandValue::Register(*register), true)
        }
        Sweet16Operand::Immediate { register, value } => {
            if value.known && !(-0x8000..=0xFFFF).contains(&value.value) {
                return Err(EncodeError::range(format!(
                    "Value ${:X} out of range for {mode}",
                    value.value
                )));
            }
            (
                OperandValue::RegisterValue {
                    register: *register,
                    value: value.value,
                },
                value.known,
            )
        }
        Sweet16Operand::BranchTarget(target) => {
            if target.known {
                let offset = target.value - (i64::from(ctx.current_address()) + 2);
                if !fits_i8(offset) {
                    return Err(EncodeError::branch_out_of_range(offset));
                }
            }
            (OperandValue::Target(target.value), target.known)
        }
    };

    Ok(Resolution {
        mode,
        value,
        length,
        known,
    })
}

pub fn emit(
    table: &Sweet16Table,
    index: usize,
    resolution: &Resolution<Sweet16Mode>,
    ctx: &dyn AssemblerContext,
) -> Result<ResolvedEncoding<Sweet16Mode>, EncodeError> {
    let desc = table.descriptor(index);
    let mode = resolution.mode;
    let base = desc
        .opcode(mode)
        .ok_or_else(|| EncodeError::unsupported_mode(desc.mnemonic, CpuVariant::Sweet16))?;

    let (opcode, operand) = match resolution.value {
        OperandValue::None => (base, Vec::new()),
        OperandValue::Register(register) => (base | (register & 0x0F), Vec::new()),
        OperandValue::RegisterValue { register, value } => {
            let bytes = if resolution.known {
                little_endian(value, 2)
            } else {
                vec![0; 2]
            };
            (base | (register & 0x0F), bytes)
        }
        OperandValue::Target(target) => {
            let offset = if resolution.known {
                let offset = target - (i64::from(ctx.current_address()) + 2);
                if !fits_i8(offset) {
                    return Err(EncodeError::branch_out_of_range(offset));
                }
                offset
            } else {
                0
            };
            (base, vec![offset as u8])
        }
        _ => {
            return Err(EncodeError::new(
                EncodeErrorKind::UnsupportedMode,
                format!("Operand is not valid for SWEET16 {}", desc.mnemonic),
            ));
        }
    };

    let encoded = ResolvedEncoding {
        mode,
        opcode: vec![opcode],
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

impl InstructionSet for Sweet16Table {
    type Mode = Sweet16Mode;
    type Operand = Sweet16Operand<Value>;

    fn cpu(&self) -> CpuVariant {
        CpuVariant::Sweet16
    }

    fn find_instruction(&self, mnemonic: &str) -> Option<usize> {
        Sweet16Table::find_instruction(self, mnemonic)
    }

    fn mnemonic(&self, index: usize) -> &'static str {
        self.descriptor(index).mnemonic
    }

    fn resolve(
        &self,
        index: usize,
        operand: &Sweet16Operand<Value>,
        ctx: &dyn AssemblerContext,
    ) -> Result<Resolution<Sweet16Mode>, EncodeError> {
        resolve(self, index, operand, ctx)
    }

    fn worst_case_length(
        &self,
        index: usize,
        operand: &Sweet16Operand<Value>,
        _ctx: &dyn AssemblerContext,
    ) -> usize {
        select_mode(self, index, operand).map_or(0, |mode| 1 + mode.extra_bytes())
    }

    fn emit(
        &self,
        index: usize,
        resolution: &Resolution<Sweet16Mode>,
        ctx: &dyn AssemblerContext,
    ) -> Result<ResolvedEncoding<Sweet16Mode>, EncodeError> {
        emit(self, index, resolution, ctx)
    }

    fn decode(&self, bytes: &[u8], _widths: RegisterWidths) -> Option<Decoded<Sweet16Mode>> {
        Sweet16Table::decode(self, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::family::SimpleContext;

    fn encode(mnemonic: &str, operand: Sweet16Operand<Value>, address: u32) -> Result<Vec<u8>, EncodeError> {
        let table = Sweet16Table::new();
        table
            .encode(mnemonic, &operand, &SimpleContext::at(address))
            .map(|enc| enc.bytes())
    }

    #[test]
    fn register_forms_fold_the_register() {
        assert_eq!(encode("LD", Sweet16Operand::Register(5), 0).unwrap(), vec![0x25]);
        assert_eq!(encode("LD", Sweet16Operand::Indirect(5), 0).unwrap(), vec![0x45]);
        assert_eq!(encode("ST", Sweet16Operand::Indirect(0), 0).unwrap(), vec![0x50]);
        assert_eq!(encode("DCR", Sweet16Operand::Register(15), 0).unwrap(), vec![0xFF]);
        assert_eq!(encode("RTN", Sweet16Operand::Implicit, 0).unwrap(), vec![0x00]);
    }

    #[test]
    fn set_takes_a_word() {
        let op = Sweet16Operand::Immediate {
            register: 1,
            value: Value::known(0x1234),
        };
        assert_eq!(encode("SET", op, 0).unwrap(), vec![0x11, 0x34, 0x12]);
    }

    #[test]
    fn branches_are_relative_to_the_next_instruction() {
        assert_eq!(
            encode("BNZ", Sweet16Operand::BranchTarget(Value::known(0x0300)), 0x0300).unwrap(),
            vec![0x07, 0xFE]
        );
        let err = encode("BR", Sweet16Operand::BranchTarget(Value::known(0x0400)), 0x0300)
            .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::BranchOutOfRange);
    }

    #[test]
    fn register_out_of_range() {
        let err = encode("INR", Sweet16Operand::Register(16), 0).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn wrong_shape_is_unsupported() {
        let err = encode("LDD", Sweet16Operand::Register(2), 0).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMode);
        let err = encode("SET", Sweet16Operand::Register(2), 0).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMode);
    }

    #[test]
    fn decode_then_reencode() {
        let table = Sweet16Table::new();
        let bytes = encode("POPD", Sweet16Operand::Indirect(9), 0).unwrap();
        let decoded = table.decode(&bytes).unwrap();
        assert_eq!(decoded.mnemonic, "POPD");
        assert_eq!(decoded.mode, Sweet16Mode::Indirect);
        assert_eq!(decoded.length, bytes.len());
    }
}
