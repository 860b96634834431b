// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! MOS 6502 family addressing-mode resolver.
//!
//! Given a descriptor from the active CPU's table and an evaluated operand,
//! the resolver narrows the descriptor's modes to those the CPU supports and
//! the operand's syntax allows, then settles the remaining choices: short or
//! long branch, zero page or absolute, and the implicit/accumulator split.

use crate::core::cpu::{CpuVariant, EncodeError, EncodeErrorKind, RegisterWidths};
use crate::core::family::{
    fits_i16, fits_i8, AssemblerContext, Decoded, InstructionSet, OperandValue, Resolution,
    ResolvedEncoding,
};
use crate::core::registry::zero_page_indirect_uses_z;
use crate::families::mos6502::emitter;
use crate::families::mos6502::mode::{AddressingMode, ModeSet};
use crate::families::mos6502::operand::{AddressSize, Operand, Value};
use crate::families::mos6502::table::{InstructionDescriptor, InstructionTable};

/// Preference order when an operand-less instruction has several forms.
const IMPLICIT_PREFERENCE: [AddressingMode; 3] = [
    AddressingMode::Implicit,
    AddressingMode::Accumulator,
    AddressingMode::QRegister,
];

/// Resolve the addressing mode for the instruction at `index`.
pub fn resolve(
    table: &InstructionTable,
    index: usize,
    operand: &Operand<Value>,
    ctx: &dyn AssemblerContext,
) -> Result<Resolution<AddressingMode>, EncodeError> {
    let desc = table.descriptor(index);
    let candidates = candidate_modes(table, desc, operand)?;
    let widths = ctx.register_widths();

    let mode = if candidates.intersects(ModeSet::BRANCH_FORMS) {
        select_branch(table, desc, candidates, operand, ctx)?
    } else if let Some(mode) = candidates.single() {
        mode
    } else if matches!(operand, Operand::Implicit) {
        IMPLICIT_PREFERENCE
            .into_iter()
            .find(|mode| candidates.contains_mode(*mode))
            .ok_or_else(|| ambiguous(desc, candidates))?
    } else {
        select_width(desc, candidates, operand)?
    };

    check_range(table.cpu(), mode, operand, widths)?;
    if let Operand::ZeroPageBranch { target, .. } = operand {
        if target.known {
            let offset = target.value - (i64::from(ctx.current_address()) + 3);
            if !fits_i8(offset) {
                return Err(EncodeError::branch_out_of_range(offset));
            }
        }
    }

    Ok(Resolution {
        mode,
        value: operand_value(operand, mode),
        length: encoded_length(table.cpu(), desc, mode, widths),
        known: operand.is_known(),
    })
}

/// Longest length among the modes the operand could resolve to.
///
/// Used to size lines that failed to resolve, so a transient failure never
/// makes a later pass grow.
pub fn worst_case_length(
    table: &InstructionTable,
    index: usize,
    operand: &Operand<Value>,
    ctx: &dyn AssemblerContext,
) -> usize {
    let desc = table.descriptor(index);
    let widths = ctx.register_widths();
    candidate_modes(table, desc, operand)
        .map(|modes| {
            without_far_forms(modes, operand.size())
                .modes()
                .map(|mode| encoded_length(table.cpu(), desc, mode, widths))
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0)
}

fn candidate_modes(
    table: &InstructionTable,
    desc: &InstructionDescriptor,
    operand: &Operand<Value>,
) -> Result<ModeSet, EncodeError> {
    if matches!(operand, Operand::IndirectZ(_)) && !zero_page_indirect_uses_z(table.cpu()) {
        return Err(EncodeError::unsupported_mode(desc.mnemonic, table.cpu()));
    }
    let candidates = desc.modes() & table.capabilities() & operand.shape_modes();
    if candidates.is_empty() {
        return Err(EncodeError::unsupported_mode(desc.mnemonic, table.cpu()));
    }
    Ok(candidates)
}

/// Far forms are only picked on request or when nothing shorter fits the shape.
fn without_far_forms(modes: ModeSet, size: AddressSize) -> ModeSet {
    if size == AddressSize::Far || modes == modes & ModeSet::FAR_FORMS {
        modes
    } else {
        modes - ModeSet::FAR_FORMS
    }
}

fn encoded_length(
    cpu: CpuVariant,
    desc: &InstructionDescriptor,
    mode: AddressingMode,
    widths: RegisterWidths,
) -> usize {
    desc.encoding(mode)
        .map_or(0, |enc| enc.opcode_len() + mode.operand_len(cpu, widths))
}

fn select_branch(
    table: &InstructionTable,
    desc: &InstructionDescriptor,
    candidates: ModeSet,
    operand: &Operand<Value>,
    ctx: &dyn AssemblerContext,
) -> Result<AddressingMode, EncodeError> {
    let branches = candidates & ModeSet::BRANCH_FORMS;
    let widths = ctx.register_widths();
    let length = |mode| encoded_length(table.cpu(), desc, mode, widths);
    let target = operand.value().copied().unwrap_or_else(Value::unknown);

    if !target.known {
        let previous = ctx
            .previous_length()
            .and_then(|prev| branches.modes().find(|mode| length(*mode) == prev));
        return previous
            .or_else(|| branches.modes().max_by_key(|mode| length(*mode)))
            .ok_or_else(|| ambiguous(desc, candidates));
    }

    let address = i64::from(ctx.current_address());
    let mut offset = 0;
    for mode in branches.modes() {
        offset = target.value - (address + length(mode) as i64);
        let fits = match mode {
            AddressingMode::Relative => fits_i8(offset),
            _ => fits_i16(offset),
        };
        if fits {
            return Ok(mode);
        }
    }
    Err(EncodeError::branch_out_of_range(offset))
}

fn select_width(
    desc: &InstructionDescriptor,
    candidates: ModeSet,
    operand: &Operand<Value>,
) -> Result<AddressingMode, EncodeError> {
    let size = operand.size();
    let mut modes = without_far_forms(candidates, size);

    let zero_page = modes & ModeSet::ZERO_PAGE_FORMS;
    let absolute = modes & ModeSet::ABSOLUTE_FORMS;
    if !zero_page.is_empty() && !absolute.is_empty() {
        let value = operand.value().copied().unwrap_or_else(Value::unknown);
        let use_zero_page = match size {
            AddressSize::ZeroPage => true,
            AddressSize::Absolute | AddressSize::Far => false,
            AddressSize::Auto => value.is_zero_page(),
        };
        modes = if use_zero_page { zero_page } else { absolute };
    }

    modes.single().ok_or_else(|| ambiguous(desc, modes))
}

fn check_range(
    cpu: CpuVariant,
    mode: AddressingMode,
    operand: &Operand<Value>,
    widths: RegisterWidths,
) -> Result<(), EncodeError> {
    match operand {
        Operand::ZeroPageBranch { zp, .. } => check_value(zp, 0..=0xFF, mode),
        Operand::BlockMove { src, dst } => {
            check_value(src, 0..=0xFF, mode)?;
            check_value(dst, 0..=0xFF, mode)
        }
        Operand::ImmediateZeroPage { value, zp } => {
            check_value(value, -0x80..=0xFF, mode)?;
            check_value(zp, 0..=0xFF, mode)
        }
        _ => {
            let Some(value) = operand.value() else {
                return Ok(());
            };
            if mode.is_branch() {
                return Ok(());
            }
            if mode == AddressingMode::SpecialPage {
                if value.known && !(0xFF00..=0xFFFF).contains(&value.value) {
                    return check_value(value, 0..=0xFF, mode);
                }
                return Ok(());
            }
            let len = mode.operand_len(cpu, widths);
            let range = match (mode.is_immediate(), len) {
                (true, 1) => -0x80..=0xFF,
                (true, _) => -0x8000..=0xFFFF,
                (false, 1) => 0..=0xFF,
                (false, 2) => 0..=0xFFFF,
                (false, _) => 0..=0xFF_FFFF,
            };
            check_value(value, range, mode)
        }
    }
}

fn check_value(
    value: &Value,
    range: std::ops::RangeInclusive<i64>,
    mode: AddressingMode,
) -> Result<(), EncodeError> {
    if !value.known || range.contains(&value.value) {
        return Ok(());
    }
    Err(EncodeError::range(format!(
        "Value ${:X} out of range for {mode}",
        value.value
    )))
}

fn operand_value(operand: &Operand<Value>, mode: AddressingMode) -> OperandValue {
    match operand {
        Operand::ZeroPageBranch { zp, target } => OperandValue::ZeroPageBranch {
            zp: zp.value,
            target: target.value,
        },
        Operand::BlockMove { src, dst } => OperandValue::BlockMove {
            src: src.value,
            dst: dst.value,
        },
        Operand::ImmediateZeroPage { value, zp } => OperandValue::ImmediateZeroPage {
            value: value.value,
            zp: zp.value,
        },
        _ => match operand.value() {
            None => OperandValue::None,
            Some(value) if mode.is_branch() => OperandValue::Target(value.value),
            Some(value) => OperandValue::Value(value.value),
        },
    }
}

fn ambiguous(desc: &InstructionDescriptor, modes: ModeSet) -> EncodeError {
    EncodeError::new(
        EncodeErrorKind::AmbiguousOperand,
        format!("Ambiguous operand for {}: {modes}", desc.mnemonic),
    )
}

impl InstructionSet for InstructionTable {
    type Mode = AddressingMode;
    type Operand = Operand<Value>;

    fn cpu(&self) -> CpuVariant {
        InstructionTable::cpu(self)
    }

    fn find_instruction(&self, mnemonic: &str) -> Option<usize> {
        InstructionTable::find_instruction(self, mnemonic)
    }

    fn mnemonic(&self, index: usize) -> &'static str {
        self.descriptor(index).mnemonic
    }

    fn resolve(
        &self,
        index: usize,
        operand: &Operand<Value>,
        ctx: &dyn AssemblerContext,
    ) -> Result<Resolution<AddressingMode>, EncodeError> {
        resolve(self, index, operand, ctx)
    }

    fn worst_case_length(
        &self,
        index: usize,
        operand: &Operand<Value>,
        ctx: &dyn AssemblerContext,
    ) -> usize {
        worst_case_length(self, index, operand, ctx)
    }

    fn emit(
        &self,
        index: usize,
        resolution: &Resolution<AddressingMode>,
        ctx: &dyn AssemblerContext,
    ) -> Result<ResolvedEncoding<AddressingMode>, EncodeError> {
        emitter::emit(self, index, resolution, ctx)
    }

    fn decode(&self, bytes: &[u8], widths: RegisterWidths) -> Option<Decoded<AddressingMode>> {
        InstructionTable::decode(self, bytes, widths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cpu::Width;
    use crate::core::family::SimpleContext;
    use crate::core::registry::instruction_table;
    use crate::families::mos6502::operand::IndexRegister;

    fn resolve_on(
        cpu: CpuVariant,
        mnemonic: &str,
        operand: Operand<Value>,
        ctx: SimpleContext,
    ) -> Result<Resolution<AddressingMode>, EncodeError> {
        let table = instruction_table(cpu);
        let index = table.find_instruction(mnemonic).expect("mnemonic");
        resolve(&table, index, &operand, &ctx)
    }

    fn mode_on(cpu: CpuVariant, mnemonic: &str, operand: Operand<Value>) -> AddressingMode {
        resolve_on(cpu, mnemonic, operand, SimpleContext::at(0x1000))
            .expect("resolve")
            .mode
    }

    #[test]
    fn known_small_value_selects_zero_page() {
        let res = resolve_on(
            CpuVariant::M6502,
            "LDA",
            Operand::direct(0x12),
            SimpleContext::at(0),
        )
        .unwrap();
        assert_eq!(res.mode, AddressingMode::ZeroPage);
        assert_eq!(res.length, 2);
        assert_eq!(res.value, OperandValue::Value(0x12));
    }

    #[test]
    fn unknown_value_selects_absolute() {
        let op = Operand::Direct {
            value: Value::unknown(),
            size: AddressSize::Auto,
        };
        let res = resolve_on(CpuVariant::M6502, "LDA", op, SimpleContext::at(0)).unwrap();
        assert_eq!(res.mode, AddressingMode::Absolute);
        assert_eq!(res.length, 3);
        assert!(!res.known);
    }

    #[test]
    fn explicit_absolute_size_keeps_absolute() {
        let op = Operand::Direct {
            value: Value::known(0x12),
            size: AddressSize::Absolute,
        };
        assert_eq!(mode_on(CpuVariant::M6502, "LDA", op), AddressingMode::Absolute);
    }

    #[test]
    fn zero_page_only_mode_rejects_large_value() {
        let op = Operand::IndirectY(Value::known(0x1234));
        let err = resolve_on(CpuVariant::M6502, "LDA", op, SimpleContext::at(0)).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn absolute_value_above_16_bits_is_range_error_without_far() {
        let err = resolve_on(
            CpuVariant::W65816,
            "LDA",
            Operand::direct(0x123456),
            SimpleContext::at(0),
        )
        .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn far_size_selects_long_forms() {
        let op = Operand::Indexed {
            value: Value::known(0x123456),
            size: AddressSize::Far,
            index: IndexRegister::X,
        };
        assert_eq!(
            mode_on(CpuVariant::W65816, "LDA", op.clone()),
            AddressingMode::AbsoluteLongX
        );
        let err = resolve_on(CpuVariant::M6502, "LDA", op, SimpleContext::at(0)).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMode);
    }

    #[test]
    fn only_far_form_needs_no_size() {
        assert_eq!(
            mode_on(CpuVariant::W65816, "JML", Operand::direct(0x123456)),
            AddressingMode::AbsoluteLong
        );
    }

    #[test]
    fn implicit_operand_prefers_accumulator_over_nothing() {
        assert_eq!(
            mode_on(CpuVariant::M6502, "ASL", Operand::Implicit),
            AddressingMode::Accumulator
        );
        assert_eq!(
            mode_on(CpuVariant::M6502, "NOP", Operand::Implicit),
            AddressingMode::Implicit
        );
        assert_eq!(
            mode_on(CpuVariant::M45GS02, "ASLQ", Operand::Implicit),
            AddressingMode::QRegister
        );
    }

    #[test]
    fn inc_accumulator_needs_cmos() {
        assert_eq!(
            mode_on(CpuVariant::M65C02, "INC", Operand::Accumulator),
            AddressingMode::Accumulator
        );
        let err = resolve_on(
            CpuVariant::M6502,
            "INC",
            Operand::Accumulator,
            SimpleContext::at(0),
        )
        .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMode);
    }

    #[test]
    fn short_branch_in_range() {
        let res = resolve_on(
            CpuVariant::M6502,
            "BEQ",
            Operand::branch(0x100C),
            SimpleContext::at(0x1000),
        )
        .unwrap();
        assert_eq!(res.mode, AddressingMode::Relative);
        assert_eq!(res.length, 2);
        assert_eq!(res.value, OperandValue::Target(0x100C));
    }

    #[test]
    fn short_branch_out_of_range_on_6502() {
        let err = resolve_on(
            CpuVariant::M6502,
            "BEQ",
            Operand::branch(0x1000 + 202),
            SimpleContext::at(0x1000),
        )
        .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::BranchOutOfRange);
    }

    #[test]
    fn branch_promotes_to_long_on_4510() {
        let res = resolve_on(
            CpuVariant::Csg4510,
            "BEQ",
            Operand::branch(0x1000 + 202),
            SimpleContext::at(0x1000),
        )
        .unwrap();
        assert_eq!(res.mode, AddressingMode::RelativeLong);
        assert_eq!(res.length, 3);
    }

    #[test]
    fn short_branch_limits() {
        // Displacements are measured from the byte after the 2-byte branch.
        let next = 0x1000 + 2;
        for (target, fits) in [
            (next + 127, true),
            (next + 128, false),
            (next - 128, true),
            (next - 129, false),
        ] {
            let on_6502 = resolve_on(
                CpuVariant::M6502,
                "BEQ",
                Operand::branch(target),
                SimpleContext::at(0x1000),
            );
            let on_4510 = resolve_on(
                CpuVariant::Csg4510,
                "BEQ",
                Operand::branch(target),
                SimpleContext::at(0x1000),
            )
            .unwrap();
            if fits {
                assert_eq!(on_6502.unwrap().mode, AddressingMode::Relative, "{target:X}");
                assert_eq!(on_4510.mode, AddressingMode::Relative, "{target:X}");
            } else {
                assert_eq!(
                    on_6502.unwrap_err().kind,
                    EncodeErrorKind::BranchOutOfRange,
                    "{target:X}"
                );
                assert_eq!(on_4510.mode, AddressingMode::RelativeLong, "{target:X}");
            }
        }
    }

    #[test]
    fn unknown_branch_target_uses_longest_then_previous_length() {
        let op = Operand::BranchTarget(Value::unknown());
        let first = resolve_on(
            CpuVariant::Csg4510,
            "BNE",
            op.clone(),
            SimpleContext::at(0),
        )
        .unwrap();
        assert_eq!(first.mode, AddressingMode::RelativeLong);
        let again = resolve_on(
            CpuVariant::Csg4510,
            "BNE",
            op,
            SimpleContext::at(0).with_previous_length(Some(2)),
        )
        .unwrap();
        assert_eq!(again.mode, AddressingMode::Relative);
    }

    #[test]
    fn branch_syntax_parsed_as_direct_still_branches() {
        assert_eq!(
            mode_on(CpuVariant::M6502, "BNE", Operand::direct(0x1010)),
            AddressingMode::Relative
        );
    }

    #[test]
    fn zero_page_branch_is_relative_to_three_bytes() {
        let op = Operand::ZeroPageBranch {
            zp: Value::known(0x12),
            target: Value::known(0x1000 + 3 + 127),
        };
        let res = resolve_on(CpuVariant::M65C02, "BBR3", op, SimpleContext::at(0x1000)).unwrap();
        assert_eq!(res.mode, AddressingMode::ZeroPageRelative);
        assert_eq!(res.length, 3);

        let far = Operand::ZeroPageBranch {
            zp: Value::known(0x12),
            target: Value::known(0x1000 + 3 + 128),
        };
        let err = resolve_on(CpuVariant::M65C02, "BBR3", far, SimpleContext::at(0x1000))
            .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::BranchOutOfRange);
    }

    #[test]
    fn indirect_z_requires_4510() {
        let op = Operand::IndirectZ(Value::known(0x20));
        assert_eq!(
            mode_on(CpuVariant::Csg4510, "LDA", op.clone()),
            AddressingMode::ZeroPageIndirect
        );
        let err = resolve_on(CpuVariant::M65C02, "LDA", op, SimpleContext::at(0)).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::UnsupportedMode);
    }

    #[test]
    fn indirect_width_follows_value_on_m740() {
        assert_eq!(
            mode_on(CpuVariant::M740, "JMP", Operand::Indirect(Value::known(0x20))),
            AddressingMode::ZeroPageIndirect
        );
        assert_eq!(
            mode_on(
                CpuVariant::M740,
                "JMP",
                Operand::Indirect(Value::known(0x2000))
            ),
            AddressingMode::AbsoluteIndirect
        );
    }

    #[test]
    fn immediate_range_depends_on_width() {
        let wide = SimpleContext::at(0).with_widths(RegisterWidths::new(Width::Bits16, Width::Bits8));
        let res = resolve_on(CpuVariant::W65816, "LDA", Operand::immediate(0x1234), wide).unwrap();
        assert_eq!(res.length, 3);
        let err = resolve_on(
            CpuVariant::W65816,
            "LDA",
            Operand::immediate(0x1234),
            SimpleContext::at(0),
        )
        .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
        assert!(resolve_on(
            CpuVariant::M6502,
            "LDA",
            Operand::immediate(-128),
            SimpleContext::at(0)
        )
        .is_ok());
    }

    #[test]
    fn special_page_accepts_high_page_or_low_byte() {
        for value in [0xFF12, 0x12] {
            let res = resolve_on(
                CpuVariant::M740,
                "JSR",
                Operand::SpecialPage(Value::known(value)),
                SimpleContext::at(0),
            )
            .unwrap();
            assert_eq!(res.length, 2);
        }
        let err = resolve_on(
            CpuVariant::M740,
            "JSR",
            Operand::SpecialPage(Value::known(0x1234)),
            SimpleContext::at(0),
        )
        .unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn block_move_banks_are_bytes() {
        let op = Operand::BlockMove {
            src: Value::known(0x100),
            dst: Value::known(0x01),
        };
        let err = resolve_on(CpuVariant::W65816, "MVN", op, SimpleContext::at(0)).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn ldm_zero_page_must_fit_a_byte() {
        let op = |zp| Operand::ImmediateZeroPage {
            value: Value::known(1),
            zp: Value::known(zp),
        };
        let res = resolve_on(CpuVariant::M740, "LDM", op(0xFF), SimpleContext::at(0)).unwrap();
        assert_eq!(res.mode, AddressingMode::ImmediateZeroPage);
        assert_eq!(res.length, 3);
        let err = resolve_on(CpuVariant::M740, "LDM", op(0x100), SimpleContext::at(0)).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::RangeError);
    }

    #[test]
    fn worst_case_is_longest_candidate() {
        let table = instruction_table(CpuVariant::W65816);
        let index = table.find_instruction("LDA").unwrap();
        let ctx = SimpleContext::at(0);
        // Far forms are never inferred, so an unsized direct operand tops out at absolute.
        assert_eq!(
            worst_case_length(&table, index, &Operand::direct(0x12), &ctx),
            3
        );
        let far = Operand::Direct {
            value: Value::unknown(),
            size: AddressSize::Far,
        };
        assert_eq!(worst_case_length(&table, index, &far, &ctx), 4);
        let jml = table.find_instruction("JML").unwrap();
        assert_eq!(
            worst_case_length(&table, jml, &Operand::direct(0x123456), &ctx),
            4
        );
        assert_eq!(
            worst_case_length(&table, index, &Operand::QRegister, &ctx),
            0
        );
    }

    #[test]
    fn resolution_is_repeatable() {
        let table = instruction_table(CpuVariant::M65C02);
        let index = table.find_instruction("STZ").unwrap();
        let ctx = SimpleContext::at(0x2000);
        let op = Operand::indexed(0x80, IndexRegister::X);
        let first = resolve(&table, index, &op, &ctx).unwrap();
        let second = resolve(&table, index, &op, &ctx).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.mode, AddressingMode::ZeroPageX);
    }
}
