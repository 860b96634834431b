// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Multi-pass assembly driver.
//!
//! The driver takes already-parsed statements and runs them through the
//! instruction tables until every instruction's length is stable. Forward
//! references start out unknown and resolve to their widest form; each later
//! pass may only keep or shrink an instruction. A line that grows, or a
//! program that does not settle within the pass limit, aborts the run with a
//! phase error.

pub mod error;
pub mod listing;


use std::collections::HashMap;
use std::convert::Infallible;

use log::{debug, info, trace, warn};

use crate::core::cpu::{CpuVariant, EncodeError, RegisterWidths};
use crate::core::family::{InstructionSet, SimpleContext};
use crate::core::registry::{ActiveTable, CpuSelection};
use crate::families::mos6502::operand::{Operand, Value};
use crate::sweet16::mode::Sweet16Operand;

use self::error::{AsmError, AsmErrorKind, AsmRunError, Diagnostic, Severity};

/// Default pass limit.
pub const DEFAULT_MAX_PASSES: u8 = 16;

/// Operand expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    /// Symbol plus a constant offset.
    Symbol { name: String, offset: i64 },
    /// Current address plus a constant offset.
    Here(i64),
}

impl Expr {
    pub fn symbol(name: &str) -> Self {
        Expr::Symbol {
            name: name.to_string(),
            offset: 0,
        }
    }

    pub fn symbol_offset(name: &str, offset: i64) -> Self {
        Expr::Symbol {
            name: name.to_string(),
            offset,
        }
    }
}

/// Operand in the syntax of the instruction set it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOperand {
    Mos6502(Operand<Expr>),
    Sweet16(Sweet16Operand<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Label(String),
    Org(u32),
    SetCpu(CpuVariant),
    Widths(RegisterWidths),
    Instruction {
        mnemonic: String,
        operand: SourceOperand,
    },
}

impl Statement {
    pub fn instruction(mnemonic: &str, operand: Operand<Expr>) -> Self {
        Statement::Instruction {
            mnemonic: mnemonic.to_string(),
            operand: SourceOperand::Mos6502(operand),
        }
    }

    pub fn sweet16(mnemonic: &str, operand: Sweet16Operand<Expr>) -> Self {
        Statement::Instruction {
            mnemonic: mnemonic.to_string(),
            operand: SourceOperand::Sweet16(operand),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_num: u32,
    pub source: String,
    pub statement: Statement,
}

impl SourceLine {
    pub fn new(line_num: u32, source: &str, statement: Statement) -> Self {
        Self {
            line_num,
            source: source.to_string(),
            statement,
        }
    }
}

/// Output for one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledLine {
    pub line_num: u32,
    pub address: u32,
    pub bytes: Vec<u8>,
    /// Addressing mode sketch for listings.
    pub mode: Option<String>,
}

/// Result of a converged assembly run.
#[derive(Debug, Clone)]
pub struct Assembly {
    lines: Vec<AssembledLine>,
    diagnostics: Vec<Diagnostic>,
    symbols: HashMap<String, i64>,
    passes: u8,
}

impl Assembly {
    pub fn lines(&self) -> &[AssembledLine] {
        &self.lines
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn passes(&self) -> u8 {
        self.passes
    }

    pub fn symbol(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .count()
    }

    /// All emitted bytes in source order.
    pub fn image(&self) -> Vec<u8> {
        self.lines
            .iter()
            .flat_map(|line| line.bytes.iter().copied())
            .collect()
    }
}

/// Multi-pass driver.
#[derive(Debug, Clone)]
pub struct Assembler {
    max_passes: u8,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Symbol values from the previous pass, with the org section they were
/// defined in.
type SymbolMap = HashMap<String, (i64, usize)>;

struct PassOutput {
    lines: Vec<AssembledLine>,
    lengths: Vec<usize>,
    symbols: SymbolMap,
    diagnostics: Vec<Diagnostic>,
}

struct LineOutput {
    length: usize,
    bytes: Vec<u8>,
    mode: Option<String>,
    error: Option<AsmError>,
}

impl LineOutput {
    fn failed(length: usize, error: AsmError) -> Self {
        Self {
            length,
            bytes: Vec::new(),
            mode: None,
            error: Some(error),
        }
    }
}

/// Per-pass symbol state.
struct PassSymbols<'a> {
    previous: &'a SymbolMap,
    defined: SymbolMap,
    section: usize,
    /// Bytes saved so far in the current section relative to the last pass.
    shrinkage: i64,
}

impl PassSymbols<'_> {
    fn lookup(&self, name: &str) -> Value {
        if let Some(&(value, _)) = self.defined.get(name) {
            return Value::known(value);
        }
        match self.previous.get(name) {
            Some(&(value, section)) if section == self.section => {
                Value::known(value - self.shrinkage)
            }
            Some(&(value, _)) => Value::known(value),
            None => Value::unknown(),
        }
    }

    fn eval(&self, expr: &Expr, address: u32, undefined: &mut Vec<String>) -> Value {
        match expr {
            Expr::Number(value) => Value::known(*value),
            Expr::Here(offset) => Value::known(i64::from(address) + offset),
            Expr::Symbol { name, offset } => {
                let value = self.lookup(name);
                if !value.known && !undefined.contains(name) {
                    undefined.push(name.clone());
                }
                if value.known {
                    Value::known(value.value + offset)
                } else {
                    value
                }
            }
        }
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: u8) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Assemble `source` until instruction lengths and symbol values settle.
    pub fn assemble(&self, source: &[SourceLine]) -> Result<Assembly, AsmRunError> {
        let mut previous_lengths: Vec<Option<usize>> = vec![None; source.len()];
        let mut previous_symbols = SymbolMap::new();
        let mut last_diagnostics = Vec::new();

        for pass in 1..=self.max_passes {
            let output = self.run_pass(pass, source, &previous_lengths, &previous_symbols)?;
            let changed = output
                .lengths
                .iter()
                .zip(&previous_lengths)
                .filter(|(len, prev)| Some(**len) != **prev)
                .count();
            let symbols_changed = output.symbols != previous_symbols;
            debug!(
                "pass {pass}: {changed} line length(s) changed, symbols {}",
                if symbols_changed { "changed" } else { "stable" }
            );

            if pass > 1 && changed == 0 && !symbols_changed {
                info!("converged after {pass} passes");
                for diag in &output.diagnostics {
                    warn!("{}", diag.format());
                }
                return Ok(Assembly {
                    lines: output.lines,
                    diagnostics: output.diagnostics,
                    symbols: output
                        .symbols
                        .into_iter()
                        .map(|(name, (value, _))| (name, value))
                        .collect(),
                    passes: pass,
                });
            }

            previous_lengths = output.lengths.into_iter().map(Some).collect();
            previous_symbols = output.symbols;
            last_diagnostics = output.diagnostics;
        }

        Err(AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Phase,
                "Instruction lengths did not converge",
                Some(&format!("{} passes", self.max_passes)),
            ),
            last_diagnostics,
        ))
    }

    fn run_pass(
        &self,
        pass: u8,
        source: &[SourceLine],
        previous_lengths: &[Option<usize>],
        previous_symbols: &SymbolMap,
    ) -> Result<PassOutput, AsmRunError> {
        let mut selection = CpuSelection::default();
        let mut widths = RegisterWidths::default();
        let mut address: u32 = 0;
        let mut symbols = PassSymbols {
            previous: previous_symbols,
            defined: SymbolMap::new(),
            section: 0,
            shrinkage: 0,
        };
        let mut lines = Vec::with_capacity(source.len());
        let mut lengths = Vec::with_capacity(source.len());
        let mut diagnostics = Vec::new();

        for (idx, line) in source.iter().enumerate() {
            let line_address = address;
            let mut undefined = Vec::new();
            let mut output = LineOutput {
                length: 0,
                bytes: Vec::new(),
                mode: None,
                error: None,
            };

            match &line.statement {
                Statement::Label(name) => {
                    if symbols.defined.contains_key(name) {
                        output.error = Some(AsmError::new(
                            AsmErrorKind::Symbol,
                            "Symbol already defined",
                            Some(name),
                        ));
                    } else {
                        symbols
                            .defined
                            .insert(name.clone(), (i64::from(address), symbols.section));
                    }
                }
                Statement::Org(origin) => {
                    address = *origin;
                    symbols.section += 1;
                    symbols.shrinkage = 0;
                }
                Statement::SetCpu(cpu) => selection.set_cpu(*cpu),
                Statement::Widths(new_widths) => widths = *new_widths,
                Statement::Instruction { mnemonic, operand } => {
                    let ctx = SimpleContext {
                        address,
                        pass,
                        widths,
                        previous_length: previous_lengths[idx],
                    };
                    let encoded = match (selection.table(), operand) {
                        (ActiveTable::Mos6502(table), SourceOperand::Mos6502(op)) => {
                            let op = evaluated(op.map(|expr| {
                                Ok(symbols.eval(expr, address, &mut undefined))
                            }));
                            encode_line(table, mnemonic, &op, &ctx)
                        }
                        (ActiveTable::Sweet16(table), SourceOperand::Sweet16(op)) => {
                            let op = evaluated(op.map(|expr| {
                                Ok(symbols.eval(expr, address, &mut undefined))
                            }));
                            encode_line(table, mnemonic, &op, &ctx)
                        }
                        _ => Ok(LineOutput::failed(
                            0,
                            AsmError::new(
                                AsmErrorKind::Cpu,
                                "Operand syntax does not match CPU",
                                Some(selection.cpu().name()),
                            ),
                        )),
                    };
                    output = match encoded {
                        Ok(output) => output,
                        Err(err) => {
                            let error = AsmError::from(err);
                            diagnostics.push(Diagnostic::new(
                                line.line_num,
                                Severity::Error,
                                error.clone(),
                            ));
                            return Err(AsmRunError::new(error, diagnostics));
                        }
                    };
                }
            }

            if let Some(previous) = previous_lengths[idx] {
                if output.length > previous {
                    let error = AsmError::new(
                        AsmErrorKind::Phase,
                        "Instruction length grew between passes",
                        Some(&format!("{previous} to {}", output.length)),
                    );
                    diagnostics.push(Diagnostic::new(line.line_num, Severity::Error, error.clone()));
                    return Err(AsmRunError::new(error, diagnostics));
                }
                symbols.shrinkage += (previous - output.length) as i64;
            }

            for name in undefined {
                diagnostics.push(Diagnostic::new(
                    line.line_num,
                    Severity::Error,
                    AsmError::new(AsmErrorKind::Symbol, "Undefined symbol", Some(&name)),
                ));
            }
            if let Some(error) = output.error {
                diagnostics.push(Diagnostic::new(line.line_num, Severity::Error, error));
            }

            address = address.wrapping_add(output.length as u32);
            lengths.push(output.length);
            lines.push(AssembledLine {
                line_num: line.line_num,
                address: line_address,
                bytes: output.bytes,
                mode: output.mode,
            });
        }

        Ok(PassOutput {
            lines,
            lengths,
            symbols: symbols.defined,
            diagnostics,
        })
    }
}

/// Resolve and emit one instruction. Only fatal errors escape as `Err`.
fn encode_line<T: InstructionSet>(
    table: &T,
    mnemonic: &str,
    operand: &T::Operand,
    ctx: &SimpleContext,
) -> Result<LineOutput, EncodeError> {
    let Some(index) = table.find_instruction(mnemonic) else {
        return Ok(LineOutput::failed(
            0,
            EncodeError::unknown_mnemonic(mnemonic).into(),
        ));
    };

    let resolution = match table.resolve(index, operand, ctx) {
        Ok(resolution) => resolution,
        Err(err) if err.kind.is_fatal() => return Err(err),
        Err(err) => {
            // A failed line only reserves space, so it never outgrows its last size.
            let length = table.worst_case_length(index, operand, ctx);
            let length = ctx.previous_length.map_or(length, |prev| length.min(prev));
            return Ok(LineOutput::failed(length, err.into()));
        }
    };

    match table.emit(index, &resolution, ctx) {
        Ok(encoded) => {
            if encoded.len() != resolution.length {
                return Err(EncodeError::phase(format!(
                    "Encoded length {} differs from resolved length {} for {}",
                    encoded.len(),
                    resolution.length,
                    table.mnemonic(index)
                )));
            }
            trace!(
                "{:04X} {} {} len {}",
                ctx.address,
                table.mnemonic(index),
                resolution.mode,
                resolution.length
            );
            Ok(LineOutput {
                length: resolution.length,
                bytes: encoded.bytes(),
                mode: Some(resolution.mode.to_string()),
                error: None,
            })
        }
        Err(err) if err.kind.is_fatal() => Err(err),
        Err(err) => Ok(LineOutput::failed(resolution.length, err.into())),
    }
}

fn evaluated<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
