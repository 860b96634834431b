// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface: table dumps and byte decoding.

use std::fmt;
use std::io::{self, Write};

use clap::{ArgAction, Parser, Subcommand};
use log::debug;

use crate::core::assembler::listing::format_bytes;
use crate::core::cpu::{CpuVariant, RegisterWidths, Width};
use crate::core::registry::{capability_mask, ActiveTable, CpuSelection};
use crate::sweet16::mode::Sweet16ModeSet;

pub const VERSION: &str = "1.0";

const LONG_ABOUT: &str = "Instruction encoder for the 6502 family.

Covers the NMOS 6502, 65C02, 65816, 4510, 45GS02, Mitsubishi 740 and the
SWEET16 interpreter. Use `table` to list a CPU's instruction set and `decode`
to turn hex bytes back into mnemonics. Set RUST_LOG to see table derivation.";

#[derive(Parser, Debug)]
#[command(
    name = "opforge65",
    version = VERSION,
    about = "Instruction encoder for the 6502 family",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "cpu",
        value_name = "NAME",
        default_value = "6502",
        long_help = "Target CPU: 6502, 65C02, 65816, 4510, 45GS02, m740 or sweet16. Case-insensitive."
    )]
    pub cpu: CpuVariant,
    #[arg(
        long = "a16",
        action = ArgAction::SetTrue,
        long_help = "Treat the 65816 accumulator as 16 bits wide when sizing immediates."
    )]
    pub a16: bool,
    #[arg(
        long = "i16",
        action = ArgAction::SetTrue,
        long_help = "Treat the 65816 index registers as 16 bits wide when sizing immediates."
    )]
    pub i16: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the supported CPUs and their addressing modes.
    Cpus,
    /// Print every mnemonic of the selected CPU with its opcodes.
    Table,
    /// Decode hex bytes (e.g. `A5 12` or `A512`) into instructions.
    Decode {
        #[arg(value_name = "HEX", required = true)]
        hex: Vec<String>,
    },
}

impl Cli {
    pub fn widths(&self) -> RegisterWidths {
        let width = |wide| if wide { Width::Bits16 } else { Width::Bits8 };
        RegisterWidths::new(width(self.a16), width(self.i16))
    }
}

/// Errors reported by the command-line layer.
#[derive(Debug)]
pub enum CliError {
    InvalidHex(String),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidHex(text) => write!(f, "Invalid hex byte string: {text}"),
            CliError::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

/// Parse the process arguments and run the selected command on stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, &mut stdout.lock())
}

pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    debug!("running {:?} for {}", cli.command, cli.cpu);
    match &cli.command {
        Command::Cpus => write_cpus(out)?,
        Command::Table => write_table(&CpuSelection::new(cli.cpu), out)?,
        Command::Decode { hex } => {
            let bytes = parse_hex_bytes(hex)?;
            write_decoded(&CpuSelection::new(cli.cpu), cli.widths(), &bytes, out)?;
        }
    }
    Ok(())
}

/// Join the arguments and read them as hex byte pairs.
pub fn parse_hex_bytes(args: &[String]) -> Result<Vec<u8>, CliError> {
    let digits: String = args
        .iter()
        .flat_map(|arg| arg.split(|c: char| c.is_whitespace() || c == ','))
        .map(|part| part.trim_start_matches('$'))
        .collect();
    if digits.is_empty() || digits.len() % 2 != 0 || !digits.is_ascii() {
        return Err(CliError::InvalidHex(args.join(" ")));
    }
    (0..digits.len())
        .step_by(2)
        .map(|pos| {
            u8::from_str_radix(&digits[pos..pos + 2], 16)
                .map_err(|_| CliError::InvalidHex(args.join(" ")))
        })
        .collect()
}

fn write_cpus(out: &mut impl Write) -> io::Result<()> {
    for cpu in CpuVariant::ALL {
        let modes = if cpu.is_sweet16() {
            Sweet16ModeSet::all()
                .modes()
                .map(|mode| mode.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            capability_mask(cpu).to_string()
        };
        writeln!(out, "{:<8} {}", cpu.name(), modes)?;
    }
    Ok(())
}

fn write_table(selection: &CpuSelection, out: &mut impl Write) -> io::Result<()> {
    match selection.table() {
        ActiveTable::Mos6502(table) => {
            for desc in table.descriptors() {
                let forms: Vec<String> = desc
                    .encodings()
                    .iter()
                    .map(|enc| format!("{}={}", enc.mode, format_bytes(&enc.opcode_bytes())))
                    .collect();
                writeln!(out, "{:<5} {}", desc.mnemonic, forms.join("  "))?;
            }
        }
        ActiveTable::Sweet16(table) => {
            for desc in table.descriptors() {
                let forms: Vec<String> = desc
                    .encodings()
                    .iter()
                    .map(|(mode, opcode)| format!("{mode}={opcode:02X}"))
                    .collect();
                writeln!(out, "{:<5} {}", desc.mnemonic, forms.join("  "))?;
            }
        }
    }
    writeln!(
        out,
        "\n{} mnemonics for {}",
        selection.table().len(),
        selection.cpu()
    )
}

fn write_decoded(
    selection: &CpuSelection,
    widths: RegisterWidths,
    bytes: &[u8],
    out: &mut impl Write,
) -> io::Result<()> {
    let mut pos = 0;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let decoded = match selection.table() {
            ActiveTable::Mos6502(table) => table
                .decode(rest, widths)
                .map(|d| (d.mnemonic, d.mode.to_string(), d.length)),
            ActiveTable::Sweet16(table) => table
                .decode(rest)
                .map(|d| (d.mnemonic, d.mode.to_string(), d.length)),
        };
        match decoded {
            Some((mnemonic, mode, length)) if length <= rest.len() => {
                writeln!(
                    out,
                    "{:04X}  {:<14}  {} {} ({})",
                    pos,
                    format_bytes(&rest[..length]),
                    mnemonic,
                    mode,
                    length
                )?;
                pos += length;
            }
            Some((mnemonic, _, length)) => {
                writeln!(
                    out,
                    "{:04X}  {:<14}  {} truncated ({} of {})",
                    pos,
                    format_bytes(rest),
                    mnemonic,
                    rest.len(),
                    length
                )?;
                break;
            }
            None => {
                writeln!(out, "{:04X}  {:<14}  ???", pos, format_bytes(&rest[..1]))?;
                pos += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(args: &[&str]) -> String {
        let cli = Cli::parse_from(args);
        let mut out = Vec::new();
        execute(&cli, &mut out).expect("command runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn cli_parses_cpu_and_widths() {
        let cli = Cli::parse_from(["opforge65", "--cpu", "65816", "--a16", "table"]);
        assert_eq!(cli.cpu, CpuVariant::W65816);
        assert_eq!(cli.widths(), RegisterWidths::new(Width::Bits16, Width::Bits8));
        assert_eq!(cli.command, Command::Table);
    }

    #[test]
    fn cli_defaults_to_6502() {
        let cli = Cli::parse_from(["opforge65", "cpus"]);
        assert_eq!(cli.cpu, CpuVariant::M6502);
        assert!(!cli.a16 && !cli.i16);
    }

    #[test]
    fn cli_rejects_unknown_cpu() {
        let err = Cli::try_parse_from(["opforge65", "--cpu", "z80", "table"]).unwrap_err();
        assert!(err.to_string().contains("Unknown CPU: z80"));
    }

    #[test]
    fn hex_bytes_accept_pairs_and_runs() {
        let args = vec!["A5".to_string(), "12".to_string(), "$ad3412".to_string()];
        assert_eq!(
            parse_hex_bytes(&args).unwrap(),
            vec![0xA5, 0x12, 0xAD, 0x34, 0x12]
        );
        assert!(parse_hex_bytes(&["A".to_string()]).is_err());
        assert!(parse_hex_bytes(&["ZZ".to_string()]).is_err());
    }

    #[test]
    fn decode_prints_one_line_per_instruction() {
        let text = output(&["opforge65", "decode", "A5", "12", "AD", "34", "12"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000  A5 12"));
        assert!(lines[0].contains("LDA"));
        assert!(lines[0].ends_with("(2)"));
        assert!(lines[1].starts_with("0002  AD 34 12"));
        assert!(lines[1].ends_with("(3)"));
    }

    #[test]
    fn decode_respects_selected_cpu() {
        let text = output(&["opforge65", "--cpu", "45gs02", "decode", "42 42 A5 10"]);
        assert!(text.contains("LDQ"));
        let text = output(&["opforge65", "decode", "FF"]);
        assert!(text.contains("???"));
        let text = output(&["opforge65", "--cpu", "sweet16", "decode", "11 34 12 00"]);
        assert!(text.contains("SET"));
        assert!(text.contains("RTN"));
    }

    #[test]
    fn decode_reports_truncated_instruction() {
        let text = output(&["opforge65", "decode", "AD 34"]);
        assert!(text.contains("LDA truncated (2 of 3)"));
    }

    #[test]
    fn table_lists_cpu_specific_mnemonics() {
        let text = output(&["opforge65", "--cpu", "65c02", "table"]);
        assert!(text.contains("STZ"));
        assert!(text.lines().last().unwrap().ends_with("mnemonics for 65C02"));
        let text = output(&["opforge65", "table"]);
        assert!(!text.contains("STZ"));
    }

    #[test]
    fn cpus_lists_every_variant() {
        let text = output(&["opforge65", "cpus"]);
        assert_eq!(text.lines().count(), CpuVariant::ALL.len());
        assert!(text.lines().any(|line| line.starts_with("sweet16")));
    }
}
