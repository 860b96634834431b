// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Listing output.

use std::io::Write;

use super::error::Diagnostic;
use super::{Assembly, SourceLine};

/// Data for a single listing line.
pub struct ListingLine<'a> {
    pub addr: u32,
    pub bytes: &'a [u8],
    pub mode: Option<&'a str>,
    pub line_num: u32,
    pub source: &'a str,
}

/// Writer for listing output.
pub struct ListingWriter<W: Write> {
    out: W,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(
            self.out,
            "ADDR    BYTES                    MODE      LINE  SOURCE"
        )?;
        writeln!(
            self.out,
            "------  -----------------------  --------  ----  ------"
        )?;
        Ok(())
    }

    pub fn write_line(&mut self, line: ListingLine<'_>) -> std::io::Result<()> {
        let (loc, bytes_col) = if line.bytes.is_empty() {
            ("----".to_string(), String::new())
        } else {
            (format!("{:04X}", line.addr), format_bytes(line.bytes))
        };
        writeln!(
            self.out,
            "{:<6}  {:<23}  {:<8}  {:>4}  {}",
            loc,
            bytes_col,
            line.mode.unwrap_or(""),
            line.line_num,
            line.source
        )
    }

    pub fn write_diagnostic(&mut self, diag: &Diagnostic) -> std::io::Result<()> {
        writeln!(self.out, "{}", diag.format())
    }

    pub fn footer(&mut self, lines: usize, errors: usize, passes: u8) -> std::io::Result<()> {
        writeln!(
            self.out,
            "\nLines: {lines}  Errors: {errors}  Passes: {passes}"
        )
    }

    /// Write the full listing for an assembly and its source.
    pub fn write_assembly(
        &mut self,
        title: &str,
        assembly: &Assembly,
        source: &[SourceLine],
    ) -> std::io::Result<()> {
        self.header(title)?;
        for (line, src) in assembly.lines().iter().zip(source) {
            self.write_line(ListingLine {
                addr: line.address,
                bytes: &line.bytes,
                mode: line.mode.as_deref(),
                line_num: line.line_num,
                source: &src.source,
            })?;
            for diag in assembly
                .diagnostics()
                .iter()
                .filter(|d| d.line() == line.line_num)
            {
                self.write_diagnostic(diag)?;
            }
        }
        self.footer(
            source.len(),
            assembly.error_count(),
            assembly.passes(),
        )
    }
}

/// Format bytes as hex string for listing.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_columns() {
        let mut out = Vec::new();
        let mut writer = ListingWriter::new(&mut out);
        writer
            .write_line(ListingLine {
                addr: 0x1000,
                bytes: &[0xAD, 0x34, 0x12],
                mode: Some("abs"),
                line_num: 7,
                source: "    LDA $1234",
            })
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1000    AD 34 12"));
        assert!(text.contains("abs"));
        assert!(text.trim_end().ends_with("7      LDA $1234"));
    }

    #[test]
    fn empty_line_has_no_address() {
        let mut out = Vec::new();
        ListingWriter::new(&mut out)
            .write_line(ListingLine {
                addr: 0x1000,
                bytes: &[],
                mode: None,
                line_num: 1,
                source: "start:",
            })
            .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("----"));
    }
}
