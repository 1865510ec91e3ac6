// Jackc - A toolchain compiling Jack classes down to Hack machine code
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Output module for the jackc toolchain.
//!
//! This module renders a built [`Program`] in one of three text formats:
//! - VM files (.vm)
//! - Hack assembly (.asm)
//! - Hack binary, one 16-character word per line (.hack)

use std::path::Path;

use crate::Program;

/// Determine the output format from a file extension.
pub fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    OutputFormat::from_name(&path.extension()?.to_str()?.to_lowercase())
}

/// The output format for built programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// VM commands.
    Vm,
    /// Hack assembly.
    Asm,
    /// Hack binary words.
    Hack,
}

impl OutputFormat {
    /// Look up a format by name or extension (`vm`, `asm`, `hack`).
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "vm" => Some(OutputFormat::Vm),
            "asm" => Some(OutputFormat::Asm),
            "hack" => Some(OutputFormat::Hack),
            _ => None,
        }
    }

    /// Get the file extension of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Vm => "vm",
            OutputFormat::Asm => "asm",
            OutputFormat::Hack => "hack",
        }
    }
}

/// Render a program in the given format.
pub fn render(program: &Program, format: OutputFormat) -> String {
    match format {
        OutputFormat::Vm => program.vm.clone(),
        OutputFormat::Asm => program.assembly.clone(),
        OutputFormat::Hack => {
            let mut text = String::with_capacity(program.binary.len() * 17);
            for word in &program.binary {
                text.push_str(word);
                text.push('\n');
            }
            text
        }
    }
}

/// Write a rendered program to a file.
pub fn write_output(program: &Program, path: &Path, format: OutputFormat) -> std::io::Result<()> {
    std::fs::write(path, render(program, format))
}
