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

//! Emit helper methods for assembly generation.
//!
//! This module provides the low-level line emission the templates are built
//! from, plus the two stack primitives every template shares.

use super::Translator;

/// Extension trait for low-level assembly emission.
pub trait AsmEmitter {
    /// Emit one assembly line.
    fn emit(&mut self, line: &str);

    /// Emit several assembly lines in order.
    fn emit_lines(&mut self, lines: &[&str]);

    /// Emit an address instruction `@symbol`.
    fn emit_at(&mut self, symbol: &str);

    /// Emit a label declaration `(label)`.
    fn emit_label(&mut self, label: &str);

    /// Emit a comment line.
    fn emit_comment(&mut self, text: &str);

    /// Push D onto the stack.
    fn emit_push_d(&mut self);

    /// Pop the top of the stack into D.
    fn emit_pop_d(&mut self);
}

impl AsmEmitter for Translator<'_> {
    fn emit(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.emit(line);
        }
    }

    fn emit_at(&mut self, symbol: &str) {
        self.emit(&format!("@{}", symbol));
    }

    fn emit_label(&mut self, label: &str) {
        self.emit(&format!("({})", label));
    }

    fn emit_comment(&mut self, text: &str) {
        self.emit(&format!("// {}", text));
    }

    fn emit_push_d(&mut self) {
        self.emit_lines(&["@SP", "A=M", "M=D", "@SP", "M=M+1"]);
    }

    fn emit_pop_d(&mut self) {
        self.emit_lines(&["@SP", "AM=M-1", "D=M"]);
    }
}
