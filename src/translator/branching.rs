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

//! `label`, `goto` and `if-goto`. Labels are scoped to their function.

use super::emit::AsmEmitter;
use super::Translator;

/// Trait for branching command translation.
pub trait BranchTranslator {
    /// Qualify a VM label with the current function name.
    fn qualify_label(&self, label: &str) -> String;

    /// Translate `label name`.
    fn translate_label(&mut self, label: &str);

    /// Translate `goto name`.
    fn translate_goto(&mut self, label: &str);

    /// Translate `if-goto name`: pop, jump when non-zero.
    fn translate_if_goto(&mut self, label: &str);
}

impl BranchTranslator for Translator<'_> {
    fn qualify_label(&self, label: &str) -> String {
        format!("{}${}", self.function_name, label)
    }

    fn translate_label(&mut self, label: &str) {
        let label = self.qualify_label(label);
        self.emit_label(&label);
    }

    fn translate_goto(&mut self, label: &str) {
        let label = self.qualify_label(label);
        self.emit_at(&label);
        self.emit("0;JMP");
    }

    fn translate_if_goto(&mut self, label: &str) {
        let label = self.qualify_label(label);
        self.emit_pop_d();
        self.emit_at(&label);
        self.emit("D;JNE");
    }
}
