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

//! Arithmetic, logical and comparison commands.
//!
//! Binary operations pop y and combine it into x in place; unary ones
//! rewrite the top of the stack. Comparisons never subtract operands of
//! opposite sign, so `x - y` cannot overflow: mixed signs are decided by
//! the sign alone.

use super::emit::AsmEmitter;
use super::Translator;
use crate::vm::ArithmeticOp;

/// Trait for arithmetic command translation.
pub trait ArithmeticTranslator {
    /// Translate one arithmetic, logical or comparison command.
    fn translate_arithmetic(&mut self, op: ArithmeticOp);

    /// Combine y into x in place.
    fn translate_binary(&mut self, compute: &str);

    /// Rewrite the top of the stack in place.
    fn translate_unary(&mut self, compute: &str);

    /// Translate `eq`, `gt` or `lt`.
    fn translate_comparison(&mut self, jump: &str);
}

impl ArithmeticTranslator for Translator<'_> {
    fn translate_arithmetic(&mut self, op: ArithmeticOp) {
        match op {
            ArithmeticOp::Add => self.translate_binary("M=D+M"),
            ArithmeticOp::Sub => self.translate_binary("M=M-D"),
            ArithmeticOp::And => self.translate_binary("M=D&M"),
            ArithmeticOp::Or => self.translate_binary("M=D|M"),
            ArithmeticOp::Neg => self.translate_unary("M=-M"),
            ArithmeticOp::Not => self.translate_unary("M=!M"),
            ArithmeticOp::ShiftLeft => self.translate_unary("M=M<<"),
            ArithmeticOp::ShiftRight => self.translate_unary("M=M>>"),
            ArithmeticOp::Eq => self.translate_comparison("JEQ"),
            ArithmeticOp::Gt => self.translate_comparison("JGT"),
            ArithmeticOp::Lt => self.translate_comparison("JLT"),
        }
    }

    fn translate_binary(&mut self, compute: &str) {
        self.emit_pop_d();
        self.emit("A=A-1");
        self.emit(compute);
    }

    fn translate_unary(&mut self, compute: &str) {
        self.emit_lines(&["@SP", "A=M-1", compute]);
    }

    fn translate_comparison(&mut self, jump: &str) {
        let n = self.context.next_comparison();
        let y_negative = format!("CMP$YNEG.{}", n);
        let same_sign = format!("CMP$SAME.{}", n);
        let test = format!("CMP$TEST.{}", n);
        let is_true = format!("CMP$TRUE.{}", n);
        let end = format!("CMP$END.{}", n);

        // D = y, SP points at y
        self.emit_pop_d();
        self.emit_at(&y_negative);
        self.emit("D;JLT");

        // y >= 0: x < 0 means x < y
        self.emit_lines(&["@SP", "A=M-1", "D=M"]);
        self.emit_at(&same_sign);
        self.emit_lines(&["D;JGE", "D=-1"]);
        self.emit_at(&test);
        self.emit("0;JMP");

        // y < 0: x >= 0 means x > y
        self.emit_label(&y_negative);
        self.emit_lines(&["@SP", "A=M-1", "D=M"]);
        self.emit_at(&same_sign);
        self.emit_lines(&["D;JLT", "D=1"]);
        self.emit_at(&test);
        self.emit("0;JMP");

        // same sign: D = x - y
        self.emit_label(&same_sign);
        self.emit_lines(&["@SP", "A=M", "D=M", "@SP", "A=M-1", "D=M-D"]);

        self.emit_label(&test);
        self.emit_at(&is_true);
        self.emit(&format!("D;{}", jump));
        self.emit_lines(&["@SP", "A=M-1", "M=0"]);
        self.emit_at(&end);
        self.emit("0;JMP");
        self.emit_label(&is_true);
        self.emit_lines(&["@SP", "A=M-1", "M=-1"]);
        self.emit_label(&end);
    }
}
