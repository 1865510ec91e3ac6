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

//! Function definition, call and return.
//!
//! A call pushes a five-word frame below the callee's locals:
//!
//! ```text
//! ARG  -> argument 0 .. argument n-1
//!         return address
//!         saved LCL, ARG, THIS, THAT
//! LCL  -> local 0 .. local k-1
//! SP   -> working stack
//! ```
//!
//! R13 holds the frame base and R14 the return address while returning.

use super::emit::AsmEmitter;
use super::Translator;
use crate::error::{CompileError, ErrorCode, Result, Span};

/// Number of words saved by a call.
pub const FRAME_SIZE: u16 = 5;

/// Pseudo-function name owning the bootstrap code.
pub const BOOTSTRAP_SCOPE: &str = "BOOTSTRAP";

/// Trait for function command translation.
pub trait FunctionTranslator {
    /// Translate `function name locals`.
    fn translate_function(&mut self, name: &str, locals: u16);

    /// Translate `call name args`.
    fn translate_call(&mut self, name: &str, args: u16) -> Result<()>;

    /// Translate `return`.
    fn translate_return(&mut self);

    /// Emit `SP = stack_base`, a call to the entry function and a halt loop.
    fn write_bootstrap(&mut self, stack_base: u16, entry: &str) -> Result<()>;
}

impl FunctionTranslator for Translator<'_> {
    fn translate_function(&mut self, name: &str, locals: u16) {
        self.function_name = name.to_string();
        self.emit_label(name);
        for _ in 0..locals {
            self.emit_lines(&["@SP", "A=M", "M=0", "@SP", "M=M+1"]);
        }
    }

    fn translate_call(&mut self, name: &str, args: u16) -> Result<()> {
        let arg_offset = args
            .checked_add(FRAME_SIZE)
            .filter(|offset| *offset <= crate::vm::MAX_CONSTANT)
            .ok_or_else(|| {
                CompileError::new(
                    ErrorCode::SegmentIndexOutOfRange,
                    format!("Too many arguments in call to '{}'", name),
                    Span::default(),
                )
            })?;
        let return_label = format!(
            "{}$ret.{}",
            self.function_name,
            self.context.next_return_site()
        );

        self.emit_at(&return_label);
        self.emit("D=A");
        self.emit_push_d();
        for register in ["LCL", "ARG", "THIS", "THAT"] {
            self.emit_at(register);
            self.emit("D=M");
            self.emit_push_d();
        }

        // ARG = SP - 5 - args
        self.emit_lines(&["@SP", "D=M"]);
        self.emit_at(&arg_offset.to_string());
        self.emit_lines(&["D=D-A", "@ARG", "M=D"]);

        // LCL = SP
        self.emit_lines(&["@SP", "D=M", "@LCL", "M=D"]);

        self.emit_at(name);
        self.emit("0;JMP");
        self.emit_label(&return_label);
        Ok(())
    }

    fn translate_return(&mut self) {
        // R13 = frame, R14 = return address
        self.emit_lines(&["@LCL", "D=M", "@R13", "M=D"]);
        self.emit_at(&FRAME_SIZE.to_string());
        self.emit_lines(&["A=D-A", "D=M", "@R14", "M=D"]);

        // *ARG = pop(), SP = ARG + 1
        self.emit_pop_d();
        self.emit_lines(&["@ARG", "A=M", "M=D", "@ARG", "D=M+1", "@SP", "M=D"]);

        for register in ["THAT", "THIS", "ARG", "LCL"] {
            self.emit_lines(&["@R13", "AM=M-1", "D=M"]);
            self.emit_at(register);
            self.emit("M=D");
        }

        self.emit_lines(&["@R14", "A=M", "0;JMP"]);
    }

    fn write_bootstrap(&mut self, stack_base: u16, entry: &str) -> Result<()> {
        self.function_name = BOOTSTRAP_SCOPE.to_string();
        self.emit_at(&stack_base.to_string());
        self.emit_lines(&["D=A", "@SP", "M=D"]);
        self.translate_call(entry, 0)?;

        let halt = format!("{}$END", BOOTSTRAP_SCOPE);
        self.emit_label(&halt);
        self.emit_at(&halt);
        self.emit("0;JMP");
        Ok(())
    }
}
