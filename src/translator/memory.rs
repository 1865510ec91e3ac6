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

//! Push and pop over the virtual memory segments.
//!
//! `local`, `argument`, `this` and `that` are reached through their base
//! pointers. `temp` (RAM 5..=12) and `pointer` (RAM 3..=4) are addressed
//! directly, and every `static` becomes an assembler variable named after
//! its file.

use super::emit::AsmEmitter;
use super::Translator;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::vm::Segment;

/// First RAM cell of the `temp` segment.
pub const TEMP_BASE: u16 = 5;

/// Where a segment cell lives.
enum Location {
    /// Literal value, no memory.
    Constant(u16),
    /// `base[index]` through a pointer register.
    Indirect(&'static str, u16),
    /// A fixed symbol or address.
    Direct(String),
}

/// Trait for segment access translation.
pub trait MemoryTranslator {
    /// Translate `push segment index`.
    fn translate_push(&mut self, segment: Segment, index: u16) -> Result<()>;

    /// Translate `pop segment index`.
    fn translate_pop(&mut self, segment: Segment, index: u16) -> Result<()>;
}

impl Translator<'_> {
    fn locate(&self, segment: Segment, index: u16) -> Result<Location> {
        let max = segment.max_index();
        if index > max {
            return Err(CompileError::new(
                ErrorCode::SegmentIndexOutOfRange,
                format!(
                    "Index {} is out of range for segment '{}' (max {})",
                    index, segment, max
                ),
                Span::default(),
            ));
        }

        let location = match segment {
            Segment::Constant => Location::Constant(index),
            Segment::Local => Location::Indirect("LCL", index),
            Segment::Argument => Location::Indirect("ARG", index),
            Segment::This => Location::Indirect("THIS", index),
            Segment::That => Location::Indirect("THAT", index),
            Segment::Pointer if index == 0 => Location::Direct("THIS".to_string()),
            Segment::Pointer => Location::Direct("THAT".to_string()),
            Segment::Temp => Location::Direct(format!("R{}", TEMP_BASE + index)),
            Segment::Static => Location::Direct(format!("{}.{}", self.file_name, index)),
        };
        Ok(location)
    }
}

impl MemoryTranslator for Translator<'_> {
    fn translate_push(&mut self, segment: Segment, index: u16) -> Result<()> {
        match self.locate(segment, index)? {
            Location::Constant(value) => {
                self.emit_at(&value.to_string());
                self.emit("D=A");
            }
            Location::Indirect(base, offset) => {
                self.emit_at(&offset.to_string());
                self.emit("D=A");
                self.emit_at(base);
                self.emit_lines(&["A=D+M", "D=M"]);
            }
            Location::Direct(symbol) => {
                self.emit_at(&symbol);
                self.emit("D=M");
            }
        }
        self.emit_push_d();
        Ok(())
    }

    fn translate_pop(&mut self, segment: Segment, index: u16) -> Result<()> {
        match self.locate(segment, index)? {
            Location::Constant(_) => {
                return Err(CompileError::new(
                    ErrorCode::PopToConstant,
                    "Cannot pop into the constant segment",
                    Span::default(),
                ));
            }
            Location::Indirect(base, offset) => {
                self.emit_at(&offset.to_string());
                self.emit("D=A");
                self.emit_at(base);
                self.emit_lines(&["D=D+M", "@R13", "M=D"]);
                self.emit_pop_d();
                self.emit_lines(&["@R13", "A=M", "M=D"]);
            }
            Location::Direct(symbol) => {
                self.emit_pop_d();
                self.emit_at(&symbol);
                self.emit("M=D");
            }
        }
        Ok(())
    }
}
