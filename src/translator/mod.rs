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

//! VM translator: stack-machine commands to Hack assembly.
//!
//! # Module Structure
//!
//! - `arithmetic` - add, sub, comparisons, shifts (ArithmeticTranslator trait)
//! - `branching` - label, goto, if-goto (BranchTranslator trait)
//! - `emit` - Line emission and stack primitives (AsmEmitter trait)
//! - `functions` - function, call, return, bootstrap (FunctionTranslator trait)
//! - `memory` - push and pop per segment (MemoryTranslator trait)
//!
//! The translator tracks the current file (for `static` symbols) and the
//! current function (for label scoping). Comparison and return-site labels
//! come from the shared [`TranslationContext`].

pub mod arithmetic;
pub mod branching;
pub mod emit;
pub mod functions;
pub mod memory;

use arithmetic::ArithmeticTranslator;
use branching::BranchTranslator;
use emit::AsmEmitter;
use functions::FunctionTranslator;
use memory::MemoryTranslator;

use crate::assembler::is_valid_symbol;
use crate::config::Config;
use crate::context::TranslationContext;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::vm::VmCommand;

/// One VM file: its name (used for `static` symbols) and its commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmUnit {
    pub name: String,
    pub commands: Vec<VmCommand>,
}

impl VmUnit {
    /// Create a unit.
    pub fn new(name: impl Into<String>, commands: Vec<VmCommand>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }
}

/// The VM translator state.
pub struct Translator<'ctx> {
    /// Generated assembly text.
    output: String,
    /// Name of the unit being translated.
    file_name: String,
    /// Name of the enclosing function, or the unit name before the first one.
    function_name: String,
    annotate: bool,
    context: &'ctx mut TranslationContext,
}

impl<'ctx> Translator<'ctx> {
    /// Create a translator.
    pub fn new(config: &Config, context: &'ctx mut TranslationContext) -> Self {
        Self {
            output: String::new(),
            file_name: String::new(),
            function_name: String::new(),
            annotate: config.annotate,
            context,
        }
    }

    /// Emit the bootstrap sequence.
    pub fn bootstrap(&mut self, stack_base: u16, entry: &str) -> Result<()> {
        log::debug!("bootstrap: SP={}, entry {}", stack_base, entry);
        if self.annotate {
            self.emit_comment(&format!("bootstrap: call {}", entry));
        }
        self.write_bootstrap(stack_base, entry)
    }

    /// Translate every command of one unit.
    pub fn translate_unit(&mut self, unit: &VmUnit) -> Result<()> {
        log::debug!(
            "translating {} ({} commands)",
            unit.name,
            unit.commands.len()
        );
        if !is_valid_symbol(&unit.name) {
            return Err(CompileError::new(
                ErrorCode::InvalidUnitName,
                format!("'{}' is not a valid unit name", unit.name),
                Span::default(),
            )
            .with_hint("Use letters, digits, '_', '.', '$' or ':' and do not start with a digit")
            .with_file(unit.name.clone()));
        }
        self.file_name = unit.name.clone();
        self.function_name = unit.name.clone();

        for command in &unit.commands {
            self.translate_command(command)
                .map_err(|err| err.with_file(unit.name.clone()))?;
        }
        Ok(())
    }

    /// Translate a single command.
    pub fn translate_command(&mut self, command: &VmCommand) -> Result<()> {
        if self.annotate {
            self.emit_comment(&command.to_string());
        }

        match command {
            VmCommand::Arithmetic(op) => self.translate_arithmetic(*op),
            VmCommand::Push(segment, index) => self.translate_push(*segment, *index)?,
            VmCommand::Pop(segment, index) => self.translate_pop(*segment, *index)?,
            VmCommand::Label(label) => self.translate_label(label),
            VmCommand::Goto(label) => self.translate_goto(label),
            VmCommand::IfGoto(label) => self.translate_if_goto(label),
            VmCommand::Call(name, args) => self.translate_call(name, *args)?,
            VmCommand::Function(name, locals) => self.translate_function(name, *locals),
            VmCommand::Return => self.translate_return(),
        }
        Ok(())
    }

    /// Take the generated assembly.
    pub fn finish(self) -> String {
        self.output
    }
}

/// Translate VM units into one assembly program.
pub fn translate(
    units: &[VmUnit],
    config: &Config,
    context: &mut TranslationContext,
) -> Result<String> {
    let mut translator = Translator::new(config, context);
    if config.bootstrap {
        translator.bootstrap(config.stack_base, &config.entry_function)?;
    }
    for unit in units {
        translator.translate_unit(unit)?;
    }
    Ok(translator.finish())
}
