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

//! Two-pass Hack assembler.
//!
//! Pass 1 binds every `(LABEL)` to the address of the next real instruction.
//! Pass 2 encodes each instruction, allocating unknown symbols as variables
//! from RAM 16 upward in order of first use.
//!
//! # Module Structure
//!
//! - `code` - dest/comp/jump encoding tables
//! - `instruction` - Instruction model and line parser
//! - `symbol_table` - Predefined symbols, labels and variables

pub mod code;
pub mod instruction;
pub mod symbol_table;

pub use instruction::{is_valid_symbol, Address, Compute, Instruction};
pub use symbol_table::SymbolTable;

use crate::error::{CompileError, ErrorCode, Result, Span};
use instruction::MAX_ADDRESS;

/// Assemble Hack assembly text into 16-character binary words.
pub fn assemble(source: &str) -> Result<Vec<String>> {
    let instructions = instruction::parse(source)?;
    let mut symbols = SymbolTable::new();

    let program = first_pass(instructions, &mut symbols)?;
    log::debug!("assembler pass 1: {} instructions", program.len());

    let words = second_pass(&program, &mut symbols)?;
    log::debug!(
        "assembler pass 2: {} words, {} variables",
        words.len(),
        symbols.variable_count()
    );
    Ok(words)
}

/// Bind labels and return the real instructions.
fn first_pass(
    instructions: Vec<(Instruction, Span)>,
    symbols: &mut SymbolTable,
) -> Result<Vec<(Instruction, Span)>> {
    let mut program = Vec::with_capacity(instructions.len());

    for (instruction, span) in instructions {
        match instruction {
            Instruction::Label(name) => {
                let address = u16::try_from(program.len())
                    .ok()
                    .filter(|a| *a <= MAX_ADDRESS)
                    .ok_or_else(|| {
                        CompileError::new(
                            ErrorCode::AddressOutOfRange,
                            format!("Label '{}' lies beyond the 32K instruction space", name),
                            span.clone(),
                        )
                    })?;
                if !symbols.add_label(&name, address) {
                    return Err(CompileError::new(
                        ErrorCode::DuplicateLabel,
                        format!("Label '{}' is already defined", name),
                        span,
                    ));
                }
                log::trace!("label {} = {}", name, address);
            }
            other => program.push((other, span)),
        }
    }

    Ok(program)
}

/// Encode every real instruction.
fn second_pass(program: &[(Instruction, Span)], symbols: &mut SymbolTable) -> Result<Vec<String>> {
    let mut words = Vec::with_capacity(program.len());

    for (i, (instruction, span)) in program.iter().enumerate() {
        let word = match instruction {
            Instruction::Address(Address::Literal(value)) => code::address(*value),
            Instruction::Address(Address::Symbol(name)) => {
                let address = match symbols.get(name) {
                    Some(address) => address,
                    None => {
                        if jumps_through_a(program.get(i + 1)) {
                            return Err(CompileError::new(
                                ErrorCode::UnresolvedLabel,
                                format!("Jump to undefined label '{}'", name),
                                span.clone(),
                            )
                            .with_hint(format!("Declare it with ({})", name)));
                        }
                        symbols.resolve_variable(name)
                    }
                };
                if address > MAX_ADDRESS {
                    return Err(CompileError::new(
                        ErrorCode::AddressOutOfRange,
                        format!("Variable '{}' lies beyond RAM address {}", name, MAX_ADDRESS),
                        span.clone(),
                    ));
                }
                code::address(address)
            }
            Instruction::Compute(compute) => encode_compute(compute, span)?,
            Instruction::Label(_) => continue,
        };
        words.push(word);
    }

    Ok(words)
}

/// Check if the instruction is a jump that uses the A register as its target.
fn jumps_through_a(next: Option<&(Instruction, Span)>) -> bool {
    matches!(next, Some((Instruction::Compute(c), _)) if c.is_jump() && !c.writes_a())
}

fn unknown_mnemonic(field: &str, mnemonic: &str, span: &Span) -> CompileError {
    CompileError::new(
        ErrorCode::UnknownMnemonic,
        format!("Unknown {} mnemonic '{}'", field, mnemonic),
        span.clone(),
    )
}

/// Encode a compute instruction.
pub fn encode_compute(compute: &Compute, span: &Span) -> Result<String> {
    let (prefix, comp) =
        code::comp(&compute.comp).ok_or_else(|| unknown_mnemonic("comp", &compute.comp, span))?;
    let dest =
        code::dest(&compute.dest).ok_or_else(|| unknown_mnemonic("dest", &compute.dest, span))?;
    let jump =
        code::jump(&compute.jump).ok_or_else(|| unknown_mnemonic("jump", &compute.jump, span))?;
    Ok(format!("{}{}{}{}", prefix, comp, dest, jump))
}
