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

//! Hack assembly instructions and their line parser.

use crate::error::{CompileError, ErrorCode, Result, Span};

/// Largest value an address instruction can load.
pub const MAX_ADDRESS: u16 = 32767;

/// Mnemonic used for an absent `dest` or `jump` field.
pub const NULL_MNEMONIC: &str = "null";

/// Operand of an address instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Literal(u16),
    Symbol(String),
}

/// A compute instruction `dest=comp;jump`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compute {
    pub dest: String,
    pub comp: String,
    pub jump: String,
}

impl Compute {
    /// Check if this instruction can transfer control.
    pub fn is_jump(&self) -> bool {
        self.jump != NULL_MNEMONIC
    }

    /// Check if this instruction overwrites the A register.
    pub fn writes_a(&self) -> bool {
        self.dest.contains('A')
    }
}

/// One line of Hack assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `@value` or `@symbol`.
    Address(Address),
    /// `dest=comp;jump`.
    Compute(Compute),
    /// `(LABEL)` pseudo-command; produces no word.
    Label(String),
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

/// Check that `name` can be used as a label or variable.
pub fn is_valid_symbol(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => name.chars().all(is_symbol_char),
        _ => false,
    }
}

/// Parse assembly text into instructions with their spans.
pub fn parse(source: &str) -> Result<Vec<(Instruction, Span)>> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let code = match line.find("//") {
            Some(i) => &line[..i],
            None => line,
        };
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }

        let start = line_start + (code.len() - code.trim_start().len());
        let span = Span::new(start, start + trimmed.len());
        let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

        let instruction = parse_instruction(&compact, &span)?;
        instructions.push((instruction, span));
    }

    Ok(instructions)
}

fn malformed(text: &str, span: &Span) -> CompileError {
    CompileError::new(
        ErrorCode::MalformedInstruction,
        format!("Malformed instruction '{}'", text),
        span.clone(),
    )
}

fn parse_instruction(text: &str, span: &Span) -> Result<Instruction> {
    if let Some(operand) = text.strip_prefix('@') {
        return parse_address(operand, text, span).map(Instruction::Address);
    }

    if let Some(inner) = text.strip_prefix('(') {
        return match inner.strip_suffix(')') {
            Some(name) if is_valid_symbol(name) => Ok(Instruction::Label(name.to_string())),
            _ => Err(malformed(text, span).with_hint("Labels look like (NAME)")),
        };
    }

    let (dest, rest) = match text.split_once('=') {
        Some((dest, rest)) => (dest, rest),
        None => (NULL_MNEMONIC, text),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp, jump),
        None => (rest, NULL_MNEMONIC),
    };
    if dest.is_empty() || comp.is_empty() || jump.is_empty() {
        return Err(malformed(text, span));
    }

    Ok(Instruction::Compute(Compute {
        dest: dest.to_string(),
        comp: comp.to_string(),
        jump: jump.to_string(),
    }))
}

fn parse_address(operand: &str, text: &str, span: &Span) -> Result<Address> {
    if operand.is_empty() {
        return Err(malformed(text, span).with_hint("'@' needs a number or a symbol"));
    }

    if operand.starts_with(|c: char| c.is_ascii_digit()) {
        if !operand.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed(text, span).with_hint("Symbols cannot start with a digit"));
        }
        return match operand.parse::<u32>() {
            Ok(value) if value <= MAX_ADDRESS as u32 => Ok(Address::Literal(value as u16)),
            _ => Err(CompileError::new(
                ErrorCode::AddressOutOfRange,
                format!("Address {} does not fit in 15 bits (max {})", operand, MAX_ADDRESS),
                span.clone(),
            )),
        };
    }

    if is_valid_symbol(operand) {
        Ok(Address::Symbol(operand.to_string()))
    } else {
        Err(malformed(text, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instructions(source: &str) -> Vec<Instruction> {
        parse(source).unwrap().into_iter().map(|(i, _)| i).collect()
    }

    #[test]
    fn test_parse_forms() {
        let parsed = instructions("@17\n@LOOP\n(LOOP)\nD=M\n0;JMP\nAM=M-1\nD;JGT\n");
        assert_eq!(parsed[0], Instruction::Address(Address::Literal(17)));
        assert_eq!(parsed[1], Instruction::Address(Address::Symbol("LOOP".into())));
        assert_eq!(parsed[2], Instruction::Label("LOOP".into()));
        assert_eq!(
            parsed[3],
            Instruction::Compute(Compute {
                dest: "D".into(),
                comp: "M".into(),
                jump: "null".into(),
            })
        );
        assert_eq!(
            parsed[4],
            Instruction::Compute(Compute {
                dest: "null".into(),
                comp: "0".into(),
                jump: "JMP".into(),
            })
        );
        assert_eq!(parsed.len(), 7);
    }

    #[test]
    fn test_whitespace_and_comments() {
        let parsed = instructions("  // header\n\n   D = D + A   // sum\n\t@ R1\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed[0],
            Instruction::Compute(Compute {
                dest: "D".into(),
                comp: "D+A".into(),
                jump: "null".into(),
            })
        );
        assert_eq!(parsed[1], Instruction::Address(Address::Symbol("R1".into())));
    }

    #[test]
    fn test_spans_skip_indentation() {
        let parsed = parse("@1\n   M=D  // store\n").unwrap();
        assert_eq!(parsed[1].1, Span::new(6, 9));
    }

    #[test]
    fn test_symbol_characters() {
        let parsed = instructions("@Main.main$ret.0\n@CMP$TRUE.12\n@a_b:c");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_address_out_of_range() {
        let err = parse("@32768").unwrap_err();
        assert_eq!(err.code, ErrorCode::AddressOutOfRange);
        assert!(parse("@32767").is_ok());
    }

    #[test]
    fn test_malformed() {
        for source in ["@", "@12ab", "(LOOP", "()", "=D", "D=", "D;", "@a-b"] {
            let err = parse(source).unwrap_err();
            assert_eq!(err.code, ErrorCode::MalformedInstruction, "{}", source);
        }
    }

    #[test]
    fn test_compute_predicates() {
        let jump = Compute {
            dest: "null".into(),
            comp: "D".into(),
            jump: "JNE".into(),
        };
        assert!(jump.is_jump());
        assert!(!jump.writes_a());

        let load = Compute {
            dest: "AM".into(),
            comp: "M-1".into(),
            jump: "null".into(),
        };
        assert!(!load.is_jump());
        assert!(load.writes_a());
    }
}
