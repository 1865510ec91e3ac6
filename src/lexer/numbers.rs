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

//! Integer literal scanning for the lexer.

use super::helpers::LexerHelpers;
use super::Lexer;
use super::Token;
use crate::error::{CompileError, ErrorCode, Span};

/// Largest integer constant the language accepts.
pub const MAX_INT_CONST: u16 = 32767;

/// Trait for number scanning operations.
pub trait NumberScanner<'source> {
    /// Scan a decimal integer constant.
    fn scan_number(&mut self) -> Result<(Token, Span), CompileError>;
}

impl<'source> NumberScanner<'source> for Lexer<'source> {
    fn scan_number(&mut self) -> Result<(Token, Span), CompileError> {
        let start = self.offset();
        let mut value: u64 = 0;

        while let Some(c) = self.peek() {
            if let Some(digit) = c.to_digit(10) {
                self.advance();
                value = value.saturating_mul(10).saturating_add(digit as u64);
            } else if c.is_ascii_alphabetic() || c == '_' {
                self.advance();
                return Err(CompileError::new(
                    ErrorCode::InvalidDigitInNumber,
                    format!("Invalid digit '{}' in integer constant", c),
                    self.span_from(start),
                )
                .with_hint("Identifiers cannot start with a digit"));
            } else {
                break;
            }
        }

        if value > MAX_INT_CONST as u64 {
            return Err(CompileError::new(
                ErrorCode::IntegerTooLarge,
                format!("Integer constant too large (max {})", MAX_INT_CONST),
                self.span_from(start),
            ));
        }

        Ok((Token::IntConst(value as u16), self.span_from(start)))
    }
}
