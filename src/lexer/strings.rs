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

//! String constant scanning for the lexer.
//!
//! Jack strings have no escape sequences: everything between the quotes is
//! taken literally, except that a string may not span lines.

use super::helpers::LexerHelpers;
use super::Lexer;
use super::Token;
use crate::error::{CompileError, ErrorCode, Span};

/// Trait for string scanning operations.
pub trait StringScanner<'source> {
    /// Scan a string constant.
    fn scan_string(&mut self) -> Result<(Token, Span), CompileError>;
}

impl<'source> StringScanner<'source> for Lexer<'source> {
    fn scan_string(&mut self) -> Result<(Token, Span), CompileError> {
        let start = self.offset();
        self.advance(); // consume opening "

        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(CompileError::new(
                        ErrorCode::UnterminatedString,
                        "Unterminated string constant",
                        self.span_from(start),
                    )
                    .with_hint("String constants cannot span lines"));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(c) if !c.is_ascii() => {
                    let char_start = self.offset();
                    self.advance();
                    return Err(CompileError::new(
                        ErrorCode::InvalidCharacter,
                        format!("Character '{}' cannot appear in a string constant", c),
                        self.span_from(char_start),
                    ));
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok((Token::StringConst(value), self.span_from(start)))
    }
}
