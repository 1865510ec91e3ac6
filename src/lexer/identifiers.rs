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

//! Identifier and keyword scanning for the lexer.

use super::helpers::LexerHelpers;
use super::Lexer;
use super::Token;
use crate::error::Span;

/// Trait for identifier scanning operations.
pub trait IdentifierScanner<'source> {
    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self) -> (Token, Span);
}

impl<'source> IdentifierScanner<'source> for Lexer<'source> {
    fn scan_identifier(&mut self) -> (Token, Span) {
        let start = self.offset();

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.offset()];
        (
            Token::from_keyword_or_identifier(text),
            self.span_from(start),
        )
    }
}
