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

//! Lexer helper methods for character navigation and span creation.

use super::Lexer;
use crate::error::Span;

/// Trait for lexer helper operations.
pub trait LexerHelpers<'source> {
    /// Get the current byte position in the source.
    fn offset(&self) -> usize;

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char>;

    /// Peek at the next character without advancing.
    fn peek_next(&self) -> Option<char>;

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char>;

    /// Create a span from start position to current position.
    fn span_from(&self, start: usize) -> Span;
}

impl<'source> LexerHelpers<'source> for Lexer<'source> {
    fn offset(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.position)
    }
}
