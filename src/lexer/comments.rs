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

//! Whitespace and comment skipping for the lexer.
//!
//! Handles `// line` comments and `/* block */` comments (which also covers
//! the `/** API */` form). Block comments may span lines.

use super::helpers::LexerHelpers;
use super::Lexer;
use crate::error::{CompileError, ErrorCode};

/// Trait for skipping everything that is not a token.
pub trait TriviaSkipper<'source> {
    /// Skip whitespace and comments up to the next token or end of input.
    fn skip_trivia(&mut self) -> Result<(), CompileError>;
}

impl<'source> TriviaSkipper<'source> for Lexer<'source> {
    fn skip_trivia(&mut self) -> Result<(), CompileError> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.offset();
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(CompileError::new(
                                    ErrorCode::UnterminatedComment,
                                    "Unterminated block comment",
                                    self.span_from(start),
                                )
                                .with_hint("Close the comment with '*/'"));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }
}
