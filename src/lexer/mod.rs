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

//! Lexer module for the Jack language.
//!
//! This module turns Jack source text into a lazy stream of tokens.
//! It handles:
//! - Keywords and identifiers
//! - Integer constants (0..=32767)
//! - String constants
//! - Single-character symbols
//! - Line and block comments
//!
//! The lexer is an [`Iterator`] over `Result<(Token, Span), CompileError>`.
//! After the first error it yields nothing further.

mod comments;
mod helpers;
mod identifiers;
mod numbers;
mod strings;
mod tokens;

pub use numbers::MAX_INT_CONST;
pub use tokens::{is_symbol, Keyword, Token, SYMBOLS};

use crate::error::{CompileError, ErrorCode};
use crate::error::Span;
use comments::TriviaSkipper;
use helpers::LexerHelpers;
use identifiers::IdentifierScanner;
use numbers::NumberScanner;
use strings::StringScanner;

/// The lexer state for tokenizing source code.
pub struct Lexer<'source> {
    /// The source code being tokenized.
    source: &'source str,
    /// Current byte position in the source.
    position: usize,
    /// Set once an error has been reported.
    failed: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            failed: false,
        }
    }

    /// Scan the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<(Token, Span)>, CompileError> {
        self.skip_trivia()?;

        let start = self.offset();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        if c == '"' {
            return self.scan_string().map(Some);
        }
        if c.is_ascii_digit() {
            return self.scan_number().map(Some);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(Some(self.scan_identifier()));
        }
        if is_symbol(c) {
            self.advance();
            return Ok(Some((Token::Symbol(c), self.span_from(start))));
        }

        self.advance();
        Err(CompileError::new(
            ErrorCode::InvalidCharacter,
            format!("Unexpected character '{}'", c),
            self.span_from(start),
        ))
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<(Token, Span), CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize source code into a vector of tokens with their spans.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    Lexer::new(source).collect()
}
