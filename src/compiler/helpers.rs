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

//! Compilation engine helper methods for token navigation and emission.
//!
//! This module provides:
//! - The peek buffer (current token plus one lookahead)
//! - Token matching and expectation
//! - Error creation
//! - VM command emission

use super::CompilationEngine;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::lexer::{Keyword, Token};
use crate::vm::{Segment, VmCommand};

/// Trait for compilation engine helper operations.
pub trait EngineHelpers<'source> {
    /// Pull the next token from the lexer, or `None` at end of input.
    fn pull(&mut self) -> Result<Option<(Token, Span)>>;

    /// Get the current token without consuming it.
    fn current(&self) -> Option<&Token>;

    /// Get the current token's span, or an empty span at end of input.
    fn current_span(&self) -> Span;

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<(Token, Span)>;

    /// Check if the token after the current one is the given symbol.
    fn next_is_symbol(&mut self, symbol: char) -> Result<bool>;

    /// Check if the current token is the given symbol.
    fn check_symbol(&self, symbol: char) -> bool;

    /// Check if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool;

    /// Consume the given symbol or fail.
    fn expect_symbol(&mut self, symbol: char) -> Result<Span>;

    /// Consume the given keyword or fail.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span>;

    /// Consume an identifier or fail.
    fn expect_identifier(&mut self) -> Result<(String, Span)>;

    /// Create an error describing what was expected at the current token.
    fn unexpected(&self, code: ErrorCode, expected: &str) -> CompileError;

    /// Append a command to the output.
    fn emit(&mut self, command: VmCommand);

    /// Emit `push segment index`.
    fn emit_push(&mut self, segment: Segment, index: u16);

    /// Emit `pop segment index`.
    fn emit_pop(&mut self, segment: Segment, index: u16);
}

impl<'source> EngineHelpers<'source> for CompilationEngine<'source, '_> {
    fn pull(&mut self) -> Result<Option<(Token, Span)>> {
        self.lexer.next().transpose()
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref().map(|(t, _)| t)
    }

    fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map_or_else(|| self.end_span.clone(), |(_, s)| s.clone())
    }

    fn advance(&mut self) -> Result<(Token, Span)> {
        let next = match self.lookahead.take() {
            Some(token) => Some(token),
            None => self.pull()?,
        };
        match std::mem::replace(&mut self.current, next) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(ErrorCode::UnexpectedEndOfFile, "a token")),
        }
    }

    fn next_is_symbol(&mut self, symbol: char) -> Result<bool> {
        if self.lookahead.is_none() {
            self.lookahead = self.pull()?;
        }
        Ok(self
            .lookahead
            .as_ref()
            .is_some_and(|(t, _)| t.is_symbol(symbol)))
    }

    fn check_symbol(&self, symbol: char) -> bool {
        self.current().is_some_and(|t| t.is_symbol(symbol))
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().is_some_and(|t| t.is_keyword(keyword))
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<Span> {
        if self.check_symbol(symbol) {
            Ok(self.advance()?.1)
        } else {
            Err(self.unexpected(ErrorCode::UnexpectedToken, &format!("'{}'", symbol)))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span> {
        if self.check_keyword(keyword) {
            Ok(self.advance()?.1)
        } else {
            Err(self.unexpected(ErrorCode::UnexpectedToken, &format!("'{}'", keyword)))
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, Span)> {
        if let Some(Token::Identifier(_)) = self.current() {
            if let (Token::Identifier(name), span) = self.advance()? {
                return Ok((name, span));
            }
        }
        Err(self.unexpected(ErrorCode::ExpectedIdentifier, "an identifier"))
    }

    fn unexpected(&self, code: ErrorCode, expected: &str) -> CompileError {
        match self.current() {
            Some(token) => CompileError::new(
                code,
                format!("Expected {}, found {}", expected, token.describe()),
                self.current_span(),
            ),
            None => CompileError::new(
                ErrorCode::UnexpectedEndOfFile,
                format!("Expected {}, found end of file", expected),
                self.end_span.clone(),
            ),
        }
    }

    fn emit(&mut self, command: VmCommand) {
        log::trace!("emit: {}", command);
        self.output.push(command);
    }

    fn emit_push(&mut self, segment: Segment, index: u16) {
        self.emit(VmCommand::Push(segment, index));
    }

    fn emit_pop(&mut self, segment: Segment, index: u16) {
        self.emit(VmCommand::Pop(segment, index));
    }
}
