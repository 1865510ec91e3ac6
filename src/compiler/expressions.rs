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

//! Expression compilation.
//!
//! Jack has no operator precedence: `term (op term)*` is evaluated strictly
//! left to right, each operator emitted after its right operand.

use super::helpers::EngineHelpers;
use super::CompilationEngine;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::lexer::{Keyword, Token};
use crate::vm::{ArithmeticOp, Segment, VmCommand, MAX_CONSTANT};

/// Map a binary operator symbol to its VM command.
pub fn binary_operator(symbol: char) -> Option<VmCommand> {
    let op = match symbol {
        '+' => ArithmeticOp::Add,
        '-' => ArithmeticOp::Sub,
        '&' => ArithmeticOp::And,
        '|' => ArithmeticOp::Or,
        '<' => ArithmeticOp::Lt,
        '>' => ArithmeticOp::Gt,
        '=' => ArithmeticOp::Eq,
        '*' => return Some(VmCommand::Call("Math.multiply".to_string(), 2)),
        '/' => return Some(VmCommand::Call("Math.divide".to_string(), 2)),
        _ => return None,
    };
    Some(VmCommand::Arithmetic(op))
}

/// Map a unary operator symbol to its VM operation.
pub fn unary_operator(symbol: char) -> Option<ArithmeticOp> {
    match symbol {
        '-' => Some(ArithmeticOp::Neg),
        '~' => Some(ArithmeticOp::Not),
        '^' => Some(ArithmeticOp::ShiftLeft),
        '#' => Some(ArithmeticOp::ShiftRight),
        _ => None,
    }
}

/// Trait for expression compilation.
pub trait ExpressionCompiler<'source> {
    /// Compile `term (op term)*`.
    fn compile_expression(&mut self) -> Result<()>;

    /// Compile a single term.
    fn compile_term(&mut self) -> Result<()>;

    /// Compile a call whose first name has already been consumed.
    ///
    /// The current token is `(` or `.`.
    fn compile_subroutine_call(&mut self, name: String, span: Span) -> Result<()>;

    /// Compile a possibly empty comma-separated list; returns its length.
    fn compile_expression_list(&mut self) -> Result<u16>;

    /// Compile a string constant into `String.new` / `appendChar` calls.
    fn compile_string(&mut self, value: &str, span: Span) -> Result<()>;

    /// Find the segment and index of a variable.
    fn resolve_variable(&self, name: &str, span: &Span) -> Result<(Segment, u16)>;
}

impl<'source> ExpressionCompiler<'source> for CompilationEngine<'source, '_> {
    fn compile_expression(&mut self) -> Result<()> {
        self.compile_term()?;

        while let Some(command) = match self.current() {
            Some(Token::Symbol(c)) => binary_operator(*c),
            _ => None,
        } {
            self.advance()?;
            self.compile_term()?;
            self.emit(command);
        }
        Ok(())
    }

    fn compile_term(&mut self) -> Result<()> {
        let span = self.current_span();
        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected(ErrorCode::ExpectedExpression, "an expression")),
        };

        match token {
            Token::IntConst(value) => {
                self.advance()?;
                self.emit_push(Segment::Constant, value);
            }
            Token::StringConst(value) => {
                self.advance()?;
                self.compile_string(&value, span)?;
            }
            Token::Keyword(Keyword::True) => {
                self.advance()?;
                self.emit_push(Segment::Constant, 0);
                self.emit(VmCommand::Arithmetic(ArithmeticOp::Not));
            }
            Token::Keyword(Keyword::False) | Token::Keyword(Keyword::Null) => {
                self.advance()?;
                self.emit_push(Segment::Constant, 0);
            }
            Token::Keyword(Keyword::This) => {
                self.advance()?;
                self.emit_push(Segment::Pointer, 0);
            }
            Token::Identifier(name) => {
                if self.next_is_symbol('[')? {
                    self.advance()?;
                    let (segment, index) = self.resolve_variable(&name, &span)?;
                    self.advance()?;
                    self.emit_push(segment, index);
                    self.compile_expression()?;
                    self.expect_symbol(']')?;
                    self.emit(VmCommand::Arithmetic(ArithmeticOp::Add));
                    self.emit_pop(Segment::Pointer, 1);
                    self.emit_push(Segment::That, 0);
                } else if self.next_is_symbol('(')? || self.next_is_symbol('.')? {
                    self.advance()?;
                    self.compile_subroutine_call(name, span)?;
                } else {
                    self.advance()?;
                    let (segment, index) = self.resolve_variable(&name, &span)?;
                    self.emit_push(segment, index);
                }
            }
            Token::Symbol('(') => {
                self.advance()?;
                self.compile_expression()?;
                self.expect_symbol(')')?;
            }
            Token::Symbol(c) if unary_operator(c).is_some() => {
                self.advance()?;
                self.compile_term()?;
                if let Some(op) = unary_operator(c) {
                    self.emit(VmCommand::Arithmetic(op));
                }
            }
            _ => return Err(self.unexpected(ErrorCode::ExpectedExpression, "an expression")),
        }
        Ok(())
    }

    fn compile_subroutine_call(&mut self, name: String, span: Span) -> Result<()> {
        let (callee, implicit_args) = if self.check_symbol('.') {
            self.advance()?;
            let (subroutine, _) = self.expect_identifier()?;
            match self.symbols.lookup(&name).cloned() {
                Some(receiver) => {
                    self.emit_push(receiver.kind.segment(), receiver.index);
                    (format!("{}.{}", receiver.type_name, subroutine), 1)
                }
                None => (format!("{}.{}", name, subroutine), 0),
            }
        } else if self.check_symbol('(') {
            self.emit_push(Segment::Pointer, 0);
            (format!("{}.{}", self.class_name, name), 1)
        } else {
            return Err(CompileError::new(
                ErrorCode::UnexpectedToken,
                format!("Expected '(' or '.' after '{}'", name),
                span,
            ));
        };

        self.expect_symbol('(')?;
        let args = self.compile_expression_list()?;
        self.expect_symbol(')')?;
        self.emit(VmCommand::Call(callee, args + implicit_args));
        Ok(())
    }

    fn compile_expression_list(&mut self) -> Result<u16> {
        if self.check_symbol(')') {
            return Ok(0);
        }
        let mut count = 0;
        loop {
            self.compile_expression()?;
            count += 1;
            if !self.check_symbol(',') {
                return Ok(count);
            }
            self.advance()?;
        }
    }

    fn compile_string(&mut self, value: &str, span: Span) -> Result<()> {
        let length = u16::try_from(value.len())
            .ok()
            .filter(|n| *n <= MAX_CONSTANT)
            .ok_or_else(|| {
                CompileError::new(
                    ErrorCode::IntegerTooLarge,
                    "String constant is too long",
                    span,
                )
            })?;

        self.emit_push(Segment::Constant, length);
        self.emit(VmCommand::Call("String.new".to_string(), 1));
        for c in value.bytes() {
            self.emit_push(Segment::Constant, c as u16);
            self.emit(VmCommand::Call("String.appendChar".to_string(), 2));
        }
        Ok(())
    }

    fn resolve_variable(&self, name: &str, span: &Span) -> Result<(Segment, u16)> {
        match self.symbols.lookup(name) {
            Some(symbol) => Ok((symbol.kind.segment(), symbol.index)),
            None => Err(CompileError::new(
                ErrorCode::UndefinedVariable,
                format!("Undefined variable '{}'", name),
                span.clone(),
            )
            .with_hint("Declare it with 'var', 'field', 'static' or as a parameter")),
        }
    }
}
