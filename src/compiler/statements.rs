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

//! Statement compilation.
//!
//! Control flow uses two labels per `if` or `while`, drawn from the shared
//! translation context so they stay unique across every class of a run.

use super::expressions::ExpressionCompiler;
use super::helpers::EngineHelpers;
use super::CompilationEngine;
use crate::error::{ErrorCode, Result};
use crate::lexer::{Keyword, Token};
use crate::vm::{ArithmeticOp, Segment, VmCommand};

/// Trait for statement compilation.
pub trait StatementCompiler<'source> {
    /// Compile statements up to (not including) the closing `}`.
    fn compile_statements(&mut self) -> Result<()>;

    /// Compile `let name ([index])? = expression ;`.
    fn compile_let(&mut self) -> Result<()>;

    /// Compile `if (cond) { ... } (else { ... })?`.
    fn compile_if(&mut self) -> Result<()>;

    /// Compile `while (cond) { ... }`.
    fn compile_while(&mut self) -> Result<()>;

    /// Compile `do call ;`.
    fn compile_do(&mut self) -> Result<()>;

    /// Compile `return expression? ;`.
    fn compile_return(&mut self) -> Result<()>;

    /// Compile `{ statements }`.
    fn compile_block(&mut self) -> Result<()>;
}

impl<'source> StatementCompiler<'source> for CompilationEngine<'source, '_> {
    fn compile_statements(&mut self) -> Result<()> {
        loop {
            match self.current() {
                Some(Token::Keyword(Keyword::Let)) => self.compile_let()?,
                Some(Token::Keyword(Keyword::If)) => self.compile_if()?,
                Some(Token::Keyword(Keyword::While)) => self.compile_while()?,
                Some(Token::Keyword(Keyword::Do)) => self.compile_do()?,
                Some(Token::Keyword(Keyword::Return)) => self.compile_return()?,
                Some(Token::Symbol('}')) => return Ok(()),
                _ => return Err(self.unexpected(ErrorCode::ExpectedStatement, "a statement")),
            }
        }
    }

    fn compile_let(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Let)?;
        let (name, span) = self.expect_identifier()?;
        let (segment, index) = self.resolve_variable(&name, &span)?;

        if self.check_symbol('[') {
            self.advance()?;
            self.emit_push(segment, index);
            self.compile_expression()?;
            self.expect_symbol(']')?;
            self.emit(VmCommand::Arithmetic(ArithmeticOp::Add));

            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            self.emit_pop(Segment::Temp, 0);
            self.emit_pop(Segment::Pointer, 1);
            self.emit_push(Segment::Temp, 0);
            self.emit_pop(Segment::That, 0);
        } else {
            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;
            self.emit_pop(segment, index);
        }
        Ok(())
    }

    fn compile_if(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::If)?;
        let else_label = self.context.make_label("IF_ELSE");
        let end_label = self.context.make_label("IF_END");

        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;
        self.emit(VmCommand::Arithmetic(ArithmeticOp::Not));
        self.emit(VmCommand::IfGoto(else_label.clone()));

        self.compile_block()?;
        self.emit(VmCommand::Goto(end_label.clone()));
        self.emit(VmCommand::Label(else_label));

        if self.check_keyword(Keyword::Else) {
            self.advance()?;
            self.compile_block()?;
        }
        self.emit(VmCommand::Label(end_label));
        Ok(())
    }

    fn compile_while(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::While)?;
        let loop_label = self.context.make_label("WHILE_EXP");
        let end_label = self.context.make_label("WHILE_END");

        self.emit(VmCommand::Label(loop_label.clone()));
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;
        self.emit(VmCommand::Arithmetic(ArithmeticOp::Not));
        self.emit(VmCommand::IfGoto(end_label.clone()));

        self.compile_block()?;
        self.emit(VmCommand::Goto(loop_label));
        self.emit(VmCommand::Label(end_label));
        Ok(())
    }

    fn compile_do(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Do)?;
        let (name, span) = self.expect_identifier()?;
        self.compile_subroutine_call(name, span)?;
        self.expect_symbol(';')?;
        self.emit_pop(Segment::Temp, 0);
        Ok(())
    }

    fn compile_return(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.check_symbol(';') {
            self.emit_push(Segment::Constant, 0);
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(';')?;
        self.emit(VmCommand::Return);
        Ok(())
    }

    fn compile_block(&mut self) -> Result<()> {
        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }
}
