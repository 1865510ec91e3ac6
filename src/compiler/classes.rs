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

//! Class-level compilation: class body, variable declarations and
//! subroutine declarations.

use super::helpers::EngineHelpers;
use super::statements::StatementCompiler;
use super::symbol_table::Kind;
use super::CompilationEngine;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::lexer::{Keyword, Token};
use crate::vm::{Segment, VmCommand};

/// Trait for class-level compilation.
pub trait ClassCompiler<'source> {
    /// Compile `class Name { classVarDec* subroutineDec* }`.
    fn compile_class(&mut self) -> Result<()>;

    /// Compile `(static|field) type name (, name)* ;`.
    fn compile_class_var_dec(&mut self) -> Result<()>;

    /// Compile a constructor, function or method.
    fn compile_subroutine(&mut self) -> Result<()>;

    /// Compile the parameter list between the parentheses.
    fn compile_parameter_list(&mut self) -> Result<()>;

    /// Compile `var type name (, name)* ;`.
    fn compile_var_dec(&mut self) -> Result<()>;

    /// Compile a type name, optionally accepting `void`.
    fn compile_type(&mut self, allow_void: bool) -> Result<String>;

    /// Add a variable to the symbol table, rejecting a second declaration
    /// of the same name in one scope.
    fn declare(&mut self, name: &str, span: Span, type_name: &str, kind: Kind) -> Result<()>;
}

impl<'source> ClassCompiler<'source> for CompilationEngine<'source, '_> {
    fn compile_class(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Class)?;
        let (name, _) = self.expect_identifier()?;
        log::debug!("compiling class {}", name);
        self.class_name = name;
        self.expect_symbol('{')?;

        while self.check_keyword(Keyword::Static) || self.check_keyword(Keyword::Field) {
            self.compile_class_var_dec()?;
        }

        while self.check_keyword(Keyword::Constructor)
            || self.check_keyword(Keyword::Function)
            || self.check_keyword(Keyword::Method)
        {
            self.compile_subroutine()?;
        }

        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_class_var_dec(&mut self) -> Result<()> {
        let kind = if self.check_keyword(Keyword::Static) {
            Kind::Static
        } else {
            Kind::Field
        };
        self.advance()?;

        let type_name = self.compile_type(false)?;
        loop {
            let (name, span) = self.expect_identifier()?;
            self.declare(&name, span, &type_name, kind)?;
            if !self.check_symbol(',') {
                break;
            }
            self.advance()?;
        }
        self.expect_symbol(';')?;
        Ok(())
    }

    fn compile_subroutine(&mut self) -> Result<()> {
        let (keyword, _) = self.advance()?;
        self.compile_type(true)?;
        let (name, _) = self.expect_identifier()?;

        self.symbols.start_subroutine();
        if keyword.is_keyword(Keyword::Method) {
            let class_name = self.class_name.clone();
            self.symbols.define("this", &class_name, Kind::Argument);
        }

        self.expect_symbol('(')?;
        self.compile_parameter_list()?;
        self.expect_symbol(')')?;

        self.expect_symbol('{')?;
        while self.check_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        let full_name = format!("{}.{}", self.class_name, name);
        log::trace!("compiling subroutine {}", full_name);
        let locals = self.symbols.var_count(Kind::Local);
        self.emit(VmCommand::Function(full_name, locals));

        if keyword.is_keyword(Keyword::Constructor) {
            let fields = self.symbols.var_count(Kind::Field);
            self.emit_push(Segment::Constant, fields);
            self.emit(VmCommand::Call("Memory.alloc".to_string(), 1));
            self.emit_pop(Segment::Pointer, 0);
        } else if keyword.is_keyword(Keyword::Method) {
            self.emit_push(Segment::Argument, 0);
            self.emit_pop(Segment::Pointer, 0);
        }

        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_parameter_list(&mut self) -> Result<()> {
        if self.check_symbol(')') {
            return Ok(());
        }
        loop {
            let type_name = self.compile_type(false)?;
            let (name, span) = self.expect_identifier()?;
            self.declare(&name, span, &type_name, Kind::Argument)?;
            if !self.check_symbol(',') {
                return Ok(());
            }
            self.advance()?;
        }
    }

    fn compile_var_dec(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Var)?;
        let type_name = self.compile_type(false)?;
        loop {
            let (name, span) = self.expect_identifier()?;
            self.declare(&name, span, &type_name, Kind::Local)?;
            if !self.check_symbol(',') {
                break;
            }
            self.advance()?;
        }
        self.expect_symbol(';')?;
        Ok(())
    }

    fn compile_type(&mut self, allow_void: bool) -> Result<String> {
        let type_name = match self.current() {
            Some(Token::Keyword(k)) if k.is_primitive_type() => k.as_str().to_string(),
            Some(Token::Keyword(Keyword::Void)) if allow_void => "void".to_string(),
            Some(Token::Identifier(name)) => name.clone(),
            _ => return Err(self.unexpected(ErrorCode::ExpectedType, "a type")),
        };
        self.advance()?;
        Ok(type_name)
    }

    fn declare(&mut self, name: &str, span: Span, type_name: &str, kind: Kind) -> Result<()> {
        if self.symbols.is_declared_in_scope(name, kind) {
            return Err(CompileError::new(
                ErrorCode::DuplicateDeclaration,
                format!("'{}' is already declared in this scope", name),
                span,
            ));
        }
        self.symbols.define(name, type_name, kind);
        Ok(())
    }
}
