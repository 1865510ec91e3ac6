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

//! Jack front end: recursive descent straight to VM commands.
//!
//! There is no syntax tree. Each `compile_*` routine is entered with the
//! current token being the first token of its construct and returns with the
//! current token being the first token after it. The engine keeps one extra
//! token of lookahead to tell `name`, `name[...]` and `name(...)` apart.
//!
//! # Module Structure
//!
//! - `classes` - Class and subroutine declarations (ClassCompiler trait)
//! - `expressions` - Terms, operators and calls (ExpressionCompiler trait)
//! - `helpers` - Peek buffer, expectations and emission (EngineHelpers trait)
//! - `statements` - let, if, while, do, return (StatementCompiler trait)
//! - `symbol_table` - Class and subroutine scopes

pub mod classes;
pub mod expressions;
pub mod helpers;
pub mod statements;
pub mod symbol_table;

use classes::ClassCompiler;
use helpers::EngineHelpers;

pub use symbol_table::{Kind, Symbol, SymbolTable};

use crate::context::TranslationContext;
use crate::error::{CompileError, ErrorCode, Result, Span};
use crate::lexer::{Lexer, Token};
use crate::vm::VmCommand;

/// The compilation engine state for one class.
pub struct CompilationEngine<'source, 'ctx> {
    lexer: Lexer<'source>,
    /// The token every routine is looking at.
    current: Option<(Token, Span)>,
    /// The token after `current`, filled on demand.
    lookahead: Option<(Token, Span)>,
    /// Empty span at the end of the source, for end-of-file errors.
    end_span: Span,
    symbols: SymbolTable,
    class_name: String,
    output: Vec<VmCommand>,
    context: &'ctx mut TranslationContext,
}

impl<'source, 'ctx> CompilationEngine<'source, 'ctx> {
    /// Create an engine over one class source.
    pub fn new(source: &'source str, context: &'ctx mut TranslationContext) -> Self {
        Self {
            lexer: Lexer::new(source),
            current: None,
            lookahead: None,
            end_span: Span::new(source.len(), source.len()),
            symbols: SymbolTable::new(),
            class_name: String::new(),
            output: Vec::new(),
            context,
        }
    }

    /// Compile the class and return its VM commands.
    pub fn compile(mut self) -> Result<Vec<VmCommand>> {
        self.current = self.pull()?;
        self.compile_class()?;

        if let Some((token, span)) = self.current.take() {
            return Err(CompileError::new(
                ErrorCode::TrailingInput,
                format!("Unexpected {} after the end of the class", token.describe()),
                span,
            )
            .with_hint("A source file holds exactly one class"));
        }

        Ok(self.output)
    }
}

/// Compile one Jack class into VM commands.
pub fn compile(source: &str, context: &mut TranslationContext) -> Result<Vec<VmCommand>> {
    CompilationEngine::new(source, context).compile()
}
