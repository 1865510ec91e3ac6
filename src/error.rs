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

//! Error types for the jackc toolchain.
//!
//! Every stage (lexer, compilation engine, VM translator, assembler) reports
//! failures through the single [`CompileError`] type. Errors are always fatal
//! for the unit being translated.

use thiserror::Error;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The four failure families of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A character sequence that is not a token.
    Lexical,
    /// A token stream that does not match the grammar.
    Syntax,
    /// A VM command, segment or assembly mnemonic outside the fixed vocabulary.
    UnknownSymbol,
    /// A label that is referenced but never bound, or bound twice.
    UnresolvedLabel,
}

/// Error codes for the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E001-E030)
    InvalidCharacter,
    InvalidDigitInNumber,
    UnterminatedString,
    UnterminatedComment,
    IntegerTooLarge,

    // Syntax errors (E100-E200)
    UnexpectedToken,
    UnexpectedEndOfFile,
    ExpectedExpression,
    ExpectedStatement,
    ExpectedIdentifier,
    ExpectedType,
    TrailingInput,
    UndefinedVariable,
    DuplicateDeclaration,

    // Unknown symbol errors (E300-E312)
    UnknownCommand,
    UnknownSegment,
    MalformedCommand,
    SegmentIndexOutOfRange,
    PopToConstant,
    InvalidUnitName,
    UnknownMnemonic,
    MalformedInstruction,
    AddressOutOfRange,

    // Label errors (E400-E401)
    UnresolvedLabel,
    DuplicateLabel,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCharacter => "E001",
            ErrorCode::InvalidDigitInNumber => "E003",
            ErrorCode::UnterminatedString => "E010",
            ErrorCode::UnterminatedComment => "E011",
            ErrorCode::IntegerTooLarge => "E020",

            ErrorCode::UnexpectedToken => "E100",
            ErrorCode::UnexpectedEndOfFile => "E101",
            ErrorCode::TrailingInput => "E102",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedStatement => "E104",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::ExpectedType => "E106",
            ErrorCode::UndefinedVariable => "E200",
            ErrorCode::DuplicateDeclaration => "E201",

            ErrorCode::UnknownCommand => "E300",
            ErrorCode::UnknownSegment => "E301",
            ErrorCode::MalformedCommand => "E302",
            ErrorCode::SegmentIndexOutOfRange => "E303",
            ErrorCode::PopToConstant => "E304",
            ErrorCode::InvalidUnitName => "E305",
            ErrorCode::UnknownMnemonic => "E310",
            ErrorCode::MalformedInstruction => "E311",
            ErrorCode::AddressOutOfRange => "E312",

            ErrorCode::UnresolvedLabel => "E400",
            ErrorCode::DuplicateLabel => "E401",
        }
    }

    /// Get the failure family this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::InvalidCharacter
            | ErrorCode::InvalidDigitInNumber
            | ErrorCode::UnterminatedString
            | ErrorCode::UnterminatedComment
            | ErrorCode::IntegerTooLarge => ErrorCategory::Lexical,

            ErrorCode::UnexpectedToken
            | ErrorCode::UnexpectedEndOfFile
            | ErrorCode::ExpectedExpression
            | ErrorCode::ExpectedStatement
            | ErrorCode::ExpectedIdentifier
            | ErrorCode::ExpectedType
            | ErrorCode::TrailingInput
            | ErrorCode::UndefinedVariable
            | ErrorCode::DuplicateDeclaration => ErrorCategory::Syntax,

            ErrorCode::UnknownCommand
            | ErrorCode::UnknownSegment
            | ErrorCode::MalformedCommand
            | ErrorCode::SegmentIndexOutOfRange
            | ErrorCode::PopToConstant
            | ErrorCode::InvalidUnitName
            | ErrorCode::UnknownMnemonic
            | ErrorCode::MalformedInstruction
            | ErrorCode::AddressOutOfRange => ErrorCategory::UnknownSymbol,

            ErrorCode::UnresolvedLabel | ErrorCode::DuplicateLabel => {
                ErrorCategory::UnresolvedLabel
            }
        }
    }
}

/// A toolchain error with source location.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The span in the unit's text where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
    /// The unit the error belongs to, when known.
    pub file: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
            file: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attach the unit name, keeping one that is already set.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        if self.file.is_none() {
            self.file = Some(file.into());
        }
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the failure family of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename
        .or(error.file.as_deref())
        .unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = error
        .span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
