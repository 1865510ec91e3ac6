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

//! Token definitions for the Jack language.

/// The symbols of the Jack language, including the `^` (shift left) and
/// `#` (shift right) unary operators.
pub const SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
    '^', '#',
];

/// Check if a character is a Jack symbol.
pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(&c)
}

/// A reserved word of the Jack language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `class`
    Class,
    /// `constructor`
    Constructor,
    /// `function`
    Function,
    /// `method`
    Method,
    /// `field`
    Field,
    /// `static`
    Static,
    /// `var`
    Var,
    /// `int`
    Int,
    /// `char`
    Char,
    /// `boolean`
    Boolean,
    /// `void`
    Void,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `this`
    This,
    /// `let`
    Let,
    /// `do`
    Do,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `return`
    Return,
}

impl Keyword {
    /// Look up the keyword spelled by `text`.
    pub fn lookup(text: &str) -> Option<Keyword> {
        let keyword = match text {
            "class" => Keyword::Class,
            "constructor" => Keyword::Constructor,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "field" => Keyword::Field,
            "static" => Keyword::Static,
            "var" => Keyword::Var,
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "boolean" => Keyword::Boolean,
            "void" => Keyword::Void,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            _ => return None,
        };
        Some(keyword)
    }

    /// Get the source spelling of this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }

    /// Check if this keyword names a built-in variable type.
    pub fn is_primitive_type(&self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token in the Jack language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Reserved word.
    Keyword(Keyword),
    /// Single-character symbol.
    Symbol(char),
    /// Class, subroutine or variable name.
    Identifier(String),
    /// Integer literal in 0..=32767.
    IntConst(u16),
    /// String literal without its quotes.
    StringConst(String),
}

impl Token {
    /// Classify a word as a keyword or an identifier. Keywords win.
    pub fn from_keyword_or_identifier(text: &str) -> Token {
        match Keyword::lookup(text) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(text.to_string()),
        }
    }

    /// Check if this token is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(k) if *k == keyword)
    }

    /// Check if this token is the given symbol.
    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Token::Symbol(c) if *c == symbol)
    }

    /// Get a human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Keyword(k) => format!("keyword '{}'", k),
            Token::Symbol(c) => format!("symbol '{}'", c),
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::IntConst(n) => format!("integer {}", n),
            Token::StringConst(s) => format!("string \"{}\"", s),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{}", k),
            Token::Symbol(c) => write!(f, "{}", c),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::IntConst(n) => write!(f, "{}", n),
            Token::StringConst(s) => write!(f, "\"{}\"", s),
        }
    }
}
