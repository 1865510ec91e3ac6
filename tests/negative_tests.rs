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

//! Negative tests: every stage must reject bad input with the right code.

use jackc::{assemble, build, compile_class_to_vm, vm, Config, ErrorCategory, ErrorCode, Span};
use jackc::{SourceUnit, UnitKind};
use test_case::test_case;

fn in_function(body: &str) -> String {
    format!("class Main {{ function void f() {{ {} }} }}", body)
}

// ============================================================================
// Lexical errors
// ============================================================================

#[test_case("class Main { $ }", ErrorCode::InvalidCharacter; "dollar sign")]
#[test_case("class Main { ` }", ErrorCode::InvalidCharacter; "backtick")]
#[test_case("class Main { function void f() { return 12ab; } }", ErrorCode::InvalidDigitInNumber; "letter in number")]
#[test_case("class Main { function void f() { return 32768; } }", ErrorCode::IntegerTooLarge; "integer too large")]
#[test_case("class Main { function void f() { do g(\"abc); } }", ErrorCode::UnterminatedString; "unterminated string")]
#[test_case("class Main { function void f() { do g(\"a\nb\"); } }", ErrorCode::UnterminatedString; "newline in string")]
#[test_case("class Main { /* never closed", ErrorCode::UnterminatedComment; "unterminated comment")]
fn test_lexical_errors(source: &str, expected: ErrorCode) {
    let err = compile_class_to_vm(source).unwrap_err();
    assert_eq!(err.code, expected, "{}", err);
    assert_eq!(err.category(), ErrorCategory::Lexical);
}

// ============================================================================
// Syntax errors
// ============================================================================

#[test_case("let x = 1 }", ErrorCode::UnexpectedToken; "missing semicolon")]
#[test_case("return 1 + ; }", ErrorCode::ExpectedExpression; "missing operand")]
#[test_case("return ); }", ErrorCode::ExpectedExpression; "stray paren")]
#[test_case("let 5 = 1; }", ErrorCode::ExpectedIdentifier; "number as target")]
#[test_case("foo(); }", ErrorCode::ExpectedStatement; "bare call")]
#[test_case("else { } }", ErrorCode::ExpectedStatement; "else without if")]
#[test_case("if x { } }", ErrorCode::UnexpectedToken; "if without parens")]
#[test_case("do Main; }", ErrorCode::UnexpectedToken; "do without call")]
fn test_statement_syntax_errors(body: &str, expected: ErrorCode) {
    let source = format!("class Main {{ function void f() {{ var int x; {} }}", body);
    let err = compile_class_to_vm(&source).unwrap_err();
    assert_eq!(err.code, expected, "{}", err);
    assert_eq!(err.category(), ErrorCategory::Syntax);
}

#[test_case("class { }", ErrorCode::ExpectedIdentifier; "class without name")]
#[test_case("Main { }", ErrorCode::UnexpectedToken; "missing class keyword")]
#[test_case("class Main { field 5 x; }", ErrorCode::ExpectedType; "number as type")]
#[test_case("class Main { field void x; }", ErrorCode::ExpectedType; "void field")]
#[test_case("class Main { function void f(int) { return; } }", ErrorCode::ExpectedIdentifier; "parameter without name")]
#[test_case("class Main { function void f() { return; } } class B { }", ErrorCode::TrailingInput; "two classes")]
#[test_case("class Main { function void f() { return", ErrorCode::UnexpectedEndOfFile; "cut off")]
#[test_case("", ErrorCode::UnexpectedEndOfFile; "empty file")]
fn test_class_syntax_errors(source: &str, expected: ErrorCode) {
    let err = compile_class_to_vm(source).unwrap_err();
    assert_eq!(err.code, expected, "{}", err);
}

#[test]
fn test_undefined_variable() {
    let err = compile_class_to_vm(&in_function("let y = 1; return;")).unwrap_err();
    assert_eq!(err.code, ErrorCode::UndefinedVariable);
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert!(err.message.contains("'y'"));
    assert!(err.hint.is_some());
}

#[test]
fn test_locals_do_not_leak_between_subroutines() {
    let source = "class Main {
        function void f() { var int secret; let secret = 1; return; }
        function void g() { let secret = 2; return; }
    }";
    let err = compile_class_to_vm(source).unwrap_err();
    assert_eq!(err.code, ErrorCode::UndefinedVariable);
}

#[test_case("class Main { field int x, x; }"; "field twice")]
#[test_case("class Main { static int x; field boolean x; }"; "static and field")]
#[test_case("class Main { function void f(int a, int a) { return; } }"; "parameter twice")]
#[test_case("class Main { function void f(int a) { var int a; return; } }"; "local shadows parameter")]
#[test_case("class Main { function void f() { var int x, x; return; } }"; "local twice")]
fn test_duplicate_declaration(source: &str) {
    let err = compile_class_to_vm(source).unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateDeclaration, "{}", err);
    assert_eq!(err.category(), ErrorCategory::Syntax);
}

#[test]
fn test_duplicate_declaration_points_at_second_name() {
    let source = "class Main { function void f() { var int x, x; return; } }";
    let err = compile_class_to_vm(source).unwrap_err();
    assert_eq!(err.span, Span::new(44, 45));
}

#[test]
fn test_local_may_shadow_field() {
    let source = "class Main { field int x; method int f() { var int x; let x = 1; return x; } }";
    assert!(compile_class_to_vm(source).is_ok());
}

// ============================================================================
// VM errors
// ============================================================================

#[test_case("frobnicate", ErrorCode::UnknownCommand; "unknown command")]
#[test_case("Push constant 1", ErrorCode::UnknownCommand; "commands are case sensitive")]
#[test_case("push heap 1", ErrorCode::UnknownSegment; "unknown segment")]
#[test_case("push constant", ErrorCode::MalformedCommand; "missing index")]
#[test_case("push constant -1", ErrorCode::MalformedCommand; "negative index")]
#[test_case("add 1", ErrorCode::MalformedCommand; "operand on arithmetic")]
#[test_case("return now", ErrorCode::MalformedCommand; "operand on return")]
#[test_case("goto", ErrorCode::MalformedCommand; "goto without label")]
#[test_case("call Main.f", ErrorCode::MalformedCommand; "call without count")]
#[test_case("push constant 32768", ErrorCode::SegmentIndexOutOfRange; "constant too large")]
#[test_case("pop temp 8", ErrorCode::SegmentIndexOutOfRange; "temp out of range")]
#[test_case("push pointer 2", ErrorCode::SegmentIndexOutOfRange; "pointer out of range")]
#[test_case("push local 40000", ErrorCode::SegmentIndexOutOfRange; "local offset too large")]
#[test_case("pop that 32768", ErrorCode::SegmentIndexOutOfRange; "that offset too large")]
#[test_case("pop constant 0", ErrorCode::PopToConstant; "pop constant")]
fn test_vm_errors(source: &str, expected: ErrorCode) {
    let err = vm::parse(source).unwrap_err();
    assert_eq!(err.code, expected, "{}", err);
}

#[test]
fn test_vm_error_points_at_offending_line() {
    let err = vm::parse("push constant 1\npush constant 2\nfrobnicate\n").unwrap_err();
    assert_eq!(err.span.start, 32);
    assert_eq!(err.span.end, 42);
}

#[test]
fn test_unit_name_must_be_a_symbol() {
    let units = [
        SourceUnit::new("Sys", UnitKind::Vm, "function Sys.init 0\nlabel HALT\ngoto HALT\n"),
        SourceUnit::new("my-lib", UnitKind::Vm, "push constant 1\npop static 0\n"),
    ];
    let err = build(&units, &Config::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidUnitName);
    assert_eq!(err.file.as_deref(), Some("my-lib"));
}

// ============================================================================
// Assembly errors
// ============================================================================

#[test_case("D=D*A", ErrorCode::UnknownMnemonic; "unknown comp")]
#[test_case("X=D", ErrorCode::UnknownMnemonic; "unknown dest")]
#[test_case("D;JUMP", ErrorCode::UnknownMnemonic; "unknown jump")]
#[test_case("d=a", ErrorCode::UnknownMnemonic; "mnemonics are case sensitive")]
#[test_case("@", ErrorCode::MalformedInstruction; "empty address")]
#[test_case("@12x", ErrorCode::MalformedInstruction; "digit-led symbol")]
#[test_case("(LOOP", ErrorCode::MalformedInstruction; "unclosed label")]
#[test_case("=D", ErrorCode::MalformedInstruction; "empty dest")]
#[test_case("D;", ErrorCode::MalformedInstruction; "empty jump")]
#[test_case("@32768", ErrorCode::AddressOutOfRange; "address too large")]
#[test_case("@NOWHERE\n0;JMP", ErrorCode::UnresolvedLabel; "undefined jump target")]
#[test_case("(X)\n@X\n(X)", ErrorCode::DuplicateLabel; "duplicate label")]
#[test_case("(SP)\n@0", ErrorCode::DuplicateLabel; "label shadows predefined symbol")]
fn test_assembly_errors(source: &str, expected: ErrorCode) {
    let err = assemble(source).unwrap_err();
    assert_eq!(err.code, expected, "{}", err);
}

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(ErrorCode::InvalidCharacter.code(), "E001");
    assert_eq!(ErrorCode::UnexpectedToken.code(), "E100");
    assert_eq!(ErrorCode::UndefinedVariable.code(), "E200");
    assert_eq!(ErrorCode::DuplicateDeclaration.code(), "E201");
    assert_eq!(ErrorCode::UnknownCommand.code(), "E300");
    assert_eq!(ErrorCode::InvalidUnitName.code(), "E305");
    assert_eq!(ErrorCode::UnresolvedLabel.code(), "E400");
}
