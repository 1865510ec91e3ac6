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

//! Jackc Toolchain Library
//!
//! This library compiles Jack classes to VM code, translates VM code to Hack
//! assembly and assembles Hack assembly into 16-bit machine words.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`config`] - Translation options
//! - [`context`] - Run-wide label counters
//! - [`lexer`] - Tokenization of Jack source
//! - [`compiler`] - Jack to VM compilation engine
//! - [`vm`] - VM command model and text parser
//! - [`translator`] - VM to assembly translation
//! - [`assembler`] - Assembly to binary
//! - [`output`] - Output formats and file writing
//!
//! # Example
//!
//! ```no_run
//! use jackc::{build, Config, SourceUnit, UnitKind};
//!
//! let main = SourceUnit::new("Main", UnitKind::Jack, std::fs::read_to_string("Main.jack")?);
//! let program = build(&[main], &Config::default())?;
//! println!("{} words", program.binary.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod context;
pub mod error;
pub mod lexer;
pub mod output;
pub mod translator;
pub mod vm;

use std::path::Path;

use output::OutputFormat;

// Re-export commonly used types
pub use config::Config;
pub use context::TranslationContext;
pub use error::{format_error, CompileError, ErrorCategory, ErrorCode, Result, SourceLocation, Span};
pub use lexer::Token;
pub use translator::{translate, VmUnit};
pub use vm::VmCommand;

/// The version of the toolchain.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the toolchain.
pub const NAME: &str = "jackc";

/// Unit name attached to errors in assembly the toolchain generated itself.
pub const GENERATED_UNIT: &str = "<generated>";

/// The language an input unit is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A Jack class.
    Jack,
    /// VM commands.
    Vm,
    /// Hack assembly.
    Asm,
}

impl UnitKind {
    /// Determine the unit kind from a file extension.
    pub fn from_path(path: &Path) -> Option<UnitKind> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "jack" => Some(UnitKind::Jack),
            "vm" => Some(UnitKind::Vm),
            "asm" => Some(UnitKind::Asm),
            _ => None,
        }
    }
}

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Unit name, usually the file stem. Names `static` symbols.
    pub name: String,
    pub kind: UnitKind,
    pub source: String,
}

impl SourceUnit {
    /// Create a unit.
    pub fn new(name: impl Into<String>, kind: UnitKind, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            source: source.into(),
        }
    }
}

/// Everything a build produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// VM text of every Jack and VM unit.
    pub vm: String,
    /// Complete assembly program.
    pub assembly: String,
    /// One 16-character word per real instruction.
    pub binary: Vec<String>,
}

/// Compile one Jack class into VM commands.
pub fn compile_class(source: &str, context: &mut TranslationContext) -> Result<Vec<VmCommand>> {
    compiler::compile(source, context)
}

/// Compile one Jack class into VM text using a fresh context.
pub fn compile_class_to_vm(source: &str) -> Result<String> {
    let mut context = TranslationContext::new();
    let commands = compile_class(source, &mut context)?;
    Ok(vm::to_text(&commands))
}

/// Assemble Hack assembly into binary words.
pub fn assemble(source: &str) -> Result<Vec<String>> {
    assembler::assemble(source)
}

/// Run every stage over a set of units.
///
/// Jack and VM units are translated together (with the bootstrap if
/// configured); assembly units are appended after the generated code.
pub fn build(units: &[SourceUnit], config: &Config) -> Result<Program> {
    build_for(units, config, OutputFormat::Hack)
}

/// Run the stages needed to produce `target` and leave later ones empty.
///
/// Stopping at VM or assembly lets a program that calls functions defined
/// elsewhere (such as the OS classes) be compiled on its own.
pub fn build_for(units: &[SourceUnit], config: &Config, target: OutputFormat) -> Result<Program> {
    let mut context = TranslationContext::new();
    let mut vm_units = Vec::new();
    let mut asm_units = Vec::new();

    for unit in units {
        log::debug!("building {} ({:?})", unit.name, unit.kind);
        match unit.kind {
            UnitKind::Jack => {
                let commands = compile_class(&unit.source, &mut context)
                    .map_err(|err| err.with_file(unit.name.clone()))?;
                vm_units.push(VmUnit::new(unit.name.clone(), commands));
            }
            UnitKind::Vm => {
                let commands =
                    vm::parse(&unit.source).map_err(|err| err.with_file(unit.name.clone()))?;
                vm_units.push(VmUnit::new(unit.name.clone(), commands));
            }
            UnitKind::Asm => asm_units.push(unit),
        }
    }

    let mut vm_text = String::new();
    for unit in &vm_units {
        vm_text.push_str(&vm::to_text(&unit.commands));
    }

    if target == OutputFormat::Vm {
        return Ok(Program {
            vm: vm_text,
            assembly: String::new(),
            binary: Vec::new(),
        });
    }

    let mut assembly = if vm_units.is_empty() {
        String::new()
    } else {
        translate(&vm_units, config, &mut context)?
    };

    // (unit name, start offset) of each section of the combined assembly
    let mut sections = vec![(GENERATED_UNIT, 0)];
    for unit in asm_units {
        sections.push((unit.name.as_str(), assembly.len()));
        assembly.push_str(&unit.source);
        if !assembly.ends_with('\n') {
            assembly.push('\n');
        }
    }

    if target == OutputFormat::Asm {
        return Ok(Program {
            vm: vm_text,
            assembly,
            binary: Vec::new(),
        });
    }

    let binary = assemble(&assembly).map_err(|mut err| {
        let (name, start) = sections
            .iter()
            .rev()
            .find(|(_, start)| *start <= err.span.start)
            .copied()
            .unwrap_or((GENERATED_UNIT, 0));
        err.span = Span::new(err.span.start - start, err.span.end.saturating_sub(start));
        err.with_file(name)
    })?;

    Ok(Program {
        vm: vm_text,
        assembly,
        binary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "jackc");
    }

    #[test]
    fn test_unit_kind_from_path() {
        assert_eq!(UnitKind::from_path(Path::new("Main.jack")), Some(UnitKind::Jack));
        assert_eq!(UnitKind::from_path(Path::new("Sys.VM")), Some(UnitKind::Vm));
        assert_eq!(UnitKind::from_path(Path::new("Prog.asm")), Some(UnitKind::Asm));
        assert_eq!(UnitKind::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_build_errors_carry_unit_name() {
        let units = [
            SourceUnit::new("Good", UnitKind::Vm, "push constant 1\n"),
            SourceUnit::new("Bad", UnitKind::Vm, "push constant 1\nfrobnicate\n"),
        ];
        let err = build(&units, &Config::default()).unwrap_err();
        assert_eq!(err.file.as_deref(), Some("Bad"));
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[test]
    fn test_assembly_errors_are_rebased_to_their_unit() {
        let units = [
            SourceUnit::new("A", UnitKind::Asm, "@1\nD=A\n"),
            SourceUnit::new("B", UnitKind::Asm, "@2\nD=D*A\n"),
        ];
        let err = build(&units, &Config::default()).unwrap_err();
        assert_eq!(err.file.as_deref(), Some("B"));
        assert_eq!(err.span, Span::new(3, 8));
    }

    #[test]
    fn test_assembly_only_build_has_no_bootstrap() {
        let units = [SourceUnit::new("Add", UnitKind::Asm, "@2\nD=A\n@3\nD=D+A\n@0\nM=D")];
        let program = build(&units, &Config::default()).unwrap();
        assert_eq!(program.binary.len(), 6);
        assert!(program.vm.is_empty());
    }

    #[test]
    fn test_build_for_vm_skips_later_stages() {
        let units = [SourceUnit::new(
            "Main",
            UnitKind::Jack,
            "class Main { function void main() { do Output.printInt(1); return; } }",
        )];
        let program = build_for(&units, &Config::default(), OutputFormat::Vm).unwrap();
        assert!(program.vm.contains("call Output.printInt 1"));
        assert!(program.assembly.is_empty());

        let program = build_for(&units, &Config::default(), OutputFormat::Asm).unwrap();
        assert!(program.assembly.contains("@Output.printInt"));
        assert!(program.binary.is_empty());

        let err = build(&units, &Config::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::UnresolvedLabel);
        assert_eq!(err.file.as_deref(), Some(GENERATED_UNIT));
    }

    #[test]
    fn test_compile_class_to_vm() {
        let vm = compile_class_to_vm("class Main { function void main() { return; } }").unwrap();
        assert_eq!(vm, "function Main.main 0\npush constant 0\nreturn\n");
    }
}
