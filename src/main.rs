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

//! Jackc CLI
//!
//! Compiles Jack classes, VM files and Hack assembly down to Hack binary.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use jackc::error::format_error;
use jackc::output::{format_from_extension, render, write_output, OutputFormat};
use jackc::{build_for, Config, SourceUnit, UnitKind};

/// Jackc - Jack to Hack toolchain
#[derive(Parser, Debug)]
#[command(name = "jackc")]
#[command(version)]
#[command(about = "Compile Jack classes down to Hack machine code")]
#[command(long_about = r#"
Jackc runs the whole Jack toolchain: Jack classes are compiled to VM code,
VM code is translated to Hack assembly and assembly is assembled into
16-bit binary words.

Inputs may mix .jack, .vm and .asm files. The output format follows
--emit, else the extension of --output, else hack.

Example usage:
  jackc Main.jack Sys.vm -o Prog.hack
  jackc Main.jack --emit vm
  jackc Prog.asm -o Prog.hack
  jackc Test.vm --no-bootstrap --annotate -o Test.asm
"#)]
struct Cli {
    /// Input files (.jack, .vm, .asm)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (.vm, .asm or .hack). Writes to stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: vm, asm or hack
    #[arg(long)]
    emit: Option<String>,

    /// Do not emit the bootstrap code (SP=256, call the entry function)
    #[arg(long)]
    no_bootstrap: bool,

    /// Function called by the bootstrap code
    #[arg(long, default_value = jackc::config::DEFAULT_ENTRY_FUNCTION)]
    entry: String,

    /// Echo each VM command as a comment in the assembly
    #[arg(long)]
    annotate: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
    {
        eprintln!("Warning: Cannot initialise logging: {}", e);
    }

    // Determine output format
    let format = match (&cli.emit, &cli.output) {
        (Some(name), _) => match OutputFormat::from_name(&name.to_lowercase()) {
            Some(format) => format,
            None => {
                eprintln!("Error: Unknown output format '{}'. Use vm, asm or hack.", name);
                return ExitCode::from(2);
            }
        },
        (None, Some(path)) => format_from_extension(path).unwrap_or(OutputFormat::Hack),
        (None, None) => OutputFormat::Hack,
    };

    // Read input files
    let mut units = Vec::with_capacity(cli.inputs.len());
    let mut file_names = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let kind = match UnitKind::from_path(path) {
            Some(kind) => kind,
            None => {
                eprintln!(
                    "Error: Unknown input type: {}. Use .jack, .vm or .asm files.",
                    path.display()
                );
                return ExitCode::from(2);
            }
        };
        let source = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read {}: {}", path.display(), e);
                return ExitCode::from(3);
            }
        };
        log::info!("read {}", path.display());

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Main")
            .to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        units.push(SourceUnit::new(name, kind, source));
        file_names.push(file_name);
    }

    let has_asm_inputs = units.iter().any(|u| u.kind == UnitKind::Asm);
    if has_asm_inputs && format != OutputFormat::Hack {
        eprintln!(
            "Error: Cannot emit {} from .asm inputs; only hack output is possible.",
            format.extension()
        );
        return ExitCode::from(2);
    }

    let config = Config::new()
        .with_bootstrap(!cli.no_bootstrap)
        .with_entry_function(cli.entry.clone())
        .with_annotations(cli.annotate);
    log::debug!("config: {:?}, format: {:?}", config, format);

    // Build
    let program = match build_for(&units, &config, format) {
        Ok(program) => program,
        Err(e) => {
            let unit = units
                .iter()
                .zip(&file_names)
                .find(|(unit, _)| Some(unit.name.as_str()) == e.file.as_deref());
            match unit {
                Some((unit, file_name)) => {
                    eprint!("{}", format_error(&e, &unit.source, Some(file_name)))
                }
                None => eprintln!("error[{}]: {}", e.code_str(), e.message),
            }
            return ExitCode::from(1);
        }
    };
    log::info!(
        "built {} VM lines, {} assembly lines, {} words",
        program.vm.lines().count(),
        program.assembly.lines().count(),
        program.binary.len()
    );

    // Write output
    match &cli.output {
        Some(path) => {
            if let Err(e) = write_output(&program, path, format) {
                eprintln!("Error: Cannot write {}: {}", path.display(), e);
                return ExitCode::from(1);
            }
            println!(
                "Compiled {} -> {}",
                file_names.join(", "),
                path.display()
            );
        }
        None => print!("{}", render(&program, format)),
    }

    ExitCode::SUCCESS
}
