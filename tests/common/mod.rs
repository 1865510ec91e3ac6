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

//! Test support: a small Hack CPU that runs assembled programs.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use jackc::{translate, vm, Config, TranslationContext, VmUnit};

/// RAM size in words.
pub const RAM_SIZE: usize = 32768;

/// Default step budget for test programs.
pub const MAX_STEPS: usize = 1_000_000;

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

/// Encoding of `0;JMP`.
const JMP_ALWAYS: u16 = 0b1110_1010_1000_0111;

/// A Hack computer: ROM, RAM, A, D and PC.
pub struct Cpu {
    pub rom: Vec<u16>,
    pub ram: Vec<i16>,
    pub a: i16,
    pub d: i16,
    pub pc: usize,
}

impl Cpu {
    /// Load a program given as 16-character binary words.
    pub fn new(words: &[String]) -> Self {
        let rom = words
            .iter()
            .map(|w| {
                assert_eq!(w.len(), 16, "bad word {:?}", w);
                u16::from_str_radix(w, 2).expect("binary word")
            })
            .collect();
        Self {
            rom,
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
        }
    }

    /// Check if the CPU sits in a `(X) @X 0;JMP` loop.
    pub fn is_halted(&self) -> bool {
        self.rom.get(self.pc).copied() == Some(self.pc as u16)
            && self.rom.get(self.pc + 1).copied() == Some(JMP_ALWAYS)
    }

    /// Run until halted or past the end of ROM. Returns the step count.
    pub fn run(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while self.pc < self.rom.len() && !self.is_halted() {
            self.step();
            steps += 1;
            assert!(steps <= max_steps, "program did not halt in {} steps", max_steps);
        }
        steps
    }

    /// Execute one instruction.
    pub fn step(&mut self) {
        let instruction = self.rom[self.pc];
        if instruction & 0x8000 == 0 {
            self.a = instruction as i16;
            self.pc += 1;
            return;
        }

        let prefix = instruction >> 13;
        let a_bit = (instruction >> 12) & 1 == 1;
        let c = (instruction >> 6) & 0x3F;
        let dest = (instruction >> 3) & 0x7;
        let jump = instruction & 0x7;

        let address = (self.a as u16 as usize) & 0x7FFF;
        let y = if a_bit { self.ram[address] } else { self.a };

        let out = match prefix {
            0b111 => alu(self.d, y, c),
            0b101 => {
                let value = if c & 0b01_0000 != 0 { self.d } else { y };
                if c & 0b10_0000 != 0 {
                    value.wrapping_shl(1)
                } else {
                    value >> 1
                }
            }
            _ => panic!("invalid instruction {:016b} at {}", instruction, self.pc),
        };

        let target = self.a as u16 as usize;
        if dest & 0b001 != 0 {
            self.ram[address] = out;
        }
        if dest & 0b010 != 0 {
            self.d = out;
        }
        if dest & 0b100 != 0 {
            self.a = out;
        }

        let taken = (jump & 0b100 != 0 && out < 0)
            || (jump & 0b010 != 0 && out == 0)
            || (jump & 0b001 != 0 && out > 0);
        self.pc = if taken { target } else { self.pc + 1 };
    }

    /// Read a RAM cell.
    pub fn peek(&self, address: usize) -> i16 {
        self.ram[address]
    }

    /// Write a RAM cell.
    pub fn poke(&mut self, address: usize, value: i16) {
        self.ram[address] = value;
    }
}

fn alu(x: i16, y: i16, c: u16) -> i16 {
    let bit = |n: u16| c & (1 << n) != 0;
    let mut x = x;
    let mut y = y;
    if bit(5) {
        x = 0;
    }
    if bit(4) {
        x = !x;
    }
    if bit(3) {
        y = 0;
    }
    if bit(2) {
        y = !y;
    }
    let mut out = if bit(1) { x.wrapping_add(y) } else { x & y };
    if bit(0) {
        out = !out;
    }
    out
}

/// Assemble text and load it into a CPU.
pub fn load_asm(asm: &str) -> Cpu {
    let words = jackc::assemble(asm).unwrap_or_else(|e| panic!("assemble failed: {}", e));
    Cpu::new(&words)
}

/// Translate VM text (no bootstrap) into assembly.
pub fn vm_to_asm(name: &str, source: &str) -> String {
    let commands = vm::parse(source).unwrap_or_else(|e| panic!("vm parse failed: {}", e));
    let config = Config::new().with_bootstrap(false);
    let mut context = TranslationContext::new();
    translate(&[VmUnit::new(name, commands)], &config, &mut context)
        .unwrap_or_else(|e| panic!("translate failed: {}", e))
}

/// Translate and load VM text with the usual segment bases.
///
/// SP=256, LCL=300, ARG=400, THIS=3000, THAT=3010.
pub fn load_vm(source: &str) -> Cpu {
    let mut cpu = load_asm(&vm_to_asm("Test", source));
    cpu.poke(SP, 256);
    cpu.poke(LCL, 300);
    cpu.poke(ARG, 400);
    cpu.poke(THIS, 3000);
    cpu.poke(THAT, 3010);
    cpu
}

/// Build units with the default configuration and load the binary.
pub fn load_program(units: &[jackc::SourceUnit]) -> Cpu {
    let program = jackc::build(units, &Config::default())
        .unwrap_or_else(|e| panic!("build failed: {}", e));
    Cpu::new(&program.binary)
}

/// A bump allocator so object code can run without the OS classes.
pub const MEMORY_VM: &str = include_str!("../fixtures/Memory.vm");
