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

//! Assembler symbol table. Entries are only ever added.

use std::collections::HashMap;

/// First RAM address handed out to variables.
pub const FIRST_VARIABLE_ADDRESS: u16 = 16;

/// Symbols every program can use without declaring them.
pub const PREDEFINED_SYMBOLS: &[(&str, u16)] = &[
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

/// Symbol-to-address map for one assembly run.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    next_variable: u16,
}

impl SymbolTable {
    /// Create a table holding only the predefined symbols.
    pub fn new() -> Self {
        let symbols = PREDEFINED_SYMBOLS
            .iter()
            .map(|(name, address)| (name.to_string(), *address))
            .collect();
        Self {
            symbols,
            next_variable: FIRST_VARIABLE_ADDRESS,
        }
    }

    /// Check if a symbol is known.
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Get the address of a symbol.
    pub fn get(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    /// Bind a label. Returns `false` and leaves the table untouched if the
    /// name is already bound.
    pub fn add_label(&mut self, name: &str, address: u16) -> bool {
        if self.contains(name) {
            return false;
        }
        self.symbols.insert(name.to_string(), address);
        true
    }

    /// Get the address of a variable, allocating the next free cell the
    /// first time it is seen.
    pub fn resolve_variable(&mut self, name: &str) -> u16 {
        if let Some(address) = self.get(name) {
            return address;
        }
        let address = self.next_variable;
        self.next_variable += 1;
        self.symbols.insert(name.to_string(), address);
        address
    }

    /// Number of variables allocated so far.
    pub fn variable_count(&self) -> u16 {
        self.next_variable - FIRST_VARIABLE_ADDRESS
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
