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

//! Pipeline configuration.

/// Default name of the function the bootstrap code calls.
pub const DEFAULT_ENTRY_FUNCTION: &str = "Sys.init";

/// Default initial value of the stack pointer.
pub const DEFAULT_STACK_BASE: u16 = 256;

/// Options controlling how VM code is lowered to assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Emit the bootstrap sequence (set SP, call the entry function).
    pub bootstrap: bool,
    /// Function called by the bootstrap sequence.
    pub entry_function: String,
    /// Echo each VM command as an assembly comment.
    pub annotate: bool,
    /// Initial stack pointer written by the bootstrap sequence.
    pub stack_base: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap: true,
            entry_function: DEFAULT_ENTRY_FUNCTION.to_string(),
            annotate: false,
            stack_base: DEFAULT_STACK_BASE,
        }
    }
}

impl Config {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the bootstrap sequence.
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Set the function called by the bootstrap sequence.
    pub fn with_entry_function(mut self, name: impl Into<String>) -> Self {
        self.entry_function = name.into();
        self
    }

    /// Enable or disable VM command comments in the assembly output.
    pub fn with_annotations(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }
}
