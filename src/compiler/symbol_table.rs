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

//! Two-scope symbol table for Jack classes.
//!
//! The class scope holds `static` and `field` variables for the whole class.
//! The subroutine scope holds arguments and locals and is cleared at the
//! start of every subroutine. Lookups search the subroutine scope first.

use std::collections::HashMap;

use crate::vm::Segment;

/// The storage class of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    /// Get the VM segment variables of this kind live in.
    pub fn segment(&self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    fn is_class_scope(&self) -> bool {
        matches!(self, Kind::Static | Kind::Field)
    }
}

/// Symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Declared type: `int`, `char`, `boolean` or a class name.
    pub type_name: String,
    pub kind: Kind,
    /// Index within the segment of `kind`.
    pub index: u16,
}

/// The symbol table used while compiling one class.
#[derive(Debug, Default)]
pub struct SymbolTable {
    class_scope: HashMap<String, Symbol>,
    subroutine_scope: HashMap<String, Symbol>,
    counts: HashMap<Kind, u16>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `name` is already declared in the scope `kind` belongs to.
    pub fn is_declared_in_scope(&self, name: &str, kind: Kind) -> bool {
        if kind.is_class_scope() {
            self.class_scope.contains_key(name)
        } else {
            self.subroutine_scope.contains_key(name)
        }
    }

    /// Define a variable at the next free index of its kind.
    ///
    /// Callers reject duplicates with [`SymbolTable::is_declared_in_scope`]
    /// first; a repeated name here replaces the entry and uses a new index.
    pub fn define(&mut self, name: &str, type_name: &str, kind: Kind) -> u16 {
        let count = self.counts.entry(kind).or_insert(0);
        let index = *count;
        *count += 1;

        let symbol = Symbol {
            type_name: type_name.to_string(),
            kind,
            index,
        };
        let scope = if kind.is_class_scope() {
            &mut self.class_scope
        } else {
            &mut self.subroutine_scope
        };
        scope.insert(name.to_string(), symbol);
        index
    }

    /// Clear the subroutine scope and reset the argument and local counters.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.counts.remove(&Kind::Argument);
        self.counts.remove(&Kind::Local);
    }

    /// Look up a name, subroutine scope first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.subroutine_scope
            .get(name)
            .or_else(|| self.class_scope.get(name))
    }

    /// Get the kind of a name, if defined.
    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.lookup(name).map(|s| s.kind)
    }

    /// Get the declared type of a name, if defined.
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|s| s.type_name.as_str())
    }

    /// Get the segment index of a name, if defined.
    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.lookup(name).map(|s| s.index)
    }

    /// Get the number of variables defined so far for a kind.
    pub fn var_count(&self, kind: Kind) -> u16 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}
