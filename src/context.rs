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

//! Run-wide translation state.
//!
//! All units translated in one run share a single [`TranslationContext`], so
//! the generated label names never collide inside the common output address
//! space. The counters only ever grow.

/// Monotonic counters shared by every unit of a run.
#[derive(Debug, Default)]
pub struct TranslationContext {
    control_labels: u32,
    comparisons: u32,
    return_sites: u32,
}

impl TranslationContext {
    /// Create a context with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique control-flow label with the given prefix.
    pub fn make_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.control_labels);
        self.control_labels += 1;
        label
    }

    /// Take the next comparison sequence number.
    pub fn next_comparison(&mut self) -> u32 {
        let n = self.comparisons;
        self.comparisons += 1;
        n
    }

    /// Take the next call-site sequence number.
    pub fn next_return_site(&mut self) -> u32 {
        let n = self.return_sites;
        self.return_sites += 1;
        n
    }
}
