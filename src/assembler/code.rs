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

//! Binary encoding tables for compute instructions.
//!
//! A compute word is `prefix comp(7) dest(3) jump(3)`. The prefix is `111`
//! for ALU operations and `101` for the shift extension.

/// Prefix of ordinary compute instructions.
pub const COMPUTE_PREFIX: &str = "111";

/// Prefix of shift instructions.
pub const SHIFT_PREFIX: &str = "101";

/// Every `dest` mnemonic.
pub const DEST_MNEMONICS: &[&str] = &["null", "M", "D", "MD", "A", "AM", "AD", "AMD"];

/// Every `jump` mnemonic.
pub const JUMP_MNEMONICS: &[&str] = &["null", "JGT", "JEQ", "JGE", "JLT", "JNE", "JLE", "JMP"];

/// Every `comp` mnemonic, shifts last.
pub const COMP_MNEMONICS: &[&str] = &[
    "0", "1", "-1", "D", "A", "!D", "!A", "-D", "-A", "D+1", "A+1", "D-1", "A-1", "D+A", "D-A",
    "A-D", "D&A", "D|A", "M", "!M", "-M", "M+1", "M-1", "D+M", "D-M", "M-D", "D&M", "D|M", "D<<",
    "A<<", "M<<", "D>>", "A>>", "M>>",
];

/// Encode a `dest` mnemonic.
pub fn dest(mnemonic: &str) -> Option<&'static str> {
    let bits = match mnemonic {
        "null" => "000",
        "M" => "001",
        "D" => "010",
        "MD" => "011",
        "A" => "100",
        "AM" => "101",
        "AD" => "110",
        "AMD" => "111",
        _ => return None,
    };
    Some(bits)
}

/// Encode a `jump` mnemonic.
pub fn jump(mnemonic: &str) -> Option<&'static str> {
    let bits = match mnemonic {
        "null" => "000",
        "JGT" => "001",
        "JEQ" => "010",
        "JGE" => "011",
        "JLT" => "100",
        "JNE" => "101",
        "JLE" => "110",
        "JMP" => "111",
        _ => return None,
    };
    Some(bits)
}

/// Encode a `comp` mnemonic as `(prefix, a + c-bits)`.
pub fn comp(mnemonic: &str) -> Option<(&'static str, &'static str)> {
    let bits = match mnemonic {
        "0" => "0101010",
        "1" => "0111111",
        "-1" => "0111010",
        "D" => "0001100",
        "A" => "0110000",
        "!D" => "0001101",
        "!A" => "0110001",
        "-D" => "0001111",
        "-A" => "0110011",
        "D+1" => "0011111",
        "A+1" => "0110111",
        "D-1" => "0001110",
        "A-1" => "0110010",
        "D+A" => "0000010",
        "D-A" => "0010011",
        "A-D" => "0000111",
        "D&A" => "0000000",
        "D|A" => "0010101",
        "M" => "1110000",
        "!M" => "1110001",
        "-M" => "1110011",
        "M+1" => "1110111",
        "M-1" => "1110010",
        "D+M" => "1000010",
        "D-M" => "1010011",
        "M-D" => "1000111",
        "D&M" => "1000000",
        "D|M" => "1010101",
        _ => return shift(mnemonic).map(|bits| (SHIFT_PREFIX, bits)),
    };
    Some((COMPUTE_PREFIX, bits))
}

fn shift(mnemonic: &str) -> Option<&'static str> {
    let bits = match mnemonic {
        "D<<" => "0110000",
        "A<<" => "0100000",
        "M<<" => "1100000",
        "D>>" => "0010000",
        "A>>" => "0000000",
        "M>>" => "1000000",
        _ => return None,
    };
    Some(bits)
}

/// Encode an A-instruction value as a 16-bit word.
pub fn address(value: u16) -> String {
    format!("0{:015b}", value & 0x7FFF)
}
