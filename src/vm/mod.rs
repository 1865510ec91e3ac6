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

//! The stack-machine intermediate representation.
//!
//! [`VmCommand`] is what the compilation engine produces and what the
//! translator consumes. Its [`Display`](std::fmt::Display) implementation
//! renders the line-oriented VM text format, and [`parse`] reads it back.

mod parser;

pub use parser::parse;

/// Largest value a `push constant` can load.
pub const MAX_CONSTANT: u16 = 32767;

/// A virtual memory segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Pseudo-segment holding the literal index itself.
    Constant,
    /// Locals of the current function, based at `LCL`.
    Local,
    /// Arguments of the current function, based at `ARG`.
    Argument,
    /// Fields of the current object, based at `THIS`.
    This,
    /// Current array window, based at `THAT`.
    That,
    /// `THIS` (0) and `THAT` (1) themselves.
    Pointer,
    /// Eight scratch cells at RAM 5..=12.
    Temp,
    /// Per-file statics, one assembler symbol each.
    Static,
}

impl Segment {
    /// Look up a segment by its VM spelling.
    pub fn lookup(name: &str) -> Option<Segment> {
        let segment = match name {
            "constant" => Segment::Constant,
            "local" => Segment::Local,
            "argument" => Segment::Argument,
            "this" => Segment::This,
            "that" => Segment::That,
            "pointer" => Segment::Pointer,
            "temp" => Segment::Temp,
            "static" => Segment::Static,
            _ => return None,
        };
        Some(segment)
    }

    /// Get the VM spelling of this segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
            Segment::Static => "static",
        }
    }

    /// Get the largest valid index for this segment.
    ///
    /// Offsets into the pointer-based segments and static slots are loaded
    /// with an A-instruction, so they share the 15-bit constant limit.
    pub fn max_index(&self) -> u16 {
        match self {
            Segment::Pointer => 1,
            Segment::Temp => 7,
            _ => MAX_CONSTANT,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An arithmetic or logical stack command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    ShiftLeft,
    ShiftRight,
}

impl ArithmeticOp {
    /// All operations, in VM spelling order.
    pub const ALL: [ArithmeticOp; 11] = [
        ArithmeticOp::Add,
        ArithmeticOp::Sub,
        ArithmeticOp::Neg,
        ArithmeticOp::Eq,
        ArithmeticOp::Gt,
        ArithmeticOp::Lt,
        ArithmeticOp::And,
        ArithmeticOp::Or,
        ArithmeticOp::Not,
        ArithmeticOp::ShiftLeft,
        ArithmeticOp::ShiftRight,
    ];

    /// Look up an operation by its VM spelling.
    pub fn lookup(name: &str) -> Option<ArithmeticOp> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }

    /// Get the VM spelling of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
            ArithmeticOp::ShiftLeft => "shiftleft",
            ArithmeticOp::ShiftRight => "shiftright",
        }
    }

    /// Check if this operation takes a single operand.
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            ArithmeticOp::Neg
                | ArithmeticOp::Not
                | ArithmeticOp::ShiftLeft
                | ArithmeticOp::ShiftRight
        )
    }

    /// Check if this operation produces a boolean from two operands.
    pub fn is_comparison(&self) -> bool {
        matches!(self, ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt)
    }
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One VM command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmCommand {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    /// Callee name and argument count.
    Call(String, u16),
    /// Function name and local count.
    Function(String, u16),
    Return,
}

impl std::fmt::Display for VmCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VmCommand::Arithmetic(op) => write!(f, "{}", op),
            VmCommand::Push(segment, index) => write!(f, "push {} {}", segment, index),
            VmCommand::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            VmCommand::Label(label) => write!(f, "label {}", label),
            VmCommand::Goto(label) => write!(f, "goto {}", label),
            VmCommand::IfGoto(label) => write!(f, "if-goto {}", label),
            VmCommand::Call(name, args) => write!(f, "call {} {}", name, args),
            VmCommand::Function(name, locals) => write!(f, "function {} {}", name, locals),
            VmCommand::Return => f.write_str("return"),
        }
    }
}

/// Render commands as VM text, one command per line.
pub fn to_text(commands: &[VmCommand]) -> String {
    let mut text = String::new();
    for command in commands {
        text.push_str(&command.to_string());
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            VmCommand::Push(Segment::Constant, 7).to_string(),
            "push constant 7"
        );
        assert_eq!(VmCommand::Pop(Segment::That, 0).to_string(), "pop that 0");
        assert_eq!(
            VmCommand::IfGoto("WHILE_END_1".into()).to_string(),
            "if-goto WHILE_END_1"
        );
        assert_eq!(
            VmCommand::Function("Main.main".into(), 2).to_string(),
            "function Main.main 2"
        );
        assert_eq!(
            VmCommand::Arithmetic(ArithmeticOp::ShiftRight).to_string(),
            "shiftright"
        );
        assert_eq!(VmCommand::Return.to_string(), "return");
    }

    #[test]
    fn test_lookup_matches_spelling() {
        for op in ArithmeticOp::ALL {
            assert_eq!(ArithmeticOp::lookup(op.as_str()), Some(op));
        }
        assert_eq!(ArithmeticOp::lookup("mul"), None);
        assert_eq!(Segment::lookup("pointer"), Some(Segment::Pointer));
        assert_eq!(Segment::lookup("heap"), None);
    }

    #[test]
    fn test_operation_classes() {
        assert!(ArithmeticOp::Neg.is_unary());
        assert!(ArithmeticOp::ShiftLeft.is_unary());
        assert!(!ArithmeticOp::Sub.is_unary());
        assert!(ArithmeticOp::Lt.is_comparison());
        assert!(!ArithmeticOp::And.is_comparison());
    }

    #[test]
    fn test_to_text() {
        let text = to_text(&[
            VmCommand::Push(Segment::Constant, 1),
            VmCommand::Arithmetic(ArithmeticOp::Not),
        ]);
        assert_eq!(text, "push constant 1\nnot\n");
    }
}
