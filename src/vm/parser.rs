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

//! Parser for the VM text format.
//!
//! One command per line. `//` starts a comment; blank lines are skipped.

use super::{ArithmeticOp, Segment, VmCommand};
use crate::error::{CompileError, ErrorCode, Result, Span};

/// A word of a VM line with its position in the source.
type Word<'a> = (&'a str, Span);

/// Parse VM text into commands.
pub fn parse(source: &str) -> Result<Vec<VmCommand>> {
    let mut commands = Vec::new();
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let code = match line.find("//") {
            Some(i) => &line[..i],
            None => line,
        };
        let words = split_words(code, offset);
        offset += line.len();

        if let Some(command) = parse_line(&words)? {
            log::trace!("vm: {}", command);
            commands.push(command);
        }
    }

    Ok(commands)
}

fn split_words(line: &str, offset: usize) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((&line[s..i], Span::new(offset + s, offset + i)));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((&line[s..], Span::new(offset + s, offset + line.len())));
    }

    words
}

fn parse_line(words: &[Word<'_>]) -> Result<Option<VmCommand>> {
    let (head, head_span) = match words.first() {
        Some(word) => word,
        None => return Ok(None),
    };
    let operands = &words[1..];

    let command = match *head {
        "push" | "pop" => {
            let [segment, index] = expect_operands::<2>(head, head_span, operands)?;
            let segment_name = segment.0;
            let segment_kind = Segment::lookup(segment_name).ok_or_else(|| {
                CompileError::new(
                    ErrorCode::UnknownSegment,
                    format!("Unknown segment '{}'", segment_name),
                    segment.1.clone(),
                )
                .with_hint(
                    "Valid segments: constant, local, argument, this, that, pointer, temp, static",
                )
            })?;
            let value = parse_index(index)?;

            let max = segment_kind.max_index();
            if value > max {
                return Err(CompileError::new(
                    ErrorCode::SegmentIndexOutOfRange,
                    format!(
                        "Index {} is out of range for segment '{}' (max {})",
                        value, segment_kind, max
                    ),
                    index.1.clone(),
                ));
            }

            if *head == "push" {
                VmCommand::Push(segment_kind, value)
            } else {
                if segment_kind == Segment::Constant {
                    return Err(CompileError::new(
                        ErrorCode::PopToConstant,
                        "Cannot pop into the constant segment",
                        head_span.merge(&index.1),
                    ));
                }
                VmCommand::Pop(segment_kind, value)
            }
        }
        "label" | "goto" | "if-goto" => {
            let [label] = expect_operands::<1>(head, head_span, operands)?;
            let label = label.0.to_string();
            match *head {
                "label" => VmCommand::Label(label),
                "goto" => VmCommand::Goto(label),
                _ => VmCommand::IfGoto(label),
            }
        }
        "function" | "call" => {
            let [name, count] = expect_operands::<2>(head, head_span, operands)?;
            let name = name.0.to_string();
            let count = parse_index(count)?;
            if *head == "function" {
                VmCommand::Function(name, count)
            } else {
                VmCommand::Call(name, count)
            }
        }
        "return" => {
            expect_operands::<0>(head, head_span, operands)?;
            VmCommand::Return
        }
        word => match ArithmeticOp::lookup(word) {
            Some(op) => {
                expect_operands::<0>(head, head_span, operands)?;
                VmCommand::Arithmetic(op)
            }
            None => {
                return Err(CompileError::new(
                    ErrorCode::UnknownCommand,
                    format!("Unknown VM command '{}'", word),
                    head_span.clone(),
                ));
            }
        },
    };

    Ok(Some(command))
}

fn expect_operands<'a, 'w, const N: usize>(
    head: &str,
    head_span: &Span,
    operands: &'w [Word<'a>],
) -> Result<&'w [Word<'a>; N]> {
    operands.try_into().map_err(|_| {
        let span = operands
            .last()
            .map_or(head_span.clone(), |(_, last)| head_span.merge(last));
        CompileError::new(
            ErrorCode::MalformedCommand,
            format!(
                "'{}' takes {} operand(s), found {}",
                head,
                N,
                operands.len()
            ),
            span,
        )
    })
}

fn parse_index(word: &Word<'_>) -> Result<u16> {
    let (text, span) = word;
    text.parse::<u16>().map_err(|_| {
        CompileError::new(
            ErrorCode::MalformedCommand,
            format!("Expected a non-negative number, found '{}'", text),
            span.clone(),
        )
    })
}
