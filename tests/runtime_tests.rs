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

//! Runtime tests: translated VM code executed on a Hack CPU.

mod common;

use common::{load_asm, load_vm, ARG, LCL, MAX_STEPS, SP, THAT, THIS};
use pretty_assertions::assert_eq;
use test_case::test_case;

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_add_into_local() {
    let mut cpu = load_vm("push constant 7\npush constant 8\nadd\npop local 0\n");
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(300), 15);
    assert_eq!(cpu.peek(SP), 256);
}

#[test]
fn test_stack_arithmetic() {
    let mut cpu = load_vm(
        "push constant 57\npush constant 31\npush constant 53\nadd\n\
         push constant 112\nsub\nneg\nand\npush constant 82\nor\nnot\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), !((57 & 28) | 82));
}

#[test_case("add", 30000, 30000, 30000i16.wrapping_add(30000); "add wraps")]
#[test_case("sub", -32768, 1, i16::MIN.wrapping_sub(1); "sub wraps")]
#[test_case("and", 0b1100, 0b1010, 0b1000; "and")]
#[test_case("or", 0b1100, 0b1010, 0b1110; "or")]
fn test_binary_op(op: &str, x: i16, y: i16, expected: i16) {
    let mut cpu = load_vm(op);
    cpu.poke(SP, 258);
    cpu.poke(256, x);
    cpu.poke(257, y);
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), expected);
}

#[test_case(-32768, 1; "min against one")]
#[test_case(32767, -1; "max against minus one")]
#[test_case(32767, -32768; "max against min")]
#[test_case(-32768, 32767; "min against max")]
#[test_case(-2, -5; "both negative")]
#[test_case(4, 9; "both positive")]
#[test_case(0, 0; "zeros")]
#[test_case(-1, -1; "equal negatives")]
fn test_comparisons_do_not_overflow(x: i16, y: i16) {
    for (op, expected) in [("eq", x == y), ("gt", x > y), ("lt", x < y)] {
        let mut cpu = load_vm(op);
        cpu.poke(SP, 258);
        cpu.poke(256, x);
        cpu.poke(257, y);
        cpu.run(MAX_STEPS);

        assert_eq!(cpu.peek(SP), 257, "{} {} {}", op, x, y);
        assert_eq!(cpu.peek(256), if expected { -1 } else { 0 }, "{} {} {}", op, x, y);
    }
}

#[test_case("shiftleft", 5, 10; "left")]
#[test_case("shiftleft", 0x4000, i16::MIN; "left into sign")]
#[test_case("shiftright", 10, 5; "right")]
#[test_case("shiftright", -8, -4; "right keeps sign")]
fn test_shifts(op: &str, x: i16, expected: i16) {
    let mut cpu = load_vm(op);
    cpu.poke(SP, 257);
    cpu.poke(256, x);
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), expected);
}

// ============================================================================
// Memory segments
// ============================================================================

#[test]
fn test_segments() {
    let mut cpu = load_vm(
        "push constant 10\npop local 0\n\
         push constant 21\npush constant 22\npop argument 2\npop argument 1\n\
         push constant 36\npop this 6\n\
         push constant 42\npush constant 45\npop that 5\npop that 2\n\
         push constant 510\npop temp 6\n\
         push local 0\npush that 5\nadd\n\
         push argument 1\nsub\n\
         push this 6\npush this 6\nadd\nsub\n\
         push temp 6\nadd\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(300), 10);
    assert_eq!(cpu.peek(401), 21);
    assert_eq!(cpu.peek(402), 22);
    assert_eq!(cpu.peek(3006), 36);
    assert_eq!(cpu.peek(3012), 42);
    assert_eq!(cpu.peek(3015), 45);
    assert_eq!(cpu.peek(11), 510);
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 472);
}

#[test]
fn test_pointer_moves_this_and_that() {
    let mut cpu = load_vm(
        "push constant 3030\npop pointer 0\npush constant 3040\npop pointer 1\n\
         push constant 32\npop this 2\npush constant 46\npop that 6\n\
         push pointer 0\npush pointer 1\nadd\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(THIS), 3030);
    assert_eq!(cpu.peek(THAT), 3040);
    assert_eq!(cpu.peek(3032), 32);
    assert_eq!(cpu.peek(3046), 46);
    assert_eq!(cpu.peek(256), 6070);
}

#[test]
fn test_statics_are_assembler_variables() {
    let mut cpu = load_vm("push constant 111\npush constant 333\npop static 8\npop static 3\n");
    cpu.run(MAX_STEPS);

    // Test.8 is referenced first and so gets RAM 16
    assert_eq!(cpu.peek(16), 333);
    assert_eq!(cpu.peek(17), 111);
}

#[test]
fn test_constant_range() {
    let mut cpu = load_vm("push constant 32767\npush constant 0\n");
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(256), 32767);
    assert_eq!(cpu.peek(257), 0);
}

// ============================================================================
// Branching
// ============================================================================

#[test]
fn test_countdown_loop() {
    // sum 1..=n for n in argument 0
    let mut cpu = load_vm(
        "push constant 0\npop local 0\n\
         label LOOP\n\
         push argument 0\npush local 0\nadd\npop local 0\n\
         push argument 0\npush constant 1\nsub\npop argument 0\n\
         push argument 0\nif-goto LOOP\n\
         push local 0\n",
    );
    cpu.poke(400, 10);
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(300), 55);
    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 55);
}

#[test]
fn test_if_goto_pops_condition() {
    let mut cpu = load_vm(
        "push constant 0\nif-goto SKIP\npush constant 1\nlabel SKIP\n\
         push constant 1\nneg\nif-goto TAKEN\npush constant 2\nlabel TAKEN\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 1);
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_call_leaves_exactly_the_return_value() {
    let mut cpu = load_vm(
        "push constant 3\npush constant 4\ncall Test.add 2\n\
         label HALT\ngoto HALT\n\
         function Test.add 0\npush argument 0\npush argument 1\nadd\nreturn\n",
    );
    cpu.poke(LCL, 256);
    cpu.poke(ARG, 256);
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 7);
    assert_eq!(cpu.peek(LCL), 256);
    assert_eq!(cpu.peek(ARG), 256);
    assert_eq!(cpu.peek(THIS), 3000);
    assert_eq!(cpu.peek(THAT), 3010);
}

#[test]
fn test_locals_are_zeroed_and_discarded() {
    let mut cpu = load_vm(
        "call Test.f 0\nlabel HALT\ngoto HALT\n\
         function Test.f 2\npush local 0\npush local 1\nadd\npush constant 9\nadd\n\
         pop local 1\npush local 1\nreturn\n",
    );
    // garbage where the locals will live
    cpu.poke(261, 100);
    cpu.poke(262, 200);
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 9);
}

#[test]
fn test_recursion() {
    let mut cpu = load_vm(
        "push constant 10\ncall Test.fib 1\nlabel HALT\ngoto HALT\n\
         function Test.fib 0\n\
         push argument 0\npush constant 2\nlt\nif-goto BASE\n\
         push argument 0\npush constant 2\nsub\ncall Test.fib 1\n\
         push argument 0\npush constant 1\nsub\ncall Test.fib 1\n\
         add\nreturn\n\
         label BASE\npush argument 0\nreturn\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(SP), 257);
    assert_eq!(cpu.peek(256), 55);
}

#[test]
fn test_this_and_that_survive_calls() {
    let mut cpu = load_vm(
        "call Test.clobber 0\npop temp 0\nlabel HALT\ngoto HALT\n\
         function Test.clobber 0\n\
         push constant 5000\npop pointer 0\npush constant 6000\npop pointer 1\n\
         push constant 0\nreturn\n",
    );
    cpu.run(MAX_STEPS);

    assert_eq!(cpu.peek(THIS), 3000);
    assert_eq!(cpu.peek(THAT), 3010);
    assert_eq!(cpu.peek(SP), 256);
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn test_assembly_add() {
    let mut cpu = load_asm("@3\nD=A\n@5\nD=D+A\n@0\nM=D\n");
    assert_eq!(cpu.rom.len(), 6);
    cpu.run(MAX_STEPS);
    assert_eq!(cpu.peek(0), 8);
}

#[test]
fn test_assembly_max() {
    let source = include_str!("fixtures/Max.asm");
    for (a, b) in [(3, 9), (9, 3), (-4, -7), (0, 0)] {
        let mut cpu = load_asm(source);
        cpu.poke(0, a);
        cpu.poke(1, b);
        cpu.run(MAX_STEPS);
        assert_eq!(cpu.peek(2), a.max(b), "max({}, {})", a, b);
    }
}

#[test]
fn test_assembly_variables_start_at_16() {
    let mut cpu = load_asm("@7\nD=A\n@count\nM=D\n@total\nM=D+1\n");
    cpu.run(MAX_STEPS);
    assert_eq!(cpu.peek(16), 7);
    assert_eq!(cpu.peek(17), 8);
}
