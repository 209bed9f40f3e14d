//! End-to-end programs exercising the dispatch loop and the I/O opcodes
//! against in-memory channels.

use stipple_vm::prelude::*;
use stipple_vm::util::test_helpers::*;

#[test]
fn add_and_print() {
    let program = [
        op::load_i_i32(0, 7),
        op::load_i_i32(1, 35),
        op::add_i32(2, 0, 1),
        op::print_i32(2),
        op::println(),
        op::halt(),
    ];

    let vm = run_program(&program);

    assert_eq!(captured_output(&vm), "42\n");
    assert_eq!(vm.stack_var(2), Some(&Value::I32(42)));
    assert_eq!(vm.sp(), 0);
}

#[test]
fn division_by_zero_stops_at_the_faulting_instruction() {
    // 0: load 8B, 8: load 8B, 16: div 12B, 28: halt
    let program = [
        op::load_i_i32(0, 10),
        op::load_i_i32(1, 0),
        op::div_i32(2, 0, 1),
        op::halt(),
    ];

    let mut vm = vm_with_program(&program);
    let err = vm.run().expect_err("division by zero");

    assert_eq!(err.fault(), Some(Fault::DivisionByZero));
    assert_eq!(vm.pc(), 16);
    assert_eq!(vm.last_error(), Some(Fault::DivisionByZero));
    assert!(vm.stack_var(2).unwrap().is_void());
}

#[test]
fn compare_and_branch_to_print() {
    // 0: load 8B, 8: load 8B, 16: cmp 12B, 28: jz 8B, 36: halt 4B,
    // 40: print.str 8B, 48: halt
    let program = [
        op::load_i_u32(0, 5),
        op::load_i_u32(1, 5),
        op::cmp_u32(0, 1),
        op::jz(40),
        op::halt(),
        op::print_str(0),
        op::halt(),
    ];

    let mut vm = vm_with_program(&program);
    *vm.buffer_mut(0).unwrap() = MemBuffer::string("eq");
    vm.run().unwrap();

    assert_eq!(captured_output(&vm), "eq");
    assert_eq!(vm.flags(), Flags::ZERO);
}

#[test]
fn print_formats() {
    let program = [
        op::load_i_i32(0, -12),
        op::print_i32(0),
        op::println(),
        op::load_i_u32(1, 3000000000),
        op::print_u32(1),
        op::println(),
        op::load_i_f32(2, 3.5),
        op::print_f32(2),
        op::println(),
        op::halt(),
    ];

    let vm = run_program(&program);

    assert_eq!(captured_output(&vm), "-12\n3000000000\n3.500000\n");
}

#[test]
fn print_requires_the_matching_tag() {
    let mut vm = vm_with_program(&[
        op::load_i_u32(0, 1),
        op::print_i32(0),
        op::halt(),
    ]);

    let err = vm.run().expect_err("print.i32 of a u32 var");
    assert_eq!(err.fault(), Some(Fault::TypeMismatch));
    assert_eq!(vm.pc(), 8);
    assert_eq!(captured_output(&vm), "");
}

#[test]
fn read_tokens_across_whitespace() {
    let program = [
        op::read_i32(0),
        op::read_i32(1),
        op::read_f32(2),
        op::halt(),
    ];

    let mut vm = vm_with_input("  -7\t 35\n2.5\n");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    assert_eq!(vm.stack_var(0), Some(&Value::I32(-7)));
    assert_eq!(vm.stack_var(1), Some(&Value::I32(35)));
    assert_eq!(vm.stack_var(2), Some(&Value::F32(2.5)));
}

#[test]
fn failed_parse_zeroes_and_discards_the_line() {
    let program = [op::read_i32(0), op::read_i32(1), op::halt()];

    let mut vm = vm_with_input("garbage rest of line\n42\n");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    // The bad token zeroes the destination and the rest of its line is
    // gone, so the next read sees the 42.
    assert_eq!(vm.stack_var(0), Some(&Value::I32(0)));
    assert_eq!(vm.stack_var(1), Some(&Value::I32(42)));
}

#[test]
fn read_at_end_of_input_yields_zero() {
    let program = [op::read_u32(0), op::read_f32(1), op::halt()];

    let mut vm = vm_with_input("");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    assert_eq!(vm.stack_var(0), Some(&Value::U32(0)));
    assert_eq!(vm.stack_var(1), Some(&Value::F32(0.0)));
}

#[test]
fn read_u32_rejects_negative_tokens() {
    let program = [op::read_u32(0), op::halt()];

    let mut vm = vm_with_input("-5\n");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    assert_eq!(vm.stack_var(0), Some(&Value::U32(0)));
}

#[test]
fn read_str_takes_one_line_and_retags_the_buffer() {
    let program = [op::read_str(3), op::read_str(4), op::halt()];

    let mut vm = vm_with_input("hello world\nsecond\n");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    let first = vm.buffer(3).unwrap().as_u8().unwrap();
    assert_eq!(&first[..12], b"hello world\0");

    let second = vm.buffer(4).unwrap().as_u8().unwrap();
    assert_eq!(&second[..7], b"second\0");
}

#[test]
fn read_str_caps_the_line_length() {
    let program = [op::read_str(0), op::read_str(1), op::halt()];

    let long = "x".repeat(300);
    let mut vm = vm_with_input(&format!("{long}\n"));
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    let first = vm.buffer(0).unwrap().as_u8().unwrap();
    assert!(first[..255].iter().all(|&b| b == b'x'));
    assert_eq!(first[255], 0);

    // The 45 overflow bytes stay in the stream for the next read.
    let second = vm.buffer(1).unwrap().as_u8().unwrap();
    assert!(second[..45].iter().all(|&b| b == b'x'));
    assert_eq!(second[45], 0);
}

#[test]
fn scalar_read_leaves_the_newline_for_read_str() {
    // read.i32 consumes only its token; the immediately following read.str
    // sees the bare newline and produces an empty string.
    let program = [op::read_i32(0), op::read_str(1), op::halt()];

    let mut vm = vm_with_input("42\nnext\n");
    vm.load_program(&assemble(&program)).unwrap();
    vm.run().unwrap();

    assert_eq!(vm.stack_var(0), Some(&Value::I32(42)));
    assert_eq!(vm.buffer(1).unwrap().as_u8().unwrap()[0], 0);
}

#[test]
fn unknown_opcode_byte_faults() {
    // 0xb0 is in the reserved range.
    let mut vm = vm_with_input("");
    vm.load_program(&[0xb0, 0, 0, 0]).unwrap();

    let err = vm.run().expect_err("reserved opcode");
    assert_eq!(err.fault(), Some(Fault::InvalidOpcode));
    assert_eq!(vm.pc(), 0);
}

#[test]
fn running_off_the_program_end_faults() {
    let mut vm = vm_with_input("");
    vm.load_program(&assemble(&[op::nop()])).unwrap();

    let err = vm.run().expect_err("no halt before the end");
    assert_eq!(err.fault(), Some(Fault::InvalidPc));
    assert_eq!(vm.pc(), 4);
}

#[test]
fn truncated_instruction_faults() {
    // A jmp header announcing a payload word the image does not contain.
    let mut vm = vm_with_input("");
    vm.load_program(&[Opcode::Jmp as u8, 0, 0x01, 0]).unwrap();

    let err = vm.run().expect_err("payload straddles the end");
    assert_eq!(err.fault(), Some(Fault::InvalidInstruction));
    assert_eq!(vm.pc(), 0);
}

#[test]
fn deterministic_replay_produces_identical_state() {
    let program = [
        op::load_i_u32(0, 0x1234_5678),
        op::load_i_u32(1, 13),
        op::xor_u32(2, 0, 1),
        op::shl_u32(3, 2, 1),
        op::cmp_u32(3, 0),
        op::halt(),
    ];

    let a = run_program(&program);
    let b = run_program(&program);

    assert_eq!(a.stack_var(3), b.stack_var(3));
    assert_eq!(a.flags(), b.flags());
    assert_eq!(a.pc(), b.pc());
}
