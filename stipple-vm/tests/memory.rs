use stipple_vm::consts::*;
use stipple_vm::prelude::*;
use stipple_vm::util::test_helpers::*;

fn vm_with_buffer(program: &[Instruction], idx: usize, buffer: MemBuffer) -> TestInterpreter {
    let mut vm = vm_with_program(program);
    *vm.buffer_mut(idx).unwrap() = buffer;
    vm
}

#[test]
fn u8_buffer_round_trips_with_widening() {
    let program = [
        op::load_i_u32(0, 0x1ff),
        op::buf_write(0, 3, 10),
        op::buf_read(1, 3, 10),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 3, MemBuffer::zeroed_u8());

    vm.run().unwrap();

    // The write narrows to the low byte, the read widens back to u32.
    assert_eq!(vm.stack_var(1), Some(&Value::U32(0xff)));
}

#[test]
fn u16_buffer_accepts_both_integer_tags() {
    let program = [
        op::load_i_i32(0, -2),
        op::buf_write(0, 4, 0),
        op::load_i_u32(1, 0x1_0005),
        op::buf_write(1, 4, 1),
        op::buf_read(2, 4, 0),
        op::buf_read(3, 4, 1),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 4, MemBuffer::U16([0; BUFFER_U16_CAPACITY]));

    vm.run().unwrap();

    assert_eq!(vm.stack_var(2), Some(&Value::U32(0xfffe)));
    assert_eq!(vm.stack_var(3), Some(&Value::U32(5)));
}

#[test]
fn word_buffers_round_trip_exactly() {
    let program = [
        op::load_i_i32(0, -7),
        op::buf_write(0, 1, 63),
        op::buf_read(1, 1, 63),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::I32([0; BUFFER_I32_CAPACITY]));
    vm.run().unwrap();
    assert_eq!(vm.stack_var(1), Some(&Value::I32(-7)));

    let program = [
        op::load_i_u32(0, u32::MAX),
        op::buf_write(0, 1, 0),
        op::buf_read(1, 1, 0),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::U32([0; BUFFER_U32_CAPACITY]));
    vm.run().unwrap();
    assert_eq!(vm.stack_var(1), Some(&Value::U32(u32::MAX)));

    let program = [
        op::load_i_f32(0, 2.5),
        op::buf_write(0, 1, 7),
        op::buf_read(1, 1, 7),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::F32([0.0; BUFFER_F32_CAPACITY]));
    vm.run().unwrap();
    assert_eq!(vm.stack_var(1), Some(&Value::F32(2.5)));
}

#[test]
fn word_buffers_require_the_exact_tag() {
    let program = [
        op::load_i_i32(0, 1),
        op::buf_write(0, 1, 0),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::U32([0; BUFFER_U32_CAPACITY]));

    let err = vm.run().expect_err("i32 into u32 buffer");
    assert_eq!(err.fault(), Some(Fault::TypeMismatch));

    let program = [
        op::load_i_u32(0, 1),
        op::buf_write(0, 1, 0),
        op::halt(),
    ];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::F32([0.0; BUFFER_F32_CAPACITY]));

    let err = vm.run().expect_err("u32 into f32 buffer");
    assert_eq!(err.fault(), Some(Fault::TypeMismatch));
}

#[test]
fn void_buffers_reject_element_access() {
    let mut vm = vm_with_program(&[op::buf_read(0, 9, 0), op::halt()]);
    let err = vm.run().expect_err("read from void buffer");
    assert_eq!(err.fault(), Some(Fault::TypeMismatch));

    let mut vm = vm_with_program(&[
        op::load_i_u32(0, 1),
        op::buf_write(0, 9, 0),
        op::halt(),
    ]);
    let err = vm.run().expect_err("write to void buffer");
    assert_eq!(err.fault(), Some(Fault::TypeMismatch));
}

#[test]
fn buffer_length_reports_capacity_per_tag() {
    let program = [
        op::buf_len(0, 0),
        op::buf_len(1, 1),
        op::buf_len(2, 2),
        op::buf_len(3, 3),
        op::halt(),
    ];
    let mut vm = vm_with_program(&program);
    *vm.buffer_mut(0).unwrap() = MemBuffer::zeroed_u8();
    *vm.buffer_mut(1).unwrap() = MemBuffer::U16([0; BUFFER_U16_CAPACITY]);
    *vm.buffer_mut(2).unwrap() = MemBuffer::F32([0.0; BUFFER_F32_CAPACITY]);
    // Buffer 3 stays void: its length reads as zero, not a fault.

    vm.run().unwrap();

    assert_eq!(vm.stack_var(0), Some(&Value::U32(256)));
    assert_eq!(vm.stack_var(1), Some(&Value::U32(128)));
    assert_eq!(vm.stack_var(2), Some(&Value::U32(64)));
    assert_eq!(vm.stack_var(3), Some(&Value::U32(0)));
}

#[test]
fn clear_zeroes_storage_and_keeps_the_tag() {
    let program = [op::buf_clear(2), op::halt()];
    let mut buffer = [0u32; BUFFER_U32_CAPACITY];
    buffer[5] = 99;
    let mut vm = vm_with_buffer(&program, 2, MemBuffer::U32(buffer));

    vm.run().unwrap();

    assert_eq!(vm.buffer(2), Some(&MemBuffer::U32([0; BUFFER_U32_CAPACITY])));

    // Clearing a void buffer is a no-op, not a fault.
    let mut vm = vm_with_program(&[op::buf_clear(8), op::halt()]);
    vm.run().unwrap();
    assert!(vm.buffer(8).unwrap().is_void());
}

#[test]
fn buffer_index_and_position_are_bounded() {
    let mut vm = vm_with_program(&[op::buf_len(0, 256), op::halt()]);
    let err = vm.run().expect_err("buffer index out of range");
    assert_eq!(err.fault(), Some(Fault::InvalidBufferIndex));
    assert_eq!(vm.pc(), 0);

    let program = [op::buf_read(0, 1, 128), op::halt()];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::U16([0; BUFFER_U16_CAPACITY]));
    let err = vm.run().expect_err("position at capacity");
    assert_eq!(err.fault(), Some(Fault::InvalidBufferPosition));

    // The last valid position is capacity - 1.
    let program = [op::buf_read(0, 1, 127), op::halt()];
    let mut vm = vm_with_buffer(&program, 1, MemBuffer::U16([0; BUFFER_U16_CAPACITY]));
    vm.run().unwrap();
}

#[test]
fn writes_stay_inside_the_addressed_buffer() {
    let mut sentinel = [0u8; BUFFER_U8_CAPACITY];
    sentinel.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);

    let program = [
        op::load_i_u32(0, 0xaa),
        op::buf_write(0, 5, 255),
        op::halt(),
    ];
    let mut vm = vm_with_program(&program);
    *vm.buffer_mut(4).unwrap() = MemBuffer::U8(sentinel);
    *vm.buffer_mut(5).unwrap() = MemBuffer::zeroed_u8();
    *vm.buffer_mut(6).unwrap() = MemBuffer::U8(sentinel);

    vm.run().unwrap();

    assert_eq!(vm.buffer(4), Some(&MemBuffer::U8(sentinel)));
    assert_eq!(vm.buffer(6), Some(&MemBuffer::U8(sentinel)));
    assert_eq!(vm.buffer(5).unwrap().as_u8().unwrap()[255], 0xaa);
}
