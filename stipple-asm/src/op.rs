//! Constructor helpers, one per opcode.
//!
//! These build fully-encoded [`Instruction`]s and are the intended way for
//! tests and host tooling to assemble programs. Stack-var indices are plain
//! `u8`s; the helpers do not range-check them, matching the decoder, so that
//! fault paths can be exercised from assembled programs.

use crate::instruction::{ImmType, Instruction, Payload, StackVarRef};
use crate::opcode::Opcode;

fn imm_u32(op: Opcode, operand: u8, w: u32) -> Instruction {
    Instruction::new(op, operand).push_imm(ImmType::U32, Payload::from_u32(w))
}

fn imm_buf(op: Opcode, operand: u8, buf: u32) -> Instruction {
    Instruction::new(op, operand).push_imm(ImmType::BufferRef, Payload::from_u32(buf))
}

fn binary(op: Opcode, dst: u8, src1: u8, src2: u8) -> Instruction {
    Instruction::new(op, dst)
        .push_imm(ImmType::U32, Payload::from_u32(src1 as u32))
        .push_imm(ImmType::U32, Payload::from_u32(src2 as u32))
}

fn unary(op: Opcode, dst: u8, src: u8) -> Instruction {
    imm_u32(op, dst, src as u32)
}

/* Control flow */

/// `nop`
pub fn nop() -> Instruction {
    Instruction::new(Opcode::Nop, 0)
}

/// `halt`
pub fn halt() -> Instruction {
    Instruction::new(Opcode::Halt, 0)
}

/// `jmp target`
pub fn jmp(target: u32) -> Instruction {
    imm_u32(Opcode::Jmp, 0, target)
}

/// `jz target`
pub fn jz(target: u32) -> Instruction {
    imm_u32(Opcode::Jz, 0, target)
}

/// `jnz target`
pub fn jnz(target: u32) -> Instruction {
    imm_u32(Opcode::Jnz, 0, target)
}

/// `jlt target`
pub fn jlt(target: u32) -> Instruction {
    imm_u32(Opcode::Jlt, 0, target)
}

/// `jgt target`
pub fn jgt(target: u32) -> Instruction {
    imm_u32(Opcode::Jgt, 0, target)
}

/// `jle target`
pub fn jle(target: u32) -> Instruction {
    imm_u32(Opcode::Jle, 0, target)
}

/// `jge target`
pub fn jge(target: u32) -> Instruction {
    imm_u32(Opcode::Jge, 0, target)
}

/// `call target`
pub fn call(target: u32) -> Instruction {
    imm_u32(Opcode::Call, 0, target)
}

/// `ret`
pub fn ret() -> Instruction {
    Instruction::new(Opcode::Ret, 0)
}

/* Variable loads */

/// `load.g dst, global`
pub fn load_g(dst: u8, global: u32) -> Instruction {
    Instruction::new(Opcode::LoadG, dst).push_imm(ImmType::GlobalRef, Payload::from_u32(global))
}

/// `load.l dst, local`
pub fn load_l(dst: u8, local: u32) -> Instruction {
    imm_u32(Opcode::LoadL, dst, local)
}

/// `load.s dst, (frame, var)`
pub fn load_s(dst: u8, frame: u16, var: u16) -> Instruction {
    Instruction::new(Opcode::LoadS, dst).push_imm(
        ImmType::StackRef,
        Payload::from_stack_ref(StackVarRef::new(frame, var)),
    )
}

/// `load.i32 dst, value`
pub fn load_i_i32(dst: u8, value: i32) -> Instruction {
    Instruction::new(Opcode::LoadII32, dst).push_imm(ImmType::I32, Payload::from_i32(value))
}

/// `load.u32 dst, value`
pub fn load_i_u32(dst: u8, value: u32) -> Instruction {
    imm_u32(Opcode::LoadIU32, dst, value)
}

/// `load.f32 dst, value`
pub fn load_i_f32(dst: u8, value: f32) -> Instruction {
    Instruction::new(Opcode::LoadIF32, dst).push_imm(ImmType::F32, Payload::from_f32(value))
}

/// `load.ret dst, frame`
pub fn load_ret(dst: u8, frame: u32) -> Instruction {
    imm_u32(Opcode::LoadRet, dst, frame)
}

/* Variable stores */

/// `store.g src, global`
pub fn store_g(src: u8, global: u32) -> Instruction {
    Instruction::new(Opcode::StoreG, src).push_imm(ImmType::GlobalRef, Payload::from_u32(global))
}

/// `store.l src, local`
pub fn store_l(src: u8, local: u32) -> Instruction {
    imm_u32(Opcode::StoreL, src, local)
}

/// `store.s src, (frame, var)`
pub fn store_s(src: u8, frame: u16, var: u16) -> Instruction {
    Instruction::new(Opcode::StoreS, src).push_imm(
        ImmType::StackRef,
        Payload::from_stack_ref(StackVarRef::new(frame, var)),
    )
}

/// `store.ret src, frame`
pub fn store_ret(src: u8, frame: u32) -> Instruction {
    imm_u32(Opcode::StoreRet, src, frame)
}

/* Integer arithmetic */

/// `add.i32 dst, src1, src2`
pub fn add_i32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::AddI32, dst, src1, src2)
}

/// `sub.i32 dst, src1, src2`
pub fn sub_i32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::SubI32, dst, src1, src2)
}

/// `mul.i32 dst, src1, src2`
pub fn mul_i32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::MulI32, dst, src1, src2)
}

/// `div.i32 dst, src1, src2`
pub fn div_i32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::DivI32, dst, src1, src2)
}

/// `mod.i32 dst, src1, src2`
pub fn mod_i32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::ModI32, dst, src1, src2)
}

/// `neg.i32 dst, src`
pub fn neg_i32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::NegI32, dst, src)
}

/// `add.u32 dst, src1, src2`
pub fn add_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::AddU32, dst, src1, src2)
}

/// `sub.u32 dst, src1, src2`
pub fn sub_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::SubU32, dst, src1, src2)
}

/// `mul.u32 dst, src1, src2`
pub fn mul_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::MulU32, dst, src1, src2)
}

/// `div.u32 dst, src1, src2`
pub fn div_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::DivU32, dst, src1, src2)
}

/// `mod.u32 dst, src1, src2`
pub fn mod_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::ModU32, dst, src1, src2)
}

/* Float arithmetic */

/// `add.f32 dst, src1, src2`
pub fn add_f32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::AddF32, dst, src1, src2)
}

/// `sub.f32 dst, src1, src2`
pub fn sub_f32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::SubF32, dst, src1, src2)
}

/// `mul.f32 dst, src1, src2`
pub fn mul_f32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::MulF32, dst, src1, src2)
}

/// `div.f32 dst, src1, src2`
pub fn div_f32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::DivF32, dst, src1, src2)
}

/// `neg.f32 dst, src`
pub fn neg_f32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::NegF32, dst, src)
}

/// `abs.f32 dst, src`
pub fn abs_f32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::AbsF32, dst, src)
}

/// `sqrt.f32 dst, src`
pub fn sqrt_f32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::SqrtF32, dst, src)
}

/* Bitwise */

/// `and.u32 dst, src1, src2`
pub fn and_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::AndU32, dst, src1, src2)
}

/// `or.u32 dst, src1, src2`
pub fn or_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::OrU32, dst, src1, src2)
}

/// `xor.u32 dst, src1, src2`
pub fn xor_u32(dst: u8, src1: u8, src2: u8) -> Instruction {
    binary(Opcode::XorU32, dst, src1, src2)
}

/// `not.u32 dst, src`
pub fn not_u32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::NotU32, dst, src)
}

/// `shl.u32 dst, src, count`
pub fn shl_u32(dst: u8, src: u8, count: u8) -> Instruction {
    binary(Opcode::ShlU32, dst, src, count)
}

/// `shr.u32 dst, src, count`
pub fn shr_u32(dst: u8, src: u8, count: u8) -> Instruction {
    binary(Opcode::ShrU32, dst, src, count)
}

/* Comparisons */

/// `cmp.i32 src1, src2`
pub fn cmp_i32(src1: u8, src2: u8) -> Instruction {
    binary(Opcode::CmpI32, 0, src1, src2)
}

/// `cmp.u32 src1, src2`
pub fn cmp_u32(src1: u8, src2: u8) -> Instruction {
    binary(Opcode::CmpU32, 0, src1, src2)
}

/// `cmp.f32 src1, src2`
pub fn cmp_f32(src1: u8, src2: u8) -> Instruction {
    binary(Opcode::CmpF32, 0, src1, src2)
}

/* Type conversions */

/// `i32.to.u32 dst, src`
pub fn i32_to_u32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::I32ToU32, dst, src)
}

/// `u32.to.i32 dst, src`
pub fn u32_to_i32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::U32ToI32, dst, src)
}

/// `i32.to.f32 dst, src`
pub fn i32_to_f32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::I32ToF32, dst, src)
}

/// `u32.to.f32 dst, src`
pub fn u32_to_f32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::U32ToF32, dst, src)
}

/// `f32.to.i32 dst, src`
pub fn f32_to_i32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::F32ToI32, dst, src)
}

/// `f32.to.u32 dst, src`
pub fn f32_to_u32(dst: u8, src: u8) -> Instruction {
    unary(Opcode::F32ToU32, dst, src)
}

/* Memory buffers */

/// `buf.read dst, buffer, pos`
pub fn buf_read(dst: u8, buffer: u32, pos: u32) -> Instruction {
    imm_buf(Opcode::BufRead, dst, buffer).push_imm(ImmType::BufferPos, Payload::from_u32(pos))
}

/// `buf.write src, buffer, pos`
pub fn buf_write(src: u8, buffer: u32, pos: u32) -> Instruction {
    imm_buf(Opcode::BufWrite, src, buffer).push_imm(ImmType::BufferPos, Payload::from_u32(pos))
}

/// `buf.len dst, buffer`
pub fn buf_len(dst: u8, buffer: u32) -> Instruction {
    imm_buf(Opcode::BufLen, dst, buffer)
}

/// `buf.clear buffer`
pub fn buf_clear(buffer: u32) -> Instruction {
    imm_buf(Opcode::BufClear, 0, buffer)
}

/* Strings */

/// `str.cat dst_buffer, src1_buffer, src2_buffer`
pub fn str_cat(dst: u8, src1: u32, src2: u32) -> Instruction {
    imm_buf(Opcode::StrCat, dst, src1).push_imm(ImmType::BufferRef, Payload::from_u32(src2))
}

/// `str.copy dst_buffer, src_buffer`
pub fn str_copy(dst: u8, src: u32) -> Instruction {
    imm_buf(Opcode::StrCopy, dst, src)
}

/// `str.len dst, buffer`
pub fn str_len(dst: u8, buffer: u32) -> Instruction {
    imm_buf(Opcode::StrLen, dst, buffer)
}

/// `str.cmp buffer1, buffer2`
pub fn str_cmp(buffer1: u32, buffer2: u32) -> Instruction {
    imm_buf(Opcode::StrCmp, 0, buffer1).push_imm(ImmType::BufferRef, Payload::from_u32(buffer2))
}

/// `str.chr dst, buffer, pos`
pub fn str_chr(dst: u8, buffer: u32, pos: u32) -> Instruction {
    imm_buf(Opcode::StrChr, dst, buffer).push_imm(ImmType::BufferPos, Payload::from_u32(pos))
}

/// `str.set_chr buffer, pos, char`
pub fn str_set_chr(buffer: u32, pos: u32, chr: u32) -> Instruction {
    imm_buf(Opcode::StrSetChr, 0, buffer)
        .push_imm(ImmType::BufferPos, Payload::from_u32(pos))
        .push_imm(ImmType::U32, Payload::from_u32(chr))
}

/* Standard I/O */

/// `print.i32 src`
pub fn print_i32(src: u8) -> Instruction {
    imm_u32(Opcode::PrintI32, 0, src as u32)
}

/// `print.u32 src`
pub fn print_u32(src: u8) -> Instruction {
    imm_u32(Opcode::PrintU32, 0, src as u32)
}

/// `print.f32 src`
pub fn print_f32(src: u8) -> Instruction {
    imm_u32(Opcode::PrintF32, 0, src as u32)
}

/// `print.str buffer`
pub fn print_str(buffer: u32) -> Instruction {
    imm_buf(Opcode::PrintStr, 0, buffer)
}

/// `println`
pub fn println() -> Instruction {
    Instruction::new(Opcode::Println, 0)
}

/// `read.i32 dst`
pub fn read_i32(dst: u8) -> Instruction {
    Instruction::new(Opcode::ReadI32, dst)
}

/// `read.u32 dst`
pub fn read_u32(dst: u8) -> Instruction {
    Instruction::new(Opcode::ReadU32, dst)
}

/// `read.f32 dst`
pub fn read_f32(dst: u8) -> Instruction {
    Instruction::new(Opcode::ReadF32, dst)
}

/// `read.str buffer`
pub fn read_str(buffer: u32) -> Instruction {
    imm_buf(Opcode::ReadStr, 0, buffer)
}
