use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::state::{ExecuteState, Flags};
use crate::value::Value;

use stipple_asm::{Instruction, Opcode};

use std::io::{BufRead, Write};

use tracing::trace;

impl<I, O> Interpreter<I, O>
where
    I: BufRead,
    O: Write,
{
    /// Execute one decoded instruction.
    ///
    /// `next_pc` arrives holding the fall-through address and flow opcodes
    /// overwrite it; the caller commits it only on success, so a faulting
    /// instruction never advances the program counter.
    pub(crate) fn dispatch(
        &mut self,
        instruction: &Instruction,
        next_pc: &mut u32,
    ) -> Result<ExecuteState, InterpreterError> {
        let op = instruction.opcode()?;
        let operand = instruction.operand() as u32;

        // Source stack-var indices travel in the low byte of payload words.
        let s1 = instruction.imm1().as_u32() & 0xff;
        let s2 = instruction.imm2().as_u32() & 0xff;

        trace!(pc = self.pc(), opcode = op.name(), "execute");

        match op {
            /* Control flow */
            Opcode::Nop => {}

            Opcode::Halt => return Ok(ExecuteState::Halt),

            Opcode::Jmp => *next_pc = self.branch_target(instruction.imm1())?,

            Opcode::Jz => {
                if self.flags().contains(Flags::ZERO) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Jnz => {
                if !self.flags().contains(Flags::ZERO) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Jlt => {
                if self.flags().contains(Flags::LESS) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Jgt => {
                if self.flags().contains(Flags::GREATER) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Jle => {
                if self.flags().intersects(Flags::LESS | Flags::ZERO) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Jge => {
                if self.flags().intersects(Flags::GREATER | Flags::ZERO) {
                    *next_pc = self.branch_target(instruction.imm1())?;
                }
            }

            Opcode::Call => *next_pc = self.call(instruction.imm1(), *next_pc)?,

            Opcode::Ret => *next_pc = self.ret()?,

            /* Variable loads */
            Opcode::LoadG => {
                let value = self.global_at(instruction.imm1().as_u32())?;
                self.set_svar(operand, value)?;
            }

            Opcode::LoadL => {
                let value = self.local_at(instruction.imm1().as_u32())?;
                self.set_svar(operand, value)?;
            }

            Opcode::LoadS => {
                let r = instruction.imm1().as_stack_ref();
                let value = self.frame_svar(r.frame as u32, r.var as u32)?;
                self.set_svar(operand, value)?;
            }

            Opcode::LoadII32 => self.set_svar(operand, Value::I32(instruction.imm1().as_i32()))?,

            Opcode::LoadIU32 => self.set_svar(operand, Value::U32(instruction.imm1().as_u32()))?,

            Opcode::LoadIF32 => self.set_svar(operand, Value::F32(instruction.imm1().as_f32()))?,

            Opcode::LoadRet => {
                let value = self.frame_ret_val(instruction.imm1().as_u32())?;
                self.set_svar(operand, value)?;
            }

            /* Variable stores */
            Opcode::StoreG => {
                let value = self.svar(operand)?;
                self.set_global_at(instruction.imm1().as_u32(), value)?;
            }

            Opcode::StoreL => {
                let value = self.svar(operand)?;
                self.set_local_at(instruction.imm1().as_u32(), value)?;
            }

            Opcode::StoreS => {
                let value = self.svar(operand)?;
                let r = instruction.imm1().as_stack_ref();
                self.set_frame_svar(r.frame as u32, r.var as u32, value)?;
            }

            Opcode::StoreRet => {
                let value = self.svar(operand)?;
                self.set_frame_ret_val(instruction.imm1().as_u32(), value)?;
            }

            /* Integer arithmetic, wrapping on overflow */
            Opcode::AddI32 => self.alu_i32(operand, s1, s2, i32::wrapping_add)?,
            Opcode::SubI32 => self.alu_i32(operand, s1, s2, i32::wrapping_sub)?,
            Opcode::MulI32 => self.alu_i32(operand, s1, s2, i32::wrapping_mul)?,
            Opcode::DivI32 => self.alu_i32_div(operand, s1, s2, i32::wrapping_div)?,
            Opcode::ModI32 => self.alu_i32_div(operand, s1, s2, i32::wrapping_rem)?,
            Opcode::NegI32 => self.alu_unary_i32(operand, s1, i32::wrapping_neg)?,
            Opcode::AddU32 => self.alu_u32(operand, s1, s2, u32::wrapping_add)?,
            Opcode::SubU32 => self.alu_u32(operand, s1, s2, u32::wrapping_sub)?,
            Opcode::MulU32 => self.alu_u32(operand, s1, s2, u32::wrapping_mul)?,
            Opcode::DivU32 => self.alu_u32_div(operand, s1, s2, |a, b| a / b)?,
            Opcode::ModU32 => self.alu_u32_div(operand, s1, s2, |a, b| a % b)?,

            /* Float arithmetic */
            Opcode::AddF32 => self.alu_f32(operand, s1, s2, |a, b| a + b)?,
            Opcode::SubF32 => self.alu_f32(operand, s1, s2, |a, b| a - b)?,
            Opcode::MulF32 => self.alu_f32(operand, s1, s2, |a, b| a * b)?,
            Opcode::DivF32 => self.alu_f32_div(operand, s1, s2)?,
            Opcode::NegF32 => self.alu_unary_f32(operand, s1, |a| -a)?,
            Opcode::AbsF32 => self.alu_unary_f32(operand, s1, f32::abs)?,
            Opcode::SqrtF32 => self.alu_unary_f32(operand, s1, f32::sqrt)?,

            /* Bitwise */
            Opcode::AndU32 => self.alu_u32(operand, s1, s2, |a, b| a & b)?,
            Opcode::OrU32 => self.alu_u32(operand, s1, s2, |a, b| a | b)?,
            Opcode::XorU32 => self.alu_u32(operand, s1, s2, |a, b| a ^ b)?,
            Opcode::NotU32 => self.alu_unary_u32(operand, s1, |a| !a)?,
            Opcode::ShlU32 => self.alu_shift_u32(operand, s1, s2, |a, count| a << count)?,
            Opcode::ShrU32 => self.alu_shift_u32(operand, s1, s2, |a, count| a >> count)?,

            /* Comparisons */
            Opcode::CmpI32 => self.cmp_i32(s1, s2)?,
            Opcode::CmpU32 => self.cmp_u32(s1, s2)?,
            Opcode::CmpF32 => self.cmp_f32(s1, s2)?,

            /* Type conversions */
            Opcode::I32ToU32 => {
                self.convert(operand, s1, |v| v.as_i32().map(|x| Value::U32(x as u32)))?
            }
            Opcode::U32ToI32 => {
                self.convert(operand, s1, |v| v.as_u32().map(|x| Value::I32(x as i32)))?
            }
            Opcode::I32ToF32 => {
                self.convert(operand, s1, |v| v.as_i32().map(|x| Value::F32(x as f32)))?
            }
            Opcode::U32ToF32 => {
                self.convert(operand, s1, |v| v.as_u32().map(|x| Value::F32(x as f32)))?
            }
            Opcode::F32ToI32 => {
                self.convert(operand, s1, |v| v.as_f32().map(|x| Value::I32(x as i32)))?
            }
            Opcode::F32ToU32 => {
                self.convert(operand, s1, |v| v.as_f32().map(|x| Value::U32(x as u32)))?
            }

            /* Memory buffers */
            Opcode::BufRead => {
                self.buf_read(operand, instruction.imm1().as_u32(), instruction.imm2().as_u32())?
            }
            Opcode::BufWrite => {
                self.buf_write(operand, instruction.imm1().as_u32(), instruction.imm2().as_u32())?
            }
            Opcode::BufLen => self.buf_len(operand, instruction.imm1().as_u32())?,
            Opcode::BufClear => self.buf_clear(instruction.imm1().as_u32())?,

            /* Strings; the operand byte names the destination buffer */
            Opcode::StrCat => self.str_cat(
                operand,
                instruction.imm1().as_u32(),
                instruction.imm2().as_u32(),
            )?,
            Opcode::StrCopy => self.str_copy(operand, instruction.imm1().as_u32())?,
            Opcode::StrLen => self.str_len(operand, instruction.imm1().as_u32())?,
            Opcode::StrCmp => self.str_cmp(
                instruction.imm1().as_u32(),
                instruction.imm2().as_u32(),
            )?,
            Opcode::StrChr => self.str_chr(
                operand,
                instruction.imm1().as_u32(),
                instruction.imm2().as_u32(),
            )?,
            Opcode::StrSetChr => self.str_set_chr(
                instruction.imm1().as_u32(),
                instruction.imm2().as_u32(),
                instruction.imm3().as_u32(),
            )?,

            /* Standard I/O */
            Opcode::PrintI32 => self.print_i32(s1)?,
            Opcode::PrintU32 => self.print_u32(s1)?,
            Opcode::PrintF32 => self.print_f32(s1)?,
            Opcode::PrintStr => self.print_str(instruction.imm1().as_u32())?,
            Opcode::Println => self.println()?,
            Opcode::ReadI32 => self.read_i32(operand)?,
            Opcode::ReadU32 => self.read_u32(operand)?,
            Opcode::ReadF32 => self.read_f32(operand)?,
            Opcode::ReadStr => self.read_str(instruction.imm1().as_u32())?,
        }

        Ok(ExecuteState::Proceed)
    }
}
