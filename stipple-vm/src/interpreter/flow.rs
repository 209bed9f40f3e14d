use super::Interpreter;
use crate::consts::*;

use stipple_asm::{Fault, Payload};

use tracing::trace;

impl<I, O> Interpreter<I, O> {
    /// Validate a branch target. Targets are byte offsets; only the bound is
    /// checked, a well-formed program always emits 4-byte aligned targets.
    pub(crate) fn branch_target(&self, imm: Payload) -> Result<u32, Fault> {
        let target = imm.as_u32();

        if target < self.program_len() {
            Ok(target)
        } else {
            Err(Fault::InvalidPc)
        }
    }

    /// Push a frame and return the callee entry point.
    ///
    /// The fall-through address becomes the new frame's return address and
    /// its locals are cleared to void. Stack-vars and the return value slot
    /// are left as-is: they are the caller's argument-passing surface.
    pub(crate) fn call(&mut self, imm: Payload, fall_through: u32) -> Result<u32, Fault> {
        if self.sp >= STACK_DEPTH - 1 {
            return Err(Fault::StackOverflow);
        }

        let target = self.branch_target(imm)?;

        self.sp += 1;
        let frame = &mut self.frames[self.sp];
        frame.set_return_addr(fall_through);
        frame.clear_locals();

        trace!(sp = self.sp, entry = target, "call");

        Ok(target)
    }

    /// Pop a frame and return the stored return address. The bottom frame
    /// cannot be returned from.
    pub(crate) fn ret(&mut self) -> Result<u32, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }

        let return_addr = self.frames[self.sp].return_addr();
        self.sp -= 1;

        trace!(sp = self.sp, return_addr, "ret");

        Ok(return_addr)
    }
}
