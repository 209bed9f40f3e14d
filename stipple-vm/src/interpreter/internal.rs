use super::Interpreter;
use crate::buffer::MemBuffer;
use crate::consts::*;
use crate::state::Flags;
use crate::value::Value;

use stipple_asm::Fault;

impl<I, O> Interpreter<I, O> {
    /// Read a stack variable of the current frame. Values are `Copy`, so
    /// reads hand out owned copies and keep the borrow surface small.
    pub(crate) fn svar(&self, idx: u32) -> Result<Value, Fault> {
        self.frames[self.sp]
            .stack_var(idx as usize)
            .copied()
            .ok_or(Fault::InvalidStackVarIndex)
    }

    pub(crate) fn set_svar(&mut self, idx: u32, value: Value) -> Result<(), Fault> {
        self.frames[self.sp]
            .stack_var_mut(idx as usize)
            .map(|slot| *slot = value)
            .ok_or(Fault::InvalidStackVarIndex)
    }

    /// Validate a stack-var index without touching the slot.
    pub(crate) fn check_svar(&self, idx: u32) -> Result<(), Fault> {
        if (idx as usize) < STACK_VAR_COUNT {
            Ok(())
        } else {
            Err(Fault::InvalidStackVarIndex)
        }
    }

    pub(crate) fn global_at(&self, idx: u32) -> Result<Value, Fault> {
        self.globals
            .get(idx as usize)
            .copied()
            .ok_or(Fault::InvalidGlobalIndex)
    }

    pub(crate) fn set_global_at(&mut self, idx: u32, value: Value) -> Result<(), Fault> {
        self.globals
            .get_mut(idx as usize)
            .map(|slot| *slot = value)
            .ok_or(Fault::InvalidGlobalIndex)
    }

    pub(crate) fn local_at(&self, idx: u32) -> Result<Value, Fault> {
        self.frames[self.sp]
            .local(idx as usize)
            .copied()
            .ok_or(Fault::InvalidLocalIndex)
    }

    pub(crate) fn set_local_at(&mut self, idx: u32, value: Value) -> Result<(), Fault> {
        self.frames[self.sp]
            .local_mut(idx as usize)
            .map(|slot| *slot = value)
            .ok_or(Fault::InvalidLocalIndex)
    }

    /// Read a stack variable of an arbitrary frame.
    pub(crate) fn frame_svar(&self, frame: u32, var: u32) -> Result<Value, Fault> {
        self.frames
            .get(frame as usize)
            .and_then(|f| f.stack_var(var as usize))
            .copied()
            .ok_or(Fault::InvalidStackVarIndex)
    }

    pub(crate) fn set_frame_svar(&mut self, frame: u32, var: u32, value: Value) -> Result<(), Fault> {
        self.frames
            .get_mut(frame as usize)
            .and_then(|f| f.stack_var_mut(var as usize))
            .map(|slot| *slot = value)
            .ok_or(Fault::InvalidStackVarIndex)
    }

    /// Read the return value slot of an arbitrary frame. Frame bounds map to
    /// the stack-var fault, matching the frame-addressing rules.
    pub(crate) fn frame_ret_val(&self, frame: u32) -> Result<Value, Fault> {
        self.frames
            .get(frame as usize)
            .map(|f| *f.ret_val())
            .ok_or(Fault::InvalidStackVarIndex)
    }

    pub(crate) fn set_frame_ret_val(&mut self, frame: u32, value: Value) -> Result<(), Fault> {
        self.frames
            .get_mut(frame as usize)
            .map(|f| f.set_ret_val(value))
            .ok_or(Fault::InvalidStackVarIndex)
    }

    pub(crate) fn buffer_at(&self, idx: u32) -> Result<&MemBuffer, Fault> {
        self.buffers.get(idx as usize).ok_or(Fault::InvalidBufferIndex)
    }

    pub(crate) fn buffer_at_mut(&mut self, idx: u32) -> Result<&mut MemBuffer, Fault> {
        self.buffers
            .get_mut(idx as usize)
            .ok_or(Fault::InvalidBufferIndex)
    }

    /// Atomically rewrite the condition flags from one comparison.
    pub(crate) fn set_cmp_flags(&mut self, zero: bool, less: bool, greater: bool) {
        let mut flags = Flags::empty();
        flags.set(Flags::ZERO, zero);
        flags.set(Flags::LESS, less);
        flags.set(Flags::GREATER, greater);
        self.flags = flags;
    }
}
