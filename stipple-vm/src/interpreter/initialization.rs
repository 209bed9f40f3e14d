use super::Interpreter;
use crate::consts::*;
use crate::error::InterpreterError;
use crate::state::Flags;
use crate::value::Value;

use stipple_asm::Fault;

use tracing::debug;

impl<I, O> Interpreter<I, O> {
    /// Reset every slot to void and all registers to zero.
    ///
    /// The loaded program is discarded; the I/O channels are untouched.
    pub fn init(&mut self) {
        self.globals.iter_mut().for_each(|g| *g = Value::Void);
        self.buffers.iter_mut().for_each(|b| *b = Default::default());
        self.frames.iter_mut().for_each(|f| *f = Default::default());
        self.program.clear();
        self.pc = 0;
        self.sp = 0;
        self.flags = Flags::empty();
        self.last_error = None;
    }

    /// Synonym for [`Interpreter::init`].
    pub fn reset(&mut self) {
        self.init()
    }

    /// Copy a bytecode image into the instruction memory.
    ///
    /// Resets the program counter to the entry point at byte zero. Globals,
    /// buffers, frames and the stack pointer are left as they are; a program
    /// may assume a fresh machine only right after an `init`.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), InterpreterError> {
        if image.len() > PROGRAM_MAX_SIZE {
            self.last_error = Some(Fault::ProgramTooLarge);
            return Err(Fault::ProgramTooLarge.into());
        }

        self.program.clear();
        self.program.extend_from_slice(image);
        self.pc = 0;
        self.last_error = None;

        debug!(len = image.len(), "program loaded");

        Ok(())
    }
}
