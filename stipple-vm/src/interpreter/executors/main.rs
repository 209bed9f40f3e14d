use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::state::ExecuteState;

use stipple_asm::Instruction;

use std::io::{BufRead, Write};

use tracing::debug;

impl<I, O> Interpreter<I, O>
where
    I: BufRead,
    O: Write,
{
    /// Execute the instruction at the current program counter.
    ///
    /// On success the program counter moves to the selected next
    /// instruction; a halt or any fault leaves it in place. The fault of a
    /// failed step is also recorded in [`Interpreter::last_error`] for
    /// post-mortem inspection.
    pub fn step(&mut self) -> Result<ExecuteState, InterpreterError> {
        match self.execute() {
            Ok(state) => {
                self.last_error = None;
                Ok(state)
            }
            Err(err) => {
                self.last_error = err.fault();
                Err(err)
            }
        }
    }

    /// Run until the program halts or faults. A clean halt is success.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        loop {
            match self.step()? {
                ExecuteState::Proceed => {}
                ExecuteState::Halt => {
                    debug!(pc = self.pc(), "program halted");
                    return Ok(());
                }
            }
        }
    }

    fn execute(&mut self) -> Result<ExecuteState, InterpreterError> {
        let instruction = Instruction::decode(self.program.as_slice(), self.pc as usize)?;

        let mut next_pc = self.pc + instruction.size() as u32;
        let state = self.dispatch(&instruction, &mut next_pc)?;

        if state.should_continue() {
            self.pc = next_pc;
        }

        Ok(state)
    }
}
