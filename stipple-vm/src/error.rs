//! Runtime interpreter error implementation

use stipple_asm::Fault;

use std::io;
use thiserror::Error;

/// Interpreter runtime error variants.
///
/// Faults are the well-formed failures of the instruction set: the program
/// counter stays on the faulting instruction and the VM state remains
/// inspectable. I/O errors come from the host's channels and carry no such
/// guarantee beyond the unchanged program counter.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The execution faulted with a well-formed status code.
    #[error("Execution fault: {0}")]
    Fault(#[from] Fault),
    /// The host input or output channel failed.
    #[error("Unrecoverable I/O error: {0}")]
    Io(#[from] io::Error),
}

impl InterpreterError {
    /// The fault that caused this error, if applicable.
    pub const fn fault(&self) -> Option<Fault> {
        match self {
            Self::Fault(fault) => Some(*fault),
            Self::Io(_) => None,
        }
    }
}
