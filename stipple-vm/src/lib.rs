//! Stipple VM interpreter.
//!
//! A small, self-contained bytecode virtual machine for embedded and
//! safety-critical hosts: every operand is range-checked, every type mismatch
//! surfaces as a fault, and all storage is pre-sized at construction. The
//! instruction set lives in [`stipple_asm`]; this crate owns the state
//! container and the execution engine.

pub mod buffer;
pub mod consts;
pub mod error;
pub mod frame;
pub mod interpreter;
pub mod state;
pub mod util;
pub mod value;

pub mod prelude {
    //! Common imports for hosts and tests.

    pub use stipple_asm::{assemble, op, Fault, Header, ImmType, Instruction, Opcode, Payload, StackVarRef};

    pub use crate::buffer::MemBuffer;
    pub use crate::error::InterpreterError;
    pub use crate::frame::Frame;
    pub use crate::interpreter::{Interpreter, StdioInterpreter};
    pub use crate::state::{ExecuteState, Flags};
    pub use crate::value::Value;
}
