//! Instruction set definitions for the Stipple VM.
//!
//! This crate owns everything that crosses the bytecode boundary: the opcode
//! enumeration, the packed 4-byte instruction header, the immediate payload
//! words and their type tags, the variable-length decoder, and the fault
//! taxonomy shared with the interpreter.

#![warn(missing_docs)]

mod fault;
mod instruction;
mod opcode;

pub mod op;


pub use fault::Fault;
pub use instruction::{assemble, Header, ImmType, Instruction, Payload, StackVarRef};
pub use opcode::Opcode;
