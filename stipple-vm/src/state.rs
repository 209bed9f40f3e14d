//! Runtime state representation for the VM.

use bitflags::bitflags;

bitflags! {
    /// Condition flags written by the compare instructions and consumed by
    /// the conditional jumps. No other instruction touches them.
    #[derive(Default)]
    pub struct Flags: u8 {
        /// Operands compared equal.
        const ZERO = 0x01;
        /// First operand was smaller.
        const LESS = 0x02;
        /// First operand was greater.
        const GREATER = 0x04;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Resulting state of a single instruction execution.
pub enum ExecuteState {
    /// The VM should proceed normally with the execution.
    Proceed,
    /// A `halt` instruction was reached. The program counter stays on the
    /// halting instruction; `run` reports this as success.
    Halt,
}

impl ExecuteState {
    /// Return true if the VM execution should continue.
    pub const fn should_continue(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

impl Default for ExecuteState {
    fn default() -> Self {
        Self::Proceed
    }
}
