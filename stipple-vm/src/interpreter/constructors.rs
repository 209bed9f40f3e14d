//! Exposed constructors API for the [`Interpreter`]

use super::{Interpreter, StdioInterpreter};
use crate::buffer::MemBuffer;
use crate::consts::*;
use crate::frame::Frame;
use crate::state::Flags;
use crate::value::Value;

use std::io::{self, BufReader};

impl<I, O> Interpreter<I, O> {
    /// Create a new interpreter bound to the given host channels.
    ///
    /// All storage is allocated here, once; the instance starts in the same
    /// state [`Interpreter::init`] produces.
    pub fn with_io(input: I, output: O) -> Self {
        Self {
            globals: vec![Value::Void; GLOBALS_COUNT],
            buffers: vec![MemBuffer::Void; BUFFERS_COUNT],
            frames: vec![Frame::default(); STACK_DEPTH],
            program: Vec::with_capacity(PROGRAM_MAX_SIZE),
            pc: 0,
            sp: 0,
            flags: Flags::empty(),
            last_error: None,
            input,
            output,
        }
    }
}

impl StdioInterpreter {
    /// Create a new interpreter bound to the process standard streams.
    pub fn stdio() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }
}
