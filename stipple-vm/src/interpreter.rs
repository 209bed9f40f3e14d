//! [`Interpreter`] implementation

use crate::buffer::MemBuffer;
use crate::frame::Frame;
use crate::state::Flags;
use crate::value::Value;

use stipple_asm::Fault;

use std::io::{BufReader, Stdin, Stdout};

mod alu;
mod constructors;
mod debug;
mod executors;
mod flow;
mod initialization;
mod internal;
mod io;
mod memory;

/// VM interpreter.
///
/// Owns the whole machine state: globals, typed memory buffers, the frame
/// stack, the program image and the execution registers. All storage is
/// allocated once at construction and never grows. The type is generic over
/// the host's input and output channels, the VM's only external
/// collaborators; production hosts run on process stdio while tests drive
/// in-memory channels.
#[derive(Debug)]
pub struct Interpreter<I, O> {
    globals: Vec<Value>,
    buffers: Vec<MemBuffer>,
    frames: Vec<Frame>,
    program: Vec<u8>,
    pc: u32,
    sp: usize,
    flags: Flags,
    last_error: Option<Fault>,
    input: I,
    output: O,
}

/// Interpreter bound to the process standard streams.
pub type StdioInterpreter = Interpreter<BufReader<Stdin>, Stdout>;

impl<I, O> Interpreter<I, O> {
    /// Byte offset of the next instruction.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Index of the currently executing frame.
    pub const fn sp(&self) -> usize {
        self.sp
    }

    /// The condition flags.
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Fault recorded by the most recent failed step, if any.
    pub const fn last_error(&self) -> Option<Fault> {
        self.last_error
    }

    /// The loaded program image.
    pub fn program(&self) -> &[u8] {
        self.program.as_slice()
    }

    /// Length of the loaded program, in bytes.
    pub fn program_len(&self) -> u32 {
        self.program.len() as u32
    }

    /// All global value slots.
    pub fn globals(&self) -> &[Value] {
        self.globals.as_slice()
    }

    /// The global value at `idx`, if in range.
    pub fn global(&self, idx: usize) -> Option<&Value> {
        self.globals.get(idx)
    }

    /// Overwrite a global value slot from the host side.
    pub fn set_global(&mut self, idx: usize, value: Value) -> Option<()> {
        self.globals.get_mut(idx).map(|slot| *slot = value)
    }

    /// The memory buffer at `idx`, if in range.
    pub fn buffer(&self, idx: usize) -> Option<&MemBuffer> {
        self.buffers.get(idx)
    }

    /// Mutable access to a memory buffer, for host-side setup.
    pub fn buffer_mut(&mut self, idx: usize) -> Option<&mut MemBuffer> {
        self.buffers.get_mut(idx)
    }

    /// The whole frame stack, bottom first.
    pub fn frames(&self) -> &[Frame] {
        self.frames.as_slice()
    }

    /// The frame at `idx`, if in range.
    pub fn frame(&self, idx: usize) -> Option<&Frame> {
        self.frames.get(idx)
    }

    /// The currently executing frame.
    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.sp]
    }

    /// A stack variable of the current frame, if in range.
    pub fn stack_var(&self, idx: usize) -> Option<&Value> {
        self.current_frame().stack_var(idx)
    }

    /// The host output channel.
    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access to the host output channel.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Mutable access to the host input channel.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Consume the interpreter, releasing its I/O channels.
    pub fn into_io(self) -> (I, O) {
        (self.input, self.output)
    }
}
