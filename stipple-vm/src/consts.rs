//! VM parameters

/// Number of global value slots.
pub const GLOBALS_COUNT: usize = 256;

/// Number of memory buffer slots.
pub const BUFFERS_COUNT: usize = 256;

/// Raw storage of one memory buffer, in bytes.
pub const BUFFER_BYTES: usize = 256;

/// Element capacity of a `u8` buffer.
pub const BUFFER_U8_CAPACITY: usize = BUFFER_BYTES;

/// Element capacity of a `u16` buffer.
pub const BUFFER_U16_CAPACITY: usize = BUFFER_BYTES / 2;

/// Element capacity of an `i32` buffer.
pub const BUFFER_I32_CAPACITY: usize = BUFFER_BYTES / 4;

/// Element capacity of a `u32` buffer.
pub const BUFFER_U32_CAPACITY: usize = BUFFER_BYTES / 4;

/// Element capacity of an `f32` buffer.
pub const BUFFER_F32_CAPACITY: usize = BUFFER_BYTES / 4;

/// Depth of the call stack, in frames.
pub const STACK_DEPTH: usize = 32;

/// Parameter-passing stack variables per frame.
pub const STACK_VAR_COUNT: usize = 16;

/// Local variables per frame.
pub const LOCALS_COUNT: usize = 64;

/// Maximum program image size, in bytes.
pub const PROGRAM_MAX_SIZE: usize = 65536;

/// Longest string a `u8` buffer can hold, terminator excluded.
pub const STR_MAX_LEN: usize = BUFFER_U8_CAPACITY - 1;

/// Absolute tolerance used by `cmp.f32` for the zero (equality) flag.
pub const F32_CMP_TOLERANCE: f32 = 1e-6;

/// Number of bits a `u32` shift count must stay below.
pub const SHIFT_LIMIT: u32 = 32;
