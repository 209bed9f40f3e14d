//! Typed fixed-size memory buffers.

use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
/// One of the 256 typed buffer slots.
///
/// Every non-void variant owns the same 256 bytes of storage, reinterpreted
/// per its element type. Void buffers reject reads, writes and string
/// operations; clearing one is a no-op and its length reads as zero.
pub enum MemBuffer {
    /// Unused slot.
    Void,
    /// 256 unsigned bytes; doubles as a null-terminated string.
    U8([u8; BUFFER_U8_CAPACITY]),
    /// 128 unsigned 16-bit words.
    U16([u16; BUFFER_U16_CAPACITY]),
    /// 64 signed 32-bit integers.
    I32([i32; BUFFER_I32_CAPACITY]),
    /// 64 unsigned 32-bit integers.
    U32([u32; BUFFER_U32_CAPACITY]),
    /// 64 single-precision floats.
    F32([f32; BUFFER_F32_CAPACITY]),
}

impl Default for MemBuffer {
    fn default() -> Self {
        Self::Void
    }
}

impl MemBuffer {
    /// A zeroed `u8` buffer.
    pub const fn zeroed_u8() -> Self {
        Self::U8([0; BUFFER_U8_CAPACITY])
    }

    /// A `u8` buffer initialized from a string, truncated to the storage and
    /// always null-terminated.
    pub fn string(s: &str) -> Self {
        let mut bytes = [0u8; BUFFER_U8_CAPACITY];
        let len = s.len().min(STR_MAX_LEN);
        bytes[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self::U8(bytes)
    }

    /// Whether the slot is unused.
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Declared element capacity for the buffer's type; zero when void.
    pub const fn capacity(&self) -> u32 {
        match self {
            Self::Void => 0,
            Self::U8(_) => BUFFER_U8_CAPACITY as u32,
            Self::U16(_) => BUFFER_U16_CAPACITY as u32,
            Self::I32(_) => BUFFER_I32_CAPACITY as u32,
            Self::U32(_) => BUFFER_U32_CAPACITY as u32,
            Self::F32(_) => BUFFER_F32_CAPACITY as u32,
        }
    }

    /// Zero the storage, keeping the type. No-op for void buffers.
    pub fn clear(&mut self) {
        match self {
            Self::Void => {}
            Self::U8(b) => b.fill(0),
            Self::U16(b) => b.fill(0),
            Self::I32(b) => b.fill(0),
            Self::U32(b) => b.fill(0),
            Self::F32(b) => b.fill(0.0),
        }
    }

    /// The byte storage if the buffer is `u8`-typed.
    pub const fn as_u8(&self) -> Option<&[u8; BUFFER_U8_CAPACITY]> {
        match self {
            Self::U8(b) => Some(b),
            _ => None,
        }
    }

    /// Mutable byte storage if the buffer is `u8`-typed.
    pub fn as_u8_mut(&mut self) -> Option<&mut [u8; BUFFER_U8_CAPACITY]> {
        match self {
            Self::U8(b) => Some(b),
            _ => None,
        }
    }

    /// Short type name used by diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::U8(_) => "u8[256]",
            Self::U16(_) => "u16[128]",
            Self::I32(_) => "i32[64]",
            Self::U32(_) => "u32[64]",
            Self::F32(_) => "float[64]",
        }
    }
}
