use super::Interpreter;
use crate::buffer::MemBuffer;
use crate::consts::*;
use crate::value::Value;

use stipple_asm::Fault;

/// Logical length of a null-terminated byte buffer: the index of the first
/// zero, or the full storage when none is present.
pub(crate) fn str_scan_len(bytes: &[u8; BUFFER_U8_CAPACITY]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(BUFFER_U8_CAPACITY)
}

impl<I, O> Interpreter<I, O> {
    /// Read one element of a buffer into a stack-var, widening narrow
    /// elements to `u32`.
    pub(crate) fn buf_read(&mut self, dst: u32, buf: u32, pos: u32) -> Result<(), Fault> {
        self.check_svar(dst)?;
        let buffer = self.buffer_at(buf)?;

        if buffer.is_void() {
            return Err(Fault::TypeMismatch);
        }
        if pos >= buffer.capacity() {
            return Err(Fault::InvalidBufferPosition);
        }

        let pos = pos as usize;
        let value = match buffer {
            MemBuffer::U8(b) => Value::U32(b[pos] as u32),
            MemBuffer::U16(b) => Value::U32(b[pos] as u32),
            MemBuffer::I32(b) => Value::I32(b[pos]),
            MemBuffer::U32(b) => Value::U32(b[pos]),
            MemBuffer::F32(b) => Value::F32(b[pos]),
            MemBuffer::Void => unreachable!("checked above"),
        };

        self.set_svar(dst, value)
    }

    /// Write a stack-var into one element of a buffer.
    ///
    /// `u8` and `u16` buffers accept both integer tags with narrowing
    /// truncation; word-sized buffers require the exact tag.
    pub(crate) fn buf_write(&mut self, src: u32, buf: u32, pos: u32) -> Result<(), Fault> {
        let value = self.svar(src)?;
        let buffer = self.buffer_at_mut(buf)?;

        if buffer.is_void() {
            return Err(Fault::TypeMismatch);
        }
        if pos >= buffer.capacity() {
            return Err(Fault::InvalidBufferPosition);
        }

        let pos = pos as usize;
        match buffer {
            MemBuffer::U8(b) => {
                b[pos] = match value {
                    Value::U32(v) => v as u8,
                    Value::I32(v) => v as u8,
                    _ => return Err(Fault::TypeMismatch),
                }
            }
            MemBuffer::U16(b) => {
                b[pos] = match value {
                    Value::U32(v) => v as u16,
                    Value::I32(v) => v as u16,
                    _ => return Err(Fault::TypeMismatch),
                }
            }
            MemBuffer::I32(b) => b[pos] = value.as_i32().ok_or(Fault::TypeMismatch)?,
            MemBuffer::U32(b) => b[pos] = value.as_u32().ok_or(Fault::TypeMismatch)?,
            MemBuffer::F32(b) => b[pos] = value.as_f32().ok_or(Fault::TypeMismatch)?,
            MemBuffer::Void => unreachable!("checked above"),
        }

        Ok(())
    }

    /// Declared element capacity into a stack-var; void buffers report zero.
    pub(crate) fn buf_len(&mut self, dst: u32, buf: u32) -> Result<(), Fault> {
        self.check_svar(dst)?;
        let capacity = self.buffer_at(buf)?.capacity();

        self.set_svar(dst, Value::U32(capacity))
    }

    /// Zero a buffer's storage; the type is unchanged and void buffers are
    /// a no-op.
    pub(crate) fn buf_clear(&mut self, buf: u32) -> Result<(), Fault> {
        self.buffer_at_mut(buf)?.clear();
        Ok(())
    }

    /// Concatenate two string buffers into a third, truncating at the
    /// storage limit and always terminating.
    pub(crate) fn str_cat(&mut self, dst: u32, src1: u32, src2: u32) -> Result<(), Fault> {
        self.buffer_at(dst)?;
        let a = *self.buffer_at(src1)?.as_u8().ok_or(Fault::TypeMismatch)?;
        let b = *self.buffer_at(src2)?.as_u8().ok_or(Fault::TypeMismatch)?;

        let len1 = str_scan_len(&a);
        let len2 = str_scan_len(&b);

        // The destination keeps its trailing bytes when it already is a
        // string buffer; any other type is retagged over zeroed storage.
        let mut out = self
            .buffer_at(dst)?
            .as_u8()
            .copied()
            .unwrap_or([0; BUFFER_U8_CAPACITY]);

        let mut at = 0;
        while at < len1 && at < STR_MAX_LEN {
            out[at] = a[at];
            at += 1;
        }

        let mut from = 0;
        while from < len2 && at < STR_MAX_LEN {
            out[at] = b[from];
            at += 1;
            from += 1;
        }

        out[at] = 0;
        *self.buffer_at_mut(dst)? = MemBuffer::U8(out);

        Ok(())
    }

    /// Copy a string buffer through and including its terminator.
    pub(crate) fn str_copy(&mut self, dst: u32, src: u32) -> Result<(), Fault> {
        self.buffer_at(dst)?;
        let source = *self.buffer_at(src)?.as_u8().ok_or(Fault::TypeMismatch)?;

        let mut out = self
            .buffer_at(dst)?
            .as_u8()
            .copied()
            .unwrap_or([0; BUFFER_U8_CAPACITY]);

        let mut at = 0;
        loop {
            out[at] = source[at];
            if source[at] == 0 {
                break;
            }
            at += 1;
            if at == BUFFER_U8_CAPACITY {
                // Unterminated source: the copy fills the storage and the
                // final byte becomes the terminator.
                out[STR_MAX_LEN] = 0;
                break;
            }
        }

        *self.buffer_at_mut(dst)? = MemBuffer::U8(out);

        Ok(())
    }

    /// Scanned string length into a stack-var.
    pub(crate) fn str_len(&mut self, dst: u32, buf: u32) -> Result<(), Fault> {
        self.check_svar(dst)?;
        let bytes = self.buffer_at(buf)?.as_u8().ok_or(Fault::TypeMismatch)?;
        let len = str_scan_len(bytes) as u32;

        self.set_svar(dst, Value::U32(len))
    }

    /// Byte-wise string comparison into the condition flags.
    pub(crate) fn str_cmp(&mut self, buf1: u32, buf2: u32) -> Result<(), Fault> {
        let a = *self.buffer_at(buf1)?.as_u8().ok_or(Fault::TypeMismatch)?;
        let b = *self.buffer_at(buf2)?.as_u8().ok_or(Fault::TypeMismatch)?;

        let mut ordering = 0i32;
        for (&x, &y) in a.iter().zip(b.iter()) {
            if x != y {
                ordering = if x < y { -1 } else { 1 };
                break;
            }
            if x == 0 {
                break;
            }
        }

        self.set_cmp_flags(ordering == 0, ordering < 0, ordering > 0);
        Ok(())
    }

    /// Byte at a string position into a stack-var, zero-extended.
    pub(crate) fn str_chr(&mut self, dst: u32, buf: u32, pos: u32) -> Result<(), Fault> {
        self.check_svar(dst)?;
        let bytes = self.buffer_at(buf)?.as_u8().ok_or(Fault::TypeMismatch)?;

        if pos as usize >= BUFFER_U8_CAPACITY {
            return Err(Fault::InvalidBufferPosition);
        }

        let byte = bytes[pos as usize] as u32;
        self.set_svar(dst, Value::U32(byte))
    }

    /// Overwrite one byte of a string buffer. The string is not
    /// re-terminated; writing a zero shortens it, overwriting the
    /// terminator extends it.
    pub(crate) fn str_set_chr(&mut self, buf: u32, pos: u32, chr: u32) -> Result<(), Fault> {
        let bytes = self
            .buffer_at_mut(buf)?
            .as_u8_mut()
            .ok_or(Fault::TypeMismatch)?;

        if pos as usize >= BUFFER_U8_CAPACITY {
            return Err(Fault::InvalidBufferPosition);
        }

        bytes[pos as usize] = (chr & 0xff) as u8;
        Ok(())
    }
}
