use super::memory::str_scan_len;
use super::Interpreter;
use crate::buffer::MemBuffer;
use crate::consts::*;
use crate::error::InterpreterError;
use crate::value::Value;

use stipple_asm::Fault;

use std::io::{self, BufRead, Write};

impl<I, O> Interpreter<I, O>
where
    I: BufRead,
    O: Write,
{
    pub(crate) fn print_i32(&mut self, src: u32) -> Result<(), InterpreterError> {
        let value = self.svar(src)?.as_i32().ok_or(Fault::TypeMismatch)?;
        write!(self.output, "{value}")?;
        Ok(())
    }

    pub(crate) fn print_u32(&mut self, src: u32) -> Result<(), InterpreterError> {
        let value = self.svar(src)?.as_u32().ok_or(Fault::TypeMismatch)?;
        write!(self.output, "{value}")?;
        Ok(())
    }

    /// Floats print with a fixed six fractional digits.
    pub(crate) fn print_f32(&mut self, src: u32) -> Result<(), InterpreterError> {
        let value = self.svar(src)?.as_f32().ok_or(Fault::TypeMismatch)?;
        write!(self.output, "{value:.6}")?;
        Ok(())
    }

    pub(crate) fn print_str(&mut self, buf: u32) -> Result<(), InterpreterError> {
        let bytes = self
            .buffers
            .get(buf as usize)
            .ok_or(Fault::InvalidBufferIndex)?
            .as_u8()
            .ok_or(Fault::TypeMismatch)?;
        let len = str_scan_len(bytes);

        self.output.write_all(&bytes[..len])?;
        Ok(())
    }

    pub(crate) fn println(&mut self) -> Result<(), InterpreterError> {
        self.output.write_all(b"\n")?;
        Ok(())
    }

    pub(crate) fn read_i32(&mut self, dst: u32) -> Result<(), InterpreterError> {
        self.read_scalar(dst, |s| s.parse().ok().map(Value::I32), Value::I32(0))
    }

    pub(crate) fn read_u32(&mut self, dst: u32) -> Result<(), InterpreterError> {
        self.read_scalar(dst, |s| s.parse().ok().map(Value::U32), Value::U32(0))
    }

    pub(crate) fn read_f32(&mut self, dst: u32) -> Result<(), InterpreterError> {
        self.read_scalar(dst, |s| s.parse().ok().map(Value::F32), Value::F32(0.0))
    }

    /// Read one input line into a string buffer, capped to leave room for
    /// the terminator, and force the buffer's type to `u8`.
    pub(crate) fn read_str(&mut self, buf: u32) -> Result<(), InterpreterError> {
        if buf as usize >= BUFFERS_COUNT {
            return Err(Fault::InvalidBufferIndex.into());
        }

        // A pending prompt may still sit in the output buffer.
        self.output.flush()?;

        let mut bytes = self.buffers[buf as usize]
            .as_u8()
            .copied()
            .unwrap_or([0; BUFFER_U8_CAPACITY]);

        let mut at = 0;
        while at < STR_MAX_LEN {
            match self.next_byte()? {
                None | Some(b'\n') => break,
                Some(byte) => {
                    bytes[at] = byte;
                    at += 1;
                }
            }
        }

        bytes[at] = 0;
        self.buffers[buf as usize] = MemBuffer::U8(bytes);

        Ok(())
    }

    /// Consume one whitespace-delimited token and store its parse, or the
    /// type's zero when parsing fails. The rest of the line is discarded on
    /// failure so a bad token cannot wedge subsequent reads.
    fn read_scalar<F>(&mut self, dst: u32, parse: F, zero: Value) -> Result<(), InterpreterError>
    where
        F: FnOnce(&str) -> Option<Value>,
    {
        self.check_svar(dst)?;
        self.output.flush()?;

        let parsed = match self.read_token()? {
            Some(token) => std::str::from_utf8(&token).ok().and_then(|s| parse(s)),
            None => None,
        };

        let value = match parsed {
            Some(value) => value,
            None => {
                self.discard_line()?;
                zero
            }
        };

        self.set_svar(dst, value)?;
        Ok(())
    }

    /// Next whitespace-delimited token; the trailing delimiter stays in the
    /// stream. `None` at end of input.
    fn read_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            match self.peek_byte()? {
                None => return Ok(None),
                Some(byte) if byte.is_ascii_whitespace() => self.input.consume(1),
                Some(_) => break,
            }
        }

        let mut token = Vec::new();
        loop {
            match self.peek_byte()? {
                None => break,
                Some(byte) if byte.is_ascii_whitespace() => break,
                Some(byte) => {
                    token.push(byte);
                    self.input.consume(1);
                }
            }
        }

        Ok(Some(token))
    }

    /// Drop input up to and including the next newline.
    fn discard_line(&mut self) -> io::Result<()> {
        loop {
            match self.next_byte()? {
                None | Some(b'\n') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.input.consume(1);
        }
        Ok(byte)
    }
}
