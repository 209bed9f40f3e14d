//! Diagnostic emit hooks consumed by the host shell.

use super::Interpreter;
use crate::consts::*;
use crate::value::Value;

use stipple_asm::Instruction;

use std::fmt::Write as _;

impl<I, O> Interpreter<I, O> {
    /// One-line disassembly of the instruction at `pc`.
    ///
    /// Positions that do not decode render as `<invalid>`; reserved opcode
    /// bytes render as `unknown`.
    pub fn disassemble(&self, pc: u32) -> String {
        match Instruction::decode(self.program.as_slice(), pc as usize) {
            Ok(instruction) => {
                let name = instruction
                    .opcode()
                    .map(|op| op.name())
                    .unwrap_or("unknown");
                format!("0x{pc:04X}: {name}")
            }
            Err(_) => format!("0x{pc:04X}: <invalid>"),
        }
    }

    /// Human-readable dump of the execution registers and the current
    /// frame's live stack-vars.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== VM State ===");
        let _ = writeln!(
            out,
            "PC: 0x{:04X}  SP: {}  Flags: 0x{:02X}",
            self.pc,
            self.sp,
            self.flags.bits()
        );

        let last_error = self
            .last_error
            .map(|fault| fault.description())
            .unwrap_or("Success");
        let _ = writeln!(out, "Last Error: {last_error}");

        let _ = writeln!(out, "\nStack Frame {}:", self.sp);
        for idx in 0..STACK_VAR_COUNT {
            let value = self.frames[self.sp].stack_var(idx).copied().unwrap_or_default();
            if value.is_void() {
                continue;
            }

            match value {
                Value::I32(v) => {
                    let _ = writeln!(out, "  s{idx}: {} = {v}", value.type_name());
                }
                Value::U32(v) => {
                    let _ = writeln!(out, "  s{idx}: {} = {v}", value.type_name());
                }
                Value::F32(v) => {
                    let _ = writeln!(out, "  s{idx}: {} = {v:.6}", value.type_name());
                }
                // Other tags print no value, only the type name.
                _ => {
                    let _ = writeln!(out, "  s{idx}: {} = ", value.type_name());
                }
            }
        }

        out
    }
}
