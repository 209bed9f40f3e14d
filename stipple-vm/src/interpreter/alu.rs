use super::Interpreter;
use crate::consts::*;
use crate::value::Value;

use stipple_asm::Fault;

impl<I, O> Interpreter<I, O> {
    /// `dst = f(src1, src2)` over `i32`. Both sources must carry the `i32`
    /// tag; the destination takes it.
    pub(crate) fn alu_i32<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(i32, i32) -> i32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_i32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_i32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::I32(f(a, b)))
    }

    /// `i32` division and modulo; faults before any write when the divisor
    /// is zero.
    pub(crate) fn alu_i32_div<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(i32, i32) -> i32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_i32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_i32().ok_or(Fault::TypeMismatch)?;

        if b == 0 {
            return Err(Fault::DivisionByZero);
        }

        self.set_svar(dst, Value::I32(f(a, b)))
    }

    pub(crate) fn alu_unary_i32<F>(&mut self, dst: u32, src: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(i32) -> i32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src)?.as_i32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::I32(f(a)))
    }

    pub(crate) fn alu_u32<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(u32, u32) -> u32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_u32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_u32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::U32(f(a, b)))
    }

    pub(crate) fn alu_u32_div<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(u32, u32) -> u32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_u32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_u32().ok_or(Fault::TypeMismatch)?;

        if b == 0 {
            return Err(Fault::DivisionByZero);
        }

        self.set_svar(dst, Value::U32(f(a, b)))
    }

    pub(crate) fn alu_unary_u32<F>(&mut self, dst: u32, src: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(u32) -> u32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src)?.as_u32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::U32(f(a)))
    }

    /// Shifts share the `u32` scaffolding but bound the count first.
    pub(crate) fn alu_shift_u32<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(u32, u32) -> u32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_u32().ok_or(Fault::TypeMismatch)?;
        let count = self.svar(src2)?.as_u32().ok_or(Fault::TypeMismatch)?;

        if count >= SHIFT_LIMIT {
            return Err(Fault::Bounds);
        }

        self.set_svar(dst, Value::U32(f(a, count)))
    }

    pub(crate) fn alu_f32<F>(&mut self, dst: u32, src1: u32, src2: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(f32, f32) -> f32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_f32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_f32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::F32(f(a, b)))
    }

    /// `f32` division faults on an exactly-zero divisor instead of
    /// producing an infinity.
    pub(crate) fn alu_f32_div(&mut self, dst: u32, src1: u32, src2: u32) -> Result<(), Fault> {
        self.check_svar(dst)?;
        let a = self.svar(src1)?.as_f32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_f32().ok_or(Fault::TypeMismatch)?;

        if b == 0.0 {
            return Err(Fault::DivisionByZero);
        }

        self.set_svar(dst, Value::F32(a / b))
    }

    pub(crate) fn alu_unary_f32<F>(&mut self, dst: u32, src: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(f32) -> f32,
    {
        self.check_svar(dst)?;
        let a = self.svar(src)?.as_f32().ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, Value::F32(f(a)))
    }

    /// `dst = f(src)` where `f` also picks the destination tag; `None`
    /// means the source carried the wrong tag.
    pub(crate) fn convert<F>(&mut self, dst: u32, src: u32, f: F) -> Result<(), Fault>
    where
        F: FnOnce(&Value) -> Option<Value>,
    {
        self.check_svar(dst)?;
        let source = self.svar(src)?;
        let converted = f(&source).ok_or(Fault::TypeMismatch)?;

        self.set_svar(dst, converted)
    }

    pub(crate) fn cmp_i32(&mut self, src1: u32, src2: u32) -> Result<(), Fault> {
        let a = self.svar(src1)?.as_i32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_i32().ok_or(Fault::TypeMismatch)?;

        self.set_cmp_flags(a == b, a < b, a > b);
        Ok(())
    }

    pub(crate) fn cmp_u32(&mut self, src1: u32, src2: u32) -> Result<(), Fault> {
        let a = self.svar(src1)?.as_u32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_u32().ok_or(Fault::TypeMismatch)?;

        self.set_cmp_flags(a == b, a < b, a > b);
        Ok(())
    }

    /// Float equality uses an absolute tolerance; ordering stays strict
    /// IEEE. Near-equal unequal values may set Z together with L or G, and
    /// NaN operands set no flag at all.
    pub(crate) fn cmp_f32(&mut self, src1: u32, src2: u32) -> Result<(), Fault> {
        let a = self.svar(src1)?.as_f32().ok_or(Fault::TypeMismatch)?;
        let b = self.svar(src2)?.as_f32().ok_or(Fault::TypeMismatch)?;

        self.set_cmp_flags((a - b).abs() < F32_CMP_TOLERANCE, a < b, a > b);
        Ok(())
    }
}
