//! ALU operations for Basic16.
//!
//! The ALU is combinational: a mode and two 16-bit inputs in, one 16-bit
//! result out. Only `Cmp` has a side effect, and that goes through the
//! borrowed PSW view.

use crate::flags::Psw;

/// Operation selected on the ALU's mode lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AluMode {
    Add,
    Sub,
    Cmp,
    And,
    Or,
    /// No instruction selects this mode.
    Xor,
    /// No instruction selects this mode.
    Not,
    ShiftL,
    ShiftR,
    Inc,
    Dec,
    /// Pass `a` straight through to the source bus.
    #[default]
    Nop,
}

/// Compute `mode` over the A and B buses.
///
/// Arithmetic wraps at 16 bits. Shifts move `a` one bit, zero-filled, and
/// ignore `b`.
///
/// `Cmp` subtracts like `Sub` and updates the flags: zero is set or cleared
/// on every compare, but negative is only touched when the result is
/// non-zero (set when negative as `i16`, cleared when positive). A compare of
/// equal values leaves negative as it was.
pub fn calc(mode: AluMode, a: u16, b: u16, psw: &mut Psw<'_>) -> u16 {
    match mode {
        AluMode::Add => a.wrapping_add(b),
        AluMode::Sub => a.wrapping_sub(b),
        AluMode::Cmp => {
            let result = a.wrapping_sub(b);
            let signed = result as i16;
            if signed < 0 {
                psw.set_negative(true);
            } else if signed > 0 {
                psw.set_negative(false);
            }
            psw.set_zero(result == 0);
            result
        }
        AluMode::And => a & b,
        AluMode::Or => a | b,
        AluMode::Xor => a ^ b,
        AluMode::Not => !a,
        AluMode::ShiftL => a << 1,
        AluMode::ShiftR => a >> 1,
        AluMode::Inc => a.wrapping_add(1),
        AluMode::Dec => a.wrapping_sub(1),
        AluMode::Nop => a,
    }
}
