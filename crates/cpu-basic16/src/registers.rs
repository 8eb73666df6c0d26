//! Basic16 register file.

use crate::flags;

/// Number of general registers.
pub const REGISTER_COUNT: usize = 8;

/// r5 holds the flags.
pub const PSW_REG: usize = 5;

/// r6 is reserved for a stack pointer. The engine never touches it.
pub const SP_REG: usize = 6;

/// r7 is the program counter.
pub const PC_REG: usize = 7;

/// Register file snapshot for observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Registers(pub [u16; REGISTER_COUNT]);

impl Registers {
    /// Register by 3-bit code. Higher bits of `code` are ignored.
    #[must_use]
    pub const fn get(&self, code: usize) -> u16 {
        self.0[code & 0b111]
    }

    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.0[PC_REG]
    }

    #[must_use]
    pub const fn sp(&self) -> u16 {
        self.0[SP_REG]
    }

    #[must_use]
    pub const fn psw(&self) -> u16 {
        self.0[PSW_REG]
    }

    /// Negative flag from the PSW, as 0 or 1.
    #[must_use]
    pub const fn negative(&self) -> u16 {
        flags::negative(self.psw())
    }

    /// Zero flag from the PSW, as 0 or 1.
    #[must_use]
    pub const fn zero(&self) -> u16 {
        flags::zero(self.psw())
    }
}
