//! Read-only view of the CPU between phases.

use sim_core::Ticks;

use crate::cpu::Phase;
use crate::program::Program;
use crate::registers::Registers;

/// One addressed memory word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryCell {
    pub address: u16,
    pub value: u16,
}

/// Everything a debugger panel shows after a phase.
///
/// Taking a snapshot never changes the CPU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub clock: Ticks,
    pub instructions: u64,
    /// Phase that the next `advance()` will perform.
    pub phase: Phase,
    /// `None` until the first instruction has been decoded.
    pub program: Option<Program>,
    pub registers: Registers,
    pub halted: bool,
    /// Up to five words starting two before the PC.
    pub window: Vec<MemoryCell>,
    /// The conventional result slot.
    pub result: MemoryCell,
}

impl Snapshot {
    /// Negative flag, as 0 or 1.
    #[must_use]
    pub const fn negative(&self) -> u16 {
        self.registers.negative()
    }

    /// Zero flag, as 0 or 1.
    #[must_use]
    pub const fn zero(&self) -> u16 {
        self.registers.zero()
    }
}
