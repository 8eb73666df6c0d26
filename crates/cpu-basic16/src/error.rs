//! Hardware faults.
//!
//! None of these are recoverable at the instruction level: the engine stops
//! advancing and the driver decides how to report the fault.

use thiserror::Error;

/// Failure to turn a fetched word into an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid opcode {opcode:#06b} in word {word:#06X}")]
    UnknownOpcode { opcode: u8, word: u16 },
}

/// Failure on the memory bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("address {address:#06X} is outside the {size}-word memory")]
    OutOfRange { address: u16, size: usize },
    #[error("image of {len} words does not fit at {base:#06X} in a {size}-word memory")]
    ImageTooLarge { base: u16, len: usize, size: usize },
}

/// Fault raised while the CPU advances a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    #[error("decode fault at {pc:#06X}")]
    Decode {
        pc: u16,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
