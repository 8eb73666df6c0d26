//! Phase-stepped Basic16 teaching CPU.
//!
//! Basic16 is a minimal 16-bit machine: eight registers, a 256-word memory
//! and fifteen instructions. Each call to `tick()` advances exactly one of
//! the six clock phases (fetch, fetch, operand, [operand], execute,
//! write-back), so every bus latch can be watched as it changes.

pub mod alu;
mod cpu;
mod error;
mod flags;
pub mod isa;
mod memory;
mod program;
mod registers;
mod snapshot;

pub use alu::AluMode;
pub use cpu::{Basic16, Phase};
pub use error::{CpuError, DecodeError, MemoryError};
pub use flags::Psw;
pub use isa::{Instruction, InstructionType, OperandType, Register};
pub use memory::{MEMORY_SIZE, Memory, MemoryMode, RESULT_ADDR};
pub use program::Program;
pub use registers::{PC_REG, PSW_REG, REGISTER_COUNT, Registers, SP_REG};
pub use snapshot::{MemoryCell, Snapshot};
