//! Basic16 emulator.
//!
//! Loads a raw program image at address 0 and drives the phase-stepped CPU
//! until it executes HLT. The program's answer is read from word 0x64.

pub mod debug;
mod config;
mod emulator;
mod error;

pub use config::EmulatorConfig;
pub use emulator::Emulator;
pub use error::EmulatorError;
