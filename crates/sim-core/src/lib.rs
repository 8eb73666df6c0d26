//! Core traits and types for phase-stepped CPU simulation.
//!
//! A simulated CPU advances one clock phase at a time. Everything a debugger
//! or a test wants to know about it is reachable through [`Observable`].

mod cpu;
mod observable;
mod ticks;

pub use cpu::Cpu;
pub use observable::{Observable, Value};
pub use ticks::Ticks;
