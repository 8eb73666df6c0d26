//! Emulator configuration.

use std::time::Duration;

use cpu_basic16::RESULT_ADDR;

/// Configuration for creating an [`Emulator`](crate::Emulator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Pause after every phase. Zero runs flat out.
    pub step_delay: Duration,
    /// Give up after this many phases.
    pub max_phases: Option<u64>,
    /// Hand a snapshot to the observer after every phase.
    pub trace: bool,
    /// Word reported as the program's result.
    pub result_address: u16,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::ZERO,
            max_phases: None,
            trace: false,
            result_address: RESULT_ADDR,
        }
    }
}
