//! The Basic16 machine: a CPU plus the loop that drives it.

use std::path::Path;
use std::thread;

use cpu_basic16::{Basic16, CpuError, Snapshot};
use format_basic16_bin::ProgramImage;
use sim_core::Cpu;

use crate::config::EmulatorConfig;
use crate::error::EmulatorError;

/// Basic16 machine.
#[derive(Debug, Clone)]
pub struct Emulator {
    cpu: Basic16,
    config: EmulatorConfig,
}

impl Emulator {
    /// Create a machine with empty memory.
    #[must_use]
    pub fn new(config: EmulatorConfig) -> Self {
        Self {
            cpu: Basic16::new(),
            config,
        }
    }

    /// Replace the machine state with a fresh CPU running `image` from 0.
    pub fn load_image(&mut self, image: &ProgramImage) -> Result<(), EmulatorError> {
        self.cpu = Basic16::with_program(image.words()).map_err(CpuError::from)?;
        log::info!("loaded {} words", image.len());
        Ok(())
    }

    /// Read an image file and load it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), EmulatorError> {
        let image = ProgramImage::read(path)?;
        self.load_image(&image)
    }

    /// Perform one phase. Returns `true` once the CPU has halted.
    pub fn step(&mut self) -> Result<bool, EmulatorError> {
        if let Some(limit) = self.config.max_phases
            && !self.cpu.is_halted()
            && self.cpu.clock().get() >= limit
        {
            return Err(EmulatorError::PhaseLimit { limit });
        }
        Ok(self.cpu.tick()?)
    }

    /// Run until HLT and return the result word.
    ///
    /// With tracing on, `observer` sees a snapshot after every phase,
    /// including the halting one.
    pub fn run(&mut self, mut observer: impl FnMut(&Snapshot)) -> Result<u16, EmulatorError> {
        loop {
            let halted = self.step()?;
            if self.config.trace {
                observer(&self.cpu.snapshot());
            }
            if halted {
                break;
            }
            if !self.config.step_delay.is_zero() {
                thread::sleep(self.config.step_delay);
            }
        }
        let result = self.result();
        log::debug!("result word {result:#06x} ({result})");
        Ok(result)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.cpu.snapshot()
    }

    /// The word at the configured result address.
    #[must_use]
    pub fn result(&self) -> u16 {
        self.cpu
            .memory()
            .peek(self.config.result_address)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn cpu(&self) -> &Basic16 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Basic16 {
        &mut self.cpu
    }

    #[must_use]
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }
}
