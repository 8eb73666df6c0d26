use cpu_basic16::CpuError;
use format_basic16_bin::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Cpu(#[from] CpuError),
    #[error("cannot load program image")]
    Image(#[from] ImageError),
    #[error("no halt after {limit} phases")]
    PhaseLimit { limit: u64 },
}
