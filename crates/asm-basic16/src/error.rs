//! Assembler errors. Every variant carries the 1-based source line.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    #[error("line {line}: invalid instruction [{token}]")]
    UnknownMnemonic { line: usize, token: String },
    #[error("line {line}: invalid operand {token}")]
    UnresolvableOperand { line: usize, token: String },
    #[error("line {line}: {mnemonic} is missing an operand")]
    MissingOperand { line: usize, mnemonic: &'static str },
    #[error("line {line}: unexpected {token:?}")]
    UnexpectedToken { line: usize, token: String },
    #[error("line {line}: bad hexadecimal literal {token}")]
    InvalidHex { line: usize, token: String },
    #[error("line {line}: operand {value:#x} does not fit (max {max:#x})")]
    OperandOutOfRange { line: usize, value: u16, max: u16 },
    #[error("line {line}: label {name} is already defined")]
    DuplicateLabel { line: usize, name: String },
}
